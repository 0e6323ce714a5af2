pub mod builder;
pub mod orbits;
