//! Chemistry reference data: the periodic table, the sandbox element set
//! and the catalog of recognizable molecules.

pub mod element;
pub mod molecules;
pub mod registry;
