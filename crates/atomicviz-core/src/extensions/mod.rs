// extensions/mod.rs
//
// Decoupled helpers that views opt into. No knowledge of atoms or reactions.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3, ease, ease_vec3};
