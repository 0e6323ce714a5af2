//! Reaction lab: catalog, timed stage playback and stage-to-stage easing.

pub mod catalog;
pub mod player;
pub mod transition;
