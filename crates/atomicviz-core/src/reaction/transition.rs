// reaction/transition.rs
//
// Eases a reaction scene from one stage to the next.
//
// Usage:
//   let mut t = StageTransition::between(Some(&prev), &next, 1.0, Easing::CubicInOut);
//   t.tick(dt);
//   let atoms = t.atoms();   // interpolated positions and scales

use glam::Vec3;
use serde::Serialize;

use super::catalog::Stage;
use crate::extensions::easing::{ease, ease_vec3, Easing};

/// Atoms scaled below this are not drawn.
const VISIBLE_SCALE: f32 = 1e-3;

fn stage_scale(hidden: bool) -> f32 {
    if hidden {
        0.0
    } else {
        1.0
    }
}

/// One atom's start and end state across a transition.
#[derive(Debug, Clone)]
struct Track {
    id: String,
    element: String,
    from: Vec3,
    to: Vec3,
    from_scale: f32,
    to_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameAtom {
    pub id: String,
    pub element: String,
    pub position: Vec3,
    pub scale: f32,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameBond {
    pub start: String,
    pub end: String,
    pub from: Vec3,
    pub to: Vec3,
}

/// What the reaction lab renders this frame.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionFrame {
    pub reaction: String,
    pub name: String,
    pub equation: String,
    pub stage: usize,
    pub stage_count: usize,
    pub playing: bool,
    /// Eased progress of the current stage transition, 0.0 to 1.0.
    pub progress: f32,
    pub atoms: Vec<FrameAtom>,
    pub bonds: Vec<FrameBond>,
}

/// Interpolation from the previous stage's scene to the current one.
#[derive(Debug, Clone, Default)]
pub struct StageTransition {
    tracks: Vec<Track>,
    bonds: Vec<(String, String)>,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl StageTransition {
    /// Atoms are matched by id; one absent from `prev` starts at its target.
    /// With no previous stage the transition is already complete.
    pub fn between(prev: Option<&Stage>, next: &Stage, duration: f32, easing: Easing) -> Self {
        let tracks = next
            .atoms
            .iter()
            .map(|atom| {
                let to_scale = stage_scale(atom.hidden);
                let (from, from_scale) = prev
                    .and_then(|stage| stage.atom(&atom.id))
                    .map(|p| (p.position, stage_scale(p.hidden)))
                    .unwrap_or((atom.position, to_scale));
                Track {
                    id: atom.id.clone(),
                    element: atom.element.clone(),
                    from,
                    to: atom.position,
                    from_scale,
                    to_scale,
                }
            })
            .collect();

        let duration = duration.max(0.0);
        Self {
            tracks,
            bonds: next
                .bonds
                .iter()
                .map(|b| (b.start.clone(), b.end.clone()))
                .collect(),
            duration,
            elapsed: if prev.is_some() { 0.0 } else { duration },
            easing,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn atoms(&self) -> Vec<FrameAtom> {
        let t = self.progress();
        self.tracks
            .iter()
            .map(|track| {
                let scale = ease(track.from_scale, track.to_scale, t, self.easing);
                FrameAtom {
                    id: track.id.clone(),
                    element: track.element.clone(),
                    position: ease_vec3(track.from, track.to, t, self.easing),
                    scale,
                    visible: scale > VISIBLE_SCALE,
                }
            })
            .collect()
    }

    /// Bonds of the target stage whose endpoints are both visible in `atoms`.
    pub fn bonds(&self, atoms: &[FrameAtom]) -> Vec<FrameBond> {
        let visible = |id: &str| atoms.iter().find(|a| a.id == id && a.visible);
        self.bonds
            .iter()
            .filter_map(|(start, end)| {
                let a = visible(start)?;
                let b = visible(end)?;
                Some(FrameBond {
                    start: start.clone(),
                    end: end.clone(),
                    from: a.position,
                    to: b.position,
                })
            })
            .collect()
    }
}
