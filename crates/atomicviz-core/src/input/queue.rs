use glam::Vec3;

use crate::app::ViewMode;
use crate::atom::builder::Particle;
use crate::chem::element::Element;
use crate::sandbox::engine::AtomId;

/// Pointer-driven sandbox events from the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SandboxEvent {
    /// Toolbar button: spawn an atom near the origin.
    AddAtom { element: Element },
    /// Pointer moved while dragging an atom, already projected onto the z=0 plane.
    DragAtom { id: AtomId, position: Vec3 },
    /// Pointer released: the drag gesture is over.
    DragEnd { id: AtomId },
    /// Delete a single atom and its bonds.
    RemoveAtom { id: AtomId },
    /// "Clear All".
    Reset,
}

/// Every inbound event the application understands.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Sandbox(SandboxEvent),
    SetViewMode(ViewMode),
    /// Pick the element shown in the atom explorer, by symbol.
    SelectElement(String),
    /// Pick the reaction shown in the reaction lab, by id.
    SelectReaction(String),
    TogglePlayback,
    ResetReaction,
    AddParticle(Particle),
    ResetBuilder,
}

impl From<SandboxEvent> for InputEvent {
    fn from(event: SandboxEvent) -> Self {
        InputEvent::Sandbox(event)
    }
}

/// A queue of input events.
/// JS pushes events as they arrive; Rust drains them once per tick.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: impl Into<InputEvent>) {
        self.events.push(event.into());
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
