//! Molecule sandbox: routes drag-and-drop events to the bonding engine and
//! announces recognized molecules.

pub mod engine;

use glam::Vec3;
use log::{info, warn};
use serde::Serialize;

use crate::chem::element::Element;
use crate::chem::molecules::{self, MoleculeDef};
use crate::config::SandboxConfig;
use crate::input::queue::SandboxEvent;

use engine::{Atom, AtomId, Bond, BondEvaluation, BondingEngine};

/// Everything the renderer needs to draw the sandbox.
#[derive(Debug, Clone, Serialize)]
pub struct SandboxSnapshot {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub notification: Option<String>,
    /// Formulas discovered so far, in discovery order.
    pub discovered: Vec<&'static str>,
}

/// The sandbox view state.
#[derive(Debug, Clone)]
pub struct Sandbox {
    engine: BondingEngine,
    discovered: Vec<&'static MoleculeDef>,
    notification: Option<String>,
    /// Seconds left before the notification clears.
    notification_ttl: f32,
}

impl Sandbox {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            engine: BondingEngine::new(config),
            discovered: Vec::new(),
            notification: None,
            notification_ttl: 0.0,
        }
    }

    pub fn engine(&self) -> &BondingEngine {
        &self.engine
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.as_deref()
    }

    /// Apply one inbound UI event.
    pub fn handle(&mut self, event: &SandboxEvent) {
        match *event {
            SandboxEvent::AddAtom { element } => {
                self.add_atom(element);
            }
            SandboxEvent::DragAtom { id, position } => {
                self.drag_atom(id, position);
            }
            SandboxEvent::DragEnd { id } => {
                self.drag_end(id);
            }
            SandboxEvent::RemoveAtom { id } => {
                if !self.engine.remove_atom(id) {
                    warn!("sandbox: remove for unknown atom {:?}", id);
                }
            }
            SandboxEvent::Reset => self.reset(),
        }
    }

    pub fn add_atom(&mut self, element: Element) -> Atom {
        self.engine.add_atom(element)
    }

    /// Pointer-move during a drag: position only.
    pub fn drag_atom(&mut self, id: AtomId, position: Vec3) -> bool {
        self.engine.update_position(id, position)
    }

    /// Pointer-up: evaluate bonds, then check whether a molecule was completed.
    pub fn drag_end(&mut self, id: AtomId) -> BondEvaluation {
        let result = self.engine.evaluate_bonds(id);
        if result.bonds_changed() {
            self.check_molecule(id);
        }
        result
    }

    /// Match the moved atom's bonded cluster against the molecule catalog.
    fn check_molecule(&mut self, id: AtomId) {
        let cluster = self.engine.connected_component(id);
        let counts = molecules::composition(
            cluster
                .iter()
                .filter_map(|&atom| self.engine.atom(atom))
                .map(|atom| atom.element),
        );

        let Some(molecule) = molecules::recognize(&counts) else {
            return;
        };
        if self.discovered.contains(&molecule) {
            return;
        }

        info!("sandbox: discovered {} ({})", molecule.name, molecule.formula);
        self.discovered.push(molecule);
        self.notification = Some(format!(
            "Discovered {} ({})!",
            molecule.name, molecule.formula
        ));
        self.notification_ttl = self.engine.config().notification_secs;
    }

    /// Age the notification.
    pub fn tick(&mut self, dt: f32) {
        if self.notification.is_none() {
            return;
        }
        self.notification_ttl -= dt;
        if self.notification_ttl <= 0.0 {
            self.notification = None;
        }
    }

    /// Clear atoms, bonds, discoveries and any pending notification.
    pub fn reset(&mut self) {
        self.engine.clear();
        self.discovered.clear();
        self.notification = None;
        self.notification_ttl = 0.0;
    }

    pub fn snapshot(&self) -> SandboxSnapshot {
        SandboxSnapshot {
            atoms: self.engine.atoms().to_vec(),
            bonds: self.engine.bonds().to_vec(),
            notification: self.notification.clone(),
            discovered: self.discovered.iter().map(|m| m.formula).collect(),
        }
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}
