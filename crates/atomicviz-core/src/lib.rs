pub mod app;
pub mod atom;
pub mod chem;
pub mod config;
pub mod core;
pub mod error;
pub mod extensions;
pub mod input;
pub mod reaction;
pub mod sandbox;

// Re-export key types at crate root for convenience
pub use app::{AppState, AppStatus, ReactionSummary, ViewMode};
pub use atom::builder::{AtomBuilder, BuilderSnapshot, Nucleon, Particle};
pub use atom::orbits::{ElectronOrbit, ExplorerFrame, OrbitModel};
pub use chem::element::Element;
pub use chem::molecules::{MoleculeDef, MOLECULES};
pub use chem::registry::{ElementCategory, ElementData, ElementRegistry, ElementSummary};
pub use config::{AppConfig, BuilderConfig, OrbitConfig, PlaybackConfig, SandboxConfig};
pub use core::rng::Rng;
pub use core::time::IntervalTimer;
pub use error::{DataError, ParseNameError};
pub use extensions::easing::{ease, ease_vec3, lerp, lerp_vec3, Easing};
pub use input::queue::{InputEvent, InputQueue, SandboxEvent};
pub use reaction::catalog::{Reaction, ReactionCatalog, ReactionKind, Stage, StageAtom, StageBond};
pub use reaction::player::ReactionPlayer;
pub use reaction::transition::{FrameAtom, FrameBond, ReactionFrame, StageTransition};
pub use sandbox::engine::{Atom, AtomId, Bond, BondEvaluation, BondId, BondingEngine};
pub use sandbox::{Sandbox, SandboxSnapshot};
