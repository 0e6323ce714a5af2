//! Application state: the four views and the routing of UI events to them.

use std::fmt;
use std::str::FromStr;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::atom::builder::{AtomBuilder, BuilderSnapshot};
use crate::atom::orbits::OrbitModel;
use crate::chem::registry::{ElementRegistry, ElementSummary};
use crate::config::AppConfig;
use crate::core::rng::Rng;
use crate::error::{DataError, ParseNameError};
use crate::input::queue::InputEvent;
use crate::reaction::catalog::{ReactionCatalog, ReactionKind};
use crate::reaction::player::ReactionPlayer;
use crate::sandbox::Sandbox;

const DEFAULT_ELEMENT: &str = "U";
const DEFAULT_REACTION: &str = "water-formation";

/// Which view the renderer shows. Any view may switch to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Atom,
    Reaction,
    Builder,
    Sandbox,
}

impl ViewMode {
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Atom => "atom",
            ViewMode::Reaction => "reaction",
            ViewMode::Builder => "builder",
            ViewMode::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewMode {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atom" => Ok(ViewMode::Atom),
            "reaction" => Ok(ViewMode::Reaction),
            "builder" => Ok(ViewMode::Builder),
            "sandbox" => Ok(ViewMode::Sandbox),
            _ => Err(ParseNameError::new("view mode", s)),
        }
    }
}

/// Catalog entry for the reaction picker.
#[derive(Debug, Clone, Serialize)]
pub struct ReactionSummary {
    pub id: String,
    pub name: String,
    pub kind: ReactionKind,
    pub equation: String,
}

/// UI chrome state: which view, which element, which reaction.
#[derive(Debug, Clone, Serialize)]
pub struct AppStatus {
    pub view_mode: ViewMode,
    pub element: String,
    pub reaction: String,
    pub playing: bool,
    pub stage: usize,
    pub stage_count: usize,
    pub reactions: Vec<ReactionSummary>,
}

pub struct AppState {
    registry: ElementRegistry,
    reactions: ReactionCatalog,
    view_mode: ViewMode,
    explorer: OrbitModel,
    player: ReactionPlayer,
    sandbox: Sandbox,
    builder: AtomBuilder,
    /// Orbit jitter stream, separate from the sandbox's spawn stream.
    rng: Rng,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, DataError> {
        let registry = ElementRegistry::load()?;
        let reactions = ReactionCatalog::load(&registry)?;

        let element = registry
            .get_or_hydrogen(DEFAULT_ELEMENT)
            .cloned()
            .ok_or(DataError::MissingDefault("elements"))?;
        let reaction = reactions
            .get(DEFAULT_REACTION)
            .or_else(|| reactions.first())
            .cloned()
            .ok_or(DataError::MissingDefault("reactions"))?;

        let mut rng = Rng::new(config.sandbox.seed_or_default().wrapping_add(1));
        let explorer = OrbitModel::new(element, config.orbits.clone(), &mut rng);

        info!(
            "atomicviz: {} elements, {} reactions",
            registry.len(),
            reactions.len()
        );

        Ok(Self {
            player: ReactionPlayer::new(reaction, config.playback.clone()),
            sandbox: Sandbox::new(config.sandbox.clone()),
            builder: AtomBuilder::new(config.builder.clone()),
            view_mode: ViewMode::default(),
            registry,
            reactions,
            explorer,
            rng,
        })
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Sandbox(e) => self.sandbox.handle(e),
            InputEvent::SetViewMode(mode) => {
                if *mode != self.view_mode {
                    info!("view: {} -> {}", self.view_mode, mode);
                    self.view_mode = *mode;
                }
            }
            InputEvent::SelectElement(symbol) => self.select_element(symbol),
            InputEvent::SelectReaction(id) => match self.reactions.get(id) {
                Some(reaction) => self.player.select(reaction.clone()),
                None => warn!("unknown reaction '{}'", id),
            },
            InputEvent::TogglePlayback => self.player.toggle(),
            InputEvent::ResetReaction => self.player.reset(),
            InputEvent::AddParticle(particle) => self.builder.add(*particle),
            InputEvent::ResetBuilder => self.builder.reset(),
        }
    }

    /// Unknown symbols fall back to hydrogen.
    fn select_element(&mut self, symbol: &str) {
        if !self.registry.contains(symbol) {
            warn!("unknown element '{}', showing hydrogen", symbol);
        }
        if let Some(element) = self.registry.get_or_hydrogen(symbol) {
            self.explorer.set_element(element.clone(), &mut self.rng);
        }
    }

    /// Advance animation clocks, playback and notification lifetimes.
    pub fn tick(&mut self, dt: f32) {
        self.explorer.tick(dt);
        self.player.tick(dt);
        self.sandbox.tick(dt);
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn reactions(&self) -> &ReactionCatalog {
        &self.reactions
    }

    pub fn explorer(&self) -> &OrbitModel {
        &self.explorer
    }

    pub fn player(&self) -> &ReactionPlayer {
        &self.player
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }

    pub fn builder(&self) -> &AtomBuilder {
        &self.builder
    }

    pub fn builder_snapshot(&self) -> BuilderSnapshot {
        self.builder.snapshot(&self.registry)
    }

    /// Periodic table picker cells, with the explorer's element marked active.
    pub fn periodic_table(&self) -> Vec<ElementSummary> {
        self.registry.summaries(&self.explorer.element().symbol)
    }

    pub fn status(&self) -> AppStatus {
        AppStatus {
            view_mode: self.view_mode,
            element: self.explorer.element().symbol.clone(),
            reaction: self.player.reaction().id.clone(),
            playing: self.player.is_playing(),
            stage: self.player.stage(),
            stage_count: self.player.stage_count(),
            reactions: self
                .reactions
                .iter()
                .map(|r| ReactionSummary {
                    id: r.id.clone(),
                    name: r.name.clone(),
                    kind: r.kind,
                    equation: r.equation.clone(),
                })
                .collect(),
        }
    }
}
