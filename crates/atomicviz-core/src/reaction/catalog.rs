//! Reaction catalog loaded from embedded JSON.
//!
//! A reaction is an ordered list of stages. Each stage is a complete scene:
//! every atom with its target position (atoms keep their string id across
//! stages so the renderer can ease them), plus the bonds drawn in that stage.

use std::collections::HashSet;

use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::chem::registry::ElementRegistry;
use crate::error::DataError;

const REACTIONS_JSON: &str = include_str!("../../data/reactions.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReactionKind {
    Chemical,
    Nuclear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageAtom {
    pub id: String,
    /// Periodic table symbol; any element in the registry, not only sandbox ones.
    pub element: String,
    pub position: Vec3,
    /// Present in the scene but scaled to zero (e.g. fission products before the split).
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageBond {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub atoms: Vec<StageAtom>,
    #[serde(default)]
    pub bonds: Vec<StageBond>,
}

impl Stage {
    pub fn atom(&self, id: &str) -> Option<&StageAtom> {
        self.atoms.iter().find(|a| a.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ReactionKind,
    pub equation: String,
    pub stages: Vec<Stage>,
}

impl Reaction {
    /// Reject stages the player cannot render.
    fn validate(&self, registry: &ElementRegistry) -> Result<(), DataError> {
        if self.stages.is_empty() {
            return Err(DataError::NoStages {
                reaction: self.id.clone(),
            });
        }

        for (stage_idx, stage) in self.stages.iter().enumerate() {
            if stage.atoms.is_empty() {
                return Err(DataError::EmptyStage {
                    reaction: self.id.clone(),
                    stage: stage_idx,
                });
            }

            let mut ids = HashSet::new();
            for atom in &stage.atoms {
                if !registry.contains(&atom.element) {
                    return Err(DataError::UnknownElement {
                        reaction: self.id.clone(),
                        stage: stage_idx,
                        symbol: atom.element.clone(),
                    });
                }
                if !ids.insert(atom.id.as_str()) {
                    return Err(DataError::DuplicateAtom {
                        reaction: self.id.clone(),
                        stage: stage_idx,
                        atom: atom.id.clone(),
                    });
                }
            }

            for bond in &stage.bonds {
                for end in [&bond.start, &bond.end] {
                    if !ids.contains(end.as_str()) {
                        return Err(DataError::DanglingBond {
                            reaction: self.id.clone(),
                            stage: stage_idx,
                            atom: end.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ReactionsJson {
    reactions: Vec<Reaction>,
}

/// Validated reactions, in file order.
#[derive(Debug, Clone)]
pub struct ReactionCatalog {
    reactions: Vec<Reaction>,
}

impl ReactionCatalog {
    /// Load the embedded catalog.
    pub fn load(registry: &ElementRegistry) -> Result<Self, DataError> {
        Self::from_json(REACTIONS_JSON, registry)
    }

    pub fn from_json(json: &str, registry: &ElementRegistry) -> Result<Self, DataError> {
        let raw: ReactionsJson = serde_json::from_str(json)?;
        for reaction in &raw.reactions {
            reaction.validate(registry)?;
        }
        debug!("loaded {} reactions", raw.reactions.len());
        Ok(Self {
            reactions: raw.reactions,
        })
    }

    pub fn get(&self, id: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.id == id)
    }

    pub fn first(&self) -> Option<&Reaction> {
        self.reactions.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.iter()
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }
}
