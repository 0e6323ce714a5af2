//! Periodic table data structures and registry.
//!
//! Loads element data from embedded JSON. Covers periods 1-4 plus silver,
//! gold and uranium, which is everything the explorer and reactions use.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// Embed the element table at compile time.
const ELEMENTS_JSON: &str = include_str!("../../data/elements.json");

/// Raw JSON element structure.
#[derive(Debug, Deserialize)]
struct RawElement {
    symbol: String,
    name: String,
    atomic_number: u32,
    category: String,
    color: String,
    radius: f32,
    mass: f64,
    shells: Vec<u32>,
    xpos: u32,
    ypos: u32,
    #[serde(default)]
    description: Option<String>,
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct ElementsJson {
    elements: Vec<RawElement>,
}

/// Element category for color coding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementCategory {
    AlkaliMetal,
    AlkalineEarthMetal,
    TransitionMetal,
    PostTransitionMetal,
    Metalloid,
    NonMetal,
    Halogen,
    NobleGas,
    Actinide,
    Unknown,
}

impl ElementCategory {
    /// Parse category string from JSON.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alkali metal" => Self::AlkaliMetal,
            "alkaline earth" | "alkaline earth metal" => Self::AlkalineEarthMetal,
            "transition metal" => Self::TransitionMetal,
            "post-transition metal" => Self::PostTransitionMetal,
            "metalloid" => Self::Metalloid,
            "nonmetal" => Self::NonMetal,
            "halogen" => Self::Halogen,
            "noble gas" => Self::NobleGas,
            "actinide" => Self::Actinide,
            _ => Self::Unknown,
        }
    }
}

/// Processed element data for runtime use.
#[derive(Debug, Clone, Serialize)]
pub struct ElementData {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    pub category: ElementCategory,
    pub category_name: String,
    /// Display color as linear RGB in [0, 1].
    pub color: [f32; 3],
    /// Nucleus radius in scene units.
    pub radius: f32,
    pub mass: f64,
    /// Electron count per shell, innermost first.
    pub shells: Vec<u32>,
    /// Periodic table grid column (1-18).
    pub xpos: u32,
    /// Periodic table grid row.
    pub ypos: u32,
    pub description: String,
    pub valence_electrons: u32,
}

impl ElementData {
    pub fn electron_count(&self) -> u32 {
        self.shells.iter().sum()
    }

    /// Picker cell for this element.
    pub fn summary(&self, active: bool) -> ElementSummary {
        ElementSummary {
            atomic_number: self.atomic_number,
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            color: self.color,
            category: self.category,
            xpos: self.xpos,
            ypos: self.ypos,
            active,
        }
    }
}

/// One cell of the periodic table picker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSummary {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    pub color: [f32; 3],
    pub category: ElementCategory,
    /// Grid column (1-18).
    pub xpos: u32,
    /// Grid row.
    pub ypos: u32,
    /// The element currently shown in the explorer.
    pub active: bool,
}

/// Parse `#RRGGBB` to RGB floats. Falls back to neutral grey.
fn parse_hex_color(hex: &str) -> [f32; 3] {
    let h = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        h.get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .map(|v| v as f32 / 255.0)
    };
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) if h.len() == 6 => [r, g, b],
        _ => [0.7, 0.7, 0.7],
    }
}

/// Element registry with O(1) lookup by symbol or atomic number.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    /// Sorted by atomic number.
    elements: Vec<ElementData>,
    by_symbol: HashMap<String, usize>,
    by_number: HashMap<u32, usize>,
}

impl ElementRegistry {
    /// Load the registry from embedded JSON.
    pub fn load() -> Result<Self, DataError> {
        Self::from_json(ELEMENTS_JSON)
    }

    /// Parse registry from JSON string.
    pub fn from_json(json: &str) -> Result<Self, DataError> {
        let raw: ElementsJson = serde_json::from_str(json)?;

        let mut elements: Vec<ElementData> = raw
            .elements
            .into_iter()
            .map(|raw| ElementData {
                atomic_number: raw.atomic_number,
                valence_electrons: raw.shells.last().copied().unwrap_or(0),
                category: ElementCategory::parse(&raw.category),
                category_name: raw.category,
                color: parse_hex_color(&raw.color),
                symbol: raw.symbol,
                name: raw.name,
                radius: raw.radius,
                mass: raw.mass,
                shells: raw.shells,
                xpos: raw.xpos,
                ypos: raw.ypos,
                description: raw
                    .description
                    .unwrap_or_else(|| "No description available.".to_string()),
            })
            .collect();
        elements.sort_by_key(|e| e.atomic_number);

        let mut by_symbol = HashMap::new();
        let mut by_number = HashMap::new();
        for (idx, element) in elements.iter().enumerate() {
            if by_symbol.insert(element.symbol.clone(), idx).is_some() {
                return Err(DataError::DuplicateSymbol(element.symbol.clone()));
            }
            by_number.insert(element.atomic_number, idx);
        }

        Ok(Self {
            elements,
            by_symbol,
            by_number,
        })
    }

    /// Get element by symbol.
    pub fn get(&self, symbol: &str) -> Option<&ElementData> {
        self.by_symbol.get(symbol).map(|&i| &self.elements[i])
    }

    /// Get element by symbol, falling back to hydrogen for unknown symbols.
    pub fn get_or_hydrogen(&self, symbol: &str) -> Option<&ElementData> {
        self.get(symbol).or_else(|| self.get("H"))
    }

    /// Get element by atomic number.
    pub fn get_by_number(&self, atomic_number: u32) -> Option<&ElementData> {
        self.by_number.get(&atomic_number).map(|&i| &self.elements[i])
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    /// Iterate elements in atomic-number order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementData> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Picker cells in atomic-number order, with `active` marked.
    pub fn summaries(&self, active: &str) -> Vec<ElementSummary> {
        self.elements
            .iter()
            .map(|e| e.summary(e.symbol == active))
            .collect()
    }
}
