//! Elements available in the molecule sandbox, with their valency.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;

/// A sandbox element. Only the four organic building blocks are placeable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    H,
    C,
    N,
    O,
}

impl Element {
    /// Palette order used by the sandbox toolbar.
    pub const ALL: [Element; 4] = [Element::H, Element::C, Element::O, Element::N];

    pub fn symbol(self) -> &'static str {
        match self {
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
        }
    }

    /// Maximum number of simultaneous bonds.
    pub fn valency(self) -> usize {
        match self {
            Element::H => 1,
            Element::O => 2,
            Element::N => 3,
            Element::C => 4,
        }
    }
}

impl FromStr for Element {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "H" => Ok(Element::H),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            other => Err(ParseNameError::new("sandbox element", other)),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
