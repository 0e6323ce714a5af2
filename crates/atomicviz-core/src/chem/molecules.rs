//! Named molecules the sandbox can recognize from atom composition.

use std::collections::BTreeMap;

use crate::chem::element::Element;

/// A recognizable molecule: its formula, display name and atom counts.
#[derive(Debug, PartialEq, Eq)]
pub struct MoleculeDef {
    pub formula: &'static str,
    pub name: &'static str,
    pub composition: &'static [(Element, usize)],
}

impl MoleculeDef {
    /// Whether the element counts match this molecule exactly.
    pub fn matches(&self, counts: &BTreeMap<Element, usize>) -> bool {
        counts.len() == self.composition.len()
            && self
                .composition
                .iter()
                .all(|(element, n)| counts.get(element) == Some(n))
    }
}

pub const MOLECULES: &[MoleculeDef] = &[
    MoleculeDef {
        formula: "H2O",
        name: "Water",
        composition: &[(Element::H, 2), (Element::O, 1)],
    },
    MoleculeDef {
        formula: "CH4",
        name: "Methane",
        composition: &[(Element::C, 1), (Element::H, 4)],
    },
    MoleculeDef {
        formula: "CO2",
        name: "Carbon Dioxide",
        composition: &[(Element::C, 1), (Element::O, 2)],
    },
    MoleculeDef {
        formula: "NH3",
        name: "Ammonia",
        composition: &[(Element::N, 1), (Element::H, 3)],
    },
    MoleculeDef {
        formula: "O2",
        name: "Oxygen Gas",
        composition: &[(Element::O, 2)],
    },
    MoleculeDef {
        formula: "H2",
        name: "Hydrogen Gas",
        composition: &[(Element::H, 2)],
    },
];

/// Count atoms per element.
pub fn composition<I>(elements: I) -> BTreeMap<Element, usize>
where
    I: IntoIterator<Item = Element>,
{
    let mut counts = BTreeMap::new();
    for element in elements {
        *counts.entry(element).or_insert(0) += 1;
    }
    counts
}

/// Look up the molecule with exactly this composition.
pub fn recognize(counts: &BTreeMap<Element, usize>) -> Option<&'static MoleculeDef> {
    MOLECULES.iter().find(|m| m.matches(counts))
}
