//! Bonding engine for the molecule sandbox.
//!
//! Owns the placed atoms and the bonds between them. Bonds form when a drag
//! ends with two atoms closer than the bond threshold and both below their
//! valency; the dragged atom is then snapped to the ideal bond length.

use std::collections::{HashSet, VecDeque};

use glam::Vec3;
use log::debug;
use serde::Serialize;

use crate::chem::element::Element;
use crate::config::SandboxConfig;
use crate::core::rng::Rng;

/// Unique identifier for a sandbox atom. Never reused, even across `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AtomId(pub u32);

/// Unique identifier for a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct BondId(pub u32);

/// A placed atom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Atom {
    pub id: AtomId,
    pub element: Element,
    pub position: Vec3,
}

/// Bond between two distinct atoms. Endpoint order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Bond {
    pub id: BondId,
    pub a: AtomId,
    pub b: AtomId,
}

impl Bond {
    /// Check if this bond connects the given atoms (order-independent).
    pub fn connects(&self, a: AtomId, b: AtomId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }

    pub fn involves(&self, atom: AtomId) -> bool {
        self.a == atom || self.b == atom
    }

    /// The endpoint opposite `atom`, if `atom` is an endpoint.
    pub fn partner(&self, atom: AtomId) -> Option<AtomId> {
        if self.a == atom {
            Some(self.b)
        } else if self.b == atom {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Outcome of a bond evaluation after a drag ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BondEvaluation {
    /// Bonds created, in creation order.
    pub formed: Vec<BondId>,
    /// Position the moved atom was snapped to, if any bond formed.
    pub snapped_to: Option<Vec3>,
}

impl BondEvaluation {
    pub fn bonds_changed(&self) -> bool {
        !self.formed.is_empty()
    }

    pub fn position_changed(&self) -> bool {
        self.snapped_to.is_some()
    }
}

/// Candidate that bonded during one pass: partner position and drop distance.
struct Formed {
    partner_pos: Vec3,
    distance: f32,
}

/// Atom and bond store plus the proximity bonding rule.
#[derive(Debug, Clone)]
pub struct BondingEngine {
    /// Atoms in insertion order.
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    config: SandboxConfig,
    rng: Rng,
    next_atom_id: u32,
    next_bond_id: u32,
}

impl BondingEngine {
    pub fn new(config: SandboxConfig) -> Self {
        let rng = Rng::new(config.seed_or_default());
        Self {
            atoms: Vec::new(),
            bonds: Vec::new(),
            config,
            rng,
            next_atom_id: 1,
            next_bond_id: 1,
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// All atoms in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds in creation order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn total_bonds(&self) -> usize {
        self.bonds.len()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.id == id)
    }

    fn index_of(&self, id: AtomId) -> Option<usize> {
        self.atoms.iter().position(|a| a.id == id)
    }

    /// Check if two atoms are already bonded.
    pub fn has_bond(&self, a: AtomId, b: AtomId) -> bool {
        self.bonds.iter().any(|bond| bond.connects(a, b))
    }

    /// Number of bonds an atom participates in. Unknown ids have zero.
    pub fn bond_count(&self, id: AtomId) -> usize {
        self.bonds.iter().filter(|b| b.involves(id)).count()
    }

    /// Whether the atom can take one more bond.
    pub fn has_free_valence(&self, atom: &Atom) -> bool {
        self.bond_count(atom.id) < atom.element.valency()
    }

    /// Place a new atom near the origin with a small random offset on x and y.
    pub fn add_atom(&mut self, element: Element) -> Atom {
        let half = self.config.spawn_jitter * 0.5;
        let position = Vec3::new(
            self.rng.range(-half, half),
            self.rng.range(-half, half),
            0.0,
        );
        self.add_atom_at(element, position)
    }

    /// Place a new atom at an exact position.
    pub fn add_atom_at(&mut self, element: Element, position: Vec3) -> Atom {
        let atom = Atom {
            id: AtomId(self.next_atom_id),
            element,
            position,
        };
        self.next_atom_id += 1;
        self.atoms.push(atom);
        atom
    }

    /// Overwrite an atom's position. No bond evaluation happens here.
    /// Returns false for unknown ids.
    pub fn update_position(&mut self, id: AtomId, position: Vec3) -> bool {
        match self.atoms.iter_mut().find(|a| a.id == id) {
            Some(atom) => {
                atom.position = position;
                true
            }
            None => false,
        }
    }

    /// Evaluate new bonds for an atom whose drag just ended.
    ///
    /// Candidates are visited in insertion order. The atom snaps toward the
    /// nearest neighbor it bonded with; one more pass then runs from the
    /// snapped position, so calling this again without moving is a no-op.
    pub fn evaluate_bonds(&mut self, moved: AtomId) -> BondEvaluation {
        let mut result = BondEvaluation::default();
        let Some(moved_idx) = self.index_of(moved) else {
            return result;
        };

        let first = self.bond_pass(moved_idx, &mut result.formed);
        let Some(nearest) = first
            .iter()
            .min_by(|x, y| x.distance.total_cmp(&y.distance))
        else {
            return result;
        };

        let snapped = self.snap_position(self.atoms[moved_idx].position, nearest.partner_pos);
        self.atoms[moved_idx].position = snapped;
        result.snapped_to = Some(snapped);
        debug!("atom {:?} snapped to {:?}", moved, snapped);

        self.bond_pass(moved_idx, &mut result.formed);
        result
    }

    /// One sweep over all other atoms from the moved atom's current position.
    fn bond_pass(&mut self, moved_idx: usize, formed_ids: &mut Vec<BondId>) -> Vec<Formed> {
        let moved = self.atoms[moved_idx];
        let mut formed = Vec::new();

        for idx in 0..self.atoms.len() {
            let other = self.atoms[idx];
            if other.id == moved.id || self.has_bond(moved.id, other.id) {
                continue;
            }

            let distance = moved.position.distance(other.position);
            if distance >= self.config.bond_threshold {
                continue;
            }
            if !self.has_free_valence(&moved) || !self.has_free_valence(&other) {
                continue;
            }

            let id = self.push_bond(moved.id, other.id);
            debug!(
                "bond {:?} formed: {}{:?} - {}{:?} at {:.3}",
                id, moved.element, moved.id, other.element, other.id, distance
            );
            formed_ids.push(id);
            formed.push(Formed {
                partner_pos: other.position,
                distance,
            });
        }

        formed
    }

    fn push_bond(&mut self, a: AtomId, b: AtomId) -> BondId {
        let id = BondId(self.next_bond_id);
        self.next_bond_id += 1;
        self.bonds.push(Bond { id, a, b });
        id
    }

    /// Point at the ideal bond length from `anchor`, on the anchor→`from` ray.
    /// Coincident atoms separate along +X.
    fn snap_position(&self, from: Vec3, anchor: Vec3) -> Vec3 {
        let direction = (from - anchor).try_normalize().unwrap_or(Vec3::X);
        anchor + direction * self.config.ideal_bond_length
    }

    /// Remove an atom and every bond touching it. Returns false for unknown ids.
    pub fn remove_atom(&mut self, id: AtomId) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        self.atoms.remove(idx);
        self.bonds.retain(|b| !b.involves(id));
        true
    }

    /// Atoms reachable from `start` through bonds, including `start`.
    /// Returned in insertion order.
    pub fn connected_component(&self, start: AtomId) -> Vec<AtomId> {
        if self.atom(start).is_none() {
            return Vec::new();
        }

        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for partner in self.bonds.iter().filter_map(|b| b.partner(current)) {
                if seen.insert(partner) {
                    queue.push_back(partner);
                }
            }
        }

        self.atoms
            .iter()
            .map(|a| a.id)
            .filter(|id| seen.contains(id))
            .collect()
    }

    /// Clear all atoms and bonds. Id counters keep running.
    pub fn clear(&mut self) {
        self.atoms.clear();
        self.bonds.clear();
    }
}

impl Default for BondingEngine {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn engine() -> BondingEngine {
        BondingEngine::default()
    }

    #[test]
    fn add_atom_spawns_near_origin() {
        let mut engine = engine();
        for _ in 0..50 {
            let atom = engine.add_atom(Element::C);
            assert!(atom.position.x.abs() <= 0.25);
            assert!(atom.position.y.abs() <= 0.25);
            assert_eq!(atom.position.z, 0.0);
        }
        assert_eq!(engine.atom_count(), 50);
    }

    #[test]
    fn ids_are_unique_and_survive_clear() {
        let mut engine = engine();
        let a = engine.add_atom(Element::H);
        let b = engine.add_atom(Element::H);
        assert_ne!(a.id, b.id);

        engine.clear();
        let c = engine.add_atom(Element::H);
        assert!(c.id > b.id);
        assert!(!engine.update_position(a.id, Vec3::ONE));
    }

    #[test]
    fn update_position_overwrites_without_bonding() {
        let mut engine = engine();
        let h = engine.add_atom_at(Element::H, Vec3::new(5.0, 0.0, 0.0));
        let o = engine.add_atom_at(Element::O, Vec3::ZERO);

        assert!(engine.update_position(h.id, Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(engine.atom(h.id).unwrap().position, Vec3::new(0.5, 0.0, 0.0));
        assert!(!engine.has_bond(h.id, o.id));
    }

    #[test]
    fn bond_forms_and_snaps_to_ideal_length() {
        let mut engine = engine();
        let o = engine.add_atom_at(Element::O, Vec3::ZERO);
        let h = engine.add_atom_at(Element::H, Vec3::new(0.0, 1.2, 0.0));

        let result = engine.evaluate_bonds(h.id);
        assert_eq!(result.formed.len(), 1);
        assert!(engine.has_bond(h.id, o.id));

        let snapped = engine.atom(h.id).unwrap().position;
        assert_eq!(result.snapped_to, Some(snapped));
        assert!((snapped.distance(Vec3::ZERO) - 1.0).abs() < EPS);
        assert!(snapped.y > 0.0);
        assert!(snapped.x.abs() < EPS);
    }

    #[test]
    fn threshold_is_strict() {
        let mut engine = engine();
        engine.add_atom_at(Element::O, Vec3::ZERO);
        let h = engine.add_atom_at(Element::H, Vec3::new(1.5, 0.0, 0.0));

        let result = engine.evaluate_bonds(h.id);
        assert!(!result.bonds_changed());
        assert!(!result.position_changed());
        assert_eq!(engine.atom(h.id).unwrap().position, Vec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn snap_goes_to_nearest_bonded_neighbor() {
        let mut engine = engine();
        let far = engine.add_atom_at(Element::H, Vec3::new(-1.4, 0.0, 0.0));
        let near = engine.add_atom_at(Element::H, Vec3::new(0.0, 0.6, 0.0));
        let o = engine.add_atom_at(Element::O, Vec3::ZERO);

        let result = engine.evaluate_bonds(o.id);
        assert_eq!(result.formed.len(), 2);
        assert!(engine.has_bond(o.id, far.id));
        assert!(engine.has_bond(o.id, near.id));

        // Snapped 1.0 from `near` on the near->O ray, i.e. straight down.
        let pos = engine.atom(o.id).unwrap().position;
        assert!((pos - Vec3::new(0.0, -0.4, 0.0)).length() < EPS);
    }

    #[test]
    fn coincident_atoms_separate_along_x() {
        let mut engine = engine();
        let c = engine.add_atom_at(Element::C, Vec3::new(1.0, 1.0, 0.0));
        let h = engine.add_atom_at(Element::H, Vec3::new(1.0, 1.0, 0.0));

        engine.evaluate_bonds(h.id);
        assert!(engine.has_bond(c.id, h.id));
        let pos = engine.atom(h.id).unwrap().position;
        assert!((pos - Vec3::new(2.0, 1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn full_valence_blocks_bond_and_snap() {
        let mut engine = engine();
        let h1 = engine.add_atom_at(Element::H, Vec3::ZERO);
        let h2 = engine.add_atom_at(Element::H, Vec3::new(0.8, 0.0, 0.0));
        assert_eq!(engine.evaluate_bonds(h2.id).formed.len(), 1);

        let h3 = engine.add_atom_at(Element::H, Vec3::new(0.0, 0.7, 0.0));
        let result = engine.evaluate_bonds(h3.id);
        assert!(result.formed.is_empty());
        assert_eq!(engine.atom(h3.id).unwrap().position, Vec3::new(0.0, 0.7, 0.0));
        assert_eq!(engine.bond_count(h1.id), 1);
    }

    #[test]
    fn second_evaluation_is_a_no_op() {
        let mut engine = engine();
        engine.add_atom_at(Element::C, Vec3::ZERO);
        engine.add_atom_at(Element::H, Vec3::new(1.2, 0.0, 0.0));
        engine.add_atom_at(Element::H, Vec3::new(-1.3, 0.2, 0.0));
        let n = engine.add_atom_at(Element::N, Vec3::new(0.3, 0.9, 0.0));

        let first = engine.evaluate_bonds(n.id);
        assert!(first.bonds_changed());
        let pos = engine.atom(n.id).unwrap().position;
        let bonds = engine.total_bonds();

        let second = engine.evaluate_bonds(n.id);
        assert_eq!(second, BondEvaluation::default());
        assert_eq!(engine.atom(n.id).unwrap().position, pos);
        assert_eq!(engine.total_bonds(), bonds);
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut engine = engine();
        engine.add_atom_at(Element::O, Vec3::ZERO);
        assert_eq!(engine.evaluate_bonds(AtomId(999)), BondEvaluation::default());
        assert!(!engine.remove_atom(AtomId(999)));
        assert_eq!(engine.bond_count(AtomId(999)), 0);
        assert!(engine.connected_component(AtomId(999)).is_empty());
    }

    #[test]
    fn remove_atom_cascades_bonds() {
        let mut engine = engine();
        let o = engine.add_atom_at(Element::O, Vec3::ZERO);
        let h1 = engine.add_atom_at(Element::H, Vec3::new(0.9, 0.0, 0.0));
        let h2 = engine.add_atom_at(Element::H, Vec3::new(-0.9, 0.0, 0.0));
        engine.evaluate_bonds(h1.id);
        engine.evaluate_bonds(h2.id);
        assert_eq!(engine.bond_count(o.id), 2);

        assert!(engine.remove_atom(o.id));
        assert_eq!(engine.total_bonds(), 0);
        assert_eq!(engine.atom_count(), 2);
        assert!(engine
            .bonds()
            .iter()
            .all(|b| engine.atom(b.a).is_some() && engine.atom(b.b).is_some()));
    }

    #[test]
    fn connected_component_follows_bonds() {
        let mut engine = engine();
        let o = engine.add_atom_at(Element::O, Vec3::ZERO);
        let h1 = engine.add_atom_at(Element::H, Vec3::new(0.9, 0.0, 0.0));
        let h2 = engine.add_atom_at(Element::H, Vec3::new(-0.9, 0.0, 0.0));
        let lone = engine.add_atom_at(Element::C, Vec3::new(10.0, 0.0, 0.0));
        engine.evaluate_bonds(h1.id);
        engine.evaluate_bonds(h2.id);

        assert_eq!(engine.connected_component(h2.id), vec![o.id, h1.id, h2.id]);
        assert_eq!(engine.connected_component(lone.id), vec![lone.id]);
    }

    #[test]
    fn clear_resets_state() {
        let mut engine = engine();
        let a = engine.add_atom_at(Element::H, Vec3::ZERO);
        engine.add_atom_at(Element::H, Vec3::X);
        engine.evaluate_bonds(a.id);
        assert_eq!(engine.total_bonds(), 1);

        engine.clear();
        assert_eq!(engine.atom_count(), 0);
        assert_eq!(engine.total_bonds(), 0);
    }

    #[test]
    fn bond_helpers() {
        let bond = Bond {
            id: BondId(1),
            a: AtomId(1),
            b: AtomId(2),
        };
        assert!(bond.connects(AtomId(2), AtomId(1)));
        assert!(!bond.connects(AtomId(1), AtomId(3)));
        assert_eq!(bond.partner(AtomId(1)), Some(AtomId(2)));
        assert_eq!(bond.partner(AtomId(3)), None);
    }
}
