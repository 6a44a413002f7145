//! Ordered atom sequences with residue partitioning and an optional bond overlay.
//!
//! An [`AtomArray`] is the in-memory exchange type between external parsers and the
//! columnar codec. Atoms of one residue are contiguous and residue order follows the
//! source numbering; [`AtomArray::residue_starts`] recovers the partition from the
//! equal-key runs without any auxiliary bookkeeping.

use super::atom::Atom;
use super::types::BondKind;
use std::fmt;

/// Undirected bond connecting two atoms by index within an [`AtomArray`].
///
/// Endpoints are stored in canonical ascending order so equality and hashing remain
/// stable regardless of construction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bond {
    /// Index of the first atom (always the lesser index after canonicalization).
    pub a1: usize,
    /// Index of the second atom (greater-or-equal to `a1`).
    pub a2: usize,
    /// Chemical multiplicity assigned to the bond.
    pub kind: BondKind,
}

impl Bond {
    /// Creates a new bond while canonicalizing the endpoint ordering.
    pub fn new(idx1: usize, idx2: usize, kind: BondKind) -> Self {
        if idx1 <= idx2 {
            Self {
                a1: idx1,
                a2: idx2,
                kind,
            }
        } else {
            Self {
                a1: idx2,
                a2: idx1,
                kind,
            }
        }
    }
}

/// Ordered sequence of atoms plus optional bond list and periodic box.
///
/// Invariants: every bond endpoint references an atom index `< len()`, and atoms of a
/// residue are contiguous. The second invariant is the caller's responsibility (it
/// holds for any well-formed structure file); the first is enforced by the mutators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomArray {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    box_vectors: Option<[[f64; 3]; 3]>,
}

impl AtomArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
            bonds: Vec::new(),
            box_vectors: None,
        }
    }

    /// Builds an array from already-ordered atoms.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            bonds: Vec::new(),
            box_vectors: None,
        }
    }

    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Appends a bond between two existing atoms.
    pub fn add_bond(&mut self, idx1: usize, idx2: usize, kind: BondKind) {
        debug_assert!(
            idx1 < self.atoms.len() && idx2 < self.atoms.len(),
            "Bond index out of bounds"
        );
        self.bonds.push(Bond::new(idx1, idx2, kind));
    }

    /// Inserts a bond without the endpoint check, to exercise the encoders'
    /// handling of corrupt bond lists.
    #[cfg(test)]
    pub(crate) fn push_bond_unchecked(&mut self, bond: Bond) {
        self.bonds.push(bond);
    }

    pub fn set_box_vectors(&mut self, box_vectors: [[f64; 3]; 3]) {
        self.box_vectors = Some(box_vectors);
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Mutable access to the atoms for in-place annotation rewrites. Callers must
    /// keep residues contiguous.
    pub fn atoms_mut(&mut self) -> &mut [Atom] {
        &mut self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn box_vectors(&self) -> Option<&[[f64; 3]; 3]> {
        self.box_vectors.as_ref()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    /// Indices of the first atom of every residue, computed from contiguous equal-key
    /// runs over (chain id, residue id, residue name, insertion code).
    pub fn residue_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut previous = None;
        for (index, atom) in self.atoms.iter().enumerate() {
            let key = atom.residue_key();
            if previous != Some(key) {
                starts.push(index);
                previous = Some(key);
            }
        }
        starts
    }

    /// Number of residues in the array.
    pub fn residue_count(&self) -> usize {
        self.residue_starts().len()
    }

    /// Distinct chain identifiers in order of first appearance.
    pub fn chain_ids(&self) -> Vec<smol_str::SmolStr> {
        let mut ids: Vec<smol_str::SmolStr> = Vec::new();
        for atom in &self.atoms {
            if ids.last() != Some(&atom.chain_id) && !ids.contains(&atom.chain_id) {
                ids.push(atom.chain_id.clone());
            }
        }
        ids
    }

    /// Filtered copy retaining atoms for which `predicate` returns true.
    ///
    /// The bond list is remapped: bonds with a removed endpoint are dropped and the
    /// surviving bonds are reindexed against the new atom positions. The periodic box
    /// is carried over unchanged.
    pub fn filter<F>(&self, mut predicate: F) -> AtomArray
    where
        F: FnMut(&Atom) -> bool,
    {
        let mut kept = Vec::with_capacity(self.atoms.len());
        let mut index_map = vec![None; self.atoms.len()];
        for (index, atom) in self.atoms.iter().enumerate() {
            if predicate(atom) {
                index_map[index] = Some(kept.len());
                kept.push(atom.clone());
            }
        }

        let bonds = self
            .bonds
            .iter()
            .filter_map(|bond| match (index_map[bond.a1], index_map[bond.a2]) {
                (Some(a1), Some(a2)) => Some(Bond::new(a1, a2, bond.kind)),
                _ => None,
            })
            .collect();

        AtomArray {
            atoms: kept,
            bonds,
            box_vectors: self.box_vectors,
        }
    }
}

impl fmt::Display for AtomArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AtomArray {{ atoms: {}, residues: {}, bonds: {} }}",
            self.len(),
            self.residue_count(),
            self.bonds.len()
        )
    }
}

impl IntoIterator for AtomArray {
    type Item = Atom;
    type IntoIter = std::vec::IntoIter<Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.into_iter()
    }
}
