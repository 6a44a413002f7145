//! Chain and complex views over decoded protein structures.

use crate::codec::Error;
use crate::dict::protein_dictionary;
use crate::model::AtomArray;
use smol_str::SmolStr;

/// Output shape produced by the protein codec, resolved by its load-as setting.
#[derive(Debug, Clone, PartialEq)]
pub enum ProteinView {
    Array(AtomArray),
    Chain(ProteinChain),
    Complex(ProteinComplex),
}

/// Single-chain view with a derived one-letter sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinChain {
    chain_id: SmolStr,
    atoms: AtomArray,
}

impl ProteinChain {
    /// Wraps a single-chain atom array.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` error when the array spans zero or multiple chains.
    pub fn new(atoms: AtomArray) -> Result<Self, Error> {
        let chain_ids = atoms.chain_ids();
        match chain_ids.as_slice() {
            [chain_id] => Ok(Self {
                chain_id: chain_id.clone(),
                atoms,
            }),
            _ => Err(Error::validation(format!(
                "a chain view requires exactly one chain, found {}",
                chain_ids.len()
            ))),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    pub fn atoms(&self) -> &AtomArray {
        &self.atoms
    }

    pub fn residue_count(&self) -> usize {
        self.atoms.residue_count()
    }

    /// One-letter sequence over the residues, in order. Residue names outside the
    /// catalog map to the unknown code.
    pub fn sequence(&self) -> String {
        let dict = protein_dictionary();
        let atoms = self.atoms.atoms();
        self.atoms
            .residue_starts()
            .into_iter()
            .map(|start| {
                let index = dict
                    .index_of(&atoms[start].res_name)
                    .unwrap_or_else(|_| dict.unknown_index());
                dict.one_letter_code(index).unwrap_or('X')
            })
            .collect()
    }
}

/// Multi-chain view; chains appear in order of first appearance in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ProteinComplex {
    chains: Vec<ProteinChain>,
}

impl ProteinComplex {
    /// Splits an atom array into per-chain views. Bonds crossing chains are dropped
    /// by the per-chain filtering.
    pub fn new(atoms: &AtomArray) -> Result<Self, Error> {
        let mut chains = Vec::new();
        for chain_id in atoms.chain_ids() {
            let chain_atoms = atoms.filter(|atom| atom.chain_id == chain_id);
            chains.push(ProteinChain::new(chain_atoms)?);
        }
        Ok(Self { chains })
    }

    pub fn chains(&self) -> &[ProteinChain] {
        &self.chains
    }

    pub fn chain(&self, chain_id: &str) -> Option<&ProteinChain> {
        self.chains.iter().find(|c| c.chain_id == chain_id)
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// One sequence per chain, in chain order.
    pub fn sequences(&self) -> Vec<String> {
        self.chains.iter().map(ProteinChain::sequence).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, Point};

    fn push_ca(array: &mut AtomArray, res_name: &str, res_id: u32, chain: &str) {
        array.push(Atom::new(
            "CA",
            "C",
            res_name,
            res_id,
            chain,
            Point::new(res_id as f64, 0.0, 0.0),
        ));
    }

    #[test]
    fn chain_sequence_uses_one_letter_codes() {
        let mut array = AtomArray::new();
        push_ca(&mut array, "MET", 1, "A");
        push_ca(&mut array, "ALA", 2, "A");
        push_ca(&mut array, "TRP", 3, "A");

        let chain = ProteinChain::new(array).unwrap();
        assert_eq!(chain.chain_id(), "A");
        assert_eq!(chain.sequence(), "MAW");
    }

    #[test]
    fn chain_sequence_maps_foreign_residues_to_unknown_code() {
        let mut array = AtomArray::new();
        push_ca(&mut array, "GLY", 1, "A");
        push_ca(&mut array, "ZZZ", 2, "A");

        let chain = ProteinChain::new(array).unwrap();
        assert_eq!(chain.sequence(), "GX");
    }

    #[test]
    fn chain_rejects_multi_chain_arrays() {
        let mut array = AtomArray::new();
        push_ca(&mut array, "GLY", 1, "A");
        push_ca(&mut array, "GLY", 1, "B");

        assert!(matches!(
            ProteinChain::new(array).unwrap_err(),
            Error::Validation { .. }
        ));
    }

    #[test]
    fn complex_groups_chains_in_first_appearance_order() {
        let mut array = AtomArray::new();
        push_ca(&mut array, "GLY", 1, "B");
        push_ca(&mut array, "ALA", 1, "A");
        push_ca(&mut array, "SER", 2, "B");

        let complex = ProteinComplex::new(&array).unwrap();
        assert_eq!(complex.len(), 2);
        assert_eq!(complex.chains()[0].chain_id(), "B");
        assert_eq!(complex.chains()[1].chain_id(), "A");
        assert_eq!(complex.sequences(), vec!["GS".to_string(), "A".to_string()]);
        assert!(complex.chain("C").is_none());
    }
}
