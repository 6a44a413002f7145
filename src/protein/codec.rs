//! Protein policy layer over the columnar codec.
//!
//! Encoding first standardizes the structure: residue conversions from the catalog
//! are applied (selenomethionine to methionine and the like), hydrogens and
//! residues outside the protein catalog are dropped, and the structure is
//! optionally projected to backbone atoms. Decoding wraps the reconstructed atoms
//! into the configured output view.

use super::view::{ProteinChain, ProteinComplex, ProteinView};
use crate::codec::{AtomArrayCodec, CodecConfig, ColumnarRecord, Error};
use crate::dict::protein_dictionary;
use crate::model::AtomArray;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Output shape requested from [`ProteinCodec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoadAs {
    #[default]
    Array,
    Generic,
    Chain,
    Complex,
}

/// Protein-specialized codec bound to the embedded amino-acid catalog.
#[derive(Debug, Clone)]
pub struct ProteinCodec {
    inner: AtomArrayCodec,
    backbone_only: bool,
    load_as: LoadAs,
}

impl ProteinCodec {
    /// Codec over the full heavy-atom catalog, yielding raw atom arrays on decode.
    pub fn new(config: CodecConfig) -> Self {
        let dictionary = Arc::new(protein_dictionary().clone());
        Self {
            inner: AtomArrayCodec::with_dictionary(config, dictionary),
            backbone_only: false,
            load_as: LoadAs::Array,
        }
    }

    /// Preset codec for AlphaFold-style model archives ([`CodecConfig::afdb`]).
    pub fn afdb() -> Self {
        Self::new(CodecConfig::afdb())
    }

    /// Preset codec for experimental structures ([`CodecConfig::pdb`]).
    pub fn pdb() -> Self {
        Self::new(CodecConfig::pdb())
    }

    /// Restricts encoding to the backbone atoms (N, CA, C, O). The bound dictionary
    /// is swapped for its backbone projection so canonical records stay consistent.
    pub fn backbone_only(mut self, backbone_only: bool) -> Result<Self, Error> {
        self.backbone_only = backbone_only;
        let dictionary = if backbone_only {
            Arc::new(protein_dictionary().backbone_subset()?)
        } else {
            Arc::new(protein_dictionary().clone())
        };
        self.inner = AtomArrayCodec::with_dictionary(self.inner.config().clone(), dictionary);
        Ok(self)
    }

    pub fn load_as(mut self, load_as: LoadAs) -> Self {
        self.load_as = load_as;
        self
    }

    pub fn inner(&self) -> &AtomArrayCodec {
        &self.inner
    }

    /// Standardizes and encodes a structure.
    pub fn encode(&self, array: &AtomArray) -> Result<ColumnarRecord, Error> {
        let prepared = self.prepare(array);
        if self.load_as == LoadAs::Chain {
            let chains = prepared.chain_ids();
            if chains.len() > 1 {
                return Err(Error::validation(format!(
                    "chain output requested but the structure holds {} chains",
                    chains.len()
                )));
            }
        }
        self.inner.encode(&prepared)
    }

    /// Decodes a record and wraps it into the configured view.
    ///
    /// # Errors
    ///
    /// `LoadAs::Generic` fails with an `Unsupported` error; chain views of
    /// multi-chain records fail with a `Validation` error.
    pub fn decode(&self, record: &ColumnarRecord) -> Result<ProteinView, Error> {
        let array = self.inner.decode(record)?;
        match self.load_as {
            LoadAs::Array => Ok(ProteinView::Array(array)),
            LoadAs::Generic => Err(Error::unsupported(
                "the protein codec does not produce a generic atom view",
            )),
            LoadAs::Chain => Ok(ProteinView::Chain(ProteinChain::new(array)?)),
            LoadAs::Complex => Ok(ProteinView::Complex(ProteinComplex::new(&array)?)),
        }
    }

    /// Applies catalog conversions, drops hydrogens and non-protein residues, and
    /// optionally projects to the backbone.
    fn prepare(&self, array: &AtomArray) -> AtomArray {
        let dict = protein_dictionary();

        let mut converted = array.clone();
        for atom in converted.atoms_mut() {
            let Some(conversion) = dict.resolve_conversion(&atom.res_name) else {
                continue;
            };
            if let Some((_, to_name)) = conversion
                .atom_swaps
                .iter()
                .find(|(from_name, _)| atom.name == *from_name)
            {
                atom.name = to_name.clone();
                if let Ok(index) = dict.index_of(&conversion.to) {
                    if let (Some(slot), Some(elements)) = (
                        dict.expected_relative_atom_index(index, &atom.name),
                        dict.template_elements(index),
                    ) {
                        atom.element = elements[slot].clone();
                    }
                }
            }
            atom.res_name = conversion.to.clone();
            // converted residues are standard, not heteroatoms
            atom.hetero = false;
        }

        let filtered =
            converted.filter(|atom| !atom.is_hydrogen() && dict.contains(&atom.res_name));
        if !self.backbone_only {
            return filtered;
        }
        match dict.backbone_atoms() {
            Some(backbone) => filtered.filter(|atom| backbone.contains(&atom.name)),
            None => filtered,
        }
    }
}
