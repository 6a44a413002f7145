//! Codec configuration: round-trip strategy, precision, and retained columns.

use super::precision::FloatPrecision;
use serde::{Deserialize, Serialize};

/// Round-trip strategy for atom identity.
///
/// Canonical mode assumes complete, template-ordered atoms per residue and elides
/// atom names and residue boundaries entirely; explicit mode stores both and accepts
/// arbitrary atom completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CodecMode {
    Canonical,
    #[default]
    Explicit,
}

/// Column selection and numeric precision for [`crate::codec::AtomArrayCodec`].
///
/// A configuration is fixed at codec construction; decoding a record with a
/// different configuration than was used to encode it is not guaranteed to be
/// meaningful. Configurations serialize so they can be stored next to the records
/// they describe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub mode: CodecMode,
    pub coords_precision: FloatPrecision,
    pub b_factor_precision: FloatPrecision,
    /// Store the temperature/confidence factor once per residue and broadcast it
    /// back onto atoms at decode time (pLDDT-style scores).
    pub b_factor_per_residue: bool,
    pub with_element: bool,
    pub with_hetero: bool,
    pub with_box: bool,
    pub with_bonds: bool,
    pub with_occupancy: bool,
    pub with_b_factor: bool,
    pub with_res_id: bool,
    pub with_atom_id: bool,
    pub with_charge: bool,
    pub with_ins_code: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            mode: CodecMode::Explicit,
            coords_precision: FloatPrecision::Single,
            b_factor_precision: FloatPrecision::Single,
            b_factor_per_residue: false,
            with_element: true,
            with_hetero: true,
            with_box: false,
            with_bonds: false,
            with_occupancy: false,
            with_b_factor: false,
            with_res_id: false,
            with_atom_id: false,
            with_charge: false,
            with_ins_code: false,
        }
    }
}

impl CodecConfig {
    /// Explicit-mode configuration with the default column set.
    pub fn explicit() -> Self {
        Self::default()
    }

    /// Canonical-mode configuration; requires a bound dictionary at codec
    /// construction. Element and atom-name storage is elided since the dictionary
    /// is the source of identity.
    pub fn canonical() -> Self {
        Self {
            mode: CodecMode::Canonical,
            with_element: false,
            ..Self::default()
        }
    }

    /// Preset for AlphaFold-style model archives: canonical half-precision
    /// coordinates with a per-residue pLDDT score in the b-factor column, no
    /// element or hetero storage.
    pub fn afdb() -> Self {
        Self {
            mode: CodecMode::Canonical,
            coords_precision: FloatPrecision::Half,
            b_factor_precision: FloatPrecision::Half,
            b_factor_per_residue: true,
            with_b_factor: true,
            with_element: false,
            with_hetero: false,
            ..Self::default()
        }
    }

    /// Preset for experimental structures: explicit atoms with half-precision
    /// coordinates and no confidence column.
    pub fn pdb() -> Self {
        Self {
            coords_precision: FloatPrecision::Half,
            ..Self::default()
        }
    }

    pub fn coords_precision(mut self, precision: FloatPrecision) -> Self {
        self.coords_precision = precision;
        self
    }

    pub fn b_factor(mut self, precision: FloatPrecision, per_residue: bool) -> Self {
        self.with_b_factor = true;
        self.b_factor_precision = precision;
        self.b_factor_per_residue = per_residue;
        self
    }

    pub fn with_element(mut self, with_element: bool) -> Self {
        self.with_element = with_element;
        self
    }

    pub fn with_hetero(mut self, with_hetero: bool) -> Self {
        self.with_hetero = with_hetero;
        self
    }

    pub fn with_box(mut self, with_box: bool) -> Self {
        self.with_box = with_box;
        self
    }

    pub fn with_bonds(mut self, with_bonds: bool) -> Self {
        self.with_bonds = with_bonds;
        self
    }

    pub fn with_occupancy(mut self, with_occupancy: bool) -> Self {
        self.with_occupancy = with_occupancy;
        self
    }

    pub fn with_res_id(mut self, with_res_id: bool) -> Self {
        self.with_res_id = with_res_id;
        self
    }

    pub fn with_atom_id(mut self, with_atom_id: bool) -> Self {
        self.with_atom_id = with_atom_id;
        self
    }

    pub fn with_charge(mut self, with_charge: bool) -> Self {
        self.with_charge = with_charge;
        self
    }

    pub fn with_ins_code(mut self, with_ins_code: bool) -> Self {
        self.with_ins_code = with_ins_code;
        self
    }

    /// Per-atom annotations the external parser must be asked for, given this
    /// configuration.
    pub fn extra_fields(&self) -> Vec<ExtraField> {
        let mut fields = Vec::new();
        if self.with_occupancy {
            fields.push(ExtraField::Occupancy);
        }
        if self.with_b_factor {
            fields.push(ExtraField::BFactor);
        }
        if self.with_atom_id {
            fields.push(ExtraField::AtomId);
        }
        if self.with_charge {
            fields.push(ExtraField::Charge);
        }
        fields
    }
}

/// Optional per-atom annotation requested from the external parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtraField {
    Occupancy,
    BFactor,
    AtomId,
    Charge,
}
