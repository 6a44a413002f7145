//! Columnar record schema: one schema-typed struct per encoded structure.

use super::precision::{CoordColumn, ScalarColumn};
use half::f16;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Immutable columnar snapshot of one structure.
///
/// Column arity is fixed by name and honored by both encode and decode: `coords`,
/// `atom_name`, `hetero`, `ins_code`, `occupancy`, `charge`, `element`, and
/// `atom_id` are per-atom; `res_name`/`restype_index`, `chain_id`,
/// `residue_starts`, and `res_id` are per-residue; `bond_edges`/`bond_types` are
/// per-bond. Exactly one of `res_name` and `restype_index` is populated, fixed by
/// whether the encoding configuration binds a dictionary. `atom_name` and
/// `residue_starts` are present only for explicit-mode records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnarRecord {
    pub coords: CoordColumn,
    pub res_name: Option<Vec<SmolStr>>,
    pub restype_index: Option<Vec<u8>>,
    pub chain_id: Vec<SmolStr>,
    pub atom_name: Option<Vec<SmolStr>>,
    pub residue_starts: Option<Vec<u32>>,
    pub res_id: Option<Vec<u32>>,
    pub hetero: Option<Vec<bool>>,
    pub ins_code: Option<Vec<SmolStr>>,
    pub box_vectors: Option<[[f32; 3]; 3]>,
    pub bond_edges: Option<Vec<[u16; 2]>>,
    pub bond_types: Option<Vec<u8>>,
    pub occupancy: Option<Vec<f16>>,
    pub b_factor: Option<ScalarColumn>,
    pub charge: Option<Vec<i8>>,
    pub element: Option<Vec<SmolStr>>,
    pub atom_id: Option<Vec<u32>>,
}

impl ColumnarRecord {
    /// Number of coordinate rows, i.e. atoms covered by per-atom columns.
    pub fn num_atoms(&self) -> usize {
        self.coords.len()
    }

    /// Number of residues covered by per-residue columns.
    pub fn num_residues(&self) -> usize {
        self.chain_id.len()
    }

    /// True when the record stores no explicit atom identity (canonical layout).
    pub fn is_canonical(&self) -> bool {
        self.atom_name.is_none() && self.residue_starts.is_none()
    }
}
