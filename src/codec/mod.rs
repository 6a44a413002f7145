//! Columnar encoding of atom arrays.
//!
//! The [`AtomArrayCodec`] flattens an [`crate::model::AtomArray`] into a
//! schema-typed [`ColumnarRecord`] and reconstructs it. Two strategies are
//! offered: canonical records derive all atom identity from a bound residue
//! dictionary, explicit records retain atom names and residue boundaries.

mod codec;
mod config;
mod error;
mod join;
mod precision;
mod record;

pub use codec::{AtomArrayCodec, MAX_RESIDUES};
pub use config::{CodecConfig, CodecMode, ExtraField};
pub use error::Error;
pub use join::{residue_index_from_starts, residue_index_from_sizes, spread, starts_from_sizes};
pub use precision::{CoordColumn, FloatPrecision, ScalarColumn};
pub use record::ColumnarRecord;
