//! # bio-columns
//!
//! **bio-columns** is a pure-Rust columnar codec for biomolecular structures: it flattens parsed atomic structures into schema-typed columnar records suited to bulk dataset storage and reconstructs them losslessly up to the configured numeric precision. The crate favors deterministic round trips, strong typing, and clean error surfaces so bulk pipelines remain auditable from raw file to stored record.
//!
//! ## Features
//!
//! - **Canonical and explicit encodings** – A bound residue dictionary lets records drop per-atom names entirely for template-complete structures; explicit mode retains names and residue boundaries for arbitrary structures.
//! - **Embedded residue catalog** – A curated TOML catalog of the twenty standard amino acids fixes canonical atom order, elements, and one-letter codes across runs.
//! - **Configurable columns** – Coordinate and scalar precision, bonds, periodic box, occupancy, confidence factors, charges, and insertion codes are all configuration-gated.
//! - **File-blob records** – Structure files travel inline or by reference; fetching, gzip handling, format inference, and an explicit parser registry turn them back into atoms.
//! - **Protein views** – A policy layer standardizes residues, drops hydrogens, optionally projects to the backbone, and exposes chain and complex abstractions with derived sequences.

mod utils;

pub mod codec;
pub mod dict;
pub mod file;
pub mod model;
pub mod protein;

pub use codec::{
    AtomArrayCodec, CodecConfig, CodecMode, ColumnarRecord, Error, ExtraField, FloatPrecision,
};
pub use dict::{protein_dictionary, ResidueDictionary};
pub use file::{FileRecord, FormatTag, StructureFileCodec};
pub use model::{Atom, AtomArray, Bond, BondKind, Point};
pub use protein::{LoadAs, ProteinCodec, ProteinView};
