//! Static residue catalogs: schema, loading, and the shared protein dictionary.

mod loader;
mod schema;
mod store;

pub mod dictionary;

pub use dictionary::{Conversion, ResidueDictionary};
pub use schema::{ConversionEntry, DictionaryFile, ResidueEntry};
pub use store::protein_dictionary;
