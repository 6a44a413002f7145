use super::dictionary::ResidueDictionary;
use super::loader;
use std::sync::OnceLock;

static PROTEIN: OnceLock<ResidueDictionary> = OnceLock::new();

/// Process-wide protein catalog, parsed from the embedded TOML on first use.
pub fn protein_dictionary() -> &'static ResidueDictionary {
    PROTEIN.get_or_init(loader::load_protein_dictionary)
}
