use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct DictionaryFile {
    pub unknown: String,
    #[serde(default)]
    pub backbone: Option<Vec<String>>,
    pub residues: Vec<ResidueEntry>,
    #[serde(default)]
    pub conversions: Vec<ConversionEntry>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ResidueEntry {
    pub name: String,
    pub code: String,
    pub atoms: Vec<String>,
    pub elements: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConversionEntry {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub atom_swaps: Vec<[String; 2]>,
}
