use super::dictionary::ResidueDictionary;
use super::schema::DictionaryFile;

pub fn load_protein_dictionary() -> ResidueDictionary {
    let content = include_str!("../../dictionaries/protein.toml");
    let file: DictionaryFile = toml::from_str(content)
        .unwrap_or_else(|e| panic!("Failed to parse embedded protein catalog: {}", e));
    ResidueDictionary::from_file(&file)
        .unwrap_or_else(|e| panic!("Invalid embedded protein catalog: {}", e))
}
