//! VocabEntry is a bilingual vocabulary item: an English word, its Vietnamese
//! definition and a pair of example sentences.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabEntry {
    pub word: String,
    #[serde(rename = "definitionVN", alias = "definition")]
    pub definition: String,
    #[serde(rename = "exampleEN", default)]
    pub example_en: String,
    #[serde(rename = "exampleVN", default)]
    pub example_vn: String,
    /// CEFR level (A1..C2) reported by the extractor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl VocabEntry {
    pub fn new(word: &str, definition: &str) -> Self {
        Self {
            word: word.to_string(),
            definition: definition.to_string(),
            example_en: String::new(),
            example_vn: String::new(),
            level: None,
        }
    }

    pub fn with_examples(mut self, example_en: &str, example_vn: &str) -> Self {
        self.example_en = example_en.to_string();
        self.example_vn = example_vn.to_string();
        self
    }
}
