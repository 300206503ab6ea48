//! Reads vocabulary entries produced by the extraction service.
//! Accepts either a bare JSON array of entries or an object with an
//! `entries` (or `cards`) array and an optional collection `name`.

use crate::Result;
use crate::models::VocabEntry;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, PartialEq)]
pub struct ExtractedList {
    /// Suggested collection name, taken from the document if present
    pub name: Option<String>,
    pub entries: Vec<VocabEntry>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtractedFile {
    List(Vec<VocabEntry>),
    Named {
        name: Option<String>,
        #[serde(alias = "cards")]
        entries: Vec<VocabEntry>,
    },
}

pub fn parse_entries(json: &str) -> Result<ExtractedList> {
    let list = match serde_json::from_str::<ExtractedFile>(json)? {
        ExtractedFile::List(entries) => ExtractedList { name: None, entries },
        ExtractedFile::Named { name, entries } => ExtractedList { name, entries },
    };
    Ok(list)
}

/// Imports extracted entries from a JSON file.
/// When the file carries no name, the file stem is used.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_entries(path: impl AsRef<Path>) -> Result<ExtractedList> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut list = parse_entries(&contents)?;
    if list.name.is_none() {
        list.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
    }

    info!("Read {} entries from '{}'", list.entries.len(), path.display());
    Ok(list)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_import_bare_list_uses_file_stem() {
        let json_content = r#"[
  {
    "word": "harvest",
    "definitionVN": "mùa gặt",
    "exampleEN": "The harvest was good.",
    "exampleVN": "Mùa gặt năm nay tốt.",
    "level": "B1"
  }
]"#;

        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("unit-3.json");
        fs::write(&test_file, json_content).unwrap();

        let list = import_entries(&test_file).unwrap();
        assert_eq!(list.name.as_deref(), Some("unit-3"));
        assert_eq!(list.entries.len(), 1);
        assert_eq!(list.entries[0].word, "harvest");
        assert_eq!(list.entries[0].definition, "mùa gặt");
    }

    #[test]
    fn test_parse_named_list() {
        let list = parse_entries(
            r#"{"name": "Travel", "cards": [{"word": "ticket", "definitionVN": "vé"}]}"#,
        )
        .unwrap();
        assert_eq!(list.name.as_deref(), Some("Travel"));
        assert_eq!(list.entries[0].word, "ticket");
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_entries("nonexistent_file_xyz123.json");
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("invalid.json");
        fs::write(&test_file, "{ this is not valid json }").unwrap();

        let result = import_entries(&test_file);
        assert!(matches!(result, Err(crate::Error::Json(_))));
    }
}
