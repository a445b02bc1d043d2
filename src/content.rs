//! Static display content, one entry per temple label.
//!
//! The table is data, not code: the built-in copy is compiled in from
//! `content/temples.toml`, and a deployment can point `[content] path` at
//! its own file. Adding a category means adding a `[[temple]]` entry.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PrasatError, Result};

const EMBEDDED_CONTENT: &str = include_str!("../content/temples.toml");

/// Text for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub heading: String,
    pub body: String,
    /// Citation label, e.g. "Source: UNESCO".
    pub source: String,
}

/// Bilingual description of a temple, plus where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempleContent {
    pub label: String,
    pub title: String,
    pub source_url: String,
    pub khmer: ContentBlock,
    pub english: ContentBlock,
}

/// Bilingual message shown when nothing has been uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPrompt {
    pub khmer: String,
    pub english: String,
}

/// Label → content lookup table.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentTable {
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    pub prompt: UploadPrompt,
    #[serde(rename = "temple", default)]
    temples: Vec<TempleContent>,
}

impl ContentTable {
    /// The table compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED_CONTENT)
    }

    /// Load a table from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            PrasatError::Configuration(format!("Failed to read content file {path:?}: {e}"))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| PrasatError::Configuration(format!("Failed to parse content table: {e}")))
    }

    pub fn lookup(&self, label: &str) -> Option<&TempleContent> {
        self.temples.iter().find(|t| t.label == label)
    }

    pub fn temples(&self) -> &[TempleContent] {
        &self.temples
    }

    /// Check that every label has exactly one entry.
    pub fn validate<L: AsRef<str>>(&self, labels: &[L]) -> Result<()> {
        let mut seen = HashSet::new();
        for temple in &self.temples {
            if !seen.insert(temple.label.as_str()) {
                return Err(PrasatError::Configuration(format!(
                    "duplicate content entry for '{}'",
                    temple.label
                )));
            }
        }
        let missing: Vec<&str> = labels
            .iter()
            .map(|label| label.as_ref())
            .filter(|label| !seen.contains(label))
            .collect();
        if !missing.is_empty() {
            return Err(PrasatError::Configuration(format!(
                "no content for labels: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        title = "Test"

        [prompt]
        khmer = "km"
        english = "Please upload"

        [[temple]]
        label = "Bayon"
        title = "Bayon Temple"
        source_url = "https://example.org/bayon"

        [temple.khmer]
        heading = "h-km"
        body = "b-km"
        source = "s-km"

        [temple.english]
        heading = "h-en"
        body = "b-en"
        source = "s-en"
    "#;

    #[test]
    fn parse_minimal_table() {
        let table = ContentTable::parse(MINIMAL).unwrap();
        assert_eq!(table.title, "Test");
        assert_eq!(table.tagline, "");
        let bayon = table.lookup("Bayon").unwrap();
        assert_eq!(bayon.english.body, "b-en");
        assert!(table.lookup("Koh_Ker").is_none());
    }

    #[test]
    fn validate_reports_missing_labels() {
        let table = ContentTable::parse(MINIMAL).unwrap();
        assert!(table.validate(&["Bayon"]).is_ok());
        let err = table.validate(&["Bayon", "Koh_Ker"]).unwrap_err();
        assert!(err.to_string().contains("Koh_Ker"));
    }

    #[test]
    fn validate_rejects_duplicates() {
        let doubled = format!(
            "{MINIMAL}\n{}",
            &MINIMAL[MINIMAL.find("[[temple]]").unwrap()..]
        );
        let table = ContentTable::parse(&doubled).unwrap();
        let err = table.validate(&["Bayon"]).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn malformed_table_is_configuration_error() {
        let err = ContentTable::parse("title = ").unwrap_err();
        assert!(matches!(err, PrasatError::Configuration(_)));
    }
}
