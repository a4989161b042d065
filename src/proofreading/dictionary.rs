/*!
 * Replacement dictionary for house-style wording.
 *
 * The dictionary maps original words to their preferred replacements.
 * It is never applied to text directly by this engine: active entries are
 * rendered into the prompt as instruction context, and the model reports
 * the substitutions it makes as `dict` category corrections.
 */

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_is_active() -> bool {
    true
}

/// One replacement dictionary entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// The word to replace
    pub original_word: String,
    /// The preferred replacement
    pub replacement_word: String,
    /// Whether the entry participates in proofreading
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

/// Replacement dictionary passed to the prompt builder
#[derive(Debug, Clone, Default)]
pub struct ReplacementDictionary {
    entries: Vec<DictionaryEntry>,
}

impl ReplacementDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary from entries
    pub fn from_entries(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }

    /// Load a dictionary from a JSON file (an array of entries)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open dictionary file: {}", path.display()))?;
        let entries: Vec<DictionaryEntry> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dictionary file: {}", path.display()))?;
        Ok(Self { entries })
    }

    /// Active `(original, replacement)` pairs in entry order
    pub fn active_mappings(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter(|e| e.is_active)
            .map(|e| (e.original_word.as_str(), e.replacement_word.as_str()))
            .collect()
    }

    /// Number of entries, active or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render active entries as prompt instruction lines
    ///
    /// Returns `None` when there is nothing to instruct.
    pub fn format_for_prompt(&self) -> Option<String> {
        let mappings = self.active_mappings();
        if mappings.is_empty() {
            return None;
        }
        let lines: Vec<String> = mappings
            .iter()
            .map(|(original, replacement)| format!("- 「{}」 → 「{}」", original, replacement))
            .collect();
        Some(lines.join("\n"))
    }
}
