/*!
 * File system operations for the CLI layer.
 */

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File manager for reading inputs and writing proofreading outputs
pub struct FileManager;

impl FileManager {
    /// Read a text file to a string
    pub fn read_to_string(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Write a string to a file, creating parent directories as needed
    pub fn write_string(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    /// Derive an output path by inserting a label before the extension
    ///
    /// `article.txt` with label `corrected` becomes `article.corrected.txt`;
    /// an explicit extension override replaces the original one.
    pub fn derived_path(input: &Path, label: &str, extension: Option<&str>) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "output".to_string());
        let ext = extension
            .map(|e| e.to_string())
            .or_else(|| input.extension().map(|e| e.to_string_lossy().to_string()))
            .unwrap_or_else(|| "txt".to_string());
        let file_name = format!("{}.{}.{}", stem, label, ext);
        input.with_file_name(file_name)
    }
}
