/*!
 * Common test utilities for the akaire test suite
 */

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds an annotation line in the current grammar
pub fn annotation_line(original: &str, corrected: &str, reason: &str, category: &str) -> String {
    format!(
        "- 1行目: ({}) -> ({}): {} [カテゴリー: {}]",
        original, corrected, reason, category
    )
}

/// Builds a full LLM response from a corrected body and annotation lines
pub fn build_response(body: &str, annotation_lines: &[String]) -> String {
    let mut response = String::from(body);
    response.push_str("\n\n✅修正箇所：\n");
    for line in annotation_lines {
        response.push_str(line);
        response.push('\n');
    }
    response
}
