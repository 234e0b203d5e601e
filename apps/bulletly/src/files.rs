use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Reads one bullet per line; lines are trimmed and blank lines skipped.
pub fn read_bullets_from_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read bullets from {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

/// Writes `value` as pretty-printed UTF-8 JSON.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
    fs::write(path, body).with_context(|| format!("Failed to write {}", path.display()))
}
