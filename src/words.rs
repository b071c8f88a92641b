use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_WORDS: &str = "/usr/share/dict/words";

pub fn default_words_path() -> PathBuf {
    PathBuf::from(DEFAULT_WORDS)
}

/// One word per line. Blank lines are dropped; case and length filtering is
/// left to the word pool.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading word list {}", path.display()))?;
    let words: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        bail!("word list {} is empty", path.display());
    }
    log::debug!("loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
