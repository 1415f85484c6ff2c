use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

// ---------------------------------------------------------------------------
// Line sources – where table text comes from
// ---------------------------------------------------------------------------

/// Supplies the raw lines of a label table.
///
/// The loader never touches the filesystem itself; it only sees what a
/// source hands it.
pub trait LineSource {
    fn provide_lines(&self) -> Result<Vec<String>>;

    /// Human-readable origin used in log lines.
    fn describe(&self) -> String {
        "<lines>".to_string()
    }
}

/// A table file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    /// Invalid UTF-8 is replaced rather than rejected so one damaged label
    /// does not cost the whole table. `\r` is left for the loader to strip.
    fn provide_lines(&self) -> Result<Vec<String>> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("reading label table {}", self.path.display()))?;
        Ok(split_lines(&String::from_utf8_lossy(&bytes)))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Table text already in memory (bundled resource, test fixture).
#[derive(Debug, Clone, Default)]
pub struct TextSource {
    text: String,
}

impl TextSource {
    pub fn new(text: impl Into<String>) -> Self {
        TextSource { text: text.into() }
    }
}

impl LineSource for TextSource {
    fn provide_lines(&self) -> Result<Vec<String>> {
        Ok(split_lines(&self.text))
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    // A trailing newline does not start another line.
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_source_keeps_carriage_returns() {
        let src = TextSource::new("freq,name\r\n100,A\r\n");
        let lines = src.provide_lines().unwrap();
        assert_eq!(lines, vec!["freq,name\r", "100,A\r"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(TextSource::new("").provide_lines().unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_path() {
        let src = FileSource::new("/definitely/not/here/freq_labels.csv");
        let err = src.provide_lines().unwrap_err();
        assert!(format!("{err:#}").contains("freq_labels.csv"));
    }
}
