use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, trace};

use super::model::{Entry, FreqTable};
use super::source::{FileSource, LineSource};
use crate::error::LoadError;

/// First-line substrings (lowercase) that mark a header row.
pub const HEADER_TOKENS: &[&str] = &["freq", "label"];

const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Build a [`FreqTable`] from raw table lines.
///
/// Line format: `<frequency><sep><label>` where `<sep>` is `;` if the line
/// contains one and `,` otherwise. Only the first separator splits, so labels
/// may contain further separators.
///
/// * The first line is skipped when it looks like a header (see
///   [`HEADER_TOKENS`]); otherwise it is parsed like any other row.
/// * Rows with an unparsable, non-finite or non-positive frequency, or an
///   empty label, are dropped silently.
/// * Rows are stable-sorted by frequency; for repeated frequencies the row
///   read last is kept.
///
/// Fails with [`LoadError::EmptyTable`] when no row survives.
pub fn load<I, S>(lines: I) -> Result<FreqTable, LoadError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries = Vec::new();
    let mut skipped = 0usize;
    let mut header = false;

    for (line_no, line) in lines.into_iter().enumerate() {
        let mut line = line.as_ref();

        if line_no == 0 {
            line = line.strip_prefix(BOM).unwrap_or(line);
            if is_header(line) {
                trace!("line 1: header skipped: {line:?}");
                header = true;
                continue;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        match parse_row(line) {
            Some(entry) => entries.push(entry),
            None => {
                trace!("line {}: malformed row skipped: {line:?}", line_no + 1);
                skipped += 1;
            }
        }
    }

    let parsed = entries.len();
    let table = FreqTable::from_entries(entries);
    debug!(
        "label table: {parsed} rows parsed, {skipped} malformed, {} superseded duplicates, header={header}",
        parsed - table.len()
    );

    if table.is_empty() {
        return Err(LoadError::EmptyTable);
    }
    Ok(table)
}

/// Pull lines from `source` and load them.
///
/// I/O failures carry context; an empty result stays a [`LoadError`] that
/// callers can `downcast_ref`.
pub fn load_from(source: &dyn LineSource) -> Result<FreqTable> {
    let lines = source.provide_lines()?;
    let table =
        load(&lines).with_context(|| format!("loading labels from {}", source.describe()))?;
    Ok(table)
}

/// Load a label table file.
pub fn load_file(path: &Path) -> Result<FreqTable> {
    load_from(&FileSource::new(path))
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Header heuristic: a case-insensitive substring match on the whole line.
///
/// A data row whose label happens to contain a token (e.g.
/// `"7000000,Label test"`) is mistaken for a header when it comes first.
pub fn is_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    HEADER_TOKENS.iter().any(|tok| lower.contains(tok))
}

/// Parse one data row, `None` when malformed.
pub fn parse_row(line: &str) -> Option<Entry> {
    let sep = if line.contains(';') { ';' } else { ',' };
    let (freq_field, label_field) = line.split_once(sep)?;

    let frequency_hz: f64 = freq_field.trim().parse().ok()?;
    if !frequency_hz.is_finite() || frequency_hz <= 0.0 {
        return None;
    }

    let label = label_field.trim_end_matches(['\r', '\n']).trim();
    if label.is_empty() {
        return None;
    }

    Some(Entry::new(frequency_hz, label))
}
