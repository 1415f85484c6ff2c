use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Entry – one row of the label table
// ---------------------------------------------------------------------------

/// A single `(frequency, label)` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Frequency in Hz, always finite and > 0 once loaded.
    pub frequency_hz: f64,
    /// Non-empty, trimmed label text.
    pub label: String,
}

impl Entry {
    pub fn new(frequency_hz: f64, label: impl Into<String>) -> Self {
        Entry {
            frequency_hz,
            label: label.into(),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Hz  {}", self.frequency_hz, self.label)
    }
}

// ---------------------------------------------------------------------------
// FreqTable – the sorted, queryable collection
// ---------------------------------------------------------------------------

/// Entries sorted by strictly increasing frequency.
///
/// Only the loader builds tables from raw text; [`FreqTable::from_entries`]
/// applies the same ordering and duplicate policy to entries built in code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FreqTable {
    entries: Vec<Entry>,
}

impl FreqTable {
    /// Sort (stable) and collapse equal frequencies to the entry that came last.
    ///
    /// Entries with a non-finite or non-positive frequency, or an empty label,
    /// are discarded.
    pub fn from_entries(mut entries: Vec<Entry>) -> Self {
        entries.retain(|e| {
            e.frequency_hz.is_finite() && e.frequency_hz > 0.0 && !e.label.is_empty()
        });
        entries.sort_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz));

        // `dedup_by` keeps the earlier element of each run; swap so the later
        // row takes its slot instead.
        entries.dedup_by(|later, kept| {
            if later.frequency_hz == kept.frequency_hz {
                std::mem::swap(later, kept);
                true
            } else {
                false
            }
        });

        FreqTable { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    /// Lowest and highest frequency in the table.
    pub fn span(&self) -> Option<(f64, f64)> {
        let first = self.entries.first()?;
        let last = self.entries.last()?;
        Some((first.frequency_hz, last.frequency_hz))
    }

    /// Entry stored at exactly `hz`.
    pub fn get_exact(&self, hz: f64) -> Option<&Entry> {
        if !hz.is_finite() {
            return None;
        }
        let idx = self.insertion_point(hz);
        self.entries.get(idx).filter(|e| e.frequency_hz == hz)
    }

    /// Closest entry to `hz` and its absolute distance in Hz.
    ///
    /// Only the two entries bracketing the insertion point are probed. When
    /// both are equally far away the one at the insertion point (the higher
    /// frequency) wins. Non-finite input never matches.
    pub fn nearest(&self, hz: f64) -> Option<(&Entry, f64)> {
        if !hz.is_finite() {
            return None;
        }
        let idx = self.insertion_point(hz);

        let at = self.entries.get(idx).map(|e| (e, (e.frequency_hz - hz).abs()));
        let before = idx
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|e| (e, (hz - e.frequency_hz).abs()));

        match (at, before) {
            (Some(a), Some(b)) => Some(if b.1 < a.1 { b } else { a }),
            (a, b) => a.or(b),
        }
    }

    /// Index of the first entry whose frequency is >= `hz`.
    fn insertion_point(&self, hz: f64) -> usize {
        self.entries.partition_point(|e| e.frequency_hz < hz)
    }
}

impl<'a> IntoIterator for &'a FreqTable {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(f64, &str)]) -> FreqTable {
        FreqTable::from_entries(rows.iter().map(|&(f, l)| Entry::new(f, l)).collect())
    }

    #[test]
    fn entries_are_sorted_ascending() {
        let t = table(&[(300.0, "c"), (100.0, "a"), (200.0, "b")]);
        let freqs: Vec<f64> = t.iter().map(|e| e.frequency_hz).collect();
        assert_eq!(freqs, vec![100.0, 200.0, 300.0]);
        assert_eq!(t.span(), Some((100.0, 300.0)));
    }

    #[test]
    fn duplicate_frequency_keeps_last_row() {
        let t = table(&[(100.0, "A"), (50.0, "x"), (100.0, "B"), (100.0, "C")]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.get_exact(100.0).map(|e| e.label.as_str()), Some("C"));
    }

    #[test]
    fn invalid_entries_are_dropped() {
        let t = table(&[
            (f64::NAN, "nan"),
            (f64::INFINITY, "inf"),
            (-1.0, "neg"),
            (5.0, ""),
            (5.0, "ok"),
        ]);
        assert_eq!(t.entries(), &[Entry::new(5.0, "ok")]);
    }

    #[test]
    fn nearest_probes_both_neighbours() {
        let t = table(&[(100.0, "low"), (110.0, "high")]);
        assert_eq!(t.nearest(103.0).map(|(e, d)| (e.label.as_str(), d)), Some(("low", 3.0)));
        assert_eq!(t.nearest(108.0).map(|(e, d)| (e.label.as_str(), d)), Some(("high", 2.0)));
        // equidistant: the entry at the insertion point wins
        assert_eq!(t.nearest(105.0).map(|(e, _)| e.label.as_str()), Some("high"));
    }

    #[test]
    fn nearest_outside_span_uses_edge_entry() {
        let t = table(&[(100.0, "low"), (110.0, "high")]);
        assert_eq!(t.nearest(1.0).map(|(e, _)| e.label.as_str()), Some("low"));
        assert_eq!(t.nearest(1e12).map(|(e, _)| e.label.as_str()), Some("high"));
    }

    #[test]
    fn nearest_rejects_non_finite_and_empty() {
        let t = table(&[(100.0, "a")]);
        assert!(t.nearest(f64::NAN).is_none());
        assert!(t.nearest(f64::NEG_INFINITY).is_none());
        assert!(FreqTable::default().nearest(100.0).is_none());
        assert!(t.get_exact(f64::NAN).is_none());
    }
}
