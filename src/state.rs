use std::sync::{Arc, Mutex, PoisonError, RwLock};

use anyhow::Result;
use log::{info, warn};

use crate::data::loader;
use crate::data::model::FreqTable;
use crate::data::source::LineSource;
use crate::error::LoadError;
use crate::resolver::{self, ToleranceConfig};

/// Text shown when the current frequency has no label.
pub const NO_MATCH_TEXT: &str = "(no match)";

// ---------------------------------------------------------------------------
// LabelStore – the published table snapshot
// ---------------------------------------------------------------------------

/// Holds the current table behind a swappable `Arc`.
///
/// Lookups clone the `Arc` and release the lock before searching, so a
/// reload only ever contends for the pointer swap itself. A lookup that
/// started before a swap finishes against the table it picked up.
#[derive(Debug, Default)]
pub struct LabelStore {
    current: RwLock<Option<Arc<FreqTable>>>,
    /// Serialises reloads; lookups never take it.
    publish_guard: Mutex<()>,
}

impl LabelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: FreqTable) -> Self {
        let store = Self::new();
        store.publish(table);
        store
    }

    /// The table lookups currently see.
    pub fn snapshot(&self) -> Option<Arc<FreqTable>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Replace the current table, returning the one it superseded.
    pub fn publish(&self, table: FreqTable) -> Option<Arc<FreqTable>> {
        let _guard = self.publish_guard.lock().unwrap_or_else(PoisonError::into_inner);
        let len = table.len();
        let previous = self.swap(Some(Arc::new(table)));
        info!("published label table with {len} entries");
        previous
    }

    /// Drop the current table; lookups return no match until the next publish.
    pub fn clear(&self) {
        let _guard = self.publish_guard.lock().unwrap_or_else(PoisonError::into_inner);
        self.swap(None);
    }

    /// Load `source` and publish the result.
    ///
    /// On failure the previous table stays in place. An empty result surfaces
    /// as [`LoadError::EmptyTable`] inside the returned error.
    pub fn reload(&self, source: &dyn LineSource) -> Result<usize> {
        let table = loader::load_from(source).map_err(|err| {
            warn!("reload from {} failed, keeping previous table: {err:#}", source.describe());
            err
        })?;
        let len = table.len();
        self.publish(table);
        Ok(len)
    }

    /// Like [`LabelStore::reload`] for lines already in memory.
    pub fn reload_lines<I, S>(&self, lines: I) -> Result<usize, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let table = loader::load(lines).inspect_err(|_| {
            warn!("reload produced an empty table, keeping previous table");
        })?;
        let len = table.len();
        self.publish(table);
        Ok(len)
    }

    /// Label for `tuned_hz` in the current table.
    ///
    /// Allocates only for the returned label.
    pub fn resolve(&self, tuned_hz: f64, cfg: &ToleranceConfig) -> Option<String> {
        let table = self.snapshot()?;
        resolver::resolve(&table, tuned_hz, cfg).map(str::to_owned)
    }

    fn swap(&self, next: Option<Arc<FreqTable>>) -> Option<Arc<FreqTable>> {
        let mut slot = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *slot, next)
    }
}

// ---------------------------------------------------------------------------
// TuneSession – state driven by tuning events
// ---------------------------------------------------------------------------

/// Tracks the tuned frequency and the label last resolved for it.
pub struct TuneSession {
    store: Arc<LabelStore>,
    config: ToleranceConfig,
    last_hz: Option<f64>,
    last_label: Option<String>,
}

impl TuneSession {
    pub fn new(store: Arc<LabelStore>, config: ToleranceConfig) -> Self {
        TuneSession {
            store,
            config,
            last_hz: None,
            last_label: None,
        }
    }

    pub fn store(&self) -> &Arc<LabelStore> {
        &self.store
    }

    pub fn config(&self) -> &ToleranceConfig {
        &self.config
    }

    /// Handle a frequency change and return the label for it.
    pub fn tune(&mut self, hz: f64) -> Option<&str> {
        self.last_hz = Some(hz);
        self.last_label = self.store.resolve(hz, &self.config);
        self.last_label.as_deref()
    }

    /// Re-resolve the last tuned frequency, e.g. after a reload.
    pub fn refresh(&mut self) -> Option<&str> {
        match self.last_hz {
            Some(hz) => self.tune(hz),
            None => None,
        }
    }

    pub fn last_hz(&self) -> Option<f64> {
        self.last_hz
    }

    pub fn last_label(&self) -> Option<&str> {
        self.last_label.as_deref()
    }

    /// The last label, or [`NO_MATCH_TEXT`].
    pub fn display_text(&self) -> &str {
        self.last_label().unwrap_or(NO_MATCH_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::TextSource;

    fn store() -> Arc<LabelStore> {
        Arc::new(LabelStore::with_table(
            loader::load(["118000000,Tower", "121500000,Ground"]).unwrap(),
        ))
    }

    #[test]
    fn unloaded_store_never_matches() {
        let store = LabelStore::new();
        assert!(!store.is_loaded());
        assert_eq!(store.resolve(118_000_000.0, &ToleranceConfig::default()), None);
    }

    #[test]
    fn publish_swaps_table_but_keeps_old_snapshot_alive() {
        let store = store();
        let old = store.snapshot().unwrap();

        let n = store.reload_lines(["118000000,New tower"]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(
            store.resolve(118_000_000.0, &ToleranceConfig::default()).as_deref(),
            Some("New tower")
        );
        // a reader holding the old snapshot still sees a complete table
        assert_eq!(old.len(), 2);
        assert_eq!(old.get_exact(121_500_000.0).unwrap().label, "Ground");
    }

    #[test]
    fn empty_reload_keeps_previous_table() {
        let store = store();
        assert_eq!(store.reload_lines(["freq,name", "bogus"]), Err(LoadError::EmptyTable));

        let err = store.reload(&TextSource::new("freq,name\n")).unwrap_err();
        assert_eq!(err.downcast_ref::<LoadError>(), Some(&LoadError::EmptyTable));

        assert_eq!(store.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn clear_drops_table() {
        let store = store();
        store.clear();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn session_tracks_last_label() {
        let mut session = TuneSession::new(store(), ToleranceConfig::default());
        assert_eq!(session.display_text(), NO_MATCH_TEXT);

        assert_eq!(session.tune(118_005_000.0), Some("Tower"));
        assert_eq!(session.display_text(), "Tower");
        assert_eq!(session.last_hz(), Some(118_005_000.0));

        assert_eq!(session.tune(130_000_000.0), None);
        assert_eq!(session.display_text(), NO_MATCH_TEXT);
    }

    #[test]
    fn refresh_picks_up_reloaded_labels() {
        let mut session = TuneSession::new(store(), ToleranceConfig::default());
        assert_eq!(session.refresh(), None);

        session.tune(121_500_000.0);
        session.store().reload_lines(["121500000,Ground west"]).unwrap();
        assert_eq!(session.refresh(), Some("Ground west"));
    }
}
