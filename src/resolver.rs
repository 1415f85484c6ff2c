//! Nearest-match lookup of a tuned frequency against a [`FreqTable`].

use serde::{Deserialize, Serialize};

use crate::data::model::{Entry, FreqTable};
use crate::error::ConfigError;

/// Default matching window, ±10 kHz.
pub const DEFAULT_TOLERANCE_HZ: f64 = 10_000.0;

/// 8.333 kHz aeronautical VHF channel raster.
pub const AIRBAND_RASTER_HZ: f64 = 25_000.0 / 3.0;

// ---------------------------------------------------------------------------
// ToleranceConfig
// ---------------------------------------------------------------------------

/// How far a tuned frequency may sit from an entry and still match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Maximum absolute distance in Hz, inclusive.
    pub tolerance_hz: f64,
    /// Channel spacing the query is snapped to before matching.
    pub quantize_raster_hz: Option<f64>,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        ToleranceConfig {
            tolerance_hz: DEFAULT_TOLERANCE_HZ,
            quantize_raster_hz: None,
        }
    }
}

impl ToleranceConfig {
    pub fn new(tolerance_hz: f64, quantize_raster_hz: Option<f64>) -> Result<Self, ConfigError> {
        let cfg = ToleranceConfig {
            tolerance_hz,
            quantize_raster_hz,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Exact matches only.
    pub fn exact() -> Self {
        ToleranceConfig {
            tolerance_hz: 0.0,
            quantize_raster_hz: None,
        }
    }

    pub fn with_raster(mut self, raster_hz: f64) -> Result<Self, ConfigError> {
        self.quantize_raster_hz = Some(raster_hz);
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance_hz.is_finite() || self.tolerance_hz < 0.0 {
            return Err(ConfigError::InvalidTolerance(self.tolerance_hz));
        }
        if let Some(r) = self.quantize_raster_hz {
            if !r.is_finite() || r <= 0.0 {
                return Err(ConfigError::InvalidRaster(r));
            }
        }
        Ok(())
    }

    /// Snap `hz` to the configured raster, or pass it through unchanged.
    pub fn quantize(&self, hz: f64) -> f64 {
        match self.quantize_raster_hz {
            Some(r) => (hz / r).round() * r,
            None => hz,
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Find the entry matching `tuned_hz` under `cfg`.
///
/// The query is quantized first, then the closest entry is taken from the two
/// neighbours of its sorted insertion point and accepted when it lies within
/// `cfg.tolerance_hz` (inclusive). Ties go to the higher frequency.
///
/// NaN or infinite input, before or after quantization, never matches.
pub fn resolve_entry<'t>(
    table: &'t FreqTable,
    tuned_hz: f64,
    cfg: &ToleranceConfig,
) -> Option<&'t Entry> {
    if !tuned_hz.is_finite() {
        return None;
    }
    let query = cfg.quantize(tuned_hz);
    let (entry, distance) = table.nearest(query)?;
    (distance <= cfg.tolerance_hz).then_some(entry)
}

/// Label for `tuned_hz`, `None` when nothing is within tolerance.
pub fn resolve<'t>(table: &'t FreqTable, tuned_hz: f64, cfg: &ToleranceConfig) -> Option<&'t str> {
    resolve_entry(table, tuned_hz, cfg).map(|e| e.label.as_str())
}
