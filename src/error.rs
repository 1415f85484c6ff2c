use thiserror::Error;

/// Errors surfaced by the table loader.
///
/// Malformed rows never show up here: they are dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No row of the input produced a valid entry.
    #[error("frequency table contains no valid rows")]
    EmptyTable,
}

/// Rejected tolerance / raster settings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tolerance must be a finite value >= 0 Hz, got {0}")]
    InvalidTolerance(f64),

    #[error("quantization raster must be a finite value > 0 Hz, got {0}")]
    InvalidRaster(f64),
}
