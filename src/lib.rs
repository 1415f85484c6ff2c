//! Map a tuned radio frequency to a label from a user-supplied table.
//!
//! ```
//! use freq_labels::{load, resolve, ToleranceConfig};
//!
//! let table = load(["freq,name", "118000000,Tower", "121500000,Ground"]).unwrap();
//! let cfg = ToleranceConfig::default();
//! assert_eq!(resolve(&table, 118_005_000.0, &cfg), Some("Tower"));
//! assert_eq!(resolve(&table, 130_000_000.0, &cfg), None);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod resolver;
pub mod state;

pub use config::Config;
pub use data::loader::{load, load_file, load_from};
pub use data::model::{Entry, FreqTable};
pub use data::source::{FileSource, LineSource, TextSource};
pub use error::{ConfigError, LoadError};
pub use resolver::{
    resolve, resolve_entry, ToleranceConfig, AIRBAND_RASTER_HZ, DEFAULT_TOLERANCE_HZ,
};
pub use state::{LabelStore, TuneSession, NO_MATCH_TEXT};
