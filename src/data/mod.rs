/// Data layer: table model, loading, and line sources.
///
/// Architecture:
/// ```text
///  freq_labels.csv / bundled text
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  provide_lines() → Vec<String>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse rows → FreqTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ FreqTable  │  Vec<Entry>, sorted by frequency
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod source;
