//! # Data Loader Crate
//!
//! This crate turns the raw marine forecast exports into the training table
//! the wave-bulk classifier learns from.
//!
//! ## Main Components
//!
//! - **types**: Raw table records, joined records, feature vector, training row
//! - **parser**: Read the `;`-separated exports and read/write the training CSV
//! - **timestamp**: Decode HHMM time codes and parse observation timestamps
//! - **builder**: Join the three tables and clean the result
//! - **stats**: Descriptive statistics for dataset exploration
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{SourceTables, write_training_table};
//! use std::path::Path;
//!
//! let tables = SourceTables::load_from_dir(Path::new("data"), b';')?;
//! let rows = tables.build_training_table()?;
//! write_training_table(Path::new("data/sea_activity_dataset.csv"), &rows)?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod timestamp;
pub mod builder;
pub mod stats;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    BulkClass,
    DayId,
    // Raw tables
    DailyForecastRecord,
    HourlyForecastRecord,
    SeaConditionRecord,
    // Derived
    JoinedRecord,
    TrainingRow,
    FeatureVector,
    FEATURE_NAMES,
};
pub use builder::{build_training_table, SourceTables};
pub use parser::{read_training_table, write_training_table};
pub use stats::{bulk_counts, describe, ClassCount, FeatureSummary};
