//! Tabular data stores and CSV handling for the linked-view core.
//!
//! The stores here are immutable after construction and shared read-only
//! with the views; per-point selection state lives in `blf-core`'s linked
//! index space, never in the data itself.

pub mod config;
pub mod export;
pub mod store;
pub mod table;

use thiserror::Error;

// Re-exports
pub use config::{CsvOptions, NanPatterns};
pub use export::{export_highlighted, write_highlighted_csv};
pub use store::Store;
pub use table::clustered::DEFAULT_PALETTE;
pub use table::{Cluster, ClusteredTabularStore, ColorTag, TabularStore};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writer error: {0}")]
    Csv(String),

    #[error("shape mismatch: store has {store_rows} rows, index space has {space_size}")]
    ShapeMismatch { store_rows: usize, space_size: usize },

    #[error("other error: {0}")]
    Other(String),
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => {
                DataError::Io(std::io::Error::new(io_err.kind(), error.to_string()))
            }
            _ => DataError::Csv(error.to_string()),
        }
    }
}
