//! Core functionality for linked-view brushing and filtering
//!
//! This crate provides the shared per-point attribute space, the masking
//! policies that hide unselected points, and the session state that ties a
//! loaded dataset to its views.

pub mod events;
pub mod masking;
pub mod session;
pub mod space;

// Re-export commonly used types
pub use masking::{ClusterToggleMasking, MaskingPolicy, ToggleMasking};
pub use session::Session;
pub use space::{IndexAttributes, LinkedIndexSpace, SpaceListener};
pub use data::DataSet;

/// Dataset abstraction implemented by the data crates.
pub mod data {
    /// Trait for datasets a session can attach to.
    ///
    /// The session only needs to size the linked index space and report what
    /// was loaded; everything else stays behind the implementing crate.
    pub trait DataSet: Send + Sync {
        /// Total number of data rows.
        fn row_count(&self) -> usize;

        /// Whether the dataset holds no usable data.
        fn is_empty(&self) -> bool;

        /// Name of the originating source (file name or generator).
        fn source_name(&self) -> &str;
    }
}
