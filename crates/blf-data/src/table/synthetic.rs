//! Synthetic data generation for demos and tests.

use rand::Rng;
use tracing::warn;

use super::clustered::DEFAULT_PALETTE;
use super::{ClusteredTabularStore, TabularStore};

impl TabularStore {
    /// A store filled with uniform random values in `[0, 1)` and generated
    /// row and column labels. Zero dimensions degrade to the empty store.
    pub fn random(height: usize, width: usize) -> Self {
        if height == 0 || width == 0 {
            warn!("refusing to generate a {}x{} store; producing an empty one", height, width);
            return Self::empty();
        }
        let mut rng = rand::thread_rng();
        let row_names = (0..height).map(|row| format!("row {row}")).collect();
        let column_names = (0..width).map(|column| format!("column {column}")).collect();
        let mut store = Self::with_shape(height, width, row_names, column_names, "synthetic");
        for row in 0..height {
            for column in 0..width {
                store.ingest_cell(row, column, rng.gen::<f64>());
            }
        }
        store
    }
}

impl ClusteredTabularStore {
    /// A clustered store with `cluster_count` contiguous groups in the key
    /// column and uniform random data elsewhere. `width` includes the key
    /// column, so it must be at least 2.
    pub fn random(height: usize, width: usize, cluster_count: usize) -> Self {
        if height == 0 || width < 2 || cluster_count == 0 || cluster_count > height {
            warn!(
                "cannot generate {} clusters over a {}x{} store; producing an empty one",
                cluster_count, height, width
            );
            return Self::new(TabularStore::empty());
        }
        let mut rng = rand::thread_rng();
        let row_names = (0..height).map(|row| format!("row {row}")).collect();
        let mut column_names = vec!["cluster".to_string()];
        column_names.extend((1..width).map(|column| format!("column {column}")));
        let mut store = TabularStore::with_shape(height, width, row_names, column_names, "synthetic");
        for row in 0..height {
            store.ingest_cell(row, 0, (row * cluster_count / height) as f64);
            for column in 1..width {
                store.ingest_cell(row, column, rng.gen::<f64>());
            }
        }
        Self::with_palette(store, DEFAULT_PALETTE)
    }
}
