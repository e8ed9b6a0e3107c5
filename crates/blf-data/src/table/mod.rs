//! Columnar tabular stores with labeled rows and columns.

pub mod clustered;
mod csv;
mod synthetic;

pub use clustered::{Cluster, ClusteredTabularStore, ColorTag};

use blf_core::DataSet;
use tracing::warn;

/// An immutable-after-construction columnar numeric matrix with labeled
/// rows and columns, per-column extrema and a store-wide NaN flag.
///
/// Cell data is stored column-major: element `(row, column)` lives at flat
/// offset `row + column * height`. Per-column scans (extrema computation,
/// column-oriented rendering) therefore touch contiguous memory.
///
/// Construction either succeeds fully or degrades to the empty store with a
/// logged warning; a partially populated store is never exposed. Callers
/// check [`is_empty`](Self::is_empty) after construction. Index arguments on
/// accessors are bounds-checked and panic when out of range.
#[derive(Debug, Clone)]
pub struct TabularStore {
    height: usize,
    width: usize,
    /// Column-major cell data, `height * width` long.
    data: Vec<f64>,
    row_names: Vec<String>,
    column_names: Vec<String>,
    column_mins: Vec<f64>,
    column_maxes: Vec<f64>,
    contains_nans: bool,
    source_name: String,
}

impl TabularStore {
    /// The empty store: zero rows, zero columns.
    pub fn empty() -> Self {
        Self {
            height: 0,
            width: 0,
            data: Vec::new(),
            row_names: Vec::new(),
            column_names: Vec::new(),
            column_mins: Vec::new(),
            column_maxes: Vec::new(),
            contains_nans: false,
            source_name: "empty".to_string(),
        }
    }

    /// Build from a row-major matrix. Rows must be non-empty and rectangular
    /// and label lengths must match the matrix dimensions; on any mismatch
    /// the failure is logged and the empty store is returned.
    pub fn from_rows(
        rows: &[Vec<f64>],
        row_names: Vec<String>,
        column_names: Vec<String>,
    ) -> Self {
        if rows.is_empty() || rows[0].is_empty() {
            warn!("row matrix is empty; producing an empty store");
            return Self::empty();
        }
        let height = rows.len();
        let width = rows[0].len();
        if rows.iter().any(|row| row.len() != width) {
            warn!("row matrix is ragged; producing an empty store");
            return Self::empty();
        }
        if row_names.len() != height || column_names.len() != width {
            warn!(
                "{} row labels and {} column labels do not fit a {}x{} matrix; producing an empty store",
                row_names.len(),
                column_names.len(),
                height,
                width
            );
            return Self::empty();
        }

        let mut store = Self::with_shape(height, width, row_names, column_names, "inline");
        for (row, values) in rows.iter().enumerate() {
            for (column, &value) in values.iter().enumerate() {
                store.ingest_cell(row, column, value);
            }
        }
        store
    }

    /// Build from a column-major matrix. Same validation and degradation
    /// rules as [`from_rows`](Self::from_rows).
    pub fn from_columns(
        columns: &[Vec<f64>],
        row_names: Vec<String>,
        column_names: Vec<String>,
    ) -> Self {
        if columns.is_empty() || columns[0].is_empty() {
            warn!("column matrix is empty; producing an empty store");
            return Self::empty();
        }
        let width = columns.len();
        let height = columns[0].len();
        if columns.iter().any(|column| column.len() != height) {
            warn!("column matrix is ragged; producing an empty store");
            return Self::empty();
        }
        if row_names.len() != height || column_names.len() != width {
            warn!(
                "{} row labels and {} column labels do not fit a {}x{} matrix; producing an empty store",
                row_names.len(),
                column_names.len(),
                height,
                width
            );
            return Self::empty();
        }

        let mut store = Self::with_shape(height, width, row_names, column_names, "inline");
        for (column, values) in columns.iter().enumerate() {
            for (row, &value) in values.iter().enumerate() {
                store.ingest_cell(row, column, value);
            }
        }
        store
    }

    /// Allocate a zeroed store of the given shape; cells are then filled
    /// through [`ingest_cell`](Self::ingest_cell).
    fn with_shape(
        height: usize,
        width: usize,
        row_names: Vec<String>,
        column_names: Vec<String>,
        source_name: &str,
    ) -> Self {
        Self {
            height,
            width,
            data: vec![0.0; height * width],
            row_names,
            column_names,
            column_mins: vec![0.0; width],
            column_maxes: vec![0.0; width],
            contains_nans: false,
            source_name: source_name.to_string(),
        }
    }

    /// Write one cell during construction, maintaining the extrema and the
    /// NaN flag. Extrema are seeded from row 0 (even when that value is
    /// NaN); past row 0 plain IEEE comparisons apply, so NaN never updates
    /// them.
    fn ingest_cell(&mut self, row: usize, column: usize, value: f64) {
        self.data[row + column * self.height] = value;
        if value.is_nan() {
            self.contains_nans = true;
        }
        if row == 0 {
            self.column_mins[column] = value;
            self.column_maxes[column] = value;
        } else {
            if value < self.column_mins[column] {
                self.column_mins[column] = value;
            }
            if value > self.column_maxes[column] {
                self.column_maxes[column] = value;
            }
        }
    }

    /// Row count.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Column count.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the store holds no data at all.
    pub fn is_empty(&self) -> bool {
        self.height == 0 || self.width == 0
    }

    /// Whether any cell was stored as NaN (including coerced parse failures
    /// and infinities).
    pub fn contains_nans(&self) -> bool {
        self.contains_nans
    }

    /// Row labels, `height` long. Entries may be empty when the source had
    /// no row-id column.
    pub fn row_names(&self) -> &[String] {
        &self.row_names
    }

    /// Column labels, `width` long.
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Smallest non-NaN value seen in `column` (NaN if the first row's cell
    /// was NaN).
    pub fn column_min(&self, column: usize) -> f64 {
        assert!(column < self.width, "column {} out of bounds for width {}", column, self.width);
        self.column_mins[column]
    }

    /// Largest non-NaN value seen in `column` (NaN if the first row's cell
    /// was NaN).
    pub fn column_max(&self, column: usize) -> f64 {
        assert!(column < self.width, "column {} out of bounds for width {}", column, self.width);
        self.column_maxes[column]
    }

    /// Flat offset of `(row, column)` in the column-major arena.
    pub fn flat_index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.height && column < self.width,
            "index ({}, {}) out of bounds for {}x{} store",
            row,
            column,
            self.height,
            self.width
        );
        row + column * self.height
    }

    /// Cell value at `(row, column)`.
    pub fn value(&self, row: usize, column: usize) -> f64 {
        self.data[self.flat_index(row, column)]
    }

    /// Contiguous view of one column.
    pub fn column(&self, column: usize) -> &[f64] {
        assert!(column < self.width, "column {} out of bounds for width {}", column, self.width);
        &self.data[column * self.height..(column + 1) * self.height]
    }

    /// Gathered copy of one row.
    pub fn row(&self, row: usize) -> Vec<f64> {
        assert!(row < self.height, "row {} out of bounds for height {}", row, self.height);
        (0..self.width)
            .map(|column| self.data[row + column * self.height])
            .collect()
    }

    /// The whole column-major arena.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Name of the originating source (file name or generator).
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl Default for TabularStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl DataSet for TabularStore {
    fn row_count(&self) -> usize {
        self.height
    }

    fn is_empty(&self) -> bool {
        TabularStore::is_empty(self)
    }

    fn source_name(&self) -> &str {
        &self.source_name
    }
}
