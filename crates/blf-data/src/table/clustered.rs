//! Cluster segmentation: contiguous runs of rows sharing one key value.

use std::ops::Range;
use std::path::Path;

use ahash::AHashMap;
use ordered_float::OrderedFloat;
use tracing::warn;

use super::TabularStore;
use crate::config::CsvOptions;
use crate::DataError;

/// Opaque color tag assigned to a cluster from a cyclic palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTag(pub [u8; 3]);

/// Default categorical palette, cycled via modulo when there are more
/// clusters than entries.
pub const DEFAULT_PALETTE: &[ColorTag] = &[
    ColorTag([100, 150, 250]), // Blue
    ColorTag([250, 150, 100]), // Orange
    ColorTag([150, 250, 100]), // Green
    ColorTag([250, 100, 150]), // Pink
    ColorTag([150, 100, 250]), // Purple
    ColorTag([250, 250, 100]), // Yellow
    ColorTag([100, 250, 250]), // Cyan
    ColorTag([250, 100, 100]), // Red
];

/// Used when no palette is supplied: every cluster gets the same tag.
const SINGLE_TAG_PALETTE: &[ColorTag] = &[ColorTag([180, 180, 180])];

/// A contiguous run of rows sharing one key-column value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    /// The raw key-column value shared by the run.
    pub id: f64,
    /// First row of the run (inclusive).
    pub start: usize,
    /// One past the last row of the run (exclusive).
    pub end: usize,
    /// Tag assigned from the palette.
    pub color: ColorTag,
}

impl Cluster {
    /// Number of rows in the run.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the run holds no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The run as an index range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether `row` falls inside the run.
    pub fn contains(&self, row: usize) -> bool {
        self.start <= row && row < self.end
    }
}

/// A [`TabularStore`] whose rows are segmented into contiguous clusters by
/// the value of the key column (column 0).
///
/// Rows sharing a key value must already be contiguous in the input; this
/// is a precondition, not validated. A key whose rows arrive in
/// non-adjacent runs closes one cluster per run, and later runs overwrite
/// the id lookup entry of earlier ones (logged as a warning).
#[derive(Debug, Clone)]
pub struct ClusteredTabularStore {
    store: TabularStore,
    clusters: Vec<Cluster>,
    cluster_index: AHashMap<OrderedFloat<f64>, usize>,
}

impl ClusteredTabularStore {
    /// Segment a store with the single-entry default palette (all clusters
    /// share one tag).
    pub fn new(store: TabularStore) -> Self {
        Self::with_palette(store, SINGLE_TAG_PALETTE)
    }

    /// Segment a store, assigning cluster colors cyclically from `palette`.
    /// An empty palette falls back to the single-tag default.
    pub fn with_palette(store: TabularStore, palette: &[ColorTag]) -> Self {
        let palette = if palette.is_empty() {
            SINGLE_TAG_PALETTE
        } else {
            palette
        };
        let (clusters, cluster_index) = segment(&store, palette);
        Self {
            store,
            clusters,
            cluster_index,
        }
    }

    /// Parse CSV text and segment the result.
    pub fn from_csv_text(text: &str, options: &CsvOptions, palette: &[ColorTag]) -> Self {
        Self::with_palette(TabularStore::from_csv_text(text, options), palette)
    }

    /// Read, parse and segment a CSV file.
    pub fn load_csv_file(
        path: impl AsRef<Path>,
        options: &CsvOptions,
        palette: &[ColorTag],
    ) -> Result<Self, DataError> {
        Ok(Self::with_palette(
            TabularStore::load_csv_file(path, options)?,
            palette,
        ))
    }

    /// The underlying tabular data.
    pub fn table(&self) -> &TabularStore {
        &self.store
    }

    /// All clusters, in row order.
    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    /// Number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// Position of the cluster with this key value, if any.
    pub fn cluster_of_id(&self, id: f64) -> Option<usize> {
        self.cluster_index.get(&OrderedFloat(id)).copied()
    }

    /// The cluster containing `row`, if any.
    pub fn cluster_for_row(&self, row: usize) -> Option<&Cluster> {
        use std::cmp::Ordering;
        self.clusters
            .binary_search_by(|cluster| {
                if row < cluster.start {
                    Ordering::Greater
                } else if row >= cluster.end {
                    Ordering::Less
                } else {
                    Ordering::Equal
                }
            })
            .ok()
            .map(|position| &self.clusters[position])
    }

    /// Index ranges of all clusters, in cluster order. This is what the
    /// cluster-scoped masking policy consumes.
    pub fn cluster_ranges(&self) -> Vec<Range<usize>> {
        self.clusters.iter().map(Cluster::range).collect()
    }

    /// A clustered store needs at least one data column besides the key
    /// column to be usable.
    pub fn is_empty(&self) -> bool {
        self.store.height() == 0 || self.store.width() <= 1
    }
}

impl std::ops::Deref for ClusteredTabularStore {
    type Target = TabularStore;

    fn deref(&self) -> &TabularStore {
        &self.store
    }
}

impl blf_core::DataSet for ClusteredTabularStore {
    fn row_count(&self) -> usize {
        self.store.height()
    }

    fn is_empty(&self) -> bool {
        ClusteredTabularStore::is_empty(self)
    }

    fn source_name(&self) -> &str {
        self.store.source_name()
    }
}

/// Single forward scan of the key column: close a cluster whenever the key
/// changes, then close the final run. Skipped entirely for an empty store.
fn segment(
    store: &TabularStore,
    palette: &[ColorTag],
) -> (Vec<Cluster>, AHashMap<OrderedFloat<f64>, usize>) {
    let mut clusters = Vec::new();
    let mut cluster_index = AHashMap::new();
    if store.is_empty() {
        return (clusters, cluster_index);
    }

    let keys = store.column(0);
    let mut cluster_start = 0;
    let mut current_key = keys[0];
    for (row, &key) in keys.iter().enumerate().skip(1) {
        if key != current_key {
            close_cluster(
                &mut clusters,
                &mut cluster_index,
                palette,
                current_key,
                cluster_start,
                row,
            );
            cluster_start = row;
            current_key = key;
        }
    }
    close_cluster(
        &mut clusters,
        &mut cluster_index,
        palette,
        current_key,
        cluster_start,
        keys.len(),
    );

    (clusters, cluster_index)
}

fn close_cluster(
    clusters: &mut Vec<Cluster>,
    cluster_index: &mut AHashMap<OrderedFloat<f64>, usize>,
    palette: &[ColorTag],
    id: f64,
    start: usize,
    end: usize,
) {
    let position = clusters.len();
    clusters.push(Cluster {
        id,
        start,
        end,
        color: palette[position % palette.len()],
    });
    if cluster_index.insert(OrderedFloat(id), position).is_some() {
        warn!(
            "rows with key {} are not contiguous; id lookup keeps the later run",
            id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_store(keys: &[f64]) -> TabularStore {
        let rows: Vec<Vec<f64>> = keys.iter().map(|&key| vec![key, 0.5]).collect();
        let row_names = (0..keys.len()).map(|row| format!("r{row}")).collect();
        TabularStore::from_rows(&rows, row_names, vec!["key".into(), "v".into()])
    }

    #[test]
    fn segmentation_partitions_contiguous_runs() {
        let clustered = ClusteredTabularStore::new(keyed_store(&[7.0, 7.0, 7.0, 2.0, 2.0, 9.0]));
        let clusters = clustered.clusters();
        assert_eq!(clusters.len(), 3);
        assert_eq!((clusters[0].start, clusters[0].end), (0, 3));
        assert_eq!((clusters[1].start, clusters[1].end), (3, 5));
        assert_eq!((clusters[2].start, clusters[2].end), (5, 6));
        assert_eq!(clustered.cluster_of_id(7.0), Some(0));
        assert_eq!(clustered.cluster_of_id(2.0), Some(1));
        assert_eq!(clustered.cluster_of_id(9.0), Some(2));
    }

    #[test]
    fn palette_cycles_modulo_length() {
        let palette = &[ColorTag([1, 1, 1]), ColorTag([2, 2, 2])];
        let clustered = ClusteredTabularStore::with_palette(
            keyed_store(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            palette,
        );
        let colors: Vec<ColorTag> = clustered.clusters().iter().map(|c| c.color).collect();
        assert_eq!(
            colors,
            vec![
                ColorTag([1, 1, 1]),
                ColorTag([2, 2, 2]),
                ColorTag([1, 1, 1]),
                ColorTag([2, 2, 2]),
                ColorTag([1, 1, 1]),
            ]
        );
    }

    #[test]
    fn empty_store_skips_segmentation() {
        let clustered = ClusteredTabularStore::new(TabularStore::empty());
        assert!(clustered.clusters().is_empty());
        assert!(clustered.is_empty());
    }

    #[test]
    fn key_only_store_counts_as_empty() {
        let rows: Vec<Vec<f64>> = vec![vec![1.0], vec![1.0]];
        let store = TabularStore::from_rows(
            &rows,
            vec!["a".into(), "b".into()],
            vec!["key".into()],
        );
        let clustered = ClusteredTabularStore::new(store);
        // Still segmented, but unusable without a data column.
        assert_eq!(clustered.cluster_count(), 1);
        assert!(clustered.is_empty());
    }

    #[test]
    fn cluster_for_row_finds_the_containing_run() {
        let clustered = ClusteredTabularStore::new(keyed_store(&[7.0, 7.0, 2.0, 2.0, 2.0]));
        assert_eq!(clustered.cluster_for_row(1).map(|c| c.id), Some(7.0));
        assert_eq!(clustered.cluster_for_row(4).map(|c| c.id), Some(2.0));
        assert!(clustered.cluster_for_row(5).is_none());
    }
}
