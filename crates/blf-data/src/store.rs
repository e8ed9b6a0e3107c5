//! Tagged store variant: flat or clustered, dispatched explicitly.

use blf_core::{ClusterToggleMasking, DataSet, MaskingPolicy, ToggleMasking};

use crate::table::{Cluster, ClusteredTabularStore, TabularStore};

/// The two store shapes the linked-view core operates over.
///
/// Behavior that differs between them — masking policy selection, cluster
/// access — dispatches on this tag; there is no runtime type inspection
/// anywhere.
#[derive(Debug, Clone)]
pub enum Store {
    /// Unsegmented tabular data.
    Flat(TabularStore),
    /// Tabular data segmented into contiguous key clusters.
    Clustered(ClusteredTabularStore),
}

impl Store {
    /// The underlying tabular data, whichever the shape.
    pub fn table(&self) -> &TabularStore {
        match self {
            Store::Flat(store) => store,
            Store::Clustered(store) => store.table(),
        }
    }

    /// Clusters of a clustered store; `None` for a flat one.
    pub fn clusters(&self) -> Option<&[Cluster]> {
        match self {
            Store::Flat(_) => None,
            Store::Clustered(store) => Some(store.clusters()),
        }
    }

    /// A fresh masking policy matching this store's shape.
    pub fn masking_policy(&self) -> Box<dyn MaskingPolicy> {
        match self {
            Store::Flat(_) => Box::new(ToggleMasking::new()),
            Store::Clustered(store) => {
                Box::new(ClusterToggleMasking::new(store.cluster_ranges()))
            }
        }
    }

    /// Emptiness under the shape's own rules: a clustered store without a
    /// data column besides the key counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Store::Flat(store) => store.is_empty(),
            Store::Clustered(store) => store.is_empty(),
        }
    }
}

impl From<TabularStore> for Store {
    fn from(store: TabularStore) -> Self {
        Store::Flat(store)
    }
}

impl From<ClusteredTabularStore> for Store {
    fn from(store: ClusteredTabularStore) -> Self {
        Store::Clustered(store)
    }
}

impl DataSet for Store {
    fn row_count(&self) -> usize {
        self.table().height()
    }

    fn is_empty(&self) -> bool {
        Store::is_empty(self)
    }

    fn source_name(&self) -> &str {
        self.table().source_name()
    }
}
