//! CSV export of the highlighted rows of a store.

use std::path::Path;

use blf_core::LinkedIndexSpace;
use tracing::info;

use crate::table::TabularStore;
use crate::DataError;

/// Render the highlighted rows of `store` as CSV text, preserving column
/// order. With `include_row_names` the row identifier is emitted as a
/// leading `id` column. The store and the space must agree on the row
/// count.
pub fn export_highlighted(
    store: &TabularStore,
    space: &LinkedIndexSpace,
    include_row_names: bool,
) -> Result<String, DataError> {
    if space.len() != store.height() {
        return Err(DataError::ShapeMismatch {
            store_rows: store.height(),
            space_size: space.len(),
        });
    }

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = Vec::with_capacity(store.width() + 1);
    if include_row_names {
        header.push("id".to_string());
    }
    header.extend(store.column_names().iter().cloned());
    writer.write_record(&header)?;

    for row in 0..store.height() {
        if !space.highlighted(row) {
            continue;
        }
        let mut record: Vec<String> = Vec::with_capacity(store.width() + 1);
        if include_row_names {
            record.push(store.row_names()[row].clone());
        }
        for column in 0..store.width() {
            record.push(store.value(row, column).to_string());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| DataError::Csv(error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| DataError::Other(error.to_string()))
}

/// Write the highlighted rows of `store` to a CSV file.
pub fn write_highlighted_csv(
    path: impl AsRef<Path>,
    store: &TabularStore,
    space: &LinkedIndexSpace,
    include_row_names: bool,
) -> Result<(), DataError> {
    let text = export_highlighted(store, space, include_row_names)?;
    std::fs::write(path.as_ref(), text)?;
    info!(
        "exported {} highlighted rows to {:?}",
        space.highlighted_count(),
        path.as_ref()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CsvOptions;

    #[test]
    fn export_contains_only_highlighted_rows() {
        let text = "id,x,y\nr1,1,2\nr2,3,4\nr3,5,6\n\n";
        let store = TabularStore::from_csv_text(text, &CsvOptions::with_row_names());
        let space = LinkedIndexSpace::new(store.height());
        space.set_highlighted(0, true);
        space.set_highlighted(2, true);

        let exported = export_highlighted(&store, &space, true).unwrap();
        assert_eq!(exported, "id,x,y\nr1,1,2\nr3,5,6\n");
    }

    #[test]
    fn size_disagreement_is_an_error() {
        let store = TabularStore::random(4, 2);
        let space = LinkedIndexSpace::new(3);
        let result = export_highlighted(&store, &space, false);
        assert!(matches!(result, Err(DataError::ShapeMismatch { .. })));
    }
}
