//! CSV text ingestion.
//!
//! The accepted format is deliberately minimal: comma separated, no quoting
//! or escaping, first line is the header, optional leading row-id column.
//! Ingestion reproduces the conventions of the files this tool ships with:
//! writers end their output with a trailing line terminator, so the final
//! line is reserved as a non-data trailer, and a blank leading field ends
//! the data section early.

use std::path::Path;

use tracing::warn;

use super::TabularStore;
use crate::config::CsvOptions;
use crate::DataError;

impl TabularStore {
    /// Parse CSV text into a store.
    ///
    /// Line terminators may be `\r\n`, `\n\r`, `\n` or `\r`. Text with fewer
    /// than two lines yields the empty store — a defined result, not an
    /// error. The row count is `line count - 2`: one line for the header and
    /// one reserved trailing line, so text that does not end with a line
    /// terminator loses its final data row. A data line whose first field is
    /// blank stops ingestion; later lines are ignored and their rows keep
    /// zeroed cells and empty labels. Fields that match a configured missing
    /// pattern, fail numeric parsing, or parse to NaN or an infinity are
    /// stored as NaN and set the store-wide NaN flag.
    pub fn from_csv_text(text: &str, options: &CsvOptions) -> Self {
        Self::from_csv_text_named(text, options, "inline.csv")
    }

    /// Read and parse a CSV file. I/O failures surface as errors; parse
    /// irregularities degrade per [`from_csv_text`](Self::from_csv_text).
    pub fn load_csv_file(path: impl AsRef<Path>, options: &CsvOptions) -> Result<Self, DataError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let source_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown.csv");
        Ok(Self::from_csv_text_named(&text, options, source_name))
    }

    pub(crate) fn from_csv_text_named(
        text: &str,
        options: &CsvOptions,
        source_name: &str,
    ) -> Self {
        let lines = split_lines(text);
        if lines.len() < 2 {
            warn!("CSV text has fewer than 2 lines; producing an empty store");
            return Self::empty();
        }

        let header: Vec<&str> = lines[0].split(',').collect();
        let width = if options.has_row_names {
            header.len() - 1
        } else {
            header.len()
        };
        // Header plus the reserved trailing line.
        let height = lines.len() - 2;

        let column_names: Vec<String> = header[header.len() - width..]
            .iter()
            .map(|name| name.to_string())
            .collect();
        let row_names = vec![String::new(); height];

        let mut store = Self::with_shape(height, width, row_names, column_names, source_name);

        for row in 0..height {
            let fields: Vec<&str> = lines[row + 1].split(',').collect();
            // A blank leading field ends the data section.
            if fields[0].is_empty() {
                break;
            }
            let mut next_field = 0;
            if options.has_row_names {
                store.row_names[row] = fields[0].to_string();
                next_field = 1;
            }
            for column in 0..width {
                let raw = fields.get(next_field + column).copied().unwrap_or("");
                store.ingest_cell(row, column, parse_field(raw, options));
            }
        }

        store
    }
}

/// Split on `\r\n`, `\n\r`, `\n` or `\r`. A terminator at the end of the
/// text closes the final line without opening a new one.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        let byte = bytes[i];
        if byte == b'\n' || byte == b'\r' {
            lines.push(&text[start..i]);
            let paired = matches!(
                bytes.get(i + 1),
                Some(&next) if (byte == b'\n' && next == b'\r') || (byte == b'\r' && next == b'\n')
            );
            i += if paired { 2 } else { 1 };
            start = i;
        } else {
            i += 1;
        }
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Parse one field, normalizing missing markers, parse failures, NaN and
/// the infinities to NaN.
fn parse_field(raw: &str, options: &CsvOptions) -> f64 {
    if options.nan_patterns.matches(raw) {
        return f64::NAN;
    }
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_all_terminator_forms() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\r\nb\rc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\rb"), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\nb"), vec!["a", "", "b"]);
        // A trailing terminator closes the last line without adding one.
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
        assert_eq!(split_lines(""), Vec::<&str>::new());
    }

    #[test]
    fn fewer_than_two_lines_yields_empty_store() {
        let store = TabularStore::from_csv_text("x,y", &CsvOptions::default());
        assert!(store.is_empty());
    }

    #[test]
    fn blank_leading_field_stops_ingestion() {
        let text = "id,x\nr1,1\n,999\nr3,3\n\n";
        let store = TabularStore::from_csv_text(text, &CsvOptions::with_row_names());
        assert_eq!(store.height(), 3);
        assert_eq!(store.value(0, 0), 1.0);
        // Rows past the sentinel keep zeroed cells and empty labels.
        assert_eq!(store.value(1, 0), 0.0);
        assert_eq!(store.value(2, 0), 0.0);
        assert_eq!(store.row_names()[2], "");
    }

    #[test]
    fn unparsable_fields_become_nan() {
        let text = "x,y\n1,two\ninf,4\n\n";
        let store = TabularStore::from_csv_text(text, &CsvOptions::default());
        assert!(store.contains_nans());
        assert!(store.value(0, 1).is_nan());
        assert!(store.value(1, 0).is_nan());
        assert_eq!(store.value(1, 1), 4.0);
    }

    #[test]
    fn missing_trailing_terminator_drops_last_row() {
        let text = "x\n1\n2\n3";
        let store = TabularStore::from_csv_text(text, &CsvOptions::default());
        assert_eq!(store.height(), 2);
        assert_eq!(store.column(0), &[1.0, 2.0]);
    }
}
