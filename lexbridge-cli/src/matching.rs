//! Cross-reference CSV rows against a set of lemmas.
//!
//! Rows are kept as ordered column → value maps so the matched entries are
//! written back out with every column of the export.

use crate::error::{CliError, CliResult};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, trace, warn};

/// One CSV record: header → cell value, in column order.
pub type Row = Map<String, Value>;

/// Default column holding the ancient form of a name.
pub const ANCIENT_NAME_COLUMN: &str = "anc_name";
/// Default column holding the transcribed / modern form of a name.
pub const MODERN_NAME_COLUMN: &str = "transc_name";

/// Which columns are compared against the lemma set, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchColumns {
    pub ancient: String,
    pub modern: String,
}

impl Default for MatchColumns {
    fn default() -> Self {
        Self {
            ancient: ANCIENT_NAME_COLUMN.to_string(),
            modern: MODERN_NAME_COLUMN.to_string(),
        }
    }
}

/// Read every record of a headed CSV file.
pub fn read_rows_from_path(path: &Path) -> CliResult<Vec<Row>> {
    let file = File::open(path)
        .map_err(|e| CliError::Input(format!("failed to open {}: {e}", path.display())))?;
    read_rows(file)
}

/// Read every record of a headed CSV stream.
///
/// Short records are padded with nulls; a record longer than the header is
/// an error. Repeated header names get `.1`, `.2`, ... suffixes.
pub fn read_rows<R: Read>(reader: R) -> CliResult<Vec<Row>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = dedupe_headers(rdr.headers()?);

    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(CliError::Csv(format!(
                "record {} has {} fields, but the header has {}",
                idx + 1,
                record.len(),
                headers.len()
            )));
        }
        let row: Row = headers
            .iter()
            .enumerate()
            .map(|(i, header)| (header.clone(), record.get(i).map_or(Value::Null, cell_value)))
            .collect();
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = headers.len(), "read CSV export");
    Ok(rows)
}

fn dedupe_headers(headers: &csv::StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut names = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.to_string();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{header}.{n}");
            n += 1;
        }
        if name != header {
            warn!(column = %header, renamed = %name, "duplicate CSV column");
        }
        seen.insert(name.clone());
        names.push(name);
    }
    names
}

/// Empty → null, integer → integer, finite float → float, else string.
fn cell_value(cell: &str) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Value::from(i);
    }
    if let Some(n) = cell
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64)
    {
        return Value::Number(n);
    }
    Value::String(cell.to_string())
}

/// Select the rows whose ancient name, or failing that modern name,
/// lowercased, is a known lemma.
///
/// The result maps the matched name (as written in the CSV) to its row.
/// A later row matching the same name replaces the earlier row but keeps
/// its position.
pub fn find_matches(
    rows: Vec<Row>,
    lemmas: &HashSet<String>,
    columns: &MatchColumns,
) -> Map<String, Value> {
    let mut matches = Map::new();
    for row in rows {
        trace!(ancient = ?row.get(&columns.ancient), "checking row");
        let key = match_key(&row, lemmas, &columns.ancient)
            .or_else(|| match_key(&row, lemmas, &columns.modern));
        if let Some(key) = key {
            debug!(name = %key, "matched lemma");
            matches.insert(key, Value::Object(row));
        }
    }
    matches
}

fn match_key(row: &Row, lemmas: &HashSet<String>, column: &str) -> Option<String> {
    let name = row.get(column)?.as_str()?;
    lemmas.contains(&name.to_lowercase()).then(|| name.to_string())
}
