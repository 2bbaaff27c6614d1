use crate::error::{CliError, CliResult};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use lexbridge_sparql::{Binding, QueryResult, UpdateResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Printed in place of a result the endpoint sent but we could not decode.
pub const NO_VALUE_MESSAGE: &str = "no value (response could not be decoded)";

/// Output format for select results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatKind {
    Json,
    Table,
}

/// Render a query result for the terminal. `None` means the sentinel.
pub fn format_query_result(result: &QueryResult, format: OutputFormatKind) -> Option<String> {
    match result {
        QueryResult::Bindings(rows) => Some(match format {
            OutputFormatKind::Json => pretty_json(rows),
            OutputFormatKind::Table => format_bindings_table(rows),
        }),
        QueryResult::Boolean(b) => Some(b.to_string()),
        QueryResult::Raw(text) => Some(text.clone()),
        QueryResult::NoValue => None,
    }
}

/// Render an update result for the terminal. `None` means the sentinel.
pub fn format_update_result(result: &UpdateResult) -> Option<String> {
    match result {
        UpdateResult::Json(value) => Some(pretty_json(value)),
        UpdateResult::Raw(text) => Some(text.clone()),
        UpdateResult::NoValue => None,
    }
}

/// Print a rendered result to stdout, or a warning to stderr for the sentinel.
pub fn print_rendered(rendered: Option<String>) {
    match rendered {
        Some(text) => println!("{text}"),
        None => eprintln!("{} {NO_VALUE_MESSAGE}", "warning:".yellow().bold()),
    }
}

fn pretty_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn format_bindings_table(rows: &[Binding]) -> String {
    if rows.is_empty() {
        return "(empty result set)".to_string();
    }

    // Union of variables across rows; unbound cells stay blank
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for var in row.variables() {
            if !columns.contains(&var) {
                columns.push(var);
            }
        }
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(&columns);

    for row in rows {
        let cells: Vec<&str> = columns
            .iter()
            .map(|var| row.value(var).unwrap_or(""))
            .collect();
        table.add_row(cells);
    }

    table.to_string()
}

/// Write `value` as JSON indented by four spaces.
pub fn write_json_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> CliResult<()> {
    let file = File::create(path)
        .map_err(|e| CliError::Input(format!("failed to create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    let mut ser =
        serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows() -> Vec<Binding> {
        serde_json::from_value(json!([
            {"lex": {"type": "uri", "value": "L1"}, "lemma": {"type": "literal", "value": "athenai"}},
            {"lemma": {"type": "literal", "value": "sparte"}}
        ]))
        .unwrap()
    }

    #[test]
    fn test_table_output() {
        let out = format_query_result(&QueryResult::Bindings(rows()), OutputFormatKind::Table)
            .unwrap();
        assert!(out.contains("lex"));
        assert!(out.contains("lemma"));
        assert!(out.contains("athenai"));
        assert!(out.contains("sparte"));
    }

    #[test]
    fn test_empty_table() {
        let out =
            format_query_result(&QueryResult::Bindings(vec![]), OutputFormatKind::Table).unwrap();
        assert_eq!(out, "(empty result set)");
    }

    #[test]
    fn test_json_output_keeps_term_objects() {
        let out =
            format_query_result(&QueryResult::Bindings(rows()), OutputFormatKind::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[1]["lemma"]["value"], "sparte");
    }

    #[test]
    fn test_scalar_and_sentinel_outputs() {
        assert_eq!(
            format_query_result(&QueryResult::Boolean(true), OutputFormatKind::Table).as_deref(),
            Some("true")
        );
        assert_eq!(
            format_query_result(&QueryResult::Raw("@prefix".into()), OutputFormatKind::Json)
                .as_deref(),
            Some("@prefix")
        );
        assert!(format_query_result(&QueryResult::NoValue, OutputFormatKind::Json).is_none());
        assert!(format_update_result(&UpdateResult::NoValue).is_none());
    }

    #[test]
    fn test_write_json_file_four_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_json_file(&path, &json!({"Athenai": {"id": 1}})).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "{\n    \"Athenai\": {\n        \"id\": 1\n    }\n}");
    }
}
