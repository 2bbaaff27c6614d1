use crate::error::{CliError, CliResult};
use crate::input;
use crate::output::{self, OutputFormatKind};
use lexbridge_sparql::{GraphScope, QueryForm, RequestOptions, SparqlClient};
use std::path::Path;

/// Form, media type, dataset, and display format for a query.
pub struct QueryOpts<'a> {
    pub form: QueryForm,
    pub media_type: Option<&'a str>,
    pub default_graphs: &'a [String],
    pub named_graphs: &'a [String],
    pub format: &'a str,
}

pub async fn run(
    client: &SparqlClient,
    positional: Option<&str>,
    expr: Option<&str>,
    file: Option<&Path>,
    opts: &QueryOpts<'_>,
) -> CliResult<()> {
    let output_format = parse_output_format(opts.format)?;

    let source = input::resolve_input(expr, positional, file)?;
    let query = input::read_input(&source)?;

    let mut options = RequestOptions::new().graphs(GraphScope {
        default: opts.default_graphs.to_vec(),
        named: opts.named_graphs.to_vec(),
    });
    if let Some(mt) = opts.media_type {
        options = options.media_type(mt);
    }

    let result = client.query_with(&query, opts.form, &options).await?;
    output::print_rendered(output::format_query_result(&result, output_format));
    Ok(())
}

fn parse_output_format(format: &str) -> CliResult<OutputFormatKind> {
    match format.to_lowercase().as_str() {
        "json" => Ok(OutputFormatKind::Json),
        "table" => Ok(OutputFormatKind::Table),
        other => Err(CliError::Usage(format!(
            "unknown output format '{other}'; valid formats: json, table"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormatKind::Json);
        assert_eq!(parse_output_format("table").unwrap(), OutputFormatKind::Table);
        assert!(matches!(
            parse_output_format("csv"),
            Err(CliError::Usage(_))
        ));
    }
}
