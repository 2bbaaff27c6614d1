use crate::error::{CliError, CliResult};
use crate::lexicon::{self, LEMMA_VAR};
use crate::matching::{self, MatchColumns};
use crate::output;
use lexbridge_sparql::{QueryForm, QueryResult, SparqlClient};
use std::path::Path;
use tracing::info;

/// Inputs for the CSV ↔ lexeme cross-reference.
pub struct MatchOpts<'a> {
    pub csv: &'a Path,
    pub output: &'a Path,
    pub columns: MatchColumns,
    pub category: &'a str,
    pub wiki_url: &'a str,
}

/// Fetch the lemmas of every lexeme in the category, keep the CSV rows whose
/// names match one, and write them to the output file.
pub async fn run(client: &SparqlClient, opts: &MatchOpts<'_>) -> CliResult<()> {
    // Read the export first so a bad path fails before any network I/O
    let rows = matching::read_rows_from_path(opts.csv)?;

    let query = lexicon::proper_noun_query(opts.wiki_url, opts.category);
    let bindings = match client.query(&query, QueryForm::Select).await? {
        QueryResult::Bindings(rows) => rows,
        QueryResult::NoValue => {
            return Err(CliError::Input(format!(
                "lemma query against {} returned an undecodable response",
                client.endpoint()
            )))
        }
        other => {
            return Err(CliError::Input(format!(
                "lemma query returned an unexpected result: {other:?}"
            )))
        }
    };

    let lemmas = lexicon::lemma_set(&bindings, LEMMA_VAR);
    info!(lemmas = lemmas.len(), rows = rows.len(), "cross-referencing");

    let matches = matching::find_matches(rows, &lemmas, &opts.columns);
    output::write_json_file(opts.output, &matches)?;

    println!(
        "{} matching entries written to {}",
        matches.len(),
        opts.output.display()
    );
    Ok(())
}
