use crate::error::CliResult;
use crate::input;
use crate::output;
use lexbridge_sparql::{GraphScope, RequestOptions, SparqlClient};
use std::path::Path;

/// Graph scope and media type for an update.
pub struct UpdateOpts<'a> {
    pub media_type: Option<&'a str>,
    pub using_graphs: &'a [String],
    pub using_named_graphs: &'a [String],
}

pub async fn run(
    client: &SparqlClient,
    positional: Option<&str>,
    expr: Option<&str>,
    file: Option<&Path>,
    opts: &UpdateOpts<'_>,
) -> CliResult<()> {
    let source = input::resolve_input(expr, positional, file)?;
    let update = input::read_input(&source)?;

    let mut options = RequestOptions::new().graphs(GraphScope {
        default: opts.using_graphs.to_vec(),
        named: opts.using_named_graphs.to_vec(),
    });
    if let Some(mt) = opts.media_type {
        options = options.media_type(mt);
    }

    let result = client.update_with(&update, &options).await?;
    output::print_rendered(output::format_update_result(&result));
    Ok(())
}
