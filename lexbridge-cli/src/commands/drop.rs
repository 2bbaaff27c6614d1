use crate::error::{CliError, CliResult};
use crate::output;
use lexbridge_sparql::SparqlClient;

/// Dropping a graph cannot be undone, so it needs `--force`.
pub fn require_force(graph: &str, force: bool) -> CliResult<()> {
    if force {
        Ok(())
    } else {
        Err(CliError::Usage(format!(
            "use --force to confirm dropping graph <{graph}>; this cannot be undone"
        )))
    }
}

pub async fn run(client: &SparqlClient, graph: &str, force: bool) -> CliResult<()> {
    require_force(graph, force)?;

    let result = client.drop_graph(graph).await?;
    output::print_rendered(output::format_update_result(&result));
    Ok(())
}
