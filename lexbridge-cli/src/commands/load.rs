use crate::error::CliResult;
use crate::output;
use lexbridge_sparql::SparqlClient;

pub async fn run(
    client: &SparqlClient,
    file_location: &str,
    graph: &str,
    bucket: Option<&str>,
) -> CliResult<()> {
    let result = client.load(file_location, graph, bucket).await?;
    output::print_rendered(output::format_update_result(&result));
    Ok(())
}
