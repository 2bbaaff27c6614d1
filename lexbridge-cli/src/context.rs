use crate::config::ConnectionConfig;
use crate::error::CliResult;
use lexbridge_sparql::SparqlClient;
use tracing::debug;

/// Build a SPARQL client from the resolved connection settings.
///
/// Unset values fall back to the client defaults (POST, 0.1 s delay, public
/// query service), so a missing endpoint still requires a user agent.
pub fn build_client(config: &ConnectionConfig) -> CliResult<SparqlClient> {
    let mut builder = SparqlClient::builder();
    if let Some(endpoint) = config.resolve_endpoint() {
        builder = builder.endpoint(endpoint);
    }
    if let Some(ua) = &config.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    if let Some(method) = config.method {
        builder = builder.method(method);
    }
    if let Some(secs) = config.sleep {
        builder = builder.inter_request_delay_secs(secs);
    }

    let client = builder.build()?;
    debug!(
        endpoint = client.endpoint(),
        method = %client.method(),
        "SPARQL client ready"
    );
    Ok(client)
}
