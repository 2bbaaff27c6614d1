//! HTTP client for SPARQL 1.1 protocol endpoints
//!
//! Each operation is one request/response round trip followed by a fixed
//! courtesy delay. Nothing is retried and no state is carried between calls
//! apart from the optional shared `reqwest::Client` connection pool.

use crate::error::{Result, SparqlError};
use crate::request::{
    query_payload, update_payload, HttpMethod, QueryForm, RequestOptions, APPLICATION_JSON,
    FORM_URLENCODED,
};
use crate::response::{shape_query, shape_update, QueryResult, UpdateResult};
use crate::statement::{drop_statement, load_statement};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The Wikidata Query Service. Its usage policy requires a descriptive
/// user agent, so the builder refuses to target it without one.
pub const WIKIDATA_QUERY_SERVICE: &str = "https://query.wikidata.org/sparql";

/// Default pause after every response.
pub const DEFAULT_INTER_REQUEST_DELAY_SECS: f64 = 0.1;

/// SPARQL query/update client bound to a single endpoint.
///
/// Configuration is fixed at construction. Use [`SparqlClient::builder`] to
/// change method, user agent, connection pool, or delay.
#[derive(Debug, Clone)]
pub struct SparqlClient {
    method: HttpMethod,
    endpoint: String,
    user_agent: Option<String>,
    http: Option<Client>,
    delay: Duration,
    headers: HeaderMap,
}

/// Builder for [`SparqlClient`]
#[derive(Debug, Clone)]
pub struct SparqlClientBuilder {
    method: HttpMethod,
    endpoint: String,
    user_agent: Option<String>,
    http: Option<Client>,
    delay_secs: f64,
}

impl Default for SparqlClientBuilder {
    fn default() -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint: WIKIDATA_QUERY_SERVICE.to_string(),
            user_agent: None,
            http: None,
            delay_secs: DEFAULT_INTER_REQUEST_DELAY_SECS,
        }
    }
}

impl SparqlClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Method used for queries. Updates are always POSTed; an update
    /// endpoint generally rejects a client configured for GET.
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sent as `User-Agent`. Use the form `appname/v.v (URL; mailto:...)`.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Share a connection pool across calls (and across clients).
    /// Without one, every call builds a one-off client.
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    pub fn inter_request_delay(mut self, delay: Duration) -> Self {
        self.delay_secs = delay.as_secs_f64();
        self
    }

    pub fn inter_request_delay_secs(mut self, secs: f64) -> Self {
        self.delay_secs = secs;
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// Fails with [`SparqlError::Configuration`] when targeting
    /// [`WIKIDATA_QUERY_SERVICE`] without a user agent, when the user agent
    /// is not a legal header value, or when the delay is negative.
    pub fn build(self) -> Result<SparqlClient> {
        if self.user_agent.is_none() && self.endpoint == WIKIDATA_QUERY_SERVICE {
            return Err(SparqlError::Configuration(
                "a user agent is required when using the Wikidata Query Service \
                 (see https://meta.wikimedia.org/wiki/User-Agent_policy)"
                    .to_string(),
            ));
        }

        let delay = Duration::try_from_secs_f64(self.delay_secs).map_err(|_| {
            SparqlError::Configuration(format!(
                "inter-request delay must be a non-negative number of seconds, got {}",
                self.delay_secs
            ))
        })?;

        let headers = base_headers(self.method, self.user_agent.as_deref())?;

        Ok(SparqlClient {
            method: self.method,
            endpoint: self.endpoint,
            user_agent: self.user_agent,
            http: self.http,
            delay,
            headers,
        })
    }
}

/// Headers shared by every request: `User-Agent` when given, and the form
/// `Content-Type` when the client POSTs.
fn base_headers(method: HttpMethod, user_agent: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    if let Some(ua) = user_agent {
        let value = HeaderValue::from_str(ua).map_err(|_| {
            SparqlError::Configuration(format!("user agent is not a valid header value: {ua:?}"))
        })?;
        headers.insert(USER_AGENT, value);
    }
    if method == HttpMethod::Post {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_URLENCODED));
    }
    Ok(headers)
}

impl SparqlClient {
    pub fn builder() -> SparqlClientBuilder {
        SparqlClientBuilder::new()
    }

    /// POST client for `endpoint` with default settings and no user agent.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::builder().endpoint(endpoint).build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    pub fn inter_request_delay(&self) -> Duration {
        self.delay
    }

    // =========================================================================
    // Query
    // =========================================================================

    /// Run a query with the form's default media type and no graph scope.
    pub async fn query(&self, query: &str, form: QueryForm) -> Result<QueryResult> {
        self.query_with(query, form, &RequestOptions::default())
            .await
    }

    /// Run a query.
    ///
    /// The query and any `default-graph-uri` / `named-graph-uri` fields are
    /// sent as a form body (POST) or URL parameters (GET). `Accept` is the
    /// override from `options`, else `text/turtle` for construct/describe and
    /// `application/sparql-results+json` otherwise.
    pub async fn query_with(
        &self,
        query: &str,
        form: QueryForm,
        options: &RequestOptions,
    ) -> Result<QueryResult> {
        let media_type = options
            .media_type
            .as_deref()
            .unwrap_or_else(|| form.default_media_type());
        let headers = self.request_headers(media_type)?;
        let payload = query_payload(query, &options.graphs);
        let http = self.http()?;

        let request = match self.method {
            HttpMethod::Post => http.post(&self.endpoint).headers(headers).form(&payload),
            HttpMethod::Get => http.get(&self.endpoint).headers(headers).query(&payload),
        };

        debug!(
            endpoint = %self.endpoint,
            method = %self.method,
            form = %form,
            media_type,
            "querying SPARQL endpoint"
        );
        let body = self.execute(request).await?;
        Ok(shape_query(form, media_type, body))
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Run an update, accepting `application/json`, with no graph scope.
    pub async fn update(&self, update: &str) -> Result<UpdateResult> {
        self.update_with(update, &RequestOptions::default()).await
    }

    /// Run an update. Always a POST with the `update` field plus any
    /// `using-graph-uri` / `using-named-graph-uri` fields.
    pub async fn update_with(
        &self,
        update: &str,
        options: &RequestOptions,
    ) -> Result<UpdateResult> {
        let media_type = options.media_type.as_deref().unwrap_or(APPLICATION_JSON);
        let headers = self.request_headers(media_type)?;
        let payload = update_payload(update, &options.graphs);
        let http = self.http()?;

        if self.method == HttpMethod::Get {
            warn!(
                endpoint = %self.endpoint,
                "sending update from a client configured for GET; the endpoint may be read-only"
            );
        }

        let request = http.post(&self.endpoint).headers(headers).form(&payload);

        debug!(endpoint = %self.endpoint, media_type, "beginning update");
        let body = self.execute(request).await?;
        Ok(shape_update(media_type, body))
    }

    /// Load an RDF document into `graph_uri` with `LOAD ... INTO GRAPH`.
    ///
    /// With `bucket`, `file_location` is an object key in that S3 bucket;
    /// otherwise it is used as the source URL as given.
    pub async fn load(
        &self,
        file_location: &str,
        graph_uri: &str,
        bucket: Option<&str>,
    ) -> Result<UpdateResult> {
        info!(file_location, graph_uri, bucket, "loading file into graph");
        self.update(&load_statement(file_location, graph_uri, bucket))
            .await
    }

    /// Drop `graph_uri` with `DROP GRAPH`. Irreversible.
    pub async fn drop_graph(&self, graph_uri: &str) -> Result<UpdateResult> {
        info!(graph_uri, "dropping graph");
        self.update(&drop_statement(graph_uri)).await
    }

    // =========================================================================
    // Transport
    // =========================================================================

    fn request_headers(&self, media_type: &str) -> Result<HeaderMap> {
        let accept = HeaderValue::from_str(media_type)
            .map_err(|_| SparqlError::InvalidMediaType(media_type.to_string()))?;
        let mut headers = self.headers.clone();
        headers.insert(ACCEPT, accept);
        Ok(headers)
    }

    fn http(&self) -> Result<Client> {
        match &self.http {
            Some(http) => Ok(http.clone()),
            None => Ok(Client::builder().build()?),
        }
    }

    /// Send, read the body, then pause for the configured delay.
    ///
    /// Non-2xx statuses are logged and the body is shaped like any other;
    /// only transport failures are errors.
    async fn execute(&self, request: RequestBuilder) -> Result<String> {
        let start = Instant::now();
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        let elapsed = start.elapsed();

        if !status.is_success() {
            warn!(
                endpoint = %self.endpoint,
                status = status.as_u16(),
                "SPARQL endpoint returned a non-success status"
            );
        }
        debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = body.len(),
            "response received"
        );

        tokio::time::sleep(self.delay).await;
        Ok(body)
    }
}
