//! Request-side vocabulary: HTTP method, query form, graph scope, media
//! types, and the SPARQL 1.1 protocol payload fields built from them.

use crate::error::SparqlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SPARQL results in JSON (select/ask)
pub const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
/// Turtle serialization (construct/describe default)
pub const TEXT_TURTLE: &str = "text/turtle";
/// Plain JSON, the default `Accept` for updates
pub const APPLICATION_JSON: &str = "application/json";
/// Body encoding used for every POST
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

const FIELD_QUERY: &str = "query";
const FIELD_UPDATE: &str = "update";
const FIELD_DEFAULT_GRAPH: &str = "default-graph-uri";
const FIELD_NAMED_GRAPH: &str = "named-graph-uri";
const FIELD_USING_GRAPH: &str = "using-graph-uri";
const FIELD_USING_NAMED_GRAPH: &str = "using-named-graph-uri";

/// HTTP method used for queries. Updates are always POSTed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// Query parameters in the URL. Suitable for read-only endpoints.
    Get,
    /// Form-encoded request body.
    #[default]
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = SparqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(HttpMethod::Get),
            "post" => Ok(HttpMethod::Post),
            other => Err(SparqlError::Configuration(format!(
                "unknown HTTP method '{other}'; expected 'get' or 'post'"
            ))),
        }
    }
}

/// SPARQL query form. Decides the default `Accept` media type and how the
/// response body is shaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryForm {
    #[default]
    Select,
    Ask,
    Construct,
    Describe,
}

impl QueryForm {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryForm::Select => "select",
            QueryForm::Ask => "ask",
            QueryForm::Construct => "construct",
            QueryForm::Describe => "describe",
        }
    }

    /// `true` for forms whose result is an RDF graph (construct, describe).
    pub fn returns_graph(self) -> bool {
        matches!(self, QueryForm::Construct | QueryForm::Describe)
    }

    /// Media type requested when the caller gives no override.
    pub fn default_media_type(self) -> &'static str {
        if self.returns_graph() {
            TEXT_TURTLE
        } else {
            SPARQL_RESULTS_JSON
        }
    }
}

impl fmt::Display for QueryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryForm {
    type Err = SparqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "select" => Ok(QueryForm::Select),
            "ask" => Ok(QueryForm::Ask),
            "construct" => Ok(QueryForm::Construct),
            "describe" => Ok(QueryForm::Describe),
            other => Err(SparqlError::Configuration(format!(
                "unknown query form '{other}'; expected select, ask, construct or describe"
            ))),
        }
    }
}

/// Dataset description sent alongside a query or update.
///
/// For a query, `default` becomes `default-graph-uri` and `named` becomes
/// `named-graph-uri`; for an update they become `using-graph-uri` and
/// `using-named-graph-uri`. An empty list omits the field entirely, leaving
/// dataset composition to `FROM` / `USING` clauses in the request text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphScope {
    #[serde(default)]
    pub default: Vec<String>,
    #[serde(default)]
    pub named: Vec<String>,
}

impl GraphScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a graph to the default-graph list.
    pub fn with_default(mut self, uri: impl Into<String>) -> Self {
        self.default.push(uri.into());
        self
    }

    /// Add a graph to the named-graph list.
    pub fn with_named(mut self, uri: impl Into<String>) -> Self {
        self.named.push(uri.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_empty() && self.named.is_empty()
    }
}

/// Per-call options for [`SparqlClient::query_with`](crate::SparqlClient::query_with)
/// and [`SparqlClient::update_with`](crate::SparqlClient::update_with).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// `Accept` override. `None` uses the form default (queries) or
    /// `application/json` (updates).
    pub media_type: Option<String>,
    pub graphs: GraphScope,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn graphs(mut self, graphs: GraphScope) -> Self {
        self.graphs = graphs;
        self
    }
}

/// Form fields for a query operation, in wire order.
pub(crate) fn query_payload(query: &str, graphs: &GraphScope) -> Vec<(&'static str, String)> {
    scoped_payload(
        (FIELD_QUERY, query),
        graphs,
        FIELD_DEFAULT_GRAPH,
        FIELD_NAMED_GRAPH,
    )
}

/// Form fields for an update operation, in wire order.
pub(crate) fn update_payload(update: &str, graphs: &GraphScope) -> Vec<(&'static str, String)> {
    scoped_payload(
        (FIELD_UPDATE, update),
        graphs,
        FIELD_USING_GRAPH,
        FIELD_USING_NAMED_GRAPH,
    )
}

fn scoped_payload(
    (field, text): (&'static str, &str),
    graphs: &GraphScope,
    default_field: &'static str,
    named_field: &'static str,
) -> Vec<(&'static str, String)> {
    let mut payload = Vec::with_capacity(1 + graphs.default.len() + graphs.named.len());
    payload.push((field, text.to_string()));
    payload.extend(graphs.default.iter().map(|g| (default_field, g.clone())));
    payload.extend(graphs.named.iter().map(|g| (named_field, g.clone())));
    payload
}
