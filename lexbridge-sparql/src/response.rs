//! Result shapes and the rules that turn a response body into one.
//!
//! Shaping never fails. A body that should have been JSON but is not (or is
//! JSON of the wrong shape) becomes the `NoValue` sentinel; callers tell an
//! empty result apart from an undecodable one by checking for it.

use crate::request::{QueryForm, APPLICATION_JSON, SPARQL_RESULTS_JSON};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// One row of a select result: variable name → RDF term object
/// (`{"type": ..., "value": ..., "xml:lang"?: ..., "datatype"?: ...}`).
///
/// The term objects are kept exactly as the endpoint sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding(Map<String, Value>);

impl Binding {
    /// The full term object bound to `var`.
    pub fn term(&self, var: &str) -> Option<&Value> {
        self.0.get(var)
    }

    /// The lexical `value` of the term bound to `var`.
    pub fn value(&self, var: &str) -> Option<&str> {
        self.0.get(var)?.get("value")?.as_str()
    }

    /// Bound variable names, in response order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Binding {
    fn from(map: Map<String, Value>) -> Self {
        Binding(map)
    }
}

/// Outcome of [`SparqlClient::query`](crate::SparqlClient::query).
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// Select rows from `results.bindings`, in response order.
    Bindings(Vec<Binding>),
    /// Ask result from `boolean`.
    Boolean(bool),
    /// Response body verbatim: construct/describe, or any non-JSON media type.
    Raw(String),
    /// JSON was requested but the body could not be decoded.
    NoValue,
}

impl QueryResult {
    pub fn is_no_value(&self) -> bool {
        matches!(self, QueryResult::NoValue)
    }

    pub fn as_bindings(&self) -> Option<&[Binding]> {
        match self {
            QueryResult::Bindings(rows) => Some(rows),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            QueryResult::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            QueryResult::Raw(text) => Some(text),
            _ => None,
        }
    }
}

/// Outcome of [`SparqlClient::update`](crate::SparqlClient::update) and the
/// updates built on it.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateResult {
    /// Decoded body, when `application/json` was requested.
    Json(Value),
    /// Response body verbatim for any other media type.
    Raw(String),
    /// JSON was requested but the body could not be decoded.
    NoValue,
}

impl UpdateResult {
    pub fn is_no_value(&self) -> bool {
        matches!(self, UpdateResult::NoValue)
    }
}

#[derive(Deserialize)]
struct SelectEnvelope {
    results: SelectResults,
}

#[derive(Deserialize)]
struct SelectResults {
    bindings: Vec<Binding>,
}

#[derive(Deserialize)]
struct AskEnvelope {
    boolean: bool,
}

/// Shape a query response body.
///
/// Graph forms return the body verbatim whatever was requested; other forms
/// are decoded only when the SPARQL JSON results type was requested.
pub(crate) fn shape_query(form: QueryForm, media_type: &str, body: String) -> QueryResult {
    if form.returns_graph() || media_type != SPARQL_RESULTS_JSON {
        return QueryResult::Raw(body);
    }

    let value: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            debug!(form = %form, error = %e, "query response is not JSON");
            return QueryResult::NoValue;
        }
    };

    match form {
        QueryForm::Ask => match serde_json::from_value::<AskEnvelope>(value) {
            Ok(env) => QueryResult::Boolean(env.boolean),
            Err(e) => {
                warn!(error = %e, "ask response has no boolean result");
                QueryResult::NoValue
            }
        },
        _ => match serde_json::from_value::<SelectEnvelope>(value) {
            Ok(env) => QueryResult::Bindings(env.results.bindings),
            Err(e) => {
                warn!(error = %e, "select response has no results.bindings");
                QueryResult::NoValue
            }
        },
    }
}

/// Shape an update response body.
pub(crate) fn shape_update(media_type: &str, body: String) -> UpdateResult {
    if media_type != APPLICATION_JSON {
        return UpdateResult::Raw(body);
    }
    match serde_json::from_str(&body) {
        Ok(value) => UpdateResult::Json(value),
        Err(e) => {
            debug!(error = %e, "update response is not JSON");
            UpdateResult::NoValue
        }
    }
}
