//! SPARQL 1.1 protocol client
//!
//! A small HTTP client for issuing SPARQL queries, updates, bulk loads, and
//! graph drops against one triplestore endpoint.
//!
//! # Architecture
//!
//! - [`client`]: [`SparqlClient`] and its builder; the four operations
//! - [`request`]: method, query form, graph scope, media types, payload fields
//! - [`response`]: result shapes and how response bodies are decoded into them
//! - [`statement`]: `LOAD` / `DROP GRAPH` update text
//! - [`error`]: error types
//!
//! # Example
//!
//! ```no_run
//! use lexbridge_sparql::{QueryForm, QueryResult, SparqlClient};
//!
//! # async fn run() -> lexbridge_sparql::Result<()> {
//! let client = SparqlClient::new("https://wiki.example.org/query/sparql")?;
//! if let QueryResult::Bindings(rows) = client
//!     .query("SELECT ?lemma WHERE { ?l wikibase:lemma ?lemma }", QueryForm::Select)
//!     .await?
//! {
//!     for row in &rows {
//!         println!("{}", row.value("lemma").unwrap_or_default());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod response;
pub mod statement;

pub use client::{
    SparqlClient, SparqlClientBuilder, DEFAULT_INTER_REQUEST_DELAY_SECS, WIKIDATA_QUERY_SERVICE,
};
pub use error::{Result, SparqlError};
pub use request::{
    GraphScope, HttpMethod, QueryForm, RequestOptions, APPLICATION_JSON, FORM_URLENCODED,
    SPARQL_RESULTS_JSON, TEXT_TURTLE,
};
pub use response::{Binding, QueryResult, UpdateResult};
pub use statement::{drop_statement, load_source, load_statement};
