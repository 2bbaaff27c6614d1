use clap::{Parser, Subcommand};
use lexbridge_sparql::{HttpMethod, QueryForm};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lexbridge",
    about = "Cross-reference CSV name exports with wikibase lexemes over SPARQL",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to the JSON connection file (default: ./login_info.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SPARQL endpoint URL (overrides the connection file)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// User-Agent header; required for the Wikidata Query Service
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// HTTP method for queries: get or post
    #[arg(long, global = true)]
    pub method: Option<HttpMethod>,

    /// Seconds to wait after each response
    #[arg(long, global = true)]
    pub sleep: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match CSV rows against proper-noun lemmas and write them to JSON
    Match {
        /// CSV export to cross-reference
        #[arg(long)]
        csv: PathBuf,

        /// Where to write the matching entries
        #[arg(long, short = 'o', default_value = "matching_entries.json")]
        output: PathBuf,

        /// Column holding the ancient name
        #[arg(long, default_value = crate::matching::ANCIENT_NAME_COLUMN)]
        ancient_column: String,

        /// Column holding the transcribed/modern name
        #[arg(long, default_value = crate::matching::MODERN_NAME_COLUMN)]
        modern_column: String,

        /// Lexical category item of the lexemes to match
        #[arg(long, default_value = crate::lexicon::PROPER_NOUN_CATEGORY)]
        category: String,

        /// Wikibase root URL (overrides `wiki_url` in the connection file)
        #[arg(long)]
        wiki_url: Option<String>,
    },

    /// Run a SPARQL query
    Query {
        /// Inline query text
        query: Option<String>,

        /// Inline query text (takes precedence over the positional argument)
        #[arg(short = 'e', long = "expr")]
        expr: Option<String>,

        /// Read the query from a file
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,

        /// Query form: select, ask, construct or describe
        #[arg(long, default_value_t = QueryForm::Select)]
        form: QueryForm,

        /// Response media type (Accept header)
        #[arg(long)]
        media_type: Option<String>,

        /// Default graph URI (repeatable)
        #[arg(long = "default-graph")]
        default_graph: Vec<String>,

        /// Named graph URI (repeatable)
        #[arg(long = "named-graph")]
        named_graph: Vec<String>,

        /// Output format for select results: json or table
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Run a SPARQL update
    Update {
        /// Inline update text
        update: Option<String>,

        /// Inline update text (takes precedence over the positional argument)
        #[arg(short = 'e', long = "expr")]
        expr: Option<String>,

        /// Read the update from a file
        #[arg(short = 'f', long = "file")]
        file: Option<PathBuf>,

        /// Response media type (Accept header)
        #[arg(long)]
        media_type: Option<String>,

        /// USING graph URI (repeatable)
        #[arg(long = "using-graph")]
        using_graph: Vec<String>,

        /// USING NAMED graph URI (repeatable)
        #[arg(long = "using-named-graph")]
        using_named_graph: Vec<String>,
    },

    /// Load an RDF document into a graph
    Load {
        /// Document URL, or object key when --bucket is given
        file_location: String,

        /// Target graph URI
        graph: String,

        /// S3 bucket holding the document
        #[arg(long)]
        bucket: Option<String>,
    },

    /// Drop (delete) a graph
    Drop {
        /// Graph URI to drop
        graph: String,

        /// Required flag to confirm deletion
        #[arg(long)]
        force: bool,
    },
}
