//! lexbridge CLI library.
//!
//! Command handlers and helpers behind the `lexbridge` binary: cross-
//! referencing a CSV name export against wikibase lexemes, plus direct
//! query/update/load/drop access to the SPARQL endpoint.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod lexicon;
pub mod matching;
pub mod output;

use cli::{Cli, Commands};
use config::ConnectionOverrides;
use error::{CliError, CliResult};

/// Dispatch a parsed [`Cli`] to the appropriate command handler.
///
/// The binary calls this after parsing args and initializing tracing.
pub async fn run(cli: Cli) -> CliResult<()> {
    // Refuse an unconfirmed drop before touching config or network
    if let Commands::Drop { graph, force } = &cli.command {
        commands::drop::require_force(graph, *force)?;
    }

    let overrides = ConnectionOverrides {
        endpoint: cli.endpoint,
        user_agent: cli.user_agent,
        method: cli.method,
        sleep: cli.sleep,
    };
    let mut connection = config::load_config(cli.config.as_deref())?.with_overrides(overrides);

    // `match --wiki-url` also determines the default endpoint
    if let Commands::Match {
        wiki_url: Some(url),
        ..
    } = &cli.command
    {
        connection.wiki_url = Some(url.clone());
    }

    let client = context::build_client(&connection)?;

    match cli.command {
        Commands::Match {
            csv,
            output,
            ancient_column,
            modern_column,
            category,
            ..
        } => {
            let wiki_url = connection.wiki_url().ok_or_else(|| {
                CliError::Usage(
                    "no wikibase URL; set `wiki_url` in the connection file or pass --wiki-url"
                        .to_string(),
                )
            })?;
            let opts = commands::match_cmd::MatchOpts {
                csv: &csv,
                output: &output,
                columns: matching::MatchColumns {
                    ancient: ancient_column,
                    modern: modern_column,
                },
                category: &category,
                wiki_url,
            };
            commands::match_cmd::run(&client, &opts).await
        }

        Commands::Query {
            query,
            expr,
            file,
            form,
            media_type,
            default_graph,
            named_graph,
            format,
        } => {
            let opts = commands::query::QueryOpts {
                form,
                media_type: media_type.as_deref(),
                default_graphs: &default_graph,
                named_graphs: &named_graph,
                format: &format,
            };
            commands::query::run(
                &client,
                query.as_deref(),
                expr.as_deref(),
                file.as_deref(),
                &opts,
            )
            .await
        }

        Commands::Update {
            update,
            expr,
            file,
            media_type,
            using_graph,
            using_named_graph,
        } => {
            let opts = commands::update::UpdateOpts {
                media_type: media_type.as_deref(),
                using_graphs: &using_graph,
                using_named_graphs: &using_named_graph,
            };
            commands::update::run(
                &client,
                update.as_deref(),
                expr.as_deref(),
                file.as_deref(),
                &opts,
            )
            .await
        }

        Commands::Load {
            file_location,
            graph,
            bucket,
        } => commands::load::run(&client, &file_location, &graph, bucket.as_deref()).await,

        Commands::Drop { graph, force } => commands::drop::run(&client, &graph, force).await,
    }
}
