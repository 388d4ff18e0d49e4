mod config;
mod history_cmds;
mod outline_cmd;
mod serve_cmd;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use deckgen_core::content::ContentService;
use deckgen_core::image::{ImageProvider, PollinationsProvider};
use deckgen_core::outline::ContentDepth;
use deckgen_core::provider::{ProviderKind, ProviderRegistry};
use deckgen_db::pool;
use deckgen_db::queries::presentations::DEFAULT_LIST_LIMIT;

use config::{CliOverrides, DeckgenConfig};

#[derive(Parser)]
#[command(name = "deckgen", about = "Turn a topic into a slide deck with an LLM")]
struct Cli {
    /// Database URL (overrides DECKGEN_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Text provider: gemini, ollama or huggingface (overrides DECKGEN_PROVIDER)
    #[arg(long, global = true)]
    provider: Option<ProviderKind>,

    /// Model name (overrides DECKGEN_MODEL)
    #[arg(long, global = true)]
    model: Option<String>,

    /// Provider API key (overrides DECKGEN_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Provider base URL (overrides DECKGEN_PROVIDER_URL)
    #[arg(long, global = true)]
    provider_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            database_url: self.database_url.clone(),
            provider: self.provider,
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            provider_url: self.provider_url.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a deckgen config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = "postgresql://localhost:5432/deckgen")]
        db_url: String,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create and migrate the deckgen database
    DbInit,
    /// Run the HTTP API
    Serve {
        /// Address to bind (defaults to the config file's server.bind)
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (defaults to the config file's server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate an outline on the command line (no database required)
    Outline {
        /// Presentation topic
        topic: String,
        /// Number of content slides
        #[arg(long, default_value_t = 6)]
        slides: usize,
        /// Content depth: basic, detailed or comprehensive
        #[arg(long, default_value = "detailed")]
        depth: ContentDepth,
        /// Extra guidance appended to the prompt
        #[arg(long)]
        notes: Option<String>,
        /// Also render the deck to this .pptx path
        #[arg(long)]
        pptx: Option<PathBuf>,
        /// Colour style for the rendered deck
        #[arg(long, default_value = "Blue-Professional")]
        style: String,
        /// Background colour for the rendered deck
        #[arg(long, default_value = "#FFFFFF")]
        background: String,
        /// Fetch illustrations for the rendered deck
        #[arg(long)]
        images: bool,
    },
    /// Generation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Show download and depth metrics
    Metrics,
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List presentations, newest first
    List {
        /// Maximum number of rows
        #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
        limit: i64,
    },
    /// Delete one presentation
    Delete {
        /// Presentation ID
        id: String,
    },
    /// Delete all presentations and reset the download counter
    Clear,
}

/// Execute the `deckgen init` command: write config file.
fn cmd_init(cli: &Cli, db_url: &str, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let kind = cli.provider.unwrap_or_default();
    let cfg = config::ConfigFile {
        database: config::DatabaseSection {
            url: db_url.to_string(),
        },
        provider: config::ProviderSection {
            kind,
            model: cli.model.clone(),
            api_key: cli.api_key.clone(),
            base_url: cli.provider_url.clone(),
            timeout_secs: None,
        },
        ..Default::default()
    };

    let path = config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  provider.kind = {kind}");
    if kind.requires_api_key() && cfg.provider.api_key.is_none() {
        println!("  provider.api_key is not set; add it or export DECKGEN_API_KEY.");
    }
    println!();
    println!("Next: run `deckgen db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `deckgen db-init` command: create database and run migrations.
async fn cmd_db_init(resolved: &DeckgenConfig) -> anyhow::Result<()> {
    println!("Initializing deckgen database...");

    if pool::ensure_database_exists(&resolved.db_config).await? {
        println!("Created database.");
    }
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("deckgen db-init complete.");
    Ok(())
}

/// Execute the `deckgen serve` command.
async fn cmd_serve(
    resolved: &DeckgenConfig,
    bind: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let registry = ProviderRegistry::with_active(&resolved.provider);
    let provider = registry
        .require(resolved.provider.kind.as_str())
        .context("active provider is not registered")?;
    info!(
        provider = provider.name(),
        model = provider.model(),
        available = ?registry.list(),
        "text provider selected"
    );

    let images = resolved.images.enabled.then(|| {
        Arc::new(PollinationsProvider::new(resolved.images.base_url.clone()))
            as Arc<dyn ImageProvider>
    });

    let state = serve_cmd::AppState {
        pool: db_pool.clone(),
        content: ContentService::new(provider),
        images,
    };

    let bind = bind.unwrap_or_else(|| resolved.server.bind.clone());
    let port = port.unwrap_or(resolved.server.port);
    let result = serve_cmd::run_serve(state, &bind, port).await;
    db_pool.close().await;
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init { db_url, force } = &cli.command {
        return cmd_init(&cli, db_url, *force);
    }

    let resolved = DeckgenConfig::resolve(&cli.overrides())?;

    match cli.command {
        Commands::Init { .. } => {}
        Commands::DbInit => {
            cmd_db_init(&resolved).await?;
        }
        Commands::Serve { bind, port } => {
            cmd_serve(&resolved, bind, port).await?;
        }
        Commands::Outline {
            topic,
            slides,
            depth,
            notes,
            pptx,
            style,
            background,
            images,
        } => {
            let opts = outline_cmd::OutlineOptions {
                topic,
                slides,
                depth,
                notes,
                pptx,
                style,
                background,
                images,
            };
            outline_cmd::run_outline(&resolved, opts).await?;
        }
        Commands::History { command } => {
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = history_cmds::run_history_command(command, &db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Metrics => {
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = history_cmds::run_metrics(&db_pool).await;
            db_pool.close().await;
            result?;
        }
    }

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_provider_flags_parse() {
        let cli = Cli::try_parse_from([
            "deckgen",
            "outline",
            "Solar Power",
            "--provider",
            "hf",
            "--depth",
            "comprehensive",
            "--slides",
            "4",
        ])
        .unwrap();
        assert_eq!(cli.provider, Some(ProviderKind::HuggingFace));
        match cli.command {
            Commands::Outline {
                topic,
                slides,
                depth,
                ..
            } => {
                assert_eq!(topic, "Solar Power");
                assert_eq!(slides, 4);
                assert_eq!(depth, ContentDepth::Comprehensive);
            }
            _ => panic!("expected outline command"),
        }
    }

    #[test]
    fn unknown_depth_is_rejected() {
        let result = Cli::try_parse_from(["deckgen", "outline", "x", "--depth", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn history_list_defaults_limit() {
        let cli = Cli::try_parse_from(["deckgen", "history", "list"]).unwrap();
        match cli.command {
            Commands::History {
                command: HistoryCommands::List { limit },
            } => assert_eq!(limit, DEFAULT_LIST_LIMIT),
            _ => panic!("expected history list"),
        }
    }
}
