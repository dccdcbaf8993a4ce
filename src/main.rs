mod commands;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eventdesk_core::config::{Config, LogLevel};
use eventdesk_core::gateway;
use eventdesk_core::operations::EventOperations;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "eventdesk")]
#[command(version, about = "Browse and edit the events held by an events API")]
struct Cli {
    /// Use the built-in test data instead of the API
    #[arg(long, global = true)]
    test_data: bool,

    /// Base URL of the events API (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    api: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, grouped by day
    List {
        /// Show events from this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD or RFC 3339)
        #[arg(long)]
        to: Option<String>,

        /// Only show events of this importance ("all" for every level)
        #[arg(short, long)]
        importance: Option<String>,

        /// Print the events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a single event
    Show {
        id: String,

        /// Print the event as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an event
    New {
        title: String,

        /// Date/time (e.g. "2025-03-20T15:00" or RFC 3339)
        #[arg(short, long)]
        at: String,

        /// basse, normale, haute or critique
        #[arg(short, long)]
        importance: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change fields of an existing event
    Update {
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// New date/time (e.g. "2025-03-20T15:00" or RFC 3339)
        #[arg(short, long)]
        at: Option<String>,

        #[arg(short, long)]
        importance: Option<String>,

        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete { id: String },
    /// Replace the events with the demo set
    Seed,
    /// Show configuration paths and values
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if cli.test_data {
        config.use_test_data = true;
    }
    if let Some(api) = cli.api {
        config.api_base = api;
    }

    init_tracing(config.log_level);
    debug!(
        api_base = %config.api_base,
        test_data = config.use_test_data,
        "Configuration loaded"
    );

    if let Commands::Config = cli.command {
        return commands::config::run(&config);
    }

    let gateway = gateway::connect(&config)?;
    let ops = EventOperations::new(gateway);

    match cli.command {
        Commands::List {
            from,
            to,
            importance,
            json,
        } => {
            commands::mount(&ops).await;
            commands::list::run(&ops, from, to, importance, json)
        }
        Commands::Show { id, json } => {
            commands::mount(&ops).await;
            commands::show::run(&ops, &id, json).await
        }
        Commands::New {
            title,
            at,
            importance,
            description,
        } => {
            commands::mount(&ops).await;
            commands::new::run(&ops, title, at, importance, description).await
        }
        Commands::Update {
            id,
            title,
            at,
            importance,
            description,
        } => {
            commands::mount(&ops).await;
            commands::update::run(&ops, &id, title, at, importance, description).await
        }
        Commands::Delete { id } => {
            commands::mount(&ops).await;
            commands::delete::run(&ops, &id).await
        }
        Commands::Seed => commands::seed::run(&ops).await,
        Commands::Config => Ok(()),
    }
}

/// Log to stderr. `RUST_LOG` wins over the configured level.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{},hyper=warn,hyper_util=warn,h2=warn,reqwest=warn,rustls=warn",
            level.as_str()
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
