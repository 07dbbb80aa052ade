//! babysteps library root.
//! Exposes the CLI parser, the high-level run() function, and the core
//! modules (window, age, aggregation, event store, sync).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Login { .. } | Commands::Register { .. } => {
            cli::commands::auth::handle(&cli.command, cfg, cli.test).await
        }
        Commands::Pull => cli::commands::pull::handle(cfg).await,
        Commands::Profile { .. } => cli::commands::profile::handle(&cli.command, cfg).await,
        Commands::Add { .. } | Commands::Edit { .. } => {
            cli::commands::add::handle(&cli.command, cfg).await
        }
        Commands::Del { .. } => cli::commands::del::handle(&cli.command, cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Stats { .. } => cli::commands::stats::handle(&cli.command, cfg),
        Commands::Status => cli::commands::status::handle(cfg),
        Commands::Report { .. } => cli::commands::report::handle(&cli.command, cfg).await,
        Commands::Export { .. } | Commands::Import { .. } => {
            cli::commands::export::handle(&cli.command, cfg)
        }
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Install the stderr diagnostics subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("babysteps={level}")));

    // A second call (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is loaded once; command-line flags win.
    let mut cfg = Config::load()?;
    if let Some(cache) = &cli.cache {
        cfg.cache = cache.clone();
    }
    if let Some(api) = &cli.api {
        cfg.api_base = api.clone();
    }

    init_tracing(if cli.verbose { "debug" } else { &cfg.log_level });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&cli, &cfg))
}
