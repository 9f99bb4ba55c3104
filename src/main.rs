use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freshet::app::AppContext;
use freshet::cli::{commands, Cli, Commands};
use freshet::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::Feed { pages } => {
            commands::show_feed(&ctx, pages).await?;
        }
        Commands::Question { id, pages } => {
            commands::show_question(&ctx, id, pages).await?;
        }
        Commands::Comments { kind, id, pages } => {
            commands::show_comments(&ctx, &kind, id, pages).await?;
        }
    }

    Ok(())
}
