//! Teller CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use teller::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { force } => teller::cli::commands::init::execute(force, cli.json).await,
        Commands::Reload => teller::cli::commands::reload::execute(cli.json).await,
        Commands::Ask { question, limit } => {
            teller::cli::commands::ask::execute(question, limit, cli.json).await
        }
        Commands::Status => teller::cli::commands::status::execute(cli.json).await,
    };

    if let Err(err) = result {
        teller::cli::handle_error(err, cli.json);
    }
}
