mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "java_build_gen=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            path,
            config,
            no_index_libraries,
            repo,
            format,
        } => {
            cli::generate(&path, config.as_deref(), no_index_libraries, repo, format)?;
        }
        Commands::Facts { file } => {
            cli::facts(&file)?;
        }
    }

    Ok(())
}
