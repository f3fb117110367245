//! Binary logistic regression trainer - entry point

use clap::Parser;
use logreg::cli::{cmd_info, cmd_train, Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logreg=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => cmd_train(&args)?,
        Commands::Info { data } => cmd_info(&data)?,
    }

    Ok(())
}
