//! Hokusai CLI binary.
//!
//! This binary provides command-line access to Hokusai:
//! - Serve the comic HTTP API
//! - Generate a single comic from the terminal

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use cli::{Cli, Commands, run_generate, run_serve};

    // Load .env before configuration so HOKUSAI__* variables apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = hokusai::HokusaiConfig::load(cli.config.as_deref())?;
    hokusai::init_logging(config.logging(), cli.verbose)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let config = config.with_server(host, port);
            config.validate()?;
            run_serve(&config).await?;
        }

        Commands::Generate {
            prompt,
            style,
            quality,
            json,
        } => {
            run_generate(&config, &prompt, &style, &quality, json).await?;
        }
    }

    Ok(())
}
