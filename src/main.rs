use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod infrastructure;
mod services;
mod tools;
mod ui;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with LOGGING env var support
    // LOGGING=debug,info,warn,error or just LOGGING=debug
    let log_level = std::env::var("LOGGING")
        .or_else(|_| std::env::var("LOG_LEVEL"))
        .unwrap_or_else(|_| {
            if cli.verbose {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false) // Disable ANSI escape codes for cleaner output
        .init();

    match cli.command {
        Commands::Release {
            branch,
            build_number,
            repository,
            region,
            webhook_url,
            channel,
            no_notify,
            config,
            version_file,
            dockerfile,
            context,
        } => {
            commands::release::execute(
                branch,
                build_number,
                repository,
                region,
                webhook_url,
                channel,
                no_notify,
                config,
                version_file,
                dockerfile,
                context,
            )
            .await?;
        }
        Commands::Tag {
            branch,
            build_number,
            repository,
            config,
            version_file,
            quiet,
        } => {
            commands::tag::execute(branch, build_number, repository, config, version_file, quiet)
                .await?;
        }
        Commands::Notify {
            text,
            webhook_url,
            channel,
            color,
            config,
        } => {
            commands::notify::execute(text, webhook_url, channel, color, config).await?;
        }
    }

    Ok(())
}
