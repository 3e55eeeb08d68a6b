//! CLI definitions for shipit
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shipit",
    version,
    about = "Release pipeline runner for containerized services",
    long_about = "Builds, tags and pushes a container image for the current branch,\nthen reports the outcome to a chat channel.\nReplaces a fragile pipeline script with type-safe, testable code."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full release pipeline: build, login, push, cleanup, notify
    Release {
        /// Branch being built
        #[arg(long, env = "BRANCH_NAME")]
        branch: String,

        /// Numeric build identifier from the pipeline engine
        #[arg(long, env = "BUILD_NUMBER")]
        build_number: u64,

        /// Registry-qualified repository, e.g. registry.example.com/team/app
        /// (overrides shipit.yaml)
        #[arg(long)]
        repository: Option<String>,

        /// Cloud region for registry authentication
        #[arg(long, env = "AWS_REGION")]
        region: Option<String>,

        /// Chat webhook URL
        #[arg(long, env = "WEBHOOK_URL")]
        webhook_url: Option<String>,

        /// Chat channel to notify
        #[arg(long)]
        channel: Option<String>,

        /// Skip all notifications
        #[arg(long)]
        no_notify: bool,

        /// Path to the project configuration file
        #[arg(long, default_value = "shipit.yaml")]
        config: String,

        /// Path to the version file (overrides shipit.yaml)
        #[arg(long)]
        version_file: Option<String>,

        /// Path to the build recipe (overrides shipit.yaml)
        #[arg(long)]
        dockerfile: Option<String>,

        /// Build context directory (overrides shipit.yaml)
        #[arg(long)]
        context: Option<String>,
    },

    /// Derive and print the image reference without running the pipeline
    Tag {
        /// Branch being built
        #[arg(long, env = "BRANCH_NAME")]
        branch: String,

        /// Numeric build identifier from the pipeline engine
        #[arg(long, env = "BUILD_NUMBER")]
        build_number: u64,

        /// Registry-qualified repository (overrides shipit.yaml)
        #[arg(long)]
        repository: Option<String>,

        /// Path to the project configuration file
        #[arg(long, default_value = "shipit.yaml")]
        config: String,

        /// Path to the version file (overrides shipit.yaml)
        #[arg(long)]
        version_file: Option<String>,

        /// Print only the raw reference (for scripting)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Send a standalone chat message (webhook smoke test)
    Notify {
        /// Message text
        text: String,

        /// Chat webhook URL
        #[arg(long, env = "WEBHOOK_URL")]
        webhook_url: Option<String>,

        /// Chat channel to post to
        #[arg(long)]
        channel: Option<String>,

        /// Message color: info, good, warning or danger
        #[arg(long, default_value = "info")]
        color: String,

        /// Path to the project configuration file
        #[arg(long, default_value = "shipit.yaml")]
        config: String,
    },
}
