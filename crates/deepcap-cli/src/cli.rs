use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "deepcap")]
#[command(version, about = "DeepCap - DEEP source capture toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.deepcap/deepcap.db)
    #[arg(long, global = true, env = "DEEPCAP_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Server configuration management
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Capture source metadata from a web page
    Capture(CaptureArgs),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the active configuration and effective endpoints
    Show,

    /// Switch to a built-in environment
    Use {
        #[arg(value_enum)]
        environment: Environment,
    },

    /// Switch to a custom endpoint set
    Custom(CustomArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    Production,
    Staging,
}

#[derive(Args)]
pub struct CustomArgs {
    /// Web server base URL
    #[arg(long)]
    pub web_server: String,

    /// API server base URL
    #[arg(long)]
    pub api_server: String,

    /// Serverless base URL
    #[arg(long)]
    pub serverless: String,

    /// Label for this configuration
    #[arg(long)]
    pub identifier: String,
}

#[derive(Args)]
pub struct CaptureArgs {
    /// Page URL to extract metadata from
    pub url: String,

    /// DEEP access token for the extraction services
    #[arg(long, env = "DEEPCAP_TOKEN")]
    pub token: String,
}
