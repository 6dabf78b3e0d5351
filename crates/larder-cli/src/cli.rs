use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "larder",
    about = "Larder: shopping deals, weekly meals and leftover food",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the leftover-food HTTP API
    Serve(ServeArgs),
    /// Manage leftover food through a running server
    Leftovers(LeftoversArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Path prefix the routes are nested under
    #[arg(long)]
    pub base_path: Option<String>,
    /// Persist the table to this JSON file instead of memory
    #[arg(long)]
    pub data_file: Option<PathBuf>,
    /// Require `Authorization: Bearer <key>` on leftover routes
    #[arg(long, env = "LARDER_API_KEY")]
    pub api_key: Option<String>,
}

#[derive(Args)]
pub struct LeftoversArgs {
    /// Base URL of the API, including any path prefix
    #[arg(long, env = "LARDER_URL", default_value = "http://127.0.0.1:8787")]
    pub url: String,
    /// Key sent as the bearer token
    #[arg(long, env = "LARDER_ANON_KEY", default_value = "anon")]
    pub key: String,
    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
    #[command(subcommand)]
    pub action: LeftoverAction,
}

#[derive(Subcommand)]
pub enum LeftoverAction {
    /// List every leftover
    List,
    /// Add a leftover
    Add {
        name: String,
        /// Amount left, 0-60
        #[arg(short, long, allow_negative_numbers = true)]
        level: Option<f64>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Change fields of an existing leftover
    Set {
        id: String,
        #[arg(short, long, allow_negative_numbers = true)]
        level: Option<f64>,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a leftover
    Rm { id: String },
}
