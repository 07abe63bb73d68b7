//! CLI mode implementation
//!
//! The same argument structs back both the CLI subcommands and the JSON-RPC
//! tool schemas, so the two surfaces can never drift apart.

use clap::{Parser, Subcommand};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debtbot CLI
#[derive(Parser)]
#[command(name = "debtbot")]
#[command(about = "Outstanding-debt lookup with fuzzy customer search", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output (no short flag to avoid conflicts)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Back-office API base URL
    #[arg(long, env = "BACKOFFICE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Back-office API secret token
    #[arg(long, env = "BACKOFFICE_API_TOKEN", hide_env_values = true, global = true)]
    pub api_token: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fuzzy-search customers with outstanding debts
    Search(SearchArgs),
    /// Move an open search one page forward or back
    Page(PageArgs),
    /// Show the full debt history for one search result
    Select(SelectArgs),
    /// Drop an open search session
    Cancel(CancelArgs),
    /// Re-fetch the debt snapshot from the back-office API
    Refresh(RefreshArgs),
}

/// Search tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SearchArgs {
    /// Requesting user id (session key)
    #[arg(short = 'u', long)]
    #[schemars(description = "Requesting user id (session key)")]
    pub user: i64,

    /// Customer name to search for (at least 2 characters)
    #[arg(short = 'q', long)]
    #[schemars(description = "Customer name to search for (at least 2 characters)")]
    pub query: String,
}

/// Page tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct PageArgs {
    /// Requesting user id (session key)
    #[arg(short = 'u', long)]
    #[schemars(description = "Requesting user id (session key)")]
    pub user: i64,

    /// Direction: "next" or "prev"
    #[arg(short = 'd', long)]
    #[schemars(description = "Direction: \"next\" or \"prev\"")]
    pub direction: String,
}

/// Select tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct SelectArgs {
    /// Requesting user id (session key)
    #[arg(short = 'u', long)]
    #[schemars(description = "Requesting user id (session key)")]
    pub user: i64,

    /// Result number from the search listing
    #[arg(short = 'i', long)]
    #[schemars(description = "Result number from the search listing")]
    pub index: String,
}

/// Cancel tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct CancelArgs {
    /// Requesting user id (session key)
    #[arg(short = 'u', long)]
    #[schemars(description = "Requesting user id (session key)")]
    pub user: i64,
}

/// Refresh tool arguments
#[derive(Parser, JsonSchema, Deserialize, Serialize, Clone, Debug)]
pub struct RefreshArgs {}
