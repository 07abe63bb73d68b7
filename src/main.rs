//! debtbot: outstanding-debt lookup with fuzzy customer search
//!
//! Dual-mode application:
//! - Server mode (default): JSON-RPC 2.0 tool server over stdio, driven by
//!   a chat front-end
//! - CLI mode: one-shot execution of the same tools
//!
//! Tools: `search`, `page`, `select`, `cancel`, `refresh`.

mod backoffice;
mod cli;
mod error;
mod mcp;
mod search;
mod state;
mod tools;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use error::AppError;
use state::AppState;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Detect mode: CLI if args present, stdio server otherwise
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        run_cli_mode().await
    } else {
        run_server_mode().await
    }
}

/// Run in CLI mode
async fn run_cli_mode() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity flags
    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    let state = Arc::new(AppState::new(build_client(
        cli.base_url.clone(),
        cli.api_token.clone(),
    )?));

    let result = match cli.command {
        Some(Commands::Search(args)) => execute_search_cli(&state, args).await,
        Some(Commands::Page(args)) => {
            run_tool(tools::page::execute_page(&state, args)).await
        }
        Some(Commands::Select(args)) => {
            run_tool(tools::select::execute_select(&state, args)).await
        }
        Some(Commands::Cancel(args)) => {
            run_tool(tools::cancel::execute_cancel(&state, args)).await
        }
        Some(Commands::Refresh(args)) => {
            run_tool(tools::refresh::execute_refresh(&state, args)).await
        }
        None => {
            eprintln!("Error: No command specified. Use --help for usage information.");
            std::process::exit(1);
        }
    };

    match result {
        Ok(tool_result) => {
            let output: Vec<String> = tool_result
                .content
                .into_iter()
                .map(|item| item.text)
                .collect();
            println!("{}", output.join("\n\n"));
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(get_exit_code(&e));
        }
    }
}

/// Execute the search command in CLI mode.
///
/// One-shot runs start from an empty snapshot, so the listing is fetched
/// first; server mode fetches once at startup instead.
async fn execute_search_cli(state: &AppState, args: cli::SearchArgs) -> Result<mcp::ToolResult> {
    run_tool(tools::refresh::execute_refresh(state, cli::RefreshArgs {})).await?;
    run_tool(tools::search::execute_search(state, args)).await
}

/// Run one tool future under the standard timeout
async fn run_tool<F>(tool: F) -> Result<mcp::ToolResult>
where
    F: std::future::Future<Output = Result<mcp::ToolResult, AppError>>,
{
    match timeout(Duration::from_secs(tools::TOOL_TIMEOUT_SECS), tool).await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(e.into()),
        Err(_) => Err(anyhow::anyhow!(
            "Request exceeded {} second timeout",
            tools::TOOL_TIMEOUT_SECS
        )),
    }
}

/// Map AppError to exit code
fn get_exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(AppError::InvalidInput(_)) | Some(AppError::InvalidSelection(_)) => 1,
        Some(AppError::FetchFailed(_)) => 2,
        Some(AppError::NoActiveSession(_)) | Some(AppError::EmptyPage(_)) => 3,
        Some(AppError::Timeout(_)) => 4,
        _ => 5,
    }
}

/// Run in stdio server mode
async fn run_server_mode() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting debtbot tool server");

    let base_url = std::env::var("BACKOFFICE_BASE_URL")
        .context("BACKOFFICE_BASE_URL must be set in server mode")?;
    let api_token = std::env::var("BACKOFFICE_API_TOKEN")
        .context("BACKOFFICE_API_TOKEN must be set in server mode")?;

    let state = Arc::new(AppState::new(build_client(Some(base_url), Some(api_token))?));

    // Load the first snapshot; a failure here is survivable, the operator
    // can call the refresh tool once the upstream recovers.
    match tools::refresh::execute_refresh(&state, cli::RefreshArgs {}).await {
        Ok(result) => {
            if let Some(item) = result.content.first() {
                info!("{}", item.text);
            }
        }
        Err(e) => warn!("Initial snapshot fetch failed, starting empty: {}", e),
    }

    mcp::handle_stdio(state).await?;

    Ok(())
}

/// Build the back-office client when both settings are present
fn build_client(
    base_url: Option<String>,
    api_token: Option<String>,
) -> Result<Option<backoffice::Client>> {
    match (base_url, api_token) {
        (Some(base_url), Some(api_token)) => {
            let client = backoffice::Client::new(base_url, api_token)
                .map_err(|e| anyhow::anyhow!(e.message()))?;
            Ok(Some(client))
        }
        _ => Ok(None),
    }
}
