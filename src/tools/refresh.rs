//! Refresh tool implementation
//!
//! Re-fetches the debt listing from the back-office API and swaps the
//! in-memory snapshot wholesale. Open sessions keep their (now stale)
//! ranked lists; selections still re-query the live snapshot exactly.

use serde_json::Value;
use tokio::time::{timeout, Duration};
use tracing::info;

use crate::cli::RefreshArgs;
use crate::error::AppError;
use crate::mcp::{McpResponse, ToolResult};
use crate::state::AppState;

use super::TOOL_TIMEOUT_SECS;

pub async fn handle_refresh(state: &AppState, id: Option<Value>, args: Value) -> McpResponse {
    match timeout(Duration::from_secs(TOOL_TIMEOUT_SECS), handle_refresh_impl(state, args)).await {
        Ok(Ok(content)) => McpResponse::success(id, serde_json::to_value(content).unwrap_or_default()),
        Ok(Err(e)) => McpResponse::error(id, e.error_code(), &e.message()),
        Err(_) => McpResponse::error(id, "timeout", "Refresh request timed out"),
    }
}

async fn handle_refresh_impl(state: &AppState, args: Value) -> Result<ToolResult, AppError> {
    let refresh_args: RefreshArgs = serde_json::from_value(args)
        .map_err(|e| AppError::InvalidInput(format!("Invalid arguments: {}", e)))?;
    execute_refresh(state, refresh_args).await
}

/// Execute snapshot refresh (shared implementation for server and CLI modes)
pub async fn execute_refresh(state: &AppState, _args: RefreshArgs) -> Result<ToolResult, AppError> {
    let client = state.client.as_ref().ok_or_else(|| {
        AppError::InvalidInput(
            "back-office credentials not configured (set BACKOFFICE_BASE_URL and BACKOFFICE_API_TOKEN)"
                .to_string(),
        )
    })?;

    let today = chrono::Local::now().date_naive();
    let snapshot = client.fetch_snapshot(today).await?;
    let sellers = snapshot.seller_count();
    let records = snapshot.record_count();

    *state.snapshot.write().await = snapshot;
    info!("Snapshot refreshed: {} sellers, {} records", sellers, records);

    Ok(ToolResult::text(format!(
        "Snapshot refreshed: {} sellers, {} outstanding debts.",
        sellers, records
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoffice::DebtSnapshot;

    #[tokio::test]
    async fn test_refresh_without_client() {
        let state = AppState::with_snapshot(DebtSnapshot::new());
        let err = execute_refresh(&state, RefreshArgs {}).await.unwrap_err();
        assert_eq!(err.error_code(), "invalid_input");
    }
}
