//! Merchant back-office API client
//!
//! Token login plus the paged debt listing. One attempt per request with a
//! fixed timeout; retry policy is the operator's concern, not ours.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::error::AppError;

use super::process::build_snapshot;
use super::records::{DebtPageResponse, LoginResponse, RawDebt};
use super::snapshot::DebtSnapshot;

/// Upstream page size for the debt listing. Unrelated to the 5-per-page
/// search pagination.
const FETCH_PAGE_LIMIT: usize = 100;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct Client {
    http: reqwest::Client,
    base_url: String,
    secret_token: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>, secret_token: impl Into<String>) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            secret_token: secret_token.into(),
        })
    }

    /// Exchange the secret token for a bearer access token
    pub async fn login(&self) -> Result<String, AppError> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "secret_token": self.secret_token }))
            .send()
            .await?
            .error_for_status()?;

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AppError::FetchFailed(format!("login response malformed: {}", e)))?;

        info!("Back-office access token obtained");
        Ok(login.data.access_token)
    }

    /// Fetch the complete raw debt listing, page by page.
    ///
    /// A page failure after the first ends the walk with what was collected
    /// so far, matching how the upstream behaves on transient listing errors.
    pub async fn fetch_debts(&self, access_token: &str) -> Result<Vec<RawDebt>, AppError> {
        let url = format!("{}/debt", self.base_url);
        let mut all_debts: Vec<RawDebt> = Vec::new();
        let mut page = 1usize;

        loop {
            let result = self
                .http
                .get(&url)
                .query(&[("page", page.to_string()), ("limit", FETCH_PAGE_LIMIT.to_string())])
                .bearer_auth(access_token)
                .send()
                .await
                .and_then(|r| r.error_for_status());

            let response = match result {
                Ok(response) => response,
                Err(e) if page == 1 => return Err(e.into()),
                Err(e) => {
                    warn!("Debt listing page {} failed, keeping partial result: {}", page, e);
                    break;
                }
            };

            let body: DebtPageResponse = response
                .json()
                .await
                .map_err(|e| AppError::FetchFailed(format!("debt page {} malformed: {}", page, e)))?;

            if body.data.is_empty() {
                break;
            }

            info!("Debt page {}: {} entries ({} total)", page, body.data.len(), all_debts.len() + body.data.len());
            all_debts.extend(body.data);
            page += 1;
        }

        info!("Fetched {} raw debt entries", all_debts.len());
        Ok(all_debts)
    }

    /// Login, fetch, and process in one step
    pub async fn fetch_snapshot(&self, today: NaiveDate) -> Result<DebtSnapshot, AppError> {
        let token = self.login().await?;
        let raw = self.fetch_debts(&token).await?;
        Ok(build_snapshot(raw, today))
    }
}
