//! Wire types for the merchant back-office REST API
//!
//! Raw debt entries as returned by the `/debt` listing endpoint. Fields the
//! upstream omits default to empty so one malformed entry never sinks a
//! whole fetch.

use serde::Deserialize;

/// A person reference as the API ships it (customer or seller)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPerson {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl RawPerson {
    /// "First Last" with surrounding whitespace trimmed; empty when both
    /// parts are missing.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// One raw debt entry from the listing endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDebt {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub repayment_date: String,
    #[serde(default)]
    pub contact_phones: Option<Vec<String>>,
    #[serde(default)]
    pub customer: Option<RawPerson>,
    #[serde(default)]
    pub created_by: Option<RawPerson>,
}

/// Envelope for the token endpoint
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub data: LoginData,
}

#[derive(Debug, Deserialize)]
pub struct LoginData {
    pub access_token: String,
}

/// Envelope for one page of the debt listing
#[derive(Debug, Deserialize)]
pub struct DebtPageResponse {
    #[serde(default)]
    pub data: Vec<RawDebt>,
}
