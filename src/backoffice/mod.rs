//! Debt Data Provider: merchant back-office client and snapshot types

pub mod client;
pub mod process;
pub mod records;
pub mod snapshot;

pub use client::Client;
pub use snapshot::{DebtRecord, DebtSnapshot, SellerDebts, NOT_AVAILABLE, UNKNOWN_CUSTOMER};
