//! Selection resolution: absolute index -> candidate -> full debt history

use crate::backoffice::{DebtRecord, DebtSnapshot};
use crate::error::AppError;

use super::index::CustomerCandidate;
use super::session::{SessionStore, UserId};

/// Resolve an absolute index into the user's full ranked result list.
///
/// The index spans the whole list, not the current page, so a selection
/// made from any page lands on the same candidate. The caller clears the
/// session after a successful selection.
pub fn resolve(
    store: &dyn SessionStore,
    user_id: UserId,
    selection_index: usize,
) -> Result<CustomerCandidate, AppError> {
    let session = store
        .get(user_id)
        .ok_or_else(|| AppError::NoActiveSession(format!("user {}", user_id)))?;

    session
        .results
        .get(selection_index)
        .cloned()
        .ok_or_else(|| {
            AppError::InvalidSelection(format!(
                "index {} of {} results",
                selection_index,
                session.results.len()
            ))
        })
}

/// Every record in the snapshot with exactly this (name, phone) pair, in
/// snapshot order. Exact equality on purpose: this is the precise re-query
/// behind a resolved selection, not another fuzzy pass.
pub fn fetch_all_debts(
    customer_name: &str,
    customer_phone: &str,
    snapshot: &DebtSnapshot,
) -> Vec<DebtRecord> {
    snapshot
        .iter_records()
        .filter(|record| {
            record.customer_name == customer_name && record.customer_phone == customer_phone
        })
        .cloned()
        .collect()
}
