//! Pagination over a user's ranked result list
//!
//! `get_page` is a pure read; `navigate` is the atomic move: it validates
//! the target page and commits the new page index in one step, so a failed
//! navigation can never leave the session pointing at an empty page.

use crate::error::AppError;

use super::index::CustomerCandidate;
use super::session::{SearchSession, SessionStore, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Next,
    Prev,
}

/// Open a fresh session for `user_id`, replacing any existing one and
/// resetting to page 0
pub fn start_session(store: &dyn SessionStore, user_id: UserId, results: Vec<CustomerCandidate>) {
    store.set(user_id, SearchSession::new(results));
}

/// Drop any session for `user_id`; no-op when none exists
pub fn clear_session(store: &dyn SessionStore, user_id: UserId) {
    store.delete(user_id);
}

/// Slice page `page_index` out of the user's stored result list.
///
/// Returns the page items and whether a further page exists. Out-of-range
/// pages (and absent sessions) yield an empty slice with `has_more = false`;
/// nothing is mutated.
pub fn get_page(
    store: &dyn SessionStore,
    user_id: UserId,
    page_index: usize,
    page_size: usize,
) -> (Vec<CustomerCandidate>, bool) {
    let session = match store.get(user_id) {
        Some(session) => session,
        None => return (Vec::new(), false),
    };
    slice_page(&session.results, page_index, page_size)
}

/// Move the user's session one page forward or back and return the new
/// page.
///
/// Fails with `NoActiveSession` when the user has no open search and with
/// `EmptyPage` when the target page has no items; in both cases the stored
/// page index is left untouched.
pub fn navigate(
    store: &dyn SessionStore,
    user_id: UserId,
    direction: PageDirection,
    page_size: usize,
) -> Result<(Vec<CustomerCandidate>, bool), AppError> {
    let mut session = store
        .get(user_id)
        .ok_or_else(|| AppError::NoActiveSession(format!("user {}", user_id)))?;

    let target = match direction {
        PageDirection::Next => session.current_page.checked_add(1),
        PageDirection::Prev => session.current_page.checked_sub(1),
    }
    .ok_or_else(|| AppError::EmptyPage(format!("page {} is the edge", session.current_page)))?;

    let (items, has_more) = slice_page(&session.results, target, page_size);
    if items.is_empty() {
        return Err(AppError::EmptyPage(format!("page {}", target)));
    }

    session.current_page = target;
    store.set(user_id, session);
    Ok((items, has_more))
}

/// The committed page index for the user, if a session exists
#[allow(dead_code)]
pub fn current_page(store: &dyn SessionStore, user_id: UserId) -> Option<usize> {
    store.get(user_id).map(|session| session.current_page)
}

fn slice_page(
    results: &[CustomerCandidate],
    page_index: usize,
    page_size: usize,
) -> (Vec<CustomerCandidate>, bool) {
    let start = page_index.saturating_mul(page_size);
    if start >= results.len() || page_size == 0 {
        return (Vec::new(), false);
    }
    let end = start.saturating_add(page_size).min(results.len());
    let has_more = start + page_size < results.len();
    (results[start..end].to_vec(), has_more)
}
