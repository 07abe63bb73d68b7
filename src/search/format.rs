//! Presentation-agnostic result shapes
//!
//! Pure transforms from core output to structures the presentation layer
//! renders. No markdown or UI markup here.

use crate::backoffice::{DebtRecord, NOT_AVAILABLE};

/// Paging metadata for one rendered page of search results
#[derive(Debug, Clone, PartialEq)]
pub struct PageSummary {
    pub query: String,
    pub total_results: usize,
    pub total_pages: usize,
    /// Zero-based
    pub current_page: usize,
}

/// Summarize one page of a result set
pub fn page_summary(
    query: &str,
    total_results: usize,
    current_page: usize,
    page_size: usize,
) -> PageSummary {
    let total_pages = if page_size == 0 {
        0
    } else {
        total_results.div_ceil(page_size)
    };
    PageSummary {
        query: query.to_string(),
        total_results,
        total_pages,
        current_page,
    }
}

/// One debt transaction of a resolved customer, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct DebtDetailEntry {
    pub check_number: String,
    pub created_date: String,
    pub original_amount: f64,
    pub paid_amount: f64,
    pub remaining_amount: f64,
    pub payment_due_date: String,
    pub deadline: String,
    pub seller_name: String,
    pub status: String,
}

/// A resolved customer's complete debt position
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetail {
    pub customer_name: String,
    pub customer_phone: String,
    pub record_count: usize,
    pub total_remaining: f64,
    pub total_original: f64,
    pub total_paid: f64,
    pub entries: Vec<DebtDetailEntry>,
}

/// Fold a customer's debt list into a summary plus per-record entries
pub fn customer_detail(customer_name: &str, debts: &[DebtRecord]) -> CustomerDetail {
    let customer_phone = debts
        .first()
        .map(|d| d.customer_phone.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    CustomerDetail {
        customer_name: customer_name.to_string(),
        customer_phone,
        record_count: debts.len(),
        total_remaining: debts.iter().map(|d| d.remaining_amount).sum(),
        total_original: debts.iter().map(|d| d.original_amount).sum(),
        total_paid: debts.iter().map(|d| d.paid_amount).sum(),
        entries: debts
            .iter()
            .map(|d| DebtDetailEntry {
                check_number: d.check_number.clone(),
                created_date: d.created_date.clone(),
                original_amount: d.original_amount,
                paid_amount: d.paid_amount,
                remaining_amount: d.remaining_amount,
                payment_due_date: d.payment_due_date.clone(),
                deadline: d.deadline.clone(),
                seller_name: d.seller_name.clone(),
                status: d.status.clone(),
            })
            .collect(),
    }
}

/// Group rendered detail entries so no group exceeds `max_len` characters.
///
/// An entry is never split across groups; an entry longer than `max_len`
/// becomes a group of its own.
pub fn chunk_entries(entries: &[String], max_len: usize) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0usize;

    for entry in entries {
        let entry_len = entry.chars().count();
        if !current.is_empty() && current_len + entry_len > max_len {
            groups.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current_len += entry_len;
        current.push(entry.clone());
    }

    if !current.is_empty() {
        groups.push(current);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoffice::snapshot::test_record;

    #[test]
    fn test_page_summary_counts() {
        let summary = page_summary("olim", 12, 1, 5);
        assert_eq!(summary.total_pages, 3);
        assert_eq!(summary.total_results, 12);
        assert_eq!(summary.current_page, 1);

        assert_eq!(page_summary("olim", 10, 0, 5).total_pages, 2);
        assert_eq!(page_summary("olim", 0, 0, 5).total_pages, 0);
    }

    #[test]
    fn test_customer_detail_sums() {
        let mut a = test_record("Aziza", "Olim Toshev", "111");
        a.original_amount = 100.0;
        a.paid_amount = 30.0;
        a.remaining_amount = 70.0;
        let mut b = test_record("Bekzod", "Olim Toshev", "111");
        b.original_amount = 200.0;
        b.paid_amount = 50.0;
        b.remaining_amount = 150.0;

        let detail = customer_detail("Olim Toshev", &[a, b]);
        assert_eq!(detail.record_count, 2);
        assert_eq!(detail.total_original, 300.0);
        assert_eq!(detail.total_paid, 80.0);
        assert_eq!(detail.total_remaining, 220.0);
        assert_eq!(detail.customer_phone, "111");
        assert_eq!(detail.entries.len(), 2);
        assert_eq!(detail.entries[1].seller_name, "Bekzod");
    }

    #[test]
    fn test_customer_detail_empty() {
        let detail = customer_detail("Olim Toshev", &[]);
        assert_eq!(detail.record_count, 0);
        assert_eq!(detail.total_remaining, 0.0);
        assert_eq!(detail.customer_phone, NOT_AVAILABLE);
        assert!(detail.entries.is_empty());
    }

    #[test]
    fn test_chunk_respects_max_len() {
        let entries: Vec<String> = (0..7).map(|i| format!("entry-{}", i)).collect();
        let groups = chunk_entries(&entries, 20);
        assert!(groups.len() > 1);
        for group in &groups {
            let joined: usize = group.iter().map(|e| e.chars().count()).sum();
            assert!(joined <= 20 || group.len() == 1);
        }
        let flattened: Vec<String> = groups.into_iter().flatten().collect();
        assert_eq!(flattened, entries);
    }

    #[test]
    fn test_chunk_never_splits_entry() {
        let oversize = "x".repeat(50);
        let entries = vec!["short".to_string(), oversize.clone(), "tail".to_string()];
        let groups = chunk_entries(&entries, 20);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1], vec![oversize]);
    }

    #[test]
    fn test_chunk_empty_input() {
        assert!(chunk_entries(&[], 100).is_empty());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn chunks_bounded_or_singleton(
            entries in proptest::collection::vec("[a-z]{0,30}", 0..20),
            max_len in 1usize..40
        ) {
            let groups = chunk_entries(&entries, max_len);
            for group in &groups {
                let joined: usize = group.iter().map(|e| e.chars().count()).sum();
                prop_assert!(joined <= max_len || group.len() == 1);
            }
            let flattened: Vec<String> = groups.into_iter().flatten().collect();
            prop_assert_eq!(flattened, entries);
        }
    }
}
