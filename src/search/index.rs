//! Fuzzy customer search over the debt snapshot
//!
//! Scans every record, deduplicates customers by (normalized name, phone)
//! identity, and ranks the survivors by similarity to the query.

use std::collections::HashSet;

use crate::backoffice::{DebtSnapshot, UNKNOWN_CUSTOMER};

use super::normalize::normalize_name;
use super::similarity::similarity_ratio;

/// Default inclusion threshold for fuzzy matches
pub const MIN_SIMILARITY: f64 = 0.4;

/// Queries shorter than this (after normalization) return nothing
const MIN_QUERY_CHARS: usize = 2;

/// A deduplicated, scored customer surfaced by one search.
///
/// Display fields are representative: they come from the first record seen
/// for this identity during the scan.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerCandidate {
    pub customer_name: String,
    pub customer_phone: String,
    pub seller_name: String,
    pub similarity: f64,
    pub remaining_amount: f64,
    pub payment_date: String,
    pub deadline: String,
    /// Representative fields carried for presentation layers that want
    /// them; the detail view re-queries the snapshot instead
    #[allow(dead_code)]
    pub check_number: String,
    #[allow(dead_code)]
    pub status: String,
}

/// Rank customers in `snapshot` against a free-text name query.
///
/// A candidate is admitted when its similarity clears `min_similarity` or
/// its normalized name starts with the normalized query. Admitted-by-prefix
/// candidates still sort by their raw similarity, so an exact prefix match
/// can land below a lookalike name; that ranking is intentional and pinned
/// by tests.
pub fn search(query: &str, snapshot: &DebtSnapshot, min_similarity: f64) -> Vec<CustomerCandidate> {
    let query_norm = normalize_name(query);
    if query_norm.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }

    let mut results: Vec<CustomerCandidate> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for record in snapshot.iter_records() {
        let customer_name = record.customer_name.trim();
        if customer_name.is_empty() || customer_name == UNKNOWN_CUSTOMER {
            continue;
        }

        let name_norm = normalize_name(customer_name);
        let identity = (name_norm.clone(), record.customer_phone.clone());
        if seen.contains(&identity) {
            continue;
        }

        let similarity = similarity_ratio(&query_norm, &name_norm);
        let partial_match = name_norm.starts_with(&query_norm);

        if similarity >= min_similarity || partial_match {
            results.push(CustomerCandidate {
                customer_name: customer_name.to_string(),
                customer_phone: record.customer_phone.clone(),
                seller_name: record.seller_name.clone(),
                similarity,
                remaining_amount: record.remaining_amount,
                payment_date: record.payment_due_date.clone(),
                deadline: record.deadline.clone(),
                check_number: record.check_number.clone(),
                status: record.status.clone(),
            });
            seen.insert(identity);
        }
    }

    // Stable sort: ties keep encounter order.
    results.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoffice::snapshot::test_record;

    fn snapshot(records: Vec<crate::backoffice::DebtRecord>) -> DebtSnapshot {
        let mut snapshot = DebtSnapshot::new();
        for record in records {
            snapshot.push_record(record);
        }
        snapshot
    }

    #[test]
    fn test_short_query_returns_nothing() {
        let snap = snapshot(vec![test_record("Aziza", "Olim Toshev", "111")]);
        assert!(search("o", &snap, MIN_SIMILARITY).is_empty());
        assert!(search("  O ", &snap, MIN_SIMILARITY).is_empty());
        assert!(search("", &snap, MIN_SIMILARITY).is_empty());
    }

    #[test]
    fn test_two_char_query_searches() {
        let snap = snapshot(vec![test_record("Aziza", "Olim Toshev", "111")]);
        assert_eq!(search("ol", &snap, MIN_SIMILARITY).len(), 1);
    }

    #[test]
    fn test_unknown_and_empty_customers_skipped() {
        let snap = snapshot(vec![
            test_record("Aziza", UNKNOWN_CUSTOMER, "111"),
            test_record("Aziza", "   ", "222"),
            test_record("Aziza", "Olim Toshev", "333"),
        ]);
        let results = search("olim", &snap, MIN_SIMILARITY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].customer_name, "Olim Toshev");
    }

    #[test]
    fn test_same_identity_deduplicated_first_wins() {
        // One customer, three records across two sellers.
        let mut first = test_record("Aziza", "Olim Toshev", "111");
        first.check_number = "CHK-FIRST".to_string();
        let snap = snapshot(vec![
            first,
            test_record("Aziza", "Olim Toshev", "111"),
            test_record("Bekzod", "Olim Toshev", "111"),
        ]);
        let results = search("olim", &snap, MIN_SIMILARITY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].check_number, "CHK-FIRST");
        assert_eq!(results[0].seller_name, "Aziza");
    }

    #[test]
    fn test_case_variant_names_share_identity() {
        let snap = snapshot(vec![
            test_record("Aziza", "Olim Toshev", "111"),
            test_record("Bekzod", "OLIM TOSHEV", "111"),
        ]);
        assert_eq!(search("olim", &snap, MIN_SIMILARITY).len(), 1);
    }

    #[test]
    fn test_same_name_different_phone_are_distinct() {
        let snap = snapshot(vec![
            test_record("Aziza", "Sardor Aliyev", "9901"),
            test_record("Bekzod", "Sardor Aliev", "9902"),
        ]);
        let results = search("Sardor", &snap, MIN_SIMILARITY);
        assert_eq!(results.len(), 2);
        let phones: Vec<&str> = results.iter().map(|c| c.customer_phone.as_str()).collect();
        assert!(phones.contains(&"9901"));
        assert!(phones.contains(&"9902"));
    }

    #[test]
    fn test_results_sorted_descending() {
        let snap = snapshot(vec![
            test_record("Aziza", "Nilufar Karimova", "1"),
            test_record("Aziza", "Sardor Aliyev", "2"),
            test_record("Aziza", "Sardor Aliev", "3"),
            test_record("Aziza", "Sanjar Oripov", "4"),
        ]);
        let results = search("sardor", &snap, MIN_SIMILARITY);
        for pair in results.windows(2) {
            assert!(pair[0].similarity >= pair[1].similarity);
        }
    }

    #[test]
    fn test_prefix_admits_below_threshold() {
        // Long name: raw similarity to a 2-char query is far below 0.4,
        // but the prefix rule admits it anyway.
        let snap = snapshot(vec![test_record("Aziza", "Abdurakhmon Abdullayev", "1")]);
        let results = search("ab", &snap, MIN_SIMILARITY);
        assert_eq!(results.len(), 1);
        assert!(results[0].similarity < MIN_SIMILARITY);
    }

    #[test]
    fn test_prefix_match_can_rank_below_lookalike() {
        // "abdurakhmon abdullayev" is a true prefix match for "ab" but its
        // raw similarity is tiny; "arb" scores higher. The prefix match
        // sorts by its raw score and loses.
        let snap = snapshot(vec![
            test_record("Aziza", "Abdurakhmon Abdullayev", "1"),
            test_record("Aziza", "Arb", "2"),
        ]);
        let results = search("ab", &snap, MIN_SIMILARITY);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].customer_name, "Arb");
        assert_eq!(results[1].customer_name, "Abdurakhmon Abdullayev");
    }

    #[test]
    fn test_no_shared_identity_in_output() {
        let snap = snapshot(vec![
            test_record("Aziza", "Sardor Aliyev", "9901"),
            test_record("Bekzod", "Sardor Aliyev", "9901"),
            test_record("Bekzod", "Sardor Aliev", "9902"),
        ]);
        let results = search("sardor", &snap, MIN_SIMILARITY);
        let mut identities: Vec<(String, String)> = results
            .iter()
            .map(|c| (normalize_name(&c.customer_name), c.customer_phone.clone()))
            .collect();
        identities.sort();
        identities.dedup();
        assert_eq!(identities.len(), results.len());
    }

    #[test]
    fn test_search_does_not_mutate_snapshot() {
        let snap = snapshot(vec![test_record("Aziza", "Olim Toshev", "111")]);
        let before = snap.clone();
        let _ = search("olim", &snap, MIN_SIMILARITY);
        assert_eq!(snap, before);
    }
}
