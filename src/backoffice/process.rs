//! Raw API entries -> debt snapshot
//!
//! Flattens the raw debt listing into display-ready [`DebtRecord`]s grouped
//! by seller. Fully paid debts and debts with no identifiable seller are
//! dropped here, so downstream code only ever sees outstanding, attributable
//! records.

use chrono::{DateTime, NaiveDate};
use tracing::debug;

use super::records::RawDebt;
use super::snapshot::{DebtRecord, DebtSnapshot, NOT_AVAILABLE, UNKNOWN_CUSTOMER};

const STATUS_FULLY_PAID: &str = "fully_paid";

/// Build a snapshot from raw API entries.
///
/// `today` is injected so deadline arithmetic stays deterministic in tests.
pub fn build_snapshot(raw_debts: Vec<RawDebt>, today: NaiveDate) -> DebtSnapshot {
    let mut snapshot = DebtSnapshot::new();

    for debt in raw_debts {
        if debt.status == STATUS_FULLY_PAID {
            continue;
        }

        let seller_name = debt
            .created_by
            .as_ref()
            .map(|p| p.full_name())
            .unwrap_or_default();
        if seller_name.is_empty() {
            continue;
        }

        let customer_name = match debt.customer.as_ref().map(|p| p.full_name()) {
            Some(name) if !name.is_empty() => name,
            _ => UNKNOWN_CUSTOMER.to_string(),
        };

        let remaining = debt.amount - debt.paid_amount;
        let (payment_due_date, deadline) = describe_deadline(&debt.repayment_date, today);

        snapshot.push_record(DebtRecord {
            seller_name,
            customer_name,
            customer_phone: join_phones(debt.contact_phones.as_deref()),
            remaining_amount: remaining,
            original_amount: debt.amount,
            paid_amount: debt.paid_amount,
            payment_due_date,
            deadline,
            check_number: debt
                .order_number
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            status: display_status(&debt.status),
            created_date: format_date(&debt.created_at),
        });
    }

    debug!(
        sellers = snapshot.seller_count(),
        records = snapshot.record_count(),
        "processed raw debt listing"
    );
    snapshot
}

/// Map upstream status codes to display text; unknown codes pass through
pub fn display_status(code: &str) -> String {
    match code {
        "partial_paid" => "Partially paid".to_string(),
        "unpaid" => "Unpaid".to_string(),
        "overdue" => "Overdue".to_string(),
        other => other.to_string(),
    }
}

/// Parse the date portion of an upstream timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD` display form, falling back to the raw string's date part
fn format_date(value: &str) -> String {
    match parse_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.split('T').next().unwrap_or(value).to_string(),
    }
}

/// Display due date plus the deadline descriptor relative to `today`.
///
/// The descriptor is display text only; the search core never inspects it.
fn describe_deadline(repayment_date: &str, today: NaiveDate) -> (String, String) {
    match parse_date(repayment_date) {
        Some(due) => {
            let days = (due - today).num_days();
            let descriptor = if days < 0 {
                format!("{} days overdue", -days)
            } else if days == 0 {
                "Today".to_string()
            } else {
                format!("{} days left", days)
            };
            (due.format("%Y-%m-%d").to_string(), descriptor)
        }
        None => {
            let raw = repayment_date
                .split('T')
                .next()
                .unwrap_or(repayment_date)
                .to_string();
            (raw, NOT_AVAILABLE.to_string())
        }
    }
}

fn join_phones(phones: Option<&[String]>) -> String {
    match phones {
        Some(list) if !list.is_empty() => list.join(", "),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backoffice::records::RawPerson;

    fn raw(status: &str, customer: Option<(&str, &str)>, seller: Option<(&str, &str)>) -> RawDebt {
        RawDebt {
            status: status.to_string(),
            amount: 300_000.0,
            paid_amount: 100_000.0,
            order_number: Some("CHK-7".to_string()),
            created_at: "2025-08-01T09:30:00Z".to_string(),
            repayment_date: "2025-08-20T00:00:00Z".to_string(),
            contact_phones: Some(vec!["+998901112233".to_string()]),
            customer: customer.map(|(f, l)| RawPerson {
                first_name: f.to_string(),
                last_name: l.to_string(),
            }),
            created_by: seller.map(|(f, l)| RawPerson {
                first_name: f.to_string(),
                last_name: l.to_string(),
            }),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    #[test]
    fn test_fully_paid_is_dropped() {
        let snapshot = build_snapshot(
            vec![raw("fully_paid", Some(("A", "B")), Some(("S", "T")))],
            today(),
        );
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_missing_seller_is_dropped() {
        let snapshot = build_snapshot(vec![raw("unpaid", Some(("A", "B")), None)], today());
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_missing_customer_becomes_sentinel() {
        let snapshot = build_snapshot(vec![raw("unpaid", None, Some(("Aziza", "K")))], today());
        let record = snapshot.iter_records().next().unwrap();
        assert_eq!(record.customer_name, UNKNOWN_CUSTOMER);
    }

    #[test]
    fn test_amounts_and_status() {
        let snapshot = build_snapshot(
            vec![raw("partial_paid", Some(("Olim", "Toshev")), Some(("Aziza", "K")))],
            today(),
        );
        let record = snapshot.iter_records().next().unwrap();
        assert_eq!(record.remaining_amount, 200_000.0);
        assert_eq!(record.original_amount, 300_000.0);
        assert_eq!(record.paid_amount, 100_000.0);
        assert_eq!(record.status, "Partially paid");
        assert_eq!(record.customer_phone, "+998901112233");
        assert_eq!(record.check_number, "CHK-7");
        assert_eq!(record.created_date, "2025-08-01");
    }

    #[test]
    fn test_deadline_days_left() {
        let (due, descriptor) = describe_deadline("2025-08-20T00:00:00Z", today());
        assert_eq!(due, "2025-08-20");
        assert_eq!(descriptor, "5 days left");
    }

    #[test]
    fn test_deadline_today() {
        let (_, descriptor) = describe_deadline("2025-08-15", today());
        assert_eq!(descriptor, "Today");
    }

    #[test]
    fn test_deadline_overdue() {
        let (_, descriptor) = describe_deadline("2025-08-10", today());
        assert_eq!(descriptor, "5 days overdue");
    }

    #[test]
    fn test_deadline_unparseable_falls_back() {
        let (due, descriptor) = describe_deadline("soonish", today());
        assert_eq!(due, "soonish");
        assert_eq!(descriptor, NOT_AVAILABLE);
    }

    #[test]
    fn test_unknown_status_passes_through() {
        assert_eq!(display_status("frozen"), "frozen");
    }

    #[test]
    fn test_no_phones_placeholder() {
        let mut debt = raw("unpaid", Some(("A", "B")), Some(("S", "T")));
        debt.contact_phones = None;
        let snapshot = build_snapshot(vec![debt], today());
        let record = snapshot.iter_records().next().unwrap();
        assert_eq!(record.customer_phone, NOT_AVAILABLE);
    }

    #[test]
    fn test_multiple_phones_joined() {
        let mut debt = raw("unpaid", Some(("A", "B")), Some(("S", "T")));
        debt.contact_phones = Some(vec!["111".to_string(), "222".to_string()]);
        let snapshot = build_snapshot(vec![debt], today());
        let record = snapshot.iter_records().next().unwrap();
        assert_eq!(record.customer_phone, "111, 222");
    }
}
