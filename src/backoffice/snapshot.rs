//! In-memory debt snapshot, grouped by seller
//!
//! The snapshot is the only data source the search core ever sees. It is
//! replaced wholesale on refresh and never mutated in place.

use serde::{Deserialize, Serialize};

/// Placeholder used when the upstream has no name for a customer.
/// Records carrying it are invisible to search.
pub const UNKNOWN_CUSTOMER: &str = "Unknown customer";

/// Placeholder for display fields the upstream left blank
pub const NOT_AVAILABLE: &str = "N/A";

/// One outstanding debt transaction, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub seller_name: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub remaining_amount: f64,
    pub original_amount: f64,
    pub paid_amount: f64,
    /// Repayment date, `YYYY-MM-DD` display form
    pub payment_due_date: String,
    /// Deadline descriptor ("N days left" / "Today" / "N days overdue")
    pub deadline: String,
    pub check_number: String,
    pub status: String,
    pub created_date: String,
}

/// All debts of one seller, in upstream order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerDebts {
    pub seller_name: String,
    pub debts: Vec<DebtRecord>,
}

/// Point-in-time set of outstanding debts, grouped by seller.
///
/// Seller groups keep first-seen order and each group keeps upstream record
/// order; together they define the snapshot's natural iteration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtSnapshot {
    sellers: Vec<SellerDebts>,
}

impl DebtSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record under its seller, creating the group on first sight
    pub fn push_record(&mut self, record: DebtRecord) {
        match self
            .sellers
            .iter_mut()
            .find(|group| group.seller_name == record.seller_name)
        {
            Some(group) => group.debts.push(record),
            None => self.sellers.push(SellerDebts {
                seller_name: record.seller_name.clone(),
                debts: vec![record],
            }),
        }
    }

    #[allow(dead_code)]
    pub fn sellers(&self) -> &[SellerDebts] {
        &self.sellers
    }

    pub fn seller_count(&self) -> usize {
        self.sellers.len()
    }

    /// Every record in natural order: sellers first-seen, records per seller
    /// in upstream order
    pub fn iter_records(&self) -> impl Iterator<Item = &DebtRecord> {
        self.sellers.iter().flat_map(|group| group.debts.iter())
    }

    pub fn record_count(&self) -> usize {
        self.sellers.iter().map(|group| group.debts.len()).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_record(seller: &str, customer: &str, phone: &str) -> DebtRecord {
    DebtRecord {
        seller_name: seller.to_string(),
        customer_name: customer.to_string(),
        customer_phone: phone.to_string(),
        remaining_amount: 100_000.0,
        original_amount: 150_000.0,
        paid_amount: 50_000.0,
        payment_due_date: "2025-09-01".to_string(),
        deadline: "5 days left".to_string(),
        check_number: "CHK-1".to_string(),
        status: "Unpaid".to_string(),
        created_date: "2025-08-01".to_string(),
    }
}
