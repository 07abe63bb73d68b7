//! Markdown rendering for tool output
//!
//! The presentation counterpart to the core's presentation-agnostic
//! structures. Everything here is plain string building.

use unicode_segmentation::UnicodeSegmentation;

use crate::search::format::{chunk_entries, CustomerDetail, DebtDetailEntry, PageSummary};
use crate::search::CustomerCandidate;

use super::{MAX_MESSAGE_LEN, NAV_PAGE_SIZE};

/// Candidate names longer than this are truncated in listings
const MAX_LABEL_GRAPHEMES: usize = 18;

/// Integer display with thousands separators ("1,234,567")
pub fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Listing label: truncated name plus remaining amount
pub fn candidate_label(candidate: &CustomerCandidate) -> String {
    let graphemes: Vec<&str> = candidate.customer_name.graphemes(true).collect();
    let name = if graphemes.len() > MAX_LABEL_GRAPHEMES {
        format!("{}...", graphemes[..MAX_LABEL_GRAPHEMES - 3].concat())
    } else {
        candidate.customer_name.clone()
    };
    format!("{} ({})", name, format_amount(candidate.remaining_amount))
}

/// One page of search results as a markdown message.
///
/// Item numbers are absolute over the full ranked list, so a selection made
/// from any page resolves to the same candidate.
pub fn render_search_page(
    summary: &PageSummary,
    items: &[CustomerCandidate],
    has_more: bool,
) -> String {
    let mut message = if summary.query.is_empty() {
        "**Search results**\n".to_string()
    } else {
        format!("**Results for '{}'**\n", summary.query)
    };
    message.push_str(&format!(
        "Page {}/{} ({} total)\n\n",
        summary.current_page + 1,
        summary.total_pages,
        summary.total_results
    ));

    let start_index = summary.current_page * NAV_PAGE_SIZE;
    for (i, candidate) in items.iter().enumerate() {
        message.push_str(&format!(
            "{}. **{}** — due {} ({}), seller {}\n",
            start_index + i,
            candidate_label(candidate),
            candidate.payment_date,
            candidate.deadline,
            candidate.seller_name,
        ));
    }

    message.push_str("\nPick a customer with `select --index <number>`.");
    if has_more {
        message.push_str("\nMore results: `page --direction next`.");
    }
    if summary.current_page > 0 {
        message.push_str("\nBack: `page --direction prev`.");
    }
    message
}

fn render_entry(position: usize, entry: &DebtDetailEntry) -> String {
    format!(
        "\n{}. **Check {}** ({})\n\
         \x20  Original: {}\n\
         \x20  Paid: {}\n\
         \x20  Remaining: {}\n\
         \x20  Due: {} ({})\n\
         \x20  Seller: {}\n\
         \x20  Status: {}\n",
        position,
        entry.check_number,
        entry.created_date,
        format_amount(entry.original_amount),
        format_amount(entry.paid_amount),
        format_amount(entry.remaining_amount),
        entry.payment_due_date,
        entry.deadline,
        entry.seller_name,
        entry.status,
    )
}

/// A resolved customer's debt history as a header message plus entry
/// messages, each kept under the outbound message size limit
pub fn render_customer_detail(detail: &CustomerDetail) -> Vec<String> {
    if detail.entries.is_empty() {
        return vec![format!(
            "No outstanding debts found for {}.",
            detail.customer_name
        )];
    }

    let header = format!(
        "**{}**\n\n\
         Phone: {}\n\
         Total debt: {}\n\
         Paid: {}\n\
         Remaining: {}\n\
         Open debts: {}\n\n\
         **Details:**",
        detail.customer_name.to_uppercase(),
        detail.customer_phone,
        format_amount(detail.total_original),
        format_amount(detail.total_paid),
        format_amount(detail.total_remaining),
        detail.record_count,
    );

    let rendered: Vec<String> = detail
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| render_entry(i + 1, entry))
        .collect();

    let mut messages = vec![header];
    for group in chunk_entries(&rendered, MAX_MESSAGE_LEN) {
        messages.push(group.concat());
    }
    messages
}
