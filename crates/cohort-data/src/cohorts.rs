//! Cohort assignment and transaction enrichment.
//!
//! A customer's cohort is the calendar month of their earliest purchase.
//! Every transaction is joined against its customer's assignment and
//! annotated with cohort month, purchase month, month offset and repeat
//! status.

use std::collections::HashMap;

use chrono::NaiveDate;
use cohort_core::error::{CohortError, Result};
use cohort_core::models::{CohortAssignment, EnrichedTransaction, Transaction};
use cohort_core::month::Month;
use tracing::debug;

/// Compute one [`CohortAssignment`] per distinct customer: the minimum
/// purchase date across that customer's transactions. Ties on the minimum
/// date are irrelevant since only the date matters.
///
/// Returned assignments are sorted by customer id.
pub fn assign_cohorts(transactions: &[Transaction]) -> Vec<CohortAssignment> {
    let mut first_purchase: HashMap<&str, NaiveDate> = HashMap::new();
    for tx in transactions {
        first_purchase
            .entry(tx.customer_id.as_str())
            .and_modify(|date| {
                if tx.purchase_date < *date {
                    *date = tx.purchase_date;
                }
            })
            .or_insert(tx.purchase_date);
    }

    let mut assignments: Vec<CohortAssignment> = first_purchase
        .into_iter()
        .map(|(customer_id, first_purchase_date)| CohortAssignment {
            customer_id: customer_id.to_string(),
            first_purchase_date,
        })
        .collect();
    assignments.sort_by(|a, b| a.customer_id.cmp(&b.customer_id));

    debug!("Assigned {} customers to cohorts", assignments.len());
    assignments
}

/// Left-join every transaction against its customer's assignment and derive
/// the month-level fields.
///
/// Fails with [`CohortError::UnresolvedCohort`] when a transaction's
/// customer has no assignment. Given assignments derive from the same
/// transaction set this is unreachable, and raising it signals a defect.
pub fn enrich_transactions(
    transactions: &[Transaction],
    assignments: &[CohortAssignment],
) -> Result<Vec<EnrichedTransaction>> {
    let by_customer: HashMap<&str, NaiveDate> = assignments
        .iter()
        .map(|a| (a.customer_id.as_str(), a.first_purchase_date))
        .collect();

    transactions
        .iter()
        .map(|tx| {
            let first_purchase_date = by_customer
                .get(tx.customer_id.as_str())
                .copied()
                .ok_or_else(|| {
                    CohortError::UnresolvedCohort(format!(
                        "customer {} has no cohort assignment",
                        tx.customer_id
                    ))
                })?;

            let cohort_month = Month::from_date(first_purchase_date);
            let purchase_month = Month::from_date(tx.purchase_date);

            Ok(EnrichedTransaction {
                customer_id: tx.customer_id.clone(),
                purchase_date: tx.purchase_date,
                sale_amount: tx.sale_amount,
                first_purchase_date,
                cohort_month,
                purchase_month,
                months_since_cohort: purchase_month.months_since(cohort_month) as u32,
                is_repeat: tx.purchase_date > first_purchase_date,
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
