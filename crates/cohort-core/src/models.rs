use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::month::Month;

/// A single normalized transaction row read from the input table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Customer identifier (first input column).
    pub customer_id: String,
    /// Calendar date of the purchase (second input column).
    pub purchase_date: NaiveDate,
    /// Third input column, carried through unchanged. Ignored by every
    /// downstream stage; kept so future consumers get it without a schema
    /// change.
    #[serde(default)]
    pub reference: String,
    /// Sale amount (fourth input column). Negative values pass through as
    /// refunds.
    pub sale_amount: f64,
}

/// A customer's cohort anchor: the earliest purchase date across all of
/// that customer's transactions. Unique per customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortAssignment {
    pub customer_id: String,
    pub first_purchase_date: NaiveDate,
}

/// A transaction joined with its customer's cohort assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichedTransaction {
    pub customer_id: String,
    pub purchase_date: NaiveDate,
    pub sale_amount: f64,
    /// The customer's earliest purchase date.
    pub first_purchase_date: NaiveDate,
    /// Month of the customer's first purchase.
    pub cohort_month: Month,
    /// Month of this transaction.
    pub purchase_month: Month,
    /// Whole months between `cohort_month` and `purchase_month`. Always
    /// `>= 0` since the cohort month is the minimum.
    pub months_since_cohort: u32,
    /// Whether this purchase is strictly later than the customer's first.
    /// Per-transaction: a first purchase is never repeat, even when other
    /// purchases land in the same calendar month.
    pub is_repeat: bool,
}

/// One aggregate row per observed (cohort month, purchase month) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortMonthlyAggregate {
    pub cohort_month: Month,
    pub purchase_month: Month,
    /// Whole months between the cohort month and the purchase month.
    pub months_since_cohort: u32,
    /// Sum of sale amounts in this (cohort, purchase month) partition.
    pub total_sales: f64,
    /// Running sum of `total_sales` over ascending purchase months within
    /// the cohort. Non-decreasing as long as amounts are non-negative.
    pub cumulative_total_sales: f64,
    /// Distinct customers whose first purchase falls in `cohort_month`.
    /// Constant across all rows of the same cohort.
    pub cohort_size: u64,
    /// `cumulative_total_sales / cohort_size`. Filled by the metric
    /// deriver; zero until then.
    pub avg_cumulative_total_sales: f64,
    /// Distinct customers with at least one repeat purchase in this
    /// partition.
    pub repeat_purchasers: u64,
    /// `repeat_purchasers / cohort_size`, in `[0, 1]`. Filled by the
    /// metric deriver; zero until then.
    pub repeat_purchase_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_reference_defaults_on_deserialize() {
        let tx: Transaction = serde_json::from_str(
            r#"{"customer_id":"a","purchase_date":"2024-01-15","sale_amount":10.0}"#,
        )
        .unwrap();
        assert_eq!(tx.reference, "");
        assert_eq!(tx.customer_id, "a");
    }
}
