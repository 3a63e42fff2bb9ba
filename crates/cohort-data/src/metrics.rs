//! Per-capita metric derivation.
//!
//! Fills the two derived fields on each aggregate row: average cumulative
//! spend per customer and repeat purchase rate.

use cohort_core::error::{CohortError, Result};
use cohort_core::models::CohortMonthlyAggregate;

/// Stateless helper that derives the per-capita metrics.
pub struct MetricDeriver;

impl MetricDeriver {
    /// Compute `avg_cumulative_total_sales` and `repeat_purchase_rate` for
    /// every row.
    ///
    /// A row with `cohort_size == 0` cannot exist for a cohort that has
    /// transactions; observing one is an internal invariant violation and
    /// fails with [`CohortError::UnresolvedCohort`] rather than dividing by
    /// zero.
    pub fn derive(mut rows: Vec<CohortMonthlyAggregate>) -> Result<Vec<CohortMonthlyAggregate>> {
        for row in &mut rows {
            if row.cohort_size == 0 {
                return Err(CohortError::UnresolvedCohort(format!(
                    "cohort {} has rows but zero members",
                    row.cohort_month
                )));
            }
            let size = row.cohort_size as f64;
            row.avg_cumulative_total_sales = row.cumulative_total_sales / size;
            row.repeat_purchase_rate = row.repeat_purchasers as f64 / size;
        }
        Ok(rows)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_core::month::Month;

    fn make_row(
        cohort: Month,
        offset: u32,
        cumulative: f64,
        size: u64,
        repeat: u64,
    ) -> CohortMonthlyAggregate {
        CohortMonthlyAggregate {
            cohort_month: cohort,
            purchase_month: Month {
                year: cohort.year,
                month: cohort.month + offset,
            },
            months_since_cohort: offset,
            total_sales: 0.0,
            cumulative_total_sales: cumulative,
            cohort_size: size,
            avg_cumulative_total_sales: 0.0,
            repeat_purchasers: repeat,
            repeat_purchase_rate: 0.0,
        }
    }

    const JAN: Month = Month { year: 2024, month: 1 };

    #[test]
    fn test_derive_average_cumulative() {
        let rows = MetricDeriver::derive(vec![make_row(JAN, 1, 45.0, 2, 1)]).unwrap();
        assert!((rows[0].avg_cumulative_total_sales - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_derive_repeat_rate() {
        let rows = MetricDeriver::derive(vec![make_row(JAN, 1, 45.0, 2, 1)]).unwrap();
        assert!((rows[0].repeat_purchase_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_derive_rate_bounds() {
        let rows = MetricDeriver::derive(vec![
            make_row(JAN, 0, 25.0, 2, 0),
            make_row(JAN, 1, 45.0, 2, 2),
        ])
        .unwrap();

        for row in &rows {
            assert!(row.repeat_purchase_rate >= 0.0);
            assert!(row.repeat_purchase_rate <= 1.0);
        }
    }

    #[test]
    fn test_derive_zero_size_is_invariant_violation() {
        let err = MetricDeriver::derive(vec![make_row(JAN, 0, 25.0, 0, 0)]).unwrap_err();
        assert!(matches!(err, CohortError::UnresolvedCohort(_)), "{err}");
    }

    #[test]
    fn test_derive_empty() {
        assert!(MetricDeriver::derive(Vec::new()).unwrap().is_empty());
    }
}
