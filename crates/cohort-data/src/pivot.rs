//! Matrix reshaping.
//!
//! Pivots aggregate rows into cohort-month × month-offset grids. The nested
//! `BTreeMap` keeps both axes sorted; rendering fills unobserved cells with
//! zero so every cohort spans the full offset range.

use std::collections::BTreeMap;

use cohort_core::models::CohortMonthlyAggregate;
use cohort_core::month::Month;

// ── MetricMatrix ──────────────────────────────────────────────────────────────

/// A cohort-month × months-since-cohort grid of one metric.
#[derive(Debug, Clone)]
pub struct MetricMatrix {
    /// Outer key: cohort month. Inner key: month offset.
    cells: BTreeMap<Month, BTreeMap<u32, f64>>,
    /// Highest offset observed anywhere in the matrix.
    max_offset: u32,
}

impl MetricMatrix {
    /// Pivot `rows` using `value` to select the metric for each cell.
    pub fn from_rows(
        rows: &[CohortMonthlyAggregate],
        value: impl Fn(&CohortMonthlyAggregate) -> f64,
    ) -> Self {
        let mut cells: BTreeMap<Month, BTreeMap<u32, f64>> = BTreeMap::new();
        let mut max_offset = 0;

        for row in rows {
            max_offset = max_offset.max(row.months_since_cohort);
            cells
                .entry(row.cohort_month)
                .or_default()
                .insert(row.months_since_cohort, value(row));
        }

        Self { cells, max_offset }
    }

    /// The contiguous offset columns `0..=max_offset`.
    pub fn offsets(&self) -> impl Iterator<Item = u32> {
        0..=self.max_offset
    }

    /// Iterate rows in ascending cohort order, each rendered dense: one
    /// value per offset column, zero where unobserved.
    pub fn rows(&self) -> impl Iterator<Item = (Month, Vec<f64>)> + '_ {
        self.cells.iter().map(move |(cohort, by_offset)| {
            let values = (0..=self.max_offset)
                .map(|offset| by_offset.get(&offset).copied().unwrap_or(0.0))
                .collect();
            (*cohort, values)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// ── Cohort sizes ──────────────────────────────────────────────────────────────

/// Flatten aggregate rows into one (cohort month, size) entry per cohort.
///
/// `cohort_size` is constant within a cohort, so repeated inserts are
/// idempotent and the result is unique per cohort month, ascending.
pub fn cohort_sizes(rows: &[CohortMonthlyAggregate]) -> BTreeMap<Month, u64> {
    rows.iter()
        .map(|row| (row.cohort_month, row.cohort_size))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn make_row(
        cohort: Month,
        offset: u32,
        total: f64,
        size: u64,
    ) -> CohortMonthlyAggregate {
        CohortMonthlyAggregate {
            cohort_month: cohort,
            purchase_month: Month {
                year: cohort.year + ((cohort.month - 1 + offset) / 12) as i32,
                month: (cohort.month - 1 + offset) % 12 + 1,
            },
            months_since_cohort: offset,
            total_sales: total,
            cumulative_total_sales: total,
            cohort_size: size,
            avg_cumulative_total_sales: 0.0,
            repeat_purchasers: 0,
            repeat_purchase_rate: 0.0,
        }
    }

    const JAN: Month = Month { year: 2024, month: 1 };
    const FEB: Month = Month { year: 2024, month: 2 };

    // ── MetricMatrix ──────────────────────────────────────────────────────────

    #[test]
    fn test_matrix_fills_unobserved_cells_with_zero() {
        // Jan cohort observed at offsets 0 and 2; offset 1 is a gap.
        let rows = vec![
            make_row(JAN, 0, 25.0, 2),
            make_row(JAN, 2, 30.0, 2),
        ];
        let matrix = MetricMatrix::from_rows(&rows, |r| r.total_sales);

        let rendered: Vec<(Month, Vec<f64>)> = matrix.rows().collect();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].1, vec![25.0, 0.0, 30.0]);
    }

    #[test]
    fn test_matrix_columns_span_all_cohorts() {
        // Feb cohort only reaches offset 0, but the Jan cohort's offset 1
        // widens the grid for every row.
        let rows = vec![
            make_row(JAN, 0, 25.0, 2),
            make_row(JAN, 1, 20.0, 2),
            make_row(FEB, 0, 5.0, 1),
        ];
        let matrix = MetricMatrix::from_rows(&rows, |r| r.total_sales);

        let offsets: Vec<u32> = matrix.offsets().collect();
        assert_eq!(offsets, vec![0, 1]);

        let rendered: Vec<(Month, Vec<f64>)> = matrix.rows().collect();
        assert_eq!(rendered[0].1, vec![25.0, 20.0]);
        assert_eq!(rendered[1].1, vec![5.0, 0.0]);
    }

    #[test]
    fn test_matrix_rows_ascend_by_cohort() {
        let rows = vec![
            make_row(FEB, 0, 5.0, 1),
            make_row(JAN, 0, 25.0, 2),
        ];
        let matrix = MetricMatrix::from_rows(&rows, |r| r.total_sales);

        let cohorts: Vec<String> = matrix.rows().map(|(c, _)| c.to_string()).collect();
        assert_eq!(cohorts, vec!["2024-01", "2024-02"]);
    }

    #[test]
    fn test_matrix_value_selector() {
        let mut row = make_row(JAN, 0, 25.0, 2);
        row.avg_cumulative_total_sales = 12.5;
        let matrix = MetricMatrix::from_rows(&[row], |r| r.avg_cumulative_total_sales);

        let rendered: Vec<(Month, Vec<f64>)> = matrix.rows().collect();
        assert_eq!(rendered[0].1, vec![12.5]);
    }

    #[test]
    fn test_matrix_empty() {
        let matrix = MetricMatrix::from_rows(&[], |r| r.total_sales);
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
    }

    // ── cohort_sizes ──────────────────────────────────────────────────────────

    #[test]
    fn test_cohort_sizes_unique_per_cohort() {
        let rows = vec![
            make_row(JAN, 0, 25.0, 2),
            make_row(JAN, 1, 20.0, 2),
            make_row(FEB, 0, 5.0, 1),
        ];
        let sizes = cohort_sizes(&rows);

        assert_eq!(sizes.len(), 2);
        assert_eq!(sizes[&JAN], 2);
        assert_eq!(sizes[&FEB], 1);
    }
}
