//! Per-cohort monthly aggregation.
//!
//! Partitions enriched transactions by (cohort month, purchase month) and
//! computes monthly totals, running cumulative totals, cohort sizes and
//! distinct repeat-purchaser counts.

use std::collections::{BTreeMap, HashSet};

use cohort_core::models::{CohortMonthlyAggregate, EnrichedTransaction};
use cohort_core::month::Month;
use tracing::debug;

// ── PartitionStats ────────────────────────────────────────────────────────────

/// Totals accumulated for one (cohort month, purchase month) partition.
#[derive(Debug, Default)]
struct PartitionStats<'a> {
    total_sales: f64,
    /// Distinct customers with a repeat purchase in this partition.
    repeat_customers: HashSet<&'a str>,
}

// ── CohortAggregator ──────────────────────────────────────────────────────────

/// Stateless helper that groups enriched transactions into cohort rows.
pub struct CohortAggregator;

impl CohortAggregator {
    /// Aggregate `entries` into one row per observed (cohort month,
    /// purchase month) pair, ordered by cohort month then purchase month.
    ///
    /// Cohort sizes are distinct-customer counts per cohort month, constant
    /// across all rows of a cohort. Cumulative totals are running sums over
    /// ascending purchase months within each cohort; the `BTreeMap` keyed
    /// by `(cohort_month, purchase_month)` makes that ordering structural
    /// rather than a post-hoc sort.
    ///
    /// The derived per-capita fields are left at zero; the metric deriver
    /// fills them.
    pub fn aggregate(entries: &[EnrichedTransaction]) -> Vec<CohortMonthlyAggregate> {
        let mut cohort_members: BTreeMap<Month, HashSet<&str>> = BTreeMap::new();
        let mut partitions: BTreeMap<(Month, Month), PartitionStats> = BTreeMap::new();

        for entry in entries {
            cohort_members
                .entry(entry.cohort_month)
                .or_default()
                .insert(entry.customer_id.as_str());

            let partition = partitions
                .entry((entry.cohort_month, entry.purchase_month))
                .or_default();
            partition.total_sales += entry.sale_amount;
            if entry.is_repeat {
                partition.repeat_customers.insert(entry.customer_id.as_str());
            }
        }

        let mut rows = Vec::with_capacity(partitions.len());
        let mut current_cohort: Option<Month> = None;
        let mut running_total = 0.0;

        for ((cohort_month, purchase_month), stats) in &partitions {
            if current_cohort != Some(*cohort_month) {
                current_cohort = Some(*cohort_month);
                running_total = 0.0;
            }
            running_total += stats.total_sales;

            let cohort_size = cohort_members
                .get(cohort_month)
                .map(|members| members.len() as u64)
                .unwrap_or(0);

            rows.push(CohortMonthlyAggregate {
                cohort_month: *cohort_month,
                purchase_month: *purchase_month,
                months_since_cohort: purchase_month.months_since(*cohort_month) as u32,
                total_sales: stats.total_sales,
                cumulative_total_sales: running_total,
                cohort_size,
                avg_cumulative_total_sales: 0.0,
                repeat_purchasers: stats.repeat_customers.len() as u64,
                repeat_purchase_rate: 0.0,
            });
        }

        debug!(
            "Aggregated {} rows across {} cohorts",
            rows.len(),
            cohort_members.len()
        );

        rows
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
