//! Main cohort analysis pipeline.
//!
//! Orchestrates ingestion, cohort assignment, aggregation, metric
//! derivation and matrix reshaping, then writes the four report artifacts
//! into the working directory.

use std::path::Path;

use cohort_core::error::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::CohortAggregator;
use crate::cohorts::{assign_cohorts, enrich_transactions};
use crate::ingest::read_transactions;
use crate::metrics::MetricDeriver;
use crate::pivot::{cohort_sizes, MetricMatrix};
use crate::report;

// ── Public types ──────────────────────────────────────────────────────────────

/// File names of the four artifacts a pipeline run produces, relative to
/// the working directory it ran against.
#[derive(Debug, Clone, Serialize)]
pub struct ReportArtifacts {
    pub ltv_csv: String,
    pub revenue_csv: String,
    pub repeat_rate_csv: String,
    pub cohort_sizes_csv: String,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full cohort analysis pipeline.
///
/// 1. Ingest `input` into normalized transactions.
/// 2. Assign first-purchase cohorts and enrich every transaction.
/// 3. Aggregate per (cohort month, purchase month).
/// 4. Derive per-capita metrics.
/// 5. Pivot into the three matrices plus the cohort-size table and write
///    all four artifacts into `work_dir`.
///
/// Any failure aborts the invocation; artifacts already renamed into place
/// are left behind, each individually complete.
pub fn run_pipeline(input: &Path, work_dir: &Path, delimiter: u8) -> Result<ReportArtifacts> {
    // ── Step 1: Ingest ────────────────────────────────────────────────────────
    let transactions = read_transactions(input, delimiter)?;

    // ── Step 2: Cohorts ───────────────────────────────────────────────────────
    let assignments = assign_cohorts(&transactions);
    let enriched = enrich_transactions(&transactions, &assignments)?;
    debug!(
        "Enriched {} transactions across {} customers",
        enriched.len(),
        assignments.len()
    );

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let aggregates = CohortAggregator::aggregate(&enriched);

    // ── Step 4: Derive metrics ────────────────────────────────────────────────
    let aggregates = MetricDeriver::derive(aggregates)?;

    // ── Step 5: Reshape and write ─────────────────────────────────────────────
    let ltv = MetricMatrix::from_rows(&aggregates, |r| r.avg_cumulative_total_sales);
    let revenue = MetricMatrix::from_rows(&aggregates, |r| r.total_sales);
    let repeat_rate = MetricMatrix::from_rows(&aggregates, |r| r.repeat_purchase_rate);
    let sizes = cohort_sizes(&aggregates);

    report::write_matrix(&work_dir.join(report::LTV_CSV), &ltv)?;
    report::write_matrix(&work_dir.join(report::REVENUE_CSV), &revenue)?;
    report::write_matrix(&work_dir.join(report::REPEAT_RATE_CSV), &repeat_rate)?;
    report::write_cohort_sizes(&work_dir.join(report::COHORT_SIZES_CSV), &sizes)?;

    info!(
        "Wrote {} aggregate rows across {} cohorts to {}",
        aggregates.len(),
        sizes.len(),
        work_dir.display()
    );

    Ok(ReportArtifacts {
        ltv_csv: report::LTV_CSV.to_string(),
        revenue_csv: report::REVENUE_CSV.to_string(),
        repeat_rate_csv: report::REPEAT_RATE_CSV.to_string(),
        cohort_sizes_csv: report::COHORT_SIZES_CSV.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
