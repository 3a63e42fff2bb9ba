//! Report artifact writing.
//!
//! Renders the pivoted matrices and the cohort-size table as delimited
//! text files. Each artifact is written to a temp file and renamed into
//! place, so a reader never observes a half-written file.

use std::collections::BTreeMap;
use std::path::Path;

use cohort_core::error::Result;
use cohort_core::month::Month;
use tracing::debug;

use crate::pivot::MetricMatrix;

// ── Artifact names ────────────────────────────────────────────────────────────

pub const LTV_CSV: &str = "ltv.csv";
pub const REVENUE_CSV: &str = "revenue_monthly.csv";
pub const REPEAT_RATE_CSV: &str = "repeat_purchase_rate.csv";
pub const COHORT_SIZES_CSV: &str = "cohort_sizes.csv";

// ── Writers ───────────────────────────────────────────────────────────────────

/// Write a metric matrix to `path`.
///
/// Header: `cohort_month` followed by the offset columns. Cells use `f64`
/// shortest-round-trip formatting, so identical input produces
/// byte-identical files.
pub fn write_matrix(path: &Path, matrix: &MetricMatrix) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp)?;

        let mut header = vec!["cohort_month".to_string()];
        header.extend(matrix.offsets().map(|offset| offset.to_string()));
        writer.write_record(&header)?;

        for (cohort, values) in matrix.rows() {
            let mut record = vec![cohort.to_string()];
            record.extend(values.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }

        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;

    debug!("Wrote matrix artifact {}", path.display());
    Ok(())
}

/// Write the flat cohort-size table to `path`: one row per cohort month,
/// ascending.
pub fn write_cohort_sizes(path: &Path, sizes: &BTreeMap<Month, u64>) -> Result<()> {
    let tmp = tmp_path(path);
    {
        let mut writer = csv::Writer::from_path(&tmp)?;
        writer.write_record(["cohort_month", "cohort_size"])?;
        for (cohort, size) in sizes {
            writer.write_record([cohort.to_string(), size.to_string()])?;
        }
        writer.flush()?;
    }
    std::fs::rename(&tmp, path)?;

    debug!("Wrote cohort-size artifact {}", path.display());
    Ok(())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    path.with_extension("csv.tmp")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
