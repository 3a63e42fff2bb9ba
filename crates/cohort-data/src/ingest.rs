//! Transaction ingestion from delimited text exports.
//!
//! Reads the first four columns of the input table positionally, parses the
//! second into a calendar date and the fourth into a sale amount, and
//! produces normalized [`Transaction`] records for downstream processing.

use std::path::Path;

use cohort_core::error::{CohortError, Result};
use cohort_core::models::Transaction;
use cohort_core::month::parse_purchase_date;
use tracing::debug;

/// Minimum number of columns the input table must carry. Columns beyond
/// the fourth are ignored.
const REQUIRED_COLUMNS: usize = 4;

/// Read `path` into normalized transactions.
///
/// Column mapping is positional, regardless of header names:
/// 0 = customer id, 1 = purchase date, 2 = passthrough reference,
/// 3 = sale amount.
///
/// Fails with [`CohortError::MalformedInput`] when fewer than four columns
/// exist, a date does not parse, or an amount is not numeric; with
/// [`CohortError::EmptyInput`] when the table has a header but no rows.
pub fn read_transactions(path: &Path, delimiter: u8) -> Result<Vec<Transaction>> {
    let file = std::fs::File::open(path).map_err(|source| CohortError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.len() < REQUIRED_COLUMNS {
        return Err(CohortError::MalformedInput(format!(
            "expected at least {} columns, found {}",
            REQUIRED_COLUMNS,
            headers.len()
        )));
    }

    let mut transactions = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based row number counting the header, for error messages.
        let row = idx + 2;

        if record.len() < REQUIRED_COLUMNS {
            return Err(CohortError::MalformedInput(format!(
                "row {}: expected at least {} fields, found {}",
                row,
                REQUIRED_COLUMNS,
                record.len()
            )));
        }

        let raw_date = record[1].trim();
        let purchase_date = parse_purchase_date(raw_date).ok_or_else(|| {
            CohortError::MalformedInput(format!(
                "row {}: unparseable purchase date {:?}",
                row, raw_date
            ))
        })?;

        let raw_amount = record[3].trim();
        let sale_amount: f64 = raw_amount.parse().map_err(|_| {
            CohortError::MalformedInput(format!(
                "row {}: non-numeric sale amount {:?}",
                row, raw_amount
            ))
        })?;
        if !sale_amount.is_finite() {
            return Err(CohortError::MalformedInput(format!(
                "row {}: non-finite sale amount {:?}",
                row, raw_amount
            )));
        }

        transactions.push(Transaction {
            customer_id: record[0].trim().to_string(),
            purchase_date,
            reference: record[2].to_string(),
            sale_amount,
        });
    }

    if transactions.is_empty() {
        return Err(CohortError::EmptyInput);
    }

    debug!(
        "Ingested {} transactions from {}",
        transactions.len(),
        path.display()
    );

    Ok(transactions)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
