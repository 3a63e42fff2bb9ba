use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Cohort-based customer lifetime-value reporting from transaction exports
#[derive(Parser, Debug, Clone)]
#[command(
    name = "cohort-ltv",
    about = "Cohort-based customer lifetime-value reporting from transaction exports",
    version
)]
pub struct Settings {
    /// Path to the transaction table (delimited text with a header row)
    pub input: PathBuf,

    /// Working directory where the stored input and report artifacts land
    #[arg(long, default_value = "uploads")]
    pub work_dir: PathBuf,

    /// Field delimiter of the input table
    #[arg(long, default_value = ",")]
    pub delimiter: char,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
