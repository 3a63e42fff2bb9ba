mod bootstrap;
mod store;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use cohort_core::settings::Settings;
use cohort_data::pipeline::run_pipeline;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;
    bootstrap::ensure_work_dir(&settings.work_dir)?;

    tracing::info!("cohort-ltv v{} starting", env!("CARGO_PKG_VERSION"));

    let input_name = settings
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    if !store::has_allowed_extension(input_name) {
        bail!(
            "unsupported input file {}: expected one of {:?}",
            settings.input.display(),
            store::ALLOWED_EXTENSIONS
        );
    }

    let delimiter = u8::try_from(settings.delimiter)
        .map_err(|_| anyhow!("delimiter must be a single ASCII character"))?;

    let stored = store::persist_input(&settings.input, &settings.work_dir)?;
    let artifacts = run_pipeline(&stored, &settings.work_dir, delimiter)?;

    // Artifact names on stdout, so callers can pick up the reports by name
    // from the working directory.
    println!("{}", serde_json::to_string_pretty(&artifacts)?);

    Ok(())
}
