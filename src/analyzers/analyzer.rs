use crate::analyzers::density::join_density;
use crate::analyzers::report::{KnownZips, RentReport, build_report};
use crate::analyzers::types::{RentalIndexEntry, ZipDensityRecord};
use crate::config::RaterConfig;
use crate::output::write_records;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Runs every size category in order, then the density join, writing seven CSVs
/// into `output_dir`.
///
/// Each category is read, scored and written before the next one starts.
pub fn analyze(
    config: &RaterConfig,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<RentReport>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;

    let mut known_zips = KnownZips::new();
    let mut reports = Vec::with_capacity(config.categories.len());

    for category in &config.categories {
        let report = build_report(
            &input_dir.join(&category.input_file),
            category,
            config,
            &mut known_zips,
        )
        .with_context(|| format!("building {} report", category.name))?;

        let out = output_dir.join(&category.output_file);
        write_records(&out, &RentalIndexEntry::HEADER, &report.entries)?;
        info!(category = %category.name, path = %out.display(), "Report written");

        reports.push(report);
    }

    join_density(&input_dir.join(&config.density_file), &mut known_zips)
        .context("joining population density")?;

    let out = output_dir.join(&config.general_output_file);
    write_records(&out, &ZipDensityRecord::HEADER, known_zips.values())?;
    info!(zips = known_zips.len(), path = %out.display(), "General data written");

    Ok(reports)
}
