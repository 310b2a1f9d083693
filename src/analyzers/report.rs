//! Per-size report builder.
//!
//! One pass over a rent file fits every city ZIP's series and keeps running
//! cohort extremes; a second pass over the collected metrics normalizes and
//! combines them once the extremes are final.

use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::analyzers::normalize::scale_to_100;
use crate::analyzers::rental_index::rental_index;
use crate::analyzers::types::{
    CohortExtremes, Metric, RentalIndexEntry, ZipDensityRecord, ZipMetrics,
};
use crate::config::{ExtremesSeed, RaterConfig, SizeCategory};
use crate::error::RaterError;
use crate::parser::{open_reader, parse_rent_row, zip_in_city};
use crate::stats::TrendResult;

/// ZIP codes seen in any rent file, each with a zeroed density placeholder.
pub type KnownZips = BTreeMap<String, ZipDensityRecord>;

/// Metrics and running extremes for one apartment size.
#[derive(Debug, Clone)]
pub struct Cohort {
    metrics: BTreeMap<String, ZipMetrics>,
    extremes: CohortExtremes,
}

impl Cohort {
    pub fn new(seed: ExtremesSeed) -> Self {
        let extremes = match seed {
            ExtremesSeed::Observed => CohortExtremes::observed(),
            ExtremesSeed::Legacy => CohortExtremes::legacy(),
        };
        Cohort {
            metrics: BTreeMap::new(),
            extremes,
        }
    }

    /// Records a ZIP's metrics and widens the extremes to include them.
    ///
    /// A ZIP observed twice keeps its later metrics; the extremes keep both.
    pub fn observe(&mut self, zip_code: &str, metrics: ZipMetrics) {
        self.extremes.observe(&metrics);
        self.metrics.insert(zip_code.to_string(), metrics);
    }

    #[cfg(test)]
    fn extremes(&self) -> &CohortExtremes {
        &self.extremes
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.metrics.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Normalizes every ZIP against the final extremes and combines the ranks,
    /// in ascending ZIP order.
    pub fn score(&self) -> Result<Vec<RentalIndexEntry>, RaterError> {
        let e = &self.extremes;
        self.metrics
            .iter()
            .map(|(zip_code, m)| {
                let city_compare = scale_to_100(m.rent_ratio, e.rent_ratio, Metric::RentRatio)?;
                let price_trend = scale_to_100(m.slope, e.slope, Metric::Slope)?;
                let price_stability = scale_to_100(m.r_squared, e.r_squared, Metric::RSquared)?;

                Ok(RentalIndexEntry {
                    zip_code: zip_code.clone(),
                    rental_index: rental_index(city_compare, price_trend, price_stability),
                    median_rent: m.current_rent,
                })
            })
            .collect()
    }
}

/// Output of one apartment size's pass.
#[derive(Debug, Clone)]
pub struct RentReport {
    pub category: String,
    pub entries: Vec<RentalIndexEntry>,
    pub rows_read: usize,
    pub rows_in_city: usize,
    /// City rows whose series was too short to fit and were scored as
    /// [`TrendResult::FLAT`].
    pub flat_fallbacks: usize,
}

/// Builds the rental index of every city ZIP in the rent file at `path`.
///
/// Every city ZIP, scored or not, is added to `known_zips`.
///
/// # Errors
///
/// Any malformed row aborts the whole file, as does a cohort whose metric range
/// is empty. Series with fewer than two points stay in the cohort with
/// [`TrendResult::FLAT`] as their trend.
#[tracing::instrument(
    skip_all,
    fields(category = %category.name, path = %path.display())
)]
pub fn build_report(
    path: &Path,
    category: &SizeCategory,
    config: &RaterConfig,
    known_zips: &mut KnownZips,
) -> Result<RentReport, RaterError> {
    let file = path.display().to_string();
    let mut reader = open_reader(path)?;

    let mut cohort = Cohort::new(config.extremes_seed);
    let mut rows_read = 0;
    let mut rows_in_city = 0;
    let mut flat_fallbacks = 0;

    for result in reader.records() {
        let record = result.map_err(|e| RaterError::from_csv(&file, &e))?;
        rows_read += 1;

        let Some(zip_code) = zip_in_city(&record, &config.city) else {
            continue;
        };
        rows_in_city += 1;
        known_zips
            .entry(zip_code.to_string())
            .or_insert_with(|| ZipDensityRecord::placeholder(zip_code));

        let row = parse_rent_row(&file, &record, config.rent_column_offset)?;
        if row.series.is_empty() {
            continue;
        }

        let trend = match TrendResult::fit(&row.series) {
            Ok(trend) => trend,
            Err(RaterError::DegenerateSeries { points }) => {
                warn!(
                    zip = %row.zip_code,
                    line = row.line,
                    points,
                    "Series too short to fit, scoring as flat"
                );
                flat_fallbacks += 1;
                TrendResult::FLAT
            }
            Err(e) => return Err(e),
        };

        let current_rent = row.current_rent.ok_or_else(|| RaterError::MalformedRow {
            file: file.clone(),
            line: row.line,
            reason: "current rent (last column) is empty".to_string(),
        })?;

        let metrics = ZipMetrics {
            rent_ratio: current_rent / category.city_median_price,
            slope: trend.slope,
            r_squared: trend.r_squared,
            current_rent,
        };
        debug!(zip = %row.zip_code, ?metrics, "ZIP fitted");
        cohort.observe(&row.zip_code, metrics);
    }

    let entries = cohort.score()?;

    info!(
        rows_read,
        rows_in_city,
        scored = entries.len(),
        flat_fallbacks,
        "Rent file processed"
    );

    Ok(RentReport {
        category: category.name.clone(),
        entries,
        rows_read,
        rows_in_city,
        flat_fallbacks,
    })
}
