//! Data types shared by the report builder and the density join.

use serde::Serialize;
use std::fmt;

/// The three per-ZIP metrics that are ranked across a cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    RentRatio,
    Slope,
    RSquared,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::RentRatio => "rent ratio",
            Metric::Slope => "slope",
            Metric::RSquared => "r squared",
        };
        f.write_str(name)
    }
}

/// Raw (not yet normalized) metrics for one ZIP within one apartment size.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipMetrics {
    pub rent_ratio: f64,
    pub slope: f64,
    pub r_squared: f64,
    pub current_rent: f64,
}

/// Observed range of one metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub max: f64,
    pub min: f64,
}

impl Bounds {
    /// An empty range that the first observed value collapses onto.
    pub fn empty() -> Self {
        Bounds {
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }

    pub fn observe(&mut self, value: f64) {
        if value > self.max {
            self.max = value;
        }
        if value < self.min {
            self.min = value;
        }
    }
}

/// Running min/max of every metric over the ZIPs seen so far for one apartment size.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortExtremes {
    pub rent_ratio: Bounds,
    pub slope: Bounds,
    pub r_squared: Bounds,
}

impl CohortExtremes {
    /// Extremes seeded from the first real data point.
    pub fn observed() -> Self {
        CohortExtremes {
            rent_ratio: Bounds::empty(),
            slope: Bounds::empty(),
            r_squared: Bounds::empty(),
        }
    }

    /// The fixed starting bounds older reports were produced with. They pull the
    /// first ZIP's metrics toward one end of the scale.
    pub fn legacy() -> Self {
        CohortExtremes {
            rent_ratio: Bounds { max: 0.0, min: 100.0 },
            slope: Bounds {
                max: -100.0,
                min: 100.0,
            },
            r_squared: Bounds { max: 0.0, min: 100.0 },
        }
    }

    pub fn observe(&mut self, metrics: &ZipMetrics) {
        self.rent_ratio.observe(metrics.rent_ratio);
        self.slope.observe(metrics.slope);
        self.r_squared.observe(metrics.r_squared);
    }
}

/// Final score of one ZIP for one apartment size, one row of `studio.csv` and friends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalIndexEntry {
    pub zip_code: String,
    pub rental_index: f64,
    pub median_rent: f64,
}

impl RentalIndexEntry {
    pub const HEADER: [&'static str; 3] = ["ZIP_CODE", "RENT_INDEX", "MEDIAN RENT"];
}

/// Population figures for one ZIP, one row of `general-data.csv`.
///
/// ZIPs missing from the reference table keep the all-zero placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZipDensityRecord {
    pub zip_code: String,
    pub population_2010: f64,
    pub square_miles: f64,
    pub population_density: f64,
}

impl ZipDensityRecord {
    pub const HEADER: [&'static str; 4] = [
        "ZIP_CODE",
        "2010_POPULATION",
        "SQUARE_MILES",
        "POPULATION_DENSITY",
    ];

    pub fn placeholder(zip_code: &str) -> Self {
        ZipDensityRecord {
            zip_code: zip_code.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_bounds_collapse_on_first_value() {
        let mut b = Bounds::empty();
        b.observe(0.42);
        assert_eq!(b.max, 0.42);
        assert_eq!(b.min, 0.42);
        b.observe(0.1);
        assert_eq!(b.max, 0.42);
        assert_eq!(b.min, 0.1);
    }

    #[test]
    fn test_legacy_bounds_keep_sentinels() {
        let mut e = CohortExtremes::legacy();
        e.observe(&ZipMetrics {
            rent_ratio: 0.5,
            slope: 3.0,
            r_squared: 0.9,
            current_rent: 1100.0,
        });
        assert_eq!(e.rent_ratio, Bounds { max: 0.5, min: 0.5 });
        assert_eq!(e.slope, Bounds { max: 3.0, min: 3.0 });
        assert_eq!(e.r_squared, Bounds { max: 0.9, min: 0.9 });

        // Slopes below the sentinel leave max at -100.
        let mut e = CohortExtremes::legacy();
        e.slope.observe(-200.0);
        assert_eq!(e.slope.max, -100.0);
        assert_eq!(e.slope.min, -200.0);
    }

    #[test]
    fn test_placeholder_is_zeroed() {
        let r = ZipDensityRecord::placeholder("10001");
        assert_eq!(r.zip_code, "10001");
        assert_eq!(r.population_2010, 0.0);
        assert_eq!(r.square_miles, 0.0);
        assert_eq!(r.population_density, 0.0);
    }
}
