//! Joins population-density reference data onto the ZIPs found in the rent files.

use std::path::Path;
use tracing::info;

use crate::analyzers::report::KnownZips;
use crate::error::RaterError;
use crate::parser::{open_reader, parse_density_row};

/// Fills in population, area and density for every known ZIP listed in the
/// reference file at `path`.
///
/// Reference rows for unknown ZIPs (including the header) are ignored without
/// being parsed. Known ZIPs with no reference row keep their zero placeholder.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn join_density(path: &Path, known_zips: &mut KnownZips) -> Result<usize, RaterError> {
    let file = path.display().to_string();
    let mut reader = open_reader(path)?;
    let mut matched = 0;

    for result in reader.records() {
        let record = result.map_err(|e| RaterError::from_csv(&file, &e))?;

        let Some(entry) = record.get(0).and_then(|zip| known_zips.get_mut(zip)) else {
            continue;
        };

        let row = parse_density_row(&file, &record)?;
        entry.population_2010 = row.population;
        entry.square_miles = row.square_miles;
        entry.population_density = row.density;
        matched += 1;
    }

    info!(
        known = known_zips.len(),
        matched, "Density reference joined"
    );
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::types::ZipDensityRecord;
    use std::fs;

    fn known(zips: &[&str]) -> KnownZips {
        zips.iter()
            .map(|z| (z.to_string(), ZipDensityRecord::placeholder(z)))
            .collect()
    }

    #[test]
    fn test_join_fills_known_and_ignores_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population-density-zip.csv");
        fs::write(
            &path,
            "Zip,Population,SquareMiles,Density\n\
             10001,21102,0.62,34035.5\n\
             90210,21741,10.2,2131.5\n",
        )
        .unwrap();

        let mut zips = known(&["10001", "10002"]);
        let matched = join_density(&path, &mut zips).unwrap();

        assert_eq!(matched, 1);
        assert_eq!(zips.len(), 2);
        assert!(!zips.contains_key("90210"));

        let hit = &zips["10001"];
        assert_eq!(hit.population_2010, 21102.0);
        assert_eq!(hit.square_miles, 0.62);
        assert_eq!(hit.population_density, 34035.5);

        assert_eq!(zips["10002"], ZipDensityRecord::placeholder("10002"));
    }

    #[test]
    fn test_join_bad_number_names_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("population-density-zip.csv");
        fs::write(&path, "10003,1,1,1\n10001,lots,0.62,1\n").unwrap();

        let mut zips = known(&["10001"]);
        match join_density(&path, &mut zips).unwrap_err() {
            RaterError::MalformedRow { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_join_missing_file() {
        let mut zips = known(&["10001"]);
        let err = join_density(Path::new("/nonexistent/density.csv"), &mut zips).unwrap_err();
        assert!(matches!(err, RaterError::Io { .. }));
    }
}
