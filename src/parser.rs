//! Row extraction for the rent and population-density CSV files.
//!
//! Files are read without headers; header rows are filtered out naturally because
//! their city / ZIP cells never match real data.

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;

use crate::error::RaterError;

/// The parts of one rent-file row the report builder needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRow {
    pub zip_code: String,
    /// Line in the source file, for diagnostics.
    pub line: u64,
    /// `(month, rent)` pairs; month is 1-based from the first rent column. Empty cells are skipped.
    pub series: Vec<(f64, f64)>,
    /// Value of the last column.
    pub current_rent: Option<f64>,
}

/// One row of the population-density reference file.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityRow {
    pub zip_code: String,
    pub population: f64,
    pub square_miles: f64,
    pub density: f64,
}

/// Opens a headerless CSV reader over `path`.
///
/// Rows with a field count differing from the first row are reported as errors.
pub fn open_reader(path: &Path) -> Result<csv::Reader<File>, RaterError> {
    let file = File::open(path).map_err(|source| RaterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .from_reader(file))
}

/// Returns the ZIP code of `record` if its city column equals `city`.
pub fn zip_in_city<'r>(record: &'r StringRecord, city: &str) -> Option<&'r str> {
    match (record.get(0), record.get(1)) {
        (Some(zip), Some(c)) if c == city => Some(zip),
        _ => None,
    }
}

/// Parses a numeric cell. `NaN` and infinities are rejected along with garbage.
fn parse_cell(file: &str, line: u64, column: usize, cell: &str) -> Result<f64, RaterError> {
    let malformed = |reason: String| RaterError::MalformedRow {
        file: file.to_string(),
        line,
        reason: format!("column {column}: {cell:?} {reason}"),
    };
    let value = cell
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed(format!("is not a number ({e})")))?;
    if !value.is_finite() {
        return Err(malformed("is not a finite number".to_string()));
    }
    Ok(value)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Extracts the rent series and current rent from a city row.
///
/// Every column from `offset` through the last one is part of the series.
pub fn parse_rent_row(
    file: &str,
    record: &StringRecord,
    offset: usize,
) -> Result<RentRow, RaterError> {
    let line = line_of(record);
    let zip_code = record.get(0).unwrap_or_default().to_string();

    let mut series = Vec::new();
    for (i, cell) in record.iter().enumerate().skip(offset) {
        if cell.is_empty() {
            continue;
        }
        let rent = parse_cell(file, line, i, cell)?;
        series.push(((i - offset + 1) as f64, rent));
    }

    let current_rent = match record.iter().last() {
        Some(cell) if record.len() > offset && !cell.is_empty() => {
            Some(parse_cell(file, line, record.len() - 1, cell)?)
        }
        _ => None,
    };

    Ok(RentRow {
        zip_code,
        line,
        series,
        current_rent,
    })
}

/// Parses a density reference row: `[ZIP, population, square_miles, density]`.
///
/// An empty density cell is derived from population and area.
pub fn parse_density_row(file: &str, record: &StringRecord) -> Result<DensityRow, RaterError> {
    let line = line_of(record);
    if record.len() < 3 {
        return Err(RaterError::MalformedRow {
            file: file.to_string(),
            line,
            reason: format!("expected at least 3 fields, found {}", record.len()),
        });
    }

    let population = parse_cell(file, line, 1, &record[1])?;
    let square_miles = parse_cell(file, line, 2, &record[2])?;
    let density = match record.get(3) {
        Some(cell) if !cell.trim().is_empty() => parse_cell(file, line, 3, cell)?,
        _ if square_miles > 0.0 => population / square_miles,
        _ => 0.0,
    };

    Ok(DensityRow {
        zip_code: record[0].to_string(),
        population,
        square_miles,
        density,
    })
}
