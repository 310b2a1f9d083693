//! CSV emission for the per-size reports and the general-data table.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Writes `header` followed by one serialized row per record, replacing any
/// existing file at `path`.
///
/// The header is written even when `records` is empty.
pub fn write_records<T, I>(path: &Path, header: &[&str], records: I) -> Result<usize>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    writer.write_record(header)?;

    let mut count = 0;
    for record in records {
        writer.serialize(record)?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = count, "CSV written");
    Ok(count)
}
