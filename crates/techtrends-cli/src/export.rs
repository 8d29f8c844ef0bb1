//! CSV export of collected posts.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, TimeZone};
use techtrends_core::PostRecord;

/// File name for a run started at `now`: `tech_trends_<YYYYMMDD_HHMMSS>.csv`.
pub(crate) fn export_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("tech_trends_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Writes one row per post under `dir` and returns the file path.
///
/// Columns follow [`PostRecord`]'s fields; timestamps are RFC 3339.
pub(crate) fn write_csv<Tz>(
    posts: &[PostRecord],
    dir: &Path,
    now: &DateTime<Tz>,
) -> anyhow::Result<PathBuf>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let path = dir.join(export_file_name(now));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    if posts.is_empty() {
        writer.write_record(["source", "topic", "content", "timestamp", "engagement"])?;
    }
    for post in posts {
        writer
            .serialize(post)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }
    writer.flush()?;

    Ok(path)
}
