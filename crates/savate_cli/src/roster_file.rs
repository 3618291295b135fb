//! Roster files
//!
//! A roster is either a JSON array of submissions or a CSV file with the
//! columns `first_name,last_name,age,sex,step` (`last_name` may be empty).
//! Rows are submitted in file order, so the last row is listed first.

use anyhow::{bail, Context, Result};
use savate_core::{Dashboard, NewEntry};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoadStats {
    pub added: usize,
    pub rejected: usize,
}

pub fn read_submissions(path: &Path) -> Result<Vec<NewEntry>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "json" => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read roster: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON roster: {}", path.display()))
        }
        "csv" => {
            let mut reader = csv::ReaderBuilder::new()
                .has_headers(true)
                .trim(csv::Trim::All)
                .from_path(path)
                .with_context(|| format!("Failed to open CSV roster: {}", path.display()))?;
            let mut submissions = Vec::new();
            for (i, record) in reader.deserialize::<NewEntry>().enumerate() {
                // header is line 1
                let submission =
                    record.with_context(|| format!("Invalid roster row at line {}", i + 2))?;
                submissions.push(submission);
            }
            Ok(submissions)
        }
        other => bail!("Unsupported roster format '{}': expected .json or .csv", other),
    }
}

/// Submit every row of the roster. Rejected rows are logged and skipped.
pub fn load_roster(dashboard: &mut Dashboard, path: &Path) -> Result<LoadStats> {
    let mut stats = LoadStats::default();
    for (i, submission) in read_submissions(path)?.iter().enumerate() {
        match dashboard.submit(submission) {
            Ok(_) => stats.added += 1,
            Err(err) => {
                stats.rejected += 1;
                warn!("Roster row {} rejected: {}", i + 1, dashboard.entry_error_message(&err));
            }
        }
    }
    info!("Loaded {} entries from {} ({} rejected)", stats.added, path.display(), stats.rejected);
    Ok(stats)
}
