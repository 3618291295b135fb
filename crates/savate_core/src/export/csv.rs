// CSV export of the visible roster rows
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advice::AdviceCatalog;
use crate::analysis::TableRow;
use crate::error::{CoreError, Result};

pub const PLAIN_HEADER: [&str; 5] = ["firstName", "age", "sex", "step", "grade"];

const LOCALIZED_HEADER_KEYS: [&str; 7] = [
    "field-last-name",
    "field-first-name",
    "field-age",
    "field-sex",
    "field-step",
    "field-level",
    "field-entry-date",
];

/// Column set of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CsvLayout {
    /// `firstName,age,sex,step,grade`
    #[default]
    Plain,
    /// Catalogue column names, with last name and entry date
    Localized,
}

/// One header line plus one line per row, `\n`-terminated, UTF-8.
pub fn export_csv(rows: &[TableRow], layout: CsvLayout, catalog: &AdviceCatalog) -> Result<Vec<u8>> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    match layout {
        CsvLayout::Plain => {
            writer.write_record(PLAIN_HEADER)?;
            for row in rows {
                writer.write_record([
                    row.first_name.clone(),
                    row.age.to_string(),
                    row.sex.code().to_string(),
                    row.step.to_string(),
                    row.grade_label.clone(),
                ])?;
            }
        }
        CsvLayout::Localized => {
            writer.write_record(LOCALIZED_HEADER_KEYS.iter().map(|key| catalog.text(key)))?;
            for row in rows {
                writer.write_record([
                    row.last_name.clone().unwrap_or_default(),
                    row.first_name.clone(),
                    row.age.to_string(),
                    row.sex.code().to_string(),
                    row.step.to_string(),
                    row.grade_label.clone(),
                    row.entry_date.clone(),
                ])?;
            }
        }
    }

    let bytes = writer.into_inner().map_err(|err| CoreError::Io(err.into_error()))?;
    info!("Exported {} rows as CSV ({:?})", rows.len(), layout);
    Ok(bytes)
}
