//! Grade table: (sex, age band, step) → raw grade.
//!
//! Loaded once from YAML (the club scale is embedded at compile time) and never
//! mutated afterwards. Lookups are total: any cell the deployed table does not
//! define reads as [`RawGrade::Undetermined`].

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use super::band::{resolve_band, AgeBand};
use super::grade::RawGrade;
use super::sex::Sex;
use super::step::{Step, MAX_STEP, MIN_STEP};
use crate::data::LUC_LEGER_CLUB_YAML;
use crate::error::CoreError;

const STEP_COUNT: usize = (MAX_STEP - MIN_STEP + 1) as usize;

type Cells = [[[RawGrade; STEP_COUNT]; AgeBand::COUNT]; 2];

/// On-disk layout of a grade table.
#[derive(Debug, Deserialize)]
struct GradeTableFile {
    name: String,
    #[serde(default = "default_first_step")]
    first_step: u8,
    grades: BTreeMap<Sex, BTreeMap<AgeBand, Vec<RawGrade>>>,
}

fn default_first_step() -> u8 {
    MIN_STEP
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeTable {
    name: String,
    cells: Cells,
}

impl GradeTable {
    /// The club scale shipped with the crate.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_yaml_str(LUC_LEGER_CLUB_YAML)
    }

    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CoreError> {
        let file: GradeTableFile = serde_yaml::from_str(yaml)?;

        if !(MIN_STEP..=MAX_STEP).contains(&file.first_step) {
            return Err(CoreError::GradeTable(format!(
                "first_step {} outside {}..={}",
                file.first_step, MIN_STEP, MAX_STEP
            )));
        }

        let mut cells: Cells = [[[RawGrade::Undetermined; STEP_COUNT]; AgeBand::COUNT]; 2];
        for (sex, bands) in &file.grades {
            for (band, row) in bands {
                let offset = (file.first_step - MIN_STEP) as usize;
                if offset + row.len() > STEP_COUNT {
                    return Err(CoreError::GradeTable(format!(
                        "{} {}: {} grades starting at step {} overflow step {}",
                        sex,
                        band,
                        row.len(),
                        file.first_step,
                        MAX_STEP
                    )));
                }
                for (i, raw) in row.iter().enumerate() {
                    cells[sex.index()][band.index()][offset + i] = *raw;
                }
            }
        }

        let table = Self { name: file.name, cells };
        let missing = table.missing_cells().len();
        if missing > 0 {
            warn!("Grade table '{}' is incomplete: {} undefined cells", table.name, missing);
        } else {
            debug!("Grade table '{}' loaded", table.name);
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell lookup. `step` outside the table range reads as undetermined.
    pub fn lookup(&self, sex: Sex, band: AgeBand, step: u8) -> RawGrade {
        if !(MIN_STEP..=MAX_STEP).contains(&step) {
            return RawGrade::Undetermined;
        }
        self.cells[sex.index()][band.index()][(step - MIN_STEP) as usize]
    }

    /// Grade of a raw input: age and step are clamped before the lookup.
    pub fn raw_grade(&self, sex: Sex, age: i32, step: Step) -> RawGrade {
        let band = resolve_band(age);
        let raw = self.lookup(sex, band, step.lookup_step());
        if !raw.is_determined() {
            warn!("No grade for {} {} step {} in table '{}'", sex, band, step, self.name);
        }
        raw
    }

    /// Every (sex, band, step) cell holding the sentinel.
    pub fn missing_cells(&self) -> Vec<(Sex, AgeBand, u8)> {
        let mut missing = Vec::new();
        for sex in Sex::ALL {
            for band in AgeBand::ALL {
                for step in MIN_STEP..=MAX_STEP {
                    if !self.lookup(sex, band, step).is_determined() {
                        missing.push((sex, band, step));
                    }
                }
            }
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_cells().is_empty()
    }
}
