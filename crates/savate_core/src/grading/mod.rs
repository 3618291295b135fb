// Luc Léger grading: band resolution, table lookup and normalisation

pub mod band;
pub mod grade;
pub mod scale;
pub mod sex;
pub mod step;
pub mod table;

pub use band::{clamp_age, resolve_band, AgeBand, MAX_AGE, MIN_AGE};
pub use grade::{normalize, Grade, RawGrade};
pub use scale::{GradeScale, Level};
pub use sex::Sex;
pub use step::{Step, StepPrecision, MAX_STEP, MIN_STEP};
pub use table::GradeTable;

use serde::Serialize;

/// Everything the grading pipeline knows about one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeReading {
    pub band: AgeBand,
    pub raw: RawGrade,
    pub grade: Grade,
    pub level: Option<Level>,
}

/// Table plus the display scale chosen for the deployment.
#[derive(Debug, Clone)]
pub struct Grader {
    table: GradeTable,
    scale: GradeScale,
}

impl Grader {
    pub fn new(table: GradeTable, scale: GradeScale) -> Self {
        Self { table, scale }
    }

    pub fn table(&self) -> &GradeTable {
        &self.table
    }

    pub fn scale(&self) -> GradeScale {
        self.scale
    }

    pub fn read(&self, sex: Sex, age: i32, step: Step) -> GradeReading {
        let band = resolve_band(age);
        let raw = self.table.raw_grade(sex, age, step);
        GradeReading { band, raw, grade: normalize(raw), level: self.scale.level(raw) }
    }

    /// Catalogue key of the label shown for this reading on the active scale.
    pub fn label_key(&self, reading: &GradeReading) -> &'static str {
        self.scale.label_key(reading.raw)
    }
}
