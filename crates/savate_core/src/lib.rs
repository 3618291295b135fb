//! # savate_core - Luc Léger step-test coaching dashboard
//!
//! Grades a savate athlete's Luc Léger result against the club scale and
//! turns the grade into coaching advice and printable exports.
//!
//! ## Features
//! - Club grade table (sex × 5-year age band × step), loaded from YAML
//! - 5, 6 or 9 level display scales over the same table
//! - Assault interpretation, age note and suggested work per grade
//! - In-memory roster with free-text filter and head figures
//! - CSV export of the roster and a paginated PDF sheet per athlete
//! - JSON API for front ends

pub mod advice;
pub mod analysis;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod export;
pub mod grading;
pub mod roster;

// Re-export main API functions
pub use api::{handle_request_json, DashboardRequest, DashboardResponse};
pub use error::{CoreError, EntryError, Result};

pub use advice::{
    age_specific_note, suggested_work, tactical_interpretation, AdviceCatalog, AgeNote,
    TacticalInterpretation, WorkItem,
};
pub use analysis::{analyse, table_row, AnalysisBundle, AthleteIdentity, TableRow};
pub use config::{DashboardConfig, ReportConfig};
pub use dashboard::{Dashboard, DashboardView, ExportedFile};
pub use export::CsvLayout;
pub use grading::{
    normalize, resolve_band, AgeBand, Grade, GradeReading, GradeScale, GradeTable, Grader,
    RawGrade, Sex, Step, StepPrecision,
};
pub use roster::{AthleteEntry, EntryId, NewEntry, RecordStore, RosterSummary};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
