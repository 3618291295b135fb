//! Derived views over stored entries
//!
//! A [`TableRow`] is what the roster list shows for each visible entry. An
//! [`AnalysisBundle`] is the full panel for one selected entry. Both are
//! recomputed from the entry on every call and never cached.

use serde::Serialize;

use crate::advice::{
    age_specific_note, suggested_work, tactical_interpretation, AdviceCatalog, AgeNote,
    TacticalInterpretation, WorkItem,
};
use crate::grading::{AgeBand, Grade, Grader, RawGrade, Sex, Step};
use crate::roster::{AthleteEntry, EntryId};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub id: EntryId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: i32,
    pub sex: Sex,
    pub step: Step,
    pub band: AgeBand,
    pub grade: Grade,
    pub grade_label: String,
    pub entry_date: String,
}

/// Identity block of the analysis panel and the PDF sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteIdentity {
    pub first_name: String,
    pub last_name: Option<String>,
    pub age: i32,
    pub sex: Sex,
    pub sex_label: String,
    pub step: Step,
    pub entry_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisBundle {
    pub id: EntryId,
    pub identity: AthleteIdentity,
    pub band: AgeBand,
    pub raw_grade: RawGrade,
    pub grade: Grade,
    pub grade_label: String,
    pub colour: &'static str,
    pub interpretation: TacticalInterpretation,
    pub age_note: AgeNote,
    pub work: Vec<WorkItem>,
}

pub fn table_row(grader: &Grader, catalog: &AdviceCatalog, entry: &AthleteEntry) -> TableRow {
    let reading = grader.read(entry.sex(), entry.age(), entry.step());
    TableRow {
        id: entry.id(),
        first_name: entry.first_name().to_string(),
        last_name: entry.last_name().map(str::to_string),
        age: entry.age(),
        sex: entry.sex(),
        step: entry.step(),
        band: reading.band,
        grade: reading.grade,
        grade_label: catalog.text(grader.label_key(&reading)),
        entry_date: entry.entry_date(),
    }
}

pub fn analyse(grader: &Grader, catalog: &AdviceCatalog, entry: &AthleteEntry) -> AnalysisBundle {
    let reading = grader.read(entry.sex(), entry.age(), entry.step());
    AnalysisBundle {
        id: entry.id(),
        identity: AthleteIdentity {
            first_name: entry.first_name().to_string(),
            last_name: entry.last_name().map(str::to_string),
            age: entry.age(),
            sex: entry.sex(),
            sex_label: catalog.text(entry.sex().label_key()),
            step: entry.step(),
            entry_date: entry.entry_date(),
        },
        band: reading.band,
        raw_grade: reading.raw,
        grade: reading.grade,
        grade_label: catalog.text(grader.label_key(&reading)),
        colour: reading.grade.colour(),
        interpretation: tactical_interpretation(catalog, reading.grade),
        age_note: age_specific_note(catalog, entry.age()),
        work: suggested_work(catalog, reading.grade),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::{GradeScale, GradeTable, StepPrecision};
    use crate::roster::{NewEntry, RecordStore};
    use chrono::{TimeZone, Utc};
    use insta::assert_json_snapshot;

    fn setup(scale: GradeScale, locale: &str) -> (Grader, AdviceCatalog) {
        let grader = Grader::new(GradeTable::builtin().unwrap(), scale);
        (grader, AdviceCatalog::builtin(locale).unwrap())
    }

    fn entry(first: &str, age: i32, sex: &str, step: f64) -> AthleteEntry {
        let mut store = RecordStore::new();
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 18, 30, 0).unwrap();
        store
            .add_at(&NewEntry::new(first, "Dupont", age, sex, step), StepPrecision::Half, at)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_male_22_step_10_end_to_end() {
        let (grader, catalog) = setup(GradeScale::Five, "fr-FR");
        let bundle = analyse(&grader, &catalog, &entry("Marc", 22, "M", 10.0));

        assert_eq!(bundle.band.label(), "20-24");
        assert_eq!(bundle.raw_grade, RawGrade::Bon);
        assert_eq!(bundle.grade, Grade::Good);
        assert_eq!(bundle.grade_label, "Bon");
        assert_eq!(bundle.colour, "#dcfce7");
        assert_eq!(
            bundle.interpretation.summary,
            "Bon niveau pour l'assaut : volume de travail stable et capacité à relancer."
        );
        assert_eq!(bundle.age_note.title, "Spécificité 20-34 ans");
        assert_eq!(bundle.work.len(), 8);
        assert_eq!(bundle.identity.sex_label, "Masculin");
    }

    #[test]
    fn test_female_16_step_7_row() {
        let (grader, catalog) = setup(GradeScale::Five, "en-US");
        let row = table_row(&grader, &catalog, &entry("Lina", 16, "F", 7.0));
        assert_eq!(row.band.label(), "15-19");
        assert_eq!(row.grade, Grade::Average);
        assert_eq!(row.grade_label, "Average");
        assert_eq!(row.entry_date, "2025-03-14 18:30");
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let (grader, catalog) = setup(GradeScale::Five, "fr-FR");
        let athlete = entry("Lina", 41, "F", 11.5);
        let first = serde_json::to_string(&analyse(&grader, &catalog, &athlete)).unwrap();
        let second = serde_json::to_string(&analyse(&grader, &catalog, &athlete)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_undetermined_flows_through() {
        let table = GradeTable::from_yaml_str(
            "name: partial\nfirst_step: 7\ngrades:\n  M:\n    \"15-19\": [Faible]\n",
        )
        .unwrap();
        let grader = Grader::new(table, GradeScale::Five);
        let catalog = AdviceCatalog::builtin("en-US").unwrap();
        let bundle = analyse(&grader, &catalog, &entry("Lina", 30, "F", 10.0));
        assert_eq!(bundle.grade, Grade::Undetermined);
        assert_eq!(bundle.grade_label, "-");
        assert_eq!(bundle.colour, "#e5e7eb");
        assert_eq!(bundle.interpretation.summary, "Level not determined.");
        assert!(bundle.work.is_empty());
    }

    #[test]
    fn test_analysis_digest_snapshot() {
        let (grader, catalog) = setup(GradeScale::Six, "en-US");
        let bundle = analyse(&grader, &catalog, &entry("Noé", 58, "M", 14.0));
        let work: Vec<&str> = bundle.work.iter().map(|w| w.code.as_str()).collect();
        assert_json_snapshot!(serde_json::json!({
            "age_title": bundle.age_note.title,
            "band": bundle.band,
            "grade": bundle.grade,
            "grade_label": bundle.grade_label,
            "raw_grade": bundle.raw_grade,
            "work": work,
        }), @r###"
        {
          "age_title": "Ages 45-60",
          "band": "55-60",
          "grade": "excellent",
          "grade_label": "Elite",
          "raw_grade": "Elite+",
          "work": [
            "assault-interval",
            "footwork",
            "surges",
            "quality-over-volume",
            "recovery"
          ]
        }
        "###);
    }
}
