// Individual athlete sheet: block order and spacing
use crate::advice::AdviceCatalog;
use crate::analysis::AnalysisBundle;
use crate::config::ReportConfig;

use super::layout::{mm, truncate_chars, Font, Page, PageWriter};

const TITLE_PT: f64 = 16.0;
const HEADING_PT: f64 = 12.0;
const FOOTER_PT: f64 = 8.0;
const FOOTER_Y_MM: f64 = 12.0;

/// Texts printed above and below the athlete blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub title: String,
    pub subtitle: String,
    /// Already formatted generation time
    pub generated_at: String,
}

pub fn layout_report(
    bundle: &AnalysisBundle,
    catalog: &AdviceCatalog,
    header: &ReportHeader,
    config: &ReportConfig,
) -> Vec<Page> {
    let mut w = PageWriter::new(config);
    let body = config.body_font_pt;
    let full_width = w.right() - w.left();

    // Header
    w.down_mm(6.0);
    w.text(0.0, Font::Bold, TITLE_PT, &header.title);
    w.down_mm(7.0);
    w.text(0.0, Font::Regular, body, &header.subtitle);
    w.down_mm(13.0);

    // Identity
    let identity = &bundle.identity;
    w.text(0.0, Font::Bold, HEADING_PT, &catalog.text("report-identity"));
    w.down_mm(8.0);
    let lines = [
        ("field-last-name", identity.last_name.clone().unwrap_or_default()),
        ("field-first-name", identity.first_name.clone()),
        ("field-entry-date", identity.entry_date.clone()),
        ("field-age", identity.age.to_string()),
        ("field-sex", identity.sex_label.clone()),
        ("field-band", bundle.band.label()),
        ("report-step", identity.step.to_string()),
        ("report-level", bundle.grade_label.clone()),
    ];
    for (key, value) in lines {
        w.text(0.0, Font::Regular, body, &format!("{}: {}", catalog.text(key), value));
        w.down_mm(5.0);
    }
    w.down_mm(4.0);

    // Interpretation
    w.text(0.0, Font::Bold, HEADING_PT, &catalog.text("report-interpretation"));
    w.down_mm(7.0);
    let interpretation = &bundle.interpretation;
    let blocks = [
        ("heading-summary", &interpretation.summary),
        ("heading-caution", &interpretation.caution),
        ("heading-priority", &interpretation.training_priority),
    ];
    for (i, (key, text)) in blocks.into_iter().enumerate() {
        w.text(0.0, Font::Bold, body, &catalog.text(key));
        w.down_mm(5.0);
        w.paragraph(0.0, full_width, text);
        w.down_mm(if i + 1 == blocks.len() { 4.0 } else { 2.0 });
    }

    // Age note
    w.ensure_space(config.section_min_space_mm);
    w.text(0.0, Font::Bold, HEADING_PT, &catalog.text("report-age"));
    w.down_mm(7.0);
    w.text(0.0, Font::Bold, body, &bundle.age_note.title);
    w.down_mm(5.0);
    w.paragraph(0.0, full_width, &bundle.age_note.note);
    w.down_mm(4.0);

    // Suggested work
    w.ensure_space(config.section_min_space_mm);
    w.text(0.0, Font::Bold, HEADING_PT, &catalog.text("report-work"));
    w.down_mm(7.0);
    if bundle.work.is_empty() {
        w.text(0.0, Font::Regular, body, &catalog.text("no-work"));
        w.down_mm(5.0);
    } else {
        let detail_dx = mm(config.detail_column_mm);
        let detail_width = full_width - detail_dx;
        work_table_header(&mut w, catalog, detail_dx);
        for item in &bundle.work {
            if w.ensure_space(config.row_min_space_mm) {
                work_table_header(&mut w, catalog, detail_dx);
            }
            w.text(0.0, Font::Regular, body, &truncate_chars(&item.label, config.label_max_chars));
            w.paragraph(detail_dx, detail_width, &item.detail);
            w.down_mm(2.0);
        }
    }

    // Footer on the last page
    let left = w.left();
    w.text_at(
        left,
        mm(FOOTER_Y_MM),
        Font::Regular,
        FOOTER_PT,
        &catalog.text_with("report-generated", "timestamp", &header.generated_at),
    );

    w.finish()
}

fn work_table_header(w: &mut PageWriter<'_>, catalog: &AdviceCatalog, detail_dx: f64) {
    let body = w.config().body_font_pt;
    w.text(0.0, Font::Bold, body, &catalog.text("report-work-label"));
    w.text(detail_dx, Font::Bold, body, &catalog.text("report-work-detail"));
    w.down_mm(4.0);
    w.rule();
    w.down_mm(5.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyse;
    use crate::export::layout::DrawOp;
    use crate::grading::{GradeScale, GradeTable, Grader, StepPrecision};
    use crate::roster::{NewEntry, RecordStore};

    fn bundle(catalog: &AdviceCatalog, age: i32, step: f64) -> AnalysisBundle {
        let grader = Grader::new(GradeTable::builtin().unwrap(), GradeScale::Five);
        let mut store = RecordStore::new();
        let entry = store
            .add(&NewEntry::new("Lina", "Dupont", age, "F", step), StepPrecision::Whole)
            .unwrap();
        analyse(&grader, catalog, entry)
    }

    fn header() -> ReportHeader {
        ReportHeader {
            title: "Fiche individuelle - Test Luc Léger".to_string(),
            subtitle: "CBF Montmorency - Synthèse d'évaluation".to_string(),
            generated_at: "2025-03-14 18:30".to_string(),
        }
    }

    fn all_texts(pages: &[Page]) -> Vec<String> {
        pages.iter().flat_map(|p| p.texts().map(str::to_string)).collect()
    }

    #[test]
    fn test_sheet_contains_every_block() {
        let catalog = AdviceCatalog::builtin("fr-FR").unwrap();
        let bundle = bundle(&catalog, 22, 10.0);
        let pages = layout_report(&bundle, &catalog, &header(), &ReportConfig::default());
        let texts = all_texts(&pages);

        assert!(texts.contains(&"Informations tireur".to_string()));
        assert!(texts.contains(&"Prénom: Lina".to_string()));
        assert!(texts.contains(&"Spécificité 20-34 ans".to_string()));
        assert!(texts.contains(&"Application".to_string()));
        for item in &bundle.work {
            assert!(texts.contains(&item.label), "{}", item.label);
        }
        let last = pages.last().unwrap();
        assert!(last.texts().any(|t| t == "Généré le 2025-03-14 18:30"));
    }

    #[test]
    fn test_long_work_table_repeats_header() {
        let catalog = AdviceCatalog::builtin("fr-FR").unwrap();
        let mut bundle = bundle(&catalog, 22, 11.0);
        let template = bundle.work[0].clone();
        bundle.work = vec![template; 40];
        let pages = layout_report(&bundle, &catalog, &header(), &ReportConfig::default());

        assert!(pages.len() >= 2);
        for page in &pages[1..] {
            assert!(page.texts().any(|t| t == "Application"));
        }
        // every row stays above the bottom margin
        let bottom = mm(ReportConfig::default().margin_mm) - 1e-6;
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, size, .. } = op {
                    if *size >= 10.0 {
                        assert!(*y >= bottom, "text at {} below margin", y);
                    }
                }
            }
        }
    }

    #[test]
    fn test_labels_truncated() {
        let catalog = AdviceCatalog::builtin("fr-FR").unwrap();
        let mut bundle = bundle(&catalog, 22, 10.0);
        bundle.work[0].label = "x".repeat(80);
        let pages = layout_report(&bundle, &catalog, &header(), &ReportConfig::default());
        let texts = all_texts(&pages);
        assert!(texts.contains(&"x".repeat(45)));
        assert!(!texts.contains(&"x".repeat(80)));
    }

    #[test]
    fn test_undetermined_prints_no_work_line() {
        let catalog = AdviceCatalog::builtin("en-US").unwrap();
        let mut bundle = bundle(&catalog, 22, 10.0);
        bundle.work.clear();
        let pages = layout_report(&bundle, &catalog, &header(), &ReportConfig::default());
        assert!(all_texts(&pages).contains(&"No recommendation available.".to_string()));
    }
}
