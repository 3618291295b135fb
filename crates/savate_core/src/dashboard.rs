//! Dashboard session
//!
//! Ties the grade table, the wording catalogue and one record store together.
//! Every read recomputes the derived view from the store, so the output only
//! depends on the entries and the query.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::advice::{AdviceCatalog, DEFAULT_LOCALE};
use crate::analysis::{analyse, table_row, AnalysisBundle, TableRow};
use crate::config::DashboardConfig;
use crate::error::{EntryError, Result};
use crate::export::{
    csv_file_name, export_csv, layout_report, pdf_file_name, render_pdf, CsvLayout, ReportHeader,
};
use crate::grading::{GradeTable, Grader};
use crate::roster::{AthleteEntry, EntryId, NewEntry, RecordStore, RosterSummary, ENTRY_DATE_FORMAT};

/// Everything shown on screen for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: RosterSummary,
    pub summary_mean_step: String,
    pub rows: Vec<TableRow>,
    pub analysis: Option<AnalysisBundle>,
}

/// A rendered file ready to hand to the coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    grader: Grader,
    catalog: AdviceCatalog,
    store: RecordStore,
}

impl Dashboard {
    pub fn new(mut config: DashboardConfig) -> Result<Self> {
        config.validate()?;

        let table = match &config.grade_table_path {
            Some(path) => GradeTable::load(path)?,
            None => GradeTable::builtin()?,
        };

        let mut catalog = AdviceCatalog::builtin(DEFAULT_LOCALE)?;
        if let Some(dir) = &config.locales_dir {
            catalog.load_from_dir(dir)?;
        }
        config.locale = catalog.select_locale(&config.locale)?;

        info!(
            "Dashboard ready: table '{}', scale {:?}, locale {}",
            table.name(),
            config.grade_scale,
            config.locale
        );
        Ok(Self {
            grader: Grader::new(table, config.grade_scale),
            catalog,
            config,
            store: RecordStore::new(),
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DashboardConfig::default())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn grader(&self) -> &Grader {
        &self.grader
    }

    pub fn catalog(&self) -> &AdviceCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Switch wording; `locale` is negotiated against the loaded catalogues.
    pub fn set_locale(&mut self, locale: &str) -> Result<()> {
        self.config.locale = self.catalog.select_locale(locale)?;
        Ok(())
    }

    pub fn submit(&mut self, submission: &NewEntry) -> std::result::Result<EntryId, EntryError> {
        self.submit_at(submission, Utc::now())
    }

    pub fn submit_at(
        &mut self,
        submission: &NewEntry,
        created_at: DateTime<Utc>,
    ) -> std::result::Result<EntryId, EntryError> {
        self.store
            .add_at(submission, self.config.step_precision, created_at)
            .map(|entry| entry.id())
    }

    /// Coach-facing wording of a rejected submission.
    pub fn entry_error_message(&self, err: &EntryError) -> String {
        match err.value() {
            Some(value) => self.catalog.text_with(err.message_key(), "value", value),
            None => self.catalog.text(err.message_key()),
        }
    }

    pub fn remove(&mut self, id: EntryId) -> Option<AthleteEntry> {
        self.store.remove(id)
    }

    pub fn rows(&self, query: &str) -> Vec<TableRow> {
        self.store
            .filter(query)
            .into_iter()
            .map(|entry| table_row(&self.grader, &self.catalog, entry))
            .collect()
    }

    pub fn summary(&self) -> RosterSummary {
        RosterSummary::compute(self.store.entries())
    }

    /// Entry shown in the analysis panel: `selected` when it is visible under
    /// `query`, otherwise the first visible entry.
    pub fn selected_entry(&self, query: &str, selected: Option<EntryId>) -> Option<&AthleteEntry> {
        let visible = self.store.filter(query);
        let chosen = selected
            .and_then(|id| visible.iter().find(|e| e.id() == id).copied())
            .or_else(|| visible.first().copied());
        if let (Some(id), Some(entry)) = (selected, chosen) {
            if entry.id() != id {
                debug!("Selected entry {} not visible, analysing {}", id, entry.id());
            }
        }
        chosen
    }

    pub fn analysis(&self, query: &str, selected: Option<EntryId>) -> Option<AnalysisBundle> {
        self.selected_entry(query, selected)
            .map(|entry| analyse(&self.grader, &self.catalog, entry))
    }

    pub fn view(&self, query: &str, selected: Option<EntryId>) -> DashboardView {
        let summary = self.summary();
        DashboardView {
            summary_mean_step: summary.mean_step_display(),
            summary,
            rows: self.rows(query),
            analysis: self.analysis(query, selected),
        }
    }

    pub fn export_csv(&self, query: &str, layout: CsvLayout, date: NaiveDate) -> Result<ExportedFile> {
        let bytes = export_csv(&self.rows(query), layout, &self.catalog)?;
        Ok(ExportedFile { file_name: csv_file_name(&self.config.club_name, date), bytes })
    }

    fn report_header(&self, generated_at: DateTime<Utc>) -> ReportHeader {
        ReportHeader {
            title: self
                .config
                .report_title
                .clone()
                .unwrap_or_else(|| self.catalog.text("report-title")),
            subtitle: self.catalog.text_with("report-subtitle", "club", &self.config.club_name),
            generated_at: generated_at.format(ENTRY_DATE_FORMAT).to_string(),
        }
    }

    /// PDF sheet of one analysis bundle.
    pub fn report_pdf(
        &self,
        bundle: &AnalysisBundle,
        generated_at: DateTime<Utc>,
    ) -> Result<ExportedFile> {
        let header = self.report_header(generated_at);
        let pages = layout_report(bundle, &self.catalog, &header, &self.config.report);
        let bytes = render_pdf(&pages, &self.config.report)?;
        let file_name = pdf_file_name(
            bundle.identity.last_name.as_deref(),
            &bundle.identity.first_name,
            generated_at.date_naive(),
        );
        Ok(ExportedFile { file_name, bytes })
    }

    /// PDF sheet of the analysed entry, `None` when nothing is visible.
    pub fn export_pdf(
        &self,
        query: &str,
        selected: Option<EntryId>,
        generated_at: DateTime<Utc>,
    ) -> Result<Option<ExportedFile>> {
        match self.analysis(query, selected) {
            Some(bundle) => self.report_pdf(&bundle, generated_at).map(Some),
            None => Ok(None),
        }
    }
}
