// Dashboard JSON API: one request in, one envelope out
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::analysis::{AnalysisBundle, TableRow};
use crate::dashboard::Dashboard;
use crate::export::CsvLayout;
use crate::roster::{EntryId, NewEntry, RosterSummary};
use crate::SCHEMA_VERSION;

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    pub schema_version: u8,
    pub request_type: DashboardRequestType,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum DashboardRequestType {
    /// Submit a test result
    AddEntry { entry: NewEntry },

    RemoveEntry { id: String },

    /// Visible rows for a filter, with the head figures
    ListEntries {
        #[serde(default)]
        query: String,
    },

    /// Analysis panel; `id` is ignored when hidden by the filter
    Analyse {
        #[serde(default)]
        id: Option<String>,
        #[serde(default)]
        query: String,
    },

    Summary,

    ExportCsv {
        #[serde(default)]
        query: String,
        #[serde(default)]
        localized: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub schema_version: u8,
    pub success: bool,
    pub response: Option<DashboardResponseType>,
    pub error_message: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum DashboardResponseType {
    EntryAdded { id: EntryId, row: Option<TableRow>, message: String },

    EntryRemoved { id: EntryId, removed: bool },

    Entries { rows: Vec<TableRow>, summary: RosterSummary, mean_step: String },

    Analysis { bundle: Option<AnalysisBundle>, empty_message: Option<String> },

    Summary { summary: RosterSummary, mean_step: String },

    Csv { file_name: String, content: String },
}

impl DashboardResponse {
    fn ok(response: DashboardResponseType) -> Self {
        Self { schema_version: SCHEMA_VERSION, success: true, response: Some(response), error_message: None }
    }

    fn error(message: String) -> Self {
        Self { schema_version: SCHEMA_VERSION, success: false, response: None, error_message: Some(message) }
    }
}

fn parse_id(id: &str) -> Result<EntryId, String> {
    id.parse().map_err(|e| format!("Invalid entry id '{}': {}", id, e))
}

fn dispatch(
    dashboard: &mut Dashboard,
    request_type: DashboardRequestType,
) -> Result<DashboardResponseType, String> {
    match request_type {
        DashboardRequestType::AddEntry { entry } => match dashboard.submit(&entry) {
            Ok(id) => {
                let row = dashboard.rows("").into_iter().find(|row| row.id == id);
                Ok(DashboardResponseType::EntryAdded {
                    id,
                    row,
                    message: dashboard.catalog().text("entry-added"),
                })
            }
            Err(err) => Err(dashboard.entry_error_message(&err)),
        },

        DashboardRequestType::RemoveEntry { id } => {
            let id = parse_id(&id)?;
            let removed = dashboard.remove(id).is_some();
            Ok(DashboardResponseType::EntryRemoved { id, removed })
        }

        DashboardRequestType::ListEntries { query } => {
            let summary = dashboard.summary();
            Ok(DashboardResponseType::Entries {
                rows: dashboard.rows(&query),
                mean_step: summary.mean_step_display(),
                summary,
            })
        }

        DashboardRequestType::Analyse { id, query } => {
            let selected = id.as_deref().map(parse_id).transpose()?;
            let bundle = dashboard.analysis(&query, selected);
            let empty_message =
                bundle.is_none().then(|| dashboard.catalog().text("empty-roster"));
            Ok(DashboardResponseType::Analysis { bundle, empty_message })
        }

        DashboardRequestType::Summary => {
            let summary = dashboard.summary();
            Ok(DashboardResponseType::Summary { mean_step: summary.mean_step_display(), summary })
        }

        DashboardRequestType::ExportCsv { query, localized } => {
            let layout = if localized { CsvLayout::Localized } else { CsvLayout::Plain };
            let file = dashboard
                .export_csv(&query, layout, Utc::now().date_naive())
                .map_err(|e| format!("CSV export failed: {}", e))?;
            let content = String::from_utf8(file.bytes)
                .map_err(|e| format!("CSV export is not UTF-8: {}", e))?;
            Ok(DashboardResponseType::Csv { file_name: file.file_name, content })
        }
    }
}

/// Handle one JSON request against `dashboard`.
///
/// Always answers with an envelope; failures set `success: false` and carry a
/// message instead of a response.
pub fn handle_request_json(dashboard: &mut Dashboard, request_json: &str) -> String {
    let response = match serde_json::from_str::<DashboardRequest>(request_json) {
        Err(e) => DashboardResponse::error(format!("Invalid JSON request: {}", e)),
        Ok(request) if request.schema_version != SCHEMA_VERSION => DashboardResponse::error(
            format!("Unsupported schema version: {}", request.schema_version),
        ),
        Ok(request) => {
            debug!("Dashboard request {:?}", request.request_type);
            match dispatch(dashboard, request.request_type) {
                Ok(response_type) => DashboardResponse::ok(response_type),
                Err(message) => {
                    warn!("Dashboard request rejected: {}", message);
                    DashboardResponse::error(message)
                }
            }
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        json!({
            "schema_version": SCHEMA_VERSION,
            "success": false,
            "response": null,
            "error_message": format!("Failed to serialize response: {}", e),
        })
        .to_string()
    })
}
