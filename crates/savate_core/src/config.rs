//! Dashboard configuration
//!
//! One YAML document per deployment. Every field has a default, so an empty
//! file is a valid configuration.
//!
//! ```yaml
//! locale: en-US
//! grade_scale: six
//! step_precision: half
//! club_name: CBF Montmorency
//! report:
//!   section_min_space_mm: 60
//! ```
//!
//! ## Environment Variables
//!
//! - `SAVATE_CONFIG`: path of the YAML file read by [`DashboardConfig::from_env_or_default`]

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::advice::DEFAULT_LOCALE;
use crate::error::CoreError;
use crate::grading::{GradeScale, StepPrecision};

pub const CONFIG_ENV_VAR: &str = "SAVATE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub locale: String,
    pub grade_scale: GradeScale,
    pub step_precision: StepPrecision,
    pub club_name: String,
    /// Replaces the catalogue's report title when set
    pub report_title: Option<String>,
    /// Another club's grade table instead of the built-in one
    pub grade_table_path: Option<PathBuf>,
    /// Directory of `<locale>.ftl` files overriding the built-in wording
    pub locales_dir: Option<PathBuf>,
    pub report: ReportConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            grade_scale: GradeScale::default(),
            step_precision: StepPrecision::default(),
            club_name: "CBF Montmorency".to_string(),
            report_title: None,
            grade_table_path: None,
            locales_dir: None,
            report: ReportConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&content)?;
        info!("Loaded dashboard config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, CoreError> {
        // serde_yaml reads an empty document as unit, not as an empty map
        let config: Self =
            if yaml.trim().is_empty() { Self::default() } else { serde_yaml::from_str(yaml)? };
        config.validate()?;
        Ok(config)
    }

    /// File named by `SAVATE_CONFIG`, or the defaults when unset or unreadable.
    pub fn from_env_or_default() -> Self {
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => match Self::load(Path::new(&path)) {
                Ok(config) => config,
                Err(err) => {
                    warn!("Ignoring {}={}: {}", CONFIG_ENV_VAR, path, err);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.locale.trim().is_empty() {
            return Err(CoreError::Config("locale must not be empty".to_string()));
        }
        self.report.validate()
    }
}

/// PDF page geometry and pagination thresholds, in millimetres and points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub margin_mm: f64,
    /// Space needed below the cursor before a new section starts
    pub section_min_space_mm: f64,
    /// Space needed below the cursor before a new work row starts
    pub row_min_space_mm: f64,
    /// Offset of the detail column in the work table
    pub detail_column_mm: f64,
    pub body_font_pt: f64,
    pub leading_pt: f64,
    /// Work labels longer than this are cut
    pub label_max_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        // A4
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 18.0,
            section_min_space_mm: 70.0,
            row_min_space_mm: 25.0,
            detail_column_mm: 70.0,
            body_font_pt: 10.0,
            leading_pt: 12.0,
            label_max_chars: 45,
        }
    }
}

impl ReportConfig {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.page_width_mm <= 2.0 * self.margin_mm || self.page_height_mm <= 2.0 * self.margin_mm
        {
            return Err(CoreError::Config("report margins leave no printable area".to_string()));
        }
        if self.margin_mm < 0.0 || self.body_font_pt <= 0.0 || self.leading_pt <= 0.0 {
            return Err(CoreError::Config(
                "report margin, font size and leading must be positive".to_string(),
            ));
        }
        if self.detail_column_mm <= 0.0
            || self.detail_column_mm >= self.page_width_mm - 2.0 * self.margin_mm
        {
            return Err(CoreError::Config(
                "report detail column must fall inside the printable width".to_string(),
            ));
        }
        let top = self.page_height_mm - self.margin_mm;
        for (name, value) in [
            ("section_min_space_mm", self.section_min_space_mm),
            ("row_min_space_mm", self.row_min_space_mm),
        ] {
            if !(0.0..=top).contains(&value) {
                return Err(CoreError::Config(format!(
                    "report {} must lie between 0 and {} mm",
                    name, top
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.locale, "fr-FR");
        assert_eq!(config.grade_scale, GradeScale::Five);
        assert_eq!(config.step_precision, StepPrecision::Whole);
        assert_eq!(config.report.margin_mm, 18.0);
        assert_eq!(config.report.section_min_space_mm, 70.0);
        assert_eq!(config.report.row_min_space_mm, 25.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = DashboardConfig::from_yaml_str(
            "locale: en-US\ngrade_scale: six\nstep_precision: half\nreport:\n  margin_mm: 20\n",
        )
        .unwrap();
        assert_eq!(config.locale, "en-US");
        assert_eq!(config.grade_scale, GradeScale::Six);
        assert_eq!(config.step_precision, StepPrecision::Half);
        assert_eq!(config.report.margin_mm, 20.0);
        assert_eq!(config.report.leading_pt, 12.0);
        assert_eq!(config.club_name, "CBF Montmorency");
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DashboardConfig::from_yaml_str("").unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_invalid_report_rejected() {
        let err = DashboardConfig::from_yaml_str("report:\n  margin_mm: 200\n").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(DashboardConfig::from_yaml_str("grade_scale: seven").is_err());
    }

    #[test]
    fn test_pagination_thresholds_must_fit_the_page() {
        let report = ReportConfig { section_min_space_mm: -5.0, ..ReportConfig::default() };
        assert!(matches!(report.validate(), Err(CoreError::Config(_))));
        let report = ReportConfig { row_min_space_mm: 300.0, ..ReportConfig::default() };
        assert!(report.validate().is_err());
        // 297 - 18
        let report = ReportConfig { section_min_space_mm: 279.0, ..ReportConfig::default() };
        assert!(report.validate().is_ok());
        assert!(DashboardConfig::from_yaml_str("report:\n  row_min_space_mm: 280\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savate.yaml");
        std::fs::write(&path, "club_name: Savate Club Test\n").unwrap();
        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.club_name, "Savate Club Test");
        assert!(DashboardConfig::load(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_serialization() {
        let config = DashboardConfig::default();
        let yaml = serde_yaml::to_string(&config).expect("Should serialize");
        let parsed = DashboardConfig::from_yaml_str(&yaml).expect("Should deserialize");
        assert_eq!(parsed, config);
    }
}
