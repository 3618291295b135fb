//! Savate CLI
//!
//! Luc Léger dashboard from the command line: grade a single result, list a
//! roster, print one athlete's analysis, export CSV or the PDF sheet.

mod roster_file;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use savate_core::{
    AnalysisBundle, CsvLayout, Dashboard, DashboardConfig, EntryId, ExportedFile, Sex, Step,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "savate")]
#[command(about = "Luc Léger step-test grading and coaching sheets", long_about = None)]
struct Cli {
    /// Dashboard config (YAML); defaults to $SAVATE_CONFIG, then built-in values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Wording locale (fr-FR, en-US)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RosterArgs {
    /// Roster file (.json or .csv)
    roster: PathBuf,

    /// Free-text filter over name, age, sex and step
    #[arg(long, default_value = "")]
    filter: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single result
    Grade {
        #[arg(long)]
        sex: String,
        #[arg(long, allow_negative_numbers = true)]
        age: i32,
        #[arg(long)]
        step: f64,
    },

    /// List the roster with head figures
    List {
        #[command(flatten)]
        roster: RosterArgs,
    },

    /// Analysis of one visible athlete
    Analyse {
        #[command(flatten)]
        roster: RosterArgs,

        /// Position in the visible list (0 = most recent)
        #[arg(long)]
        index: Option<usize>,

        /// Print the analysis as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Export the visible rows as CSV
    ExportCsv {
        #[command(flatten)]
        roster: RosterArgs,

        /// Localized column names with last name and entry date
        #[arg(long, default_value = "false")]
        localized: bool,

        /// Output file or directory
        #[arg(long)]
        out: PathBuf,
    },

    /// Export one athlete's PDF sheet
    ExportPdf {
        #[command(flatten)]
        roster: RosterArgs,

        #[arg(long)]
        index: Option<usize>,

        /// Output file or directory
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env("SAVATE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();

    let mut dashboard = build_dashboard(cli.config.as_deref(), cli.locale.as_deref())?;

    match cli.command {
        Commands::Grade { sex, age, step } => handle_grade(&dashboard, &sex, age, step),
        Commands::List { roster } => {
            roster_file::load_roster(&mut dashboard, &roster.roster)?;
            handle_list(&dashboard, &roster.filter);
            Ok(())
        }
        Commands::Analyse { roster, index, json } => {
            roster_file::load_roster(&mut dashboard, &roster.roster)?;
            let bundle = dashboard
                .analysis(&roster.filter, select(&dashboard, &roster.filter, index)?)
                .ok_or_else(|| anyhow!(dashboard.catalog().text("empty-roster")))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&bundle)?);
            } else {
                print_analysis(&dashboard, &bundle);
            }
            Ok(())
        }
        Commands::ExportCsv { roster, localized, out } => {
            roster_file::load_roster(&mut dashboard, &roster.roster)?;
            let layout = if localized { CsvLayout::Localized } else { CsvLayout::Plain };
            let file = dashboard.export_csv(&roster.filter, layout, Utc::now().date_naive())?;
            write_export(&file, &out)
        }
        Commands::ExportPdf { roster, index, out } => {
            roster_file::load_roster(&mut dashboard, &roster.roster)?;
            let selected = select(&dashboard, &roster.filter, index)?;
            let file = dashboard
                .export_pdf(&roster.filter, selected, Utc::now())?
                .ok_or_else(|| anyhow!(dashboard.catalog().text("empty-roster")))?;
            write_export(&file, &out)
        }
    }
}

fn build_dashboard(config_path: Option<&Path>, locale: Option<&str>) -> Result<Dashboard> {
    let mut config = match config_path {
        Some(path) => DashboardConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DashboardConfig::from_env_or_default(),
    };
    if let Some(locale) = locale {
        config.locale = locale.to_string();
    }
    Dashboard::new(config).context("Failed to set up the dashboard")
}

/// Entry id of the `index`-th visible row.
fn select(dashboard: &Dashboard, filter: &str, index: Option<usize>) -> Result<Option<EntryId>> {
    let Some(index) = index else {
        return Ok(None);
    };
    let rows = dashboard.rows(filter);
    match rows.get(index) {
        Some(row) => Ok(Some(row.id)),
        None => bail!("No visible row at index {} ({} visible)", index, rows.len()),
    }
}

fn handle_grade(dashboard: &Dashboard, sex: &str, age: i32, step: f64) -> Result<()> {
    let sex: Sex = sex.parse().map_err(|err| anyhow!(dashboard.entry_error_message(&err)))?;
    if !step.is_finite() {
        bail!("Step must be a number");
    }
    let step = Step::from_value(step, dashboard.config().step_precision);
    let grader = dashboard.grader();
    let reading = grader.read(sex, age, step);
    let catalog = dashboard.catalog();

    println!("{}: {}", catalog.text("field-band"), reading.band);
    println!("{}: {}", catalog.text("field-step"), step);
    println!("Raw: {}", reading.raw);
    println!("{}: {}", catalog.text("field-level"), catalog.text(grader.label_key(&reading)));
    Ok(())
}

fn handle_list(dashboard: &Dashboard, filter: &str) {
    let catalog = dashboard.catalog();
    let summary = dashboard.summary();
    println!(
        "{}: {}  {}: {}  {}: {}  {}: {}",
        catalog.text("kpi-participants"),
        summary.participants,
        catalog.text("kpi-male"),
        summary.male,
        catalog.text("kpi-female"),
        summary.female,
        catalog.text("kpi-mean-step"),
        summary.mean_step_display()
    );

    let rows = dashboard.rows(filter);
    if rows.is_empty() {
        println!("{}", catalog.text("empty-roster"));
        return;
    }
    println!();
    println!(
        "{:<3} {:<16} {:<16} {:>4} {:<4} {:>6} {:<12} {}",
        "#",
        catalog.text("field-last-name"),
        catalog.text("field-first-name"),
        catalog.text("field-age"),
        catalog.text("field-sex"),
        catalog.text("field-step"),
        catalog.text("field-level"),
        catalog.text("field-entry-date")
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:<3} {:<16} {:<16} {:>4} {:<4} {:>6} {:<12} {}",
            i,
            row.last_name.as_deref().unwrap_or(""),
            row.first_name,
            row.age,
            row.sex,
            row.step.to_string(),
            row.grade_label,
            row.entry_date
        );
    }
}

fn print_analysis(dashboard: &Dashboard, bundle: &AnalysisBundle) {
    let catalog = dashboard.catalog();
    let identity = &bundle.identity;
    println!(
        "{} {} - {} - {} {} - {} - {} {}",
        identity.last_name.as_deref().unwrap_or(""),
        identity.first_name,
        identity.age,
        catalog.text("field-band"),
        bundle.band,
        identity.sex_label,
        catalog.text("field-step"),
        identity.step
    );
    println!("{}: {}", catalog.text("field-level"), bundle.grade_label);

    println!("\n## {}", catalog.text("report-interpretation"));
    println!("{}: {}", catalog.text("heading-summary"), bundle.interpretation.summary);
    println!("{}: {}", catalog.text("heading-caution"), bundle.interpretation.caution);
    println!("{}: {}", catalog.text("heading-priority"), bundle.interpretation.training_priority);

    println!("\n## {}", catalog.text("report-age"));
    println!("{}", bundle.age_note.title);
    println!("{}", bundle.age_note.note);

    println!("\n## {}", catalog.text("report-work"));
    if bundle.work.is_empty() {
        println!("{}", catalog.text("no-work"));
    }
    for item in &bundle.work {
        println!("- {}: {}", item.label, item.detail);
    }
}

/// Write to `out`, or into `out` under the export's own name when it is a directory.
fn write_export(file: &ExportedFile, out: &Path) -> Result<()> {
    let path = if out.is_dir() { out.join(&file.file_name) } else { out.to_path_buf() };
    fs::write(&path, &file.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} ({} bytes)", path.display(), file.bytes.len());
    println!("{}", path.display());
    Ok(())
}
