// Exports of the current view: roster CSV and the per-athlete PDF sheet

pub mod csv;
pub mod filename;
pub mod layout;
pub mod pdf;
pub mod report;

pub use self::csv::{export_csv, CsvLayout, PLAIN_HEADER};
pub use filename::{csv_file_name, pdf_file_name, slugify};
pub use layout::{DrawOp, Font, Page, PageWriter};
pub use pdf::render_pdf;
pub use report::{layout_report, ReportHeader};
