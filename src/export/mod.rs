//! Export module for dorm-billing
//!
//! Produces the downloadable billing report. Delivery (saving the file,
//! triggering a download) is up to the caller; this module only builds the
//! payload and its suggested name.

pub mod csv;

pub use csv::{export_report_csv, report_file_name, write_report_csv, ExportDocument, REPORT_HEADER};
