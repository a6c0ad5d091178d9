//! CSV report export
//!
//! Serializes billed readings into the spreadsheet report handed to the user
//! for download. The document opens cleanly in common spreadsheet tools:
//! it starts with a UTF-8 byte-order mark so Thai names survive, quotes every
//! free-text field, and leaves the numeric columns bare.

use std::io::Write;

use tracing::info;

use crate::config::DateLocale;
use crate::error::{BillingError, BillingResult};
use crate::models::BillingPeriod;
use crate::services::billing::{format_quantity, BilledReading};

/// UTF-8 byte-order mark
pub const BOM: char = '\u{FEFF}';

/// Column labels of the report, in order
pub const REPORT_HEADER: [&str; 8] = [
    "Date",
    "Room",
    "Student ID(s)",
    "Tenant(s)",
    "Type",
    "Meter Reading",
    "Usage",
    "Total Cost",
];

/// Placeholder for absent optional text
const MISSING: &str = "-";

/// A finished report and the name it should be saved under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

/// Suggested file name for a report of the given period
pub fn report_file_name(period: Option<&BillingPeriod>) -> String {
    match period {
        Some(period) => format!("report_{}.csv", period),
        None => "report_all.csv".to_string(),
    }
}

/// Build the report document for the selected rows
///
/// Rows are written in the order given. Rows with a usage anomaly are written
/// as computed, negative usage and cost included, so the sheet still shows
/// the entry that needs correcting. An empty selection is rejected with
/// [`BillingError::EmptyExport`] instead of producing a header-only file.
pub fn export_report_csv(
    rows: &[&BilledReading],
    period: Option<&BillingPeriod>,
    locale: DateLocale,
) -> BillingResult<ExportDocument> {
    if rows.is_empty() {
        return Err(BillingError::EmptyExport {
            period: period
                .map(|p| p.to_string())
                .unwrap_or_else(|| "all periods".to_string()),
        });
    }

    let mut buffer = Vec::new();
    write_report_csv(rows, locale, &mut buffer)?;
    let content = String::from_utf8(buffer)
        .map_err(|e| BillingError::Export(format!("Report is not valid UTF-8: {}", e)))?;

    let file_name = report_file_name(period);
    info!(file_name = %file_name, rows = rows.len(), "report exported");

    Ok(ExportDocument { file_name, content })
}

/// Write the report (BOM, header, one line per row) to a writer
pub fn write_report_csv<W: Write>(
    rows: &[&BilledReading],
    locale: DateLocale,
    writer: &mut W,
) -> BillingResult<()> {
    writeln!(writer, "{}{}", BOM, REPORT_HEADER.join(","))
        .map_err(|e| BillingError::Export(e.to_string()))?;

    for row in rows {
        let reading = &row.reading;
        let fields = [
            quote(&locale.format_date(&reading.created_at)),
            quote(&reading.room_number),
            quote(reading.student_ids.as_deref().unwrap_or(MISSING)),
            quote(reading.tenant_names.as_deref().unwrap_or(MISSING)),
            quote(reading.meter_type.label()),
            quote(&row.meter_span()),
            format_quantity(row.usage),
            row.total_cost.to_string(),
        ];

        writeln!(writer, "{}", fields.join(","))
            .map_err(|e| BillingError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Wrap a free-text field in quotes, doubling embedded quotes
fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeterReading, MeterType, RateConfig};
    use crate::services::billing::bill_reading;
    use chrono::DateTime;

    fn billed(id: &str, room: &str, previous: f64, current: f64) -> BilledReading {
        let mut r = MeterReading::new(
            id,
            room,
            MeterType::Water,
            current,
            DateTime::parse_from_rfc3339("2024-05-03T09:00:00+07:00").unwrap(),
        );
        r.previous_reading = Some(previous);
        r.tenant_count = 3;
        bill_reading(&r, &RateConfig::default())
    }

    fn lines(doc: &ExportDocument) -> Vec<&str> {
        doc.content.lines().collect()
    }

    #[test]
    fn test_header_and_bom() {
        let row = billed("1", "101", 100.0, 120.0);
        let period = BillingPeriod::parse("2024-05").unwrap();
        let doc = export_report_csv(&[&row], Some(&period), DateLocale::Thai).unwrap();

        assert_eq!(doc.file_name, "report_2024-05.csv");
        assert!(doc.content.starts_with('\u{FEFF}'));
        assert_eq!(
            lines(&doc)[0].trim_start_matches(BOM),
            "Date,Room,Student ID(s),Tenant(s),Type,Meter Reading,Usage,Total Cost"
        );
    }

    #[test]
    fn test_row_format() {
        let mut row = billed("1", "101", 100.0, 120.0);
        row.reading.student_ids = Some("6501, 6502".into());
        row.reading.tenant_names = Some("Somchai \"Chai\" Dee".into());

        let doc = export_report_csv(&[&row], None, DateLocale::Thai).unwrap();
        assert_eq!(
            lines(&doc)[1],
            "\"3/5/2567\",\"101\",\"6501, 6502\",\"Somchai \"\"Chai\"\" Dee\",\"Water\",\"100 - 120\",20,340.00"
        );
    }

    #[test]
    fn test_missing_text_uses_dash() {
        let row = billed("1", "202", 5.0, 7.5);
        let doc = export_report_csv(&[&row], None, DateLocale::Iso).unwrap();
        assert_eq!(
            lines(&doc)[1],
            "\"2024-05-03\",\"202\",\"-\",\"-\",\"Water\",\"5 - 7.5\",2.5,42.50"
        );
    }

    #[test]
    fn test_negative_usage_exported_as_recorded() {
        let row = billed("1", "202", 90.0, 80.0);
        assert!(row.is_anomalous());

        let doc = export_report_csv(&[&row], None, DateLocale::Iso).unwrap();
        assert_eq!(
            lines(&doc)[1],
            "\"2024-05-03\",\"202\",\"-\",\"-\",\"Water\",\"90 - 80\",-10,-170.00"
        );
    }

    #[test]
    fn test_rows_keep_order() {
        let a = billed("1", "303", 0.0, 1.0);
        let b = billed("2", "101", 0.0, 2.0);
        let doc = export_report_csv(&[&a, &b], None, DateLocale::Iso).unwrap();
        let body = lines(&doc);
        assert_eq!(body.len(), 3);
        assert!(body[1].contains("\"303\""));
        assert!(body[2].contains("\"101\""));
    }

    #[test]
    fn test_empty_export_rejected() {
        let period = BillingPeriod::parse("2024-07").unwrap();
        let err = export_report_csv(&[], Some(&period), DateLocale::Thai).unwrap_err();
        assert!(matches!(err, BillingError::EmptyExport { ref period } if period == "2024-07"));
        assert!(err.is_validation_notice());
    }

    #[test]
    fn test_file_names() {
        assert_eq!(report_file_name(None), "report_all.csv");
        let period = BillingPeriod::parse("2025-01").unwrap();
        assert_eq!(report_file_name(Some(&period)), "report_2025-01.csv");
    }
}
