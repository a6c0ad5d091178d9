//! Reading display formatting
//!
//! Renders billed readings as a terminal table followed by a totals block.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::services::billing::{format_quantity, BilledReading, BillingSummary};

const MISSING: &str = "-";

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Room")]
    room: String,
    #[tabled(rename = "Student ID(s)")]
    student_ids: String,
    #[tabled(rename = "Tenant(s)")]
    tenants: String,
    #[tabled(rename = "Type")]
    meter_type: String,
    #[tabled(rename = "Meter")]
    meter: String,
    #[tabled(rename = "Usage")]
    usage: String,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Per Tenant")]
    per_tenant: String,
    #[tabled(rename = "Recorder")]
    recorder: String,
    #[tabled(rename = "Photo")]
    photo: String,
}

impl ReadingRow {
    fn from_billed(row: &BilledReading, settings: &Settings) -> Self {
        let reading = &row.reading;
        let symbol = settings.currency_symbol.as_str();

        let usage = if row.is_anomalous() {
            format!("{} !", format_quantity(row.usage))
        } else {
            format!("+{}", format_quantity(row.usage))
        };

        let per_tenant = format!(
            "{} x{}",
            row.per_tenant_cost.format_with_symbol(symbol),
            reading.tenant_count
        );

        Self {
            date: settings.date_locale.format_date(&reading.created_at),
            room: reading.room_number.clone(),
            student_ids: text_or_dash(reading.student_ids.as_deref()),
            tenants: text_or_dash(reading.tenant_names.as_deref()),
            meter_type: reading.meter_type.label().to_string(),
            meter: row.meter_span(),
            usage,
            total: row.total_cost.format_with_symbol(symbol),
            per_tenant,
            recorder: text_or_dash(reading.recorder_name.as_deref()),
            photo: if reading.image_url.is_some() { "yes" } else { "" }.to_string(),
        }
    }
}

fn text_or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => MISSING.to_string(),
    }
}

/// Format billed readings as a table
pub fn format_reading_table(rows: &[BilledReading], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No readings found.".to_string();
    }

    let table_rows: Vec<ReadingRow> = rows
        .iter()
        .map(|row| ReadingRow::from_billed(row, settings))
        .collect();

    Table::new(table_rows).with(Style::psql()).to_string()
}

/// Format the totals block and one warning line per anomalous row
pub fn format_summary(summary: &BillingSummary, rows: &[BilledReading], settings: &Settings) -> String {
    let symbol = settings.currency_symbol.as_str();
    let mut output = String::new();

    output.push_str(&format!("Readings:        {}\n", summary.row_count));
    output.push_str(&format!(
        "Water:           {} units  {}\n",
        format_quantity(summary.water_usage),
        summary.water_cost.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Electric:        {} units  {}\n",
        format_quantity(summary.electric_usage),
        summary.electric_cost.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Total:           {}\n",
        summary.grand_total().format_with_symbol(symbol)
    ));

    for row in rows {
        if let Some(anomaly) = &row.anomaly {
            output.push_str(&format!(
                "Warning: room {} {} reading {} has {}; excluded from totals\n",
                row.reading.room_number,
                row.reading.meter_type.label().to_lowercase(),
                row.reading.id,
                anomaly
            ));
        }
    }

    output
}
