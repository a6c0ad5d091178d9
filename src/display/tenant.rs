//! Tenant display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Tenant;

#[derive(Tabled)]
struct TenantRow<'a> {
    #[tabled(rename = "ID")]
    id: &'a str,
    #[tabled(rename = "Room")]
    room: &'a str,
    #[tabled(rename = "Student ID")]
    student_id: &'a str,
    #[tabled(rename = "Name")]
    name: &'a str,
}

/// Format a list of tenants as a table
pub fn format_tenant_list(tenants: &[Tenant]) -> String {
    if tenants.is_empty() {
        return "No tenants found.".to_string();
    }

    let rows = tenants.iter().map(|t| TenantRow {
        id: t.id.as_str(),
        room: &t.room_number,
        student_id: if t.student_id.is_empty() { "-" } else { &t.student_id },
        name: &t.name,
    });

    Table::new(rows).with(Style::psql()).to_string()
}
