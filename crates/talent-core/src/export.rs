//! # Export Module
//!
//! Employee table export as CSV.
//!
//! One row per employee in a fixed column order (see `CSV_HEADERS`).
//! Fields containing commas, quotes or line breaks are quoted per RFC 4180,
//! so free-text values such as `"Sales, North"` survive a round trip through
//! spreadsheet tools.

use crate::primitives::CSV_HEADERS;
use crate::{Employee, TalentError};
use chrono::NaiveDate;

/// Render employees as CSV with a header row. Records end in `\n`.
pub fn employees_to_csv(employees: &[Employee]) -> Result<String, TalentError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| TalentError::SerializationError(e.to_string()))?;

    for employee in employees {
        let performance = employee.performance.to_string();
        let potential = employee.evolution_potential.to_string();
        writer
            .write_record([
                employee.id.as_str(),
                employee.name.as_str(),
                employee.job_title.as_str(),
                employee.job_grade.name(),
                employee.direction.name(),
                employee.department.as_str(),
                performance.as_str(),
                potential.as_str(),
                employee.risk_of_loss.name(),
                employee.readiness.name(),
                employee.next_role.as_str(),
            ])
            .map_err(|e| TalentError::SerializationError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TalentError::SerializationError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TalentError::SerializationError(e.to_string()))
}

/// Download name for an export taken on `date`.
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("employees_{}.csv", date.format("%Y-%m-%d"))
}

// =============================================================================
// TESTS
// =============================================================================
