//! # Fixed Primitives
//!
//! Hardcoded constants for the talent core.
//!
//! These values are compiled into the binary and are immutable at runtime.

/// Readiness score for "Ready Now" in the average readiness KPI.
pub const READY_NOW_SCORE: u32 = 3;

/// Readiness score for "1-3 Years".
pub const ONE_TO_THREE_YEARS_SCORE: u32 = 2;

/// Readiness score for "More than 3 Years".
pub const MORE_THAN_THREE_YEARS_SCORE: u32 = 1;

/// Number of employees shown in the dashboard's top performers table.
pub const DEFAULT_TOP_PERFORMERS: usize = 5;

/// Number of names previewed per 9-box cell before "+N more".
pub const GRID_PREVIEW_NAMES: usize = 2;

/// Prefix of employee ids assigned at intake.
pub const EMPLOYEE_ID_PREFIX: &str = "E";

/// Zero-padded width of the numeric part of an employee id.
pub const EMPLOYEE_ID_WIDTH: usize = 3;

/// Prefix of user ids assigned when an account is provisioned.
pub const USER_ID_PREFIX: &str = "user-";

/// Default `last3YearsPerformance` assigned to new hires.
pub const DEFAULT_LAST_3_YEARS_PERFORMANCE: u8 = 3;

/// Job category assigned at intake when none is supplied.
pub const DEFAULT_JOB_CATEGORY: &str = "Management";

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a free-text field (names, titles, roles, comments).
pub const MAX_TEXT_LENGTH: usize = 1024;

/// Maximum number of employee plus user records accepted from one snapshot.
pub const MAX_SNAPSHOT_RECORDS: usize = 100_000;

/// Column headers of the employee CSV export, in fixed order.
pub const CSV_HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Job Title",
    "Grade",
    "Direction",
    "Department",
    "Performance",
    "Potential",
    "Risk",
    "Readiness",
    "Next Role",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_scores_descend() {
        assert!(READY_NOW_SCORE > ONE_TO_THREE_YEARS_SCORE);
        assert!(ONE_TO_THREE_YEARS_SCORE > MORE_THAN_THREE_YEARS_SCORE);
    }

    #[test]
    fn csv_header_has_eleven_columns() {
        assert_eq!(CSV_HEADERS.len(), 11);
        assert_eq!(CSV_HEADERS[0], "ID");
        assert_eq!(CSV_HEADERS[10], "Next Role");
    }
}
