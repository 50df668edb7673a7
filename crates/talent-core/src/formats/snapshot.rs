//! # Snapshot Format
//!
//! JSON representation of a roster: `{ "employees": [...], "users": [...] }`.
//!
//! Field names follow the dashboard's record shape (`jobTitle`,
//! `evolutionPotential`, `restrictedToSections`, ...). Loading validates
//! every record: ratings outside 1..=3, unknown capability keys, blank
//! required fields and duplicate ids are all rejected.

use crate::roster::Roster;
use crate::{Employee, TalentError, User};
use serde::Deserialize;

/// Maximum accepted snapshot size in bytes (64 MB).
///
/// Checked before parsing.
pub const MAX_SNAPSHOT_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Deserialize)]
struct SnapshotDocument {
    #[serde(default)]
    employees: Vec<Employee>,
    #[serde(default)]
    users: Vec<User>,
}

/// Parse and validate a JSON snapshot.
pub fn snapshot_from_json(bytes: &[u8]) -> Result<Roster, TalentError> {
    if bytes.len() > MAX_SNAPSHOT_BYTES {
        return Err(TalentError::DeserializationError(format!(
            "Snapshot size {} bytes exceeds maximum allowed {} bytes",
            bytes.len(),
            MAX_SNAPSHOT_BYTES
        )));
    }

    let document: SnapshotDocument = serde_json::from_slice(bytes)
        .map_err(|e| TalentError::DeserializationError(e.to_string()))?;

    Roster::from_records(document.employees, document.users)
}

/// Serialize a roster as pretty-printed JSON.
pub fn snapshot_to_json(roster: &Roster) -> Result<Vec<u8>, TalentError> {
    serde_json::to_vec_pretty(roster).map_err(|e| TalentError::SerializationError(e.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "employees": [{
            "id": "E001",
            "name": "Mona Said",
            "jobTitle": "Financial Analyst",
            "jobGrade": "G2",
            "direction": "Finance",
            "department": "Planning",
            "jobCategory": "Professional",
            "performance": 3,
            "evolutionPotential": 2,
            "riskOfLoss": "Medium",
            "impactOfLoss": "High",
            "readiness": "1-3 Years",
            "nextRole": "Finance Manager",
            "last3YearsPerformance": 3,
            "assessmentHistory": []
        }],
        "users": []
    }"#;

    #[test]
    fn parses_dashboard_record_shape() {
        let roster = snapshot_from_json(SNAPSHOT.as_bytes()).expect("valid snapshot");
        assert_eq!(roster.employees().len(), 1);
        let employee = &roster.employees()[0];
        assert_eq!(employee.job_title, "Financial Analyst");
        assert_eq!(employee.category().name(), "Core Employees");
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let bad = SNAPSHOT.replace("\"performance\": 3", "\"performance\": 4");
        let err = snapshot_from_json(bad.as_bytes()).expect_err("rating 4");
        assert!(matches!(err, TalentError::DeserializationError(_)));
        assert!(err.to_string().contains("Invalid rating: 4"));
    }

    #[test]
    fn rejects_unknown_direction() {
        let bad = SNAPSHOT.replace("\"direction\": \"Finance\"", "\"direction\": \"Legal\"");
        assert!(snapshot_from_json(bad.as_bytes()).is_err());
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let roster = snapshot_from_json(b"{}").expect("empty document");
        assert!(roster.employees().is_empty());
        assert!(roster.users().is_empty());
    }

    #[test]
    fn written_snapshot_loads_back() {
        let roster = snapshot_from_json(SNAPSHOT.as_bytes()).expect("valid");
        let bytes = snapshot_to_json(&roster).expect("serialize");
        let reloaded = snapshot_from_json(&bytes).expect("reload");
        assert_eq!(reloaded, roster);
    }
}
