//! Integration tests for CLI commands against a temporary snapshot.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};
use talent::cli::{
    AssessmentArgs, Cli, Commands, cmd_add_employee, cmd_add_user, cmd_assess, cmd_dashboard,
    cmd_delete_user, cmd_edit_employee, cmd_export_csv, cmd_grid, cmd_set_permission, cmd_users,
    load_roster,
};
use talent::config::{FileConfig, LogFormat, Settings};
use talent_core::{
    Capability, Direction, EmployeeDraft, EmployeeId, EmployeeUpdate, JobGrade, Rating, Readiness,
    RiskLevel, Role, TalentError,
};
use tempfile::TempDir;

const SAMPLE_SNAPSHOT: &str = include_str!("../../../demos/snapshot.json");

/// Copy the sample snapshot into a fresh temp directory.
fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, SAMPLE_SNAPSHOT).unwrap();
    (dir, path)
}

fn settings(snapshot: &Path, user: Option<&str>) -> Settings {
    Settings {
        snapshot: snapshot.to_path_buf(),
        acting_user: user.map(str::to_string),
        log_format: LogFormat::Text,
        top_performers: 5,
        config_file: None,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn draft(direction: Direction) -> EmployeeDraft {
    EmployeeDraft {
        name: "Laila Mostafa".to_string(),
        job_title: "Data Analyst".to_string(),
        job_grade: JobGrade::G1,
        direction,
        department: "Data".to_string(),
        job_category: None,
        performance: Rating::MEDIUM,
        evolution_potential: Rating::HIGH,
        risk_of_loss: RiskLevel::Low,
        impact_of_loss: RiskLevel::Low,
        readiness: Readiness::OneToThreeYears,
        next_role: "Senior Data Analyst".to_string(),
    }
}

/// Have hr1 grant `capability` to `username`.
fn grant(path: &Path, username: &str, capability: Capability) {
    cmd_set_permission(&settings(path, Some("hr1")), false, username, capability, true, None)
        .unwrap();
}

fn assessment() -> AssessmentArgs {
    AssessmentArgs {
        performance: Rating::HIGH,
        potential: Rating::MEDIUM,
        risk: RiskLevel::Low,
        impact: RiskLevel::High,
        readiness: Readiness::ReadyNow,
        next_role: "Operations Director".to_string(),
    }
}

// =============================================================================
// VIEW COMMANDS
// =============================================================================

#[test]
fn test_sample_snapshot_loads() {
    let (_dir, path) = setup();
    let roster = load_roster(&path).unwrap();
    assert_eq!(roster.employees().len(), 8);
    assert_eq!(roster.users().len(), 4);
}

#[test]
fn test_views_run_for_anonymous_and_restricted_users() {
    let (_dir, path) = setup();
    cmd_dashboard(&settings(&path, None), false, None).unwrap();
    cmd_dashboard(&settings(&path, Some("manager1")), true, Some(2)).unwrap();
    cmd_grid(&settings(&path, Some("manager2")), false).unwrap();
}

#[test]
fn test_unknown_acting_user_rejected() {
    let (_dir, path) = setup();
    let result = cmd_dashboard(&settings(&path, Some("ghost")), false, None);
    assert!(matches!(result, Err(TalentError::UserNotFound(name)) if name == "ghost"));
}

#[test]
fn test_missing_snapshot_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = cmd_dashboard(&settings(&dir.path().join("absent.json"), None), false, None);
    assert!(matches!(result, Err(TalentError::IoError(_))));
}

// =============================================================================
// EXPORT
// =============================================================================

#[test]
fn test_export_requires_capability() {
    let (dir, path) = setup();
    let result = cmd_export_csv(
        &settings(&path, Some("manager1")),
        Some(dir.path()),
        Some(date(2025, 6, 30)),
    );
    assert!(matches!(
        result,
        Err(TalentError::PermissionDenied { ref capability, .. }) if capability == "canExportReportsToPDF"
    ));
}

#[test]
fn test_export_without_user_denied() {
    let (dir, path) = setup();
    let result = cmd_export_csv(&settings(&path, None), Some(dir.path()), Some(date(2025, 6, 30)));
    assert!(matches!(result, Err(TalentError::PermissionDenied { ref user, .. }) if user == "anonymous"));
}

#[test]
fn test_export_writes_dated_file() {
    let (dir, path) = setup();
    cmd_export_csv(&settings(&path, Some("hr1")), Some(dir.path()), Some(date(2025, 6, 30))).unwrap();

    let csv = std::fs::read_to_string(dir.path().join("employees_2025-06-30.csv")).unwrap();
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ID,Name,Job Title,Grade,Direction,Department,Performance,Potential,Risk,Readiness,Next Role")
    );
    assert_eq!(lines.count(), 8);
}

#[test]
fn test_export_to_directory_defaults_to_today() {
    let (dir, path) = setup();
    cmd_export_csv(&settings(&path, Some("hr1")), Some(dir.path()), None).unwrap();

    let exported: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("employees_"))
        .collect();
    assert_eq!(exported.len(), 1);

    let stamp = exported[0]
        .strip_prefix("employees_")
        .and_then(|rest| rest.strip_suffix(".csv"))
        .unwrap();
    assert!(NaiveDate::parse_from_str(stamp, "%Y-%m-%d").is_ok());
}

// =============================================================================
// ASSESSMENTS AND EMPLOYEES
// =============================================================================

#[test]
fn test_assess_writes_output_and_keeps_source() {
    let (dir, path) = setup();
    let output = dir.path().join("assessed.json");

    cmd_assess(
        &settings(&path, Some("manager1")),
        false,
        "E001",
        assessment(),
        Some(date(2025, 6, 30)),
        "Strong year".to_string(),
        Some(output.as_path()),
    )
    .unwrap();

    let updated = load_roster(&output).unwrap();
    let employee = updated.employee(&EmployeeId::new("E001")).unwrap();
    assert_eq!(employee.evolution_potential, Rating::MEDIUM);
    assert_eq!(employee.assessment_history.len(), 1);
    assert_eq!(employee.assessment_history[0].assessed_by, "manager1");

    let original = load_roster(&path).unwrap();
    let untouched = original.employee(&EmployeeId::new("E001")).unwrap();
    assert!(untouched.assessment_history.is_empty());
}

#[test]
fn test_assess_outside_section_denied() {
    let (_dir, path) = setup();
    let result = cmd_assess(
        &settings(&path, Some("manager1")),
        false,
        "E003",
        assessment(),
        Some(date(2025, 6, 30)),
        String::new(),
        None,
    );
    assert!(matches!(result, Err(TalentError::PermissionDenied { .. })));
}

#[test]
fn test_assess_unknown_employee() {
    let (_dir, path) = setup();
    let result = cmd_assess(
        &settings(&path, Some("hr1")),
        false,
        "E999",
        assessment(),
        Some(date(2025, 6, 30)),
        String::new(),
        None,
    );
    assert!(matches!(result, Err(TalentError::EmployeeNotFound(_))));
}

#[test]
fn test_assess_without_date_is_dated_today() {
    let (_dir, path) = setup();
    let before = chrono::Local::now().date_naive();
    cmd_assess(
        &settings(&path, Some("manager1")),
        true,
        "E002",
        assessment(),
        None,
        String::new(),
        None,
    )
    .unwrap();
    let after = chrono::Local::now().date_naive();

    let roster = load_roster(&path).unwrap();
    let record = &roster.employee(&EmployeeId::new("E002")).unwrap().assessment_history[0];
    assert!(record.assessed_on >= before && record.assessed_on <= after);
}

#[test]
fn test_add_employee_assigns_next_id() {
    let (_dir, path) = setup();
    let draft = draft(Direction::It);

    cmd_add_employee(&settings(&path, Some("hr1")), false, draft.clone(), None).unwrap();

    let roster = load_roster(&path).unwrap();
    let added = roster.employee(&EmployeeId::new("E009")).unwrap();
    assert_eq!(added.job_category, "Management");
    assert_eq!(added.last_3_years_performance, 3);

    let denied = cmd_add_employee(&settings(&path, Some("manager1")), false, draft, None);
    assert!(matches!(denied, Err(TalentError::PermissionDenied { .. })));
}

#[test]
fn test_edit_employee_changes_direction() {
    let (_dir, path) = setup();
    let update = EmployeeUpdate {
        direction: Some(Direction::Finance),
        ..EmployeeUpdate::default()
    };
    cmd_edit_employee(&settings(&path, Some("hr1")), true, "E002", update, None).unwrap();

    let roster = load_roster(&path).unwrap();
    let employee = roster.employee(&EmployeeId::new("E002")).unwrap();
    assert_eq!(employee.direction, Direction::Finance);
}

#[test]
fn test_add_employee_outside_section_denied() {
    let (_dir, path) = setup();
    grant(&path, "manager1", Capability::AddEmployees);
    let manager = settings(&path, Some("manager1"));

    let denied = cmd_add_employee(&manager, false, draft(Direction::It), None);
    assert!(matches!(
        denied,
        Err(TalentError::PermissionDenied { ref user, .. }) if user == "manager1"
    ));
    assert_eq!(load_roster(&path).unwrap().employees().len(), 8);

    cmd_add_employee(&manager, false, draft(Direction::Operations), None).unwrap();
    assert_eq!(load_roster(&path).unwrap().employees().len(), 9);
}

#[test]
fn test_edit_employee_outside_section_denied() {
    let (_dir, path) = setup();
    grant(&path, "manager1", Capability::EditEmployeeData);
    let manager = settings(&path, Some("manager1"));

    // E003 is in Finance; manager1 only covers Operations
    let pull_in = EmployeeUpdate {
        name: Some("Renamed".to_string()),
        direction: Some(Direction::Operations),
        ..EmployeeUpdate::default()
    };
    let denied = cmd_edit_employee(&manager, false, "E003", pull_in, None);
    assert!(matches!(denied, Err(TalentError::PermissionDenied { .. })));

    let roster = load_roster(&path).unwrap();
    let untouched = roster.employee(&EmployeeId::new("E003")).unwrap();
    assert_eq!(untouched.direction, Direction::Finance);
    assert_ne!(untouched.name, "Renamed");
}

#[test]
fn test_edit_employee_cannot_move_out_of_section() {
    let (_dir, path) = setup();
    grant(&path, "manager1", Capability::EditEmployeeData);
    let manager = settings(&path, Some("manager1"));

    let push_out = EmployeeUpdate {
        direction: Some(Direction::Finance),
        ..EmployeeUpdate::default()
    };
    let denied = cmd_edit_employee(&manager, false, "E002", push_out, None);
    assert!(matches!(denied, Err(TalentError::PermissionDenied { .. })));

    let rename = EmployeeUpdate {
        job_title: Some("Shift Supervisor".to_string()),
        ..EmployeeUpdate::default()
    };
    cmd_edit_employee(&manager, false, "E002", rename, None).unwrap();
    let roster = load_roster(&path).unwrap();
    let employee = roster.employee(&EmployeeId::new("E002")).unwrap();
    assert_eq!(employee.job_title, "Shift Supervisor");
    assert_eq!(employee.direction, Direction::Operations);
}

// =============================================================================
// USERS
// =============================================================================

#[test]
fn test_grant_then_export_succeeds() {
    let (dir, path) = setup();
    grant(&path, "manager1", Capability::ExportReports);

    cmd_export_csv(
        &settings(&path, Some("manager1")),
        Some(dir.path().join("ops.csv").as_path()),
        None,
    )
    .unwrap();

    // manager1 only sees Operations
    let csv = std::fs::read_to_string(dir.path().join("ops.csv")).unwrap();
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_manager_cannot_manage_users() {
    let (_dir, path) = setup();
    let result = cmd_set_permission(
        &settings(&path, Some("manager1")),
        false,
        "manager2",
        Capability::ManageUsers,
        true,
        None,
    );
    assert!(matches!(result, Err(TalentError::PermissionDenied { .. })));
    assert!(matches!(
        cmd_users(&settings(&path, Some("manager1")), false, ""),
        Err(TalentError::PermissionDenied { .. })
    ));
}

#[test]
fn test_delete_user() {
    let (_dir, path) = setup();
    cmd_delete_user(&settings(&path, Some("hr1")), true, "manager3", None).unwrap();

    let roster = load_roster(&path).unwrap();
    assert!(roster.user_by_username("manager3").is_none());
    assert_eq!(roster.users().len(), 3);

    let again = cmd_delete_user(&settings(&path, Some("hr1")), false, "manager3", None);
    assert!(matches!(again, Err(TalentError::UserNotFound(_))));
}

#[test]
fn test_add_user_seeds_role_preset() {
    let (_dir, path) = setup();
    let hr = settings(&path, Some("hr1"));
    cmd_add_user(
        &hr,
        false,
        "manager4".to_string(),
        "IT Manager".to_string(),
        "manager4@example.com".to_string(),
        Direction::It,
        Role::Manager,
        None,
    )
    .unwrap();

    let roster = load_roster(&path).unwrap();
    assert_eq!(roster.users().len(), 5);
    let added = roster.user_by_username("manager4").unwrap();
    assert_eq!(added.id.as_str(), "user-5");
    assert_eq!(added.department, "IT");
    assert!(added.can(Capability::AssessEmployees));
    assert!(!added.can(Capability::ManageUsers));
    assert!(added.covers_direction(Direction::It));
    assert!(!added.covers_direction(Direction::Finance));
    assert!(added.created_date.is_some());
    assert!(added.role_matches_policy());
}

#[test]
fn test_add_user_rejects_duplicate_username() {
    let (_dir, path) = setup();
    let result = cmd_add_user(
        &settings(&path, Some("hr1")),
        false,
        "manager1".to_string(),
        "Second Manager".to_string(),
        "other@example.com".to_string(),
        Direction::Finance,
        Role::Manager,
        None,
    );
    assert!(matches!(result, Err(TalentError::DuplicateId(name)) if name == "manager1"));
    assert_eq!(load_roster(&path).unwrap().users().len(), 4);
}

#[test]
fn test_add_user_requires_manage_users() {
    let (_dir, path) = setup();
    let result = cmd_add_user(
        &settings(&path, Some("manager2")),
        false,
        "intruder".to_string(),
        "Intruder".to_string(),
        "intruder@example.com".to_string(),
        Direction::Hr,
        Role::Hr,
        None,
    );
    assert!(matches!(result, Err(TalentError::PermissionDenied { .. })));
}

// =============================================================================
// ARGUMENT PARSING AND CONFIG
// =============================================================================

#[test]
fn test_parse_grant_command() {
    let cli = Cli::try_parse_from(["talent", "--as", "hr1", "grant", "manager1", "canManageUsers"])
        .unwrap();
    assert_eq!(cli.acting_user.as_deref(), Some("hr1"));
    match cli.command {
        Some(Commands::Grant { username, capability, .. }) => {
            assert_eq!(username, "manager1");
            assert_eq!(capability, Capability::ManageUsers);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_parse_rejects_unknown_capability_and_bad_rating() {
    assert!(Cli::try_parse_from(["talent", "grant", "manager1", "canFly"]).is_err());
    assert!(
        Cli::try_parse_from([
            "talent", "assess", "E001", "-p", "4", "-t", "2", "-r", "Low", "-i", "Low", "-R",
            "Ready Now", "-n", "Lead", "--date", "2025-06-30",
        ])
        .is_err()
    );
}

#[test]
fn test_parse_date_flags() {
    let cli = Cli::try_parse_from(["talent", "export-csv", "--date", "2025-06-30"]).unwrap();
    match cli.command {
        Some(Commands::ExportCsv { date: parsed, .. }) => assert_eq!(parsed, Some(date(2025, 6, 30))),
        other => panic!("unexpected command: {:?}", other),
    }

    assert!(Cli::try_parse_from(["talent", "export-csv", "--date", "yesterday"]).is_err());
    assert!(
        Cli::try_parse_from([
            "talent", "assess", "E001", "-p", "3", "-t", "2", "-r", "Low", "-i", "Low", "-R",
            "Ready Now", "-n", "Lead", "--date", "30/06/2025",
        ])
        .is_err()
    );
}

#[test]
fn test_parse_add_user_command() {
    let cli = Cli::try_parse_from([
        "talent", "add-user", "manager4", "--full-name", "IT Manager", "--email",
        "m4@example.com", "-d", "IT", "-r", "Manager",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::AddUser { username, department, role, .. }) => {
            assert_eq!(username, "manager4");
            assert_eq!(department, Direction::It);
            assert_eq!(role, Role::Manager);
        }
        other => panic!("unexpected command: {:?}", other),
    }
}

#[test]
fn test_config_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("talent.toml");
    std::fs::write(&path, "snapshot = \"data/snap.json\"\ntop_performers = 10\n").unwrap();

    let file = FileConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(file.snapshot, Some(PathBuf::from("data/snap.json")));
    assert_eq!(file.top_performers, Some(10));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let result = FileConfig::load(Some(dir.path().join("missing.toml").as_path()));
    assert!(matches!(result, Err(TalentError::IoError(_))));
}
