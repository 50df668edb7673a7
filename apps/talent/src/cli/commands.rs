//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.
//!
//! Commands that mutate the snapshot or export data check the acting user's
//! capability before doing anything and fail with `PermissionDenied`.
//! Read-only views are filtered to the acting user's sections.

use super::AssessmentArgs;
use crate::config::Settings;
use crate::report;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use talent_core::aggregator::talent_view_summary;
use talent_core::formats::MAX_SNAPSHOT_BYTES;
use talent_core::{
    AssessmentRecord, Capability, Dashboard, DashboardContext, Direction, Employee, EmployeeDraft,
    EmployeeId, EmployeeUpdate, NineBoxGrid, Permissions, Role, Roster, TalentError, User,
    UserUpdate, classify, employees_to_csv, export_file_name, retention_watchlist,
    snapshot_from_json, snapshot_to_json, succession_pipeline,
};

/// Name used in permission errors when no acting user is set.
const ANONYMOUS: &str = "anonymous";

// =============================================================================
// FILE VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), TalentError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| TalentError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(TalentError::DeserializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and ensure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, TalentError> {
    let canonical = path.canonicalize().map_err(|e| {
        TalentError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(TalentError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Canonicalize the parent of an output path and ensure it is a directory.
fn validate_output_path(path: &Path) -> Result<PathBuf, TalentError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        TalentError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(TalentError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| TalentError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

// =============================================================================
// SNAPSHOT I/O
// =============================================================================

/// Load and validate the snapshot file.
pub fn load_roster(path: &Path) -> Result<Roster, TalentError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_SNAPSHOT_BYTES as u64)?;

    let bytes = std::fs::read(&canonical)
        .map_err(|e| TalentError::IoError(format!("Cannot read snapshot: {}", e)))?;
    let roster = snapshot_from_json(&bytes)?;

    tracing::debug!(
        "Loaded snapshot {:?}: {} employees, {} users",
        canonical,
        roster.employees().len(),
        roster.users().len()
    );
    Ok(roster)
}

/// Write the snapshot to `output`, or back to the source file.
pub fn save_roster(
    roster: &Roster,
    settings: &Settings,
    output: Option<&Path>,
) -> Result<PathBuf, TalentError> {
    let target = validate_output_path(output.unwrap_or(&settings.snapshot))?;
    let bytes = snapshot_to_json(roster)?;
    std::fs::write(&target, bytes)
        .map_err(|e| TalentError::IoError(format!("Cannot write snapshot: {}", e)))?;
    tracing::info!("Snapshot written to {:?}", target);
    Ok(target)
}

// =============================================================================
// ACTING USER
// =============================================================================

/// The configured acting user, if any. An unknown username is an error.
fn acting_user<'a>(roster: &'a Roster, settings: &Settings) -> Result<Option<&'a User>, TalentError> {
    match settings.acting_user.as_deref() {
        Some(username) => roster
            .user_by_username(username)
            .map(Some)
            .ok_or_else(|| TalentError::UserNotFound(username.to_string())),
        None => Ok(None),
    }
}

/// Require the acting user to hold `capability`.
fn require<'a>(user: Option<&'a User>, capability: Capability) -> Result<&'a User, TalentError> {
    match user {
        Some(u) if u.can(capability) => Ok(u),
        Some(u) => Err(TalentError::PermissionDenied {
            user: u.username.clone(),
            capability: capability.key().to_string(),
        }),
        None => Err(TalentError::PermissionDenied {
            user: ANONYMOUS.to_string(),
            capability: capability.key().to_string(),
        }),
    }
}

/// Require `user` to be allowed to act on `direction`.
fn require_section(
    user: &User,
    capability: Capability,
    direction: Direction,
) -> Result<(), TalentError> {
    if user.covers_direction(direction) {
        return Ok(());
    }
    Err(TalentError::PermissionDenied {
        user: user.username.clone(),
        capability: format!("{} ({})", capability.key(), direction),
    })
}

/// Local calendar date, used when no `--date` is given.
fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Employees the acting user may see. Everyone without an acting user.
fn visible(roster: &Roster, user: Option<&User>) -> Vec<Employee> {
    match user {
        Some(u) => roster.visible_employees(u).into_iter().cloned().collect(),
        None => roster.employees().to_vec(),
    }
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, TalentError> {
    serde_json::to_value(value).map_err(|e| TalentError::SerializationError(e.to_string()))
}

// =============================================================================
// VIEW COMMANDS
// =============================================================================

/// Show the dashboard.
pub fn cmd_dashboard(
    settings: &Settings,
    json_mode: bool,
    top: Option<usize>,
) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let viewer = acting_user(&roster, settings)?;

    let ctx = DashboardContext::new(roster.employees(), viewer)
        .with_top_n(top.unwrap_or(settings.top_performers));
    let dashboard = Dashboard::build(&ctx);

    if json_mode {
        print_json(&to_json(&dashboard)?);
        return Ok(());
    }
    print!("{}", report::render_dashboard(&dashboard));
    Ok(())
}

/// Show the 9-box grid and summary cards.
pub fn cmd_grid(settings: &Settings, json_mode: bool) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let viewer = acting_user(&roster, settings)?;
    let employees = visible(&roster, viewer);

    let grid = NineBoxGrid::build(&employees);
    let views = talent_view_summary(&employees);

    if json_mode {
        print_json(&serde_json::json!({
            "cells": to_json(&grid.cells)?,
            "summary": to_json(&views)?,
        }));
        return Ok(());
    }
    print!("{}", report::render_grid(&grid, &views));
    Ok(())
}

/// Show the retention watchlist.
pub fn cmd_retention(settings: &Settings, json_mode: bool) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let viewer = acting_user(&roster, settings)?;
    let watchlist = retention_watchlist(&visible(&roster, viewer));

    if json_mode {
        print_json(&to_json(&watchlist)?);
        return Ok(());
    }
    print!("{}", report::render_watchlist(&watchlist));
    Ok(())
}

/// Show the succession pipeline.
pub fn cmd_next_steps(settings: &Settings, json_mode: bool) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let viewer = acting_user(&roster, settings)?;
    let stages = succession_pipeline(&visible(&roster, viewer));

    if json_mode {
        print_json(&to_json(&stages)?);
        return Ok(());
    }
    print!("{}", report::render_pipeline(&stages));
    Ok(())
}

/// Classify one rating pair. Needs no snapshot.
pub fn cmd_classify(json_mode: bool, performance: u8, potential: u8) -> Result<(), TalentError> {
    let category = classify(performance, potential)?;

    if json_mode {
        print_json(&serde_json::json!({
            "performance": performance,
            "potential": potential,
            "category": category.name(),
        }));
        return Ok(());
    }
    println!("{}", category);
    Ok(())
}

/// List employees matching a search.
pub fn cmd_employees(
    settings: &Settings,
    json_mode: bool,
    search: &str,
    direction: Option<Direction>,
) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let viewer = acting_user(&roster, settings)?;

    let matches: Vec<&Employee> = roster
        .search_employees(search, direction)
        .into_iter()
        .filter(|e| viewer.is_none_or(|u| u.covers_direction(e.direction)))
        .collect();

    if json_mode {
        print_json(&to_json(&matches)?);
        return Ok(());
    }
    print!("{}", report::render_employees(&matches));
    Ok(())
}

/// Export visible employees as CSV.
pub fn cmd_export_csv(
    settings: &Settings,
    output: Option<&Path>,
    date: Option<NaiveDate>,
) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    let user = require(acting_user(&roster, settings)?, Capability::ExportReports)?;

    let dated_name = export_file_name(date.unwrap_or_else(today));
    let target = match output {
        Some(path) if path.is_dir() => path.join(dated_name),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(dated_name),
    };
    let target = validate_output_path(&target)?;

    let rows = visible(&roster, Some(user));
    let csv = employees_to_csv(&rows)?;
    std::fs::write(&target, csv)
        .map_err(|e| TalentError::IoError(format!("Cannot write export: {}", e)))?;

    tracing::info!("{} exported {} employees", user.username, rows.len());
    println!("Exported {} employees to {:?}", rows.len(), target);
    Ok(())
}

// =============================================================================
// EMPLOYEE COMMANDS
// =============================================================================

/// Record an assessment and save the snapshot. Dated today unless `date` is given.
pub fn cmd_assess(
    settings: &Settings,
    json_mode: bool,
    id: &str,
    assessment: AssessmentArgs,
    date: Option<NaiveDate>,
    comments: String,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    let id = EmployeeId::new(id);

    let assessor = {
        let user = require(acting_user(&roster, settings)?, Capability::AssessEmployees)?;
        let employee = roster
            .employee(&id)
            .ok_or_else(|| TalentError::EmployeeNotFound(id.clone()))?;
        require_section(user, Capability::AssessEmployees, employee.direction)?;
        user.username.clone()
    };

    let record = AssessmentRecord {
        assessed_by: assessor,
        assessed_on: date.unwrap_or_else(today),
        performance: assessment.performance,
        evolution_potential: assessment.potential,
        risk_of_loss: assessment.risk,
        impact_of_loss: assessment.impact,
        readiness: assessment.readiness,
        next_role: assessment.next_role,
        comments,
    };

    let employee = roster.record_assessment(&id, record)?;
    let category = employee.category();
    tracing::info!("Assessment recorded for {}: {}", id, category);

    let saved = save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&serde_json::json!({
            "id": id.as_str(),
            "category": category.name(),
            "snapshot": saved.to_string_lossy(),
        }));
        return Ok(());
    }
    println!("Assessed {}: {}", id, category);
    Ok(())
}

/// Add an employee and save the snapshot.
pub fn cmd_add_employee(
    settings: &Settings,
    json_mode: bool,
    draft: EmployeeDraft,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    let user = require(acting_user(&roster, settings)?, Capability::AddEmployees)?;
    require_section(user, Capability::AddEmployees, draft.direction)?;

    let id = roster.add_employee(draft)?;
    tracing::info!("Employee {} added", id);

    let saved = save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&serde_json::json!({
            "id": id.as_str(),
            "snapshot": saved.to_string_lossy(),
        }));
        return Ok(());
    }
    println!("Added employee {}", id);
    Ok(())
}

/// Edit descriptive employee fields and save the snapshot.
pub fn cmd_edit_employee(
    settings: &Settings,
    json_mode: bool,
    id: &str,
    update: EmployeeUpdate,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    let id = EmployeeId::new(id);

    {
        let user = require(acting_user(&roster, settings)?, Capability::EditEmployeeData)?;
        let existing = roster
            .employee(&id)
            .ok_or_else(|| TalentError::EmployeeNotFound(id.clone()))?;
        require_section(user, Capability::EditEmployeeData, existing.direction)?;
        if let Some(direction) = update.direction {
            require_section(user, Capability::EditEmployeeData, direction)?;
        }
    }

    let employee = roster.update_employee(&id, update)?.clone();

    save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&to_json(&employee)?);
        return Ok(());
    }
    println!("Updated employee {}", employee.id);
    Ok(())
}

// =============================================================================
// USER COMMANDS
// =============================================================================

/// List user accounts.
pub fn cmd_users(settings: &Settings, json_mode: bool, search: &str) -> Result<(), TalentError> {
    let roster = load_roster(&settings.snapshot)?;
    require(acting_user(&roster, settings)?, Capability::ManageUsers)?;

    let users = roster.search_users(search);
    let by_role = roster.count_by_role();

    if json_mode {
        print_json(&serde_json::json!({
            "users": to_json(&users)?,
            "by_role": to_json(&by_role)?,
        }));
        return Ok(());
    }
    print!("{}", report::render_users(&users, &by_role));
    Ok(())
}

/// Provision a user account with its role's permission preset and save the snapshot.
pub fn cmd_add_user(
    settings: &Settings,
    json_mode: bool,
    username: String,
    full_name: String,
    email: String,
    department: Direction,
    role: Role,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    let actor = require(acting_user(&roster, settings)?, Capability::ManageUsers)?
        .username
        .clone();

    let user = User {
        id: roster.next_user_id(),
        username,
        full_name,
        email,
        department: department.name().to_string(),
        role,
        permissions: Permissions::preset_for(role, department.name()),
        created_date: Some(chrono::Utc::now()),
        last_login: None,
    };
    roster.add_user(user.clone())?;
    tracing::info!("{} added user {} ({})", actor, user.username, user.role);

    let saved = save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&serde_json::json!({
            "user": to_json(&user)?,
            "snapshot": saved.to_string_lossy(),
        }));
        return Ok(());
    }
    println!("Added user {} ({})", user.username, user.id);
    Ok(())
}

/// Edit a user account and save the snapshot.
pub fn cmd_edit_user(
    settings: &Settings,
    json_mode: bool,
    username: &str,
    update: UserUpdate,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    require(acting_user(&roster, settings)?, Capability::ManageUsers)?;

    let id = roster
        .user_by_username(username)
        .map(|u| u.id.clone())
        .ok_or_else(|| TalentError::UserNotFound(username.to_string()))?;
    let user = roster.update_user(&id, update)?.clone();

    save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&to_json(&user)?);
        return Ok(());
    }
    println!("Updated user {}", user.username);
    Ok(())
}

/// Grant or revoke a capability and save the snapshot.
pub fn cmd_set_permission(
    settings: &Settings,
    json_mode: bool,
    username: &str,
    capability: Capability,
    value: bool,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    let actor = require(acting_user(&roster, settings)?, Capability::ManageUsers)?
        .username
        .clone();

    let id = roster
        .user_by_username(username)
        .map(|u| u.id.clone())
        .ok_or_else(|| TalentError::UserNotFound(username.to_string()))?;
    roster.set_permission(&id, capability, value)?;
    tracing::info!(
        "{} set {} = {} for {}",
        actor,
        capability.key(),
        value,
        username
    );

    let saved = save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&serde_json::json!({
            "username": username,
            "capability": capability.key(),
            "granted": value,
            "snapshot": saved.to_string_lossy(),
        }));
        return Ok(());
    }
    let verb = if value { "Granted" } else { "Revoked" };
    println!("{} {} for {}", verb, capability.key(), username);
    Ok(())
}

/// Delete a user account and save the snapshot.
pub fn cmd_delete_user(
    settings: &Settings,
    json_mode: bool,
    username: &str,
    output: Option<&Path>,
) -> Result<(), TalentError> {
    let mut roster = load_roster(&settings.snapshot)?;
    require(acting_user(&roster, settings)?, Capability::ManageUsers)?;

    let id = roster
        .user_by_username(username)
        .map(|u| u.id.clone())
        .ok_or_else(|| TalentError::UserNotFound(username.to_string()))?;
    let removed = roster.delete_user(&id)?;
    tracing::info!("User {} deleted", removed.username);

    let saved = save_roster(&roster, settings, output)?;
    if json_mode {
        print_json(&serde_json::json!({
            "deleted": to_json(&removed)?,
            "snapshot": saved.to_string_lossy(),
        }));
        return Ok(());
    }
    println!("Deleted user {}", removed.username);
    Ok(())
}
