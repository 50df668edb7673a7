//! # Roster Module
//!
//! The in-memory snapshot of employee and user records.
//!
//! - Employees are created by intake, changed by assessments or HR edits,
//!   and never deleted
//! - Users are created, edited, granted/revoked capabilities, and deleted
//! - Every mutation validates before touching the snapshot
//! - Derived views borrow the snapshot; they never mutate it

use crate::aggregator::{Distribution, distribution_by};
use crate::permissions::Capability;
use crate::primitives::{
    DEFAULT_JOB_CATEGORY, DEFAULT_LAST_3_YEARS_PERFORMANCE, EMPLOYEE_ID_PREFIX,
    EMPLOYEE_ID_WIDTH, MAX_SNAPSHOT_RECORDS, MAX_TEXT_LENGTH, USER_ID_PREFIX,
};
use crate::{
    AssessmentRecord, Direction, Employee, EmployeeId, JobGrade, Rating, Readiness, RiskLevel,
    Role, TalentError, User, UserId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// INPUT SHAPES
// =============================================================================

/// HR intake form for a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub name: String,
    pub job_title: String,
    pub job_grade: JobGrade,
    pub direction: Direction,
    pub department: String,
    #[serde(default)]
    pub job_category: Option<String>,
    pub performance: Rating,
    pub evolution_potential: Rating,
    pub risk_of_loss: RiskLevel,
    pub impact_of_loss: RiskLevel,
    pub readiness: Readiness,
    pub next_role: String,
}

/// HR edit of descriptive employee fields. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub job_grade: Option<JobGrade>,
    pub direction: Option<Direction>,
    pub department: Option<String>,
    pub job_category: Option<String>,
    pub next_role: Option<String>,
}

/// Edit of a user account. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate_text(field: &'static str, value: &str) -> Result<(), TalentError> {
    if value.trim().is_empty() || value.len() > MAX_TEXT_LENGTH {
        return Err(TalentError::InvalidField {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}

fn validate_optional_text(field: &'static str, value: Option<&String>) -> Result<(), TalentError> {
    match value {
        Some(v) => validate_text(field, v),
        None => Ok(()),
    }
}

fn validate_comments(value: &str) -> Result<(), TalentError> {
    if value.len() > MAX_TEXT_LENGTH {
        return Err(TalentError::InvalidField {
            field: "comments",
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Check that every required field of an employee record is present.
pub fn validate_employee(employee: &Employee) -> Result<(), TalentError> {
    validate_text("id", employee.id.as_str())?;
    validate_text("name", &employee.name)?;
    validate_text("job title", &employee.job_title)?;
    validate_text("department", &employee.department)?;
    validate_text("next role", &employee.next_role)?;
    Ok(())
}

/// Check that every required field of an assessment is present.
pub fn validate_assessment(record: &AssessmentRecord) -> Result<(), TalentError> {
    validate_text("assessor", &record.assessed_by)?;
    validate_text("next role", &record.next_role)?;
    validate_comments(&record.comments)
}

fn validate_user(user: &User) -> Result<(), TalentError> {
    validate_text("id", user.id.as_str())?;
    validate_text("username", &user.username)?;
    validate_text("full name", &user.full_name)?;
    validate_text("email", &user.email)?;
    Ok(())
}

fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

// =============================================================================
// ROSTER
// =============================================================================

/// Employee and user records, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Roster {
    employees: Vec<Employee>,
    users: Vec<User>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from loaded records, validating ids and fields.
    ///
    /// # Errors
    /// - `DuplicateId` if two employees or two users share an id, or two
    ///   users share a username
    /// - `InvalidField` if a required field is blank or the record count
    ///   exceeds `MAX_SNAPSHOT_RECORDS`
    pub fn from_records(employees: Vec<Employee>, users: Vec<User>) -> Result<Self, TalentError> {
        let total = employees.len().saturating_add(users.len());
        if total > MAX_SNAPSHOT_RECORDS {
            return Err(TalentError::InvalidField {
                field: "record count",
                value: total.to_string(),
            });
        }

        let mut employee_ids = BTreeSet::new();
        for employee in &employees {
            validate_employee(employee)?;
            if !employee_ids.insert(employee.id.as_str()) {
                return Err(TalentError::DuplicateId(employee.id.to_string()));
            }
        }

        let mut user_ids = BTreeSet::new();
        let mut usernames = BTreeSet::new();
        for user in &users {
            validate_user(user)?;
            if !user_ids.insert(user.id.as_str()) {
                return Err(TalentError::DuplicateId(user.id.to_string()));
            }
            if !usernames.insert(user.username.as_str()) {
                return Err(TalentError::DuplicateId(user.username.clone()));
            }
        }

        Ok(Self { employees, users })
    }

    /// All employees, in insertion order.
    #[must_use]
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// All users, in insertion order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Find an employee by id.
    #[must_use]
    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    /// Find a user by id.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Find a user by username.
    #[must_use]
    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    // =========================================================================
    // EMPLOYEE OPERATIONS
    // =========================================================================

    /// Next free intake id: `E` followed by a zero-padded sequence number.
    #[must_use]
    pub fn next_employee_id(&self) -> EmployeeId {
        let mut sequence = self.employees.len().saturating_add(1);
        loop {
            let candidate = EmployeeId::new(format!(
                "{}{:0width$}",
                EMPLOYEE_ID_PREFIX,
                sequence,
                width = EMPLOYEE_ID_WIDTH
            ));
            if self.employee(&candidate).is_none() {
                return candidate;
            }
            sequence = sequence.saturating_add(1);
        }
    }

    /// Add a new employee from an intake form. History starts empty.
    pub fn add_employee(&mut self, draft: EmployeeDraft) -> Result<EmployeeId, TalentError> {
        let id = self.next_employee_id();
        let employee = Employee {
            id: id.clone(),
            name: draft.name,
            job_title: draft.job_title,
            job_grade: draft.job_grade,
            direction: draft.direction,
            department: draft.department,
            job_category: draft
                .job_category
                .unwrap_or_else(|| DEFAULT_JOB_CATEGORY.to_string()),
            performance: draft.performance,
            evolution_potential: draft.evolution_potential,
            risk_of_loss: draft.risk_of_loss,
            impact_of_loss: draft.impact_of_loss,
            readiness: draft.readiness,
            next_role: draft.next_role,
            last_3_years_performance: DEFAULT_LAST_3_YEARS_PERFORMANCE,
            assessment_history: Vec::new(),
        };
        validate_employee(&employee)?;
        self.employees.push(employee);
        Ok(id)
    }

    /// Record a new assessment: append it to history and adopt its ratings.
    pub fn record_assessment(
        &mut self,
        id: &EmployeeId,
        record: AssessmentRecord,
    ) -> Result<&Employee, TalentError> {
        validate_assessment(&record)?;
        let employee = self.employee_mut(id)?;

        employee.performance = record.performance;
        employee.evolution_potential = record.evolution_potential;
        employee.risk_of_loss = record.risk_of_loss;
        employee.impact_of_loss = record.impact_of_loss;
        employee.readiness = record.readiness;
        employee.next_role = record.next_role.clone();
        employee.assessment_history.push(record);

        Ok(employee)
    }

    /// Apply an HR edit to descriptive fields.
    pub fn update_employee(
        &mut self,
        id: &EmployeeId,
        update: EmployeeUpdate,
    ) -> Result<&Employee, TalentError> {
        validate_optional_text("name", update.name.as_ref())?;
        validate_optional_text("job title", update.job_title.as_ref())?;
        validate_optional_text("department", update.department.as_ref())?;
        validate_optional_text("job category", update.job_category.as_ref())?;
        validate_optional_text("next role", update.next_role.as_ref())?;

        let employee = self.employee_mut(id)?;
        if let Some(name) = update.name {
            employee.name = name;
        }
        if let Some(job_title) = update.job_title {
            employee.job_title = job_title;
        }
        if let Some(job_grade) = update.job_grade {
            employee.job_grade = job_grade;
        }
        if let Some(direction) = update.direction {
            employee.direction = direction;
        }
        if let Some(department) = update.department {
            employee.department = department;
        }
        if let Some(job_category) = update.job_category {
            employee.job_category = job_category;
        }
        if let Some(next_role) = update.next_role {
            employee.next_role = next_role;
        }
        Ok(employee)
    }

    /// Case-insensitive search on name, job title and department, optionally
    /// limited to one direction. An empty query matches everyone.
    #[must_use]
    pub fn search_employees(&self, query: &str, direction: Option<Direction>) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| {
                matches_query(
                    query,
                    &[e.name.as_str(), e.job_title.as_str(), e.department.as_str()],
                )
            })
            .filter(|e| direction.is_none_or(|d| e.direction == d))
            .collect()
    }

    /// Employees in directions the user is not restricted from.
    #[must_use]
    pub fn visible_employees(&self, user: &User) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| user.covers_direction(e.direction))
            .collect()
    }

    fn employee_mut(&mut self, id: &EmployeeId) -> Result<&mut Employee, TalentError> {
        self.employees
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| TalentError::EmployeeNotFound(id.clone()))
    }

    // =========================================================================
    // USER OPERATIONS
    // =========================================================================

    /// Next free account id: `user-` followed by a sequence number.
    #[must_use]
    pub fn next_user_id(&self) -> UserId {
        let mut sequence = self.users.len().saturating_add(1);
        loop {
            let candidate = UserId::new(format!("{}{}", USER_ID_PREFIX, sequence));
            if self.user(&candidate).is_none() {
                return candidate;
            }
            sequence = sequence.saturating_add(1);
        }
    }

    /// Provision a new user account.
    pub fn add_user(&mut self, user: User) -> Result<(), TalentError> {
        validate_user(&user)?;
        if self.user(&user.id).is_some() {
            return Err(TalentError::DuplicateId(user.id.to_string()));
        }
        if self.user_by_username(&user.username).is_some() {
            return Err(TalentError::DuplicateId(user.username));
        }
        self.users.push(user);
        Ok(())
    }

    /// Grant or revoke one capability.
    pub fn set_permission(
        &mut self,
        id: &UserId,
        capability: Capability,
        value: bool,
    ) -> Result<&User, TalentError> {
        let user = self.user_mut(id)?;
        user.permissions.set(capability, value);
        Ok(user)
    }

    /// Apply an edit to account fields. Permissions are untouched.
    pub fn update_user(&mut self, id: &UserId, update: UserUpdate) -> Result<&User, TalentError> {
        validate_optional_text("username", update.username.as_ref())?;
        validate_optional_text("full name", update.full_name.as_ref())?;
        validate_optional_text("email", update.email.as_ref())?;
        validate_optional_text("department", update.department.as_ref())?;

        if let Some(username) = update.username.as_deref() {
            if self
                .user_by_username(username)
                .is_some_and(|other| &other.id != id)
            {
                return Err(TalentError::DuplicateId(username.to_string()));
            }
        }

        let user = self.user_mut(id)?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = full_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(department) = update.department {
            user.department = department;
        }
        Ok(user)
    }

    /// Remove a user account, returning it.
    pub fn delete_user(&mut self, id: &UserId) -> Result<User, TalentError> {
        let index = self
            .users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| TalentError::UserNotFound(id.to_string()))?;
        Ok(self.users.remove(index))
    }

    /// Case-insensitive search on full name, username and email.
    #[must_use]
    pub fn search_users(&self, query: &str) -> Vec<&User> {
        self.users
            .iter()
            .filter(|u| {
                matches_query(
                    query,
                    &[u.full_name.as_str(), u.username.as_str(), u.email.as_str()],
                )
            })
            .collect()
    }

    /// Users per role, zero-filled.
    #[must_use]
    pub fn count_by_role(&self) -> Distribution<Role> {
        distribution_by(&self.users, |u| u.role)
    }

    fn user_mut(&mut self, id: &UserId) -> Result<&mut User, TalentError> {
        self.users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| TalentError::UserNotFound(id.to_string()))
    }
}

// =============================================================================
// TESTS
// =============================================================================
