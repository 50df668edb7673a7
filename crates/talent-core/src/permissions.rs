//! # Permission Model
//!
//! A fixed set of named capabilities plus an optional section restriction.
//!
//! This module only answers questions. It never blocks an action: callers
//! (CLI commands, route guards) check a capability before acting.
//!
//! A user's `role` and `permissions` are independent data. The presets
//! [`Permissions::hr_default`] and [`Permissions::manager_default`] exist for
//! provisioning; nothing forces a record to match them.

use crate::{Direction, Role, TalentError, User};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Snapshot key holding the section restriction list.
pub const RESTRICTED_SECTIONS_KEY: &str = "restrictedToSections";

// =============================================================================
// CAPABILITY
// =============================================================================

/// A named boolean capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    AssessEmployees,
    ViewAllAssessments,
    EditAllAssessments,
    AddEmployees,
    EditEmployeeData,
    DeleteEmployees,
    ViewAllEmployees,
    ManageUsers,
    AssignRoles,
    ExportReports,
    AccessAnalytics,
}

impl Capability {
    /// Every capability, in snapshot order.
    pub const ALL: [Capability; 11] = [
        Capability::AssessEmployees,
        Capability::ViewAllAssessments,
        Capability::EditAllAssessments,
        Capability::AddEmployees,
        Capability::EditEmployeeData,
        Capability::DeleteEmployees,
        Capability::ViewAllEmployees,
        Capability::ManageUsers,
        Capability::AssignRoles,
        Capability::ExportReports,
        Capability::AccessAnalytics,
    ];

    /// The key this capability is stored under in snapshots.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Capability::AssessEmployees => "canAssessEmployees",
            Capability::ViewAllAssessments => "canViewAllAssessments",
            Capability::EditAllAssessments => "canEditAllAssessments",
            Capability::AddEmployees => "canAddEmployees",
            Capability::EditEmployeeData => "canEditEmployeeData",
            Capability::DeleteEmployees => "canDeleteEmployees",
            Capability::ViewAllEmployees => "canViewAllEmployees",
            Capability::ManageUsers => "canManageUsers",
            Capability::AssignRoles => "canAssignRoles",
            Capability::ExportReports => "canExportReportsToPDF",
            Capability::AccessAnalytics => "canAccessAnalytics",
        }
    }

    /// Short description for listings.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Capability::AssessEmployees => "Assess employees",
            Capability::ViewAllAssessments => "View all assessments",
            Capability::EditAllAssessments => "Edit all assessments",
            Capability::AddEmployees => "Add employees",
            Capability::EditEmployeeData => "Edit employee data",
            Capability::DeleteEmployees => "Delete employees",
            Capability::ViewAllEmployees => "View all employees",
            Capability::ManageUsers => "Manage users",
            Capability::AssignRoles => "Assign roles",
            Capability::ExportReports => "Export reports",
            Capability::AccessAnalytics => "Access analytics",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Capability {
    type Err = TalentError;

    /// Parses the snapshot key (`canManageUsers`). Unknown names are an error,
    /// never a silent `false`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .iter()
            .copied()
            .find(|c| c.key() == s)
            .ok_or_else(|| TalentError::UnknownCapability(s.to_string()))
    }
}

// =============================================================================
// PERMISSIONS
// =============================================================================

/// Capability set plus section restriction for one user.
///
/// Serializes as a flat record: one boolean per capability key and a
/// `restrictedToSections` list. An empty list means unrestricted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPermissions", into = "RawPermissions")]
pub struct Permissions {
    granted: BTreeSet<Capability>,
    restricted_to_sections: BTreeSet<String>,
}

impl Permissions {
    /// No capabilities, no restriction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every capability granted, unrestricted.
    #[must_use]
    pub fn hr_default() -> Self {
        Self {
            granted: Capability::ALL.into_iter().collect(),
            restricted_to_sections: BTreeSet::new(),
        }
    }

    /// Assess and analytics only, scoped to one section.
    #[must_use]
    pub fn manager_default(section: impl Into<String>) -> Self {
        Self {
            granted: [Capability::AssessEmployees, Capability::AccessAnalytics]
                .into_iter()
                .collect(),
            restricted_to_sections: std::iter::once(section.into()).collect(),
        }
    }

    /// Provisioning preset for a role.
    #[must_use]
    pub fn preset_for(role: Role, section: &str) -> Self {
        match role {
            Role::Hr => Self::hr_default(),
            Role::Manager => Self::manager_default(section),
        }
    }

    /// Check a typed capability.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    /// Grant or revoke a capability.
    pub fn set(&mut self, capability: Capability, value: bool) {
        if value {
            self.granted.insert(capability);
        } else {
            self.granted.remove(&capability);
        }
    }

    /// Granted capabilities in `Capability::ALL` order.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.granted.iter().copied()
    }

    /// Sections this user is limited to. Empty means unrestricted.
    #[must_use]
    pub fn restricted_to_sections(&self) -> &BTreeSet<String> {
        &self.restricted_to_sections
    }

    /// Add a section to the restriction list.
    pub fn restrict_to(&mut self, section: impl Into<String>) {
        self.restricted_to_sections.insert(section.into());
    }

    /// Drop every section restriction.
    pub fn clear_restrictions(&mut self) {
        self.restricted_to_sections.clear();
    }

    /// True when the user may act on `section`.
    #[must_use]
    pub fn covers_section(&self, section: &str) -> bool {
        self.restricted_to_sections.is_empty() || self.restricted_to_sections.contains(section)
    }
}

// =============================================================================
// ACCESSORS
// =============================================================================

/// Look up a capability by its snapshot key.
///
/// Returns `TalentError::UnknownCapability` for names outside the model.
pub fn has_capability(user: &User, capability: &str) -> Result<bool, TalentError> {
    let capability: Capability = capability.parse()?;
    Ok(user.permissions.allows(capability))
}

/// True when `restrictedToSections` is empty or contains `section`.
#[must_use]
pub fn is_restricted_to(user: &User, section: &str) -> bool {
    user.permissions.covers_section(section)
}

impl User {
    /// Typed capability check.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.permissions.allows(capability)
    }

    /// True when the user may act on employees of `direction`.
    #[must_use]
    pub fn covers_direction(&self, direction: Direction) -> bool {
        self.permissions.covers_section(direction.name())
    }

    /// Whether the stored permissions equal the provisioning preset for the role.
    ///
    /// Informational only; a mismatch is legal.
    #[must_use]
    pub fn role_matches_policy(&self) -> bool {
        self.permissions == Permissions::preset_for(self.role, &self.department)
    }
}

// =============================================================================
// SNAPSHOT SHAPE
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum PermissionField {
    Flag(bool),
    Sections(Vec<String>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
struct RawPermissions(BTreeMap<String, PermissionField>);

impl TryFrom<RawPermissions> for Permissions {
    type Error = TalentError;

    fn try_from(raw: RawPermissions) -> Result<Self, Self::Error> {
        let mut permissions = Permissions::new();
        let mut seen = BTreeSet::new();
        let mut has_sections = false;

        for (key, field) in raw.0 {
            if key == RESTRICTED_SECTIONS_KEY {
                match field {
                    PermissionField::Sections(sections) => {
                        permissions.restricted_to_sections = sections.into_iter().collect();
                        has_sections = true;
                    }
                    PermissionField::Flag(_) => {
                        return Err(TalentError::InvalidField {
                            field: "permissions",
                            value: key,
                        });
                    }
                }
                continue;
            }

            let capability: Capability = key.parse()?;
            match field {
                PermissionField::Flag(value) => {
                    permissions.set(capability, value);
                    seen.insert(capability);
                }
                PermissionField::Sections(_) => {
                    return Err(TalentError::InvalidField {
                        field: "permissions",
                        value: key,
                    });
                }
            }
        }

        if let Some(missing) = Capability::ALL.iter().find(|c| !seen.contains(*c)) {
            return Err(TalentError::InvalidField {
                field: "permissions",
                value: format!("missing {}", missing.key()),
            });
        }

        // An absent key would read as unrestricted.
        if !has_sections {
            return Err(TalentError::InvalidField {
                field: "permissions",
                value: format!("missing {}", RESTRICTED_SECTIONS_KEY),
            });
        }

        Ok(permissions)
    }
}

impl From<Permissions> for RawPermissions {
    fn from(permissions: Permissions) -> Self {
        let mut map: BTreeMap<String, PermissionField> = Capability::ALL
            .iter()
            .map(|c| (c.key().to_string(), PermissionField::Flag(permissions.allows(*c))))
            .collect();
        map.insert(
            RESTRICTED_SECTIONS_KEY.to_string(),
            PermissionField::Sections(permissions.restricted_to_sections.into_iter().collect()),
        );
        RawPermissions(map)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;

    fn user(role: Role, permissions: Permissions) -> User {
        User {
            id: UserId::new("user-1"),
            username: "manager1".to_string(),
            full_name: "Ahmed Hassan".to_string(),
            email: "ahmed.hassan@example.com".to_string(),
            department: "Operations".to_string(),
            role,
            permissions,
            created_date: None,
            last_login: None,
        }
    }

    #[test]
    fn unknown_capability_is_an_error() {
        let u = user(Role::Manager, Permissions::manager_default("Operations"));
        let result = has_capability(&u, "canFlyPlanes");
        assert!(matches!(result, Err(TalentError::UnknownCapability(name)) if name == "canFlyPlanes"));
    }

    #[test]
    fn known_capability_reads_flag() {
        let u = user(Role::Manager, Permissions::manager_default("Operations"));
        assert!(has_capability(&u, "canAssessEmployees").expect("known"));
        assert!(!has_capability(&u, "canManageUsers").expect("known"));
    }

    #[test]
    fn empty_restriction_means_unrestricted() {
        let u = user(Role::Hr, Permissions::hr_default());
        assert!(is_restricted_to(&u, "Finance"));
        assert!(is_restricted_to(&u, "anything"));
    }

    #[test]
    fn restriction_limits_sections() {
        let u = user(Role::Manager, Permissions::manager_default("Operations"));
        assert!(is_restricted_to(&u, "Operations"));
        assert!(!is_restricted_to(&u, "Finance"));
        assert!(u.covers_direction(Direction::Operations));
        assert!(!u.covers_direction(Direction::It));
    }

    #[test]
    fn role_and_permissions_are_independent() {
        let mut u = user(Role::Manager, Permissions::hr_default());
        assert!(u.can(Capability::ManageUsers));
        assert!(!u.role_matches_policy());

        u.permissions = Permissions::manager_default("Operations");
        assert!(u.role_matches_policy());
    }

    #[test]
    fn set_grants_and_revokes() {
        let mut p = Permissions::new();
        p.set(Capability::ExportReports, true);
        assert!(p.allows(Capability::ExportReports));
        p.set(Capability::ExportReports, false);
        assert!(!p.allows(Capability::ExportReports));
    }

    #[test]
    fn serializes_as_flat_record() {
        let json = serde_json::to_value(Permissions::manager_default("Finance")).expect("serialize");
        assert_eq!(json["canAssessEmployees"], serde_json::json!(true));
        assert_eq!(json["canExportReportsToPDF"], serde_json::json!(false));
        assert_eq!(json["restrictedToSections"], serde_json::json!(["Finance"]));
    }

    #[test]
    fn deserialize_rejects_unknown_flag() {
        let mut json = serde_json::to_value(Permissions::hr_default()).expect("serialize");
        json["canTeleport"] = serde_json::json!(true);
        let err = serde_json::from_value::<Permissions>(json).expect_err("unknown key");
        assert!(err.to_string().contains("canTeleport"));
    }

    #[test]
    fn deserialize_rejects_missing_flag() {
        let mut json = serde_json::to_value(Permissions::hr_default()).expect("serialize");
        json.as_object_mut().expect("object").remove("canAssignRoles");
        assert!(serde_json::from_value::<Permissions>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_missing_sections() {
        let mut json = serde_json::to_value(Permissions::manager_default("Finance")).expect("serialize");
        json.as_object_mut().expect("object").remove("restrictedToSections");
        let err = serde_json::from_value::<Permissions>(json).expect_err("sections required");
        assert!(err.to_string().contains("missing restrictedToSections"));
    }

    #[test]
    fn deserialize_accepts_snapshot_record() {
        let original = Permissions::manager_default("Sales & Marketing");
        let json = serde_json::to_string(&original).expect("serialize");
        let parsed: Permissions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, original);
    }
}
