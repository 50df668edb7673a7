//! # Core Type Definitions
//!
//! This module contains all record types for the talent snapshot:
//! - Identifiers (`EmployeeId`, `UserId`)
//! - Ordinal ratings (`Rating`) and the fixed enums the dashboard groups by
//! - Records (`Employee`, `AssessmentRecord`, `User`)
//! - Error types (`TalentError`)
//!
//! ## Determinism Guarantees
//!
//! All enums in this module:
//! - Implement `Ord` in declaration order, which is also their chart axis order
//! - Expose `ALL` so aggregations can zero-fill every bucket
//! - Serialize to the exact display labels used in snapshots and exports

use crate::permissions::Permissions;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// AXIS TRAIT
// =============================================================================

/// A closed, ordered set of labelled values that can index a chart axis.
///
/// Every enum the aggregator groups by implements this so distributions can
/// be zero-filled over the complete axis.
pub trait Axis: Copy + Ord + 'static {
    /// Every value of the axis, in display order.
    fn all() -> &'static [Self];

    /// Human-readable label.
    fn label(&self) -> &'static str;
}

/// Declares a labelled enum with serde names, `ALL`, `name()`, `Display`,
/// `FromStr` and an [`Axis`] impl.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant, )+
        }

        impl $name {
            /// Every variant, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Display label (also the serialized form).
            #[must_use]
            pub fn name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl Axis for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn label(&self) -> &'static str {
                self.name()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = TalentError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| TalentError::InvalidField {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Stable identifier of an employee record (e.g. `E001`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl EmployeeId {
    /// Create a new employee id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable identifier of a user account (e.g. `user-4`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Create a new user id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// RATING
// =============================================================================

/// An ordinal 9-box rating: exactly 1, 2 or 3.
///
/// Used for both axes of the grid (performance and evolution potential).
/// The only constructor is [`Rating::new`], and deserialization goes through
/// the same check, so an out-of-range value never reaches the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Rating 1: below expectations / limited growth.
    pub const LOW: Rating = Rating(1);
    /// Rating 2: meets expectations / moderate growth.
    pub const MEDIUM: Rating = Rating(2);
    /// Rating 3: exceeds expectations / high growth.
    pub const HIGH: Rating = Rating(3);

    /// All ratings in ascending order.
    pub const ALL: [Rating; 3] = [Rating::LOW, Rating::MEDIUM, Rating::HIGH];

    /// Validate a raw rating.
    ///
    /// Returns `TalentError::InvalidRating` for anything outside `1..=3`.
    pub fn new(value: u8) -> Result<Self, TalentError> {
        match value {
            1..=3 => Ok(Self(value)),
            other => Err(TalentError::InvalidRating(other)),
        }
    }

    /// Get the raw ordinal.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Label when the rating is read as performance.
    #[must_use]
    pub fn performance_label(self) -> &'static str {
        match self.0 {
            1 => "Below Expectations",
            2 => "Meets Expectations",
            _ => "Exceeds Expectations",
        }
    }

    /// Label when the rating is read as evolution potential.
    #[must_use]
    pub fn potential_label(self) -> &'static str {
        match self.0 {
            1 => "Limited Growth",
            2 => "Moderate Growth",
            _ => "High Growth",
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = TalentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Rating {
    type Err = TalentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u8 = s.trim().parse().map_err(|_| TalentError::InvalidField {
            field: "rating",
            value: s.to_string(),
        })?;
        Self::new(raw)
    }
}

// =============================================================================
// ENUMS
// =============================================================================

labeled_enum! {
    /// Job grade band.
    pub enum JobGrade as "job grade" {
        G1 => "G1",
        G2 => "G2",
        G3 => "G3",
        G4 => "G4",
    }
}

labeled_enum! {
    /// Top-level organizational division.
    pub enum Direction as "direction" {
        Operations => "Operations",
        Finance => "Finance",
        Hr => "HR",
        SalesMarketing => "Sales & Marketing",
        It => "IT",
    }
}

labeled_enum! {
    /// Three-level scale shared by risk of loss and impact of loss.
    pub enum RiskLevel as "risk level" {
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

impl RiskLevel {
    /// Ordinal used by the risk/impact scatter plot (Low 1, Medium 2, High 3).
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }
}

labeled_enum! {
    /// Estimated time until an employee is ready for their next role.
    pub enum Readiness as "readiness" {
        ReadyNow => "Ready Now",
        OneToThreeYears => "1-3 Years",
        MoreThanThreeYears => "More than 3 Years",
    }
}

labeled_enum! {
    /// Account role. Recorded alongside permissions, never derived from them.
    pub enum Role as "role" {
        Manager => "Manager",
        Hr => "HR",
    }
}

// =============================================================================
// EMPLOYEE
// =============================================================================

/// One submitted 9-box assessment, kept in the employee's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    /// Username of the assessor.
    pub assessed_by: String,
    /// Calendar date of the assessment, `YYYY-MM-DD` on the wire.
    pub assessed_on: NaiveDate,
    pub performance: Rating,
    pub evolution_potential: Rating,
    pub risk_of_loss: RiskLevel,
    pub impact_of_loss: RiskLevel,
    pub readiness: Readiness,
    pub next_role: String,
    #[serde(default)]
    pub comments: String,
}

/// One person in the talent pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub job_grade: JobGrade,
    pub direction: Direction,
    pub department: String,
    pub job_category: String,
    pub performance: Rating,
    pub evolution_potential: Rating,
    pub risk_of_loss: RiskLevel,
    pub impact_of_loss: RiskLevel,
    pub readiness: Readiness,
    pub next_role: String,
    #[serde(rename = "last3YearsPerformance")]
    pub last_3_years_performance: u8,
    /// Append-only, oldest first.
    #[serde(default)]
    pub assessment_history: Vec<AssessmentRecord>,
}

impl Employee {
    /// True when both risk of loss and impact of loss are High.
    #[must_use]
    pub fn is_critical_role(&self) -> bool {
        self.risk_of_loss == RiskLevel::High && self.impact_of_loss == RiskLevel::High
    }
}

// =============================================================================
// USER
// =============================================================================

/// An account that can view or act on the snapshot.
///
/// Passwords are not part of the record; authentication lives outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub role: Role,
    pub permissions: Permissions,
    #[serde(default)]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the talent core.
///
/// - Aggregations never fail; empty input yields zeroed results
/// - Invalid input is rejected, never coerced
/// - The core never panics; all errors are recoverable
#[derive(Debug, Error)]
pub enum TalentError {
    /// A performance or potential rating outside `1..=3`.
    #[error("Invalid rating: {0} (expected 1, 2 or 3)")]
    InvalidRating(u8),

    /// A capability name that is not part of the permission model.
    #[error("Unknown capability: {0}")]
    UnknownCapability(String),

    /// A field value that does not parse into its type.
    #[error("Invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// The requested employee does not exist in the roster.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(EmployeeId),

    /// The requested user does not exist in the roster.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// A record with this id already exists.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    /// The acting user lacks a capability. Raised by callers, never by the core.
    #[error("User {user} lacks capability {capability}")]
    PermissionDenied { user: String, capability: String },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================
