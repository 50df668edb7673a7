//! # talent-core
//!
//! The deterministic talent engine for 9-box succession planning.
//!
//! This crate turns a snapshot of employee assessments into the views an HR
//! dashboard needs: the 9-box classification, KPI aggregates, retention and
//! development recommendations, and the per-user permission checks that gate
//! them.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is pure: every classifier, aggregator and rule function depends only on
//!   its arguments
//! - Is deterministic: `BTreeMap`/`BTreeSet` only, integer fixed-point math
//! - Never reads ambient state; the viewing user is always passed explicitly
//! - Has NO async, NO network, NO storage engine (snapshots are plain JSON)

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregator;
pub mod classifier;
pub mod dashboard;
pub mod export;
pub mod formats;
pub mod permissions;
pub mod primitives;
pub mod recommendation;
pub mod roster;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    AssessmentRecord, Axis, Direction, Employee, EmployeeId, JobGrade, Rating, Readiness,
    RiskLevel, Role, TalentError, User, UserId,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use aggregator::{
    CrossTab, Distribution, Kpis, ReadinessShare, RiskImpactPoint, Tenths, ViewSummary,
    top_by_performance,
};
pub use classifier::{Category, DashboardBucket, NineBoxGrid, TalentView, classify, classify_ratings};
pub use dashboard::{Dashboard, DashboardContext, TopPerformer};
pub use export::{employees_to_csv, export_file_name};
pub use permissions::{Capability, Permissions, has_capability, is_restricted_to};
pub use recommendation::{
    PipelineStage, WatchlistEntry, development_plan, recommend, retention_watchlist,
    succession_pipeline,
};
pub use roster::{EmployeeDraft, EmployeeUpdate, Roster, UserUpdate};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{snapshot_from_json, snapshot_to_json};
