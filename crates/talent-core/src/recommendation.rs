//! # Recommendation Rules
//!
//! Two small decision tables, evaluated top to bottom, first match wins,
//! each ending in a catch-all. Returned steps are in display order.

use crate::{Employee, EmployeeId, Rating, Readiness, RiskLevel};
use serde::{Deserialize, Serialize};

// =============================================================================
// RETENTION ACTIONS
// =============================================================================

const IMMEDIATE_RETENTION: &[&str] = &[
    "Immediate retention bonus consideration",
    "Career development plan within 30 days",
    "Regular one-on-one meetings with senior leadership",
    "Explore internal growth opportunities",
];

const HIGH_RISK_RETENTION: &[&str] = &[
    "Schedule retention conversation",
    "Review compensation and benefits",
    "Identify development opportunities",
];

const GENERIC_RETENTION: &[&str] = &[
    "Regular check-ins",
    "Monitor engagement levels",
    "Provide growth opportunities",
];

/// Retention actions for a risk of loss / impact of loss pair.
#[must_use]
pub fn recommend(risk: RiskLevel, impact: RiskLevel) -> &'static [&'static str] {
    match (risk, impact) {
        (RiskLevel::High, RiskLevel::High) => IMMEDIATE_RETENTION,
        (RiskLevel::High, _) => HIGH_RISK_RETENTION,
        _ => GENERIC_RETENTION,
    }
}

// =============================================================================
// DEVELOPMENT PLANS
// =============================================================================

const PROMOTION_TRACK: &[&str] = &[
    "Assign to leadership development program",
    "Provide mentoring opportunities",
    "Consider for immediate promotion",
    "Cross-functional project leadership",
];

const PIPELINE_TRACK: &[&str] = &[
    "Enroll in management training",
    "Assign stretch assignments",
    "Quarterly performance reviews",
    "Skill gap analysis and development",
];

const FOUNDATION_TRACK: &[&str] = &[
    "Focus on core competency building",
    "Regular coaching sessions",
    "Technical skills enhancement",
    "Performance improvement plan",
];

/// Development steps for a readiness stage and performance rating.
#[must_use]
pub fn development_plan(readiness: Readiness, performance: Rating) -> &'static [&'static str] {
    match (readiness, performance) {
        (Readiness::ReadyNow, Rating::HIGH) => PROMOTION_TRACK,
        (Readiness::OneToThreeYears, _) => PIPELINE_TRACK,
        _ => FOUNDATION_TRACK,
    }
}

// =============================================================================
// RETENTION WATCHLIST
// =============================================================================

/// An employee at Medium or High risk, with the actions to take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub risk_of_loss: RiskLevel,
    pub impact_of_loss: RiskLevel,
    pub actions: Vec<String>,
}

/// Employees at Medium or High risk, High first. Ties keep input order.
#[must_use]
pub fn retention_watchlist(employees: &[Employee]) -> Vec<WatchlistEntry> {
    let mut at_risk: Vec<&Employee> = employees
        .iter()
        .filter(|e| e.risk_of_loss != RiskLevel::Low)
        .collect();
    at_risk.sort_by(|a, b| b.risk_of_loss.cmp(&a.risk_of_loss));

    at_risk
        .into_iter()
        .map(|e| WatchlistEntry {
            id: e.id.clone(),
            name: e.name.clone(),
            job_title: e.job_title.clone(),
            risk_of_loss: e.risk_of_loss,
            impact_of_loss: e.impact_of_loss,
            actions: to_owned_steps(recommend(e.risk_of_loss, e.impact_of_loss)),
        })
        .collect()
}

// =============================================================================
// SUCCESSION PIPELINE
// =============================================================================

/// One employee on the succession pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEntry {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub next_role: String,
    pub performance: Rating,
    pub evolution_potential: Rating,
    pub plan: Vec<String>,
}

/// Employees of one readiness stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStage {
    pub readiness: Readiness,
    pub entries: Vec<PipelineEntry>,
}

/// Employees grouped by readiness, in `Readiness::ALL` order, each with a plan.
#[must_use]
pub fn succession_pipeline(employees: &[Employee]) -> Vec<PipelineStage> {
    Readiness::ALL
        .iter()
        .map(|readiness| PipelineStage {
            readiness: *readiness,
            entries: employees
                .iter()
                .filter(|e| e.readiness == *readiness)
                .map(|e| PipelineEntry {
                    id: e.id.clone(),
                    name: e.name.clone(),
                    job_title: e.job_title.clone(),
                    next_role: e.next_role.clone(),
                    performance: e.performance,
                    evolution_potential: e.evolution_potential,
                    plan: to_owned_steps(development_plan(e.readiness, e.performance)),
                })
                .collect(),
        })
        .collect()
}

fn to_owned_steps(steps: &[&str]) -> Vec<String> {
    steps.iter().map(|s| (*s).to_string()).collect()
}

// =============================================================================
// TESTS
// =============================================================================
