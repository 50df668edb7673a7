//! # Dashboard
//!
//! Assembles every dashboard view in one pass over a snapshot slice.
//!
//! The viewing user is passed in explicitly through [`DashboardContext`].
//! A viewer restricted to certain sections only sees employees of those
//! directions, and every figure (counts, averages, charts) is computed over
//! that visible subset. Without a viewer the whole slice is used.

use crate::aggregator::{
    CrossTab, Distribution, Kpis, ReadinessShare, RiskImpactPoint, ViewSummary,
    by_dashboard_bucket, by_risk, readiness_by_direction, readiness_pipeline, risk_impact_pairs,
    talent_view_summary, top_by_performance,
};
use crate::classifier::{Category, DashboardBucket};
use crate::permissions::Capability;
use crate::primitives::DEFAULT_TOP_PERFORMERS;
use crate::{Direction, Employee, EmployeeId, Rating, Readiness, RiskLevel, User};
use serde::Serialize;

/// Inputs for one dashboard render.
#[derive(Debug, Clone, Copy)]
pub struct DashboardContext<'a> {
    pub employees: &'a [Employee],
    pub viewer: Option<&'a User>,
    pub top_n: usize,
}

impl<'a> DashboardContext<'a> {
    /// Context over `employees` with the default top-performer count.
    #[must_use]
    pub fn new(employees: &'a [Employee], viewer: Option<&'a User>) -> Self {
        Self {
            employees,
            viewer,
            top_n: DEFAULT_TOP_PERFORMERS,
        }
    }

    /// Override the number of top performers listed.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// A row of the top performers table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopPerformer {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
    pub direction: Direction,
    pub performance: Rating,
    pub evolution_potential: Rating,
    pub category: Category,
}

/// Every dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub kpis: Kpis,
    pub risk_distribution: Distribution<RiskLevel>,
    pub readiness_by_direction: CrossTab<Direction, Readiness>,
    /// Succession pipeline bars: count and share per readiness stage.
    pub readiness_pipeline: Vec<ReadinessShare>,
    pub risk_impact: Vec<RiskImpactPoint>,
    pub nine_box: Distribution<DashboardBucket>,
    pub talent_views: Vec<ViewSummary>,
    pub top_performers: Vec<TopPerformer>,
    /// Whether the viewer may export this report.
    pub can_export: bool,
}

impl Dashboard {
    /// Compute the dashboard for the employees visible to the viewer.
    #[must_use]
    pub fn build(ctx: &DashboardContext<'_>) -> Self {
        let visible: Vec<Employee> = match ctx.viewer {
            Some(user) => ctx
                .employees
                .iter()
                .filter(|e| user.covers_direction(e.direction))
                .cloned()
                .collect(),
            None => ctx.employees.to_vec(),
        };

        let top_performers = top_by_performance(&visible, ctx.top_n)
            .into_iter()
            .map(|e| TopPerformer {
                id: e.id.clone(),
                name: e.name.clone(),
                job_title: e.job_title.clone(),
                direction: e.direction,
                performance: e.performance,
                evolution_potential: e.evolution_potential,
                category: e.category(),
            })
            .collect();

        Self {
            kpis: Kpis::compute(&visible),
            risk_distribution: by_risk(&visible),
            readiness_by_direction: readiness_by_direction(&visible),
            readiness_pipeline: readiness_pipeline(&visible),
            risk_impact: risk_impact_pairs(&visible),
            nine_box: by_dashboard_bucket(&visible),
            talent_views: talent_view_summary(&visible),
            top_performers,
            can_export: ctx
                .viewer
                .is_some_and(|u| u.can(Capability::ExportReports)),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
