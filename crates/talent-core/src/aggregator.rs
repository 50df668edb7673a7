//! # Aggregator Module
//!
//! KPI scalars and chart-ready distributions over an employee snapshot.
//!
//! - Every function is pure and total: empty input yields zeroed output
//! - Distributions are zero-filled over the complete axis
//! - Averages are fixed-point tenths (integer arithmetic only)
//! - Ranking uses a stable sort, so ties keep input order

use crate::classifier::{Category, DashboardBucket, TalentView};
use crate::primitives::{
    MORE_THAN_THREE_YEARS_SCORE, ONE_TO_THREE_YEARS_SCORE, READY_NOW_SCORE,
};
use crate::{Axis, Direction, Employee, Readiness, RiskLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// FIXED-POINT AVERAGE
// =============================================================================

/// A non-negative value with one decimal place, stored as value x 10.
///
/// `Tenths(20)` displays as `2.0`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tenths(pub u32);

impl Tenths {
    /// `sum / count` rounded half up to one decimal. Zero when `count` is 0.
    #[must_use]
    pub fn from_ratio(sum: u64, count: u64) -> Self {
        if count == 0 {
            return Self(0);
        }
        let scaled = (sum.saturating_mul(20).saturating_add(count)) / count.saturating_mul(2);
        Self(u32::try_from(scaled).unwrap_or(u32::MAX))
    }

    /// Raw value x 10.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// `part / total` as a whole percent, rounded half up. Zero when `total` is 0.
#[must_use]
pub fn share_percent(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u64, total as u64);
    let scaled = (part.saturating_mul(200).saturating_add(total)) / total.saturating_mul(2);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

// =============================================================================
// SCALAR KPIS
// =============================================================================

/// Number of employees in the snapshot.
#[must_use]
pub fn total_count(employees: &[Employee]) -> usize {
    employees.len()
}

/// Employees whose risk of loss and impact of loss are both High.
#[must_use]
pub fn critical_role_count(employees: &[Employee]) -> usize {
    employees.iter().filter(|e| e.is_critical_role()).count()
}

/// Mean performance rating, one decimal. `0.0` for an empty snapshot.
#[must_use]
pub fn average_performance(employees: &[Employee]) -> Tenths {
    let sum: u64 = employees.iter().map(|e| e.performance.value() as u64).sum();
    Tenths::from_ratio(sum, employees.len() as u64)
}

/// Readiness mapped to a score: Ready Now 3, 1-3 Years 2, More than 3 Years 1.
#[must_use]
pub fn readiness_score(readiness: Readiness) -> u32 {
    match readiness {
        Readiness::ReadyNow => READY_NOW_SCORE,
        Readiness::OneToThreeYears => ONE_TO_THREE_YEARS_SCORE,
        Readiness::MoreThanThreeYears => MORE_THAN_THREE_YEARS_SCORE,
    }
}

/// Mean readiness score, one decimal. `0.0` for an empty snapshot.
#[must_use]
pub fn average_readiness_score(employees: &[Employee]) -> Tenths {
    let sum: u64 = employees
        .iter()
        .map(|e| readiness_score(e.readiness) as u64)
        .sum();
    Tenths::from_ratio(sum, employees.len() as u64)
}

/// The four dashboard KPI cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Kpis {
    pub total_count: usize,
    pub critical_role_count: usize,
    pub average_performance: Tenths,
    pub average_readiness: Tenths,
}

impl Kpis {
    /// Compute every KPI in one call.
    #[must_use]
    pub fn compute(employees: &[Employee]) -> Self {
        Self {
            total_count: total_count(employees),
            critical_role_count: critical_role_count(employees),
            average_performance: average_performance(employees),
            average_readiness: average_readiness_score(employees),
        }
    }
}

// =============================================================================
// DISTRIBUTIONS
// =============================================================================

/// Count per axis value. Every value of the axis is present, including zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Distribution<K: Axis + Serialize> {
    counts: BTreeMap<K, usize>,
}

impl<K: Axis + Serialize> Distribution<K> {
    /// A distribution with every bucket at zero.
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            counts: K::all().iter().map(|k| (*k, 0)).collect(),
        }
    }

    /// Count for one bucket.
    #[must_use]
    pub fn get(&self, key: K) -> usize {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Sum of all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Buckets in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    fn increment(&mut self, key: K) {
        let slot = self.counts.entry(key).or_insert(0);
        *slot = slot.saturating_add(1);
    }
}

/// Group any records by an enum-valued key.
#[must_use]
pub fn distribution_by<T, K>(items: &[T], key: impl Fn(&T) -> K) -> Distribution<K>
where
    K: Axis + Serialize,
{
    let mut distribution = Distribution::zeroed();
    for item in items {
        distribution.increment(key(item));
    }
    distribution
}

/// Employees per risk-of-loss level.
#[must_use]
pub fn by_risk(employees: &[Employee]) -> Distribution<RiskLevel> {
    distribution_by(employees, |e| e.risk_of_loss)
}

/// Employees per impact-of-loss level.
#[must_use]
pub fn by_impact(employees: &[Employee]) -> Distribution<RiskLevel> {
    distribution_by(employees, |e| e.impact_of_loss)
}

/// Employees per direction.
#[must_use]
pub fn by_direction(employees: &[Employee]) -> Distribution<Direction> {
    distribution_by(employees, |e| e.direction)
}

/// Employees per readiness stage.
#[must_use]
pub fn by_readiness(employees: &[Employee]) -> Distribution<Readiness> {
    distribution_by(employees, |e| e.readiness)
}

/// Employees per 9-box category.
#[must_use]
pub fn by_category(employees: &[Employee]) -> Distribution<Category> {
    distribution_by(employees, Employee::category)
}

/// Employees per dashboard bucket (four named cells plus Others).
#[must_use]
pub fn by_dashboard_bucket(employees: &[Employee]) -> Distribution<DashboardBucket> {
    distribution_by(employees, |e| DashboardBucket::from(e.category()))
}

// =============================================================================
// CROSS TABULATION
// =============================================================================

/// A zero-filled count matrix: one row per `R`, one column per `C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CrossTab<R: Axis + Serialize, C: Axis + Serialize> {
    rows: BTreeMap<R, Distribution<C>>,
}

impl<R: Axis + Serialize, C: Axis + Serialize> CrossTab<R, C> {
    /// Count for one cell.
    #[must_use]
    pub fn get(&self, row: R, column: C) -> usize {
        self.rows.get(&row).map_or(0, |r| r.get(column))
    }

    /// One row of the matrix.
    #[must_use]
    pub fn row(&self, row: R) -> Option<&Distribution<C>> {
        self.rows.get(&row)
    }

    /// Rows in axis order.
    pub fn rows(&self) -> impl Iterator<Item = (R, &Distribution<C>)> + '_ {
        self.rows.iter().map(|(k, v)| (*k, v))
    }

    /// Sum of every cell.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.values().map(Distribution::total).sum()
    }
}

/// Cross-tabulate records by two enum-valued keys.
#[must_use]
pub fn cross_tab<T, R, C>(
    items: &[T],
    row_key: impl Fn(&T) -> R,
    column_key: impl Fn(&T) -> C,
) -> CrossTab<R, C>
where
    R: Axis + Serialize,
    C: Axis + Serialize,
{
    let mut rows: BTreeMap<R, Distribution<C>> =
        R::all().iter().map(|r| (*r, Distribution::zeroed())).collect();

    for item in items {
        if let Some(row) = rows.get_mut(&row_key(item)) {
            row.increment(column_key(item));
        }
    }

    CrossTab { rows }
}

/// Grouped bar chart data: readiness counts per direction.
#[must_use]
pub fn readiness_by_direction(employees: &[Employee]) -> CrossTab<Direction, Readiness> {
    cross_tab(employees, |e| e.direction, |e| e.readiness)
}

// =============================================================================
// PROJECTIONS
// =============================================================================

/// One point of the risk vs impact scatter plot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskImpactPoint {
    pub name: String,
    pub risk: u8,
    pub impact: u8,
}

/// Project every employee onto (risk ordinal, impact ordinal), in input order.
#[must_use]
pub fn risk_impact_pairs(employees: &[Employee]) -> Vec<RiskImpactPoint> {
    employees
        .iter()
        .map(|e| RiskImpactPoint {
            name: e.name.clone(),
            risk: e.risk_of_loss.ordinal(),
            impact: e.impact_of_loss.ordinal(),
        })
        .collect()
}

/// The first `n` employees by `(performance, potential)` descending.
///
/// `sort_by` is stable: employees with equal ratings keep their input order.
#[must_use]
pub fn top_by_performance(employees: &[Employee], n: usize) -> Vec<&Employee> {
    let mut ranked: Vec<&Employee> = employees.iter().collect();
    ranked.sort_by(|a, b| {
        (b.performance, b.evolution_potential).cmp(&(a.performance, a.evolution_potential))
    });
    ranked.truncate(n);
    ranked
}

/// One summary card under the 9-box grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSummary {
    pub view: TalentView,
    pub count: usize,
    /// Whole percent of the workforce.
    pub share_percent: u32,
}

/// Count and workforce share for every [`TalentView`].
#[must_use]
pub fn talent_view_summary(employees: &[Employee]) -> Vec<ViewSummary> {
    let categories = by_category(employees);
    let total = employees.len();

    TalentView::ALL
        .iter()
        .map(|view| {
            let count = view.categories().iter().map(|c| categories.get(*c)).sum();
            ViewSummary {
                view: *view,
                count,
                share_percent: share_percent(count, total),
            }
        })
        .collect()
}

/// One bar of the succession pipeline chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessShare {
    pub readiness: Readiness,
    pub count: usize,
    /// Whole percent of the workforce.
    pub share_percent: u32,
}

/// Count and workforce share per readiness stage, in `Readiness::ALL` order.
#[must_use]
pub fn readiness_pipeline(employees: &[Employee]) -> Vec<ReadinessShare> {
    let total = employees.len();
    by_readiness(employees)
        .iter()
        .map(|(readiness, count)| ReadinessShare {
            readiness,
            count,
            share_percent: share_percent(count, total),
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
