//! # Classifier Module
//!
//! The canonical 9-box table: one `(performance, potential)` cell, one
//! category.
//!
//! | performance \ potential | 1 | 2 | 3 |
//! |---|---|---|---|
//! | 1 | Underperformers | Dilemma | Enigma |
//! | 2 | Specialists | Effective Performers | Growth Employees |
//! | 3 | High Impact Performers | Core Employees | Future Leaders |
//!
//! Every coarser grouping (dashboard buckets, grid summary cards) is computed
//! by summing cells of this table. There is no second classification path.

use crate::primitives::GRID_PREVIEW_NAMES;
use crate::{Axis, Employee, EmployeeId, Rating, TalentError};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CATEGORY
// =============================================================================

/// One of the nine 9-box categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Future Leaders")]
    FutureLeaders,
    #[serde(rename = "Growth Employees")]
    GrowthEmployees,
    #[serde(rename = "Core Employees")]
    CoreEmployees,
    #[serde(rename = "Effective Performers")]
    EffectivePerformers,
    #[serde(rename = "High Impact Performers")]
    HighImpactPerformers,
    #[serde(rename = "Specialists")]
    Specialists,
    #[serde(rename = "Enigma")]
    Enigma,
    #[serde(rename = "Dilemma")]
    Dilemma,
    #[serde(rename = "Underperformers")]
    Underperformers,
}

impl Category {
    /// All nine categories, best cell first.
    pub const ALL: [Category; 9] = [
        Category::FutureLeaders,
        Category::GrowthEmployees,
        Category::CoreEmployees,
        Category::EffectivePerformers,
        Category::HighImpactPerformers,
        Category::Specialists,
        Category::Enigma,
        Category::Dilemma,
        Category::Underperformers,
    ];

    /// Category label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Category::FutureLeaders => "Future Leaders",
            Category::GrowthEmployees => "Growth Employees",
            Category::CoreEmployees => "Core Employees",
            Category::EffectivePerformers => "Effective Performers",
            Category::HighImpactPerformers => "High Impact Performers",
            Category::Specialists => "Specialists",
            Category::Enigma => "Enigma",
            Category::Dilemma => "Dilemma",
            Category::Underperformers => "Underperformers",
        }
    }

    /// The `(performance, potential)` cell this category occupies.
    #[must_use]
    pub fn cell(&self) -> (Rating, Rating) {
        match self {
            Category::FutureLeaders => (Rating::HIGH, Rating::HIGH),
            Category::GrowthEmployees => (Rating::MEDIUM, Rating::HIGH),
            Category::CoreEmployees => (Rating::HIGH, Rating::MEDIUM),
            Category::EffectivePerformers => (Rating::MEDIUM, Rating::MEDIUM),
            Category::HighImpactPerformers => (Rating::HIGH, Rating::LOW),
            Category::Specialists => (Rating::MEDIUM, Rating::LOW),
            Category::Enigma => (Rating::LOW, Rating::HIGH),
            Category::Dilemma => (Rating::LOW, Rating::MEDIUM),
            Category::Underperformers => (Rating::LOW, Rating::LOW),
        }
    }
}

impl Axis for Category {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.name()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// CLASSIFY
// =============================================================================

/// Classify already-validated ratings. Total over all nine cells.
#[must_use]
pub fn classify_ratings(performance: Rating, potential: Rating) -> Category {
    match (performance.value(), potential.value()) {
        (3, 3) => Category::FutureLeaders,
        (2, 3) => Category::GrowthEmployees,
        (3, 2) => Category::CoreEmployees,
        (2, 2) => Category::EffectivePerformers,
        (3, 1) => Category::HighImpactPerformers,
        (2, 1) => Category::Specialists,
        (1, 3) => Category::Enigma,
        (1, 2) => Category::Dilemma,
        _ => Category::Underperformers,
    }
}

/// Classify raw ordinals.
///
/// Returns `TalentError::InvalidRating` if either input is outside `1..=3`.
pub fn classify(performance: u8, potential: u8) -> Result<Category, TalentError> {
    let performance = Rating::new(performance)?;
    let potential = Rating::new(potential)?;
    Ok(classify_ratings(performance, potential))
}

impl Employee {
    /// The employee's 9-box category.
    #[must_use]
    pub fn category(&self) -> Category {
        classify_ratings(self.performance, self.evolution_potential)
    }
}

// =============================================================================
// COARSE VIEWS
// =============================================================================

/// Dashboard chart bucket: four named cells plus everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DashboardBucket {
    #[serde(rename = "Future Leaders")]
    FutureLeaders,
    #[serde(rename = "Growth Employees")]
    GrowthEmployees,
    #[serde(rename = "Core Employees")]
    CoreEmployees,
    #[serde(rename = "Effective Performers")]
    EffectivePerformers,
    #[serde(rename = "Others")]
    Others,
}

impl DashboardBucket {
    /// Buckets in chart order.
    pub const ALL: [DashboardBucket; 5] = [
        DashboardBucket::FutureLeaders,
        DashboardBucket::GrowthEmployees,
        DashboardBucket::CoreEmployees,
        DashboardBucket::EffectivePerformers,
        DashboardBucket::Others,
    ];

    /// Bucket label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DashboardBucket::FutureLeaders => "Future Leaders",
            DashboardBucket::GrowthEmployees => "Growth Employees",
            DashboardBucket::CoreEmployees => "Core Employees",
            DashboardBucket::EffectivePerformers => "Effective Performers",
            DashboardBucket::Others => "Others",
        }
    }
}

impl From<Category> for DashboardBucket {
    fn from(category: Category) -> Self {
        match category {
            Category::FutureLeaders => DashboardBucket::FutureLeaders,
            Category::GrowthEmployees => DashboardBucket::GrowthEmployees,
            Category::CoreEmployees => DashboardBucket::CoreEmployees,
            Category::EffectivePerformers => DashboardBucket::EffectivePerformers,
            _ => DashboardBucket::Others,
        }
    }
}

impl Axis for DashboardBucket {
    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn label(&self) -> &'static str {
        self.name()
    }
}

/// Summary cards shown under the 9-box grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TalentView {
    /// The Future Leaders cell.
    #[serde(rename = "Top Talent")]
    TopTalent,
    /// Performance and potential both at most 2.
    #[serde(rename = "Development Needed")]
    DevelopmentNeeded,
    /// Performance 1, any potential.
    #[serde(rename = "At Risk")]
    AtRisk,
}

impl TalentView {
    /// Cards in display order.
    pub const ALL: [TalentView; 3] = [
        TalentView::TopTalent,
        TalentView::DevelopmentNeeded,
        TalentView::AtRisk,
    ];

    /// Card label.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TalentView::TopTalent => "Top Talent",
            TalentView::DevelopmentNeeded => "Development Needed",
            TalentView::AtRisk => "At Risk",
        }
    }

    /// Cells of the canonical table this view sums.
    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        match self {
            TalentView::TopTalent => &[Category::FutureLeaders],
            TalentView::DevelopmentNeeded => &[
                Category::EffectivePerformers,
                Category::Specialists,
                Category::Dilemma,
                Category::Underperformers,
            ],
            TalentView::AtRisk => &[
                Category::Enigma,
                Category::Dilemma,
                Category::Underperformers,
            ],
        }
    }

    /// Whether `category` is one of the summed cells.
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.categories().contains(&category)
    }
}

// =============================================================================
// 9-BOX GRID
// =============================================================================

/// One cell of the rendered grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCell {
    pub category: Category,
    pub performance: Rating,
    pub potential: Rating,
    pub count: usize,
    /// Members in input order.
    pub members: Vec<EmployeeId>,
    /// First names shown on the card.
    pub preview: Vec<String>,
    /// Members not in `preview` ("+N more").
    pub overflow: usize,
}

/// The 3x3 grid in display order: potential rows 3 to 1, performance
/// columns 1 to 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NineBoxGrid {
    pub cells: Vec<GridCell>,
}

impl NineBoxGrid {
    /// Place every employee in its cell.
    #[must_use]
    pub fn build(employees: &[Employee]) -> Self {
        let mut cells = Vec::with_capacity(9);

        for potential in Rating::ALL.iter().rev().copied() {
            for performance in Rating::ALL {
                let in_cell: Vec<&Employee> = employees
                    .iter()
                    .filter(|e| e.performance == performance && e.evolution_potential == potential)
                    .collect();

                let preview: Vec<String> = in_cell
                    .iter()
                    .take(GRID_PREVIEW_NAMES)
                    .map(|e| e.name.clone())
                    .collect();

                cells.push(GridCell {
                    category: classify_ratings(performance, potential),
                    performance,
                    potential,
                    count: in_cell.len(),
                    members: in_cell.iter().map(|e| e.id.clone()).collect(),
                    overflow: in_cell.len().saturating_sub(preview.len()),
                    preview,
                });
            }
        }

        Self { cells }
    }

    /// Look up the cell for a category.
    #[must_use]
    pub fn cell(&self, category: Category) -> Option<&GridCell> {
        self.cells.iter().find(|c| c.category == category)
    }

    /// Sum of the cells a view covers.
    #[must_use]
    pub fn view_count(&self, view: TalentView) -> usize {
        self.cells
            .iter()
            .filter(|c| view.contains(c.category))
            .map(|c| c.count)
            .sum()
    }

    /// Total employees placed on the grid.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cells.iter().map(|c| c.count).sum()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_table() {
        let expected = [
            ((1, 1), Category::Underperformers),
            ((1, 2), Category::Dilemma),
            ((1, 3), Category::Enigma),
            ((2, 1), Category::Specialists),
            ((2, 2), Category::EffectivePerformers),
            ((2, 3), Category::GrowthEmployees),
            ((3, 1), Category::HighImpactPerformers),
            ((3, 2), Category::CoreEmployees),
            ((3, 3), Category::FutureLeaders),
        ];
        for ((perf, pot), category) in expected {
            assert_eq!(classify(perf, pot).expect("valid"), category);
        }
    }

    #[test]
    fn classify_rejects_invalid_rating() {
        assert!(matches!(classify(0, 2), Err(TalentError::InvalidRating(0))));
        assert!(matches!(classify(2, 4), Err(TalentError::InvalidRating(4))));
    }

    #[test]
    fn cell_is_inverse_of_classify() {
        for category in Category::ALL {
            let (perf, pot) = category.cell();
            assert_eq!(classify_ratings(perf, pot), category);
        }
    }

    #[test]
    fn classify_is_a_bijection_onto_nine_categories() {
        let mut seen = std::collections::BTreeSet::new();
        for perf in Rating::ALL {
            for pot in Rating::ALL {
                seen.insert(classify_ratings(perf, pot));
            }
        }
        assert_eq!(seen.len(), 9);
    }

    #[test]
    fn dashboard_others_covers_five_cells() {
        let others = Category::ALL
            .iter()
            .filter(|c| DashboardBucket::from(**c) == DashboardBucket::Others)
            .count();
        assert_eq!(others, 5);
    }

    #[test]
    fn development_needed_is_low_low_quadrant() {
        for category in Category::ALL {
            let (perf, pot) = category.cell();
            let expected = perf.value() <= 2 && pot.value() <= 2;
            assert_eq!(TalentView::DevelopmentNeeded.contains(category), expected);
        }
    }

    #[test]
    fn at_risk_is_low_performance_column() {
        for category in Category::ALL {
            let (perf, _) = category.cell();
            assert_eq!(TalentView::AtRisk.contains(category), perf == Rating::LOW);
        }
    }

    #[test]
    fn empty_grid_has_nine_zero_cells() {
        let grid = NineBoxGrid::build(&[]);
        assert_eq!(grid.cells.len(), 9);
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.cells[0].category, Category::Enigma);
        assert_eq!(grid.cells[2].category, Category::FutureLeaders);
        assert_eq!(grid.cells[8].category, Category::HighImpactPerformers);
    }
}
