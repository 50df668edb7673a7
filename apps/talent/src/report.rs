//! # Text Reports
//!
//! Plain-text renderings of the core views, one function per CLI screen.
//! JSON output bypasses this module and serializes the views directly.

use talent_core::aggregator::ViewSummary;
use talent_core::{
    Axis, Dashboard, Distribution, Employee, NineBoxGrid, PipelineStage, Role, User,
    WatchlistEntry,
};

const GRID_COLUMN_WIDTH: usize = 26;

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.len()))
}

/// KPI cards, charts and top performers.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = heading("Talent Dashboard");

    let kpis = &dashboard.kpis;
    out.push_str(&format!("Total Employees:     {}\n", kpis.total_count));
    out.push_str(&format!("Critical Roles:      {}\n", kpis.critical_role_count));
    out.push_str(&format!("Avg Performance:     {}\n", kpis.average_performance));
    out.push_str(&format!("Avg Readiness Score: {}\n", kpis.average_readiness));

    out.push_str("\nRisk of Loss\n");
    for (level, count) in dashboard.risk_distribution.iter() {
        out.push_str(&format!("  {:<8} {}\n", level.label(), count));
    }

    out.push_str("\n9-Box Distribution\n");
    for (bucket, count) in dashboard.nine_box.iter() {
        out.push_str(&format!("  {:<22} {}\n", bucket.label(), count));
    }

    out.push_str("\nSuccession Readiness by Direction\n");
    for (direction, row) in dashboard.readiness_by_direction.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|(readiness, count)| format!("{}: {}", readiness.label(), count))
            .collect();
        out.push_str(&format!("  {:<18} {}\n", direction.label(), cells.join(", ")));
    }

    out.push_str("\nSuccession Pipeline\n");
    for bar in &dashboard.readiness_pipeline {
        out.push_str(&format!(
            "  {:<18} {} ({}% of workforce)\n",
            bar.readiness.label(),
            bar.count,
            bar.share_percent
        ));
    }

    out.push_str("\nTop Performers\n");
    if dashboard.top_performers.is_empty() {
        out.push_str("  (none)\n");
    }
    for (rank, performer) in dashboard.top_performers.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} ({}) - {} [perf {} / pot {}]\n",
            rank + 1,
            performer.name,
            performer.job_title,
            performer.category,
            performer.performance,
            performer.evolution_potential
        ));
    }

    if dashboard.can_export {
        out.push_str("\nExport available: talent export-csv\n");
    }
    out
}

/// The 3x3 grid followed by the summary cards.
pub fn render_grid(grid: &NineBoxGrid, views: &[ViewSummary]) -> String {
    let mut out = heading("9-Box Talent Grid");
    out.push_str("Rows: potential high to low. Columns: performance low to high.\n\n");

    for row in grid.cells.chunks(3) {
        let titles: Vec<String> = row
            .iter()
            .map(|c| format!("{:<w$}", format!("{} ({})", c.category, c.count), w = GRID_COLUMN_WIDTH))
            .collect();
        out.push_str(&format!("{}\n", titles.join(" | ").trim_end()));

        let names: Vec<String> = row
            .iter()
            .map(|c| {
                let mut line = c.preview.join(", ");
                if c.overflow > 0 {
                    line.push_str(&format!(" +{} more", c.overflow));
                }
                format!("{:<w$}", line, w = GRID_COLUMN_WIDTH)
            })
            .collect();
        out.push_str(&format!("{}\n\n", names.join(" | ").trim_end()));
    }

    for view in views {
        out.push_str(&format!(
            "{:<20} {:>4} ({}% of workforce)\n",
            view.view.name(),
            view.count,
            view.share_percent
        ));
    }
    out
}

/// Medium and High risk employees with their retention actions.
pub fn render_watchlist(entries: &[WatchlistEntry]) -> String {
    let mut out = heading("Retention Risks");
    if entries.is_empty() {
        out.push_str("No employees at Medium or High risk.\n");
        return out;
    }
    for entry in entries {
        out.push_str(&format!(
            "\n{} - {} ({})\n  Risk: {}  Impact: {}\n",
            entry.id, entry.name, entry.job_title, entry.risk_of_loss, entry.impact_of_loss
        ));
        for action in &entry.actions {
            out.push_str(&format!("  - {}\n", action));
        }
    }
    out
}

/// Employees grouped by readiness with development plans.
pub fn render_pipeline(stages: &[PipelineStage]) -> String {
    let mut out = heading("Succession Pipeline");
    for stage in stages {
        out.push_str(&format!("\n{} ({})\n", stage.readiness, stage.entries.len()));
        for entry in &stage.entries {
            out.push_str(&format!(
                "  {} - {} ({}) -> {}\n",
                entry.id, entry.name, entry.job_title, entry.next_role
            ));
            for step in &entry.plan {
                out.push_str(&format!("      * {}\n", step));
            }
        }
    }
    out
}

/// One line per employee.
pub fn render_employees(employees: &[&Employee]) -> String {
    let mut out = heading("Employees");
    for e in employees {
        out.push_str(&format!(
            "{:<6} {:<24} {:<24} {:<3} {:<18} {:<22} risk {}\n",
            e.id.as_str(),
            e.name,
            e.job_title,
            e.job_grade,
            e.direction,
            e.category().name(),
            e.risk_of_loss
        ));
    }
    out.push_str(&format!("\n{} employee(s)\n", employees.len()));
    out
}

/// One line per user, then counts by role.
pub fn render_users(users: &[&User], by_role: &Distribution<Role>) -> String {
    let mut out = heading("Users");
    for u in users {
        let granted: Vec<&str> = u.permissions.granted().map(|c| c.key()).collect();
        let sections: Vec<&str> = u
            .permissions
            .restricted_to_sections()
            .iter()
            .map(String::as_str)
            .collect();
        out.push_str(&format!(
            "{:<12} {:<24} {:<8} sections: {}\n  {}\n",
            u.username,
            u.full_name,
            u.role,
            if sections.is_empty() {
                "all".to_string()
            } else {
                sections.join(", ")
            },
            granted.join(", ")
        ));
    }
    out.push('\n');
    for (role, count) in by_role.iter() {
        out.push_str(&format!("{}: {}\n", role.label(), count));
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
