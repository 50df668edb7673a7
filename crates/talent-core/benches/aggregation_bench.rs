//! # Aggregation Benchmarks
//!
//! Performance benchmarks for talent-core classification and aggregation.
//!
//! Run with: `cargo bench -p talent-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use talent_core::aggregator::{by_category, readiness_by_direction};
use talent_core::{
    Dashboard, DashboardContext, Direction, Employee, EmployeeId, JobGrade, NineBoxGrid, Rating,
    Readiness, RiskLevel, retention_watchlist, top_by_performance,
};

/// Create a snapshot of N employees cycling through every rating pair.
fn create_snapshot(size: usize) -> Vec<Employee> {
    (0..size)
        .map(|i| Employee {
            id: EmployeeId::new(format!("E{:05}", i)),
            name: format!("Employee {}", i),
            job_title: "Analyst".to_string(),
            job_grade: JobGrade::G2,
            direction: Direction::ALL[i % Direction::ALL.len()],
            department: "Core".to_string(),
            job_category: "Management".to_string(),
            performance: Rating::ALL[i % 3],
            evolution_potential: Rating::ALL[(i / 3) % 3],
            risk_of_loss: RiskLevel::ALL[(i / 9) % 3],
            impact_of_loss: RiskLevel::ALL[i % 3],
            readiness: Readiness::ALL[(i / 27) % 3],
            next_role: "Lead".to_string(),
            last_3_years_performance: 3,
            assessment_history: Vec::new(),
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("classification");

    for size in [100, 1_000, 10_000] {
        let snapshot = create_snapshot(size);
        group.bench_with_input(BenchmarkId::new("by_category", size), &snapshot, |b, s| {
            b.iter(|| by_category(black_box(s)));
        });
        group.bench_with_input(BenchmarkId::new("nine_box_grid", size), &snapshot, |b, s| {
            b.iter(|| NineBoxGrid::build(black_box(s)));
        });
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for size in [100, 1_000, 10_000] {
        let snapshot = create_snapshot(size);
        group.bench_with_input(BenchmarkId::new("cross_tab", size), &snapshot, |b, s| {
            b.iter(|| readiness_by_direction(black_box(s)));
        });
        group.bench_with_input(BenchmarkId::new("top_5", size), &snapshot, |b, s| {
            b.iter(|| top_by_performance(black_box(s), 5));
        });
        group.bench_with_input(BenchmarkId::new("watchlist", size), &snapshot, |b, s| {
            b.iter(|| retention_watchlist(black_box(s)));
        });
    }

    group.finish();
}

fn bench_dashboard(c: &mut Criterion) {
    let snapshot = create_snapshot(10_000);
    c.bench_function("dashboard_build_10000", |b| {
        b.iter(|| Dashboard::build(&DashboardContext::new(black_box(&snapshot), None)));
    });
}

criterion_group!(benches, bench_classification, bench_aggregation, bench_dashboard);
criterion_main!(benches);
