//! Projection benchmarks
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use persona::model::{Field, FieldVisibility, Gender, ProfileRecord};
use persona::pipeline::{ResultProjector, SortSpec, project_indices};

const FIRST_NAMES: [&str; 8] = ["דנה", "יוסי", "מיכל", "אבי", "נועה", "איתי", "הילה", "רון"];
const LAST_NAMES: [&str; 6] = ["כהן", "לוי", "מזרחי", "פרץ", "ביטון", "אברהם"];
const CITIES: [&str; 5] = ["תל אביב", "חיפה", "ירושלים", "באר שבע", "אשדוד"];

/// Deterministic batch of `n` generated-looking records
fn records(n: usize) -> Vec<ProfileRecord> {
    (0..n)
        .map(|i| {
            let first = FIRST_NAMES[i % FIRST_NAMES.len()];
            let last = LAST_NAMES[(i / 3) % LAST_NAMES.len()];
            ProfileRecord {
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
                full_name: Some(format!("{first} {last}")),
                email: Some(format!("user{i}@example.co.il")),
                email_valid: Some(i % 17 != 0),
                national_id: Some(format!("{:09}", (i * 7919) % 1_000_000_000)),
                national_id_valid: Some(i % 13 != 0),
                gender: Some(if i % 2 == 0 { Gender::Female } else { Gender::Male }),
                // Every eleventh record lacks an age to exercise missing-last ordering
                age: (i % 11 != 0).then_some(18 + (i as u32 * 37) % 60),
                city: Some(CITIES[i % CITIES.len()].to_string()),
            }
        })
        .collect()
}

fn bench_project(c: &mut Criterion) {
    let visibility = FieldVisibility::default();
    let mut group = c.benchmark_group("project");

    for size in [100, 1000] {
        let raw = records(size);
        group.bench_with_input(BenchmarkId::new("filter_only", size), &raw, |b, raw| {
            b.iter(|| project_indices(black_box(raw), "כהן", None, &visibility))
        });
        group.bench_with_input(BenchmarkId::new("sort_by_age", size), &raw, |b, raw| {
            let sort = Some(SortSpec::descending(Field::Age));
            b.iter(|| project_indices(black_box(raw), "", sort, &visibility))
        });
        group.bench_with_input(BenchmarkId::new("filter_and_sort", size), &raw, |b, raw| {
            let sort = Some(SortSpec::ascending(Field::FullName));
            b.iter(|| project_indices(black_box(raw), "example", sort, &visibility))
        });
    }

    group.finish();
}

fn bench_memoized(c: &mut Criterion) {
    let raw = records(1000);
    let visibility = FieldVisibility::default();
    let sort = Some(SortSpec::ascending(Field::City));
    let mut projector = ResultProjector::new();

    c.bench_function("memoized_hit", |b| {
        b.iter(|| projector.project(1, black_box(&raw), "לוי", sort, &visibility).len())
    });
}

criterion_group!(benches, bench_project, bench_memoized);
criterion_main!(benches);
