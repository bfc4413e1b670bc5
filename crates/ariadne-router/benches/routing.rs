//! Routing benchmarks.
//!
//! Run with: `cargo bench -p ariadne-router`

use ariadne_router::{Capture, Resource, RouteTable};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use http::Method;

fn build_table(num_resources: usize) -> RouteTable {
    let mut resources = Vec::with_capacity(num_resources + 1);

    for i in 0..num_resources {
        resources.push(
            Resource::new(format!("resource{i}"))
                .capture("id", Capture::Digit)
                .route(format!("/resource{i}"))
                .get("for_current_user")
                .get_at("find", format!("/{{resource{i}.id}}")),
        );
    }

    resources.push(
        Resource::new("repository")
            .capture("id", Capture::Digit)
            .capture("slug", Capture::slug())
            .route("/repo/({repository.id}|{repository.slug})")
            .get("find")
            .resource(
                Resource::new("requests")
                    .route("/requests")
                    .get("find")
                    .post("create"),
            )
            .resource(
                Resource::new("branch")
                    .route("/branch/{branch.name}")
                    .get("find"),
            ),
    );

    RouteTable::compile(resources).expect("valid routes")
}

fn bench_static_match(c: &mut Criterion) {
    let table = build_table(30);

    c.bench_function("static_match", |b| {
        b.iter(|| {
            black_box(table.match_route(&Method::GET, "/resource15").ok());
        });
    });
}

fn bench_digit_match(c: &mut Criterion) {
    let table = build_table(30);

    c.bench_function("digit_match", |b| {
        b.iter(|| {
            black_box(table.match_route(&Method::GET, "/resource15/12345").ok());
        });
    });
}

fn bench_alternation_match(c: &mut Criterion) {
    let table = build_table(30);

    c.bench_function("alternation_match", |b| {
        b.iter(|| {
            black_box(
                table
                    .match_route(&Method::GET, "/repo/svenfuchs%2Fminimal/branch/master")
                    .ok(),
            );
        });
    });
}

fn bench_miss(c: &mut Criterion) {
    let table = build_table(30);

    c.bench_function("miss", |b| {
        b.iter(|| {
            black_box(table.match_route(&Method::GET, "/nonexistent/path").ok());
        });
    });
}

fn bench_table_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_size");

    for size in [10, 50, 100] {
        let table = build_table(size);
        let path = format!("/resource{}/42", size - 1);

        group.bench_with_input(BenchmarkId::from_parameter(size), &path, |b, path| {
            b.iter(|| {
                black_box(table.match_route(&Method::GET, path).ok());
            });
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_50", |b| {
        b.iter(|| {
            black_box(build_table(50));
        });
    });
}

criterion_group!(
    benches,
    bench_static_match,
    bench_digit_match,
    bench_alternation_match,
    bench_miss,
    bench_table_size,
    bench_compile,
);
criterion_main!(benches);
