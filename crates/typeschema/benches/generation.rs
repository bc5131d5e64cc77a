//! Schema Generation Benchmarks
//!
//! Measures generation cost over synthetic type graphs.
//!
//! # Graph Shapes
//!
//! - **Wide**: one bean with many scalar and collection properties
//! - **Deep**: a chain of nested beans
//! - **Shared**: many properties referring to the same bean, with and
//!   without bean definitions

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use typeschema::{PropertyDescriptor, SchemaGenerator, TypeDescriptor, TypeRef};

// ============================================================================
// Graph Builders
// ============================================================================

fn wide_bean(width: usize) -> TypeDescriptor {
    let properties = (0..width)
        .map(|i| match i % 4 {
            0 => PropertyDescriptor::new(format!("p{i}"), TypeRef::of::<i64>()),
            1 => PropertyDescriptor::new(format!("p{i}"), TypeRef::of::<String>()),
            2 => PropertyDescriptor::new(format!("p{i}"), TypeRef::of::<Vec<f64>>()),
            _ => PropertyDescriptor::new(format!("p{i}"), TypeRef::of::<bool>()),
        })
        .collect();
    TypeDescriptor::bean("bench::Wide", properties)
}

fn deep_bean(depth: usize) -> TypeDescriptor {
    let mut current = TypeDescriptor::bean(
        "bench::Leaf",
        vec![PropertyDescriptor::new("value", TypeRef::of::<String>())],
    );
    for level in 0..depth {
        current = TypeDescriptor::bean(
            format!("bench::Level{level}"),
            vec![
                PropertyDescriptor::new("id", TypeRef::of::<i32>()),
                PropertyDescriptor::new("next", TypeRef::shared(current)),
            ],
        );
    }
    current
}

fn shared_bean(fan_out: usize) -> TypeDescriptor {
    let address = TypeRef::shared(TypeDescriptor::bean(
        "bench::Address",
        vec![
            PropertyDescriptor::new("street", TypeRef::of::<String>()),
            PropertyDescriptor::new("city", TypeRef::of::<String>()),
            PropertyDescriptor::new("zip", TypeRef::of::<String>()),
        ],
    ));
    let properties = (0..fan_out)
        .map(|i| PropertyDescriptor::new(format!("a{i}"), address.clone()))
        .collect();
    TypeDescriptor::bean("bench::Directory", properties)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide");
    let generator = SchemaGenerator::builder().build().unwrap();

    for width in [10, 100, 1000] {
        let ty = wide_bean(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &ty, |b, ty| {
            b.iter(|| generator.session().generate(black_box(ty)).unwrap())
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep");
    let generator = SchemaGenerator::builder().build().unwrap();

    for depth in [5, 25, 90] {
        let ty = deep_bean(depth);
        group.bench_with_input(BenchmarkId::from_parameter(depth), &ty, |b, ty| {
            b.iter(|| generator.session().generate(black_box(ty)).unwrap())
        });
    }
    group.finish();
}

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared");
    let ty = shared_bean(200);

    for use_bean_defs in [false, true] {
        let generator = SchemaGenerator::builder()
            .use_bean_defs(use_bean_defs)
            .build()
            .unwrap();
        let label = if use_bean_defs { "bean_defs" } else { "inline" };
        group.bench_with_input(BenchmarkId::from_parameter(label), &ty, |b, ty| {
            b.iter(|| generator.session().generate(black_box(ty)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep, bench_shared);
criterion_main!(benches);
