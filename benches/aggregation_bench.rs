// ABOUTME: Criterion benchmarks for reference lookup, aggregation and full analysis
// ABOUTME: Measures per-meal latency for small and large ingredient lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the estimation pipeline.
//!
//! The extractor is scripted, so these numbers cover only local work:
//! classification, lookup, aggregation and disclaimer formatting.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use meal_estimator::aggregation::AggregationEngine;
use meal_estimator::config::AnalyzerConfig;
use meal_estimator::extraction::{ExtractedIngredient, StaticIngredientExtractor};
use meal_estimator::reference::FoodCompositionReference;
use meal_estimator::MealAnalyzer;
use std::sync::Arc;
use tokio::runtime::Runtime;

const NAMES: [&str; 8] = [
    "grilled chicken breast",
    "brown rice",
    "broccoli",
    "tomatoes",
    "rice",
    "olive oil",
    "mystery stew",
    "dragon fruit",
];

fn ingredients(count: usize) -> Vec<ExtractedIngredient> {
    (0..count)
        .map(|i| {
            let grams = 20.0 + f64::from(u32::try_from(i % 10).unwrap_or(0)) * 15.0;
            ExtractedIngredient::new(NAMES[i % NAMES.len()], grams)
        })
        .collect()
}

fn bench_lookup(c: &mut Criterion) {
    let reference = FoodCompositionReference::bundled().expect("bundled reference");
    let mut group = c.benchmark_group("reference_lookup");
    for name in ["broccoli", "tomatoes", "rice", "dragon fruit"] {
        group.bench_with_input(BenchmarkId::from_parameter(name), &name, |b, name| {
            b.iter(|| black_box(reference.lookup(black_box(name))).is_some());
        });
    }
    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let engine = AggregationEngine::new(Arc::new(
        FoodCompositionReference::bundled().expect("bundled reference"),
    ));
    let mut group = c.benchmark_group("aggregate");
    for count in [3_usize, 12, 48] {
        let input = ingredients(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &input, |b, input| {
            b.iter(|| black_box(engine.aggregate(black_box(input))));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let runtime = Runtime::new().expect("tokio runtime");
    let analyzer = MealAnalyzer::new(
        Arc::new(FoodCompositionReference::bundled().expect("bundled reference")),
        Arc::new(StaticIngredientExtractor::with_ingredients(ingredients(3))),
        AnalyzerConfig::default(),
    );

    c.bench_function("analyze_three_ingredients", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(
                analyzer
                    .analyze(
                        "150g grilled chicken breast, 200g brown rice, 100g broccoli",
                        None,
                        "lunch",
                    )
                    .await
                    .unwrap(),
            )
        });
    });
}

criterion_group!(benches, bench_lookup, bench_aggregate, bench_analyze);
criterion_main!(benches);
