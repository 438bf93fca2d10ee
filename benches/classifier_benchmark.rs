use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ecosort::{Category, CategoryRule, Tag, WasteClassifier};

fn tags(names: &[&str]) -> Vec<Tag> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Tag::new(*name, 1.0 - i as f32 * 0.05))
        .collect()
}

fn bench_classification(c: &mut Criterion) {
    let classifier = WasteClassifier::default();
    let mut group = c.benchmark_group("Classification");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let recyclable = tags(&["bottle", "Plastic", "indoor"]);
    group.bench_function("recyclable", |b| b.iter(|| {
        classifier.classify(black_box(recyclable.as_slice()))
    }));

    let general = tags(&["rock", "stone", "outdoor", "ground", "grass", "nature", "soil", "sky"]);
    group.bench_function("no_match", |b| b.iter(|| {
        classifier.classify(black_box(general.as_slice()))
    }));

    let empty: Vec<Tag> = Vec::new();
    group.bench_function("empty", |b| b.iter(|| {
        classifier.classify(black_box(empty.as_slice()))
    }));

    // Typical service responses carry a few dozen tags
    let long: Vec<Tag> = (0..50).map(|i| Tag::new(format!("tag{}", i), 0.5)).collect();
    group.bench_function("fifty_tags", |b| b.iter(|| {
        classifier.classify_detailed(black_box(long.as_slice()))
    }));

    group.finish();
}

fn bench_large_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("Large Rules");
    group.sample_size(50);

    let keywords: Vec<String> = (0..1000).map(|i| format!("material{}", i)).collect();
    let classifier = WasteClassifier::builder()
        .add_rule(CategoryRule::new(Category::Recyclable, "Recycle it").with_keywords(&keywords))
        .unwrap()
        .build()
        .unwrap();

    let input = tags(&["bottle", "material999"]);
    group.bench_function("thousand_keywords", |b| b.iter(|| {
        classifier.classify(black_box(input.as_slice()))
    }));

    group.finish();
}

criterion_group!(benches, bench_classification, bench_large_rules);
criterion_main!(benches);
