use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use storefront_products::{apply, FilterCriteria, Product, ProductId, StorefrontSession};

const CATEGORIES: [&str; 6] = ["Apparel", "Kitchen", "Home", "Toys", "Garden", "Books"];

fn build_catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| {
            Product::new(
                ProductId::Numeric(i as u64),
                format!("Product {i} {}", if i % 3 == 0 { "Shirt" } else { "Mug" }),
                CATEGORIES[i % CATEGORIES.len()],
                (i % 250) as f64 + 0.99,
            )
            .expect("valid product")
        })
        .collect()
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_apply");

    let criteria = FilterCriteria::new()
        .with_search("shirt")
        .with_category("Apparel")
        .with_category("Home")
        .with_min_price("10")
        .with_max_price("200");

    for size in [100usize, 1_000, 10_000] {
        let catalog = build_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("all_predicates", size), &catalog, |b, catalog| {
            b.iter(|| apply(black_box(catalog), black_box(&criteria)).len())
        });

        group.bench_with_input(BenchmarkId::new("identity", size), &catalog, |b, catalog| {
            b.iter(|| apply(black_box(catalog), black_box(&FilterCriteria::default())).len())
        });
    }

    group.finish();
}

fn bench_session_refilter(c: &mut Criterion) {
    let mut session = StorefrontSession::new();
    session
        .complete_load(build_catalog(10_000), chrono::Utc::now())
        .expect("catalog loads");

    c.bench_function("session_refilter_10k", |b| {
        b.iter(|| {
            let visible = session
                .apply(FilterCriteria::new().with_search(black_box("mug")))
                .expect("session is ready");
            visible.len()
        })
    });
}

criterion_group!(benches, bench_apply, bench_session_refilter);
criterion_main!(benches);
