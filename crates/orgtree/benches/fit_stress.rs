use criterion::{Criterion, criterion_group, criterion_main};
use orgtree::view::{
    TidyTreeLayout, TreeLayout, ViewConfig, Viewport, compute_fit_transform, extents,
};
use orgtree::{Record, build};
use std::hint::black_box;

fn bench_fit(c: &mut Criterion) {
    let records: Vec<Record> = (0..20_000usize)
        .map(|i| {
            let mut record = Record::from_pairs([("EMPLOYEENUMBER", i.to_string())]);
            if i > 0 {
                record.insert("SUPERVISORPARTYID", &((i - 1) / 5).to_string());
            }
            record
        })
        .collect();
    let (index, _) = build(&records).expect("build");
    let root = index.roots()[0];
    let layout = TidyTreeLayout::default();
    let config = ViewConfig::default();
    let viewport = Viewport::new(1920.0, 1080.0);

    let mut group = c.benchmark_group("fit_stress");
    group.sample_size(20);

    group.bench_function("layout_20k", |b| {
        b.iter(|| black_box(layout.layout(black_box(&index), root).len()));
    });

    let placed = extents(&layout.layout(&index, root));
    group.bench_function("fit_20k", |b| {
        b.iter(|| black_box(compute_fit_transform(black_box(&placed), viewport, &config)));
    });

    group.finish();
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
