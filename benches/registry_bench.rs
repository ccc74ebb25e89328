use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hanzi_host::prelude::*;
use hanzi_host::impl_capability;

struct Marker;
impl_capability!(Marker);

const NAMES: [&str; 8] = [
    "ordering", "polyphone", "drawing", "pinyin", "radical", "idiom", "xhy", "words",
];

fn bench_attach_builtins(c: &mut Criterion) {
    c.bench_function("attach_builtin_plugins", |b| {
        b.iter(|| {
            let mut host = Host::default();
            host.add_plugins(default_plugins());
            host.bootstrap().unwrap();
            black_box(host);
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let mut registry = CapabilityRegistry::new();
    for name in NAMES {
        registry.attach(CapabilityDescriptor::new(name, Marker)).unwrap();
    }

    c.bench_function("get_as_hit", |b| {
        b.iter(|| black_box(registry.get_as::<Marker>(black_box("words")).is_ok()))
    });

    c.bench_function("has_miss", |b| {
        b.iter(|| black_box(registry.has(black_box("spell"))))
    });
}

criterion_group!(benches, bench_attach_builtins, bench_lookup);
criterion_main!(benches);
