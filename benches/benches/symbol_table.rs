use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use importdecl_core::{Attribute, Declaration, DeclarationSpec, MemberSpec, SymbolTable};
use std::hint::black_box;

fn flags(i: usize) -> Declaration {
    Declaration::try_from(DeclarationSpec {
        name: format!("Platform.Bench.Flags{i}"),
        flags: true,
        attributes: vec![
            Attribute::Imported,
            Attribute::IgnoreNamespace,
            Attribute::NumericValues,
        ],
        members: (0..8)
            .map(|bit| MemberSpec::new(format!("Bit{bit}"), Some(1 << bit)))
            .collect(),
        ..Default::default()
    })
    .expect("valid declaration")
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");
    for size in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || (0..size).map(flags).collect::<Vec<_>>(),
                |decls| {
                    let table = SymbolTable::new();
                    table.register_all(decls).expect("unique names");
                    black_box(table)
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let table = SymbolTable::new();
    table
        .register_all((0..10_000).map(flags))
        .expect("unique names");

    c.bench_function("resolve qualified", |b| {
        b.iter(|| table.resolve(black_box("Platform.Bench.Flags5000")))
    });
    c.bench_function("resolve projected", |b| {
        b.iter(|| table.resolve_projected(black_box("Flags5000")))
    });
    c.bench_function("combine flags", |b| {
        let decl = table.resolve("Platform.Bench.Flags42").expect("registered");
        b.iter(|| decl.combine_flags(black_box(&["Bit0", "Bit3", "Bit7"])))
    });
}

fn bench_feeds(c: &mut Criterion) {
    c.bench_function("register builtin feeds", |b| {
        b.iter(|| {
            let table = SymbolTable::new();
            importdecl_feeds::register(&table).expect("builtin manifest is valid");
            black_box(table)
        })
    });
}

criterion_group!(benches, bench_register, bench_resolve, bench_feeds);
criterion_main!(benches);
