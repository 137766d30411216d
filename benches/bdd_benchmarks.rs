//! Criterion benchmarks for the core operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use robdd::{Bdd, BddMgr, VarId};

fn parity(mgr: &BddMgr, n: u32) -> Bdd {
    let mut acc = mgr.zero();
    for i in 0..n {
        acc = acc.xor(&mgr.posi_literal(VarId(i)));
    }
    acc
}

fn bench_parity_construction(c: &mut Criterion) {
    c.bench_function("parity_64", |b| {
        b.iter(|| {
            let mgr = BddMgr::classic("bench");
            black_box(parity(&mgr, 64))
        })
    });
}

fn bench_conjunction_chain(c: &mut Criterion) {
    c.bench_function("conjoin_disjunctions_24", |b| {
        b.iter(|| {
            let mgr = BddMgr::classic("bench");
            let mut acc = mgr.one();
            for i in 0..24u32 {
                let x = mgr.posi_literal(VarId(2 * i));
                let y = mgr.posi_literal(VarId(2 * i + 1));
                acc = acc.and(&x.or(&y));
            }
            black_box(acc)
        })
    });
}

fn bench_minterm_count(c: &mut Criterion) {
    let mgr = BddMgr::classic("bench");
    let f = parity(&mgr, 64);
    c.bench_function("minterm_count_parity_64", |b| {
        b.iter(|| black_box(f.minterm_count(64)))
    });
}

fn bench_isop(c: &mut Criterion) {
    let mgr = BddMgr::classic("bench");
    let mut f = mgr.zero();
    for i in 0..8u32 {
        let x = mgr.posi_literal(VarId(2 * i));
        let y = mgr.posi_literal(VarId(2 * i + 1));
        f = f.or(&x.and(&y));
    }
    c.bench_function("isop_8_products", |b| {
        b.iter(|| black_box(mgr.isop(&f, &f)))
    });
}

criterion_group!(
    benches,
    bench_parity_construction,
    bench_conjunction_chain,
    bench_minterm_count,
    bench_isop
);
criterion_main!(benches);
