//! End-to-end scenarios over the public handle surface

use robdd::{BddMgr, VarId};

fn abc(mgr: &BddMgr) -> (robdd::Bdd, robdd::Bdd, robdd::Bdd) {
    (
        mgr.posi_literal(VarId(0)),
        mgr.posi_literal(VarId(1)),
        mgr.posi_literal(VarId(2)),
    )
}

#[test]
fn conjunction_of_disjunction() {
    let mgr = BddMgr::classic("s1");
    let (a, b, c) = abc(&mgr);

    let f = a.or(&b).and(&c);
    assert_eq!(f.minterm_count(3), 3u32.into());
    assert_eq!(f.shortest_onepath_len(), Some(2));
    assert_eq!(f.support(), vec![VarId(0), VarId(1), VarId(2)]);
}

#[test]
fn parity_of_three() {
    let mgr = BddMgr::classic("s2");
    let (a, b, c) = abc(&mgr);

    let g = a.xor(&b.xor(&c));
    assert_eq!(g.minterm_count(3), 4u32.into());
    assert!(!g.is_cube());
    assert!(g.check_symmetry(VarId(0), VarId(1), false));
}

#[test]
fn full_cube() {
    let mgr = BddMgr::classic("s3");
    let (a, b, c) = abc(&mgr);

    let h = a.and(&b.and(&c));
    assert!(h.is_cube());
    assert!(h.is_posi_cube());
    assert_eq!(h.onepath(), h);
    assert_eq!(h.shortest_onepath_len(), Some(3));
}

#[test]
fn isop_of_an_interval() {
    let mgr = BddMgr::classic("s4");
    let (a, b, _) = abc(&mgr);

    let l = a.and(&b);
    let u = a.or(&b);
    let (cov_bdd, cov) = mgr.isop(&l, &u);

    assert!(cov_bdd == a || cov_bdd == b);
    assert_eq!(cov.product_num(), 1);

    // The cover sits inside the interval.
    assert_eq!(l.or(&cov_bdd), cov_bdd);
    assert_eq!(cov_bdd.and(&u), cov_bdd);
}

#[test]
fn existential_quantification() {
    let mgr = BddMgr::classic("s5");
    let (a, b, _) = abc(&mgr);

    assert_eq!(a.and(&b).esmooth(&b), a);
    assert!(a.or(&b).esmooth(&a.and(&b)).is_one());
}

#[test]
fn memory_capped_manager_overflows_sticky() {
    let mgr = BddMgr::classic("s6");
    let mut param = robdd::BddMgrParam::default();
    param.mem_limit = 1024;
    mgr.set_param(&param, robdd::BddMgrParam::MEM_LIMIT_MASK);

    // 64-variable parity cannot fit in 1 KB.
    let mut parity = mgr.zero();
    for i in 0..64 {
        parity = parity.xor(&mgr.posi_literal(VarId(i)));
    }
    assert!(parity.is_overflow());
    assert!(mgr.overflowed());

    // Overflow is in-band and infectious.
    let a = mgr.posi_literal(VarId(0));
    assert!(parity.and(&a).is_overflow());
    assert!(parity.not().is_overflow());
    assert!(parity.esmooth(&a).is_overflow());
    assert_eq!(parity.minterm_count(64), 0u32.into());
}

#[test]
fn error_operands_propagate() {
    let mgr = BddMgr::classic("err");
    let (a, b, _) = abc(&mgr);

    // The generalized cofactor of the zero constraint is the error function.
    let e = a.gcofactor(&mgr.zero());
    assert!(e.is_error());

    assert!(e.and(&b).is_error());
    assert!(e.or(&b).is_error());
    assert!(e.xor(&b).is_error());
    assert!(mgr.ite(&e, &a, &b).is_error());
    assert!(e.not().is_error());
    assert!(e.scc().is_error());
    assert!(mgr.and_exist(&e, &a, &b).is_error());
    assert!(e.esmooth(&a).is_error());
    let (bdd, cov) = mgr.isop(&e, &e);
    assert!(bdd.is_error());
    assert!(cov.is_zero());
}
