//! Tests for the operation engine

use crate::edge::{Literal, VarId};
use crate::manager::{Bdd, BddMgr};

fn vars3(mgr: &BddMgr) -> (Bdd, Bdd, Bdd) {
    (
        mgr.posi_literal(VarId(0)),
        mgr.posi_literal(VarId(1)),
        mgr.posi_literal(VarId(2)),
    )
}

#[test]
fn and_or_xor_basics() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    assert_eq!(a.and(&mgr.one()), a);
    assert!(a.and(&mgr.zero()).is_zero());
    assert_eq!(a.and(&a), a);
    assert!(a.and(&a.not()).is_zero());

    assert_eq!(a.or(&mgr.zero()), a);
    assert!(a.or(&mgr.one()).is_one());
    assert!(a.or(&a.not()).is_one());

    assert_eq!(a.xor(&mgr.zero()), a);
    assert_eq!(a.xor(&mgr.one()), a.not());
    assert!(a.xor(&a).is_zero());
    assert!(a.xor(&a.not()).is_one());

    // De Morgan through complement edges.
    assert_eq!(a.and(&b).not(), a.not().or(&b.not()));
}

#[test]
fn operators_mirror_methods() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);
    assert_eq!(&a & &b, a.and(&b));
    assert_eq!(&a | &b, a.or(&b));
    assert_eq!(&a ^ &b, a.xor(&b));
    assert_eq!(!&a, a.not());
}

#[test]
fn ite_reductions() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    assert_eq!(mgr.ite(&mgr.one(), &b, &c), b);
    assert_eq!(mgr.ite(&mgr.zero(), &b, &c), c);
    assert_eq!(mgr.ite(&a, &b, &b), b);
    assert_eq!(mgr.ite(&a, &b, &b.not()), a.xor(&b.not()));
    assert_eq!(mgr.ite(&a, &mgr.one(), &c), a.or(&c));
    assert_eq!(mgr.ite(&a, &b, &mgr.zero()), a.and(&b));

    // Literal condition above both branches.
    let g = b.and(&c);
    let h = b.or(&c);
    let full = a.and(&g).or(&a.not().and(&h));
    assert_eq!(mgr.ite(&a, &g, &h), full);
}

#[test]
fn single_variable_cofactor() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);
    let f = a.or(&b).and(&c);

    assert_eq!(f.cofactor(VarId(0), false), c);
    assert_eq!(f.cofactor(VarId(0), true), b.and(&c));
    // A variable outside the support leaves the function alone.
    assert_eq!(f.cofactor(VarId(9), false), f);
}

#[test]
fn generalized_cofactor() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    let f = a.xor(&b);
    // Cube constraint: plain restriction.
    assert_eq!(f.gcofactor(&a), b.not());
    assert_eq!(f.gcofactor(&a.not()), b);

    // Non-cube constraint keeps the defining identity
    // c ∧ (f ↓ c) == c ∧ f.
    let c = a.or(&b);
    let g = f.gcofactor(&c);
    assert_eq!(c.and(&g), c.and(&f));

    // The zero constraint has no cofactor.
    assert!(f.gcofactor(&mgr.zero()).is_error());
}

#[test]
fn xor_moment_detects_dependence() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);
    let f = a.xor(&b);
    assert!(f.xor_moment(VarId(0)).is_one());
    let g = a.and(&b);
    assert_eq!(g.xor_moment(VarId(0)), b);
    // No dependence, no moment.
    assert!(g.xor_moment(VarId(9)).is_zero());
}

#[test]
fn compose_substitutes_variables() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);
    let f = a.and(&b);

    // Identity substitution.
    mgr.compose_start();
    mgr.compose_reg(VarId(1), &b);
    assert_eq!(mgr.compose(&f), f);

    // b := c.
    mgr.compose_start();
    mgr.compose_reg(VarId(1), &c);
    assert_eq!(mgr.compose(&f), a.and(&c));

    // b := a ∨ c, under negation.
    mgr.compose_start();
    mgr.compose_reg(VarId(1), &a.or(&c));
    assert_eq!(mgr.compose(&f.not()), a.and(&a.or(&c)).not());
}

#[test]
fn push_down_moves_a_variable() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    // A lone literal pushed from level 0 to level 1 becomes that level's
    // literal; with polarity swap it arrives negated.
    assert_eq!(a.push_down(0, 1, false), b);
    assert_eq!(a.push_down(0, 1, true), b.not());
}

#[test]
fn push_down_renumbers_the_window() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    // f = a ∧ b with a pushed below b: b slides up to level 0, a lands on
    // level 2 (= c's slot).
    let f = a.and(&b);
    let g = f.push_down(0, 2, false);
    assert_eq!(g, mgr.posi_literal(VarId(0)).and(&c));
}

#[test]
fn esmooth_quantifies_cube_variables() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    assert_eq!(a.and(&b).esmooth(&b), a);
    assert!(a.or(&b).esmooth(&a.and(&b)).is_one());
    // Quantifying nothing changes nothing.
    assert_eq!(a.and(&b).esmooth(&mgr.one()), a.and(&b));
}

#[test]
fn and_exist_fuses_conjunction_and_quantification() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let f = a.or(&b);
    let g = b.or(&c);
    let cube = b.clone();
    assert_eq!(mgr.and_exist(&f, &g, &cube), f.and(&g).esmooth(&cube));

    // Quantified variable above both operands.
    let f2 = b.and(&c);
    let g2 = c.or(&b.not());
    assert_eq!(
        mgr.and_exist(&f2, &g2, &a),
        f2.and(&g2).esmooth(&a)
    );
}

#[test]
fn isop_covers_the_interval() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    let l = a.and(&b);
    let u = a.or(&b);
    let (cov_bdd, cov) = mgr.isop(&l, &u);

    // One product, lying between l and u.
    assert_eq!(cov.product_num(), 1);
    assert!(l.or(&cov_bdd) == cov_bdd);
    assert!(cov_bdd.and(&u) == cov_bdd);
    assert!(cov_bdd == a || cov_bdd == b);

    // Exact cover of a completely specified function.
    let f = a.xor(&b);
    let (g, cov) = mgr.isop(&f, &f);
    assert_eq!(g, f);
    assert_eq!(cov.product_num(), 2);
}

#[test]
fn isop_expression_evaluates_like_its_bdd() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);
    let f = a.and(&b).or(&b.not().and(&c));
    let (g, cov) = mgr.isop(&f, &f);
    assert_eq!(g, f);

    for bits in 0u32..8 {
        let assign = |var: VarId| bits & (1 << var.0) != 0;
        let mut cur = f.clone();
        for level in 0..3 {
            cur = cur.cofactor(VarId(level), !assign(VarId(level)));
        }
        assert_eq!(cov.eval(&assign), cur.is_one());
    }
}

#[test]
fn prime_cover_lists_all_primes() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    // f = ab + bc + ac: every implicant is prime, three of them.
    let f = a.and(&b).or(&b.and(&c)).or(&a.and(&c));
    let cov = mgr.prime_cover(&f, &f);
    assert_eq!(cov.product_num(), 3);

    // The consensus function ab + ~a c has the prime bc as well.
    let g = a.and(&b).or(&a.not().and(&c));
    let cov = mgr.prime_cover(&g, &g);
    assert_eq!(cov.product_num(), 3);
}

#[test]
fn minimal_support_of_a_literal_is_the_literal() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);
    assert_eq!(mgr.minimal_support(&a, &a), a);

    // f = a ∧ b needs both variables.
    let f = a.and(&b);
    assert_eq!(mgr.minimal_support(&f, &f), f);
}

#[test]
fn support_and_scc() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let f = a.or(&b).and(&c);
    assert_eq!(f.support(), vec![VarId(0), VarId(1), VarId(2)]);
    assert_eq!(f.support_cube(), a.and(&b).and(&c));

    // SCC keeps exactly the literals common to all 1-paths.
    let g = a.and(&b.or(&c));
    assert_eq!(g.scc(), a);
    let h = a.not().and(&b);
    assert_eq!(h.scc(), h);
    assert!(a.xor(&b).scc().is_one());
    assert!(mgr.zero().scc().is_zero());
}

#[test]
fn cube_predicates() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let h = a.and(&b).and(&c);
    assert!(h.is_cube());
    assert!(h.is_posi_cube());

    let m = a.and(&b.not());
    assert!(m.is_cube());
    assert!(!m.is_posi_cube());

    assert!(!a.xor(&b).is_cube());
    assert!(mgr.one().is_cube());
    assert!(!mgr.zero().is_cube());
}

#[test]
fn symmetry_checks() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let g = a.xor(&b).xor(&c);
    assert!(g.check_symmetry(VarId(0), VarId(1), false));
    assert!(g.check_symmetry(VarId(1), VarId(2), false));

    let f = a.and(&b.not());
    assert!(!f.check_symmetry(VarId(0), VarId(1), false));
    // Antisymmetric pair: swapping a with ¬b keeps it.
    assert!(f.check_symmetry(VarId(0), VarId(1), true));

    // Argument order does not matter.
    assert!(g.check_symmetry(VarId(2), VarId(0), false));
    assert!(!g.check_symmetry(VarId(0), VarId(0), false));
}

#[test]
fn onepath_picks_a_real_path() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let h = a.and(&b).and(&c);
    assert_eq!(h.onepath(), h);

    let f = a.or(&b).and(&c);
    let p = f.onepath();
    assert!(p.is_cube());
    assert_eq!(p.and(&f), p);
    assert!(mgr.one().onepath().is_one());
    assert!(mgr.zero().onepath().is_zero());
}

#[test]
fn shortest_onepath_minimizes_positive_literals() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let f = a.or(&b).and(&c);
    assert_eq!(f.shortest_onepath_len(), Some(2));
    // Two paths tie at length 2; the pruned result keeps exactly those.
    let p = f.shortest_onepath();
    assert!(!p.is_zero());
    assert_eq!(p.and(&f), p);
    assert_eq!(p.shortest_onepath_len(), Some(2));

    // With a unique minimum the result is the path cube itself.
    let f2 = a.or(&b.and(&c));
    assert_eq!(f2.shortest_onepath(), a);
    assert_eq!(f2.shortest_onepath_len(), Some(1));

    let h = a.and(&b).and(&c);
    assert_eq!(h.shortest_onepath_len(), Some(3));
    assert_eq!(h.shortest_onepath(), h);

    // A negative literal is free.
    let g = a.not().and(&b);
    assert_eq!(g.shortest_onepath_len(), Some(1));

    assert_eq!(mgr.one().shortest_onepath_len(), Some(0));
    assert_eq!(mgr.zero().shortest_onepath_len(), None);
}

#[test]
fn counting_operations() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let f = a.or(&b).and(&c);
    assert_eq!(f.minterm_count(3), 3u32.into());
    assert_eq!(mgr.one().minterm_count(3), 8u32.into());
    assert_eq!(mgr.zero().minterm_count(3), 0u32.into());

    // walsh0(f) = 2^n - 2 |f|.
    assert_eq!(f.walsh0(3), (8 - 2 * 3).into());
    assert_eq!(mgr.zero().walsh0(3), 8.into());
    assert_eq!(mgr.one().walsh0(3), (-8).into());

    // walsh1 for a: difference of the cofactors' walsh0, each taken over
    // all n variables.
    assert_eq!(a.walsh1(VarId(0), 1), 4.into());
    assert_eq!(a.not().walsh1(VarId(0), 1), (-4).into());
    assert_eq!(b.walsh1(VarId(0), 2), 0.into());
}

#[test]
fn counting_switches_to_bignum() {
    use num_bigint::BigUint;

    let mgr = BddMgr::classic("t");
    let a = mgr.posi_literal(VarId(0));

    // n = 64 no longer fits the machine-word path.
    let expected = BigUint::from(1u32) << 63usize;
    assert_eq!(a.minterm_count(64), expected);
    assert_eq!(mgr.one().minterm_count(128), BigUint::from(1u32) << 128usize);
    assert_eq!(mgr.one().walsh0(128), -(num_bigint::BigInt::from(1) << 128usize));
    assert_eq!(a.walsh1(VarId(0), 64), num_bigint::BigInt::from(1) << 65usize);
}

#[test]
fn node_counts_share_subgraphs() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);
    let f = b.and(&c);
    let g = a.and(&f);
    // g contains f's graph wholesale; counting both adds only g's root.
    let both = mgr.node_count(&[&f, &g]);
    assert_eq!(both, g.size());
    assert_eq!(g.size(), f.size() + 1);
}

#[test]
fn variable_set_algebra() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let ab = a.and(&b);
    let bc = b.and(&c);
    assert_eq!(ab.vscap(&bc), b);
    assert_eq!(ab.vsdiff(&bc), a);
    assert_eq!(bc.vsdiff(&ab), c);
    assert!(ab.vsintersect(&bc));
    assert!(!a.vsintersect(&bc));
    assert!(ab.vscap(&c).is_one());
}

#[test]
fn literal_set_algebra() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);

    let s1 = a.and(&b.not());
    let s2 = b.not().and(&c);
    assert_eq!(s1.lscap(&s2), b.not());
    assert_eq!(s1.lsdiff(&s2), a);
    assert!(s1.lsintersect(&s2));

    // Opposite phases are different elements.
    let s3 = b.and(&c);
    assert!(s1.lscap(&s3).is_one());
    assert!(!s1.lsintersect(&s3));
    assert_eq!(s1.lsdiff(&s3), s1);
}

#[test]
fn literal_extraction() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = vars3(&mgr);
    let cube = a.and(&b.not()).and(&c);
    assert_eq!(
        cube.to_literal_vec(),
        vec![
            Literal::new(VarId(0), false),
            Literal::new(VarId(1), true),
            Literal::new(VarId(2), false),
        ]
    );
    assert_eq!(mgr.one().to_literal_vec(), vec![]);
}

#[test]
fn truth_vector_construction() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);

    // Rows in (a, b) order: 00, 01, 10, 11.
    let f = mgr.tvec_to_bdd(&[false, false, false, true], &[VarId(0), VarId(1)]);
    assert_eq!(f, a.and(&b));

    let g = mgr.tvec_to_bdd(&[false, true, true, false], &[VarId(0), VarId(1)]);
    assert_eq!(g, a.xor(&b));

    // Length mismatch is a logic error.
    assert!(mgr.tvec_to_bdd(&[false; 3], &[VarId(0), VarId(1)]).is_error());
}

#[test]
fn intersects_is_satisfiability_of_the_conjunction() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = vars3(&mgr);
    assert!(a.intersects(&a.or(&b)));
    assert!(!a.intersects(&a.not()));
    assert!(!mgr.zero().intersects(&a));
    assert!(a.not().intersects(&b.not()));
}
