//! Behavior at the memory ceiling
//!
//! Node slots come from whole chunks, so a freshly capped manager keeps
//! serving allocations out of its current chunk; the failure surfaces when
//! the next chunk is needed. These tests drive managers past that point.

use robdd::{Bdd, BddMgr, BddMgrParam, VarId};

fn cap_now(mgr: &BddMgr, limit: u64) {
    let mut param = BddMgrParam::default();
    param.mem_limit = limit;
    mgr.set_param(&param, BddMgrParam::MEM_LIMIT_MASK);
}

// Grows a positive cube until an allocation fails; returns the overflow
// handle.
fn first_overflow(mgr: &BddMgr, start: u32) -> Bdd {
    let mut tail = mgr.one();
    for i in start..start + 20_000 {
        let lit = mgr.posi_literal(VarId(i));
        tail = tail.and(&lit);
        if tail.is_overflow() {
            return tail;
        }
    }
    panic!("memory cap never hit");
}

#[test]
fn overflow_mid_computation_is_sticky() {
    let mgr = BddMgr::classic("cap");
    let n = 11u32;
    let vars: Vec<Bdd> = (0..n).map(|i| mgr.posi_literal(VarId(i))).collect();

    // Room for roughly one more node chunk; the accumulation below needs
    // far more than that.
    cap_now(&mgr, mgr.used_mem() + 50_000);

    let mut acc = mgr.zero();
    for word in 0..(1u32 << n) {
        let mut minterm = mgr.one();
        for (i, v) in vars.iter().enumerate() {
            let lit = if word & (1 << i) != 0 { v.clone() } else { v.not() };
            minterm = minterm.and(&lit);
        }
        acc = acc.or(&minterm);
        if acc.is_overflow() {
            break;
        }
    }

    assert!(acc.is_overflow());
    assert!(mgr.overflowed());

    // Still overflow after a collection; the flag never resets.
    mgr.gc(true);
    assert!(mgr.overflowed());
    let a = &vars[0];
    assert!(acc.and(a).is_overflow());
    assert!(acc.xor(a).is_overflow());
    assert_eq!(acc.minterm_count(n), 0u32.into());
    assert_eq!(acc.shortest_onepath_len(), None);
}

#[test]
fn functions_built_before_the_cap_stay_valid() {
    let mgr = BddMgr::classic("cap2");
    let a = mgr.posi_literal(VarId(0));
    let b = mgr.posi_literal(VarId(1));
    let f = a.xor(&b);

    cap_now(&mgr, 1);
    let ovf = first_overflow(&mgr, 2);
    assert!(ovf.is_overflow());
    assert!(mgr.overflowed());

    // Queries over existing nodes still answer.
    assert_eq!(f.minterm_count(2), 2u32.into());
    assert_eq!(f.support(), vec![VarId(0), VarId(1)]);
    assert!(!f.is_cube());
    assert_eq!(f.not().not(), f);
}

#[test]
fn overflow_and_error_are_distinct() {
    let mgr = BddMgr::classic("cap3");
    let a = mgr.posi_literal(VarId(0));

    let err = a.gcofactor(&mgr.zero());
    assert!(err.is_error());
    assert!(!err.is_overflow());

    cap_now(&mgr, 1);
    let ovf = first_overflow(&mgr, 1);
    assert!(ovf.is_overflow());
    assert!(!ovf.is_error());

    // Error wins where both appear.
    assert!(ovf.and(&err).is_error());
    assert!(err.and(&ovf).is_error());
}
