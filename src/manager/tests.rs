//! Tests for managers, handles, reference counting and GC

use super::*;

fn three_vars(mgr: &BddMgr) -> (Bdd, Bdd, Bdd) {
    (
        mgr.posi_literal(VarId(0)),
        mgr.posi_literal(VarId(1)),
        mgr.posi_literal(VarId(2)),
    )
}

#[test]
fn constants_and_literals() {
    let mgr = BddMgr::classic("t");
    assert!(mgr.zero().is_zero());
    assert!(mgr.one().is_one());
    assert_eq!(mgr.zero().not(), mgr.one());

    let a = mgr.posi_literal(VarId(0));
    let na = mgr.nega_literal(VarId(0));
    assert_eq!(a.not(), na);
    assert_eq!(na.not(), a);
}

#[test]
fn handle_equality_is_canonical() {
    let mgr = BddMgr::classic("t");
    let (a, b, _) = three_vars(&mgr);
    let f = a.and(&b);
    let g = b.and(&a);
    assert_eq!(f, g);
    assert_eq!(f.root_edge(), g.root_edge());
    assert_ne!(f, a);
}

#[test]
fn variable_registry_is_monotonic() {
    let mgr = BddMgr::classic("t");
    assert!(mgr.new_var(VarId(0)));
    assert!(mgr.new_var(VarId(1)));
    // Re-registering is a no-op.
    assert!(mgr.new_var(VarId(0)));
    assert_eq!(mgr.var_list(), vec![VarId(0), VarId(1)]);
    assert_eq!(mgr.level(VarId(1)), Some(1));
    assert_eq!(mgr.varid(1), Some(VarId(1)));
    assert_eq!(mgr.level(VarId(7)), None);
}

#[test]
fn gc_reclaims_dropped_roots() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = three_vars(&mgr);
    let f = a.and(&b).or(&c.xor(&a));
    let live_before = mgr.node_num();
    assert!(live_before > 0);

    drop(f);
    assert!(mgr.garbage_num() > 0);
    mgr.gc(false);
    assert_eq!(mgr.garbage_num(), 0);
    assert!(mgr.node_num() < live_before);

    // The literals survived; their functions are intact.
    assert!(a.and(&b).intersects(&a));
}

#[test]
fn gc_keeps_everything_reachable_from_roots() {
    let mgr = BddMgr::classic("t");
    let (a, b, c) = three_vars(&mgr);
    let f = a.or(&b).and(&c);
    let count = f.minterm_count(3);

    // Everything not under a root goes away; f's answers do not change.
    mgr.gc(true);
    assert_eq!(f.minterm_count(3), count);
    assert_eq!(f.size(), mgr.node_count(&[&f]));
}

#[test]
fn automatic_gc_fires_on_root_decrement() {
    let mgr = BddMgr::classic("t");
    let mut param = BddMgrParam::default();
    param.gc_threshold = 0.0;
    param.gc_node_limit = 0;
    mgr.set_param(
        &param,
        BddMgrParam::GC_THRESHOLD_MASK | BddMgrParam::GC_NODE_LIMIT_MASK,
    );

    let (a, b, _) = three_vars(&mgr);
    let before = mgr.gc_count();
    let f = a.xor(&b);
    drop(f);
    assert!(mgr.gc_count() > before);
}

#[test]
fn disable_gc_nests() {
    let mgr = BddMgr::classic("t");
    let mut param = BddMgrParam::default();
    param.gc_threshold = 0.0;
    param.gc_node_limit = 0;
    mgr.set_param(&param, BddMgrParam::ALL_MASK);

    mgr.disable_gc();
    mgr.disable_gc();
    let (a, b, _) = three_vars(&mgr);
    let before = mgr.gc_count();
    drop(a.xor(&b));
    assert_eq!(mgr.gc_count(), before);

    mgr.enable_gc();
    drop(b.clone());
    assert_eq!(mgr.gc_count(), before);

    mgr.enable_gc();
    drop(b);
    assert!(mgr.gc_count() > before);
}

#[test]
fn params_apply_by_mask() {
    let mgr = BddMgr::classic("t");
    let defaults = mgr.param();

    let mut param = BddMgrParam::default();
    param.gc_threshold = 0.5;
    param.mem_limit = 123_456;
    mgr.set_param(&param, BddMgrParam::GC_THRESHOLD_MASK);

    let now = mgr.param();
    assert_eq!(now.gc_threshold, 0.5);
    // Unmasked fields kept their values.
    assert_eq!(now.mem_limit, defaults.mem_limit);

    mgr.set_param(&param, BddMgrParam::MEM_LIMIT_MASK);
    assert_eq!(mgr.param().mem_limit, 123_456);
}

#[test]
fn handles_outliving_their_manager_report_error() {
    let orphan;
    {
        let mgr = BddMgr::classic("short-lived");
        let (a, b, _) = three_vars(&mgr);
        orphan = a.and(&b);
        assert!(!orphan.is_error());
    }
    assert!(orphan.is_error());
    assert!(orphan.is_invalid());
    assert_eq!(orphan.support(), vec![]);
    assert_eq!(orphan.minterm_count(2), 0u32.into());

    // Operating on a dead handle stays in the error state.
    let again = orphan.not();
    assert!(again.is_error());
}

#[test]
fn default_manager_is_shared() {
    let m1 = BddMgr::default_mgr();
    let m2 = BddMgr::default_mgr();
    let a1 = m1.posi_literal(VarId(100));
    let a2 = m2.posi_literal(VarId(100));
    assert_eq!(a1, a2);
    assert_eq!(m1.name(), "default manager");
}

#[test]
fn modern_manager_matches_classic_results() {
    let classic = BddMgr::classic("c");
    let modern = BddMgr::modern("m");

    for mgr in [&classic, &modern] {
        let (a, b, c) = three_vars(mgr);
        let f = a.xor(&b).xor(&c);
        assert_eq!(f.minterm_count(3), 4u32.into());
        assert_eq!(f.support(), vec![VarId(0), VarId(1), VarId(2)]);
        let g = a.and(&b).and(&c);
        assert!(g.is_cube());
        assert_eq!(g.shortest_onepath_len(), Some(3));
    }

    // Each manager is canonical on its own; sizes agree across flavors.
    let (a1, b1, _) = three_vars(&classic);
    let (a2, b2, _) = three_vars(&modern);
    assert_eq!(a1.or(&b1).size(), a2.or(&b2).size());
}

#[test]
fn modern_manager_reclaims_like_classic() {
    let mgr = BddMgr::modern("m");
    let (a, b, c) = three_vars(&mgr);
    let f = a.or(&b).xor(&c);
    let before = mgr.node_num();
    drop(f);
    mgr.gc(true);
    assert!(mgr.node_num() < before);
    assert_eq!(mgr.garbage_num(), 0);
}

#[test]
fn cross_manager_queries_stay_independent() {
    let m1 = BddMgr::classic("one");
    let m2 = BddMgr::classic("two");
    let a1 = m1.posi_literal(VarId(0));
    let a2 = m2.posi_literal(VarId(0));
    // Same shape, different managers: never equal.
    assert_ne!(a1, a2);
}

#[test]
fn sweep_hooks_run_before_collection() {
    use std::cell::Cell;
    use std::rc::Rc;

    let mgr = BddMgr::classic("t");
    let fired = Rc::new(Cell::new(0u32));
    let fired2 = Rc::clone(&fired);
    mgr.reg_sweep_hook(Box::new(move || {
        fired2.set(fired2.get() + 1);
    }));
    mgr.gc(false);
    mgr.gc(false);
    assert_eq!(fired.get(), 2);
}

#[test]
fn log_stream_sees_gc_events() {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let _ = env_logger::builder().is_test(true).try_init();

    let mgr = BddMgr::classic("logged");
    let buf = Rc::new(RefCell::new(Vec::new()));
    mgr.set_log_stream(Box::new(SharedBuf(Rc::clone(&buf))));
    mgr.gc(false);
    let text = String::from_utf8(buf.borrow().clone()).unwrap();
    assert!(text.contains("GC() begin"));
    assert!(text.contains("GC() end"));

    let len = buf.borrow().len();
    mgr.unset_log_stream();
    mgr.gc(false);
    assert_eq!(buf.borrow().len(), len);
}

#[test]
fn statistics_track_memory_and_frees() {
    let mgr = BddMgr::classic("t");
    assert!(mgr.used_mem() > 0);
    assert!(!mgr.overflowed());

    let (a, b, _) = three_vars(&mgr);
    let f = a.xor(&b);
    drop(f);
    mgr.gc(false);
    // The xor node went onto the free list.
    assert!(mgr.avail_num() > 0);

    let g = a.xor(&b);
    drop(g);
    assert_eq!(mgr.name(), "t");
}
