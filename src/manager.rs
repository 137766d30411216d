//! BDD managers and client handles
//!
//! A manager owns everything: the node arena, the unique table(s), the
//! variable registry, the computed-result caches and the tuning parameters.
//! Clients never touch edges directly; they hold [`Bdd`] handles obtained
//! from a [`BddMgr`], and every handle keeps a root reference count on its
//! node so the mark-sweep collector knows what is live.
//!
//! Two manager flavors exist behind one factory: the *classic* manager with
//! a single global unique table, and the *modern* manager with a per-variable
//! sub-table (the layout a future reordering pass requires). Both share the
//! same recursive engine; they differ only in their [`store::NodeStore`].
//!
//! # Lifetime of a handle
//!
//! Cloning a handle increments the root count, dropping it decrements; the
//! first reference locks the whole subgraph, the last unlock turns it into
//! garbage for the next collection. A handle may outlive its manager: it
//! then reports *error* on every query, so tearing a manager down never
//! leaves a dangling root behind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::{Rc, Weak};

use log::debug;
use num_bigint::{BigInt, BigUint};

use crate::alloc::NodeArena;
use crate::cache::{CompTbl1, CompTbl2, CompTbl3, ComputedTable, IsopTbl};
use crate::edge::{Edge, Literal, NodeId, VarId, LEVEL_MAX};
use crate::expr::Expr;
use crate::node::Node;

pub(crate) mod store;

use store::{GlobalStore, NodeStore, PerVarStore};

#[cfg(test)]
mod tests;

const K_UNIT: u64 = 1 << 10;
const M_UNIT: u64 = 1 << 20;

const DEFAULT_GC_THRESHOLD: f64 = 0.10;
const DEFAULT_GC_NODE_LIMIT: u64 = 64 * K_UNIT;
const DEFAULT_NT_LOAD_LIMIT: f64 = 2.0;
const DEFAULT_RT_LOAD_LIMIT: f64 = 0.8;
const DEFAULT_MEM_LIMIT: u64 = 400 * M_UNIT;
const DEFAULT_DANGEROUS_ZONE: u64 = 10 * M_UNIT;

/// Tunable manager parameters.
///
/// Pass the record to [`BddMgr::set_param`] together with a mask of the
/// `*_MASK` bits selecting which fields to apply.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BddMgrParam {
    /// Garbage-to-live ratio above which a root decrement may trigger GC.
    pub gc_threshold: f64,
    /// Minimum live-node count below which GC is suppressed.
    pub gc_node_limit: u64,
    /// Average unique-table chain length at which the table doubles.
    pub nt_load_limit: f64,
    /// Computed-table fill fraction at which a cache doubles.
    pub rt_load_limit: f64,
    /// Hard memory ceiling in bytes; 0 means unlimited.
    pub mem_limit: u64,
    /// Reserved.
    pub dangerous_zone: u64,
}

impl BddMgrParam {
    pub const GC_THRESHOLD_MASK: u32 = 1 << 0;
    pub const GC_NODE_LIMIT_MASK: u32 = 1 << 1;
    pub const NT_LOAD_LIMIT_MASK: u32 = 1 << 2;
    pub const RT_LOAD_LIMIT_MASK: u32 = 1 << 3;
    pub const MEM_LIMIT_MASK: u32 = 1 << 4;
    pub const DANGEROUS_ZONE_MASK: u32 = 1 << 5;
    pub const ALL_MASK: u32 = (1 << 6) - 1;
}

impl Default for BddMgrParam {
    fn default() -> BddMgrParam {
        BddMgrParam {
            gc_threshold: DEFAULT_GC_THRESHOLD,
            gc_node_limit: DEFAULT_GC_NODE_LIMIT,
            nt_load_limit: DEFAULT_NT_LOAD_LIMIT,
            rt_load_limit: DEFAULT_RT_LOAD_LIMIT,
            mem_limit: DEFAULT_MEM_LIMIT,
            dangerous_zone: DEFAULT_DANGEROUS_ZONE,
        }
    }
}

/// One registered decision variable.
pub(crate) struct Var {
    pub(crate) varid: VarId,
    pub(crate) level: u32,
    /// Scratch mark used by compose, cofactoring, quantification and SCC.
    pub(crate) mark: u8,
    /// Substitution target while a compose pass is set up.
    pub(crate) comp_edge: Edge,
}

/// The operation surface shared by both manager flavors.
///
/// Handle types talk to a `dyn MgrOps` and never know which store backs it.
pub(crate) trait MgrOps {
    fn inc_rootref(&mut self, e: Edge);
    fn dec_rootref(&mut self, e: Edge);

    fn new_var(&mut self, var: VarId) -> bool;
    fn var_list(&self) -> Vec<VarId>;
    fn level(&self, var: VarId) -> Option<u32>;
    fn varid(&self, level: u32) -> Option<VarId>;

    fn make_posiliteral(&mut self, var: VarId) -> Edge;
    fn tvec_to_bdd(&mut self, v: &[bool], vars: &[VarId]) -> Edge;

    fn and_op(&mut self, f: Edge, g: Edge) -> Edge;
    fn or_op(&mut self, f: Edge, g: Edge) -> Edge;
    fn xor_op(&mut self, f: Edge, g: Edge) -> Edge;
    fn check_intersect(&mut self, f: Edge, g: Edge) -> Edge;
    fn ite_op(&mut self, f: Edge, g: Edge, h: Edge) -> Edge;

    fn scofactor(&mut self, f: Edge, var: VarId, inv: bool) -> Edge;
    fn gcofactor(&mut self, f: Edge, c: Edge) -> Edge;
    fn xor_moment(&mut self, f: Edge, var: VarId) -> Edge;

    fn compose_start(&mut self);
    fn compose_reg(&mut self, var: VarId, e: Edge);
    fn compose(&mut self, f: Edge) -> Edge;
    fn push_down(&mut self, f: Edge, x_level: u32, y_level: u32, inv: bool) -> Edge;

    fn esmooth(&mut self, f: Edge, svars: Edge) -> Edge;
    fn and_exist(&mut self, f: Edge, g: Edge, svars: Edge) -> Edge;

    fn isop(&mut self, l: Edge, u: Edge) -> (Edge, Expr);
    fn prime_cover(&mut self, l: Edge, u: Edge) -> Expr;
    fn minimal_support(&mut self, l: Edge, u: Edge) -> Edge;

    fn scc(&mut self, f: Edge) -> Edge;
    fn support(&mut self, es: &[Edge]) -> Vec<VarId>;
    fn support_cube(&mut self, es: &[Edge]) -> Edge;
    fn check_cube(&self, f: Edge) -> bool;
    fn check_posi_cube(&self, f: Edge) -> bool;
    fn check_symmetry(&mut self, f: Edge, x: VarId, y: VarId, inv: bool) -> bool;

    fn onepath(&mut self, f: Edge) -> Edge;
    fn shortest_onepath(&mut self, f: Edge) -> Edge;
    fn shortest_onepath_len(&mut self, f: Edge) -> Option<u64>;

    fn node_count(&mut self, es: &[Edge]) -> u64;
    fn minterm_count(&mut self, f: Edge, n: u32) -> BigUint;
    fn walsh0(&mut self, f: Edge, n: u32) -> BigInt;
    fn walsh1(&mut self, f: Edge, var: VarId, n: u32) -> BigInt;

    fn vscap(&mut self, f: Edge, g: Edge) -> Edge;
    fn vsdiff(&mut self, f: Edge, g: Edge) -> Edge;
    fn vsintersect(&self, f: Edge, g: Edge) -> bool;
    fn lscap(&mut self, f: Edge, g: Edge) -> Edge;
    fn lsdiff(&mut self, f: Edge, g: Edge) -> Edge;
    fn lsintersect(&self, f: Edge, g: Edge) -> bool;
    fn to_literal_vec(&self, f: Edge) -> Vec<Literal>;

    fn enable_gc(&mut self);
    fn disable_gc(&mut self);
    fn gc(&mut self, shrink: bool);
    fn reg_sweep_hook(&mut self, hook: Box<dyn FnMut()>);
    fn set_param(&mut self, param: &BddMgrParam, mask: u32);
    fn param(&self) -> BddMgrParam;

    fn name(&self) -> String;
    fn node_num(&self) -> u64;
    fn garbage_num(&self) -> u64;
    fn avail_num(&self) -> u64;
    fn gc_count(&self) -> u64;
    fn used_mem(&self) -> u64;
    fn overflowed(&self) -> bool;

    fn set_log_stream(&mut self, sink: Box<dyn Write>);
    fn unset_log_stream(&mut self);
}

/// Manager state shared by both flavors, parameterized over the unique-table
/// strategy.
pub(crate) struct MgrImpl<S: NodeStore> {
    pub(crate) mgr_name: String,
    pub(crate) params: BddMgrParam,
    /// Nesting count of `disable_gc`; zero means GC may run.
    gc_disable: u32,
    gc_count: u64,

    pub(crate) arena: NodeArena,
    pub(crate) store: S,

    pub(crate) vars: Vec<Var>,
    var_map: HashMap<VarId, u32>,
    /// Levels touched by the current marking walk (support, SCC).
    pub(crate) var_set: Vec<u32>,
    /// Highest relevant level for the per-call recursions (compose,
    /// quantification, cofactoring).
    pub(crate) last_level: u32,

    sweep_hooks: Vec<Box<dyn FnMut()>>,
    log_sink: Option<Box<dyn Write>>,

    pub(crate) and_tbl: CompTbl2,
    pub(crate) xor_tbl: CompTbl2,
    pub(crate) int_tbl: CompTbl2,
    pub(crate) ite_tbl: CompTbl3,
    pub(crate) cmp_tbl: CompTbl1,
    pub(crate) pd_tbl: CompTbl2,
    pub(crate) pd2_tbl: CompTbl2,
    pub(crate) pd3_tbl: CompTbl3,
    pub(crate) cofac_tbl: CompTbl2,
    pub(crate) xcof_tbl: CompTbl1,
    pub(crate) sm_tbl: CompTbl1,
    pub(crate) ae_tbl: CompTbl2,
    pub(crate) cubediv_tbl: CompTbl1,
    pub(crate) minsup_tbl: CompTbl2,
    pub(crate) isop_tbl: IsopTbl,
    pub(crate) pc_tbl: IsopTbl,
    pub(crate) cs_tbl: CompTbl2,
    pub(crate) cs1_tbl: CompTbl3,
    pub(crate) cs2_tbl: CompTbl2,
}

impl MgrImpl<GlobalStore> {
    pub(crate) fn classic(name: &str) -> MgrImpl<GlobalStore> {
        let mut arena = NodeArena::new(DEFAULT_MEM_LIMIT);
        let store = GlobalStore::new(&mut arena, DEFAULT_NT_LOAD_LIMIT);
        MgrImpl::with_parts(name, arena, store)
    }
}

impl MgrImpl<PerVarStore> {
    pub(crate) fn modern(name: &str) -> MgrImpl<PerVarStore> {
        let mut arena = NodeArena::new(DEFAULT_MEM_LIMIT);
        let store = PerVarStore::new(&mut arena);
        MgrImpl::with_parts(name, arena, store)
    }
}

impl<S: NodeStore> MgrImpl<S> {
    fn with_parts(name: &str, mut arena: NodeArena, store: S) -> MgrImpl<S> {
        let g = arena.gauge_mut();
        let and_tbl = CompTbl2::new("and_table", g);
        let xor_tbl = CompTbl2::new("xor_table", g);
        let int_tbl = CompTbl2::new("intersect_table", g);
        let ite_tbl = CompTbl3::new("ite_table", g);
        let cmp_tbl = CompTbl1::new("compose_table", g);
        let pd_tbl = CompTbl2::new("push_down_table", g);
        let pd2_tbl = CompTbl2::new("push_down_table2", g);
        let pd3_tbl = CompTbl3::new("push_down_table3", g);
        let cofac_tbl = CompTbl2::new("cofactor_table", g);
        let xcof_tbl = CompTbl1::new("xcofactor_table", g);
        let sm_tbl = CompTbl1::new("sm_table", g);
        let ae_tbl = CompTbl2::new("ae_table", g);
        let cubediv_tbl = CompTbl1::new("cubediv_table", g);
        let minsup_tbl = CompTbl2::new("minsup_table", g);
        let isop_tbl = IsopTbl::new("isop_table", g);
        let pc_tbl = IsopTbl::new("pc_table", g);
        let cs_tbl = CompTbl2::new("cs_table", g);
        let cs1_tbl = CompTbl3::new("cs1_table", g);
        let cs2_tbl = CompTbl2::new("cs2_table", g);

        MgrImpl {
            mgr_name: name.to_owned(),
            params: BddMgrParam::default(),
            gc_disable: 0,
            gc_count: 0,
            arena,
            store,
            vars: Vec::new(),
            var_map: HashMap::new(),
            var_set: Vec::new(),
            last_level: 0,
            sweep_hooks: Vec::new(),
            log_sink: None,
            and_tbl,
            xor_tbl,
            int_tbl,
            ite_tbl,
            cmp_tbl,
            pd_tbl,
            pd2_tbl,
            pd3_tbl,
            cofac_tbl,
            xcof_tbl,
            sm_tbl,
            ae_tbl,
            cubediv_tbl,
            minsup_tbl,
            isop_tbl,
            pc_tbl,
            cs_tbl,
            cs1_tbl,
            cs2_tbl,
        }
    }

    // -- logging ------------------------------------------------------------

    pub(crate) fn write_log(&mut self, msg: &str) {
        debug!(target: "robdd", "{}", msg);
        if let Some(sink) = &mut self.log_sink {
            let _ = writeln!(sink, "{}", msg);
        }
    }

    // -- node access helpers ------------------------------------------------

    #[inline]
    pub(crate) fn node_ref(&self, e: Edge) -> Option<&Node> {
        e.node_id().map(|id| self.arena.node(id))
    }

    /// The level of the edge's node; constants and failure values report the
    /// bottom-most pseudo level.
    #[inline]
    pub(crate) fn edge_level(&self, e: Edge) -> u32 {
        match e.node_id() {
            Some(id) => self.arena.node(id).level(),
            None => LEVEL_MAX,
        }
    }

    /// Both cofactors of a non-constant edge, polarity applied.
    #[inline]
    pub(crate) fn children_inv(&self, e: Edge) -> (Edge, Edge) {
        let id = e
            .node_id()
            .expect("cofactors requested for a constant edge - this is a bug in the engine");
        let inv = e.inv();
        let node = self.arena.node(id);
        (node.edge0_inv(inv), node.edge1_inv(inv))
    }

    /// Shannon split of one operand at `top`: its cofactors when the operand
    /// sits at `top`, the operand itself otherwise.
    #[inline]
    pub(crate) fn split1(&self, top: u32, e: Edge) -> (Edge, Edge) {
        if self.edge_level(e) == top {
            self.children_inv(e)
        } else {
            (e, e)
        }
    }

    /// Joint Shannon split of two operands at their minimum level.
    #[inline]
    pub(crate) fn split(&self, f: Edge, g: Edge) -> (u32, Edge, Edge, Edge, Edge) {
        let level = self.edge_level(f).min(self.edge_level(g));
        let (f_0, f_1) = self.split1(level, f);
        let (g_0, g_1) = self.split1(level, g);
        (level, f_0, f_1, g_0, g_1)
    }

    /// The reduce step: canonical node materialization through the store.
    #[inline]
    pub(crate) fn new_node(&mut self, level: u32, e0: Edge, e1: Edge) -> Edge {
        self.store
            .insert_or_find(&mut self.arena, level, e0, e1, self.params.nt_load_limit)
    }

    // -- reference counting -------------------------------------------------

    /// Increments the node's count; the 0→1 transition locks the subgraph.
    pub(crate) fn activate(&mut self, e: Edge) {
        if let Some(id) = e.node_id() {
            self.lock_node(id);
        }
    }

    fn lock_node(&mut self, id: NodeId) {
        if self.arena.node_mut(id).ref_mark.inc() == 1 {
            self.arena.note_locked();
            let (e0, e1) = {
                let n = self.arena.node(id);
                (n.edge0(), n.edge1())
            };
            self.activate(e0);
            self.activate(e1);
        }
    }

    /// Decrements the node's count; the 1→0 transition unlocks the subgraph.
    pub(crate) fn deactivate(&mut self, e: Edge) {
        if let Some(id) = e.node_id() {
            self.unlock_node(id);
        }
    }

    fn unlock_node(&mut self, id: NodeId) {
        if self.arena.node_mut(id).ref_mark.dec() == 0 {
            self.arena.note_unlocked();
            let (e0, e1) = {
                let n = self.arena.node(id);
                (n.edge0(), n.edge1())
            };
            self.deactivate(e0);
            self.deactivate(e1);
        }
    }

    // -- variables ----------------------------------------------------------

    pub(crate) fn var_level(&self, var: VarId) -> Option<u32> {
        self.var_map.get(&var).copied()
    }

    pub(crate) fn register_var(&mut self, var: VarId) -> u32 {
        if let Some(level) = self.var_level(var) {
            return level;
        }
        let level = self.vars.len() as u32;
        self.vars.push(Var {
            varid: var,
            level,
            mark: 0,
            comp_edge: Edge::error(),
        });
        self.var_map.insert(var, level);
        self.store.notify_new_var(&mut self.arena, level);
        level
    }

    /// Makes sure a variable record exists for `level`, synthesizing ids for
    /// any missing levels (push-down renumbers below the declared range).
    pub(crate) fn ensure_var_at(&mut self, level: u32) {
        while self.vars.len() as u32 <= level {
            let l = self.vars.len() as u32;
            let varid = VarId(l);
            self.vars.push(Var {
                varid,
                level: l,
                mark: 0,
                comp_edge: Edge::error(),
            });
            self.var_map.entry(varid).or_insert(l);
            self.store.notify_new_var(&mut self.arena, l);
        }
    }

    pub(crate) fn clear_varmark(&mut self) {
        for var in &mut self.vars {
            var.mark = 0;
        }
        self.var_set.clear();
    }

    // -- garbage collection -------------------------------------------------

    fn maybe_gc(&mut self) {
        let node_num = self.arena.node_num();
        let garbage = self.arena.garbage_num();
        if self.gc_disable == 0
            && node_num > self.params.gc_node_limit
            && garbage as f64 > node_num as f64 * self.params.gc_threshold
        {
            self.run_gc(false);
        }
    }

    pub(crate) fn run_gc(&mut self, shrink: bool) {
        let begin = format!("{}: GC() begin", self.mgr_name);
        self.write_log(&begin);

        self.sweep_caches();

        let mut hooks = std::mem::take(&mut self.sweep_hooks);
        for hook in &mut hooks {
            hook();
        }
        self.sweep_hooks = hooks;

        self.store.sweep(&mut self.arena);
        let collected = self.arena.sweep_chunks();
        self.gc_count += 1;

        if shrink {
            let load_limit = self.params.nt_load_limit;
            self.store.shrink(&mut self.arena, load_limit);
        }

        let end = format!(
            "{}: GC() end, {} nodes freed, {} live",
            self.mgr_name,
            collected,
            self.arena.node_num()
        );
        self.write_log(&end);
    }

    fn sweep_caches(&mut self) {
        let MgrImpl {
            ref arena,
            ref mut and_tbl,
            ref mut xor_tbl,
            ref mut int_tbl,
            ref mut ite_tbl,
            ref mut cmp_tbl,
            ref mut pd_tbl,
            ref mut pd2_tbl,
            ref mut pd3_tbl,
            ref mut cofac_tbl,
            ref mut xcof_tbl,
            ref mut sm_tbl,
            ref mut ae_tbl,
            ref mut cubediv_tbl,
            ref mut minsup_tbl,
            ref mut isop_tbl,
            ref mut pc_tbl,
            ref mut cs_tbl,
            ref mut cs1_tbl,
            ref mut cs2_tbl,
            ..
        } = *self;
        let tables: [&mut dyn ComputedTable; 19] = [
            and_tbl, xor_tbl, int_tbl, ite_tbl, cmp_tbl, pd_tbl, pd2_tbl, pd3_tbl, cofac_tbl,
            xcof_tbl, sm_tbl, ae_tbl, cubediv_tbl, minsup_tbl, isop_tbl, pc_tbl, cs_tbl, cs1_tbl,
            cs2_tbl,
        ];
        for tbl in tables {
            if tbl.used_num() > 0 {
                tbl.sweep(arena);
            }
        }
    }

    fn set_cache_load_limits(&mut self, load_limit: f64) {
        let MgrImpl {
            ref mut and_tbl,
            ref mut xor_tbl,
            ref mut int_tbl,
            ref mut ite_tbl,
            ref mut cmp_tbl,
            ref mut pd_tbl,
            ref mut pd2_tbl,
            ref mut pd3_tbl,
            ref mut cofac_tbl,
            ref mut xcof_tbl,
            ref mut sm_tbl,
            ref mut ae_tbl,
            ref mut cubediv_tbl,
            ref mut minsup_tbl,
            ref mut isop_tbl,
            ref mut pc_tbl,
            ref mut cs_tbl,
            ref mut cs1_tbl,
            ref mut cs2_tbl,
            ..
        } = *self;
        let tables: [&mut dyn ComputedTable; 19] = [
            and_tbl, xor_tbl, int_tbl, ite_tbl, cmp_tbl, pd_tbl, pd2_tbl, pd3_tbl, cofac_tbl,
            xcof_tbl, sm_tbl, ae_tbl, cubediv_tbl, minsup_tbl, isop_tbl, pc_tbl, cs_tbl, cs1_tbl,
            cs2_tbl,
        ];
        for tbl in tables {
            tbl.set_load_limit(load_limit);
        }
    }
}

impl<S: NodeStore> MgrOps for MgrImpl<S> {
    fn inc_rootref(&mut self, e: Edge) {
        self.activate(e);
    }

    fn dec_rootref(&mut self, e: Edge) {
        self.deactivate(e);
        self.maybe_gc();
    }

    fn new_var(&mut self, var: VarId) -> bool {
        self.register_var(var);
        true
    }

    fn var_list(&self) -> Vec<VarId> {
        self.vars.iter().map(|v| v.varid).collect()
    }

    fn level(&self, var: VarId) -> Option<u32> {
        self.var_level(var)
    }

    fn varid(&self, level: u32) -> Option<VarId> {
        self.vars.get(level as usize).map(|v| v.varid)
    }

    fn make_posiliteral(&mut self, var: VarId) -> Edge {
        let level = self.register_var(var);
        self.new_node(level, Edge::zero(), Edge::one())
    }

    fn tvec_to_bdd(&mut self, v: &[bool], vars: &[VarId]) -> Edge {
        self.tvec_to_bdd(v, vars)
    }

    fn and_op(&mut self, f: Edge, g: Edge) -> Edge {
        self.and_op(f, g)
    }

    fn or_op(&mut self, f: Edge, g: Edge) -> Edge {
        self.or_op(f, g)
    }

    fn xor_op(&mut self, f: Edge, g: Edge) -> Edge {
        self.xor_op(f, g)
    }

    fn check_intersect(&mut self, f: Edge, g: Edge) -> Edge {
        self.check_intersect(f, g)
    }

    fn ite_op(&mut self, f: Edge, g: Edge, h: Edge) -> Edge {
        self.ite_op(f, g, h)
    }

    fn scofactor(&mut self, f: Edge, var: VarId, inv: bool) -> Edge {
        self.scofactor(f, var, inv)
    }

    fn gcofactor(&mut self, f: Edge, c: Edge) -> Edge {
        self.gcofactor(f, c)
    }

    fn xor_moment(&mut self, f: Edge, var: VarId) -> Edge {
        self.xor_moment(f, var)
    }

    fn compose_start(&mut self) {
        self.compose_start()
    }

    fn compose_reg(&mut self, var: VarId, e: Edge) {
        self.compose_reg(var, e)
    }

    fn compose(&mut self, f: Edge) -> Edge {
        self.compose(f)
    }

    fn push_down(&mut self, f: Edge, x_level: u32, y_level: u32, inv: bool) -> Edge {
        self.push_down(f, x_level, y_level, inv)
    }

    fn esmooth(&mut self, f: Edge, svars: Edge) -> Edge {
        self.esmooth(f, svars)
    }

    fn and_exist(&mut self, f: Edge, g: Edge, svars: Edge) -> Edge {
        self.and_exist(f, g, svars)
    }

    fn isop(&mut self, l: Edge, u: Edge) -> (Edge, Expr) {
        self.isop(l, u)
    }

    fn prime_cover(&mut self, l: Edge, u: Edge) -> Expr {
        self.prime_cover(l, u)
    }

    fn minimal_support(&mut self, l: Edge, u: Edge) -> Edge {
        self.minimal_support(l, u)
    }

    fn scc(&mut self, f: Edge) -> Edge {
        self.scc(f)
    }

    fn support(&mut self, es: &[Edge]) -> Vec<VarId> {
        self.support(es)
    }

    fn support_cube(&mut self, es: &[Edge]) -> Edge {
        self.support_cube(es)
    }

    fn check_cube(&self, f: Edge) -> bool {
        self.check_cube(f)
    }

    fn check_posi_cube(&self, f: Edge) -> bool {
        self.check_posi_cube(f)
    }

    fn check_symmetry(&mut self, f: Edge, x: VarId, y: VarId, inv: bool) -> bool {
        self.check_symmetry(f, x, y, inv)
    }

    fn onepath(&mut self, f: Edge) -> Edge {
        self.onepath(f)
    }

    fn shortest_onepath(&mut self, f: Edge) -> Edge {
        self.shortest_onepath(f)
    }

    fn shortest_onepath_len(&mut self, f: Edge) -> Option<u64> {
        self.shortest_onepath_len(f)
    }

    fn node_count(&mut self, es: &[Edge]) -> u64 {
        self.node_count(es)
    }

    fn minterm_count(&mut self, f: Edge, n: u32) -> BigUint {
        self.minterm_count(f, n)
    }

    fn walsh0(&mut self, f: Edge, n: u32) -> BigInt {
        self.walsh0(f, n)
    }

    fn walsh1(&mut self, f: Edge, var: VarId, n: u32) -> BigInt {
        self.walsh1(f, var, n)
    }

    fn vscap(&mut self, f: Edge, g: Edge) -> Edge {
        self.vscap(f, g)
    }

    fn vsdiff(&mut self, f: Edge, g: Edge) -> Edge {
        self.vsdiff(f, g)
    }

    fn vsintersect(&self, f: Edge, g: Edge) -> bool {
        self.vsintersect(f, g)
    }

    fn lscap(&mut self, f: Edge, g: Edge) -> Edge {
        self.lscap(f, g)
    }

    fn lsdiff(&mut self, f: Edge, g: Edge) -> Edge {
        self.lsdiff(f, g)
    }

    fn lsintersect(&self, f: Edge, g: Edge) -> bool {
        self.lsintersect(f, g)
    }

    fn to_literal_vec(&self, f: Edge) -> Vec<Literal> {
        self.to_literal_vec(f)
    }

    fn enable_gc(&mut self) {
        if self.gc_disable > 0 {
            self.gc_disable -= 1;
        }
    }

    fn disable_gc(&mut self) {
        self.gc_disable += 1;
    }

    fn gc(&mut self, shrink: bool) {
        self.run_gc(shrink);
    }

    fn reg_sweep_hook(&mut self, hook: Box<dyn FnMut()>) {
        self.sweep_hooks.push(hook);
    }

    fn set_param(&mut self, param: &BddMgrParam, mask: u32) {
        if mask & BddMgrParam::GC_THRESHOLD_MASK != 0 {
            self.params.gc_threshold = param.gc_threshold;
        }
        if mask & BddMgrParam::GC_NODE_LIMIT_MASK != 0 {
            self.params.gc_node_limit = param.gc_node_limit;
        }
        if mask & BddMgrParam::NT_LOAD_LIMIT_MASK != 0 {
            self.params.nt_load_limit = param.nt_load_limit;
        }
        if mask & BddMgrParam::RT_LOAD_LIMIT_MASK != 0 {
            self.params.rt_load_limit = param.rt_load_limit;
            let load_limit = self.params.rt_load_limit;
            self.set_cache_load_limits(load_limit);
        }
        if mask & BddMgrParam::MEM_LIMIT_MASK != 0 {
            self.params.mem_limit = param.mem_limit;
            self.arena.gauge_mut().set_limit(param.mem_limit);
        }
        if mask & BddMgrParam::DANGEROUS_ZONE_MASK != 0 {
            self.params.dangerous_zone = param.dangerous_zone;
        }
    }

    fn param(&self) -> BddMgrParam {
        self.params
    }

    fn name(&self) -> String {
        self.mgr_name.clone()
    }

    fn node_num(&self) -> u64 {
        self.arena.node_num()
    }

    fn garbage_num(&self) -> u64 {
        self.arena.garbage_num()
    }

    fn avail_num(&self) -> u64 {
        self.arena.free_num()
    }

    fn gc_count(&self) -> u64 {
        self.gc_count
    }

    fn used_mem(&self) -> u64 {
        self.arena.gauge().used()
    }

    fn overflowed(&self) -> bool {
        self.arena.gauge().overflowed()
    }

    fn set_log_stream(&mut self, sink: Box<dyn Write>) {
        self.log_sink = Some(sink);
    }

    fn unset_log_stream(&mut self) {
        self.log_sink = None;
    }
}

// ---------------------------------------------------------------------------
// public handles
// ---------------------------------------------------------------------------

type SharedMgr = Rc<RefCell<dyn MgrOps>>;
type WeakMgr = Weak<RefCell<dyn MgrOps>>;

thread_local! {
    static DEFAULT_MGR: RefCell<Option<SharedMgr>> = const { RefCell::new(None) };
}

/// A BDD manager handle.
///
/// Create one with [`BddMgr::classic`] or [`BddMgr::modern`], or share the
/// thread's lazily created default manager via [`BddMgr::default_mgr`].
/// Cloning shares the same underlying manager. All [`Bdd`] handles built
/// through a manager belong to it; handles from different managers must not
/// be mixed.
#[derive(Clone)]
pub struct BddMgr {
    inner: SharedMgr,
}

impl BddMgr {
    /// A manager with one global unique table and variables identified
    /// directly by their level.
    pub fn classic(name: &str) -> BddMgr {
        BddMgr {
            inner: Rc::new(RefCell::new(MgrImpl::classic(name))),
        }
    }

    /// A manager with a unique sub-table per variable.
    pub fn modern(name: &str) -> BddMgr {
        BddMgr {
            inner: Rc::new(RefCell::new(MgrImpl::modern(name))),
        }
    }

    /// The thread's default manager, created on first access.
    pub fn default_mgr() -> BddMgr {
        DEFAULT_MGR.with(|slot| {
            let mut slot = slot.borrow_mut();
            let inner = slot
                .get_or_insert_with(|| Rc::new(RefCell::new(MgrImpl::classic("default manager"))))
                .clone();
            BddMgr { inner }
        })
    }

    fn wrap(&self, e: Edge) -> Bdd {
        Bdd::from_edge(&self.inner, e)
    }

    /// The constant-false function.
    pub fn zero(&self) -> Bdd {
        self.wrap(Edge::zero())
    }

    /// The constant-true function.
    pub fn one(&self) -> Bdd {
        self.wrap(Edge::one())
    }

    /// Registers `var` (appending it to the order if new).
    pub fn new_var(&self, var: VarId) -> bool {
        self.inner.borrow_mut().new_var(var)
    }

    /// All registered variables, level order.
    pub fn var_list(&self) -> Vec<VarId> {
        self.inner.borrow().var_list()
    }

    /// The level assigned to `var`.
    pub fn level(&self, var: VarId) -> Option<u32> {
        self.inner.borrow().level(var)
    }

    /// The variable sitting at `level`.
    pub fn varid(&self, level: u32) -> Option<VarId> {
        self.inner.borrow().varid(level)
    }

    /// The literal of `var`, negated when `inv` is true.
    pub fn literal(&self, var: VarId, inv: bool) -> Bdd {
        let e = self.inner.borrow_mut().make_posiliteral(var);
        self.wrap(e.add_inv(inv))
    }

    /// The positive literal of `var`.
    pub fn posi_literal(&self, var: VarId) -> Bdd {
        self.literal(var, false)
    }

    /// The negative literal of `var`.
    pub fn nega_literal(&self, var: VarId) -> Bdd {
        self.literal(var, true)
    }

    /// Builds the function given by a truth-table vector over `vars`.
    /// `values.len()` must equal `2^vars.len()`; index 0 is the all-zeros row
    /// with `vars[0]` as the most significant input. Returns the error
    /// function on a length mismatch.
    pub fn tvec_to_bdd(&self, values: &[bool], vars: &[VarId]) -> Bdd {
        let e = self.inner.borrow_mut().tvec_to_bdd(values, vars);
        self.wrap(e)
    }

    /// If-then-else over three functions.
    pub fn ite(&self, f: &Bdd, g: &Bdd, h: &Bdd) -> Bdd {
        debug_assert!(f.same_mgr(&self.inner) && g.same_mgr(&self.inner) && h.same_mgr(&self.inner));
        let e = self
            .inner
            .borrow_mut()
            .ite_op(f.root_edge(), g.root_edge(), h.root_edge());
        self.wrap(e)
    }

    /// Conjunction fused with existential quantification:
    /// `∃ cube . (f ∧ g)`.
    pub fn and_exist(&self, f: &Bdd, g: &Bdd, cube: &Bdd) -> Bdd {
        debug_assert!(
            f.same_mgr(&self.inner) && g.same_mgr(&self.inner) && cube.same_mgr(&self.inner)
        );
        let e = self
            .inner
            .borrow_mut()
            .and_exist(f.root_edge(), g.root_edge(), cube.root_edge());
        self.wrap(e)
    }

    /// Irredundant sum-of-products of the incompletely specified function
    /// bounded by `l ≤ f ≤ u`: the cover's BDD plus its symbolic form.
    pub fn isop(&self, l: &Bdd, u: &Bdd) -> (Bdd, Expr) {
        debug_assert!(l.same_mgr(&self.inner) && u.same_mgr(&self.inner));
        let (e, cov) = self.inner.borrow_mut().isop(l.root_edge(), u.root_edge());
        (self.wrap(e), cov)
    }

    /// The cover of all prime implicants of `[l, u]`.
    pub fn prime_cover(&self, l: &Bdd, u: &Bdd) -> Expr {
        debug_assert!(l.same_mgr(&self.inner) && u.same_mgr(&self.inner));
        self.inner
            .borrow_mut()
            .prime_cover(l.root_edge(), u.root_edge())
    }

    /// The function whose prime implicants are the minimal support sets of
    /// `[l, u]`.
    pub fn minimal_support(&self, l: &Bdd, u: &Bdd) -> Bdd {
        debug_assert!(l.same_mgr(&self.inner) && u.same_mgr(&self.inner));
        let e = self
            .inner
            .borrow_mut()
            .minimal_support(l.root_edge(), u.root_edge());
        self.wrap(e)
    }

    /// Starts collecting substitutions for a multiple compose.
    pub fn compose_start(&self) {
        self.inner.borrow_mut().compose_start();
    }

    /// Registers `var := g` for the pending compose.
    pub fn compose_reg(&self, var: VarId, g: &Bdd) {
        debug_assert!(g.same_mgr(&self.inner));
        self.inner.borrow_mut().compose_reg(var, g.root_edge());
    }

    /// Applies the registered substitutions to `f`.
    pub fn compose(&self, f: &Bdd) -> Bdd {
        debug_assert!(f.same_mgr(&self.inner));
        let e = self.inner.borrow_mut().compose(f.root_edge());
        self.wrap(e)
    }

    /// Shared node count of the given functions.
    pub fn node_count(&self, fs: &[&Bdd]) -> u64 {
        let es: Vec<Edge> = fs.iter().map(|f| f.root_edge()).collect();
        self.inner.borrow_mut().node_count(&es)
    }

    /// Union of the supports of the given functions, level order.
    pub fn support(&self, fs: &[&Bdd]) -> Vec<VarId> {
        let es: Vec<Edge> = fs.iter().map(|f| f.root_edge()).collect();
        self.inner.borrow_mut().support(&es)
    }

    /// Union of the supports as a positive cube.
    pub fn support_cube(&self, fs: &[&Bdd]) -> Bdd {
        let es: Vec<Edge> = fs.iter().map(|f| f.root_edge()).collect();
        let e = self.inner.borrow_mut().support_cube(&es);
        self.wrap(e)
    }

    /// Applies the masked fields of `param`.
    pub fn set_param(&self, param: &BddMgrParam, mask: u32) {
        self.inner.borrow_mut().set_param(param, mask);
    }

    /// Current parameter values.
    pub fn param(&self) -> BddMgrParam {
        self.inner.borrow().param()
    }

    /// Re-enables GC (undoes one `disable_gc`).
    pub fn enable_gc(&self) {
        self.inner.borrow_mut().enable_gc();
    }

    /// Disables GC until a matching `enable_gc`.
    pub fn disable_gc(&self) {
        self.inner.borrow_mut().disable_gc();
    }

    /// Collects garbage now; `shrink` also lets the unique table contract.
    pub fn gc(&self, shrink: bool) {
        self.inner.borrow_mut().gc(shrink);
    }

    /// Registers a callback run at the start of every GC, before the node
    /// sweep. External caches keyed by nodes hook in here.
    pub fn reg_sweep_hook(&self, hook: Box<dyn FnMut()>) {
        self.inner.borrow_mut().reg_sweep_hook(hook);
    }

    /// The manager's name.
    pub fn name(&self) -> String {
        self.inner.borrow().name()
    }

    /// Nodes currently allocated (live plus garbage).
    pub fn node_num(&self) -> u64 {
        self.inner.borrow().node_num()
    }

    /// Allocated nodes that nothing references.
    pub fn garbage_num(&self) -> u64 {
        self.inner.borrow().garbage_num()
    }

    /// Free-list length.
    pub fn avail_num(&self) -> u64 {
        self.inner.borrow().avail_num()
    }

    /// Number of collections run so far.
    pub fn gc_count(&self) -> u64 {
        self.inner.borrow().gc_count()
    }

    /// Bytes currently charged against the memory ceiling.
    pub fn used_mem(&self) -> u64 {
        self.inner.borrow().used_mem()
    }

    /// True once any allocation has failed; stays set.
    pub fn overflowed(&self) -> bool {
        self.inner.borrow().overflowed()
    }

    /// Routes internal event lines (GC, resize, allocation failure) to
    /// `sink` in addition to the `log` facade.
    pub fn set_log_stream(&self, sink: Box<dyn Write>) {
        self.inner.borrow_mut().set_log_stream(sink);
    }

    /// Removes the sink installed by [`BddMgr::set_log_stream`].
    pub fn unset_log_stream(&self) {
        self.inner.borrow_mut().unset_log_stream();
    }
}

/// A reference-counted Boolean function handle.
///
/// Equality is canonical: two handles compare equal exactly when they denote
/// the same function in the same manager. A handle that outlives its manager
/// answers `is_error` and propagates *error* from every operation.
pub struct Bdd {
    mgr: WeakMgr,
    root: Edge,
}

impl Bdd {
    pub(crate) fn from_edge(mgr: &SharedMgr, e: Edge) -> Bdd {
        mgr.borrow_mut().inc_rootref(e);
        Bdd {
            mgr: Rc::downgrade(mgr),
            root: e,
        }
    }

    fn live_mgr(&self) -> Option<SharedMgr> {
        self.mgr.upgrade()
    }

    fn same_mgr(&self, other: &SharedMgr) -> bool {
        self.mgr
            .upgrade()
            .map(|m| Rc::ptr_eq(&m, other))
            .unwrap_or(false)
    }

    /// The canonical root edge. Handles whose manager is gone report the
    /// error edge.
    pub fn root_edge(&self) -> Edge {
        if self.mgr.strong_count() == 0 {
            Edge::error()
        } else {
            self.root
        }
    }

    /// The manager this handle belongs to, if it is still alive.
    pub fn manager(&self) -> Option<BddMgr> {
        self.live_mgr().map(|inner| BddMgr { inner })
    }

    fn unary(&self, op: impl FnOnce(&mut dyn MgrOps, Edge) -> Edge) -> Bdd {
        match self.live_mgr() {
            Some(m) => {
                let e = op(&mut *m.borrow_mut(), self.root);
                Bdd::from_edge(&m, e)
            }
            None => Bdd {
                mgr: self.mgr.clone(),
                root: Edge::error(),
            },
        }
    }

    fn binary(&self, other: &Bdd, op: impl FnOnce(&mut dyn MgrOps, Edge, Edge) -> Edge) -> Bdd {
        match self.live_mgr() {
            Some(m) => {
                debug_assert!(
                    other.same_mgr(&m),
                    "operands belong to different BDD managers"
                );
                let e = op(&mut *m.borrow_mut(), self.root, other.root_edge());
                Bdd::from_edge(&m, e)
            }
            None => Bdd {
                mgr: self.mgr.clone(),
                root: Edge::error(),
            },
        }
    }

    /// Conjunction.
    pub fn and(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.and_op(f, g))
    }

    /// Disjunction.
    pub fn or(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.or_op(f, g))
    }

    /// Exclusive or.
    pub fn xor(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.xor_op(f, g))
    }

    /// Negation. Complement edges make this constant time.
    pub fn not(&self) -> Bdd {
        self.unary(|_, f| f.not())
    }

    /// `if self then g else h`.
    pub fn ite(&self, g: &Bdd, h: &Bdd) -> Bdd {
        match self.live_mgr() {
            Some(m) => {
                debug_assert!(g.same_mgr(&m) && h.same_mgr(&m));
                let e = m
                    .borrow_mut()
                    .ite_op(self.root, g.root_edge(), h.root_edge());
                Bdd::from_edge(&m, e)
            }
            None => Bdd {
                mgr: self.mgr.clone(),
                root: Edge::error(),
            },
        }
    }

    /// Cofactor with respect to one literal (`var = 1`, or `var = 0` when
    /// `inv` is true).
    pub fn cofactor(&self, var: VarId, inv: bool) -> Bdd {
        self.unary(|m, f| m.scofactor(f, var, inv))
    }

    /// Generalized cofactor (constrain) of `self` by `c`; `c` must not be
    /// the zero function (that yields the error function).
    pub fn gcofactor(&self, c: &Bdd) -> Bdd {
        self.binary(c, |m, f, g| m.gcofactor(f, g))
    }

    /// Davio moment `f|x̄ ⊕ f|x`.
    pub fn xor_moment(&self, var: VarId) -> Bdd {
        self.unary(|m, f| m.xor_moment(f, var))
    }

    /// Existentially quantifies the variables of the positive cube `cube`.
    pub fn esmooth(&self, cube: &Bdd) -> Bdd {
        self.binary(cube, |m, f, s| m.esmooth(f, s))
    }

    /// Moves the variable at `x_level` down to `y_level` (`y > x`), swapping
    /// branch polarity when `inv` is true.
    pub fn push_down(&self, x_level: u32, y_level: u32, inv: bool) -> Bdd {
        self.unary(|m, f| m.push_down(f, x_level, y_level, inv))
    }

    /// Smallest cube containing the function.
    pub fn scc(&self) -> Bdd {
        self.unary(|m, f| m.scc(f))
    }

    /// The support variables, level order.
    pub fn support(&self) -> Vec<VarId> {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().support(&[self.root]),
            None => Vec::new(),
        }
    }

    /// The support as a positive cube.
    pub fn support_cube(&self) -> Bdd {
        self.unary(|m, f| m.support_cube(&[f]))
    }

    /// True when the function is a single product of literals.
    pub fn is_cube(&self) -> bool {
        match self.live_mgr() {
            Some(m) => m.borrow().check_cube(self.root),
            None => false,
        }
    }

    /// True when the function is a product of positive literals.
    pub fn is_posi_cube(&self) -> bool {
        match self.live_mgr() {
            Some(m) => m.borrow().check_posi_cube(self.root),
            None => false,
        }
    }

    /// True when swapping `x` and `y` (or `x` and `¬y` when `inv`) leaves
    /// the function unchanged.
    pub fn check_symmetry(&self, x: VarId, y: VarId, inv: bool) -> bool {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().check_symmetry(self.root, x, y, inv),
            None => false,
        }
    }

    /// True when `self ∧ other` is satisfiable.
    pub fn intersects(&self, other: &Bdd) -> bool {
        match self.live_mgr() {
            Some(m) => {
                debug_assert!(other.same_mgr(&m));
                m.borrow_mut()
                    .check_intersect(self.root, other.root_edge())
                    .is_one()
            }
            None => false,
        }
    }

    /// Any path to the 1 terminal, as a cube.
    pub fn onepath(&self) -> Bdd {
        self.unary(|m, f| m.onepath(f))
    }

    /// A shortest path to the 1 terminal, as a cube.
    pub fn shortest_onepath(&self) -> Bdd {
        self.unary(|m, f| m.shortest_onepath(f))
    }

    /// Length of the shortest 1-path; `None` for the zero function and for
    /// invalid handles.
    pub fn shortest_onepath_len(&self) -> Option<u64> {
        self.live_mgr()
            .and_then(|m| m.borrow_mut().shortest_onepath_len(self.root))
    }

    /// Number of satisfying assignments over `n` variables.
    pub fn minterm_count(&self, n: u32) -> BigUint {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().minterm_count(self.root, n),
            None => BigUint::from(0u32),
        }
    }

    /// Zeroth-order Walsh spectrum coefficient over `n` variables.
    pub fn walsh0(&self, n: u32) -> BigInt {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().walsh0(self.root, n),
            None => BigInt::from(0),
        }
    }

    /// First-order Walsh spectrum coefficient for `var` over `n` variables.
    pub fn walsh1(&self, var: VarId, n: u32) -> BigInt {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().walsh1(self.root, var, n),
            None => BigInt::from(0),
        }
    }

    /// Node count of this function's graph.
    pub fn size(&self) -> u64 {
        match self.live_mgr() {
            Some(m) => m.borrow_mut().node_count(&[self.root]),
            None => 0,
        }
    }

    /// Variable-set intersection (both operands positive cubes).
    pub fn vscap(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.vscap(f, g))
    }

    /// Variable-set difference (both operands positive cubes).
    pub fn vsdiff(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.vsdiff(f, g))
    }

    /// Variable-set overlap test (both operands positive cubes).
    pub fn vsintersect(&self, other: &Bdd) -> bool {
        match self.live_mgr() {
            Some(m) => {
                debug_assert!(other.same_mgr(&m));
                m.borrow().vsintersect(self.root, other.root_edge())
            }
            None => false,
        }
    }

    /// Literal-set intersection (both operands cubes).
    pub fn lscap(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.lscap(f, g))
    }

    /// Literal-set difference (both operands cubes).
    pub fn lsdiff(&self, other: &Bdd) -> Bdd {
        self.binary(other, |m, f, g| m.lsdiff(f, g))
    }

    /// Literal-set overlap test (both operands cubes).
    pub fn lsintersect(&self, other: &Bdd) -> bool {
        match self.live_mgr() {
            Some(m) => {
                debug_assert!(other.same_mgr(&m));
                m.borrow().lsintersect(self.root, other.root_edge())
            }
            None => false,
        }
    }

    /// The literals of a cube, sorted by variable.
    pub fn to_literal_vec(&self) -> Vec<Literal> {
        match self.live_mgr() {
            Some(m) => m.borrow().to_literal_vec(self.root),
            None => Vec::new(),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.root_edge().is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.root_edge().is_one()
    }

    pub fn is_const(&self) -> bool {
        self.root_edge().is_const()
    }

    /// True for the error function, including every handle whose manager has
    /// been dropped.
    pub fn is_error(&self) -> bool {
        self.root_edge().is_error()
    }

    /// True for the allocation-failure function.
    pub fn is_overflow(&self) -> bool {
        self.root_edge().is_overflow()
    }

    /// True for either failure function.
    pub fn is_invalid(&self) -> bool {
        self.root_edge().is_invalid()
    }
}

impl Clone for Bdd {
    fn clone(&self) -> Bdd {
        if let Some(m) = self.live_mgr() {
            m.borrow_mut().inc_rootref(self.root);
        }
        Bdd {
            mgr: self.mgr.clone(),
            root: self.root,
        }
    }
}

impl Drop for Bdd {
    fn drop(&mut self) {
        if let Some(m) = self.live_mgr() {
            m.borrow_mut().dec_rootref(self.root);
        }
    }
}

impl PartialEq for Bdd {
    fn eq(&self, other: &Bdd) -> bool {
        Weak::ptr_eq(&self.mgr, &other.mgr) && self.root_edge() == other.root_edge()
    }
}

impl Eq for Bdd {}

impl std::fmt::Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Bdd({:?})", self.root_edge())
    }
}

impl std::ops::BitAnd for &Bdd {
    type Output = Bdd;

    fn bitand(self, rhs: &Bdd) -> Bdd {
        self.and(rhs)
    }
}

impl std::ops::BitOr for &Bdd {
    type Output = Bdd;

    fn bitor(self, rhs: &Bdd) -> Bdd {
        self.or(rhs)
    }
}

impl std::ops::BitXor for &Bdd {
    type Output = Bdd;

    fn bitxor(self, rhs: &Bdd) -> Bdd {
        self.xor(rhs)
    }
}

impl std::ops::Not for &Bdd {
    type Output = Bdd;

    fn not(self) -> Bdd {
        Bdd::not(self)
    }
}
