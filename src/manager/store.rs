//! Unique-table strategies
//!
//! Canonical node identity comes from a hash-consing table keyed by
//! `(level, edge0, edge1)`. The classic manager keeps one global table; the
//! modern manager keeps one sub-table per variable, which is the shape a
//! future reordering pass needs (all nodes of one level reachable without a
//! full scan). Both are driven by the same engine through [`NodeStore`].

use log::debug;

use crate::alloc::NodeArena;
use crate::edge::{Edge, NodeId, NIL};

const INIT_SIZE: u64 = 1 << 10;
const SUB_INIT_SIZE: u64 = 1 << 8;

#[inline]
fn hash3(e0: Edge, e1: Edge, level: u32) -> u64 {
    let v1 = e0.hash_val();
    let v2 = e1.hash_val();
    let l = level as u64;
    v1.wrapping_add(v2 >> 2)
        .wrapping_add(l << 3)
        .wrapping_sub(l)
}

/// Materialization and sweep interface of a unique table.
pub(crate) trait NodeStore {
    /// The reduce step: returns the canonical edge for `(level, e0, e1)`,
    /// creating a node only when no equal triple exists. Applies the
    /// reduction rule, failure propagation and complement-edge
    /// canonicalization. Returns *overflow* when allocation fails.
    fn insert_or_find(
        &mut self,
        arena: &mut NodeArena,
        level: u32,
        e0: Edge,
        e1: Edge,
        load_limit: f64,
    ) -> Edge;

    /// Unlinks every unreferenced node from the bucket chains.
    fn sweep(&mut self, arena: &mut NodeArena);

    /// Halves table capacity while the population is sparse.
    fn shrink(&mut self, arena: &mut NodeArena, load_limit: f64);

    /// A variable was registered at `level`.
    fn notify_new_var(&mut self, arena: &mut NodeArena, level: u32);
}

// ---------------------------------------------------------------------------
// shared bucket machinery
// ---------------------------------------------------------------------------

/// One hash-cons table: bucket heads chained through node link fields.
struct Buckets {
    heads: Vec<NodeId>,
    mask: u64,
    /// Node population of this table (only the per-variable store keeps it
    /// distinct from the arena's global count).
    num: u64,
    /// Population at which the table doubles.
    next_limit: u64,
}

impl Buckets {
    fn new(arena: &mut NodeArena, size: u64, load_limit: f64) -> Buckets {
        let mut b = Buckets {
            heads: Vec::new(),
            mask: 0,
            num: 0,
            next_limit: 0,
        };
        b.resize(arena, size, load_limit);
        b
    }

    fn size(&self) -> u64 {
        self.heads.len() as u64
    }

    fn resize(&mut self, arena: &mut NodeArena, new_size: u64, load_limit: f64) -> bool {
        let new_bytes = new_size * std::mem::size_of::<NodeId>() as u64;
        if !arena.gauge_mut().claim(new_bytes) {
            return false;
        }
        debug!(target: "robdd", "unique table: resize({})", new_size);
        let old = std::mem::replace(&mut self.heads, vec![NIL; new_size as usize]);
        let old_bytes = old.len() as u64 * std::mem::size_of::<NodeId>() as u64;
        self.mask = new_size - 1;
        self.next_limit = (new_size as f64 * load_limit) as u64;
        for head in old {
            let mut cur = head;
            while cur != NIL {
                let node = arena.node(cur);
                let pos = (hash3(node.edge0(), node.edge1(), node.level()) & self.mask) as usize;
                let next = node.link;
                let entry = &mut self.heads[pos];
                arena.node_mut(cur).link = *entry;
                *entry = cur;
                cur = next;
            }
        }
        arena.gauge_mut().release(old_bytes);
        true
    }

    fn lookup(&self, arena: &NodeArena, level: u32, e0: Edge, e1: Edge) -> Option<NodeId> {
        if self.heads.is_empty() {
            return None;
        }
        let pos = (hash3(e0, e1, level) & self.mask) as usize;
        let mut cur = self.heads[pos];
        while cur != NIL {
            let node = arena.node(cur);
            if node.edge0() == e0 && node.edge1() == e1 && node.level() == level {
                return Some(cur);
            }
            cur = node.link;
        }
        None
    }

    fn link(&mut self, arena: &mut NodeArena, id: NodeId) {
        let node = arena.node(id);
        let pos = (hash3(node.edge0(), node.edge1(), node.level()) & self.mask) as usize;
        let entry = &mut self.heads[pos];
        arena.node_mut(id).link = *entry;
        *entry = id;
        self.num += 1;
    }

    fn sweep(&mut self, arena: &mut NodeArena) {
        for pos in 0..self.heads.len() {
            let mut cur = self.heads[pos];
            let mut prev = NIL;
            while cur != NIL {
                let next = arena.node(cur).link;
                if arena.node(cur).noref() {
                    if prev == NIL {
                        self.heads[pos] = next;
                    } else {
                        arena.node_mut(prev).link = next;
                    }
                    arena.node_mut(cur).link = NIL;
                    self.num -= 1;
                } else {
                    prev = cur;
                }
                cur = next;
            }
        }
    }

    /// Computes the halved size appropriate for `num` live nodes.
    fn shrunk_size(&self, num: u64, init_size: u64, load_limit: f64) -> u64 {
        let want = (num as f64 * 2.0 / load_limit) as u64;
        let mut new_size = self.size();
        while new_size > init_size && want < new_size {
            new_size >>= 1;
        }
        new_size
    }
}

// ---------------------------------------------------------------------------
// classic store: one global table
// ---------------------------------------------------------------------------

/// The classic manager's single hash-cons table.
pub(crate) struct GlobalStore {
    tbl: Buckets,
}

impl GlobalStore {
    pub(crate) fn new(arena: &mut NodeArena, load_limit: f64) -> GlobalStore {
        GlobalStore {
            tbl: Buckets::new(arena, INIT_SIZE, load_limit),
        }
    }
}

impl NodeStore for GlobalStore {
    fn insert_or_find(
        &mut self,
        arena: &mut NodeArena,
        level: u32,
        e0: Edge,
        e1: Edge,
        load_limit: f64,
    ) -> Edge {
        if e0 == e1 {
            return e0;
        }
        if e0.is_error() || e1.is_error() {
            return Edge::error();
        }
        if e0.is_overflow() || e1.is_overflow() {
            return Edge::overflow();
        }

        // Complement-edge rule: the 0-edge of a stored node never carries
        // the complement bit; it moves to the result edge instead.
        let ans_inv = e0.inv();
        let e0 = e0.add_inv(ans_inv);
        let e1 = e1.add_inv(ans_inv);

        if let Some(id) = self.tbl.lookup(arena, level, e0, e1) {
            return Edge::from_node(id, ans_inv);
        }

        let Some(id) = arena.alloc_node() else {
            return Edge::overflow();
        };
        {
            let node = arena.node_mut(id);
            node.edge0 = e0;
            node.edge1 = e1;
            node.level = level;
            node.ref_mark = Default::default();
            node.link = NIL;
        }
        if arena.node_num() > self.tbl.next_limit {
            let new_size = self.tbl.size() << 1;
            if !self.tbl.resize(arena, new_size, load_limit) {
                return Edge::overflow();
            }
        }
        self.tbl.link(arena, id);
        Edge::from_node(id, ans_inv)
    }

    fn sweep(&mut self, arena: &mut NodeArena) {
        self.tbl.sweep(arena);
    }

    fn shrink(&mut self, arena: &mut NodeArena, load_limit: f64) {
        let new_size = self.tbl.shrunk_size(arena.node_num(), INIT_SIZE, load_limit);
        if new_size != self.tbl.size() {
            self.tbl.resize(arena, new_size, load_limit);
        }
    }

    fn notify_new_var(&mut self, _arena: &mut NodeArena, _level: u32) {}
}

// ---------------------------------------------------------------------------
// modern store: one sub-table per variable
// ---------------------------------------------------------------------------

/// The modern manager's per-variable tables, indexed by level.
pub(crate) struct PerVarStore {
    subs: Vec<Buckets>,
}

impl PerVarStore {
    pub(crate) fn new(_arena: &mut NodeArena) -> PerVarStore {
        PerVarStore { subs: Vec::new() }
    }

    fn ensure_level(&mut self, arena: &mut NodeArena, level: u32, load_limit: f64) {
        while self.subs.len() <= level as usize {
            self.subs
                .push(Buckets::new(arena, SUB_INIT_SIZE, load_limit));
        }
    }
}

impl NodeStore for PerVarStore {
    fn insert_or_find(
        &mut self,
        arena: &mut NodeArena,
        level: u32,
        e0: Edge,
        e1: Edge,
        load_limit: f64,
    ) -> Edge {
        if e0 == e1 {
            return e0;
        }
        if e0.is_error() || e1.is_error() {
            return Edge::error();
        }
        if e0.is_overflow() || e1.is_overflow() {
            return Edge::overflow();
        }

        let ans_inv = e0.inv();
        let e0 = e0.add_inv(ans_inv);
        let e1 = e1.add_inv(ans_inv);

        self.ensure_level(arena, level, load_limit);
        let sub = &mut self.subs[level as usize];

        if let Some(id) = sub.lookup(arena, level, e0, e1) {
            return Edge::from_node(id, ans_inv);
        }

        let Some(id) = arena.alloc_node() else {
            return Edge::overflow();
        };
        {
            let node = arena.node_mut(id);
            node.edge0 = e0;
            node.edge1 = e1;
            node.level = level;
            node.ref_mark = Default::default();
            node.link = NIL;
        }
        if sub.num + 1 > sub.next_limit {
            let new_size = sub.size() << 1;
            if !sub.resize(arena, new_size, load_limit) {
                return Edge::overflow();
            }
        }
        sub.link(arena, id);
        Edge::from_node(id, ans_inv)
    }

    fn sweep(&mut self, arena: &mut NodeArena) {
        for sub in &mut self.subs {
            sub.sweep(arena);
        }
    }

    fn shrink(&mut self, arena: &mut NodeArena, load_limit: f64) {
        for sub in &mut self.subs {
            let new_size = sub.shrunk_size(sub.num, SUB_INIT_SIZE, load_limit);
            if new_size != sub.size() {
                sub.resize(arena, new_size, load_limit);
            }
        }
    }

    fn notify_new_var(&mut self, arena: &mut NodeArena, level: u32) {
        self.ensure_level(arena, level, crate::cache::DEFAULT_LOAD_LIMIT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk(arena: &mut NodeArena) -> GlobalStore {
        GlobalStore::new(arena, 2.0)
    }

    #[test]
    fn reduction_rule_short_circuits() {
        let mut a = NodeArena::new(0);
        let mut s = mk(&mut a);
        let e = s.insert_or_find(&mut a, 0, Edge::one(), Edge::one(), 2.0);
        assert_eq!(e, Edge::one());
        assert_eq!(a.node_num(), 0);
    }

    #[test]
    fn hash_consing_returns_the_same_node() {
        let mut a = NodeArena::new(0);
        let mut s = mk(&mut a);
        let x = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        let y = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        assert_eq!(x, y);
        assert_eq!(a.node_num(), 1);
    }

    #[test]
    fn complement_moves_off_the_zero_edge() {
        let mut a = NodeArena::new(0);
        let mut s = mk(&mut a);
        // node(x) and its complement written as (one, zero) must hash-cons to
        // the same node with opposite result polarity.
        let x = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        let nx = s.insert_or_find(&mut a, 0, Edge::one(), Edge::zero(), 2.0);
        assert_eq!(nx, x.not());
        assert_eq!(a.node_num(), 1);
        // The stored 0-edge is not complemented.
        let id = x.node_id().unwrap();
        assert!(!a.node(id).edge0().inv());
    }

    #[test]
    fn failure_values_propagate() {
        let mut a = NodeArena::new(0);
        let mut s = mk(&mut a);
        assert!(s
            .insert_or_find(&mut a, 0, Edge::error(), Edge::one(), 2.0)
            .is_error());
        assert!(s
            .insert_or_find(&mut a, 0, Edge::overflow(), Edge::one(), 2.0)
            .is_overflow());
        // error wins over overflow, matching operation-level precedence
        assert!(s
            .insert_or_find(&mut a, 0, Edge::error(), Edge::overflow(), 2.0)
            .is_error());
    }

    #[test]
    fn sweep_unlinks_dead_nodes() {
        let mut a = NodeArena::new(0);
        let mut s = mk(&mut a);
        let x = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        let id = x.node_id().unwrap();
        s.sweep(&mut a);
        // Dead node is gone from the table: the same triple allocates anew.
        let y = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        assert_ne!(y.node_id().unwrap(), id);

        // A referenced node survives.
        let yid = y.node_id().unwrap();
        a.node_mut(yid).ref_mark.inc();
        s.sweep(&mut a);
        let z = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        assert_eq!(z.node_id().unwrap(), yid);
    }

    #[test]
    fn per_var_store_isolates_levels() {
        let mut a = NodeArena::new(0);
        let mut s = PerVarStore::new(&mut a);
        let x = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        let y = s.insert_or_find(&mut a, 3, Edge::zero(), Edge::one(), 2.0);
        assert_ne!(x, y);
        let x2 = s.insert_or_find(&mut a, 0, Edge::zero(), Edge::one(), 2.0);
        assert_eq!(x, x2);
        assert_eq!(a.node_num(), 2);
    }
}
