//! Paths to the 1 terminal
//!
//! Path length counts the 1-edges taken, so a variable skipped or assigned 0
//! is free. Results come back as cube BDDs describing the chosen path.

use std::collections::HashMap;

use crate::edge::Edge;
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// Any path to the 1 terminal, as a cube. Prefers the 1-branch.
    pub(crate) fn onepath(&mut self, e: Edge) -> Edge {
        if e.is_invalid() || e.is_const() {
            return e;
        }

        let level = self.edge_level(e);
        let (l, h) = self.children_inv(e);
        if h.is_zero() {
            let chd = self.onepath(l);
            self.new_node(level, chd, Edge::zero())
        } else {
            let chd = self.onepath(h);
            self.new_node(level, Edge::zero(), chd)
        }
    }

    /// A shortest path to the 1 terminal, as a cube.
    pub(crate) fn shortest_onepath(&mut self, e: Edge) -> Edge {
        if e.is_invalid() {
            return e;
        }
        let mut sp_assoc = HashMap::new();
        self.sp_step(e, &mut sp_assoc)
    }

    fn sp_step(&mut self, e: Edge, sp_assoc: &mut HashMap<Edge, Edge>) -> Edge {
        if e.is_const() {
            return e;
        }
        if let Some(&result) = sp_assoc.get(&e) {
            return result;
        }

        let level = self.edge_level(e);
        let (l0, h0) = self.children_inv(e);
        let mut l = self.sp_step(l0, sp_assoc);
        let mut h = self.sp_step(h0, sp_assoc);
        let llen = self.sp_len(l);
        let hlen = self.sp_len(h);
        // Keep only branches that can realize the minimum; the 1-branch
        // costs one extra literal.
        if hlen != -1 && llen > hlen + 1 {
            l = Edge::zero();
        } else if llen != -1 && llen < hlen + 1 {
            h = Edge::zero();
        }
        let result = self.new_node(level, l, h);
        sp_assoc.insert(e, result);
        result
    }

    // Path length of an already-pruned path cube.
    fn sp_len(&self, mut e: Edge) -> i64 {
        if e.is_zero() {
            return -1;
        }
        let mut len = 0;
        while !e.is_one() {
            let (l, h) = self.children_inv(e);
            if l.is_zero() {
                len += 1;
                e = h;
            } else {
                e = l;
            }
        }
        len
    }

    /// Length of the shortest 1-path; `None` when no such path exists (the
    /// zero function) or the operand is a failure value.
    pub(crate) fn shortest_onepath_len(&mut self, e: Edge) -> Option<u64> {
        if e.is_invalid() {
            return None;
        }
        let mut assoc = HashMap::new();
        let len = self.spl_step(e, &mut assoc);
        if len < 0 {
            None
        } else {
            Some(len as u64)
        }
    }

    fn spl_step(&mut self, e: Edge, assoc: &mut HashMap<Edge, i64>) -> i64 {
        if e.is_one() {
            return 0;
        }
        if e.is_zero() {
            return -1;
        }
        if let Some(&result) = assoc.get(&e) {
            return result;
        }

        let (e0, e1) = self.children_inv(e);
        let len0 = self.spl_step(e0, assoc);
        let len1 = match self.spl_step(e1, assoc) {
            -1 => -1,
            n => n + 1,
        };
        let result = match (len0, len1) {
            (-1, n) => n,
            (n, -1) => n,
            (a, b) => a.min(b),
        };
        assoc.insert(e, result);
        result
    }
}
