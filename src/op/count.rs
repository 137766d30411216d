//! Node, minterm and Walsh-coefficient counting
//!
//! Minterm and Walsh counts grow with `2^n`, so each has two parallel
//! implementations: a machine-integer one selected whenever the required
//! bit width fits a word, and an arbitrary-precision one for the rest. Both
//! memoize per node (with a sign rule for the incoming polarity) and skip
//! the memo table for nodes referenced exactly once.

use std::collections::HashMap;

use num_bigint::{BigInt, BigUint};

use crate::edge::{Edge, NodeId, VarId};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// Number of distinct nodes reachable from `es`.
    pub(crate) fn node_count(&mut self, es: &[Edge]) -> u64 {
        let mut num = 0;
        for &e in es {
            self.count1(e, &mut num);
        }
        for &e in es {
            self.clear_pnmark(e);
        }
        num
    }

    fn count1(&mut self, mut e: Edge, num: &mut u64) {
        loop {
            let Some(id) = e.node_id() else {
                return;
            };
            if self.arena.node(id).ref_mark.pmark() {
                return;
            }
            *num += 1;
            self.arena.node_mut(id).ref_mark.set_pmark(true);
            let node = self.arena.node(id);
            let (e0, e1) = (node.edge0(), node.edge1());
            self.count1(e0, num);
            e = e1;
        }
    }

    /// Number of satisfying assignments of `e` over `n` variables.
    pub(crate) fn minterm_count(&mut self, e: Edge, n: u32) -> BigUint {
        if e.is_invalid() {
            return BigUint::from(0u32);
        }
        if n + 1 < u64::BITS {
            let all = 1u64 << n;
            let mut mc_map = HashMap::new();
            BigUint::from(self.mterm_step_word(e, all, &mut mc_map))
        } else {
            let all = BigUint::from(1u32) << n as usize;
            let mut mc_map = HashMap::new();
            self.mterm_step_big(e, &all, &mut mc_map)
        }
    }

    fn mterm_step_word(&self, e: Edge, all: u64, mc_map: &mut HashMap<Edge, u64>) -> u64 {
        if e.is_one() {
            return all;
        }
        if e.is_zero() {
            return 0;
        }

        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(&hit) = mc_map.get(&e) {
                return hit;
            }
        }

        let (e0, e1) = self.children_inv(e);
        let n0 = self.mterm_step_word(e0, all, mc_map);
        let n1 = self.mterm_step_word(e1, all, mc_map);
        // Each child counts over the same n variables; the parent halves
        // their sum.
        let ans = (n0 + n1) >> 1u32;

        if refs != 1 {
            mc_map.insert(e, ans);
        }
        ans
    }

    fn mterm_step_big(
        &self,
        e: Edge,
        all: &BigUint,
        mc_map: &mut HashMap<Edge, BigUint>,
    ) -> BigUint {
        if e.is_one() {
            return all.clone();
        }
        if e.is_zero() {
            return BigUint::from(0u32);
        }

        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(hit) = mc_map.get(&e) {
                return hit.clone();
            }
        }

        let (e0, e1) = self.children_inv(e);
        let n0 = self.mterm_step_big(e0, all, mc_map);
        let n1 = self.mterm_step_big(e1, all, mc_map);
        let ans = (n0 + n1) >> 1u32;

        if refs != 1 {
            mc_map.insert(e, ans.clone());
        }
        ans
    }

    /// Zeroth-order Walsh coefficient of `e` over `n` variables:
    /// the sum of `(-1)^f(x)` over all `2^n` inputs.
    pub(crate) fn walsh0(&mut self, e: Edge, n: u32) -> BigInt {
        if e.is_invalid() {
            return BigInt::from(0);
        }
        if n + 2 < u64::BITS {
            let all = 1i64 << n;
            let mut result_map = HashMap::new();
            BigInt::from(self.wt0_step_word(e, all, &mut result_map))
        } else {
            let all = BigInt::from(1) << n as usize;
            let mut result_map = HashMap::new();
            self.wt0_step_big(e, &all, &mut result_map)
        }
    }

    fn wt0_step_word(&self, e: Edge, all: i64, result_map: &mut HashMap<NodeId, i64>) -> i64 {
        if e.is_zero() {
            return all;
        }
        if e.is_one() {
            return -all;
        }

        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let inv = e.inv();
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(&hit) = result_map.get(&id) {
                return if inv { -hit } else { hit };
            }
        }

        let node = self.arena.node(id);
        let (e0, e1) = (node.edge0(), node.edge1());
        let n0 = self.wt0_step_word(e0, all, result_map);
        let n1 = self.wt0_step_word(e1, all, result_map);
        let result = (n0 + n1) >> 1u32;

        if refs != 1 {
            result_map.insert(id, result);
        }
        if inv {
            -result
        } else {
            result
        }
    }

    fn wt0_step_big(
        &self,
        e: Edge,
        all: &BigInt,
        result_map: &mut HashMap<NodeId, BigInt>,
    ) -> BigInt {
        if e.is_zero() {
            return all.clone();
        }
        if e.is_one() {
            return -all.clone();
        }

        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let inv = e.inv();
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(hit) = result_map.get(&id) {
                return if inv { -hit.clone() } else { hit.clone() };
            }
        }

        let node = self.arena.node(id);
        let (e0, e1) = (node.edge0(), node.edge1());
        let n0 = self.wt0_step_big(e0, all, result_map);
        let n1 = self.wt0_step_big(e1, all, result_map);
        let result = (n0 + n1) >> 1u32;

        if refs != 1 {
            result_map.insert(id, result.clone());
        }
        if inv {
            -result
        } else {
            result
        }
    }

    /// First-order Walsh coefficient for `var` over `n` variables:
    /// the correlation of `f` with the input `var`.
    pub(crate) fn walsh1(&mut self, e: Edge, var: VarId, n: u32) -> BigInt {
        if e.is_invalid() {
            return BigInt::from(0);
        }
        let Some(w_level) = self.var_level(var) else {
            return BigInt::from(0);
        };
        if n + 1 < u64::BITS {
            let all = 1i64 << n;
            let mut result_map = HashMap::new();
            BigInt::from(self.wt1_step_word(e, w_level, all, &mut result_map))
        } else {
            let all = BigInt::from(1) << n as usize;
            let mut result_map = HashMap::new();
            self.wt1_step_big(e, w_level, &all, &mut result_map)
        }
    }

    // The memo map is shared with the wt0 walk: nodes above w_level hold
    // first-order values, nodes below hold zeroth-order ones, and levels
    // keep the two populations disjoint.
    fn wt1_step_word(
        &self,
        e: Edge,
        w_level: u32,
        all: i64,
        result_map: &mut HashMap<NodeId, i64>,
    ) -> i64 {
        if e.is_const() {
            return 0;
        }
        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let level = self.arena.node(id).level();
        if level > w_level {
            return 0;
        }

        let inv = e.inv();
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(&hit) = result_map.get(&id) {
                return if inv { -hit } else { hit };
            }
        }

        let node = self.arena.node(id);
        let (e0, e1) = (node.edge0(), node.edge1());
        let result = if level < w_level {
            let n0 = self.wt1_step_word(e0, w_level, all, result_map);
            let n1 = self.wt1_step_word(e1, w_level, all, result_map);
            (n0 + n1) >> 1u32
        } else {
            let n0 = self.wt0_step_word(e0, all, result_map);
            let n1 = self.wt0_step_word(e1, all, result_map);
            n0 - n1
        };

        if refs != 1 {
            result_map.insert(id, result);
        }
        if inv {
            -result
        } else {
            result
        }
    }

    fn wt1_step_big(
        &self,
        e: Edge,
        w_level: u32,
        all: &BigInt,
        result_map: &mut HashMap<NodeId, BigInt>,
    ) -> BigInt {
        if e.is_const() {
            return BigInt::from(0);
        }
        let id = e
            .node_id()
            .expect("constant handled above - this is a bug in the engine");
        let level = self.arena.node(id).level();
        if level > w_level {
            return BigInt::from(0);
        }

        let inv = e.inv();
        let refs = self.arena.node(id).ref_mark.count();
        if refs != 1 {
            if let Some(hit) = result_map.get(&id) {
                return if inv { -hit.clone() } else { hit.clone() };
            }
        }

        let node = self.arena.node(id);
        let (e0, e1) = (node.edge0(), node.edge1());
        let result = if level < w_level {
            let n0 = self.wt1_step_big(e0, w_level, all, result_map);
            let n1 = self.wt1_step_big(e1, w_level, all, result_map);
            (n0 + n1) >> 1u32
        } else {
            let n0 = self.wt0_step_big(e0, all, result_map);
            let n1 = self.wt0_step_big(e1, all, result_map);
            n0 - n1
        };

        if refs != 1 {
            result_map.insert(id, result.clone());
        }
        if inv {
            -result
        } else {
            result
        }
    }
}
