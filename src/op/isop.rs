//! Irredundant sum-of-products, prime covers and minimal supports
//!
//! All three work on the incompletely specified function `[l, u]`
//! (`l ≤ f ≤ u`): `l` is the on-set, `u` the on-set plus don't-cares.

use crate::cache::ComputedTable;
use crate::edge::{Edge, VarId, LEVEL_MAX};
use crate::expr::Expr;
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

/// Multiplies the literal of `var` (negated when `inv`) into every product
/// of the cover.
fn sop_litand(cov: Expr, var: VarId, inv: bool) -> Expr {
    if cov.is_zero() {
        return cov;
    }
    let lit = Expr::literal(var, inv);
    if cov.is_one() {
        return lit;
    }
    if cov.is_literal() || cov.is_product() {
        return cov & lit;
    }
    let mut ans = Expr::zero();
    for i in 0..cov.child_num() {
        ans = ans | (cov.child(i).clone() & lit.clone());
    }
    ans
}

impl<S: NodeStore> MgrImpl<S> {
    /// Computes an irredundant sum-of-products cover of `[l, u]`, returning
    /// the cover's BDD and its symbolic form.
    pub(crate) fn isop(&mut self, l: Edge, u: Edge) -> (Edge, Expr) {
        if l.is_error() || u.is_error() {
            return (Edge::error(), Expr::zero());
        }
        if l.is_overflow() || u.is_overflow() {
            return (Edge::overflow(), Expr::zero());
        }
        let ans = self.isop_step(l, u);
        self.isop_tbl.clear();
        ans
    }

    fn isop_step(&mut self, l: Edge, u: Edge) -> (Edge, Expr) {
        if l.is_zero() {
            return (Edge::zero(), Expr::zero());
        }
        if u.is_one() {
            return (Edge::one(), Expr::one());
        }
        if let Some(hit) = self.isop_tbl.get(l, u) {
            return hit;
        }

        let (level, l_0, l_1, u_0, u_1) = self.split(l, u);
        if level == LEVEL_MAX {
            // Both bounds constant here means l ≰ u: no cover exists.
            return (Edge::error(), Expr::zero());
        }
        let var_edge = self.new_node(level, Edge::zero(), Edge::one());
        if var_edge.is_invalid() {
            return (var_edge, Expr::zero());
        }
        self.ensure_var_at(level);
        let var = self.vars[level as usize].varid;

        // Products that must contain ¬x: on-set points of the 0-cofactor
        // that the 1-side cannot cover.
        let z_0 = self.and_op(l_0, u_1.not());
        if z_0.is_invalid() {
            return (z_0, Expr::zero());
        }
        let (c_0, p_0) = self.isop_step(z_0, u_0);
        if c_0.is_invalid() {
            return (c_0, Expr::zero());
        }
        let cc_0 = self.and_op(c_0, var_edge.not());
        if cc_0.is_invalid() {
            return (cc_0, Expr::zero());
        }
        let p_0 = sop_litand(p_0, var, true);

        // Products that must contain x.
        let z_1 = self.and_op(l_1, u_0.not());
        if z_1.is_invalid() {
            return (z_1, Expr::zero());
        }
        let (c_1, p_1) = self.isop_step(z_1, u_1);
        if c_1.is_invalid() {
            return (c_1, Expr::zero());
        }
        let cc_1 = self.and_op(c_1, var_edge);
        if cc_1.is_invalid() {
            return (cc_1, Expr::zero());
        }
        let p_1 = sop_litand(p_1, var, false);

        // Whatever remains uncovered on both sides is covered free of x.
        let h_01 = self.and_op(l_0, c_0.not());
        if h_01.is_invalid() {
            return (h_01, Expr::zero());
        }
        let h_02 = self.and_op(l_1, c_1.not());
        if h_02.is_invalid() {
            return (h_02, Expr::zero());
        }
        let h_0 = self.or_op(h_01, h_02);
        if h_0.is_invalid() {
            return (h_0, Expr::zero());
        }
        let h_1 = self.and_op(u_0, u_1);
        if h_1.is_invalid() {
            return (h_1, Expr::zero());
        }
        let (r_0, p_2) = self.isop_step(h_0, h_1);
        if r_0.is_invalid() {
            return (r_0, Expr::zero());
        }

        let tmp = self.or_op(cc_0, cc_1);
        if tmp.is_invalid() {
            return (tmp, Expr::zero());
        }
        let result = self.or_op(tmp, r_0);
        if result.is_invalid() {
            return (result, Expr::zero());
        }
        let cov = p_0 | p_1 | p_2;
        self.isop_tbl
            .put(l, u, result, &cov, self.arena.gauge_mut());
        (result, cov)
    }

    /// The cover of all prime implicants of `[l, u]`.
    pub(crate) fn prime_cover(&mut self, l: Edge, u: Edge) -> Expr {
        if l.is_invalid() || u.is_invalid() {
            return Expr::zero();
        }
        let (_, cov) = self.pc_step(l, u);
        self.pc_tbl.clear();
        cov
    }

    fn pc_step(&mut self, l: Edge, u: Edge) -> (Edge, Expr) {
        if l.is_zero() {
            return (Edge::zero(), Expr::zero());
        }
        if u.is_one() {
            return (Edge::one(), Expr::one());
        }
        if let Some(hit) = self.pc_tbl.get(l, u) {
            return hit;
        }

        let (level, l_0, l_1, u_0, u_1) = self.split(l, u);
        if level == LEVEL_MAX {
            // Both bounds constant here means l ≰ u: no cover exists.
            return (Edge::error(), Expr::zero());
        }
        let var_edge = self.new_node(level, Edge::zero(), Edge::one());
        if var_edge.is_invalid() {
            return (var_edge, Expr::zero());
        }
        self.ensure_var_at(level);
        let var = self.vars[level as usize].varid;

        // Primes containing ¬x.
        let z_0 = self.and_op(l_0, u_1.not());
        if z_0.is_invalid() {
            return (z_0, Expr::zero());
        }
        let (c_0, p_0) = self.pc_step(z_0, u_0);
        if c_0.is_invalid() {
            return (c_0, Expr::zero());
        }
        let cc_0 = self.and_op(c_0, var_edge.not());
        if cc_0.is_invalid() {
            return (cc_0, Expr::zero());
        }
        let p_0 = sop_litand(p_0, var, true);

        // Primes containing x.
        let z_1 = self.and_op(l_1, u_0.not());
        if z_1.is_invalid() {
            return (z_1, Expr::zero());
        }
        let (c_1, p_1) = self.pc_step(z_1, u_1);
        if c_1.is_invalid() {
            return (c_1, Expr::zero());
        }
        let cc_1 = self.and_op(c_1, var_edge);
        if cc_1.is_invalid() {
            return (cc_1, Expr::zero());
        }
        let p_1 = sop_litand(p_1, var, false);

        // Primes free of x.
        let h_01 = self.and_op(l_0, c_0.not());
        if h_01.is_invalid() {
            return (h_01, Expr::zero());
        }
        let h_02 = self.and_op(l_1, c_1.not());
        if h_02.is_invalid() {
            return (h_02, Expr::zero());
        }
        let h_0 = self.or_op(h_01, h_02);
        if h_0.is_invalid() {
            return (h_0, Expr::zero());
        }
        let h_1 = self.and_op(u_0, u_1);
        if h_1.is_invalid() {
            return (h_1, Expr::zero());
        }
        let (r_0, p_2) = self.pc_step(h_0, h_1);
        if r_0.is_invalid() {
            return (r_0, Expr::zero());
        }

        let tmp = self.or_op(cc_0, cc_1);
        if tmp.is_invalid() {
            return (tmp, Expr::zero());
        }
        let result = self.or_op(tmp, r_0);
        if result.is_invalid() {
            return (result, Expr::zero());
        }
        let cov = p_0 | p_1 | p_2;
        self.pc_tbl.put(l, u, result, &cov, self.arena.gauge_mut());
        (result, cov)
    }

    /// The function whose prime implicants are exactly the minimal support
    /// sets of `[l, u]`.
    pub(crate) fn minimal_support(&mut self, l: Edge, u: Edge) -> Edge {
        if l.is_error() || u.is_error() {
            return Edge::error();
        }
        if l.is_overflow() || u.is_overflow() {
            return Edge::overflow();
        }
        self.ms_step(l, u)
    }

    fn ms_step(&mut self, l: Edge, u: Edge) -> Edge {
        if l.is_invalid() {
            return l;
        }
        if u.is_invalid() {
            return u;
        }
        if l.is_zero() || u.is_one() {
            // The on-set and off-set no longer overlap: any support works.
            return Edge::one();
        }
        if l.is_one() || u.is_zero() {
            return Edge::zero();
        }

        let mut result = self.minsup_tbl.get(l, u);
        if result.is_error() {
            let (level, l_0, l_1, u_0, u_1) = self.split(l, u);

            // Supports containing this variable must work on both cofactors.
            let mut r_dep = self.ms_step(l_0, u_0);
            if !r_dep.is_zero() {
                let r_dep1 = self.ms_step(l_1, u_1);
                r_dep = self.and_op(r_dep, r_dep1);
            }

            // Supports without it must distinguish the merged function.
            let lo = self.or_op(l_0, l_1);
            let uo = self.and_op(u_0, u_1);
            let r_indep = self.ms_step(lo, uo);

            result = self.new_node(level, r_indep, r_dep);
            self.minsup_tbl.put(l, u, result, self.arena.gauge_mut());
        }
        result
    }
}
