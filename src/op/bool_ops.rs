//! Conjunction, exclusive-or and the intersection check

use crate::edge::{check_reverse, Edge};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// `f ∧ g`.
    pub(crate) fn and_op(&mut self, f: Edge, g: Edge) -> Edge {
        if f.is_error() || g.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || g.is_overflow() {
            return Edge::overflow();
        }
        self.and_step(f, g)
    }

    /// `f ∨ g`, through De Morgan over the complement edges.
    pub(crate) fn or_op(&mut self, f: Edge, g: Edge) -> Edge {
        self.and_op(f.not(), g.not()).not()
    }

    fn and_step(&mut self, f: Edge, g: Edge) -> Edge {
        // 0 annihilates, as does a complementary pair; 1 is neutral; the
        // conjunction is idempotent.
        if f.is_zero() || g.is_zero() || check_reverse(f, g) {
            return Edge::zero();
        }
        if f.is_one() {
            return g;
        }
        if g.is_one() || f == g {
            return f;
        }

        // Commutative: sort the operands so the cache sees one key.
        let (f, g) = if f > g { (g, f) } else { (f, g) };

        let mut result = self.and_tbl.get(f, g);
        if result.is_error() {
            let (level, f_0, f_1, g_0, g_1) = self.split(f, g);
            let r_0 = self.and_step(f_0, g_0);
            if r_0.is_overflow() {
                return Edge::overflow();
            }
            let r_1 = self.and_step(f_1, g_1);
            if r_1.is_overflow() {
                return Edge::overflow();
            }
            result = self.new_node(level, r_0, r_1);
            self.and_tbl.put(f, g, result, self.arena.gauge_mut());
        }
        result
    }

    /// `f ⊕ g`.
    pub(crate) fn xor_op(&mut self, f: Edge, g: Edge) -> Edge {
        if f.is_error() || g.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || g.is_overflow() {
            return Edge::overflow();
        }
        if f.is_zero() {
            return g;
        }
        if g.is_zero() {
            return f;
        }
        if f.is_one() {
            return g.not();
        }
        if g.is_one() {
            return f.not();
        }
        if f == g {
            return Edge::zero();
        }
        if check_reverse(f, g) {
            return Edge::one();
        }

        // Complements factor out of both operands: (¬f) ⊕ g = ¬(f ⊕ g).
        let ans_inv = f.inv() ^ g.inv();
        let f = f.normalize();
        let g = g.normalize();

        let (f, g) = if f > g { (g, f) } else { (f, g) };

        let mut result = self.xor_tbl.get(f, g);
        if result.is_error() {
            let (level, f_0, f_1, g_0, g_1) = self.split(f, g);
            let r_0 = self.xor_op(f_0, g_0);
            if r_0.is_invalid() {
                return r_0;
            }
            let r_1 = self.xor_op(f_1, g_1);
            if r_1.is_invalid() {
                return r_1;
            }
            result = self.new_node(level, r_0, r_1);
            self.xor_tbl.put(f, g, result, self.arena.gauge_mut());
        }
        result.add_inv(ans_inv)
    }

    /// Constant-valued test whether `f ∧ g` is satisfiable: returns the one
    /// edge when the functions intersect, the zero edge when they do not.
    pub(crate) fn check_intersect(&mut self, f: Edge, g: Edge) -> Edge {
        if f.is_error() || g.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || g.is_overflow() {
            return Edge::overflow();
        }
        if f.is_zero() || g.is_zero() || check_reverse(f, g) {
            return Edge::zero();
        }
        if f.is_one() || g.is_one() || f == g {
            return Edge::one();
        }

        // 0-edges are never complemented, so a plain edge reaches the plain
        // terminal on the all-zero assignment: a complemented edge is 1
        // there. Two complemented operands therefore always intersect.
        if f.inv() && g.inv() {
            return Edge::one();
        }

        let (f, g) = if f > g { (g, f) } else { (f, g) };

        let mut result = self.int_tbl.get(f, g);
        if result.is_error() {
            let (_, f_0, f_1, g_0, g_1) = self.split(f, g);
            result = self.check_intersect(f_0, g_0);
            if result.is_zero() {
                result = self.check_intersect(f_1, g_1);
            }
            self.int_tbl.put(f, g, result, self.arena.gauge_mut());
        }
        result
    }
}
