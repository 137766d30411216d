//! If-then-else

use crate::edge::{check_reverse, Edge};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// `if f then g else h`.
    pub(crate) fn ite_op(&mut self, f: Edge, g: Edge, h: Edge) -> Edge {
        if f.is_error() || g.is_error() || h.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || g.is_overflow() || h.is_overflow() {
            return Edge::overflow();
        }
        if f.is_one() {
            return g;
        }
        if f.is_zero() {
            return h;
        }
        if g == h {
            return g;
        }
        if check_reverse(g, h) {
            return self.xor_op(f, h);
        }
        if g.is_one() || f == g {
            return self.or_op(f, h);
        }
        if g.is_zero() || check_reverse(f, g) {
            return self.and_op(f.not(), h);
        }
        if h.is_one() || check_reverse(f, h) {
            return self.or_op(f.not(), g);
        }
        if h.is_zero() || f == h {
            return self.and_op(f, g);
        }

        // Swapping then/else complements the condition; doing it whenever
        // g > h gives the cache one canonical orientation.
        let (mut f, mut g, mut h) = (f, g, h);
        if g > h {
            std::mem::swap(&mut g, &mut h);
            f = f.not();
        }

        // Keep the then-branch complement-free; it moves to the result.
        let ans_inv = g.inv();
        g = g.add_inv(ans_inv);
        h = h.add_inv(ans_inv);

        let f_level = self.edge_level(f);
        let g_level = self.edge_level(g);
        let h_level = self.edge_level(h);
        let (f_0, f_1) = self.children_inv(f);

        let result;
        if f_0.is_zero() && f_1.is_one() && f_level < g_level && f_level < h_level {
            // f is the literal of a variable above both branches:
            // ite(x, g, h) is node(x, h, g) directly.
            result = self.new_node(f_level, h, g);
        } else if f_0.is_one() && f_1.is_zero() && f_level < g_level && f_level < h_level {
            result = self.new_node(f_level, g, h);
        } else {
            let mut cached = self.ite_tbl.get(f, g, h);
            if cached.is_error() {
                let top = f_level.min(g_level).min(h_level);
                let (f_0, f_1) = self.split1(top, f);
                let (g_0, g_1) = self.split1(top, g);
                let (h_0, h_1) = self.split1(top, h);
                let r_0 = self.ite_op(f_0, g_0, h_0);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.ite_op(f_1, g_1, h_1);
                if r_1.is_invalid() {
                    return r_1;
                }
                cached = self.new_node(top, r_0, r_1);
                self.ite_tbl.put(f, g, h, cached, self.arena.gauge_mut());
            }
            result = cached;
        }
        result.add_inv(ans_inv)
    }
}
