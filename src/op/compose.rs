//! Multiple composition and variable push-down

use crate::cache::ComputedTable;
use crate::edge::{Edge, VarId, LEVEL_MAX};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// Begins collecting substitutions for a multiple compose.
    pub(crate) fn compose_start(&mut self) {
        self.clear_varmark();
        self.last_level = 0;
    }

    /// Registers the substitution `var := e`. Unknown variables are ignored
    /// (the function cannot depend on them).
    pub(crate) fn compose_reg(&mut self, var: VarId, e: Edge) {
        if let Some(level) = self.var_level(var) {
            let v = &mut self.vars[level as usize];
            v.mark = 1;
            v.comp_edge = e;
            if self.last_level < level {
                self.last_level = level;
            }
        }
    }

    /// Applies every registered substitution to `f` in one pass.
    pub(crate) fn compose(&mut self, f: Edge) -> Edge {
        let ans = self.compose_step(f);
        self.clear_varmark();
        self.cmp_tbl.clear();
        ans
    }

    fn compose_step(&mut self, f: Edge) -> Edge {
        if f.is_invalid() || f.is_const() {
            return f;
        }
        let level = self.edge_level(f);
        if level > self.last_level {
            return f;
        }

        // Composition is linear in the complement; strip it off the key.
        let f_inv = f.inv();
        let f = f.normalize();

        let mut result = self.cmp_tbl.get(f);
        if result.is_error() {
            let (f_0, f_1) = self.children_inv(f);
            let r_0 = self.compose_step(f_0);
            if r_0.is_invalid() {
                return r_0;
            }
            let r_1 = self.compose_step(f_1);
            if r_1.is_invalid() {
                return r_1;
            }
            let var = &self.vars[level as usize];
            let tmp = if var.mark == 1 {
                var.comp_edge
            } else {
                self.new_node(level, Edge::zero(), Edge::one())
            };
            result = self.ite_op(tmp, r_1, r_0);
            self.cmp_tbl.put(f, result, self.arena.gauge_mut());
        }
        result.add_inv(f_inv)
    }

    /// Moves the variable at `x_level` down to `y_level` (`y > x`); `inv`
    /// additionally swaps the two branches of every moved node.
    pub(crate) fn push_down(&mut self, e: Edge, x_level: u32, y_level: u32, inv: bool) -> Edge {
        if e.is_invalid() {
            return e;
        }
        debug_assert!(x_level < y_level && y_level < LEVEL_MAX);

        self.ensure_var_at(y_level);
        let y_edge = self.new_node(y_level, Edge::zero(), Edge::one());
        if y_edge.is_invalid() {
            return y_edge;
        }
        // Cache salt: one cube identifying the (x, y, polarity) request.
        let xy_edge = self.new_node(x_level, Edge::zero(), y_edge.add_inv(inv));
        if xy_edge.is_invalid() {
            return xy_edge;
        }
        self.activate(xy_edge);
        let ans = self.pd_step(e, x_level, y_level, inv, xy_edge);
        self.deactivate(xy_edge);
        ans
    }

    fn pd_step(&mut self, e: Edge, x_level: u32, y_level: u32, inv: bool, xy_edge: Edge) -> Edge {
        if e.is_invalid() || e.is_const() {
            return e;
        }
        let level = self.edge_level(e);
        if level > y_level {
            return e;
        }
        if level > x_level {
            return self.pd_step2(e, y_level, xy_edge);
        }

        let e_inv = e.inv();
        let e = e.normalize();
        let mut result = self.pd_tbl.get(e, xy_edge);
        if result.is_error() {
            let (e_0, e_1) = self.children_inv(e);
            if level == x_level {
                result = self.pd_step3(e_0, e_1, y_level, inv, xy_edge);
            } else {
                let r_0 = self.pd_step(e_0, x_level, y_level, inv, xy_edge);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.pd_step(e_1, x_level, y_level, inv, xy_edge);
                if r_1.is_invalid() {
                    return r_1;
                }
                result = self.new_node(level, r_0, r_1);
                self.pd_tbl.put(e, xy_edge, result, self.arena.gauge_mut());
            }
        }
        result.add_inv(e_inv)
    }

    // Nodes strictly between x and y lose the vanished x slot: each moves up
    // one level.
    fn pd_step2(&mut self, e: Edge, y_level: u32, xy_edge: Edge) -> Edge {
        if e.is_invalid() || e.is_const() {
            return e;
        }
        let level = self.edge_level(e);
        if level > y_level {
            return e;
        }

        let e_inv = e.inv();
        let e = e.normalize();
        let mut result = self.pd2_tbl.get(e, xy_edge);
        if result.is_error() {
            let (e_0, e_1) = self.children_inv(e);
            let r_0 = self.pd_step2(e_0, y_level, xy_edge);
            if r_0.is_invalid() {
                return r_0;
            }
            let r_1 = self.pd_step2(e_1, y_level, xy_edge);
            if r_1.is_invalid() {
                return r_1;
            }
            self.ensure_var_at(level - 1);
            result = self.new_node(level - 1, r_0, r_1);
            self.pd2_tbl.put(e, xy_edge, result, self.arena.gauge_mut());
        }
        result.add_inv(e_inv)
    }

    // The push itself: `e0`/`e1` are the cofactors of an x-level node; walk
    // them in lockstep down to y, where the variable re-materializes.
    fn pd_step3(&mut self, e0: Edge, e1: Edge, y_level: u32, inv: bool, xy_edge: Edge) -> Edge {
        if e0.is_invalid() {
            return e0;
        }
        if e1.is_invalid() {
            return e1;
        }
        let top_level = self.edge_level(e0).min(self.edge_level(e1));

        let mut result = self.pd3_tbl.get(e0, e1, xy_edge);
        if result.is_error() {
            if top_level > y_level {
                self.ensure_var_at(y_level);
                result = if !inv {
                    self.new_node(y_level, e0, e1)
                } else {
                    self.new_node(y_level, e1, e0)
                };
            } else {
                let (e00, e01) = self.split1(top_level, e0);
                let (e10, e11) = self.split1(top_level, e1);
                let r_0 = self.pd_step3(e00, e10, y_level, inv, xy_edge);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.pd_step3(e01, e11, y_level, inv, xy_edge);
                if r_1.is_invalid() {
                    return r_1;
                }
                self.ensure_var_at(top_level - 1);
                result = self.new_node(top_level - 1, r_0, r_1);
                self.pd3_tbl
                    .put(e0, e1, xy_edge, result, self.arena.gauge_mut());
            }
        }
        result
    }
}
