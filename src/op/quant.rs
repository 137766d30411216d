//! Existential quantification and the fused and-exist

use crate::cache::ComputedTable;
use crate::edge::Edge;
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// Existentially quantifies the variables of the cube `svars` out of
    /// `f` (smoothing).
    pub(crate) fn esmooth(&mut self, f: Edge, svars: Edge) -> Edge {
        if f.is_error() || svars.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || svars.is_overflow() {
            return Edge::overflow();
        }

        self.mark_smooth_vars(svars);
        let ans = self.esmooth_step(f);
        self.sm_tbl.clear();
        self.clear_varmark();
        ans
    }

    // Marks every variable on the cube's spine and records the deepest
    // level; the recursions stop below it.
    fn mark_smooth_vars(&mut self, svars: Edge) {
        self.clear_varmark();
        self.last_level = 0;
        let mut cur = svars.node_id();
        while let Some(id) = cur {
            let node = self.arena.node(id);
            let level = node.level();
            let next = node.edge1();
            self.last_level = level;
            self.ensure_var_at(level);
            self.vars[level as usize].mark = 1;
            cur = next.node_id();
        }
    }

    fn esmooth_step(&mut self, e: Edge) -> Edge {
        if e.is_invalid() || e.is_const() {
            return e;
        }
        let level = self.edge_level(e);
        if level > self.last_level {
            return e;
        }

        let mut result = self.sm_tbl.get(e);
        if result.is_error() {
            let (e_0, e_1) = self.children_inv(e);
            if self.vars[level as usize].mark != 0 {
                // Quantified variable: merge the branches and keep going.
                let tmp = self.or_op(e_0, e_1);
                result = self.esmooth_step(tmp);
            } else {
                let r_0 = self.esmooth_step(e_0);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.esmooth_step(e_1);
                if r_1.is_invalid() {
                    return r_1;
                }
                result = self.new_node(level, r_0, r_1);
            }
            self.sm_tbl.put(e, result, self.arena.gauge_mut());
        }
        result
    }

    /// `∃ svars . (f ∧ g)` without building the conjunction first.
    pub(crate) fn and_exist(&mut self, f: Edge, g: Edge, svars: Edge) -> Edge {
        if f.is_error() || g.is_error() || svars.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || g.is_overflow() || svars.is_overflow() {
            return Edge::overflow();
        }

        self.mark_smooth_vars(svars);
        let ans = self.andexist_step(f, g);
        self.sm_tbl.clear();
        self.ae_tbl.clear();
        self.clear_varmark();
        ans
    }

    fn andexist_step(&mut self, f: Edge, g: Edge) -> Edge {
        if f.is_invalid() {
            return f;
        }
        if g.is_invalid() {
            return g;
        }
        if f.is_zero() || g.is_zero() {
            return Edge::zero();
        }
        if f.is_one() && g.is_one() {
            return Edge::one();
        }
        if f.is_one() {
            return self.esmooth_step(g);
        }
        if g.is_one() {
            return self.esmooth_step(f);
        }

        let (f, g) = if f > g { (g, f) } else { (f, g) };

        let f_level = self.edge_level(f);
        let g_level = self.edge_level(g);
        let level = f_level.min(g_level);
        if level > self.last_level {
            // Below the quantified prefix this is a plain conjunction.
            return self.and_op(f, g);
        }

        let mut result = self.ae_tbl.get(f, g);
        if result.is_error() {
            if self.vars[level as usize].mark != 0 {
                if f_level > level {
                    let (g_0, g_1) = self.children_inv(g);
                    let tmp = self.or_op(g_0, g_1);
                    result = self.andexist_step(f, tmp);
                } else if g_level > level {
                    let (f_0, f_1) = self.children_inv(f);
                    let tmp = self.or_op(f_0, f_1);
                    result = self.andexist_step(tmp, g);
                } else {
                    let (f_0, f_1) = self.children_inv(f);
                    let (g_0, g_1) = self.children_inv(g);
                    let tmp1 = self.andexist_step(f_0, g_0);
                    if tmp1.is_invalid() {
                        return tmp1;
                    }
                    let tmp2 = self.andexist_step(f_1, g_1);
                    if tmp2.is_invalid() {
                        return tmp2;
                    }
                    result = self.or_op(tmp1, tmp2);
                }
            } else {
                let (f_0, f_1) = self.split1(level, f);
                let (g_0, g_1) = self.split1(level, g);
                let r_0 = self.andexist_step(f_0, g_0);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.andexist_step(f_1, g_1);
                if r_1.is_invalid() {
                    return r_1;
                }
                result = self.new_node(level, r_0, r_1);
            }
            self.ae_tbl.put(f, g, result, self.arena.gauge_mut());
        }
        result
    }
}
