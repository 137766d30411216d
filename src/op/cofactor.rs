//! Cofactoring: generalized cofactor, cube division, single-variable
//! cofactor and the Davio moment

use crate::cache::ComputedTable;
use crate::edge::{check_reverse, Edge, VarId};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    /// Generalized cofactor (constrain) `f ↓ c`. The zero constraint has no
    /// cofactor and yields the error function. A cube constraint takes the
    /// linear-time division path.
    pub(crate) fn gcofactor(&mut self, f: Edge, c: Edge) -> Edge {
        if f.is_error() || c.is_error() {
            return Edge::error();
        }
        if f.is_overflow() || c.is_overflow() {
            return Edge::overflow();
        }
        if c.is_zero() {
            return Edge::error();
        }
        if self.check_cube(c) {
            return self.cube_division(f, c);
        }
        self.gcofactor_step(f, c)
    }

    fn gcofactor_step(&mut self, f: Edge, c: Edge) -> Edge {
        if f.is_invalid() {
            return f;
        }
        if c.is_invalid() {
            return c;
        }
        if c.is_zero() {
            return Edge::error();
        }
        if f.is_const() || c.is_one() {
            return f;
        }
        if f == c {
            return Edge::one();
        }
        if check_reverse(f, c) {
            return Edge::zero();
        }

        // (¬f) ↓ c = ¬(f ↓ c): strip f's complement around the recursion.
        let f_inv = f.inv();
        let f = f.normalize();

        let mut result = self.cofac_tbl.get(f, c);
        if result.is_error() {
            let f_level = self.edge_level(f);
            let c_level = self.edge_level(c);

            if f_level < c_level {
                let (f_0, f_1) = self.children_inv(f);
                let r_0 = self.gcofactor_step(f_0, c);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.gcofactor_step(f_1, c);
                if r_1.is_invalid() {
                    return r_1;
                }
                result = self.new_node(f_level, r_0, r_1);
                self.cofac_tbl.put(f, c, result, self.arena.gauge_mut());
            } else {
                let (f_0, f_1) = self.split1(c_level, f);
                let (c_0, c_1) = self.children_inv(c);
                if c_0.is_zero() {
                    // The constraint forces this variable to 1; both branches
                    // of f collapse onto the 1-side of c.
                    result = self.gcofactor_step(f_1, c_1);
                    self.cofac_tbl.put(f, c, result, self.arena.gauge_mut());
                } else if c_1.is_zero() {
                    result = self.gcofactor_step(f_0, c_0);
                    self.cofac_tbl.put(f, c, result, self.arena.gauge_mut());
                } else {
                    let r_0 = self.gcofactor_step(f_0, c_0);
                    if r_0.is_invalid() {
                        return r_0;
                    }
                    let r_1 = self.gcofactor_step(f_1, c_1);
                    if r_1.is_invalid() {
                        return r_1;
                    }
                    result = self.new_node(c_level, r_0, r_1);
                    self.cofac_tbl.put(f, c, result, self.arena.gauge_mut());
                }
            }
        }
        result.add_inv(f_inv)
    }

    /// Cofactor by one literal: `var = 1`, or `var = 0` when `inv`.
    pub(crate) fn scofactor(&mut self, e: Edge, var: VarId, inv: bool) -> Edge {
        if e.is_invalid() {
            return e;
        }
        self.clear_varmark();
        let Some(level) = self.var_level(var) else {
            // Unknown variable: the function cannot depend on it.
            return e;
        };
        self.vars[level as usize].mark = if inv { 2 } else { 1 };
        self.last_level = level;
        let ans = self.cubediv_step(e);
        self.cubediv_tbl.clear();
        self.clear_varmark();
        ans
    }

    // Constraint is a cube: mark each cube literal's phase, then divide in
    // one linear pass.
    fn cube_division(&mut self, f: Edge, c: Edge) -> Edge {
        self.clear_varmark();
        self.last_level = 0;
        let mut e = c;
        while let Some(id) = e.node_id() {
            let inv = e.inv();
            let node = self.arena.node(id);
            let level = node.level();
            let e0 = node.edge0_inv(inv);
            let e1 = node.edge1_inv(inv);
            self.last_level = level;
            if e0.is_zero() {
                self.vars[level as usize].mark = 1;
                e = e1;
            } else {
                self.vars[level as usize].mark = 2;
                e = e0;
            }
        }
        let ans = self.cubediv_step(f);
        self.cubediv_tbl.clear();
        self.clear_varmark();
        ans
    }

    fn cubediv_step(&mut self, f: Edge) -> Edge {
        if f.is_invalid() || f.is_const() {
            return f;
        }
        let level = self.edge_level(f);
        if level > self.last_level {
            return f;
        }

        let f_inv = f.inv();
        let f = f.normalize();

        let mut result = self.cubediv_tbl.get(f);
        if result.is_error() {
            let (f_0, f_1) = self.children_inv(f);
            match self.vars[level as usize].mark {
                1 => {
                    // Positive literal in the cube: keep the 1-branch.
                    result = self.cubediv_step(f_1);
                }
                2 => {
                    result = self.cubediv_step(f_0);
                }
                _ => {
                    let r_0 = self.cubediv_step(f_0);
                    if r_0.is_invalid() {
                        return r_0;
                    }
                    let r_1 = self.cubediv_step(f_1);
                    if r_1.is_invalid() {
                        return r_1;
                    }
                    result = self.new_node(level, r_0, r_1);
                }
            }
            self.cubediv_tbl.put(f, result, self.arena.gauge_mut());
        }
        result.add_inv(f_inv)
    }

    /// Davio moment `f|x̄ ⊕ f|x` of `var`.
    pub(crate) fn xor_moment(&mut self, e: Edge, var: VarId) -> Edge {
        if e.is_invalid() {
            return e;
        }
        let Some(level) = self.var_level(var) else {
            // Independent of an unknown variable: the moment is zero.
            return Edge::zero();
        };
        self.last_level = level;
        let ans = self.xcofactor_step(e);
        self.xcof_tbl.clear();
        ans
    }

    fn xcofactor_step(&mut self, f: Edge) -> Edge {
        if f.is_invalid() {
            return f;
        }
        if f.is_const() {
            return Edge::zero();
        }
        let level = self.edge_level(f);
        if level > self.last_level {
            return Edge::zero();
        }

        // f and ¬f have the same moment.
        let f = f.normalize();

        let mut result = self.xcof_tbl.get(f);
        if result.is_error() {
            let (e_0, e_1) = self.children_inv(f);
            if level == self.last_level {
                result = self.xor_op(e_0, e_1);
            } else {
                let r_0 = self.xcofactor_step(e_0);
                if r_0.is_invalid() {
                    return r_0;
                }
                let r_1 = self.xcofactor_step(e_1);
                if r_1.is_invalid() {
                    return r_1;
                }
                result = self.new_node(level, r_0, r_1);
            }
            self.xcof_tbl.put(f, result, self.arena.gauge_mut());
        }
        result
    }
}
