//! Support analysis and the smallest containing cube

use crate::edge::{Edge, VarId};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;

impl<S: NodeStore> MgrImpl<S> {
    // Polarity-aware traversal marks: a node approached through a plain edge
    // gets the p-mark, through a complemented edge the n-mark.
    pub(crate) fn edge_mark(&self, e: Edge) -> bool {
        match e.node_id() {
            Some(id) => {
                let n = self.arena.node(id);
                if e.inv() {
                    n.ref_mark.nmark()
                } else {
                    n.ref_mark.pmark()
                }
            }
            None => false,
        }
    }

    pub(crate) fn set_edge_mark(&mut self, e: Edge) {
        if let Some(id) = e.node_id() {
            let n = self.arena.node_mut(id);
            if e.inv() {
                n.ref_mark.set_nmark(true);
            } else {
                n.ref_mark.set_pmark(true);
            }
        }
    }

    /// Clears both traversal marks below `e`.
    pub(crate) fn clear_pnmark(&mut self, e: Edge) {
        if let Some(id) = e.node_id() {
            let node = self.arena.node(id);
            if node.ref_mark.pmark() || node.ref_mark.nmark() {
                let (e0, e1) = (node.edge0(), node.edge1());
                self.arena.node_mut(id).ref_mark.clear_marks();
                self.clear_pnmark(e0);
                self.clear_pnmark(e1);
            }
        }
    }

    // Marks every node once (p-mark) and collects each first-seen level.
    fn sup_step(&mut self, mut e: Edge) {
        loop {
            let Some(id) = e.node_id() else {
                return;
            };
            if self.arena.node(id).ref_mark.pmark() {
                return;
            }
            self.arena.node_mut(id).ref_mark.set_pmark(true);
            let node = self.arena.node(id);
            let level = node.level();
            let (e0, e1) = (node.edge0(), node.edge1());
            if self.vars[level as usize].mark == 0 {
                self.vars[level as usize].mark = 1;
                self.var_set.push(level);
            }
            self.sup_step(e0);
            e = e1;
        }
    }

    /// Union of the supports of `es`, in level order.
    pub(crate) fn support(&mut self, es: &[Edge]) -> Vec<VarId> {
        self.clear_varmark();
        for &e in es {
            self.sup_step(e);
        }
        for &e in es {
            self.clear_pnmark(e);
        }
        let mut levels = std::mem::take(&mut self.var_set);
        levels.sort_unstable();
        let vars = levels
            .iter()
            .map(|&l| self.vars[l as usize].varid)
            .collect();
        self.clear_varmark();
        vars
    }

    /// Union of the supports of `es` as a positive cube.
    pub(crate) fn support_cube(&mut self, es: &[Edge]) -> Edge {
        self.clear_varmark();
        for &e in es {
            self.sup_step(e);
        }
        for &e in es {
            self.clear_pnmark(e);
        }
        let mut levels = std::mem::take(&mut self.var_set);
        levels.sort_unstable();
        self.clear_varmark();

        // Build the spine bottom-up; no full conjunctions needed.
        let mut cube = Edge::one();
        for &level in levels.iter().rev() {
            cube = self.new_node(level, Edge::zero(), cube);
            if cube.is_invalid() {
                return cube;
            }
        }
        cube
    }

    /// Smallest cube containing `f`: the conjunction of every literal that
    /// holds on all of `f`'s 1-paths.
    pub(crate) fn scc(&mut self, f: Edge) -> Edge {
        if f.is_error() {
            return Edge::error();
        }
        if f.is_overflow() {
            return Edge::overflow();
        }
        if f.is_const() {
            return f;
        }

        let sup = self.support_cube(&[f]);
        if sup.is_invalid() {
            return sup;
        }

        self.clear_varmark();
        self.scc_step(f, sup);
        self.clear_pnmark(f);

        let levels = std::mem::take(&mut self.var_set);
        let mut ans = Edge::one();
        for level in levels {
            match self.vars[level as usize].mark {
                // Only the 0-branch reaches 1: the variable is fixed low.
                1 => {
                    let lit = self.new_node(level, Edge::zero(), Edge::one()).not();
                    ans = self.and_op(ans, lit);
                }
                2 => {
                    let lit = self.new_node(level, Edge::zero(), Edge::one());
                    ans = self.and_op(ans, lit);
                }
                _ => {}
            }
        }
        self.clear_varmark();
        ans
    }

    // Walks f under its support cube `s`, recording per variable which
    // branches can reach the 1 terminal.
    fn scc_step(&mut self, e: Edge, s: Edge) {
        if e.is_one() {
            // Every remaining support variable is free in this path.
            let mut s = s;
            while let Some(sid) = s.node_id() {
                let node = self.arena.node(sid);
                let level = node.level();
                let next = node.edge1();
                self.mark_scc_var(level, 3);
                s = next;
            }
            return;
        }

        let Some(id) = e.node_id() else {
            return;
        };
        if self.edge_mark(e) {
            return;
        }
        self.set_edge_mark(e);

        let level = self.arena.node(id).level();
        let Some(sid) = s.node_id() else {
            return;
        };
        let s_node = self.arena.node(sid);
        let s_level = s_node.level();
        let s2 = s_node.edge1();

        if s_level < level {
            // A support variable this path skips entirely: free.
            self.mark_scc_var(s_level, 3);
            self.scc_step(e, s2);
        } else {
            let (e0, e1) = self.children_inv(e);
            if !e0.is_zero() {
                self.mark_scc_var(level, 1);
                self.scc_step(e0, s2);
            }
            if !e1.is_zero() {
                self.mark_scc_var(level, 2);
                self.scc_step(e1, s2);
            }
        }
    }

    fn mark_scc_var(&mut self, level: u32, bits: u8) {
        let var = &mut self.vars[level as usize];
        if var.mark == 0 {
            self.var_set.push(level);
        }
        var.mark |= bits;
    }
}
