//! Variable symmetry check
//!
//! `check_symmetry(f, x, y, inv)` decides whether exchanging `x` with `y`
//! (with `x` against `¬y` when `inv`) leaves `f` unchanged, without building
//! the swapped function. Three phases: walk above `x`, pair the two
//! `x`-cofactors down to `y`, and verify residues are independent of `y`.

use crate::edge::{Edge, VarId, LEVEL_MAX};
use crate::manager::store::NodeStore;
use crate::manager::{MgrImpl, MgrOps};

// The per-call context: the two sorted levels plus the guard cubes salting
// the persistent caches.
struct SymCtx {
    x_level: u32,
    y_level: u32,
    xy_edge: Edge,
    y_edge: Edge,
    sym_inv: bool,
}

impl<S: NodeStore> MgrImpl<S> {
    pub(crate) fn check_symmetry(&mut self, e: Edge, x: VarId, y: VarId, inv: bool) -> bool {
        if x == y || e.is_invalid() {
            return false;
        }

        let x_edge = self.make_posiliteral(x);
        let y_edge = self.make_posiliteral(y);
        let xy_edge = self.and_op(x_edge, y_edge.add_inv(inv));
        if xy_edge.is_invalid() {
            return false;
        }

        let mut x_level = self.var_level(x).unwrap_or(LEVEL_MAX);
        let mut y_level = self.var_level(y).unwrap_or(LEVEL_MAX);
        if y_level < x_level {
            std::mem::swap(&mut x_level, &mut y_level);
        }

        let ctx = SymCtx {
            x_level,
            y_level,
            xy_edge,
            y_edge,
            sym_inv: inv,
        };
        self.cs_step(e, &ctx).is_one()
    }

    // Phase 1: paths above x. A path that reaches y without passing x breaks
    // the symmetry; a path that leaves the (x, y) window early keeps it.
    fn cs_step(&mut self, e: Edge, ctx: &SymCtx) -> Edge {
        let level = self.edge_level(e);
        if level > ctx.y_level {
            return Edge::one();
        }
        if level == ctx.y_level {
            return Edge::zero();
        }

        let e = e.normalize();
        let mut result = self.cs_tbl.get(e, ctx.xy_edge);
        if result.is_error() {
            let (e0, e1) = self.children_inv(e);
            if level < ctx.x_level {
                result = self.cs_step(e0, ctx);
                if result.is_one() {
                    result = self.cs_step(e1, ctx);
                }
            } else if level == ctx.x_level {
                result = self.cs_step1(e0, e1, ctx);
            } else {
                // Path skipped x: it must skip y as well.
                result = self.cs_step2(e0, ctx);
                if result.is_one() {
                    result = self.cs_step2(e1, ctx);
                }
            }
            self.cs_tbl.put(e, ctx.xy_edge, result, self.arena.gauge_mut());
        }
        result
    }

    // Phase 2: pairs the x = 0 and x = 1 cofactors; at y the cross
    // cofactors must coincide.
    fn cs_step1(&mut self, e1: Edge, e2: Edge, ctx: &SymCtx) -> Edge {
        if e1 == e2 {
            return self.cs_step2(e1, ctx);
        }

        let level1 = self.edge_level(e1);
        let level2 = self.edge_level(e2);
        let top_level = level1.min(level2);
        if top_level > ctx.y_level {
            // Depends on x but not on y underneath: asymmetric.
            return Edge::zero();
        }

        let mut result = self.cs1_tbl.get(e1, e2, ctx.xy_edge);
        if result.is_error() {
            let (e10, e11) = self.split1(top_level, e1);
            let (e20, e21) = self.split1(top_level, e2);
            if top_level < ctx.y_level {
                result = self.cs_step1(e10, e20, ctx);
                if result.is_one() {
                    result = self.cs_step1(e11, e21, ctx);
                }
            } else if !ctx.sym_inv {
                result = if e11 == e20 { Edge::one() } else { Edge::zero() };
            } else {
                result = if e10 == e21 { Edge::one() } else { Edge::zero() };
            }
            self.cs1_tbl
                .put(e1, e2, ctx.xy_edge, result, self.arena.gauge_mut());
        }
        result
    }

    // Phase 3: an x-free residue is symmetric exactly when it is y-free.
    fn cs_step2(&mut self, e: Edge, ctx: &SymCtx) -> Edge {
        let level = self.edge_level(e);
        if level > ctx.y_level {
            return Edge::one();
        }
        if level == ctx.y_level {
            return Edge::zero();
        }

        let e = e.normalize();
        let mut result = self.cs2_tbl.get(e, ctx.y_edge);
        if result.is_error() {
            let (e0, e1) = self.children_inv(e);
            result = self.cs_step2(e0, ctx);
            if result.is_one() {
                result = self.cs_step2(e1, ctx);
            }
            self.cs2_tbl.put(e, ctx.y_edge, result, self.arena.gauge_mut());
        }
        result
    }
}
