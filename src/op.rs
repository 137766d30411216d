//! The recursive operation engine
//!
//! Every operation follows the same template: terminal shortcuts, operand
//! normalization, a computed-table probe, a Shannon split at the topmost
//! level among the operands, recursion on the cofactors, and a reduce step
//! through the unique table. *error* and *overflow* short-circuit out of the
//! recursion unchanged.
//!
//! The files in this directory group the operations the way they share
//! caches and helpers; all of them are inherent methods on the manager so
//! the classic and modern flavors get the identical engine.

use crate::edge::{Edge, VarId};
use crate::manager::{MgrImpl, MgrOps};
use crate::manager::store::NodeStore;

mod bool_ops;
mod cofactor;
mod compose;
mod count;
mod isop;
mod ite;
mod path;
mod quant;
mod sets;
mod support;
mod symmetry;

#[cfg(test)]
mod tests;

impl<S: NodeStore> MgrImpl<S> {
    /// Builds the function described by a truth-table vector over `vars`.
    ///
    /// `v.len()` must be `2^vars.len()`; index 0 is the all-zeros input row
    /// and `vars[0]` is the most significant input. A length mismatch yields
    /// the error function.
    pub(crate) fn tvec_to_bdd(&mut self, v: &[bool], vars: &[VarId]) -> Edge {
        if vars.len() >= usize::BITS as usize || v.len() != 1 << vars.len() {
            return Edge::error();
        }
        let var_edges: Vec<Edge> = vars.iter().map(|&id| self.make_posiliteral(id)).collect();
        self.tvec_sub(v, 0, v.len(), &var_edges, 0)
    }

    fn tvec_sub(
        &mut self,
        v: &[bool],
        top: usize,
        size: usize,
        var_edges: &[Edge],
        var_idx: usize,
    ) -> Edge {
        if size == 1 {
            if v[top] {
                Edge::one()
            } else {
                Edge::zero()
            }
        } else {
            let size1 = size >> 1;
            let l = self.tvec_sub(v, top, size1, var_edges, var_idx + 1);
            let h = self.tvec_sub(v, top + size1, size1, var_edges, var_idx + 1);
            self.ite_op(var_edges[var_idx], h, l)
        }
    }
}
