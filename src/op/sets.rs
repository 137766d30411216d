//! Variable-set and literal-set algebra over cube BDDs
//!
//! A variable set is a cube of positive literals (a right spine of 1-edges);
//! a literal set is any cube. Set elements compare by level for variable
//! sets and by (level, phase) for literal sets. The empty set is the one
//! function; the zero function is not a set and yields the error function.

use crate::edge::{Edge, Literal};
use crate::manager::store::NodeStore;
use crate::manager::MgrImpl;
use crate::node::Node;

// The non-zero child of a cube node; `which` tells which branch it was.
#[inline]
fn select_edge(node: &Node, inv: bool) -> (Edge, u8) {
    let e0 = node.edge0_inv(inv);
    if e0.is_zero() {
        (node.edge1_inv(inv), 1)
    } else {
        (e0, 0)
    }
}

impl<S: NodeStore> MgrImpl<S> {
    /// True when `e` is a cube: one path to the 1 terminal.
    pub(crate) fn check_cube(&self, e: Edge) -> bool {
        if e.is_invalid() || e.is_zero() {
            return false;
        }
        let mut e = e;
        while !e.is_one() {
            let (e0, e1) = self.children_inv(e);
            if e0.is_zero() {
                e = e1;
            } else if e1.is_zero() {
                e = e0;
            } else {
                return false;
            }
        }
        true
    }

    /// True when `e` is a cube of positive literals only.
    pub(crate) fn check_posi_cube(&self, e: Edge) -> bool {
        if e.is_invalid() || e.is_zero() {
            return false;
        }
        let mut e = e;
        while !e.is_one() {
            let (e0, e1) = self.children_inv(e);
            if !e0.is_zero() || e1.is_zero() {
                return false;
            }
            e = e1;
        }
        true
    }

    /// Intersection of two variable sets.
    pub(crate) fn vscap(&mut self, e1: Edge, e2: Edge) -> Edge {
        if e1.is_error() || e2.is_error() {
            return Edge::error();
        }
        if e1.is_overflow() || e2.is_overflow() {
            return Edge::overflow();
        }
        if e1.is_one() || e2.is_one() {
            return Edge::one();
        }
        if e1.is_zero() || e2.is_zero() {
            return Edge::error();
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 == level2 {
                let n1 = self.node_ref(e1).map(Node::edge1);
                let n2 = self.node_ref(e2).map(Node::edge1);
                let (next1, next2) = (
                    n1.expect("set walk left the spine - this is a bug in the engine"),
                    n2.expect("set walk left the spine - this is a bug in the engine"),
                );
                let tmp = self.vscap(next1, next2);
                return self.new_node(level1, Edge::zero(), tmp);
            } else if level1 < level2 {
                e1 = self
                    .node_ref(e1)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e1.is_one() {
                    return Edge::one();
                }
            } else {
                e2 = self
                    .node_ref(e2)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e2.is_one() {
                    return Edge::one();
                }
            }
        }
    }

    /// Difference of two variable sets (`e1 \ e2`).
    pub(crate) fn vsdiff(&mut self, e1: Edge, e2: Edge) -> Edge {
        if e1.is_error() || e2.is_error() {
            return Edge::error();
        }
        if e1.is_overflow() || e2.is_overflow() {
            return Edge::overflow();
        }
        if e1.is_zero() || e2.is_zero() {
            return Edge::error();
        }
        if e1.is_one() {
            return Edge::one();
        }
        if e2.is_one() {
            return e1;
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 < level2 {
                let next1 = self
                    .node_ref(e1)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                let tmp = self.vsdiff(next1, e2);
                return self.new_node(level1, Edge::zero(), tmp);
            } else if level1 > level2 {
                e2 = self
                    .node_ref(e2)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e2.is_one() {
                    return e1;
                }
            } else {
                e1 = self
                    .node_ref(e1)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                e2 = self
                    .node_ref(e2)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e1.is_one() {
                    return Edge::one();
                }
                if e2.is_one() {
                    return e1;
                }
            }
        }
    }

    /// True when two variable sets share an element.
    pub(crate) fn vsintersect(&self, e1: Edge, e2: Edge) -> bool {
        if e1.is_invalid() || e2.is_invalid() {
            return false;
        }
        if e1.is_const() || e2.is_const() {
            return false;
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 == level2 {
                return true;
            }
            if level1 < level2 {
                e1 = self
                    .node_ref(e1)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e1.is_one() {
                    return false;
                }
            } else {
                e2 = self
                    .node_ref(e2)
                    .map(Node::edge1)
                    .expect("set walk left the spine - this is a bug in the engine");
                if e2.is_one() {
                    return false;
                }
            }
        }
    }

    /// Intersection of two literal sets.
    pub(crate) fn lscap(&mut self, e1: Edge, e2: Edge) -> Edge {
        if e1.is_error() || e2.is_error() {
            return Edge::error();
        }
        if e1.is_overflow() || e2.is_overflow() {
            return Edge::overflow();
        }
        if e1.is_zero() || e2.is_zero() {
            return Edge::error();
        }
        if e1.is_one() || e2.is_one() {
            return Edge::one();
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 == level2 {
                let (n1, n2) = (
                    self.node_ref(e1)
                        .expect("set walk left the spine - this is a bug in the engine"),
                    self.node_ref(e2)
                        .expect("set walk left the spine - this is a bug in the engine"),
                );
                let (a1, which1) = select_edge(n1, e1.inv());
                let (a2, which2) = select_edge(n2, e2.inv());
                if which1 == which2 {
                    let tmp = self.lscap(a1, a2);
                    return if which1 == 0 {
                        self.new_node(level1, tmp, Edge::zero())
                    } else {
                        self.new_node(level1, Edge::zero(), tmp)
                    };
                }
                if a1.is_one() || a2.is_one() {
                    return Edge::one();
                }
                e1 = a1;
                e2 = a2;
            } else if level1 < level2 {
                let n1 = self
                    .node_ref(e1)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a1, _) = select_edge(n1, e1.inv());
                if a1.is_one() {
                    return Edge::one();
                }
                e1 = a1;
            } else {
                let n2 = self
                    .node_ref(e2)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a2, _) = select_edge(n2, e2.inv());
                if a2.is_one() {
                    return Edge::one();
                }
                e2 = a2;
            }
        }
    }

    /// Difference of two literal sets (`e1 \ e2`); literals of the same
    /// variable with opposite phases are distinct elements.
    pub(crate) fn lsdiff(&mut self, e1: Edge, e2: Edge) -> Edge {
        if e1.is_error() || e2.is_error() {
            return Edge::error();
        }
        if e1.is_overflow() || e2.is_overflow() {
            return Edge::overflow();
        }
        if e1.is_zero() || e2.is_zero() {
            return Edge::error();
        }
        if e1.is_one() || e2.is_one() {
            return e1;
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 < level2 {
                let n1 = self
                    .node_ref(e1)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a1, which1) = select_edge(n1, e1.inv());
                let tmp = self.lsdiff(a1, e2);
                return if which1 == 0 {
                    self.new_node(level1, tmp, Edge::zero())
                } else {
                    self.new_node(level1, Edge::zero(), tmp)
                };
            } else if level1 > level2 {
                let n2 = self
                    .node_ref(e2)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a2, _) = select_edge(n2, e2.inv());
                if a2.is_one() {
                    return e1;
                }
                e2 = a2;
            } else {
                let (n1, n2) = (
                    self.node_ref(e1)
                        .expect("set walk left the spine - this is a bug in the engine"),
                    self.node_ref(e2)
                        .expect("set walk left the spine - this is a bug in the engine"),
                );
                let (a1, which1) = select_edge(n1, e1.inv());
                let (a2, which2) = select_edge(n2, e2.inv());
                if which1 != which2 {
                    let tmp = self.lsdiff(a1, a2);
                    return if which1 == 0 {
                        self.new_node(level1, tmp, Edge::zero())
                    } else {
                        self.new_node(level1, Edge::zero(), tmp)
                    };
                }
                if a1.is_one() || a2.is_one() {
                    return a1;
                }
                e1 = a1;
                e2 = a2;
            }
        }
    }

    /// True when two literal sets share an element (same variable, same
    /// phase).
    pub(crate) fn lsintersect(&self, e1: Edge, e2: Edge) -> bool {
        if e1.is_invalid() || e2.is_invalid() {
            return false;
        }
        if e1.is_const() || e2.is_const() {
            return false;
        }

        let mut e1 = e1;
        let mut e2 = e2;
        loop {
            let level1 = self.edge_level(e1);
            let level2 = self.edge_level(e2);
            if level1 == level2 {
                let (n1, n2) = (
                    self.node_ref(e1)
                        .expect("set walk left the spine - this is a bug in the engine"),
                    self.node_ref(e2)
                        .expect("set walk left the spine - this is a bug in the engine"),
                );
                let (a1, which1) = select_edge(n1, e1.inv());
                let (a2, which2) = select_edge(n2, e2.inv());
                if which1 == which2 {
                    return true;
                }
                if a1.is_one() || a2.is_one() {
                    return false;
                }
                e1 = a1;
                e2 = a2;
            } else if level1 < level2 {
                let n1 = self
                    .node_ref(e1)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a1, _) = select_edge(n1, e1.inv());
                if a1.is_one() {
                    return false;
                }
                e1 = a1;
            } else {
                let n2 = self
                    .node_ref(e2)
                    .expect("set walk left the spine - this is a bug in the engine");
                let (a2, _) = select_edge(n2, e2.inv());
                if a2.is_one() {
                    return false;
                }
                e2 = a2;
            }
        }
    }

    /// The literals of a cube, sorted by variable (positive phase first).
    pub(crate) fn to_literal_vec(&self, e: Edge) -> Vec<Literal> {
        let mut dst = Vec::new();
        if e.is_invalid() {
            return dst;
        }

        let mut e = e;
        while let Some(id) = e.node_id() {
            let inv = e.inv();
            let node = self.arena.node(id);
            let level = node.level();
            let var = self.vars[level as usize].varid;
            let e0 = node.edge0_inv(inv);
            let e1 = node.edge1_inv(inv);
            if e0.is_zero() {
                dst.push(Literal::new(var, false));
                e = e1;
            } else {
                dst.push(Literal::new(var, true));
                e = e0;
            }
        }
        dst.sort_unstable();
        dst
    }
}
