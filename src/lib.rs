//! # robdd
//!
//! Reduced ordered binary decision diagrams with complement edges, a
//! hash-consed unique table, reference-counted mark-sweep garbage collection
//! and a cache-backed recursive operation engine.
//!
//! ## Overview
//!
//! A [`BddMgr`] owns every node; clients hold [`Bdd`] handles, which are
//! canonical: two handles compare equal exactly when they denote the same
//! Boolean function. On top of the core connectives the engine provides
//! quantification, generalized cofactors, composition, support and symmetry
//! analysis, irredundant sum-of-products extraction, satisfy counting with
//! arbitrary precision, and path queries.
//!
//! ```
//! use robdd::{BddMgr, VarId};
//!
//! let mgr = BddMgr::classic("demo");
//! let a = mgr.posi_literal(VarId(0));
//! let b = mgr.posi_literal(VarId(1));
//! let c = mgr.posi_literal(VarId(2));
//!
//! // f = (a + b) * c
//! let f = a.or(&b).and(&c);
//!
//! assert_eq!(f.minterm_count(3), 3u32.into());
//! assert_eq!(f.support(), vec![VarId(0), VarId(1), VarId(2)]);
//! assert_eq!(f.shortest_onepath_len(), Some(2));
//!
//! // Canonicity: same function, same handle.
//! let g = c.and(&b).or(&c.and(&a));
//! assert_eq!(f, g);
//! ```
//!
//! ## Managers
//!
//! Two flavors share one engine: [`BddMgr::classic`] keeps a single global
//! unique table; [`BddMgr::modern`] keeps one sub-table per variable (the
//! shape a reordering pass would need). A lazily created per-thread default
//! manager is available through [`BddMgr::default_mgr`].
//!
//! ## Failure model
//!
//! The engine never panics on resource exhaustion. When the configured
//! memory ceiling is hit, the failing operation returns the *overflow*
//! function and every operation over it stays *overflow*; logic errors (the
//! generalized cofactor of the zero constraint, operations on a dropped
//! manager) propagate the *error* function the same way. Both are observable
//! through [`Bdd::is_overflow`] and [`Bdd::is_error`].
//!
//! ## Tuning and observability
//!
//! GC thresholds, table load factors and the memory ceiling live in
//! [`BddMgrParam`]. Internal events (GC, table growth, allocation failure)
//! go to the `log` facade under the `robdd` target, and optionally to a
//! per-manager sink installed with [`BddMgr::set_log_stream`].

mod alloc;
mod cache;
mod edge;
mod manager;
mod node;
mod op;

pub mod expr;

pub use edge::{Edge, Literal, VarId};
pub use expr::{Expr, ExprParseError};
pub use manager::{Bdd, BddMgr, BddMgrParam};
