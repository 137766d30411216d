//! Sum-of-products expressions
//!
//! The symbolic form returned by the ISOP and prime-cover operations: an AST
//! over numbered variables with constants, literals, n-ary products and
//! n-ary sums. Negation is kept in the literals (De Morgan is applied
//! eagerly), so a cover prints exactly as the product terms it contains.
//!
//! Expressions are built with the `&`, `|` and `!` operators, printed with
//! `*`, `+` and `~`, and parsed back from that notation:
//!
//! ```
//! use robdd::Expr;
//!
//! let e: Expr = "v0 * ~v1 + v2".parse().unwrap();
//! assert_eq!(e.product_num(), 2);
//! assert_eq!(e.to_string(), "v0 * ~v1 + v2");
//! ```

use std::fmt;
use std::str::FromStr;

use lalrpop_util::ParseError;

use crate::edge::{Literal, VarId};

pub mod error;

pub use error::ExprParseError;

#[allow(clippy::all)]
mod parser {
    #![allow(dead_code)]
    #![allow(unused_imports)]
    include!(concat!(env!("OUT_DIR"), "/expr/sop.rs"));
}

/// A Boolean expression in (near-)sum-of-products shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// The constant 0 or 1.
    Const(bool),
    /// A single literal.
    Lit(Literal),
    /// A product of at least two factors.
    And(Vec<Expr>),
    /// A sum of at least two terms.
    Or(Vec<Expr>),
}

impl Expr {
    /// The constant-false expression (the empty cover).
    pub fn zero() -> Expr {
        Expr::Const(false)
    }

    /// The constant-true expression (the universal cover).
    pub fn one() -> Expr {
        Expr::Const(true)
    }

    /// The literal of `var`, negated when `inv` is true.
    pub fn literal(var: VarId, inv: bool) -> Expr {
        Expr::Lit(Literal::new(var, inv))
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(false))
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Const(true))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Expr::Const(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Lit(_))
    }

    /// True for a product node.
    pub fn is_product(&self) -> bool {
        matches!(self, Expr::And(_))
    }

    /// True for a sum node.
    pub fn is_sum(&self) -> bool {
        matches!(self, Expr::Or(_))
    }

    /// Number of direct children (zero for constants and literals).
    pub fn child_num(&self) -> usize {
        match self {
            Expr::And(cs) | Expr::Or(cs) => cs.len(),
            _ => 0,
        }
    }

    /// The `i`-th direct child.
    ///
    /// # Panics
    ///
    /// Panics when `i >= self.child_num()`.
    pub fn child(&self, i: usize) -> &Expr {
        match self {
            Expr::And(cs) | Expr::Or(cs) => &cs[i],
            _ => panic!("child() on a leaf expression"),
        }
    }

    /// Total number of literal occurrences.
    pub fn literal_num(&self) -> usize {
        match self {
            Expr::Const(_) => 0,
            Expr::Lit(_) => 1,
            Expr::And(cs) | Expr::Or(cs) => cs.iter().map(Expr::literal_num).sum(),
        }
    }

    /// Number of product terms when the expression is read as a cover:
    /// 0 for the empty cover, each literal or product is one term.
    pub fn product_num(&self) -> usize {
        match self {
            Expr::Const(false) => 0,
            Expr::Const(true) | Expr::Lit(_) | Expr::And(_) => 1,
            Expr::Or(cs) => cs.len(),
        }
    }

    /// Evaluates under the given assignment.
    pub fn eval<F: Fn(VarId) -> bool>(&self, assign: &F) -> bool {
        match self {
            Expr::Const(b) => *b,
            Expr::Lit(lit) => assign(lit.var()) != lit.is_inverted(),
            Expr::And(cs) => cs.iter().all(|c| c.eval(assign)),
            Expr::Or(cs) => cs.iter().any(|c| c.eval(assign)),
        }
    }

    /// Parses the `*`/`+`/`~` notation (also accepting `&`, `|`, `!`) with
    /// `v<N>` variable atoms.
    pub fn parse(input: &str) -> Result<Expr, ExprParseError> {
        parser::SopParser::new().parse(input).map_err(|e| {
            let position = match &e {
                ParseError::InvalidToken { location } => Some(*location),
                ParseError::UnrecognizedEof { location, .. } => Some(*location),
                ParseError::UnrecognizedToken { token: (l, _, _), .. } => Some(*l),
                ParseError::ExtraToken { token: (l, _, _) } => Some(*l),
                ParseError::User { .. } => None,
            };
            ExprParseError::InvalidSyntax {
                message: e.to_string(),
                input: input.to_owned(),
                position,
            }
        })
    }
}

impl FromStr for Expr {
    type Err = ExprParseError;

    fn from_str(s: &str) -> Result<Expr, ExprParseError> {
        Expr::parse(s)
    }
}

impl std::ops::BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Const(false), _) | (_, Expr::Const(false)) => Expr::zero(),
            (Expr::Const(true), x) | (x, Expr::Const(true)) => x,
            (Expr::And(mut a), Expr::And(b)) => {
                a.extend(b);
                Expr::And(a)
            }
            (Expr::And(mut a), x) => {
                a.push(x);
                Expr::And(a)
            }
            (x, Expr::And(b)) => {
                let mut a = vec![x];
                a.extend(b);
                Expr::And(a)
            }
            (x, y) => Expr::And(vec![x, y]),
        }
    }
}

impl std::ops::BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        match (self, rhs) {
            (Expr::Const(true), _) | (_, Expr::Const(true)) => Expr::one(),
            (Expr::Const(false), x) | (x, Expr::Const(false)) => x,
            (Expr::Or(mut a), Expr::Or(b)) => {
                a.extend(b);
                Expr::Or(a)
            }
            (Expr::Or(mut a), x) => {
                a.push(x);
                Expr::Or(a)
            }
            (x, Expr::Or(b)) => {
                let mut a = vec![x];
                a.extend(b);
                Expr::Or(a)
            }
            (x, y) => Expr::Or(vec![x, y]),
        }
    }
}

impl std::ops::Not for Expr {
    type Output = Expr;

    // De Morgan, eagerly: negation lives only in the literals.
    fn not(self) -> Expr {
        match self {
            Expr::Const(b) => Expr::Const(!b),
            Expr::Lit(lit) => Expr::Lit(Literal::new(lit.var(), !lit.is_inverted())),
            Expr::And(cs) => cs
                .into_iter()
                .map(|c| !c)
                .reduce(|acc, c| acc | c)
                .unwrap_or_else(Expr::zero),
            Expr::Or(cs) => cs
                .into_iter()
                .map(|c| !c)
                .reduce(|acc, c| acc & c)
                .unwrap_or_else(Expr::one),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum OpCtx {
    None,
    And,
    Or,
}

impl Expr {
    fn fmt_with_ctx(&self, f: &mut fmt::Formatter<'_>, ctx: OpCtx) -> fmt::Result {
        match self {
            Expr::Const(b) => write!(f, "{}", if *b { "1" } else { "0" }),
            Expr::Lit(lit) => write!(f, "{}", lit),
            Expr::And(cs) => {
                for (i, c) in cs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " * ")?;
                    }
                    c.fmt_with_ctx(f, OpCtx::And)?;
                }
                Ok(())
            }
            Expr::Or(cs) => {
                // A sum inside a product needs the parentheses.
                let needs_parens = ctx == OpCtx::And;
                if needs_parens {
                    write!(f, "(")?;
                }
                for (i, c) in cs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " + ")?;
                    }
                    c.fmt_with_ctx(f, OpCtx::Or)?;
                }
                if needs_parens {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_ctx(f, OpCtx::None)
    }
}
