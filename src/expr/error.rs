//! Error type for the expression parser

use std::fmt;

/// Errors produced when parsing the textual sum-of-products form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprParseError {
    /// The input is not a well-formed expression.
    InvalidSyntax {
        /// The parser's message.
        message: String,
        /// The original input string.
        input: String,
        /// Byte position of the offending token, when known.
        position: Option<usize>,
    },
}

impl fmt::Display for ExprParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprParseError::InvalidSyntax {
                message,
                input,
                position,
            } => {
                if let Some(pos) = position {
                    write!(
                        f,
                        "Failed to parse expression at position {}: {}. Input: {:?}",
                        pos, message, input
                    )
                } else {
                    write!(
                        f,
                        "Failed to parse expression: {}. Input: {:?}",
                        message, input
                    )
                }
            }
        }
    }
}

impl std::error::Error for ExprParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position_when_known() {
        let err = ExprParseError::InvalidSyntax {
            message: "unexpected token".to_string(),
            input: "v0 + +".to_string(),
            position: Some(5),
        };
        let msg = err.to_string();
        assert!(msg.contains("position 5"));
        assert!(msg.contains("unexpected token"));
    }

    #[test]
    fn display_omits_unknown_position() {
        let err = ExprParseError::InvalidSyntax {
            message: "bad variable".to_string(),
            input: "v99999999999".to_string(),
            position: None,
        };
        let msg = err.to_string();
        assert!(!msg.contains("position"));
    }
}
