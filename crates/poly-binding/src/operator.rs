//! Binary operators and template rendering
//!
//! Operators work on carrier types only: the checker reduces each operand and
//! strips literal-ness before consulting [`BinaryOp::result_type`].

use std::fmt;

use poly_types::{Payload, Type};

use crate::binding::Binding;
use crate::error::{BindError, BindResult};

/// Longest text, in bytes, a repetition may produce
pub const MAX_TEXT_LEN: usize = 1 << 30;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`: numeric sum or text concatenation
    Add,
    /// `*`: numeric product or text repetition
    Multiply,
}

impl BinaryOp {
    /// Source symbol of the operator
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Multiply => "*",
        }
    }

    /// Result type for a pair of carrier operand types, if the pair is allowed
    pub fn result_type(&self, lhs: &Type, rhs: &Type) -> Option<Type> {
        match (self, lhs, rhs) {
            (BinaryOp::Add, Type::Number, Type::Number) => Some(Type::Number),
            (BinaryOp::Add, Type::Text, Type::Text) => Some(Type::Text),
            (BinaryOp::Multiply, Type::Number, Type::Number) => Some(Type::Number),
            (BinaryOp::Multiply, Type::Text, Type::Number) => Some(Type::Text),
            _ => None,
        }
    }

    /// Apply the operator to two checked bindings
    ///
    /// The result is typed by its carrier. A text repeat count is truncated
    /// toward zero and negative counts repeat nothing; a repetition longer
    /// than [`MAX_TEXT_LEN`] bytes is an error.
    pub fn apply(&self, lhs: &Binding, rhs: &Binding) -> BindResult<Binding> {
        match (self, &lhs.payload, &rhs.payload) {
            (BinaryOp::Add, Payload::Number(a), Payload::Number(b)) => {
                Ok(Binding::new(Payload::Number(a + b), Type::Number))
            }
            (BinaryOp::Add, Payload::Text(a), Payload::Text(b)) => {
                Ok(Binding::new(Payload::Text(format!("{}{}", a, b)), Type::Text))
            }
            (BinaryOp::Multiply, Payload::Number(a), Payload::Number(b)) => {
                Ok(Binding::new(Payload::Number(a * b), Type::Number))
            }
            (BinaryOp::Multiply, Payload::Text(s), Payload::Number(n)) => {
                let count = if n.is_finite() && *n > 0.0 {
                    n.trunc() as usize
                } else {
                    0
                };
                match s.len().checked_mul(count) {
                    Some(0) => Ok(Binding::new(Payload::Text(String::new()), Type::Text)),
                    Some(len) if len <= MAX_TEXT_LEN => {
                        Ok(Binding::new(Payload::Text(s.repeat(count)), Type::Text))
                    }
                    _ => Err(BindError::RepeatTooLarge {
                        len: s.len(),
                        count: *n,
                    }),
                }
            }
            (BinaryOp::Add, _, _) => Err(BindError::InvalidPayload {
                expected: "Number or Text",
            }),
            (BinaryOp::Multiply, _, _) => Err(BindError::InvalidPayload {
                expected: "Number",
            }),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Text form of a checked template chunk
///
/// Integral numbers print without a fractional part.
pub fn render_chunk(payload: &Payload) -> BindResult<String> {
    match payload {
        Payload::Text(s) => Ok(s.clone()),
        Payload::Number(n) if *n == 0.0 => Ok("0".to_string()),
        Payload::Number(n) if n.is_nan() => Ok("NaN".to_string()),
        Payload::Number(n) if n.is_infinite() => {
            Ok(if *n > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
        }
        Payload::Number(n) => Ok(n.to_string()),
        _ => Err(BindError::InvalidPayload {
            expected: "Text or Number",
        }),
    }
}
