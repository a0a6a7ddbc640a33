//! Error types for value binding and operand checking

use poly_types::Type;
use thiserror::Error;

use crate::operator::BinaryOp;

/// Errors raised while binding names or checking operations on bindings
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BindError {
    /// A name was defined twice in the same scope
    #[error("'{name}' is already defined")]
    AlreadyDefined {
        /// Name being redefined
        name: String,
    },

    /// A name was used before any definition
    #[error("'{name}' was never defined")]
    NeverDefined {
        /// Name that was looked up
        name: String,
    },

    /// Callee type is not a function (or a union of same-arity functions)
    #[error("A value of type {ty} is not callable")]
    NotCallable {
        /// Type of the callee
        ty: Type,
    },

    /// Wrong number of arguments
    #[error("Expected {expected} argument(s), got {actual}")]
    ArityMismatch {
        /// Declared parameter count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// The parameter type at `index` could not be projected out of the callee
    #[error("Cannot resolve the type of parameter {index} of {callee}")]
    UnresolvedParameter {
        /// Parameter position
        index: usize,
        /// Type of the callee
        callee: Type,
    },

    /// An argument does not satisfy its parameter
    #[error("Argument {index} of type {actual} does not match parameter type {expected}")]
    ArgumentMismatch {
        /// Argument position
        index: usize,
        /// Declared parameter type
        expected: Type,
        /// Supplied argument type
        actual: Type,
    },

    /// The return type could not be projected out of the callee
    #[error("Cannot resolve the return type of {callee}")]
    UnresolvedReturn {
        /// Type of the callee
        callee: Type,
    },

    /// Member access on a type without that member
    #[error("Type {ty} has no member '{key}'")]
    NoMember {
        /// Type of the object
        ty: Type,
        /// Requested member
        key: String,
    },

    /// An operand type has no common intersection across its branches
    #[error("Operand of type {ty} cannot be reduced to a single type")]
    IrreducibleOperand {
        /// Type of the operand
        ty: Type,
    },

    /// No operator rule accepts this pair of operand types
    #[error("Operator '{op}' cannot be applied to {lhs} and {rhs}")]
    InvalidOperands {
        /// Operator
        op: BinaryOp,
        /// Left operand type (reduced)
        lhs: Type,
        /// Right operand type (reduced)
        rhs: Type,
    },

    /// Template interpolation of a type that has no text form
    #[error("A value of type {ty} cannot be displayed in a template")]
    NotDisplayable {
        /// Type of the interpolated operand
        ty: Type,
    },

    /// Text repetition would produce an oversized string
    #[error("Repeating a text of {len} byte(s) {count} times is too large")]
    RepeatTooLarge {
        /// Length of the repeated text in bytes
        len: usize,
        /// Requested repeat count
        count: f64,
    },

    /// The payload disagrees with the type it was checked against
    #[error("Expected a {expected} payload")]
    InvalidPayload {
        /// Kind of payload the checked type promised
        expected: &'static str,
    },
}

/// Result alias used across the binding crate
pub type BindResult<T> = Result<T, BindError>;
