//! Type algebra errors
//!
//! The query engines never fail: they answer `bool` or `Option`. Errors only
//! arise when building values from ill-formed parts.

use thiserror::Error;

use crate::ty::TypeKind;

/// Errors that can occur while building algebra inputs
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TypeError {
    /// A value classifier must be a resolved type
    #[error("A {kind} cannot classify a runtime value")]
    Unresolved {
        /// Kind of the rejected classifier
        kind: TypeKind,
    },
}
