//! Poly Value Binding
//!
//! Name bindings and operation checks for the Poly evaluator, built on the
//! type algebra in `poly-types`.
//!
//! This crate provides:
//! - Bindings pairing runtime payloads with (possibly union) static types
//! - Scopes with single definition and host globals
//! - Call, member, operator and template checks
//!
//! # Usage
//!
//! ```
//! use poly_binding::{Binding, Checker, Scope};
//!
//! let scope = Scope::prelude();
//! let mut checker = Checker::new();
//!
//! let console = scope.lookup("console")?;
//! let log = checker.eval_member(console, "log")?;
//! let ret = checker.check_call(&log.ty, &[Binding::number(2.0).ty])?;
//! assert_eq!(ret.to_string(), "Void");
//! # Ok::<(), poly_binding::BindError>(())
//! ```

#![warn(missing_docs)]

pub mod binding;
pub mod scope;
pub mod operator;
pub mod checker;
pub mod error;

// Re-export main types
pub use binding::Binding;
pub use scope::Scope;
pub use operator::{render_chunk, BinaryOp, MAX_TEXT_LEN};
pub use checker::Checker;
pub use error::{BindError, BindResult};
