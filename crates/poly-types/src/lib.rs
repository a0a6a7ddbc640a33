//! Poly Type Algebra
//!
//! Structural types for the Poly expression language: an immutable type
//! representation plus the engines that decide subsets, compute
//! intersections and project structure through possibly-union types.
//!
//! # Usage
//!
//! ```
//! use poly_types::{Type, TypeAlgebra, Value};
//!
//! let declared = Type::union([Type::Number, Type::Text]);
//! let argument = Value::number(2.0).into_literal();
//!
//! let mut algebra = TypeAlgebra::new();
//! assert!(algebra.is_subset(&argument, &declared));
//! assert!(algebra.type_matches(&argument, &declared));
//! assert_eq!(algebra.reduce_type(&declared), None);
//! ```

#![warn(missing_docs)]

pub mod ty;
pub mod value;
pub mod error;
pub mod config;
pub mod cache;
pub mod normalize;
pub mod algebra;
pub mod subtyping;
pub mod intersection;
pub mod projection;

pub use ty::{
    DictionaryType, FunctionType, ListType, LiteralType, NamedParameter, NamedType, TupleType,
    Type, TypeKind, UnionType,
};
pub use value::{Payload, ResolvedType, Value};
pub use error::TypeError;
pub use config::{AlgebraConfig, ConfigError};
pub use cache::{CacheStats, TypeCache};
pub use normalize::{collapse_types, expand_types, expand_union};
pub use algebra::{
    intersect_type, intersect_types, is_subset, reduce_type, type_equal, type_matches, TypeAlgebra,
};
pub use projection::{get_member, get_num_args, get_parameter_type, get_return_type, get_type};
