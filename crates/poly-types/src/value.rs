//! Runtime values and their resolved classifiers
//!
//! A [`Value`] pairs a runtime [`Payload`] with a [`ResolvedType`]: a type that is
//! neither a literal nor a union. Literal-ness and union-ness are facts the
//! algebra adds on top of values, never facts a value stores about itself.

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::ty::Type;

/// Runtime data carried by a value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Payload {
    /// A number
    Number(f64),
    /// A text string
    Text(String),
    /// A boolean
    Logic(bool),
    /// No data
    Void,
    /// An ordered collection
    List(Vec<Payload>),
    /// A keyed record
    Dictionary(BTreeMap<String, Payload>),
    /// A host-provided object, identified by name
    Native(String),
}

impl Payload {
    /// Canonical bit pattern: `-0` folds into `0` and every NaN into one NaN
    fn number_key(n: f64) -> u64 {
        if n == 0.0 {
            0.0f64.to_bits()
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }

    /// Get the number if this is a number payload
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Payload::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text if this is a text payload
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Number(a), Payload::Number(b)) => {
                Payload::number_key(*a) == Payload::number_key(*b)
            }
            (Payload::Text(a), Payload::Text(b)) => a == b,
            (Payload::Logic(a), Payload::Logic(b)) => a == b,
            (Payload::Void, Payload::Void) => true,
            (Payload::List(a), Payload::List(b)) => a == b,
            (Payload::Dictionary(a), Payload::Dictionary(b)) => a == b,
            (Payload::Native(a), Payload::Native(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Payload {}

impl Hash for Payload {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Payload::Number(n) => Payload::number_key(*n).hash(state),
            Payload::Text(s) => s.hash(state),
            Payload::Logic(b) => b.hash(state),
            Payload::Void => {}
            Payload::List(items) => items.hash(state),
            Payload::Dictionary(entries) => entries.hash(state),
            Payload::Native(name) => name.hash(state),
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Number(n) => write!(f, "{}", n),
            Payload::Text(s) => write!(f, "{:?}", s),
            Payload::Logic(b) => write!(f, "{}", b),
            Payload::Void => write!(f, "void"),
            Payload::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Payload::Dictionary(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Payload::Native(name) => write!(f, "<{}>", name),
        }
    }
}

/// A type that can classify a runtime value: any [`Type`] except a literal or a union
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Type", into = "Type")]
pub struct ResolvedType(Box<Type>);

impl ResolvedType {
    /// Wrap `ty`, rejecting literal and union types
    pub fn new(ty: Type) -> Result<Self, TypeError> {
        if ty.is_resolved() {
            Ok(ResolvedType(Box::new(ty)))
        } else {
            Err(TypeError::Unresolved { kind: ty.kind() })
        }
    }

    /// Borrow the underlying type
    pub fn as_type(&self) -> &Type {
        &self.0
    }

    /// Unwrap into the underlying type
    pub fn into_type(self) -> Type {
        *self.0
    }
}

impl TryFrom<Type> for ResolvedType {
    type Error = TypeError;

    fn try_from(ty: Type) -> Result<Self, Self::Error> {
        ResolvedType::new(ty)
    }
}

impl From<ResolvedType> for Type {
    fn from(resolved: ResolvedType) -> Self {
        *resolved.0
    }
}

impl Deref for ResolvedType {
    type Target = Type;

    fn deref(&self) -> &Type {
        &self.0
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A runtime payload together with its resolved classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Value {
    /// Runtime data
    pub payload: Payload,
    /// Classifier of the payload
    pub ty: ResolvedType,
}

impl Value {
    /// Pair a payload with its classifier
    pub fn new(payload: Payload, ty: ResolvedType) -> Self {
        Value { payload, ty }
    }

    /// A `Number` value
    pub fn number(n: f64) -> Self {
        Value::new(Payload::Number(n), ResolvedType(Box::new(Type::Number)))
    }

    /// A `Text` value
    pub fn text(s: impl Into<String>) -> Self {
        Value::new(Payload::Text(s.into()), ResolvedType(Box::new(Type::Text)))
    }

    /// A `Logic` value
    pub fn logic(b: bool) -> Self {
        Value::new(Payload::Logic(b), ResolvedType(Box::new(Type::Logic)))
    }

    /// The `Void` value
    pub fn void() -> Self {
        Value::new(Payload::Void, ResolvedType(Box::new(Type::Void)))
    }

    /// The singleton type inhabited by this value
    pub fn into_literal(self) -> Type {
        Type::literal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ty::TypeKind;

    #[test]
    fn test_resolved_type_rejects_literal_and_union() {
        assert!(ResolvedType::new(Type::Number).is_ok());
        assert!(ResolvedType::new(Type::dictionary([("a", Type::Text)])).is_ok());

        let err = ResolvedType::new(Value::number(2.0).into_literal()).unwrap_err();
        assert_eq!(err, TypeError::Unresolved { kind: TypeKind::Literal });

        let err = ResolvedType::try_from(Type::union([Type::Number, Type::Text])).unwrap_err();
        assert_eq!(err, TypeError::Unresolved { kind: TypeKind::Union });
    }

    #[test]
    fn test_number_payload_equality() {
        assert_eq!(Payload::Number(2.0), Payload::Number(2.0));
        assert_ne!(Payload::Number(2.0), Payload::Number(3.0));
        assert_eq!(Payload::Number(0.0), Payload::Number(-0.0));
        assert_eq!(Payload::Number(f64::NAN), Payload::Number(f64::NAN));
        assert_ne!(Payload::Number(2.0), Payload::Text("2".to_string()));
    }

    #[test]
    fn test_payload_hash_matches_equality() {
        use rustc_hash::FxHashSet;

        let mut set = FxHashSet::default();
        set.insert(Payload::Number(0.0));
        assert!(set.contains(&Payload::Number(-0.0)));
        assert!(!set.contains(&Payload::Number(1.0)));
    }

    #[test]
    fn test_payload_display() {
        assert_eq!(Payload::Number(2.0).to_string(), "2");
        assert_eq!(Payload::Number(2.5).to_string(), "2.5");
        assert_eq!(Payload::Text("dog".into()).to_string(), "\"dog\"");
        assert_eq!(Payload::Native("console".into()).to_string(), "<console>");
    }

    #[test]
    fn test_value_shortcuts() {
        assert_eq!(*Value::number(1.0).ty, Type::Number);
        assert_eq!(*Value::text("a").ty, Type::Text);
        assert_eq!(*Value::logic(false).ty, Type::Logic);
        assert_eq!(Value::void().ty.as_type(), &Type::Void);
    }
}
