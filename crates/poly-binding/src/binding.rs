//! Bindings: payloads paired with their static types

use std::fmt;

use poly_types::{Payload, Type, Value};

/// The static view of an evaluated expression
///
/// Unlike a [`Value`], a binding's type may be a literal or a union: a member
/// read through a union-typed object is itself union-typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    /// Runtime data
    pub payload: Payload,
    /// Static type of the data
    pub ty: Type,
}

impl Binding {
    /// Create a binding from a payload and a type
    pub fn new(payload: Payload, ty: Type) -> Self {
        Binding { payload, ty }
    }

    /// A number literal, typed as the literal itself
    pub fn number(n: f64) -> Self {
        Value::number(n).into()
    }

    /// A text literal, typed as the literal itself
    pub fn text(s: impl Into<String>) -> Self {
        Value::text(s).into()
    }

    /// A logic literal, typed as the literal itself
    pub fn logic(b: bool) -> Self {
        Value::logic(b).into()
    }

    /// The void binding
    pub fn void() -> Self {
        Binding::new(Payload::Void, Type::Void)
    }

    /// Rebind the same payload under a wider type
    pub fn widen(self, ty: Type) -> Self {
        Binding { ty, ..self }
    }
}

impl From<Value> for Binding {
    fn from(value: Value) -> Self {
        Binding {
            payload: value.payload.clone(),
            ty: value.into_literal(),
        }
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.payload, self.ty)
    }
}
