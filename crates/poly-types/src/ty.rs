//! Core type definitions for the Poly type algebra
//!
//! Types are immutable owned trees. Equality and hashing are structural, so two
//! independently built `Named("A")` types compare equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Variant tag of a [`Type`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    /// `Number`
    Number,
    /// `Text`
    Text,
    /// `Logic`
    Logic,
    /// `Void`
    Void,
    /// Singleton literal type
    Literal,
    /// Nominal named type
    Named,
    /// Function type
    Function,
    /// Union type
    Union,
    /// List type
    List,
    /// Tuple type
    Tuple,
    /// Dictionary (record) type
    Dictionary,
}

impl TypeKind {
    /// Get the name of this kind
    pub fn name(&self) -> &'static str {
        match self {
            TypeKind::Number => "Number",
            TypeKind::Text => "Text",
            TypeKind::Logic => "Logic",
            TypeKind::Void => "Void",
            TypeKind::Literal => "Literal",
            TypeKind::Named => "NamedType",
            TypeKind::Function => "FunctionType",
            TypeKind::Union => "UnionType",
            TypeKind::List => "ListType",
            TypeKind::Tuple => "TupleType",
            TypeKind::Dictionary => "DictionaryType",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named parameter, shared by named-type parameter lists and function parameter lists
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedParameter {
    /// Parameter name
    pub name: String,
    /// Parameter type
    pub ty: Type,
    /// Default value, if the parameter may be omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl NamedParameter {
    /// Create a parameter without a default value
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        NamedParameter {
            name: name.into(),
            ty,
            default_value: None,
        }
    }

    /// Attach a default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Singleton type inhabited by exactly one value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiteralType {
    /// The only inhabitant; its classifier is the literal's carrier type
    pub value: Value,
}

/// Nominal type identified by name plus ordered named parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    /// Type name
    pub name: String,
    /// Ordered type parameters
    pub parameters: Vec<NamedParameter>,
}

/// Function type: (p1: T1, ..., pn: Tn) -> R
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    /// Parameters, in call order
    pub parameters: Vec<NamedParameter>,
    /// Return type
    pub return_type: Box<Type>,
}

/// Union type: T1 | T2 | ... | Tn
///
/// Branches are stored verbatim: nested unions and duplicates are kept and
/// only flattened on demand by the engines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionType {
    /// Alternatives of the union
    pub branches: Vec<Type>,
}

/// List type: [T]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListType {
    /// Element type
    pub element: Box<Type>,
}

/// Tuple type: (T1, T2, ..., Tn)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleType {
    /// Element types, by position
    pub elements: Vec<Type>,
}

/// Structural record type: { key1: T1, key2: T2, ... }
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DictionaryType {
    /// Entries by key; keys are unique
    pub entries: BTreeMap<String, Type>,
}

impl DictionaryType {
    /// Look up the type of an entry
    pub fn get(&self, key: &str) -> Option<&Type> {
        self.entries.get(key)
    }
}

/// The core type representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// Numbers
    Number,

    /// Text strings
    Text,

    /// Booleans
    Logic,

    /// The absence of a value
    Void,

    /// Singleton type: exactly one value
    Literal(LiteralType),

    /// Nominal type: Name<p1: T1, ...>
    Named(NamedType),

    /// Function type: (params) -> return
    Function(FunctionType),

    /// Union type: T1 | T2 | ... | Tn
    Union(UnionType),

    /// List type: [T]
    List(ListType),

    /// Tuple type: (T1, ..., Tn)
    Tuple(TupleType),

    /// Dictionary type: { key: T }
    Dictionary(DictionaryType),
}

impl Type {
    /// Singleton type of `value`
    pub fn literal(value: Value) -> Self {
        Type::Literal(LiteralType { value })
    }

    /// Named type with the given parameters
    pub fn named(name: impl Into<String>, parameters: Vec<NamedParameter>) -> Self {
        Type::Named(NamedType {
            name: name.into(),
            parameters,
        })
    }

    /// Function type
    pub fn function(parameters: Vec<NamedParameter>, return_type: Type) -> Self {
        Type::Function(FunctionType {
            parameters,
            return_type: Box::new(return_type),
        })
    }

    /// Union of the given branches, stored as-is
    pub fn union(branches: impl IntoIterator<Item = Type>) -> Self {
        Type::Union(UnionType {
            branches: branches.into_iter().collect(),
        })
    }

    /// List type
    pub fn list(element: Type) -> Self {
        Type::List(ListType {
            element: Box::new(element),
        })
    }

    /// Tuple type
    pub fn tuple(elements: impl IntoIterator<Item = Type>) -> Self {
        Type::Tuple(TupleType {
            elements: elements.into_iter().collect(),
        })
    }

    /// Dictionary type; a repeated key keeps its last entry
    pub fn dictionary<K: Into<String>>(entries: impl IntoIterator<Item = (K, Type)>) -> Self {
        Type::Dictionary(DictionaryType {
            entries: entries.into_iter().map(|(k, ty)| (k.into(), ty)).collect(),
        })
    }

    /// Get the variant tag
    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Number => TypeKind::Number,
            Type::Text => TypeKind::Text,
            Type::Logic => TypeKind::Logic,
            Type::Void => TypeKind::Void,
            Type::Literal(_) => TypeKind::Literal,
            Type::Named(_) => TypeKind::Named,
            Type::Function(_) => TypeKind::Function,
            Type::Union(_) => TypeKind::Union,
            Type::List(_) => TypeKind::List,
            Type::Tuple(_) => TypeKind::Tuple,
            Type::Dictionary(_) => TypeKind::Dictionary,
        }
    }

    /// Check if this type is one of the nullary primitives
    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Number | Type::Text | Type::Logic | Type::Void)
    }

    /// Check if this type can classify a runtime value (not a literal or union)
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Type::Literal(_) | Type::Union(_))
    }

    /// Check if this type is a union type
    pub fn is_union(&self) -> bool {
        matches!(self, Type::Union(_))
    }

    /// Get the union type if this is a union
    pub fn as_union(&self) -> Option<&UnionType> {
        match self {
            Type::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Get the function type if this is a function
    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get the dictionary type if this is a dictionary
    pub fn as_dictionary(&self) -> Option<&DictionaryType> {
        match self {
            Type::Dictionary(d) => Some(d),
            _ => None,
        }
    }
}

fn write_parameters(f: &mut fmt::Formatter<'_>, parameters: &[NamedParameter]) -> fmt::Result {
    for (i, param) in parameters.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", param.name, param.ty)?;
        if let Some(default) = &param.default_value {
            write!(f, " = {}", default.payload)?;
        }
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => write!(f, "Number"),
            Type::Text => write!(f, "Text"),
            Type::Logic => write!(f, "Logic"),
            Type::Void => write!(f, "Void"),
            Type::Literal(lit) => write!(f, "{}", lit.value.payload),
            Type::Named(named) => {
                write!(f, "{}", named.name)?;
                if !named.parameters.is_empty() {
                    write!(f, "<")?;
                    write_parameters(f, &named.parameters)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Function(func) => {
                write!(f, "(")?;
                write_parameters(f, &func.parameters)?;
                write!(f, ") -> {}", func.return_type)
            }
            Type::Union(u) => {
                if u.branches.is_empty() {
                    return write!(f, "never");
                }
                for (i, branch) in u.branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    // Parenthesize nested unions and functions so grouping survives
                    match branch {
                        Type::Union(_) | Type::Function(_) => write!(f, "({})", branch)?,
                        _ => write!(f, "{}", branch)?,
                    }
                }
                Ok(())
            }
            Type::List(list) => write!(f, "[{}]", list.element),
            Type::Tuple(t) => {
                write!(f, "(")?;
                for (i, elem) in t.elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", elem)?;
                }
                if t.elements.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Type::Dictionary(d) => {
                write!(f, "{{")?;
                for (i, (key, ty)) in d.entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, ty)?;
                }
                write!(f, "}}")
            }
        }
    }
}
