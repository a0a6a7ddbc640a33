//! Name bindings
//!
//! A [`Scope`] maps names to [`Binding`]s. Names are defined once; a second
//! definition of the same name is an error, as is a lookup of a name that was
//! never defined.

use rustc_hash::FxHashMap;
use tracing::trace;

use poly_types::{NamedParameter, Payload, Type};

use crate::binding::Binding;
use crate::error::{BindError, BindResult};

/// A flat name → binding table
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Bindings by name
    bindings: FxHashMap<String, Binding>,
}

impl Scope {
    /// Create an empty scope
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
        }
    }

    /// Create a scope pre-populated with `globals`
    ///
    /// Later entries replace earlier ones with the same name.
    pub fn with_globals<I, S>(globals: I) -> Self
    where
        I: IntoIterator<Item = (S, Binding)>,
        S: Into<String>,
    {
        Scope {
            bindings: globals
                .into_iter()
                .map(|(name, binding)| (name.into(), binding))
                .collect(),
        }
    }

    /// Create a scope holding the host globals
    ///
    /// `console: {log: (message: Text | Number) -> Void}`
    pub fn prelude() -> Self {
        Scope::with_globals([("console", console())])
    }

    /// Define `name`, failing if it is already bound
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) -> BindResult<()> {
        let name = name.into();
        if self.bindings.contains_key(&name) {
            return Err(BindError::AlreadyDefined { name });
        }
        trace!(name = %name, ty = %binding.ty, "define");
        self.bindings.insert(name, binding);
        Ok(())
    }

    /// Look up `name`
    pub fn lookup(&self, name: &str) -> BindResult<&Binding> {
        self.bindings.get(name).ok_or_else(|| BindError::NeverDefined {
            name: name.to_string(),
        })
    }

    /// Whether `name` is bound
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no name is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

fn console() -> Binding {
    let log = Type::function(
        vec![NamedParameter::new(
            "message",
            Type::union([Type::Text, Type::Number]),
        )],
        Type::Void,
    );
    let payload = Payload::Dictionary(
        [("log".to_string(), Payload::Native("console.log".to_string()))]
            .into_iter()
            .collect(),
    );
    Binding::new(payload, Type::dictionary([("log", log)]))
}
