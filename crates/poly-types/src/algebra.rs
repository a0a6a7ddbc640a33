//! Query context for the type algebra
//!
//! [`TypeAlgebra`] carries the configuration, the memo tables and the recursion
//! guard shared by the subset and intersection engines. The free functions at
//! the bottom run one query on a fresh default context.

use crate::cache::{CacheStats, TypeCache};
use crate::config::AlgebraConfig;
use crate::ty::Type;

/// Context for subset, equality and intersection queries
#[derive(Debug, Clone)]
pub struct TypeAlgebra {
    /// Settings this context was built with
    config: AlgebraConfig,

    /// Memoized query results
    pub(crate) cache: TypeCache,

    /// Current recursion depth
    depth: usize,

    /// Number of times the depth limit cut a query short
    cutoffs: u64,
}

impl Default for TypeAlgebra {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeAlgebra {
    /// Create a context with the default configuration
    pub fn new() -> Self {
        Self::with_config(AlgebraConfig::default())
    }

    /// Create a context with the given configuration
    pub fn with_config(config: AlgebraConfig) -> Self {
        TypeAlgebra {
            cache: TypeCache::new(config.cache_capacity),
            config,
            depth: 0,
            cutoffs: 0,
        }
    }

    /// Settings of this context
    pub fn config(&self) -> &AlgebraConfig {
        &self.config
    }

    /// Memo table counters
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Number of queries answered early because the depth limit was reached
    pub fn cutoffs(&self) -> u64 {
        self.cutoffs
    }

    /// Forget every memoized result
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub(crate) fn memoize(&self) -> bool {
        self.config.memoize
    }

    /// Enter one level of recursion; `false` when the depth limit is reached
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.config.max_depth {
            self.cutoffs += 1;
            tracing::warn!(max_depth = self.config.max_depth, "type recursion limit reached");
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Check if every value of `sub` is a value of `sup`
pub fn is_subset(sub: &Type, sup: &Type) -> bool {
    TypeAlgebra::new().is_subset(sub, sup)
}

/// Check if two types describe the same values
pub fn type_equal(a: &Type, b: &Type) -> bool {
    TypeAlgebra::new().type_equal(a, b)
}

/// Greatest type whose values satisfy both `a` and `b`
pub fn intersect_type(a: &Type, b: &Type) -> Option<Type> {
    TypeAlgebra::new().intersect_type(a, b)
}

/// Intersection of two lists of alternatives
pub fn intersect_types(types1: &[Type], types2: &[Type]) -> Option<Type> {
    TypeAlgebra::new().intersect_types(types1, types2)
}

/// Common shape of every alternative of a union
pub fn reduce_type(ty: &Type) -> Option<Type> {
    TypeAlgebra::new().reduce_type(ty)
}

/// Check if some value satisfies both `ty` and `desired`
pub fn type_matches(ty: &Type, desired: &Type) -> bool {
    TypeAlgebra::new().type_matches(ty, desired)
}
