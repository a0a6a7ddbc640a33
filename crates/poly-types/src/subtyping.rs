//! Subset rules for the Poly type algebra
//!
//! Implements the relation `sub ⊆ sup`: every value described by `sub` is also
//! described by `sup`. Ground types have no nominal subclassing; flexibility
//! comes only from union membership and literal narrowing.

use crate::algebra::TypeAlgebra;
use crate::normalize::expand_union;
use crate::ty::{NamedParameter, Type};
use crate::value::Value;

impl TypeAlgebra {
    /// Check if `sub` is a subset of `sup` (sub ⊆ sup)
    ///
    /// Rules, in priority order:
    /// 0. a union with no branches (after flattening) is a subset of anything;
    /// 1. a literal is a subset of an equal literal, or of anything its carrier
    ///    type is a subset of;
    /// 2. nothing but a literal is a subset of a literal;
    /// 3. with a union on either side, every branch of `sub` must be a subset
    ///    of some branch of `sup` (nested unions are flattened);
    /// 4. otherwise the two resolved types must be equal.
    pub fn is_subset(&mut self, sub: &Type, sup: &Type) -> bool {
        // Reflexivity: T ⊆ T
        if sub == sup {
            return true;
        }

        if self.memoize() {
            if let Some(hit) = self.cache.subset(sub, sup) {
                tracing::trace!(%sub, %sup, hit, "subset cache hit");
                return hit;
            }
        }

        if !self.enter() {
            return false;
        }
        let cutoffs = self.cutoffs();
        let result = self.subset_rules(sub, sup);
        self.leave();

        // A result computed under a cutoff is not a real answer
        if self.memoize() && self.cutoffs() == cutoffs {
            self.cache.record_subset(sub, sup, result);
        }
        result
    }

    fn subset_rules(&mut self, sub: &Type, sup: &Type) -> bool {
        match (sub, sup) {
            // The empty type
            (Type::Union(_), _) if expand_union(sub).is_empty() => true,

            (Type::Literal(l1), Type::Literal(l2)) => self.value_equal(&l1.value, &l2.value),

            // A literal is narrower than its carrier type
            (Type::Literal(l1), _) => self.is_subset(l1.value.ty.as_type(), sup),

            // No non-literal type denotes exactly one value
            (_, Type::Literal(_)) => false,

            (Type::Union(_), _) | (_, Type::Union(_)) => {
                let subs = expand_union(sub);
                let sups = expand_union(sup);
                subs.iter()
                    .all(|s| sups.iter().any(|p| self.is_subset(s, p)))
            }

            _ => self.resolved_type_equal(sub, sup),
        }
    }

    /// Check if two types describe the same values (mutual subsets)
    pub fn type_equal(&mut self, a: &Type, b: &Type) -> bool {
        self.is_subset(a, b) && self.is_subset(b, a)
    }

    /// Check if two values are the same value of the same type
    pub fn value_equal(&mut self, a: &Value, b: &Value) -> bool {
        self.resolved_type_equal(a.ty.as_type(), b.ty.as_type()) && a.payload == b.payload
    }

    /// Ground-level comparison of two resolved types
    ///
    /// Literal and union operands are handled by [`is_subset`](Self::is_subset)
    /// and compare unequal here. Element, return and field positions are
    /// checked directionally, so this is the ground step of the subset relation;
    /// use [`type_equal`](Self::type_equal) for symmetric equality.
    pub fn resolved_type_equal(&mut self, a: &Type, b: &Type) -> bool {
        match a {
            Type::Number => matches!(b, Type::Number),
            Type::Text => matches!(b, Type::Text),
            Type::Logic => matches!(b, Type::Logic),
            Type::Void => matches!(b, Type::Void),

            Type::Named(n1) => match b {
                Type::Named(n2) => {
                    n1.name == n2.name
                        && self.named_parameters_equal(&n1.parameters, &n2.parameters)
                }
                _ => false,
            },

            // Invariant parameters, covariant return
            Type::Function(f1) => match b {
                Type::Function(f2) => {
                    self.named_parameters_equal(&f1.parameters, &f2.parameters)
                        && self.is_subset(&f1.return_type, &f2.return_type)
                }
                _ => false,
            },

            Type::List(l1) => match b {
                Type::List(l2) => self.is_subset(&l1.element, &l2.element),
                _ => false,
            },

            Type::Tuple(t1) => match b {
                Type::Tuple(t2) => {
                    t1.elements.len() == t2.elements.len()
                        && t1
                            .elements
                            .iter()
                            .zip(&t2.elements)
                            .all(|(e1, e2)| self.is_subset(e1, e2))
                }
                _ => false,
            },

            // Row rule: every key required on the right exists on the left
            // with a field type that intersects the required one
            Type::Dictionary(d1) => match b {
                Type::Dictionary(d2) => d2.entries.iter().all(|(key, required)| {
                    d1.entries
                        .get(key)
                        .is_some_and(|field| self.intersect_type(field, required).is_some())
                }),
                _ => false,
            },

            Type::Literal(_) | Type::Union(_) => false,
        }
    }

    /// Check if two parameter lists match pairwise by name and equivalent type
    ///
    /// Default values do not take part: a default does not change the type a
    /// parameter accepts.
    pub fn named_parameters_equal(
        &mut self,
        params1: &[NamedParameter],
        params2: &[NamedParameter],
    ) -> bool {
        params1.len() == params2.len()
            && params1
                .iter()
                .zip(params2)
                .all(|(p1, p2)| p1.name == p2.name && self.type_equal(&p1.ty, &p2.ty))
    }
}
