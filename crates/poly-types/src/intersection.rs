//! Intersection of types
//!
//! `intersect_type(a, b)` is the greatest type whose values satisfy both `a`
//! and `b`, or `None` when no value can. Unions distribute: both sides are
//! flattened, every pair of branches is intersected, and the survivors are
//! collapsed back into one type.

use std::collections::BTreeMap;
use std::slice;

use crate::algebra::TypeAlgebra;
use crate::normalize::{collapse_types, expand_types, expand_union};
use crate::ty::{DictionaryType, FunctionType, NamedParameter, Type};

impl TypeAlgebra {
    /// Intersect two types; `None` means they are disjoint
    pub fn intersect_type(&mut self, a: &Type, b: &Type) -> Option<Type> {
        if self.memoize() {
            if let Some(hit) = self.cache.intersection(a, b) {
                tracing::trace!(%a, %b, "intersection cache hit");
                return hit;
            }
        }

        if !self.enter() {
            return None;
        }
        let cutoffs = self.cutoffs();
        let result = match (a, b) {
            (Type::Union(_), _) | (_, Type::Union(_)) => {
                self.intersect_types(slice::from_ref(a), slice::from_ref(b))
            }
            _ => self.intersect_resolved(a, b),
        };
        self.leave();

        if self.memoize() && self.cutoffs() == cutoffs {
            self.cache.record_intersection(a, b, result.clone());
        }
        result
    }

    /// Intersect two lists of alternatives
    ///
    /// Every union in either list is expanded, each pair of branches from the
    /// cross product is intersected, disjoint pairs are dropped and the rest
    /// collapse into one type.
    pub fn intersect_types(&mut self, types1: &[Type], types2: &[Type]) -> Option<Type> {
        let expanded1 = expand_types(types1);
        let expanded2 = expand_types(types2);
        tracing::trace!(
            left = expanded1.len(),
            right = expanded2.len(),
            "intersecting branch cross product"
        );

        let mut survivors = Vec::new();
        for t1 in &expanded1 {
            for t2 in &expanded2 {
                if let Some(ty) = self.intersect_type(t1, t2) {
                    survivors.push(ty);
                }
            }
        }
        collapse_types(survivors)
    }

    /// Reduce a union to the single shape shared by all of its alternatives
    ///
    /// A non-union is returned unchanged. A union is flattened and
    /// [`intersect_type`] is folded across its branches, so `A | B` reduces
    /// to `intersect_type(A, B)` however the union is nested. A union with no
    /// branches has no shape.
    ///
    /// [`intersect_type`]: Self::intersect_type
    pub fn reduce_type(&mut self, ty: &Type) -> Option<Type> {
        if !ty.is_union() {
            return Some(ty.clone());
        }

        let mut branches = expand_union(ty).into_iter();
        let mut acc = branches.next()?.clone();
        for branch in branches {
            acc = self.intersect_type(&acc, branch)?;
        }
        Some(acc)
    }

    /// Check if some value satisfies both `ty` and `desired`
    pub fn type_matches(&mut self, ty: &Type, desired: &Type) -> bool {
        self.intersect_type(ty, desired).is_some()
    }

    /// Intersect two non-union types
    fn intersect_resolved(&mut self, a: &Type, b: &Type) -> Option<Type> {
        match (a, b) {
            (Type::Literal(l1), Type::Literal(l2)) => {
                if self.value_equal(&l1.value, &l2.value) {
                    Some(a.clone())
                } else {
                    None
                }
            }
            // A literal survives against any type containing it
            (Type::Literal(_), _) => self.is_subset(a, b).then(|| a.clone()),
            (_, Type::Literal(_)) => self.is_subset(b, a).then(|| b.clone()),

            _ if a.kind() != b.kind() => None,

            (Type::Number, _) | (Type::Text, _) | (Type::Logic, _) | (Type::Void, _) => {
                Some(a.clone())
            }

            // Nominal: no structural merge
            (Type::Named(_), _) => self.resolved_type_equal(a, b).then(|| a.clone()),

            (Type::Dictionary(d1), Type::Dictionary(d2)) => self.intersect_dictionaries(d1, d2),

            (Type::Function(f1), Type::Function(f2)) => self.intersect_functions(f1, f2),

            (Type::List(l1), Type::List(l2)) => {
                let element = self.intersect_type(&l1.element, &l2.element)?;
                Some(Type::list(element))
            }

            (Type::Tuple(t1), Type::Tuple(t2)) => {
                if t1.elements.len() != t2.elements.len() {
                    return None;
                }
                let elements = t1
                    .elements
                    .iter()
                    .zip(&t2.elements)
                    .map(|(e1, e2)| self.intersect_type(e1, e2))
                    .collect::<Option<Vec<_>>>()?;
                Some(Type::tuple(elements))
            }

            // Kinds match, so every other pairing is unreachable
            _ => None,
        }
    }

    /// Keep the keys present in both dictionaries whose field types intersect
    fn intersect_dictionaries(&mut self, d1: &DictionaryType, d2: &DictionaryType) -> Option<Type> {
        let mut entries = BTreeMap::new();
        for (key, t2) in &d2.entries {
            let Some(t1) = d1.get(key) else {
                continue;
            };
            if let Some(mutual) = self.intersect_type(t1, t2) {
                entries.insert(key.clone(), mutual);
            }
        }

        if entries.is_empty() {
            return None;
        }
        Some(Type::Dictionary(DictionaryType { entries }))
    }

    /// Intersect parameters pairwise and return types; names and defaults come from `f1`
    fn intersect_functions(&mut self, f1: &FunctionType, f2: &FunctionType) -> Option<Type> {
        if f1.parameters.len() != f2.parameters.len() {
            return None;
        }

        let mut parameters = Vec::with_capacity(f1.parameters.len());
        for (p1, p2) in f1.parameters.iter().zip(&f2.parameters) {
            let ty = self.intersect_type(&p1.ty, &p2.ty)?;
            parameters.push(NamedParameter {
                name: p1.name.clone(),
                ty,
                default_value: p1.default_value.clone(),
            });
        }

        let return_type = self.intersect_type(&f1.return_type, &f2.return_type)?;
        Some(Type::function(parameters, return_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn named(name: &str) -> Type {
        Type::named(name, vec![])
    }

    fn lit(n: f64) -> Type {
        Value::number(n).into_literal()
    }

    fn func(params: &[(&str, Type)], ret: Type) -> Type {
        Type::function(
            params
                .iter()
                .map(|(name, ty)| NamedParameter::new(*name, ty.clone()))
                .collect(),
            ret,
        )
    }

    #[test]
    fn test_primitive_intersections() {
        let mut algebra = TypeAlgebra::new();
        assert_eq!(algebra.intersect_type(&Type::Number, &Type::Text), None);
        for ty in [Type::Number, Type::Text, Type::Logic, Type::Void] {
            assert_eq!(algebra.intersect_type(&ty, &ty), Some(ty.clone()));
        }
    }

    #[test]
    fn test_dictionary_keeps_common_keys() {
        let mut algebra = TypeAlgebra::new();
        let d1 = Type::dictionary([("a", Type::Number), ("b", Type::Text)]);
        let d2 = Type::dictionary([("a", Type::Number), ("c", Type::Logic)]);
        assert_eq!(
            algebra.intersect_type(&d1, &d2),
            Some(Type::dictionary([("a", Type::Number)]))
        );
    }

    #[test]
    fn test_dictionary_drops_disjoint_keys() {
        let mut algebra = TypeAlgebra::new();
        let d1 = Type::dictionary([("a", Type::Number), ("b", Type::Text)]);
        let d2 = Type::dictionary([("a", Type::Text), ("b", Type::Text)]);
        assert_eq!(
            algebra.intersect_type(&d1, &d2),
            Some(Type::dictionary([("b", Type::Text)]))
        );

        let d3 = Type::dictionary([("z", Type::Text)]);
        assert_eq!(algebra.intersect_type(&d1, &d3), None);
    }

    #[test]
    fn test_function_intersection() {
        let mut algebra = TypeAlgebra::new();
        let num_or_text = Type::union([Type::Number, Type::Text]);
        let f1 = func(&[("x", num_or_text.clone())], num_or_text);
        let f2 = func(&[("y", Type::Number)], Type::Text);

        assert_eq!(
            algebra.intersect_type(&f1, &f2),
            Some(func(&[("x", Type::Number)], Type::Text))
        );

        // Arity mismatch
        let f3 = func(&[("x", Type::Number), ("y", Type::Number)], Type::Text);
        assert_eq!(algebra.intersect_type(&f2, &f3), None);

        // A disjoint parameter poisons the whole function
        let f4 = func(&[("y", Type::Logic)], Type::Text);
        assert_eq!(algebra.intersect_type(&f2, &f4), None);

        // So does a disjoint return type
        let f5 = func(&[("y", Type::Number)], Type::Void);
        assert_eq!(algebra.intersect_type(&f2, &f5), None);
    }

    #[test]
    fn test_literal_intersections() {
        let mut algebra = TypeAlgebra::new();
        assert_eq!(algebra.intersect_type(&lit(2.0), &Type::Number), Some(lit(2.0)));
        assert_eq!(algebra.intersect_type(&Type::Number, &lit(2.0)), Some(lit(2.0)));
        assert_eq!(algebra.intersect_type(&lit(2.0), &lit(2.0)), Some(lit(2.0)));
        assert_eq!(algebra.intersect_type(&lit(2.0), &lit(3.0)), None);
        assert_eq!(algebra.intersect_type(&lit(2.0), &Type::Text), None);
    }

    #[test]
    fn test_named_intersection_is_nominal() {
        let mut algebra = TypeAlgebra::new();
        assert_eq!(algebra.intersect_type(&named("A"), &named("A")), Some(named("A")));
        assert_eq!(algebra.intersect_type(&named("A"), &named("B")), None);
    }

    #[test]
    fn test_list_and_tuple_intersections() {
        let mut algebra = TypeAlgebra::new();
        let num_or_text = Type::union([Type::Number, Type::Text]);
        assert_eq!(
            algebra.intersect_type(&Type::list(num_or_text.clone()), &Type::list(Type::Text)),
            Some(Type::list(Type::Text))
        );
        assert_eq!(
            algebra.intersect_type(&Type::list(Type::Logic), &Type::list(Type::Text)),
            None
        );
        assert_eq!(
            algebra.intersect_type(
                &Type::tuple([num_or_text, Type::Logic]),
                &Type::tuple([Type::Number, Type::Logic])
            ),
            Some(Type::tuple([Type::Number, Type::Logic]))
        );
        assert_eq!(
            algebra.intersect_type(&Type::tuple([Type::Logic]), &Type::tuple([])),
            None
        );
    }

    #[test]
    fn test_union_intersection_distributes() {
        let mut algebra = TypeAlgebra::new();
        let abc = Type::union([named("A"), named("B"), named("C")]);
        let bcd = Type::union([named("B"), Type::union([named("C"), named("D")])]);

        let result = algebra.intersect_type(&abc, &bcd).unwrap();
        assert_eq!(result, Type::union([named("B"), named("C")]));
        assert!(algebra.type_equal(&result, &Type::union([named("C"), named("B")])));
    }

    #[test]
    fn test_intersect_types_collapses_right() {
        let mut algebra = TypeAlgebra::new();
        let result = algebra.intersect_types(
            &[Type::Number, Type::Text, Type::Logic],
            &[Type::union([Type::Logic, Type::Text, Type::Number])],
        );
        assert_eq!(
            result,
            Some(Type::union([
                Type::Number,
                Type::union([Type::Text, Type::Logic])
            ]))
        );
        assert_eq!(algebra.intersect_types(&[Type::Number], &[Type::Text]), None);
        assert_eq!(algebra.intersect_types(&[], &[Type::Text]), None);
    }

    #[test]
    fn test_reduce_type() {
        let mut algebra = TypeAlgebra::new();
        assert_eq!(algebra.reduce_type(&Type::Number), Some(Type::Number));
        assert_eq!(algebra.reduce_type(&Type::union([Type::Number, Type::Text])), None);
        assert_eq!(
            algebra.reduce_type(&Type::union([Type::Number, lit(2.0)])),
            Some(lit(2.0))
        );

        let d1 = Type::dictionary([("x", Type::Number), ("y", Type::Number)]);
        let d2 = Type::dictionary([("x", Type::Number), ("z", Type::Text)]);
        let d3 = Type::dictionary([("x", Type::Number)]);
        assert_eq!(
            algebra.reduce_type(&Type::union([d1, d2, d3])),
            Some(Type::dictionary([("x", Type::Number)]))
        );

        assert_eq!(algebra.reduce_type(&Type::union([])), None);
        assert_eq!(algebra.reduce_type(&Type::union([Type::Logic])), Some(Type::Logic));
    }

    #[test]
    fn test_reduce_type_flattens_nested_unions() {
        let mut algebra = TypeAlgebra::new();
        let wrapped = Type::union([Type::union([Type::Number, Type::Text])]);
        assert_eq!(algebra.reduce_type(&wrapped), None);

        let same = Type::union([Type::union([Type::Number, Type::Number])]);
        assert_eq!(algebra.reduce_type(&same), Some(Type::Number));

        let nested_empty = Type::union([Type::union([])]);
        assert_eq!(algebra.reduce_type(&nested_empty), None);
    }

    #[test]
    fn test_type_matches() {
        let mut algebra = TypeAlgebra::new();
        let num_or_text = Type::union([Type::Number, Type::Text]);
        assert!(algebra.type_matches(&lit(2.0), &num_or_text));
        assert!(algebra.type_matches(&num_or_text, &Type::Text));
        assert!(!algebra.type_matches(&Type::Logic, &num_or_text));
    }

    #[test]
    fn test_empty_union_intersects_nothing() {
        let mut algebra = TypeAlgebra::new();
        assert_eq!(algebra.intersect_type(&Type::union([]), &Type::Number), None);
    }
}
