//! Union flattening and collapsing
//!
//! Unions are stored verbatim; these helpers give the engines the flat,
//! union-free view of a type on demand.

use crate::ty::Type;

/// Expand a type into its non-union branches, recursing into nested unions
///
/// A non-union type expands to itself. A zero-branch union expands to nothing.
pub fn expand_union(ty: &Type) -> Vec<&Type> {
    let mut out = Vec::new();
    expand_into(ty, &mut out);
    out
}

fn expand_into<'a>(ty: &'a Type, out: &mut Vec<&'a Type>) {
    match ty {
        Type::Union(union) => {
            for branch in &union.branches {
                expand_into(branch, out);
            }
        }
        other => out.push(other),
    }
}

/// Expand every type in a list, concatenating their branches in order
pub fn expand_types(types: &[Type]) -> Vec<&Type> {
    let mut out = Vec::new();
    for ty in types {
        expand_into(ty, &mut out);
    }
    out
}

/// Collapse a list of types into one by a right fold into binary unions
///
/// `[a, b, c]` becomes `a | (b | c)`. An empty list has no type; a single type
/// is returned unwrapped, never as a one-branch union.
pub fn collapse_types(types: Vec<Type>) -> Option<Type> {
    let mut rev = types.into_iter().rev();
    let last = rev.next()?;
    Some(rev.fold(last, |rest, ty| Type::union([ty, rest])))
}
