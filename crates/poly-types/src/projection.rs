//! Structural projection through types
//!
//! Projections pull substructure (a member, a return type, a parameter, an
//! arity) out of a type. Through a union every branch must succeed: one
//! failing branch poisons the whole projection.

use crate::ty::{Type, UnionType};

/// Apply `op` to `ty`, distributing through unions
///
/// On a union, `op` is applied to every branch (recursively) and the results
/// are rewrapped as a union with the same shape. Any branch yielding `None`
/// makes the result `None`, as does a union with no branches.
pub fn get_type<F>(ty: &Type, op: &mut F) -> Option<Type>
where
    F: FnMut(&Type) -> Option<Type>,
{
    match ty {
        Type::Union(union) => {
            if union.branches.is_empty() {
                return None;
            }
            let branches = union
                .branches
                .iter()
                .map(|branch| get_type(branch, op))
                .collect::<Option<Vec<_>>>()?;
            Some(Type::Union(UnionType { branches }))
        }
        other => op(other),
    }
}

/// Type of the member `key` of a dictionary type
pub fn get_member(ty: &Type, key: &str) -> Option<Type> {
    get_type(ty, &mut |ty| match ty {
        Type::Dictionary(dict) => dict.get(key).cloned(),
        _ => None,
    })
}

/// Return type of a function type
pub fn get_return_type(ty: &Type) -> Option<Type> {
    get_type(ty, &mut |ty| match ty {
        Type::Function(func) => Some((*func.return_type).clone()),
        _ => None,
    })
}

/// Type of the parameter at `index` of a function type
pub fn get_parameter_type(ty: &Type, index: usize) -> Option<Type> {
    get_type(ty, &mut |ty| match ty {
        Type::Function(func) => func.parameters.get(index).map(|param| param.ty.clone()),
        _ => None,
    })
}

/// Number of parameters of a function type
///
/// Through a union every branch must be a function of the same arity.
pub fn get_num_args(ty: &Type) -> Option<usize> {
    match ty {
        Type::Function(func) => Some(func.parameters.len()),
        Type::Union(union) => {
            let mut branches = union.branches.iter();
            let first = get_num_args(branches.next()?)?;
            for branch in branches {
                if get_num_args(branch)? != first {
                    return None;
                }
            }
            Some(first)
        }
        _ => None,
    }
}
