//! Operation checking on bindings
//!
//! The [`Checker`] validates calls, member reads, binary operators and
//! template interpolation against the static types of their operands, using
//! the projection and intersection engines of `poly-types`.

use poly_types::{
    get_member, get_num_args, get_parameter_type, get_return_type, AlgebraConfig, Payload, Type,
    TypeAlgebra,
};
use tracing::debug;

use crate::binding::Binding;
use crate::error::{BindError, BindResult};
use crate::operator::{render_chunk, BinaryOp};

/// Static checker for operations on bindings
#[derive(Debug, Default)]
pub struct Checker {
    /// Shared algebra context; memo tables persist across checks
    algebra: TypeAlgebra,
}

impl Checker {
    /// Create a checker with the default algebra configuration
    pub fn new() -> Self {
        Self::with_algebra(TypeAlgebra::new())
    }

    /// Create a checker with the given algebra configuration
    pub fn with_config(config: AlgebraConfig) -> Self {
        Self::with_algebra(TypeAlgebra::with_config(config))
    }

    /// Create a checker around an existing algebra context
    pub fn with_algebra(algebra: TypeAlgebra) -> Self {
        Checker { algebra }
    }

    /// The underlying algebra context
    pub fn algebra(&mut self) -> &mut TypeAlgebra {
        &mut self.algebra
    }

    /// Check a call of `callee` with arguments of types `args`
    ///
    /// Returns the type of the call result.
    pub fn check_call(&mut self, callee: &Type, args: &[Type]) -> BindResult<Type> {
        let expected = get_num_args(callee).ok_or_else(|| {
            debug!(%callee, "callee is not callable");
            BindError::NotCallable { ty: callee.clone() }
        })?;
        if expected != args.len() {
            debug!(%callee, expected, actual = args.len(), "arity mismatch");
            return Err(BindError::ArityMismatch {
                expected,
                actual: args.len(),
            });
        }

        for (index, arg) in args.iter().enumerate() {
            let param = get_parameter_type(callee, index).ok_or_else(|| {
                BindError::UnresolvedParameter {
                    index,
                    callee: callee.clone(),
                }
            })?;
            if !self.algebra.type_matches(arg, &param) {
                debug!(index, %arg, %param, "argument does not match parameter");
                return Err(BindError::ArgumentMismatch {
                    index,
                    expected: param,
                    actual: arg.clone(),
                });
            }
        }

        get_return_type(callee).ok_or_else(|| BindError::UnresolvedReturn {
            callee: callee.clone(),
        })
    }

    /// Check a member read of `key` on an object of type `object`
    pub fn check_member(&mut self, object: &Type, key: &str) -> BindResult<Type> {
        get_member(object, key).ok_or_else(|| {
            debug!(%object, key, "member not found");
            BindError::NoMember {
                ty: object.clone(),
                key: key.to_string(),
            }
        })
    }

    /// Check `lhs op rhs` and return the result type
    pub fn check_binary(&mut self, op: BinaryOp, lhs: &Type, rhs: &Type) -> BindResult<Type> {
        let lhs = self.operand(lhs)?;
        let rhs = self.operand(rhs)?;
        op.result_type(&lhs, &rhs).ok_or_else(|| {
            debug!(%op, %lhs, %rhs, "no operator rule");
            BindError::InvalidOperands { op, lhs, rhs }
        })
    }

    /// Check that a value of type `ty` can be interpolated into a template
    pub fn check_template_chunk(&mut self, ty: &Type) -> BindResult<Type> {
        match self.algebra.reduce_type(ty).map(carrier) {
            Some(displayable @ (Type::Text | Type::Number)) => Ok(displayable),
            _ => {
                debug!(%ty, "operand is not displayable");
                Err(BindError::NotDisplayable { ty: ty.clone() })
            }
        }
    }

    /// Check and evaluate `lhs op rhs`
    pub fn eval_binary(
        &mut self,
        op: BinaryOp,
        lhs: &Binding,
        rhs: &Binding,
    ) -> BindResult<Binding> {
        self.check_binary(op, &lhs.ty, &rhs.ty)?;
        op.apply(lhs, rhs)
    }

    /// Check and evaluate a call to a host function
    ///
    /// Argument bindings are checked against the callee; the host receives
    /// them and produces the result payload, which is bound under the
    /// projected return type.
    pub fn eval_call<F>(
        &mut self,
        callee: &Binding,
        args: &[Binding],
        host: F,
    ) -> BindResult<Binding>
    where
        F: FnOnce(&[Binding]) -> BindResult<Payload>,
    {
        let arg_types: Vec<Type> = args.iter().map(|arg| arg.ty.clone()).collect();
        let ret = self.check_call(&callee.ty, &arg_types)?;
        Ok(Binding::new(host(args)?, ret))
    }

    /// Check and read member `key` of `object`
    pub fn eval_member(&mut self, object: &Binding, key: &str) -> BindResult<Binding> {
        let ty = self.check_member(&object.ty, key)?;
        match &object.payload {
            Payload::Dictionary(entries) => entries
                .get(key)
                .map(|payload| Binding::new(payload.clone(), ty))
                .ok_or(BindError::InvalidPayload {
                    expected: "Dictionary with the member",
                }),
            _ => Err(BindError::InvalidPayload {
                expected: "Dictionary",
            }),
        }
    }

    /// Check and render a template of text fragments and interpolated bindings
    pub fn eval_template(&mut self, chunks: &[Binding]) -> BindResult<Binding> {
        let mut text = String::new();
        for chunk in chunks {
            self.check_template_chunk(&chunk.ty)?;
            text.push_str(&render_chunk(&chunk.payload)?);
        }
        Ok(Binding::new(Payload::Text(text), Type::Text))
    }

    /// Reduce an operand type and strip literal-ness
    fn operand(&mut self, ty: &Type) -> BindResult<Type> {
        match self.algebra.reduce_type(ty) {
            Some(reduced) => Ok(carrier(reduced)),
            None => {
                debug!(%ty, "operand is irreducible");
                Err(BindError::IrreducibleOperand { ty: ty.clone() })
            }
        }
    }
}

/// Carrier type of a literal; other types are returned as is
fn carrier(ty: Type) -> Type {
    match ty {
        Type::Literal(lit) => lit.value.ty.into_type(),
        other => other,
    }
}
