//! Type and direction checking of a single literal against the variables bound so far.

use std::collections::BTreeMap;

use crate::{
    admissibility::SchemaError,
    bias::ArgType,
    hypothesis::{Literal, VarId},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VarBinding {
    pub ty: ArgType,
    /// false while the variable is only known from a head output position
    pub bound: bool,
}

/// Variables of a clause with their types. A type, once assigned, never changes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bindings {
    vars: BTreeMap<VarId, VarBinding>,
}

impl Bindings {
    /// Initial bindings of a clause: head inputs are bound, head outputs are typed
    /// but still have to be produced by the body.
    pub fn for_head(head: &Literal) -> Result<Self, SchemaError> {
        check_arity(head)?;
        let mut bindings = Self::default();
        for (position, ty) in head.predicate.inputs().map(|i| (i, &head.predicate.types[i])) {
            bindings.introduce(head, position, ty, true)?;
        }
        for (position, ty) in head.predicate.outputs().map(|i| (i, &head.predicate.types[i])) {
            bindings.introduce(head, position, ty, false)?;
        }
        Ok(bindings)
    }

    pub fn get(&self, var: VarId) -> Option<&VarBinding> {
        self.vars.get(&var)
    }

    pub fn is_bound(&self, var: VarId) -> bool {
        self.vars.get(&var).is_some_and(|b| b.bound)
    }

    /// Number of distinct variables in the clause.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Typed variables no literal has produced yet.
    pub fn pending(&self) -> impl Iterator<Item = VarId> + '_ {
        self.vars
            .iter()
            .filter(|(_, b)| !b.bound)
            .map(|(v, _)| *v)
    }

    fn introduce(
        &mut self,
        literal: &Literal,
        position: usize,
        ty: &ArgType,
        bound: bool,
    ) -> Result<(), SchemaError> {
        let var = literal.vars[position];
        match self.vars.get_mut(&var) {
            Some(existing) if existing.ty != *ty => Err(SchemaError::TypeConflict {
                var,
                predicate: literal.name().to_string(),
                position,
                expected: existing.ty.clone(),
                found: ty.clone(),
            }),
            Some(existing) => {
                existing.bound |= bound;
                Ok(())
            }
            None => {
                self.vars.insert(
                    var,
                    VarBinding {
                        ty: ty.clone(),
                        bound,
                    },
                );
                Ok(())
            }
        }
    }
}

fn check_arity(literal: &Literal) -> Result<(), SchemaError> {
    if literal.vars.len() != literal.predicate.arity {
        return Err(SchemaError::ArityMismatch {
            predicate: literal.name().to_string(),
            expected: literal.predicate.arity,
            found: literal.vars.len(),
        });
    }
    Ok(())
}

/// Checks `literal` against `bindings` and returns the bindings extended with its
/// outputs. `bindings` itself is left untouched.
///
/// Every `In` variable must already be bound with the declared type; a variable
/// of another type counts as unbound. Every `Out`
/// variable is bound with its declared type; it may already exist only with the
/// same type. Inputs are checked against the incoming bindings, so a literal never
/// grounds its own inputs.
pub fn check_literal(literal: &Literal, bindings: &Bindings) -> Result<Bindings, SchemaError> {
    check_arity(literal)?;
    let mode = &literal.predicate;

    for position in mode.inputs() {
        let var = literal.vars[position];
        let ty = &mode.types[position];
        if !bindings.get(var).is_some_and(|b| b.bound && b.ty == *ty) {
            return Err(SchemaError::UnboundInput {
                var,
                predicate: literal.name().to_string(),
                position,
                expected: ty.clone(),
            });
        }
    }

    let mut next = bindings.clone();
    for position in mode.outputs() {
        next.introduce(literal, position, &mode.types[position], true)?;
    }
    Ok(next)
}
