//! Clause admissibility: the checks the enumerator runs after appending each
//! candidate body literal.
//!
//! A literal is checked, in order, against the position exclusions, the recursion
//! flag, the mode schema ([`schema`]), the symmetry rules ([`symmetry`]) and the
//! body and variable bounds ([`limits`]). The first failure is returned; the input
//! clause is never modified.

mod error;
mod limits;
pub mod schema;
pub mod symmetry;

pub use error::*;
pub use limits::*;
use log::{debug, trace};
pub use schema::{check_literal, Bindings, VarBinding};
pub use symmetry::{evaluate, OccurrenceCounts, SymmetryRule, SymmetryViolation};

use crate::{
    bias::BiasModel,
    hypothesis::{Clause, Literal, Program, VarId},
};

impl BiasModel {
    /// Builds a literal of the registered predicate `name`.
    pub fn literal(
        &self,
        clause_id: usize,
        name: &str,
        vars: impl IntoIterator<Item = u32>,
    ) -> Result<Literal, AdmissibilityError> {
        let mode = self
            .lookup(name)
            .map_err(|_| AdmissibilityError::UnknownPredicate(name.to_string()))?;
        let literal = Literal::new(mode.clone(), clause_id, vars);
        if literal.vars.len() != mode.arity {
            return Err(SchemaError::ArityMismatch {
                predicate: name.to_string(),
                expected: mode.arity,
                found: literal.vars.len(),
            }
            .into());
        }
        Ok(literal)
    }

    /// Opens clause `id` with the head over `A, B, ...`.
    pub fn open_clause(&self, id: usize) -> Result<Clause, AdmissibilityError> {
        self.open_clause_with(id, 0..self.head().arity as u32)
    }

    /// Opens clause `id` with the given head variables.
    pub fn open_clause_with(
        &self,
        id: usize,
        head_vars: impl IntoIterator<Item = u32>,
    ) -> Result<Clause, AdmissibilityError> {
        let head = Literal::new(self.head().clone(), id, head_vars);
        let bindings = Bindings::for_head(&head)?;
        self.limits().check(BoundKind::MaxVars, bindings.len())?;
        Ok(Clause {
            id,
            head,
            body: Vec::new(),
            bindings,
            occurrences: OccurrenceCounts::default(),
        })
    }

    /// Appends `literal` to `clause` if the result is still admissible.
    pub fn admit(&self, clause: &Clause, literal: Literal) -> Result<Clause, AdmissibilityError> {
        let (bindings, occurrences) = self.admit_inner(clause, &literal).inspect_err(|e| {
            debug!(
                "Rejected {} as body literal {} of clause {}: {}",
                literal,
                clause.body.len() + 1,
                clause.id,
                e
            )
        })?;
        let mut body = clause.body.clone();
        trace!("Admitted {} into clause {}", literal, clause.id);
        body.push(literal);
        Ok(Clause {
            id: clause.id,
            head: clause.head.clone(),
            body,
            bindings,
            occurrences,
        })
    }

    fn admit_inner(
        &self,
        clause: &Clause,
        literal: &Literal,
    ) -> Result<(Bindings, OccurrenceCounts), AdmissibilityError> {
        if literal.clause_id != clause.id {
            return Err(AdmissibilityError::ForeignLiteral {
                expected: clause.id,
                found: literal.clause_id,
            });
        }
        let mode = self
            .lookup(literal.name())
            .map_err(|_| AdmissibilityError::UnknownPredicate(literal.name().to_string()))?;
        if **mode != *literal.predicate {
            return Err(AdmissibilityError::UnknownPredicate(
                literal.predicate.signature(),
            ));
        }

        let position = clause.body.len() + 1;
        if self.is_excluded(literal.name(), position) {
            return Err(AdmissibilityError::Excluded {
                predicate: literal.name().to_string(),
                position,
            });
        }
        if !self.recursion_enabled() && literal.name() == clause.head.name() {
            return Err(AdmissibilityError::RecursionDisabled(
                literal.name().to_string(),
            ));
        }

        let bindings = check_literal(literal, &clause.bindings)?;
        let occurrences =
            symmetry::check_append(self, &clause.body, &clause.occurrences, literal)?;
        self.limits().check(BoundKind::MaxBody, position)?;
        self.limits().check(BoundKind::MaxVars, bindings.len())?;
        Ok((bindings, occurrences))
    }

    /// Opens clause `id` and admits `body` in order.
    pub fn build_clause<'a>(
        &self,
        id: usize,
        body: impl IntoIterator<Item = (&'a str, Vec<u32>)>,
    ) -> Result<Clause, AdmissibilityError> {
        body.into_iter()
            .try_fold(self.open_clause(id)?, |clause, (name, vars)| {
                let literal = self.literal(id, name, vars)?;
                self.admit(&clause, literal)
            })
    }

    /// Appends a finished clause to `program`. Every head output must have been
    /// produced by the body, and the program bounds must still hold.
    pub fn admit_clause(
        &self,
        program: &Program,
        clause: Clause,
    ) -> Result<Program, AdmissibilityError> {
        if let Some(var) = self.ungrounded_head_output(&clause) {
            debug!("Rejected clause {}: head output {} is never bound", clause, var);
            return Err(AdmissibilityError::UngroundedHeadOutput {
                clause: clause.id,
                var,
            });
        }
        self.limits()
            .check_program(program.len() + 1, program.size() + clause.size())
            .inspect_err(|e| debug!("Rejected clause {}: {}", clause, e))?;

        trace!("Admitted clause {}", clause);
        let mut clauses = program.clauses.clone();
        clauses.push(clause);
        Ok(Program { clauses })
    }

    fn ungrounded_head_output(&self, clause: &Clause) -> Option<VarId> {
        clause
            .head
            .outputs()
            .find(|v| !clause.bindings.is_bound(*v))
    }
}

/// Free-function form of [`BiasModel::admit`].
pub fn admit(
    bias: &BiasModel,
    clause: &Clause,
    literal: Literal,
) -> Result<Clause, AdmissibilityError> {
    bias.admit(clause, literal)
}
