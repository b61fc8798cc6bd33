//! per-candidate rejection reasons

use crate::{
    admissibility::{BoundExceeded, BoundKind, SymmetryViolation},
    bias::ArgType,
    hypothesis::VarId,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("input {var} of {predicate} (argument {position}) is not bound as {expected}")]
    UnboundInput {
        var: VarId,
        predicate: String,
        position: usize,
        expected: ArgType,
    },
    #[error("{var} is {expected} but {predicate} (argument {position}) expects {found}")]
    TypeConflict {
        var: VarId,
        predicate: String,
        position: usize,
        expected: ArgType,
        found: ArgType,
    },
    #[error("{predicate} takes {expected} arguments, found {found}")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        found: usize,
    },
}

/// Why a literal or clause was rejected. All variants are recoverable: the
/// enumerator drops the candidate and moves on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissibilityError {
    #[error("unknown predicate '{0}'")]
    UnknownPredicate(String),
    #[error("literal of clause {found} offered to clause {expected}")]
    ForeignLiteral { expected: usize, found: usize },
    #[error("recursion is disabled, '{0}' may not appear in a body")]
    RecursionDisabled(String),
    #[error("'{predicate}' may not appear at body position {position}")]
    Excluded { predicate: String, position: usize },
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Symmetry(#[from] SymmetryViolation),
    #[error(transparent)]
    Bound(#[from] BoundExceeded),
    #[error("head output {var} of clause {clause} is never bound")]
    UngroundedHeadOutput { clause: usize, var: VarId },
}

impl AdmissibilityError {
    /// A size bound that no sibling candidate at this depth can satisfy either, so
    /// the enumerator may backtrack instead of trying the next literal. A variable
    /// bound only rules out this literal: a sibling may introduce fewer variables.
    pub fn prunes_subtree(&self) -> bool {
        matches!(self, Self::Bound(b) if b.kind != BoundKind::MaxVars)
    }
}
