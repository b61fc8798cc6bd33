use strum::IntoEnumIterator;

use crate::{bias::BiasError, constants};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum BoundKind {
    MaxVars,
    MaxBody,
    MaxClauses,
    MaxLiterals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} exceeded: {found} > {limit}")]
pub struct BoundExceeded {
    pub kind: BoundKind,
    pub limit: usize,
    pub found: usize,
}

/// Global bounds of the hypothesis space. Hard cutoffs: once one is hit, nothing
/// deeper in the same branch can satisfy it again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeLimits {
    pub max_vars: usize,
    pub max_body: usize,
    pub max_clauses: usize,
    /// total literals in a program, heads included
    pub max_literals: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_vars: constants::MAX_VARS,
            max_body: constants::MAX_BODY,
            max_clauses: constants::MAX_CLAUSES,
            max_literals: constants::MAX_LITERALS,
        }
    }
}

impl SizeLimits {
    pub fn validate(&self) -> Result<(), BiasError> {
        for kind in BoundKind::iter() {
            if self.limit(kind) == 0 {
                return Err(BiasError::InvalidBound(kind.into()));
            }
        }
        Ok(())
    }

    pub fn limit(&self, kind: BoundKind) -> usize {
        match kind {
            BoundKind::MaxVars => self.max_vars,
            BoundKind::MaxBody => self.max_body,
            BoundKind::MaxClauses => self.max_clauses,
            BoundKind::MaxLiterals => self.max_literals,
        }
    }

    pub fn check(&self, kind: BoundKind, found: usize) -> Result<(), BoundExceeded> {
        let limit = self.limit(kind);
        if found > limit {
            return Err(BoundExceeded { kind, limit, found });
        }
        Ok(())
    }

    pub fn check_clause(&self, vars: usize, body: usize) -> Result<(), BoundExceeded> {
        self.check(BoundKind::MaxVars, vars)?;
        self.check(BoundKind::MaxBody, body)
    }

    pub fn check_program(&self, clauses: usize, literals: usize) -> Result<(), BoundExceeded> {
        self.check(BoundKind::MaxClauses, clauses)?;
        self.check(BoundKind::MaxLiterals, literals)
    }
}
