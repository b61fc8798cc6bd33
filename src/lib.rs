//! Hypothesis-space constraints for mode-directed inductive logic programming.
//!
//! A [`bias::BiasModel`] declares which predicates may appear in a learned
//! program, their argument types and directions, the alias groups used for
//! symmetry breaking and the size bounds of the search. An external enumerator
//! grows candidate clauses one body literal at a time through
//! [`bias::BiasModel::admit`], which rejects type- or direction-inconsistent,
//! redundant and oversized candidates as early as possible.

pub mod admissibility;
pub mod bias;
pub mod constants;
pub mod hypothesis;

pub use admissibility::{admit, AdmissibilityError};
pub use bias::{load_bias, BiasDeclarations, BiasLoadError, BiasModel};
pub use hypothesis::{Clause, Literal, Program, VarId};

#[cfg(test)]
pub mod test_utils;
