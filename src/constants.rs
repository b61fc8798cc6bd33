//! Default bounds applied when a bias does not declare its own.

pub const MAX_VARS: usize = 6;
pub const MAX_BODY: usize = 6;
/// Clause bound for recursive biases; a non-recursive bias defaults to a single clause.
pub const MAX_CLAUSES: usize = 2;
pub const MAX_LITERALS: usize = 40;

/// Prefix marking invented predicates.
pub const INVENTED_PREFIX: &str = "inv";
