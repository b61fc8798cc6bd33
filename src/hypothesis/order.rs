use std::collections::HashSet;

use itertools::Itertools;

use crate::hypothesis::Literal;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HypothesisError {
    #[error("body of {head} cannot be grounded; stuck at {remaining}")]
    Ungroundable { head: String, remaining: String },
}

/// Orders `body` so that each literal's inputs are bound by the head inputs or by
/// the outputs of literals placed before it.
///
/// Literals with only output arguments go first. Among grounded literals a
/// non-recursive one is preferred; a recursive literal is placed only when no
/// non-recursive literal is ready. A head without inputs leaves the body as is.
pub fn grounded_order<'a>(
    head: &Literal,
    body: &'a [Literal],
) -> Result<Vec<&'a Literal>, HypothesisError> {
    let mut grounded: HashSet<_> = head.inputs().collect();
    if grounded.is_empty() {
        return Ok(body.iter().collect());
    }

    let mut remaining: Vec<&Literal> = body.iter().collect();
    let mut ordered = Vec::with_capacity(body.len());
    while !remaining.is_empty() {
        let mut selected = None;
        for (i, literal) in remaining.iter().enumerate() {
            if literal.predicate.outputs().count() == literal.vars.len() {
                selected = Some(i);
                break;
            }
            if !literal.inputs().all(|v| grounded.contains(&v)) {
                continue;
            }
            if literal.name() != head.name() {
                selected = Some(i);
                break;
            }
            selected.get_or_insert(i);
        }

        let Some(i) = selected else {
            return Err(HypothesisError::Ungroundable {
                head: head.to_string(),
                remaining: remaining.iter().join(","),
            });
        };
        let literal = remaining.remove(i);
        grounded.extend(literal.outputs());
        ordered.push(literal);
    }
    Ok(ordered)
}
