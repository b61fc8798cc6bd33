//! Symmetry breaking: rejects body literals that are redundant with, or a trivial
//! reordering of, a literal already in the clause.
//!
//! Pairwise rules are a table of argument patterns evaluated uniformly. Only the
//! newly appended literal is compared against the existing body, and the
//! single-occurrence cap is kept as a per-clause counter, so an append costs
//! O(body length).

use std::collections::BTreeMap;

use crate::{
    bias::BiasModel,
    hypothesis::{Clause, Literal, VarId},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SymmetryRule {
    HeadExclusivity,
    TailExclusivity,
    ListUniqueness,
    AntiSwap,
    ExactDuplicate,
    SingleOccurrence,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{rule} violated by body literals {literals:?}")]
pub struct SymmetryViolation {
    pub rule: SymmetryRule,
    /// body indices of the literals involved, the rejected one last
    pub literals: Vec<usize>,
}

// Argument roles of a structural (cons-like) predicate `p(Head, Tail, List)`.
const HEAD: usize = 0;
const TAIL: usize = 1;
const LIST: usize = 2;

#[derive(Clone, Copy, Debug)]
enum Scope {
    /// both predicates belong to the same declared alias group
    Declared,
    /// same predicate, or same declared alias group
    Implicit,
}

#[derive(Clone, Copy, Debug)]
enum Pattern {
    Identical,
    /// equal at every `agree` position, different at `differ`
    Agree {
        agree: &'static [usize],
        differ: usize,
    },
    /// `left` and `right` exchanged, whatever the other positions hold
    Swapped { left: usize, right: usize },
}

impl Pattern {
    fn matches(&self, a: &[VarId], b: &[VarId]) -> bool {
        match *self {
            Pattern::Identical => a == b,
            Pattern::Agree { agree, differ } => {
                let arity = agree.iter().copied().chain([differ]).max().unwrap_or(0) + 1;
                a.len() >= arity
                    && b.len() >= arity
                    && agree.iter().all(|&i| a[i] == b[i])
                    && a[differ] != b[differ]
            }
            Pattern::Swapped { left, right } => {
                let arity = left.max(right) + 1;
                a.len() >= arity
                    && b.len() >= arity
                    && a[left] == b[right]
                    && a[right] == b[left]
                    && a[left] != a[right]
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct PairRule {
    rule: SymmetryRule,
    scope: Scope,
    pattern: Pattern,
}

impl PairRule {
    fn applies(&self, bias: &BiasModel, a: &Literal, b: &Literal) -> bool {
        let same = match self.scope {
            Scope::Declared => bias.aliases().declared_same(a.name(), b.name()),
            Scope::Implicit => bias.aliases().same(a.name(), b.name()),
        };
        same && self.pattern.matches(&a.vars, &b.vars)
    }
}

/// Evaluated in order; the first match is reported.
const PAIR_RULES: &[PairRule] = &[
    PairRule {
        rule: SymmetryRule::ExactDuplicate,
        scope: Scope::Implicit,
        pattern: Pattern::Identical,
    },
    PairRule {
        rule: SymmetryRule::AntiSwap,
        scope: Scope::Declared,
        pattern: Pattern::Swapped {
            left: TAIL,
            right: LIST,
        },
    },
    PairRule {
        rule: SymmetryRule::HeadExclusivity,
        scope: Scope::Declared,
        pattern: Pattern::Agree {
            agree: &[TAIL, LIST],
            differ: HEAD,
        },
    },
    PairRule {
        rule: SymmetryRule::TailExclusivity,
        scope: Scope::Declared,
        pattern: Pattern::Agree {
            agree: &[HEAD, LIST],
            differ: TAIL,
        },
    },
    PairRule {
        rule: SymmetryRule::ListUniqueness,
        scope: Scope::Declared,
        pattern: Pattern::Agree {
            agree: &[HEAD, TAIL],
            differ: LIST,
        },
    },
];

/// Per-clause occurrence counts of only-once predicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccurrenceCounts(BTreeMap<String, usize>);

impl OccurrenceCounts {
    pub fn get(&self, predicate: &str) -> usize {
        self.0.get(predicate).copied().unwrap_or(0)
    }
}

/// Checks `literal` as the next body literal after `body` and returns the updated
/// occurrence counts. A pair rule is reported before the single-occurrence cap.
pub fn check_append(
    bias: &BiasModel,
    body: &[Literal],
    counts: &OccurrenceCounts,
    literal: &Literal,
) -> Result<OccurrenceCounts, SymmetryViolation> {
    let index = body.len();
    for (i, existing) in body.iter().enumerate() {
        if let Some(rule) = PAIR_RULES
            .iter()
            .find(|rule| rule.applies(bias, existing, literal))
        {
            return Err(SymmetryViolation {
                rule: rule.rule,
                literals: vec![i, index],
            });
        }
    }

    if !bias.is_only_once(literal.name()) {
        return Ok(counts.clone());
    }
    // Identical tuples were rejected above, so every occurrence counted here is a
    // distinct variable tuple.
    if counts.get(literal.name()) >= 1 {
        let mut literals: Vec<usize> = body
            .iter()
            .enumerate()
            .filter(|(_, l)| l.name() == literal.name())
            .map(|(i, _)| i)
            .collect();
        literals.push(index);
        return Err(SymmetryViolation {
            rule: SymmetryRule::SingleOccurrence,
            literals,
        });
    }
    let mut next = counts.clone();
    *next.0.entry(literal.name().to_string()).or_default() += 1;
    Ok(next)
}

/// Full check of a clause body, replaying the incremental check literal by literal.
pub fn evaluate(bias: &BiasModel, clause: &Clause) -> Result<(), SymmetryViolation> {
    let body = clause.body();
    let mut counts = OccurrenceCounts::default();
    for i in 0..body.len() {
        counts = check_append(bias, &body[..i], &counts, &body[i])?;
    }
    Ok(())
}
