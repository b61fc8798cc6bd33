//! Candidate hypotheses: literals, clauses and programs.
//!
//! Clauses and programs are values. They are only grown through
//! [`BiasModel::admit`](crate::bias::BiasModel::admit) and
//! [`BiasModel::admit_clause`](crate::bias::BiasModel::admit_clause), which return
//! a new value and leave the input untouched, so a search branch can be abandoned
//! by dropping it.

mod order;

use std::{collections::HashSet, fmt, sync::Arc};

use itertools::Itertools;
pub use order::*;

use crate::{
    admissibility::{Bindings, OccurrenceCounts},
    bias::PredicateMode,
    constants::INVENTED_PREFIX,
};

/// Clause-local variable. Rendered as `A`, `B`, ... `Z`, then `V26`, `V27`, ...
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(pub u32);

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 < 26 {
            write!(f, "{}", (b'A' + self.0 as u8) as char)
        } else {
            write!(f, "V{}", self.0)
        }
    }
}

impl From<u32> for VarId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub predicate: Arc<PredicateMode>,
    pub clause_id: usize,
    pub vars: Vec<VarId>,
}

impl Literal {
    pub fn new(
        predicate: Arc<PredicateMode>,
        clause_id: usize,
        vars: impl IntoIterator<Item = impl Into<VarId>>,
    ) -> Self {
        Self {
            predicate,
            clause_id,
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.predicate.name
    }

    /// Variables at `In` positions.
    pub fn inputs(&self) -> impl Iterator<Item = VarId> + '_ {
        self.predicate.inputs().filter_map(|i| self.vars.get(i).copied())
    }

    /// Variables at `Out` positions.
    pub fn outputs(&self) -> impl Iterator<Item = VarId> + '_ {
        self.predicate.outputs().filter_map(|i| self.vars.get(i).copied())
    }

    /// Identity of the literal inside its clause: predicate name and variable tuple.
    pub fn key(&self) -> (&str, &[VarId]) {
        (self.name(), &self.vars)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.vars.iter().join(","))
    }
}

/// A clause under construction. `bindings` and `occurrences` are the incremental
/// state threaded from one admission to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub(crate) id: usize,
    pub(crate) head: Literal,
    pub(crate) body: Vec<Literal>,
    pub(crate) bindings: Bindings,
    pub(crate) occurrences: OccurrenceCounts,
}

impl Clause {
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn head(&self) -> &Literal {
        &self.head
    }

    pub fn body(&self) -> &[Literal] {
        &self.body
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn num_vars(&self) -> usize {
        self.bindings.len()
    }

    /// Head plus body literals.
    pub fn size(&self) -> usize {
        1 + self.body.len()
    }

    pub fn is_recursive(&self) -> bool {
        self.body.iter().any(|l| l.name() == self.head.name())
    }

    pub fn is_invented(&self) -> bool {
        self.head.name().starts_with(INVENTED_PREFIX)
    }

    /// Body in an order where every literal's inputs are grounded before it runs.
    pub fn grounded_order(&self) -> Result<Vec<&Literal>, HypothesisError> {
        grounded_order(&self.head, &self.body)
    }

    /// Syntactic subsumption: same head and our body is a subset of `other`'s.
    /// Variables are not renamed.
    pub fn subsumes(&self, other: &Clause) -> bool {
        if self.head.key() != other.head.key() {
            return false;
        }
        let theirs: HashSet<_> = other.body.iter().map(Literal::key).collect();
        self.body.iter().all(|l| theirs.contains(&l.key()))
    }

    fn body_key(&self) -> Vec<(&str, &[VarId])> {
        self.body.iter().map(Literal::key).sorted().dedup().collect()
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:- {}.", self.head, self.body.iter().join(","))
    }
}

/// A candidate program. Clause count and total size are bounded by the bias.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub(crate) clauses: Vec<Clause>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Total number of literals, heads included.
    pub fn size(&self) -> usize {
        self.clauses.iter().map(Clause::size).sum()
    }

    pub fn is_recursive(&self) -> bool {
        self.clauses.len() > 1 && self.clauses.iter().any(Clause::is_recursive)
    }

    pub fn has_invention(&self) -> bool {
        self.clauses.len() > 1 && self.clauses.iter().any(Clause::is_invented)
    }

    /// Drops clauses whose head and body literal set repeat an earlier clause.
    pub fn dedup(&self) -> Program {
        let mut seen = HashSet::new();
        let clauses = self
            .clauses
            .iter()
            .filter(|c| seen.insert((c.head.key(), c.body_key())))
            .cloned()
            .collect();
        Program { clauses }
    }

    /// Every clause of `other` is subsumed by some clause of `self`.
    pub fn subsumes(&self, other: &Program) -> bool {
        other
            .clauses
            .iter()
            .all(|theirs| self.clauses.iter().any(|ours| ours.subsumes(theirs)))
    }

    /// Clauses ordered for presentation: non-recursive first, then by body length.
    pub fn ordered(&self) -> Vec<&Clause> {
        self.clauses
            .iter()
            .sorted_by_key(|c| (c.is_recursive(), c.body.len()))
            .collect()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, clause) in self.ordered().into_iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            match clause.grounded_order() {
                Ok(body) => write!(f, "{}:- {}.", clause.head, body.iter().join(","))?,
                Err(_) => write!(f, "{}", clause)?,
            }
        }
        Ok(())
    }
}
