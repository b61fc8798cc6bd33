use std::collections::{BTreeSet, HashMap};

use itertools::Itertools;

use crate::bias::{BiasError, ModeRegistry, PredicateMode};

/// Set of predicate names treated as interchangeable by the symmetry rules.
pub type AliasGroup = BTreeSet<String>;

/// Declared alias groups. Groups sharing a member are merged on registration, so
/// every predicate belongs to at most one group.
#[derive(Clone, Debug, Default)]
pub struct AliasTable {
    groups: Vec<AliasGroup>,
    group_of: HashMap<String, usize>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a non-empty group. Every member must be registered and share the
    /// arity and argument types of the others; directions may differ.
    pub fn register(
        &mut self,
        registry: &ModeRegistry,
        group: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), BiasError> {
        let mut merged: AliasGroup = group.into_iter().map(Into::into).collect();
        if merged.is_empty() {
            return Err(BiasError::EmptyAliasGroup);
        }
        for name in &merged {
            registry.lookup(name)?;
        }
        let touched: Vec<AliasGroup> = self
            .groups
            .iter()
            .filter(|g| !g.is_disjoint(&merged))
            .cloned()
            .collect();
        for g in touched {
            merged.extend(g);
        }
        Self::check_signatures(registry, &merged)?;

        let mut groups: Vec<AliasGroup> = std::mem::take(&mut self.groups)
            .into_iter()
            .filter(|g| g.is_disjoint(&merged))
            .collect();
        groups.push(merged);
        self.rebuild(groups);
        Ok(())
    }

    fn check_signatures(registry: &ModeRegistry, group: &AliasGroup) -> Result<(), BiasError> {
        let modes: Vec<&PredicateMode> = group
            .iter()
            .map(|name| registry.lookup(name).map(|m| m.as_ref()))
            .try_collect()?;
        let Some(first) = modes.first() else {
            return Ok(());
        };
        for mode in &modes[1..] {
            if mode.arity != first.arity || mode.types != first.types {
                return Err(BiasError::ArityMismatch {
                    group: group.iter().cloned().collect(),
                    predicate: mode.name.clone(),
                    expected: type_signature(first),
                    found: type_signature(mode),
                });
            }
        }
        Ok(())
    }

    fn rebuild(&mut self, groups: Vec<AliasGroup>) {
        self.group_of = groups
            .iter()
            .enumerate()
            .flat_map(|(i, g)| g.iter().map(move |name| (name.clone(), i)))
            .collect();
        self.groups = groups;
    }

    /// Both predicates are members of the same declared group. A predicate that
    /// belongs to a group is declared-same as itself.
    pub fn declared_same(&self, a: &str, b: &str) -> bool {
        match (self.group_of.get(a), self.group_of.get(b)) {
            (Some(i), Some(j)) => i == j,
            _ => false,
        }
    }

    /// Declared-same, or the same predicate (every predicate is implicitly its own group).
    pub fn same(&self, a: &str, b: &str) -> bool {
        a == b || self.declared_same(a, b)
    }

    pub fn groups(&self) -> &[AliasGroup] {
        &self.groups
    }
}

fn type_signature(mode: &PredicateMode) -> String {
    format!("{}/{}({})", mode.name, mode.arity, mode.types.iter().join(","))
}
