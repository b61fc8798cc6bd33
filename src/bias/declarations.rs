//! Serializable form of a bias, as read from configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bias::PredicateMode;

/// "literal of `predicate` may never appear at body position `position`" (1-based).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Exclusion {
    pub predicate: String,
    pub position: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BiasDeclarations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_vars: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_body: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_clauses: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_literals: Option<usize>,
    #[serde(default)]
    pub enable_recursion: bool,
    /// Mode of the predicate being learned.
    pub head: PredicateMode,
    /// Modes of the predicates allowed in clause bodies.
    #[serde(default)]
    pub body: Vec<PredicateMode>,
    #[serde(default)]
    pub aliases: Vec<Vec<String>>,
    #[serde(default)]
    pub only_once: Vec<String>,
    #[serde(default)]
    pub exclusions: Vec<Exclusion>,
}

impl BiasDeclarations {
    pub fn new(head: PredicateMode) -> Self {
        Self {
            max_vars: None,
            max_body: None,
            max_clauses: None,
            max_literals: None,
            enable_recursion: false,
            head,
            body: Vec::new(),
            aliases: Vec::new(),
            only_once: Vec::new(),
            exclusions: Vec::new(),
        }
    }

    pub fn body_pred(mut self, mode: PredicateMode) -> Self {
        self.body.push(mode);
        self
    }

    pub fn alias<S: Into<String>>(mut self, group: impl IntoIterator<Item = S>) -> Self {
        self.aliases.push(group.into_iter().map(Into::into).collect());
        self
    }

    pub fn only_once(mut self, predicate: impl Into<String>) -> Self {
        self.only_once.push(predicate.into());
        self
    }

    pub fn exclude(mut self, predicate: impl Into<String>, position: usize) -> Self {
        self.exclusions.push(Exclusion {
            predicate: predicate.into(),
            position,
        });
        self
    }

    pub fn bounds(mut self, max_vars: usize, max_body: usize, max_clauses: usize) -> Self {
        self.max_vars = Some(max_vars);
        self.max_body = Some(max_body);
        self.max_clauses = Some(max_clauses);
        self
    }

    pub fn recursion(mut self, enabled: bool) -> Self {
        self.enable_recursion = enabled;
        self
    }
}
