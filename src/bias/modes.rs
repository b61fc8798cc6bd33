use std::{collections::HashMap, fmt, sync::Arc};

use itertools::Itertools;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::bias::BiasError;

/// Semantic type of an argument position, e.g. `element` or `list`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ArgType(pub String);

impl From<&str> for ArgType {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Data-flow role of an argument position: consumed (`In`) or produced (`Out`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

/// Mode declaration of a predicate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct PredicateMode {
    pub name: String,
    pub arity: usize,
    pub types: Vec<ArgType>,
    pub directions: Vec<Direction>,
}

impl PredicateMode {
    pub fn new(
        name: impl Into<String>,
        types: impl IntoIterator<Item = impl Into<ArgType>>,
        directions: impl IntoIterator<Item = Direction>,
    ) -> Self {
        let types: Vec<ArgType> = types.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            arity: types.len(),
            types,
            directions: directions.into_iter().collect(),
        }
    }

    pub fn validate(&self) -> Result<(), BiasError> {
        if self.name.is_empty() {
            return Err(BiasError::invalid_mode(&self.name, "empty predicate name"));
        }
        if self.types.len() != self.arity {
            return Err(BiasError::invalid_mode(
                &self.name,
                format!("{} types for arity {}", self.types.len(), self.arity),
            ));
        }
        if self.directions.len() != self.arity {
            return Err(BiasError::invalid_mode(
                &self.name,
                format!("{} directions for arity {}", self.directions.len(), self.arity),
            ));
        }
        Ok(())
    }

    /// Positions declared `In`.
    pub fn inputs(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions(Direction::In)
    }

    /// Positions declared `Out`.
    pub fn outputs(&self) -> impl Iterator<Item = usize> + '_ {
        self.positions(Direction::Out)
    }

    fn positions(&self, dir: Direction) -> impl Iterator<Item = usize> + '_ {
        self.directions
            .iter()
            .enumerate()
            .filter(move |(_, d)| **d == dir)
            .map(|(i, _)| i)
    }

    /// `name/arity(type:dir, ...)`
    pub fn signature(&self) -> String {
        format!(
            "{}/{}({})",
            self.name,
            self.arity,
            self.types
                .iter()
                .zip(self.directions.iter())
                .map(|(t, d)| format!("{}:{}", t, d))
                .join(",")
        )
    }
}

impl fmt::Display for PredicateMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.signature())
    }
}

/// Mode declarations keyed by predicate name. Populated at load time, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct ModeRegistry {
    modes: HashMap<String, Arc<PredicateMode>>,
}

impl ModeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mode`. Registering an identical mode twice is a no-op; any other
    /// redeclaration of the same name fails.
    pub fn register(&mut self, mode: PredicateMode) -> Result<Arc<PredicateMode>, BiasError> {
        mode.validate()?;
        if let Some(existing) = self.modes.get(&mode.name) {
            if **existing == mode {
                return Ok(existing.clone());
            }
            return Err(BiasError::duplicate_mode(existing, &mode));
        }
        let mode = Arc::new(mode);
        self.modes.insert(mode.name.clone(), mode.clone());
        Ok(mode)
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<PredicateMode>, BiasError> {
        self.modes
            .get(name)
            .ok_or_else(|| BiasError::UnknownPredicate(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<PredicateMode>> {
        self.modes.values()
    }
}
