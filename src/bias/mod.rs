//! The bias: which predicates may appear in a learned program, their modes, the
//! alias groups used for symmetry breaking, and the bounds of the hypothesis space.
//!
//! A [`BiasModel`] is built once by [`load_bias`] and is immutable afterwards. It
//! carries no interior mutability, so search workers share it by reference (or
//! behind an `Arc`) without synchronization.

mod alias;
mod declarations;
mod error;
mod modes;

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fs,
    path::Path,
    sync::Arc,
};

pub use alias::*;
pub use declarations::*;
pub use error::*;
use log::{debug, info};
pub use modes::*;

use crate::{admissibility::SizeLimits, constants};

#[derive(Clone, Debug)]
pub struct BiasModel {
    registry: ModeRegistry,
    aliases: AliasTable,
    only_once: HashSet<String>,
    /// predicate -> forbidden 1-based body positions
    exclusions: HashMap<String, BTreeSet<usize>>,
    limits: SizeLimits,
    head: Arc<PredicateMode>,
    recursion: bool,
}

/// Validates `decls` and builds the immutable bias model.
pub fn load_bias(decls: &BiasDeclarations) -> Result<BiasModel, BiasLoadError> {
    let mut registry = ModeRegistry::new();
    let head = registry.register(decls.head.clone())?;
    for mode in &decls.body {
        registry.register(mode.clone())?;
    }

    let mut aliases = AliasTable::new();
    for group in &decls.aliases {
        aliases.register(&registry, group.iter().cloned())?;
    }

    let mut only_once = HashSet::new();
    for name in &decls.only_once {
        registry.lookup(name)?;
        only_once.insert(name.clone());
    }

    let mut exclusions: HashMap<String, BTreeSet<usize>> = HashMap::new();
    for ex in &decls.exclusions {
        registry.lookup(&ex.predicate)?;
        if ex.position == 0 {
            return Err(BiasError::InvalidExclusion {
                predicate: ex.predicate.clone(),
                position: ex.position,
            }
            .into());
        }
        exclusions
            .entry(ex.predicate.clone())
            .or_default()
            .insert(ex.position);
    }

    let default_clauses = if decls.enable_recursion {
        constants::MAX_CLAUSES
    } else {
        1
    };
    let limits = SizeLimits {
        max_vars: decls.max_vars.unwrap_or(constants::MAX_VARS),
        max_body: decls.max_body.unwrap_or(constants::MAX_BODY),
        max_clauses: decls.max_clauses.unwrap_or(default_clauses),
        max_literals: decls.max_literals.unwrap_or(constants::MAX_LITERALS),
    };
    limits.validate()?;

    info!(
        "Loaded bias: head {}, {} predicates, {} alias groups, {} only-once, {} exclusions",
        head,
        registry.len(),
        aliases.groups().len(),
        only_once.len(),
        decls.exclusions.len()
    );
    debug!(
        "Bias bounds: max_vars={} max_body={} max_clauses={} max_literals={}",
        limits.max_vars, limits.max_body, limits.max_clauses, limits.max_literals
    );

    Ok(BiasModel {
        registry,
        aliases,
        only_once,
        exclusions,
        limits,
        head,
        recursion: decls.enable_recursion,
    })
}

impl BiasModel {
    pub fn from_json(source: &str) -> Result<Self, BiasLoadError> {
        let decls: BiasDeclarations = serde_json::from_str(source)?;
        load_bias(&decls)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BiasLoadError> {
        let source = fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn registry(&self) -> &ModeRegistry {
        &self.registry
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    pub fn head(&self) -> &Arc<PredicateMode> {
        &self.head
    }

    pub fn recursion_enabled(&self) -> bool {
        self.recursion
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<PredicateMode>, BiasError> {
        self.registry.lookup(name)
    }

    pub fn is_only_once(&self, name: &str) -> bool {
        self.only_once.contains(name)
    }

    /// Whether `name` is forbidden at the 1-based body `position`.
    pub fn is_excluded(&self, name: &str, position: usize) -> bool {
        self.exclusions
            .get(name)
            .is_some_and(|positions| positions.contains(&position))
    }

    /// Predicates that may appear in a clause body.
    pub fn body_predicates(&self) -> impl Iterator<Item = &Arc<PredicateMode>> {
        self.registry
            .iter()
            .filter(|m| self.recursion || m.name != self.head.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        bias::Direction::{In, Out},
        test_utils::LIST_BIAS,
    };

    #[test]
    fn test_load_from_json() {
        let _ = env_logger::builder().is_test(true).try_init();
        let bias = BiasModel::from_json(LIST_BIAS).unwrap();
        assert_eq!(bias.head().name, "f");
        assert_eq!(bias.registry().len(), 4);
        assert_eq!(
            bias.limits(),
            &SizeLimits {
                max_vars: 5,
                max_body: 4,
                max_clauses: 3,
                max_literals: constants::MAX_LITERALS,
            }
        );
        assert!(bias.aliases().same("cons2", "cons1"));
        assert!(bias.is_only_once("cons1"));
        assert!(!bias.is_only_once("cons2"));
        assert!(bias.is_excluded("empty", 1));
        assert!(bias.is_excluded("empty", 2));
        assert!(!bias.is_excluded("empty", 3));
        let mut body: Vec<_> = bias.body_predicates().map(|m| m.name.clone()).collect();
        body.sort();
        assert_eq!(body, vec!["cons1", "cons2", "empty"]);
    }

    #[test]
    fn test_declarations_match_schema() {
        let schema = serde_json::to_value(schemars::schema_for!(BiasDeclarations)).unwrap();
        let instance: serde_json::Value = serde_json::from_str(LIST_BIAS).unwrap();
        assert!(jsonschema::is_valid(&schema, &instance));

        let missing_head = serde_json::json!({ "max_vars": 3 });
        assert!(!jsonschema::is_valid(&schema, &missing_head));
    }

    #[test]
    fn test_default_bounds() {
        let head = PredicateMode::new("f", ["list"], [In]);
        let bias = load_bias(&BiasDeclarations::new(head.clone())).unwrap();
        assert_eq!(bias.limits().max_vars, constants::MAX_VARS);
        assert_eq!(bias.limits().max_body, constants::MAX_BODY);
        assert_eq!(bias.limits().max_clauses, 1);

        let bias = load_bias(&BiasDeclarations::new(head).recursion(true)).unwrap();
        assert_eq!(bias.limits().max_clauses, constants::MAX_CLAUSES);
        assert!(bias.body_predicates().any(|m| m.name == "f"));
    }

    #[test]
    fn test_load_errors() {
        let head = PredicateMode::new("f", ["list", "list"], [In, Out]);
        let tail = PredicateMode::new("tail", ["list", "list"], [In, Out]);

        let decls = BiasDeclarations::new(head.clone()).only_once("tail");
        assert!(matches!(
            load_bias(&decls),
            Err(BiasLoadError::Declaration(BiasError::UnknownPredicate(p))) if p == "tail"
        ));

        let decls = BiasDeclarations::new(head.clone())
            .body_pred(tail.clone())
            .exclude("tail", 0);
        assert!(matches!(
            load_bias(&decls),
            Err(BiasLoadError::Declaration(BiasError::InvalidExclusion { .. }))
        ));

        let decls = BiasDeclarations::new(head.clone())
            .body_pred(tail.clone())
            .body_pred(PredicateMode::new("tail", ["list"], [In]));
        assert!(matches!(
            load_bias(&decls),
            Err(BiasLoadError::Declaration(BiasError::DuplicateMode { .. }))
        ));

        let decls = BiasDeclarations::new(head).body_pred(tail).bounds(0, 3, 1);
        assert!(matches!(
            load_bias(&decls),
            Err(BiasLoadError::Declaration(BiasError::InvalidBound("max_vars")))
        ));

        let empty_group = r#"{
            "head": { "name": "f", "arity": 1, "types": ["list"], "directions": ["in"] },
            "aliases": [[]]
        }"#;
        assert!(matches!(
            BiasModel::from_json(empty_group),
            Err(BiasLoadError::Declaration(BiasError::EmptyAliasGroup))
        ));

        assert!(matches!(
            BiasModel::from_json("{ \"max_vars\": 3 }"),
            Err(BiasLoadError::Json(_))
        ));
    }

    #[test]
    fn test_model_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BiasModel>();
    }
}
