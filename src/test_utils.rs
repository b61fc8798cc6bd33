use crate::bias::{
    load_bias, BiasDeclarations, BiasModel,
    Direction::{In, Out},
    PredicateMode,
};

/// List-manipulation bias: `f(list, list)` learned from `empty/1` and the
/// aliased structural predicates `cons1/3` (decompose) and `cons2/3` (compose).
pub const LIST_BIAS: &str = r#"{
    "max_vars": 5,
    "max_body": 4,
    "max_clauses": 3,
    "head": { "name": "f", "arity": 2, "types": ["list", "list"], "directions": ["in", "out"] },
    "body": [
        { "name": "empty", "arity": 1, "types": ["list"], "directions": ["in"] },
        { "name": "cons1", "arity": 3, "types": ["element", "list", "list"], "directions": ["out", "out", "in"] },
        { "name": "cons2", "arity": 3, "types": ["element", "list", "list"], "directions": ["in", "in", "out"] }
    ],
    "aliases": [["cons1", "cons2"]],
    "only_once": ["cons1"],
    "exclusions": [
        { "predicate": "empty", "position": 1 },
        { "predicate": "empty", "position": 2 }
    ]
}"#;

pub fn list_bias() -> BiasModel {
    BiasModel::from_json(LIST_BIAS).unwrap()
}

/// `f(list, list)` with recursion, `empty/1` and `tail/2`.
pub fn recursive_bias() -> BiasModel {
    let decls = BiasDeclarations::new(PredicateMode::new("f", ["list", "list"], [In, Out]))
        .body_pred(PredicateMode::new("empty", ["list"], [In]))
        .body_pred(PredicateMode::new("tail", ["list", "list"], [In, Out]))
        .bounds(5, 4, 3)
        .recursion(true);
    load_bias(&decls).unwrap()
}
