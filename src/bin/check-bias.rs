//! Loads a JSON bias file and reports what it declares.
//!
//! Usage: `check-bias <bias.json>`

use std::env;

use anyhow::{bail, Context, Result};
use itertools::Itertools;
use log::info;
use modebias::BiasModel;

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let Some(path) = env::args().nth(1) else {
        bail!("usage: check-bias <bias.json>");
    };
    let bias = BiasModel::from_path(&path).with_context(|| format!("loading {}", path))?;

    info!("head: {}", bias.head());
    for mode in bias.body_predicates().sorted_by(|a, b| a.name.cmp(&b.name)) {
        info!(
            "body: {}{}",
            mode,
            if bias.is_only_once(&mode.name) {
                " [only once]"
            } else {
                ""
            }
        );
    }
    for group in bias.aliases().groups() {
        info!("alias group: {{{}}}", group.iter().join(", "));
    }
    let limits = bias.limits();
    info!(
        "bounds: max_vars={} max_body={} max_clauses={} max_literals={}",
        limits.max_vars, limits.max_body, limits.max_clauses, limits.max_literals
    );

    let clause = bias.open_clause(0)?;
    info!(
        "initial clause {} binds {} variable(s)",
        clause,
        clause.num_vars()
    );
    Ok(())
}
