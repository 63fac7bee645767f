use std::path::Path;

use anyhow::Result;
use fmi2_xml::{ModelVariables, Unknown};
use tracing::info;

use crate::common;

/// Variable name for a 1-based `<Unknown>` index.
fn resolve(variables: &ModelVariables, index: u32) -> String {
    variables
        .get_by_index(index)
        .map_or_else(|| format!("#{index}"), |var| var.name().to_string())
}

fn describe(variables: &ModelVariables, unknown: &Unknown) -> String {
    let target = resolve(variables, unknown.index);
    let deps = match &unknown.dependencies {
        None => "all knowns".to_string(),
        Some(deps) if deps.is_empty() => "none".to_string(),
        Some(deps) => deps
            .iter()
            .enumerate()
            .map(|(pos, &dep)| {
                let name = resolve(variables, dep);
                match unknown.dependencies_kind.as_ref().and_then(|k| k.get(pos)) {
                    Some(kind) => format!("{name} ({kind})"),
                    None => name,
                }
            })
            .collect::<Vec<_>>()
            .join(", "),
    };
    format!("{target} <- {deps}")
}

pub fn run(path: &Path, json: bool) -> Result<()> {
    let md = common::load(path)?;
    let structure = md.structure();
    info!(
        outputs = structure.outputs.len(),
        derivatives = structure.derivatives.len(),
        initial_unknowns = structure.initial_unknowns.len(),
        "printing model structure"
    );

    if json {
        return common::print_json(structure);
    }

    let sections = [
        ("Outputs", &structure.outputs),
        ("Derivatives", &structure.derivatives),
        ("InitialUnknowns", &structure.initial_unknowns),
    ];
    for (title, unknowns) in sections {
        println!("{title}:");
        if unknowns.is_empty() {
            println!("  (none)");
        }
        for unknown in unknowns {
            println!("  {}", describe(md.variables(), unknown));
        }
    }

    Ok(())
}
