use std::env;
use std::error::Error;

use fmi2_rs::{parse_model_description_file, ModelDescription, Unknown};

fn main() -> Result<(), Box<dyn Error>> {
    let path = env::args()
        .nth(1)
        .ok_or("usage: dependency_graph <modelDescription.xml>")?;
    let md = parse_model_description_file(&path)?;
    print_dot(&md);
    Ok(())
}

fn label(md: &ModelDescription, index: u32) -> String {
    md.variables()
        .get_by_index(index)
        .map_or_else(|| format!("#{index}"), |var| var.name().to_string())
}

fn edges(md: &ModelDescription, unknown: &Unknown) {
    let target = label(md, unknown.index);
    match &unknown.dependencies {
        Some(deps) => {
            for &dep in deps {
                println!("  \"{}\" -> \"{}\";", label(md, dep), target);
            }
        }
        None => println!("  \"*\" -> \"{target}\" [style=dashed];"),
    }
}

fn print_dot(md: &ModelDescription) {
    let structure = md.structure();
    println!("digraph \"{}\" {{", md.base.model_name);
    for unknown in structure
        .outputs
        .iter()
        .chain(&structure.derivatives)
        .chain(&structure.initial_unknowns)
    {
        edges(md, unknown);
    }
    println!("}}");
}
