use std::path::Path;

use anyhow::Result;
use fmi2_xml::{Causality, ScalarVariable, TypedAttribute};
use tracing::info;

use crate::common::{self, or_dash, text_or_dash};

/// Start value rendered for display, `-` when none is declared.
fn start_value(var: &ScalarVariable) -> String {
    match &var.attribute {
        TypedAttribute::Real(attr) => or_dash(attr.bounds.start()),
        TypedAttribute::Integer(attr) | TypedAttribute::Enumeration(attr) => {
            or_dash(attr.start())
        }
        TypedAttribute::String(attr) => or_dash(attr.start.as_deref()),
        TypedAttribute::Boolean(attr) => or_dash(attr.start),
    }
}

pub fn run(path: &Path, causality: Option<Causality>, json: bool) -> Result<()> {
    let md = common::load(path)?;
    let selected: Vec<&ScalarVariable> = md
        .variables()
        .iter()
        .filter(|var| causality.map_or(true, |c| var.causality() == c))
        .collect();
    info!(
        total = md.variables().len(),
        selected = selected.len(),
        "listing variables"
    );

    if json {
        return common::print_json(&selected);
    }

    if selected.is_empty() {
        println!("No variables.");
        return Ok(());
    }

    println!(
        "{:<32} {:>6} {:<12} {:<20} {:<12} {}",
        "NAME", "VR", "TYPE", "CAUSALITY", "VARIABILITY", "START"
    );
    for var in selected {
        println!(
            "{:<32} {:>6} {:<12} {:<20} {:<12} {}",
            var.name(),
            var.value_reference(),
            var.type_name(),
            text_or_dash(var.causality().as_str()),
            text_or_dash(var.variability().as_str()),
            start_value(var),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmi2_xml::parse_model_description;

    #[test]
    fn start_values_per_type() {
        let md = parse_model_description(
            r#"<fmiModelDescription fmiVersion="2.0" modelName="M" guid="g">
  <ModelVariables>
    <ScalarVariable name="r" valueReference="0"><Real start="2.5"/></ScalarVariable>
    <ScalarVariable name="i" valueReference="1"><Integer/></ScalarVariable>
    <ScalarVariable name="s" valueReference="2"><String start="hi"/></ScalarVariable>
    <ScalarVariable name="b" valueReference="3"><Boolean start="1"/></ScalarVariable>
  </ModelVariables>
</fmiModelDescription>"#,
        )
        .expect("parse model");
        let starts: Vec<String> = md.variables().iter().map(start_value).collect();
        assert_eq!(starts, ["2.5", "-", "hi", "true"]);
    }
}
