use std::path::Path;

use anyhow::Result;
use fmi2_xml::{DefaultExperiment, ModelDescription};
use serde::Serialize;
use tracing::info;

use crate::common::{self, or_dash, text_or_dash};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    model_name: &'a str,
    guid: &'a str,
    fmi_version: &'a str,
    model_identifier: Option<&'a str>,
    co_simulation: bool,
    model_exchange: bool,
    variables: usize,
    outputs: usize,
    derivatives: usize,
    initial_unknowns: usize,
    default_experiment: Option<DefaultExperiment>,
}

impl<'a> Summary<'a> {
    fn new(md: &'a ModelDescription) -> Self {
        let structure = md.structure();
        Self {
            model_name: &md.base.model_name,
            guid: &md.base.guid,
            fmi_version: &md.base.fmi_version,
            model_identifier: md.model_identifier(),
            co_simulation: md.supports_co_simulation(),
            model_exchange: md.supports_model_exchange(),
            variables: md.variables().len(),
            outputs: structure.outputs.len(),
            derivatives: structure.derivatives.len(),
            initial_unknowns: structure.initial_unknowns.len(),
            default_experiment: md.base.default_experiment,
        }
    }
}

pub fn run(path: &Path, json: bool) -> Result<()> {
    let md = common::load(path)?;
    info!(model = %md.base.model_name, "describing model");

    if json {
        return common::print_json(&Summary::new(&md));
    }

    let base = &md.base;
    println!("Model:          {}", base.model_name);
    println!("GUID:           {}", base.guid);
    println!("FMI version:    {}", base.fmi_version);
    println!("Description:    {}", text_or_dash(&base.description));
    println!("Author:         {}", text_or_dash(&base.author));
    println!("Version:        {}", text_or_dash(&base.version));
    println!("Generated by:   {}", text_or_dash(&base.generation_tool));
    println!("Generated at:   {}", text_or_dash(&base.generation_date_and_time));
    println!("Naming:         {}", base.variable_naming_convention);
    println!("Event indic.:   {}", base.number_of_event_indicators);

    if let Some(cs) = &md.co_simulation {
        println!(
            "CoSimulation:   {} (variable step: {}, interpolate inputs: {}, max output derivative order: {})",
            cs.fmu.model_identifier,
            cs.can_handle_variable_communication_step_size,
            cs.can_interpolate_inputs,
            cs.max_output_derivative_order,
        );
    }
    if let Some(me) = &md.model_exchange {
        println!(
            "ModelExchange:  {} (completed integrator step not needed: {})",
            me.fmu.model_identifier, me.completed_integrator_step_not_needed,
        );
    }
    if !md.supports_co_simulation() && !md.supports_model_exchange() {
        println!("Interfaces:     none declared");
    }

    if let Some(ex) = &md.base.default_experiment {
        println!(
            "Experiment:     start={} stop={} step={} tolerance={}",
            or_dash(ex.start_time),
            or_dash(ex.stop_time),
            or_dash(ex.step_size),
            or_dash(ex.tolerance),
        );
    }

    let structure = md.structure();
    println!("Variables:      {}", md.variables().len());
    println!(
        "Structure:      {} outputs, {} derivatives, {} initial unknowns",
        structure.outputs.len(),
        structure.derivatives.len(),
        structure.initial_unknowns.len(),
    );

    Ok(())
}
