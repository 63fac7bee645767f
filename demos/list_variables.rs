use std::env;
use std::error::Error;

use fmi2_rs::{parse_model_description, parse_model_description_file, ModelDescription};
use tracing::info;

const XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<fmiModelDescription fmiVersion="2.0" modelName="VanDerPol" guid="{8c4e810f-3da3-4a00-8276-176fa3c9f000}"
                     numberOfEventIndicators="0">
  <CoSimulation modelIdentifier="VanDerPol" canHandleVariableCommunicationStepSize="true"/>
  <DefaultExperiment startTime="0" stopTime="20" stepSize="1e-2"/>
  <ModelVariables>
    <ScalarVariable name="time" valueReference="0" causality="independent" variability="continuous">
      <Real/>
    </ScalarVariable>
    <ScalarVariable name="x0" valueReference="1" causality="output" variability="continuous" initial="exact">
      <Real start="2"/>
    </ScalarVariable>
    <ScalarVariable name="der(x0)" valueReference="2" causality="local" variability="continuous">
      <Real derivative="2"/>
    </ScalarVariable>
    <ScalarVariable name="mu" valueReference="5" causality="parameter" variability="fixed" initial="exact">
      <Real start="1"/>
    </ScalarVariable>
  </ModelVariables>
  <ModelStructure>
    <Outputs><Unknown index="2"/></Outputs>
    <Derivatives><Unknown index="3" dependencies="2 4"/></Derivatives>
  </ModelStructure>
</fmiModelDescription>"#;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let md = match env::args().nth(1) {
        Some(path) => parse_model_description_file(&path)?,
        None => parse_model_description(XML)?,
    };
    print_variables(&md);
    Ok(())
}

fn print_variables(md: &ModelDescription) {
    info!(
        model = %md.base.model_name,
        identifier = md.model_identifier().unwrap_or("-"),
        "loaded model"
    );
    for var in md.variables() {
        println!(
            "{:>4}  {:<16} {:<8} {:<12} {}",
            var.value_reference(),
            var.name(),
            var.type_name(),
            var.causality(),
            var.base.description,
        );
    }
}
