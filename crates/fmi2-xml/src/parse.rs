//! Translation of the element tree into model description records.

use tracing::{debug, trace, warn};

use crate::attr::{
    optional, parse_dependencies, parse_dependencies_kind, required, with_default, FromAttribute,
};
use crate::model::{
    CoSimulationAttributes, DefaultExperiment, FmuAttributes, ModelDescription,
    ModelDescriptionBase, ModelExchangeAttributes, ModelStructure, SourceFile, Unknown,
    DEFAULT_VARIABLE_NAMING_CONVENTION,
};
use crate::tree::Element;
use crate::variable::{
    BoundedScalarVariableAttribute, Causality, Initial, ModelVariables, RealAttribute,
    ScalarVariable, ScalarVariableAttribute, ScalarVariableBase, TypedAttribute, Variability,
};
use crate::ParseError;

pub(crate) const ROOT_ELEMENT: &str = "fmiModelDescription";

/// Build a [`ModelDescription`] from the document element.
pub(crate) fn model_description(root: &Element) -> Result<ModelDescription, ParseError> {
    if root.name() != ROOT_ELEMENT {
        return Err(ParseError::MissingRoot);
    }

    let mut base = ModelDescriptionBase {
        guid: required(root, "guid")?,
        fmi_version: required(root, "fmiVersion")?,
        model_name: required(root, "modelName")?,
        description: with_default(root, "description", String::new())?,
        author: with_default(root, "author", String::new())?,
        version: with_default(root, "version", String::new())?,
        license: with_default(root, "license", String::new())?,
        copyright: with_default(root, "copyright", String::new())?,
        generation_tool: with_default(root, "generationTool", String::new())?,
        generation_date_and_time: with_default(root, "generationDateAndTime", String::new())?,
        number_of_event_indicators: with_default(root, "numberOfEventIndicators", 0)?,
        variable_naming_convention: with_default(
            root,
            "variableNamingConvention",
            DEFAULT_VARIABLE_NAMING_CONVENTION.to_string(),
        )?,
        model_variables: ModelVariables::default(),
        model_structure: ModelStructure::default(),
        default_experiment: None,
    };

    let mut co_simulation = None;
    let mut model_exchange = None;

    for child in root.children() {
        match child.name() {
            "CoSimulation" => co_simulation = Some(co_simulation_attributes(child)?),
            "ModelExchange" => model_exchange = Some(model_exchange_attributes(child)?),
            "DefaultExperiment" => base.default_experiment = Some(default_experiment(child)?),
            "ModelVariables" => base.model_variables = model_variables(child)?,
            "ModelStructure" => base.model_structure = model_structure(child)?,
            other => trace!(element = other, "ignoring root child"),
        }
    }

    if co_simulation.is_none() && model_exchange.is_none() {
        warn!(
            model = %base.model_name,
            "model description declares neither CoSimulation nor ModelExchange"
        );
    }
    debug!(
        model = %base.model_name,
        fmi_version = %base.fmi_version,
        variables = base.model_variables.len(),
        "parsed model description"
    );

    Ok(ModelDescription {
        base,
        co_simulation,
        model_exchange,
    })
}

fn default_experiment(node: &Element) -> Result<DefaultExperiment, ParseError> {
    Ok(DefaultExperiment {
        start_time: optional(node, "startTime")?,
        stop_time: optional(node, "stopTime")?,
        step_size: optional(node, "stepSize")?,
        tolerance: optional(node, "tolerance")?,
    })
}

fn source_files(node: &Element, files: &mut Vec<SourceFile>) -> Result<(), ParseError> {
    for file in node.children_named("File") {
        files.push(SourceFile {
            name: required(file, "name")?,
        });
    }
    Ok(())
}

fn unknown(node: &Element) -> Result<Unknown, ParseError> {
    let index: u32 = required(node, "index")?;
    if index == 0 {
        return Err(ParseError::MalformedAttribute {
            element: node.name().to_string(),
            name: "index".into(),
            value: "0".into(),
        });
    }
    Ok(Unknown {
        index,
        dependencies: node.attribute("dependencies").map(parse_dependencies),
        dependencies_kind: node
            .attribute("dependenciesKind")
            .map(parse_dependencies_kind),
    })
}

fn unknowns(node: &Element, into: &mut Vec<Unknown>) -> Result<(), ParseError> {
    for child in node.children_named("Unknown") {
        into.push(unknown(child)?);
    }
    Ok(())
}

fn model_structure(node: &Element) -> Result<ModelStructure, ParseError> {
    let mut structure = ModelStructure::default();
    for child in node.children() {
        match child.name() {
            "Outputs" => unknowns(child, &mut structure.outputs)?,
            "Derivatives" => unknowns(child, &mut structure.derivatives)?,
            "InitialUnknowns" => unknowns(child, &mut structure.initial_unknowns)?,
            _ => {}
        }
    }
    Ok(structure)
}

fn fmu_attributes(node: &Element) -> Result<FmuAttributes, ParseError> {
    let mut attributes = FmuAttributes {
        model_identifier: required(node, "modelIdentifier")?,
        needs_execution_tool: with_default(node, "needsExecutionTool", false)?,
        can_get_and_set_fmu_state: with_default(node, "canGetAndSetFMUstate", false)?,
        can_serialize_fmu_state: with_default(node, "canSerializeFMUstate", false)?,
        provides_directional_derivative: with_default(
            node,
            "providesDirectionalDerivative",
            false,
        )?,
        can_not_use_memory_management_functions: with_default(
            node,
            "canNotUseMemoryManagementFunctions",
            false,
        )?,
        can_be_instantiated_only_once_per_process: with_default(
            node,
            "canBeInstantiatedOnlyOncePerProcess",
            false,
        )?,
        source_files: Vec::new(),
    };
    for child in node.children_named("SourceFiles") {
        source_files(child, &mut attributes.source_files)?;
    }
    Ok(attributes)
}

fn co_simulation_attributes(node: &Element) -> Result<CoSimulationAttributes, ParseError> {
    Ok(CoSimulationAttributes {
        fmu: fmu_attributes(node)?,
        max_output_derivative_order: with_default(node, "maxOutputDerivativeOrder", 0)?,
        can_interpolate_inputs: with_default(node, "canInterpolateInputs", false)?,
        can_run_asynchronously: with_default(node, "canRunAsynchronuously", false)?,
        can_handle_variable_communication_step_size: with_default(
            node,
            "canHandleVariableCommunicationStepSize",
            false,
        )?,
    })
}

fn model_exchange_attributes(node: &Element) -> Result<ModelExchangeAttributes, ParseError> {
    Ok(ModelExchangeAttributes {
        fmu: fmu_attributes(node)?,
        completed_integrator_step_not_needed: with_default(
            node,
            "completedIntegratorStepNotNeeded",
            false,
        )?,
    })
}

fn scalar_attribute<T: FromAttribute>(
    node: &Element,
) -> Result<ScalarVariableAttribute<T>, ParseError> {
    Ok(ScalarVariableAttribute {
        start: optional(node, "start")?,
        declared_type: optional(node, "declaredType")?,
    })
}

fn bounded_attribute<T: FromAttribute>(
    node: &Element,
) -> Result<BoundedScalarVariableAttribute<T>, ParseError> {
    Ok(BoundedScalarVariableAttribute {
        base: scalar_attribute(node)?,
        min: optional(node, "min")?,
        max: optional(node, "max")?,
        quantity: optional(node, "quantity")?,
    })
}

fn real_attribute(node: &Element) -> Result<RealAttribute, ParseError> {
    Ok(RealAttribute {
        bounds: bounded_attribute(node)?,
        nominal: optional(node, "nominal")?,
        unit: optional(node, "unit")?,
        derivative: optional(node, "derivative")?,
        reinit: with_default(node, "reinit", false)?,
        unbounded: with_default(node, "unbounded", false)?,
        relative_quantity: with_default(node, "relativeQuantity", false)?,
    })
}

fn typed_attribute(node: &Element) -> Result<Option<TypedAttribute>, ParseError> {
    let attribute = match node.name() {
        "Integer" => TypedAttribute::Integer(bounded_attribute(node)?),
        "Real" => TypedAttribute::Real(real_attribute(node)?),
        "String" => TypedAttribute::String(scalar_attribute(node)?),
        "Boolean" => TypedAttribute::Boolean(scalar_attribute(node)?),
        "Enumeration" => TypedAttribute::Enumeration(bounded_attribute(node)?),
        _ => return Ok(None),
    };
    Ok(Some(attribute))
}

fn scalar_variable(node: &Element) -> Result<ScalarVariable, ParseError> {
    let base = ScalarVariableBase {
        name: required(node, "name")?,
        description: with_default(node, "description", String::new())?,
        value_reference: required(node, "valueReference")?,
        can_handle_multiple_set_per_time_instant: with_default(
            node,
            "canHandleMultipleSetPerTimeInstant",
            false,
        )?,
        causality: with_default(node, "causality", Causality::Unspecified)?,
        variability: with_default(node, "variability", Variability::Unspecified)?,
        initial: with_default(node, "initial", Initial::Unspecified)?,
    };

    for child in node.children() {
        if let Some(attribute) = typed_attribute(child)? {
            return Ok(ScalarVariable { base, attribute });
        }
    }
    Err(ParseError::InvalidScalarVariable(base.name))
}

fn model_variables(node: &Element) -> Result<ModelVariables, ParseError> {
    let variables = node
        .children_named("ScalarVariable")
        .map(scalar_variable)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ModelVariables::new(variables))
}
