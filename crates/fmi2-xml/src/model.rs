//! Records describing a parsed `modelDescription.xml`.

use crate::variable::ModelVariables;

/// Default value of `variableNamingConvention`.
pub const DEFAULT_VARIABLE_NAMING_CONVENTION: &str = "flat";

/// Parsed `<fmiModelDescription>` document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ModelDescription {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: ModelDescriptionBase,
    pub co_simulation: Option<CoSimulationAttributes>,
    pub model_exchange: Option<ModelExchangeAttributes>,
}

impl ModelDescription {
    pub fn supports_co_simulation(&self) -> bool {
        self.co_simulation.is_some()
    }

    pub fn supports_model_exchange(&self) -> bool {
        self.model_exchange.is_some()
    }

    /// Model identifier of the co-simulation interface, or of the
    /// model-exchange interface when co-simulation is not offered.
    pub fn model_identifier(&self) -> Option<&str> {
        self.co_simulation
            .as_ref()
            .map(|cs| cs.fmu.model_identifier.as_str())
            .or_else(|| {
                self.model_exchange
                    .as_ref()
                    .map(|me| me.fmu.model_identifier.as_str())
            })
    }

    pub fn variables(&self) -> &ModelVariables {
        &self.base.model_variables
    }

    pub fn structure(&self) -> &ModelStructure {
        &self.base.model_structure
    }
}

/// Identity attributes and owned children of the root element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ModelDescriptionBase {
    pub guid: String,
    pub fmi_version: String,
    pub model_name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub license: String,
    pub copyright: String,
    pub generation_tool: String,
    pub generation_date_and_time: String,
    pub number_of_event_indicators: usize,
    pub variable_naming_convention: String,
    pub model_variables: ModelVariables,
    pub model_structure: ModelStructure,
    pub default_experiment: Option<DefaultExperiment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct DefaultExperiment {
    pub start_time: Option<f64>,
    pub stop_time: Option<f64>,
    pub step_size: Option<f64>,
    pub tolerance: Option<f64>,
}

/// `<File>` entry below `<SourceFiles>`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceFile {
    pub name: String,
}

/// Attributes common to `<CoSimulation>` and `<ModelExchange>`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct FmuAttributes {
    pub model_identifier: String,
    pub needs_execution_tool: bool,
    #[cfg_attr(feature = "serde", serde(rename = "canGetAndSetFMUstate"))]
    pub can_get_and_set_fmu_state: bool,
    #[cfg_attr(feature = "serde", serde(rename = "canSerializeFMUstate"))]
    pub can_serialize_fmu_state: bool,
    pub provides_directional_derivative: bool,
    pub can_not_use_memory_management_functions: bool,
    pub can_be_instantiated_only_once_per_process: bool,
    pub source_files: Vec<SourceFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct CoSimulationAttributes {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fmu: FmuAttributes,
    pub max_output_derivative_order: u32,
    pub can_interpolate_inputs: bool,
    /// Read from the XML attribute `canRunAsynchronuously`.
    #[cfg_attr(feature = "serde", serde(rename = "canRunAsynchronuously"))]
    pub can_run_asynchronously: bool,
    pub can_handle_variable_communication_step_size: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ModelExchangeAttributes {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fmu: FmuAttributes,
    pub completed_integrator_step_not_needed: bool,
}

/// `<ModelStructure>` dependency declarations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ModelStructure {
    pub outputs: Vec<Unknown>,
    pub derivatives: Vec<Unknown>,
    pub initial_unknowns: Vec<Unknown>,
}

impl ModelStructure {
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty() && self.derivatives.is_empty() && self.initial_unknowns.is_empty()
    }
}

/// A single `<Unknown>` entry.
///
/// `dependencies == None` means the attribute was absent (the unknown depends
/// on all knowns), while `Some(vec![])` means it depends on none.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct Unknown {
    /// 1-based index into `<ModelVariables>`.
    pub index: u32,
    pub dependencies: Option<Vec<u32>>,
    pub dependencies_kind: Option<Vec<String>>,
}
