//! Scalar variables and their typed attributes.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

/// Returned when an enumerated attribute holds an unknown token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownToken {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! token_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $token:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Attribute absent or empty.
            #[default]
            Unspecified,
        }

        impl $name {
            /// Token used in `modelDescription.xml`; empty for `Unspecified`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $token,)+
                    $name::Unspecified => "",
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownToken;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($token => Ok($name::$variant),)+
                    "" => Ok($name::Unspecified),
                    other => Err(UnknownToken {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

token_enum! {
    /// Role of a variable in the model interface.
    Causality, "causality" {
        Parameter => "parameter",
        CalculatedParameter => "calculatedParameter",
        Input => "input",
        Output => "output",
        Local => "local",
        /// Independent variable, usually time.
        Independent => "independent",
    }
}

token_enum! {
    /// Time dependency of a variable's value.
    Variability, "variability" {
        Constant => "constant",
        Fixed => "fixed",
        Tunable => "tunable",
        Discrete => "discrete",
        Continuous => "continuous",
    }
}

token_enum! {
    /// How a variable is initialized.
    Initial, "initial" {
        Exact => "exact",
        Approx => "approx",
        Calculated => "calculated",
    }
}

/// Attributes shared by every `<ScalarVariable>`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ScalarVariableBase {
    pub name: String,
    /// Empty when the attribute is absent.
    pub description: String,
    pub value_reference: u32,
    pub can_handle_multiple_set_per_time_instant: bool,
    pub causality: Causality,
    pub variability: Variability,
    pub initial: Initial,
}

/// `start` and `declaredType` of a typed child element.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ScalarVariableAttribute<T> {
    pub start: Option<T>,
    pub declared_type: Option<String>,
}

/// Typed attributes that additionally carry a value range.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct BoundedScalarVariableAttribute<T> {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: ScalarVariableAttribute<T>,
    pub min: Option<T>,
    pub max: Option<T>,
    pub quantity: Option<String>,
}

impl<T> BoundedScalarVariableAttribute<T> {
    pub fn start(&self) -> Option<&T> {
        self.base.start.as_ref()
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.base.declared_type.as_deref()
    }
}

/// Attributes of a `<Real>` child.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct RealAttribute {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub bounds: BoundedScalarVariableAttribute<f64>,
    pub nominal: Option<f64>,
    pub unit: Option<String>,
    /// 1-based index of the state this variable is the derivative of.
    pub derivative: Option<u32>,
    pub reinit: bool,
    pub unbounded: bool,
    pub relative_quantity: bool,
}

pub type IntegerAttribute = BoundedScalarVariableAttribute<i32>;
pub type EnumerationAttribute = BoundedScalarVariableAttribute<i32>;
pub type StringAttribute = ScalarVariableAttribute<String>;
pub type BooleanAttribute = ScalarVariableAttribute<bool>;

/// The typed child of a `<ScalarVariable>`; exactly one per variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(tag = "type"))]
pub enum TypedAttribute {
    Integer(IntegerAttribute),
    Real(RealAttribute),
    String(StringAttribute),
    Boolean(BooleanAttribute),
    Enumeration(EnumerationAttribute),
}

impl TypedAttribute {
    /// Tag name of the child element this attribute was read from.
    pub const fn type_name(&self) -> &'static str {
        match self {
            TypedAttribute::Integer(_) => "Integer",
            TypedAttribute::Real(_) => "Real",
            TypedAttribute::String(_) => "String",
            TypedAttribute::Boolean(_) => "Boolean",
            TypedAttribute::Enumeration(_) => "Enumeration",
        }
    }
}

/// A `<ScalarVariable>` element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScalarVariable {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub base: ScalarVariableBase,
    pub attribute: TypedAttribute,
}

impl ScalarVariable {
    pub fn name(&self) -> &str {
        &self.base.name
    }

    pub fn value_reference(&self) -> u32 {
        self.base.value_reference
    }

    pub fn causality(&self) -> Causality {
        self.base.causality
    }

    pub fn variability(&self) -> Variability {
        self.base.variability
    }

    pub fn initial(&self) -> Initial {
        self.base.initial
    }

    pub fn type_name(&self) -> &'static str {
        self.attribute.type_name()
    }

    pub fn as_integer(&self) -> Option<&IntegerAttribute> {
        match &self.attribute {
            TypedAttribute::Integer(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<&RealAttribute> {
        match &self.attribute {
            TypedAttribute::Real(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&StringAttribute> {
        match &self.attribute {
            TypedAttribute::String(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<&BooleanAttribute> {
        match &self.attribute {
            TypedAttribute::Boolean(attr) => Some(attr),
            _ => None,
        }
    }

    pub fn as_enumeration(&self) -> Option<&EnumerationAttribute> {
        match &self.attribute {
            TypedAttribute::Enumeration(attr) => Some(attr),
            _ => None,
        }
    }
}

/// Ordered `<ModelVariables>` list.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ModelVariables {
    variables: Vec<ScalarVariable>,
}

impl ModelVariables {
    pub fn new(variables: Vec<ScalarVariable>) -> Self {
        Self { variables }
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ScalarVariable> {
        self.variables.iter()
    }

    pub fn as_slice(&self) -> &[ScalarVariable] {
        &self.variables
    }

    /// Look up a variable by its unique name.
    pub fn get_by_name(&self, name: &str) -> Option<&ScalarVariable> {
        self.variables.iter().find(|var| var.name() == name)
    }

    /// First variable with the given value reference. Aliases share a value
    /// reference, so later matches are not returned.
    pub fn get_by_value_reference(&self, vr: u32) -> Option<&ScalarVariable> {
        self.variables.iter().find(|var| var.value_reference() == vr)
    }

    /// Variable at a 1-based position, as referenced by `<Unknown index>`.
    pub fn get_by_index(&self, index: u32) -> Option<&ScalarVariable> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.variables.get(position)
    }

    pub fn by_causality(&self, causality: Causality) -> impl Iterator<Item = &ScalarVariable> + '_ {
        self.variables
            .iter()
            .filter(move |var| var.causality() == causality)
    }
}

impl<'a> IntoIterator for &'a ModelVariables {
    type Item = &'a ScalarVariable;
    type IntoIter = core::slice::Iter<'a, ScalarVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}
