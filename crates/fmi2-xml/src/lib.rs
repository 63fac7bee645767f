#![cfg_attr(docsrs, feature(doc_cfg))]
//! Parse FMI 2.0 `modelDescription.xml` documents into typed records.
//!
//! ```rust
//! use fmi2_xml::{parse_model_description, Causality};
//!
//! let xml = r#"
//!     <fmiModelDescription fmiVersion="2.0" modelName="Gain" guid="{1}">
//!         <CoSimulation modelIdentifier="gain"/>
//!         <ModelVariables>
//!             <ScalarVariable name="y" valueReference="0" causality="output">
//!                 <Real/>
//!             </ScalarVariable>
//!         </ModelVariables>
//!     </fmiModelDescription>
//! "#;
//! let md = parse_model_description(xml).expect("valid model description");
//! assert_eq!(md.model_identifier(), Some("gain"));
//! assert_eq!(md.variables().by_causality(Causality::Output).count(), 1);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

pub mod attr;
pub mod model;
mod parse;
pub mod tree;
pub mod variable;

pub use model::{
    CoSimulationAttributes, DefaultExperiment, FmuAttributes, ModelDescription,
    ModelDescriptionBase, ModelExchangeAttributes, ModelStructure, SourceFile, Unknown,
    DEFAULT_VARIABLE_NAMING_CONVENTION,
};
pub use variable::{
    BooleanAttribute, BoundedScalarVariableAttribute, Causality, EnumerationAttribute, Initial,
    IntegerAttribute, ModelVariables, RealAttribute, ScalarVariable, ScalarVariableAttribute,
    ScalarVariableBase, StringAttribute, TypedAttribute, UnknownToken, Variability,
};

/// Errors raised while reading a model description.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The byte source could not be read.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The input is not well-formed XML.
    #[error("xml: {0}")]
    Xml(String),
    /// The document element is not `<fmiModelDescription>`.
    #[error("missing <fmiModelDescription> root element")]
    MissingRoot,
    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{name}'")]
    MissingAttribute { element: String, name: String },
    /// An attribute is present but cannot be converted to its type.
    #[error("<{element}> attribute '{name}' has malformed value '{value}'")]
    MalformedAttribute {
        element: String,
        name: String,
        value: String,
    },
    /// A `<ScalarVariable>` has no Integer/Real/String/Boolean/Enumeration child.
    #[error("scalar variable '{0}' has no type element")]
    InvalidScalarVariable(String),
}

/// Parse a model description held in memory.
pub fn parse_model_description(xml: &str) -> Result<ModelDescription, ParseError> {
    parse_model_description_reader(xml.as_bytes())
}

/// Parse a model description from any buffered byte source.
pub fn parse_model_description_reader<R: BufRead>(
    reader: R,
) -> Result<ModelDescription, ParseError> {
    let root = tree::read_document(reader)?;
    parse::model_description(&root)
}

/// Open and parse a `modelDescription.xml` file.
pub fn parse_model_description_file<P: AsRef<Path>>(
    path: P,
) -> Result<ModelDescription, ParseError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading model description");
    let file = File::open(path)?;
    parse_model_description_reader(BufReader::new(file))
}

impl FromStr for ModelDescription {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_model_description(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<fmiModelDescription fmiVersion="2.0" modelName="M" guid="{g}">
  <ModelExchange modelIdentifier="m"/>
</fmiModelDescription>"#;

    #[test]
    fn entry_points_agree() {
        let from_str = parse_model_description(XML).expect("parse str");
        let from_reader =
            parse_model_description_reader(std::io::Cursor::new(XML.as_bytes().to_vec()))
                .expect("parse reader");
        let via_from_str: ModelDescription = XML.parse().expect("FromStr");
        assert_eq!(from_str, from_reader);
        assert_eq!(from_str, via_from_str);
        assert_eq!(from_str.model_identifier(), Some("m"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join("fmi2-xml-does-not-exist/modelDescription.xml");
        let err = parse_model_description_file(path).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }

    #[test]
    fn errors_display_context() {
        let err = parse_model_description("<fmiModelDescription/>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "<fmiModelDescription> is missing required attribute 'guid'"
        );
        let err = parse_model_description("<a>").unwrap_err();
        assert!(err.to_string().starts_with("xml: "));
    }

    #[test]
    fn declared_latin1_encoding_is_decoded() {
        let mut bytes = br#"<?xml version="1.0" encoding="ISO-8859-1"?>
<fmiModelDescription fmiVersion="2.0" modelName="Caf"#
            .to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(
            br#"" guid="g"><CoSimulation modelIdentifier="m"/></fmiModelDescription>"#,
        );
        let md = parse_model_description_reader(bytes.as_slice()).expect("parse latin-1");
        assert_eq!(md.base.model_name, "Caf\u{e9}");
    }

    #[test]
    fn utf8_byte_order_mark_is_skipped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(XML.as_bytes());
        let md = parse_model_description_reader(bytes.as_slice()).expect("parse with BOM");
        assert_eq!(md.base.model_name, "M");
        assert_eq!(md.model_identifier(), Some("m"));
    }
}
