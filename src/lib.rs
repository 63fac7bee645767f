//! FMI 2.0 facade re-exporting the model description parser.
//!
//! ```rust,no_run
//! use fmi2_rs::{parse_model_description_file, Causality};
//!
//! let md = parse_model_description_file("modelDescription.xml").expect("parse");
//! for var in md.variables().by_causality(Causality::Output) {
//!     println!("{} (vr={})", var.name(), var.value_reference());
//! }
//! ```

pub use fmi2_xml as xml;
pub use fmi2_xml::*;
