//! Typed coercion of attribute strings.

use crate::tree::Element;
use crate::variable::{Causality, Initial, Variability};
use crate::ParseError;

/// Conversion from a raw attribute value into a typed value.
///
/// Returns `None` when the text is not a valid lexical form for the type.
pub trait FromAttribute: Sized {
    fn from_attribute(raw: &str) -> Option<Self>;
}

impl FromAttribute for String {
    fn from_attribute(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl FromAttribute for bool {
    fn from_attribute(raw: &str) -> Option<Self> {
        match raw.trim() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

macro_rules! from_attribute_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromAttribute for $ty {
                fn from_attribute(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

from_attribute_via_parse!(i32, u32, usize, Causality, Variability, Initial);

/// `xsd:double` lexical space: decimal or exponent notation, plus the
/// special tokens `INF`, `-INF` and `NaN` (case sensitive).
impl FromAttribute for f64 {
    fn from_attribute(raw: &str) -> Option<Self> {
        match raw.trim() {
            "INF" | "+INF" => Some(f64::INFINITY),
            "-INF" => Some(f64::NEG_INFINITY),
            "NaN" => Some(f64::NAN),
            text if is_decimal_literal(text) => text.parse().ok(),
            _ => None,
        }
    }
}

fn is_decimal_literal(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_digit())
        && text
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Read an attribute that must be present.
pub fn required<T: FromAttribute>(node: &Element, name: &str) -> Result<T, ParseError> {
    match node.attribute(name) {
        Some(raw) => coerce(node, name, raw),
        None => Err(ParseError::MissingAttribute {
            element: node.name().to_string(),
            name: name.to_string(),
        }),
    }
}

/// Read an attribute that may be absent.
pub fn optional<T: FromAttribute>(node: &Element, name: &str) -> Result<Option<T>, ParseError> {
    node.attribute(name)
        .map(|raw| coerce(node, name, raw))
        .transpose()
}

/// Read an attribute, falling back to `default` when absent.
pub fn with_default<T: FromAttribute>(
    node: &Element,
    name: &str,
    default: T,
) -> Result<T, ParseError> {
    Ok(optional(node, name)?.unwrap_or(default))
}

fn coerce<T: FromAttribute>(node: &Element, name: &str, raw: &str) -> Result<T, ParseError> {
    T::from_attribute(raw).ok_or_else(|| ParseError::MalformedAttribute {
        element: node.name().to_string(),
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Parse an `<Unknown dependencies="...">` list.
///
/// Integer tokens may be separated by a comma or whitespace. Extraction stops
/// silently at the first token that is not an unsigned 32-bit integer.
pub fn parse_dependencies(raw: &str) -> Vec<u32> {
    let bytes = raw.as_bytes();
    let mut indices = Vec::new();
    let mut pos = 0;
    loop {
        while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
            pos += 1;
        }
        let start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_digit() {
            pos += 1;
        }
        if start == pos {
            break;
        }
        match raw[start..pos].parse::<u32>() {
            Ok(index) => indices.push(index),
            Err(_) => break,
        }
        if matches!(bytes.get(pos), Some(b',' | b' ')) {
            pos += 1;
        }
    }
    indices
}

/// Parse an `<Unknown dependenciesKind="...">` list.
pub fn parse_dependencies_kind(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::read_document;

    fn element(xml: &str) -> Element {
        read_document(xml.as_bytes()).expect("read xml")
    }

    #[test]
    fn required_reports_missing_and_malformed() {
        let node = element(r#"<Unknown index="x"/>"#);
        let err = required::<u32>(&node, "valueReference").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MissingAttribute { ref element, ref name }
                if element == "Unknown" && name == "valueReference"
        ));
        let err = required::<u32>(&node, "index").unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedAttribute { ref name, ref value, .. }
                if name == "index" && value == "x"
        ));
    }

    #[test]
    fn optional_and_default_values() {
        let node = element(r#"<Real start=" 1.5e3 " nominal="abc"/>"#);
        assert_eq!(optional::<f64>(&node, "start").unwrap(), Some(1500.0));
        assert_eq!(optional::<f64>(&node, "min").unwrap(), None);
        assert!(optional::<f64>(&node, "nominal").is_err());
        assert_eq!(with_default(&node, "max", 2.0f64).unwrap(), 2.0);
        assert_eq!(
            with_default(&node, "unit", "s".to_string()).unwrap(),
            "s".to_string()
        );
    }

    #[test]
    fn boolean_literals() {
        assert_eq!(bool::from_attribute("true"), Some(true));
        assert_eq!(bool::from_attribute("1"), Some(true));
        assert_eq!(bool::from_attribute("false"), Some(false));
        assert_eq!(bool::from_attribute("0"), Some(false));
        assert_eq!(bool::from_attribute("TRUE"), None);
        assert_eq!(bool::from_attribute("yes"), None);
    }

    #[test]
    fn double_literals() {
        assert_eq!(f64::from_attribute(" 1e-6 "), Some(1e-6));
        assert_eq!(f64::from_attribute(".5"), Some(0.5));
        assert_eq!(f64::from_attribute("-3.25E2"), Some(-325.0));
        assert_eq!(f64::from_attribute("INF"), Some(f64::INFINITY));
        assert_eq!(f64::from_attribute("-INF"), Some(f64::NEG_INFINITY));
        assert!(f64::from_attribute("NaN").is_some_and(f64::is_nan));
        let rejected = [
            "inf", "-inf", "infinity", "Infinity", "nan", "NAN", "", ".", "1.0f", "0x10",
        ];
        for rejected in rejected {
            assert_eq!(f64::from_attribute(rejected), None, "{rejected:?}");
        }
    }

    #[test]
    fn signed_and_unsigned_integers() {
        assert_eq!(i32::from_attribute("-7"), Some(-7));
        assert_eq!(u32::from_attribute("-7"), None);
        assert_eq!(u32::from_attribute("4294967295"), Some(u32::MAX));
        assert_eq!(u32::from_attribute("4294967296"), None);
        assert_eq!(usize::from_attribute("12"), Some(12));
    }

    #[test]
    fn dependencies_mixed_separators() {
        assert_eq!(parse_dependencies("1,2 3,4"), vec![1, 2, 3, 4]);
        assert_eq!(parse_dependencies("1 2"), vec![1, 2]);
        assert_eq!(parse_dependencies("  5,   6\n7 "), vec![5, 6, 7]);
        assert!(parse_dependencies("").is_empty());
    }

    #[test]
    fn dependencies_stop_at_garbage() {
        assert_eq!(parse_dependencies("1,2,x,4"), vec![1, 2]);
        assert_eq!(parse_dependencies("1,,2"), vec![1]);
        assert_eq!(parse_dependencies("12abc 3"), vec![12]);
        assert_eq!(parse_dependencies("1 99999999999 2"), vec![1]);
    }

    #[test]
    fn dependencies_kind_splits_on_whitespace_runs() {
        assert_eq!(
            parse_dependencies_kind("fixed  tunable\tconstant"),
            vec!["fixed", "tunable", "constant"]
        );
        assert!(parse_dependencies_kind("").is_empty());
        assert!(parse_dependencies_kind("   ").is_empty());
    }
}
