use std::path::PathBuf;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, GpxMapError>;

#[derive(Debug)]
pub enum GpxMapError {
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    XmlParse(quick_xml::Error),
    MalformedXml(String),
    MissingElement {
        parent: String,
        element: String,
    },
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    LengthMismatch {
        x: usize,
        y: usize,
    },
    DuplicateTrack {
        name: String,
        source: String,
    },
    NoTracks,
    Serialize(serde_json::Error),
}

impl std::fmt::Display for GpxMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileAccess { path, source } => {
                write!(f, "Cannot access '{}': {source}", path.display())
            }
            Self::XmlParse(e) => write!(f, "XML parse error: {e}"),
            Self::MalformedXml(msg) => write!(f, "Malformed XML: {msg}"),
            Self::MissingElement { parent, element } => {
                write!(f, "Missing element <{element}> in <{parent}>")
            }
            Self::MissingAttribute { element, attribute } => {
                write!(f, "Missing attribute '{attribute}' on <{element}>")
            }
            Self::InvalidAttribute {
                element,
                attribute,
                value,
            } => write!(
                f,
                "Invalid value '{value}' for attribute '{attribute}' on <{element}>"
            ),
            Self::LengthMismatch { x, y } => write!(
                f,
                "Cannot interpolate {x} x values against {y} y values"
            ),
            Self::DuplicateTrack { name, source } => {
                write!(f, "Track '{name}' from '{source}' is already on the map")
            }
            Self::NoTracks => write!(f, "No track points to draw"),
            Self::Serialize(e) => write!(f, "Serialization error: {e}"),
        }
    }
}

impl std::error::Error for GpxMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileAccess { source, .. } => Some(source),
            Self::XmlParse(e) => Some(e),
            Self::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<quick_xml::Error> for GpxMapError {
    fn from(e: quick_xml::Error) -> Self {
        Self::XmlParse(e)
    }
}

impl From<serde_json::Error> for GpxMapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialize(e)
    }
}

impl From<GpxMapError> for JsValue {
    fn from(e: GpxMapError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
