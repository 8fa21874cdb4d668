use std::path::Path;
use std::str::FromStr;

use crate::error::{GpxMapError, Result};
use crate::gpx_types::{PathTable, TrackPath};
use crate::xml::{self, Element};

/// A parsed GPX file.
///
/// Element names are qualified with a prefix taken from the root tag: the root
/// tag with every literal `gpx` removed. For a GPX 1.1 file the root tag is
/// `{http://www.topografix.com/GPX/1/1}gpx`, so `trk` becomes
/// `{http://www.topografix.com/GPX/1/1}trk`. A root tag of any other shape
/// yields a prefix that simply finds no tracks.
#[derive(Debug, Clone)]
pub struct GpxDocument {
    root: Element,
    namespace_prefix: String,
}

impl GpxDocument {
    /// Read and parse the file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| GpxMapError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::parse(&xml)?;
        tracing::debug!(
            path = %path.display(),
            prefix = %document.namespace_prefix,
            "parsed GPX file"
        );
        Ok(document)
    }

    /// Parse a GPX document held in memory.
    pub fn parse(xml: &str) -> Result<Self> {
        let root = xml::parse_document(xml)?;
        let namespace_prefix = root.tag.replace("gpx", "");
        Ok(Self {
            root,
            namespace_prefix,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn namespace_prefix(&self) -> &str {
        &self.namespace_prefix
    }

    /// Full tag for an element of this document, e.g. `qualify("trkpt")`.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{name}", self.namespace_prefix)
    }

    /// Every track of the document with its points, in document order.
    ///
    /// A track without a `name` element is an error, as is a track point whose
    /// `lat` or `lon` is missing or not a number.
    pub fn get_paths(&self) -> Result<PathTable> {
        let trk_tag = self.qualify("trk");
        let name_tag = self.qualify("name");
        let trkpt_tag = self.qualify("trkpt");

        let mut paths = PathTable::default();
        for trk in xml::find_by_tag(&self.root, &trk_tag) {
            let name = xml::find_first_by_tag(trk, &name_tag)
                .ok_or_else(|| GpxMapError::MissingElement {
                    parent: trk_tag.clone(),
                    element: name_tag.clone(),
                })?
                .text()
                .unwrap_or_default()
                .to_string();

            let mut path = TrackPath::default();
            for trkpt in xml::find_by_tag(trk, &trkpt_tag) {
                let (lat, lon) = parse_lat_lon(trkpt)?;
                path.push(lat, lon);
            }
            tracing::debug!(track = %name, points = path.len(), "extracted track");
            paths.insert(name, path);
        }

        Ok(paths)
    }
}

impl FromStr for GpxDocument {
    type Err = GpxMapError;

    fn from_str(xml: &str) -> Result<Self> {
        Self::parse(xml)
    }
}

/// Parse lat/lon attributes of a track point.
fn parse_lat_lon(trkpt: &Element) -> Result<(f64, f64)> {
    Ok((
        parse_coordinate(trkpt, "lat")?,
        parse_coordinate(trkpt, "lon")?,
    ))
}

fn parse_coordinate(trkpt: &Element, attribute: &'static str) -> Result<f64> {
    let raw = trkpt
        .attribute(attribute)
        .ok_or(GpxMapError::MissingAttribute {
            element: "trkpt",
            attribute,
        })?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| GpxMapError::InvalidAttribute {
            element: "trkpt",
            attribute,
            value: raw.to_string(),
        })
}
