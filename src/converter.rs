use std::collections::HashSet;
use std::path::{Path, PathBuf};

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, Value as JsonValue};

use crate::error::{GpxMapError, Result};
use crate::gpx_types::{MapView, PathTable, Row};
use crate::interpolate::interpolate;
use crate::options::{DuplicatePolicy, RenderOptions};
use crate::parser::GpxDocument;

/// Plotly's "Dark24" qualitative palette, assigned to hikes in order.
pub const DARK24: [&str; 24] = [
    "#2E91E5", "#E15F99", "#1CA71C", "#FB0D0D", "#DA16FF", "#222A2A", "#B68100", "#750D86",
    "#EB663B", "#511CB5", "#00A08B", "#FB00D1", "#FC0080", "#B2828D", "#6C7C32", "#778AAE",
    "#862A16", "#A777F1", "#620042", "#1616A7", "#DA60CA", "#6C4516", "#0D2A63", "#AF0038",
];

/// Every point of every track, tagged with the hike it belongs to.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    rows: Vec<Row>,
    hikes: Vec<String>,
    seen: HashSet<String>,
}

impl RowSet {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct hike labels in the order they were first added.
    pub fn hikes(&self) -> &[String] {
        &self.hikes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append the tracks of one source (usually one file).
    ///
    /// `source` names the origin in duplicate-name errors and qualified labels.
    pub fn append_paths(
        &mut self,
        paths: PathTable,
        source: &str,
        opts: &RenderOptions,
    ) -> Result<()> {
        for (name, path) in paths {
            let hike = if self.seen.contains(&name) {
                match opts.on_duplicate {
                    DuplicatePolicy::Append => name,
                    DuplicatePolicy::Error => {
                        return Err(GpxMapError::DuplicateTrack {
                            name,
                            source: source.to_string(),
                        });
                    }
                    DuplicatePolicy::QualifyByFile => self.qualified_label(&name, source),
                }
            } else {
                name
            };

            let (lon, lat) = match opts.interpolation_step {
                Some(step) => interpolate(&path.lon, &path.lat, step)?,
                None => (path.lon, path.lat),
            };
            if lat.is_empty() {
                continue;
            }

            if self.seen.insert(hike.clone()) {
                self.hikes.push(hike.clone());
            }
            self.rows.extend(lat.into_iter().zip(lon).map(|(lat, lon)| Row {
                lat,
                lon,
                hike: hike.clone(),
            }));
        }
        Ok(())
    }

    /// `"<name> (<source>)"`, numbered when that label is itself taken.
    fn qualified_label(&self, name: &str, source: &str) -> String {
        let mut label = format!("{name} ({source})");
        let mut n = 2;
        while self.seen.contains(&label) {
            label = format!("{name} ({source} {n})");
            n += 1;
        }
        label
    }

    /// Center of the bounding box of all rows, or `None` when there are no rows.
    pub fn view(&self, zoom: f64) -> Option<MapView> {
        if self.rows.is_empty() {
            return None;
        }
        let (min_lat, max_lat, min_lon, max_lon) = self.rows.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_lat, max_lat, min_lon, max_lon), row| {
                (
                    min_lat.min(row.lat),
                    max_lat.max(row.lat),
                    min_lon.min(row.lon),
                    max_lon.max(row.lon),
                )
            },
        );
        Some(MapView {
            center_lat: 0.5 * (max_lat + min_lat),
            center_lon: 0.5 * (max_lon + min_lon),
            zoom,
        })
    }
}

/// The `*.gpx` files directly inside `dir`, sorted by path.
pub fn find_gpx_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let access_error = |source| GpxMapError::FileAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(access_error)? {
        let path = entry.map_err(access_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "gpx") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse every file in order and combine their tracks. The first failure aborts.
pub fn collect_rows<P: AsRef<Path>>(files: &[P], opts: &RenderOptions) -> Result<RowSet> {
    let mut rows = RowSet::default();
    for file in files {
        let file = file.as_ref();
        let paths = GpxDocument::open(file)?.get_paths()?;
        let source = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        rows.append_paths(paths, &source, opts)?;
    }
    tracing::debug!(files = files.len(), rows = rows.len(), "collected rows");
    Ok(rows)
}

/// Rows of a single in-memory GPX document.
pub fn rows_from_str(xml: &str, source: &str, opts: &RenderOptions) -> Result<RowSet> {
    let mut rows = RowSet::default();
    rows.append_paths(GpxDocument::parse(xml)?.get_paths()?, source, opts)?;
    Ok(rows)
}

/// One GeoJSON feature per hike, colored from [`DARK24`].
pub fn to_feature_collection(rows: &RowSet) -> FeatureCollection {
    let features = rows
        .hikes()
        .iter()
        .enumerate()
        .filter_map(|(i, hike)| {
            let coords: Vec<Vec<f64>> = rows
                .rows()
                .iter()
                .filter(|row| row.hike == *hike)
                .map(|row| vec![row.lon, row.lat])
                .collect();
            hike_to_feature(hike, DARK24[i % DARK24.len()], coords)
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn hike_to_feature(hike: &str, color: &str, mut coords: Vec<Vec<f64>>) -> Option<Feature> {
    let value = match coords.len() {
        0 => return None,
        1 => Value::Point(coords.swap_remove(0)),
        _ => Value::LineString(coords),
    };

    let mut props = Map::new();
    props.insert("hike".to_string(), JsonValue::String(hike.to_string()));
    props.insert("color".to_string(), JsonValue::String(color.to_string()));

    Some(Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(props),
        foreign_members: None,
    })
}
