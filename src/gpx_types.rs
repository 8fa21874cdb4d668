use serde::Serialize;

/// The recorded points of one track, as parallel latitude/longitude columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TrackPath {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
}

impl TrackPath {
    pub fn push(&mut self, lat: f64, lon: f64) {
        self.lat.push(lat);
        self.lon.push(lon);
    }

    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }
}

/// Track name to path, kept in the order tracks were first seen.
///
/// Inserting a name that is already present replaces its path in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathTable {
    entries: Vec<(String, TrackPath)>,
}

impl PathTable {
    pub fn insert(&mut self, name: String, path: TrackPath) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = path,
            None => self.entries.push((name, path)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TrackPath> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, path)| path)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for PathTable {
    type Item = (String, TrackPath);
    type IntoIter = std::vec::IntoIter<(String, TrackPath)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One point of the combined table handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub lat: f64,
    pub lon: f64,
    pub hike: String,
}

/// Center and zoom of the rendered map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: f64,
}
