//! Standalone Leaflet page drawing the hikes of a [`RowSet`].

use std::path::Path;

use crate::converter::{to_feature_collection, RowSet};
use crate::error::{GpxMapError, Result};
use crate::options::RenderOptions;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>GPX hikes</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
  html, body { margin: 0; padding: 0; }
  #map { width: 100%; height: __HEIGHT__px; }
</style>
</head>
<body>
<div id="map"></div>
<script>
  const hikes = __GEOJSON__;
  const map = L.map("map").setView([__CENTER_LAT__, __CENTER_LON__], __ZOOM__);
  L.tileLayer("https://tile.openstreetmap.org/{z}/{x}/{y}.png", {
    maxZoom: 19,
    attribution: "&copy; OpenStreetMap contributors",
  }).addTo(map);
  const layer = L.geoJSON(hikes, {
    style: (feature) => ({ color: feature.properties.color, weight: __LINE_WIDTH__ }),
    pointToLayer: (feature, latlng) =>
      L.circleMarker(latlng, { color: feature.properties.color, radius: __LINE_WIDTH__ }),
    onEachFeature: (feature, layer) => layer.bindTooltip(feature.properties.hike),
  }).addTo(map);
  const legend = L.control({ position: "topright" });
  legend.onAdd = () => {
    const div = L.DomUtil.create("div");
    div.style.background = "white";
    div.style.padding = "6px";
    for (const feature of hikes.features) {
      const row = document.createElement("div");
      const swatch = document.createElement("span");
      swatch.style.cssText = `display:inline-block;width:12px;height:12px;margin-right:4px;background:${feature.properties.color}`;
      row.appendChild(swatch);
      row.appendChild(document.createTextNode(feature.properties.hike));
      div.appendChild(row);
    }
    return div;
  };
  legend.addTo(map);
</script>
</body>
</html>
"#;

/// Render the page for `rows`. An empty row set has nothing to center on and is an error.
pub fn render_html(rows: &RowSet, opts: &RenderOptions) -> Result<String> {
    let view = rows.view(opts.zoom).ok_or(GpxMapError::NoTracks)?;
    // `</` would end the script element early.
    let geojson = serde_json::to_string(&to_feature_collection(rows))?.replace("</", "<\\/");

    Ok(TEMPLATE
        .replace("__HEIGHT__", &opts.height.to_string())
        .replace("__GEOJSON__", &geojson)
        .replace("__CENTER_LAT__", &view.center_lat.to_string())
        .replace("__CENTER_LON__", &view.center_lon.to_string())
        .replace("__ZOOM__", &view.zoom.to_string())
        .replace("__LINE_WIDTH__", &opts.line_width.to_string()))
}

pub fn write_html(rows: &RowSet, opts: &RenderOptions, path: &Path) -> Result<()> {
    let page = render_html(rows, opts)?;
    std::fs::write(path, page).map_err(|source| GpxMapError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
