use serde::Deserialize;

/// Options for collecting tracks and drawing the map.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Points generated between each pair of recorded points (default: none)
    #[serde(default)]
    pub interpolation_step: Option<usize>,

    /// What to do when a track name was already seen in an earlier file (default: append)
    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,

    /// Initial map zoom (default: 10)
    #[serde(default = "default_zoom")]
    pub zoom: f64,

    /// Width of the drawn lines in pixels (default: 4)
    #[serde(default = "default_line_width")]
    pub line_width: f64,

    /// Height of the map in pixels (default: 800)
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            interpolation_step: None,
            on_duplicate: DuplicatePolicy::default(),
            zoom: default_zoom(),
            line_width: default_line_width(),
            height: default_height(),
        }
    }
}

/// Policy for a track whose name already labels rows from an earlier source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Keep both; their rows share one label and are drawn as one line.
    #[default]
    Append,
    /// Abort with an error.
    Error,
    /// Relabel the later track as `<name> (<source>)`.
    QualifyByFile,
}

fn default_zoom() -> f64 {
    10.0
}

fn default_line_width() -> f64 {
    4.0
}

fn default_height() -> u32 {
    800
}
