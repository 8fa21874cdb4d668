use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gpx_hike_map::converter::{collect_rows, find_gpx_files};
use gpx_hike_map::error::{GpxMapError, Result};
use gpx_hike_map::html::write_html;
use gpx_hike_map::options::{DuplicatePolicy, RenderOptions};

const EXPORT_FILE: &str = "map.html";

/// Visualise gpx files on a map in your browser.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory where the gpx files are located.
    file_path: PathBuf,

    /// Save the rendered map to map.html instead of opening it.
    #[arg(long)]
    export_html: bool,

    /// Points to generate between each pair of recorded points.
    #[arg(long, value_name = "STEP")]
    interpolate: Option<usize>,

    /// What to do with a track whose name was already seen in another file.
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Append)]
    on_duplicate: DuplicatePolicy,

    /// Initial zoom of the map.
    #[arg(long, default_value_t = 10.0)]
    zoom: f64,
}

impl Cli {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            interpolation_step: self.interpolate,
            on_duplicate: self.on_duplicate,
            zoom: self.zoom,
            ..RenderOptions::default()
        }
    }
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();
    tracing::debug!(?cli, "parsed arguments");

    let start = Instant::now();
    let result = run(&cli);
    tracing::info!("'main' executed in {:.4}s", start.elapsed().as_secs_f64());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: &Cli) -> Result<()> {
    let files = find_gpx_files(&cli.file_path)?;
    tracing::info!(?files, "found {} gpx files", files.len());

    let opts = cli.render_options();
    let rows = collect_rows(&files, &opts)?;

    if cli.export_html {
        write_html(&rows, &opts, EXPORT_FILE.as_ref())?;
        tracing::info!("map saved as {EXPORT_FILE}");
    } else {
        let path = std::env::temp_dir().join("gpx-hike-map.html");
        write_html(&rows, &opts, &path)?;
        show(&path)?;
    }
    Ok(())
}

fn show(path: &std::path::Path) -> Result<()> {
    tracing::info!("opening {}", path.display());
    open::that(path).map_err(|source| GpxMapError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
