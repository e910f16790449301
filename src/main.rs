//! brainmap - headless density map renderer
//!
//! Usage:
//!   brainmap coordinates.json [--template colin.raw] [--template-format u8]
//!            [--axis axial] [--slice 50] [--level 0.5] [--out-png slice.png]
//!            [--out-obj mesh.obj] [--out-vertices mesh.bin]
//!
//! Command-line flags override `config/default.toml`, `config/user.toml`
//! and `BM_*` environment variables.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use brainmap::config::{AppConfig, ConfigError};
use brainmap::export::{self, ExportError};
use brainmap::session::ViewerSession;
use brainmap_render::mesh::FinalizeError;
use brainmap_volume::{
    decode_template, CoordinatesPayload, PayloadError, SliceAxis, TemplateFormat, VolumeError,
};

/// Anything that stops a run
#[derive(Debug)]
enum AppError {
    Usage(String),
    Config(ConfigError),
    Read { path: PathBuf, source: io::Error },
    Payload(PayloadError),
    Template(VolumeError),
    Mesh(FinalizeError),
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Usage(msg) => write!(f, "{}", msg),
            AppError::Config(e) => write!(f, "{}", e),
            AppError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            AppError::Payload(e) => write!(f, "{}", e),
            AppError::Template(e) => write!(f, "Template: {}", e),
            AppError::Mesh(e) => write!(f, "Mesh: {}", e),
            AppError::Export(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}

impl From<PayloadError> for AppError {
    fn from(e: PayloadError) -> Self {
        AppError::Payload(e)
    }
}

impl From<VolumeError> for AppError {
    fn from(e: VolumeError) -> Self {
        AppError::Template(e)
    }
}

impl From<FinalizeError> for AppError {
    fn from(e: FinalizeError) -> Self {
        AppError::Mesh(e)
    }
}

impl From<ExportError> for AppError {
    fn from(e: ExportError) -> Self {
        AppError::Export(e)
    }
}

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    coordinates: Option<PathBuf>,
    template: Option<String>,
    template_format: Option<TemplateFormat>,
    axis: Option<SliceAxis>,
    slice: Option<f32>,
    level: Option<f32>,
    out_png: Option<String>,
    out_obj: Option<String>,
    out_vertices: Option<String>,
    help: bool,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, AppError> {
        let mut args = args.into_iter();
        let mut cli = CliArgs::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--template" => cli.template = Some(value(&mut args, &arg)?),
                "--template-format" => {
                    let v = value(&mut args, &arg)?;
                    cli.template_format = Some(v.parse().map_err(|_| {
                        AppError::Usage(format!("Invalid --template-format '{}': expected u8 or f32", v))
                    })?);
                }
                "--axis" => {
                    let v = value(&mut args, &arg)?;
                    cli.axis = Some(v.parse().map_err(|_| {
                        AppError::Usage(format!("Invalid --axis '{}': expected sagittal, coronal or axial", v))
                    })?);
                }
                "--slice" => cli.slice = Some(number(&mut args, &arg)?),
                "--level" => cli.level = Some(number(&mut args, &arg)?),
                "--out-png" => cli.out_png = Some(value(&mut args, &arg)?),
                "--out-obj" => cli.out_obj = Some(value(&mut args, &arg)?),
                "--out-vertices" => cli.out_vertices = Some(value(&mut args, &arg)?),
                "--help" | "-h" => cli.help = true,
                other if other.starts_with("--") => {
                    return Err(AppError::Usage(format!("Unknown option '{}'", other)));
                }
                path => {
                    if cli.coordinates.is_some() {
                        return Err(AppError::Usage(format!("Unexpected argument '{}'", path)));
                    }
                    cli.coordinates = Some(PathBuf::from(path));
                }
            }
        }
        Ok(cli)
    }

    /// Layer the flags over the loaded configuration
    fn apply(&self, config: &mut AppConfig) {
        if let Some(template) = &self.template {
            config.slice.template_path = Some(template.clone());
        }
        if let Some(format) = self.template_format {
            config.slice.template_format = format;
        }
        if let Some(axis) = self.axis {
            config.slice.axis = axis;
        }
        if let Some(slice) = self.slice {
            config.slice.position = slice;
        }
        if let Some(level) = self.level {
            config.mesh.relative_level = level;
        }
        if let Some(path) = &self.out_png {
            config.output.slice_png = path.clone();
        }
        if let Some(path) = &self.out_obj {
            config.output.mesh_obj = path.clone();
        }
        if let Some(path) = &self.out_vertices {
            config.output.mesh_vertices = Some(path.clone());
        }
    }
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<String, AppError> {
    args.next()
        .ok_or_else(|| AppError::Usage(format!("Missing value for {}", flag)))
}

fn number<I: Iterator<Item = String>>(args: &mut I, flag: &str) -> Result<f32, AppError> {
    let v = value(args, flag)?;
    v.parse()
        .map_err(|_| AppError::Usage(format!("Invalid number for {}: '{}'", flag, v)))
}

fn print_help() {
    println!("brainmap - density maps of stereotaxic coordinates");
    println!();
    println!("Usage: brainmap <coordinates.json> [options]");
    println!();
    println!("Options:");
    println!("  --template <path>   Raw anatomical template drawn under the slice");
    println!("  --template-format <format>");
    println!("                      Template voxel encoding: u8 or f32 (little-endian)");
    println!("  --axis <axis>       sagittal, coronal or axial");
    println!("  --slice <percent>   Slice position along the axis (0-100)");
    println!("  --level <fraction>  Isosurface threshold as a fraction of the maximum density");
    println!("  --out-png <path>    Composited slice image");
    println!("  --out-obj <path>    Isosurface mesh");
    println!("  --out-vertices <path>");
    println!("                      Flat-shaded vertex stream (position + normal f32s)");
    println!("  -h, --help          Show this help");
}

fn read(path: &Path) -> Result<Vec<u8>, AppError> {
    std::fs::read(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn run(cli: &CliArgs, config: &AppConfig) -> Result<(), AppError> {
    let coordinates = cli
        .coordinates
        .as_ref()
        .ok_or_else(|| AppError::Usage("Missing coordinates file (see --help)".to_string()))?;

    let text = String::from_utf8_lossy(&read(coordinates)?).into_owned();
    let payload = CoordinatesPayload::from_json(&text)?;

    let mut session = ViewerSession::from_config(config);
    let skipped = session.load_payload(&payload).len();
    if skipped > 0 {
        log::warn!("{} malformed coordinates were skipped", skipped);
    }

    if let Some(path) = &config.slice.template_path {
        let bytes = read(Path::new(path))?;
        let format = config.slice.template_format;
        let template = decode_template(bytes, format, session.calibration().template_dims)?;
        log::debug!("Loaded {} template from {}", format, path);
        session.set_template(Some(template));
    }

    session.refresh()?;
    log::info!(
        "{} slice at {}% ({})",
        session.axis(),
        session.position(),
        session.slice_label()
    );
    let stats = session.mesh_stats();
    log::info!(
        "Isosurface: {} vertices, {} triangles ({} degenerate edges)",
        session.mesh().vertex_count(),
        session.mesh().triangle_count(),
        stats.degenerate_edges
    );

    export::save_png(&config.output.slice_png, session.slice())?;
    export::save_obj(&config.output.mesh_obj, session.mesh())?;
    if let Some(path) = &config.output.mesh_vertices {
        export::save_vertex_buffer(path, session.mesh())?;
    }
    Ok(())
}

fn main() {
    let cli = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    if cli.help {
        print_help();
        return;
    }

    // Load configuration
    let (mut config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Initialize logging; RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting brainmap");

    cli.apply(&mut config);
    if let Err(e) = run(&cli, &config) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
