//! Kvadrat: the smallest SVG for a pixel image.
//!
//! Kvadrat traces every color of a raster image into merged outlines and
//! writes each outline with whichever SVG element spells it shortest
//! (`<rect>`, `<polygon>`, or `<path>` when it has holes).
//!
//! # Modules
//!
//! - [`raster`]: Colors, pixel grids and image decoding
//! - [`partition`]: Grouping pixels by exact color
//! - [`geometry`]: Rings, regions and the polygon-algebra kernel
//! - [`region`]: Merging a color's pixels into regions
//! - [`canonical`]: Order-independent ring representation
//! - [`shape`]: Choosing the most compact element per region
//! - [`document`]: The typed output tree
//! - [`path`]: Path data parsing and normalization
//! - [`svg`]: Markup writer
//! - [`convert`]: The pipeline driver
//! - [`error`]: Error types for kvadrat operations

pub mod canonical;
pub mod convert;
pub mod document;
pub mod error;
pub mod geometry;
pub mod number;
pub mod partition;
pub mod path;
pub mod raster;
pub mod region;
pub mod shape;
pub mod svg;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::info;

pub use convert::{convert, ConversionReport, ConvertOptions};
pub use document::{Document, Element};
pub use error::KvadratError;
pub use raster::{Color, Coordinate, PixelGrid};

/// The kvadrat CLI application.
#[derive(Parser)]
#[command(name = "kvadrat")]
#[command(version, about)]
struct Cli {
    /// Input image (PNG, JPEG, GIF or BMP). Reads stdin when omitted or '-'.
    input: Option<PathBuf>,

    /// Output file. Writes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Simplification tolerance in pixels.
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// Number of worker threads used to process colors.
    #[arg(long, env = "KVADRAT_WORKERS", default_value_t = 1)]
    workers: usize,

    /// Print a conversion report to stderr.
    #[arg(long)]
    report: bool,
}

/// Output formats for the converted document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Compact SVG markup.
    Svg,
    /// The typed document tree as JSON.
    Json,
}

/// Run the kvadrat CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), KvadratError> {
    let cli = Cli::parse();

    let grid = read_input(cli.input.as_deref())?;
    let options = ConvertOptions::with_tolerance(cli.tolerance).workers(cli.workers);
    let document = convert(&grid, &options)?;

    let rendered = match cli.format {
        OutputFormat::Svg => svg::to_svg_string(&document),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&document)?;
            json.push('\n');
            json
        }
    };
    write_output(cli.output.as_deref(), &rendered)?;

    if cli.report {
        eprintln!("Conversion report:");
        eprint!("{}", ConversionReport::new(&grid, &document));
    }
    Ok(())
}

fn read_input(input: Option<&Path>) -> Result<PixelGrid, KvadratError> {
    match input {
        Some(path) if path != Path::new("-") => {
            info!("reading {}", path.display());
            raster::load_image(path)
        }
        _ => {
            info!("reading image from stdin");
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            raster::decode_image(&bytes)
        }
    }
}

fn write_output(output: Option<&Path>, rendered: &str) -> Result<(), KvadratError> {
    match output {
        Some(path) => {
            fs::write(path, rendered)?;
            info!("wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
