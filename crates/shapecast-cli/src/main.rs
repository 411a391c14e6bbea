//! Shapecast CLI - convert CSV/DXF/DWG files into zipped shapefiles
//!
//! One conversion per invocation: read the input file, build an immutable
//! request, run the pipeline, write `<name>.zip` next to the working
//! directory, and print a preview of the converted records.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use shapecast_core::{CoordinateRef, InputFormat, PreviewRow, CATALOG};
use shapecast_pipeline::{convert, ConvertRequest};
use std::fs;
use std::path::PathBuf;

/// Widest WKT column shown in the preview table.
const PREVIEW_WKT_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum FormatArg {
    /// Tabular input
    Csv,
    /// DXF drawing
    Dxf,
    /// DWG drawing (DXF text content only)
    Dwg,
}

impl From<FormatArg> for InputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => Self::Csv,
            FormatArg::Dxf => Self::Dxf,
            FormatArg::Dwg => Self::Dwg,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shapecast",
    version,
    about = "Convert CSV, DXF or DWG files into zipped shapefile datasets"
)]
struct Args {
    /// Input file (.csv, .dxf or .dwg)
    input: Option<PathBuf>,

    /// Output base name (defaults to the input file stem)
    #[arg(short, long)]
    output: Option<String>,

    /// EPSG code of the coordinate reference written to the .prj sidecars
    #[arg(long, default_value_t = 4326)]
    crs: u32,

    /// Override the format detected from the file extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Also write per-layer GeoJSON files into the archive
    #[arg(long)]
    geojson: bool,

    /// Number of rows shown in the preview table
    #[arg(long, default_value_t = 10)]
    preview: usize,

    /// Only print errors
    #[arg(short, long)]
    quiet: bool,

    /// List the coordinate-reference catalog and exit
    #[arg(long)]
    list_crs: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    run(Args::parse())
}

fn run(args: Args) -> Result<()> {
    if args.list_crs {
        for crs in CATALOG {
            println!("{:<12} {}", crs.code(), crs.label);
        }
        return Ok(());
    }

    let input = args.input.context("no input file given (see --help)")?;
    let crs = CoordinateRef::from_epsg(args.crs)
        .with_context(|| format!("unknown EPSG code {} (see --list-crs)", args.crs))?;

    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("unusable input path {}", input.display()))?
        .to_string();
    let bytes =
        fs::read(&input).with_context(|| format!("cannot read {}", input.display()))?;

    let mut request = ConvertRequest::new(file_name, bytes)?
        .with_crs(crs)
        .with_geojson(args.geojson)
        .with_preview_rows(args.preview);
    if let Some(format) = args.format {
        request = request.with_format(format.into());
    }
    if let Some(output) = &args.output {
        request = request.with_output_name(output);
    }

    let outcome = convert(&request)?;
    let archive_path = PathBuf::from(&outcome.archive_name);
    fs::write(&archive_path, &outcome.archive)
        .with_context(|| format!("cannot write {}", archive_path.display()))?;

    for warning in &outcome.warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    if !args.quiet {
        println!(
            "{} {} ({} records in {} layers, {})",
            "wrote".green().bold(),
            outcome.archive_name,
            outcome.record_count,
            outcome.layer_count,
            request.crs.code()
        );
        print_preview(&outcome.preview);
    }
    Ok(())
}

fn print_preview(rows: &[PreviewRow]) {
    if rows.is_empty() {
        return;
    }
    println!("{:<16} {:<12} geometry", "layer", "type");
    for row in rows {
        let mut wkt = row.wkt.clone();
        if wkt.len() > PREVIEW_WKT_WIDTH {
            wkt.truncate(PREVIEW_WKT_WIDTH - 3);
            wkt.push_str("...");
        }
        println!("{:<16} {:<12} {wkt}", row.layer, row.geometry_type);
    }
}
