//! CLI for bmpfilter
//!
//! ```bash
//! bmpfilter apply input.bmp output.bmp --filter sepia
//! bmpfilter info input.bmp
//! bmpfilter list
//! ```

mod logging;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};

use bmpfilter::{ImageInfo, Limits, Pipeline, Transform};

#[derive(Parser)]
#[command(
    name = "bmpfilter",
    version,
    about = "Apply a pixel filter to a 24-bit BMP"
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter INPUT into OUTPUT
    Apply {
        /// Source BMP
        input: PathBuf,
        /// Destination BMP (replaced atomically)
        output: PathBuf,
        /// Transform name, see `bmpfilter list`
        #[arg(short, long)]
        filter: String,
        /// Reject images with more pixels than this
        #[arg(long)]
        max_pixels: Option<u64>,
    },
    /// Show header dimensions and row layout
    Info {
        /// Source BMP
        input: PathBuf,
    },
    /// List available transforms
    List,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    let result = match cli.command {
        Commands::Apply {
            input,
            output,
            filter,
            max_pixels,
        } => cmd_apply(&input, &output, &filter, max_pixels),
        Commands::Info { input } => cmd_info(&input),
        Commands::List => {
            cmd_list();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn cmd_apply(
    input: &Path,
    output: &Path,
    filter: &str,
    max_pixels: Option<u64>,
) -> anyhow::Result<()> {
    let mut pipeline = Pipeline::from_name(filter)
        .with_context(|| format!("try one of: {}", catalog_names()))?;
    if max_pixels.is_some() {
        pipeline = pipeline.with_limits(Limits {
            max_pixels,
            ..Default::default()
        });
    }

    let report = pipeline
        .run(input, output)
        .with_context(|| format!("filtering {}", input.display()))?;

    eprintln!(
        "{} {}x{} ({} bytes) -> {} ({} bytes)",
        report.transform,
        report.width,
        report.height,
        report.bytes_read,
        output.display(),
        report.bytes_written,
    );
    Ok(())
}

fn cmd_info(input: &Path) -> anyhow::Result<()> {
    let data = fs::read(input).with_context(|| format!("read {}", input.display()))?;
    let info = ImageInfo::from_bytes(&data)
        .with_context(|| format!("probing {}", input.display()))?;

    println!("BMP Info");
    println!("  File:        {}", input.display());
    println!("  File size:   {} bytes", data.len());
    println!("  Width:       {}", info.width);
    println!("  Height:      {}", info.height);
    println!(
        "  Row order:   {}",
        if info.top_down { "top-down" } else { "bottom-up" }
    );
    println!("  Padding:     {} bytes/row", info.padding);
    println!("  Row stride:  {} bytes", info.row_stride);
    println!("  Pixel data:  {} bytes", info.pixel_data_len);
    if !info.complete {
        println!("  (truncated: pixel data is shorter than declared)");
    }
    Ok(())
}

fn cmd_list() {
    for t in Transform::ALL {
        let kind = if t.is_geometric() { "geometry" } else { "color" };
        let aliases = t.aliases();
        if aliases.is_empty() {
            println!("{:<12} {kind:<8} {}", t.name(), t.description());
        } else {
            println!(
                "{:<12} {kind:<8} {} (also: {})",
                t.name(),
                t.description(),
                aliases.join(", ")
            );
        }
    }
}

fn catalog_names() -> String {
    Transform::ALL
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ")
}
