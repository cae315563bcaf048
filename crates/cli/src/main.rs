//! Prismari CLI - multispectral band alignment and ARI measurement

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use prismari_algorithms::alignment::{AlignmentOffsets, PixelOffset};
use prismari_algorithms::indices::AriParams;
use prismari_algorithms::roi::{mean_in_circle, Circle};
use prismari_algorithms::session::{AlignmentSession, Capture};
use prismari_core::io::{read_band, write_band, write_preview_gray, write_preview_rgb};
use prismari_core::Band;
use prismari_display::{compose_alignment_preview, index_to_gray};

mod discover;
use discover::{discover_capture, CapturePaths};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "prismari")]
#[command(author, version, about = "Multispectral band alignment and ARI measurement", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the capture's band files come from: a folder scanned by suffix,
/// or three explicit paths.
#[derive(Args)]
struct BandArgs {
    /// Capture folder; band files are located by suffix (_MS_G, _MS_RE, _MS_NIR)
    #[arg(long, conflicts_with_all = ["green", "rededge", "nir"])]
    folder: Option<PathBuf>,
    /// Green band file
    #[arg(long)]
    green: Option<PathBuf>,
    /// RedEdge band file
    #[arg(long)]
    rededge: Option<PathBuf>,
    /// NIR band file
    #[arg(long)]
    nir: Option<PathBuf>,
}

#[derive(Args)]
struct OffsetArgs {
    /// RedEdge offset as dx,dy pixels
    #[arg(long = "offset-re", default_value = "0,0", value_parser = parse_offset)]
    offset_re: PixelOffset,
    /// NIR offset as dx,dy pixels
    #[arg(long = "offset-nir", default_value = "0,0", value_parser = parse_offset)]
    offset_nir: PixelOffset,
}

impl OffsetArgs {
    fn to_offsets(&self) -> AlignmentOffsets {
        AlignmentOffsets {
            red_edge: self.offset_re,
            nir: self.offset_nir,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about a band file
    Info {
        /// Input band file
        input: PathBuf,
    },
    /// Compose the false-color alignment preview (R=RedEdge, G=Green, B=NIR)
    Preview {
        #[command(flatten)]
        bands: BandArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Output RGB8 TIFF
        output: PathBuf,
    },
    /// Compute the ARI index map at the given offsets
    Index {
        #[command(flatten)]
        bands: BandArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Output 32-bit float TIFF
        output: PathBuf,
        /// Also write an 8-bit grayscale rendering here
        #[arg(long)]
        display: Option<PathBuf>,
        /// Denominator stabilization epsilon
        #[arg(long, default_value = "1e-6")]
        epsilon: f32,
    },
    /// Mean ARI inside a circular region of interest
    Measure {
        /// Previously computed index map (alternative to band inputs)
        #[arg(long, conflicts_with_all = ["folder", "green", "rededge", "nir"])]
        index: Option<PathBuf>,
        #[command(flatten)]
        bands: BandArgs,
        #[command(flatten)]
        offsets: OffsetArgs,
        /// Circle as cx,cy,r in display-space pixels
        #[arg(long, value_parser = parse_circle)]
        circle: Circle,
        /// Full-resolution pixels per display pixel
        #[arg(long, default_value = "1.0")]
        scale: f64,
        /// Denominator stabilization epsilon
        #[arg(long, default_value = "1e-6")]
        epsilon: f32,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn parse_offset(s: &str) -> Result<PixelOffset, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("Offset must be 'dx,dy', got: {}", s));
    }
    let dx: i32 = parts[0].trim().parse().map_err(|_| "Invalid dx".to_string())?;
    let dy: i32 = parts[1].trim().parse().map_err(|_| "Invalid dy".to_string())?;
    Ok(PixelOffset::new(dx, dy))
}

fn parse_circle(s: &str) -> Result<Circle, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("Circle must be 'cx,cy,r', got: {}", s));
    }
    let cx: i32 = parts[0].trim().parse().map_err(|_| "Invalid cx".to_string())?;
    let cy: i32 = parts[1].trim().parse().map_err(|_| "Invalid cy".to_string())?;
    let r: i32 = parts[2].trim().parse().map_err(|_| "Invalid r".to_string())?;
    Ok(Circle::new(cx, cy, r))
}

fn read_band_f32(path: &PathBuf) -> Result<Band<f32>> {
    let pb = spinner("Reading band...");
    let band: Band<f32> =
        read_band(path).with_context(|| format!("Failed to read band {}", path.display()))?;
    pb.finish_and_clear();
    info!("{}: {} x {}", path.display(), band.cols(), band.rows());
    Ok(band)
}

fn load_capture(args: &BandArgs) -> Result<Capture> {
    let paths = if let Some(folder) = &args.folder {
        discover_capture(folder)?
    } else {
        match (&args.green, &args.rededge, &args.nir) {
            (Some(g), Some(re), Some(n)) => CapturePaths {
                green: g.clone(),
                red_edge: re.clone(),
                nir: n.clone(),
            },
            _ => anyhow::bail!("Provide --folder or all of --green, --rededge and --nir"),
        }
    };

    let green = read_band_f32(&paths.green)?;
    let red_edge = read_band_f32(&paths.red_edge)?;
    let nir = read_band_f32(&paths.nir)?;

    Capture::new(green, red_edge, nir).context("Band shapes do not match")
}

fn done(name: &str, path: &PathBuf, elapsed: std::time::Duration) {
    println!("{} saved to: {}", name, path.display());
    println!("  Processing time: {:.2?}", elapsed);
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Info ─────────────────────────────────────────────────────
        Commands::Info { input } => {
            let band = read_band_f32(&input)?;
            let (rows, cols) = band.shape();
            let stats = band.statistics();

            println!("File: {}", input.display());
            println!("Dimensions: {} x {} ({} cells)", cols, rows, band.len());
            if let Some(nodata) = band.nodata() {
                println!("NoData: {}", nodata);
            }
            println!("\nStatistics:");
            if let Some(min) = stats.min {
                println!("  Min: {:.4}", min);
            }
            if let Some(max) = stats.max {
                println!("  Max: {:.4}", max);
            }
            if let Some(mean) = stats.mean {
                println!("  Mean: {:.4}", mean);
            }
            println!(
                "  Valid cells: {} ({:.1}%)",
                stats.valid_count,
                100.0 * stats.valid_count as f64 / band.len() as f64
            );
        }

        // ── Preview ──────────────────────────────────────────────────
        Commands::Preview {
            bands,
            offsets,
            output,
        } => {
            let capture = load_capture(&bands)?;
            let session = AlignmentSession::with_offsets(capture, offsets.to_offsets());

            let start = Instant::now();
            let aligned = session.aligned_bands()?;
            let preview =
                compose_alignment_preview(&aligned.green, &aligned.red_edge, &aligned.nir)
                    .context("Failed to compose preview")?;
            let elapsed = start.elapsed();

            let pb = spinner("Writing output...");
            write_preview_rgb(preview.rows, preview.cols, &preview.pixels, &output)
                .context("Failed to write preview")?;
            pb.finish_and_clear();
            done("Alignment preview", &output, elapsed);
        }

        // ── Index ────────────────────────────────────────────────────
        Commands::Index {
            bands,
            offsets,
            output,
            display,
            epsilon,
        } => {
            let capture = load_capture(&bands)?;
            let mut session = AlignmentSession::with_offsets(capture, offsets.to_offsets());

            let start = Instant::now();
            let map = session
                .compute_index(AriParams { epsilon })
                .context("Failed to compute ARI")?
                .clone();
            let elapsed = start.elapsed();

            let pb = spinner("Writing output...");
            write_band(&map, &output).context("Failed to write index map")?;
            pb.finish_and_clear();

            if let Some(display_path) = display {
                let gray = index_to_gray(&map);
                write_preview_gray(gray.rows, gray.cols, &gray.pixels, &display_path)
                    .context("Failed to write display rendering")?;
                println!("Display rendering saved to: {}", display_path.display());
            }
            done("ARI map", &output, elapsed);
        }

        // ── Measure ──────────────────────────────────────────────────
        Commands::Measure {
            index,
            bands,
            offsets,
            circle,
            scale,
            epsilon,
        } => {
            let map = match index {
                Some(path) => read_band_f32(&path)?,
                None => {
                    let capture = load_capture(&bands)?;
                    let mut session =
                        AlignmentSession::with_offsets(capture, offsets.to_offsets());
                    session
                        .compute_index(AriParams { epsilon })
                        .context("Failed to compute ARI")?
                        .clone()
                }
            };

            match mean_in_circle(&map, &circle, scale) {
                Some(stat) => {
                    println!("Pixels sampled: {}", stat.count);
                    println!("Average ARI in circle: {:.4}", stat.mean);
                }
                None => anyhow::bail!("Selection matches no pixels in the index map"),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("3,-2").unwrap(), PixelOffset::new(3, -2));
        assert_eq!(parse_offset(" 0 , 0 ").unwrap(), PixelOffset::new(0, 0));
        assert!(parse_offset("3").is_err());
        assert!(parse_offset("a,b").is_err());
    }

    #[test]
    fn test_parse_circle() {
        assert_eq!(parse_circle("10,20,5").unwrap(), Circle::new(10, 20, 5));
        assert!(parse_circle("10,20").is_err());
        assert!(parse_circle("x,y,r").is_err());
    }

    #[test]
    fn test_cli_parses() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
