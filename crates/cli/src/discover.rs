//! Capture folder discovery
//!
//! Bands are located by filename suffix, one file per band, as written by
//! the target sensors: `_MS_G` (green), `_MS_RE` (red edge), `_MS_NIR`
//! (near infrared). Only TIFF files are considered — the decoder reads
//! nothing else.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub const GREEN_SUFFIX: &str = "_MS_G";
pub const RED_EDGE_SUFFIX: &str = "_MS_RE";
pub const NIR_SUFFIX: &str = "_MS_NIR";

const TIFF_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// Paths of the three band files inside a capture folder.
#[derive(Debug, Clone)]
pub struct CapturePaths {
    pub green: PathBuf,
    pub red_edge: PathBuf,
    pub nir: PathBuf,
}

/// Locate all three band files in a capture folder.
pub fn discover_capture(folder: &Path) -> Result<CapturePaths> {
    let green = find_band_file(folder, GREEN_SUFFIX)?;
    let red_edge = find_band_file(folder, RED_EDGE_SUFFIX)?;
    let nir = find_band_file(folder, NIR_SUFFIX)?;
    Ok(CapturePaths {
        green,
        red_edge,
        nir,
    })
}

/// First regular file (by name order) whose name contains `suffix` and
/// whose extension is a TIFF extension, case-insensitive.
fn find_band_file(folder: &Path, suffix: &str) -> Result<PathBuf> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("Cannot read folder {}", folder.display()))?;

    let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
    paths.sort();

    for path in paths {
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.contains(suffix) {
            continue;
        }
        let tiff = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| TIFF_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if tiff {
            return Ok(path);
        }
    }

    bail!(
        "No {} band file (*{}*.tif) found in {}",
        suffix,
        suffix,
        folder.display()
    )
}
