//! Native TIFF reading/writing for single-band images
//!
//! Uses the `tiff` crate. Each band of a capture lives in its own
//! single-channel file, as written by the target sensors; multi-band
//! container formats are not handled here.

use crate::band::Band;
use crate::element::BandElement;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::Cursor;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray32Float, Gray8, RGB8};
use tiff::encoder::TiffEncoder;

/// Read a single-band TIFF file into a Band
pub fn read_band<T, P>(path: P) -> Result<Band<T>>
where
    T: BandElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    decode_band(file)
}

/// Read a single-band TIFF from an in-memory buffer into a Band
///
/// Same as `read_band` but operates on a byte slice instead of a file path.
pub fn read_band_from_buffer<T>(data: &[u8]) -> Result<Band<T>>
where
    T: BandElement,
{
    let cursor = Cursor::new(data);
    decode_band(cursor)
}

/// Internal: decode a TIFF from any `Read + Seek` source
fn decode_band<T, R>(reader: R) -> Result<Band<T>>
where
    T: BandElement,
    R: std::io::Read + std::io::Seek,
{
    let mut decoder =
        Decoder::new(reader).map_err(|e| Error::Other(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Other(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    // Read image data
    let result = decoder
        .read_image()
        .map_err(|e| Error::Other(format!("Cannot read image data: {}", e)))?;

    let data: Vec<T> = match result {
        DecodingResult::F32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::F64(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U8(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U16(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::U32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I8(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I16(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        DecodingResult::I32(buf) => buf
            .iter()
            .map(|&v| num_traits::cast(v).unwrap_or(T::default_nodata()))
            .collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    Band::from_vec(data, rows, cols)
}

/// Write a Band to a single-channel TIFF file
///
/// Samples are written as 32-bit float regardless of the band's element type.
pub fn write_band<T, P>(band: &Band<T>, path: P) -> Result<()>
where
    T: BandElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    encode_band(band, file)
}

/// Write a Band to an in-memory TIFF buffer
///
/// Same as `write_band` but returns a `Vec<u8>` instead of writing to a file.
pub fn write_band_to_buffer<T>(band: &Band<T>) -> Result<Vec<u8>>
where
    T: BandElement,
{
    let mut buf = Vec::new();
    encode_band(band, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Internal: encode a Band as Gray32Float TIFF into any `Write + Seek` sink
fn encode_band<T, W>(band: &Band<T>, writer: W) -> Result<()>
where
    T: BandElement,
    W: std::io::Write + std::io::Seek,
{
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = band.shape();

    // Convert data to f32
    let data: Vec<f32> = band
        .data()
        .iter()
        .map(|&v| num_traits::cast(v).unwrap_or(f32::NAN))
        .collect();

    encoder
        .write_image::<Gray32Float>(cols as u32, rows as u32, &data)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

/// Write an 8-bit single-channel preview buffer as a Gray8 TIFF
///
/// `pixels` must hold `rows * cols` bytes in row-major order.
pub fn write_preview_gray<P>(rows: usize, cols: usize, pixels: &[u8], path: P) -> Result<()>
where
    P: AsRef<Path>,
{
    if pixels.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let file = File::create(path.as_ref())?;
    let mut encoder =
        TiffEncoder::new(file).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    encoder
        .write_image::<Gray8>(cols as u32, rows as u32, pixels)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

/// Write an 8-bit interleaved RGB preview buffer as an RGB8 TIFF
///
/// `pixels` must hold `rows * cols * 3` bytes in row-major order.
pub fn write_preview_rgb<P>(rows: usize, cols: usize, pixels: &[u8], path: P) -> Result<()>
where
    P: AsRef<Path>,
{
    if pixels.len() != rows * cols * 3 {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let file = File::create(path.as_ref())?;
    let mut encoder =
        TiffEncoder::new(file).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    encoder
        .write_image::<RGB8>(cols as u32, rows as u32, pixels)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}
