//! Circular (wrap-around) band translation
//!
//! Content that exits one edge re-enters at the opposite edge; nothing is
//! cropped or zero-filled. This approximates a rigid translation well for
//! offsets of a few pixels relative to the image size; it is not an exact
//! registration.

use crate::maybe_rayon::*;
use ndarray::Array2;
use prismari_core::{Band, Error, Result};

/// Shift a band by `dx` columns and `dy` rows with wrap-around.
///
/// `out[r][c] = in[(r - dy) mod rows][(c - dx) mod cols]`: positive `dy`
/// moves content toward higher row indices, positive `dx` toward higher
/// column indices. The row and column shifts are applied independently, so
/// their order does not matter, and shifting by any multiple of a dimension
/// is the identity. Offsets of arbitrary sign and magnitude are accepted.
///
/// # Arguments
/// * `band` - Input band
/// * `dx` - Column-axis shift in pixels
/// * `dy` - Row-axis shift in pixels
pub fn circular_shift(band: &Band<f32>, dx: i32, dy: i32) -> Result<Band<f32>> {
    let (rows, cols) = band.shape();
    if rows == 0 || cols == 0 {
        return Ok(band.clone());
    }

    let dy = dy.rem_euclid(rows as i32) as usize;
    let dx = dx.rem_euclid(cols as i32) as usize;

    let data: Vec<f32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let src_row = (row + rows - dy) % rows;
            let mut row_data = vec![0.0f32; cols];
            for col in 0..cols {
                let src_col = (col + cols - dx) % cols;
                row_data[col] = unsafe { band.get_unchecked(src_row, src_col) };
            }
            row_data
        })
        .collect();

    let mut output = band.like(0.0);
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    Ok(output)
}
