//! The ARI reflectance index
//!
//! An anthocyanin-style reciprocal-difference index computed from aligned
//! Green, RedEdge and NIR reflectance:
//!
//! `ARI = (1/(Green + eps) - 1/(RedEdge + eps)) * NIR`
//!
//! Computed on raw reflectance values, never on display-normalized ones.
//! Near-zero reflectance produces large magnitudes; the epsilon bounds the
//! denominators but the output is deliberately left unclipped.

use crate::maybe_rayon::*;
use ndarray::Array2;
use prismari_core::{Band, Error, Result};

/// Parameters for [`ari`]
#[derive(Debug, Clone, Copy)]
pub struct AriParams {
    /// Added to both denominators to bound them away from zero.
    /// Does not clip or otherwise sanitize the output.
    /// Default: 1e-6
    pub epsilon: f32,
}

impl Default for AriParams {
    fn default() -> Self {
        Self { epsilon: 1e-6 }
    }
}

/// Compute the ARI map from the unshifted green band and the already
/// aligned red-edge and NIR bands.
///
/// All three bands must share one shape. NaN in any input propagates to
/// NaN at that pixel; no other sanitization is applied.
///
/// # Arguments
/// * `green` - Green band (unshifted reference)
/// * `red_edge` - Red edge band, shifted by its alignment offset
/// * `nir` - Near-infrared band, shifted by its alignment offset
/// * `params` - Denominator stabilization epsilon
pub fn ari(
    green: &Band<f32>,
    red_edge: &Band<f32>,
    nir: &Band<f32>,
    params: AriParams,
) -> Result<Band<f32>> {
    check_dimensions(green, red_edge)?;
    check_dimensions(green, nir)?;

    let (rows, cols) = green.shape();
    let eps = params.epsilon;

    let data: Vec<f32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f32::NAN; cols];
            for col in 0..cols {
                let g = unsafe { green.get_unchecked(row, col) };
                let re = unsafe { red_edge.get_unchecked(row, col) };
                let n = unsafe { nir.get_unchecked(row, col) };

                row_data[col] = (1.0 / (g + eps) - 1.0 / (re + eps)) * n;
            }
            row_data
        })
        .collect();

    let mut output = green.like(f32::NAN);
    output.set_nodata(Some(f32::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;
    Ok(output)
}

fn check_dimensions(a: &Band<f32>, b: &Band<f32>) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            er: a.rows(),
            ec: a.cols(),
            ar: b.rows(),
            ac: b.cols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_band(rows: usize, cols: usize, value: f32) -> Band<f32> {
        Band::filled(rows, cols, value)
    }

    #[test]
    fn test_formula_literal() {
        // (1/1 - 1/2) * 10 = 5.0 for every pixel, epsilon negligible
        let green = make_band(2, 2, 1.0);
        let red_edge = make_band(2, 2, 2.0);
        let nir = make_band(2, 2, 10.0);

        let result = ari(&green, &red_edge, &nir, AriParams::default()).unwrap();

        for row in 0..2 {
            for col in 0..2 {
                let val = result.get(row, col).unwrap();
                assert!((val - 5.0).abs() < 1e-4, "Expected 5.0, got {}", val);
            }
        }
    }

    #[test]
    fn test_equal_green_rededge_vanishes() {
        // Equal denominators cancel regardless of NIR
        let green = make_band(4, 4, 0.3);
        let red_edge = make_band(4, 4, 0.3);
        let nir = make_band(4, 4, 1234.0);

        let result = ari(&green, &red_edge, &nir, AriParams::default()).unwrap();
        let val = result.get(2, 2).unwrap();

        assert!(val.abs() < 1e-3, "Expected ~0, got {}", val);
    }

    #[test]
    fn test_epsilon_bounds_zero_denominator() {
        let green = make_band(2, 2, 0.0);
        let red_edge = make_band(2, 2, 0.5);
        let nir = make_band(2, 2, 1.0);

        let result = ari(&green, &red_edge, &nir, AriParams::default()).unwrap();
        let val = result.get(0, 0).unwrap();

        // Large but finite: 1/eps dominates
        assert!(val.is_finite(), "Expected finite value, got {}", val);
        assert!(val > 1e5, "Expected large magnitude, got {}", val);
    }

    #[test]
    fn test_output_not_clipped() {
        let green = make_band(1, 2, 1e-5);
        let red_edge = make_band(1, 2, 0.9);
        let nir = make_band(1, 2, 0.8);

        let result = ari(&green, &red_edge, &nir, AriParams::default()).unwrap();
        let val = result.get(0, 0).unwrap();

        let eps = 1e-6f32;
        let expected = (1.0 / (1e-5 + eps) - 1.0 / (0.9 + eps)) * 0.8;
        assert!(
            (val - expected).abs() / expected.abs() < 1e-5,
            "Expected {}, got {}",
            expected,
            val
        );
    }

    #[test]
    fn test_nan_propagates() {
        let mut green = make_band(3, 3, 1.0);
        green.set(1, 1, f32::NAN).unwrap();
        let red_edge = make_band(3, 3, 2.0);
        let nir = make_band(3, 3, 1.0);

        let result = ari(&green, &red_edge, &nir, AriParams::default()).unwrap();

        assert!(result.get(1, 1).unwrap().is_nan());
        assert!(!result.get(0, 0).unwrap().is_nan());
    }

    #[test]
    fn test_dimension_mismatch() {
        let green = make_band(4, 4, 1.0);
        let red_edge = make_band(4, 5, 1.0);
        let nir = make_band(4, 4, 1.0);

        let result = ari(&green, &red_edge, &nir, AriParams::default());
        assert!(result.is_err(), "Should fail on shape mismatch");
    }
}
