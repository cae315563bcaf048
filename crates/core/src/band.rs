//! Single-channel band grid

use crate::element::BandElement;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2, ArrayViewMut2};

/// A single-channel 2-D image band.
///
/// `Band<T>` stores reflectance samples of type `T` in row-major (row, col)
/// order, with an optional no-data value. Bands belonging to one capture
/// must share the same dimensions.
///
/// # Type Parameters
///
/// - `T`: The cell value type, must implement [`BandElement`]
///
/// # Example
///
/// ```ignore
/// use prismari_core::Band;
///
/// // Create a 100x100 band filled with zeros
/// let mut band: Band<f32> = Band::new(100, 100);
///
/// // Set a value
/// band.set(10, 20, 0.42)?;
///
/// // Get a value
/// let value = band.get(10, 20)?;
/// ```
#[derive(Debug, Clone)]
pub struct Band<T: BandElement> {
    /// Samples stored in row-major order (row, col)
    data: Array2<T>,
    /// No-data value
    nodata: Option<T>,
}

impl<T: BandElement> Band<T> {
    /// Create a new band filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            data: Array2::zeros((rows, cols)),
            nodata: None,
        }
    }

    /// Create a new band filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((rows, cols), value),
            nodata: None,
        }
    }

    /// Create a band from existing data
    pub fn from_vec(data: Vec<T>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self {
            data: array,
            nodata: None,
        })
    }

    /// Create a band from an ndarray
    pub fn from_array(data: Array2<T>) -> Self {
        Self { data, nodata: None }
    }

    /// Create a band with the same dimensions and no-data value, filled
    /// with `fill_value`
    pub fn like(&self, fill_value: T) -> Self {
        Self {
            data: Array2::from_elem(self.data.dim(), fill_value),
            nodata: self.nodata,
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the band is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Set value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn set_unchecked(&mut self, row: usize, col: usize, value: T) {
        unsafe {
            *self.data.uget_mut((row, col)) = value;
        }
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, T> {
        self.data.view()
    }

    /// Get a mutable view of the underlying data
    pub fn view_mut(&mut self) -> ArrayViewMut2<'_, T> {
        self.data.view_mut()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the band and return the underlying array
    pub fn into_array(self) -> Array2<T> {
        self.data
    }

    // Metadata

    /// Get the no-data value
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }

    /// Set the no-data value
    pub fn set_nodata(&mut self, nodata: Option<T>) {
        self.nodata = nodata;
    }

    /// Check if a value is no-data
    pub fn is_nodata(&self, value: T) -> bool {
        value.is_nodata(self.nodata)
    }

    // Statistics

    /// Calculate basic statistics (min, max, mean, count of valid cells)
    pub fn statistics(&self) -> BandStatistics<T> {
        let mut min = None;
        let mut max = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if self.is_nodata(value) {
                continue;
            }

            if min.is_none() || value < min.unwrap() {
                min = Some(value);
            }
            if max.is_none() || value > max.unwrap() {
                max = Some(value);
            }

            if let Some(v) = value.to_f64() {
                sum += v;
                count += 1;
            }
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        BandStatistics {
            min,
            max,
            mean,
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Basic statistics for a band
#[derive(Debug, Clone)]
pub struct BandStatistics<T> {
    pub min: Option<T>,
    pub max: Option<T>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_creation() {
        let band: Band<f32> = Band::new(100, 200);
        assert_eq!(band.rows(), 100);
        assert_eq!(band.cols(), 200);
        assert_eq!(band.shape(), (100, 200));
    }

    #[test]
    fn test_band_access() {
        let mut band: Band<f32> = Band::new(10, 10);
        band.set(5, 5, 0.42).unwrap();
        assert_eq!(band.get(5, 5).unwrap(), 0.42);
    }

    #[test]
    fn test_band_out_of_bounds() {
        let band: Band<f32> = Band::new(4, 4);
        assert!(band.get(4, 0).is_err());
        assert!(band.get(0, 4).is_err());
    }

    #[test]
    fn test_band_from_vec_wrong_len() {
        let result: Result<Band<f32>> = Band::from_vec(vec![0.0; 5], 2, 3);
        assert!(result.is_err());
    }

    #[test]
    fn test_band_statistics() {
        let mut band: Band<f32> = Band::new(10, 10);
        for i in 0..10 {
            for j in 0..10 {
                band.set(i, j, (i * 10 + j) as f32).unwrap();
            }
        }

        let stats = band.statistics();
        assert_eq!(stats.min, Some(0.0));
        assert_eq!(stats.max, Some(99.0));
        assert_eq!(stats.valid_count, 100);
    }

    #[test]
    fn test_band_statistics_skip_nan() {
        let mut band: Band<f32> = Band::filled(3, 3, 5.0);
        band.set(1, 1, f32::NAN).unwrap();

        let stats = band.statistics();
        assert_eq!(stats.valid_count, 8);
        assert!((stats.mean.unwrap() - 5.0).abs() < 1e-10);
    }
}
