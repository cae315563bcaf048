//! Circular region-of-interest statistics over an index map
//!
//! The circle is drawn in a scaled display space; its center and radius
//! are mapped back to full-resolution map coordinates before sampling.

use prismari_core::Band;

/// A circle selected in display-space pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub cx: i32,
    pub cy: i32,
    pub radius: i32,
}

impl Circle {
    pub fn new(cx: i32, cy: i32, radius: i32) -> Self {
        Self { cx, cy, radius }
    }
}

/// Aggregate over the pixels sampled by a circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoiStatistic {
    /// Number of map pixels inside both the circle and the map bounds.
    pub count: usize,
    /// Arithmetic mean of the non-NaN samples; NaN when every sample is NaN.
    pub mean: f64,
}

/// Mean index value inside a circle.
///
/// `scale_factor` is the number of full-resolution pixels per display
/// pixel; the center and radius are each scaled by it and truncated toward
/// zero. A pixel is sampled when its squared distance to the center is at
/// most radius² — the boundary is inclusive, and radius 0 selects exactly
/// the center pixel. Returns `None` when no pixel is sampled: the circle
/// lies entirely outside the map, or the radius is negative. Repeated
/// calls with the same inputs yield the same statistic; the map is never
/// mutated.
pub fn mean_in_circle(
    index: &Band<f32>,
    circle: &Circle,
    scale_factor: f64,
) -> Option<RoiStatistic> {
    let (rows, cols) = index.shape();

    let cx = (circle.cx as f64 * scale_factor) as i64;
    let cy = (circle.cy as f64 * scale_factor) as i64;
    let radius = (circle.radius as f64 * scale_factor) as i64;
    if radius < 0 {
        return None;
    }

    let r_sq = radius * radius;
    let row_lo = (cy - radius).max(0);
    let row_hi = (cy + radius).min(rows as i64 - 1);
    let col_lo = (cx - radius).max(0);
    let col_hi = (cx + radius).min(cols as i64 - 1);

    let mut count = 0usize;
    let mut valid = 0usize;
    let mut sum = 0.0f64;

    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let dx = col - cx;
            let dy = row - cy;
            if dx * dx + dy * dy > r_sq {
                continue;
            }

            count += 1;
            let val = unsafe { index.get_unchecked(row as usize, col as usize) };
            if val.is_nan() {
                continue;
            }

            sum += val as f64;
            valid += 1;
        }
    }

    if count == 0 {
        return None;
    }

    let mean = if valid > 0 { sum / valid as f64 } else { f64::NAN };
    Some(RoiStatistic { count, mean })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_map() -> Band<f32> {
        // 4x4 of 7.0, except (row 0, col 0) = 0.0
        let mut map = Band::filled(4, 4, 7.0);
        map.set(0, 0, 0.0).unwrap();
        map
    }

    #[test]
    fn test_radius_zero_selects_center() {
        let map = make_map();
        let stat = mean_in_circle(&map, &Circle::new(0, 0, 0), 1.0).unwrap();

        assert_eq!(stat.count, 1);
        assert!((stat.mean - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_outside_map_is_empty() {
        let map = make_map();
        let result = mean_in_circle(&map, &Circle::new(10, 10, 1), 1.0);
        assert!(result.is_none());
    }

    #[test]
    fn test_negative_radius_is_empty() {
        let map = make_map();
        let result = mean_in_circle(&map, &Circle::new(2, 2, -1), 1.0);
        assert!(result.is_none());
    }

    #[test]
    fn test_boundary_pixel_included() {
        // Radius 1 around (2, 2): center plus the four axis neighbors,
        // each exactly at distance² = r²
        let map = Band::filled(5, 5, 3.0);
        let stat = mean_in_circle(&map, &Circle::new(2, 2, 1), 1.0).unwrap();

        assert_eq!(stat.count, 5);
        assert!((stat.mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_clipped_at_map_edge() {
        // Radius 1 around the corner: only the corner and its two in-bounds
        // axis neighbors are sampled
        let map = make_map();
        let stat = mean_in_circle(&map, &Circle::new(0, 0, 1), 1.0).unwrap();

        assert_eq!(stat.count, 3);
        // (0.0 + 7.0 + 7.0) / 3
        assert!((stat.mean - 14.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_factor_maps_display_to_full() {
        // Display circle (1, 1, r=0) at scale 2 lands on full-res (2, 2)
        let mut map = Band::filled(5, 5, 1.0);
        map.set(2, 2, 9.0).unwrap();

        let stat = mean_in_circle(&map, &Circle::new(1, 1, 0), 2.0).unwrap();
        assert_eq!(stat.count, 1);
        assert!((stat.mean - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_factor_truncates() {
        // 1 * 1.5 = 1.5 truncates to full-res coordinate 1
        let mut map = Band::filled(4, 4, 0.0);
        map.set(1, 1, 5.0).unwrap();

        let stat = mean_in_circle(&map, &Circle::new(1, 1, 0), 1.5).unwrap();
        assert_eq!(stat.count, 1);
        assert!((stat.mean - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_excluded_from_mean_but_counted() {
        let mut map = Band::filled(3, 3, 4.0);
        map.set(1, 0, f32::NAN).unwrap();

        let stat = mean_in_circle(&map, &Circle::new(1, 1, 1), 1.0).unwrap();
        assert_eq!(stat.count, 5);
        assert!((stat.mean - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_nan_samples_yield_nan_mean() {
        let map = Band::filled(3, 3, f32::NAN);
        let stat = mean_in_circle(&map, &Circle::new(1, 1, 1), 1.0).unwrap();

        assert_eq!(stat.count, 5);
        assert!(stat.mean.is_nan());
    }

    #[test]
    fn test_idempotent() {
        let map = make_map();
        let circle = Circle::new(1, 1, 2);
        let a = mean_in_circle(&map, &circle, 1.0).unwrap();
        let b = mean_in_circle(&map, &circle, 1.0).unwrap();

        assert_eq!(a.count, b.count);
        assert!((a.mean - b.mean).abs() < 1e-15);
    }
}
