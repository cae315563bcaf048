//! Capture validation and the alignment workflow state
//!
//! The driving layer walks the workflow
//! loaded → aligning → index computed → ROI queried. The session holds the
//! loaded capture, the current offsets and the last computed index map.
//! Any offset mutation drops the cached map, so a stale index can never be
//! measured; recomputing it is an explicit call.

use crate::alignment::{
    circular_shift, AlignmentOffsets, OffsetAxis, OffsetEvent, OffsetTarget,
};
use crate::indices::{ari, AriParams};
use prismari_core::{Band, Error, Result};

/// A loaded capture: three equal-shaped reflectance bands.
///
/// Shape equality is validated at construction; downstream code can rely
/// on it.
#[derive(Debug, Clone)]
pub struct Capture {
    green: Band<f32>,
    red_edge: Band<f32>,
    nir: Band<f32>,
}

impl Capture {
    pub fn new(green: Band<f32>, red_edge: Band<f32>, nir: Band<f32>) -> Result<Self> {
        for band in [&red_edge, &nir] {
            if band.shape() != green.shape() {
                return Err(Error::ShapeMismatch {
                    er: green.rows(),
                    ec: green.cols(),
                    ar: band.rows(),
                    ac: band.cols(),
                });
            }
        }
        Ok(Self {
            green,
            red_edge,
            nir,
        })
    }

    /// Dimensions shared by all three bands, as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.green.shape()
    }

    pub fn green(&self) -> &Band<f32> {
        &self.green
    }

    pub fn red_edge(&self) -> &Band<f32> {
        &self.red_edge
    }

    pub fn nir(&self) -> &Band<f32> {
        &self.nir
    }
}

/// The band triple with the current offsets applied.
///
/// Ephemeral: recomputed from the capture and offsets on every request,
/// never cached across offset changes.
#[derive(Debug, Clone)]
pub struct AlignedBands {
    pub green: Band<f32>,
    pub red_edge: Band<f32>,
    pub nir: Band<f32>,
}

/// Workflow state for one capture.
#[derive(Debug, Clone)]
pub struct AlignmentSession {
    capture: Capture,
    offsets: AlignmentOffsets,
    index: Option<Band<f32>>,
}

impl AlignmentSession {
    pub fn new(capture: Capture) -> Self {
        Self::with_offsets(capture, AlignmentOffsets::new())
    }

    pub fn with_offsets(capture: Capture, offsets: AlignmentOffsets) -> Self {
        Self {
            capture,
            offsets,
            index: None,
        }
    }

    pub fn capture(&self) -> &Capture {
        &self.capture
    }

    pub fn offsets(&self) -> AlignmentOffsets {
        self.offsets
    }

    /// Apply a discrete adjustment event; drops any cached index map.
    pub fn apply(&mut self, event: OffsetEvent) {
        self.offsets.apply(event);
        self.index = None;
    }

    /// Move one offset by a signed step; drops any cached index map.
    pub fn nudge(&mut self, target: OffsetTarget, axis: OffsetAxis, delta: i32) {
        self.offsets.nudge(target, axis, delta);
        self.index = None;
    }

    /// Zero both offsets; drops any cached index map.
    pub fn reset_offsets(&mut self) {
        self.offsets.reset();
        self.index = None;
    }

    /// Recompute the aligned triple from scratch at the current offsets.
    ///
    /// The result depends only on the current offset values, not on the
    /// sequence of adjustments that produced them.
    pub fn aligned_bands(&self) -> Result<AlignedBands> {
        let red_edge = circular_shift(
            &self.capture.red_edge,
            self.offsets.red_edge.dx,
            self.offsets.red_edge.dy,
        )?;
        let nir = circular_shift(&self.capture.nir, self.offsets.nir.dx, self.offsets.nir.dy)?;
        Ok(AlignedBands {
            green: self.capture.green.clone(),
            red_edge,
            nir,
        })
    }

    /// Compute the index map at the current offsets and cache it.
    pub fn compute_index(&mut self, params: AriParams) -> Result<&Band<f32>> {
        let aligned = self.aligned_bands()?;
        let map = ari(&aligned.green, &aligned.red_edge, &aligned.nir, params)?;
        Ok(self.index.insert(map))
    }

    /// The cached index map, if one was computed at the current offsets.
    pub fn index(&self) -> Option<&Band<f32>> {
        self.index.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_capture() -> Capture {
        let data: Vec<f32> = (0..16).map(|i| 0.1 + i as f32 * 0.05).collect();
        let green = Band::from_vec(data.clone(), 4, 4).unwrap();
        let red_edge = Band::from_vec(data.iter().map(|v| v * 2.0).collect(), 4, 4).unwrap();
        let nir = Band::from_vec(data.iter().map(|v| v * 3.0).collect(), 4, 4).unwrap();
        Capture::new(green, red_edge, nir).unwrap()
    }

    #[test]
    fn test_capture_rejects_shape_mismatch() {
        let green: Band<f32> = Band::new(4, 4);
        let red_edge: Band<f32> = Band::new(4, 4);
        let nir: Band<f32> = Band::new(4, 5);

        assert!(Capture::new(green, red_edge, nir).is_err());
    }

    #[test]
    fn test_offset_change_invalidates_index() {
        let mut session = AlignmentSession::new(make_capture());
        session.compute_index(AriParams::default()).unwrap();
        assert!(session.index().is_some());

        session.nudge(OffsetTarget::RedEdge, OffsetAxis::X, 1);
        assert!(session.index().is_none());
    }

    #[test]
    fn test_reset_invalidates_index() {
        let mut session = AlignmentSession::new(make_capture());
        session.compute_index(AriParams::default()).unwrap();
        session.reset_offsets();
        assert!(session.index().is_none());
    }

    #[test]
    fn test_event_sequence_equivalence() {
        // A chain of unit deltas and a single jump to the same offsets
        // must produce identical index maps
        let mut stepped = AlignmentSession::new(make_capture());
        for _ in 0..3 {
            stepped.nudge(OffsetTarget::RedEdge, OffsetAxis::X, 1);
        }
        stepped.nudge(OffsetTarget::RedEdge, OffsetAxis::X, -1);
        stepped.nudge(OffsetTarget::Nir, OffsetAxis::Y, 1);

        let mut offsets = AlignmentOffsets::new();
        offsets.red_edge.dx = 2;
        offsets.nir.dy = 1;
        let mut direct = AlignmentSession::with_offsets(make_capture(), offsets);

        let a = stepped.compute_index(AriParams::default()).unwrap().clone();
        let b = direct.compute_index(AriParams::default()).unwrap().clone();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_aligned_bands_leave_green_unshifted() {
        let capture = make_capture();
        let mut offsets = AlignmentOffsets::new();
        offsets.red_edge = crate::alignment::PixelOffset::new(1, 1);
        offsets.nir = crate::alignment::PixelOffset::new(-1, 0);

        let session = AlignmentSession::with_offsets(capture.clone(), offsets);
        let aligned = session.aligned_bands().unwrap();

        assert_eq!(aligned.green.data(), capture.green().data());
        assert_ne!(aligned.red_edge.data(), capture.red_edge().data());
        assert_ne!(aligned.nir.data(), capture.nir().data());
    }
}
