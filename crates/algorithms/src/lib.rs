//! # Prismari Algorithms
//!
//! Alignment and measurement algorithms for Prismari.
//!
//! ## Available Algorithm Categories
//!
//! - **alignment**: circular band shifts and per-band offset state
//! - **indices**: the ARI reflectance index
//! - **roi**: circular region-of-interest statistics
//! - **session**: capture validation and the alignment workflow state

pub mod alignment;
pub mod indices;
pub mod roi;
pub mod session;

mod maybe_rayon;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::alignment::{
        circular_shift, AlignmentOffsets, OffsetAxis, OffsetEvent, OffsetTarget, PixelOffset,
    };
    pub use crate::indices::{ari, AriParams};
    pub use crate::roi::{mean_in_circle, Circle, RoiStatistic};
    pub use crate::session::{AlignedBands, AlignmentSession, Capture};
    pub use prismari_core::prelude::*;
}
