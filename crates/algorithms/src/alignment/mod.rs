//! Band alignment
//!
//! Manual co-registration of the movable bands against the green reference:
//! - Circular shift: wrap-around integer translation of one band
//! - Offset state: per-band (dx, dy) displacements and the discrete
//!   nudge events that adjust them

mod offsets;
mod shift;

pub use offsets::{AlignmentOffsets, OffsetAxis, OffsetEvent, OffsetTarget, PixelOffset};
pub use shift::circular_shift;
