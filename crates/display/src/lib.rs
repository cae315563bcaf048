//! # Prismari Display
//!
//! 8-bit rendering for human judgment: the false-color alignment preview
//! and the grayscale index display. Both are derived artifacts — nothing
//! produced here feeds back into index computation.

mod preview;

pub use preview::{
    compose_alignment_preview, index_to_gray, PreviewGray, PreviewRgb, INDEX_RANGE_EPS,
    JOINT_RANGE_EPS,
};
