//! I/O operations for reading and writing band images

mod native;

pub use native::{
    read_band, read_band_from_buffer, write_band, write_band_to_buffer, write_preview_gray,
    write_preview_rgb,
};
