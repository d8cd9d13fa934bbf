//! Session collections: the bounded sample buffer and the working palette.

mod palette_store;
mod sample_buffer;

pub use palette_store::PaletteStore;
pub use sample_buffer::{SampleBuffer, DEFAULT_CAPACITY, LIGHTWEIGHT_CAPACITY};
