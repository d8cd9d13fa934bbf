//! Color type and hex parsing
//!
//! Everything in the sampling pipeline works on plain 8-bit sRGB triples;
//! alpha is dropped at the pixel extraction boundary.

mod error;
mod rgb;

pub use error::ParseColorError;
pub use rgb::Rgb;
