//! Swatchpick - color sampling from images
//!
//! Command-line front end for `swatch-core`: loads PNG images and reference
//! charts, samples colors and replays recorded interaction scripts.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
