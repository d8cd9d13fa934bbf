//! swatch-core: color sampling engine for image swatch pickers
//!
//! This library turns a user's click or drag over a zoomed, panned image
//! into one representative color, optionally snapped to a fixed reference
//! chart, and collects the results into a working palette. It performs no
//! I/O and never touches rendering: a host application feeds it interaction
//! events and pixel access, and displays what comes back.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use swatch_core::{ReferenceChart, Rgb, RgbaImage, SamplerSession, ScreenRect};
//!
//! let chart = ReferenceChart::builder()
//!     .entry("A", Rgb::new(255, 0, 0))
//!     .entry("B", Rgb::new(0, 255, 0))
//!     .build();
//! let mut session = SamplerSession::new(Arc::new(chart));
//!
//! let image = RgbaImage::filled(4, 4, [200, 10, 10, 255]).unwrap();
//! let color = session.on_region_selected(ScreenRect::new(0.0, 0.0, 4.0, 4.0), &image);
//! assert_eq!(color, Some(Rgb::new(200, 10, 10)));
//!
//! session.on_quantize_requested();
//! assert_eq!(session.current_aggregate(), Some(Rgb::new(255, 0, 0)));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! screen rect ──> Viewport ──> image rect ──> extract ──> colors
//!                  (zoom, pan)    (clamped)     (alpha dropped)
//!                                                     │
//!                                               aggregate (median/MAD)
//!                                                     │
//!                                                     v
//!        PaletteStore <── commit <── aggregate <── SampleBuffer (FIFO, capacity C)
//!                                                     │
//!                                        quantize ────┘ (ReferenceChart::snap)
//! ```
//!
//! # Robust Aggregation
//!
//! A drag across a swatch on a scanned chart usually catches a few
//! background or anti-aliased edge pixels. [`aggregate()`] discards any
//! color with a channel more than four median absolute deviations from that
//! channel's median, then averages the rest. [`mean()`] is the cheap
//! alternative for small buffers; [`AggregateMode`] selects between them.

pub mod aggregate;
pub mod api;
pub mod chart;
pub mod color;
pub mod extract;
pub mod store;
pub mod viewport;

#[cfg(test)]
mod domain_tests;

pub use aggregate::{aggregate, mean, AggregateMode};
pub use api::{SampleError, SamplerSession, ScreenRect};
pub use chart::{Anchors, ChartBuilder, ChartEntry, ChartMatch, ReferenceChart};
pub use color::{ParseColorError, Rgb};
pub use extract::{extract_point, extract_rect, PixelRect, PixelSource, RgbaImage};
pub use store::{PaletteStore, SampleBuffer};
pub use viewport::{to_image_coords, Viewport, MAX_ZOOM, MIN_ZOOM};
