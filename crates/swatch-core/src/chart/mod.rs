//! Reference charts and nearest-color matching
//!
//! A reference chart is a fixed table of named canonical colors that sampled
//! swatches can be snapped to.

mod chart;

pub use chart::{
    Anchors, ChartBuilder, ChartEntry, ChartMatch, ReferenceChart, DEFAULT_NEAR_BLACK,
    DEFAULT_NEAR_WHITE, NEAR_BLACK_CODE, NEAR_WHITE_CODE,
};
