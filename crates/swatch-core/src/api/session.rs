//! SamplerSession -- the interaction-event entry point for host applications.
//!
//! A host UI translates its widget events (click, drag release, wheel,
//! button press) into calls on [`SamplerSession`]. The session owns the
//! viewport, the sample buffer and the working palette; the reference chart
//! is shared read-only.

use std::sync::Arc;

use super::error::SampleError;
use crate::aggregate::AggregateMode;
use crate::chart::ReferenceChart;
use crate::color::Rgb;
use crate::extract::{extract_point, extract_rect, PixelSource};
use crate::store::{PaletteStore, SampleBuffer, DEFAULT_CAPACITY};
use crate::viewport::Viewport;

/// A selection in screen coordinates, from press point to release point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl ScreenRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            from: (x0, y0),
            to: (x1, y1),
        }
    }

    /// A click without drag.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }
}

/// One user's sampling session.
///
/// Every mutation takes `&mut self`, so events are applied one at a time to
/// completion. A host with a multi-threaded UI moves the session into its
/// single dispatch thread.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use swatch_core::{ReferenceChart, Rgb, RgbaImage, SamplerSession, ScreenRect};
///
/// let image = RgbaImage::filled(1000, 500, [40, 90, 160, 255]).unwrap();
/// let mut session = SamplerSession::new(Arc::new(ReferenceChart::default()));
/// session.on_image_loaded(&image, 500.0, 500.0).unwrap();
///
/// let color = session.on_region_selected(ScreenRect::new(10.0, 10.0, 60.0, 40.0), &image);
/// assert_eq!(color, Some(Rgb::new(40, 90, 160)));
///
/// session.on_commit_current();
/// assert_eq!(session.palette().as_slice(), &["#285aa0"]);
/// assert!(session.samples().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct SamplerSession {
    viewport: Viewport,
    samples: SampleBuffer,
    palette: PaletteStore,
    chart: Arc<ReferenceChart>,
    mode: AggregateMode,
}

impl SamplerSession {
    /// Empty session with the default buffer capacity and robust aggregation.
    pub fn new(chart: Arc<ReferenceChart>) -> Self {
        Self {
            viewport: Viewport::new(),
            samples: SampleBuffer::with_capacity(DEFAULT_CAPACITY),
            palette: PaletteStore::new(),
            chart,
            mode: AggregateMode::Robust,
        }
    }

    /// Set the sample buffer capacity. Discards any buffered samples.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.samples = SampleBuffer::with_capacity(capacity);
        self
    }

    /// Set the aggregation statistic.
    pub fn mode(mut self, mode: AggregateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Start from an explicit viewport state instead of native resolution.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    /// Fit a newly loaded image into a viewport of the given size.
    ///
    /// # Errors
    ///
    /// [`SampleError::InvalidImage`] for an image without pixels; the
    /// session is left unchanged.
    pub fn on_image_loaded<S: PixelSource + ?Sized>(
        &mut self,
        image: &S,
        viewport_w: f64,
        viewport_h: f64,
    ) -> Result<f64, SampleError> {
        let (w, h) = (image.width(), image.height());
        let zoom = self
            .viewport
            .fit(viewport_w, viewport_h, w, h)
            .ok_or_else(|| SampleError::InvalidImage(format!("image has no pixels ({w}x{h})")))?;
        tracing::debug!(width = w, height = h, zoom, "Image fitted to viewport");
        Ok(zoom)
    }

    /// Sample the pixels under a screen selection.
    ///
    /// The selection is mapped through the viewport, its pixels are reduced
    /// to one color and that color is appended to the sample buffer. A
    /// selection whose two corners land on the same image pixel samples that
    /// pixel alone. An empty or out-of-image selection records nothing.
    ///
    /// Returns the aggregate of the whole buffer, or `None` while the buffer
    /// is empty.
    pub fn on_region_selected<S: PixelSource + ?Sized>(
        &mut self,
        rect: ScreenRect,
        image: &S,
    ) -> Option<Rgb> {
        let a = self.viewport.to_image(rect.from.0, rect.from.1);
        let b = self.viewport.to_image(rect.to.0, rect.to.1);

        let colors = if a == b {
            extract_point(image, a.0, a.1)
        } else {
            extract_rect(image, a.0, a.1, b.0, b.1)
        };

        if colors.is_empty() {
            return self.current_aggregate();
        }

        let sample = self.mode.apply(&colors);
        if let Some(evicted) = self.samples.push(sample) {
            tracing::debug!(%evicted, capacity = self.samples.capacity(), "Evicted oldest sample");
        }
        tracing::debug!(pixels = colors.len(), %sample, "Recorded sample");
        self.current_aggregate()
    }

    /// Multiply the zoom, optionally anchored at a screen point.
    pub fn on_zoom_requested(&mut self, factor: f64, anchor: Option<(f64, f64)>) {
        self.viewport.zoom_by(factor, anchor);
    }

    /// Pan by a screen-space delta.
    pub fn on_pan(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    /// Append a color to the palette and return its index.
    pub fn on_commit_to_palette(&mut self, color: Rgb) -> usize {
        self.palette.push(color)
    }

    /// Commit the running aggregate and start a fresh set of samples.
    ///
    /// Does nothing and returns `None` when no samples are buffered.
    pub fn on_commit_current(&mut self) -> Option<Rgb> {
        let color = self.current_aggregate()?;
        self.palette.push(color);
        self.samples.clear();
        Some(color)
    }

    pub fn on_remove_from_palette(&mut self, index: usize) -> Result<String, SampleError> {
        self.palette.remove(index)
    }

    pub fn on_remove_sample(&mut self, index: usize) -> Result<Rgb, SampleError> {
        self.samples.remove(index)
    }

    pub fn on_clear_samples(&mut self) {
        self.samples.clear();
    }

    /// Snap every buffered sample to the reference chart, in place.
    pub fn on_quantize_requested(&mut self) {
        let chart = Arc::clone(&self.chart);
        self.samples.replace_all(|c| chart.snap(c));
        tracing::debug!(samples = self.samples.len(), "Quantized samples to chart");
    }

    // ---------------------------------------------------------------------
    // State
    // ---------------------------------------------------------------------

    /// Aggregate of every buffered sample, or `None` while the buffer is empty.
    pub fn current_aggregate(&self) -> Option<Rgb> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.mode.apply(&self.samples.to_vec()))
    }

    pub fn viewport_state(&self) -> &Viewport {
        &self.viewport
    }

    pub fn samples(&self) -> &SampleBuffer {
        &self.samples
    }

    pub fn palette(&self) -> &PaletteStore {
        &self.palette
    }

    pub fn chart(&self) -> &ReferenceChart {
        &self.chart
    }

    pub fn aggregate_mode(&self) -> AggregateMode {
        self.mode
    }
}
