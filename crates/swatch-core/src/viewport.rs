//! Screen-to-image coordinate mapping under zoom and pan.
//!
//! The forward projection places image pixel `(ix, iy)` at screen position
//! `(ix * zoom + pan_x, iy * zoom + pan_y)`. The pan offset is therefore the
//! screen position of the image origin, and clicks are mapped back with
//! [`to_image_coords`].

/// Smallest zoom factor the viewport will hold.
///
/// Repeated zoom-out would otherwise drive the factor toward zero and the
/// inverse transform would divide by it.
pub const MIN_ZOOM: f64 = 1e-4;

/// Largest zoom factor the viewport will hold.
///
/// Repeated zoom-in saturates here instead of overflowing to infinity.
pub const MAX_ZOOM: f64 = 1e6;

/// Map a screen point to integer image pixel indices.
///
/// Computes `(screen - origin) / zoom` per axis and truncates toward zero.
/// Results may be negative or exceed the image bounds; clamping is the pixel
/// extractor's job.
///
/// # Example
///
/// ```
/// use swatch_core::viewport::to_image_coords;
///
/// assert_eq!(to_image_coords(100.0, 100.0, 0.0, 0.0, 0.5), (200, 200));
/// assert_eq!(to_image_coords(-3.0, 9.0, 0.0, 0.0, 2.0), (-1, 4));
/// ```
#[inline]
pub fn to_image_coords(
    screen_x: f64,
    screen_y: f64,
    origin_x: f64,
    origin_y: f64,
    zoom: f64,
) -> (i64, i64) {
    let zoom = zoom.max(MIN_ZOOM);
    (
        ((screen_x - origin_x) / zoom) as i64,
        ((screen_y - origin_y) / zoom) as i64,
    )
}

/// Zoom factor that makes an image exactly fit a viewport.
///
/// Returns `min(viewport_w / image_w, viewport_h / image_h)`, clamped to
/// [`MIN_ZOOM`]. Returns `None` for an image with a zero dimension.
///
/// ```
/// use swatch_core::viewport::fit_zoom;
///
/// assert_eq!(fit_zoom(500.0, 500.0, 1000, 500), Some(0.5));
/// assert_eq!(fit_zoom(500.0, 500.0, 0, 500), None);
/// ```
pub fn fit_zoom(viewport_w: f64, viewport_h: f64, image_w: u32, image_h: u32) -> Option<f64> {
    if image_w == 0 || image_h == 0 {
        return None;
    }
    let zoom = (viewport_w / image_w as f64).min(viewport_h / image_h as f64);
    Some(clamp_zoom(zoom))
}

fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        MIN_ZOOM
    } else {
        zoom.clamp(MIN_ZOOM, MAX_ZOOM)
    }
}

/// Zoom and pan state of the visible window onto an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    /// Native resolution, image origin at the screen origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewport with an explicit zoom and pan offset.
    pub fn with_state(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            pan_x,
            pan_y,
        }
    }

    #[inline]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Screen position of image pixel (0, 0).
    #[inline]
    pub fn pan(&self) -> (f64, f64) {
        (self.pan_x, self.pan_y)
    }

    /// Replace the zoom factor, clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`].
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = clamp_zoom(zoom);
        if clamped != zoom {
            tracing::debug!(requested = zoom, clamped, "Zoom clamped");
        }
        self.zoom = clamped;
    }

    /// Fit an image into a viewport of the given size and reset the pan.
    ///
    /// Returns the new zoom, or `None` (leaving the state untouched) when the
    /// image has a zero dimension.
    pub fn fit(&mut self, viewport_w: f64, viewport_h: f64, image_w: u32, image_h: u32) -> Option<f64> {
        let zoom = fit_zoom(viewport_w, viewport_h, image_w, image_h)?;
        self.zoom = zoom;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
        Some(zoom)
    }

    /// Multiply the zoom by `factor`.
    ///
    /// With an anchor, the image point under the anchor stays under it;
    /// without one the scale is about the screen origin. Non-finite or
    /// non-positive factors are ignored.
    ///
    /// ```
    /// use swatch_core::Viewport;
    ///
    /// let mut vp = Viewport::new();
    /// let before = vp.to_image(40.0, 30.0);
    /// vp.zoom_by(2.0, Some((40.0, 30.0)));
    /// assert_eq!(vp.zoom(), 2.0);
    /// assert_eq!(vp.to_image(40.0, 30.0), before);
    /// ```
    pub fn zoom_by(&mut self, factor: f64, anchor: Option<(f64, f64)>) {
        if !factor.is_finite() || factor <= 0.0 {
            tracing::debug!(factor, "Ignoring degenerate zoom factor");
            return;
        }
        let old_zoom = self.zoom;
        self.set_zoom(old_zoom * factor);
        // The clamp may have absorbed part of the requested factor
        let applied = self.zoom / old_zoom;

        let (ax, ay) = anchor.unwrap_or((0.0, 0.0));
        self.pan_x = ax - (ax - self.pan_x) * applied;
        self.pan_y = ay - (ay - self.pan_y) * applied;
    }

    /// Shift the image by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Back to native resolution with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Map a screen point to image pixel indices (truncated toward zero).
    #[inline]
    pub fn to_image(&self, screen_x: f64, screen_y: f64) -> (i64, i64) {
        to_image_coords(screen_x, screen_y, self.pan_x, self.pan_y, self.zoom)
    }

    /// Forward projection of an image position onto the screen.
    #[inline]
    pub fn to_screen(&self, image_x: f64, image_y: f64) -> (f64, f64) {
        (
            image_x * self.zoom + self.pan_x,
            image_y * self.zoom + self.pan_y,
        )
    }
}
