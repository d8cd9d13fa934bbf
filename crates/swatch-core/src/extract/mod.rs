//! Pixel extraction from an image-access collaborator.
//!
//! The engine never decodes images. It reads pixels through [`PixelSource`]
//! and owns only the rectangle normalization and clamping.

mod image;

pub use image::RgbaImage;

use crate::color::Rgb;

/// Read access to an image's pixels.
///
/// Implementors return RGBA; the extractor drops alpha.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// RGBA value of the pixel at `(x, y)`. Callers guarantee
    /// `x < width()` and `y < height()`.
    fn pixel(&self, x: u32, y: u32) -> [u8; 4];
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        (**self).pixel(x, y)
    }
}

/// A half-open pixel rectangle `[x0, x1) × [y0, y1)` inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelRect {
    /// Normalize two corners given in any order and clamp them to an image of
    /// `width × height`.
    ///
    /// ```
    /// use swatch_core::PixelRect;
    ///
    /// let rect = PixelRect::clamped((12, -4), (3, 6), 10, 10);
    /// assert_eq!(rect, PixelRect { x0: 3, y0: 0, x1: 10, y1: 6 });
    /// assert_eq!(rect.area(), 42);
    /// ```
    pub fn clamped(a: (i64, i64), b: (i64, i64), width: u32, height: u32) -> Self {
        let clamp_x = |v: i64| v.clamp(0, width as i64) as u32;
        let clamp_y = |v: i64| v.clamp(0, height as i64) as u32;
        Self {
            x0: clamp_x(a.0.min(b.0)),
            y0: clamp_y(a.1.min(b.1)),
            x1: clamp_x(a.0.max(b.0)),
            y1: clamp_y(a.1.max(b.1)),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.area() == 0
    }
}

/// Colors of every pixel in the rectangle spanned by two image-space corners.
///
/// Corners may come in any order (a drag can go in any direction). The
/// rectangle is half-open and clamped to the image; the result is row-major
/// and empty when the clamped rectangle has zero area.
///
/// Cost is proportional to the rectangle's area.
pub fn extract_rect<S: PixelSource + ?Sized>(source: &S, x0: i64, y0: i64, x1: i64, y1: i64) -> Vec<Rgb> {
    let rect = PixelRect::clamped((x0, y0), (x1, y1), source.width(), source.height());
    if rect.is_empty() {
        tracing::debug!(x0, y0, x1, y1, "Empty selection");
        return Vec::new();
    }

    let mut colors = Vec::with_capacity(preallocation(&rect));
    for y in rect.y0..rect.y1 {
        for x in rect.x0..rect.x1 {
            colors.push(Rgb::from_rgba(source.pixel(x, y)));
        }
    }
    colors
}

/// Upper bound on the up-front allocation for a rectangle.
const MAX_PREALLOC: u64 = 1 << 20;

/// Capacity to reserve before extraction; sources may report huge bounds.
fn preallocation(rect: &PixelRect) -> usize {
    rect.area().min(MAX_PREALLOC) as usize
}

/// The single pixel under a point, or nothing when the point is outside.
pub fn extract_point<S: PixelSource + ?Sized>(source: &S, x: i64, y: i64) -> Vec<Rgb> {
    let inside = x >= 0 && y >= 0 && x < source.width() as i64 && y < source.height() as i64;
    if !inside {
        tracing::debug!(x, y, "Point outside image");
        return Vec::new();
    }
    vec![Rgb::from_rgba(source.pixel(x as u32, y as u32))]
}
