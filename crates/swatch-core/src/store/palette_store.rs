//! Working palette of committed colors.

use crate::api::SampleError;
use crate::color::Rgb;

/// Unbounded, insertion-ordered list of committed colors.
///
/// Colors are stored in their canonical `#rrggbb` form, which is what the
/// host shows, copies and exports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteStore {
    colors: Vec<String>,
}

impl PaletteStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Append a color and return its index.
    pub fn push(&mut self, color: Rgb) -> usize {
        self.colors.push(color.to_hex());
        self.colors.len() - 1
    }

    /// Remove the color at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Result<String, SampleError> {
        if index >= self.colors.len() {
            return Err(SampleError::IndexOutOfRange {
                index,
                len: self.colors.len(),
            });
        }
        Ok(self.colors.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.colors
    }

    /// Parsed colors, in order.
    pub fn colors(&self) -> Vec<Rgb> {
        // Entries are written by `push` only, so they always parse
        self.colors.iter().filter_map(|hex| hex.parse().ok()).collect()
    }
}
