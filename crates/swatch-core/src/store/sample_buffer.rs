//! Bounded FIFO buffer of sampled colors.

use std::collections::VecDeque;

use crate::api::SampleError;
use crate::color::Rgb;

/// Capacity used by the full-featured sampler.
pub const DEFAULT_CAPACITY: usize = 1024;
/// Capacity used by the lightweight mean-only sampler.
pub const LIGHTWEIGHT_CAPACITY: usize = 64;

/// Ordered samples awaiting aggregation.
///
/// Never holds more than its capacity: pushing onto a full buffer evicts the
/// oldest sample first. Insertion order is recency order.
///
/// ```
/// use swatch_core::{Rgb, SampleBuffer};
///
/// let mut buffer = SampleBuffer::with_capacity(2);
/// buffer.push(Rgb::new(1, 1, 1));
/// buffer.push(Rgb::new(2, 2, 2));
/// let evicted = buffer.push(Rgb::new(3, 3, 3));
/// assert_eq!(evicted, Some(Rgb::new(1, 1, 1)));
/// assert_eq!(buffer.to_vec(), vec![Rgb::new(2, 2, 2), Rgb::new(3, 3, 3)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: VecDeque<Rgb>,
    capacity: usize,
}

impl Default for SampleBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl SampleBuffer {
    /// Empty buffer holding at most `capacity` samples (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append a sample, returning the evicted oldest one if the buffer was full.
    pub fn push(&mut self, color: Rgb) -> Option<Rgb> {
        let evicted = if self.samples.len() >= self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(color);
        evicted
    }

    /// Remove the sample at `index`, keeping the order of the rest.
    pub fn remove(&mut self, index: usize) -> Result<Rgb, SampleError> {
        let len = self.samples.len();
        self.samples
            .remove(index)
            .ok_or(SampleError::IndexOutOfRange { index, len })
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Rewrite every sample in place; length and order are unchanged.
    pub fn replace_all<F>(&mut self, mut f: F)
    where
        F: FnMut(Rgb) -> Rgb,
    {
        for sample in self.samples.iter_mut() {
            *sample = f(*sample);
        }
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.samples.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.samples.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Rgb> {
        self.samples.iter().copied().collect()
    }
}
