//! Reduction of sampled colors to one representative color.
//!
//! The canonical reduction is an outlier-resistant mean: colors whose
//! distance from the per-channel median exceeds four median absolute
//! deviations in any channel are dropped before averaging. Stray background
//! pixels and anti-aliased edges in a selection therefore do not pull the
//! swatch off the dominant color.
//!
//! ```text
//! medians[c] = median(color[c])
//! mad[c]     = median(|color[c] - medians[c]|)
//! inlier     = for all c: |color[c] - medians[c]| <= 4 * mad[c]
//! result     = trunc(mean(inliers))          (black if none)
//! ```

use crate::color::Rgb;

/// Inlier threshold in units of median absolute deviation.
pub const MAD_THRESHOLD: f64 = 4.0;

/// Which statistic turns a set of samples into one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateMode {
    /// Median/MAD outlier filter followed by the mean of the inliers.
    #[default]
    Robust,
    /// Plain arithmetic mean, intended for small bounded buffers.
    Mean,
}

impl AggregateMode {
    /// Reduce `colors` with this mode.
    pub fn apply(self, colors: &[Rgb]) -> Rgb {
        match self {
            AggregateMode::Robust => aggregate(colors),
            AggregateMode::Mean => mean(colors),
        }
    }
}

/// Outlier-filtered mean of `colors`.
///
/// Returns black for an empty input, and also when no color survives the
/// filter. The result does not depend on input order.
///
/// # Example
///
/// ```
/// use swatch_core::{aggregate, Rgb};
///
/// let mut colors = vec![Rgb::new(10, 20, 30); 9];
/// colors.push(Rgb::new(10, 21, 30));
/// colors.push(Rgb::new(255, 0, 255)); // stray edge pixel
/// assert_eq!(aggregate(&colors), Rgb::new(10, 20, 30));
/// ```
pub fn aggregate(colors: &[Rgb]) -> Rgb {
    if colors.is_empty() {
        tracing::debug!("Aggregating empty sample set");
        return Rgb::BLACK;
    }

    let channels = split_channels(colors);
    let medians: [f64; 3] = std::array::from_fn(|i| median(&channels[i]));
    let mads: [f64; 3] = std::array::from_fn(|i| {
        let devs: Vec<f64> = channels[i].iter().map(|&v| (v - medians[i]).abs()).collect();
        median(&devs)
    });

    let inliers: Vec<Rgb> = colors
        .iter()
        .copied()
        .filter(|color| {
            let values = channel_values(*color);
            (0..3).all(|i| (values[i] - medians[i]).abs() <= MAD_THRESHOLD * mads[i])
        })
        .collect();

    if inliers.is_empty() {
        tracing::debug!(samples = colors.len(), "No inliers survived MAD filter");
        return Rgb::BLACK;
    }
    if inliers.len() < colors.len() {
        tracing::debug!(
            samples = colors.len(),
            dropped = colors.len() - inliers.len(),
            "Dropped outlier samples"
        );
    }

    mean(&inliers)
}

/// Truncated componentwise arithmetic mean. Black for an empty input.
///
/// ```
/// use swatch_core::{mean, Rgb};
///
/// assert_eq!(mean(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 1)]), Rgb::new(127, 127, 0));
/// ```
pub fn mean(colors: &[Rgb]) -> Rgb {
    if colors.is_empty() {
        return Rgb::BLACK;
    }
    let n = colors.len() as u64;
    let mut sums = [0u64; 3];
    for color in colors {
        sums[0] += color.r as u64;
        sums[1] += color.g as u64;
        sums[2] += color.b as u64;
    }
    // Each channel mean is at most 255, so the narrowing is lossless
    Rgb::new((sums[0] / n) as u8, (sums[1] / n) as u8, (sums[2] / n) as u8)
}

/// Median of a slice; even lengths average the two middle values.
/// Returns 0.0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[inline]
fn channel_values(color: Rgb) -> [f64; 3] {
    [color.r as f64, color.g as f64, color.b as f64]
}

fn split_channels(colors: &[Rgb]) -> [Vec<f64>; 3] {
    let mut channels: [Vec<f64>; 3] = std::array::from_fn(|_| Vec::with_capacity(colors.len()));
    for color in colors {
        for (channel, value) in channels.iter_mut().zip(channel_values(*color)) {
            channel.push(value);
        }
    }
    channels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_black() {
        assert_eq!(aggregate(&[]), Rgb::BLACK);
        assert_eq!(mean(&[]), Rgb::BLACK);
        assert_eq!(AggregateMode::Mean.apply(&[]), Rgb::BLACK);
    }

    #[test]
    fn test_identical_colors_exact() {
        for color in [Rgb::BLACK, Rgb::WHITE, Rgb::new(17, 200, 3)] {
            for n in [1, 2, 5, 64] {
                assert_eq!(aggregate(&vec![color; n]), color);
            }
        }
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_single_outlier_channel_drops_whole_color() {
        // Red channel of the last color is an outlier; its green/blue are inliers
        let mut colors = vec![
            Rgb::new(100, 50, 50),
            Rgb::new(102, 52, 48),
            Rgb::new(98, 48, 52),
            Rgb::new(100, 50, 50),
        ];
        colors.push(Rgb::new(250, 50, 50));
        assert_eq!(aggregate(&colors), Rgb::new(100, 50, 50));
        // The plain mean is skewed by it
        assert_eq!(mean(&colors), Rgb::new(130, 50, 50));
    }

    #[test]
    fn test_two_point_set_keeps_both() {
        // median 100, deviations {50, 50} => MAD 50, both within 4*MAD
        let colors = [Rgb::new(50, 0, 0), Rgb::new(150, 0, 0)];
        assert_eq!(aggregate(&colors), Rgb::new(100, 0, 0));
    }

    #[test]
    fn test_mean_truncates() {
        let colors = [Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)];
        assert_eq!(mean(&colors), Rgb::new(1, 1, 1));
        assert_eq!(aggregate(&colors), Rgb::new(1, 1, 1));
    }

    #[test]
    fn test_permutation_invariant() {
        let colors = vec![
            Rgb::new(10, 200, 30),
            Rgb::new(12, 190, 33),
            Rgb::new(250, 0, 0),
            Rgb::new(11, 195, 29),
            Rgb::new(9, 205, 31),
            Rgb::new(13, 198, 35),
        ];
        let expected = aggregate(&colors);
        let mut reversed = colors.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed), expected);
        let mut rotated = colors.clone();
        rotated.rotate_left(2);
        assert_eq!(aggregate(&rotated), expected);
    }

    #[test]
    fn test_mode_dispatch() {
        let colors = [
            Rgb::new(10, 10, 10),
            Rgb::new(10, 10, 10),
            Rgb::new(10, 10, 10),
            Rgb::new(250, 250, 250),
        ];
        assert_eq!(AggregateMode::default(), AggregateMode::Robust);
        assert_eq!(AggregateMode::Robust.apply(&colors), Rgb::new(10, 10, 10));
        assert_eq!(AggregateMode::Mean.apply(&colors), Rgb::new(70, 70, 70));
    }
}
