//! Domain-critical regression tests for swatch-core.
//!
//! These tests are designed to catch specific classes of bugs, not just
//! confirm happy paths. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use std::sync::Arc;

    use crate::aggregate::{aggregate, mean, AggregateMode};
    use crate::api::{SamplerSession, ScreenRect};
    use crate::chart::{ReferenceChart, DEFAULT_NEAR_BLACK, NEAR_BLACK_CODE};
    use crate::color::Rgb;
    use crate::extract::RgbaImage;
    use crate::store::{SampleBuffer, LIGHTWEIGHT_CAPACITY};
    use crate::viewport::{to_image_coords, Viewport, MAX_ZOOM};

    /// Deterministic xorshift generator so property loops need no extra crate.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            let mut x = self.0;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.0 = x;
            x
        }

        fn byte(&mut self) -> u8 {
            (self.next() >> 24) as u8
        }

        fn color(&mut self) -> Rgb {
            Rgb::new(self.byte(), self.byte(), self.byte())
        }

        /// A color within +/- `spread` of `center` on every channel.
        fn near(&mut self, center: Rgb, spread: u8) -> Rgb {
            let mut jitter = |c: u8| {
                let span = 2 * spread as u64 + 1;
                let offset = (self.next() % span) as i32 - spread as i32;
                (c as i32 + offset).clamp(0, 255) as u8
            };
            Rgb::new(jitter(center.r), jitter(center.g), jitter(center.b))
        }
    }

    // ========================================================================
    // GAP 1: The aggregate must be the median/MAD-filtered mean
    // ========================================================================

    /// If this breaks, it means: aggregation no longer returns a uniform input
    /// exactly, e.g. rounding was introduced where truncation is expected.
    #[test]
    fn test_uniform_input_returned_exactly() {
        let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
        for _ in 0..200 {
            let color = rng.color();
            let n = 1 + (rng.next() % 50) as usize;
            assert_eq!(aggregate(&vec![color; n]), color, "n = {n}");
        }
    }

    /// If this breaks, it means: the result depends on sample order, which
    /// would make the displayed swatch change when the user deletes and
    /// re-adds the same samples.
    #[test]
    fn test_permutation_invariance() {
        let mut rng = XorShift(42);
        for _ in 0..100 {
            let n = 1 + (rng.next() % 40) as usize;
            let colors: Vec<Rgb> = (0..n).map(|_| rng.color()).collect();
            let expected = aggregate(&colors);

            let mut shuffled = colors.clone();
            // Fisher-Yates with the same generator
            for i in (1..shuffled.len()).rev() {
                let j = (rng.next() % (i as u64 + 1)) as usize;
                shuffled.swap(i, j);
            }
            assert_eq!(aggregate(&shuffled), expected);
        }
    }

    /// If this breaks, it means: the MAD filter was replaced by a plain or
    /// trimmed mean, so a handful of stray pixels drags the swatch away from
    /// the dominant color.
    #[test]
    fn test_extreme_outliers_do_not_skew_cluster() {
        let mut rng = XorShift(7);
        let center = Rgb::new(120, 80, 60);
        let mut colors: Vec<Rgb> = (0..200).map(|_| rng.near(center, 6)).collect();
        for k in 1..=5 {
            colors.push(Rgb::new(255, 255, 255 - k));
            colors.push(Rgb::new(0, 0, k));
        }

        let result = aggregate(&colors);
        let cluster = &colors[..200];
        let range = |f: fn(&Rgb) -> u8| {
            let vals = cluster.iter().map(f);
            (vals.clone().min().unwrap(), vals.max().unwrap())
        };
        for (value, (lo, hi)) in [
            (result.r, range(|c| c.r)),
            (result.g, range(|c| c.g)),
            (result.b, range(|c| c.b)),
        ] {
            assert!(
                (lo..=hi).contains(&value),
                "REGRESSION: aggregate {result} left the cluster range {lo}..={hi}"
            );
        }

        // The plain mean is pulled toward the outliers and is not what we ship
        assert_ne!(mean(&colors), result);
    }

    // ========================================================================
    // GAP 2: Buffer eviction and the running aggregate
    // ========================================================================

    /// If this breaks, it means: the buffer grew past its capacity or evicted
    /// the newest sample instead of the oldest.
    #[test]
    fn test_capacity_64_scenario() {
        let mut buffer = SampleBuffer::with_capacity(LIGHTWEIGHT_CAPACITY);
        for _ in 0..64 {
            buffer.push(Rgb::new(10, 10, 10));
        }
        let evicted = buffer.push(Rgb::new(250, 250, 250));
        assert_eq!(evicted, Some(Rgb::new(10, 10, 10)));
        assert_eq!(buffer.len(), 64);
        assert_eq!(buffer.get(63), Some(Rgb::new(250, 250, 250)));

        // 63 tight samples have MAD 0, so the bright one is an outlier
        assert_eq!(aggregate(&buffer.to_vec()), Rgb::new(10, 10, 10));
    }

    /// If this breaks, it means: the session bypasses the buffer capacity or
    /// aggregates only the latest sample instead of the whole buffer.
    #[test]
    fn test_session_average_of_averages() {
        let image = RgbaImage::filled(8, 8, [10, 10, 10, 255]).unwrap();
        let bright = RgbaImage::filled(8, 8, [250, 250, 250, 255]).unwrap();
        let mut session = SamplerSession::new(Arc::new(ReferenceChart::default()))
            .capacity(LIGHTWEIGHT_CAPACITY);

        for _ in 0..64 {
            session.on_region_selected(ScreenRect::point(1.0, 1.0), &image);
        }
        let result = session.on_region_selected(ScreenRect::point(1.0, 1.0), &bright);
        assert_eq!(session.samples().len(), 64);
        assert_eq!(result, Some(Rgb::new(10, 10, 10)));

        // The lightweight mean mode does let it through
        let mut light = SamplerSession::new(Arc::new(ReferenceChart::default()))
            .capacity(LIGHTWEIGHT_CAPACITY)
            .mode(AggregateMode::Mean);
        for _ in 0..63 {
            light.on_region_selected(ScreenRect::point(1.0, 1.0), &image);
        }
        let result = light.on_region_selected(ScreenRect::point(1.0, 1.0), &bright);
        assert_eq!(result, Some(Rgb::new(13, 13, 13)));
    }

    // ========================================================================
    // GAP 3: Chart matching special cases
    // ========================================================================

    /// If this breaks, it means: pure black is looked up in the chart and
    /// snaps to whatever dark entry happens to be closest.
    #[test]
    fn test_black_always_maps_to_near_black() {
        let mut rng = XorShift(99);
        for _ in 0..50 {
            let mut builder = ReferenceChart::builder();
            for i in 0..(1 + rng.next() % 20) {
                builder = builder.entry(format!("C{i}"), rng.color());
            }
            let chart = builder.entry("K", Rgb::BLACK).build();
            let hit = chart.nearest(Rgb::BLACK).unwrap();
            assert_eq!(hit.code, NEAR_BLACK_CODE);
            assert_eq!(hit.color, DEFAULT_NEAR_BLACK);
        }
    }

    #[test]
    fn test_two_entry_chart_scenario() {
        let chart = ReferenceChart::builder()
            .entry("A", Rgb::new(255, 0, 0))
            .entry("B", Rgb::new(0, 255, 0))
            .build();
        let hit = chart.nearest(Rgb::new(200, 10, 10)).unwrap();
        assert_eq!((hit.code, hit.color), ("A", Rgb::new(255, 0, 0)));
    }

    // ========================================================================
    // GAP 4: Coordinate mapping
    // ========================================================================

    #[test]
    fn test_fit_to_window_scenario() {
        let mut viewport = Viewport::new();
        let zoom = viewport.fit(500.0, 500.0, 1000, 500).unwrap();
        assert_eq!(zoom, 0.5);
        assert_eq!(to_image_coords(100.0, 100.0, 0.0, 0.0, zoom), (200, 200));
    }

    /// If this breaks, it means: the inverse transform drifted from the
    /// forward projection, so the sampled pixels are not the ones the user
    /// sees under the cursor.
    #[test]
    fn test_inverse_of_forward_projection() {
        let mut rng = XorShift(1234);
        for _ in 0..500 {
            let zoom = 0.05 + (rng.next() % 4000) as f64 / 100.0;
            let pan_x = (rng.next() % 2000) as f64 - 1000.0;
            let pan_y = (rng.next() % 2000) as f64 - 1000.0;
            let viewport = Viewport::with_state(zoom, pan_x, pan_y);

            let ix = (rng.next() % 4000) as i64;
            let iy = (rng.next() % 4000) as i64;
            let (sx, sy) = viewport.to_screen(ix as f64, iy as f64);
            let (bx, by) = viewport.to_image(sx, sy);
            assert!((bx - ix).abs() <= 1 && (by - iy).abs() <= 1);
        }
    }

    /// If this breaks, it means: a long zoom-out sequence can drive the zoom
    /// to zero and the next click divides by it.
    #[test]
    fn test_pathological_wheel_sequence() {
        let image = RgbaImage::filled(4, 4, [1, 2, 3, 255]).unwrap();
        let mut session = SamplerSession::new(Arc::new(ReferenceChart::default()));
        for _ in 0..100_000 {
            session.on_zoom_requested(0.9, Some((2.0, 2.0)));
        }
        assert!(session.viewport_state().zoom() > 0.0);
        // Clicking at the anchor still maps into the image
        let color = session.on_region_selected(ScreenRect::point(2.0, 2.0), &image);
        assert_eq!(color, Some(Rgb::new(1, 2, 3)));
    }

    /// If this breaks, it means: a long zoom-in sequence overflows the zoom
    /// and the viewport snaps to maximum zoom-out instead of staying zoomed in.
    #[test]
    fn test_pathological_zoom_in_sequence() {
        let image = RgbaImage::filled(4, 4, [9, 8, 7, 255]).unwrap();
        let mut session = SamplerSession::new(Arc::new(ReferenceChart::default()));
        for _ in 0..10_000 {
            session.on_zoom_requested(1.1, Some((0.0, 0.0)));
        }
        assert_eq!(session.viewport_state().zoom(), MAX_ZOOM);
        let color = session.on_region_selected(ScreenRect::point(1.0, 1.0), &image);
        assert_eq!(color, Some(Rgb::new(9, 8, 7)));
    }
}
