//! Reference chart with nearest-color matching.

use std::str::FromStr;

use crate::color::Rgb;

/// Default stand-in for pure black (`#151515`).
pub const DEFAULT_NEAR_BLACK: Rgb = Rgb::new(21, 21, 21);
/// Default stand-in for pure white (`#fcfcfc`).
pub const DEFAULT_NEAR_WHITE: Rgb = Rgb::new(252, 252, 252);

/// Code reported for the near-black anchor.
pub const NEAR_BLACK_CODE: &str = "near-black";
/// Code reported for the near-white anchor.
pub const NEAR_WHITE_CODE: &str = "near-white";

/// A named reference color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub code: String,
    pub color: Rgb,
}

impl ChartEntry {
    pub fn new(code: impl Into<String>, color: Rgb) -> Self {
        Self {
            code: code.into(),
            color,
        }
    }
}

/// Result of a chart lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartMatch<'a> {
    /// Chart code, or [`NEAR_BLACK_CODE`] / [`NEAR_WHITE_CODE`] for anchors.
    pub code: &'a str,
    pub color: Rgb,
    /// Euclidean distance from the query; 0.0 for anchor hits.
    pub distance: f64,
}

/// Replacement colors for exact black and exact white.
///
/// Real reference charts rarely contain pure black or white, and the nearest
/// real entry is usually a poor visual match, so these two queries bypass
/// the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub near_black: Rgb,
    pub near_white: Rgb,
}

impl Default for Anchors {
    fn default() -> Self {
        Self {
            near_black: DEFAULT_NEAR_BLACK,
            near_white: DEFAULT_NEAR_WHITE,
        }
    }
}

/// An immutable, ordered set of named reference colors.
///
/// Entries keep the order they were added in, and lookups break distance
/// ties in favor of the earliest entry. Codes are unique: adding a code
/// again replaces the earlier entry's color but keeps its position.
///
/// # Example
///
/// ```
/// use swatch_core::{ReferenceChart, Rgb};
///
/// let chart = ReferenceChart::builder()
///     .entry("A", Rgb::new(255, 0, 0))
///     .entry("B", Rgb::new(0, 255, 0))
///     .build();
///
/// let hit = chart.nearest(Rgb::new(200, 10, 10)).unwrap();
/// assert_eq!(hit.code, "A");
/// assert_eq!(hit.color, Rgb::new(255, 0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceChart {
    entries: Vec<ChartEntry>,
    anchors: Anchors,
}

impl Default for ReferenceChart {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ReferenceChart {
    pub fn builder() -> ChartBuilder {
        ChartBuilder::default()
    }

    /// Chart from already-parsed entries with default anchors.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChartEntry>,
    {
        entries
            .into_iter()
            .fold(Self::builder(), |b, e| b.entry(e.code, e.color))
            .build()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ChartEntry] {
        &self.entries
    }

    pub fn anchors(&self) -> Anchors {
        self.anchors
    }

    /// Look up an entry by code.
    pub fn get(&self, code: &str) -> Option<&ChartEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    /// The entry closest to `color` by Euclidean distance.
    ///
    /// Exact black and white resolve to the anchors without consulting the
    /// entries. Returns `None` only for an empty chart queried with any other
    /// color.
    pub fn nearest(&self, color: Rgb) -> Option<ChartMatch<'_>> {
        if color == Rgb::BLACK {
            return Some(ChartMatch {
                code: NEAR_BLACK_CODE,
                color: self.anchors.near_black,
                distance: 0.0,
            });
        }
        if color == Rgb::WHITE {
            return Some(ChartMatch {
                code: NEAR_WHITE_CODE,
                color: self.anchors.near_white,
                distance: 0.0,
            });
        }

        // Linear scan; strict `<` keeps the first entry on ties
        let mut best: Option<(&ChartEntry, f64)> = None;
        for entry in &self.entries {
            let dist = color.distance_squared(entry.color);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((entry, dist));
            }
        }

        best.map(|(entry, dist)| ChartMatch {
            code: &entry.code,
            color: entry.color,
            distance: dist.sqrt(),
        })
    }

    /// Color of [`nearest`](Self::nearest), or `color` unchanged when the
    /// chart cannot answer.
    pub fn snap(&self, color: Rgb) -> Rgb {
        self.nearest(color).map_or(color, |m| m.color)
    }
}

/// Incremental constructor for [`ReferenceChart`].
#[derive(Debug, Default)]
pub struct ChartBuilder {
    entries: Vec<ChartEntry>,
    anchors: Anchors,
    skipped: usize,
}

impl ChartBuilder {
    /// Add or replace an entry.
    pub fn entry(mut self, code: impl Into<String>, color: Rgb) -> Self {
        self.push(code.into(), color);
        self
    }

    /// Add an entry from a hex string. Malformed colors or blank codes are
    /// skipped with a warning rather than failing the whole chart.
    pub fn hex_entry(mut self, code: &str, hex: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            tracing::warn!(hex, "Skipping chart entry without a code");
            self.skipped += 1;
            return self;
        }
        match Rgb::from_str(hex) {
            Ok(color) => self.push(code.to_string(), color),
            Err(e) => {
                tracing::warn!(code, hex, %e, "Skipping malformed chart entry");
                self.skipped += 1;
            }
        }
        self
    }

    /// Count a source entry that was rejected before reaching the builder.
    pub fn skip(mut self) -> Self {
        self.skipped += 1;
        self
    }

    pub fn near_black(mut self, color: Rgb) -> Self {
        self.anchors.near_black = color;
        self
    }

    pub fn near_white(mut self, color: Rgb) -> Self {
        self.anchors.near_white = color;
        self
    }

    pub fn anchors(mut self, anchors: Anchors) -> Self {
        self.anchors = anchors;
        self
    }

    /// Number of source entries dropped so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn build(self) -> ReferenceChart {
        if self.skipped > 0 {
            tracing::debug!(
                entries = self.entries.len(),
                skipped = self.skipped,
                "Built reference chart"
            );
        }
        ReferenceChart {
            entries: self.entries,
            anchors: self.anchors,
        }
    }

    fn push(&mut self, code: String, color: Rgb) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.code == code) {
            tracing::warn!(code = %code, "Duplicate chart code, replacing earlier color");
            existing.color = color;
        } else {
            self.entries.push(ChartEntry { code, color });
        }
    }
}
