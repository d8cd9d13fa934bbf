use serde::Serialize;
use swatch_core::{ChartMatch, ReferenceChart, Rgb};

/// A color plus its closest chart entry, ready for text or JSON output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorReport {
    pub hex: String,
    pub rgb: [u8; 3],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<MatchReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchReport {
    pub code: String,
    pub hex: String,
    pub distance: f64,
}

impl From<ChartMatch<'_>> for MatchReport {
    fn from(m: ChartMatch<'_>) -> Self {
        Self {
            code: m.code.to_string(),
            hex: m.color.to_hex(),
            distance: (m.distance * 100.0).round() / 100.0,
        }
    }
}

impl ColorReport {
    pub fn new(color: Rgb, chart: &ReferenceChart) -> Self {
        Self {
            hex: color.to_hex(),
            rgb: color.to_bytes(),
            nearest: chart.nearest(color).map(MatchReport::from),
        }
    }

    /// One-line human readable form, e.g. `#c8332a  rgb(200, 51, 42)  ~ R60 (#c8332a, 0.00)`
    pub fn to_line(&self) -> String {
        let [r, g, b] = self.rgb;
        match &self.nearest {
            Some(m) => format!(
                "{}  rgb({r}, {g}, {b})  ~ {} ({}, {:.2})",
                self.hex, m.code, m.hex, m.distance
            ),
            None => format!("{}  rgb({r}, {g}, {b})", self.hex),
        }
    }
}
