use crate::assets::AssetLoader;
use serde::Deserialize;
use std::sync::Arc;
use swatch_core::store::DEFAULT_CAPACITY;
use swatch_core::{AggregateMode, Anchors, ReferenceChart, Rgb, SamplerSession};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub sampler: SamplerConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Sample buffer and aggregation settings
#[derive(Debug, Deserialize, Clone)]
pub struct SamplerConfig {
    /// Samples kept for the running aggregate
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,

    #[serde(default)]
    pub mode: ModeSetting,
}

fn default_buffer_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            mode: ModeSetting::default(),
        }
    }
}

/// Aggregation statistic as written in config
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModeSetting {
    #[default]
    Robust,
    Mean,
}

impl From<ModeSetting> for AggregateMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::Robust => AggregateMode::Robust,
            ModeSetting::Mean => AggregateMode::Mean,
        }
    }
}

/// Reference chart selection and anchor overrides
#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    /// Chart file name (relative to the charts directory)
    #[serde(default = "default_chart_file")]
    pub file: String,

    /// Hex color pure black snaps to
    #[serde(default = "default_near_black")]
    pub near_black: String,

    /// Hex color pure white snaps to
    #[serde(default = "default_near_white")]
    pub near_white: String,
}

fn default_chart_file() -> String {
    "default.yaml".to_string()
}

fn default_near_black() -> String {
    "#151515".to_string()
}

fn default_near_white() -> String {
    "#fcfcfc".to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            file: default_chart_file(),
            near_black: default_near_black(),
            near_white: default_near_white(),
        }
    }
}

impl ChartConfig {
    /// Anchor colors, falling back to the built-in ones for unparsable hex
    pub fn anchors(&self) -> Anchors {
        let defaults = Anchors::default();
        Anchors {
            near_black: parse_anchor("near_black", &self.near_black, defaults.near_black),
            near_white: parse_anchor("near_white", &self.near_white, defaults.near_white),
        }
    }
}

fn parse_anchor(name: &str, hex: &str, fallback: Rgb) -> Rgb {
    match hex.parse() {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!(anchor = name, hex, %e, "Invalid anchor color, using default");
            fallback
        }
    }
}

/// Size of the image view used for fit-to-window
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    #[serde(default = "default_viewport_width")]
    pub width: f64,

    #[serde(default = "default_viewport_height")]
    pub height: f64,
}

fn default_viewport_width() -> f64 {
    1000.0
}

fn default_viewport_height() -> f64 {
    600.0
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        chart = %config.chart.file,
                        buffer_capacity = config.sampler.buffer_capacity,
                        mode = ?config.sampler.mode,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Fresh session configured with this buffer capacity and mode
    pub fn new_session(&self, chart: Arc<ReferenceChart>) -> SamplerSession {
        SamplerSession::new(chart)
            .capacity(self.sampler.buffer_capacity)
            .mode(self.sampler.mode.into())
    }
}
