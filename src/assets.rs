//! Asset loading with embedded fallbacks
//!
//! This module provides a unified interface for loading the config file and
//! reference charts with the following behavior:
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set: use the filesystem first, with embedded fallback

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded reference charts
#[derive(RustEmbed)]
#[folder = "assets/charts/"]
#[include = "*.yaml"]
#[include = "*.yml"]
struct EmbeddedCharts;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Where an asset was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetSource {
    Filesystem,
    Embedded,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External charts directory (from CHARTS_DIR env var)
    charts_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(charts_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            charts_dir,
            config_file,
        }
    }

    /// Create a loader from the CHARTS_DIR and CONFIG_FILE env vars
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CHARTS_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    pub fn charts_dir(&self) -> Option<&Path> {
        self.charts_dir.as_deref()
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read a chart file by name
    ///
    /// If an external directory is configured, tries the filesystem first,
    /// then falls back to embedded.
    pub fn read_chart(&self, name: &str) -> io::Result<(Cow<'static, [u8]>, AssetSource)> {
        if let Some(ref dir) = self.charts_dir {
            let full_path = dir.join(name);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading chart from filesystem");
                return Ok((Cow::Owned(fs::read(&full_path)?), AssetSource::Filesystem));
            }
        }

        EmbeddedCharts::get(name)
            .map(|f| {
                tracing::trace!(name, "Loading chart from embedded assets");
                (f.data, AssetSource::Embedded)
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("Chart not found: {name}"))
            })
    }

    /// Read a chart file as a UTF-8 string
    pub fn read_chart_string(&self, name: &str) -> io::Result<String> {
        let (bytes, _) = self.read_chart(name)?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// List available charts (merged view of embedded + external)
    pub fn list_charts(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = EmbeddedCharts::iter().map(|n| n.to_string()).collect();

        if let Some(ref dir) = self.charts_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    let is_yaml = matches!(
                        path.extension().and_then(|e| e.to_str()),
                        Some("yaml") | Some("yml")
                    );
                    if is_yaml {
                        names.insert(entry.file_name().to_string_lossy().into_owned());
                    }
                }
            }
        }

        names.into_iter().collect()
    }

    /// Read config content as a string
    pub fn read_config_string(&self) -> io::Result<String> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return fs::read_to_string(path);
            }
            tracing::warn!(path = %path.display(), "CONFIG_FILE does not exist, using embedded config");
        }

        let file = EmbeddedConfig::get("config.yaml").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml missing")
        })?;
        String::from_utf8(file.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Source the config will be read from
    pub fn config_source(&self) -> AssetSource {
        match self.config_file {
            Some(ref path) if path.exists() => AssetSource::Filesystem,
            _ => AssetSource::Embedded,
        }
    }
}
