//! Test fixtures: scratch directories with PNG images, charts and scripts.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Colors used by the fixture images
pub mod colors {
    pub const RED: [u8; 3] = [200, 10, 10];
    pub const BLUE: [u8; 3] = [10, 10, 200];
    pub const GRAY: [u8; 3] = [128, 128, 128];
}

/// Two-entry chart: pure-ish red and green
pub const RG_CHART: &str = r##"
name: Red/Green
entries:
  - { code: A, hex: "#ff0000" }
  - { code: B, hex: "#00ff00" }
"##;

/// A temporary directory that cleans itself up
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a text file and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    /// Write an 8-bit RGB PNG whose pixel at (x, y) is `pixel(x, y)`
    pub fn write_png<F>(&self, name: &str, width: u32, height: u32, pixel: F) -> PathBuf
    where
        F: Fn(u32, u32) -> [u8; 3],
    {
        let path = self.dir.path().join(name);
        std::fs::write(&path, encode_rgb_png(width, height, pixel)).expect("write png");
        path
    }

    /// 10x10 image, left half red and right half blue
    pub fn split_png(&self, name: &str) -> PathBuf {
        self.write_png(name, 10, 10, |x, _| if x < 5 { colors::RED } else { colors::BLUE })
    }
}

/// Encode an RGB PNG in memory
pub fn encode_rgb_png<F>(width: u32, height: u32, pixel: F) -> Vec<u8>
where
    F: Fn(u32, u32) -> [u8; 3],
{
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&pixel(x, y));
        }
    }

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(&data).expect("png data");
    }
    out
}
