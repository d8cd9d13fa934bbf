use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::AppError;

/// A screen position written as `"X,Y"`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_tuple(self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl fmt::Display for ScreenPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for ScreenPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or_else(|| format!("invalid coordinate {v:?} in {s:?}"))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

impl TryFrom<String> for ScreenPoint {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One recorded user interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Click (no `to`) or drag selection
    Select {
        from: ScreenPoint,
        #[serde(default)]
        to: Option<ScreenPoint>,
    },
    /// Mouse wheel or zoom button
    Zoom {
        factor: f64,
        #[serde(default)]
        anchor: Option<ScreenPoint>,
    },
    Pan {
        dx: f64,
        dy: f64,
    },
    /// Commit an explicit hex color, or the running aggregate when omitted
    Commit {
        #[serde(default)]
        color: Option<String>,
    },
    RemoveSample {
        index: usize,
    },
    RemovePalette {
        index: usize,
    },
    Clear,
    Quantize,
}

/// A recorded sampling session to replay against an image
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionScript {
    /// Image path, relative to the script file
    pub image: PathBuf,

    #[serde(default)]
    pub events: Vec<Event>,
}

impl InteractionScript {
    pub fn parse(content: &str) -> Result<Self, AppError> {
        serde_yaml::from_str(content).map_err(|e| AppError::Script(e.to_string()))
    }

    /// Load a script and resolve its image path against the script's directory
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let mut script = Self::parse(&content)?;
        if script.image.is_relative() {
            if let Some(dir) = path.parent() {
                script.image = dir.join(&script.image);
            }
        }
        tracing::debug!(
            image = %script.image.display(),
            events = script.events.len(),
            "Loaded interaction script"
        );
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_point() {
        assert_eq!("10,20".parse::<ScreenPoint>(), Ok(ScreenPoint::new(10.0, 20.0)));
        assert_eq!(" 1.5 , -2 ".parse::<ScreenPoint>(), Ok(ScreenPoint::new(1.5, -2.0)));
        assert!("10".parse::<ScreenPoint>().is_err());
        assert!("a,b".parse::<ScreenPoint>().is_err());
        assert!("NaN,1".parse::<ScreenPoint>().is_err());
    }

    #[test]
    fn test_point_display() {
        assert_eq!(ScreenPoint::new(3.0, 4.5).to_string(), "3,4.5");
    }

    #[test]
    fn test_parse_all_events() {
        let yaml = r##"
image: photo.png
events:
  - event: select
    from: "0,0"
    to: "10,10"
  - event: select
    from: "5,5"
  - event: zoom
    factor: 1.25
    anchor: "100,50"
  - event: zoom
    factor: 0.8
  - event: pan
    dx: 10
    dy: -4
  - event: commit
  - event: commit
    color: "#ff0000"
  - event: remove_sample
    index: 0
  - event: remove_palette
    index: 1
  - event: clear
  - event: quantize
"##;
        let script = InteractionScript::parse(yaml).unwrap();
        assert_eq!(script.image, PathBuf::from("photo.png"));
        assert_eq!(
            script.events,
            vec![
                Event::Select {
                    from: ScreenPoint::new(0.0, 0.0),
                    to: Some(ScreenPoint::new(10.0, 10.0)),
                },
                Event::Select {
                    from: ScreenPoint::new(5.0, 5.0),
                    to: None,
                },
                Event::Zoom {
                    factor: 1.25,
                    anchor: Some(ScreenPoint::new(100.0, 50.0)),
                },
                Event::Zoom {
                    factor: 0.8,
                    anchor: None,
                },
                Event::Pan { dx: 10.0, dy: -4.0 },
                Event::Commit { color: None },
                Event::Commit {
                    color: Some("#ff0000".to_string()),
                },
                Event::RemoveSample { index: 0 },
                Event::RemovePalette { index: 1 },
                Event::Clear,
                Event::Quantize,
            ]
        );
    }

    #[test]
    fn test_unknown_event_is_script_error() {
        let err = InteractionScript::parse("image: a.png\nevents:\n  - event: explode\n").unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_bad_point_is_script_error() {
        let yaml = "image: a.png\nevents:\n  - event: select\n    from: \"oops\"\n";
        assert!(matches!(
            InteractionScript::parse(yaml),
            Err(AppError::Script(_))
        ));
    }

    #[test]
    fn test_load_resolves_relative_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.yaml");
        std::fs::write(&path, "image: chart.png\n").unwrap();

        let script = InteractionScript::load(&path).unwrap();
        assert_eq!(script.image, dir.path().join("chart.png"));
        assert!(script.events.is_empty());
    }
}
