//! Replays a recorded [`InteractionScript`] against a [`SamplerSession`].
//!
//! Each event is applied in order, the same way a UI would dispatch it. An
//! event that fails (removing an index that does not exist, committing an
//! unparsable color) is recorded in its step outcome and replay continues,
//! since a live session would also just report the error and carry on.

use serde::Serialize;
use swatch_core::{PixelSource, Rgb, SamplerSession, ScreenRect};

use crate::models::script::Event;
use crate::models::ViewportConfig;
use crate::services::report::ColorReport;

/// Result of one replayed event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: usize,
    pub event: &'static str,
    /// Color produced by the step: the running aggregate after a select,
    /// the committed color after a commit, the removed color after a removal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Final session state after replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub width: u32,
    pub height: u32,
    pub fit_zoom: f64,
    pub zoom: f64,
    pub pan: (f64, f64),
    pub steps: Vec<StepOutcome>,
    pub samples: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<ColorReport>,
    pub palette: Vec<String>,
}

impl ReplayReport {
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps.iter().filter(|s| s.error.is_some())
    }
}

/// Fit the image into the viewport, then apply every event in order.
pub fn replay<S: PixelSource + ?Sized>(
    session: &mut SamplerSession,
    image: &S,
    viewport: ViewportConfig,
    events: &[Event],
) -> Result<ReplayReport, crate::error::AppError> {
    let fit_zoom = session.on_image_loaded(image, viewport.width, viewport.height)?;

    let steps: Vec<StepOutcome> = events
        .iter()
        .enumerate()
        .map(|(step, event)| {
            let outcome = apply(session, image, event);
            let (color, error) = match outcome {
                Ok(color) => (color.map(Rgb::to_hex), None),
                Err(e) => {
                    tracing::warn!(step, event = event_name(event), %e, "Replay step failed");
                    (None, Some(e))
                }
            };
            StepOutcome {
                step,
                event: event_name(event),
                color,
                error,
            }
        })
        .collect();

    let state = session.viewport_state();
    Ok(ReplayReport {
        width: image.width(),
        height: image.height(),
        fit_zoom,
        zoom: state.zoom(),
        pan: state.pan(),
        steps,
        samples: session.samples().iter().map(Rgb::to_hex).collect(),
        aggregate: session
            .current_aggregate()
            .map(|c| ColorReport::new(c, session.chart())),
        palette: session.palette().as_slice().to_vec(),
    })
}

fn apply<S: PixelSource + ?Sized>(
    session: &mut SamplerSession,
    image: &S,
    event: &Event,
) -> Result<Option<Rgb>, String> {
    match event {
        Event::Select { from, to } => {
            let to = to.unwrap_or(*from);
            let rect = ScreenRect::new(from.x, from.y, to.x, to.y);
            Ok(session.on_region_selected(rect, image))
        }
        Event::Zoom { factor, anchor } => {
            session.on_zoom_requested(*factor, anchor.map(|a| a.as_tuple()));
            Ok(None)
        }
        Event::Pan { dx, dy } => {
            session.on_pan(*dx, *dy);
            Ok(None)
        }
        Event::Commit { color: Some(hex) } => {
            let color: Rgb = hex.parse().map_err(|e| format!("invalid color {hex:?}: {e}"))?;
            session.on_commit_to_palette(color);
            Ok(Some(color))
        }
        Event::Commit { color: None } => session
            .on_commit_current()
            .map(Some)
            .ok_or_else(|| "no samples to commit".to_string()),
        Event::RemoveSample { index } => session
            .on_remove_sample(*index)
            .map(Some)
            .map_err(|e| e.to_string()),
        Event::RemovePalette { index } => {
            let hex = session
                .on_remove_from_palette(*index)
                .map_err(|e| e.to_string())?;
            Ok(hex.parse().ok())
        }
        Event::Clear => {
            session.on_clear_samples();
            Ok(None)
        }
        Event::Quantize => {
            session.on_quantize_requested();
            Ok(session.current_aggregate())
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Select { .. } => "select",
        Event::Zoom { .. } => "zoom",
        Event::Pan { .. } => "pan",
        Event::Commit { .. } => "commit",
        Event::RemoveSample { .. } => "remove_sample",
        Event::RemovePalette { .. } => "remove_palette",
        Event::Clear => "clear",
        Event::Quantize => "quantize",
    }
}
