pub mod chart_loader;
pub mod png_source;
pub mod replay;
pub mod report;

pub use chart_loader::{load_chart, parse_chart};
pub use png_source::{decode_png, open_png};
pub use replay::{replay, ReplayReport, StepOutcome};
pub use report::{ColorReport, MatchReport};
