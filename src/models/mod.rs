pub mod config;
pub mod script;

pub use config::{AppConfig, ChartConfig, ModeSetting, SamplerConfig, ViewportConfig};
pub use script::{Event, InteractionScript, ScreenPoint};
