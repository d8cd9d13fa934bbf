//! Public session API and the crate-wide error type.

mod error;
mod session;

pub use error::SampleError;
pub use session::{SamplerSession, ScreenRect};
