//! HTTP Handlers

mod cache;
mod health;
mod tts;
mod voices;

pub use cache::*;
pub use health::*;
pub use tts::*;
pub use voices::*;
