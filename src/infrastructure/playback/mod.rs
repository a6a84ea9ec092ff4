//! Prompt playback adapters

pub mod noop;
pub mod rodio;

pub use noop::NoopPlayer;
pub use rodio::RodioPlayer;
