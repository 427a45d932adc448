//! Pipeline orchestration module.

mod orchestrator;
mod playback;
mod stats;

pub use orchestrator::{Pipeline, PipelineConfig};
pub use playback::{spawn_stdin_reader, Playback, PlaybackConfig};
pub use stats::{PipelineStats, PlaybackStats};
