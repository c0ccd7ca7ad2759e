//! CLI command implementations.

mod config;
mod doctor;
mod lookup;
mod mcp;
mod serve;

pub use config::run_config;
pub use doctor::run_doctor;
pub use lookup::{run_channel, run_comments, run_search, run_transcript, run_video};
pub use mcp::run_mcp;
pub use serve::run_serve;
