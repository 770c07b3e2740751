//! CLI command handlers. Each command is in its own file.

mod build;
mod config;
mod decode;
mod preview;
mod session;

pub use build::run_build;
pub use config::{run_config_path, run_config_show};
pub use decode::run_decode;
pub use preview::run_preview;
pub use session::run_session;
