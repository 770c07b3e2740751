pub mod config;
pub mod logging;

pub mod codec;
pub mod params;
pub mod preview;
pub mod session;
