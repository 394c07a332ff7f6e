//! Configuration and logging.
//!
//! - [`app_data`] - User configuration file (`AppConfig`)
//! - [`logging`] - Per-run log file and `tracing` setup

pub mod app_data;
pub mod logging;

pub use app_data::*;
pub use logging::SessionLog;
