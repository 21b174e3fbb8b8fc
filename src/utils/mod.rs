//! Utility modules shared by the synthesizers and device helpers

pub mod logging;

pub use logging::init_logger;
