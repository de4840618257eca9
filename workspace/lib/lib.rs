//! Shared plumbing for the spiral design binaries: parameter files and logging.

pub mod logger;
pub mod params;
