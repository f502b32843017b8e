//! Health risk profiler core.
//!
//! Turns lifestyle survey captures (free text, structured JSON, or simulated
//! document scans) into a deterministic risk assessment with actionable,
//! non-diagnostic recommendations. The HTTP surface in [`assessment`] is a
//! thin layer over the same pipeline the command line tooling uses.

pub mod assessment;
pub mod config;
pub mod error;
pub mod intake;
pub mod metrics;
pub mod ocr;
pub mod recommend;
pub mod scoring;
pub mod telemetry;
pub mod validation;

pub use config::{AppConfig, AppEnvironment, ConfigError};
pub use error::AppError;
