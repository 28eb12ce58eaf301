pub mod config;
pub mod error;
pub mod estimating;
pub mod telemetry;
