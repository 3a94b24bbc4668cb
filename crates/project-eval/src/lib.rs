pub mod config;
pub mod error;
pub mod evaluation;
pub mod intake;
pub mod sources;
pub mod telemetry;
