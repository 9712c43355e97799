//! Rule-based scoring for organization directory profiles.
//!
//! The [`scoring`] module holds the engine: rule sets are plain data resolved
//! per organization category, evaluated against an in-memory snapshot, and
//! aggregated into group and total scores. The remaining modules carry the
//! configuration, telemetry, and error plumbing shared with the API service.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
