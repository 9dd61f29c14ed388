//! Core library for the `flowkpi` CLI.
//!
//! This crate computes key performance indicators over the metrics and flow
//! node instances a business-process engine records: runtime statistics
//! (min, max, mean, quartiles) per flow node of a process model, and the
//! process tokens currently held by running or suspended flow node
//! instances. The `flowkpi` binary reads an engine SQLite database or a JSON
//! snapshot and renders results as text or JSON.
pub mod args;
pub mod config;
pub mod error;
pub mod kpi;
pub mod output;
pub mod store;

mod entry;
mod system;

pub use entry::run;
