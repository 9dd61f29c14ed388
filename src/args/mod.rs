//! CLI argument types and parsing helpers.
mod cli;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Command, KpiArgs, PageArgs, RuntimeArgs, TokensArgs};
pub use types::OutputFormat;
