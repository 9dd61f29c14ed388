use crate::args::{Command, KpiArgs};
use crate::error::ConfigError;

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Options given on the command line are left untouched.
///
/// # Errors
///
/// Returns an error when the config sets conflicting options.
pub fn apply_config(args: &mut KpiArgs, config: &ConfigFile) -> Result<(), ConfigError> {
    if config.db_path.is_some() && config.snapshot_path.is_some() {
        return Err(ConfigError::Conflict {
            left: "db_path",
            right: "snapshot_path",
        });
    }

    // A data source chosen on the command line replaces the configured one.
    if args.db_path.is_none() && args.snapshot_path.is_none() {
        args.db_path.clone_from(&config.db_path);
        args.snapshot_path.clone_from(&config.snapshot_path);
    }

    if args.format.is_none() {
        args.format = config.format;
    }

    if args.user_id.is_none()
        && let Some(user_id) = config.user_id.clone()
    {
        args.user_id = Some(user_id);
    }

    if args.token.is_none()
        && let Some(token) = config.token.clone()
    {
        args.token = Some(token);
    }

    if let Some(limit) = config.limit {
        let page = match &mut args.command {
            Command::Runtime(runtime) => &mut runtime.page,
            Command::Tokens(tokens) => &mut tokens.page,
        };
        if page.limit.is_none() {
            page.limit = Some(limit);
        }
    }

    if config.verbose == Some(true) {
        args.verbose = true;
    }
    if config.no_color == Some(true) {
        args.no_color = true;
    }

    Ok(())
}
