use super::{apply_config, load_config_file, types::ConfigFile};
use clap::Parser;
use tempfile::tempdir;

use crate::args::{Command, KpiArgs, OutputFormat};
use crate::error::{AppError, AppResult, ConfigError};

fn runtime_args(extra: &[&str]) -> AppResult<KpiArgs> {
    let mut argv = vec!["flowkpi", "runtime", "--process-model", "order_process"];
    argv.extend_from_slice(extra);
    Ok(KpiArgs::try_parse_from(argv)?)
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("flowkpi.toml");
    let content = r#"
db_path = "engine.sqlite"
format = "json"
limit = 25
user_id = "alice"
verbose = true
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.db_path.as_deref() != Some("engine.sqlite") {
        return Err(AppError::config("Unexpected db_path"));
    }
    if config.format != Some(OutputFormat::Json) {
        return Err(AppError::config("Unexpected format"));
    }
    if config.limit != Some(25) {
        return Err(AppError::config("Unexpected limit"));
    }
    if config.verbose != Some(true) {
        return Err(AppError::config("Expected verbose"));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("flowkpi.json");
    std::fs::write(
        &path,
        r#"{ "snapshot_path": "snapshot.json", "format": "text", "no_color": true }"#,
    )?;

    let config = load_config_file(&path)?;
    if config.snapshot_path.as_deref() != Some("snapshot.json") {
        return Err(AppError::config("Unexpected snapshot_path"));
    }
    if config.no_color != Some(true) {
        return Err(AppError::config("Expected no_color"));
    }
    Ok(())
}

#[test]
fn unknown_keys_and_extensions_are_rejected() -> AppResult<()> {
    let dir = tempdir()?;
    let unknown_key = dir.path().join("flowkpi.toml");
    std::fs::write(&unknown_key, "url = \"http://localhost\"\n")?;
    if !matches!(
        load_config_file(&unknown_key),
        Err(AppError::Config(ConfigError::ParseToml { .. }))
    ) {
        return Err(AppError::config("Expected TOML parse error"));
    }

    let yaml = dir.path().join("flowkpi.yaml");
    std::fs::write(&yaml, "db_path: engine.sqlite\n")?;
    if !matches!(
        load_config_file(&yaml),
        Err(AppError::Config(ConfigError::UnsupportedExtension { .. }))
    ) {
        return Err(AppError::config("Expected unsupported extension error"));
    }

    let bare = dir.path().join("flowkpi");
    std::fs::write(&bare, "")?;
    if !matches!(
        load_config_file(&bare),
        Err(AppError::Config(ConfigError::MissingExtension))
    ) {
        return Err(AppError::config("Expected missing extension error"));
    }
    Ok(())
}

#[test]
fn config_fills_unset_options() -> AppResult<()> {
    let mut args = runtime_args(&[])?;
    let config = ConfigFile {
        snapshot_path: Some("snapshot.json".to_owned()),
        format: Some(OutputFormat::Json),
        limit: Some(10),
        user_id: Some("alice".to_owned()),
        token: Some("secret".to_owned()),
        verbose: Some(true),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &config)?;

    if args.snapshot_path.as_deref() != Some("snapshot.json") {
        return Err(AppError::config("Expected snapshot_path from config"));
    }
    if args.format != Some(OutputFormat::Json) {
        return Err(AppError::config("Expected format from config"));
    }
    if args.user_id.as_deref() != Some("alice") || args.token.as_deref() != Some("secret") {
        return Err(AppError::config("Expected identity from config"));
    }
    if !args.verbose {
        return Err(AppError::config("Expected verbose from config"));
    }
    match args.command {
        Command::Runtime(runtime) if runtime.page.limit == Some(10) => Ok(()),
        Command::Runtime(_) | Command::Tokens(_) => {
            Err(AppError::config("Expected limit from config"))
        }
    }
}

#[test]
fn cli_values_win_over_config() -> AppResult<()> {
    let mut args = runtime_args(&["--db", "cli.sqlite", "--format", "text", "--limit", "3"])?;
    let config = ConfigFile {
        snapshot_path: Some("snapshot.json".to_owned()),
        format: Some(OutputFormat::Json),
        limit: Some(10),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &config)?;

    if args.db_path.as_deref() != Some("cli.sqlite") || args.snapshot_path.is_some() {
        return Err(AppError::config("Expected CLI data source to win"));
    }
    if args.format != Some(OutputFormat::Text) {
        return Err(AppError::config("Expected CLI format to win"));
    }
    match args.command {
        Command::Runtime(runtime) if runtime.page.limit == Some(3) => Ok(()),
        Command::Runtime(_) | Command::Tokens(_) => {
            Err(AppError::config("Expected CLI limit to win"))
        }
    }
}

#[test]
fn conflicting_data_sources_in_config() -> AppResult<()> {
    let mut args = runtime_args(&[])?;
    let config = ConfigFile {
        db_path: Some("engine.sqlite".to_owned()),
        snapshot_path: Some("snapshot.json".to_owned()),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &config) {
        Err(ConfigError::Conflict {
            left: "db_path",
            right: "snapshot_path",
        }) => Ok(()),
        Err(err) => Err(AppError::config(format!("Unexpected error: {}", err))),
        Ok(()) => Err(AppError::config("Expected conflict error")),
    }
}
