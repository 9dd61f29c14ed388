use super::*;
use crate::error::{AppError, AppResult};
use crate::kpi::Page;
use clap::Parser;

#[test]
fn parse_runtime_subcommand() -> AppResult<()> {
    let args = KpiArgs::try_parse_from([
        "flowkpi",
        "runtime",
        "--process-model",
        "order_process",
        "--flow-node",
        "Task_1",
        "--offset",
        "2",
        "--limit",
        "5",
        "--db",
        "engine.sqlite",
    ])?;
    match args.command {
        Command::Runtime(runtime) => {
            if runtime.process_model != "order_process" {
                return Err(AppError::validation("Unexpected process model"));
            }
            if runtime.flow_node.as_deref() != Some("Task_1") {
                return Err(AppError::validation("Unexpected flow node"));
            }
            if runtime.page.page() != Page::new(2, 5) {
                return Err(AppError::validation("Unexpected page"));
            }
        }
        Command::Tokens(_) => return Err(AppError::validation("Expected runtime subcommand")),
    }
    if args.db_path.as_deref() != Some("engine.sqlite") {
        return Err(AppError::validation("Expected global --db after subcommand"));
    }
    Ok(())
}

#[test]
fn parse_tokens_subcommand_defaults() -> AppResult<()> {
    let args = KpiArgs::try_parse_from([
        "flowkpi",
        "--format",
        "json",
        "tokens",
        "--correlation",
        "corr-1",
        "--process-model",
        "order_process",
    ])?;
    if args.format != Some(OutputFormat::Json) {
        return Err(AppError::validation("Expected json format"));
    }
    match args.command {
        Command::Tokens(tokens) => {
            if tokens.correlation.as_deref() != Some("corr-1") {
                return Err(AppError::validation("Unexpected correlation"));
            }
            if tokens.page.page() != Page::default() {
                return Err(AppError::validation("Expected default page"));
            }
            Ok(())
        }
        Command::Runtime(_) => Err(AppError::validation("Expected tokens subcommand")),
    }
}

#[test]
fn empty_identifiers_are_rejected() {
    let result = KpiArgs::try_parse_from(["flowkpi", "runtime", "--process-model", "  "]);
    assert!(result.is_err());
}

#[test]
fn output_format_from_str() -> AppResult<()> {
    let parsed: OutputFormat = " JSON ".parse()?;
    if parsed != OutputFormat::Json {
        return Err(AppError::validation("Expected json"));
    }
    if "yaml".parse::<OutputFormat>().is_ok() {
        return Err(AppError::validation("Expected yaml to be rejected"));
    }
    Ok(())
}
