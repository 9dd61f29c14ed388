//! Text and JSON rendering of KPI results.
use crate::args::OutputFormat;
use crate::error::AppResult;
use crate::kpi::{ActiveToken, ActiveTokenList, RuntimeInformation, RuntimeInformationList};

#[cfg(test)]
mod tests;

/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_runtime_list(list: &RuntimeInformationList, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(list)?),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            lines.push(format!(
                "Flow nodes: {} of {}",
                list.flow_node_runtime_information.len(),
                list.total_count
            ));
            for info in &list.flow_node_runtime_information {
                lines.push(runtime_line(info));
            }
            Ok(lines.join("\n"))
        }
    }
}

/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_runtime(info: &RuntimeInformation, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(info)?),
        OutputFormat::Text => Ok(runtime_line(info)),
    }
}

/// # Errors
///
/// Returns an error when JSON serialization fails.
pub fn render_token_list(list: &ActiveTokenList, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(list)?),
        OutputFormat::Text => {
            let mut lines = Vec::new();
            lines.push(format!(
                "Active tokens: {} of {}",
                list.active_tokens.len(),
                list.total_count
            ));
            for token in &list.active_tokens {
                lines.push(token_line(token));
            }
            Ok(lines.join("\n"))
        }
    }
}

fn runtime_line(info: &RuntimeInformation) -> String {
    format!(
        "{}: min={}ms max={}ms mean={}ms q1={} median={} q3={}",
        info.flow_node_id,
        info.min_runtime_in_ms,
        info.max_runtime_in_ms,
        info.arithmetic_mean_runtime_in_ms,
        format_opt_ms(info.first_quartile_runtime_in_ms),
        format_opt_ms(info.median_runtime_in_ms),
        format_opt_ms(info.third_quartile_runtime_in_ms)
    )
}

fn token_line(token: &ActiveToken) -> String {
    format!(
        "{} ({}) instance={} correlation={} owner={} since={}",
        token.flow_node_id,
        token.flow_node_instance_id,
        token.process_instance_id,
        token.correlation_id,
        token.identity.user_id,
        token.created_at.to_rfc3339()
    )
}

fn format_opt_ms(value: Option<i64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |ms| format!("{}ms", ms))
}
