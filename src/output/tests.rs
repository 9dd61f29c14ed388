use super::*;
use crate::error::{AppError, AppResult};
use crate::kpi::Identity;
use chrono::DateTime;

fn info(flow_node_id: &str, median: Option<i64>) -> RuntimeInformation {
    RuntimeInformation {
        flow_node_id: flow_node_id.to_owned(),
        process_model_id: "order_process".to_owned(),
        min_runtime_in_ms: 100,
        max_runtime_in_ms: 400,
        arithmetic_mean_runtime_in_ms: 250,
        first_quartile_runtime_in_ms: median.map(|_| 100),
        median_runtime_in_ms: median,
        third_quartile_runtime_in_ms: median.map(|_| 400),
    }
}

#[test]
fn runtime_list_text_lists_every_flow_node() -> AppResult<()> {
    let list = RuntimeInformationList {
        flow_node_runtime_information: vec![info("Task_1", Some(250)), info("Task_2", None)],
        total_count: 3,
    };
    let text = render_runtime_list(&list, OutputFormat::Text)?;
    let mut lines = text.lines();
    if lines.next() != Some("Flow nodes: 2 of 3") {
        return Err(AppError::validation(format!("Unexpected header: {}", text)));
    }
    if lines.next()
        != Some("Task_1: min=100ms max=400ms mean=250ms q1=100ms median=250ms q3=400ms")
    {
        return Err(AppError::validation(format!("Unexpected first line: {}", text)));
    }
    if lines.next() != Some("Task_2: min=100ms max=400ms mean=250ms q1=n/a median=n/a q3=n/a") {
        return Err(AppError::validation(format!("Unexpected second line: {}", text)));
    }
    Ok(())
}

#[test]
fn runtime_json_uses_wire_names() -> AppResult<()> {
    let json = render_runtime(&info("Task_1", None), OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    if value.get("flowNodeId").and_then(serde_json::Value::as_str) != Some("Task_1") {
        return Err(AppError::validation(format!("Missing flowNodeId: {}", json)));
    }
    if value.get("medianRuntimeInMs") != Some(&serde_json::Value::Null) {
        return Err(AppError::validation(format!("Expected null median: {}", json)));
    }
    Ok(())
}

#[test]
fn token_list_text_and_json() -> AppResult<()> {
    let list = ActiveTokenList {
        active_tokens: vec![ActiveToken {
            process_instance_id: "pi-1".to_owned(),
            process_model_id: "order_process".to_owned(),
            correlation_id: "corr-1".to_owned(),
            flow_node_id: "Task_1".to_owned(),
            flow_node_instance_id: "fni-1".to_owned(),
            identity: Identity::new("alice".to_owned(), "token".to_owned()),
            created_at: DateTime::from_timestamp_millis(0).unwrap_or_default(),
            payload: serde_json::json!({}),
        }],
        total_count: 1,
    };

    let text = render_token_list(&list, OutputFormat::Text)?;
    if !text.starts_with("Active tokens: 1 of 1\nTask_1 (fni-1) instance=pi-1") {
        return Err(AppError::validation(format!("Unexpected text: {}", text)));
    }

    let json = render_token_list(&list, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    if value.get("totalCount").and_then(serde_json::Value::as_u64) != Some(1) {
        return Err(AppError::validation(format!("Unexpected totalCount: {}", json)));
    }
    Ok(())
}
