use chrono::{DateTime, Utc};

use super::types::{
    FlowNodeInstance, FlowNodeInstanceState, Identity, MetricRecord, MetricType, ProcessToken,
};

pub(crate) const PROCESS_MODEL: &str = "order_process";

pub(crate) fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

pub(crate) fn metric(
    flow_node_id: &str,
    instance_id: &str,
    metric_type: MetricType,
    millis: i64,
) -> MetricRecord {
    MetricRecord {
        flow_node_id: Some(flow_node_id.to_owned()),
        flow_node_instance_id: Some(instance_id.to_owned()),
        process_model_id: Some(PROCESS_MODEL.to_owned()),
        process_instance_id: Some("pi-1".to_owned()),
        correlation_id: Some("corr-1".to_owned()),
        metric_type,
        timestamp: at(millis),
    }
}

pub(crate) fn identity() -> Identity {
    Identity::new("alice".to_owned(), "token-alice".to_owned())
}

pub(crate) fn instance(
    id: &str,
    flow_node_id: &str,
    state: FlowNodeInstanceState,
) -> FlowNodeInstance {
    FlowNodeInstance {
        id: id.to_owned(),
        flow_node_id: flow_node_id.to_owned(),
        process_model_id: PROCESS_MODEL.to_owned(),
        process_instance_id: "pi-1".to_owned(),
        correlation_id: "corr-1".to_owned(),
        state,
        tokens: vec![ProcessToken {
            process_instance_id: "pi-1".to_owned(),
            process_model_id: PROCESS_MODEL.to_owned(),
            correlation_id: "corr-1".to_owned(),
            identity: identity(),
            created_at: at(1_000),
            payload: serde_json::json!({ "step": id }),
        }],
        owner: identity(),
    }
}
