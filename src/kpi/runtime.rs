use super::types::{MetricRecord, MetricType};
use crate::error::{KpiError, MissingMetric};

/// Runtime of one flow node instance in whole milliseconds.
///
/// Measured from the first enter record to the first exit or error record.
/// Callers hand in the records of a single, finished instance.
///
/// # Errors
///
/// Returns [`KpiError::UnpairedInstance`] when the enter or the exit/error
/// record is missing. Finished-instance filtering is expected to rule this out.
pub fn runtime_of(instance_metrics: &[&MetricRecord]) -> Result<i64, KpiError> {
    let enter = instance_metrics
        .iter()
        .find(|record| record.metric_type == MetricType::OnEnter)
        .ok_or_else(|| unpaired(instance_metrics, MissingMetric::Enter))?;

    let exit = instance_metrics
        .iter()
        .find(|record| matches!(record.metric_type, MetricType::OnExit | MetricType::OnError))
        .ok_or_else(|| unpaired(instance_metrics, MissingMetric::Exit))?;

    Ok(exit
        .timestamp
        .signed_duration_since(enter.timestamp)
        .num_milliseconds())
}

fn unpaired(instance_metrics: &[&MetricRecord], missing: MissingMetric) -> KpiError {
    let flow_node_instance_id = instance_metrics
        .iter()
        .find_map(|record| record.flow_node_instance_id())
        .unwrap_or_default()
        .to_owned();
    KpiError::UnpairedInstance {
        flow_node_instance_id,
        missing,
    }
}
