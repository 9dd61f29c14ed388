use std::collections::HashSet;

use super::types::{MetricRecord, MetricType};

/// Checks whether `metric` belongs to a flow node instance that has stopped running.
///
/// Exit records always qualify. Any other record qualifies only when
/// `all_metrics` holds a record of the same instance whose type proves
/// termination (anything but enter or suspend). Records lacking a flow node
/// id or instance id never qualify.
#[must_use]
pub fn is_complete(metric: &MetricRecord, all_metrics: &[MetricRecord]) -> bool {
    let Some(instance_id) = metric.flow_node_instance_id() else {
        return false;
    };
    if metric.flow_node_id().is_none() {
        return false;
    }
    if metric.metric_type == MetricType::OnExit {
        return true;
    }

    all_metrics.iter().any(|entry| {
        entry.flow_node_instance_id() == Some(instance_id) && entry.metric_type.signals_termination()
    })
}

/// Keeps the records of finished instances, in input order.
///
/// Same decision as [`is_complete`] for every record, evaluated against the
/// whole input, with the set of terminated instances computed once.
#[must_use]
pub fn retain_completed<'records, I>(metrics: I) -> Vec<&'records MetricRecord>
where
    I: IntoIterator<Item = &'records MetricRecord>,
{
    let metrics: Vec<&MetricRecord> = metrics.into_iter().collect();

    let terminated: HashSet<&str> = metrics
        .iter()
        .filter(|metric| metric.metric_type.signals_termination())
        .filter_map(|metric| metric.flow_node_instance_id())
        .collect();

    let total = metrics.len();
    let completed: Vec<&MetricRecord> = metrics
        .into_iter()
        .filter(|metric| {
            metric.flow_node_id().is_some()
                && metric
                    .flow_node_instance_id()
                    .is_some_and(|instance_id| terminated.contains(instance_id))
        })
        .collect();

    tracing::debug!(
        "Kept {} of {} metrics from finished flow node instances",
        completed.len(),
        total
    );
    completed
}
