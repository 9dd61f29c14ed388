use super::completion::retain_completed;
use super::grouping::{group_by_flow_node, group_by_instance};
use super::quartiles::RuntimeStatistics;
use super::runtime::runtime_of;
use super::types::{Identity, MetricRecord, RuntimeInformation};
use crate::error::{AppResult, KpiError};
use crate::store::MetricsStore;

/// Runtime statistics for every flow node of `process_model_id` that has at
/// least one finished execution, in first-seen order.
///
/// # Errors
///
/// Returns [`KpiError::UnpairedInstance`] when a finished instance lacks its
/// enter or exit record.
pub fn runtime_information_for_process_model(
    process_model_id: &str,
    metrics: &[MetricRecord],
) -> Result<Vec<RuntimeInformation>, KpiError> {
    let completed = retain_completed(metrics);
    group_by_flow_node(completed)
        .iter()
        .map(|(flow_node_id, records)| {
            build_runtime_information(process_model_id, flow_node_id, records)
        })
        .collect()
}

/// Runtime statistics of a single flow node.
///
/// # Errors
///
/// Returns [`KpiError::NoCompletedExecutions`] when the flow node has no
/// finished execution, or [`KpiError::UnpairedInstance`] as above.
pub fn runtime_information_for_flow_node(
    process_model_id: &str,
    flow_node_id: &str,
    metrics: &[MetricRecord],
) -> Result<RuntimeInformation, KpiError> {
    let completed = retain_completed(
        metrics
            .iter()
            .filter(|metric| metric.flow_node_id() == Some(flow_node_id)),
    );
    if completed.is_empty() {
        return Err(KpiError::NoCompletedExecutions {
            process_model_id: process_model_id.to_owned(),
            flow_node_id: flow_node_id.to_owned(),
        });
    }
    build_runtime_information(process_model_id, flow_node_id, &completed)
}

fn build_runtime_information(
    process_model_id: &str,
    flow_node_id: &str,
    metrics: &[&MetricRecord],
) -> Result<RuntimeInformation, KpiError> {
    let runtimes = group_by_instance(metrics.iter().copied())
        .iter()
        .map(|(_, records)| runtime_of(records))
        .collect::<Result<Vec<i64>, KpiError>>()
        .inspect_err(|err| {
            tracing::error!("Runtime calculation for flow node '{}' failed: {}", flow_node_id, err);
        })?;

    let stats = RuntimeStatistics::from_runtimes(&runtimes)?;
    tracing::debug!(
        "Flow node '{}' has {} finished executions",
        flow_node_id,
        runtimes.len()
    );

    Ok(RuntimeInformation {
        flow_node_id: flow_node_id.to_owned(),
        process_model_id: process_model_id.to_owned(),
        min_runtime_in_ms: stats.min,
        max_runtime_in_ms: stats.max,
        arithmetic_mean_runtime_in_ms: stats.mean,
        first_quartile_runtime_in_ms: stats.quartiles.first,
        median_runtime_in_ms: stats.quartiles.median,
        third_quartile_runtime_in_ms: stats.quartiles.third,
    })
}

/// Fetches metrics from a [`MetricsStore`] and aggregates them per flow node.
#[derive(Debug, Clone)]
pub struct RuntimeInformationService<M> {
    store: M,
}

impl<M> RuntimeInformationService<M>
where
    M: MetricsStore,
{
    #[must_use]
    pub const fn new(store: M) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns store failures unchanged, or a [`KpiError`] from aggregation.
    pub async fn for_process_model(
        &self,
        identity: &Identity,
        process_model_id: &str,
    ) -> AppResult<Vec<RuntimeInformation>> {
        let metrics = self
            .store
            .read_metrics_for_process_model(identity, process_model_id)
            .await?;
        Ok(runtime_information_for_process_model(
            process_model_id,
            &metrics,
        )?)
    }

    /// # Errors
    ///
    /// Returns store failures unchanged, or a [`KpiError`] from aggregation.
    pub async fn for_flow_node(
        &self,
        identity: &Identity,
        process_model_id: &str,
        flow_node_id: &str,
    ) -> AppResult<RuntimeInformation> {
        let metrics = self
            .store
            .read_metrics_for_process_model(identity, process_model_id)
            .await?;
        Ok(runtime_information_for_flow_node(
            process_model_id,
            flow_node_id,
            &metrics,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kpi::test_support::{PROCESS_MODEL, metric};
    use crate::kpi::types::MetricType;

    fn scenario() -> Vec<MetricRecord> {
        vec![
            metric("A", "i1", MetricType::OnEnter, 0),
            metric("A", "i1", MetricType::OnExit, 200),
            metric("A", "i2", MetricType::OnEnter, 0),
        ]
    }

    #[test]
    fn still_running_instances_are_ignored() {
        let info = runtime_information_for_flow_node(PROCESS_MODEL, "A", &scenario());
        assert_eq!(
            info.ok(),
            Some(RuntimeInformation {
                flow_node_id: "A".to_owned(),
                process_model_id: PROCESS_MODEL.to_owned(),
                min_runtime_in_ms: 200,
                max_runtime_in_ms: 200,
                arithmetic_mean_runtime_in_ms: 200,
                first_quartile_runtime_in_ms: Some(200),
                median_runtime_in_ms: Some(200),
                third_quartile_runtime_in_ms: Some(200),
            })
        );
    }

    #[test]
    fn one_entry_per_flow_node_with_finished_runs() {
        let mut metrics = scenario();
        metrics.extend([
            metric("B", "i3", MetricType::OnEnter, 100),
            metric("C", "i4", MetricType::OnEnter, 100),
            metric("B", "i3", MetricType::OnSuspend, 150),
            metric("B", "i3", MetricType::OnResume, 400),
            metric("B", "i3", MetricType::OnError, 700),
            metric("A", "i5", MetricType::OnEnter, 1_000),
            metric("A", "i5", MetricType::OnExit, 1_600),
        ]);

        let infos = runtime_information_for_process_model(PROCESS_MODEL, &metrics);
        let summary: Option<Vec<(String, i64, i64, i64)>> = infos.ok().map(|infos| {
            infos
                .into_iter()
                .map(|info| {
                    (
                        info.flow_node_id,
                        info.min_runtime_in_ms,
                        info.max_runtime_in_ms,
                        info.arithmetic_mean_runtime_in_ms,
                    )
                })
                .collect()
        });
        assert_eq!(
            summary,
            Some(vec![
                ("A".to_owned(), 200, 600, 400),
                ("B".to_owned(), 600, 600, 600),
            ])
        );
    }

    #[test]
    fn flow_node_without_finished_runs_is_reported() {
        let result = runtime_information_for_flow_node(PROCESS_MODEL, "Z", &scenario());
        assert!(matches!(
            result,
            Err(KpiError::NoCompletedExecutions { ref flow_node_id, .. }) if flow_node_id == "Z"
        ));
    }

    #[test]
    fn exit_without_enter_fails_loudly() {
        let metrics = vec![metric("A", "i1", MetricType::OnExit, 200)];
        assert!(matches!(
            runtime_information_for_process_model(PROCESS_MODEL, &metrics),
            Err(KpiError::UnpairedInstance { .. })
        ));
    }

    #[test]
    fn three_runs_leave_outer_quartiles_empty() {
        let metrics = vec![
            metric("A", "i1", MetricType::OnEnter, 0),
            metric("A", "i1", MetricType::OnExit, 30),
            metric("A", "i2", MetricType::OnEnter, 0),
            metric("A", "i2", MetricType::OnExit, 10),
            metric("A", "i3", MetricType::OnEnter, 0),
            metric("A", "i3", MetricType::OnExit, 20),
        ];
        let info = runtime_information_for_flow_node(PROCESS_MODEL, "A", &metrics);
        assert!(matches!(
            info,
            Ok(RuntimeInformation {
                first_quartile_runtime_in_ms: None,
                median_runtime_in_ms: Some(15),
                third_quartile_runtime_in_ms: None,
                ..
            })
        ));
    }
}
