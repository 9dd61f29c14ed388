use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{FlowNodeInstanceStore, MetricsStore};
use crate::error::StoreError;
use crate::kpi::{FlowNodeInstance, Identity, MetricRecord};

/// Engine data exported as one JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
    #[serde(default)]
    pub flow_node_instances: Vec<FlowNodeInstance>,
}

/// In-memory store over a [`StoreSnapshot`]. Clones share the snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Arc<StoreSnapshot>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(snapshot: StoreSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    /// Loads a snapshot document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a valid snapshot.
    pub async fn from_json_file(path: &Path) -> Result<Self, StoreError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| StoreError::ReadSnapshot {
                path: path.to_path_buf(),
                source,
            })?;
        let snapshot: StoreSnapshot =
            serde_json::from_str(&content).map_err(|source| StoreError::ParseSnapshot {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            "Loaded snapshot {} with {} metrics and {} flow node instances",
            path.display(),
            snapshot.metrics.len(),
            snapshot.flow_node_instances.len()
        );
        Ok(Self::new(snapshot))
    }

    fn instances_where<F>(&self, predicate: F) -> Vec<FlowNodeInstance>
    where
        F: Fn(&FlowNodeInstance) -> bool,
    {
        self.snapshot
            .flow_node_instances
            .iter()
            .filter(|instance| predicate(instance))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl MetricsStore for MemoryStore {
    async fn read_metrics_for_process_model(
        &self,
        _identity: &Identity,
        process_model_id: &str,
    ) -> Result<Vec<MetricRecord>, StoreError> {
        Ok(self
            .snapshot
            .metrics
            .iter()
            .filter(|metric| metric.process_model_id.as_deref() == Some(process_model_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FlowNodeInstanceStore for MemoryStore {
    async fn query_by_process_model(
        &self,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        Ok(self.instances_where(|instance| instance.process_model_id == process_model_id))
    }

    async fn query_active_by_correlation_and_process_model(
        &self,
        correlation_id: &str,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        Ok(self.instances_where(|instance| {
            instance.state.is_active()
                && instance.correlation_id == correlation_id
                && instance.process_model_id == process_model_id
        }))
    }

    async fn query_active_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        Ok(self.instances_where(|instance| {
            instance.state.is_active() && instance.process_instance_id == process_instance_id
        }))
    }

    async fn query_by_flow_node_id(
        &self,
        flow_node_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        Ok(self.instances_where(|instance| instance.flow_node_id == flow_node_id))
    }
}
