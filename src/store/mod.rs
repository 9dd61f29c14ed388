//! Read-only query surfaces of the metrics store and the flow node instance store.
mod memory;
mod sqlite;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::kpi::{FlowNodeInstance, Identity, MetricRecord};

pub use memory::{MemoryStore, StoreSnapshot};
pub use sqlite::SqliteStore;

#[async_trait]
pub trait MetricsStore: Send + Sync {
    /// Reads every recorded metric of a process model, in recording order.
    async fn read_metrics_for_process_model(
        &self,
        identity: &Identity,
        process_model_id: &str,
    ) -> Result<Vec<MetricRecord>, StoreError>;
}

#[async_trait]
pub trait FlowNodeInstanceStore: Send + Sync {
    async fn query_by_process_model(
        &self,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError>;

    /// Running or suspended instances of a correlation within one process model.
    async fn query_active_by_correlation_and_process_model(
        &self,
        correlation_id: &str,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError>;

    /// Running or suspended instances of one process instance.
    async fn query_active_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError>;

    async fn query_by_flow_node_id(
        &self,
        flow_node_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError>;
}
