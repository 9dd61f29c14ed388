use super::types::{ActiveToken, FlowNodeInstance};
use crate::error::StoreError;
use crate::store::FlowNodeInstanceStore;

/// Which flow node instances to inspect for active tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveTokenQuery {
    ProcessModel {
        process_model_id: String,
    },
    ProcessInstance {
        process_instance_id: String,
    },
    CorrelationAndProcessModel {
        correlation_id: String,
        process_model_id: String,
    },
    FlowNode {
        flow_node_id: String,
    },
}

/// Projects the running or suspended instances into active tokens, in source order.
///
/// Instances without a process token are skipped.
#[must_use]
pub fn active_tokens_from(instances: &[FlowNodeInstance]) -> Vec<ActiveToken> {
    instances
        .iter()
        .filter(|instance| instance.state.is_active())
        .filter_map(project)
        .collect()
}

fn project(instance: &FlowNodeInstance) -> Option<ActiveToken> {
    let Some(token) = instance.tokens.first() else {
        tracing::warn!(
            "Flow node instance '{}' has no process token, skipping",
            instance.id
        );
        return None;
    };
    Some(ActiveToken {
        process_instance_id: token.process_instance_id.clone(),
        process_model_id: token.process_model_id.clone(),
        correlation_id: token.correlation_id.clone(),
        flow_node_id: instance.flow_node_id.clone(),
        flow_node_instance_id: instance.id.clone(),
        identity: token.identity.clone(),
        created_at: token.created_at,
        payload: token.payload.clone(),
    })
}

/// Reads flow node instances and reports the in-flight ones.
#[derive(Debug, Clone)]
pub struct ActiveTokenTracker<F> {
    store: F,
}

impl<F> ActiveTokenTracker<F>
where
    F: FlowNodeInstanceStore,
{
    #[must_use]
    pub const fn new(store: F) -> Self {
        Self { store }
    }

    /// # Errors
    ///
    /// Returns the store error when the instance query fails.
    pub async fn active_tokens_for(
        &self,
        query: &ActiveTokenQuery,
    ) -> Result<Vec<ActiveToken>, StoreError> {
        let instances = match query {
            ActiveTokenQuery::ProcessModel { process_model_id } => {
                self.store.query_by_process_model(process_model_id).await?
            }
            ActiveTokenQuery::ProcessInstance {
                process_instance_id,
            } => {
                self.store
                    .query_active_by_process_instance(process_instance_id)
                    .await?
            }
            ActiveTokenQuery::CorrelationAndProcessModel {
                correlation_id,
                process_model_id,
            } => {
                self.store
                    .query_active_by_correlation_and_process_model(correlation_id, process_model_id)
                    .await?
            }
            ActiveTokenQuery::FlowNode { flow_node_id } => {
                self.store.query_by_flow_node_id(flow_node_id).await?
            }
        };
        tracing::debug!("Inspecting {} flow node instances for {:?}", instances.len(), query);
        Ok(active_tokens_from(&instances))
    }
}
