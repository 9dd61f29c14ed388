use super::active_tokens::{ActiveTokenQuery, ActiveTokenTracker};
use super::pagination::{Page, paginate};
use super::runtime_info::RuntimeInformationService;
use super::types::{ActiveTokenList, Identity, RuntimeInformation, RuntimeInformationList};
use crate::error::AppResult;
use crate::store::{FlowNodeInstanceStore, MetricsStore};

/// KPI query surface over a metrics store and a flow node instance store.
///
/// Every call fetches fresh data and computes its result independently.
#[derive(Debug, Clone)]
pub struct KpiService<M, F> {
    runtime: RuntimeInformationService<M>,
    tokens: ActiveTokenTracker<F>,
}

impl<M, F> KpiService<M, F>
where
    M: MetricsStore,
    F: FlowNodeInstanceStore,
{
    #[must_use]
    pub const fn new(metrics_store: M, instance_store: F) -> Self {
        Self {
            runtime: RuntimeInformationService::new(metrics_store),
            tokens: ActiveTokenTracker::new(instance_store),
        }
    }

    /// # Errors
    ///
    /// Returns an error when the metrics store fails or a finished instance
    /// lacks its enter/exit pair.
    pub async fn get_runtime_information_for_process_model(
        &self,
        identity: &Identity,
        process_model_id: &str,
        page: Page,
    ) -> AppResult<RuntimeInformationList> {
        tracing::debug!("Runtime information for process model '{}'", process_model_id);
        let infos = self
            .runtime
            .for_process_model(identity, process_model_id)
            .await?;
        let total_count = infos.len();
        Ok(RuntimeInformationList {
            flow_node_runtime_information: paginate(infos, page),
            total_count,
        })
    }

    /// # Errors
    ///
    /// Returns an error when the metrics store fails, the flow node has no
    /// finished execution, or an instance lacks its enter/exit pair.
    pub async fn get_runtime_information_for_flow_node(
        &self,
        identity: &Identity,
        process_model_id: &str,
        flow_node_id: &str,
    ) -> AppResult<RuntimeInformation> {
        tracing::debug!(
            "Runtime information for flow node '{}' of process model '{}'",
            flow_node_id,
            process_model_id
        );
        self.runtime
            .for_flow_node(identity, process_model_id, flow_node_id)
            .await
    }

    /// # Errors
    ///
    /// Returns an error when the instance store fails.
    pub async fn get_active_tokens_for_process_model(
        &self,
        identity: &Identity,
        process_model_id: &str,
        page: Page,
    ) -> AppResult<ActiveTokenList> {
        let query = ActiveTokenQuery::ProcessModel {
            process_model_id: process_model_id.to_owned(),
        };
        self.active_tokens(identity, &query, page).await
    }

    /// # Errors
    ///
    /// Returns an error when the instance store fails.
    pub async fn get_active_tokens_for_correlation_and_process_model(
        &self,
        identity: &Identity,
        correlation_id: &str,
        process_model_id: &str,
        page: Page,
    ) -> AppResult<ActiveTokenList> {
        let query = ActiveTokenQuery::CorrelationAndProcessModel {
            correlation_id: correlation_id.to_owned(),
            process_model_id: process_model_id.to_owned(),
        };
        self.active_tokens(identity, &query, page).await
    }

    /// # Errors
    ///
    /// Returns an error when the instance store fails.
    pub async fn get_active_tokens_for_process_instance(
        &self,
        identity: &Identity,
        process_instance_id: &str,
        page: Page,
    ) -> AppResult<ActiveTokenList> {
        let query = ActiveTokenQuery::ProcessInstance {
            process_instance_id: process_instance_id.to_owned(),
        };
        self.active_tokens(identity, &query, page).await
    }

    /// # Errors
    ///
    /// Returns an error when the instance store fails.
    pub async fn get_active_tokens_for_flow_node(
        &self,
        identity: &Identity,
        flow_node_id: &str,
        page: Page,
    ) -> AppResult<ActiveTokenList> {
        let query = ActiveTokenQuery::FlowNode {
            flow_node_id: flow_node_id.to_owned(),
        };
        self.active_tokens(identity, &query, page).await
    }

    /// Runs any [`ActiveTokenQuery`] and paginates the result.
    ///
    /// # Errors
    ///
    /// Returns an error when the instance store fails.
    pub async fn active_tokens(
        &self,
        identity: &Identity,
        query: &ActiveTokenQuery,
        page: Page,
    ) -> AppResult<ActiveTokenList> {
        tracing::debug!("Active tokens for {:?} requested by '{}'", query, identity.user_id);
        let tokens = self.tokens.active_tokens_for(query).await?;
        let total_count = tokens.len();
        Ok(ActiveTokenList {
            active_tokens: paginate(tokens, page),
            total_count,
        })
    }
}
