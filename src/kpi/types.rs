use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller identity handed through to the stores. The KPI core never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub token: String,
}

impl Identity {
    #[must_use]
    pub const fn new(user_id: String, token: String) -> Self {
        Self { user_id, token }
    }
}

/// Lifecycle point at which a metric was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    #[serde(rename = "onFlowNodeEnter")]
    OnEnter,
    #[serde(rename = "onFlowNodeSuspend")]
    OnSuspend,
    #[serde(rename = "onFlowNodeResume")]
    OnResume,
    #[serde(rename = "onFlowNodeExit")]
    OnExit,
    #[serde(rename = "onFlowNodeError")]
    OnError,
}

impl MetricType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricType::OnEnter => "onFlowNodeEnter",
            MetricType::OnSuspend => "onFlowNodeSuspend",
            MetricType::OnResume => "onFlowNodeResume",
            MetricType::OnExit => "onFlowNodeExit",
            MetricType::OnError => "onFlowNodeError",
        }
    }

    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "onFlowNodeEnter" => Some(MetricType::OnEnter),
            "onFlowNodeSuspend" => Some(MetricType::OnSuspend),
            "onFlowNodeResume" => Some(MetricType::OnResume),
            "onFlowNodeExit" => Some(MetricType::OnExit),
            "onFlowNodeError" => Some(MetricType::OnError),
            _ => None,
        }
    }

    /// Whether a record of this type proves that its instance stopped running.
    #[must_use]
    pub const fn signals_termination(self) -> bool {
        !matches!(self, MetricType::OnEnter | MetricType::OnSuspend)
    }
}

/// One observation of a flow node instance's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    #[serde(default)]
    pub flow_node_id: Option<String>,
    #[serde(default)]
    pub flow_node_instance_id: Option<String>,
    #[serde(default)]
    pub process_model_id: Option<String>,
    #[serde(default)]
    pub process_instance_id: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
    pub metric_type: MetricType,
    #[serde(rename = "timeStamp")]
    pub timestamp: DateTime<Utc>,
}

impl MetricRecord {
    /// Flow node id, if present and non-empty.
    #[must_use]
    pub fn flow_node_id(&self) -> Option<&str> {
        non_empty(self.flow_node_id.as_deref())
    }

    /// Flow node instance id, if present and non-empty.
    #[must_use]
    pub fn flow_node_instance_id(&self) -> Option<&str> {
        non_empty(self.flow_node_instance_id.as_deref())
    }

    /// A record without both identifiers does not describe a flow node execution.
    #[must_use]
    pub fn is_flow_node_metric(&self) -> bool {
        self.flow_node_id().is_some() && self.flow_node_instance_id().is_some()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|id| !id.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowNodeInstanceState {
    Running,
    Suspended,
    Finished,
    Error,
    Terminated,
}

impl FlowNodeInstanceState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FlowNodeInstanceState::Running => "running",
            FlowNodeInstanceState::Suspended => "suspended",
            FlowNodeInstanceState::Finished => "finished",
            FlowNodeInstanceState::Error => "error",
            FlowNodeInstanceState::Terminated => "terminated",
        }
    }

    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "running" => Some(FlowNodeInstanceState::Running),
            "suspended" => Some(FlowNodeInstanceState::Suspended),
            "finished" => Some(FlowNodeInstanceState::Finished),
            "error" => Some(FlowNodeInstanceState::Error),
            "terminated" => Some(FlowNodeInstanceState::Terminated),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(
            self,
            FlowNodeInstanceState::Running | FlowNodeInstanceState::Suspended
        )
    }
}

/// Snapshot of the process variables at one point of an execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessToken {
    pub process_instance_id: String,
    pub process_model_id: String,
    pub correlation_id: String,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A live or finished execution of a flow node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNodeInstance {
    pub id: String,
    pub flow_node_id: String,
    pub process_model_id: String,
    pub process_instance_id: String,
    pub correlation_id: String,
    pub state: FlowNodeInstanceState,
    pub tokens: Vec<ProcessToken>,
    #[serde(default)]
    pub owner: Identity,
}

/// Runtime statistics of one flow node across its completed executions.
///
/// Quartiles are `None` when their band holds no samples, which happens for
/// exactly three samples (first and third band).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInformation {
    pub flow_node_id: String,
    pub process_model_id: String,
    pub min_runtime_in_ms: i64,
    pub max_runtime_in_ms: i64,
    pub arithmetic_mean_runtime_in_ms: i64,
    pub first_quartile_runtime_in_ms: Option<i64>,
    pub median_runtime_in_ms: Option<i64>,
    pub third_quartile_runtime_in_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInformationList {
    pub flow_node_runtime_information: Vec<RuntimeInformation>,
    pub total_count: usize,
}

/// An in-flight unit of work, projected from a running or suspended instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveToken {
    pub process_instance_id: String,
    pub process_model_id: String,
    pub correlation_id: String,
    pub flow_node_id: String,
    pub flow_node_instance_id: String,
    pub identity: Identity,
    pub created_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveTokenList {
    pub active_tokens: Vec<ActiveToken>,
    pub total_count: usize,
}
