//! Runtime statistics and active-token tracking over engine metrics.
//!
//! Metrics of a process model are reduced to the records of finished flow
//! node instances, grouped per flow node and per instance, turned into one
//! runtime sample per instance and aggregated into min/max/mean/quartiles.
//! Active tokens are the first process token of every running or suspended
//! flow node instance.
mod active_tokens;
mod completion;
mod grouping;
mod pagination;
mod quartiles;
mod runtime;
mod runtime_info;
mod service;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use active_tokens::{ActiveTokenQuery, ActiveTokenTracker, active_tokens_from};
pub use completion::{is_complete, retain_completed};
pub use grouping::{Groups, group_by_flow_node, group_by_instance};
pub use pagination::{Page, paginate};
pub use quartiles::{Quartiles, RuntimeStatistics, arithmetic_mean, quartiles};
pub use runtime::runtime_of;
pub use runtime_info::{
    RuntimeInformationService, runtime_information_for_flow_node,
    runtime_information_for_process_model,
};
pub use service::KpiService;
pub use types::{
    ActiveToken, ActiveTokenList, FlowNodeInstance, FlowNodeInstanceState, Identity,
    MetricRecord, MetricType, ProcessToken, RuntimeInformation, RuntimeInformationList,
};
