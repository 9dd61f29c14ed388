use thiserror::Error;

/// Which half of an enter/exit pair was absent for a flow node instance.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MissingMetric {
    #[error("onFlowNodeEnter")]
    Enter,
    #[error("onFlowNodeExit/onFlowNodeError")]
    Exit,
}

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("Flow node instance '{flow_node_instance_id}' has no {missing} metric.")]
    UnpairedInstance {
        flow_node_instance_id: String,
        missing: MissingMetric,
    },
    #[error("Cannot aggregate an empty runtime sample.")]
    EmptyRuntimeSample,
    #[error(
        "No completed executions of flow node '{flow_node_id}' in process model '{process_model_id}'."
    )]
    NoCompletedExecutions {
        process_model_id: String,
        flow_node_id: String,
    },
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
