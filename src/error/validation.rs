use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing data source (set --db or --snapshot, or provide one in config).")]
    MissingDataSource,
    #[error("Cannot combine --db with --snapshot.")]
    DataSourceConflict,
    #[error(
        "Select exactly one of --process-model, --process-instance, --flow-node, or --correlation with --process-model."
    )]
    InvalidTokenSelector,
    #[error("--correlation requires --process-model.")]
    CorrelationRequiresProcessModel,
    #[error("Identifiers must not be empty.")]
    EmptyIdentifier,
    #[error("Invalid output format '{value}'. Use text or json.")]
    InvalidOutputFormat { value: String },
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
