mod source;


use clap::Parser;

use crate::args::{Command, KpiArgs, OutputFormat, RuntimeArgs, TokensArgs};
use crate::config::{apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::kpi::{ActiveTokenQuery, Identity, KpiService};
use crate::output::{render_runtime, render_runtime_list, render_token_list};
use crate::store::{FlowNodeInstanceStore, MetricsStore};
use source::DataSource;

/// Parses the command line, merges config, and prints the requested KPI.
///
/// # Errors
///
/// Returns an error when arguments or config are invalid, the data source
/// cannot be opened, or the KPI computation fails.
pub fn run() -> AppResult<()> {
    let mut args = KpiArgs::parse();
    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &config)?;
    }

    crate::system::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let rendered = runtime.block_on(run_async(&args))?;
    println!("{}", rendered);
    Ok(())
}

async fn run_async(args: &KpiArgs) -> AppResult<String> {
    let identity = identity_from(args);
    let format = args.format.unwrap_or_default();
    match DataSource::resolve(args)?.open().await? {
        source::OpenedStore::Sqlite(store) => {
            execute(&args.command, &identity, format, store).await
        }
        source::OpenedStore::Memory(store) => {
            execute(&args.command, &identity, format, store).await
        }
    }
}

async fn execute<S>(
    command: &Command,
    identity: &Identity,
    format: OutputFormat,
    store: S,
) -> AppResult<String>
where
    S: MetricsStore + FlowNodeInstanceStore + Clone,
{
    let service = KpiService::new(store.clone(), store);
    match command {
        Command::Runtime(runtime) => execute_runtime(&service, identity, runtime, format).await,
        Command::Tokens(tokens) => {
            let query = token_query(tokens)?;
            let list = service
                .active_tokens(identity, &query, tokens.page.page())
                .await?;
            render_token_list(&list, format)
        }
    }
}

async fn execute_runtime<M, F>(
    service: &KpiService<M, F>,
    identity: &Identity,
    args: &RuntimeArgs,
    format: OutputFormat,
) -> AppResult<String>
where
    M: MetricsStore,
    F: FlowNodeInstanceStore,
{
    if let Some(flow_node_id) = args.flow_node.as_deref() {
        let info = service
            .get_runtime_information_for_flow_node(identity, &args.process_model, flow_node_id)
            .await?;
        return render_runtime(&info, format);
    }
    let list = service
        .get_runtime_information_for_process_model(identity, &args.process_model, args.page.page())
        .await?;
    render_runtime_list(&list, format)
}

fn identity_from(args: &KpiArgs) -> Identity {
    Identity::new(
        args.user_id.clone().unwrap_or_default(),
        args.token.clone().unwrap_or_default(),
    )
}

/// Maps the selector flags of `flowkpi tokens` onto exactly one query.
fn token_query(args: &TokensArgs) -> AppResult<ActiveTokenQuery> {
    let query = match (
        args.process_model.clone(),
        args.process_instance.clone(),
        args.flow_node.clone(),
        args.correlation.clone(),
    ) {
        (Some(process_model_id), None, None, None) => {
            ActiveTokenQuery::ProcessModel { process_model_id }
        }
        (Some(process_model_id), None, None, Some(correlation_id)) => {
            ActiveTokenQuery::CorrelationAndProcessModel {
                correlation_id,
                process_model_id,
            }
        }
        (None, Some(process_instance_id), None, None) => {
            ActiveTokenQuery::ProcessInstance { process_instance_id }
        }
        (None, None, Some(flow_node_id), None) => ActiveTokenQuery::FlowNode { flow_node_id },
        (None, _, _, Some(_)) => {
            return Err(AppError::validation(
                ValidationError::CorrelationRequiresProcessModel,
            ));
        }
        (Some(_), Some(_), _, _)
        | (Some(_), None, Some(_), _)
        | (None, Some(_), Some(_), None)
        | (None, None, None, None) => {
            return Err(AppError::validation(ValidationError::InvalidTokenSelector));
        }
    };
    Ok(query)
}
