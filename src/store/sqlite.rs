use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;

use super::{FlowNodeInstanceStore, MetricsStore};
use crate::error::StoreError;
use crate::kpi::{
    FlowNodeInstance, FlowNodeInstanceState, Identity, MetricRecord, MetricType, ProcessToken,
};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS metrics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        flow_node_id TEXT,
        flow_node_instance_id TEXT,
        process_model_id TEXT NOT NULL,
        process_instance_id TEXT,
        correlation_id TEXT,
        metric_type TEXT NOT NULL,
        time_stamp TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_metrics_process_model_id ON metrics(process_model_id);
    CREATE TABLE IF NOT EXISTS flow_node_instances (
        id TEXT PRIMARY KEY,
        flow_node_id TEXT NOT NULL,
        process_model_id TEXT NOT NULL,
        process_instance_id TEXT NOT NULL,
        correlation_id TEXT NOT NULL,
        state TEXT NOT NULL,
        owner_json TEXT NOT NULL DEFAULT '{}',
        tokens_json TEXT NOT NULL DEFAULT '[]'
    );";

const INSTANCE_COLUMNS: &str = "SELECT id, flow_node_id, process_model_id, process_instance_id, \
     correlation_id, state, owner_json, tokens_json FROM flow_node_instances";

/// Read-only view on an engine SQLite database.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Connection,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct MetricRow {
    flow_node_id: Option<String>,
    flow_node_instance_id: Option<String>,
    process_model_id: Option<String>,
    process_instance_id: Option<String>,
    correlation_id: Option<String>,
    metric_type: String,
    time_stamp: String,
}

#[derive(Debug)]
struct InstanceRow {
    id: String,
    flow_node_id: String,
    process_model_id: String,
    process_instance_id: String,
    correlation_id: String,
    state: String,
    owner_json: String,
    tokens_json: String,
}

impl SqliteStore {
    /// Opens the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the database cannot be opened.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)
            .await
            .map_err(|source| StoreError::Sqlite {
                context: "open sqlite db",
                source,
            })?;
        Ok(Self { conn })
    }

    /// Creates the metrics and flow node instance tables when they are missing.
    ///
    /// # Errors
    ///
    /// Returns an error when the schema statements fail.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(|source| StoreError::Sqlite {
                context: "initialize sqlite schema",
                source,
            })
    }

    async fn query_instances(
        &self,
        context: &'static str,
        filter: &'static str,
        params: Vec<String>,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        let rows = self
            .conn
            .call(move |conn| {
                let sql = format!("{} WHERE {} ORDER BY rowid", INSTANCE_COLUMNS, filter);
                let mut stmt = conn.prepare(&sql)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(params.iter()), |row| {
                        Ok(InstanceRow {
                            id: row.get(0)?,
                            flow_node_id: row.get(1)?,
                            process_model_id: row.get(2)?,
                            process_instance_id: row.get(3)?,
                            correlation_id: row.get(4)?,
                            state: row.get(5)?,
                            owner_json: row.get(6)?,
                            tokens_json: row.get(7)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, rusqlite::Error>>()?;
                Ok(rows)
            })
            .await
            .map_err(|source| StoreError::Sqlite { context, source })?;

        Ok(rows.into_iter().filter_map(instance_from_row).collect())
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc))
}

fn metric_from_row(row: MetricRow) -> Option<MetricRecord> {
    let Some(metric_type) = MetricType::from_wire(&row.metric_type) else {
        tracing::warn!("Dropping metric with unknown type '{}'", row.metric_type);
        return None;
    };
    let Some(timestamp) = parse_timestamp(&row.time_stamp) else {
        tracing::warn!("Dropping metric with invalid timestamp '{}'", row.time_stamp);
        return None;
    };
    Some(MetricRecord {
        flow_node_id: row.flow_node_id,
        flow_node_instance_id: row.flow_node_instance_id,
        process_model_id: row.process_model_id,
        process_instance_id: row.process_instance_id,
        correlation_id: row.correlation_id,
        metric_type,
        timestamp,
    })
}

fn instance_from_row(row: InstanceRow) -> Option<FlowNodeInstance> {
    let Some(state) = FlowNodeInstanceState::from_wire(&row.state) else {
        tracing::warn!(
            "Dropping flow node instance '{}' with unknown state '{}'",
            row.id,
            row.state
        );
        return None;
    };
    let owner: Identity = match serde_json::from_str(&row.owner_json) {
        Ok(owner) => owner,
        Err(err) => {
            tracing::warn!("Dropping flow node instance '{}': bad owner: {}", row.id, err);
            return None;
        }
    };
    let tokens: Vec<ProcessToken> = match serde_json::from_str(&row.tokens_json) {
        Ok(tokens) => tokens,
        Err(err) => {
            tracing::warn!("Dropping flow node instance '{}': bad tokens: {}", row.id, err);
            return None;
        }
    };
    Some(FlowNodeInstance {
        id: row.id,
        flow_node_id: row.flow_node_id,
        process_model_id: row.process_model_id,
        process_instance_id: row.process_instance_id,
        correlation_id: row.correlation_id,
        state,
        tokens,
        owner,
    })
}

#[async_trait]
impl MetricsStore for SqliteStore {
    async fn read_metrics_for_process_model(
        &self,
        _identity: &Identity,
        process_model_id: &str,
    ) -> Result<Vec<MetricRecord>, StoreError> {
        let process_model_id = process_model_id.to_owned();
        let rows = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT flow_node_id, flow_node_instance_id, process_model_id,
                            process_instance_id, correlation_id, metric_type, time_stamp
                     FROM metrics WHERE process_model_id = ?1 ORDER BY id",
                )?;
                let rows = stmt
                    .query_map([process_model_id], |row| {
                        Ok(MetricRow {
                            flow_node_id: row.get(0)?,
                            flow_node_instance_id: row.get(1)?,
                            process_model_id: row.get(2)?,
                            process_instance_id: row.get(3)?,
                            correlation_id: row.get(4)?,
                            metric_type: row.get(5)?,
                            time_stamp: row.get(6)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, rusqlite::Error>>()?;
                Ok(rows)
            })
            .await
            .map_err(|source| StoreError::Sqlite {
                context: "read metrics",
                source,
            })?;

        Ok(rows.into_iter().filter_map(metric_from_row).collect())
    }
}

#[async_trait]
impl FlowNodeInstanceStore for SqliteStore {
    async fn query_by_process_model(
        &self,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        self.query_instances(
            "query instances by process model",
            "process_model_id = ?1",
            vec![process_model_id.to_owned()],
        )
        .await
    }

    async fn query_active_by_correlation_and_process_model(
        &self,
        correlation_id: &str,
        process_model_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        self.query_instances(
            "query active instances by correlation",
            "correlation_id = ?1 AND process_model_id = ?2 AND state IN ('running', 'suspended')",
            vec![correlation_id.to_owned(), process_model_id.to_owned()],
        )
        .await
    }

    async fn query_active_by_process_instance(
        &self,
        process_instance_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        self.query_instances(
            "query active instances by process instance",
            "process_instance_id = ?1 AND state IN ('running', 'suspended')",
            vec![process_instance_id.to_owned()],
        )
        .await
    }

    async fn query_by_flow_node_id(
        &self,
        flow_node_id: &str,
    ) -> Result<Vec<FlowNodeInstance>, StoreError> {
        self.query_instances(
            "query instances by flow node",
            "flow_node_id = ?1",
            vec![flow_node_id.to_owned()],
        )
        .await
    }
}
