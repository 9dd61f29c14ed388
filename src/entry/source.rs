use std::path::PathBuf;

use crate::args::KpiArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::store::{MemoryStore, SqliteStore};

/// Where metrics and flow node instances are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DataSource {
    Sqlite(PathBuf),
    Snapshot(PathBuf),
}

pub(super) enum OpenedStore {
    Sqlite(SqliteStore),
    Memory(MemoryStore),
}

impl DataSource {
    pub(super) fn resolve(args: &KpiArgs) -> AppResult<Self> {
        match (args.db_path.as_deref(), args.snapshot_path.as_deref()) {
            (Some(db), None) => Ok(DataSource::Sqlite(PathBuf::from(db))),
            (None, Some(snapshot)) => Ok(DataSource::Snapshot(PathBuf::from(snapshot))),
            (Some(_), Some(_)) => Err(AppError::validation(ValidationError::DataSourceConflict)),
            (None, None) => Err(AppError::validation(ValidationError::MissingDataSource)),
        }
    }

    pub(super) async fn open(&self) -> AppResult<OpenedStore> {
        match self {
            DataSource::Sqlite(path) => {
                tracing::debug!("Opening engine database {}", path.display());
                let store = SqliteStore::open(path).await?;
                store.ensure_schema().await?;
                Ok(OpenedStore::Sqlite(store))
            }
            DataSource::Snapshot(path) => {
                tracing::debug!("Loading snapshot {}", path.display());
                Ok(OpenedStore::Memory(MemoryStore::from_json_file(path).await?))
            }
        }
    }
}
