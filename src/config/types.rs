use serde::Deserialize;

use crate::args::OutputFormat;

#[derive(Debug, Default, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub db_path: Option<String>,
    pub snapshot_path: Option<String>,
    pub format: Option<OutputFormat>,
    /// Default page size for commands that do not pass `--limit`.
    pub limit: Option<usize>,
    pub user_id: Option<String>,
    pub token: Option<String>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}
