//! Settings for the interactive shell.
//!
//! Loaded from an optional JSON file; any missing field falls back to its
//! default.
//!
//! ```json
//! { "default_top_k": 10, "default_metric": "euclidean", "log_filter": "vexdb=debug" }
//! ```

use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};

use crate::error::{Error, Result};
use crate::metric::MetricKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Number of hits returned when a query does not pass `--top-k`.
    pub default_top_k: usize,
    /// Metric used when a query does not pass `--metric`.
    pub default_metric: MetricKind,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        ShellConfig {
            default_top_k: 5,
            default_metric: MetricKind::Cosine,
            log_filter: "vexdb=info".to_string(),
        }
    }
}

impl ShellConfig {
    /// Reads a config file written as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<ShellConfig> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::Config(format!("cannot open '{}': {}", path.display(), e)))?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Config(format!("cannot parse '{}': {}", path.display(), e)))
    }
}
