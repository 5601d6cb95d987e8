//! Best-effort YAML dumps of generated configuration.

use crate::prow::{Config, PluginConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// Writes `<prefix>Config.yaml` and `<prefix>Plugins.yaml`.
///
/// Failures are logged and otherwise ignored.
pub fn write(prefix: &str, config: &Config, plugins: &PluginConfig) {
    write_yaml(format!("{prefix}Config.yaml").into(), config, "config");
    write_yaml(format!("{prefix}Plugins.yaml").into(), plugins, "plugins");
}

fn write_yaml<T: Serialize>(path: PathBuf, value: &T, kind: &str) {
    let yaml = match serde_yaml::to_string(value) {
        Ok(yaml) => yaml,
        Err(error) => {
            error!(%error, "Failed to marshal prow {kind} to YAML");
            return;
        }
    };

    if let Err(error) = std::fs::write(&path, yaml) {
        error!(%error, path = %path.display(), "Failed to write prow {kind}");
        return;
    }
    info!(path = %path.display(), "Wrote prow {kind}");
}
