use crate::{
    index::{resolve_leaves, GitOps, LayerSelector, LoadResources, Resources},
    prow::{self, Config, PluginConfig},
};
use anyhow::{bail, Context, Result};
use tracing::info;

/// Generates the Prow configuration for a namespace's schedulers.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    pub namespace: String,

    /// The name of the scheduler that applies to every repository by default.
    pub team_scheduler: Option<String>,

    pub gitops: GitOps,
}

// === impl Generator ===

impl Generator {
    pub async fn generate<L>(&self, loader: &L) -> Result<(Config, PluginConfig)>
    where
        L: LoadResources + ?Sized,
    {
        let resources = loader
            .load(&self.namespace)
            .await
            .context("loading scheduler resources")?;
        self.resolve(&resources)
    }

    /// Resolves the loaded resources into a sanitized configuration pair.
    pub fn resolve(&self, resources: &Resources) -> Result<(Config, PluginConfig)> {
        if resources.repositories.is_empty() {
            bail!("no source repository resources were found");
        }

        let config_updater = self.gitops.config_updater();
        let selector = LayerSelector::new(
            &resources.schedulers,
            &resources.groups,
            self.team_scheduler.as_deref(),
            config_updater.as_ref(),
        );
        let leaves = resolve_leaves(resources, &selector)?;
        info!(
            repositories = resources.repositories.len(),
            leaves = leaves.len(),
            "Resolved schedulers"
        );

        let (config, plugins) = prow::translate(&leaves).context("building prow config")?;
        let (mut config, plugins) = prow::sanitize(config, plugins, &resources.known_repos());
        config.pod_namespace = Some(self.namespace.clone());
        Ok((config, plugins))
    }
}

#[cfg(test)]
mod tests;
