use crate::SchedulerLookup;
use kube::ResourceExt;
use scheduler_controller_core::RepoRef;
use scheduler_controller_k8s_api::{
    scheduler::{ConfigMapSpec, ConfigUpdater},
    ReplaceableList, SchedulerSpec, SourceRepository, SourceRepositoryGroup,
};
use tracing::warn;

/// Describes how the cluster's own configuration is managed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GitOps {
    pub enabled: bool,

    /// Indicates that the config-updater plugin should be enabled for the dev environment
    /// repository so that changes to its Prow configuration are applied automatically.
    pub auto_apply_config_updater: bool,

    /// The repository hosting the cluster's configuration.
    pub dev_repo: Option<RepoRef>,
}

/// The synthesized layer that binds the dev environment repository's Prow configuration files
/// to the cluster's config maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigUpdaterInjection {
    repo: RepoRef,
    spec: SchedulerSpec,
}

/// Computes the ordered layers that apply to a repository.
///
/// Layers are borrowed from the lookup table (or the injection) and are never copied.
#[derive(Debug)]
pub struct LayerSelector<'a> {
    schedulers: &'a SchedulerLookup,
    groups: &'a [SourceRepositoryGroup],
    team: Option<&'a SchedulerSpec>,
    config_updater: Option<&'a ConfigUpdaterInjection>,
}

// === impl GitOps ===

impl GitOps {
    /// Returns the config-updater layer, if config-updater auto-apply is in effect.
    pub fn config_updater(&self) -> Option<ConfigUpdaterInjection> {
        if !self.enabled || !self.auto_apply_config_updater {
            return None;
        }
        match &self.dev_repo {
            Some(repo) => Some(ConfigUpdaterInjection::new(repo.clone())),
            None => {
                warn!(
                    "Config-updater auto-apply is enabled but the dev environment repository is unknown"
                );
                None
            }
        }
    }
}

// === impl ConfigUpdaterInjection ===

impl ConfigUpdaterInjection {
    pub const CONFIG_PATH: &'static str = "env/prow/config.yaml";
    pub const PLUGINS_PATH: &'static str = "env/prow/plugins.yaml";
    pub const CONFIG_MAP: &'static str = "config";
    pub const PLUGINS_MAP: &'static str = "plugins";
    pub const PLUGIN: &'static str = "config-updater";

    pub fn new(repo: RepoRef) -> Self {
        let map = [
            (Self::CONFIG_PATH, Self::CONFIG_MAP),
            (Self::PLUGINS_PATH, Self::PLUGINS_MAP),
        ]
        .into_iter()
        .map(|(path, name)| {
            let cm = ConfigMapSpec {
                name: name.to_string(),
                namespace: None,
            };
            (path.to_string(), cm)
        })
        .collect();

        let spec = SchedulerSpec {
            config_updater: Some(ConfigUpdater { map }),
            plugins: Some(ReplaceableList::append([Self::PLUGIN.to_string()])),
            ..SchedulerSpec::default()
        };
        Self { repo, spec }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    pub fn spec(&self) -> &SchedulerSpec {
        &self.spec
    }
}

// === impl LayerSelector ===

impl<'a> LayerSelector<'a> {
    pub fn new(
        schedulers: &'a SchedulerLookup,
        groups: &'a [SourceRepositoryGroup],
        team_scheduler: Option<&str>,
        config_updater: Option<&'a ConfigUpdaterInjection>,
    ) -> Self {
        let team = team_scheduler
            .filter(|name| !name.is_empty())
            .and_then(|name| {
                let spec = schedulers.get(name);
                if spec.is_none() {
                    warn!(
                        scheduler = %name,
                        "A team pipeline scheduler was configured but could not be found"
                    );
                }
                spec
            });

        Self {
            schedulers,
            groups,
            team,
            config_updater,
        }
    }

    /// Returns the layers that apply to `repository`, least specific first.
    ///
    /// An empty result means that no scheduler applies to the repository.
    pub fn select(&self, repository: &SourceRepository) -> Vec<&'a SchedulerSpec> {
        let mut layers = Vec::new();
        layers.extend(self.team);
        layers.extend(self.group_layers(repository));
        layers.extend(self.repository_layer(repository));
        layers.extend(self.config_updater_layer(repository));
        layers
    }

    fn group_layers<'r>(
        &'r self,
        repository: &'r SourceRepository,
    ) -> impl Iterator<Item = &'a SchedulerSpec> + 'r {
        let name = repository.name_any();
        self.groups
            .iter()
            .filter(move |group| group.spec.contains(&name))
            .filter_map(move |group| {
                let scheduler = group.spec.scheduler.as_ref()?.name()?;
                let spec = self.schedulers.get(scheduler);
                if spec.is_none() {
                    warn!(
                        %scheduler,
                        group = %group.name_any(),
                        "A scheduler is referenced by a repository group but could not be found"
                    );
                }
                spec
            })
    }

    fn repository_layer(&self, repository: &SourceRepository) -> Option<&'a SchedulerSpec> {
        let scheduler = repository.spec.scheduler_name()?;
        let spec = self.schedulers.get(scheduler);
        if spec.is_none() {
            warn!(
                %scheduler,
                repository = %repository.name_any(),
                "A scheduler is referenced by a repository but could not be found"
            );
        }
        spec
    }

    fn config_updater_layer(&self, repository: &SourceRepository) -> Option<&'a SchedulerSpec> {
        let injection = self.config_updater?;
        let repo = injection.repo();
        if repo.org == repository.spec.org && repo.repo == repository.spec.repo {
            Some(injection.spec())
        } else {
            None
        }
    }
}
