use kube::{
    api::{Api, ListParams},
    Client, ResourceExt,
};
use scheduler_controller_core::{RepoRef, RepoSet};
use scheduler_controller_k8s_api::{
    Environment, Scheduler, SchedulerSpec, SourceRepository, SourceRepositoryGroup,
};
use std::collections::BTreeMap;
use tracing::debug;

/// Loads the resources that feed a resolution run.
#[async_trait::async_trait]
pub trait LoadResources {
    async fn load(&self, namespace: &str) -> Result<Resources, LoadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no pipeline schedulers are configured in namespace {0}")]
    NoSchedulers(String),

    #[error("failed to list {kind} resources")]
    List {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("failed to get environment {name}")]
    Environment {
        name: String,
        #[source]
        source: kube::Error,
    },
}

/// A snapshot of the scheduler resources in a namespace.
#[derive(Clone, Debug, Default)]
pub struct Resources {
    pub schedulers: SchedulerLookup,
    pub groups: Vec<SourceRepositoryGroup>,
    pub repositories: Vec<SourceRepository>,
}

/// Schedulers by name. Built once per run and only ever read afterwards.
#[derive(Clone, Debug, Default)]
pub struct SchedulerLookup(BTreeMap<String, Scheduler>);

/// Lists resources through the Kubernetes API.
#[derive(Clone)]
pub struct ApiLoader {
    client: Client,
}

// === impl Resources ===

impl Resources {
    /// Returns the `org/repo` identities of every loaded repository.
    pub fn known_repos(&self) -> RepoSet {
        self.repositories
            .iter()
            .map(|r| RepoRef::new(&r.spec.org, &r.spec.repo))
            .collect()
    }
}

// === impl SchedulerLookup ===

impl SchedulerLookup {
    pub fn get(&self, name: &str) -> Option<&SchedulerSpec> {
        self.0.get(name).map(|s| &s.spec)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Scheduler> for SchedulerLookup {
    fn from_iter<T: IntoIterator<Item = Scheduler>>(iter: T) -> Self {
        Self(iter.into_iter().map(|s| (s.name_any(), s)).collect())
    }
}

// === impl ApiLoader ===

impl ApiLoader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetches the named environment, if it exists.
    pub async fn environment(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Environment>, LoadError> {
        Api::<Environment>::namespaced(self.client.clone(), namespace)
            .get_opt(name)
            .await
            .map_err(|source| LoadError::Environment {
                name: name.to_string(),
                source,
            })
    }
}

#[async_trait::async_trait]
impl LoadResources for ApiLoader {
    async fn load(&self, namespace: &str) -> Result<Resources, LoadError> {
        let params = ListParams::default();

        let schedulers = Api::<Scheduler>::namespaced(self.client.clone(), namespace)
            .list(&params)
            .await
            .map_err(|source| LoadError::List {
                kind: "Scheduler",
                source,
            })?;
        if schedulers.items.is_empty() {
            return Err(LoadError::NoSchedulers(namespace.to_string()));
        }

        let groups = Api::<SourceRepositoryGroup>::namespaced(self.client.clone(), namespace)
            .list(&params)
            .await
            .map_err(|source| LoadError::List {
                kind: "SourceRepositoryGroup",
                source,
            })?;

        let repositories = Api::<SourceRepository>::namespaced(self.client.clone(), namespace)
            .list(&params)
            .await
            .map_err(|source| LoadError::List {
                kind: "SourceRepository",
                source,
            })?;

        debug!(
            schedulers = schedulers.items.len(),
            groups = groups.items.len(),
            repositories = repositories.items.len(),
            "Loaded scheduler resources"
        );
        Ok(Resources {
            schedulers: schedulers.items.into_iter().collect(),
            groups: groups.items,
            repositories: repositories.items,
        })
    }
}
