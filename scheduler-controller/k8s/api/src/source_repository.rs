use crate::ResourceReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A git repository tracked by the cluster.
#[derive(Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "jenkins.io",
    version = "v1",
    kind = "SourceRepository",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SourceRepositorySpec {
    pub org: String,
    pub repo: String,
    pub provider: Option<String>,
    pub provider_name: Option<String>,
    pub url: Option<String>,

    /// The scheduler that applies to this repository alone.
    pub scheduler: Option<ResourceReference>,
}

/// A named set of repositories that share a scheduler.
#[derive(Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "jenkins.io",
    version = "v1",
    kind = "SourceRepositoryGroup",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct SourceRepositoryGroupSpec {
    /// References `SourceRepository` resources by name.
    #[serde(default)]
    pub repositories: Vec<ResourceReference>,

    pub scheduler: Option<ResourceReference>,
}

// === impl SourceRepositoryGroupSpec ===

impl SourceRepositoryGroupSpec {
    pub fn contains(&self, repository_name: &str) -> bool {
        self.repositories.iter().any(|r| r.name == repository_name)
    }
}

// === impl SourceRepositorySpec ===

impl SourceRepositorySpec {
    pub fn scheduler_name(&self) -> Option<&str> {
        self.scheduler.as_ref().and_then(ResourceReference::name)
    }
}
