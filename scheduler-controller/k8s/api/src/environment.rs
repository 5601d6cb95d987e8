use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A deployment environment. Only the development environment's source repository is
/// consulted: it hosts the cluster's own GitOps configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema)]
#[kube(group = "jenkins.io", version = "v1", kind = "Environment", namespaced)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSpec {
    pub label: Option<String>,
    pub namespace: Option<String>,
    pub source: Option<EnvironmentRepository>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentRepository {
    pub url: String,
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

// === impl EnvironmentSpec ===

impl EnvironmentSpec {
    pub fn source_url(&self) -> Option<&str> {
        self.source
            .as_ref()
            .map(|s| s.url.as_str())
            .filter(|u| !u.is_empty())
    }
}
