use crate::RepoRule;
use scheduler_controller_k8s_api::scheduler as api;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prow's plugin configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Enabled plugin names keyed by `org/repo`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub plugins: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub external_plugins: BTreeMap<String, Vec<ExternalPlugin>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approve: Vec<Approve>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lgtm: Vec<Lgtm>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,

    #[serde(default, skip_serializing_if = "ConfigUpdater::is_empty")]
    pub config_updater: ConfigUpdater,

    #[serde(default, skip_serializing_if = "Heart::is_empty")]
    pub heart: Heart,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExternalPlugin {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<String>,
}

pub type Approve = RepoRule<ApproveSettings>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApproveSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_required: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_self_approval: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lgtm_acts_as_approve: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_review_state: Option<bool>,
}

pub type Lgtm = RepoRule<LgtmSettings>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LgtmSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_acts_as_lgtm: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_tree_hash: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_team_for_sticky_lgtm: Option<String>,
}

pub type Trigger = RepoRule<TriggerSettings>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TriggerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_org: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_org_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_org_members: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_ok_to_test: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigUpdater {
    /// Repository file paths mapped to the config maps they update.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub maps: BTreeMap<String, ConfigMapSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigMapSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Settings for the `heart` plugin, which is never configured by schedulers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Heart {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adorees: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentregexp: Option<String>,
}

// === impl ConfigUpdater ===

impl ConfigUpdater {
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}

// === impl Heart ===

impl Heart {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// === conversions ===

impl From<&api::ExternalPlugin> for ExternalPlugin {
    fn from(plugin: &api::ExternalPlugin) -> Self {
        Self {
            name: plugin.name.clone(),
            endpoint: plugin.endpoint.clone(),
            events: plugin.events.clone().unwrap_or_default(),
        }
    }
}

impl From<&api::Approve> for ApproveSettings {
    fn from(approve: &api::Approve) -> Self {
        Self {
            issue_required: approve.issue_required,
            require_self_approval: approve.require_self_approval,
            lgtm_acts_as_approve: approve.lgtm_acts_as_approve,
            ignore_review_state: approve.ignore_review_state,
        }
    }
}

impl From<&api::Lgtm> for LgtmSettings {
    fn from(lgtm: &api::Lgtm) -> Self {
        Self {
            review_acts_as_lgtm: lgtm.review_acts_as_lgtm,
            store_tree_hash: lgtm.store_tree_hash,
            trusted_team_for_sticky_lgtm: lgtm.sticky_lgtm_team.clone(),
        }
    }
}

impl From<&api::Trigger> for TriggerSettings {
    fn from(trigger: &api::Trigger) -> Self {
        Self {
            trusted_org: trigger.trusted_org.clone(),
            join_org_url: trigger.join_org_url.clone(),
            only_org_members: trigger.only_org_members,
            ignore_ok_to_test: trigger.ignore_ok_to_test,
        }
    }
}

impl From<&api::ConfigMapSpec> for ConfigMapSpec {
    fn from(cm: &api::ConfigMapSpec) -> Self {
        Self {
            name: cm.name.clone(),
            namespace: cm.namespace.clone(),
        }
    }
}
