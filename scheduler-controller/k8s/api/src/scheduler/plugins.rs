use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maps repository file paths to the config maps they are synced into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigUpdater {
    pub map: BTreeMap<String, ConfigMapSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapSpec {
    pub name: String,
    pub namespace: Option<String>,
}

/// An out-of-process plugin receiving webhook events.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalPlugin {
    pub name: String,
    pub endpoint: Option<String>,
    pub events: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    /// Members of this org may trigger jobs without an `/ok-to-test`.
    pub trusted_org: Option<String>,
    pub join_org_url: Option<String>,
    pub only_org_members: Option<bool>,
    pub ignore_ok_to_test: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Approve {
    pub issue_required: Option<bool>,
    pub require_self_approval: Option<bool>,
    pub lgtm_acts_as_approve: Option<bool>,
    pub ignore_review_state: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lgtm {
    pub review_acts_as_lgtm: Option<bool>,
    pub store_tree_hash: Option<bool>,
    pub sticky_lgtm_team: Option<String>,
}
