use crate::ReplaceableList;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GlobalProtectionPolicy {
    /// Protects every repository that has tested jobs, even without an explicit policy.
    pub protect_tested: Option<bool>,
    pub protection_policy: Option<ProtectionPolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProtectionPolicy {
    pub protect: Option<bool>,
    pub enforce_admins: Option<bool>,
    pub required_status_checks: Option<BranchProtectionContextPolicy>,
    pub required_pull_request_reviews: Option<ReviewPolicy>,
    pub restrictions: Option<Restrictions>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchProtectionContextPolicy {
    pub contexts: Option<ReplaceableList<String>>,

    /// Requires branches to be up to date before merging.
    pub strict: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPolicy {
    pub dismiss_stale_reviews: Option<bool>,
    pub require_code_owner_reviews: Option<bool>,
    pub required_approving_review_count: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restrictions {
    pub users: Option<ReplaceableList<String>>,
    pub teams: Option<ReplaceableList<String>>,
}
