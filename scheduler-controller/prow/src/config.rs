use crate::RepoRule;
use scheduler_controller_k8s_api::{
    scheduler::{self as api, MergeMethod},
    ReplaceableList,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prow's core configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prowjob_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Tide::is_empty")]
    pub tide: Tide,

    #[serde(
        default,
        rename = "branch-protection",
        skip_serializing_if = "BranchProtection::is_empty"
    )]
    pub branch_protection: BranchProtection,

    /// The Deck UI is never configured by schedulers.
    #[serde(default, skip_serializing_if = "Deck::is_empty")]
    pub deck: Deck,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tide {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<TideQuery>,

    /// Merge methods keyed by `org/repo`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub merge_method: BTreeMap<String, MergeMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocker_label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub squash_label: Option<String>,
}

pub type TideQuery = RepoRule<QueryFilter>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_labels: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_branches: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included_branches: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub review_approved_required: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BranchProtection {
    #[serde(
        default,
        rename = "protect-tested-repos",
        skip_serializing_if = "Option::is_none"
    )]
    pub protect_tested_repos: Option<bool>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub orgs: BTreeMap<String, Org>,
}

/// An org's blanket policy, optionally broken down per repository.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Org {
    #[serde(flatten)]
    pub policy: Policy,

    /// Repository names, without the org, mapped to their policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repos: Option<BTreeMap<String, Repo>>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Repo {
    #[serde(flatten)]
    pub policy: Policy,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protect: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_status_checks: Option<ContextPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_admins: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Restrictions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_pull_request_reviews: Option<ReviewPolicy>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContextPolicy {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contexts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Restrictions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dismiss_stale_reviews: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_code_owner_reviews: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Deck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tide_update_period: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hidden_repos: Vec<String>,
}

// === impl Tide ===

impl Tide {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// === impl BranchProtection ===

impl BranchProtection {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// === impl Policy ===

impl Policy {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl From<&api::ProtectionPolicy> for Policy {
    fn from(policy: &api::ProtectionPolicy) -> Self {
        let list = |l: &Option<ReplaceableList<String>>| -> Vec<String> {
            l.iter().flatten().cloned().collect()
        };

        Self {
            protect: policy.protect,
            enforce_admins: policy.enforce_admins,
            required_status_checks: policy.required_status_checks.as_ref().map(|c| {
                ContextPolicy {
                    contexts: list(&c.contexts),
                    strict: c.strict,
                }
            }),
            restrictions: policy.restrictions.as_ref().map(|r| Restrictions {
                users: list(&r.users),
                teams: list(&r.teams),
            }),
            required_pull_request_reviews: policy.required_pull_request_reviews.as_ref().map(
                |r| ReviewPolicy {
                    dismiss_stale_reviews: r.dismiss_stale_reviews,
                    require_code_owner_reviews: r.require_code_owner_reviews,
                    required_approving_review_count: r.required_approving_review_count,
                },
            ),
        }
    }
}

// === impl QueryFilter ===

impl From<&api::Query> for QueryFilter {
    fn from(query: &api::Query) -> Self {
        Self {
            labels: query.labels.clone().unwrap_or_default(),
            missing_labels: query.missing_labels.clone().unwrap_or_default(),
            excluded_branches: query.excluded_branches.clone().unwrap_or_default(),
            included_branches: query.included_branches.clone().unwrap_or_default(),
            milestone: query.milestone.clone(),
            review_approved_required: query.review_approved_required.unwrap_or(false),
        }
    }
}

// === impl Deck ===

impl Deck {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
