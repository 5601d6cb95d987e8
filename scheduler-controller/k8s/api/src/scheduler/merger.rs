use crate::ReplaceableList;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Merger {
    pub merge_method: Option<MergeMethod>,

    /// A label that blocks merges into the branches named in issues carrying it.
    pub blocker_label: Option<String>,

    /// A label that requests a squash merge for a single pull request.
    pub squash_label: Option<String>,

    /// Selects the pull requests that are eligible for merging.
    pub queries: Option<ReplaceableList<Query>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeMethod {
    Merge,
    Squash,
    Rebase,
}

/// Pull request selection criteria. Repositories are never named here; a query applies to
/// whichever repositories resolve it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub labels: Option<Vec<String>>,
    pub missing_labels: Option<Vec<String>>,
    pub excluded_branches: Option<Vec<String>>,
    pub included_branches: Option<Vec<String>>,
    pub milestone: Option<String>,
    pub review_approved_required: Option<bool>,
}
