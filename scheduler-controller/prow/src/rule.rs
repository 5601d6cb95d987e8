use serde::{Deserialize, Serialize};

/// Settings that apply to a list of repositories.
///
/// Prow scopes most plugin settings and Tide queries this way. Entries in `repos` are usually
/// `org/repo`, but an entry may also name a whole org.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RepoRule<S> {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repos: Vec<String>,

    #[serde(flatten)]
    pub settings: S,
}

impl<S: PartialEq> RepoRule<S> {
    /// Adds `repo` to the rule holding identical settings, or starts a new rule for it.
    pub(crate) fn add_to(rules: &mut Vec<Self>, settings: S, repo: String) {
        match rules.iter_mut().find(|r| r.settings == settings) {
            Some(rule) => rule.repos.push(repo),
            None => rules.push(Self {
                repos: vec![repo],
                settings,
            }),
        }
    }
}
