pub mod merger;
pub mod plugins;
pub mod protection;

pub use self::{
    merger::{MergeMethod, Merger, Query},
    plugins::{Approve, ConfigMapSpec, ConfigUpdater, ExternalPlugin, Lgtm, Trigger},
    protection::{
        BranchProtectionContextPolicy, GlobalProtectionPolicy, ProtectionPolicy, Restrictions,
        ReviewPolicy,
    },
};
use crate::ReplaceableList;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A reusable, partial scheduling policy.
///
/// Every field is optional: an unset field inherits whatever a lower-precedence layer resolved
/// for it. Schedulers are layered per repository (team default, repository groups, the
/// repository's own scheduler) and merged into a single resolved spec.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, CustomResource, Deserialize, Serialize, JsonSchema,
)]
#[kube(group = "jenkins.io", version = "v1", kind = "Scheduler", namespaced)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerSpec {
    /// Binds files in the repository to config maps kept in sync by the config-updater plugin.
    pub config_updater: Option<ConfigUpdater>,

    /// The names of the plugins enabled for the repository.
    pub plugins: Option<ReplaceableList<String>>,

    pub external_plugins: Option<ReplaceableList<ExternalPlugin>>,

    pub trigger: Option<Trigger>,

    pub approve: Option<Approve>,

    pub lgtm: Option<Lgtm>,

    /// Configures the merge queue.
    pub merger: Option<Merger>,

    /// Configures branch protection.
    pub policy: Option<GlobalProtectionPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ListMode;

    #[test]
    fn parses_partial_scheduler() {
        let scheduler: Scheduler = serde_yaml::from_str(
            r#"
apiVersion: jenkins.io/v1
kind: Scheduler
metadata:
  name: default-scheduler
  namespace: jx
spec:
  plugins:
    mode: Replace
    items:
      - approve
      - lgtm
  approve:
    lgtmActsAsApprove: false
  merger:
    mergeMethod: squash
    queries:
      items:
        - labels: [approved]
          missingLabels: [do-not-merge/hold]
"#,
        )
        .expect("scheduler must parse");

        let plugins = scheduler.spec.plugins.expect("plugins must be set");
        assert_eq!(plugins.mode, ListMode::Replace);
        assert_eq!(plugins.items, vec!["approve", "lgtm"]);

        // An explicit `false` is distinct from an unset field.
        let approve = scheduler.spec.approve.expect("approve must be set");
        assert_eq!(approve.lgtm_acts_as_approve, Some(false));
        assert_eq!(approve.require_self_approval, None);

        let merger = scheduler.spec.merger.expect("merger must be set");
        assert_eq!(merger.merge_method, Some(MergeMethod::Squash));
        let queries = merger.queries.expect("queries must be set");
        assert_eq!(queries.mode, ListMode::Append);
        assert_eq!(
            queries.items[0].missing_labels,
            Some(vec!["do-not-merge/hold".to_string()])
        );

        assert_eq!(scheduler.spec.lgtm, None);
        assert_eq!(scheduler.spec.policy, None);
    }
}
