use super::*;
use crate::{config::Org, plugins::ApproveSettings};
use maplit::btreemap;
use scheduler_controller_k8s_api::{
    scheduler::{
        Approve, BranchProtectionContextPolicy, ConfigUpdater as ApiConfigUpdater,
        ExternalPlugin as ApiExternalPlugin, GlobalProtectionPolicy, MergeMethod, Merger,
        ProtectionPolicy, Query,
    },
    ReplaceableList, SchedulerSpec,
};

fn mk_leaf(repo: &str, spec: SchedulerSpec) -> Leaf {
    Leaf {
        repo: repo.parse().expect("repo must parse"),
        spec,
    }
}

fn mk_approve(require_self_approval: bool) -> SchedulerSpec {
    SchedulerSpec {
        approve: Some(Approve {
            require_self_approval: Some(require_self_approval),
            ..Approve::default()
        }),
        ..SchedulerSpec::default()
    }
}

fn mk_merger(merger: Merger) -> SchedulerSpec {
    SchedulerSpec {
        merger: Some(merger),
        ..SchedulerSpec::default()
    }
}

fn mk_config_updater(path: &str, name: &str) -> SchedulerSpec {
    SchedulerSpec {
        config_updater: Some(ApiConfigUpdater {
            map: btreemap! {
                path.to_string() => api::ConfigMapSpec { name: name.to_string(), namespace: None },
            },
        }),
        ..SchedulerSpec::default()
    }
}

#[test]
fn no_leaves() {
    let (config, plugins) = translate(&[]).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(plugins, PluginConfig::default());
}

#[test]
fn plugins_keyed_by_repo() {
    let leaves = [
        mk_leaf(
            "acme/a",
            SchedulerSpec {
                plugins: Some(ReplaceableList::append(["approve".to_string()])),
                external_plugins: Some(ReplaceableList::append([ApiExternalPlugin {
                    name: "cherrypicker".to_string(),
                    endpoint: Some("http://cherrypicker".to_string()),
                    events: Some(vec!["issue_comment".to_string()]),
                }])),
                ..SchedulerSpec::default()
            },
        ),
        mk_leaf(
            "acme/b",
            SchedulerSpec {
                plugins: Some(ReplaceableList::replace(None)),
                ..SchedulerSpec::default()
            },
        ),
    ];

    let (_, plugins) = translate(&leaves).unwrap();
    assert_eq!(
        plugins.plugins,
        btreemap! { "acme/a".to_string() => vec!["approve".to_string()] }
    );
    let external = &plugins.external_plugins["acme/a"];
    assert_eq!(external.len(), 1);
    assert_eq!(external[0].name, "cherrypicker");
    assert_eq!(external[0].events, vec!["issue_comment"]);
}

#[test]
fn identical_settings_share_a_rule() {
    let leaves = [
        mk_leaf("acme/a", mk_approve(true)),
        mk_leaf("acme/b", mk_approve(false)),
        mk_leaf("other/c", mk_approve(true)),
    ];

    let (_, plugins) = translate(&leaves).unwrap();
    assert_eq!(
        plugins.approve,
        vec![
            RepoRule {
                repos: vec!["acme/a".to_string(), "other/c".to_string()],
                settings: ApproveSettings {
                    require_self_approval: Some(true),
                    ..ApproveSettings::default()
                },
            },
            RepoRule {
                repos: vec!["acme/b".to_string()],
                settings: ApproveSettings {
                    require_self_approval: Some(false),
                    ..ApproveSettings::default()
                },
            },
        ]
    );
}

#[test]
fn tide_queries_and_merge_methods() {
    let query = Query {
        labels: Some(vec!["approved".to_string()]),
        ..Query::default()
    };
    let merger = Merger {
        merge_method: Some(MergeMethod::Squash),
        blocker_label: Some("merge-blocker".to_string()),
        queries: Some(ReplaceableList::append([query])),
        ..Merger::default()
    };
    let leaves = [
        mk_leaf("acme/a", mk_merger(merger.clone())),
        mk_leaf(
            "acme/b",
            mk_merger(Merger {
                merge_method: Some(MergeMethod::Rebase),
                ..merger
            }),
        ),
    ];

    let (config, _) = translate(&leaves).unwrap();
    assert_eq!(config.tide.queries.len(), 1);
    assert_eq!(config.tide.queries[0].repos, vec!["acme/a", "acme/b"]);
    assert_eq!(config.tide.queries[0].settings.labels, vec!["approved"]);
    assert_eq!(
        config.tide.merge_method,
        btreemap! {
            "acme/a".to_string() => MergeMethod::Squash,
            "acme/b".to_string() => MergeMethod::Rebase,
        }
    );
    assert_eq!(config.tide.blocker_label.as_deref(), Some("merge-blocker"));
}

#[test]
fn conflicting_global_settings_fail() {
    let leaves = [
        mk_leaf(
            "acme/a",
            mk_merger(Merger {
                squash_label: Some("squash".to_string()),
                ..Merger::default()
            }),
        ),
        mk_leaf(
            "acme/b",
            mk_merger(Merger {
                squash_label: Some("tide/squash".to_string()),
                ..Merger::default()
            }),
        ),
    ];

    assert_eq!(
        translate(&leaves).unwrap_err(),
        TranslateError::GlobalConflict {
            setting: "tide.squash_label",
            existing: "squash".to_string(),
            conflicting: "tide/squash".to_string(),
            repo: RepoRef::new("acme", "b"),
        }
    );
}

#[test]
fn config_updater_paths() {
    let leaves = [
        mk_leaf("acme/env", mk_config_updater("env/prow/config.yaml", "config")),
        mk_leaf("acme/other", mk_config_updater("env/prow/config.yaml", "config")),
    ];
    let (_, plugins) = translate(&leaves).unwrap();
    assert_eq!(plugins.config_updater.maps["env/prow/config.yaml"].name, "config");

    let leaves = [
        mk_leaf("acme/env", mk_config_updater("env/prow/config.yaml", "config")),
        mk_leaf("acme/other", mk_config_updater("env/prow/config.yaml", "other")),
    ];
    assert!(matches!(
        translate(&leaves),
        Err(TranslateError::ConfigUpdaterConflict { .. })
    ));
}

#[test]
fn branch_protection_per_repo() {
    let policy = GlobalProtectionPolicy {
        protect_tested: Some(true),
        protection_policy: Some(ProtectionPolicy {
            protect: Some(true),
            required_status_checks: Some(BranchProtectionContextPolicy {
                contexts: Some(ReplaceableList::append(["lint".to_string()])),
                strict: None,
            }),
            ..ProtectionPolicy::default()
        }),
    };
    let spec = SchedulerSpec {
        policy: Some(policy),
        ..SchedulerSpec::default()
    };
    let leaves = [mk_leaf("acme/a", spec.clone()), mk_leaf("acme/b", spec)];

    let (config, _) = translate(&leaves).unwrap();
    assert_eq!(config.branch_protection.protect_tested_repos, Some(true));
    let Org { policy, repos } = &config.branch_protection.orgs["acme"];
    assert!(policy.is_empty());
    let repos = repos.as_ref().expect("repos must be explicit");
    assert_eq!(repos.len(), 2);
    assert_eq!(repos["a"].policy.protect, Some(true));
    assert_eq!(
        repos["b"].policy.required_status_checks.as_ref().unwrap().contexts,
        vec!["lint"]
    );
}
