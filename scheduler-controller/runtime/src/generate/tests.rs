use super::*;
use crate::{
    core::RepoRef,
    index::{ConfigUpdaterInjection, LoadError},
    k8s::{
        scheduler::{
            Approve, GlobalProtectionPolicy, Merger, ProtectionPolicy, ReviewPolicy, Trigger,
        },
        ObjectMeta, ReplaceableList, ResourceReference, Scheduler, SchedulerSpec,
        SourceRepository, SourceRepositorySpec,
    },
};

struct FakeLoader(Result<Resources, String>);

#[async_trait::async_trait]
impl LoadResources for FakeLoader {
    async fn load(&self, _: &str) -> Result<Resources, LoadError> {
        self.0.clone().map_err(LoadError::NoSchedulers)
    }
}

fn init_tracing() -> tracing::subscriber::DefaultGuard {
    tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .finish(),
    )
}

fn mk_meta(name: impl ToString) -> ObjectMeta {
    ObjectMeta {
        namespace: Some("jx".to_string()),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

fn mk_scheduler(name: &str, spec: SchedulerSpec) -> Scheduler {
    Scheduler {
        metadata: mk_meta(name),
        spec,
    }
}

fn mk_repo(org: &str, repo: &str, scheduler: Option<&str>) -> SourceRepository {
    SourceRepository {
        metadata: mk_meta(format!("{org}-{repo}")),
        spec: SourceRepositorySpec {
            org: org.to_string(),
            repo: repo.to_string(),
            scheduler: scheduler.map(ResourceReference::named),
            ..SourceRepositorySpec::default()
        },
    }
}

fn team_scheduler() -> Scheduler {
    mk_scheduler(
        "default-scheduler",
        SchedulerSpec {
            plugins: Some(ReplaceableList::append([
                "approve".to_string(),
                "lgtm".to_string(),
            ])),
            approve: Some(Approve {
                lgtm_acts_as_approve: Some(true),
                ..Approve::default()
            }),
            trigger: Some(Trigger {
                trusted_org: Some("acme".to_string()),
                ..Trigger::default()
            }),
            ..SchedulerSpec::default()
        },
    )
}

fn mk_generator(dev_repo: Option<RepoRef>) -> Generator {
    Generator {
        namespace: "jx".to_string(),
        team_scheduler: Some("default-scheduler".to_string()),
        gitops: GitOps {
            enabled: dev_repo.is_some(),
            auto_apply_config_updater: true,
            dev_repo,
        },
    }
}

fn mk_resources(
    schedulers: impl IntoIterator<Item = Scheduler>,
    repositories: impl IntoIterator<Item = SourceRepository>,
) -> Resources {
    Resources {
        schedulers: schedulers.into_iter().collect(),
        groups: vec![],
        repositories: repositories.into_iter().collect(),
    }
}

#[tokio::test]
async fn generates_sanitized_configuration() {
    let _tracing = init_tracing();
    let loader = FakeLoader(Ok(mk_resources(
        [team_scheduler()],
        [
            mk_repo("acme", "app", None),
            mk_repo("acme", "environment-dev", None),
        ],
    )));

    let generator = mk_generator(Some(RepoRef::new("acme", "environment-dev")));
    let (config, plugins) = generator
        .generate(&loader)
        .await
        .expect("configuration must generate");

    assert_eq!(config.pod_namespace.as_deref(), Some("jx"));
    assert_eq!(plugins.plugins["acme/app"], vec!["approve", "lgtm"]);
    assert_eq!(
        plugins.plugins["acme/environment-dev"],
        vec!["approve", "lgtm", ConfigUpdaterInjection::PLUGIN]
    );
    assert!(
        plugins.config_updater.is_empty(),
        "config-updater map must be cleared"
    );

    let approve = plugins
        .approve
        .iter()
        .map(|rule| rule.repos.clone())
        .collect::<Vec<_>>();
    assert_eq!(
        approve,
        vec![vec!["acme/app".to_string()], vec!["acme/environment-dev".to_string()]]
    );
    assert!(plugins
        .approve
        .iter()
        .all(|rule| rule.settings.lgtm_acts_as_approve == Some(true)));

    assert_eq!(plugins.triggers.len(), 1);
    assert_eq!(
        plugins.triggers[0].repos,
        vec!["acme/app", "acme/environment-dev"]
    );
}

#[tokio::test]
async fn config_updater_requires_gitops() {
    let _tracing = init_tracing();
    let loader = FakeLoader(Ok(mk_resources(
        [team_scheduler()],
        [mk_repo("acme", "environment-dev", None)],
    )));

    let (_, plugins) = mk_generator(None)
        .generate(&loader)
        .await
        .expect("configuration must generate");
    assert_eq!(
        plugins.plugins["acme/environment-dev"],
        vec!["approve", "lgtm"]
    );
}

#[tokio::test]
async fn load_errors_are_propagated() {
    let _tracing = init_tracing();
    let loader = FakeLoader(Err("jx".to_string()));

    let error = mk_generator(None)
        .generate(&loader)
        .await
        .expect_err("generation must fail");
    assert_eq!(error.to_string(), "loading scheduler resources");
    assert!(matches!(
        error.downcast_ref::<LoadError>(),
        Some(LoadError::NoSchedulers(ns)) if ns == "jx"
    ));
}

#[test]
fn requires_source_repositories() {
    let _tracing = init_tracing();
    let resources = mk_resources([team_scheduler()], []);

    let error = mk_generator(None)
        .resolve(&resources)
        .expect_err("generation must fail");
    assert_eq!(
        error.to_string(),
        "no source repository resources were found"
    );
}

#[test]
fn invalid_schedulers_fail_the_run() {
    let _tracing = init_tracing();
    let strict = mk_scheduler(
        "strict",
        SchedulerSpec {
            policy: Some(GlobalProtectionPolicy {
                protection_policy: Some(ProtectionPolicy {
                    required_pull_request_reviews: Some(ReviewPolicy {
                        required_approving_review_count: Some(7),
                        ..ReviewPolicy::default()
                    }),
                    ..ProtectionPolicy::default()
                }),
                ..GlobalProtectionPolicy::default()
            }),
            ..SchedulerSpec::default()
        },
    );
    let resources = mk_resources(
        [team_scheduler(), strict],
        [
            mk_repo("acme", "app", None),
            mk_repo("acme", "lib", Some("strict")),
        ],
    );

    let error = mk_generator(None)
        .resolve(&resources)
        .expect_err("generation must fail");
    assert_eq!(error.to_string(), "building scheduler for acme/lib");
}

#[test]
fn conflicting_schedulers_fail_the_run() {
    let _tracing = init_tracing();
    let mk_blocker = |name: &str, label: &str| {
        mk_scheduler(
            name,
            SchedulerSpec {
                merger: Some(Merger {
                    blocker_label: Some(label.to_string()),
                    ..Merger::default()
                }),
                ..SchedulerSpec::default()
            },
        )
    };
    let resources = mk_resources(
        [mk_blocker("hold", "do-not-merge/hold"), mk_blocker("wip", "wip")],
        [
            mk_repo("acme", "app", Some("hold")),
            mk_repo("acme", "lib", Some("wip")),
        ],
    );

    let error = mk_generator(None)
        .resolve(&resources)
        .expect_err("generation must fail");
    assert_eq!(error.to_string(), "building prow config");
}

#[test]
fn unscheduled_repositories_are_omitted() {
    let _tracing = init_tracing();
    let resources = mk_resources([team_scheduler()], [mk_repo("acme", "app", None)]);
    let generator = Generator {
        team_scheduler: None,
        ..mk_generator(None)
    };

    let (config, plugins) = generator
        .resolve(&resources)
        .expect("configuration must generate");
    assert!(plugins.plugins.is_empty());
    assert!(plugins.approve.is_empty());
    assert_eq!(config.pod_namespace.as_deref(), Some("jx"));
}
