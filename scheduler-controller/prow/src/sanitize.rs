use crate::{
    config::{BranchProtection, Deck, Repo},
    plugins::{ConfigUpdater, Heart},
    Config, PluginConfig, RepoRule,
};
use scheduler_controller_core::RepoSet;
use std::collections::BTreeMap;
use tracing::debug;

/// Restricts a translated configuration to the features and repositories this integration
/// supports.
///
/// - The Deck UI and the `heart` plugin are always cleared, as is the config-updater plugin's
///   map, which is only ever derived from scheduler layers.
/// - Tide queries and triggers keep only known repositories; rules left without repositories
///   are dropped.
/// - LGTM and approve rules are split so that each rule applies to exactly one known
///   repository. An approve rule naming a bare org applies to every known repository in it.
/// - An org's blanket branch protection policy is copied onto each known repository in the org.
/// - Plugin lists keyed by unknown repositories, or that are empty, are removed.
///
/// Sanitizing never fails, and sanitizing a sanitized configuration changes nothing.
pub fn sanitize(config: Config, plugins: PluginConfig, known: &RepoSet) -> (Config, PluginConfig) {
    let Config {
        prowjob_namespace,
        pod_namespace,
        mut tide,
        branch_protection,
        deck: _,
    } = config;
    tide.queries = retain_known_repos(tide.queries, known);
    tide.merge_method = retain_known_keys(tide.merge_method, known, |_| true);
    let config = Config {
        prowjob_namespace,
        pod_namespace,
        tide,
        branch_protection: expand_org_policies(branch_protection, known),
        deck: Deck::default(),
    };

    let PluginConfig {
        plugins,
        external_plugins,
        approve,
        lgtm,
        triggers,
        config_updater: _,
        heart: _,
    } = plugins;
    let plugins = PluginConfig {
        plugins: retain_known_keys(plugins, known, |p| !p.is_empty()),
        external_plugins: retain_known_keys(external_plugins, known, |p| !p.is_empty()),
        approve: split_per_repo(approve, known, true),
        lgtm: split_per_repo(lgtm, known, false),
        triggers: retain_known_repos(triggers, known),
        config_updater: ConfigUpdater::default(),
        heart: Heart::default(),
    };

    (config, plugins)
}

/// Drops unknown repositories from each rule, and rules left without any.
fn retain_known_repos<S>(rules: Vec<RepoRule<S>>, known: &RepoSet) -> Vec<RepoRule<S>> {
    rules
        .into_iter()
        .filter_map(|mut rule| {
            rule.repos.retain(|repo| known.contains(repo));
            if rule.repos.is_empty() {
                None
            } else {
                Some(rule)
            }
        })
        .collect()
}

/// Emits one rule per known repository referenced by each rule. When `expand_orgs` is set, a
/// bare org reference expands to every known repository in the org; otherwise it is dropped.
fn split_per_repo<S: Clone>(
    rules: Vec<RepoRule<S>>,
    known: &RepoSet,
    expand_orgs: bool,
) -> Vec<RepoRule<S>> {
    let mut split = Vec::new();
    for RepoRule { repos, settings } in rules {
        for repo in repos {
            if repo.contains('/') {
                if known.contains(&repo) {
                    split.push(RepoRule {
                        repos: vec![repo],
                        settings: settings.clone(),
                    });
                }
            } else if expand_orgs {
                for r in known.in_org(&repo) {
                    split.push(RepoRule {
                        repos: vec![r.to_string()],
                        settings: settings.clone(),
                    });
                }
            }
        }
    }
    split
}

fn retain_known_keys<V>(
    mut entries: BTreeMap<String, V>,
    known: &RepoSet,
    keep: impl Fn(&V) -> bool,
) -> BTreeMap<String, V> {
    entries.retain(|repo, v| known.contains(repo) && keep(&*v));
    entries
}

/// Replaces each org's blanket policy with an explicit entry for every known repository in the
/// org. Orgs that already list repositories, or that have no known repositories, are left
/// as-is.
fn expand_org_policies(mut protection: BranchProtection, known: &RepoSet) -> BranchProtection {
    for (name, org) in protection.orgs.iter_mut() {
        if org.repos.is_some() || org.policy.is_empty() {
            continue;
        }

        let repos = known
            .in_org(name)
            .map(|r| {
                let repo = Repo {
                    policy: org.policy.clone(),
                };
                (r.repo.clone(), repo)
            })
            .collect::<BTreeMap<_, _>>();
        if repos.is_empty() {
            continue;
        }

        debug!(org = %name, repos = repos.len(), "Expanding org branch protection policy");
        org.repos = Some(repos);
        org.policy = Default::default();
    }
    protection
}
