use crate::{
    config::{BranchProtection, Policy, QueryFilter, Repo, Tide},
    plugins::{ConfigMapSpec, ConfigUpdater, ExternalPlugin},
    Config, PluginConfig, RepoRule,
};
use scheduler_controller_core::{Leaf, RepoRef};
use scheduler_controller_k8s_api::scheduler as api;
use std::{collections::BTreeMap, fmt};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    #[error("config-updater path {path} is bound to both {existing} and {conflicting} (by {repo})")]
    ConfigUpdaterConflict {
        path: String,
        existing: String,
        conflicting: String,
        repo: RepoRef,
    },

    #[error("conflicting values for {setting}: {existing} and {conflicting} (by {repo})")]
    GlobalConflict {
        setting: &'static str,
        existing: String,
        conflicting: String,
        repo: RepoRef,
    },
}

/// Translates resolved leaves into Prow configuration.
///
/// Repository-scoped settings are keyed by `org/repo`. Leaves that resolve identical plugin
/// settings or Tide queries share a single rule. Any conflict between leaves fails the whole
/// translation.
pub fn translate(leaves: &[Leaf]) -> Result<(Config, PluginConfig), TranslateError> {
    let mut config = Config::default();
    let mut plugins = PluginConfig::default();

    for Leaf { repo, spec } in leaves {
        let key = repo.to_string();

        if let Some(list) = spec.plugins.as_ref().filter(|l| !l.is_empty()) {
            plugins.plugins.insert(key.clone(), list.items.clone());
        }

        if let Some(list) = spec.external_plugins.as_ref().filter(|l| !l.is_empty()) {
            let external = list.iter().map(ExternalPlugin::from).collect::<Vec<_>>();
            plugins.external_plugins.insert(key.clone(), external);
        }

        if let Some(updater) = &spec.config_updater {
            add_config_updater(&mut plugins.config_updater, updater, repo)?;
        }

        if let Some(trigger) = &spec.trigger {
            RepoRule::add_to(&mut plugins.triggers, trigger.into(), key.clone());
        }

        if let Some(approve) = &spec.approve {
            RepoRule::add_to(&mut plugins.approve, approve.into(), key.clone());
        }

        if let Some(lgtm) = &spec.lgtm {
            RepoRule::add_to(&mut plugins.lgtm, lgtm.into(), key.clone());
        }

        if let Some(merger) = &spec.merger {
            add_merger(&mut config.tide, merger, repo)?;
        }

        if let Some(policy) = &spec.policy {
            add_protection(&mut config.branch_protection, policy, repo)?;
        }
    }

    debug!(
        leaves = leaves.len(),
        queries = config.tide.queries.len(),
        plugins = plugins.plugins.len(),
        "Translated schedulers"
    );
    Ok((config, plugins))
}

fn add_config_updater(
    updater: &mut ConfigUpdater,
    spec: &api::ConfigUpdater,
    repo: &RepoRef,
) -> Result<(), TranslateError> {
    for (path, cm) in &spec.map {
        let cm = ConfigMapSpec::from(cm);
        match updater.maps.get(path) {
            Some(existing) if *existing != cm => {
                return Err(TranslateError::ConfigUpdaterConflict {
                    path: path.clone(),
                    existing: existing.name.clone(),
                    conflicting: cm.name,
                    repo: repo.clone(),
                });
            }
            Some(_) => {}
            None => {
                updater.maps.insert(path.clone(), cm);
            }
        }
    }
    Ok(())
}

fn add_merger(tide: &mut Tide, merger: &api::Merger, repo: &RepoRef) -> Result<(), TranslateError> {
    let key = repo.to_string();

    for query in merger.queries.iter().flatten() {
        RepoRule::add_to(&mut tide.queries, QueryFilter::from(query), key.clone());
    }

    if let Some(method) = merger.merge_method {
        tide.merge_method.insert(key, method);
    }

    if let Some(label) = &merger.blocker_label {
        set_global(&mut tide.blocker_label, label, "tide.blocker_label", repo)?;
    }
    if let Some(label) = &merger.squash_label {
        set_global(&mut tide.squash_label, label, "tide.squash_label", repo)?;
    }
    Ok(())
}

fn add_protection(
    protection: &mut BranchProtection,
    policy: &api::GlobalProtectionPolicy,
    repo: &RepoRef,
) -> Result<(), TranslateError> {
    if let Some(protect) = &policy.protect_tested {
        set_global(
            &mut protection.protect_tested_repos,
            protect,
            "branch-protection.protect-tested-repos",
            repo,
        )?;
    }

    if let Some(policy) = &policy.protection_policy {
        let org = protection.orgs.entry(repo.org.clone()).or_default();
        org.repos.get_or_insert_with(BTreeMap::new).insert(
            repo.repo.clone(),
            Repo {
                policy: Policy::from(policy),
            },
        );
    }
    Ok(())
}

/// Sets a cluster-wide value that every leaf setting it must agree on.
fn set_global<T>(
    slot: &mut Option<T>,
    value: &T,
    setting: &'static str,
    repo: &RepoRef,
) -> Result<(), TranslateError>
where
    T: Clone + PartialEq + fmt::Display,
{
    match slot {
        Some(existing) if existing != value => Err(TranslateError::GlobalConflict {
            setting,
            existing: existing.to_string(),
            conflicting: value.to_string(),
            repo: repo.clone(),
        }),
        Some(_) => Ok(()),
        None => {
            *slot = Some(value.clone());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
