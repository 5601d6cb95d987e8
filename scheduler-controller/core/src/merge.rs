//! Folds an ordered list of partial scheduler specs into one resolved spec.
//!
//! Layers are ordered from least to most specific; a field set by a later layer overrides the
//! same field from an earlier one. Nested policies merge field by field, so a layer that only
//! sets `approve.requireSelfApproval` leaves the inherited `approve.lgtmActsAsApprove` intact.

use scheduler_controller_k8s_api::{
    scheduler::{
        Approve, BranchProtectionContextPolicy, GlobalProtectionPolicy, Lgtm, Merger,
        ProtectionPolicy, Restrictions, ReviewPolicy, Trigger,
    },
    ListMode, ReplaceableList, SchedulerSpec,
};

/// The downstream platform accepts between one and six required approving reviews.
const MAX_APPROVING_REVIEWS: u32 = 6;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("no scheduler specs to merge")]
    NoLayers,

    #[error("required approving review count must be between 1 and 6, got {0}")]
    InvalidApprovals(u32),
}

/// Merges `layers`, least specific first, into a single resolved spec.
pub fn build(layers: &[&SchedulerSpec]) -> Result<SchedulerSpec, MergeError> {
    let (first, rest) = layers.split_first().ok_or(MergeError::NoLayers)?;
    let mut spec = (*first).clone();
    for layer in rest {
        spec.merge_from(layer);
    }
    validate(&spec)?;
    Ok(spec)
}

fn validate(spec: &SchedulerSpec) -> Result<(), MergeError> {
    let approvals = spec
        .policy
        .as_ref()
        .and_then(|p| p.protection_policy.as_ref())
        .and_then(|p| p.required_pull_request_reviews.as_ref())
        .and_then(|r| r.required_approving_review_count);
    match approvals {
        Some(n) if n == 0 || n > MAX_APPROVING_REVIEWS => Err(MergeError::InvalidApprovals(n)),
        _ => Ok(()),
    }
}

/// Applies a higher-precedence value on top of `self`.
trait Merge {
    fn merge_from(&mut self, overlay: &Self);
}

/// Last writer wins.
fn scalar<T: Clone>(base: &mut Option<T>, overlay: &Option<T>) {
    if let Some(v) = overlay {
        *base = Some(v.clone());
    }
}

fn nested<T: Merge + Clone>(base: &mut Option<T>, overlay: &Option<T>) {
    let Some(overlay) = overlay else { return };
    match base {
        Some(base) => base.merge_from(overlay),
        None => *base = Some(overlay.clone()),
    }
}

impl<T: Clone + PartialEq> Merge for ReplaceableList<T> {
    fn merge_from(&mut self, overlay: &Self) {
        match overlay.mode {
            ListMode::Replace => self.items = overlay.items.clone(),
            ListMode::Append => {
                for item in &overlay.items {
                    if !self.items.contains(item) {
                        self.items.push(item.clone());
                    }
                }
            }
        }
        self.mode = overlay.mode;
    }
}

impl Merge for SchedulerSpec {
    fn merge_from(&mut self, overlay: &Self) {
        // The config-updater map is replaced as a whole rather than merged per path.
        scalar(&mut self.config_updater, &overlay.config_updater);
        nested(&mut self.plugins, &overlay.plugins);
        nested(&mut self.external_plugins, &overlay.external_plugins);
        nested(&mut self.trigger, &overlay.trigger);
        nested(&mut self.approve, &overlay.approve);
        nested(&mut self.lgtm, &overlay.lgtm);
        nested(&mut self.merger, &overlay.merger);
        nested(&mut self.policy, &overlay.policy);
    }
}

impl Merge for Trigger {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.trusted_org, &overlay.trusted_org);
        scalar(&mut self.join_org_url, &overlay.join_org_url);
        scalar(&mut self.only_org_members, &overlay.only_org_members);
        scalar(&mut self.ignore_ok_to_test, &overlay.ignore_ok_to_test);
    }
}

impl Merge for Approve {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.issue_required, &overlay.issue_required);
        scalar(&mut self.require_self_approval, &overlay.require_self_approval);
        scalar(&mut self.lgtm_acts_as_approve, &overlay.lgtm_acts_as_approve);
        scalar(&mut self.ignore_review_state, &overlay.ignore_review_state);
    }
}

impl Merge for Lgtm {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.review_acts_as_lgtm, &overlay.review_acts_as_lgtm);
        scalar(&mut self.store_tree_hash, &overlay.store_tree_hash);
        scalar(&mut self.sticky_lgtm_team, &overlay.sticky_lgtm_team);
    }
}

impl Merge for Merger {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.merge_method, &overlay.merge_method);
        scalar(&mut self.blocker_label, &overlay.blocker_label);
        scalar(&mut self.squash_label, &overlay.squash_label);
        nested(&mut self.queries, &overlay.queries);
    }
}

impl Merge for GlobalProtectionPolicy {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.protect_tested, &overlay.protect_tested);
        nested(&mut self.protection_policy, &overlay.protection_policy);
    }
}

impl Merge for ProtectionPolicy {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.protect, &overlay.protect);
        scalar(&mut self.enforce_admins, &overlay.enforce_admins);
        nested(
            &mut self.required_status_checks,
            &overlay.required_status_checks,
        );
        nested(
            &mut self.required_pull_request_reviews,
            &overlay.required_pull_request_reviews,
        );
        nested(&mut self.restrictions, &overlay.restrictions);
    }
}

impl Merge for BranchProtectionContextPolicy {
    fn merge_from(&mut self, overlay: &Self) {
        nested(&mut self.contexts, &overlay.contexts);
        scalar(&mut self.strict, &overlay.strict);
    }
}

impl Merge for ReviewPolicy {
    fn merge_from(&mut self, overlay: &Self) {
        scalar(&mut self.dismiss_stale_reviews, &overlay.dismiss_stale_reviews);
        scalar(
            &mut self.require_code_owner_reviews,
            &overlay.require_code_owner_reviews,
        );
        scalar(
            &mut self.required_approving_review_count,
            &overlay.required_approving_review_count,
        );
    }
}

impl Merge for Restrictions {
    fn merge_from(&mut self, overlay: &Self) {
        nested(&mut self.users, &overlay.users);
        nested(&mut self.teams, &overlay.teams);
    }
}
