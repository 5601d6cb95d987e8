//! Scheduler resolution model.
//!
//! A repository's effective scheduling policy is assembled from several partial `SchedulerSpec`
//! layers, ordered from least to most specific. The merge engine folds those layers into a
//! single resolved spec, which is then paired with the repository's identity as a [`Leaf`].

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod merge;
mod repo;

pub use self::{
    merge::{build, MergeError},
    repo::{ParseRepoError, RepoRef, RepoSet},
};
use scheduler_controller_k8s_api::SchedulerSpec;

/// A resolved scheduling policy for a single repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leaf {
    pub repo: RepoRef,
    pub spec: SchedulerSpec,
}
