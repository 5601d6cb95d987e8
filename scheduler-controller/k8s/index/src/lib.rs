//! Scheduler layer selection
//!
//! Each tracked repository resolves its scheduling policy from up to four kinds of layer, from
//! least to most specific:
//!
//! - The team's default `Scheduler`, configured by name.
//! - The `Scheduler` of every `SourceRepositoryGroup` that lists the repository, in the order the
//!   groups were loaded.
//! - The `Scheduler` named by the `SourceRepository` itself.
//! - A synthesized config-updater layer, applied only to the repository hosting the cluster's
//!   own GitOps configuration when config-updater auto-apply is enabled.
//!
//! ```text
//! [ team ] < [ group.. ] < [ repo ] < [ config-updater ]
//! ```
//!
//! References to schedulers that do not exist are logged and skipped. A repository with no
//! layers at all produces no leaf.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod layers;
mod leaves;
mod resources;


pub use self::{
    layers::{ConfigUpdaterInjection, GitOps, LayerSelector},
    leaves::{resolve_leaves, ResolveError},
    resources::{ApiLoader, LoadError, LoadResources, Resources, SchedulerLookup},
};
