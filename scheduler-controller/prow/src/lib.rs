//! The subset of Prow's configuration that schedulers resolve into.
//!
//! Resolved leaves are translated into a `Config` and a `PluginConfig`, which are then sanitized
//! against the set of known repositories before they are persisted.

#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod config;
pub mod plugins;
mod rule;
mod sanitize;
mod translate;

pub use self::{
    config::Config,
    plugins::PluginConfig,
    rule::RepoRule,
    sanitize::sanitize,
    translate::{translate, TranslateError},
};
