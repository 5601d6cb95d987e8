#![deny(rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod environment;
mod replaceable;
pub mod scheduler;
pub mod source_repository;

pub use self::{
    environment::{Environment, EnvironmentSpec},
    replaceable::{ListMode, ReplaceableList},
    scheduler::{Scheduler, SchedulerSpec},
    source_repository::{
        SourceRepository, SourceRepositoryGroup, SourceRepositoryGroupSpec, SourceRepositorySpec,
    },
};
pub use kube::api::{ObjectMeta, ResourceExt};

/// Names another resource in the same namespace.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize, schemars::JsonSchema,
)]
pub struct ResourceReference {
    #[serde(default)]
    pub name: String,
    pub kind: Option<String>,
}

impl ResourceReference {
    pub fn named(name: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            kind: None,
        }
    }

    /// Returns the referenced name, treating an empty name as no reference at all.
    pub fn name(&self) -> Option<&str> {
        if self.name.is_empty() {
            None
        } else {
            Some(&self.name)
        }
    }
}
