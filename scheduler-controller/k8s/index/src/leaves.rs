use crate::{LayerSelector, Resources};
use kube::ResourceExt;
use scheduler_controller_core::{build, Leaf, MergeError, RepoRef};
use tracing::{debug, trace};

#[derive(Debug, thiserror::Error)]
#[error("building scheduler for {repo}")]
pub struct ResolveError {
    pub repo: RepoRef,
    #[source]
    pub source: MergeError,
}

/// Resolves a leaf for every repository that has at least one applicable layer, preserving the
/// order in which repositories were loaded.
pub fn resolve_leaves(
    resources: &Resources,
    selector: &LayerSelector<'_>,
) -> Result<Vec<Leaf>, ResolveError> {
    let mut leaves = Vec::with_capacity(resources.repositories.len());
    for repository in &resources.repositories {
        let repo = RepoRef::new(&repository.spec.org, &repository.spec.repo);
        let layers = selector.select(repository);
        if layers.is_empty() {
            debug!(%repo, name = %repository.name_any(), "No schedulers apply to repository");
            continue;
        }

        trace!(%repo, layers = layers.len(), "Merging scheduler layers");
        let spec = build(&layers).map_err(|source| ResolveError {
            repo: repo.clone(),
            source,
        })?;
        leaves.push(Leaf { repo, spec });
    }
    Ok(leaves)
}
