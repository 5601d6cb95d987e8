use std::{collections::BTreeSet, fmt, str::FromStr};

/// Identifies a repository as `org/repo`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoRef {
    pub org: String,
    pub repo: String,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid repository reference {0:?}: expected org/repo")]
pub struct ParseRepoError(String);

/// The set of repositories known to a resolution run, ordered by org and then repo.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RepoSet(BTreeSet<RepoRef>);

// === impl RepoRef ===

impl RepoRef {
    pub fn new(org: impl ToString, repo: impl ToString) -> Self {
        Self {
            org: org.to_string(),
            repo: repo.to_string(),
        }
    }

    /// Extracts the repository identity from a git clone URL.
    ///
    /// Both `https://host/org/repo(.git)` and `git@host:org/repo(.git)` forms are understood.
    pub fn from_git_url(url: &str) -> Result<Self, ParseRepoError> {
        let path = url.trim().trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);
        let path = match path.split_once("://") {
            Some((_, rest)) => rest,
            None => path.rsplit_once(':').map(|(_, p)| p).unwrap_or(path),
        };

        let mut segments = path.rsplit('/');
        match (segments.next(), segments.next()) {
            (Some(repo), Some(org)) if !repo.is_empty() && !org.is_empty() => {
                Ok(Self::new(org, repo))
            }
            _ => Err(ParseRepoError(url.to_string())),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

impl FromStr for RepoRef {
    type Err = ParseRepoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((org, repo)) if !org.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self::new(org, repo))
            }
            _ => Err(ParseRepoError(s.to_string())),
        }
    }
}

// === impl RepoSet ===

impl RepoSet {
    pub fn insert(&mut self, repo: RepoRef) -> bool {
        self.0.insert(repo)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks an `org/repo` string against the set. Strings that are not of that form (org
    /// wildcards, for instance) are never contained.
    pub fn contains(&self, repo: &str) -> bool {
        repo.parse::<RepoRef>()
            .map(|r| self.0.contains(&r))
            .unwrap_or(false)
    }

    /// Iterates over the known repositories in `org`, in repository name order.
    pub fn in_org<'a>(&'a self, org: &'a str) -> impl Iterator<Item = &'a RepoRef> + 'a {
        self.0.iter().filter(move |r| r.org == org)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepoRef> {
        self.0.iter()
    }
}

impl FromIterator<RepoRef> for RepoSet {
    fn from_iter<T: IntoIterator<Item = RepoRef>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
