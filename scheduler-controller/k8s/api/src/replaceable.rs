use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A list value that either extends the list inherited from lower-precedence
/// layers or replaces it outright.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceableList<T> {
    #[serde(default)]
    pub mode: ListMode,
    pub items: Vec<T>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
pub enum ListMode {
    #[default]
    Append,
    Replace,
}

// === impl ReplaceableList ===

impl<T> ReplaceableList<T> {
    pub fn append(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            mode: ListMode::Append,
            items: items.into_iter().collect(),
        }
    }

    pub fn replace(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            mode: ListMode::Replace,
            items: items.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> Default for ReplaceableList<T> {
    fn default() -> Self {
        Self {
            mode: ListMode::default(),
            items: Vec::new(),
        }
    }
}

impl<T> std::iter::FromIterator<T> for ReplaceableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::append(iter)
    }
}

impl<'a, T> IntoIterator for &'a ReplaceableList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
