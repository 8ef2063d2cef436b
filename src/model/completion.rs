use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The set of task ids the user has marked done.
///
/// Members keep insertion order so the persisted list is stable across
/// saves. Ids that are not in the catalog are allowed and simply ignored
/// when progress is derived. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet {
    ids: IndexSet<String>,
}

impl CompletionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty set; what "reset progress" produces.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Return a copy with `id` removed if present, added otherwise.
    /// `self` is left untouched.
    pub fn toggle(&self, id: &str) -> CompletionSet {
        let mut next = self.clone();
        if !next.ids.shift_remove(id) {
            next.ids.insert(id.to_string());
        }
        next
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        CompletionSet {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
