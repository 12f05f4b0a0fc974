use serde::Serialize;
use std::collections::HashMap;

/// Ordered list of unique identifiers, addressable by index.
///
/// `index_of` and `id_at` are inverse of each other; indices are assigned in
/// insertion order and never change while the list is alive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "Vec<String>")]
pub struct IdList {
    ids: Vec<String>,
    index: HashMap<String, usize>,
}

impl IdList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an identifier. Returns false if it was already present, in which
    /// case the list is left untouched.
    pub fn add_id(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.index.insert(id.clone(), self.ids.len());
        self.ids.push(id);
        true
    }

    /// Appends every identifier of `other` not already present; returns how
    /// many were added
    pub fn add_id_list(&mut self, other: &IdList) -> usize {
        other.iter().filter(|id| self.add_id(*id)).count()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
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

    pub fn remove_all(&mut self) {
        self.ids.clear();
        self.index.clear();
    }
}

impl<S: Into<String>> FromIterator<S> for IdList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = IdList::new();
        for id in iter {
            list.add_id(id);
        }
        list
    }
}

impl From<IdList> for Vec<String> {
    fn from(list: IdList) -> Self {
        list.ids
    }
}
