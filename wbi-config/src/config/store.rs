use super::value::Value;
use crate::errors::{ConfigError, ConfigResult};
use std::fs;
use tracing::debug;

/// Ordered key/value entries of one configuration group
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    entries: Vec<(String, Value)>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry, keeping the position of a replaced key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn find(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn check(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn from_table(name: &str, table: toml::Table) -> ConfigResult<Self> {
        let mut group = Group::new();
        for (key, value) in table {
            let field = format!("{}.{}", name, key);
            group.insert(key, Value::from_toml(&field, value)?);
        }
        Ok(group)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Group {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = Group::new();
        for (key, value) in iter {
            group.insert(key, value);
        }
        group
    }
}

/// Parsed configuration: top-level properties plus named groups.
///
/// A TOML file maps onto it directly: top-level keys become properties and
/// every `[GROUP]` table becomes a group. Order follows the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyStore {
    properties: Group,
    groups: Vec<(String, Group)>,
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let mut store = PropertyStore::new();
        for (key, value) in table {
            match value {
                toml::Value::Table(inner) => {
                    let group = Group::from_table(&key, inner)?;
                    store.put_group(key, group);
                }
                other => {
                    let value = Value::from_toml(&key, other)?;
                    store.put(key, value);
                }
            }
        }
        debug!(
            "[config] parsed {} properties and {} groups",
            store.properties.len(),
            store.groups.len()
        );
        Ok(store)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.properties.insert(key, value);
    }

    pub fn put_group(&mut self, name: impl Into<String>, group: Group) {
        let name = name.into();
        match self.groups.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = group,
            None => self.groups.push((name, group)),
        }
    }

    /// Top-level property lookup
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.properties.find(key)
    }

    pub fn check(&self, key: &str) -> bool {
        self.properties.check(key)
    }

    pub fn find_group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|(n, _)| n == name).map(|(_, g)| g)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(n, _)| n.as_str())
    }
}

/// Loads a property store from a TOML file
pub fn load_property_store(path: &str) -> ConfigResult<PropertyStore> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadError {
        path: path.to_string(),
        source: e,
    })?;
    PropertyStore::from_toml_str(&content)
}
