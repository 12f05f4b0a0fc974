use crate::config::PropertyStore;
use crate::errors::{ConfigError, ConfigResult};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{error, warn};

pub const DOF_SERIALIZATION_OPTION: &str = "idyntree_dof_serialization";
pub const LINK_SERIALIZATION_OPTION: &str = "idyntree_link_serialization";

/// Names known to a kinematic tree model
pub trait KinematicTree {
    fn link_names(&self) -> Vec<&str>;
    fn dof_names(&self) -> Vec<&str>;
}

/// Order in which the links and DOFs of a tree are serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeSerialization {
    pub links: Vec<String>,
    pub dofs: Vec<String>,
}

impl TreeSerialization {
    /// Checks that `links` and `dofs` are each a permutation of the names
    /// in `tree`
    pub fn check_consistency<T: KinematicTree + ?Sized>(&self, tree: &T) -> Result<(), String> {
        check_permutation("link", &self.links, &tree.link_names())?;
        check_permutation("dof", &self.dofs, &tree.dof_names())
    }

    pub fn is_consistent<T: KinematicTree + ?Sized>(&self, tree: &T) -> bool {
        self.check_consistency(tree).is_ok()
    }
}

fn check_permutation(kind: &str, serialized: &[String], known: &[&str]) -> Result<(), String> {
    if serialized.len() != known.len() {
        return Err(format!(
            "{} {}(s) serialized but the tree has {}",
            serialized.len(),
            kind,
            known.len()
        ));
    }
    let known: HashSet<&str> = known.iter().copied().collect();
    let mut seen = HashSet::new();
    for name in serialized {
        if !known.contains(name.as_str()) {
            return Err(format!("{} '{}' is not part of the tree", kind, name));
        }
        if !seen.insert(name.as_str()) {
            return Err(format!("{} '{}' is serialized twice", kind, name));
        }
    }
    Ok(())
}

fn name_list(store: &PropertyStore, option: &str) -> ConfigResult<Vec<String>> {
    let value = store.find(option).ok_or_else(|| ConfigError::MissingField {
        field: option.to_string(),
    })?;
    let items = value.as_list().ok_or_else(|| ConfigError::InvalidValue {
        field: option.to_string(),
        reason: format!("expected a list of names, got {}", value.kind()),
    })?;
    Ok(items.iter().map(|item| item.to_token()).collect())
}

/// Reads the link and DOF serialization of `tree` from the top-level
/// `idyntree_link_serialization` and `idyntree_dof_serialization` options
pub fn load_tree_serialization<T: KinematicTree + ?Sized>(
    store: &PropertyStore,
    tree: &T,
) -> ConfigResult<TreeSerialization> {
    let serialization = TreeSerialization {
        dofs: name_list(store, DOF_SERIALIZATION_OPTION)?,
        links: name_list(store, LINK_SERIALIZATION_OPTION)?,
    };

    if let Err(reason) = serialization.check_consistency(tree) {
        error!("[serialization] inconsistent tree serialization: {}", reason);
        return Err(ConfigError::ValidationError(reason));
    }
    if serialization.dofs.is_empty() {
        warn!("[serialization] tree serialization has no DOFs");
    }
    Ok(serialization)
}
