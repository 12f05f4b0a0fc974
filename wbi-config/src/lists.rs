//! Named ID lists.
//!
//! A list group maps list names to token sequences. A token naming another
//! entry of the same group is expanded in place, so lists can be composed
//! from smaller ones:
//!
//! ```toml
//! [WBI_ID_LISTS]
//! ROBOT_TORSO = ["torso_pitch", "torso_roll", "torso_yaw"]
//! ROBOT_LEFT_LEG = ["l_hip_pitch", "l_hip_roll", "l_knee"]
//! ROBOT_LOWER_BODY = ["ROBOT_TORSO", "ROBOT_LEFT_LEG"]
//! ```

use crate::config::{Group, PropertyStore, Value};
use crate::errors::{ListError, ListResult};
use crate::id_list::IdList;
use tracing::{debug, error};

/// Group holding the named ID lists unless the caller picks another one
pub const DEFAULT_LIST_GROUP: &str = "WBI_ID_LISTS";

/// Expands `requested` into the flat sequence of literal ids it denotes.
///
/// Repeated ids coming from sibling references are kept; a list that
/// includes one of its own ancestors fails with `CircularReference`.
pub fn expand_list(lists: &Group, requested: &str) -> ListResult<Vec<String>> {
    let mut stack = Vec::new();
    let mut ids = Vec::new();
    expand_into(lists, requested, &mut stack, &mut ids)?;
    Ok(ids)
}

fn expand_into(
    lists: &Group,
    requested: &str,
    stack: &mut Vec<String>,
    ids: &mut Vec<String>,
) -> ListResult<()> {
    let tokens = match lists.find(requested).and_then(Value::as_list) {
        Some(tokens) => tokens,
        None => {
            error!("[lists] requested list '{}' not found", requested);
            return Err(ListError::NotFound {
                list: requested.to_string(),
            });
        }
    };

    if stack.iter().any(|name| name == requested) {
        let root = stack.first().cloned().unwrap_or_default();
        error!(
            "[lists] requested list '{}' is duplicated inside of parent list '{}'",
            requested, root
        );
        return Err(ListError::CircularReference {
            list: requested.to_string(),
            root,
        });
    }

    stack.push(requested.to_string());
    for token in tokens {
        let token = token.to_token();
        if lists.check(&token) {
            expand_into(lists, &token, stack, ids)?;
        } else {
            ids.push(token);
        }
    }
    stack.pop();

    Ok(())
}

/// Expands a list of `lists` into an `IdList`, in expansion order
pub fn id_list_from_group(lists: &Group, requested: &str) -> ListResult<IdList> {
    let ids = expand_list(lists, requested)?;
    let expanded = ids.len();
    let list: IdList = ids.into_iter().collect();
    if list.len() < expanded {
        debug!(
            "[lists] '{}' expanded to {} ids, {} after dropping repeats",
            requested,
            expanded,
            list.len()
        );
    }
    Ok(list)
}

/// Loads the list `requested` from the group `list_group` of `store`
pub fn load_id_list(store: &PropertyStore, requested: &str, list_group: &str) -> ListResult<IdList> {
    let lists = store.find_group(list_group).ok_or_else(|| {
        error!(
            "[lists] requested list '{}' not found: group '{}' missing",
            requested, list_group
        );
        ListError::NotFound {
            list: requested.to_string(),
        }
    })?;
    id_list_from_group(lists, requested)
}

/// Resolves a mask specification into an `IdList`.
///
/// The mask is either a single list name, expanded fully, or a
/// list of tokens. Each token naming a list entry of `list_group` contributes
/// that list's ids; any other token, including one naming a scalar entry, is
/// taken as a literal id.
pub fn id_list_from_spec(store: &PropertyStore, spec: &Value, list_group: &str) -> ListResult<IdList> {
    match spec {
        Value::Str(name) => load_id_list(store, name, list_group),
        Value::List(tokens) => {
            let lists = store.find_group(list_group);
            let mut ids = IdList::new();
            for token in tokens {
                let name = token.to_token();
                match lists {
                    Some(lists) if lists.find(&name).is_some_and(Value::is_list) => {
                        ids.add_id_list(&id_list_from_group(lists, &name)?);
                    }
                    _ => {
                        ids.add_id(name);
                    }
                }
            }
            Ok(ids)
        }
        other => {
            error!("[lists] cannot build an id list from a {} value", other.kind());
            Err(ListError::InvalidSpec {
                reason: format!("expected a list name or a list of ids, got {}", other.kind()),
            })
        }
    }
}
