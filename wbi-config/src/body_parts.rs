use crate::config::PropertyStore;
use crate::errors::{ConfigError, ConfigResult};
use tracing::{debug, error, info};

pub const BODY_PARTS_GROUP: &str = "WBI_YARP_BODY_PARTS";
pub const BODY_PARTS_REMAPPING_GROUP: &str = "WBI_YARP_BODY_PARTS_REMAPPING";
pub const NUM_BODY_PARTS_OPTION: &str = "numBodyParts";
pub const REVERSE_TORSO_JOINTS_OPTION: &str = "reverse_torso_joints";

/// Loads the ordered body part names declared as `bodyPart0`, `bodyPart1`,
/// ... up to `numBodyParts`
pub fn load_body_parts(store: &PropertyStore) -> ConfigResult<Vec<String>> {
    let field = |key: &str| format!("{}.{}", BODY_PARTS_GROUP, key);

    let parts_config = store.find_group(BODY_PARTS_GROUP);
    let count = parts_config
        .and_then(|g| g.find(NUM_BODY_PARTS_OPTION))
        .ok_or_else(|| {
            error!("[body_parts] {} option not found", NUM_BODY_PARTS_OPTION);
            ConfigError::MissingField {
                field: field(NUM_BODY_PARTS_OPTION),
            }
        })?;
    let count = count
        .as_int()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field(NUM_BODY_PARTS_OPTION),
            reason: format!("expected a non-negative integer, got {}", count),
        })?;

    debug!("[body_parts] expecting {} part(s)", count);

    let mut body_parts = Vec::new();
    for bp in 0..count {
        let key = format!("bodyPart{}", bp);
        let value = parts_config.and_then(|g| g.find(&key)).ok_or_else(|| {
            error!("[body_parts] {} name not found", key);
            ConfigError::MissingField { field: field(&key) }
        })?;
        let name = value.as_str().ok_or_else(|| ConfigError::InvalidValue {
            field: field(&key),
            reason: format!("expected a body part name, got {}", value),
        })?;
        body_parts.push(name.to_string());
    }

    info!("[body_parts] loaded body parts: {}", body_parts.join(" "));
    Ok(body_parts)
}

/// True when the remapping group asks for the torso joints to be reversed
pub fn load_reverse_torso_joints(store: &PropertyStore) -> bool {
    store
        .find_group(BODY_PARTS_REMAPPING_GROUP)
        .map(|g| g.check(REVERSE_TORSO_JOINTS_OPTION))
        .unwrap_or(false)
}
