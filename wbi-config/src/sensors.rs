//! Sensor port lookup.
//!
//! Ports are looked up per sensor id: `sensor_id = "/icub/left_leg/analog:o"`.
//! The older per-body-part layout, where every entry is a triple
//! `(bodyPart, localId, portName)`, is still readable through
//! [`load_local_sensor_ports`].

use crate::config::PropertyStore;
use crate::errors::{ConfigError, ConfigResult};
use crate::id_list::IdList;
use serde::Serialize;
use tracing::{debug, error};

pub const FT_PORTS_GROUP: &str = "WBI_YARP_FT_PORTS";
pub const IMU_PORTS_GROUP: &str = "WBI_YARP_IMU_PORTS";

/// Port names of `sensors`, in the same order, read from `group_name`.
///
/// A missing or empty group is not an error and yields no ports.
pub fn load_sensor_ports(store: &PropertyStore, sensors: &IdList, group_name: &str) -> ConfigResult<Vec<String>> {
    let ports_list = match store.find_group(group_name) {
        Some(group) if !group.is_empty() => group,
        _ => {
            debug!("[sensors] group {} missing or empty, no ports loaded", group_name);
            return Ok(Vec::new());
        }
    };

    sensors
        .iter()
        .map(|sensor| match ports_list.find(sensor).and_then(|v| v.as_str()) {
            Some(port) => Ok(port.to_string()),
            None => {
                error!(
                    "[sensors] {} returned an error when searching for port of sensor '{}'",
                    group_name, sensor
                );
                Err(ConfigError::MissingField {
                    field: format!("{}.{}", group_name, sensor),
                })
            }
        })
        .collect()
}

pub fn load_ft_sensor_ports(store: &PropertyStore, sensors: &IdList) -> ConfigResult<Vec<String>> {
    load_sensor_ports(store, sensors, FT_PORTS_GROUP)
}

pub fn load_imu_sensor_ports(store: &PropertyStore, sensors: &IdList) -> ConfigResult<Vec<String>> {
    load_sensor_ports(store, sensors, IMU_PORTS_GROUP)
}

/// Sensor addressed by body part index and id local to that part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalSensorPort {
    pub body_part: usize,
    pub local_id: usize,
    pub port_name: String,
}

/// Reads the legacy layout where each entry of `group_name` is a triple
/// `(bodyPart, localId, portName)` and `bodyPart` must be in `body_parts`
pub fn load_local_sensor_ports(
    store: &PropertyStore,
    body_parts: &[String],
    group_name: &str,
) -> ConfigResult<Vec<LocalSensorPort>> {
    let ports_list = match store.find_group(group_name) {
        Some(group) if !group.is_empty() => group,
        _ => return Ok(Vec::new()),
    };

    let mut ports = Vec::with_capacity(ports_list.len());
    for (key, value) in ports_list.iter() {
        let field = format!("{}.{}", group_name, key);
        let malformed = |reason: String| {
            error!("[sensors] {} has a malformed element {}: {}", group_name, value, reason);
            ConfigError::InvalidValue {
                field: field.clone(),
                reason,
            }
        };

        let port = match value.as_list() {
            Some(items) if items.len() == 3 => items,
            _ => return Err(malformed("expected (bodyPart, id, portName)".to_string())),
        };
        let body_part_name = port[0].to_token();
        let body_part = body_parts
            .iter()
            .position(|bp| *bp == body_part_name)
            .ok_or_else(|| malformed(format!("body part '{}' not recognized", body_part_name)))?;
        let local_id = port[1]
            .as_int()
            .and_then(|id| usize::try_from(id).ok())
            .ok_or_else(|| malformed("id is not a non-negative integer".to_string()))?;
        let port_name = port[2]
            .as_str()
            .ok_or_else(|| malformed("port name is not a string".to_string()))?;

        ports.push(LocalSensorPort {
            body_part,
            local_id,
            port_name: port_name.to_string(),
        });
    }
    Ok(ports)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(content: &str) -> PropertyStore {
        PropertyStore::from_toml_str(content).unwrap()
    }

    fn sensors(ids: &[&str]) -> IdList {
        ids.iter().copied().collect()
    }

    const PORTS: &str = r#"
[WBI_YARP_FT_PORTS]
l_leg_ft_sensor = "/icubSim/left_leg/analog:o"
r_leg_ft_sensor = "/icubSim/right_leg/analog:o"

[WBI_YARP_IMU_PORTS]
imu = "/icubSim/inertial"
bad_imu = 12
"#;

    #[test]
    fn test_ports_follow_id_order() {
        let store = store(PORTS);
        let ports = load_ft_sensor_ports(&store, &sensors(&["r_leg_ft_sensor", "l_leg_ft_sensor"])).unwrap();

        assert_eq!(
            ports,
            vec!["/icubSim/right_leg/analog:o", "/icubSim/left_leg/analog:o"]
        );
    }

    #[test]
    fn test_missing_or_non_string_port_fails() {
        let store = store(PORTS);

        assert!(matches!(
            load_ft_sensor_ports(&store, &sensors(&["l_foot_ft_sensor"])),
            Err(ConfigError::MissingField { .. })
        ));
        assert!(load_imu_sensor_ports(&store, &sensors(&["bad_imu"])).is_err());
        assert_eq!(load_imu_sensor_ports(&store, &sensors(&["imu"])).unwrap(), vec!["/icubSim/inertial"]);
    }

    #[test]
    fn test_missing_or_empty_group_yields_no_ports() {
        let no_group = store("robot = \"icub\"\n");
        assert!(load_ft_sensor_ports(&no_group, &sensors(&["l_leg_ft_sensor"])).unwrap().is_empty());

        let empty_group = store("[WBI_YARP_IMU_PORTS]\n");
        assert!(load_imu_sensor_ports(&empty_group, &sensors(&["imu"])).unwrap().is_empty());
    }

    #[test]
    fn test_local_sensor_ports() {
        let store = store(
            r#"
[WBI_YARP_FT_PORTS]
left = ["left_leg", 0, "/icub/left_leg/analog:o"]
right = ["right_leg", 1, "/icub/right_leg/analog:o"]
"#,
        );
        let body_parts = vec!["torso".to_string(), "left_leg".to_string(), "right_leg".to_string()];

        let ports = load_local_sensor_ports(&store, &body_parts, FT_PORTS_GROUP).unwrap();
        assert_eq!(
            ports,
            vec![
                LocalSensorPort {
                    body_part: 1,
                    local_id: 0,
                    port_name: "/icub/left_leg/analog:o".to_string()
                },
                LocalSensorPort {
                    body_part: 2,
                    local_id: 1,
                    port_name: "/icub/right_leg/analog:o".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_local_sensor_ports_malformed() {
        let body_parts = vec!["torso".to_string()];

        let short = store("[WBI_YARP_FT_PORTS]\nft = [\"torso\", 0]\n");
        assert!(load_local_sensor_ports(&short, &body_parts, FT_PORTS_GROUP).is_err());

        let unknown_part = store("[WBI_YARP_FT_PORTS]\nft = [\"head\", 0, \"/p\"]\n");
        assert!(matches!(
            load_local_sensor_ports(&unknown_part, &body_parts, FT_PORTS_GROUP),
            Err(ConfigError::InvalidValue { ref reason, .. }) if reason.contains("head")
        ));
    }
}
