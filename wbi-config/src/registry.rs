use crate::body_parts::{load_body_parts, load_reverse_torso_joints, BODY_PARTS_GROUP};
use crate::config::{PropertyStore, Value};
use crate::driver::{close_control_board, open_control_board, ControlBoardDriver, DriverFactory};
use crate::errors::{ConfigError, DriverResult, ResolveResult};
use crate::id_list::IdList;
use crate::joints::{load_joints_control_boards, ControlBoardAxis};
use crate::lists::{id_list_from_spec, DEFAULT_LIST_GROUP};
use crate::sensors::{load_ft_sensor_ports, load_imu_sensor_ports};
use serde::Serialize;
use tracing::{error, info, warn};

/// Top-level option holding the joint mask specification
pub const JOINT_LIST_OPTION: &str = "wbi_joint_list";
/// Optional top-level options holding sensor mask specifications
pub const FT_SENSOR_LIST_OPTION: &str = "wbi_ft_sensor_list";
pub const IMU_SENSOR_LIST_OPTION: &str = "wbi_imu_sensor_list";
/// Top-level option naming the group of ID lists, `WBI_ID_LISTS` if absent
pub const LIST_GROUP_OPTION: &str = "wbi_id_list_group";

/// Everything the interface needs to know about the robot, resolved from one
/// configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterfaceLayout {
    pub body_parts: Vec<String>,
    pub reverse_torso_joints: bool,
    pub joints: IdList,
    pub control_boards: Vec<String>,
    pub control_board_axes: Vec<ControlBoardAxis>,
    pub ft_sensors: IdList,
    pub ft_ports: Vec<String>,
    pub imu_sensors: IdList,
    pub imu_ports: Vec<String>,
}

fn list_group(store: &PropertyStore) -> &str {
    store
        .find(LIST_GROUP_OPTION)
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LIST_GROUP)
}

fn optional_id_list(store: &PropertyStore, option: &str) -> ResolveResult<IdList> {
    match store.find(option) {
        Some(spec) => Ok(id_list_from_spec(store, spec, list_group(store))?),
        None => Ok(IdList::new()),
    }
}

/// Resolves the layout for the joints selected by `joint_spec`
pub fn resolve_layout(store: &PropertyStore, joint_spec: &Value) -> ResolveResult<InterfaceLayout> {
    let body_parts = if store.find_group(BODY_PARTS_GROUP).is_some() {
        load_body_parts(store)?
    } else {
        Vec::new()
    };

    let joints = id_list_from_spec(store, joint_spec, list_group(store))?;
    if joints.is_empty() {
        warn!("[registry] joint specification {} selects no joints", joint_spec);
    }
    let boards = load_joints_control_boards(store, &joints)?;

    let ft_sensors = optional_id_list(store, FT_SENSOR_LIST_OPTION)?;
    let ft_ports = load_ft_sensor_ports(store, &ft_sensors)?;
    let imu_sensors = optional_id_list(store, IMU_SENSOR_LIST_OPTION)?;
    let imu_ports = load_imu_sensor_ports(store, &imu_sensors)?;

    info!(
        "[registry] resolved {} joint(s), {} FT sensor(s), {} IMU(s)",
        joints.len(),
        ft_sensors.len(),
        imu_sensors.len()
    );

    Ok(InterfaceLayout {
        body_parts,
        reverse_torso_joints: load_reverse_torso_joints(store),
        joints,
        control_boards: boards.control_board_names,
        control_board_axes: boards.axes,
        ft_sensors,
        ft_ports,
        imu_sensors,
        imu_ports,
    })
}

/// Resolves the layout for the joints named by the `wbi_joint_list` option
pub fn resolve_configured_layout(store: &PropertyStore) -> ResolveResult<InterfaceLayout> {
    let spec = store.find(JOINT_LIST_OPTION).ok_or_else(|| {
        error!("[registry] {} option not found", JOINT_LIST_OPTION);
        ConfigError::MissingField {
            field: JOINT_LIST_OPTION.to_string(),
        }
    })?;
    resolve_layout(store, spec)
}

/// Opens one control board per name in `control_boards`. If any of them
/// fails, the boards opened so far are closed and the error is returned.
pub fn open_all(
    factories: &[&dyn DriverFactory],
    local_name: &str,
    robot_name: &str,
    control_boards: &[String],
) -> DriverResult<Vec<Box<dyn ControlBoardDriver>>> {
    info!("[registry] opening {} control board(s)...", control_boards.len());

    let mut drivers: Vec<Box<dyn ControlBoardDriver>> = Vec::with_capacity(control_boards.len());
    for part in control_boards {
        match open_control_board(factories, local_name, robot_name, part) {
            Ok(driver) => drivers.push(driver),
            Err(e) => {
                for driver in drivers {
                    let opened = driver.part().to_string();
                    if let Err(close_err) = close_control_board(driver) {
                        warn!("[registry] failed to release {}: {}", opened, close_err);
                    }
                }
                return Err(e);
            }
        }
    }
    Ok(drivers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::tests::FakeFactory;
    use crate::errors::{DriverError, ListError, ResolveError};

    const ROBOT: &str = r#"
wbi_joint_list = "ROBOT_LOWER_BODY"
wbi_ft_sensor_list = ["l_leg_ft_sensor"]
wbi_imu_sensor_list = "ROBOT_IMUS"

[WBI_ID_LISTS]
ROBOT_TORSO = ["torso_pitch", "torso_roll"]
ROBOT_LEFT_LEG = ["l_hip_pitch", "l_knee"]
ROBOT_LOWER_BODY = ["ROBOT_TORSO", "ROBOT_LEFT_LEG"]
ROBOT_IMUS = ["imu"]

[WBI_YARP_BODY_PARTS]
numBodyParts = 2
bodyPart0 = "torso"
bodyPart1 = "left_leg"

[WBI_YARP_JOINTS]
torso_pitch = ["torso", 2]
torso_roll = ["torso", 1]
l_hip_pitch = ["left_leg", 0]
l_knee = ["left_leg", 3]

[WBI_YARP_FT_PORTS]
l_leg_ft_sensor = "/icubSim/left_leg/analog:o"

[WBI_YARP_IMU_PORTS]
imu = "/icubSim/inertial"
"#;

    fn store(content: &str) -> PropertyStore {
        PropertyStore::from_toml_str(content).unwrap()
    }

    #[test]
    fn test_resolve_configured_layout() {
        let layout = resolve_configured_layout(&store(ROBOT)).unwrap();

        assert_eq!(layout.body_parts, vec!["torso", "left_leg"]);
        assert!(!layout.reverse_torso_joints);
        assert_eq!(
            layout.joints.iter().collect::<Vec<_>>(),
            vec!["torso_pitch", "torso_roll", "l_hip_pitch", "l_knee"]
        );
        assert_eq!(layout.control_boards, vec!["torso", "left_leg"]);
        assert_eq!(
            layout.control_board_axes,
            vec![
                ControlBoardAxis::new(0, 2),
                ControlBoardAxis::new(0, 1),
                ControlBoardAxis::new(1, 0),
                ControlBoardAxis::new(1, 3),
            ]
        );
        assert_eq!(layout.ft_ports, vec!["/icubSim/left_leg/analog:o"]);
        assert_eq!(layout.imu_ports, vec!["/icubSim/inertial"]);
    }

    #[test]
    fn test_resolve_with_inline_joint_spec() {
        let spec = Value::from(vec!["ROBOT_LEFT_LEG", "torso_roll"]);
        let layout = resolve_layout(&store(ROBOT), &spec).unwrap();

        assert_eq!(
            layout.joints.iter().collect::<Vec<_>>(),
            vec!["l_hip_pitch", "l_knee", "torso_roll"]
        );
        assert_eq!(layout.control_boards, vec!["left_leg", "torso"]);
    }

    #[test]
    fn test_resolve_fails_without_partial_layout() {
        let spec = Value::from(vec!["torso_pitch", "r_knee"]);
        let err = resolve_layout(&store(ROBOT), &spec).unwrap_err();
        assert!(matches!(err, ResolveError::Config(ConfigError::MissingField { .. })));

        let err = resolve_layout(&store(ROBOT), &Value::from("ROBOT_UPPER_BODY")).unwrap_err();
        assert!(matches!(err, ResolveError::List(ListError::NotFound { .. })));
    }

    #[test]
    fn test_missing_joint_list_option() {
        let err = resolve_configured_layout(&store("[WBI_ID_LISTS]\nA = [\"x\"]\n")).unwrap_err();
        assert!(matches!(err, ResolveError::Config(ConfigError::MissingField { ref field }) if field == JOINT_LIST_OPTION));
    }

    #[test]
    fn test_custom_list_group() {
        let config = store(
            r#"
wbi_id_list_group = "MY_LISTS"
wbi_joint_list = "LEG"

[MY_LISTS]
LEG = ["l_knee"]

[WBI_YARP_JOINTS]
l_knee = ["left_leg", 3]
"#,
        );
        let layout = resolve_configured_layout(&config).unwrap();
        assert_eq!(layout.control_board_axes, vec![ControlBoardAxis::new(0, 3)]);
        assert!(layout.body_parts.is_empty());
    }

    #[test]
    fn test_layout_serializes_to_json() {
        let layout = resolve_configured_layout(&store(ROBOT)).unwrap();
        let json = serde_json::to_value(&layout).unwrap();

        assert_eq!(json["control_boards"], serde_json::json!(["torso", "left_leg"]));
        assert_eq!(json["control_board_axes"][3], serde_json::json!({"control_board": 1, "axis": 3}));
        assert_eq!(json["imu_sensors"], serde_json::json!(["imu"]));
    }

    #[test]
    fn test_open_all() {
        let factory = FakeFactory::new();
        let boards = vec!["torso".to_string(), "left_leg".to_string()];

        let drivers = open_all(&[&factory], "wbi", "icubSim", &boards).unwrap();
        assert_eq!(drivers.len(), 2);
        assert_eq!(factory.open_count(), 2);

        for driver in drivers {
            close_control_board(driver).unwrap();
        }
        assert_eq!(factory.open_count(), 0);
    }

    #[test]
    fn test_open_all_releases_on_failure() {
        let mut factory = FakeFactory::new();
        factory.unreachable.push("right_leg");
        let boards = vec!["torso".to_string(), "left_leg".to_string(), "right_leg".to_string()];

        let err = open_all(&[&factory], "wbi", "icubSim", &boards).err().unwrap();
        assert!(matches!(err, DriverError::OpenFailed { ref part, .. } if part == "right_leg"));
        assert_eq!(factory.open_count(), 0);
    }
}
