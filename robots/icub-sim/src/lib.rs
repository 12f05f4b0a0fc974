//! Robot-specific constants and configuration for the simulated iCub
//!
//! The configuration covers:
//! - torso, arms and legs joints (head excluded from the dynamic model)
//! - four six-axis FT sensors on arms and legs
//! - one IMU

use wbi_config::pid::{motor_torque_parameters_from_description, pid_from_description};
use wbi_config::pid::{MotorTorqueParameters, PidParameters};
use wbi_config::driver::DriverOptions;
use wbi_config::{PropertyStore, Value};

/// Default configuration directory (embedded at compile time)
pub const CONFIG_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config");

/// Embedded TOML configuration
pub const WBI_TOML: &str = include_str!("../config/wbi.toml");

/// Robot name, also the prefix of the remote ports, when `robot` is not set
pub const ROBOT_NAME: &str = "icubSim";

/// Prefix of the local ports when `localName` is not set
pub const LOCAL_NAME: &str = "wbi";

pub const ROBOT_OPTION: &str = "robot";
pub const LOCAL_NAME_OPTION: &str = "localName";

pub const PIDS_GROUP: &str = "WBI_YARP_PIDS";
pub const MOTOR_PARAMETERS_GROUP: &str = "WBI_YARP_MOTOR_PARAMETERS";

/// Get the configuration path (allow override via CONFIG_PATH env var)
pub fn get_config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| CONFIG_DIR.to_string())
}

pub fn robot_name(store: &PropertyStore) -> &str {
    store.find(ROBOT_OPTION).and_then(Value::as_str).unwrap_or(ROBOT_NAME)
}

pub fn local_name(store: &PropertyStore) -> &str {
    store.find(LOCAL_NAME_OPTION).and_then(Value::as_str).unwrap_or(LOCAL_NAME)
}

/// Driver options of every control board, with ports named after the
/// configured robot and local names
pub fn control_board_options(store: &PropertyStore, control_boards: &[String]) -> Vec<DriverOptions> {
    let (local, robot) = (local_name(store), robot_name(store));
    control_boards
        .iter()
        .map(|board| DriverOptions::remote_control_board(local, robot, board))
        .collect()
}

/// Per-joint PID gains, starting from zeroed defaults
pub fn joint_pids(store: &PropertyStore) -> Vec<(String, PidParameters)> {
    let Some(group) = store.find_group(PIDS_GROUP) else {
        return Vec::new();
    };
    group
        .iter()
        .map(|(joint, description)| {
            let mut pid = PidParameters::default();
            pid_from_description(description, &mut pid);
            (joint.to_string(), pid)
        })
        .collect()
}

/// Per-joint motor torque parameters, starting from zeroed defaults
pub fn joint_motor_parameters(store: &PropertyStore) -> Vec<(String, MotorTorqueParameters)> {
    let Some(group) = store.find_group(MOTOR_PARAMETERS_GROUP) else {
        return Vec::new();
    };
    group
        .iter()
        .map(|(joint, description)| {
            let mut params = MotorTorqueParameters::default();
            motor_torque_parameters_from_description(description, &mut params);
            (joint.to_string(), params)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wbi_config::resolve_configured_layout;

    #[test]
    fn test_embedded_config_resolves() {
        let store = PropertyStore::from_toml_str(WBI_TOML).unwrap();
        let layout = resolve_configured_layout(&store).unwrap();

        assert_eq!(layout.body_parts.len(), 6);
        assert_eq!(layout.joints.len(), 23);
        assert_eq!(
            layout.control_boards,
            vec!["torso", "left_arm", "right_arm", "left_leg", "right_leg"]
        );
        assert_eq!(layout.joints.index_of("torso_pitch"), Some(0));
        assert_eq!(layout.control_board_axes[0].axis, 2);
        assert_eq!(layout.ft_ports.len(), 4);
        assert_eq!(layout.imu_ports, vec!["/icubSim/inertial"]);
    }

    #[test]
    fn test_control_board_options_use_configured_names() {
        let store = PropertyStore::from_toml_str(WBI_TOML).unwrap();
        let layout = resolve_configured_layout(&store).unwrap();

        let options = control_board_options(&store, &layout.control_boards);
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].local, "/wbi/torso");
        assert_eq!(options[0].remote, "/icubSim/torso");

        let renamed = PropertyStore::from_toml_str("robot = \"icub\"\nlocalName = \"balancer\"\n").unwrap();
        let options = control_board_options(&renamed, &["left_leg".to_string()]);
        assert_eq!(options[0].local, "/balancer/left_leg");
        assert_eq!(options[0].remote, "/icub/left_leg");

        assert_eq!(robot_name(&PropertyStore::new()), ROBOT_NAME);
        assert_eq!(local_name(&PropertyStore::new()), LOCAL_NAME);
    }

    #[test]
    fn test_embedded_gains() {
        let store = PropertyStore::from_toml_str(WBI_TOML).unwrap();

        let pids = joint_pids(&store);
        assert_eq!(pids.len(), 2);
        assert_eq!(pids[1].0, "l_knee");
        assert_eq!(pids[1].1.kp, 50.0);
        assert_eq!(pids[1].1.kd, 0.0);

        let motors = joint_motor_parameters(&store);
        assert_eq!(motors, vec![("torso_pitch".to_string(), MotorTorqueParameters { bemf: 0.01, ktau: 0.72 })]);
    }
}
