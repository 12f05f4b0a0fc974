//! PID gains and motor torque parameters from configuration descriptions.
//!
//! A description is a list of `(gainName, value)` pairs, in any order:
//!
//! ```toml
//! l_hip_pitch = [["kp", 40.0], ["ki", 0.5], ["stic_up", 0.1]]
//! ```
//!
//! Entries that are not such pairs and unknown gain names are skipped, so
//! fields not mentioned keep whatever value the caller put there.

use crate::config::Value;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PidParameters {
    pub kp: f64,
    pub kd: f64,
    pub ki: f64,
    pub stiction_up: f64,
    pub stiction_down: f64,
}

impl PidParameters {
    pub fn set_stiction_values(&mut self, up: f64, down: f64) {
        self.stiction_up = up;
        self.stiction_down = down;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotorTorqueParameters {
    /// Back-EMF gain
    pub bemf: f64,
    /// Torque constant
    pub ktau: f64,
}

/// Named numeric pairs of a description
fn gain_entries(description: &Value) -> impl Iterator<Item = (&str, f64)> {
    description
        .as_list()
        .unwrap_or_default()
        .iter()
        .filter_map(|entry| match entry.as_list() {
            Some([name, value]) => Some((name.as_str()?, value.as_float()?)),
            _ => None,
        })
}

/// Applies the gains found in `description` to `pid`; returns how many were
/// recognized
pub fn pid_from_description(description: &Value, pid: &mut PidParameters) -> usize {
    let mut applied = 0;
    for (gain, value) in gain_entries(description) {
        match gain {
            "kp" => pid.kp = value,
            "kd" => pid.kd = value,
            "ki" => pid.ki = value,
            "stic_up" => pid.set_stiction_values(value, pid.stiction_down),
            "stic_down" => pid.set_stiction_values(pid.stiction_up, value),
            _ => {
                trace!("[pid] ignoring gain '{}'", gain);
                continue;
            }
        }
        applied += 1;
    }
    applied
}

/// Applies `bmef` and `ktau` found in `description` to `params`; returns how
/// many were recognized
pub fn motor_torque_parameters_from_description(description: &Value, params: &mut MotorTorqueParameters) -> usize {
    let mut applied = 0;
    for (gain, value) in gain_entries(description) {
        match gain {
            "bmef" => params.bemf = value,
            "ktau" => params.ktau = value,
            _ => continue,
        }
        applied += 1;
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PropertyStore;

    fn description(content: &str) -> Value {
        let store = PropertyStore::from_toml_str(content).unwrap();
        store.find("gains").unwrap().clone()
    }

    #[test]
    fn test_pid_gains_applied() {
        let desc = description(r#"gains = [["kp", 40.0], ["kd", 2], ["ki", 0.5], ["stic_up", 0.1], ["stic_down", -0.2]]"#);
        let mut pid = PidParameters::default();

        assert_eq!(pid_from_description(&desc, &mut pid), 5);
        assert_eq!(
            pid,
            PidParameters {
                kp: 40.0,
                kd: 2.0,
                ki: 0.5,
                stiction_up: 0.1,
                stiction_down: -0.2,
            }
        );
    }

    #[test]
    fn test_unspecified_gains_keep_caller_values() {
        let desc = description(r#"gains = ["l_hip_pitch", ["kp", 10.0], ["bogus", 1.0], ["ki"], ["kd", "high"], 3]"#);
        let mut pid = PidParameters {
            kp: 1.0,
            kd: 2.0,
            ki: 3.0,
            stiction_up: 4.0,
            stiction_down: 5.0,
        };

        assert_eq!(pid_from_description(&desc, &mut pid), 1);
        assert_eq!(pid.kp, 10.0);
        assert_eq!(pid.kd, 2.0);
        assert_eq!(pid.ki, 3.0);
        assert_eq!((pid.stiction_up, pid.stiction_down), (4.0, 5.0));
    }

    #[test]
    fn test_non_list_description_changes_nothing() {
        let mut pid = PidParameters::default();
        assert_eq!(pid_from_description(&Value::Float(1.0), &mut pid), 0);
        assert_eq!(pid, PidParameters::default());
    }

    #[test]
    fn test_motor_torque_parameters() {
        let desc = description(r#"gains = [["bmef", 0.3], ["ktau", 1.5], ["kp", 7.0]]"#);
        let mut params = MotorTorqueParameters::default();

        assert_eq!(motor_torque_parameters_from_description(&desc, &mut params), 2);
        assert_eq!(params, MotorTorqueParameters { bemf: 0.3, ktau: 1.5 });
    }
}
