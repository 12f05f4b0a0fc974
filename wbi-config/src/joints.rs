//! Mapping of interface joints onto control board axes.
//!
//! Each joint has an entry `joint = ["controlBoardName", axis]` in the
//! `WBI_YARP_JOINTS` group. Control boards get numeric ids in order of first
//! appearance along the joint list.

use crate::config::{Group, PropertyStore};
use crate::errors::{ConfigError, ConfigResult};
use crate::id_list::IdList;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{error, info};

pub const JOINTS_GROUP: &str = "WBI_YARP_JOINTS";

/// Position of one joint: which control board, which axis on it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlBoardAxis {
    pub control_board: usize,
    pub axis: usize,
}

impl ControlBoardAxis {
    pub fn new(control_board: usize, axis: usize) -> Self {
        Self { control_board, axis }
    }
}

/// Control boards referenced by a joint list, and where each joint lives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JointControlBoards {
    pub control_board_names: Vec<String>,
    pub axes: Vec<ControlBoardAxis>,
}

/// Reads the `(controlBoardName, axis)` entry of `joint`
fn joint_mapping<'a>(joints_config: &'a Group, joint: &str) -> ConfigResult<(&'a str, usize)> {
    let mapping = joints_config.find(joint).ok_or_else(|| {
        error!("[joints] joint '{}' not found in {} section", joint, JOINTS_GROUP);
        ConfigError::MissingField {
            field: format!("{}.{}", JOINTS_GROUP, joint),
        }
    })?;

    let malformed = |reason: &str| {
        error!(
            "[joints] joint '{}' found in {} but is not in the canonical form (controlBoardName, axis): {}",
            joint, JOINTS_GROUP, reason
        );
        ConfigError::InvalidValue {
            field: format!("{}.{}", JOINTS_GROUP, joint),
            reason: format!("expected (controlBoardName, axis), {}", reason),
        }
    };

    let items = match mapping.as_list() {
        Some(items) if items.len() == 2 => items,
        _ => return Err(malformed(&format!("got {}", mapping))),
    };
    let name = items[0]
        .as_str()
        .ok_or_else(|| malformed("control board name is not a string"))?;
    let axis = items[1]
        .as_int()
        .and_then(|a| usize::try_from(a).ok())
        .ok_or_else(|| malformed("axis is not a non-negative integer"))?;

    Ok((name, axis))
}

/// Appends to `names` the control boards used by `joints` that are not
/// already listed. Every joint is validated first; on error `names` is left
/// untouched.
pub fn append_new_control_boards(
    joints_config: &Group,
    joints: &IdList,
    names: &mut Vec<String>,
) -> ConfigResult<()> {
    let mut new_names: Vec<String> = Vec::new();
    for joint in joints.iter() {
        let (name, _) = joint_mapping(joints_config, joint)?;
        if !names.iter().chain(new_names.iter()).any(|n| n == name) {
            new_names.push(name.to_string());
        }
    }
    names.extend(new_names);
    Ok(())
}

/// Control board name to numeric id, the id being the position in `names`
pub fn control_board_ids_map(names: &[String]) -> HashMap<String, usize> {
    names
        .iter()
        .enumerate()
        .map(|(id, name)| (name.clone(), id))
        .collect()
}

/// Builds the `(control board id, axis)` pair of every joint. All joints must
/// map onto a board listed in `names`.
pub fn control_board_axis_list(
    joints_config: &Group,
    joints: &IdList,
    names: &[String],
) -> ConfigResult<Vec<ControlBoardAxis>> {
    let ids = control_board_ids_map(names);

    joints
        .iter()
        .map(|joint| {
            let (name, axis) = joint_mapping(joints_config, joint)?;
            let control_board = *ids.get(name).ok_or_else(|| {
                error!(
                    "[joints] joint '{}' uses control board '{}' which is not registered",
                    joint, name
                );
                ConfigError::InvalidValue {
                    field: format!("{}.{}", JOINTS_GROUP, joint),
                    reason: format!("control board '{}' is not registered", name),
                }
            })?;
            Ok(ControlBoardAxis::new(control_board, axis))
        })
        .collect()
}

/// Distinct control board ids in order of first use
pub fn control_board_list(axes: &[ControlBoardAxis]) -> Vec<usize> {
    let mut boards = Vec::new();
    for axis in axes {
        if !boards.contains(&axis.control_board) {
            boards.push(axis.control_board);
        }
    }
    boards
}

/// Resolves the control boards and axes of `joints` from the
/// `WBI_YARP_JOINTS` group of `store`
pub fn load_joints_control_boards(store: &PropertyStore, joints: &IdList) -> ConfigResult<JointControlBoards> {
    let empty = Group::new();
    let joints_config = store.find_group(JOINTS_GROUP).unwrap_or(&empty);

    let mut control_board_names = Vec::new();
    append_new_control_boards(joints_config, joints, &mut control_board_names)?;
    let axes = control_board_axis_list(joints_config, joints, &control_board_names)?;

    info!(
        "[joints] {} joint(s) mapped onto {} control board(s)",
        joints.len(),
        control_board_names.len()
    );

    Ok(JointControlBoards {
        control_board_names,
        axes,
    })
}
