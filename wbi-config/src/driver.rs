use crate::errors::{DriverError, DriverResult};
use serde::Serialize;
use tracing::{error, info};

/// Device name of a control board reached through the middleware
pub const REMOTE_CONTROL_BOARD: &str = "remote_controlboard";

/// Options handed to a driver factory when opening a device
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverOptions {
    pub robot: String,
    pub part: String,
    pub device: String,
    pub local: String,
    pub remote: String,
    pub write_strict: bool,
}

impl DriverOptions {
    /// Options for the control board of `body_part`, connecting the local
    /// port `/{local_name}/{body_part}` to `/{robot_name}/{body_part}`
    pub fn remote_control_board(local_name: &str, robot_name: &str, body_part: &str) -> Self {
        Self {
            robot: robot_name.to_string(),
            part: body_part.to_string(),
            device: REMOTE_CONTROL_BOARD.to_string(),
            local: format!("/{}/{}", local_name, body_part),
            remote: format!("/{}/{}", robot_name, body_part),
            write_strict: true,
        }
    }
}

/// An opened control board handle
pub trait ControlBoardDriver {
    fn is_valid(&self) -> bool;
    fn close(&mut self) -> DriverResult<()>;
    fn part(&self) -> &str;
}

/// Creates control board handles for one device type
pub trait DriverFactory: Sync {
    fn name(&self) -> &'static str;
    fn create(&self, options: &DriverOptions) -> DriverResult<Box<dyn ControlBoardDriver>>;
}

pub fn create_driver(
    factories: &[&dyn DriverFactory],
    options: &DriverOptions,
) -> DriverResult<Box<dyn ControlBoardDriver>> {
    factories
        .iter()
        .find(|f| f.name() == options.device)
        .ok_or_else(|| DriverError::UnsupportedDevice {
            device: options.device.clone(),
        })?
        .create(options)
}

/// Opens the remote control board of `body_part` on `robot_name`
pub fn open_control_board(
    factories: &[&dyn DriverFactory],
    local_name: &str,
    robot_name: &str,
    body_part: &str,
) -> DriverResult<Box<dyn ControlBoardDriver>> {
    let options = DriverOptions::remote_control_board(local_name, robot_name, body_part);
    let driver = create_driver(factories, &options).map_err(|e| {
        error!("[driver] problems instantiating the device driver {}: {}", body_part, e);
        e
    })?;

    if !driver.is_valid() {
        error!("[driver] device driver {} opened but not valid", body_part);
        return Err(DriverError::OpenFailed {
            part: body_part.to_string(),
            reason: "driver handle is not valid".to_string(),
        });
    }

    info!("[driver] opened {} -> {}", options.local, options.remote);
    Ok(driver)
}

/// Closes and releases a control board handle
pub fn close_control_board(mut driver: Box<dyn ControlBoardDriver>) -> DriverResult<()> {
    if !driver.is_valid() {
        return Err(DriverError::InvalidHandle {
            part: driver.part().to_string(),
        });
    }
    driver.close()
}
