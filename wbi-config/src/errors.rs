use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Unsupported configuration value for '{key}': {reason}")]
    UnsupportedValue { key: String, reason: String },

    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Named ID list expansion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    #[error("Requested list '{list}' not found")]
    NotFound { list: String },

    #[error("Requested list '{list}' is included circularly inside parent list '{root}'")]
    CircularReference { list: String, root: String },

    #[error("Invalid list specification: {reason}")]
    InvalidSpec { reason: String },
}

/// Control board driver errors
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("No driver factory registered for device '{device}'")]
    UnsupportedDevice { device: String },

    #[error("Problems instantiating the device driver for '{part}': {reason}")]
    OpenFailed { part: String, reason: String },

    #[error("Device driver for '{part}' is not valid")]
    InvalidHandle { part: String },

    #[error("Device driver for '{part}' failed to close: {reason}")]
    CloseFailed { part: String, reason: String },
}

/// Errors raised while resolving a whole interface layout
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("ID list error: {0}")]
    List(#[from] ListError),

    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),
}

/// Result type aliases for convenience
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ListResult<T> = Result<T, ListError>;
pub type DriverResult<T> = Result<T, DriverError>;
pub type ResolveResult<T> = Result<T, ResolveError>;
