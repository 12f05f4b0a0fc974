// Public modules
pub mod body_parts;
pub mod config;
pub mod driver;
pub mod errors;
pub mod id_list;
pub mod joints;
pub mod lists;
pub mod pid;
pub mod registry;
pub mod sensors;
pub mod serialization;

// Re-export commonly used types
pub use config::{load_property_store, Group, PropertyStore, Value};
pub use errors::{ConfigError, DriverError, ListError, ResolveError, ResolveResult};
pub use id_list::IdList;
pub use lists::{expand_list, id_list_from_spec, load_id_list};
pub use registry::{open_all, resolve_configured_layout, resolve_layout, InterfaceLayout};

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing with default configuration. Logs go to stderr so that
/// stdout stays free for resolved output.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration file at `path` and resolve its interface layout
pub fn load_layout(path: &str) -> ResolveResult<InterfaceLayout> {
    info!("[config] loading {}", path);
    let store = load_property_store(path)?;
    resolve_configured_layout(&store)
}
