pub mod store;
pub mod value;

pub use store::{load_property_store, Group, PropertyStore};
pub use value::Value;
