// Configuration module
// Public interface for the persisted user configuration

mod store;

pub use store::{Config, ConfigError, ConfigStore};
