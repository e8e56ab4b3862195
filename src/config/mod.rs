/// Settings file loading from stocksense.toml
pub mod settings;

/// Environment variable overrides applied on top of the settings file
pub mod environment;

pub use settings::{Settings, load_settings};
