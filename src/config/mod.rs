//! Project-level configuration (`.notevault.toml`).

pub mod settings;

pub use settings::Settings;
