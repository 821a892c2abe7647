mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{ClickMode, EngineConfig, MapVariant};
