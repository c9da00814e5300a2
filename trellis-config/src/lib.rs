// Configuration loading for Trellis engines

pub mod env;
pub mod error;
pub mod loader;
pub mod settings;

pub use env::{DEFAULT_PREFIX, EnvLoader};
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::{ConnectorSettings, EngineSettings, LoggingSettings};
