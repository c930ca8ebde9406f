//! Configuration module for the Aero router.
//!
//! Settings are layered: serialized defaults first, then an optional
//! configuration file (TOML, YAML, JSON), then environment variables with a
//! prefix (`AERO__LOOKUP__READER_THREADS=4`). The merged result is validated
//! before use.
//!
//! The route table itself is part of the configuration: each `[[routes]]`
//! entry is replayed into the radix tree at startup, in file order.

use std::path::{Path, PathBuf};

use crate::error::config::ConfigError;
use crate::routing::Route;
use config::{Config, ConfigError as ExternalConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

pub mod logging;
pub mod lookup;

pub use logging::LogConfig;
pub use lookup::LookupConfig;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Default environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "AERO";

/// A trait for types that can be validated.
pub trait Validate {
    /// Validates that the configuration is correct.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the configuration is valid
    /// * `Err(ConfigError)` if the configuration is invalid
    fn validate(&self) -> ConfigResult<()>;
}

/// Main configuration for the Aero router.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    /// Routes to register, in registration order
    #[serde(default)]
    pub routes: Vec<Route>,

    /// Serve-phase lookup configuration
    pub lookup: LookupConfig,

    /// Log configuration
    pub log: LogConfig,
}

impl Validate for RouterConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (index, route) in self.routes.iter().enumerate() {
            if route.path.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "routes[{index}] has an empty path"
                )));
            }
            if route.handler.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "routes[{index}] ({}) has an empty handler",
                    route.path
                )));
            }
        }

        self.lookup.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

/// Configuration loader for the Aero router.
#[derive(Debug)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Optional path to the configuration file
    /// * `env_prefix` - Prefix for environment variables that override configuration values
    pub fn new<P: AsRef<Path>>(config_path: Option<P>, env_prefix: &str) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            env_prefix: env_prefix.to_string(),
        }
    }

    /// Loads the configuration from defaults, the file, and environment variables.
    ///
    /// # Returns
    ///
    /// * `Ok(RouterConfig)` if the configuration was loaded and validated
    /// * `Err(ConfigError)` if loading, parsing, or validation failed
    pub fn load(&self) -> ConfigResult<RouterConfig> {
        let mut builder = Config::builder().add_source(
            Config::try_from(&RouterConfig::default())
                .map_err(|e| ConfigError::ParseError(e.to_string()))?,
        );

        if let Some(path) = &self.config_path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }

            let format = match path.extension().and_then(|ext| ext.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                Some("yaml" | "yml") => FileFormat::Yaml,
                _ => {
                    return Err(ConfigError::ParseError(format!(
                        "Unsupported file extension for: {path:?}"
                    )))
                }
            };
            builder = builder.add_source(File::from(path.as_path()).format(format));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(|e| match e {
            ExternalConfigError::NotFound(path) => ConfigError::FileNotFound(PathBuf::from(path)),
            other => ConfigError::ParseError(other.to_string()),
        })?;

        let router_config: RouterConfig = config
            .try_deserialize()
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        router_config.validate()?;

        tracing::debug!(
            routes = router_config.routes.len(),
            reader_threads = router_config.lookup.reader_threads,
            "Configuration loaded"
        );

        Ok(router_config)
    }
}
