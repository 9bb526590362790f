use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;

const LOCAL_CONFIG_PATH: &str = "rootwalk.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/rootwalk/config.toml";

/// Main configuration structure for rootwalk
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Referral walk and transport settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. rootwalk.toml in current directory
    /// 3. /etc/rootwalk/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(root) = overrides.root_server {
            self.resolver.root_server = root;
        }
        if let Some(timeout) = overrides.query_timeout_ms {
            self.resolver.query_timeout_ms = timeout;
        }
        if let Some(depth) = overrides.max_depth {
            self.resolver.max_depth = depth;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let resolver = &self.resolver;

        if resolver.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if resolver.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout must be greater than 0".to_string(),
            ));
        }
        if resolver.max_depth == 0 {
            return Err(ConfigError::Validation(
                "Max referral depth must be greater than 0".to_string(),
            ));
        }
        if resolver.max_response_size < 512 {
            return Err(ConfigError::Validation(format!(
                "Max response size {} is below the 512 byte UDP minimum",
                resolver.max_response_size
            )));
        }
        if resolver.root_server.is_ipv4() != resolver.bind_address.is_ipv4() {
            return Err(ConfigError::Validation(format!(
                "Root server {} is not reachable from bind address {}",
                resolver.root_server, resolver.bind_address
            )));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|path| std::path::Path::new(path).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root_server: Option<IpAddr>,
    pub query_timeout_ms: Option<u64>,
    pub max_depth: Option<usize>,
    pub log_level: Option<String>,
}
