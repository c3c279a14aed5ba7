// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{PipelineError, Result};
use crate::utils::validation::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub lookup: LookupConfig,
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    pub log_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    pub base_url: String,
    pub fields: String,
    pub timeout_secs: u64,
    /// Concurrent lookups for distinct addresses. 1 keeps resolution sequential.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    pub entries: usize,
    pub ip_pool_size: usize,
    pub private_ips: usize,
    pub days_back: i64,
}

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "LEAD_SCORER";

fn default_pretty() -> bool {
    true
}

fn default_workers() -> usize {
    1
}

impl Config {
    /// Layer built-in defaults, then the TOML file if present, then
    /// `LEAD_SCORER__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        Self::load_with_environment(
            path,
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    fn load_with_environment(path: &Path, environment: config::Environment) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default_config())
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            input: InputConfig {
                log_path: PathBuf::from("access.log"),
            },
            output: OutputConfig {
                path: PathBuf::from("leads.json"),
                pretty: true,
            },
            lookup: LookupConfig {
                base_url: "http://ip-api.com/json".to_string(),
                fields: "status,message,org".to_string(),
                timeout_secs: 5,
                workers: 1,
            },
            generator: GeneratorConfig {
                entries: 500,
                ip_pool_size: 80,
                private_ips: 20,
                days_back: 30,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookup.timeout_secs == 0 {
            return Err(PipelineError::Config(
                "lookup.timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.lookup.workers == 0 {
            return Err(PipelineError::Config(
                "lookup.workers must be greater than 0".to_string(),
            ));
        }

        Validator::validate_url(&self.lookup.base_url)
            .map_err(|e| PipelineError::Config(e.to_string()))?;

        if self.generator.entries == 0 {
            return Err(PipelineError::Config(
                "generator.entries must be greater than 0".to_string(),
            ));
        }

        if self.generator.ip_pool_size == 0 {
            return Err(PipelineError::Config(
                "generator.ip_pool_size must be greater than 0".to_string(),
            ));
        }

        if self.generator.private_ips > self.generator.ip_pool_size {
            return Err(PipelineError::Config(format!(
                "generator.private_ips ({}) exceeds generator.ip_pool_size ({})",
                self.generator.private_ips, self.generator.ip_pool_size
            )));
        }

        if self.generator.days_back <= 0 {
            return Err(PipelineError::Config(
                "generator.days_back must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
