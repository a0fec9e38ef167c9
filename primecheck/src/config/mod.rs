//! Configuration management for primecheck
use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use std::path::Path;

use crate::config::error::PrimecheckConfigError;

mod error;

/// The smallest accepted read buffer, in bytes.
pub const MIN_READ_BUFFER_SIZE: usize = 64;

/// The smallest accepted write buffer, in bytes. This holds one verdict.
pub const MIN_WRITE_BUFFER_SIZE: usize = 2;

/// The largest accepted buffer, in bytes (1 GiB).
pub const MAX_BUFFER_SIZE: usize = 1 << 30;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self, cfg: &Settings) -> Result<(), ConfigError>;
}

/// Top-level configuration for primecheck
#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    /// Stream pipeline configuration
    pub pipeline: PipelineConfig,
}

/// Buffer configuration for the stream pipeline.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Capacity of the read buffer in bytes. Longer lines are still
    /// accepted; they are decoded in pieces.
    pub read_buffer_size: usize,
    /// Capacity of the write buffer in bytes.
    pub write_buffer_size: usize,
}

impl Validatable for PipelineConfig {
    fn validate(&self, _: &Settings) -> Result<(), ConfigError> {
        let error = if self.read_buffer_size < MIN_READ_BUFFER_SIZE {
            PrimecheckConfigError::ReadBufferTooSmall(self.read_buffer_size)
        } else if self.write_buffer_size < MIN_WRITE_BUFFER_SIZE {
            PrimecheckConfigError::WriteBufferTooSmall(self.write_buffer_size)
        } else if self.read_buffer_size > MAX_BUFFER_SIZE {
            PrimecheckConfigError::BufferTooLarge("read", self.read_buffer_size)
        } else if self.write_buffer_size > MAX_BUFFER_SIZE {
            PrimecheckConfigError::BufferTooLarge("write", self.write_buffer_size)
        } else {
            return Ok(());
        };

        Err(ConfigError::Message(format!("[pipeline] {error}")))
    }
}

impl Settings {
    /// Initializing the global config first with default values and then with
    /// provided/overwritten environment variables. The explicit separator with
    /// double underscores is needed to correctly parse the nested config structure.
    ///
    /// The environment variables are prefixed with `PRIMECHECK_` and the nested
    /// fields are separated with double underscores. For example, the path
    /// `pipeline.read_buffer_size` is parsed as following:
    ///
    /// ```text
    /// PRIMECHECK_PIPELINE__READ_BUFFER_SIZE
    /// ^^^^^^^^^^ ^^^^^^^^  ^^^^^^^^^^^^^^^^
    ///      │    ^    │   ^^       │
    ///      │    │    │   │        └ The `read_buffer_size` field of the `pipeline` object
    ///      │    │    │   └ separator("__")
    ///      │    │    └ The `pipeline` field of the root object (`Settings`)
    ///      │    └ prefix_separator("_")
    ///      └ with_prefix("PRIMECHECK")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        let env = Environment::with_prefix("PRIMECHECK")
            .separator("__")
            .try_parsing(true)
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();

        cfg_builder = cfg_builder.set_default(
            "pipeline.read_buffer_size",
            primality::DEFAULT_BUFFER_SIZE as u64,
        )?;
        cfg_builder = cfg_builder.set_default(
            "pipeline.write_buffer_size",
            primality::DEFAULT_BUFFER_SIZE as u64,
        )?;

        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let cfg = cfg_builder.build()?;

        let settings: Settings = cfg.try_deserialize()?;

        settings.validate()?;

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.pipeline.validate(self)?;

        Ok(())
    }
}
