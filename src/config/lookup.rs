//! Lookup configuration module.
//!
//! Settings for the serve phase, where the frozen route table is queried by
//! concurrent readers.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound on reader threads used for batch resolution.
pub const MAX_READER_THREADS: usize = 1024;

/// Lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Number of concurrent readers resolving paths against the frozen table
    pub reader_threads: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            reader_threads: num_cpus::get(),
        }
    }
}

impl Validate for LookupConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.reader_threads == 0 || self.reader_threads > MAX_READER_THREADS {
            return Err(ConfigError::ValueOutOfRange {
                key: "lookup.reader_threads".to_string(),
                message: format!("must be between 1 and {MAX_READER_THREADS}"),
            });
        }
        Ok(())
    }
}
