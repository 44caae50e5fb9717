use std::time::Duration;

use thiserror::Error;

/// Configuration errors are fatal and reported before any processing begins.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk size must be > 0")]
    ZeroChunkSize,

    #[error("overlap {overlap} must be smaller than chunk size {size} (window would never advance)")]
    OverlapTooLarge { size: usize, overlap: usize },

    #[error("token budget must be > 0")]
    ZeroBudget,

    #[error("chars-per-token estimate must be > 0")]
    ZeroCharsPerToken,
}

/// Settings for one document-splitting run.
///
/// Defaults come from the document profile; any field can be overridden
/// from the CLI.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Oracle endpoint, e.g. "http://localhost:11434"
    pub endpoint: String,
    /// Oracle model identifier
    pub model: String,
    /// Analysis window size in bytes
    pub chunk_size: usize,
    /// Overlap between consecutive windows in bytes
    pub overlap: usize,
    /// Minimum spacing between accepted boundaries in bytes
    pub min_section: usize,
}

impl SplitConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.overlap >= self.chunk_size {
            return Err(ConfigError::OverlapTooLarge {
                size: self.chunk_size,
                overlap: self.overlap,
            });
        }
        Ok(())
    }
}

/// Settings for one batch-analysis run over the database.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Oracle endpoint, e.g. "http://localhost:11434"
    pub endpoint: String,
    /// Oracle model identifier
    pub model: String,
    /// Max rows to fetch from the database in one run
    pub limit: usize,
    /// Target token count for one oracle call
    pub token_budget: usize,
    /// Estimation ratio: 1 token ~ this many chars
    pub chars_per_token: usize,
    /// Per-record text truncation, in bytes
    pub max_record_len: usize,
    /// Retries per oracle call before a batch is marked failed
    pub max_retries: u32,
    /// Delay between successive oracle calls
    pub request_delay: Duration,
}

impl AnalyzeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token_budget == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.chars_per_token == 0 {
            return Err(ConfigError::ZeroCharsPerToken);
        }
        Ok(())
    }
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
            limit: 200,
            token_budget: 100_000,
            chars_per_token: 4,
            max_record_len: 16_000,
            max_retries: 3,
            request_delay: Duration::from_secs(3),
        }
    }
}
