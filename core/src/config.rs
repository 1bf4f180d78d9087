use crate::{
    error::{EngineError, EngineResult},
    types::CompanyId,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_SIZE: usize = 15_000;

/// Runtime knobs for one engine invocation. Passed explicitly into
/// every orchestrator; nothing here is process-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum assignment records per write call.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Distinct phones per company per sweep. Falls back to `chunk_size`.
    #[serde(default)]
    pub page_size: Option<usize>,
    /// Companies the block-list oracle refuses.
    #[serde(default)]
    pub blocked_companies: Vec<CompanyId>,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            page_size: None,
            blocked_companies: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing fields take production defaults.
    /// In tests, use EngineConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Small sizes so chunk and page boundaries show up with few rows.
    pub fn default_test() -> Self {
        Self {
            chunk_size: 4,
            page_size: Some(4),
            blocked_companies: Vec::new(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn effective_page_size(&self) -> usize {
        self.page_size.unwrap_or(self.chunk_size)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.chunk_size == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "chunk_size must be at least 1".into(),
            });
        }
        if self.page_size == Some(0) {
            return Err(EngineError::InvalidConfig {
                reason: "page_size must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_falls_back_to_chunk_size() {
        let config = EngineConfig::default();
        assert_eq!(config.effective_page_size(), DEFAULT_CHUNK_SIZE);
        assert_eq!(config.with_page_size(500).effective_page_size(), 500);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "page_size": 10 }"#).unwrap();
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.effective_page_size(), 10);
        assert!(config.blocked_companies.is_empty());
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(EngineConfig::default().with_chunk_size(0).validate().is_err());
        assert!(EngineConfig::default().with_page_size(0).validate().is_err());
        assert!(EngineConfig::default_test().validate().is_ok());
    }
}
