//! Provider module for Dhinchak
//!
//! This module contains the reply-fetcher abstraction and the Gemini
//! implementation.

pub mod base;
pub mod gemini;

pub use base::{canned_reply, Provider, CREATOR_REPLY, CREATOR_TRIGGERS};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if provider initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    Ok(Box::new(GeminiProvider::new(config.gemini.clone())?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider() {
        let mut config = ProviderConfig::default();
        config.gemini.api_key = "test-key".to_string();
        let provider = create_provider(&config);
        assert!(provider.is_ok());
    }
}
