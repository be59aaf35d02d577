//! Server configuration.

use crate::error::ServerError;

/// Default listening port
pub const DEFAULT_PORT: u16 = 28333;

/// Word server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen_addr: String,
    /// Fewest words sent per connection
    pub min_words: usize,
    /// Most words sent per connection
    pub max_words: usize,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { listen_addr: format!("0.0.0.0:{DEFAULT_PORT}"), min_words: 1, max_words: 9, seed: None }
    }
}

impl ServerConfig {
    /// Check the word range.
    ///
    /// # Errors
    ///
    /// [`ServerError::InvalidConfig`] if `min_words` is zero or exceeds
    /// `max_words`.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.min_words == 0 {
            return Err(ServerError::InvalidConfig("min_words must be at least 1".to_string()));
        }
        if self.min_words > self.max_words {
            return Err(ServerError::InvalidConfig(format!(
                "min_words ({}) exceeds max_words ({})",
                self.min_words, self.max_words
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "0.0.0.0:28333");
        assert_eq!((config.min_words, config.max_words), (1, 9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reject_empty_range() {
        let config = ServerConfig { min_words: 5, max_words: 4, ..ServerConfig::default() };
        assert_eq!(
            config.validate(),
            Err(ServerError::InvalidConfig("min_words (5) exceeds max_words (4)".to_string()))
        );
    }

    #[test]
    fn reject_zero_minimum() {
        let config = ServerConfig { min_words: 0, ..ServerConfig::default() };
        assert!(config.validate().is_err());
    }
}
