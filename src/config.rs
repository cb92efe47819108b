//! Matcher configuration structures

use crate::error::{MatchError, Result};
use crate::pattern::{RegexTemplate, Template};
use serde::{Deserialize, Serialize};

/// Default bound on template and nested-matcher recursion
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Size limits applied when compiling regex templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexLimits {
    /// Maximum pattern source length in bytes
    pub max_pattern_length: usize,
    /// Compiled program size limit in bytes
    pub size_limit: usize,
    /// Lazy DFA cache size limit in bytes
    pub dfa_size_limit: usize,
}

impl Default for RegexLimits {
    fn default() -> Self {
        Self {
            max_pattern_length: 1000,
            size_limit: 10 * 1024 * 1024,
            dfa_size_limit: 2 * 1024 * 1024,
        }
    }
}

/// Matching configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Maximum recursion depth through templates and nested matchers;
    /// deeper structures fail to match
    pub max_depth: usize,

    /// Regex compilation limits
    pub regex: RegexLimits,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            regex: RegexLimits::default(),
        }
    }
}

impl MatchConfig {
    /// Start a builder from the defaults
    pub fn builder() -> MatchConfigBuilder {
        MatchConfigBuilder::new()
    }

    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Reads `VALMATCH_MAX_DEPTH`, `VALMATCH_REGEX_MAX_LENGTH` and
    /// `VALMATCH_REGEX_SIZE_LIMIT`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_depth: env_usize("VALMATCH_MAX_DEPTH", defaults.max_depth)?,
            regex: RegexLimits {
                max_pattern_length: env_usize(
                    "VALMATCH_REGEX_MAX_LENGTH",
                    defaults.regex.max_pattern_length,
                )?,
                size_limit: env_usize("VALMATCH_REGEX_SIZE_LIMIT", defaults.regex.size_limit)?,
                dfa_size_limit: defaults.regex.dfa_size_limit,
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would make every match fail
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(MatchError::Configuration(
                "max_depth must be greater than zero".to_string(),
            ));
        }
        if self.regex.max_pattern_length == 0
            || self.regex.size_limit == 0
            || self.regex.dfa_size_limit == 0
        {
            return Err(MatchError::Configuration(
                "regex limits must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Compile a regex template under these limits
    pub fn regex_template(&self, source: &str, flags: &str) -> Result<Template> {
        RegexTemplate::compile(source, flags, &self.regex).map(Template::Regex)
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| MatchError::Configuration(format!("{}={:?}: {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

/// Builder for MatchConfig
#[derive(Debug, Default)]
pub struct MatchConfigBuilder {
    config: MatchConfig,
}

impl MatchConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the recursion bound
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the regex pattern length limit
    pub fn regex_max_pattern_length(mut self, len: usize) -> Self {
        self.config.regex.max_pattern_length = len;
        self
    }

    /// Set the compiled regex size limit
    pub fn regex_size_limit(mut self, bytes: usize) -> Self {
        self.config.regex.size_limit = bytes;
        self
    }

    /// Set the regex DFA cache limit
    pub fn regex_dfa_size_limit(mut self, bytes: usize) -> Self {
        self.config.regex.dfa_size_limit = bytes;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<MatchConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MatchConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = MatchConfig::builder()
            .max_depth(8)
            .regex_max_pattern_length(64)
            .build()
            .unwrap();
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.regex.max_pattern_length, 64);
    }

    #[test]
    fn test_builder_rejects_zero_depth() {
        assert!(matches!(
            MatchConfig::builder().max_depth(0).build(),
            Err(MatchError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_json_partial() {
        let config = MatchConfig::from_json(r#"{"max_depth": 4}"#).unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.regex, RegexLimits::default());

        assert!(MatchConfig::from_json(r#"{"max_depth": "deep"}"#).is_err());
    }

    #[test]
    fn test_regex_template_respects_limits() {
        let config = MatchConfig::builder()
            .regex_max_pattern_length(3)
            .build()
            .unwrap();
        assert!(config.regex_template("abc", "").is_ok());
        assert!(config.regex_template("abcd", "").is_err());
    }
}
