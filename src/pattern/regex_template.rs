//! Regular-expression templates
//!
//! A regex template matches a string value by searching it, and a regex value
//! by comparing source and flags. Patterns are compiled once, under the size
//! limits in [`RegexLimits`], so that a hostile pattern cannot blow up memory
//! at match time.

use crate::config::RegexLimits;
use crate::error::{MatchError, Result};
use crate::value::{RegexValue, Value};
use regex::{Regex, RegexBuilder};
use tracing::warn;

/// Maximum group nesting depth accepted in a pattern
const MAX_NESTING_DEPTH: usize = 10;

/// Regex template with its compiled matcher
#[derive(Debug, Clone)]
pub struct RegexTemplate {
    value: RegexValue,
    compiled: Option<Regex>,
    limits: RegexLimits,
}

impl RegexTemplate {
    /// Build a template under default limits
    ///
    /// Never fails: a pattern that cannot be compiled yields a template that
    /// never matches a string.
    pub fn new(source: &str, flags: &str) -> Self {
        Self::with_limits(source, flags, &RegexLimits::default())
    }

    /// Build a template under explicit limits; never fails
    pub fn with_limits(source: &str, flags: &str, limits: &RegexLimits) -> Self {
        match Self::compile(source, flags, limits) {
            Ok(template) => template,
            Err(err) => {
                warn!(pattern = source, error = %err, "regex template will never match strings");
                Self {
                    value: RegexValue::new(source, flags),
                    compiled: None,
                    limits: limits.clone(),
                }
            }
        }
    }

    /// Build a template, reporting compilation problems
    pub fn compile(source: &str, flags: &str, limits: &RegexLimits) -> Result<Self> {
        let compiled = safe_regex_compile(source, flags, limits)?;
        Ok(Self {
            value: RegexValue::new(source, flags),
            compiled: Some(compiled),
            limits: limits.clone(),
        })
    }

    /// Source and canonical flags
    pub fn value(&self) -> &RegexValue {
        &self.value
    }

    /// Limits the pattern was compiled under
    pub fn limits(&self) -> &RegexLimits {
        &self.limits
    }

    /// Recompile under `limits` when they differ from the current ones
    pub fn relimit(&mut self, limits: &RegexLimits) {
        if &self.limits != limits {
            *self = Self::with_limits(&self.value.source, &self.value.flags, limits);
        }
    }

    /// Whether the pattern compiled
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Match a runtime value: strings are searched, regex values compared
    pub fn matches(&self, value: &Value) -> bool {
        match value {
            Value::String(s) => self
                .compiled
                .as_ref()
                .map(|re| re.is_match(s))
                .unwrap_or(false),
            Value::Regex(other) => &self.value == other,
            _ => false,
        }
    }
}

impl From<&RegexValue> for RegexTemplate {
    fn from(value: &RegexValue) -> Self {
        RegexTemplate::new(&value.source, &value.flags)
    }
}

/// Validate and compile a pattern with JS-style flags
///
/// Supported flags: `i` (case-insensitive), `m` (multi-line), `s` (dot matches
/// newline), `x` (ignore whitespace), `u` (unicode, always on). `g`, `y` and `d`
/// only affect iteration state and are accepted without effect.
pub fn safe_regex_compile(source: &str, flags: &str, limits: &RegexLimits) -> Result<Regex> {
    if source.len() > limits.max_pattern_length {
        return Err(MatchError::InvalidPattern {
            pattern: source.to_string(),
            reason: format!(
                "Pattern too long: {} characters (max: {})",
                source.len(),
                limits.max_pattern_length
            ),
        });
    }

    if has_excessive_nesting(source) {
        return Err(MatchError::InvalidPattern {
            pattern: source.to_string(),
            reason: "Pattern has excessive nesting depth".to_string(),
        });
    }

    let mut builder = RegexBuilder::new(source);
    builder
        .size_limit(limits.size_limit)
        .dfa_size_limit(limits.dfa_size_limit);

    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'x' => {
                builder.ignore_whitespace(true);
            }
            'u' | 'g' | 'y' | 'd' => {}
            other => {
                return Err(MatchError::InvalidPattern {
                    pattern: source.to_string(),
                    reason: format!("Unsupported flag '{}'", other),
                });
            }
        }
    }

    builder.build().map_err(|e| MatchError::InvalidPattern {
        pattern: source.to_string(),
        reason: format!("Regex compilation failed: {}", e),
    })
}

/// Check for excessive group nesting in a pattern
fn has_excessive_nesting(pattern: &str) -> bool {
    let mut depth: usize = 0;
    let mut max_depth: usize = 0;
    let mut escaped = false;

    for ch in pattern.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '(' => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            ')' => {
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    max_depth > MAX_NESTING_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_strings() {
        let template = RegexTemplate::new(r"f\w+", "");
        assert!(template.matches(&Value::from("foo")));
        assert!(!template.matches(&Value::from("bar")));
        assert!(!template.matches(&Value::from(42)));
    }

    #[test]
    fn test_case_insensitive_flag() {
        let template = RegexTemplate::new("^foo$", "i");
        assert!(template.matches(&Value::from("FOO")));
    }

    #[test]
    fn test_matches_regex_values_by_source_and_flags() {
        let template = RegexTemplate::new("a+", "gi");
        assert!(template.matches(&Value::regex("a+", "ig")));
        assert!(!template.matches(&Value::regex("a+", "g")));
        assert!(!template.matches(&Value::regex("a*", "gi")));
    }

    #[test]
    fn test_uncompilable_pattern_never_matches_strings() {
        let template = RegexTemplate::new("(unclosed", "");
        assert!(!template.is_compiled());
        assert!(!template.matches(&Value::from("(unclosed")));
        assert!(template.matches(&Value::regex("(unclosed", "")));
    }

    #[test]
    fn test_compile_reports_errors() {
        let limits = RegexLimits::default();
        assert!(matches!(
            RegexTemplate::compile("a", "q", &limits),
            Err(MatchError::InvalidPattern { .. })
        ));

        let long = "a".repeat(limits.max_pattern_length + 1);
        assert!(RegexTemplate::compile(&long, "", &limits).is_err());

        let nested = format!("{}a{}", "(".repeat(12), ")".repeat(12));
        assert!(RegexTemplate::compile(&nested, "", &limits).is_err());
    }

    #[test]
    fn test_relimit_recompiles_under_new_limits() {
        let mut template = RegexTemplate::new("abcdef", "i");
        assert!(template.matches(&Value::from("xABCDEFx")));

        let tight = RegexLimits {
            max_pattern_length: 2,
            ..RegexLimits::default()
        };
        template.relimit(&tight);
        assert_eq!(template.limits(), &tight);
        assert!(!template.is_compiled());
        assert!(!template.matches(&Value::from("xabcdefx")));

        template.relimit(&RegexLimits::default());
        assert!(template.matches(&Value::from("xABCDEFx")));
    }

    #[test]
    fn test_escaped_parens_do_not_count_as_nesting() {
        let escaped = r"\(".repeat(20);
        assert!(!has_excessive_nesting(&escaped));
    }
}
