//! Guard chains: predicate/callback pairs evaluated after a base match

use super::Callback;
use crate::error::Result;
use crate::pattern::Predicate;
use crate::value::Value;
use tracing::trace;

/// One predicate/callback pair
#[derive(Debug, Clone)]
pub struct GuardArm {
    /// Test applied to the matched value
    pub predicate: Predicate,
    /// Callback selected when the test passes
    pub callback: Callback,
}

/// Ordered guard arms of one declaration
///
/// Arms fire in append order and are never reordered; an `otherwise` arm
/// only acts as a default when appended last.
#[derive(Debug, Clone, Default)]
pub struct GuardChain {
    arms: Vec<GuardArm>,
}

impl GuardChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arm
    pub fn push(&mut self, predicate: Predicate, callback: Callback) {
        self.arms.push(GuardArm {
            predicate,
            callback,
        });
    }

    /// Whether no arms were appended
    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Number of arms
    pub fn len(&self) -> usize {
        self.arms.len()
    }

    /// Arms in evaluation order
    pub fn arms(&self) -> &[GuardArm] {
        &self.arms
    }

    /// Callback of the first arm whose predicate accepts `value`
    pub fn select(&self, value: &Value) -> Result<Option<&Callback>> {
        for (index, arm) in self.arms.iter().enumerate() {
            if arm.predicate.test(value)? {
                trace!(index, guard = %arm.predicate.describe(), "guard fired");
                return Ok(Some(&arm.callback));
            }
        }
        Ok(None)
    }
}
