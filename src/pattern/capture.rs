//! Capture markers
//!
//! A capture marker wraps an inner template; when the inner template matches,
//! the matched sub-value is handed to the callback. Anonymous captures become
//! positional arguments, named captures become fields of a single object
//! argument.

use super::Template;
use std::sync::Arc;

/// Where a captured value is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Next positional argument
    Anonymous,
    /// Field of the named-capture object
    Named(Arc<str>),
}

/// Capture marker wrapping an inner template (default: any value)
#[derive(Debug, Clone)]
pub struct CaptureMarker {
    slot: Slot,
    inner: Box<Template>,
}

/// Anonymous capture of any value
pub fn capture() -> CaptureMarker {
    CaptureMarker {
        slot: Slot::Anonymous,
        inner: Box::new(Template::Any),
    }
}

/// Named capture of any value
pub fn capture_named(name: &str) -> CaptureMarker {
    capture().named(name)
}

impl CaptureMarker {
    /// Store the value under `name`
    pub fn named(mut self, name: &str) -> Self {
        self.slot = Slot::Named(Arc::from(name));
        self
    }

    /// Only capture values matching `template`
    pub fn of(mut self, template: impl Into<Template>) -> Self {
        self.inner = Box::new(template.into());
        self
    }

    /// Turn this marker into a capturing rest marker: it absorbs the remaining
    /// sequence elements and captures them as one array
    pub fn rest(self) -> Template {
        Template::Rest(Some(self.slot))
    }

    /// Storage slot
    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// Inner template
    pub fn inner(&self) -> &Template {
        &self.inner
    }

    pub(crate) fn inner_mut(&mut self) -> &mut Template {
        &mut self.inner
    }
}

impl From<CaptureMarker> for Template {
    fn from(marker: CaptureMarker) -> Self {
        Template::Capture(marker)
    }
}

/// Non-capturing rest marker
pub fn rest() -> Template {
    Template::Rest(None)
}
