//! Segment-based property paths.
//!
//! Nested schema rules address properties like `address.street`. Internally
//! the path is a list of segments so a key containing a literal dot can never
//! corrupt the walk; the dotted string form only exists at the boundary
//! (error messages, flat query property keys).

use std::fmt;

/// A property path as an explicit list of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dotted string form, e.g. `address.street`.
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}
