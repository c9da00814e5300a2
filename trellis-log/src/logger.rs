//! Named loggers.

use crate::Level;
use std::fmt;
use std::sync::Arc;

/// A named logger whose name is used as the record target.
///
/// Cloning is cheap; clones share the name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Logger {
    name: Arc<str>,
}

impl Logger {
    pub fn named(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
        }
    }

    /// Logger for a type, named after its path.
    pub fn for_type<T: ?Sized>() -> Self {
        Self::named(std::any::type_name::<T>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Derive a logger named `<self>.<suffix>`.
    pub fn child(&self, suffix: &str) -> Self {
        if self.name.is_empty() {
            return Self::named(suffix);
        }
        Self::named(format!("{}.{}", self.name, suffix))
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        crate::is_level_enabled(level)
    }

    pub fn log(&self, level: Level, message: &str) {
        crate::log(level, &self.name, message);
    }

    pub fn trace(&self, message: &str) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: &str) {
        if crate::is_debug_enabled() || self.is_enabled(Level::Debug) {
            crate::log(Level::Debug, &self.name, message);
        }
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::named("trellis")
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Logger").field(&self.name()).finish()
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    #[test]
    fn test_named() {
        let logger = Logger::named("trellis.restlet.Probe");
        assert_eq!(logger.name(), "trellis.restlet.Probe");
        assert_eq!(logger.to_string(), "trellis.restlet.Probe");
    }

    #[test]
    fn test_for_type() {
        let logger = Logger::for_type::<Probe>();
        assert!(logger.name().ends_with("Probe"));
    }

    #[test]
    fn test_child_names() {
        let root = Logger::named("trellis");
        assert_eq!(root.child("restlet").name(), "trellis.restlet");
        assert_eq!(Logger::named("").child("restlet").name(), "restlet");
    }

    #[test]
    fn test_clones_are_equal() {
        let logger = Logger::default();
        let clone = logger.clone();
        assert_eq!(logger, clone);
        clone.info("clone logs under the same target");
    }
}
