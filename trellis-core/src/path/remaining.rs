use std::fmt;

/// The part of a request URI not yet consumed by dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RemainingPath {
    path: String,
}

impl RemainingPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// The path without its query string, fragment and `;matrix` parameters.
    ///
    /// ```
    /// use trellis_core::path::RemainingPath;
    ///
    /// let path = RemainingPath::new("/cars;color=red/4711;rev=2?fields=name");
    /// assert_eq!(path.without_params(), "/cars/4711");
    /// ```
    pub fn without_params(&self) -> String {
        let end = self
            .path
            .find(['?', '#'])
            .unwrap_or(self.path.len());
        let path = &self.path[..end];

        if !path.contains(';') {
            return path.to_string();
        }

        path.split('/')
            .map(|segment| segment.split(';').next().unwrap_or_default())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// True when nothing meaningful remains to be matched.
    pub fn is_empty_or_slash(&self) -> bool {
        let path = self.without_params();
        path.is_empty() || path == "/"
    }
}

impl From<&str> for RemainingPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for RemainingPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for RemainingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_params() {
        assert_eq!(RemainingPath::new("/a/b").without_params(), "/a/b");
        assert_eq!(RemainingPath::new("/a/b?x=1").without_params(), "/a/b");
        assert_eq!(RemainingPath::new("/a/b#top").without_params(), "/a/b");
        assert_eq!(RemainingPath::new("/a;m=1/b;n=2").without_params(), "/a/b");
        assert_eq!(RemainingPath::new("/a/b;n=2/").without_params(), "/a/b/");
        assert_eq!(RemainingPath::new("?only=query").without_params(), "");
    }

    #[test]
    fn test_empty_or_slash() {
        assert!(RemainingPath::new("").is_empty_or_slash());
        assert!(RemainingPath::new("/").is_empty_or_slash());
        assert!(RemainingPath::new("/?q=1").is_empty_or_slash());
        assert!(RemainingPath::new(";m=1").is_empty_or_slash());
        assert!(!RemainingPath::new("/x").is_empty_or_slash());
    }
}
