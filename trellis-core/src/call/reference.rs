use crate::path::RemainingPath;
use std::fmt;
use std::hash::{Hash, Hasher};
use url::{Position, Url};

#[derive(Debug, Clone)]
enum Parsed {
    Absolute(Url),
    Origin(http::Uri),
    Unparsed,
}

/// A URI reference, absolute (`scheme://authority/path?query`) or
/// origin-form (`/path?query`).
///
/// The text is kept as given; components come from [`url::Url`] for
/// absolute references and [`http::Uri`] for origin-form ones.
#[derive(Debug, Clone)]
pub struct Reference {
    uri: String,
    parsed: Parsed,
}

impl Reference {
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let parsed = match Url::parse(&uri) {
            Ok(url) => Parsed::Absolute(url),
            Err(_) => match uri.parse::<http::Uri>() {
                Ok(origin) if origin.scheme().is_none() && origin.authority().is_none() => Parsed::Origin(origin),
                _ => Parsed::Unparsed,
            },
        };
        Self { uri, parsed }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }

    pub fn scheme(&self) -> Option<&str> {
        match &self.parsed {
            Parsed::Absolute(url) => Some(url.scheme()),
            _ => None,
        }
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self.parsed, Parsed::Absolute(_))
    }

    /// Host and optional port of an absolute reference, without user info.
    pub fn authority(&self) -> Option<String> {
        let Parsed::Absolute(url) = &self.parsed else {
            return None;
        };
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }

    /// The path, without query or fragment.
    pub fn path(&self) -> &str {
        match &self.parsed {
            Parsed::Absolute(url) => url.path(),
            Parsed::Origin(origin) => origin.path(),
            Parsed::Unparsed => "",
        }
    }

    pub fn query(&self) -> Option<&str> {
        match &self.parsed {
            Parsed::Absolute(url) => url.query(),
            Parsed::Origin(origin) => origin.query(),
            Parsed::Unparsed => None,
        }
    }

    pub fn fragment(&self) -> Option<&str> {
        match &self.parsed {
            Parsed::Absolute(url) => url.fragment(),
            _ => None,
        }
    }

    /// Path and query as a [`RemainingPath`] for dispatch.
    pub fn remaining_path(&self) -> RemainingPath {
        match &self.parsed {
            Parsed::Absolute(url) => RemainingPath::new(&url[Position::BeforePath..Position::AfterQuery]),
            Parsed::Origin(origin) => RemainingPath::new(origin.path_and_query().map_or("", |pq| pq.as_str())),
            Parsed::Unparsed => RemainingPath::new(""),
        }
    }

    /// True for `riap://<authority>/...` references.
    pub fn is_riap_authority(&self, authority: &str) -> bool {
        let Parsed::Absolute(url) = &self.parsed else {
            return false;
        };
        url.scheme() == "riap"
            && url.port().is_none()
            && url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(authority))
    }
}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl Eq for Reference {}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl From<&str> for Reference {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_parts() {
        let reference = Reference::new("https://example.com:8443/users/42?expand=all#top");
        assert!(reference.is_absolute());
        assert_eq!(reference.scheme(), Some("https"));
        assert_eq!(reference.authority().as_deref(), Some("example.com:8443"));
        assert_eq!(reference.path(), "/users/42");
        assert_eq!(reference.query(), Some("expand=all"));
        assert_eq!(reference.fragment(), Some("top"));
        assert_eq!(reference.remaining_path().as_str(), "/users/42?expand=all");
        assert_eq!(reference.as_str(), "https://example.com:8443/users/42?expand=all#top");
    }

    #[test]
    fn test_question_mark_in_fragment_is_not_a_query() {
        let reference = Reference::new("http://h/a#frag?x=1");
        assert_eq!(reference.path(), "/a");
        assert_eq!(reference.query(), None);
        assert_eq!(reference.fragment(), Some("frag?x=1"));
        assert_eq!(reference.remaining_path().as_str(), "/a");
    }

    #[test]
    fn test_authority_excludes_user_info() {
        let reference = Reference::new("http://user:secret@h:8080/p");
        assert_eq!(reference.authority().as_deref(), Some("h:8080"));
        assert_eq!(reference.path(), "/p");

        assert!(!Reference::new("riap://user@application/orders").is_riap_authority("user@application"));
        assert!(Reference::new("riap://user@application/orders").is_riap_authority("application"));
    }

    #[test]
    fn test_relative() {
        let reference = Reference::new("/users?page=2");
        assert!(!reference.is_absolute());
        assert_eq!(reference.scheme(), None);
        assert_eq!(reference.authority(), None);
        assert_eq!(reference.path(), "/users");
        assert_eq!(reference.query(), Some("page=2"));
        assert_eq!(reference.remaining_path().as_str(), "/users?page=2");
    }

    #[test]
    fn test_riap() {
        assert!(Reference::new("riap://application/users").is_riap_authority("application"));
        assert!(Reference::new("RIAP://Application").is_riap_authority("application"));
        assert!(!Reference::new("riap://component/users").is_riap_authority("application"));
        assert!(!Reference::new("riap://application:81/users").is_riap_authority("application"));
        assert!(!Reference::new("http://application/").is_riap_authority("application"));
        assert_eq!(Reference::new("riap://application").path(), "");
        assert_eq!(Reference::new("riap://application/orders?id=3").remaining_path().as_str(), "/orders?id=3");
    }

    #[test]
    fn test_equality_uses_the_given_text() {
        assert_eq!(Reference::new("/a"), Reference::from("/a"));
        assert_ne!(Reference::new("/a"), Reference::new("/a?"));
    }
}
