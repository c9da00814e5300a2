//! Metadata carried by preferences and representations.

use std::collections::HashMap;
use std::fmt;

/// Metadata that can appear in a preference header.
pub trait Metadata: Sized {
    /// Parse one entry, without its quality parameter.
    fn parse_metadata(s: &str) -> Option<Self>;

    /// The wildcard value.
    fn all() -> Self;
}

// ============================================================================
// Media Types
// ============================================================================

/// A media type (MIME type) with optional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    /// The type (e.g., "application", "text", "image")
    pub type_: String,
    /// The subtype (e.g., "json", "html", "png")
    pub subtype: String,
    /// Optional parameters (e.g., charset=utf-8)
    pub params: HashMap<String, String>,
}

impl MediaType {
    pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            subtype: subtype.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// `*/*`
    pub fn any() -> Self {
        Self::new("*", "*")
    }

    pub fn json() -> Self {
        Self::new("application", "json")
    }

    pub fn plain_text() -> Self {
        Self::new("text", "plain")
    }

    /// Parse a media type, ignoring any quality parameter.
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.trim().split(';');

        let (type_, subtype) = parts.next()?.trim().split_once('/')?;
        let type_ = type_.trim().to_ascii_lowercase();
        let subtype = subtype.trim().to_ascii_lowercase();
        if type_.is_empty() || subtype.is_empty() {
            return None;
        }

        let mut params = HashMap::new();
        for param in parts {
            if let Some((key, value)) = param.trim().split_once('=') {
                let key = key.trim().to_ascii_lowercase();
                if key != "q" {
                    params.insert(key, value.trim().trim_matches('"').to_string());
                }
            }
        }

        Some(Self {
            type_,
            subtype,
            params,
        })
    }

    /// Check if this media type matches another (considering wildcards).
    pub fn matches(&self, other: &MediaType) -> bool {
        let type_matches = self.type_ == "*" || other.type_ == "*" || self.type_ == other.type_;
        let subtype_matches =
            self.subtype == "*" || other.subtype == "*" || self.subtype == other.subtype;
        type_matches && subtype_matches
    }

    pub fn is_any(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    pub fn mime_type(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// The `charset` parameter, if any.
    pub fn charset(&self) -> Option<CharacterSet> {
        self.params.get("charset").map(CharacterSet::new)
    }
}

impl Metadata for MediaType {
    fn parse_metadata(s: &str) -> Option<Self> {
        Self::parse(s)
    }

    fn all() -> Self {
        Self::any()
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        let mut params: Vec<_> = self.params.iter().collect();
        params.sort();
        for (key, value) in params {
            write!(f, "; {}={}", key, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Character Sets
// ============================================================================

/// A character set name, normalized to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharacterSet(String);

impl CharacterSet {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_ascii_uppercase())
    }

    /// `*`
    pub fn any() -> Self {
        Self::new("*")
    }

    pub fn iso_8859_1() -> Self {
        Self::new("ISO-8859-1")
    }

    pub fn utf_8() -> Self {
        Self::new("UTF-8")
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_any(&self) -> bool {
        self.0 == "*"
    }
}

impl Metadata for CharacterSet {
    fn parse_metadata(s: &str) -> Option<Self> {
        let name = s.split(';').next()?.trim();
        (!name.is_empty()).then(|| Self::new(name))
    }

    fn all() -> Self {
        Self::any()
    }
}

impl fmt::Display for CharacterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Languages
// ============================================================================

/// A language tag such as `en` or `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    /// The primary language (e.g., "en", "fr", "de")
    pub primary: String,
    /// Optional subtag (e.g., "US", "GB" for en-US, en-GB)
    pub subtag: Option<String>,
}

impl Language {
    pub fn new(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into().to_ascii_lowercase(),
            subtag: None,
        }
    }

    pub fn with_subtag(primary: impl Into<String>, subtag: impl Into<String>) -> Self {
        Self {
            primary: primary.into().to_ascii_lowercase(),
            subtag: Some(subtag.into().to_ascii_uppercase()),
        }
    }

    /// `*`
    pub fn any() -> Self {
        Self::new("*")
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.split(';').next()?.trim();
        if s.is_empty() {
            return None;
        }
        if s == "*" {
            return Some(Self::any());
        }

        let (primary, subtag) = match s.split_once('-') {
            Some((primary, subtag)) => (primary, Some(subtag.trim().to_ascii_uppercase())),
            None => (s, None),
        };
        Some(Self {
            primary: primary.trim().to_ascii_lowercase(),
            subtag,
        })
    }

    /// Check if this tag matches another (considering wildcards).
    pub fn matches(&self, other: &Language) -> bool {
        if self.primary == "*" || other.primary == "*" {
            return true;
        }
        if self.primary != other.primary {
            return false;
        }
        match (&self.subtag, &other.subtag) {
            (Some(a), Some(b)) => a == b,
            (None, _) => true,
            (Some(_), None) => false,
        }
    }

    pub fn is_any(&self) -> bool {
        self.primary == "*"
    }
}

impl Metadata for Language {
    fn parse_metadata(s: &str) -> Option<Self> {
        Self::parse(s)
    }

    fn all() -> Self {
        Self::any()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subtag {
            Some(sub) => write!(f, "{}-{}", self.primary, sub),
            None => f.write_str(&self.primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse() {
        let mt = MediaType::parse("Text/HTML; charset=\"utf-8\"; q=0.5").unwrap();
        assert_eq!(mt.mime_type(), "text/html");
        assert_eq!(mt.params.get("charset").map(String::as_str), Some("utf-8"));
        assert!(!mt.params.contains_key("q"));
        assert_eq!(mt.charset(), Some(CharacterSet::utf_8()));
        assert_eq!(mt.to_string(), "text/html; charset=utf-8");

        assert!(MediaType::parse("nonsense").is_none());
        assert!(MediaType::parse("text/").is_none());
    }

    #[test]
    fn test_media_type_matching() {
        assert!(MediaType::any().matches(&MediaType::json()));
        assert!(MediaType::new("text", "*").matches(&MediaType::plain_text()));
        assert!(!MediaType::json().matches(&MediaType::plain_text()));
    }

    #[test]
    fn test_character_set() {
        assert_eq!(CharacterSet::new("utf-8"), CharacterSet::utf_8());
        assert_eq!(CharacterSet::parse_metadata(" iso-8859-1 ;q=0.2"), Some(CharacterSet::iso_8859_1()));
        assert!(CharacterSet::parse_metadata("").is_none());
        assert!(CharacterSet::all().is_any());
    }

    #[test]
    fn test_language() {
        let lang = Language::parse("en-us").unwrap();
        assert_eq!(lang, Language::with_subtag("en", "US"));
        assert_eq!(lang.to_string(), "en-US");
        assert!(Language::new("en").matches(&lang));
        assert!(!lang.matches(&Language::new("en")));
        assert!(Language::parse("*").unwrap().is_any());
        assert!(Language::parse(" ").is_none());
    }
}
