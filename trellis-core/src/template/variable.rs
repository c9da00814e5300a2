//! Template variables and the character classes they accept.

use std::fmt;

const PCT_ENCODED: &str = "%[0-9a-fA-F]{2}";

/// Character class a template variable may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    /// Any character except a line break.
    All,
    /// A path; may span several segments.
    UriPath,
    /// A single path segment; never matches `/`.
    UriSegment,
}

impl VariableKind {
    /// Regex for a single character of this kind.
    pub(crate) fn char_class(&self) -> String {
        match self {
            VariableKind::All => ".".to_string(),
            VariableKind::UriPath => format!(r"(?:[a-zA-Z0-9\-._~!$&'()*+,;=:@/]|{PCT_ENCODED})"),
            VariableKind::UriSegment => format!(r"(?:[a-zA-Z0-9\-._~!$&'()*+,;=:@]|{PCT_ENCODED})"),
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariableKind::All => "all",
            VariableKind::UriPath => "uri-path",
            VariableKind::UriSegment => "uri-segment",
        };
        f.write_str(name)
    }
}

/// How a template variable matches.
///
/// Required variables need at least one character. Reluctant variables
/// match as few characters as the rest of the template allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    pub kind: VariableKind,
    pub required: bool,
    pub reluctant: bool,
}

impl Variable {
    /// A required, greedy variable of the given kind.
    pub const fn new(kind: VariableKind) -> Self {
        Self {
            kind,
            required: true,
            reluctant: false,
        }
    }

    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub const fn reluctant(mut self, reluctant: bool) -> Self {
        self.reluctant = reluctant;
        self
    }

    /// Capturing group for this variable.
    pub(crate) fn to_regex(&self) -> String {
        let quantifier = match (self.required, self.reluctant) {
            (true, false) => "+",
            (true, true) => "+?",
            (false, false) => "*",
            (false, true) => "*?",
        };
        format!("({}{})", self.kind.char_class(), quantifier)
    }
}

impl Default for Variable {
    fn default() -> Self {
        Self::new(VariableKind::UriSegment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    fn full(var: Variable) -> Regex {
        Regex::new(&format!("^{}$", var.to_regex())).unwrap()
    }

    #[test]
    fn test_segment_rejects_slash() {
        let re = full(Variable::new(VariableKind::UriSegment));
        assert!(re.is_match("42"));
        assert!(re.is_match("a%2Fb"));
        assert!(!re.is_match("42/x"));
        assert!(!re.is_match(""));
    }

    #[test]
    fn test_path_accepts_slash() {
        let re = full(Variable::new(VariableKind::UriPath));
        assert!(re.is_match("42/x"));
        assert!(!re.is_match("a b"));
    }

    #[test]
    fn test_all_and_optional() {
        let re = full(Variable::new(VariableKind::All).required(false));
        assert!(re.is_match(""));
        assert!(re.is_match("any thing/at all?"));
        assert!(!re.is_match("line\nbreak"));
    }

    #[test]
    fn test_quantifiers() {
        let segment = Variable::new(VariableKind::UriSegment);
        assert!(segment.to_regex().ends_with("+)"));
        assert!(segment.reluctant(true).to_regex().ends_with("+?)"));
        assert!(segment.required(false).to_regex().ends_with("*)"));
        assert!(segment.required(false).reluctant(true).to_regex().ends_with("*?)"));
    }
}
