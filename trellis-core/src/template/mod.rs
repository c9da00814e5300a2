//! URI templates.
//!
//! A template mixes literal text with `{name}` variables. Templates are
//! compiled to a regular expression once, at build time, and are immutable
//! afterwards, so a single compiled template can be shared across threads.
//! A match must consume the whole input.
//!
//! ```
//! use std::collections::HashMap;
//! use trellis_core::template::{Template, Variable, VariableKind};
//!
//! let template = Template::builder("/users/{id}")
//!     .default_variable(Variable::new(VariableKind::UriSegment).reluctant(true))
//!     .build()
//!     .unwrap();
//!
//! let mut vars = HashMap::new();
//! assert_eq!(template.parse("/users/42", &mut vars), Some(9));
//! assert_eq!(vars["id"], "42");
//! ```

mod variable;

pub use variable::{Variable, VariableKind};

use crate::{Error, Result};
use regex::Regex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Variable(String),
}

/// Resolves variable names to values when formatting a template.
pub trait Resolver {
    fn resolve(&self, name: &str) -> Option<String>;
}

/// Resolves every variable to the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyResolver;

/// Shared [`EmptyResolver`].
pub static EMPTY_RESOLVER: EmptyResolver = EmptyResolver;

impl Resolver for EmptyResolver {
    fn resolve(&self, _name: &str) -> Option<String> {
        Some(String::new())
    }
}

/// Builder for [`Template`].
#[derive(Debug, Clone)]
pub struct TemplateBuilder {
    pattern: String,
    default_variable: Variable,
    variables: HashMap<String, Variable>,
}

impl TemplateBuilder {
    /// Variable settings used for names without an explicit entry.
    pub fn default_variable(mut self, variable: Variable) -> Self {
        self.default_variable = variable;
        self
    }

    pub fn variable(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.variables.insert(name.into(), variable);
        self
    }

    /// Parse the pattern and compile it.
    pub fn build(self) -> Result<Template> {
        let segments = parse_segments(&self.pattern)?;

        let mut source = String::with_capacity(self.pattern.len() * 2 + 8);
        source.push_str("^(?:");
        let mut groups = Vec::new();
        for segment in &segments {
            match segment {
                Segment::Literal(text) => source.push_str(&regex::escape(text)),
                Segment::Variable(name) => {
                    let variable = self
                        .variables
                        .get(name)
                        .copied()
                        .unwrap_or(self.default_variable);
                    source.push_str(&variable.to_regex());
                    groups.push(name.clone());
                }
            }
        }
        source.push_str(")$");

        let regex = Regex::new(&source)
            .map_err(|e| Error::IllegalPath(format!("{}: {}", self.pattern, e)))?;

        trace!(pattern = %self.pattern, regex = %source, "Compiled URI template");

        Ok(Template {
            pattern: self.pattern,
            segments,
            default_variable: self.default_variable,
            variables: self.variables,
            groups,
            regex,
        })
    }
}

/// A compiled URI template.
#[derive(Clone)]
pub struct Template {
    pattern: String,
    segments: SmallVec<[Segment; 4]>,
    default_variable: Variable,
    variables: HashMap<String, Variable>,
    /// Variable name for each capture group, in order
    groups: Vec<String>,
    regex: Regex,
}

impl Template {
    pub fn builder(pattern: impl Into<String>) -> TemplateBuilder {
        TemplateBuilder {
            pattern: pattern.into(),
            default_variable: Variable::default(),
            variables: HashMap::new(),
        }
    }

    /// Compile a template with default settings.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        Self::builder(pattern).build()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn default_variable(&self) -> Variable {
        self.default_variable
    }

    /// Effective settings for a variable name.
    pub fn variable(&self, name: &str) -> Variable {
        self.variables
            .get(name)
            .copied()
            .unwrap_or(self.default_variable)
    }

    /// Distinct variable names in declaration order.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in &self.groups {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// Match `input` and record captured variables in `variables`.
    ///
    /// Returns the end offset of the match. When a name appears twice, the
    /// later capture wins.
    pub fn parse(&self, input: &str, variables: &mut HashMap<String, String>) -> Option<usize> {
        let captures = self.regex.captures(input)?;
        for (index, name) in self.groups.iter().enumerate() {
            let value = captures
                .get(index + 1)
                .map(|m| m.as_str())
                .unwrap_or_default();
            variables.insert(name.clone(), value.to_string());
        }
        captures.get(0).map(|m| m.end())
    }

    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Substitute every variable through `resolver`. Unresolved variables
    /// format as the empty string.
    pub fn format(&self, resolver: &dyn Resolver) -> String {
        let mut out = String::with_capacity(self.pattern.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(name) => {
                    if let Some(value) = resolver.resolve(name) {
                        out.push_str(&value);
                    }
                }
            }
        }
        out
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("pattern", &self.pattern)
            .field("regex", &self.regex.as_str())
            .finish()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn parse_segments(pattern: &str) -> Result<SmallVec<[Segment; 4]>> {
    let mut segments = SmallVec::new();
    let mut literal = String::new();
    let mut name: Option<String> = None;

    for (pos, c) in pattern.char_indices() {
        if let Some(var) = name.as_mut() {
            match c {
                '{' => {
                    return Err(Error::IllegalPath(format!(
                        "nested '{{' at position {} in \"{}\"",
                        pos, pattern
                    )));
                }
                '}' => {
                    let var = std::mem::take(var);
                    name = None;
                    let var = var.trim();
                    if var.is_empty() {
                        return Err(Error::IllegalPath(format!(
                            "empty variable name at position {} in \"{}\"",
                            pos, pattern
                        )));
                    }
                    segments.push(Segment::Variable(var.to_string()));
                }
                c => var.push(c),
            }
            continue;
        }

        match c {
            '{' => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                name = Some(String::new());
            }
            '}' => {
                return Err(Error::IllegalPath(format!(
                    "unmatched '}}' at position {} in \"{}\"",
                    pos, pattern
                )));
            }
            c => literal.push(c),
        }
    }

    if name.is_some() {
        return Err(Error::IllegalPath(format!(
            "unclosed variable in \"{}\"",
            pattern
        )));
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let template = Template::new("/users/{id}/posts/{post}").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("/users/".into()),
                Segment::Variable("id".into()),
                Segment::Literal("/posts/".into()),
                Segment::Variable("post".into()),
            ]
        );
        assert_eq!(template.variable_names(), vec!["id", "post"]);
    }

    #[test]
    fn test_parse_equals() {
        let template = Template::new("/users/{id}").unwrap();
        let mut vars = HashMap::new();
        assert_eq!(template.parse("/users/42", &mut vars), Some(9));
        assert_eq!(vars.get("id").map(String::as_str), Some("42"));

        let mut vars = HashMap::new();
        assert_eq!(template.parse("/users/42/orders", &mut vars), None);
        assert!(vars.is_empty());
    }

    #[test]
    fn test_reluctant_variable_leaves_room_for_literals() {
        let template = Template::builder("/files/{name}.{ext}")
            .default_variable(Variable::new(VariableKind::UriSegment).reluctant(true))
            .build()
            .unwrap();
        let mut vars = HashMap::new();
        assert_eq!(template.parse("/files/a.tar.gz", &mut vars), Some(15));
        assert_eq!(vars["name"], "a");
        assert_eq!(vars["ext"], "tar.gz");
    }

    #[test]
    fn test_literals_are_escaped() {
        let template = Template::new("/files/{name}.json").unwrap();
        assert!(template.matches("/files/report.json"));
        assert!(!template.matches("/files/reportXjson"));
    }

    #[test]
    fn test_explicit_variable_settings() {
        let template = Template::builder("/items/{id}")
            .variable("id", Variable::new(VariableKind::UriPath))
            .build()
            .unwrap();
        assert!(template.matches("/items/7/8"));
        assert!(!Template::new("/items/{id}").unwrap().matches("/items/7/8"));
        assert_eq!(template.variable("id").kind, VariableKind::UriPath);
        assert_eq!(template.variable("other").kind, VariableKind::UriSegment);
    }

    #[test]
    fn test_duplicate_names_keep_last() {
        let template = Template::new("/{x}/{x}").unwrap();
        let mut vars = HashMap::new();
        template.parse("/a/b", &mut vars).unwrap();
        assert_eq!(vars["x"], "b");
        assert_eq!(template.variable_names(), vec!["x"]);
    }

    #[test]
    fn test_format() {
        let template = Template::new("/users/{id}/posts/{post}").unwrap();
        assert_eq!(template.format(&EMPTY_RESOLVER), "/users//posts/");

        struct OnlyId;
        impl Resolver for OnlyId {
            fn resolve(&self, name: &str) -> Option<String> {
                (name == "id").then(|| "7".to_string())
            }
        }
        assert_eq!(template.format(&OnlyId), "/users/7/posts/");
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["/users/{id", "/users/id}", "/users/{a{b}}", "/users/{}", "/users/{  }"] {
            let err = Template::new(bad).unwrap_err();
            assert!(matches!(err, Error::IllegalPath(_)), "{bad}: {err}");
        }
    }
}
