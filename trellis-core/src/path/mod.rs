//! JAX-RS path patterns.
//!
//! A [`PathPattern`] wraps a URI [`Template`] compiled the way JAX-RS
//! resource paths are matched: the pattern always starts with `/`, user
//! variables match reluctantly, and a synthetic trailing variable captures
//! whatever the pattern leaves unconsumed (the *final matching group*).
//! The final group tells an exact match apart from one that leaves residue
//! for a sub-resource.
//!
//! ```
//! use trellis_core::path::PathPattern;
//!
//! let pattern = PathPattern::new("/users/{id}", false).unwrap();
//! let result = pattern.match_str("/users/42/orders").unwrap();
//! assert_eq!(result.variable("id"), Some("42"));
//! assert_eq!(result.final_matching_group(), "/orders");
//! ```

mod remaining;
mod result;

pub use remaining::RemainingPath;
pub use result::MatchingResult;

use crate::resource::{OperationDescriptor, ResourceDescriptor};
use crate::template::{EMPTY_RESOLVER, Segment, Template, Variable, VariableKind};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// Name of the synthetic variable that captures the unmatched tail.
pub const REST_VARIABLE: &str = "trellis.rest";

static EMPTY: Lazy<PathPattern> =
    Lazy::new(|| PathPattern::new("", false).expect("the empty path pattern always compiles"));

/// A compiled JAX-RS path template.
#[derive(Clone)]
pub struct PathPattern {
    path_pattern: String,
    template: Template,
    /// Compiled template with every variable formatted as ""
    with_empty_vars: String,
    capturing_groups: usize,
    empty_or_slash: bool,
}

impl PathPattern {
    /// Compile `pattern`.
    ///
    /// With `limited_to_one_segment`, variables never span a `/`.
    pub fn new(pattern: &str, limited_to_one_segment: bool) -> Result<Self> {
        let mut normalized = String::with_capacity(pattern.len() + 1);
        if !pattern.starts_with('/') {
            normalized.push('/');
        }
        normalized.push_str(pattern);

        let mut full = normalized.clone();
        if !full.ends_with('/') {
            full.push('/');
        }
        full.push('{');
        full.push_str(REST_VARIABLE);
        full.push('}');

        let kind = if limited_to_one_segment {
            VariableKind::UriSegment
        } else {
            VariableKind::UriPath
        };
        let template = Template::builder(full)
            .default_variable(Variable::new(kind).reluctant(true))
            .variable(REST_VARIABLE, Variable::new(VariableKind::All).required(false))
            .build()
            .map_err(|e| match e {
                Error::IllegalPath(_) => Error::IllegalPath(format!(
                    "\"{}\" is not a valid path template: {}",
                    pattern, e
                )),
                other => other,
            })?;

        let rest_declarations = template
            .segments()
            .iter()
            .filter(|segment| matches!(segment, Segment::Variable(name) if name == REST_VARIABLE))
            .count();
        if rest_declarations > 1 {
            return Err(Error::IllegalPath(format!(
                "\"{}\" declares the reserved variable {}",
                pattern, REST_VARIABLE
            )));
        }
        let capturing_groups = template.variable_names().len() - 1;
        let with_empty_vars = template.format(&EMPTY_RESOLVER);
        let empty_or_slash = normalized == "/";

        trace!(
            pattern = %normalized,
            limited = limited_to_one_segment,
            variables = capturing_groups,
            "Compiled path pattern"
        );

        Ok(Self {
            path_pattern: normalized,
            template,
            with_empty_vars,
            capturing_groups,
            empty_or_slash,
        })
    }

    /// Pattern of a resource class. Always matches across segments.
    pub fn for_resource(resource: &ResourceDescriptor) -> Result<Self> {
        let path = resource.path.as_ref().ok_or_else(|| {
            Error::MissingAnnotation(format!("resource {} has no path annotation", resource.name))
        })?;
        Self::new(&path.template, false).map_err(|e| e.on_class(&resource.name))
    }

    /// Pattern of a resource operation, or [`PathPattern::empty`] when the
    /// operation declares no path.
    pub fn for_operation(operation: &OperationDescriptor) -> Result<Self> {
        match &operation.path {
            None => Ok(Self::empty().clone()),
            Some(path) => {
                Self::new(&path.template, path.limited).map_err(|e| e.on_method(&operation.name))
            }
        }
    }

    /// Shared pattern for `""`, normalized to `/`.
    pub fn empty() -> &'static PathPattern {
        &EMPTY
    }

    /// Match a remaining path.
    ///
    /// The query string and matrix parameters are ignored. `None` means the
    /// pattern does not match.
    pub fn match_path(&self, remaining: &RemainingPath) -> Option<MatchingResult> {
        let mut given = remaining.without_params();
        let path_suppl = !given.ends_with('/');
        if path_suppl {
            given.push('/');
        }

        let mut variables = HashMap::new();
        self.template.parse(&given, &mut variables)?;

        let mut final_matching_group = variables.remove(REST_VARIABLE).unwrap_or_default();
        if !final_matching_group.is_empty() {
            if path_suppl && final_matching_group.ends_with('/') {
                final_matching_group.pop();
            }
            if !final_matching_group.starts_with('/') {
                final_matching_group.insert(0, '/');
            }
        }
        let final_capturing_group = final_matching_group.clone();
        let number_of_variables = variables.len();

        Some(MatchingResult::new(
            variables,
            final_matching_group,
            final_capturing_group,
            number_of_variables,
        ))
    }

    pub fn match_str(&self, path: &str) -> Option<MatchingResult> {
        self.match_path(&RemainingPath::new(path))
    }

    /// True when the pattern matches and leaves nothing but an optional `/`.
    pub fn matches_with_empty(&self, remaining: &RemainingPath) -> bool {
        self.match_path(remaining)
            .is_some_and(|result| result.is_final_capturing_group_empty_or_slash())
    }

    /// Characters outside variables, trailing `/` included. Longer wins
    /// when ordering candidate resources.
    pub fn number_of_literal_chars(&self) -> usize {
        self.with_empty_vars.chars().count()
    }

    /// Distinct user-declared variables.
    pub fn number_of_capturing_groups(&self) -> usize {
        self.capturing_groups
    }

    /// The pattern as declared, with its leading `/`.
    pub fn path_pattern(&self) -> &str {
        &self.path_pattern
    }

    pub fn is_empty_or_slash(&self) -> bool {
        self.empty_or_slash
    }

    pub fn template(&self) -> &Template {
        &self.template
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.with_empty_vars == other.with_empty_vars
    }
}

impl Eq for PathPattern {}

impl Hash for PathPattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.with_empty_vars.hash(state);
    }
}

impl fmt::Debug for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathPattern")
            .field("pattern", &self.path_pattern)
            .field("capturing_groups", &self.capturing_groups)
            .finish()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_pattern)
    }
}
