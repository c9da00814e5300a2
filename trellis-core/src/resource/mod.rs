//! Resource descriptors.
//!
//! A resource type describes its path, its operations and the annotations
//! attached to them through [`Resource::descriptor`]. The `#[resource]`
//! attribute macro generates that implementation; hand-written descriptors
//! work the same way.

mod class;
mod registry;
mod root;

pub use class::{OperationKind, ResourceClass, ResourceOperation};
pub use registry::{ResourceEntry, find_registered, registered_resources};
pub use root::RootResources;

use crate::HttpMethod;
use std::fmt;

/// A type that can be served as a resource.
pub trait Resource: 'static {
    fn descriptor() -> ResourceDescriptor;
}

/// A `#[path]` annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathAnnotation {
    pub template: String,
    /// Variables never span a `/` when set.
    pub limited: bool,
}

impl PathAnnotation {
    /// A path limited to one segment per variable.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            limited: true,
        }
    }

    pub fn limited(mut self, limited: bool) -> Self {
        self.limited = limited;
        self
    }
}

/// An annotation attached to an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationDescriptor {
    /// Canonical name of the annotation type, e.g. `trellis::get`.
    pub name: String,
    /// The HTTP verb the annotation type is marked with, if any.
    pub verb: Option<String>,
    /// The annotation's `value`.
    pub value: String,
}

impl AnnotationDescriptor {
    pub fn new(name: impl Into<String>, verb: Option<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            verb,
            value: value.into(),
        }
    }

    /// Built-in annotation for an HTTP method, named `trellis::<method>`.
    pub fn for_method(method: HttpMethod, value: impl Into<String>) -> Self {
        Self {
            name: format!("trellis::{}", method.as_str().to_lowercase()),
            verb: Some(method.as_str().to_string()),
            value: value.into(),
        }
    }

    /// An annotation type that carries no verb marker.
    pub fn marker(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, None, value)
    }

    pub fn is_http_method(&self) -> bool {
        self.verb.is_some()
    }
}

impl fmt::Display for AnnotationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}(value={})", self.name, self.value)
    }
}

/// An operation declared on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    pub name: String,
    pub path: Option<PathAnnotation>,
    pub annotations: Vec<AnnotationDescriptor>,
}

impl OperationDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            annotations: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: PathAnnotation) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_annotation(mut self, annotation: AnnotationDescriptor) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Shorthand for a built-in HTTP method annotation.
    pub fn with_method(self, method: HttpMethod, media: impl Into<String>) -> Self {
        self.with_annotation(AnnotationDescriptor::for_method(method, media))
    }
}

/// Everything known about a resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDescriptor {
    /// Fully-qualified type name; keys the descriptor cache.
    pub name: String,
    pub path: Option<PathAnnotation>,
    pub operations: Vec<OperationDescriptor>,
}

impl ResourceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            operations: Vec::new(),
        }
    }

    /// Descriptor named after `R`.
    pub fn of<R: ?Sized + 'static>() -> Self {
        Self::new(std::any::type_name::<R>())
    }

    pub fn with_path(mut self, path: PathAnnotation) -> Self {
        self.path = Some(path);
        self
    }

    pub fn with_operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.iter().find(|op| op.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_display() {
        let get = AnnotationDescriptor::for_method(HttpMethod::GET, "application/json");
        assert_eq!(get.to_string(), "@trellis::get(value=application/json)");
        assert!(get.is_http_method());

        let path = AnnotationDescriptor::marker("trellis::path", "{id}");
        assert_eq!(path.to_string(), "@trellis::path(value={id})");
        assert!(!path.is_http_method());
    }

    #[test]
    fn test_descriptor_builders() {
        struct Users;

        let descriptor = ResourceDescriptor::of::<Users>()
            .with_path(PathAnnotation::new("/users"))
            .with_operation(OperationDescriptor::new("list").with_method(HttpMethod::GET, ""))
            .with_operation(
                OperationDescriptor::new("show")
                    .with_path(PathAnnotation::new("{id}"))
                    .with_method(HttpMethod::GET, "text/html"),
            );

        assert!(descriptor.name.ends_with("Users"));
        assert_eq!(descriptor.operations.len(), 2);
        let show = descriptor.operation("show").unwrap();
        assert!(show.path.as_ref().unwrap().limited);
        assert_eq!(show.annotations[0].verb.as_deref(), Some("GET"));
        assert!(descriptor.operation("missing").is_none());
    }
}
