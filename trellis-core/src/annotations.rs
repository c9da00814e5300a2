//! Resource annotation descriptor index.
//!
//! Discovers the operations of a resource that carry an HTTP method
//! annotation and memoizes the result in the context's attributes, keyed
//! by the resource's type name.

use crate::context::Context;
use crate::resource::{Resource, ResourceDescriptor};
use crate::{HttpMethod, Result};
use std::sync::Arc;
use tracing::{debug, trace};

/// Prefix of the attribute keys the index caches under.
pub const ANNOTATIONS_KEY_PREFIX: &str = "trellis.resource.annotations.";

/// An operation bound to an HTTP method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationInfo {
    http_method: HttpMethod,
    operation: String,
    media_constraint: Option<String>,
}

impl AnnotationInfo {
    pub fn new(http_method: HttpMethod, operation: impl Into<String>, media_constraint: Option<String>) -> Self {
        Self {
            http_method,
            operation: operation.into(),
            media_constraint,
        }
    }

    pub fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Name of the annotated operation.
    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// The annotation's value, `None` when empty.
    pub fn media_constraint(&self) -> Option<&str> {
        self.media_constraint.as_deref()
    }
}

/// Attribute key for a resource's cached descriptors.
pub fn attribute_key(resource_name: &str) -> String {
    format!("{}{}", ANNOTATIONS_KEY_PREFIX, resource_name)
}

/// List the HTTP-method-bearing operations of `resource`.
///
/// With a context, the list is computed once per resource name and shared
/// by every later call. A discovery failure caches nothing.
pub fn describe(context: Option<&dyn Context>, resource: &ResourceDescriptor) -> Result<Arc<Vec<AnnotationInfo>>> {
    let Some(context) = context else {
        return discover(resource).map(Arc::new);
    };

    let key = attribute_key(&resource.name);
    context
        .attributes()
        .get_or_try_insert_with(&key, || {
            debug!(resource = %resource.name, "Discovering resource annotations");
            discover(resource)
        })
}

/// [`describe`] for a [`Resource`] type.
pub fn describe_resource<R: Resource>(context: Option<&dyn Context>) -> Result<Arc<Vec<AnnotationInfo>>> {
    describe(context, &R::descriptor())
}

fn discover(resource: &ResourceDescriptor) -> Result<Vec<AnnotationInfo>> {
    let mut infos = Vec::new();
    for operation in &resource.operations {
        for annotation in &operation.annotations {
            let Some(verb) = &annotation.verb else {
                continue;
            };
            let http_method: HttpMethod = verb.parse()?;
            let media_constraint = Some(annotation.value.clone()).filter(|v| !v.is_empty());

            trace!(
                resource = %resource.name,
                operation = %operation.name,
                method = %http_method,
                "Found HTTP method annotation"
            );
            infos.push(AnnotationInfo::new(http_method, &operation.name, media_constraint));
        }
    }
    Ok(infos)
}
