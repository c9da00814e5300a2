//! Core library for the Trellis resource framework
//!
//! URI templates, JAX-RS path patterns, resource descriptors and their
//! per-context index, execution contexts, and the server call adapter.

pub mod annotations;
pub mod call;
pub mod context;
pub mod error;
pub mod http;
pub mod path;
pub mod resource;
pub mod template;

// Re-export commonly used types
pub use annotations::{AnnotationInfo, describe, describe_resource};
pub use call::{CallOptions, ConnectorRequest, HttpConnectorRequest, ServerCall};
pub use context::{ChildContext, ComponentContext, Context, Restlet, Uniform};
pub use error::*;
pub use self::http::{HttpMethod, HttpResponse};
pub use path::{MatchingResult, PathPattern, RemainingPath};
pub use resource::{
    AnnotationDescriptor, OperationDescriptor, PathAnnotation, Resource, ResourceClass,
    ResourceDescriptor, RootResources,
};
pub use template::{Template, Variable, VariableKind};

// Used by the code `#[resource]` expands to
#[doc(hidden)]
pub use inventory;
