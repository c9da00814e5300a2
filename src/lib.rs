// Trellis - JAX-RS style resources for Rust
//
// URI templates and path matching, annotation-driven resource descriptors,
// hierarchical execution contexts and connector-neutral server calls.

// Re-export core functionality
pub use trellis_core::*;

// Re-export procedural macros
pub use trellis_macros::resource;

// Logging
pub use trellis_log as log;

// Re-export optional crates
#[cfg(feature = "config")]
pub use trellis_config;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CallOptions,
        ChildContext,
        ComponentContext,
        ConnectorRequest,
        Context,
        Error,
        HttpConnectorRequest,
        HttpMethod,
        HttpResponse,
        MatchingResult,
        PathPattern,
        RemainingPath,
        Resource,
        ResourceClass,
        ResourceDescriptor,
        Restlet,
        Result,
        RootResources,
        ServerCall,
        Template,
        Uniform,
        resource,
    };

    pub use trellis_log::Logger;

    #[cfg(feature = "config")]
    pub use trellis_config::EngineSettings;
}
