//! Execution contexts.
//!
//! A component owns a root [`ComponentContext`]; every application it
//! hosts runs in a [`ChildContext`] that shares the parent's server
//! dispatcher but owns its own client dispatcher and logger. Child contexts
//! nest without limit and never keep their parent alive.

mod attributes;
mod child;
mod component;
mod dispatcher;

pub use attributes::Attributes;
pub use child::ChildContext;
pub use component::ComponentContext;
pub use dispatcher::ChildClientDispatcher;

use crate::call::ServerCall;
use crate::{HttpResponse, Result};
use std::sync::Arc;
use trellis_log::Logger;

/// Anything that can handle a call.
pub trait Uniform: Send + Sync {
    fn handle(&self, call: &mut ServerCall) -> Result<HttpResponse>;
}

impl<F> Uniform for F
where
    F: Fn(&mut ServerCall) -> Result<HttpResponse> + Send + Sync,
{
    fn handle(&self, call: &mut ServerCall) -> Result<HttpResponse> {
        self(call)
    }
}

/// A named call handler, such as an application.
pub trait Restlet: Uniform {
    /// Name the hosting context logs under.
    fn logger_name(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

/// Shared state and dispatchers available to the code a context hosts.
pub trait Context: Send + Sync {
    fn attributes(&self) -> &Attributes;

    fn logger(&self) -> Logger;

    /// Dispatcher for outbound calls.
    fn client_dispatcher(&self) -> Option<Arc<dyn Uniform>>;

    /// Dispatcher for inbound calls.
    fn server_dispatcher(&self) -> Option<Arc<dyn Uniform>>;

    /// A new child whose parent is this context.
    fn create_child_context(self: Arc<Self>) -> Arc<ChildContext>;
}
