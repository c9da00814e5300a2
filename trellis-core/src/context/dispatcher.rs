use super::{ChildContext, Context, Uniform};
use crate::call::ServerCall;
use crate::{Error, HttpResponse, Result};
use std::sync::{Arc, Weak};
use tracing::trace;

/// Client dispatcher of a [`ChildContext`].
///
/// `riap://application/...` calls go to the context's delegate; every
/// other call is forwarded to the parent context's client dispatcher.
pub struct ChildClientDispatcher {
    context: Weak<ChildContext>,
}

impl ChildClientDispatcher {
    pub(crate) fn new(context: Weak<ChildContext>) -> Self {
        Self { context }
    }

    /// The context this dispatcher is bound to.
    pub fn context(&self) -> Option<Arc<ChildContext>> {
        self.context.upgrade()
    }
}

impl Uniform for ChildClientDispatcher {
    fn handle(&self, call: &mut ServerCall) -> Result<HttpResponse> {
        let context = self
            .context()
            .ok_or_else(|| Error::DispatchUnavailable("child context was dropped".to_string()))?;

        let to_application = call
            .resource_ref
            .as_ref()
            .is_some_and(|reference| reference.is_riap_authority("application"));

        if to_application {
            let Some(child) = context.child() else {
                context.logger().warn("No application bound for an internal call");
                return Err(Error::DispatchUnavailable(
                    "no application is bound to this context".to_string(),
                ));
            };
            trace!(target_ref = ?call.resource_ref, "Dispatching to the application");
            return child.handle(call);
        }

        let Some(parent_dispatcher) = context.parent().and_then(|parent| parent.client_dispatcher()) else {
            context.logger().warn("No parent client dispatcher for an outbound call");
            return Err(Error::DispatchUnavailable("no parent client dispatcher".to_string()));
        };
        trace!(target_ref = ?call.resource_ref, "Dispatching to the parent context");
        parent_dispatcher.handle(call)
    }
}

impl std::fmt::Debug for ChildClientDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildClientDispatcher")
            .field("bound", &(self.context.strong_count() > 0))
            .finish()
    }
}
