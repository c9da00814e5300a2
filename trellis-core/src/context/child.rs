use super::{Attributes, ChildClientDispatcher, Context, Restlet, Uniform};
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tracing::debug;
use trellis_log::Logger;

/// Logger namespace for contexts bound to a delegate.
pub const RESTLET_LOGGER_PREFIX: &str = "trellis.restlet";

/// Context of an application hosted by a parent context.
///
/// The parent is held weakly. The client dispatcher is created with the
/// context and stays bound to it; the server dispatcher is the parent's as
/// it was at construction.
pub struct ChildContext {
    parent: Option<Weak<dyn Context>>,
    child: RwLock<Option<Arc<dyn Restlet>>>,
    client_dispatcher: Arc<ChildClientDispatcher>,
    server_dispatcher: Option<Arc<dyn Uniform>>,
    logger: RwLock<Logger>,
    attributes: Attributes,
}

impl ChildContext {
    pub fn new(parent: Option<Arc<dyn Context>>, logger: Option<Logger>) -> Arc<Self> {
        let server_dispatcher = parent.as_ref().and_then(|p| p.server_dispatcher());
        let logger = logger
            .or_else(|| parent.as_ref().map(|p| p.logger().child("child")))
            .unwrap_or_default();

        debug!(
            logger = %logger,
            has_parent = parent.is_some(),
            has_server_dispatcher = server_dispatcher.is_some(),
            "Creating child context"
        );

        Arc::new_cyclic(|this| Self {
            parent: parent.as_ref().map(Arc::downgrade),
            child: RwLock::new(None),
            client_dispatcher: Arc::new(ChildClientDispatcher::new(this.clone())),
            server_dispatcher,
            logger: RwLock::new(logger),
            attributes: Attributes::new(),
        })
    }

    /// The parent, if it is still alive.
    pub fn parent(&self) -> Option<Arc<dyn Context>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn child(&self) -> Option<Arc<dyn Restlet>> {
        self.child.read().clone()
    }

    /// Bind the delegate and log under its name from now on.
    pub fn set_child(&self, child: Arc<dyn Restlet>) {
        let name = format!("{}.{}", RESTLET_LOGGER_PREFIX, child.logger_name());
        debug!(logger = %name, "Binding child context delegate");
        *self.logger.write() = Logger::named(name);
        *self.child.write() = Some(child);
    }

    /// The dispatcher bound to this context.
    pub fn child_client_dispatcher(&self) -> &Arc<ChildClientDispatcher> {
        &self.client_dispatcher
    }
}

impl Context for ChildContext {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn logger(&self) -> Logger {
        self.logger.read().clone()
    }

    fn client_dispatcher(&self) -> Option<Arc<dyn Uniform>> {
        Some(self.client_dispatcher.clone())
    }

    fn server_dispatcher(&self) -> Option<Arc<dyn Uniform>> {
        self.server_dispatcher.clone()
    }

    fn create_child_context(self: Arc<Self>) -> Arc<ChildContext> {
        ChildContext::new(Some(self), None)
    }
}

impl std::fmt::Debug for ChildContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildContext")
            .field("logger", &*self.logger.read())
            .field("has_parent", &self.parent().is_some())
            .field("has_child", &self.child.read().is_some())
            .finish()
    }
}
