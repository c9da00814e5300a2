use super::{Attributes, ChildContext, Context, Uniform};
use parking_lot::RwLock;
use std::sync::Arc;
use trellis_log::Logger;

/// Root context owned by a component.
///
/// Both dispatchers may be replaced at any time; children created earlier
/// keep the server dispatcher they saw at construction.
pub struct ComponentContext {
    attributes: Attributes,
    logger: RwLock<Logger>,
    client_dispatcher: RwLock<Option<Arc<dyn Uniform>>>,
    server_dispatcher: RwLock<Option<Arc<dyn Uniform>>>,
}

impl ComponentContext {
    pub fn new() -> Arc<Self> {
        Self::with_logger(Logger::named("trellis.component"))
    }

    pub fn with_logger(logger: Logger) -> Arc<Self> {
        Arc::new(Self {
            attributes: Attributes::new(),
            logger: RwLock::new(logger),
            client_dispatcher: RwLock::new(None),
            server_dispatcher: RwLock::new(None),
        })
    }

    pub fn set_logger(&self, logger: Logger) {
        *self.logger.write() = logger;
    }

    pub fn set_client_dispatcher(&self, dispatcher: Option<Arc<dyn Uniform>>) {
        *self.client_dispatcher.write() = dispatcher;
    }

    pub fn set_server_dispatcher(&self, dispatcher: Option<Arc<dyn Uniform>>) {
        *self.server_dispatcher.write() = dispatcher;
    }
}

impl Context for ComponentContext {
    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn logger(&self) -> Logger {
        self.logger.read().clone()
    }

    fn client_dispatcher(&self) -> Option<Arc<dyn Uniform>> {
        self.client_dispatcher.read().clone()
    }

    fn server_dispatcher(&self) -> Option<Arc<dyn Uniform>> {
        self.server_dispatcher.read().clone()
    }

    fn create_child_context(self: Arc<Self>) -> Arc<ChildContext> {
        let logger = self.logger().child("application");
        ChildContext::new(Some(self), Some(logger))
    }
}

impl std::fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentContext")
            .field("logger", &*self.logger.read())
            .field("attributes", &self.attributes)
            .finish()
    }
}
