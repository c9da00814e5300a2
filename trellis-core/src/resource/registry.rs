//! Resource registry for compile-time resource collection using inventory
//!
//! `#[resource]` submits one [`ResourceEntry`] per annotated type; the
//! entries are collected at runtime by [`RootResources::from_registry`].
//!
//! [`RootResources::from_registry`]: super::RootResources::from_registry

use super::{Resource, ResourceDescriptor};

/// A resource type that can be collected via inventory
pub struct ResourceEntry {
    type_name: fn() -> &'static str,
    descriptor: fn() -> ResourceDescriptor,
}

inventory::collect!(ResourceEntry);

impl ResourceEntry {
    pub const fn new<R: Resource>() -> Self {
        Self {
            type_name: std::any::type_name::<R>,
            descriptor: R::descriptor,
        }
    }

    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    pub fn descriptor(&self) -> ResourceDescriptor {
        (self.descriptor)()
    }
}

impl std::fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("type_name", &self.type_name())
            .finish()
    }
}

/// Every registered resource type.
pub fn registered_resources() -> impl Iterator<Item = &'static ResourceEntry> {
    inventory::iter::<ResourceEntry>.into_iter()
}

/// Look up a registered resource by type name.
pub fn find_registered(type_name: &str) -> Option<&'static ResourceEntry> {
    registered_resources().find(|entry| entry.type_name() == type_name)
}

/// Register a resource type with the inventory
///
/// Used by `#[resource]`; usable directly for hand-written descriptors.
#[macro_export]
macro_rules! register_resource {
    ($resource:ty) => {
        $crate::inventory::submit! {
            $crate::resource::ResourceEntry::new::<$resource>()
        }
    };
}
