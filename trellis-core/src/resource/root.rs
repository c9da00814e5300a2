use super::{ResourceClass, ResourceDescriptor, registered_resources};
use crate::Result;
use crate::context::Context;
use crate::path::{MatchingResult, RemainingPath};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Root resource classes in JAX-RS match order: more literal characters
/// first, then more variables.
#[derive(Debug, Clone, Default)]
pub struct RootResources {
    classes: Vec<ResourceClass>,
}

impl RootResources {
    pub fn new(mut classes: Vec<ResourceClass>) -> Self {
        classes.sort_by(|a, b| {
            b.pattern()
                .number_of_literal_chars()
                .cmp(&a.pattern().number_of_literal_chars())
                .then_with(|| {
                    b.pattern()
                        .number_of_capturing_groups()
                        .cmp(&a.pattern().number_of_capturing_groups())
                })
        });

        let mut seen = HashSet::new();
        for class in &classes {
            if !seen.insert(class.pattern()) {
                warn!(
                    resource = class.name(),
                    path = class.pattern().path_pattern(),
                    "Root resource path is ambiguous with an earlier resource"
                );
            }
        }

        Self { classes }
    }

    /// Compile every descriptor. The first failure aborts.
    pub fn from_descriptors<'a, I>(context: Option<&dyn Context>, descriptors: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a ResourceDescriptor>,
    {
        let classes = descriptors
            .into_iter()
            .map(|descriptor| ResourceClass::new(context, descriptor))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(classes))
    }

    /// Compile every resource registered with `#[resource]`.
    pub fn from_registry(context: Option<&dyn Context>) -> Result<Self> {
        let descriptors: Vec<ResourceDescriptor> = registered_resources()
            .map(|entry| entry.descriptor())
            .filter(|descriptor| descriptor.path.is_some())
            .collect();
        debug!(count = descriptors.len(), "Loading registered root resources");
        Self::from_descriptors(context, &descriptors)
    }

    /// The first root resource whose path matches.
    pub fn find(&self, path: &RemainingPath) -> Option<(&ResourceClass, MatchingResult)> {
        self.classes
            .iter()
            .find_map(|class| class.pattern().match_path(path).map(|result| (class, result)))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceClass> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
