use super::{OperationDescriptor, ResourceDescriptor};
use crate::annotations::{self, AnnotationInfo};
use crate::context::Context;
use crate::path::{MatchingResult, PathPattern, RemainingPath};
use crate::{HttpMethod, Result};
use std::sync::Arc;
use tracing::debug;

/// Role of an operation during dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// HTTP method, no path: handles the resource itself.
    ResourceMethod,
    /// HTTP method and path.
    SubResourceMethod,
    /// Path, no HTTP method: yields another resource.
    SubResourceLocator,
}

/// An operation with its compiled path and HTTP methods.
#[derive(Debug, Clone)]
pub struct ResourceOperation {
    name: String,
    kind: OperationKind,
    pattern: PathPattern,
    methods: Vec<AnnotationInfo>,
}

impl ResourceOperation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// One entry per HTTP method annotation on the operation.
    pub fn methods(&self) -> &[AnnotationInfo] {
        &self.methods
    }

    pub fn supports(&self, method: HttpMethod) -> bool {
        self.methods.iter().any(|info| info.http_method() == method)
    }
}

/// A resource type compiled for dispatch.
#[derive(Debug, Clone)]
pub struct ResourceClass {
    name: String,
    pattern: PathPattern,
    operations: Vec<ResourceOperation>,
}

impl ResourceClass {
    /// Compile a root resource. The resource must declare a path.
    pub fn new(context: Option<&dyn Context>, descriptor: &ResourceDescriptor) -> Result<Self> {
        let pattern = PathPattern::for_resource(descriptor)?;
        let annotations = annotations::describe(context, descriptor)?;

        let mut operations = Vec::new();
        for operation in &descriptor.operations {
            if let Some(compiled) = compile_operation(operation, &annotations)? {
                operations.push(compiled);
            }
        }

        debug!(
            resource = %descriptor.name,
            path = %pattern,
            operations = operations.len(),
            "Compiled resource class"
        );

        Ok(Self {
            name: descriptor.name.clone(),
            pattern,
            operations,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn operations(&self) -> &[ResourceOperation] {
        &self.operations
    }

    /// Operations able to handle `remaining`, the path left after the
    /// class pattern matched.
    ///
    /// Resource methods match an empty remainder, sub-resource methods must
    /// consume the whole remainder, locators only a prefix. Longer literal
    /// paths come first, then more variables.
    pub fn matching_operations(&self, remaining: &RemainingPath) -> Vec<(&ResourceOperation, MatchingResult)> {
        let mut matches: Vec<_> = self
            .operations
            .iter()
            .filter_map(|operation| {
                let result = operation.pattern.match_path(remaining)?;
                let accepted = match operation.kind {
                    OperationKind::SubResourceLocator => true,
                    OperationKind::ResourceMethod | OperationKind::SubResourceMethod => {
                        result.is_final_capturing_group_empty_or_slash()
                    }
                };
                accepted.then_some((operation, result))
            })
            .collect();

        matches.sort_by(|(a, _), (b, _)| {
            b.pattern
                .number_of_literal_chars()
                .cmp(&a.pattern.number_of_literal_chars())
                .then_with(|| {
                    b.pattern
                        .number_of_capturing_groups()
                        .cmp(&a.pattern.number_of_capturing_groups())
                })
        });
        matches
    }

    /// HTTP methods some operation accepts for `remaining`.
    pub fn allowed_methods(&self, remaining: &RemainingPath) -> Vec<HttpMethod> {
        let mut methods = Vec::new();
        for (operation, _) in self.matching_operations(remaining) {
            for info in operation.methods() {
                if !methods.contains(&info.http_method()) {
                    methods.push(info.http_method());
                }
            }
        }
        methods
    }

    /// The best operation handling `method` on `remaining`.
    pub fn select(&self, method: HttpMethod, remaining: &RemainingPath) -> Option<(&ResourceOperation, MatchingResult)> {
        self.matching_operations(remaining)
            .into_iter()
            .find(|(operation, _)| operation.supports(method))
    }
}

fn compile_operation(operation: &OperationDescriptor, annotations: &Arc<Vec<AnnotationInfo>>) -> Result<Option<ResourceOperation>> {
    let methods: Vec<AnnotationInfo> = annotations
        .iter()
        .filter(|info| info.operation() == operation.name)
        .cloned()
        .collect();

    let kind = match (methods.is_empty(), operation.path.is_some()) {
        (false, false) => OperationKind::ResourceMethod,
        (false, true) => OperationKind::SubResourceMethod,
        (true, true) => OperationKind::SubResourceLocator,
        (true, false) => return Ok(None),
    };

    Ok(Some(ResourceOperation {
        name: operation.name.clone(),
        kind,
        pattern: PathPattern::for_operation(operation)?,
        methods,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::resource::PathAnnotation;

    fn users() -> ResourceDescriptor {
        ResourceDescriptor::new("app::Users")
            .with_path(PathAnnotation::new("/users"))
            .with_operation(OperationDescriptor::new("list").with_method(HttpMethod::GET, "application/json"))
            .with_operation(OperationDescriptor::new("create").with_method(HttpMethod::POST, ""))
            .with_operation(
                OperationDescriptor::new("show")
                    .with_path(PathAnnotation::new("{id}"))
                    .with_method(HttpMethod::GET, ""),
            )
            .with_operation(
                OperationDescriptor::new("me")
                    .with_path(PathAnnotation::new("me"))
                    .with_method(HttpMethod::GET, ""),
            )
            .with_operation(OperationDescriptor::new("orders").with_path(PathAnnotation::new("{id}/orders")))
            .with_operation(OperationDescriptor::new("helper"))
    }

    #[test]
    fn test_operation_kinds() {
        let class = ResourceClass::new(None, &users()).unwrap();
        let kinds: Vec<_> = class.operations().iter().map(|op| (op.name(), op.kind())).collect();
        assert_eq!(
            kinds,
            vec![
                ("list", OperationKind::ResourceMethod),
                ("create", OperationKind::ResourceMethod),
                ("show", OperationKind::SubResourceMethod),
                ("me", OperationKind::SubResourceMethod),
                ("orders", OperationKind::SubResourceLocator),
            ]
        );
    }

    #[test]
    fn test_resource_methods_on_empty_remainder() {
        let class = ResourceClass::new(None, &users()).unwrap();
        assert_eq!(class.allowed_methods(&"".into()), vec![HttpMethod::GET, HttpMethod::POST]);
        assert_eq!(class.allowed_methods(&"/".into()), vec![HttpMethod::GET, HttpMethod::POST]);

        let (op, _) = class.select(HttpMethod::POST, &"/".into()).unwrap();
        assert_eq!(op.name(), "create");
    }

    #[test]
    fn test_literal_path_wins() {
        let class = ResourceClass::new(None, &users()).unwrap();
        let names: Vec<_> = class
            .matching_operations(&"/me".into())
            .into_iter()
            .map(|(op, _)| op.name())
            .collect();
        assert_eq!(names, vec!["me", "show"]);
    }

    #[test]
    fn test_locator_leaves_residue() {
        let class = ResourceClass::new(None, &users()).unwrap();
        let matches = class.matching_operations(&"/7/orders/3".into());
        assert_eq!(matches.len(), 1);
        let (op, result) = &matches[0];
        assert_eq!(op.kind(), OperationKind::SubResourceLocator);
        assert_eq!(result.variable("id"), Some("7"));
        assert_eq!(result.final_matching_group(), "/3");

        assert!(class.select(HttpMethod::GET, &"/7/orders/3".into()).is_none());
        assert!(class.allowed_methods(&"/7/orders".into()).is_empty());
    }

    #[test]
    fn test_errors_surface_at_registration() {
        let bare = ResourceDescriptor::new("app::Bare");
        assert!(matches!(ResourceClass::new(None, &bare), Err(Error::MissingAnnotation(_))));

        let broken = users().with_operation(
            OperationDescriptor::new("broken")
                .with_path(PathAnnotation::new("{"))
                .with_method(HttpMethod::GET, ""),
        );
        assert!(matches!(
            ResourceClass::new(None, &broken),
            Err(Error::IllegalPathOnMethod { .. })
        ));
    }
}
