// Procedural macros for Trellis resources.
// A resource's impl block is annotated once; the operation markers inside it
// are read and stripped by the outer macro.

use proc_macro::TokenStream;

mod resource;
mod validation;

/// Describe a resource type from its impl block.
///
/// The optional argument is the resource path. Operations are marked with
/// `#[get]`, `#[post]`, `#[put]`, `#[delete]`, `#[patch]`, `#[head]` or
/// `#[options]` (each optionally taking the media type it produces),
/// `#[method("VERB", "media")]` for any other verb, and
/// `#[path("template")]` / `#[path("template", limited = false)]` for
/// sub-resource paths. A method with a path and no verb is a sub-resource
/// locator.
///
/// The macro implements `trellis_core::resource::Resource` and registers
/// the type, so `trellis_core` must be a dependency of the calling crate.
///
/// ```ignore
/// struct Users;
///
/// #[resource("/users")]
/// impl Users {
///     #[get("application/json")]
///     fn list(&self) {}
///
///     #[path("{id}")]
///     #[get]
///     fn show(&self) {}
/// }
/// ```
#[proc_macro_attribute]
pub fn resource(attr: TokenStream, item: TokenStream) -> TokenStream {
    resource::resource_impl(attr, item)
}
