use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Ident, ImplItem, ImplItemFn, ItemImpl, LitBool, LitStr, Token, parse_macro_input};

use crate::validation::{validate_template, validate_verb};

/// Built-in verb markers and the verb each one carries.
const VERB_MARKERS: &[(&str, &str)] = &[
    ("get", "GET"),
    ("post", "POST"),
    ("put", "PUT"),
    ("delete", "DELETE"),
    ("patch", "PATCH"),
    ("head", "HEAD"),
    ("options", "OPTIONS"),
];

fn is_marker(attr: &Attribute) -> bool {
    attr.path().get_ident().is_some_and(|ident| {
        let name = ident.to_string();
        name == "path" || name == "method" || VERB_MARKERS.iter().any(|(marker, _)| *marker == name)
    })
}

/// `#[path("template")]` or `#[path("template", limited = false)]`
struct PathArgs {
    template: LitStr,
    limited: bool,
}

impl Parse for PathArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let template: LitStr = input.parse()?;
        let mut limited = true;

        if input.parse::<Option<Token![,]>>()?.is_some() && !input.is_empty() {
            let key: Ident = input.parse()?;
            if key != "limited" {
                return Err(syn::Error::new(
                    key.span(),
                    format!("unknown path option '{}'\nhint: the only option is `limited = <bool>`", key),
                ));
            }
            input.parse::<Token![=]>()?;
            limited = input.parse::<LitBool>()?.value;
        }

        Ok(Self { template, limited })
    }
}

/// `#[method("VERB")]` or `#[method("VERB", "media/type")]`
struct MethodArgs {
    verb: LitStr,
    media: Option<LitStr>,
}

impl Parse for MethodArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let verb: LitStr = input.parse()?;
        let media = if input.parse::<Option<Token![,]>>()?.is_some() && !input.is_empty() {
            Some(input.parse()?)
        } else {
            None
        };
        Ok(Self { verb, media })
    }
}

/// Operation information extracted from a method's attributes
struct OperationInfo {
    name: String,
    path: Option<PathArgs>,
    /// (annotation name, verb, value)
    annotations: Vec<(String, String, String)>,
}

fn optional_media(attr: &Attribute) -> syn::Result<String> {
    if attr.meta.require_list().is_ok() {
        Ok(attr.parse_args::<LitStr>()?.value())
    } else {
        Ok(String::new())
    }
}

fn extract_operation(method: &ImplItemFn) -> syn::Result<Option<OperationInfo>> {
    let mut path = None;
    let mut annotations = Vec::new();

    for attr in &method.attrs {
        let Some(ident) = attr.path().get_ident() else {
            continue;
        };
        let name = ident.to_string();

        if name == "path" {
            if path.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[path] on operation"));
            }
            let args: PathArgs = attr.parse_args()?;
            validate_template(&args.template.value(), args.template.span())?;
            path = Some(args);
        } else if name == "method" {
            let args: MethodArgs = attr.parse_args()?;
            let verb = args.verb.value();
            validate_verb(&verb, args.verb.span())?;
            annotations.push((
                format!("trellis::method::{}", verb.to_lowercase()),
                verb,
                args.media.map(|media| media.value()).unwrap_or_default(),
            ));
        } else if let Some((marker, verb)) = VERB_MARKERS.iter().find(|(marker, _)| *marker == name) {
            annotations.push((format!("trellis::{}", marker), verb.to_string(), optional_media(attr)?));
        }
    }

    if path.is_none() && annotations.is_empty() {
        return Ok(None);
    }

    Ok(Some(OperationInfo {
        name: method.sig.ident.to_string(),
        path,
        annotations,
    }))
}

fn operation_tokens(info: &OperationInfo) -> TokenStream2 {
    let name = &info.name;

    let path = info.path.as_ref().map(|args| {
        let template = &args.template;
        let limited = args.limited;
        quote! {
            .with_path(::trellis_core::resource::PathAnnotation::new(#template).limited(#limited))
            .with_annotation(::trellis_core::resource::AnnotationDescriptor::marker("trellis::path", #template))
        }
    });

    let annotations = info.annotations.iter().map(|(annotation, verb, value)| {
        quote! {
            .with_annotation(::trellis_core::resource::AnnotationDescriptor::new(
                #annotation,
                ::std::option::Option::Some(::std::string::String::from(#verb)),
                #value,
            ))
        }
    });

    quote! {
        .with_operation(
            ::trellis_core::resource::OperationDescriptor::new(#name)
                #path
                #(#annotations)*
        )
    }
}

pub fn resource_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let resource_path = if attr.is_empty() {
        None
    } else {
        Some(parse_macro_input!(attr as LitStr))
    };
    let mut input = parse_macro_input!(item as ItemImpl);

    if let Some(path) = &resource_path {
        if let Err(e) = validate_template(&path.value(), path.span()) {
            return e.to_compile_error().into();
        }
    }

    if input.trait_.is_some() {
        return syn::Error::new_spanned(&input.self_ty, "#[resource] must be placed on an inherent impl block")
            .to_compile_error()
            .into();
    }

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, "#[resource] does not support generic resources")
            .to_compile_error()
            .into();
    }

    let mut operations = Vec::new();
    for item in &mut input.items {
        if let ImplItem::Fn(method) = item {
            match extract_operation(method) {
                Ok(Some(info)) => operations.push(operation_tokens(&info)),
                Ok(None) => {}
                Err(e) => return e.to_compile_error().into(),
            }
            method.attrs.retain(|attr| !is_marker(attr));
        }
    }

    let resource_type = &input.self_ty;
    let class_path = resource_path.map(|path| {
        quote! {
            .with_path(::trellis_core::resource::PathAnnotation::new(#path))
        }
    });

    let expanded = quote! {
        #input

        impl ::trellis_core::resource::Resource for #resource_type {
            fn descriptor() -> ::trellis_core::resource::ResourceDescriptor {
                ::trellis_core::resource::ResourceDescriptor::of::<Self>()
                    #class_path
                    #(#operations)*
            }
        }

        ::trellis_core::register_resource!(#resource_type);
    };

    TokenStream::from(expanded)
}
