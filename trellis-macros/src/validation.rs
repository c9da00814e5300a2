//! Compile-time template validation
//!
//! Catches malformed resource and operation paths before they reach
//! registration:
//! - Braces must be balanced and never nested
//! - Variable names cannot be empty
//! - The rest variable name is reserved
//! - Custom verbs must be HTTP tokens

use proc_macro2::Span;
use syn::Error;

/// Name of the variable appended to every compiled path.
const RESERVED_VARIABLE: &str = "trellis.rest";

/// Validate a path template, returning its variable names in order.
pub fn validate_template(template: &str, span: Span) -> Result<Vec<String>, Error> {
    let mut names = Vec::new();
    let mut current: Option<String> = None;

    for c in template.chars() {
        if let Some(name) = current.as_mut() {
            match c {
                '{' => {
                    return Err(Error::new(
                        span,
                        format!(
                            "nested '{{' in path template: \"{}\"\n\
                             hint: close the current variable before opening another",
                            template
                        ),
                    ));
                }
                '}' => {
                    let name = name.trim().to_string();
                    current = None;
                    validate_variable_name(&name, template, span)?;
                    names.push(name);
                }
                c => name.push(c),
            }
            continue;
        }

        match c {
            '{' => current = Some(String::new()),
            '}' => {
                return Err(Error::new(
                    span,
                    format!(
                        "unmatched '}}' in path template: \"{}\"\n\
                         hint: variables are written as {{name}}",
                        template
                    ),
                ));
            }
            _ => {}
        }
    }

    if current.is_some() {
        return Err(Error::new(
            span,
            format!(
                "unclosed variable in path template: \"{}\"\n\
                 hint: add the missing '}}'",
                template
            ),
        ));
    }

    Ok(names)
}

fn validate_variable_name(name: &str, template: &str, span: Span) -> Result<(), Error> {
    if name.is_empty() {
        return Err(Error::new(
            span,
            format!("empty variable name in path template: \"{}\"", template),
        ));
    }

    if name == RESERVED_VARIABLE {
        return Err(Error::new(
            span,
            format!(
                "variable name '{}' is reserved: \"{}\"\n\
                 hint: the remainder of the path is captured automatically",
                name, template
            ),
        ));
    }

    Ok(())
}

/// Validate a custom HTTP verb.
pub fn validate_verb(verb: &str, span: Span) -> Result<(), Error> {
    if verb.is_empty() {
        return Err(Error::new(span, "HTTP verb cannot be empty"));
    }

    if let Some(c) = verb
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '_'))
    {
        return Err(Error::new(
            span,
            format!(
                "HTTP verb '{}' contains invalid character '{}'\n\
                 hint: verbs are tokens such as \"PROPFIND\"",
                verb, c
            ),
        ));
    }

    Ok(())
}
