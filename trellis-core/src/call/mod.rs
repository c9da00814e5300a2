//! Server calls.
//!
//! [`ServerCall::from_connector`] turns a connector's request into a
//! framework-neutral snapshot: method, references, preference lists with
//! their documented defaults, cookies, the lazily-read entity and the
//! security facts of the request.

mod connector;
mod cookies;
mod metadata;
mod preference;
mod reference;
mod representation;
mod security;

pub use connector::{ConnectorRequest, HttpConnectorRequest};
pub use cookies::{Cookie, Cookies};
pub use metadata::{CharacterSet, Language, MediaType, Metadata};
pub use preference::{Preference, PreferenceReader};
pub use reference::Reference;
pub use representation::InputRepresentation;
pub use security::{ChallengeResponse, ChallengeScheme, Security};

use crate::path::RemainingPath;
use tracing::debug;

/// Options for building calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOptions {
    /// Parse the `Authorization` header into a challenge response.
    pub extract_security: bool,
    /// Scheme for origin-form URLs on non-confidential connections.
    pub default_scheme: String,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            extract_security: true,
            default_scheme: "http".to_string(),
        }
    }
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extract_security(mut self, enabled: bool) -> Self {
        self.extract_security = enabled;
        self
    }

    pub fn default_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.default_scheme = scheme.into();
        self
    }
}

/// A snapshot of an inbound request.
#[derive(Debug)]
pub struct ServerCall {
    /// `None` when the connector's method is not a valid token.
    pub method: Option<http::Method>,
    pub resource_ref: Option<Reference>,
    pub referrer_ref: Option<Reference>,
    pub user_agent: Option<String>,
    pub accepted_media_types: Vec<Preference<MediaType>>,
    pub accepted_character_sets: Vec<Preference<CharacterSet>>,
    pub accepted_languages: Vec<Preference<Language>>,
    pub cookies: Option<Cookies>,
    pub input: Option<InputRepresentation>,
    pub security: Security,
    pub client_address: Option<String>,
}

impl ServerCall {
    /// A call with default preferences and no entity, as used for
    /// internal dispatch.
    pub fn new(method: http::Method, resource_ref: Reference) -> Self {
        Self {
            method: Some(method),
            resource_ref: Some(resource_ref),
            referrer_ref: None,
            user_agent: None,
            accepted_media_types: vec![Preference::all()],
            accepted_character_sets: vec![Preference::all()],
            accepted_languages: vec![Preference::all()],
            cookies: None,
            input: None,
            security: Security::default(),
            client_address: None,
        }
    }

    /// Build a call from a connector request.
    pub fn from_connector<R>(request: &mut R, options: &CallOptions) -> Self
    where
        R: ConnectorRequest + ?Sized,
    {
        let method = http::Method::from_bytes(request.method().as_bytes()).ok();
        let confidential = request.is_confidential();
        let resource_ref = request
            .request_url()
            .map(|url| Reference::new(absolute_url(request, &url, confidential, options)));

        let call = Self {
            method,
            resource_ref,
            referrer_ref: request.header("Referer").map(Reference::new),
            user_agent: request.header("User-Agent").map(str::to_string),
            accepted_media_types: accepted_media_types(request.header("Accept")),
            accepted_character_sets: accepted_character_sets(request.header("Accept-Charset")),
            accepted_languages: accepted_languages(request.header("Accept-Language")),
            cookies: request.header("Cookie").map(Cookies::parse),
            security: if options.extract_security {
                Security::new(confidential, request.header("Authorization"))
            } else {
                Security::new(confidential, None)
            },
            client_address: request.remote_address(),
            input: None,
        };

        let media_type = request.header("Content-Type").and_then(MediaType::parse);
        let size = request
            .header("Content-Length")
            .and_then(|len| len.trim().parse().ok());
        let input = request
            .take_input()
            .map(|stream| InputRepresentation::new(stream, media_type).with_size(size));

        debug!(
            method = ?call.method,
            resource = ?call.resource_ref.as_ref().map(Reference::as_str),
            client = ?call.client_address,
            "Built server call"
        );

        Self { input, ..call }
    }

    /// Path and query of the resource reference.
    pub fn remaining_path(&self) -> RemainingPath {
        self.resource_ref
            .as_ref()
            .map(Reference::remaining_path)
            .unwrap_or_default()
    }
}

fn absolute_url<R>(request: &R, url: &str, confidential: bool, options: &CallOptions) -> String
where
    R: ConnectorRequest + ?Sized,
{
    if !url.starts_with('/') {
        return url.to_string();
    }
    match request.header("Host") {
        Some(host) => {
            let scheme = if confidential {
                "https"
            } else {
                options.default_scheme.as_str()
            };
            format!("{}://{}{}", scheme, host.trim(), url)
        }
        None => url.to_string(),
    }
}

fn accepted_media_types(header: Option<&str>) -> Vec<Preference<MediaType>> {
    match header {
        Some(header) => PreferenceReader::parse(header),
        None => vec![Preference::all()],
    }
}

fn accepted_character_sets(header: Option<&str>) -> Vec<Preference<CharacterSet>> {
    match header {
        Some("") => {
            vec![Preference::new(CharacterSet::iso_8859_1(), 1.0)]
        }
        Some(header) => PreferenceReader::parse(header),
        None => vec![Preference::all()],
    }
}

fn accepted_languages(header: Option<&str>) -> Vec<Preference<Language>> {
    match header {
        Some(header) => PreferenceReader::parse(header),
        None => vec![Preference::all()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn connector(builder: http::request::Builder) -> HttpConnectorRequest {
        HttpConnectorRequest::new(builder.body(Bytes::from_static(b"{\"a\":1}")).unwrap())
    }

    #[test]
    fn test_defaults_without_headers() {
        let mut request = connector(http::Request::builder().uri("/items"));
        let call = ServerCall::from_connector(&mut request, &CallOptions::default());

        assert_eq!(call.method, Some(http::Method::GET));
        assert_eq!(call.resource_ref.as_ref().map(Reference::as_str), Some("/items"));
        assert_eq!(call.referrer_ref, None);
        assert_eq!(call.user_agent, None);
        assert_eq!(call.accepted_media_types, vec![Preference::new(MediaType::any(), 1.0)]);
        assert_eq!(call.accepted_character_sets, vec![Preference::new(CharacterSet::any(), 1.0)]);
        assert_eq!(call.accepted_languages, vec![Preference::new(Language::any(), 1.0)]);
        assert!(call.cookies.is_none());
        assert!(call.security.challenge_response.is_none());
        assert!(!call.security.confidential);
    }

    #[test]
    fn test_empty_accept_charset_means_latin1() {
        let mut request = connector(http::Request::builder().uri("/").header("Accept-Charset", ""));
        let call = ServerCall::from_connector(&mut request, &CallOptions::default());
        assert_eq!(
            call.accepted_character_sets,
            vec![Preference::new(CharacterSet::iso_8859_1(), 1.0)]
        );
    }

    #[test]
    fn test_blank_accept_charset_is_parsed() {
        let mut request = connector(http::Request::builder().uri("/").header("Accept-Charset", " "));
        let call = ServerCall::from_connector(&mut request, &CallOptions::default());
        assert!(call.accepted_character_sets.is_empty());
    }

    #[test]
    fn test_headers_parsed() {
        let mut request = connector(
            http::Request::builder()
                .method("POST")
                .uri("/orders?draft=1")
                .header("Host", "shop.example")
                .header("Referer", "http://shop.example/cart")
                .header("User-Agent", "curl/8.0")
                .header("Accept", "text/html;q=0.5, application/json")
                .header("Accept-Language", "de;q=0.3, en")
                .header("Cookie", "cart=42")
                .header("Content-Type", "application/json; charset=utf-8")
                .header("Content-Length", "7")
                .header("Authorization", "Basic dXNlcjpwYXNz"),
        )
        .with_remote_address("192.0.2.1:40000".parse().unwrap());

        let mut call = ServerCall::from_connector(&mut request, &CallOptions::default());
        assert_eq!(call.method, Some(http::Method::POST));
        assert_eq!(
            call.resource_ref.as_ref().map(Reference::as_str),
            Some("http://shop.example/orders?draft=1")
        );
        assert_eq!(call.remaining_path().as_str(), "/orders?draft=1");
        assert_eq!(call.referrer_ref.as_ref().map(Reference::as_str), Some("http://shop.example/cart"));
        assert_eq!(call.user_agent.as_deref(), Some("curl/8.0"));
        assert_eq!(call.accepted_media_types[0].metadata, MediaType::json());
        assert_eq!(call.accepted_languages[0].metadata, Language::new("en"));
        assert_eq!(call.cookies.as_ref().unwrap().get("cart").unwrap().value, "42");
        assert_eq!(call.client_address.as_deref(), Some("192.0.2.1"));

        let challenge = call.security.challenge_response.as_ref().unwrap();
        assert_eq!(challenge.scheme.id(), "HTTP_Basic");
        assert_eq!(challenge.credentials, "dXNlcjpwYXNz");

        let input = call.input.as_mut().unwrap();
        assert_eq!(input.media_type().map(MediaType::mime_type).as_deref(), Some("application/json"));
        assert_eq!(input.size(), Some(7));
        assert_eq!(input.text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_security_extraction_can_be_disabled() {
        let mut request = connector(
            http::Request::builder()
                .uri("/")
                .header("Authorization", "Basic dXNlcjpwYXNz"),
        )
        .with_tls(true);
        let options = CallOptions::new().extract_security(false);
        let call = ServerCall::from_connector(&mut request, &options);
        assert!(call.security.confidential);
        assert!(call.security.challenge_response.is_none());
    }

    #[test]
    fn test_confidential_scheme() {
        let mut request = connector(http::Request::builder().uri("/a").header("Host", "h")).with_tls(true);
        let call = ServerCall::from_connector(&mut request, &CallOptions::default());
        assert_eq!(call.resource_ref.unwrap().as_str(), "https://h/a");
    }
}
