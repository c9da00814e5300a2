//! Call security: transport confidentiality and `Authorization` credentials.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;

/// An authentication scheme, identified as `HTTP_<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChallengeScheme {
    id: String,
    technical_name: String,
}

impl ChallengeScheme {
    pub fn new(id: impl Into<String>, technical_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            technical_name: technical_name.into(),
        }
    }

    /// Scheme as named in an HTTP `Authorization` header.
    pub fn http(technical_name: &str) -> Self {
        Self::new(format!("HTTP_{}", technical_name), technical_name)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn technical_name(&self) -> &str {
        &self.technical_name
    }
}

impl fmt::Display for ChallengeScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Credentials presented by the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ChallengeResponse {
    pub scheme: ChallengeScheme,
    pub credentials: String,
}

impl ChallengeResponse {
    pub fn new(scheme: ChallengeScheme, credentials: impl Into<String>) -> Self {
        Self {
            scheme,
            credentials: credentials.into(),
        }
    }

    /// Parse an `Authorization` header value: `<scheme> <credentials>`.
    ///
    /// Without a space there is no response.
    pub fn parse(authorization: &str) -> Option<Self> {
        let (scheme, credentials) = authorization.split_once(' ')?;
        Some(Self::new(ChallengeScheme::http(scheme), credentials))
    }

    /// Identifier and secret of HTTP Basic credentials.
    pub fn basic_credentials(&self) -> Option<(String, String)> {
        if !self.scheme.technical_name().eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(self.credentials.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (identifier, secret) = decoded.split_once(':')?;
        Some((identifier.to_string(), secret.to_string()))
    }
}

impl fmt::Debug for ChallengeResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeResponse")
            .field("scheme", &self.scheme)
            .field("credentials", &"<redacted>")
            .finish()
    }
}

/// Security facts about a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Security {
    /// Whether the call arrived over a confidential transport (TLS).
    pub confidential: bool,
    pub challenge_response: Option<ChallengeResponse>,
}

impl Security {
    pub fn new(confidential: bool, authorization: Option<&str>) -> Self {
        Self {
            confidential,
            challenge_response: authorization.and_then(ChallengeResponse::parse),
        }
    }
}
