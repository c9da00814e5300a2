//! The request surface a server connector exposes.

use bytes::{Buf, Bytes};
use std::io::Read;
use std::net::SocketAddr;

/// Request handle of a server connector.
pub trait ConnectorRequest {
    /// The request method, verbatim.
    fn method(&self) -> &str;

    /// The request URL, absolute or origin-form. `None` if unknown.
    fn request_url(&self) -> Option<String>;

    /// First value of a header, by case-insensitive name.
    fn header(&self, name: &str) -> Option<&str>;

    /// Whether the request arrived over a confidential transport.
    fn is_confidential(&self) -> bool;

    fn remote_address(&self) -> Option<String>;

    /// The entity stream. Returns `None` once taken.
    fn take_input(&mut self) -> Option<Box<dyn Read + Send>>;
}

/// [`ConnectorRequest`] over an `http::Request` whose body is buffered.
#[derive(Debug)]
pub struct HttpConnectorRequest {
    request: http::Request<Bytes>,
    remote_address: Option<SocketAddr>,
    confidential: bool,
    input_taken: bool,
}

impl HttpConnectorRequest {
    pub fn new(request: http::Request<Bytes>) -> Self {
        Self {
            request,
            remote_address: None,
            confidential: false,
            input_taken: false,
        }
    }

    pub fn with_remote_address(mut self, address: SocketAddr) -> Self {
        self.remote_address = Some(address);
        self
    }

    pub fn with_tls(mut self, confidential: bool) -> Self {
        self.confidential = confidential;
        self
    }

    pub fn request(&self) -> &http::Request<Bytes> {
        &self.request
    }
}

impl ConnectorRequest for HttpConnectorRequest {
    fn method(&self) -> &str {
        self.request.method().as_str()
    }

    fn request_url(&self) -> Option<String> {
        let uri = self.request.uri();
        if uri.scheme().is_some() && uri.authority().is_some() {
            return Some(uri.to_string());
        }
        uri.path_and_query().map(|pq| pq.as_str().to_string())
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    }

    fn is_confidential(&self) -> bool {
        self.confidential || self.request.uri().scheme() == Some(&http::uri::Scheme::HTTPS)
    }

    fn remote_address(&self) -> Option<String> {
        self.remote_address.map(|addr| addr.ip().to_string())
    }

    fn take_input(&mut self) -> Option<Box<dyn Read + Send>> {
        if self.input_taken {
            return None;
        }
        self.input_taken = true;
        let body = std::mem::take(self.request.body_mut());
        Some(Box::new(body.reader()))
    }
}
