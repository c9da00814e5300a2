//! Fuzz target for server call construction.
//!
//! Preference, cookie and authorization headers fall back to defaults on
//! malformed input; building a call must never panic.

#![no_main]

use arbitrary::Arbitrary;
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use trellis_core::call::{CallOptions, HttpConnectorRequest, ServerCall};

#[derive(Debug, Arbitrary)]
struct FuzzCall {
    uri: String,
    host: Option<String>,
    accept: Option<String>,
    accept_charset: Option<String>,
    accept_language: Option<String>,
    cookie: Option<String>,
    authorization: Option<String>,
    confidential: bool,
}

fuzz_target!(|data: FuzzCall| {
    let mut builder = http::Request::builder().uri(data.uri.as_str());
    let headers = [
        ("Host", data.host),
        ("Accept", data.accept),
        ("Accept-Charset", data.accept_charset),
        ("Accept-Language", data.accept_language),
        ("Cookie", data.cookie),
        ("Authorization", data.authorization),
    ];
    for (name, value) in headers {
        if let Some(value) = value {
            builder = builder.header(name, value);
        }
    }

    // Invalid URIs and header values are rejected by the http crate
    let Ok(request) = builder.body(Bytes::new()) else {
        return;
    };

    let mut connector = HttpConnectorRequest::new(request).with_tls(data.confidential);
    let call = ServerCall::from_connector(&mut connector, &CallOptions::default());

    assert!(!call.accepted_media_types.is_empty() || connector.request().headers().contains_key("Accept"));
    for preference in &call.accepted_languages {
        assert!((0.0..=1.0).contains(&preference.quality));
    }
    if let Some(challenge) = &call.security.challenge_response {
        let _ = challenge.basic_credentials();
    }
    let _ = call.remaining_path().without_params();
});
