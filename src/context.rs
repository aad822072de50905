use crate::constants::header;
use http::{HeaderMap, HeaderValue, Method};

/// Request-scoped values the header stages depend on.
///
/// Captured before any request rewriting and passed explicitly to every stage,
/// so concurrent transactions never share it. Header values are kept as
/// received; an absent header is an empty value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    pub origin: HeaderValue,
    pub access_control_request_method: HeaderValue,
    pub access_control_request_headers: HeaderValue,
    /// Response headers the security delegate computed for this request.
    pub secure_headers: HeaderMap,
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            method: Method::GET,
            origin: empty_value(),
            access_control_request_method: empty_value(),
            access_control_request_headers: empty_value(),
            secure_headers: HeaderMap::new(),
        }
    }
}

impl RequestContext {
    pub fn new(method: &Method, headers: &HeaderMap) -> Self {
        Self {
            method: method.clone(),
            origin: header_value(headers, header::ORIGIN),
            access_control_request_method: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_METHOD,
            ),
            access_control_request_headers: header_value(
                headers,
                header::ACCESS_CONTROL_REQUEST_HEADERS,
            ),
            secure_headers: HeaderMap::new(),
        }
    }

    pub fn with_secure_headers(mut self, secure_headers: HeaderMap) -> Self {
        self.secure_headers = secure_headers;
        self
    }

    /// `OPTIONS` with a non-empty origin and both request signal headers.
    pub fn is_preflight(&self) -> bool {
        self.method == Method::OPTIONS
            && !self.access_control_request_method.is_empty()
            && !self.access_control_request_headers.is_empty()
            && !self.origin.is_empty()
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> HeaderValue {
    headers.get(name).cloned().unwrap_or_else(empty_value)
}

fn empty_value() -> HeaderValue {
    HeaderValue::from_static("")
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
