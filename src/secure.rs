use http::request::Parts;
use http::{HeaderMap, Response};
use indexmap::IndexMap;
use serde::Deserialize;

pub type SecureError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Options handed to the security header engine. The header chain never
/// interprets them beyond [`SecureOptions::is_defined`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecureOptions {
    pub allowed_hosts: Vec<String>,
    pub hosts_proxy_headers: Vec<String>,
    pub ssl_redirect: bool,
    pub ssl_temporary_redirect: bool,
    pub ssl_host: String,
    pub ssl_force_host: bool,
    pub ssl_proxy_headers: IndexMap<String, String>,
    pub sts_seconds: u64,
    pub sts_include_subdomains: bool,
    pub sts_preload: bool,
    pub force_sts_header: bool,
    pub frame_deny: bool,
    pub custom_frame_options_value: String,
    pub content_type_nosniff: bool,
    pub browser_xss_filter: bool,
    pub custom_browser_xss_value: String,
    pub content_security_policy: String,
    pub public_key: String,
    pub referrer_policy: String,
    pub is_development: bool,
}

impl SecureOptions {
    pub fn is_defined(&self) -> bool {
        !self.allowed_hosts.is_empty()
            || !self.hosts_proxy_headers.is_empty()
            || self.ssl_redirect
            || self.ssl_temporary_redirect
            || self.ssl_force_host
            || !self.ssl_host.is_empty()
            || !self.ssl_proxy_headers.is_empty()
            || self.sts_seconds != 0
            || self.sts_include_subdomains
            || self.sts_preload
            || self.force_sts_header
            || self.frame_deny
            || !self.custom_frame_options_value.is_empty()
            || self.content_type_nosniff
            || self.browser_xss_filter
            || !self.custom_browser_xss_value.is_empty()
            || !self.content_security_policy.is_empty()
            || !self.public_key.is_empty()
            || !self.referrer_policy.is_empty()
            || self.is_development
    }
}

/// What the security engine wants done with an inbound request.
#[derive(Debug)]
pub enum SecureVerdict {
    /// Forward the request. The map holds the response headers computed for
    /// it (HSTS only over TLS, host-dependent values...) and is handed back to
    /// [`SecureHeaders::modify_response`] for the same transaction.
    Continue(HeaderMap),
    /// Stop the chain and send this response instead (redirects, host rejection).
    Respond(Response<()>),
}

/// Seam for the security header engine (HSTS, CSP, frame options, TLS redirect...).
///
/// One instance is built per route and shared by every request on it, so
/// anything request-specific travels through [`SecureVerdict::Continue`].
pub trait SecureHeaders: Send + Sync {
    /// `false` for engines that ignore [`SecureOptions`] entirely.
    const APPLIES_OPTIONS: bool = true;

    fn from_options(options: &SecureOptions) -> Self
    where
        Self: Sized;

    fn process_request(&self, request: &Parts) -> Result<SecureVerdict, SecureError>;

    /// `pending` is what [`SecureHeaders::process_request`] returned for this request.
    fn modify_response(
        &self,
        pending: &HeaderMap,
        headers: &mut HeaderMap,
    ) -> Result<(), SecureError>;
}

/// Delegate for routes without a security engine. Never intercepts, never
/// mutates. Configured [`SecureOptions`] are ignored (a warning is logged when
/// a route defines them).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSecureHeaders;

impl SecureHeaders for NoSecureHeaders {
    const APPLIES_OPTIONS: bool = false;

    fn from_options(_options: &SecureOptions) -> Self {
        NoSecureHeaders
    }

    fn process_request(&self, _request: &Parts) -> Result<SecureVerdict, SecureError> {
        Ok(SecureVerdict::Continue(HeaderMap::new()))
    }

    fn modify_response(
        &self,
        _pending: &HeaderMap,
        _headers: &mut HeaderMap,
    ) -> Result<(), SecureError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "secure_test.rs"]
mod secure_test;
