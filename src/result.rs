use crate::context::RequestContext;
use crate::secure::SecureError;
use http::Response;
use thiserror::Error;

/// Outcome of running the request half of the header chain.
#[derive(Debug)]
pub enum RequestDecision {
    /// Pass the (rewritten) request to the backend and hand the context back
    /// to [`crate::Headers::on_response`] afterwards.
    Forward(RequestContext),
    /// CORS preflight answered locally. The backend must not be called.
    Preflight(Response<()>),
    /// The security header delegate terminated the chain (e.g. a TLS redirect).
    Intercepted(Response<()>),
}

impl RequestDecision {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestDecision::Forward(_))
    }
}

/// Errors that prevent the middleware from being installed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("headers configuration not valid: no secure, custom or CORS headers are defined")]
    NotConfigured,
    #[error("`{name}` is not a valid HTTP header name")]
    InvalidHeaderName { name: String },
    #[error("value configured for `{name}` is not a valid HTTP header value")]
    InvalidHeaderValue { name: String },
}

/// Errors surfaced while processing a transaction.
#[derive(Debug, Error)]
pub enum HeadersError {
    #[error("secure headers delegate failed: {0}")]
    Secure(#[source] SecureError),
}
