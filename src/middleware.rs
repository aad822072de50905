use crate::context::RequestContext;
use crate::policy::HeaderPolicy;
use crate::preflight::CorsResponder;
use crate::request::RequestHeaderRewriter;
use crate::response::ResponseHeaderRewriter;
use crate::result::{HeadersError, RequestDecision, ValidationError};
use crate::secure::{NoSecureHeaders, SecureHeaders, SecureVerdict};
use http::request::Parts;
use http::{HeaderMap, Request, Response};
use std::fmt;

/// Custom, CORS and security headers for one route.
///
/// Runs, in order: the security delegate, the custom request headers and the
/// preflight responder, then (after the backend) the response rewriter and the
/// delegate's response hook. Holds no per-request state, so one instance can
/// serve any number of concurrent requests.
pub struct Headers<S = NoSecureHeaders> {
    secure: Option<S>,
    stage: Option<HeaderStage>,
}

/// The custom/CORS half of the chain, installed only when configured.
#[derive(Debug, Clone)]
struct HeaderStage {
    request: RequestHeaderRewriter,
    preflight: CorsResponder,
    response: ResponseHeaderRewriter,
}

impl<S: SecureHeaders> Headers<S> {
    pub fn new(policy: HeaderPolicy) -> Result<Self, ValidationError> {
        tracing::debug!("creating headers middleware");

        let has_secure = policy.has_secure_headers_defined();
        let has_custom = policy.has_custom_headers_defined();
        let has_cors = policy.has_cors_headers_defined();

        if !has_secure && !has_custom && !has_cors {
            return Err(ValidationError::NotConfigured);
        }

        let secure = if has_secure {
            tracing::debug!(options = ?policy.secure, "setting up secure headers");
            if !S::APPLIES_OPTIONS {
                tracing::warn!(
                    options = ?policy.secure,
                    "secure header options are configured but no security engine is installed; \
                     they will be ignored"
                );
            }
            Some(S::from_options(&policy.secure))
        } else {
            None
        };

        let stage = if has_custom || has_cors {
            tracing::debug!(
                custom = has_custom,
                cors = has_cors,
                "setting up custom/CORS headers"
            );
            if let Some(origin) = &policy.allow_origin
                && !origin.is_supported()
            {
                tracing::warn!(
                    allow_origin = ?origin,
                    "unsupported allow-origin value; Access-Control-Allow-Origin will not be sent"
                );
            }
            Some(HeaderStage {
                request: RequestHeaderRewriter::new(&policy)?,
                preflight: CorsResponder::new(&policy)?,
                response: ResponseHeaderRewriter::new(&policy)?,
            })
        } else {
            None
        };

        Ok(Self { secure, stage })
    }

    /// Request half of the chain. On [`RequestDecision::Forward`] the caller
    /// sends the request to the backend and later passes the returned context
    /// to [`Headers::on_response`].
    pub fn on_request(&self, request: &mut Parts) -> Result<RequestDecision, HeadersError> {
        let mut secure_headers = HeaderMap::new();
        if let Some(secure) = &self.secure {
            match secure.process_request(request).map_err(HeadersError::Secure)? {
                SecureVerdict::Respond(response) => {
                    tracing::trace!(
                        status = %response.status(),
                        "secure headers intercepted request"
                    );
                    return Ok(RequestDecision::Intercepted(response));
                }
                SecureVerdict::Continue(pending) => secure_headers = pending,
            }
        }

        let ctx = RequestContext::new(&request.method, &request.headers)
            .with_secure_headers(secure_headers);

        if let Some(stage) = &self.stage {
            if let Some(response) = stage.preflight.respond(&ctx) {
                tracing::trace!(origin = ?ctx.origin, "answered CORS preflight");
                return Ok(RequestDecision::Preflight(response));
            }
            stage.request.rewrite(&mut request.headers);
        }

        Ok(RequestDecision::Forward(ctx))
    }

    /// Response half of the chain, for responses produced by the backend.
    pub fn on_response(
        &self,
        ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), HeadersError> {
        if let Some(stage) = &self.stage {
            stage.response.rewrite(ctx, headers)?;
        }
        if let Some(secure) = &self.secure {
            secure
                .modify_response(&ctx.secure_headers, headers)
                .map_err(HeadersError::Secure)?;
        }
        Ok(())
    }

    /// Runs the full chain around `backend`. Terminal responses get a default body.
    pub fn serve<B, R, F>(
        &self,
        request: Request<B>,
        backend: F,
    ) -> Result<Response<R>, HeadersError>
    where
        F: FnOnce(Request<B>) -> Response<R>,
        R: Default,
    {
        let (mut parts, body) = request.into_parts();
        match self.on_request(&mut parts)? {
            RequestDecision::Forward(ctx) => {
                let mut response = backend(Request::from_parts(parts, body));
                self.on_response(&ctx, response.headers_mut())?;
                Ok(response)
            }
            RequestDecision::Preflight(response) | RequestDecision::Intercepted(response) => {
                Ok(response.map(|()| R::default()))
            }
        }
    }

    pub fn has_secure_headers(&self) -> bool {
        self.secure.is_some()
    }

    pub fn has_header_stage(&self) -> bool {
        self.stage.is_some()
    }
}

impl<S> fmt::Debug for Headers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Headers")
            .field("secure", &self.secure.is_some())
            .field("stage", &self.stage)
            .finish()
    }
}

#[cfg(test)]
#[path = "middleware_test.rs"]
mod middleware_test;
