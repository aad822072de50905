use crate::constants::header;
use crate::context::RequestContext;
use crate::custom_headers::join_values;
use crate::origin::{AllowOriginPolicy, resolve_allow_origin};
use crate::policy::HeaderPolicy;
use crate::result::ValidationError;
use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use http::{HeaderValue, Response};

/// Answers CORS preflight requests without reaching the backend.
#[derive(Debug, Clone)]
pub(crate) struct CorsResponder {
    allow_credentials: bool,
    allow_headers: Option<HeaderValue>,
    allow_methods: Option<HeaderValue>,
    allow_origin: Option<AllowOriginPolicy>,
    max_age: HeaderValue,
}

impl CorsResponder {
    pub(crate) fn new(policy: &HeaderPolicy) -> Result<Self, ValidationError> {
        Ok(Self {
            allow_credentials: policy.allow_credentials,
            allow_headers: join_values(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                &policy.allow_headers,
            )?,
            allow_methods: join_values(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                &policy.allow_methods,
            )?,
            allow_origin: policy.allow_origin.clone(),
            max_age: HeaderValue::from(policy.max_age),
        })
    }

    /// Builds the preflight response, or `None` when `ctx` is not a preflight.
    pub(crate) fn respond(&self, ctx: &RequestContext) -> Option<Response<()>> {
        if !ctx.is_preflight() {
            return None;
        }

        let mut response = Response::new(());
        let headers = response.headers_mut();

        if self.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }
        if let Some(value) = &self.allow_headers {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, value.clone());
        }
        if let Some(value) = &self.allow_methods {
            headers.insert(ACCESS_CONTROL_ALLOW_METHODS, value.clone());
        }
        if let Some(value) = resolve_allow_origin(self.allow_origin.as_ref(), &ctx.origin) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        headers.insert(ACCESS_CONTROL_MAX_AGE, self.max_age.clone());

        Some(response)
    }
}

#[cfg(test)]
#[path = "preflight_test.rs"]
mod preflight_test;
