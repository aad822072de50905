use crate::constants::header;
use crate::context::RequestContext;
use crate::custom_headers::{HeaderRules, join_values};
use crate::origin::{AllowOriginPolicy, resolve_allow_origin};
use crate::policy::HeaderPolicy;
use crate::result::{HeadersError, ValidationError};
use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
    VARY,
};
use http::{HeaderMap, HeaderValue};

/// Applies custom response headers and the non-preflight CORS headers to
/// backend responses.
#[derive(Debug, Clone)]
pub(crate) struct ResponseHeaderRewriter {
    rules: HeaderRules,
    allow_origin: Option<AllowOriginPolicy>,
    add_vary_header: bool,
    allow_credentials: bool,
    expose_headers: Option<HeaderValue>,
}

impl ResponseHeaderRewriter {
    pub(crate) fn new(policy: &HeaderPolicy) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: HeaderRules::compile(&policy.custom_response_headers)?,
            allow_origin: policy.allow_origin.clone(),
            add_vary_header: policy.add_vary_header,
            allow_credentials: policy.allow_credentials,
            expose_headers: join_values(
                header::ACCESS_CONTROL_EXPOSE_HEADERS,
                &policy.expose_headers,
            )?,
        })
    }

    pub(crate) fn rewrite(
        &self,
        ctx: &RequestContext,
        headers: &mut HeaderMap,
    ) -> Result<(), HeadersError> {
        self.rules.apply(headers);

        if let Some(value) = resolve_allow_origin(self.allow_origin.as_ref(), &ctx.origin) {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, value);
            if self.add_vary_header {
                append_vary(headers, header::ORIGIN);
            }
        }

        if self.allow_credentials {
            headers.insert(
                ACCESS_CONTROL_ALLOW_CREDENTIALS,
                HeaderValue::from_static("true"),
            );
        }

        if let Some(value) = &self.expose_headers {
            headers.insert(ACCESS_CONTROL_EXPOSE_HEADERS, value.clone());
        }

        Ok(())
    }
}

/// Appends `entry` to `Vary`, folding repeated `Vary` fields into a single
/// comma-joined value without added whitespace.
pub(crate) fn append_vary(headers: &mut HeaderMap, entry: &str) {
    let mut merged: Vec<u8> = Vec::new();
    for existing in headers.get_all(VARY) {
        let bytes = existing.as_bytes();
        if bytes.is_empty() {
            continue;
        }
        if !merged.is_empty() {
            merged.push(b',');
        }
        merged.extend_from_slice(bytes);
    }
    if !merged.is_empty() {
        merged.push(b',');
    }
    merged.extend_from_slice(entry.as_bytes());

    if let Ok(value) = HeaderValue::from_bytes(&merged) {
        headers.insert(VARY, value);
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;
