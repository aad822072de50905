use crate::custom_headers::HeaderRules;
use crate::policy::HeaderPolicy;
use crate::result::ValidationError;
use http::HeaderMap;

/// Applies `custom_request_headers` to inbound requests.
#[derive(Debug, Clone)]
pub(crate) struct RequestHeaderRewriter {
    rules: HeaderRules,
}

impl RequestHeaderRewriter {
    pub(crate) fn new(policy: &HeaderPolicy) -> Result<Self, ValidationError> {
        Ok(Self {
            rules: HeaderRules::compile(&policy.custom_request_headers)?,
        })
    }

    pub(crate) fn rewrite(&self, headers: &mut HeaderMap) {
        self.rules.apply(headers);
    }
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
