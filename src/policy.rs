use crate::custom_headers::CustomHeaders;
use crate::origin::{AllowOriginPolicy, deserialize_allow_origin};
use crate::secure::SecureOptions;
use serde::Deserialize;

/// Per-route header configuration. Read-only once handed to [`crate::Headers`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderPolicy {
    pub custom_request_headers: CustomHeaders,
    pub custom_response_headers: CustomHeaders,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    #[serde(deserialize_with = "deserialize_allow_origin")]
    pub allow_origin: Option<AllowOriginPolicy>,
    pub allow_credentials: bool,
    pub max_age: u64,
    pub add_vary_header: bool,
    #[serde(flatten)]
    pub secure: SecureOptions,
}

impl HeaderPolicy {
    pub fn has_custom_headers_defined(&self) -> bool {
        !self.custom_request_headers.is_empty() || !self.custom_response_headers.is_empty()
    }

    pub fn has_cors_headers_defined(&self) -> bool {
        self.allow_credentials
            || !self.allow_headers.is_empty()
            || !self.allow_methods.is_empty()
            || self.allow_origin.is_some()
            || !self.expose_headers.is_empty()
            || self.max_age != 0
            || self.add_vary_header
    }

    pub fn has_secure_headers_defined(&self) -> bool {
        self.secure.is_defined()
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
