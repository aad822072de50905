use crate::result::ValidationError;
use http::{HeaderMap, HeaderName, HeaderValue};
use indexmap::IndexMap;
use serde::Deserialize;
use std::ops::Deref;

/// Configured `name -> value` pairs. An empty value deletes the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CustomHeaders(IndexMap<String, String>);

impl CustomHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.0.insert(name.into(), value.into());
    }
}

impl Deref for CustomHeaders {
    type Target = IndexMap<String, String>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<N, V> FromIterator<(N, V)> for CustomHeaders
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
enum HeaderRule {
    Set(HeaderName, HeaderValue),
    Remove(HeaderName),
}

/// [`CustomHeaders`] parsed into wire types, applied in configuration order.
#[derive(Debug, Clone, Default)]
pub(crate) struct HeaderRules {
    rules: Vec<HeaderRule>,
}

impl HeaderRules {
    pub(crate) fn compile(headers: &CustomHeaders) -> Result<Self, ValidationError> {
        let mut rules = Vec::with_capacity(headers.len());
        for (name, value) in headers.iter() {
            let header_name = parse_name(name)?;
            if value.is_empty() {
                rules.push(HeaderRule::Remove(header_name));
            } else {
                rules.push(HeaderRule::Set(header_name, parse_value(name, value)?));
            }
        }
        Ok(Self { rules })
    }

    pub(crate) fn apply(&self, headers: &mut HeaderMap) {
        for rule in &self.rules {
            match rule {
                HeaderRule::Set(name, value) => {
                    headers.insert(name.clone(), value.clone());
                }
                HeaderRule::Remove(name) => {
                    headers.remove(name);
                }
            }
        }
    }
}

pub(crate) fn parse_name(name: &str) -> Result<HeaderName, ValidationError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|_| ValidationError::InvalidHeaderName {
        name: name.to_string(),
    })
}

pub(crate) fn parse_value(name: &str, value: &str) -> Result<HeaderValue, ValidationError> {
    HeaderValue::from_str(value).map_err(|_| ValidationError::InvalidHeaderValue {
        name: name.to_string(),
    })
}

/// Comma-joins a token list into one header value; `None` when the list is empty.
pub(crate) fn join_values(
    name: &str,
    values: &[String],
) -> Result<Option<HeaderValue>, ValidationError> {
    if values.is_empty() {
        return Ok(None);
    }
    parse_value(name, &values.join(",")).map(Some)
}

#[cfg(test)]
#[path = "custom_headers_test.rs"]
mod custom_headers_test;
