use http::HeaderValue;
use serde::{Deserialize, Deserializer};

const WILDCARD: &str = "*";
const ORIGIN_LIST_OR_NULL: &str = "origin-list-or-null";
const NULL_ORIGIN: &str = "null";

/// Configured behaviour for the `Access-Control-Allow-Origin` response header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowOriginPolicy {
    /// `"*"`: always emit the wildcard.
    WildcardAny,
    /// `"origin-list-or-null"`: reflect the request `Origin`, or `null` when absent.
    OriginListOrNull,
    /// Any other configured value. The allow-origin header is never emitted.
    Unsupported(String),
}

impl AllowOriginPolicy {
    /// Maps a configured value onto a policy. An empty value means "not configured".
    pub fn from_config(value: &str) -> Option<Self> {
        match value {
            "" => None,
            WILDCARD => Some(Self::WildcardAny),
            ORIGIN_LIST_OR_NULL => Some(Self::OriginListOrNull),
            other => Some(Self::Unsupported(other.to_string())),
        }
    }

    /// Resolves the value to emit for a request carrying `origin` (empty when absent).
    /// A present origin is reflected byte for byte.
    ///
    /// `None` suppresses the header entirely.
    pub fn resolve(&self, origin: &HeaderValue) -> Option<HeaderValue> {
        match self {
            Self::OriginListOrNull if origin.is_empty() => {
                Some(HeaderValue::from_static(NULL_ORIGIN))
            }
            Self::OriginListOrNull => Some(origin.clone()),
            Self::WildcardAny => Some(HeaderValue::from_static(WILDCARD)),
            Self::Unsupported(_) => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

pub fn resolve_allow_origin(
    policy: Option<&AllowOriginPolicy>,
    origin: &HeaderValue,
) -> Option<HeaderValue> {
    policy.and_then(|policy| policy.resolve(origin))
}

pub(crate) fn deserialize_allow_origin<'de, D>(
    deserializer: D,
) -> Result<Option<AllowOriginPolicy>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(AllowOriginPolicy::from_config))
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
