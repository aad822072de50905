pub mod constants;
mod context;
mod custom_headers;
mod middleware;
mod origin;
mod policy;
mod preflight;
mod request;
mod response;
mod result;
mod secure;

pub use context::RequestContext;
pub use custom_headers::CustomHeaders;
pub use middleware::Headers;
pub use origin::{AllowOriginPolicy, resolve_allow_origin};
pub use policy::HeaderPolicy;
pub use result::{HeadersError, RequestDecision, ValidationError};
pub use secure::{NoSecureHeaders, SecureError, SecureHeaders, SecureOptions, SecureVerdict};
