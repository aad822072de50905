#![allow(dead_code)]

use bunner_headers_rs::constants::method;
use bunner_headers_rs::{AllowOriginPolicy, HeaderPolicy, Headers, NoSecureHeaders};
use http::{HeaderValue, Method, Request, Response};

#[derive(Default)]
pub struct PolicyBuilder {
    policy: HeaderPolicy,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_header(mut self, name: &str, value: &str) -> Self {
        self.policy.custom_request_headers.insert(name, value);
        self
    }

    pub fn response_header(mut self, name: &str, value: &str) -> Self {
        self.policy.custom_response_headers.insert(name, value);
        self
    }

    pub fn allow_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.allow_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.allow_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn expose_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.expose_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_origin(mut self, value: &str) -> Self {
        self.policy.allow_origin = AllowOriginPolicy::from_config(value);
        self
    }

    pub fn credentials(mut self, enabled: bool) -> Self {
        self.policy.allow_credentials = enabled;
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.policy.max_age = seconds;
        self
    }

    pub fn vary(mut self, enabled: bool) -> Self {
        self.policy.add_vary_header = enabled;
        self
    }

    pub fn into_policy(self) -> HeaderPolicy {
        self.policy
    }

    pub fn build(self) -> Headers {
        Headers::<NoSecureHeaders>::new(self.policy).expect("valid headers configuration")
    }
}

pub struct RequestBuilder {
    method: Method,
    headers: Vec<(String, String)>,
}

impl RequestBuilder {
    pub fn new(method: &str) -> Self {
        Self {
            method: Method::from_bytes(method.as_bytes()).expect("valid method"),
            headers: Vec::new(),
        }
    }

    pub fn origin(self, origin: &str) -> Self {
        self.header("Origin", origin)
    }

    pub fn request_method(self, method: &str) -> Self {
        self.header("Access-Control-Request-Method", method)
    }

    pub fn request_headers(self, headers: &str) -> Self {
        self.header("Access-Control-Request-Headers", headers)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Request<()> {
        let mut builder = Request::builder()
            .method(self.method)
            .uri("http://proxy.test/api");
        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }
        builder.body(()).expect("valid request")
    }

    /// Runs the chain against a backend that echoes nothing and sets `backend_headers`.
    pub fn serve(self, headers: &Headers, backend_headers: &[(&str, &str)]) -> Response<String> {
        self.serve_with(headers, |_| {
            let mut response = Response::new(String::from("backend"));
            for (name, value) in backend_headers {
                response.headers_mut().append(
                    http::HeaderName::from_bytes(name.as_bytes()).expect("valid name"),
                    HeaderValue::from_str(value).expect("valid value"),
                );
            }
            response
        })
    }

    pub fn serve_with<F>(self, headers: &Headers, backend: F) -> Response<String>
    where
        F: FnOnce(Request<()>) -> Response<String>,
    {
        headers
            .serve(self.build(), backend)
            .expect("header chain should not fail")
    }
}

pub fn policy() -> PolicyBuilder {
    PolicyBuilder::new()
}

pub fn request(method: &str) -> RequestBuilder {
    RequestBuilder::new(method)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}
