use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use bunner_headers_rs::{
    AllowOriginPolicy, HeaderPolicy, Headers, HeadersError, RequestDecision, SecureError,
    SecureHeaders, SecureOptions, SecureVerdict,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Minimal security engine: host allow-list, a few static response headers and
/// HSTS for requests that arrived over TLS.
struct StaticSecureHeaders {
    allowed_hosts: Vec<String>,
    frame_deny: bool,
    content_type_nosniff: bool,
    sts: Option<HeaderValue>,
}

impl SecureHeaders for StaticSecureHeaders {
    fn from_options(options: &SecureOptions) -> Self {
        let sts = (options.sts_seconds > 0).then(|| {
            let mut value = format!("max-age={}", options.sts_seconds);
            if options.sts_include_subdomains {
                value.push_str("; includeSubDomains");
            }
            HeaderValue::from_str(&value).unwrap_or(HeaderValue::from_static("max-age=0"))
        });

        Self {
            allowed_hosts: options.allowed_hosts.clone(),
            frame_deny: options.frame_deny,
            content_type_nosniff: options.content_type_nosniff,
            sts,
        }
    }

    fn process_request(&self, request: &Parts) -> Result<SecureVerdict, SecureError> {
        let host = request
            .headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !self.allowed_hosts.is_empty()
            && !self.allowed_hosts.iter().any(|allowed| allowed == host)
        {
            let response = axum::http::Response::builder()
                .status(StatusCode::BAD_REQUEST)
                .body(())?;
            return Ok(SecureVerdict::Respond(response));
        }

        let mut pending = HeaderMap::new();
        if let Some(sts) = &self.sts
            && is_tls(request)
        {
            pending.insert(header::STRICT_TRANSPORT_SECURITY, sts.clone());
        }
        Ok(SecureVerdict::Continue(pending))
    }

    fn modify_response(
        &self,
        pending: &HeaderMap,
        headers: &mut HeaderMap,
    ) -> Result<(), SecureError> {
        for (name, value) in pending {
            headers.insert(name.clone(), value.clone());
        }
        if self.frame_deny {
            headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
        }
        if self.content_type_nosniff {
            headers.insert(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            );
        }
        Ok(())
    }
}

fn is_tls(request: &Parts) -> bool {
    request.uri.scheme_str() == Some("https")
        || request
            .headers
            .get("x-forwarded-proto")
            .is_some_and(|value| value == "https")
}

type SharedHeaders = Arc<Headers<StaticSecureHeaders>>;

async fn headers_middleware(
    State(headers): State<SharedHeaders>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    match headers.on_request(&mut parts) {
        Ok(RequestDecision::Forward(ctx)) => {
            let mut response = next.run(Request::from_parts(parts, body)).await;
            match headers.on_response(&ctx, response.headers_mut()) {
                Ok(()) => response,
                Err(err) => internal_error(err),
            }
        }
        Ok(RequestDecision::Preflight(response) | RequestDecision::Intercepted(response)) => {
            response.map(|()| Body::empty())
        }
        Err(err) => internal_error(err),
    }
}

fn internal_error(err: HeadersError) -> Response {
    tracing::error!(error = %err, "headers middleware failed");
    let mut response = Response::new(Body::from("headers middleware error"));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn build_policy() -> HeaderPolicy {
    HeaderPolicy {
        custom_request_headers: [("X-Script-Name", "demo"), ("X-Forwarded-Host", "")]
            .into_iter()
            .collect(),
        custom_response_headers: [("X-Served-By", "bunner-headers")]
            .into_iter()
            .collect(),
        allow_methods: vec!["GET".into(), "POST".into(), "OPTIONS".into()],
        allow_headers: vec!["Content-Type".into(), "X-Requested-With".into()],
        expose_headers: vec!["X-Served-By".into()],
        allow_origin: Some(AllowOriginPolicy::OriginListOrNull),
        allow_credentials: true,
        max_age: 600,
        add_vary_header: true,
        secure: SecureOptions {
            frame_deny: true,
            content_type_nosniff: true,
            sts_seconds: 31_536_000,
            sts_include_subdomains: true,
            ..SecureOptions::default()
        },
    }
}

async fn root() -> &'static str {
    "bunner-headers axum demo"
}

async fn data(headers: HeaderMap) -> String {
    let script = headers
        .get("x-script-name")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("<missing>");
    format!("{{\"scriptName\":\"{script}\"}}")
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let headers: SharedHeaders =
        Arc::new(Headers::new(build_policy()).expect("valid headers configuration"));

    let app = Router::new()
        .route("/", get(root))
        .route("/api/data", get(data))
        .layer(middleware::from_fn_with_state(headers, headers_middleware));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("failed to bind listener");
    tracing::info!("listening on http://127.0.0.1:3000");

    axum::serve(listener, app).await.expect("server error");
}
