// ABOUTME: HTTP Basic Auth middleware for stagehand web entries.
// ABOUTME: Checks the Authorization header against an account map and challenges with the configured realm.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use subtle::ConstantTimeEq;
use tower::{Layer, Service};

/// Build a Basic Auth layer from an account map and a realm. The layer
/// guards every route of the router it is applied to.
pub fn basic_auth(accounts: HashMap<String, String>, realm: &str) -> BasicAuthLayer {
    BasicAuthLayer::new(accounts, realm)
}

/// Decide whether the supplied credentials match an account. Usernames are
/// exact map keys; passwords are compared in constant time.
pub fn verify_credentials(
    accounts: &HashMap<String, String>,
    username: &str,
    password: &str,
) -> bool {
    match accounts.get(username) {
        Some(expected) => expected.as_bytes().ct_eq(password.as_bytes()).into(),
        None => false,
    }
}

/// A tower Layer that applies HTTP Basic Authentication.
#[derive(Clone)]
pub struct BasicAuthLayer {
    accounts: Arc<HashMap<String, String>>,
    realm: Arc<str>,
}

impl BasicAuthLayer {
    /// Create a new BasicAuthLayer with the expected accounts and realm.
    pub fn new(accounts: HashMap<String, String>, realm: &str) -> Self {
        Self {
            accounts: Arc::new(accounts),
            realm: Arc::from(realm),
        }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthMiddleware {
            inner,
            accounts: Arc::clone(&self.accounts),
            realm: Arc::clone(&self.realm),
        }
    }
}

/// The middleware service that validates credentials on each request.
#[derive(Clone)]
pub struct BasicAuthMiddleware<S> {
    inner: S,
    accounts: Arc<HashMap<String, String>>,
    realm: Arc<str>,
}

impl<S> Service<Request<Body>> for BasicAuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(decode_basic)
            .map(|(user, pass)| verify_credentials(&self.accounts, &user, &pass))
            .unwrap_or(false);

        if authorized {
            let mut inner = self.inner.clone();
            Box::pin(async move { inner.call(req).await })
        } else {
            let realm = Arc::clone(&self.realm);
            Box::pin(async move { Ok(challenge(&realm)) })
        }
    }
}

/// Decode an `Authorization: Basic ...` header value into a
/// (username, password) pair. Any malformed input yields None.
fn decode_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

fn challenge(realm: &str) -> Response<Body> {
    let body = serde_json::json!({ "error": "unauthorized" });
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header(
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{}\"", realm),
        )
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}
