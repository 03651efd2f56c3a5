// ABOUTME: Embedded static asset serving for stagehand web entries.
// ABOUTME: Resolves request paths inside an include_dir bundle compiled into the binary.

use axum::Router;
use axum::body::Body;
use axum::extract::Path;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use include_dir::{Dir, File};

/// Build a router serving the files of an embedded asset bundle. The web
/// entry nests this under its configured prefix; embedding happens once at
/// compile time, so mounting repeatedly serves the same immutable bundle.
pub fn asset_routes(bundle: &'static Dir<'static>) -> Router {
    Router::new()
        .route("/", get(move || async move { serve_asset(bundle, String::new()) }))
        .route(
            "/{*path}",
            get(move |Path(path): Path<String>| async move { serve_asset(bundle, path) }),
        )
}

fn serve_asset(bundle: &'static Dir<'static>, raw: String) -> Response {
    match resolve(bundle, &raw) {
        Some(file) => {
            let mime = mime_guess::from_path(file.path()).first_or_octet_stream();
            let mut response = Response::new(Body::from(file.contents()));
            if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
                response.headers_mut().insert(header::CONTENT_TYPE, value);
            }
            response.headers_mut().insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=3600"),
            );
            response
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Resolve a request path to a file in the bundle. The bare prefix maps to
/// index.html; directory requests and paths with a `..` component resolve
/// to nothing.
fn resolve(bundle: &'static Dir<'static>, raw: &str) -> Option<&'static File<'static>> {
    let mut path = raw.trim_start_matches('/');
    if path.is_empty() {
        path = "index.html";
    }
    if path.ends_with('/') || path.split('/').any(|part| part == "..") {
        return None;
    }
    bundle.get_file(path)
}
