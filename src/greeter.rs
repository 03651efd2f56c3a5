// ABOUTME: The /v1/greeter handler shared by the example binaries.
// ABOUTME: Greets the caller by the `name` query parameter, empty when omitted.

use axum::Json;
use axum::extract::Query;
use serde::{Deserialize, Serialize};

/// Query parameters for the greeter route.
#[derive(Debug, Deserialize)]
pub struct GreetParams {
    pub name: Option<String>,
}

/// Response body of the greeter route.
#[derive(Debug, Serialize)]
pub struct GreetResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

/// GET /v1/greeter - Greet the caller by name.
pub async fn greet(Query(params): Query<GreetParams>) -> Json<GreetResponse> {
    let name = params.name.unwrap_or_default();
    Json(GreetResponse {
        message: format!("Hello {}!", name),
    })
}
