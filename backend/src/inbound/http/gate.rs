//! Request gate: presence check on the `token` query parameter.
//!
//! The gate never validates the token's value; it only requires the
//! parameter to be present and non-empty. It is a pass-through stub, not an
//! authentication layer, and is kept independent of the file-processing
//! routes.

use std::collections::HashMap;

use actix_web::{HttpResponse, get, web};

/// Allow the request iff a non-empty `token` query parameter is present.
///
/// # Examples
/// ```
/// use std::collections::HashMap;
///
/// use backend::inbound::http::gate::authorize;
///
/// assert!(!authorize(&HashMap::new()));
/// assert!(authorize(&HashMap::from([("token".to_owned(), "x".to_owned())])));
/// ```
pub fn authorize(parameters: &HashMap<String, String>) -> bool {
    parameters
        .get("token")
        .is_some_and(|value| !value.is_empty())
}

/// Gated route: 403 unless a non-empty `token` query parameter is present.
#[utoipa::path(
    get,
    path = "/api/testmiddleware/token",
    params(
        ("token" = Option<String>, Query, description = "Opaque token; only presence is checked")
    ),
    responses(
        (status = 200, description = "Token present"),
        (status = 403, description = "Token absent or empty")
    ),
    tags = ["gate"],
    operation_id = "gateToken"
)]
#[get("/token")]
pub async fn token(query: web::Query<HashMap<String, String>>) -> HttpResponse {
    if authorize(&query) {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::Forbidden().finish()
    }
}

/// Ungated counterpart that always allows the request.
#[utoipa::path(
    get,
    path = "/api/testmiddleware/notoken",
    responses((status = 200, description = "Always allowed")),
    tags = ["gate"],
    operation_id = "gateNoToken"
)]
#[get("/notoken")]
pub async fn no_token() -> HttpResponse {
    HttpResponse::Ok().finish()
}
