//! File-processing handlers.
//!
//! ```text
//! POST /api/file/analyze  raw XML bytes -> rate statistics JSON
//! POST /api/file/adduser  {"content": base64 XML, "users": [...]} -> merged XML
//! ```

use actix_web::{HttpResponse, post, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{NewUser, RateStatistics, decode_collection};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/file/adduser`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddUsersRequest {
    /// Base64-encoded bytes of the existing `UserCollection` document.
    pub content: String,
    /// Users to append, in the order they should appear.
    pub users: Vec<NewUserDto>,
}

/// One user entry on the adduser path.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUserDto {
    /// Identifier used for persistence only; never emitted in XML output.
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub rate: i32,
}

impl From<NewUserDto> for NewUser {
    fn from(value: NewUserDto) -> Self {
        Self {
            id: value.id,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            rate: value.rate,
        }
    }
}

/// Compute rate statistics over an uploaded collection document.
#[utoipa::path(
    post,
    path = "/api/file/analyze",
    request_body(
        content = String,
        content_type = "application/octet-stream",
        description = "UTF-8 bytes of a UserCollection XML document"
    ),
    responses(
        (status = 200, description = "Rate statistics", body = RateStatistics),
        (status = 400, description = "The document holds no users", body = ApiError),
        (status = 500, description = "The document failed to parse", body = ApiError)
    ),
    tags = ["file"],
    operation_id = "analyzeFile"
)]
#[post("/analyze")]
pub async fn analyze(body: web::Bytes) -> ApiResult<web::Json<RateStatistics>> {
    // Lenient byte handling: invalid UTF-8 is replaced, not rejected.
    let document = String::from_utf8_lossy(&body);
    let records = decode_collection(&document)?;
    let statistics = RateStatistics::compute(&records)?;
    debug!(records = records.len(), "analysed user collection");
    Ok(web::Json(statistics))
}

/// Append users to an existing collection document and return the merge.
#[utoipa::path(
    post,
    path = "/api/file/adduser",
    request_body = AddUsersRequest,
    responses(
        (
            status = 200,
            description = "Merged collection document",
            body = String,
            content_type = "application/xml"
        ),
        (status = 500, description = "Decoding, parsing, or persistence failed", body = ApiError)
    ),
    tags = ["file"],
    operation_id = "addUsersToFile"
)]
#[post("/adduser")]
pub async fn add_users(
    state: web::Data<HttpState>,
    payload: web::Json<AddUsersRequest>,
) -> ApiResult<HttpResponse> {
    let AddUsersRequest { content, users } = payload.into_inner();

    let bytes = BASE64
        .decode(content)
        .map_err(|err| ApiError::internal(format!("content is not valid base64: {err}")))?;
    let existing_document = String::from_utf8_lossy(&bytes).into_owned();

    let new_users: Vec<NewUser> = users.into_iter().map(NewUser::from).collect();
    let merged = state.merge.merge(&existing_document, &new_users).await?;

    debug!(appended = new_users.len(), "merged users into collection");
    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .body(merged))
}
