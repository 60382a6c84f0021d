use axum::{http::HeaderMap, response::Json, Extension};
use tracing::{error, info};

use crate::api::rest::dto::{self, SummaryResponseDto, UserDto, UserListDto};
use crate::api::rest::error::{request_id_from_headers, ApiError};
use crate::domain::service::SummaryService;

/// Generic message returned for any fetch/processing failure.
const FETCH_FAILED: &str = "Failed to fetch or process user data";

/// Department summary keyed by department name
pub async fn get_summary(
    Extension(svc): Extension<std::sync::Arc<SummaryService>>,
    headers: HeaderMap,
) -> Result<Json<SummaryResponseDto>, ApiError> {
    info!("Building department summary");

    match svc.department_summary().await {
        Ok(summary) => Ok(Json(dto::summary_response(summary))),
        Err(e) => {
            error!("Failed to build department summary: {}", e);
            Err(ApiError::internal(
                FETCH_FAILED,
                request_id_from_headers(&headers),
            ))
        }
    }
}

/// List the fetched, department-enriched user records
pub async fn list_users(
    Extension(svc): Extension<std::sync::Arc<SummaryService>>,
    headers: HeaderMap,
) -> Result<Json<UserListDto>, ApiError> {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => {
            let dto_users: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
            let response = UserListDto {
                total: dto_users.len(),
                users: dto_users,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(ApiError::internal(
                FETCH_FAILED,
                request_id_from_headers(&headers),
            ))
        }
    }
}
