//! Authentication API handlers

use axum::{extract::State, Extension, Json};

use super::dto::{AuthenticatedInfo, ChangePasswordRequest, LoginRequest, LoginResponse};
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedVolunteer;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<LoginResponse>>> {
    let auth = state.identity.login(&request.email, &request.password).await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: auth.token,
        token_type: auth.token_type,
        expires_in: auth.expires_in,
        volunteer: AuthenticatedInfo::new(auth.volunteer, &auth.permissions),
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current volunteer", body = ApiResponse<AuthenticatedInfo>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn get_current_volunteer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
) -> ApiResult<Json<ApiResponse<AuthenticatedInfo>>> {
    let volunteer = state
        .repos
        .volunteers()
        .find_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Volunteer", "id", caller.id))?;

    Ok(Json(ApiResponse::success(AuthenticatedInfo::new(
        volunteer,
        &caller.permissions,
    ))))
}

#[utoipa::path(
    put,
    path = "/api/v1/auth/password",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed"),
        (status = 401, description = "Current password does not match"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<ApiResponse<bool>>> {
    state
        .identity
        .change_password(
            &caller.email,
            request.current_password.as_deref(),
            &request.new_password,
        )
        .await?;
    Ok(Json(ApiResponse::success(true)))
}
