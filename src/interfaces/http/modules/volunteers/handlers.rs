//! Volunteer API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Extension, Json,
};
use tracing::info;

use super::dto::{
    CreateVolunteerRequest, HoursQuery, PostHoursRequest, UpdateVolunteerRequest, VolunteerDto,
    VolunteerHoursDto,
};
use crate::domain::Permission;
use crate::interfaces::http::common::page_query::PaginationQuery;
use crate::interfaces::http::common::{
    csv_attachment, ApiError, ApiResponse, ApiResult, PageQuery, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedVolunteer;
use crate::interfaces::http::state::AppState;
use crate::shared::time::parse_date;

#[utoipa::path(
    post,
    path = "/api/v1/volunteers",
    tag = "Volunteers",
    request_body = CreateVolunteerRequest,
    responses(
        (status = 201, description = "Volunteer registered", body = ApiResponse<VolunteerDto>),
        (status = 409, description = "VOLUNTEER_ALREADY_EXISTS"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_volunteer(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateVolunteerRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VolunteerDto>>)> {
    let (new_volunteer, password) = request.into_parts();
    let volunteer = state.repos.volunteers().create(new_volunteer).await?;

    if let Some(password) = password {
        state
            .identity
            .set_password(&volunteer.email, &password)
            .await?;
    }

    info!(volunteer_id = volunteer.id, "Volunteer registered");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(VolunteerDto::from(volunteer))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every volunteer", body = ApiResponse<Vec<VolunteerDto>>),
        (status = 403, description = "Missing manageVolunteerModulePermission")
    )
)]
pub async fn list_volunteers(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<VolunteerDto>>>> {
    let volunteers = state.repos.volunteers().find_all().await?;
    Ok(Json(ApiResponse::success(
        volunteers.into_iter().map(VolunteerDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/from/{date}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(
        ("date" = String, Path, description = "Cutoff date, yyyy-mm-dd"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Volunteers created since the date", body = PaginatedResponse<VolunteerDto>),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn list_volunteers_from_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    PageQuery(params): PageQuery,
) -> ApiResult<Json<PaginatedResponse<VolunteerDto>>> {
    let since = parse_date(&date)?;
    let page = state.repos.volunteers().fetch_from_date(&params, since).await?;
    Ok(Json(PaginatedResponse::from_result(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/download/from/{date}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Cutoff date, yyyy-mm-dd")),
    responses(
        (status = 200, description = "CSV attachment", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn download_volunteers_from_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Response> {
    let since = parse_date(&date)?;
    let rows: Vec<VolunteerDto> = state
        .repos
        .volunteers()
        .find_created_since(since)
        .await?
        .into_iter()
        .map(VolunteerDto::from)
        .collect();

    Ok(csv_attachment(&format!("volunteers-{}.csv", date), &rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/id/{id}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Volunteer", body = ApiResponse<VolunteerDto>),
        (status = 404, description = "VOLUNTEER_NOT_FOUND")
    )
)]
pub async fn get_volunteer_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<VolunteerDto>>> {
    let volunteer = state
        .repos
        .volunteers()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Volunteer", "id", id))?;
    Ok(Json(ApiResponse::success(volunteer.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/email/{email}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Volunteer email")),
    responses(
        (status = 200, description = "Volunteer", body = ApiResponse<VolunteerDto>),
        (status = 403, description = "Another volunteer's record"),
        (status = 404, description = "VOLUNTEER_NOT_FOUND")
    )
)]
pub async fn get_volunteer_by_email(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(email): Path<String>,
) -> ApiResult<Json<ApiResponse<VolunteerDto>>> {
    caller.require_self_or(&email, Permission::ManageVolunteer)?;

    let volunteer = state
        .repos
        .volunteers()
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found("Volunteer", "email", &email))?;
    Ok(Json(ApiResponse::success(volunteer.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/volunteers/email/{email}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Volunteer email")),
    request_body = UpdateVolunteerRequest,
    responses(
        (status = 200, description = "Updated volunteer", body = ApiResponse<VolunteerDto>),
        (status = 403, description = "Another volunteer's record"),
        (status = 404, description = "VOLUNTEER_NOT_FOUND"),
        (status = 409, description = "VOLUNTEER_NOT_UPDATED")
    )
)]
pub async fn update_volunteer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(email): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateVolunteerRequest>,
) -> ApiResult<Json<ApiResponse<VolunteerDto>>> {
    caller.require_self_or(&email, Permission::ManageVolunteer)?;
    if request.authorization.is_some() {
        caller.require(Permission::ManageVolunteer)?;
    }

    let (changes, has_class) = request.into_parts();
    let volunteer = state
        .repos
        .volunteers()
        .update(&email, changes, has_class)
        .await?
        .ok_or_else(|| ApiError::not_found("Volunteer", "email", &email))?;

    Ok(Json(ApiResponse::success(volunteer.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/volunteers/email/{email}",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Volunteer email")),
    responses(
        (status = 200, description = "Volunteer deleted"),
        (status = 403, description = "Missing manageVolunteerModulePermission"),
        (status = 404, description = "VOLUNTEER_NOT_FOUND")
    )
)]
pub async fn delete_volunteer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(email): Path<String>,
) -> ApiResult<Json<ApiResponse<bool>>> {
    caller.require(Permission::ManageVolunteer)?;

    if !state.repos.volunteers().delete_by_email(&email).await? {
        return Err(ApiError::not_found("Volunteer", "email", &email));
    }
    info!(email = %email, deleted_by = caller.id, "Volunteer deleted");
    Ok(Json(ApiResponse::success(true)))
}

#[utoipa::path(
    post,
    path = "/api/v1/volunteers/hours",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    request_body = PostHoursRequest,
    responses(
        (status = 201, description = "Hours recorded", body = ApiResponse<VolunteerHoursDto>),
        (status = 422, description = "Validation error")
    )
)]
pub async fn post_hours(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PostHoursRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<VolunteerHoursDto>>)> {
    let volunteer_id = request.volunteer_id;
    if state.repos.volunteers().find_by_id(volunteer_id).await?.is_none() {
        return Err(ApiError::not_found("Volunteer", "id", volunteer_id));
    }

    let hours = state.repos.volunteers().post_hours(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(hours.into())),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/volunteers/{id}/hours",
    tag = "Volunteers",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer ID"), HoursQuery),
    responses(
        (status = 200, description = "Hours logged in the month, or null", body = ApiResponse<VolunteerHoursDto>),
        (status = 400, description = "Invalid month")
    )
)]
pub async fn get_hours(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<HoursQuery>,
) -> ApiResult<Json<ApiResponse<Option<VolunteerHoursDto>>>> {
    let hours = state
        .repos
        .volunteers()
        .find_hours_by_month(id, query.month, query.year)
        .await?;
    Ok(Json(ApiResponse::success(hours.map(VolunteerHoursDto::from))))
}
