//! Attendance API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};

use super::dto::{
    AttendanceDto, AttendanceInfoDto, SubmitAttendanceRequest, VolunteerMetricsDto,
    WorkshopAttendanceDto,
};
use crate::domain::DomainError;
use crate::interfaces::http::common::page_query::PaginationQuery;
use crate::interfaces::http::common::{
    csv_attachment, ApiError, ApiResponse, ApiResult, PageQuery, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::state::AppState;
use crate::shared::time::parse_date;

#[utoipa::path(
    get,
    path = "/api/v1/attendances/from/{date}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(
        ("date" = String, Path, description = "Cutoff date, yyyy-mm-dd"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Attendances since the date", body = PaginatedResponse<AttendanceInfoDto>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Missing attendanceModulePermission")
    )
)]
pub async fn list_attendances_from_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
    PageQuery(params): PageQuery,
) -> ApiResult<Json<PaginatedResponse<AttendanceInfoDto>>> {
    let since = parse_date(&date)?;
    let page = state.repos.attendances().fetch_from_date(&params, since).await?;
    Ok(Json(PaginatedResponse::from_result(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendances/download/from/{date}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Cutoff date, yyyy-mm-dd")),
    responses(
        (status = 200, description = "CSV attachment", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn download_attendances_from_date(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Response> {
    let since = parse_date(&date)?;
    let rows: Vec<AttendanceInfoDto> = state
        .repos
        .attendances()
        .find_from_date(since)
        .await?
        .into_iter()
        .map(AttendanceInfoDto::from)
        .collect();

    Ok(csv_attachment(&format!("attendances-{}.csv", date), &rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendances/metrics",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Participation per volunteer", body = PaginatedResponse<VolunteerMetricsDto>),
        (status = 403, description = "Missing manageVolunteerModulePermission")
    )
)]
pub async fn list_metrics(
    State(state): State<AppState>,
    PageQuery(params): PageQuery,
) -> ApiResult<Json<PaginatedResponse<VolunteerMetricsDto>>> {
    let page = state.repos.attendances().fetch_metrics(&params).await?;
    Ok(Json(PaginatedResponse::from_result(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendances/metrics/download",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "CSV attachment", content_type = "application/octet-stream")
    )
)]
pub async fn download_metrics(State(state): State<AppState>) -> ApiResult<Response> {
    let rows: Vec<VolunteerMetricsDto> = state
        .repos
        .attendances()
        .find_metrics()
        .await?
        .into_iter()
        .map(VolunteerMetricsDto::from)
        .collect();

    Ok(csv_attachment("attendance-metrics.csv", &rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/attendances/volunteer/{id}",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Workshops the volunteer attended", body = ApiResponse<Vec<WorkshopAttendanceDto>>)
    )
)]
pub async fn list_by_volunteer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<Vec<WorkshopAttendanceDto>>>> {
    let rows = state.repos.attendances().find_by_volunteer(id).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(WorkshopAttendanceDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/attendances",
    tag = "Attendances",
    security(("bearer_auth" = [])),
    request_body = SubmitAttendanceRequest,
    responses(
        (status = 201, description = "Attendance recorded", body = ApiResponse<AttendanceDto>),
        (status = 404, description = "WORKSHOP_NOT_FOUND"),
        (status = 409, description = "ATTENDANCE_ALREADY_SUBMITTED"),
        (status = 412, description = "VOLUNTEER_NOT_FOUND")
    )
)]
pub async fn submit_attendance(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitAttendanceRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AttendanceDto>>)> {
    let attendance = state
        .repos
        .attendances()
        .submit(request.into())
        .await
        .map_err(|e| match e {
            err @ DomainError::NotFound {
                entity: "Volunteer",
                ..
            } => ApiError::from(err).with_status(StatusCode::PRECONDITION_FAILED),
            other => ApiError::from(other),
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(attendance.into())),
    ))
}
