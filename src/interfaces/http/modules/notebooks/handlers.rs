//! Notebook API handlers
//!
//! Reservation and evaluation go through `NotebookService`; listings read
//! the repository directly.

use axum::{
    extract::{Path, State},
    response::Response,
    Extension, Json,
};

use super::dto::{
    EvaluatedCountDto, EvaluationRequest, EvaluationRowDto, NotebookDto, ReflectionDto,
    UpdateNotebookRequest,
};
use crate::domain::{Notebook, Permission};
use crate::interfaces::http::common::page_query::PaginationQuery;
use crate::interfaces::http::common::{
    csv_attachment, ApiError, ApiResponse, ApiResult, PageQuery, PaginatedResponse,
    ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedVolunteer;
use crate::interfaces::http::state::AppState;
use crate::shared::time::parse_date;

/// Only the volunteer holding a notebook, or a notebook manager, may act on
/// it. An evaluated notebook keeps its evaluator as holder.
fn require_holder(caller: &AuthenticatedVolunteer, notebook: &Notebook) -> Result<(), ApiError> {
    if notebook.volunteer_id == Some(caller.id) {
        return Ok(());
    }
    caller.require(Permission::Notebook)
}

async fn load(state: &AppState, id: i32) -> ApiResult<Notebook> {
    state
        .repos
        .notebooks()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Notebook", "id", id))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/available",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Approved notebooks nobody reserved yet", body = ApiResponse<Vec<NotebookDto>>)
    )
)]
pub async fn list_available(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<NotebookDto>>>> {
    let notebooks = state.repos.notebooks().find_available().await?;
    Ok(Json(ApiResponse::success(
        notebooks.into_iter().map(NotebookDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/evaluations",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "Evaluation listing; `classes` filters by class id", body = PaginatedResponse<EvaluationRowDto>),
        (status = 403, description = "Missing notebookModulePermission")
    )
)]
pub async fn list_evaluations(
    State(state): State<AppState>,
    PageQuery(params): PageQuery,
) -> ApiResult<Json<PaginatedResponse<EvaluationRowDto>>> {
    let page = state.repos.notebooks().fetch_evaluations(&params).await?;
    Ok(Json(PaginatedResponse::from_result(page)))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/evaluations/download",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(PaginationQuery),
    responses(
        (status = 200, description = "CSV attachment", content_type = "application/octet-stream")
    )
)]
pub async fn download_evaluations(
    State(state): State<AppState>,
    PageQuery(params): PageQuery,
) -> ApiResult<Response> {
    let rows: Vec<EvaluationRowDto> = state
        .repos
        .notebooks()
        .find_evaluations(&params)
        .await?
        .into_iter()
        .map(EvaluationRowDto::from)
        .collect();

    Ok(csv_attachment("notebook-evaluations.csv", &rows))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/reflections/{date}",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("date" = String, Path, description = "Evaluated after, yyyy-mm-dd")),
    responses(
        (status = 200, description = "Relevant content of recent evaluations", body = ApiResponse<Vec<ReflectionDto>>),
        (status = 400, description = "Invalid date")
    )
)]
pub async fn list_reflections(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<ApiResponse<Vec<ReflectionDto>>>> {
    let since = parse_date(&date)?;
    let reflections = state.repos.notebooks().find_reflections(since).await?;
    Ok(Json(ApiResponse::success(
        reflections.into_iter().map(ReflectionDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/volunteer/{id}/reserved",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Notebooks the volunteer holds", body = ApiResponse<Vec<NotebookDto>>)
    )
)]
pub async fn list_reserved_by_volunteer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<Vec<NotebookDto>>>> {
    let notebooks = state.repos.notebooks().find_reserved_by_volunteer(id).await?;
    Ok(Json(ApiResponse::success(
        notebooks.into_iter().map(NotebookDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/volunteer/{id}/evaluated-count",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Volunteer ID")),
    responses(
        (status = 200, description = "Notebooks the volunteer evaluated", body = ApiResponse<EvaluatedCountDto>)
    )
)]
pub async fn count_evaluated(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<EvaluatedCountDto>>> {
    let count = state.repos.notebooks().count_evaluated_by_volunteer(id).await?;
    Ok(Json(ApiResponse::success(EvaluatedCountDto { count })))
}

#[utoipa::path(
    get,
    path = "/api/v1/notebooks/{id}",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notebook ID")),
    responses(
        (status = 200, description = "Notebook", body = ApiResponse<NotebookDto>),
        (status = 404, description = "NOTEBOOK_NOT_FOUND")
    )
)]
pub async fn get_notebook(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<NotebookDto>>> {
    let notebook = load(&state, id).await?;
    Ok(Json(ApiResponse::success(notebook.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/notebooks/{id}",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notebook ID")),
    request_body = UpdateNotebookRequest,
    responses(
        (status = 200, description = "Updated notebook", body = ApiResponse<NotebookDto>),
        (status = 403, description = "Missing notebookModulePermission"),
        (status = 404, description = "NOTEBOOK_NOT_FOUND")
    )
)]
pub async fn update_notebook(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdateNotebookRequest>,
) -> ApiResult<Json<ApiResponse<NotebookDto>>> {
    caller.require(Permission::Notebook)?;

    let notebook = state
        .repos
        .notebooks()
        .update(id, request.into())
        .await?
        .ok_or_else(|| ApiError::not_found("Notebook", "id", id))?;
    Ok(Json(ApiResponse::success(notebook.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/notebooks/{id}/reserve",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notebook ID")),
    responses(
        (status = 200, description = "Reserved for the caller", body = ApiResponse<NotebookDto>),
        (status = 404, description = "NOTEBOOK_NOT_FOUND"),
        (status = 409, description = "NOTEBOOK_NOT_AVAILABLE")
    )
)]
pub async fn reserve_notebook(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<NotebookDto>>> {
    let notebook = state.notebooks.reserve(caller.id, id).await?;
    Ok(Json(ApiResponse::success(notebook.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/notebooks/{id}/revert-reservation",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notebook ID")),
    responses(
        (status = 200, description = "Current notebook, released when it was reserved", body = ApiResponse<NotebookDto>),
        (status = 403, description = "Held or evaluated by another volunteer"),
        (status = 404, description = "NOTEBOOK_NOT_FOUND")
    )
)]
pub async fn revert_reservation(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<NotebookDto>>> {
    let current = load(&state, id).await?;
    if current.volunteer_id.is_some() {
        require_holder(&caller, &current)?;
    }

    let notebook = state.notebooks.revert_reservation(id).await?;
    Ok(Json(ApiResponse::success(notebook.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/notebooks/{id}/evaluation",
    tag = "Notebooks",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notebook ID")),
    request_body = EvaluationRequest,
    responses(
        (status = 200, description = "Evaluated notebook", body = ApiResponse<NotebookDto>),
        (status = 403, description = "Not the holder of the reservation"),
        (status = 404, description = "NOTEBOOK_NOT_FOUND"),
        (status = 409, description = "NOTEBOOK_ALREADY_EVALUATED")
    )
)]
pub async fn save_evaluation(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedVolunteer>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<EvaluationRequest>,
) -> ApiResult<Json<ApiResponse<NotebookDto>>> {
    let current = load(&state, id).await?;
    if current.evaluated_at.is_none() {
        require_holder(&caller, &current)?;
    }

    let notebook = state.notebooks.evaluate(id, request.into()).await?;
    Ok(Json(ApiResponse::success(notebook.into())))
}
