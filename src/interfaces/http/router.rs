//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::IdentityService;
use crate::domain::{Permission, RepositoryProvider};
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::middleware::{authenticated, permitted};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::modules::metrics::{http_metrics_middleware, MetricsState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::{
    attendances, auth, health, metrics, notebooks, volunteers,
};
use crate::interfaces::http::state::AppState;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/v1/auth/login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_volunteer,
        auth::change_password,
        // Volunteers
        volunteers::create_volunteer,
        volunteers::list_volunteers,
        volunteers::list_volunteers_from_date,
        volunteers::download_volunteers_from_date,
        volunteers::get_volunteer_by_id,
        volunteers::get_volunteer_by_email,
        volunteers::update_volunteer,
        volunteers::delete_volunteer,
        volunteers::post_hours,
        volunteers::get_hours,
        // Attendances
        attendances::list_attendances_from_date,
        attendances::download_attendances_from_date,
        attendances::list_metrics,
        attendances::download_metrics,
        attendances::list_by_volunteer,
        attendances::submit_attendance,
        // Notebooks
        notebooks::list_available,
        notebooks::list_evaluations,
        notebooks::download_evaluations,
        notebooks::list_reflections,
        notebooks::list_reserved_by_volunteer,
        notebooks::count_evaluated,
        notebooks::get_notebook,
        notebooks::update_notebook,
        notebooks::reserve_notebook,
        notebooks::revert_reservation,
        notebooks::save_evaluation,
    ),
    components(
        schemas(
            ApiResponse<String>,
            PaginatedResponse<volunteers::VolunteerDto>,
            PaginatedResponse<attendances::AttendanceInfoDto>,
            PaginatedResponse<attendances::VolunteerMetricsDto>,
            PaginatedResponse<notebooks::EvaluationRowDto>,
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::AuthenticatedInfo,
            auth::ChangePasswordRequest,
            // Volunteers
            volunteers::VolunteerDto,
            volunteers::CreateVolunteerRequest,
            volunteers::UpdateVolunteerRequest,
            volunteers::PostHoursRequest,
            volunteers::VolunteerHoursDto,
            // Attendances
            attendances::AttendanceDto,
            attendances::AttendanceInfoDto,
            attendances::VolunteerMetricsDto,
            attendances::WorkshopAttendanceDto,
            attendances::SubmitAttendanceRequest,
            // Notebooks
            notebooks::NotebookDto,
            notebooks::EvaluationRowDto,
            notebooks::ReflectionDto,
            notebooks::EvaluatedCountDto,
            notebooks::EvaluationRequest,
            notebooks::UpdateNotebookRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check"),
        (name = "Authentication", description = "Login, current volunteer and password change"),
        (name = "Volunteers", description = "Sign-up, volunteer records, CSV export and monthly hours"),
        (name = "Attendances", description = "Workshop attendance and participation metrics"),
        (name = "Notebooks", description = "Notebook reservation, evaluation and reflections"),
    ),
    info(
        title = "PEP Admin API",
        version = "1.0.0",
        description = "Volunteer administration for the reading-in-prison programme",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    identity: Arc<IdentityService>,
    db: DatabaseConnection,
    prometheus: PrometheusHandle,
) -> Router {
    let state = AppState::new(repos, identity);
    let auth = state.auth.clone();

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/me", authenticated(get(auth::get_current_volunteer), &auth))
        .route("/password", authenticated(put(auth::change_password), &auth));

    let volunteer_routes = Router::new()
        .route(
            "/",
            permitted(get(volunteers::list_volunteers), &auth, Permission::ManageVolunteer)
                .merge(post(volunteers::create_volunteer)),
        )
        .route(
            "/from/{date}",
            permitted(
                get(volunteers::list_volunteers_from_date),
                &auth,
                Permission::ManageVolunteer,
            ),
        )
        .route(
            "/download/from/{date}",
            permitted(
                get(volunteers::download_volunteers_from_date),
                &auth,
                Permission::ManageVolunteer,
            ),
        )
        .route(
            "/id/{id}",
            authenticated(get(volunteers::get_volunteer_by_id), &auth),
        )
        // self-or-manager is decided per handler
        .route(
            "/email/{email}",
            authenticated(
                get(volunteers::get_volunteer_by_email)
                    .put(volunteers::update_volunteer)
                    .delete(volunteers::delete_volunteer),
                &auth,
            ),
        )
        .route("/hours", authenticated(post(volunteers::post_hours), &auth))
        .route("/{id}/hours", authenticated(get(volunteers::get_hours), &auth));

    let attendance_routes = Router::new()
        .route(
            "/",
            authenticated(post(attendances::submit_attendance), &auth),
        )
        .route(
            "/from/{date}",
            permitted(
                get(attendances::list_attendances_from_date),
                &auth,
                Permission::Attendance,
            ),
        )
        .route(
            "/download/from/{date}",
            permitted(
                get(attendances::download_attendances_from_date),
                &auth,
                Permission::Attendance,
            ),
        )
        .route(
            "/metrics",
            permitted(get(attendances::list_metrics), &auth, Permission::ManageVolunteer),
        )
        .route(
            "/metrics/download",
            permitted(
                get(attendances::download_metrics),
                &auth,
                Permission::ManageVolunteer,
            ),
        )
        .route(
            "/volunteer/{id}",
            authenticated(get(attendances::list_by_volunteer), &auth),
        );

    let notebook_routes = Router::new()
        .route(
            "/available",
            authenticated(get(notebooks::list_available), &auth),
        )
        .route(
            "/evaluations",
            permitted(get(notebooks::list_evaluations), &auth, Permission::Notebook),
        )
        .route(
            "/evaluations/download",
            permitted(
                get(notebooks::download_evaluations),
                &auth,
                Permission::Notebook,
            ),
        )
        .route(
            "/reflections/{date}",
            permitted(get(notebooks::list_reflections), &auth, Permission::Notebook),
        )
        .route(
            "/volunteer/{id}/reserved",
            authenticated(get(notebooks::list_reserved_by_volunteer), &auth),
        )
        .route(
            "/volunteer/{id}/evaluated-count",
            authenticated(get(notebooks::count_evaluated), &auth),
        )
        .route(
            "/{id}",
            authenticated(
                get(notebooks::get_notebook).put(notebooks::update_notebook),
                &auth,
            ),
        )
        .route(
            "/{id}/reserve",
            authenticated(put(notebooks::reserve_notebook), &auth),
        )
        .route(
            "/{id}/revert-reservation",
            authenticated(put(notebooks::revert_reservation), &auth),
        )
        .route(
            "/{id}/evaluation",
            authenticated(put(notebooks::save_evaluation), &auth),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/volunteers", volunteer_routes)
        .nest("/attendances", attendance_routes)
        .nest("/notebooks", notebook_routes)
        .with_state(state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(MetricsState { handle: prometheus });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(metrics_routes)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}
