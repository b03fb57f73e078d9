//! Authentication and permission middleware for Axum

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
    Json,
};

use crate::domain::Permission;
use crate::infrastructure::crypto::jwt::{verify_token, JwtConfig, TokenClaims};
use crate::interfaces::http::common::{ApiError, ApiResponse};

/// Authentication error types
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    InsufficientPermissions,
}

/// State shared by the auth middleware
#[derive(Clone)]
pub struct AuthState {
    pub jwt_config: JwtConfig,
}

/// Volunteer identified by the bearer token, stored in request extensions
#[derive(Clone, Debug)]
pub struct AuthenticatedVolunteer {
    pub id: i32,
    pub email: String,
    pub permissions: Vec<Permission>,
}

impl AuthenticatedVolunteer {
    pub fn from_claims(claims: TokenClaims) -> Option<Self> {
        Some(Self {
            id: claims.volunteer_id()?,
            permissions: claims
                .permissions
                .iter()
                .filter_map(|p| Permission::parse(p))
                .collect(),
            email: claims.email,
        })
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Handler-level check for routes that mix permission levels.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            Err(ApiError::forbidden(format!("Missing permission {}", permission)))
        }
    }

    /// The volunteer owns `email`, or may manage every volunteer.
    pub fn require_self_or(&self, email: &str, permission: Permission) -> Result<(), ApiError> {
        if self.email.eq_ignore_ascii_case(email) {
            Ok(())
        } else {
            self.require(permission)
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ").map(str::trim)
}

/// JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let Some(auth_header) = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        return auth_error_response(AuthError::MissingToken);
    };

    let Some(token) = extract_token(auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match verify_token(token, &auth_state.jwt_config) {
        Ok(claims) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            let Some(volunteer) = AuthenticatedVolunteer::from_claims(claims) else {
                return auth_error_response(AuthError::InvalidToken);
            };
            request.extensions_mut().insert(volunteer);
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

/// Rejects requests whose token lacks the required permission.
///
/// Must run inside [`auth_middleware`].
pub async fn require_permission(
    State(required): State<Permission>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let allowed = request
        .extensions()
        .get::<AuthenticatedVolunteer>()
        .is_some_and(|v| v.has_permission(required));

    if !allowed {
        return auth_error_response(AuthError::InsufficientPermissions);
    }
    next.run(request).await
}

/// Route that needs a valid token.
pub fn authenticated<S>(route: MethodRouter<S>, auth: &AuthState) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(from_fn_with_state(auth.clone(), auth_middleware))
}

/// Route that needs a valid token carrying `permission`.
pub fn permitted<S>(route: MethodRouter<S>, auth: &AuthState, permission: Permission) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    // the layer added last runs first
    route
        .route_layer(from_fn_with_state(permission, require_permission))
        .route_layer(from_fn_with_state(auth.clone(), auth_middleware))
}

fn auth_error_response(error: AuthError) -> Response {
    let (status, code, message) = match error {
        AuthError::MissingToken => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Missing authentication token",
        ),
        AuthError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            "UNAUTHORIZED",
            "Invalid authentication token",
        ),
        AuthError::ExpiredToken => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Token has expired"),
        AuthError::InsufficientPermissions => (
            StatusCode::FORBIDDEN,
            "FORBIDDEN",
            "Insufficient permissions",
        ),
    };

    (status, Json(ApiResponse::<()>::error(message).with_code(code))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::crypto::jwt::create_token;
    use axum::routing::get;
    use axum::{Extension, Router};
    use tower::ServiceExt;

    fn auth() -> AuthState {
        AuthState {
            jwt_config: JwtConfig {
                secret: "middleware-test".into(),
                expiration_hours: 1,
                issuer: "pep-admin".into(),
            },
        }
    }

    async fn whoami(Extension(v): Extension<AuthenticatedVolunteer>) -> String {
        v.email
    }

    fn app() -> Router {
        let auth = auth();
        Router::new()
            .route("/me", authenticated(get(whoami), &auth))
            .route(
                "/notebooks",
                permitted(get(whoami), &auth, Permission::Notebook),
            )
            .route("/open", get(|| async { "open" }))
    }

    async fn status(uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        app()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn missing_or_bad_token_is_401() {
        assert_eq!(status("/me", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/me", Some("garbage")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/open", None).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn permission_is_checked_after_authentication() {
        let config = auth().jwt_config;
        let reader = create_token(1, "ana@pep.org", &[Permission::Read], &config).unwrap();
        let evaluator = create_token(2, "bia@pep.org", &[Permission::Notebook], &config).unwrap();

        assert_eq!(status("/me", Some(&reader)).await, StatusCode::OK);
        assert_eq!(status("/notebooks", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(status("/notebooks", Some(&reader)).await, StatusCode::FORBIDDEN);
        assert_eq!(status("/notebooks", Some(&evaluator)).await, StatusCode::OK);
    }

    #[test]
    fn self_access_skips_permission() {
        let volunteer = AuthenticatedVolunteer {
            id: 1,
            email: "ana@pep.org".into(),
            permissions: vec![],
        };
        assert!(volunteer
            .require_self_or("ANA@pep.org", Permission::ManageVolunteer)
            .is_ok());
        let err = volunteer
            .require_self_or("bia@pep.org", Permission::ManageVolunteer)
            .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }
}
