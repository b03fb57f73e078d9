//! Shared handler state

use std::sync::Arc;

use axum::extract::FromRef;

use crate::application::{IdentityService, NotebookService};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::middleware::AuthState;

/// State for every `/api/v1` route. Middleware pulls its own part via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub identity: Arc<IdentityService>,
    pub notebooks: Arc<NotebookService>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, identity: Arc<IdentityService>) -> Self {
        let auth = AuthState {
            jwt_config: identity.jwt_config().clone(),
        };
        Self {
            notebooks: Arc::new(NotebookService::new(repos.clone())),
            repos,
            identity,
            auth,
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
