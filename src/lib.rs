//! # pep-admin
//!
//! Administration backend for the volunteers of a reading-in-prison
//! programme: volunteer records, workshop attendance and the notebook
//! evaluation workflow, behind a JWT-protected REST API.
//!
//! ## Architecture
//!
//! - **domain**: entities, permission model and repository traits
//! - **application**: identity and notebook reservation services
//! - **infrastructure**: SeaORM repositories, migrations, JWT and bcrypt
//! - **interfaces**: axum REST API with Swagger documentation
//! - **server**: runtime used by the binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

pub use interfaces::http::create_api_router;
