pub mod attendances;
pub mod auth;
pub mod health;
pub mod metrics;
pub mod notebooks;
pub mod request_id;
pub mod volunteers;
