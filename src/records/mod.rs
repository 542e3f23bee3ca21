mod dto;
pub mod handlers;
pub mod memory;
pub mod owner;
pub mod repo;
pub mod repo_types;
pub mod seed;
pub mod services;
pub mod transform;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::health_data_routes())
}
