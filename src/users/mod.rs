use crate::state::AppState;
use axum::Router;

pub mod authorize;
mod dto;
pub mod handlers;
pub mod password;
pub mod repo;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
