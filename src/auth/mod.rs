use crate::state::AppState;
use axum::Router;

mod dto;
pub mod guard;
pub mod handlers;
pub mod password;
pub mod services;
pub mod session;
pub mod token;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
