use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tab/:tab", post(handlers::switch_tab))
        .route("/tasks", post(handlers::submit_task))
        .route("/tasks/:id/edit", post(handlers::edit_task))
        .route("/tasks/:id/delete", post(handlers::delete_task))
        .route("/tasks/:id/toggle", post(handlers::toggle_task))
        .route("/goals", post(handlers::submit_goal))
        .route("/goals/:id/edit", post(handlers::edit_goal))
        .route("/goals/:id/delete", post(handlers::delete_goal))
        .route("/modal/close", post(handlers::close_modal))
        .route("/api/state", get(handlers::get_state))
        .with_state(state)
}
