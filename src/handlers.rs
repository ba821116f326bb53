use crate::errors::AppError;
use crate::models::{ActiveTab, DeleteForm, GoalForm, StateResponse, TaskForm, ToggleForm};
use crate::planner::Planner;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let planner = state.planner.lock().await;
    Html(render_index(&planner))
}

pub async fn get_state(State(state): State<AppState>) -> Result<Json<StateResponse>, AppError> {
    let planner = state.planner.lock().await;
    Ok(Json(planner.snapshot()))
}

pub async fn switch_tab(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> Result<Redirect, AppError> {
    let tab = match tab.as_str() {
        "daily" => ActiveTab::Daily,
        "goals" => ActiveTab::Goals,
        _ => return Err(AppError::bad_request("tab must be 'daily' or 'goals'")),
    };
    select(&state, |planner| planner.set_active_tab(tab)).await
}

pub async fn submit_task(
    State(state): State<AppState>,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, AppError> {
    mutate(&state, |planner| {
        planner.add_or_edit_task(form);
    })
    .await
}

pub async fn edit_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    select(&state, |planner| {
        planner.begin_edit_task(id);
    })
    .await
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let confirmation = form.confirmation();
    mutate(&state, |planner| {
        planner.delete_task(id, confirmation);
    })
    .await
}

pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ToggleForm>,
) -> Result<Redirect, AppError> {
    mutate(&state, |planner| {
        planner.toggle_completion(id, form.date.trim());
    })
    .await
}

pub async fn submit_goal(
    State(state): State<AppState>,
    Form(form): Form<GoalForm>,
) -> Result<Redirect, AppError> {
    mutate(&state, |planner| {
        planner.add_or_edit_goal(form);
    })
    .await
}

pub async fn edit_goal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, AppError> {
    select(&state, |planner| {
        planner.begin_edit_goal(id);
    })
    .await
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let confirmation = form.confirmation();
    mutate(&state, |planner| {
        planner.delete_goal(id, confirmation);
    })
    .await
}

pub async fn close_modal(State(state): State<AppState>) -> Result<Redirect, AppError> {
    select(&state, Planner::close_modal).await
}

// Persists under the lock even when the mutation was a no-op.
async fn mutate<F>(state: &AppState, apply: F) -> Result<Redirect, AppError>
where
    F: FnOnce(&mut Planner),
{
    let mut planner = state.planner.lock().await;
    apply(&mut planner);
    state.store.persist(&planner).await?;
    Ok(Redirect::to("/"))
}

// UI selection is process local and never written out.
async fn select<F>(state: &AppState, apply: F) -> Result<Redirect, AppError>
where
    F: FnOnce(&mut Planner),
{
    let mut planner = state.planner.lock().await;
    apply(&mut planner);
    Ok(Redirect::to("/"))
}
