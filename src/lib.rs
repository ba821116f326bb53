pub mod app;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod planner;
pub mod sanitize;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use planner::Planner;
pub use state::AppState;
pub use storage::{resolve_data_dir, JsonStore};
