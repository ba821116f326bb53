use crate::planner::Planner;
use crate::storage::JsonStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub planner: Arc<Mutex<Planner>>,
}

impl AppState {
    pub fn new(store: JsonStore, planner: Planner) -> Self {
        Self {
            store,
            planner: Arc::new(Mutex::new(planner)),
        }
    }
}
