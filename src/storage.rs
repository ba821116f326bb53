use crate::dates::current_window;
use crate::errors::AppError;
use crate::models::{seed_tasks, Goal, Task, GOALS_KEY, TASKS_KEY};
use crate::planner::Planner;
use serde::{de::DeserializeOwned, Serialize};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info};

pub fn resolve_data_dir() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("PLANNER_DATA_DIR") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data"))
}

// One JSON document per key, stored as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    // Missing key yields `default`; unreadable or unparseable yields `T::default()`.
    pub async fn load<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path_for(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    error!("failed to parse {key} from {}: {err}", path.display());
                    T::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => default,
            Err(err) => {
                error!("failed to read {key} from {}: {err}", path.display());
                T::default()
            }
        }
    }

    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
        fs::write(self.path_for(key), payload)
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }

    pub async fn load_planner(&self) -> Planner {
        let tasks: Vec<Task> = self.load(TASKS_KEY, seed_tasks()).await;
        let goals: Vec<Goal> = self.load(GOALS_KEY, Vec::new()).await;
        info!(tasks = tasks.len(), goals = goals.len(), "loaded planner data");
        Planner::new(tasks, goals, current_window())
    }

    // Tasks first, then goals; the two writes are independent.
    pub async fn persist(&self, planner: &Planner) -> Result<(), AppError> {
        self.save(TASKS_KEY, &planner.tasks).await?;
        self.save(GOALS_KEY, &planner.goals).await?;
        Ok(())
    }
}
