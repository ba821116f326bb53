use crate::dates::DateEntry;
use crate::sanitize::{sanitize, SanitizedText};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const TASKS_KEY: &str = "planner_tasks";
pub const GOALS_KEY: &str = "planner_goals";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: SanitizedText,
    #[serde(default)]
    pub description: SanitizedText,
    #[serde(default)]
    pub history: BTreeMap<String, bool>,
    #[serde(default)]
    pub goal_id: Option<i64>,
}

impl Task {
    pub fn is_done_on(&self, date: &str) -> bool {
        self.history.get(date).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i64,
    pub title: SanitizedText,
    #[serde(default)]
    pub description: SanitizedText,
}

pub fn seed_tasks() -> Vec<Task> {
    vec![Task {
        id: 1,
        title: sanitize("Job search"),
        description: sanitize("Apply to 5 openings"),
        history: BTreeMap::new(),
        goal_id: None,
    }]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveTab {
    #[default]
    Daily,
    Goals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

// The edit target (`TaskForm::task_id`, `GoalForm::goal_id`) travels with
// the form; an empty field means "create".
#[derive(Debug, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub task_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub goal_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GoalForm {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub goal_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    pub fn confirmation(&self) -> Confirmation {
        match self.confirm.as_deref().map(str::trim) {
            Some("yes") | Some("true") => Confirmation::Confirmed,
            _ => Confirmation::Declined,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    pub date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub tasks: Vec<Task>,
    pub goals: Vec<Goal>,
    pub dates: Vec<DateEntry>,
    pub active_tab: ActiveTab,
    pub editing_task_id: Option<i64>,
    pub editing_goal_id: Option<i64>,
}

// Browsers submit an untouched hidden input as `goal_id=`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}
