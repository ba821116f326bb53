use crate::dates::DateEntry;
use crate::models::{
    ActiveTab, Confirmation, Goal, GoalForm, StateResponse, Task, TaskForm,
};
use crate::sanitize::sanitize;
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

// `dates` is fixed at construction; a session running past midnight keeps
// the old window.
#[derive(Debug, Clone)]
pub struct Planner {
    pub tasks: Vec<Task>,
    pub goals: Vec<Goal>,
    pub dates: Vec<DateEntry>,
    pub active_tab: ActiveTab,
    pub editing_task_id: Option<i64>,
    pub editing_goal_id: Option<i64>,
}

impl Planner {
    pub fn new(tasks: Vec<Task>, goals: Vec<Goal>, dates: Vec<DateEntry>) -> Self {
        Self {
            tasks,
            goals,
            dates,
            active_tab: ActiveTab::default(),
            editing_task_id: None,
            editing_goal_id: None,
        }
    }

    pub fn today(&self) -> Option<&str> {
        self.dates.first().map(|d| d.date_string.as_str())
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn goal(&self, id: i64) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn daily_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.goal_id.is_none())
    }

    pub fn tasks_for_goal(&self, goal_id: i64) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.goal_id == Some(goal_id))
    }

    pub fn add_or_edit_task(&mut self, form: TaskForm) -> bool {
        self.add_or_edit_task_at(form, Utc::now().timestamp_millis())
    }

    pub fn add_or_edit_task_at(&mut self, form: TaskForm, now_millis: i64) -> bool {
        let title = form.title.trim();
        if title.is_empty() {
            debug!("ignoring task submission with empty title");
            return false;
        }
        let title = sanitize(title);
        let description = sanitize(form.description.trim());

        self.editing_task_id = None;
        if let Some(editing) = form.task_id {
            let Some(task) = self.tasks.iter_mut().find(|t| t.id == editing) else {
                return false;
            };
            task.title = title;
            task.description = description;
            return true;
        }

        let goal_id = match form.goal_id {
            Some(goal_id) if self.goal(goal_id).is_none() => {
                warn!(goal_id, "unknown goal on new task, filing it under daily");
                None
            }
            other => other,
        };
        let id = fresh_id(now_millis, self.tasks.iter().map(|t| t.id));
        self.tasks.push(Task {
            id,
            title,
            description,
            history: BTreeMap::new(),
            goal_id,
        });
        true
    }

    pub fn add_or_edit_goal(&mut self, form: GoalForm) -> bool {
        self.add_or_edit_goal_at(form, Utc::now().timestamp_millis())
    }

    pub fn add_or_edit_goal_at(&mut self, form: GoalForm, now_millis: i64) -> bool {
        let title = form.title.trim();
        if title.is_empty() {
            debug!("ignoring goal submission with empty title");
            return false;
        }
        let title = sanitize(title);
        let description = sanitize(form.description.trim());

        self.editing_goal_id = None;
        if let Some(editing) = form.goal_id {
            let Some(goal) = self.goals.iter_mut().find(|g| g.id == editing) else {
                return false;
            };
            goal.title = title;
            goal.description = description;
            return true;
        }

        let id = fresh_id(now_millis, self.goals.iter().map(|g| g.id));
        self.goals.push(Goal {
            id,
            title,
            description,
        });
        true
    }

    pub fn delete_task(&mut self, id: i64, confirmation: Confirmation) -> bool {
        if confirmation == Confirmation::Declined {
            return false;
        }
        self.close_modal();
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return false;
        };
        let task = self.tasks.remove(index);
        info!(task_id = id, title = %task.title.to_plain(), "deleted task");
        true
    }

    pub fn delete_goal(&mut self, id: i64, confirmation: Confirmation) -> bool {
        if confirmation == Confirmation::Declined {
            return false;
        }
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        let tasks_before = self.tasks.len();
        self.tasks.retain(|t| t.goal_id != Some(id));
        self.close_modal();

        let cascaded = tasks_before - self.tasks.len();
        let removed = before != self.goals.len() || cascaded > 0;
        if removed {
            info!(goal_id = id, cascaded, "deleted goal");
        }
        removed
    }

    // Any date key is accepted, in or out of the current window.
    pub fn toggle_completion(&mut self, task_id: i64, date: &str) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) else {
            return false;
        };
        let done = task.history.entry(date.to_string()).or_insert(false);
        *done = !*done;
        true
    }

    pub fn set_active_tab(&mut self, tab: ActiveTab) {
        self.active_tab = tab;
    }

    pub fn begin_edit_task(&mut self, id: i64) -> bool {
        if self.task(id).is_none() {
            return false;
        }
        self.editing_goal_id = None;
        self.editing_task_id = Some(id);
        true
    }

    pub fn begin_edit_goal(&mut self, id: i64) -> bool {
        if self.goal(id).is_none() {
            return false;
        }
        self.editing_task_id = None;
        self.editing_goal_id = Some(id);
        true
    }

    pub fn close_modal(&mut self) {
        self.editing_task_id = None;
        self.editing_goal_id = None;
    }

    pub fn snapshot(&self) -> StateResponse {
        StateResponse {
            tasks: self.tasks.clone(),
            goals: self.goals.clone(),
            dates: self.dates.clone(),
            active_tab: self.active_tab,
            editing_task_id: self.editing_task_id,
            editing_goal_id: self.editing_goal_id,
        }
    }
}

fn fresh_id(now_millis: i64, existing: impl Iterator<Item = i64>) -> i64 {
    match existing.max() {
        Some(max) if max >= now_millis => max.saturating_add(1),
        _ => now_millis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::generate_window;
    use chrono::NaiveDate;

    const NOW: i64 = 1_710_500_000_000;

    fn planner() -> Planner {
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        Planner::new(Vec::new(), Vec::new(), generate_window(today))
    }

    fn task_form(title: &str, goal_id: Option<i64>) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            goal_id,
            ..TaskForm::default()
        }
    }

    fn edit_task_form(task_id: i64, title: &str) -> TaskForm {
        TaskForm {
            task_id: Some(task_id),
            title: title.to_string(),
            ..TaskForm::default()
        }
    }

    fn goal_form(title: &str) -> GoalForm {
        GoalForm {
            title: title.to_string(),
            ..GoalForm::default()
        }
    }

    #[test]
    fn blank_titles_are_rejected() {
        let mut planner = planner();
        assert!(!planner.add_or_edit_task_at(task_form("", None), NOW));
        assert!(!planner.add_or_edit_task_at(task_form("   \t", None), NOW));
        assert!(!planner.add_or_edit_goal_at(goal_form(" "), NOW));
        assert!(planner.tasks.is_empty());
        assert!(planner.goals.is_empty());
    }

    #[test]
    fn new_task_is_sanitized_and_trimmed() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Learning"), 5);
        let form = TaskForm {
            title: "  <b>Read</b> ".into(),
            description: " 20 pages ".into(),
            goal_id: Some(5),
            ..TaskForm::default()
        };
        assert!(planner.add_or_edit_task_at(form, NOW));
        let task = &planner.tasks[0];
        assert_eq!(task.id, NOW);
        assert_eq!(task.title.as_str(), "&lt;b&gt;Read&lt;&#x2F;b&gt;");
        assert_eq!(task.description.as_str(), "20 pages");
        assert_eq!(task.goal_id, Some(5));
        assert!(task.history.is_empty());
    }

    #[test]
    fn unknown_goal_on_new_task_falls_back_to_daily() {
        let mut planner = planner();
        assert!(planner.add_or_edit_task_at(task_form("Ghost", Some(424_242)), NOW));
        assert_eq!(planner.tasks[0].goal_id, None);
        assert_eq!(planner.daily_tasks().count(), 1);
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("a", None), NOW);
        planner.add_or_edit_task_at(task_form("b", None), NOW);
        planner.add_or_edit_task_at(task_form("c", None), NOW - 10);
        let ids: Vec<i64> = planner.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, [NOW, NOW + 1, NOW + 2]);
    }

    #[test]
    fn edit_replaces_text_only() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), 9);
        planner.add_or_edit_goal_at(goal_form("Career"), 77);
        planner.add_or_edit_task_at(task_form("Run", Some(9)), NOW);
        planner.toggle_completion(NOW, "2024-03-14");

        assert!(planner.begin_edit_task(NOW));
        planner.add_or_edit_task_at(
            TaskForm {
                task_id: Some(NOW),
                title: "Run 5k".into(),
                description: "slow".into(),
                goal_id: Some(77),
            },
            NOW + 1000,
        );

        assert_eq!(planner.tasks.len(), 1);
        let task = &planner.tasks[0];
        assert_eq!(task.id, NOW);
        assert_eq!(task.title.as_str(), "Run 5k");
        assert_eq!(task.description.as_str(), "slow");
        assert_eq!(task.goal_id, Some(9));
        assert!(task.is_done_on("2024-03-14"));
        assert_eq!(planner.editing_task_id, None);
    }

    #[test]
    fn rejected_edit_keeps_edit_open() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);
        planner.begin_edit_task(NOW);
        assert!(!planner.add_or_edit_task_at(edit_task_form(NOW, " "), NOW + 1));
        assert_eq!(planner.editing_task_id, Some(NOW));
    }

    #[test]
    fn abandoned_edit_does_not_capture_new_task() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), 20);
        planner.add_or_edit_task_at(task_form("Run", None), 10);
        planner.begin_edit_task(10);

        assert!(planner.add_or_edit_task_at(task_form("Stretch", Some(20)), NOW));

        assert_eq!(planner.editing_task_id, None);
        assert_eq!(planner.task(10).unwrap().title.as_str(), "Run");
        let stretch: Vec<&Task> = planner.tasks_for_goal(20).collect();
        assert_eq!(stretch.len(), 1);
        assert_eq!(stretch[0].title.as_str(), "Stretch");
    }

    #[test]
    fn abandoned_goal_edit_does_not_capture_new_goal() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), 20);
        planner.begin_edit_goal(20);

        assert!(planner.add_or_edit_goal_at(goal_form("Career"), NOW));

        assert_eq!(planner.editing_goal_id, None);
        let titles: Vec<&str> = planner.goals.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["Health", "Career"]);
    }

    #[test]
    fn edit_of_missing_task_creates_nothing() {
        let mut planner = planner();
        assert!(!planner.add_or_edit_task_at(edit_task_form(99, "Run"), NOW));
        assert!(planner.tasks.is_empty());
    }

    #[test]
    fn edit_goal_keeps_id() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), NOW);
        planner.begin_edit_goal(NOW);
        let form = GoalForm {
            goal_id: Some(NOW),
            ..goal_form("Fitness")
        };
        planner.add_or_edit_goal_at(form, NOW + 5);
        assert_eq!(planner.goals.len(), 1);
        assert_eq!(planner.goals[0].id, NOW);
        assert_eq!(planner.goals[0].title.as_str(), "Fitness");
        assert_eq!(planner.editing_goal_id, None);
    }

    #[test]
    fn toggle_twice_restores_state() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);

        assert!(!planner.tasks[0].is_done_on("2024-03-15"));
        planner.toggle_completion(NOW, "2024-03-15");
        assert!(planner.tasks[0].is_done_on("2024-03-15"));
        planner.toggle_completion(NOW, "2024-03-15");
        assert!(!planner.tasks[0].is_done_on("2024-03-15"));
    }

    #[test]
    fn toggle_accepts_dates_outside_window() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);
        assert!(planner.toggle_completion(NOW, "1999-12-31"));
        assert!(planner.tasks[0].is_done_on("1999-12-31"));
        assert!(!planner.toggle_completion(NOW + 1, "2024-03-15"));
    }

    #[test]
    fn declined_delete_is_a_no_op() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);
        planner.add_or_edit_goal_at(goal_form("Health"), NOW);
        assert!(!planner.delete_task(NOW, Confirmation::Declined));
        assert!(!planner.delete_goal(NOW, Confirmation::Declined));
        assert_eq!(planner.tasks.len(), 1);
        assert_eq!(planner.goals.len(), 1);
    }

    #[test]
    fn delete_task_removes_only_that_task() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);
        planner.add_or_edit_task_at(task_form("Read", None), NOW + 1);
        planner.begin_edit_task(NOW);
        assert!(planner.delete_task(NOW, Confirmation::Confirmed));
        assert_eq!(planner.tasks.len(), 1);
        assert_eq!(planner.tasks[0].id, NOW + 1);
        assert_eq!(planner.editing_task_id, None);
    }

    #[test]
    fn delete_goal_cascades_to_its_tasks() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), 100);
        planner.add_or_edit_goal_at(goal_form("Career"), 200);
        planner.add_or_edit_task_at(task_form("Run", Some(100)), NOW);
        planner.add_or_edit_task_at(task_form("Stretch", Some(100)), NOW + 1);
        planner.add_or_edit_task_at(task_form("Apply", Some(200)), NOW + 2);
        planner.add_or_edit_task_at(task_form("Water", None), NOW + 3);

        assert!(planner.delete_goal(100, Confirmation::Confirmed));

        let goal_ids: Vec<i64> = planner.goals.iter().map(|g| g.id).collect();
        assert_eq!(goal_ids, [200]);
        let titles: Vec<&str> = planner.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Apply", "Water"]);
    }

    #[test]
    fn begin_edit_unknown_id_is_ignored() {
        let mut planner = planner();
        assert!(!planner.begin_edit_task(123));
        assert!(!planner.begin_edit_goal(123));
        assert_eq!(planner.editing_task_id, None);
        assert_eq!(planner.editing_goal_id, None);
    }

    #[test]
    fn starting_one_edit_closes_the_other() {
        let mut planner = planner();
        planner.add_or_edit_task_at(task_form("Run", None), NOW);
        planner.add_or_edit_goal_at(goal_form("Health"), NOW);
        planner.begin_edit_goal(NOW);
        planner.begin_edit_task(NOW);
        assert_eq!(planner.editing_task_id, Some(NOW));
        assert_eq!(planner.editing_goal_id, None);
        planner.close_modal();
        assert_eq!(planner.editing_task_id, None);
    }

    #[test]
    fn views_split_tasks_by_goal() {
        let mut planner = planner();
        planner.add_or_edit_goal_at(goal_form("Health"), 1);
        planner.add_or_edit_task_at(task_form("Run", Some(1)), NOW);
        planner.add_or_edit_task_at(task_form("Water", None), NOW + 1);
        assert_eq!(planner.daily_tasks().count(), 1);
        assert_eq!(planner.tasks_for_goal(1).count(), 1);
        assert_eq!(planner.tasks_for_goal(2).count(), 0);
        assert_eq!(planner.today(), Some("2024-03-15"));
    }
}
