use crate::dates::DateEntry;
use crate::models::{ActiveTab, Goal, Task};
use crate::planner::Planner;

pub const EMPTY_DAILY: &str = "No habits yet. Press \"+ Habit\" to create one.";
pub const EMPTY_GOALS: &str = "No goals yet. Press \"+ Goal\" to create one.";
pub const EMPTY_GOAL_TASKS: &str = "No habits in this goal yet.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub calendar_header: String,
    pub content: String,
}

pub fn render_view(planner: &Planner) -> View {
    View {
        calendar_header: render_calendar_header(&planner.dates),
        content: match planner.active_tab {
            ActiveTab::Daily => render_daily(planner),
            ActiveTab::Goals => render_goals(planner),
        },
    }
}

pub fn render_index(planner: &Planner) -> String {
    let view = render_view(planner);
    let (daily_class, goals_class) = match planner.active_tab {
        ActiveTab::Daily => ("tab active", "tab"),
        ActiveTab::Goals => ("tab", "tab active"),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Planner</title>
  <style>{STYLE}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Habit Planner</h1>
      <div class="toolbar">
        <div class="tabs" role="tablist">
          <form method="post" action="/tab/daily"><button class="{daily_class}" type="submit">Daily</button></form>
          <form method="post" action="/tab/goals"><button class="{goals_class}" type="submit">Goals</button></form>
        </div>
        <div class="actions">
          <button class="btn-add" id="btn-add-task" type="button">+ Habit</button>
          <button class="btn-add alt" id="btn-add-goal" type="button">+ Goal</button>
        </div>
      </div>
    </header>
    <section id="calendar-header" class="calendar-header">{calendar}</section>
    <section id="tasks-list" class="tasks-list">{content}</section>
  </main>
{task_modal}
{goal_modal}
  <script>{SCRIPT}</script>
</body>
</html>
"#,
        calendar = view.calendar_header,
        content = view.content,
        task_modal = render_task_modal(planner),
        goal_modal = render_goal_modal(planner),
    )
}

pub fn render_calendar_header(dates: &[DateEntry]) -> String {
    dates
        .iter()
        .map(|date| {
            let class = if date.is_today {
                "calendar-day current-day"
            } else {
                "calendar-day"
            };
            format!(
                r#"<div class="{class}"><span class="day-num">{}</span><span class="day-name">{}</span></div>"#,
                date.day_of_month, date.day_name
            )
        })
        .collect()
}

fn render_daily(planner: &Planner) -> String {
    let rows: String = planner
        .daily_tasks()
        .map(|task| render_task_row(task, planner))
        .collect();
    if rows.is_empty() {
        return format!(r#"<div class="empty-state">{EMPTY_DAILY}</div>"#);
    }
    rows
}

fn render_goals(planner: &Planner) -> String {
    if planner.goals.is_empty() {
        return format!(r#"<div class="empty-state">{EMPTY_GOALS}</div>"#);
    }
    planner
        .goals
        .iter()
        .map(|goal| render_goal_card(goal, planner))
        .collect()
}

fn render_goal_card(goal: &Goal, planner: &Planner) -> String {
    let rows: String = planner
        .tasks_for_goal(goal.id)
        .map(|task| render_task_row(task, planner))
        .collect();
    let rows = if rows.is_empty() {
        format!(r#"<div class="empty-state small">{EMPTY_GOAL_TASKS}</div>"#)
    } else {
        rows
    };
    let description = if goal.description.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="goal-description">{}</div>"#, goal.description)
    };

    format!(
        r#"<article class="goal-card" data-goal-id="{id}">
  <div class="goal-head">
    <div class="goal-title">{title}</div>
    <form method="post" action="/goals/{id}/edit"><button class="edit-btn" type="submit" aria-label="Edit goal">{SVG_EDIT}</button></form>
    <button class="add-to-goal" type="button" data-goal-id="{id}">+ Habit</button>
  </div>
  {description}
  <div class="goal-tasks">{rows}</div>
</article>"#,
        id = goal.id,
        title = goal.title,
    )
}

// Stored text is already escaped and goes in as-is.
fn render_task_row(task: &Task, planner: &Planner) -> String {
    let done_today = planner.today().is_some_and(|today| task.is_done_on(today));
    let circle = if done_today {
        "task-status-circle completed"
    } else {
        "task-status-circle"
    };
    let (row_class, description) = if task.description.is_empty() {
        ("task-item", String::new())
    } else {
        (
            "task-item has-desc",
            format!(r#"<div class="task-description">{}</div>"#, task.description),
        )
    };
    let history: String = planner
        .dates
        .iter()
        .map(|date| render_history_cell(task, date))
        .collect();

    format!(
        r#"<div class="{row_class}">
  <div class="task-info">
    <div class="{circle}"></div>
    <div class="task-text-content">
      <div class="task-title-wrap">
        <div class="task-title">{title}</div>
        <form method="post" action="/tasks/{id}/edit"><button class="edit-btn" type="submit" aria-label="Edit habit">{SVG_EDIT}</button></form>
      </div>
      {description}
    </div>
  </div>
  <div class="task-history">{history}</div>
</div>"#,
        id = task.id,
        title = task.title,
    )
}

fn render_history_cell(task: &Task, date: &DateEntry) -> String {
    let done = task.is_done_on(&date.date_string);
    let (class, icon) = if done {
        ("history-icon checked", SVG_CHECK)
    } else {
        ("history-icon", SVG_CROSS)
    };
    format!(
        r#"<form method="post" action="/tasks/{id}/toggle" class="history-cell"><input type="hidden" name="date" value="{date}" /><button class="{class}" type="submit" title="{num} {name}">{icon}</button></form>"#,
        id = task.id,
        date = date.date_string,
        num = date.day_of_month,
        name = date.day_name,
    )
}

fn render_task_modal(planner: &Planner) -> String {
    let editing = planner
        .editing_task_id
        .and_then(|id| planner.task(id));
    let (heading, title, description, open) = match editing {
        Some(task) => ("Edit habit", task.title.as_str(), task.description.as_str(), "true"),
        None => ("New habit", "", "", "false"),
    };
    let task_id = editing.map(|task| task.id.to_string()).unwrap_or_default();
    let delete = match editing {
        Some(task) => render_delete_form(&format!("/tasks/{}/delete", task.id), "Delete this habit?"),
        None => String::new(),
    };

    format!(
        r#"  <dialog id="modal-task" class="modal" data-open="{open}">
    <h2>{heading}</h2>
    <form method="post" action="/tasks" class="modal-form">
      <input type="hidden" name="task_id" value="{task_id}" />
      <input type="hidden" name="goal_id" value="" />
      <label>Title<input name="title" required value="{title}" /></label>
      <label>Description<textarea name="description" rows="3">{description}</textarea></label>
      <div class="modal-actions">
        <button class="btn-cancel" type="submit" formaction="/modal/close" formnovalidate>Cancel</button>
        <button class="btn-add" type="submit">Save</button>
      </div>
    </form>
    {delete}
  </dialog>"#
    )
}

fn render_goal_modal(planner: &Planner) -> String {
    let editing = planner
        .editing_goal_id
        .and_then(|id| planner.goal(id));
    let (heading, title, description, open) = match editing {
        Some(goal) => ("Edit goal", goal.title.as_str(), goal.description.as_str(), "true"),
        None => ("New goal", "", "", "false"),
    };
    let goal_id = editing.map(|goal| goal.id.to_string()).unwrap_or_default();
    let delete = match editing {
        Some(goal) => render_delete_form(
            &format!("/goals/{}/delete", goal.id),
            "Delete this goal and all of its habits?",
        ),
        None => String::new(),
    };

    format!(
        r#"  <dialog id="modal-goal" class="modal" data-open="{open}">
    <h2>{heading}</h2>
    <form method="post" action="/goals" class="modal-form">
      <input type="hidden" name="goal_id" value="{goal_id}" />
      <label>Title<input name="title" required value="{title}" /></label>
      <label>Description<textarea name="description" rows="3">{description}</textarea></label>
      <div class="modal-actions">
        <button class="btn-cancel" type="submit" formaction="/modal/close" formnovalidate>Cancel</button>
        <button class="btn-add" type="submit">Save</button>
      </div>
    </form>
    {delete}
  </dialog>"#
    )
}

// The browser's confirm() is the blocking prompt; a declined prompt never
// submits, and a submission without `confirm=yes` is ignored server side.
fn render_delete_form(action: &str, prompt: &str) -> String {
    format!(
        r#"<form method="post" action="{action}" class="delete-form" onsubmit="return confirm('{prompt}')"><input type="hidden" name="confirm" value="yes" /><button class="btn-delete" type="submit">Delete</button></form>"#
    )
}

const SVG_CROSS: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="3"><line x1="18" y1="6" x2="6" y2="18"></line><line x1="6" y1="6" x2="18" y2="18"></line></svg>"#;
const SVG_CHECK: &str = r#"<svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="3"><polyline points="20 6 9 17 4 12"></polyline></svg>"#;
const SVG_EDIT: &str = r#"<svg width="14" height="14" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="M11 4H4a2 2 0 0 0-2 2v14a2 2 0 0 0 2 2h14a2 2 0 0 0 2-2v-7"></path><path d="M18.5 2.5a2.121 2.121 0 0 1 3 3L12 15l-4 1 1-4 9.5-9.5z"></path></svg>"#;

const SCRIPT: &str = r#"
    const taskModal = document.getElementById('modal-task');
    const goalModal = document.getElementById('modal-goal');

    const openNew = (modal, heading, goalId) => {
      modal.querySelectorAll('.modal-form input, .modal-form textarea').forEach((field) => {
        field.value = '';
      });
      modal.querySelectorAll('.delete-form').forEach((form) => form.remove());
      modal.querySelector('h2').textContent = heading;
      if (goalId) {
        modal.querySelector('input[name="goal_id"]').value = goalId;
      }
      modal.showModal();
    };

    document.getElementById('btn-add-task').addEventListener('click', () => openNew(taskModal, 'New habit'));
    document.getElementById('btn-add-goal').addEventListener('click', () => openNew(goalModal, 'New goal'));

    document.getElementById('tasks-list').addEventListener('click', (event) => {
      const button = event.target.closest('.add-to-goal');
      if (button) {
        openNew(taskModal, 'New habit', button.dataset.goalId);
      }
    });

    [taskModal, goalModal].forEach((modal) => {
      if (modal.dataset.open === 'true') {
        modal.showModal();
      }
      const close = () => modal.querySelector('.btn-cancel').click();
      modal.addEventListener('click', (event) => {
        if (event.target === modal) {
          close();
        }
      });
      modal.addEventListener('cancel', (event) => {
        event.preventDefault();
        close();
      });
    });
"#;

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --muted: #8a92a0;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --done: #2d7a4b;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 { margin: 0 0 12px; font-family: Georgia, serif; }

    .toolbar, .actions, .tabs, .goal-head, .task-title-wrap, .modal-actions {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .toolbar { justify-content: space-between; flex-wrap: wrap; }
    form { margin: 0; }

    button {
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      background: transparent;
      color: inherit;
    }

    .tabs { padding: 6px; background: rgba(47, 72, 88, 0.08); border-radius: 999px; }
    .tab.active { background: white; color: var(--accent-2); }
    .btn-add { background: var(--accent); color: white; }
    .btn-add.alt { background: var(--accent-2); }
    .btn-delete { background: #c63b2b; color: white; margin-top: 12px; }
    .edit-btn, .history-icon { padding: 6px; color: var(--muted); }

    .calendar-header, .task-history { display: flex; justify-content: flex-end; gap: 6px; }
    .calendar-day, .history-cell { width: 40px; text-align: center; }
    .calendar-day span { display: block; }
    .calendar-day.current-day { color: var(--accent); font-weight: 700; }
    .day-name { font-size: 0.75rem; color: var(--muted); }

    .task-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px 0;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    .task-info { display: flex; align-items: center; gap: 12px; }
    .task-status-circle { width: 14px; height: 14px; border-radius: 50%; border: 2px solid var(--muted); }
    .task-status-circle.completed { background: var(--done); border-color: var(--done); }
    .task-description, .goal-description { font-size: 0.85rem; color: var(--muted); }
    .history-icon.checked { color: var(--done); }

    .goal-card {
      border: 1px solid rgba(47, 72, 88, 0.12);
      border-radius: 20px;
      padding: 16px;
      margin-bottom: 16px;
    }

    .goal-title { font-weight: 700; flex: 1; }
    .empty-state { text-align: center; padding: 40px; color: var(--muted); }
    .empty-state.small { padding: 12px; }

    .modal { border: none; border-radius: 20px; padding: 24px; width: min(420px, 90vw); }
    .modal-form { display: grid; gap: 12px; }
    .modal-form label { display: grid; gap: 4px; font-size: 0.9rem; }
    .modal-form input, .modal-form textarea { padding: 8px; border-radius: 8px; border: 1px solid #ccc; font: inherit; }
    .modal-actions { justify-content: flex-end; }
"#;
