use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};

use crate::models::{
    Category, Priority, Settings, SettingsFile, Task, TasksFile, Timestamp,
};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, PartialEq)]
pub enum StoreError {
    Validation(String),
    NotFound(Timestamp),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Validation(message) => write!(f, "validation error: {message}"),
            StoreError::NotFound(id) => write!(f, "task {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Input for [`TaskStore::create`]. Text is trimmed and must be non-empty.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub text: String,
    pub priority: Priority,
    pub category: Category,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Partial update for [`TaskStore::update`]. `None` leaves a field untouched;
/// the doubled options carry an explicit "clear this field" value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub due_date: Option<Option<NaiveDate>>,
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ToggleOutcome {
    pub task: Task,
    /// True when this toggle left every task in the collection completed,
    /// determined by a full scan. Holds for a single-task collection too.
    pub all_completed: bool,
}

/// Owner of the canonical task collection. Element order is the manual order:
/// the only order that persists across sessions, mutated solely by `reorder`.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<Mutex<StoreData>>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>, settings: Settings) -> Self {
        let tasks = sanitize(tasks);
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Self {
            inner: Arc::new(Mutex::new(StoreData {
                tasks,
                settings,
                next_id,
                generation: 0,
            })),
        }
    }

    /// Wholesale reload, used by the startup path after reading storage.
    pub fn replace(&self, tasks: Vec<Task>, settings: Settings) {
        let tasks = sanitize(tasks);
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.tasks = tasks;
        guard.next_id = next_id;
        guard.settings = settings;
        guard.generation += 1;
    }

    pub fn create(&self, draft: TaskDraft) -> Result<Task, StoreError> {
        let text = draft.text.trim().to_string();
        if text.is_empty() {
            return Err(StoreError::Validation("task text is empty".to_string()));
        }
        let mut guard = self.inner.lock().expect("state poisoned");
        let now = Utc::now().timestamp_millis();
        let id = now.max(guard.next_id);
        guard.next_id = id + 1;
        let task = Task {
            id,
            text,
            priority: draft.priority,
            category: draft.category,
            due_date: draft.due_date,
            notes: normalize_notes(draft.notes),
            completed: false,
            date_added: now,
        };
        guard.tasks.push(task.clone());
        guard.generation += 1;
        Ok(task)
    }

    pub fn update(&self, id: Timestamp, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        let index = guard
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;

        // Validate before touching the task so a rejected edit leaves it unchanged.
        let text = match patch.text {
            Some(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(StoreError::Validation("task text is empty".to_string()));
                }
                Some(text)
            }
            None => None,
        };

        let task = &mut guard.tasks[index];
        if let Some(text) = text {
            task.text = text;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(category) = patch.category {
            task.category = category;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(notes) = patch.notes {
            task.notes = normalize_notes(notes);
        }
        let task = task.clone();
        guard.generation += 1;
        Ok(task)
    }

    pub fn toggle_complete(&self, id: Timestamp) -> Result<ToggleOutcome, StoreError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        let task = guard
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.completed = !task.completed;
        let task = task.clone();
        let all_completed = !guard.tasks.is_empty() && guard.tasks.iter().all(|t| t.completed);
        guard.generation += 1;
        Ok(ToggleOutcome {
            task,
            all_completed,
        })
    }

    pub fn delete(&self, id: Timestamp) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        if !guard.tasks.iter().any(|t| t.id == id) {
            return Err(StoreError::NotFound(id));
        }
        guard.tasks.retain(|t| t.id != id);
        guard.generation += 1;
        Ok(())
    }

    /// Removes `moved_id` from its position and reinserts it immediately
    /// before `before_id`. No-op when `moved_id == before_id` or `before_id`
    /// is unknown; the dragged task must exist.
    pub fn reorder(&self, moved_id: Timestamp, before_id: Timestamp) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().expect("state poisoned");
        let from = guard
            .tasks
            .iter()
            .position(|t| t.id == moved_id)
            .ok_or(StoreError::NotFound(moved_id))?;
        if moved_id == before_id {
            return Ok(());
        }
        let moved = guard.tasks.remove(from);
        match guard.tasks.iter().position(|t| t.id == before_id) {
            Some(to) => {
                guard.tasks.insert(to, moved);
                guard.generation += 1;
                Ok(())
            }
            None => {
                // Unknown drop target: put the task back where it was.
                guard.tasks.insert(from, moved);
                Ok(())
            }
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        let guard = self.inner.lock().expect("state poisoned");
        guard.tasks.clone()
    }

    pub fn settings(&self) -> Settings {
        let guard = self.inner.lock().expect("state poisoned");
        guard.settings.clone()
    }

    pub fn update_settings(&self, settings: Settings) {
        let mut guard = self.inner.lock().expect("state poisoned");
        guard.settings = settings;
        guard.generation += 1;
    }

    pub fn tasks_file(&self) -> TasksFile {
        let guard = self.inner.lock().expect("state poisoned");
        TasksFile {
            schema_version: SCHEMA_VERSION,
            tasks: guard.tasks.clone(),
        }
    }

    pub fn settings_file(&self) -> SettingsFile {
        let guard = self.inner.lock().expect("state poisoned");
        SettingsFile {
            schema_version: SCHEMA_VERSION,
            settings: guard.settings.clone(),
        }
    }

    /// Bumped on every mutation; the flusher compares generations to decide
    /// whether durable storage is behind the in-memory state.
    pub fn generation(&self) -> u64 {
        let guard = self.inner.lock().expect("state poisoned");
        guard.generation
    }
}

struct StoreData {
    tasks: Vec<Task>,
    settings: Settings,
    next_id: Timestamp,
    generation: u64,
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// Loaded data may come from a hand-edited or damaged file: drop records whose
/// text trims empty and keep only the first occurrence of a duplicated id.
fn sanitize(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = std::collections::HashSet::new();
    tasks
        .into_iter()
        .filter(|t| !t.text.trim().is_empty())
        .filter(|t| seen.insert(t.id))
        .collect()
}
