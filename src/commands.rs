use std::path::PathBuf;

use crate::events::StatePayload;
use crate::models::{Settings, Task, Theme, Timestamp};
use crate::stats::{stats, TaskStats};
use crate::storage::{Storage, StorageError};
use crate::store::{TaskDraft, TaskPatch, TaskStore, ToggleOutcome};
use crate::view::{project, ViewQuery};

#[derive(Debug, serde::Serialize)]
pub struct CommandResult<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// The shell side of the boundary. Production presenters forward events to
/// the UI; tests record them.
pub trait PresenterCtx {
    fn data_dir(&self) -> Result<PathBuf, StorageError>;
    fn emit_state_updated(&self, payload: StatePayload);
    fn emit_all_completed(&self);
}

fn ok<T>(data: T) -> CommandResult<T> {
    CommandResult {
        ok: true,
        data: Some(data),
        error: None,
    }
}

fn err<T>(message: &str) -> CommandResult<T> {
    CommandResult {
        ok: false,
        data: None,
        error: Some(message.to_string()),
    }
}

/// Broadcast after every successful mutation. The shell must re-render from a
/// fresh projection of this payload, never by patching its previous view.
fn emit_state(ctx: &impl PresenterCtx, store: &TaskStore) {
    ctx.emit_state_updated(StatePayload {
        tasks: store.tasks(),
        settings: store.settings(),
    });
}

/// Startup path: read both files and seed the store. Missing or corrupt data
/// must never prevent the app from coming up, so any load failure degrades to
/// an empty collection / default settings.
pub fn load_state_impl(ctx: &impl PresenterCtx, store: &TaskStore) -> CommandResult<StatePayload> {
    let root = match ctx.data_dir() {
        Ok(path) => path,
        Err(e) => return err(&format!("data dir error: {e}")),
    };
    let storage = Storage::new(root);
    if let Err(error) = storage.ensure_dirs() {
        return err(&format!("storage error: {error}"));
    }
    let tasks = match storage.load_tasks() {
        Ok(data) => data.tasks,
        Err(error) => {
            log::warn!("task file unreadable, starting empty: {error}");
            Vec::new()
        }
    };
    let settings = storage
        .load_settings()
        .map(|data| data.settings)
        .unwrap_or_default();
    log::info!("loaded {} tasks", tasks.len());
    store.replace(tasks, settings);
    ok(StatePayload {
        tasks: store.tasks(),
        settings: store.settings(),
    })
}

pub fn create_task_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    draft: TaskDraft,
) -> CommandResult<Task> {
    match store.create(draft) {
        Ok(task) => {
            emit_state(ctx, store);
            ok(task)
        }
        Err(error) => err(&error.to_string()),
    }
}

pub fn update_task_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    id: Timestamp,
    patch: TaskPatch,
) -> CommandResult<Task> {
    match store.update(id, patch) {
        Ok(task) => {
            emit_state(ctx, store);
            ok(task)
        }
        Err(error) => err(&error.to_string()),
    }
}

pub fn toggle_complete_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    id: Timestamp,
) -> CommandResult<ToggleOutcome> {
    match store.toggle_complete(id) {
        Ok(outcome) => {
            if outcome.all_completed {
                ctx.emit_all_completed();
            }
            emit_state(ctx, store);
            ok(outcome)
        }
        Err(error) => err(&error.to_string()),
    }
}

pub fn delete_task_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    id: Timestamp,
) -> CommandResult<bool> {
    match store.delete(id) {
        Ok(()) => {
            emit_state(ctx, store);
            ok(true)
        }
        Err(error) => err(&error.to_string()),
    }
}

pub fn reorder_task_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    moved_id: Timestamp,
    before_id: Timestamp,
) -> CommandResult<bool> {
    match store.reorder(moved_id, before_id) {
        Ok(()) => {
            emit_state(ctx, store);
            ok(true)
        }
        Err(error) => err(&error.to_string()),
    }
}

pub fn set_theme_impl(
    ctx: &impl PresenterCtx,
    store: &TaskStore,
    theme: Theme,
) -> CommandResult<Settings> {
    let mut settings = store.settings();
    settings.theme = theme;
    store.update_settings(settings.clone());
    emit_state(ctx, store);
    ok(settings)
}

/// Pull-only: projects the current collection for display without any
/// mutation capability.
pub fn view_tasks_impl(store: &TaskStore, query: &ViewQuery) -> CommandResult<Vec<Task>> {
    ok(project(
        &store.tasks(),
        &query.search,
        query.filter,
        query.sort,
    ))
}

/// Pull-only: aggregates over the whole collection, ignoring the view filter.
pub fn task_stats_impl(store: &TaskStore) -> CommandResult<TaskStats> {
    ok(stats(&store.tasks()))
}
