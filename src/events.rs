use crate::models::{Settings, Task};

pub const EVENT_STATE_UPDATED: &str = "state_updated";
/// Fired when a toggle leaves every task completed; the shell reacts with
/// its celebration effect.
pub const EVENT_ALL_COMPLETED: &str = "all_completed";

#[derive(Debug, Clone, serde::Serialize)]
pub struct StatePayload {
    pub tasks: Vec<Task>,
    pub settings: Settings,
}
