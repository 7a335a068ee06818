use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Epoch milliseconds. Task ids and `date_added` share this representation.
pub type Timestamp = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: high sorts first. Ties are resolved by manual order.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Health,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    pub id: Timestamp,
    pub text: String,
    pub priority: Priority,
    pub category: Category,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub date_added: Timestamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TasksFile {
    pub schema_version: u32,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SettingsFile {
    pub schema_version: u32,
    pub settings: Settings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_orders_high_before_medium_before_low() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn priority_and_theme_serialize_as_snake_case_strings() {
        assert_eq!(
            serde_json::to_value(Priority::High).expect("serialize priority"),
            serde_json::json!("high")
        );
        assert_eq!(
            serde_json::to_value(Theme::Dark).expect("serialize theme"),
            serde_json::json!("dark")
        );
    }

    #[test]
    fn task_serde_applies_defaults_for_missing_optional_fields() {
        let json = r#"
        {
          "id": 1700000000000,
          "text": "water the plants",
          "priority": "medium",
          "category": "personal",
          "date_added": 1700000000000
        }
        "#;

        let task: Task = serde_json::from_str(json).expect("task should deserialize");
        assert_eq!(task.due_date, None);
        assert_eq!(task.notes, None);
        assert!(!task.completed);
    }

    #[test]
    fn task_round_trips_due_date_as_calendar_date() {
        let task = Task {
            id: 1,
            text: "renew passport".to_string(),
            priority: Priority::High,
            category: Category::Other,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 14),
            notes: Some("bring photos".to_string()),
            completed: false,
            date_added: 1,
        };

        let value = serde_json::to_value(&task).expect("serialize task");
        assert_eq!(value["due_date"], serde_json::json!("2026-03-14"));

        let back: Task = serde_json::from_value(value).expect("deserialize task");
        assert_eq!(back, task);
    }

    #[test]
    fn settings_serde_tolerates_empty_object() {
        let settings: Settings = serde_json::from_str("{}").expect("settings should deserialize");
        assert_eq!(settings.theme, Theme::Light);
    }
}
