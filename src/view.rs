use serde::{Deserialize, Serialize};

use crate::models::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Newest first. The comparison uses stored `date_added` values only.
    #[default]
    DateAdded,
    Priority,
    Alphabetical,
}

/// The three view knobs the shell sends when it re-requests a projection.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ViewQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub filter: Filter,
    #[serde(default)]
    pub sort: SortMode,
}

/// Projects the collection into display order: search, then filter, then a
/// stable sort. The input slice is the manual order and is never mutated;
/// ties in every sort mode keep the post-filter manual order.
pub fn project(tasks: &[Task], search: &str, filter: Filter, sort: SortMode) -> Vec<Task> {
    let needle = search.to_lowercase();
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|t| needle.is_empty() || t.text.to_lowercase().contains(&needle))
        .filter(|t| match filter {
            Filter::All => true,
            Filter::Active => !t.completed,
            Filter::Completed => t.completed,
        })
        .cloned()
        .collect();

    // Vec::sort_by is stable; tie order is an observable property here.
    match sort {
        SortMode::DateAdded => view.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        SortMode::Priority => view.sort_by(|a, b| a.priority.rank().cmp(&b.priority.rank())),
        SortMode::Alphabetical => view.sort_by(|a, b| a.text.cmp(&b.text)),
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Priority, Task, Timestamp};

    fn make_task(id: Timestamp, text: &str, priority: Priority) -> Task {
        Task {
            id,
            text: text.to_string(),
            priority,
            category: Category::Other,
            due_date: None,
            notes: None,
            completed: false,
            date_added: id,
        }
    }

    fn texts(view: &[Task]) -> Vec<&str> {
        view.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn priority_sort_breaks_ties_by_manual_order() {
        // "Pay bills" was added before "Buy milk" but dragged below it, so the
        // manual order is the tie-breaker the user actually sees.
        let tasks = vec![
            make_task(3, "Pay bills", Priority::High),
            make_task(5, "Buy milk", Priority::High),
            make_task(4, "Wash car", Priority::Low),
        ];

        let view = project(&tasks, "", Filter::All, SortMode::Priority);
        assert_eq!(texts(&view), vec!["Pay bills", "Buy milk", "Wash car"]);

        let view = project(&tasks, "", Filter::All, SortMode::Alphabetical);
        assert_eq!(texts(&view), vec!["Buy milk", "Pay bills", "Wash car"]);
    }

    #[test]
    fn priority_sort_is_stable_across_equal_ranks() {
        let tasks = vec![
            make_task(1, "T1", Priority::Medium),
            make_task(2, "T2", Priority::Medium),
            make_task(3, "T3", Priority::Medium),
        ];
        let view = project(&tasks, "", Filter::All, SortMode::Priority);
        assert_eq!(texts(&view), vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn date_added_sorts_newest_first_and_is_stable_on_ties() {
        let mut tasks = vec![
            make_task(1, "oldest", Priority::Low),
            make_task(9, "newest", Priority::Low),
            make_task(5, "tie a", Priority::Low),
            make_task(6, "tie b", Priority::Low),
        ];
        tasks[2].date_added = 5;
        tasks[3].date_added = 5;

        let view = project(&tasks, "", Filter::All, SortMode::DateAdded);
        assert_eq!(texts(&view), vec!["newest", "tie a", "tie b", "oldest"]);
    }

    #[test]
    fn search_is_case_insensitive_and_empty_search_passes_through() {
        let tasks = vec![
            make_task(1, "Buy Milk", Priority::Low),
            make_task(2, "wash car", Priority::Low),
        ];

        let view = project(&tasks, "MILK", Filter::All, SortMode::DateAdded);
        assert_eq!(texts(&view), vec!["Buy Milk"]);

        let view = project(&tasks, "", Filter::All, SortMode::DateAdded);
        assert_eq!(view.len(), 2);

        let view = project(&tasks, "bike", Filter::All, SortMode::DateAdded);
        assert!(view.is_empty());
    }

    #[test]
    fn filter_selects_by_completion() {
        let mut tasks = vec![
            make_task(1, "done", Priority::Low),
            make_task(2, "open", Priority::Low),
        ];
        tasks[0].completed = true;

        let view = project(&tasks, "", Filter::Active, SortMode::DateAdded);
        assert_eq!(texts(&view), vec!["open"]);

        let view = project(&tasks, "", Filter::Completed, SortMode::DateAdded);
        assert_eq!(texts(&view), vec!["done"]);

        let view = project(&tasks, "", Filter::All, SortMode::DateAdded);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn search_and_filter_compose_before_sorting() {
        let mut tasks = vec![
            make_task(1, "pay rent", Priority::High),
            make_task(2, "pay bills", Priority::Low),
            make_task(3, "buy stamps", Priority::High),
        ];
        tasks[0].completed = true;

        let view = project(&tasks, "pay", Filter::Active, SortMode::Priority);
        assert_eq!(texts(&view), vec!["pay bills"]);
    }

    #[test]
    fn projection_never_mutates_the_manual_order() {
        let tasks = vec![
            make_task(2, "b", Priority::Low),
            make_task(1, "a", Priority::High),
            make_task(3, "c", Priority::Medium),
        ];
        let before = tasks.clone();

        project(&tasks, "a", Filter::All, SortMode::Alphabetical);
        project(&tasks, "", Filter::Active, SortMode::Priority);
        project(&tasks, "", Filter::All, SortMode::DateAdded);

        assert_eq!(tasks, before);
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let tasks = vec![
            make_task(1, "alpha", Priority::Medium),
            make_task(2, "beta", Priority::Medium),
            make_task(3, "Alpha", Priority::High),
        ];
        let first = project(&tasks, "al", Filter::All, SortMode::Alphabetical);
        let second = project(&tasks, "al", Filter::All, SortMode::Alphabetical);
        assert_eq!(first, second);

        // Case-sensitive lexical order: 'A' sorts before 'a'.
        assert_eq!(texts(&first), vec!["Alpha", "alpha"]);
    }
}
