//! The client state container.
//!
//! `Model` holds the full task list, the in-progress new-task input, and the
//! selected filter. All list mutations go through `apply`, so the UI logic
//! is independent of the rendering layer and testable without a browser.

use shared::{Task, TaskCounts, TaskFilter};
use uuid::Uuid;

/// A confirmed state transition. Records carried here are the ones the
/// server returned, never locally recomputed variants.
#[derive(Debug, Clone)]
pub enum Change {
    ListLoaded(Vec<Task>),
    TaskAdded(Task),
    TaskUpdated(Task),
    TaskRemoved(Uuid),
}

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub tasks: Vec<Task>,
    pub new_task_title: String,
    pub filter: TaskFilter,
    pub loading: bool,
}

impl Model {
    pub fn apply(&mut self, change: Change) {
        match change {
            Change::ListLoaded(tasks) => self.tasks = tasks,
            Change::TaskAdded(task) => self.tasks.insert(0, task),
            Change::TaskUpdated(task) => {
                if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
            }
            Change::TaskRemoved(id) => self.tasks.retain(|t| t.id != id),
        }
    }

    /// The subset selected by the current filter, in list order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .collect()
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    pub fn completed_of(&self, id: Uuid) -> Option<bool> {
        self.tasks.iter().find(|t| t.id == id).map(|t| t.completed)
    }
}
