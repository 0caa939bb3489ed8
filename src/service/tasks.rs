//! Task use-cases.

use crate::error::ApiResult;
use crate::model::{Task, TaskDraft};
use crate::repo::{TaskListRepository, TaskRepository};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Use-case facade for tasks.
///
/// Holds the list repository as well: task creation is the one place where
/// the owning list is checked for existence.
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    lists: Arc<dyn TaskListRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, lists: Arc<dyn TaskListRepository>) -> Self {
        Self { tasks, lists }
    }

    /// Create a task after confirming its target list exists. The created
    /// task carries the resolved list's identifier.
    pub fn create(&self, draft: TaskDraft) -> ApiResult<Task> {
        let list = self.lists.require(&draft.list_id)?;
        let task = Task::new(TaskDraft {
            list_id: list.id,
            ..draft
        })?;
        self.tasks.save(task)
    }

    pub fn get(&self, task_id: &str) -> ApiResult<Task> {
        self.tasks.require(task_id)
    }

    pub fn update(&self, task_id: &str, patch: &Map<String, Value>) -> ApiResult<Task> {
        let mut task = self.tasks.require(task_id)?;
        task.apply_patch(patch)?;
        self.tasks.save(task)
    }

    pub fn delete(&self, task_id: &str) -> ApiResult<()> {
        self.tasks.delete(task_id)
    }
}
