//! Task list use-cases.

use crate::error::ApiResult;
use crate::model::{Task, TaskList};
use crate::repo::{TaskListRepository, TaskRepository};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

/// Use-case facade for task lists.
///
/// Holds the task repository as well, because deleting a list cascades to
/// the tasks that reference it.
pub struct TaskListService {
    lists: Arc<dyn TaskListRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl TaskListService {
    pub fn new(lists: Arc<dyn TaskListRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { lists, tasks }
    }

    pub fn create(&self, name: &str, order: i64) -> ApiResult<TaskList> {
        let list = TaskList::new(name, None, order)?;
        self.lists.save(list)
    }

    pub fn get(&self, list_id: &str) -> ApiResult<TaskList> {
        self.lists.require(list_id)
    }

    pub fn get_all(&self) -> ApiResult<Vec<TaskList>> {
        self.lists.get_all()
    }

    pub fn update(&self, list_id: &str, patch: &Map<String, Value>) -> ApiResult<TaskList> {
        let mut list = self.lists.require(list_id)?;
        list.apply_patch(patch)?;
        self.lists.update(list)
    }

    /// Delete a list and every task referencing it.
    ///
    /// Best-effort: tasks are deleted one by one, then the list. The first
    /// repository error aborts and propagates, leaving earlier deletions in
    /// place.
    pub fn delete(&self, list_id: &str) -> ApiResult<()> {
        let tasks = self.tasks.get_by_list_id(list_id)?;
        debug!(list_id, task_count = tasks.len(), "Cascading list delete");
        for task in tasks {
            self.tasks.delete(&task.id)?;
        }
        self.lists.delete(list_id)
    }

    pub fn tasks_of(&self, list_id: &str) -> ApiResult<Vec<Task>> {
        self.tasks.get_by_list_id(list_id)
    }
}
