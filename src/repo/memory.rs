//! In-memory repository implementations.
//!
//! Same contracts as the file-backed stores without the persistence step.
//! Used by the service and HTTP tests, and usable anywhere a throwaway
//! store is enough.

use crate::error::{ApiError, ApiResult};
use crate::model::{Task, TaskList};
use crate::repo::{TaskListRepository, TaskRepository};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Volatile store for task lists.
#[derive(Default)]
pub struct InMemoryTaskListRepository {
    lists: RwLock<HashMap<String, TaskList>>,
}

impl InMemoryTaskListRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskListRepository for InMemoryTaskListRepository {
    fn save(&self, mut list: TaskList) -> ApiResult<TaskList> {
        let mut lists = self.lists.write().unwrap();
        if list.id.is_empty() {
            list.id = Uuid::new_v4().to_string();
        }
        lists.insert(list.id.clone(), list.clone());
        Ok(list)
    }

    fn update(&self, list: TaskList) -> ApiResult<TaskList> {
        let mut lists = self.lists.write().unwrap();
        if list.id.is_empty() || !lists.contains_key(&list.id) {
            return Err(ApiError::list_not_found(&list.id));
        }
        lists.insert(list.id.clone(), list.clone());
        Ok(list)
    }

    fn get_by_id(&self, id: &str) -> ApiResult<Option<TaskList>> {
        Ok(self.lists.read().unwrap().get(id).cloned())
    }

    fn get_all(&self) -> ApiResult<Vec<TaskList>> {
        Ok(self.lists.read().unwrap().values().cloned().collect())
    }

    fn delete(&self, id: &str) -> ApiResult<()> {
        self.lists.write().unwrap().remove(id);
        Ok(())
    }
}

/// Volatile store for tasks.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn save(&self, mut task: Task) -> ApiResult<Task> {
        let mut tasks = self.tasks.write().unwrap();
        if task.id.is_empty() {
            task.id = Uuid::new_v4().to_string();
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    fn get_by_id(&self, id: &str) -> ApiResult<Option<Task>> {
        Ok(self.tasks.read().unwrap().get(id).cloned())
    }

    fn get_all(&self) -> ApiResult<Vec<Task>> {
        Ok(self.tasks.read().unwrap().values().cloned().collect())
    }

    fn delete(&self, id: &str) -> ApiResult<()> {
        self.tasks.write().unwrap().remove(id);
        Ok(())
    }

    fn get_by_list_id(&self, list_id: &str) -> ApiResult<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .unwrap()
            .values()
            .filter(|task| task.list_id == list_id)
            .cloned()
            .collect())
    }
}
