//! Repository contracts and implementations.
//!
//! Two storage-agnostic contracts, one per entity. `get_by_id` returns
//! `Ok(None)` on a miss in every implementation; callers that require
//! existence use the `require` wrapper, which converts absence into a
//! not-found error.

pub mod json_file;
pub mod memory;

use crate::error::{ApiError, ApiResult};
use crate::model::{Task, TaskList};

pub use json_file::{JsonTaskListRepository, JsonTaskRepository};
pub use memory::{InMemoryTaskListRepository, InMemoryTaskRepository};

/// Persistence contract for task lists.
pub trait TaskListRepository: Send + Sync {
    /// Upsert a list, assigning a generated identifier when it has none.
    fn save(&self, list: TaskList) -> ApiResult<TaskList>;

    /// Persist changes to an existing list. Fails when the identifier is
    /// not already present.
    fn update(&self, list: TaskList) -> ApiResult<TaskList>;

    fn get_by_id(&self, id: &str) -> ApiResult<Option<TaskList>>;

    fn get_all(&self) -> ApiResult<Vec<TaskList>>;

    /// Remove a list. A no-op when the identifier is absent.
    fn delete(&self, id: &str) -> ApiResult<()>;

    /// Fetch a list that must exist.
    fn require(&self, id: &str) -> ApiResult<TaskList> {
        self.get_by_id(id)?
            .ok_or_else(|| ApiError::list_not_found(id))
    }
}

/// Persistence contract for tasks.
pub trait TaskRepository: Send + Sync {
    /// Upsert a task, assigning a generated identifier when it has none.
    fn save(&self, task: Task) -> ApiResult<Task>;

    fn get_by_id(&self, id: &str) -> ApiResult<Option<Task>>;

    fn get_all(&self) -> ApiResult<Vec<Task>>;

    /// Remove a task. A no-op when the identifier is absent.
    fn delete(&self, id: &str) -> ApiResult<()>;

    /// All tasks whose `list_id` matches, in no particular order.
    fn get_by_list_id(&self, list_id: &str) -> ApiResult<Vec<Task>>;

    /// Fetch a task that must exist.
    fn require(&self, id: &str) -> ApiResult<Task> {
        self.get_by_id(id)?
            .ok_or_else(|| ApiError::task_not_found(id))
    }
}
