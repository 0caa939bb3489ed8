//! JSON-file-backed repository implementations.
//!
//! Each repository owns the canonical in-memory copy of its entities,
//! loaded eagerly from its backing file at construction. Reads are served
//! from memory under a shared lock; every mutation holds the exclusive
//! lock for the whole read-modify-write-file sequence and rewrites the
//! full file through a temp file renamed over the target.

use crate::error::{ApiError, ApiResult};
use crate::model::{Task, TaskList, TaskListRecord, TaskRecord};
use crate::repo::{TaskListRepository, TaskRepository};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::warn;
use uuid::Uuid;

/// Read the backing file into entity form.
///
/// A missing file yields an empty map. Any decode failure resets the store
/// to empty (no partial recovery) and logs the cause.
fn load_entities<R, E>(
    path: &Path,
    from_record: impl Fn(R) -> ApiResult<E>,
    id_of: impl Fn(&E) -> String,
) -> HashMap<String, E>
where
    R: serde::de::DeserializeOwned,
{
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return HashMap::new(),
    };

    let records: Vec<R> = match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to decode store file, starting empty");
            return HashMap::new();
        }
    };

    let mut entities = HashMap::with_capacity(records.len());
    for record in records {
        match from_record(record) {
            Ok(entity) => {
                entities.insert(id_of(&entity), entity);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Invalid record in store file, starting empty");
                return HashMap::new();
            }
        }
    }
    entities
}

/// Serialize all records and rewrite the backing file.
///
/// Writes to a sibling temp file first and renames it over the target so a
/// crash mid-write cannot leave a truncated store behind.
fn persist_records<R: serde::Serialize>(path: &Path, records: &[R]) -> ApiResult<()> {
    let data = serde_json::to_string_pretty(records).map_err(ApiError::storage)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, data).map_err(ApiError::storage)?;
    fs::rename(&tmp, path).map_err(ApiError::storage)?;
    Ok(())
}

/// File-backed store for task lists.
pub struct JsonTaskListRepository {
    path: PathBuf,
    lists: RwLock<HashMap<String, TaskList>>,
}

impl JsonTaskListRepository {
    /// Open the store, eagerly loading the backing file when it exists.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lists = load_entities(&path, TaskList::from_record, |list: &TaskList| {
            list.id.clone()
        });
        Self {
            path,
            lists: RwLock::new(lists),
        }
    }

    fn persist(&self, lists: &HashMap<String, TaskList>) -> ApiResult<()> {
        let records: Vec<TaskListRecord> = lists.values().map(TaskList::to_record).collect();
        persist_records(&self.path, &records)
    }
}

impl TaskListRepository for JsonTaskListRepository {
    fn save(&self, mut list: TaskList) -> ApiResult<TaskList> {
        let mut lists = self.lists.write().unwrap();
        if list.id.is_empty() {
            list.id = Uuid::new_v4().to_string();
        }
        lists.insert(list.id.clone(), list.clone());
        self.persist(&lists)?;
        Ok(list)
    }

    fn update(&self, list: TaskList) -> ApiResult<TaskList> {
        let mut lists = self.lists.write().unwrap();
        if list.id.is_empty() || !lists.contains_key(&list.id) {
            return Err(ApiError::list_not_found(&list.id));
        }
        lists.insert(list.id.clone(), list.clone());
        self.persist(&lists)?;
        Ok(list)
    }

    fn get_by_id(&self, id: &str) -> ApiResult<Option<TaskList>> {
        Ok(self.lists.read().unwrap().get(id).cloned())
    }

    fn get_all(&self) -> ApiResult<Vec<TaskList>> {
        Ok(self.lists.read().unwrap().values().cloned().collect())
    }

    fn delete(&self, id: &str) -> ApiResult<()> {
        let mut lists = self.lists.write().unwrap();
        if lists.remove(id).is_some() {
            self.persist(&lists)?;
        }
        Ok(())
    }
}

/// File-backed store for tasks.
pub struct JsonTaskRepository {
    path: PathBuf,
    tasks: RwLock<HashMap<String, Task>>,
}

impl JsonTaskRepository {
    /// Open the store, eagerly loading the backing file when it exists.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = load_entities(&path, Task::from_record, |task: &Task| task.id.clone());
        Self {
            path,
            tasks: RwLock::new(tasks),
        }
    }

    fn persist(&self, tasks: &HashMap<String, Task>) -> ApiResult<()> {
        let records: Vec<TaskRecord> = tasks.values().map(Task::to_record).collect();
        persist_records(&self.path, &records)
    }
}

impl TaskRepository for JsonTaskRepository {
    fn save(&self, mut task: Task) -> ApiResult<Task> {
        let mut tasks = self.tasks.write().unwrap();
        if task.id.is_empty() {
            task.id = Uuid::new_v4().to_string();
        }
        tasks.insert(task.id.clone(), task.clone());
        self.persist(&tasks)?;
        Ok(task)
    }

    fn get_by_id(&self, id: &str) -> ApiResult<Option<Task>> {
        Ok(self.tasks.read().unwrap().get(id).cloned())
    }

    fn get_all(&self) -> ApiResult<Vec<Task>> {
        Ok(self.tasks.read().unwrap().values().cloned().collect())
    }

    fn delete(&self, id: &str) -> ApiResult<()> {
        let mut tasks = self.tasks.write().unwrap();
        if tasks.remove(id).is_some() {
            self.persist(&tasks)?;
        }
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
