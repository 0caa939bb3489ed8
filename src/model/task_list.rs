//! Task list entity.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A named container of tasks.
///
/// The `name` is never empty, neither at construction nor after an update.
/// The `id` is assigned at construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    pub order: i64,
}

/// Plain record representation of a [`TaskList`], as stored on disk and
/// returned over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

impl TaskList {
    /// Create a task list. Fails when `name` is empty. A fresh identifier is
    /// generated when `id` is `None`.
    pub fn new(name: &str, id: Option<String>, order: i64) -> ApiResult<Self> {
        if name.is_empty() {
            return Err(ApiError::missing_field("name"));
        }
        Ok(Self {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.to_string(),
            order,
        })
    }

    /// Apply a JSON patch object to this list.
    ///
    /// Unknown keys are ignored; `id` is immutable and silently skipped.
    /// The whole patch is validated before any field is written, so a
    /// failing patch leaves the list unchanged.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) -> ApiResult<()> {
        let mut name = None;
        let mut order = None;

        for (key, value) in patch {
            match key.as_str() {
                "id" => {}
                "name" => match value.as_str() {
                    Some(s) if !s.is_empty() => name = Some(s.to_string()),
                    _ => return Err(ApiError::missing_field("name")),
                },
                "order" => match value.as_i64() {
                    Some(n) => order = Some(n),
                    None => {
                        return Err(ApiError::invalid_value(
                            "order",
                            "Order of the task list must be an integer",
                        ));
                    }
                },
                _ => {}
            }
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(order) = order {
            self.order = order;
        }
        Ok(())
    }

    pub fn to_record(&self) -> TaskListRecord {
        TaskListRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            order: self.order,
        }
    }

    pub fn from_record(record: TaskListRecord) -> ApiResult<Self> {
        Self::new(&record.name, Some(record.id), record.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn new_generates_id_when_absent() {
        let list = TaskList::new("Work", None, 0).unwrap();
        assert!(!list.id.is_empty());
        assert_eq!(list.name, "Work");
        assert_eq!(list.order, 0);
    }

    #[test]
    fn new_keeps_provided_id() {
        let list = TaskList::new("Work", Some("list-1".to_string()), 2).unwrap();
        assert_eq!(list.id, "list-1");
        assert_eq!(list.order, 2);
    }

    #[test]
    fn new_rejects_empty_name() {
        let err = TaskList::new("", None, 0).unwrap_err();
        assert!(err.code.is_validation());
    }

    #[test]
    fn patch_updates_name_and_order() {
        let mut list = TaskList::new("Work", None, 0).unwrap();
        list.apply_patch(&patch(json!({"name": "Home", "order": 3})))
            .unwrap();
        assert_eq!(list.name, "Home");
        assert_eq!(list.order, 3);
    }

    #[test]
    fn patch_ignores_unknown_keys_and_id() {
        let mut list = TaskList::new("Work", Some("list-1".to_string()), 0).unwrap();
        list.apply_patch(&patch(json!({"id": "other", "color": "red"})))
            .unwrap();
        assert_eq!(list.id, "list-1");
        assert_eq!(list.name, "Work");
    }

    #[test]
    fn patch_rejects_empty_name_without_applying_other_fields() {
        let mut list = TaskList::new("Work", None, 0).unwrap();
        let err = list
            .apply_patch(&patch(json!({"order": 9, "name": ""})))
            .unwrap_err();
        assert!(err.code.is_validation());
        assert_eq!(list.name, "Work");
        assert_eq!(list.order, 0);
    }

    #[test]
    fn patch_rejects_non_integer_order() {
        let mut list = TaskList::new("Work", None, 0).unwrap();
        let err = list.apply_patch(&patch(json!({"order": "x"}))).unwrap_err();
        assert!(err.code.is_validation());
        assert_eq!(list.order, 0);
    }

    #[test]
    fn record_round_trip_is_stable() {
        let list = TaskList::new("Work", Some("list-1".to_string()), 5).unwrap();
        let record = list.to_record();
        let back = TaskList::from_record(record.clone()).unwrap();
        assert_eq!(back.to_record(), record);
    }

    #[test]
    fn record_order_defaults_to_zero() {
        let record: TaskListRecord =
            serde_json::from_value(json!({"id": "list-1", "name": "Work"})).unwrap();
        assert_eq!(record.order, 0);
    }
}
