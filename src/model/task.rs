//! Task entity.
//!
//! A task belongs to exactly one task list via `list_id`. The entity owns
//! all field validation: construction rejects missing required fields, and
//! updates go through a typed JSON patch that is validated in full before
//! any field is written.

use crate::error::{ApiError, ApiResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Date format used in records and request bodies.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date value from its record representation.
///
/// Accepts the plain `%Y-%m-%d` form first, then falls back to a full
/// timestamp (RFC 3339, with or without offset).
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// A unit of work owned by a task list.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub list_id: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub due_date: Option<NaiveDateTime>,
    pub attachment: Option<Vec<u8>>,
    pub checklist: Vec<String>,
    pub owner: String,
    pub done: bool,
    pub order: i64,
}

/// Construction input for [`Task::new`]. Absent optional fields take the
/// documented defaults.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub list_id: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDateTime>,
    pub attachment: Option<Vec<u8>>,
    pub checklist: Vec<String>,
    pub created_at: Option<NaiveDateTime>,
    pub id: Option<String>,
    pub owner: Option<String>,
    pub done: bool,
    pub order: i64,
}

/// Plain record representation of a [`Task`], as stored on disk and
/// returned over the API. Dates are `%Y-%m-%d` text, the attachment is
/// base64 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub list_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub attachment: Option<String>,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub order: i64,
}

/// Staged field changes collected from a patch object before commit.
#[derive(Default)]
struct TaskPatch {
    title: Option<String>,
    list_id: Option<String>,
    description: Option<String>,
    due_date: Option<Option<NaiveDateTime>>,
    attachment: Option<Option<Vec<u8>>>,
    checklist: Option<Vec<String>>,
    owner: Option<String>,
    done: Option<bool>,
    order: Option<i64>,
}

impl Task {
    /// Create a task. Fails when `title` or `list_id` is empty. A fresh
    /// identifier is generated when none is given; `description` defaults
    /// to empty, `owner` to `"default"`, `created_at` to now.
    pub fn new(draft: TaskDraft) -> ApiResult<Self> {
        if draft.title.is_empty() {
            return Err(ApiError::missing_field("title"));
        }
        if draft.list_id.is_empty() {
            return Err(ApiError::missing_field("list_id"));
        }
        Ok(Self {
            id: draft
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft.title,
            list_id: draft.list_id,
            description: draft.description.unwrap_or_default(),
            created_at: draft.created_at.unwrap_or_else(|| Utc::now().naive_utc()),
            due_date: draft.due_date,
            attachment: draft.attachment,
            checklist: draft.checklist,
            owner: draft
                .owner
                .filter(|owner| !owner.is_empty())
                .unwrap_or_else(|| "default".to_string()),
            done: draft.done,
            order: draft.order,
        })
    }

    /// Apply a JSON patch object to this task.
    ///
    /// Unknown keys are ignored. `id` and `created_at` are immutable and
    /// silently skipped. The whole patch is validated before any field is
    /// written, so a failing patch leaves the task unchanged.
    pub fn apply_patch(&mut self, patch: &Map<String, Value>) -> ApiResult<()> {
        let mut staged = TaskPatch::default();

        for (key, value) in patch {
            match key.as_str() {
                "id" | "created_at" => {}
                "title" => staged.title = Some(required_text("title", value)?),
                "list_id" => staged.list_id = Some(required_text("list_id", value)?),
                "owner" => staged.owner = Some(required_text("owner", value)?),
                "done" => match value.as_bool() {
                    Some(done) => staged.done = Some(done),
                    None => {
                        return Err(ApiError::invalid_value(
                            "done",
                            "Status of the task must be true or false",
                        ));
                    }
                },
                "due_date" => match value {
                    Value::Null => staged.due_date = Some(None),
                    Value::String(s) => match parse_datetime(s) {
                        Some(dt) => staged.due_date = Some(Some(dt)),
                        None => {
                            return Err(ApiError::invalid_value(
                                "due_date",
                                "Due date of the task must be a date",
                            ));
                        }
                    },
                    _ => {
                        return Err(ApiError::invalid_value(
                            "due_date",
                            "Due date of the task must be a date",
                        ));
                    }
                },
                "attachment" => match value {
                    Value::Null => staged.attachment = Some(None),
                    Value::String(s) => match BASE64.decode(s) {
                        Ok(bytes) => staged.attachment = Some(Some(bytes)),
                        Err(_) => {
                            return Err(ApiError::invalid_value(
                                "attachment",
                                "Attachment of the task must be base64 text",
                            ));
                        }
                    },
                    _ => {
                        return Err(ApiError::invalid_value(
                            "attachment",
                            "Attachment of the task must be base64 text",
                        ));
                    }
                },
                "checklist" => match value {
                    // An absent or empty checklist means "no value supplied".
                    Value::Null => {}
                    Value::Array(items) if items.is_empty() => {}
                    Value::Array(items) => {
                        let mut checklist = Vec::with_capacity(items.len());
                        for item in items {
                            match item.as_str() {
                                Some(s) => checklist.push(s.to_string()),
                                None => {
                                    return Err(ApiError::invalid_value(
                                        "checklist",
                                        "Checklist items must be text",
                                    ));
                                }
                            }
                        }
                        staged.checklist = Some(checklist);
                    }
                    _ => {
                        return Err(ApiError::invalid_value(
                            "checklist",
                            "Checklist of the task must be a list",
                        ));
                    }
                },
                "order" => match value {
                    Value::Null => {}
                    _ => match value.as_i64() {
                        Some(order) => staged.order = Some(order),
                        None => {
                            return Err(ApiError::invalid_value(
                                "order",
                                "Order of the task must be an integer",
                            ));
                        }
                    },
                },
                "description" => match value {
                    Value::Null => staged.description = Some(String::new()),
                    Value::String(s) => staged.description = Some(s.clone()),
                    _ => {
                        return Err(ApiError::invalid_value(
                            "description",
                            "Description of the task must be text",
                        ));
                    }
                },
                _ => {}
            }
        }

        if let Some(title) = staged.title {
            self.title = title;
        }
        if let Some(list_id) = staged.list_id {
            self.list_id = list_id;
        }
        if let Some(description) = staged.description {
            self.description = description;
        }
        if let Some(due_date) = staged.due_date {
            self.due_date = due_date;
        }
        if let Some(attachment) = staged.attachment {
            self.attachment = attachment;
        }
        if let Some(checklist) = staged.checklist {
            self.checklist = checklist;
        }
        if let Some(owner) = staged.owner {
            self.owner = owner;
        }
        if let Some(done) = staged.done {
            self.done = done;
        }
        if let Some(order) = staged.order {
            self.order = order;
        }
        Ok(())
    }

    pub fn mark_complete(&mut self) {
        self.done = true;
    }

    pub fn mark_incomplete(&mut self) {
        self.done = false;
    }

    /// Append an item to the checklist. Fails when the item is empty.
    pub fn add_checklist_item(&mut self, item: &str) -> ApiResult<()> {
        if item.is_empty() {
            return Err(ApiError::missing_field("item"));
        }
        self.checklist.push(item.to_string());
        Ok(())
    }

    /// Remove the first matching occurrence of an item from the checklist.
    /// Fails when the item is not present.
    pub fn remove_checklist_item(&mut self, item: &str) -> ApiResult<()> {
        match self.checklist.iter().position(|entry| entry == item) {
            Some(index) => {
                self.checklist.remove(index);
                Ok(())
            }
            None => Err(ApiError::checklist_item_not_found(item)),
        }
    }

    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: Some(self.id.clone()),
            title: self.title.clone(),
            list_id: Some(self.list_id.clone()),
            description: Some(self.description.clone()),
            created_at: Some(self.created_at.format(DATE_FORMAT).to_string()),
            due_date: self
                .due_date
                .map(|dt| dt.format(DATE_FORMAT).to_string()),
            attachment: self.attachment.as_deref().map(|bytes| BASE64.encode(bytes)),
            checklist: self.checklist.clone(),
            owner: Some(self.owner.clone()),
            done: self.done,
            order: self.order,
        }
    }

    /// Rebuild a task from its record. `created_at` is required; dates
    /// accept `%Y-%m-%d` with a full-timestamp fallback.
    pub fn from_record(record: TaskRecord) -> ApiResult<Self> {
        let created_at = match record.created_at.as_deref() {
            Some(s) if !s.is_empty() => parse_datetime(s).ok_or_else(|| {
                ApiError::invalid_value("created_at", "Creation date of the task must be a date")
            })?,
            _ => return Err(ApiError::missing_field("created_at")),
        };
        let due_date = match record.due_date.as_deref() {
            Some(s) if !s.is_empty() => Some(parse_datetime(s).ok_or_else(|| {
                ApiError::invalid_value("due_date", "Due date of the task must be a date")
            })?),
            _ => None,
        };
        let attachment = match record.attachment.as_deref() {
            Some(s) if !s.is_empty() => Some(BASE64.decode(s).map_err(|_| {
                ApiError::invalid_value("attachment", "Attachment of the task must be base64 text")
            })?),
            _ => None,
        };
        Self::new(TaskDraft {
            title: record.title,
            list_id: record.list_id.unwrap_or_default(),
            description: record.description,
            due_date,
            attachment,
            checklist: record.checklist,
            created_at: Some(created_at),
            id: record.id,
            owner: record.owner,
            done: record.done,
            order: record.order,
        })
    }
}

/// Extract a required non-empty text field from a patch value.
fn required_text(field: &str, value: &Value) -> ApiResult<String> {
    match value.as_str() {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(ApiError::missing_field(field)),
    }
}
