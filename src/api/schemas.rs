//! Request body schemas.

use crate::error::{ApiError, ApiResult};
use crate::model::task::parse_datetime;
use crate::model::TaskDraft;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;

/// Body for `POST /lists/`.
#[derive(Debug, Deserialize)]
pub struct CreateListBody {
    pub name: String,
    #[serde(default)]
    pub order: i64,
}

/// Body for `POST /task/`. Only `title` and `list_id` are required; dates
/// arrive as `%Y-%m-%d` (or full-timestamp) text and the attachment as
/// base64 text.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
    pub title: String,
    pub list_id: String,
    #[serde(default)]
    pub description: Option<String>,
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

impl CreateTaskBody {
    /// Decode the wire representation into a construction draft.
    pub fn into_draft(self) -> ApiResult<TaskDraft> {
        let due_date = match self.due_date.as_deref() {
            Some(s) if !s.is_empty() => Some(parse_datetime(s).ok_or_else(|| {
                ApiError::invalid_value("due_date", "Due date of the task must be a date")
            })?),
            _ => None,
        };
        let attachment = match self.attachment.as_deref() {
            Some(s) if !s.is_empty() => Some(BASE64.decode(s).map_err(|_| {
                ApiError::invalid_value("attachment", "Attachment of the task must be base64 text")
            })?),
            _ => None,
        };
        Ok(TaskDraft {
            title: self.title,
            list_id: self.list_id,
            description: self.description,
            due_date,
            attachment,
            checklist: self.checklist,
            created_at: None,
            id: None,
            owner: self.owner,
            done: self.done,
            order: self.order,
        })
    }
}
