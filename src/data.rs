use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::lib_constants::{
    MAX_NOTE_CONTENT_LEN, MAX_NOTE_TITLE_LEN, MAX_TODO_DESCRIPTION_LEN,
    MAX_TODO_TITLE_LEN,
};
use crate::util::StrExt;

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Pending,
    Completed,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TodoCategory {
    Work,
    Health,
    Finance,
    Travel,
    Personal,
    Education,
    Shopping,
    Daily,
    Other,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum NoteCategory {
    Work,
    Health,
    Finance,
    Travel,
    Personal,
    Education,
    Shopping,
    Daily,
    Ideas,
    Meeting,
    Project,
    Other,
}

#[derive(Debug, Error, Eq, PartialEq)]
#[error("unrecognized label")]
pub struct LabelParseError;

macro_rules! impl_label_str {
    ($type:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl FromStr for $type {
            type Err = LabelParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok(Self::$variant),)+
                    _ => Err(LabelParseError),
                }
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $label,)+
                })
            }
        }
    };
}

impl_label_str!(Priority {
    Low => "low",
    Medium => "medium",
    High => "high",
});

impl_label_str!(TodoStatus {
    Pending => "pending",
    Completed => "completed",
});

impl_label_str!(TodoCategory {
    Work => "Work",
    Health => "Health",
    Finance => "Finance",
    Travel => "Travel",
    Personal => "Personal",
    Education => "Education",
    Shopping => "Shopping",
    Daily => "Daily",
    Other => "Other",
});

impl_label_str!(NoteCategory {
    Work => "Work",
    Health => "Health",
    Finance => "Finance",
    Travel => "Travel",
    Personal => "Personal",
    Education => "Education",
    Shopping => "Shopping",
    Daily => "Daily",
    Ideas => "Ideas",
    Meeting => "Meeting",
    Project => "Project",
    Other => "Other",
});

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: TodoCategory,
    pub status: TodoStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_date: OffsetDateTime,
    pub priority: Priority,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: NoteCategory,
    pub priority: Priority,
    pub is_pinned: bool,
    /// Weak reference to a todo. The referenced todo may have been deleted
    /// since; dangling values are kept as-is.
    pub todo_id: Option<Uuid>,
    pub tags: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{field} cannot exceed {max} characters")]
    TooLong {
        field: &'static str,
        max: usize,
    },

    #[error("{0} cannot be in the past")]
    DateInPast(&'static str),

    #[error("End date cannot be before start date")]
    EndBeforeStart,
}

fn require(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    value
        .and_then(|v| v.nonblank_to_some())
        .ok_or(ValidationError::MissingField(field))
}

fn check_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

fn check_not_past(
    field: &'static str,
    value: OffsetDateTime,
    now: OffsetDateTime,
) -> Result<(), ValidationError> {
    // day granularity: creating a todo for "today" must stay possible
    // right up to midnight UTC
    if value.date() < now.date() {
        return Err(ValidationError::DateInPast(field));
    }
    Ok(())
}

/// Creation payload for a todo. Every field is optional at the serde level
/// so that missing fields surface as validation errors instead of
/// deserialization failures.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<TodoCategory>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub priority: Option<Priority>,
}

impl NewTodo {
    /// Validates the payload and builds the stored document. Past dates are
    /// rejected here and only here; later updates may move dates freely.
    pub fn into_todo(
        self,
        id: Uuid,
        now: OffsetDateTime,
    ) -> Result<Todo, ValidationError> {
        let title = require("Title", self.title)?;
        check_len("Title", &title, MAX_TODO_TITLE_LEN)?;
        let description = require("Description", self.description)?;
        check_len("Description", &description, MAX_TODO_DESCRIPTION_LEN)?;
        let category = self.category
            .ok_or(ValidationError::MissingField("Category"))?;
        let start_date = self.start_date
            .ok_or(ValidationError::MissingField("Start date"))?;
        let end_date = self.end_date
            .ok_or(ValidationError::MissingField("End date"))?;
        check_not_past("Start date", start_date, now)?;
        check_not_past("End date", end_date, now)?;
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart);
        }
        Ok(
            Todo {
                id,
                title,
                description,
                category,
                status: TodoStatus::Pending,
                start_date,
                end_date,
                priority: self.priority.unwrap_or(Priority::Medium),
                created_at: now,
                updated_at: now,
            }
        )
    }
}

/// Field-by-field update of a todo. Blank strings count as absent, matching
/// the dashboard forms which submit untouched fields as empty strings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<TodoCategory>,
    pub status: Option<TodoStatus>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub priority: Option<Priority>,
}

impl TodoPatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_ref().and_then(StrExt::nonblank_to_some) {
            check_len("Title", &title, MAX_TODO_TITLE_LEN)?;
        }
        if let Some(description) =
            self.description.as_ref().and_then(StrExt::nonblank_to_some)
        {
            check_len("Description", &description, MAX_TODO_DESCRIPTION_LEN)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, todo: &mut Todo, now: OffsetDateTime) {
        if let Some(title) = self.title.as_ref().and_then(StrExt::nonblank_to_some) {
            todo.title = title;
        }
        if let Some(description) =
            self.description.as_ref().and_then(StrExt::nonblank_to_some)
        {
            todo.description = description;
        }
        if let Some(category) = self.category {
            todo.category = category;
        }
        if let Some(status) = self.status {
            todo.status = status;
        }
        if let Some(start_date) = self.start_date {
            todo.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            todo.end_date = end_date;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
        todo.updated_at = now;
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoteCategory>,
    pub priority: Option<Priority>,
    pub is_pinned: Option<bool>,
    pub todo_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
}

impl NewNote {
    pub fn into_note(
        self,
        id: Uuid,
        now: OffsetDateTime,
    ) -> Result<Note, ValidationError> {
        let title = require("Title", self.title)?;
        check_len("Title", &title, MAX_NOTE_TITLE_LEN)?;
        let content = require("Content", self.content)?;
        check_len("Content", &content, MAX_NOTE_CONTENT_LEN)?;
        let category = self.category
            .ok_or(ValidationError::MissingField("Category"))?;
        // unlike todos, notes carry no default priority
        let priority = self.priority
            .ok_or(ValidationError::MissingField("Priority"))?;
        Ok(
            Note {
                id,
                title,
                content,
                category,
                priority,
                is_pinned: self.is_pinned.unwrap_or(false),
                todo_id: self.todo_id,
                tags: self.tags.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            }
        )
    }
}

/// Field-by-field update of a note. `todo_id` distinguishes an absent field
/// (left alone) from an explicit null (reference cleared).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<NoteCategory>,
    pub priority: Option<Priority>,
    pub is_pinned: Option<bool>,
    pub todo_id: Option<Option<Uuid>>,
    pub tags: Option<Vec<String>>,
}

impl NotePatch {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = self.title.as_ref().and_then(StrExt::nonblank_to_some) {
            check_len("Title", &title, MAX_NOTE_TITLE_LEN)?;
        }
        if let Some(content) =
            self.content.as_ref().and_then(StrExt::nonblank_to_some)
        {
            check_len("Content", &content, MAX_NOTE_CONTENT_LEN)?;
        }
        Ok(())
    }

    pub fn apply_to(&self, note: &mut Note, now: OffsetDateTime) {
        if let Some(title) = self.title.as_ref().and_then(StrExt::nonblank_to_some) {
            note.title = title;
        }
        if let Some(content) =
            self.content.as_ref().and_then(StrExt::nonblank_to_some)
        {
            note.content = content;
        }
        if let Some(category) = self.category {
            note.category = category;
        }
        if let Some(priority) = self.priority {
            note.priority = priority;
        }
        if let Some(is_pinned) = self.is_pinned {
            note.is_pinned = is_pinned;
        }
        if let Some(todo_id) = self.todo_id {
            note.todo_id = todo_id;
        }
        if let Some(tags) = self.tags.clone() {
            note.tags = tags;
        }
        note.updated_at = now;
    }
}
