use rocket::FromForm;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use tasknest::data::{
    Note, NoteCategory, Priority, Todo, TodoCategory, TodoStatus,
};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct TodoListResponse {
    pub todos: Vec<Todo>,
}

#[derive(Serialize)]
pub struct TodoResponse {
    pub todo: Todo,
}

#[derive(Serialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

#[derive(Serialize)]
pub struct NoteResponse {
    pub note: Note,
}

/// Raw `GET /todos` query parameters as they arrive on the wire.
#[derive(FromForm)]
pub struct TodoListParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Parsed list query. `None` from the parser means some criterion can
/// never match, so the handler answers with an empty list outright.
pub struct TodoQuery {
    category: Option<TodoCategory>,
    status: Option<TodoStatus>,
    search: Option<String>,
}

impl TodoListParams {
    pub fn parse(self) -> Option<TodoQuery> {
        let category = match self.category.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().ok()?),
        };
        let status = match self.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(raw.parse().ok()?),
        };
        Some(
            TodoQuery {
                category,
                status,
                search: self.search
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_lowercase()),
            }
        )
    }
}

impl TodoQuery {
    fn matches(&self, todo: &Todo) -> bool {
        if let Some(category) = self.category {
            if todo.category != category {
                return false;
            }
        }
        if let Some(status) = self.status {
            if todo.status != status {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !todo.title.to_lowercase().contains(search)
                && !todo.description.to_lowercase().contains(search)
            {
                return false;
            }
        }
        true
    }

    /// End date ascending, newest created first among equal end dates.
    pub fn filter_list(&self, todos: Vec<Todo>) -> Vec<Todo> {
        let mut todos: Vec<_> =
            todos.into_iter().filter(|t| self.matches(t)).collect();
        todos.sort_by(|a, b|
            a.end_date
                .cmp(&b.end_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        );
        todos
    }
}

/// Raw `GET /notes` query parameters.
#[derive(FromForm)]
pub struct NoteListParams {
    pub category: Option<String>,
    pub priority: Option<String>,
    pub search: Option<String>,
    #[field(name = "isPinned")]
    pub is_pinned: Option<String>,
    pub tags: Option<String>,
}

pub struct NoteQuery {
    category: Option<NoteCategory>,
    priority: Option<Priority>,
    search: Option<String>,
    is_pinned: Option<bool>,
    tags: Option<Vec<String>>,
}

impl NoteListParams {
    pub fn parse(self) -> Option<NoteQuery> {
        let category = match self.category.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().ok()?),
        };
        let priority = match self.priority.as_deref() {
            None | Some("") => None,
            Some(raw) => Some(raw.parse().ok()?),
        };
        Some(
            NoteQuery {
                category,
                priority,
                search: self.search
                    .filter(|s| !s.is_empty())
                    .map(|s| s.to_lowercase()),
                // anything but the literal "true" means unpinned, matching
                // how the dashboard has always sent this flag
                is_pinned: self.is_pinned.map(|raw| raw == "true"),
                tags: self.tags
                    .filter(|t| !t.is_empty())
                    .map(|t| t.split(',').map(str::to_owned).collect()),
            }
        )
    }
}

impl NoteQuery {
    fn matches(&self, note: &Note) -> bool {
        if let Some(category) = self.category {
            if note.category != category {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if note.priority != priority {
                return false;
            }
        }
        if let Some(is_pinned) = self.is_pinned {
            if note.is_pinned != is_pinned {
                return false;
            }
        }
        if let Some(tags) = &self.tags {
            if !tags.iter().any(|t| note.tags.contains(t)) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !note.title.to_lowercase().contains(search)
                && !note.content.to_lowercase().contains(search)
            {
                return false;
            }
        }
        true
    }

    /// Pinned first, newest created first within each group.
    pub fn filter_list(&self, notes: Vec<Note>) -> Vec<Note> {
        let mut notes: Vec<_> =
            notes.into_iter().filter(|n| self.matches(n)).collect();
        notes.sort_by(|a, b|
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.created_at.cmp(&a.created_at))
        );
        notes
    }
}
