use time::OffsetDateTime;
use uuid::Uuid;

use crate::data::{Priority, Todo, TodoCategory, TodoPatch, TodoStatus};
use crate::util::StrExt;

/// Display filter for a todo collection. Empty sets and `None` select
/// everything; criteria combine as a conjunction.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TodoFilter {
    pub categories: Vec<TodoCategory>,
    pub status: Option<TodoStatus>,
    pub priorities: Vec<Priority>,
    pub search: String,
}

impl TodoFilter {
    fn matches(&self, todo: &Todo) -> bool {
        if !self.categories.is_empty()
            && !self.categories.contains(&todo.category)
        {
            return false;
        }
        if let Some(status) = self.status {
            if todo.status != status {
                return false;
            }
        }
        if !self.priorities.is_empty()
            && !self.priorities.contains(&todo.priority)
        {
            return false;
        }
        if let Some(term) = self.search.nonblank_to_some() {
            let term = term.to_lowercase();
            if !todo.title.to_lowercase().contains(&term)
                && !todo.description.to_lowercase().contains(&term)
            {
                return false;
            }
        }
        true
    }
}

/// Ascending by end date. The sort is stable, so todos sharing an end date
/// keep their relative collection order.
pub fn filter_and_sort_todos(todos: &[Todo], filter: &TodoFilter) -> Vec<Todo> {
    let mut filtered: Vec<_> = todos
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    filtered.sort_by_key(|t| t.end_date);
    filtered
}

#[derive(Debug, Default)]
pub struct TodoView {
    todos: Vec<Todo>,
    filter: TodoFilter,
    filtered: Vec<Todo>,
}

impl TodoView {
    pub fn new() -> TodoView {
        TodoView::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn filtered(&self) -> &[Todo] {
        &self.filtered
    }

    pub fn filter(&self) -> &TodoFilter {
        &self.filter
    }

    pub fn set_todos(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
        self.recompute();
    }

    /// Newest first in the backing collection, matching creation order as
    /// the server reports it.
    pub fn add_todo(&mut self, todo: Todo) {
        self.todos.insert(0, todo);
        self.recompute();
    }

    /// Applies a partial update to the matching todo. Returns false when no
    /// todo carries the id.
    pub fn update_todo(
        &mut self,
        id: Uuid,
        patch: &TodoPatch,
        updated_at: OffsetDateTime,
    ) -> bool {
        let found = match self.todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                patch.apply_to(todo, updated_at);
                true
            },
            None => false,
        };
        self.recompute();
        found
    }

    pub fn delete_todo(&mut self, id: Uuid) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        let removed = self.todos.len() != before;
        self.recompute();
        removed
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(TodoFilter::default());
    }

    fn recompute(&mut self) {
        self.filtered = filter_and_sort_todos(&self.todos, &self.filter);
    }
}
