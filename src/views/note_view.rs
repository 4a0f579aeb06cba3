use uuid::Uuid;

use crate::data::{Note, NoteCategory, Priority};
use crate::util::StrExt;

/// Display filter for a note collection. Empty sets and `None` select
/// everything; criteria combine as a conjunction. Search also looks inside
/// tags; the `tags` criterion itself matches notes carrying at least one of
/// the requested tags.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NoteFilter {
    pub categories: Vec<NoteCategory>,
    pub is_pinned: Option<bool>,
    pub priorities: Vec<Priority>,
    pub search: String,
    pub tags: Vec<String>,
}

impl NoteFilter {
    fn matches(&self, note: &Note) -> bool {
        if !self.categories.is_empty()
            && !self.categories.contains(&note.category)
        {
            return false;
        }
        if let Some(is_pinned) = self.is_pinned {
            if note.is_pinned != is_pinned {
                return false;
            }
        }
        if !self.priorities.is_empty()
            && !self.priorities.contains(&note.priority)
        {
            return false;
        }
        if let Some(term) = self.search.nonblank_to_some() {
            let term = term.to_lowercase();
            if !note.title.to_lowercase().contains(&term)
                && !note.content.to_lowercase().contains(&term)
                && !note.tags.iter().any(|t| t.to_lowercase().contains(&term))
            {
                return false;
            }
        }
        if !self.tags.is_empty()
            && !self.tags.iter().any(|t| note.tags.contains(t))
        {
            return false;
        }
        true
    }
}

/// Pinned notes first, then newest first within each group.
pub fn filter_and_sort_notes(notes: &[Note], filter: &NoteFilter) -> Vec<Note> {
    let mut filtered: Vec<_> = notes
        .iter()
        .filter(|n| filter.matches(n))
        .cloned()
        .collect();
    filtered.sort_by(|a, b|
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    );
    filtered
}

#[derive(Debug, Default)]
pub struct NoteView {
    notes: Vec<Note>,
    filter: NoteFilter,
    filtered: Vec<Note>,
}

impl NoteView {
    pub fn new() -> NoteView {
        NoteView::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn filtered(&self) -> &[Note] {
        &self.filtered
    }

    pub fn filter(&self) -> &NoteFilter {
        &self.filter
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.recompute();
    }

    pub fn add_note(&mut self, note: Note) {
        self.notes.insert(0, note);
        self.recompute();
    }

    /// Replaces the note with the same id wholesale. Returns false when no
    /// note carries the id.
    pub fn update_note(&mut self, note: Note) -> bool {
        let found = match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                *slot = note;
                true
            },
            None => false,
        };
        self.recompute();
        found
    }

    pub fn delete_note(&mut self, id: Uuid) -> bool {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        self.recompute();
        removed
    }

    pub fn set_filter(&mut self, filter: NoteFilter) {
        self.filter = filter;
        self.recompute();
    }

    pub fn clear_filter(&mut self) {
        self.set_filter(NoteFilter::default());
    }

    fn recompute(&mut self) {
        self.filtered = filter_and_sort_notes(&self.notes, &self.filter);
    }
}
