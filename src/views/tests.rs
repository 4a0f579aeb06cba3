use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::data::{
    Note, NoteCategory, Priority, Todo, TodoCategory, TodoPatch, TodoStatus,
};

use super::*;

const CREATED: OffsetDateTime = datetime!(2026-02-01 09:00 UTC);

fn todo(n: u128, end_date: OffsetDateTime) -> Todo {
    Todo {
        id: Uuid::from_u128(n),
        title: format!("todo {n}"),
        description: format!("description {n}"),
        category: TodoCategory::Work,
        status: TodoStatus::Pending,
        start_date: CREATED,
        end_date,
        priority: Priority::Medium,
        created_at: CREATED,
        updated_at: CREATED,
    }
}

fn note(n: u128, is_pinned: bool, created_at: OffsetDateTime) -> Note {
    Note {
        id: Uuid::from_u128(n),
        title: format!("note {n}"),
        content: format!("content {n}"),
        category: NoteCategory::Ideas,
        priority: Priority::Medium,
        is_pinned,
        todo_id: None,
        tags: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

fn ids(todos: &[Todo]) -> Vec<Uuid> {
    todos.iter().map(|t| t.id).collect()
}

fn note_ids(notes: &[Note]) -> Vec<Uuid> {
    notes.iter().map(|n| n.id).collect()
}

#[test]
fn empty_filter_is_the_full_collection_resorted() {
    let todos = vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
        todo(3, datetime!(2026-03-10 00:00 UTC)),
    ];
    let filtered = filter_and_sort_todos(&todos, &TodoFilter::default());
    assert_eq!(filtered.len(), todos.len());
    assert_eq!(
        ids(&filtered),
        vec![Uuid::from_u128(2), Uuid::from_u128(1), Uuid::from_u128(3)],
    );
}

#[test]
fn filtering_is_idempotent() {
    let todos = vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
        todo(3, datetime!(2026-03-10 00:00 UTC)),
    ];
    let filter = TodoFilter {
        search: "todo".into(),
        ..TodoFilter::default()
    };
    let once = filter_and_sort_todos(&todos, &filter);
    let twice = filter_and_sort_todos(&once, &filter);
    assert_eq!(once, twice);
}

#[test]
fn derived_todos_are_nondecreasing_by_end_date() {
    let todos: Vec<_> = [9i64, 3, 7, 1, 3, 9, 2]
        .iter()
        .enumerate()
        .map(|(i, day)| {
            todo(
                i as u128,
                datetime!(2026-03-01 00:00 UTC) + time::Duration::days(*day),
            )
        })
        .collect();
    let filtered = filter_and_sort_todos(&todos, &TodoFilter::default());
    assert!(
        filtered.windows(2).all(|w| w[0].end_date <= w[1].end_date)
    );
}

#[test]
fn equal_end_dates_keep_collection_order() {
    let end = datetime!(2026-03-05 00:00 UTC);
    let todos = vec![todo(1, end), todo(2, end), todo(3, end)];
    let filtered = filter_and_sort_todos(&todos, &TodoFilter::default());
    assert_eq!(
        ids(&filtered),
        vec![Uuid::from_u128(1), Uuid::from_u128(2), Uuid::from_u128(3)],
    );
}

#[test]
fn whitespace_search_is_no_search() {
    let todos = vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
    ];
    let unfiltered = filter_and_sort_todos(&todos, &TodoFilter::default());
    let blank_search = filter_and_sort_todos(
        &todos,
        &TodoFilter {
            search: "  ".into(),
            ..TodoFilter::default()
        },
    );
    assert_eq!(unfiltered, blank_search);
}

#[test]
fn search_is_case_insensitive_and_covers_description() {
    let mut a = todo(1, datetime!(2026-03-05 00:00 UTC));
    a.title = "Quarterly Report".into();
    let mut b = todo(2, datetime!(2026-03-01 00:00 UTC));
    b.description = "ship the REPORT to finance".into();
    let c = todo(3, datetime!(2026-03-02 00:00 UTC));
    let filter = TodoFilter {
        search: "report".into(),
        ..TodoFilter::default()
    };
    let filtered = filter_and_sort_todos(&[a, b, c], &filter);
    assert_eq!(
        ids(&filtered),
        vec![Uuid::from_u128(2), Uuid::from_u128(1)],
    );
}

#[test]
fn empty_category_set_selects_everything() {
    let mut a = todo(1, datetime!(2026-03-01 00:00 UTC));
    a.category = TodoCategory::Health;
    let b = todo(2, datetime!(2026-03-02 00:00 UTC));
    let filtered = filter_and_sort_todos(&[a, b], &TodoFilter::default());
    assert_eq!(filtered.len(), 2);
}

#[test]
fn category_status_and_priority_combine_as_conjunction() {
    let mut a = todo(1, datetime!(2026-03-01 00:00 UTC));
    a.category = TodoCategory::Health;
    a.status = TodoStatus::Completed;
    a.priority = Priority::High;
    let mut b = todo(2, datetime!(2026-03-02 00:00 UTC));
    b.category = TodoCategory::Health;
    b.status = TodoStatus::Completed;
    let mut c = todo(3, datetime!(2026-03-03 00:00 UTC));
    c.category = TodoCategory::Health;
    let d = todo(4, datetime!(2026-03-04 00:00 UTC));

    let filter = TodoFilter {
        categories: vec![TodoCategory::Health],
        status: Some(TodoStatus::Completed),
        priorities: vec![Priority::High],
        search: String::new(),
    };
    let filtered = filter_and_sort_todos(&[a, b, c, d], &filter);
    assert_eq!(ids(&filtered), vec![Uuid::from_u128(1)]);
}

#[test]
fn three_todos_scenario() {
    // end dates Mar 5, Mar 1, Mar 10 with an empty filter
    let todos = vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
        todo(3, datetime!(2026-03-10 00:00 UTC)),
    ];
    let mut view = TodoView::new();
    view.set_todos(todos);
    assert_eq!(
        ids(view.filtered()),
        vec![Uuid::from_u128(2), Uuid::from_u128(1), Uuid::from_u128(3)],
    );
}

#[test]
fn view_add_prepends_and_recomputes() {
    let mut view = TodoView::new();
    view.set_todos(vec![todo(1, datetime!(2026-03-05 00:00 UTC))]);
    view.add_todo(todo(2, datetime!(2026-03-01 00:00 UTC)));
    assert_eq!(view.todos()[0].id, Uuid::from_u128(2));
    assert_eq!(
        ids(view.filtered()),
        vec![Uuid::from_u128(2), Uuid::from_u128(1)],
    );
}

#[test]
fn view_update_applies_patch_and_refilters() {
    let mut view = TodoView::new();
    view.set_filter(
        TodoFilter {
            status: Some(TodoStatus::Pending),
            ..TodoFilter::default()
        }
    );
    view.set_todos(vec![todo(1, datetime!(2026-03-05 00:00 UTC))]);
    assert_eq!(view.filtered().len(), 1);

    let patch = TodoPatch {
        status: Some(TodoStatus::Completed),
        ..TodoPatch::default()
    };
    let updated = view.update_todo(
        Uuid::from_u128(1),
        &patch,
        datetime!(2026-02-02 10:00 UTC),
    );
    assert!(updated);
    assert_eq!(view.todos()[0].status, TodoStatus::Completed);
    assert!(view.filtered().is_empty());
}

#[test]
fn view_update_unknown_id_reports_false() {
    let mut view = TodoView::new();
    assert!(
        !view.update_todo(
            Uuid::from_u128(1),
            &TodoPatch::default(),
            CREATED,
        )
    );
}

#[test]
fn deleting_removes_from_collection_and_derived_view() {
    let mut view = TodoView::new();
    view.set_todos(vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
    ]);
    assert!(view.delete_todo(Uuid::from_u128(1)));
    assert!(view.todos().iter().all(|t| t.id != Uuid::from_u128(1)));
    assert!(view.filtered().iter().all(|t| t.id != Uuid::from_u128(1)));
    assert!(!view.delete_todo(Uuid::from_u128(1)));
}

#[test]
fn clear_filter_restores_the_full_view() {
    let mut view = TodoView::new();
    view.set_todos(vec![
        todo(1, datetime!(2026-03-05 00:00 UTC)),
        todo(2, datetime!(2026-03-01 00:00 UTC)),
    ]);
    view.set_filter(
        TodoFilter {
            search: "todo 1".into(),
            ..TodoFilter::default()
        }
    );
    assert_eq!(view.filtered().len(), 1);
    view.clear_filter();
    assert_eq!(view.filtered().len(), 2);
    assert_eq!(view.filter(), &TodoFilter::default());
}

#[test]
fn pinned_notes_precede_unpinned_regardless_of_input_order() {
    let notes = vec![
        note(1, false, datetime!(2026-01-05 00:00 UTC)),
        note(2, true, datetime!(2026-01-01 00:00 UTC)),
        note(3, false, datetime!(2026-01-03 00:00 UTC)),
        note(4, true, datetime!(2026-01-02 00:00 UTC)),
    ];
    let filtered = filter_and_sort_notes(&notes, &NoteFilter::default());
    let pinned_prefix: Vec<_> =
        filtered.iter().map(|n| n.is_pinned).collect();
    assert_eq!(pinned_prefix, vec![true, true, false, false]);
}

#[test]
fn two_notes_scenario() {
    // one pinned created Jan 1, one unpinned created Jan 5
    let notes = vec![
        note(1, false, datetime!(2026-01-05 00:00 UTC)),
        note(2, true, datetime!(2026-01-01 00:00 UTC)),
    ];
    let filtered = filter_and_sort_notes(&notes, &NoteFilter::default());
    assert_eq!(
        note_ids(&filtered),
        vec![Uuid::from_u128(2), Uuid::from_u128(1)],
    );
}

#[test]
fn notes_sort_newest_first_within_pin_groups() {
    let notes = vec![
        note(1, true, datetime!(2026-01-01 00:00 UTC)),
        note(2, true, datetime!(2026-01-04 00:00 UTC)),
        note(3, false, datetime!(2026-01-02 00:00 UTC)),
        note(4, false, datetime!(2026-01-03 00:00 UTC)),
    ];
    let filtered = filter_and_sort_notes(&notes, &NoteFilter::default());
    assert_eq!(
        note_ids(&filtered),
        vec![
            Uuid::from_u128(2),
            Uuid::from_u128(1),
            Uuid::from_u128(4),
            Uuid::from_u128(3),
        ],
    );
}

#[test]
fn note_search_covers_tags() {
    let mut a = note(1, false, datetime!(2026-01-01 00:00 UTC));
    a.tags = vec!["groceries".into()];
    let b = note(2, false, datetime!(2026-01-02 00:00 UTC));
    let filter = NoteFilter {
        search: "GROCER".into(),
        ..NoteFilter::default()
    };
    let filtered = filter_and_sort_notes(&[a, b], &filter);
    assert_eq!(note_ids(&filtered), vec![Uuid::from_u128(1)]);
}

#[test]
fn note_tag_criterion_matches_any_requested_tag() {
    let mut a = note(1, false, datetime!(2026-01-01 00:00 UTC));
    a.tags = vec!["home".into(), "urgent".into()];
    let mut b = note(2, false, datetime!(2026-01-02 00:00 UTC));
    b.tags = vec!["work".into()];
    let c = note(3, false, datetime!(2026-01-03 00:00 UTC));
    let filter = NoteFilter {
        tags: vec!["urgent".into(), "errands".into()],
        ..NoteFilter::default()
    };
    let filtered = filter_and_sort_notes(&[a, b, c], &filter);
    assert_eq!(note_ids(&filtered), vec![Uuid::from_u128(1)]);
}

#[test]
fn pinned_tristate_unset_selects_everything() {
    let notes = vec![
        note(1, true, datetime!(2026-01-01 00:00 UTC)),
        note(2, false, datetime!(2026-01-02 00:00 UTC)),
    ];
    assert_eq!(
        filter_and_sort_notes(&notes, &NoteFilter::default()).len(),
        2,
    );
    let pinned_only = NoteFilter {
        is_pinned: Some(true),
        ..NoteFilter::default()
    };
    assert_eq!(
        note_ids(&filter_and_sort_notes(&notes, &pinned_only)),
        vec![Uuid::from_u128(1)],
    );
    let unpinned_only = NoteFilter {
        is_pinned: Some(false),
        ..NoteFilter::default()
    };
    assert_eq!(
        note_ids(&filter_and_sort_notes(&notes, &unpinned_only)),
        vec![Uuid::from_u128(2)],
    );
}

#[test]
fn note_view_update_replaces_and_refilters() {
    let mut view = NoteView::new();
    view.set_notes(vec![
        note(1, false, datetime!(2026-01-01 00:00 UTC)),
        note(2, false, datetime!(2026-01-02 00:00 UTC)),
    ]);
    let mut replacement = note(1, true, datetime!(2026-01-01 00:00 UTC));
    replacement.title = "renamed".into();
    assert!(view.update_note(replacement));
    assert_eq!(view.filtered()[0].id, Uuid::from_u128(1));
    assert_eq!(view.filtered()[0].title, "renamed");

    let stranger = note(9, false, datetime!(2026-01-09 00:00 UTC));
    assert!(!view.update_note(stranger));
    assert_eq!(view.notes().len(), 2);
}

#[test]
fn note_view_delete_removes_from_both_lists() {
    let mut view = NoteView::new();
    view.set_notes(vec![
        note(1, true, datetime!(2026-01-01 00:00 UTC)),
        note(2, false, datetime!(2026-01-02 00:00 UTC)),
    ]);
    assert!(view.delete_note(Uuid::from_u128(1)));
    assert!(view.notes().iter().all(|n| n.id != Uuid::from_u128(1)));
    assert!(view.filtered().iter().all(|n| n.id != Uuid::from_u128(1)));
}
