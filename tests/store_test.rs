use std::sync::Arc;

use tokio::sync::broadcast;
use vista::{
    FilterKey, FilterValue, GroupBy, MemoryPreferenceStore, OrderBy, PersistenceEvent,
    PreferenceStore, PropertyName, ViewPreferences, ViewStateStore, ViewType, WorkspaceSlug,
};

fn slug(s: &str) -> WorkspaceSlug {
    WorkspaceSlug::new(s).unwrap()
}

fn new_store(backend: &Arc<MemoryPreferenceStore>) -> ViewStateStore {
    ViewStateStore::new(backend.clone()).unwrap()
}

fn drain(events: &mut broadcast::Receiver<PersistenceEvent>) -> Vec<PersistenceEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test]
async fn test_scopes_do_not_share_state() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);

    store.switch_scope(slug("acme")).await;
    store.set_view(ViewType::Kanban);
    store.set_group_by(GroupBy::Priority);
    store
        .set_filter(FilterKey::Labels, FilterValue::scalar("bug"))
        .unwrap();

    store.switch_scope(slug("globex")).await;
    assert_eq!(store.state(), &ViewPreferences::default());

    store.switch_scope(slug("acme")).await;
    assert_eq!(store.state().view, ViewType::Kanban);
    assert_eq!(store.state().group_by, GroupBy::Priority);
    assert_eq!(
        store.state().filters.list(FilterKey::Labels),
        Some(&["bug".to_string()][..])
    );
}

#[tokio::test]
async fn test_switching_to_active_scope_keeps_unsaved_memory() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    store.switch_scope(slug("acme")).await;

    backend.set_fail_saves(true);
    store.set_order_by(OrderBy::LastUpdated);
    store.switch_scope(slug("acme")).await;

    assert_eq!(store.state().order_by, OrderBy::LastUpdated);
}

#[tokio::test]
async fn test_view_switch_keeps_grouping_ordering_and_filters() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    store.switch_scope(slug("acme")).await;

    store.set_group_by(GroupBy::Labels);
    store.set_order_by(OrderBy::StartDate);
    store
        .set_filter(FilterKey::Priority, FilterValue::scalar("urgent"))
        .unwrap();

    store.set_view(ViewType::Calendar);
    store.set_view(ViewType::List);

    let state = store.state();
    assert_eq!(state.group_by, GroupBy::Labels);
    assert_eq!(state.order_by, OrderBy::StartDate);
    assert_eq!(
        state.filters.list(FilterKey::Priority),
        Some(&["urgent".to_string()][..])
    );
}

#[tokio::test]
async fn test_multi_select_toggle_back_to_empty_is_null() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    store.switch_scope(slug("acme")).await;

    store
        .set_filter(FilterKey::State, FilterValue::scalar("todo"))
        .unwrap();
    store
        .set_filter(FilterKey::State, FilterValue::scalar("done"))
        .unwrap();
    assert_eq!(
        store.state().filters.get(FilterKey::State),
        Some(FilterValue::list(["todo", "done"]))
    );

    store
        .set_filter(FilterKey::State, FilterValue::scalar("todo"))
        .unwrap();
    store
        .set_filter(FilterKey::State, FilterValue::scalar("done"))
        .unwrap();
    assert_eq!(store.state().filters.get(FilterKey::State), None);

    store.flush().await;
    let saved = backend.get(&slug("acme")).unwrap();
    assert_eq!(saved.filters.get(FilterKey::State), None);
}

#[tokio::test]
async fn test_date_same_set_clears_and_other_set_replaces() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    store.switch_scope(slug("acme")).await;

    let first = FilterValue::list(["2023-01-01;after", "2023-02-01;before"]);
    store.set_filter(FilterKey::StartDate, first.clone()).unwrap();
    assert_eq!(store.state().filters.get(FilterKey::StartDate), Some(first));

    // Same set in another order still counts as the same set.
    store
        .set_filter(
            FilterKey::StartDate,
            FilterValue::list(["2023-02-01;before", "2023-01-01;after"]),
        )
        .unwrap();
    assert_eq!(store.state().filters.get(FilterKey::StartDate), None);

    store
        .set_filter(
            FilterKey::StartDate,
            FilterValue::list(["2023-01-01;after"]),
        )
        .unwrap();
    let replacement = FilterValue::list(["2023-01-01;after", "2023-03-01;before"]);
    store
        .set_filter(FilterKey::StartDate, replacement.clone())
        .unwrap();
    assert_eq!(
        store.state().filters.get(FilterKey::StartDate),
        Some(replacement)
    );
}

#[tokio::test]
async fn test_save_failure_is_reported_without_rollback() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    let mut events = store.subscribe();
    store.switch_scope(slug("acme")).await;

    backend.set_fail_saves(true);
    let visible = store.toggle_property(PropertyName::DueDate);
    store.flush().await;

    assert!(!visible);
    assert!(!store.state().properties.get(PropertyName::DueDate));
    assert_eq!(backend.get(&slug("acme")), None);

    let events = drain(&mut events);
    assert_eq!(events.len(), 1);
    match &events[0] {
        PersistenceEvent::SaveFailed {
            scope, revision, ..
        } => {
            assert_eq!(scope, &slug("acme"));
            assert_eq!(*revision, 1);
        }
        other => panic!("expected SaveFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_later_mutations_still_save_after_a_failure() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    let mut events = store.subscribe();
    store.switch_scope(slug("acme")).await;

    backend.set_fail_saves(true);
    store.set_view(ViewType::Gantt);
    store.flush().await;

    backend.set_fail_saves(false);
    store.set_show_empty_groups(false);
    store.flush().await;

    let saved = backend.get(&slug("acme")).unwrap();
    assert_eq!(saved.view, ViewType::Gantt);
    assert!(!saved.show_empty_groups);

    let events = drain(&mut events);
    assert!(events[0].is_failure());
    assert_eq!(
        events[1],
        PersistenceEvent::Saved {
            scope: slug("acme"),
            revision: 2
        }
    );
}

#[tokio::test]
async fn test_last_mutation_is_last_write() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    let mut events = store.subscribe();
    store.switch_scope(slug("acme")).await;

    for view in ViewType::ALL {
        store.set_view(view);
    }
    store
        .set_filter(FilterKey::Type, FilterValue::scalar("backlog"))
        .unwrap();
    store.flush().await;

    assert_eq!(backend.get(&slug("acme")).as_ref(), Some(store.state()));

    let revisions: Vec<u64> = drain(&mut events)
        .into_iter()
        .map(|event| match event {
            PersistenceEvent::Saved { revision, .. } => revision,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(revisions, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn test_load_failure_falls_back_to_defaults() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    backend.insert(
        slug("acme"),
        ViewPreferences {
            view: ViewType::Spreadsheet,
            ..Default::default()
        },
    );
    backend.set_fail_loads(true);

    let defaults = ViewPreferences {
        order_by: OrderBy::LastUpdated,
        ..Default::default()
    };
    let mut store = new_store(&backend).with_defaults(defaults.clone());
    let mut events = store.subscribe();
    store.switch_scope(slug("acme")).await;

    assert_eq!(store.scope(), Some(&slug("acme")));
    assert_eq!(store.state(), &defaults);

    let events = drain(&mut events);
    assert!(matches!(
        events.as_slice(),
        [PersistenceEvent::LoadFailed { scope, .. }] if scope == &slug("acme")
    ));
}

#[tokio::test]
async fn test_invalid_filter_is_rejected_before_anything_changes() {
    let backend = Arc::new(MemoryPreferenceStore::new());
    let mut store = new_store(&backend);
    let mut events = store.subscribe();
    store.switch_scope(slug("acme")).await;

    assert!(
        store
            .set_filter(FilterKey::TargetDate, FilterValue::list(["next week;after"]))
            .is_err()
    );
    assert!(
        store
            .set_filter(FilterKey::Labels, FilterValue::list(["a", "b"]))
            .is_err()
    );
    store.flush().await;

    assert_eq!(store.revision(), 0);
    assert!(drain(&mut events).is_empty());
    assert_eq!(backend.load(&slug("acme")).await.unwrap(), None);
}
