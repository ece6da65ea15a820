use std::collections::HashSet;

use jam_core::{
    update, AppState, CollectionPage, CollectionSummary, CompanyId, CompanyRow, Effect, Job, Msg,
    NotificationLevel, PageKey, COPY_JOB_FINISHED,
};

fn init_logging() {
    jam_logging::initialize_for_tests();
}

fn key(collection: &str, offset: u64, limit: u64) -> PageKey {
    PageKey {
        collection_id: collection.to_string(),
        offset,
        limit,
    }
}

fn page(collection: &str, ids: std::ops::Range<i64>, total: u64) -> CollectionPage {
    CollectionPage {
        id: collection.to_string(),
        name: format!("Collection {collection}"),
        companies: ids
            .map(|id| CompanyRow {
                id,
                name: format!("Company {id}"),
                liked: false,
            })
            .collect(),
        total,
        job: None,
    }
}

fn job(source: &str, target: &str, message: &str) -> Job {
    Job {
        id: "job-1".to_string(),
        status: "active".to_string(),
        message: message.to_string(),
        source_collection_id: source.to_string(),
        target_collection_id: target.to_string(),
    }
}

/// State with collections `a` and `b` loaded, `a` selected and its first page shown.
fn with_first_page(total: u64) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::CollectionsLoaded(Ok(vec![
            CollectionSummary {
                id: "a".to_string(),
                name: "A".to_string(),
            },
            CollectionSummary {
                id: "b".to_string(),
                name: "B".to_string(),
            },
        ])),
    );
    let (state, _) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("a", 0, 25),
            result: Ok(page("a", 0..25, total)),
        },
    );
    state
}

fn loaded(state: AppState, key: PageKey, page: CollectionPage) -> AppState {
    update(
        state,
        Msg::CollectionPageLoaded {
            key,
            result: Ok(page),
        },
    )
    .0
}

#[test]
fn first_page_renders_rows_and_total() {
    init_logging();
    let state = with_first_page(500);
    let table = state.view().table.expect("table view");

    assert_eq!(table.rows.len(), 25);
    assert_eq!(table.row_count, 500);
    assert_eq!(table.page_count, 20);
    assert!(!table.loading);
    assert_eq!(table.copy_label, "Copy List");
    assert!(!table.show_reset);
}

#[test]
fn row_count_is_sticky_while_next_page_loads() {
    init_logging();
    let state = with_first_page(500);
    let (state, _) = update(state, Msg::NextPageRequested);
    let table = state.view().table.unwrap();

    assert!(table.loading);
    assert!(table.rows.is_empty());
    assert_eq!(table.row_count, 500);
}

#[test]
fn row_count_is_sticky_across_failed_refetch() {
    init_logging();
    let state = with_first_page(500);
    let (state, effects) = update(state, Msg::RefetchIntervalElapsed);
    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("a", 0, 25))]);

    let (state, _) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("a", 0, 25),
            result: Err("timeout".to_string()),
        },
    );
    let view = state.view();
    let table = view.table.unwrap();
    assert_eq!(table.row_count, 500);
    assert_eq!(table.rows.len(), 25);
    assert_eq!(view.notifications[0].level, NotificationLevel::Error);
}

#[test]
fn row_count_is_sticky_when_switching_collections() {
    init_logging();
    let state = with_first_page(500);
    let (state, _) = update(state, Msg::CollectionClicked("b".to_string()));
    assert_eq!(state.view().table.unwrap().row_count, 500);

    let state = loaded(state, key("b", 0, 25), page("b", 900..910, 10));
    assert_eq!(state.view().table.unwrap().row_count, 10);
}

#[test]
fn offset_past_new_collection_total_returns_to_last_page() {
    init_logging();
    let state = with_first_page(100);
    let (state, _) = update(state, Msg::CollectionClicked("b".to_string()));
    let (state, effects) = update(state, Msg::NextPageRequested);
    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("b", 25, 25))]);

    let state = loaded(state, key("b", 0, 25), page("b", 0..3, 3));
    let (state, effects) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("b", 25, 25),
            result: Ok(page("b", 0..0, 3)),
        },
    );

    assert_eq!(state.table().offset, 0);
    assert_eq!(state.table().row_count(), 3);
    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("b", 0, 25))]);
    let table = state.view().table.expect("table view");
    assert_eq!(table.page_index, 0);
    assert_eq!(table.page_count, 1);
    assert_eq!(table.rows.len(), 3);
}

#[test]
fn shrinking_total_while_polling_moves_to_last_page() {
    init_logging();
    let state = with_first_page(100);
    let (state, _) = update(state, Msg::NextPageRequested);
    let state = loaded(state, key("a", 25, 25), page("a", 25..50, 100));
    let (state, _) = update(state, Msg::NextPageRequested);
    let state = loaded(state, key("a", 50, 25), page("a", 50..75, 100));
    assert_eq!(state.table().offset, 50);

    let (state, _) = update(state, Msg::RefetchIntervalElapsed);
    let (state, effects) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("a", 50, 25),
            result: Ok(page("a", 0..0, 40)),
        },
    );

    assert_eq!(state.table().offset, 25);
    assert_eq!(state.table().row_count(), 40);
    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("a", 25, 25))]);
}

#[test]
fn polling_is_deduplicated_while_in_flight() {
    init_logging();
    let state = with_first_page(50);
    let (state, first) = update(state, Msg::RefetchIntervalElapsed);
    let (state, second) = update(state, Msg::RefetchIntervalElapsed);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
    assert!(state.cache().is_in_flight(&key("a", 0, 25)));
}

#[test]
fn no_polling_without_selection() {
    init_logging();
    let (_state, effects) = update(AppState::new(), Msg::RefetchIntervalElapsed);
    assert!(effects.is_empty());
}

#[test]
fn selection_survives_page_changes() {
    init_logging();
    let state = with_first_page(60);
    let (state, _) = update(state, Msg::RowCursorMoved(3));
    let (state, _) = update(state, Msg::RowToggled);
    let (state, _) = update(state, Msg::NextPageRequested);
    let state = loaded(state, key("a", 25, 25), page("a", 25..50, 60));
    let (state, _) = update(state, Msg::PageSelectionToggled);

    let mut expected = vec![3];
    expected.extend(25..50);
    assert_eq!(state.table().selection.ids(), expected.as_slice());

    let (state, _) = update(state, Msg::PrevPageRequested);
    assert_eq!(state.table().selection.len(), 26);
    // Page 0 is still cached, so it shows immediately.
    let table = state.view().table.unwrap();
    assert!(!table.loading);
    assert!(table.rows[3].checked);
    assert!(!table.rows[4].checked);
    assert_eq!(table.copy_label, "Copy Selected");
    assert!(table.show_reset);
}

#[test]
fn selection_only_contains_seen_ids() {
    init_logging();
    let mut seen: HashSet<CompanyId> = HashSet::new();
    let mut state = with_first_page(75);
    seen.extend(0..25);

    for (offset, ids) in [(25u64, 25..50), (50, 50..75)] {
        state = update(state, Msg::PageSelectionToggled).0;
        state = update(state, Msg::NextPageRequested).0;
        state = loaded(state, key("a", offset, 25), page("a", ids.clone(), 75));
        seen.extend(ids);
    }
    state = update(state, Msg::RowToggled).0;

    assert!(state
        .table()
        .selection
        .ids()
        .iter()
        .all(|id| seen.contains(id)));
    assert_eq!(state.table().selection.len(), 51);
}

#[test]
fn paging_alone_never_changes_selection() {
    init_logging();
    let state = with_first_page(100);
    let (state, _) = update(state, Msg::RowToggled);
    let before = state.table().selection.clone();

    let (state, _) = update(state, Msg::NextPageRequested);
    let (state, _) = update(state, Msg::PageSizeCycled);
    let (state, _) = update(state, Msg::PrevPageRequested);

    assert_eq!(state.table().selection, before);
}

#[test]
fn page_size_change_refetches_with_new_limit() {
    init_logging();
    let state = with_first_page(100);
    let (state, effects) = update(state, Msg::PageSizeCycled);

    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("a", 0, 50))]);
    assert_eq!(state.view().table.unwrap().page_size, 50);
}

#[test]
fn reset_clears_selection() {
    init_logging();
    let state = with_first_page(100);
    let (state, _) = update(state, Msg::PageSelectionToggled);
    assert_eq!(state.table().selection.len(), 25);

    let (state, _) = update(state, Msg::SelectionReset);
    assert!(state.table().selection.is_empty());
    assert!(!state.view().table.unwrap().show_reset);
}

#[test]
fn stale_response_for_previous_collection_is_not_displayed() {
    init_logging();
    let state = with_first_page(100);
    let (state, _) = update(state, Msg::NextPageRequested);
    let (state, _) = update(state, Msg::CollectionClicked("b".to_string()));
    let state = loaded(state, key("a", 25, 25), page("a", 25..50, 100));

    let table = state.view().table.unwrap();
    assert_eq!(table.collection_id, "b");
    assert!(table.rows.is_empty());
    assert!(table.loading);
}

#[test]
fn job_progress_tracks_direction_and_completion() {
    init_logging();
    let state = with_first_page(25);
    let mut with_job = page("a", 0..25, 25);
    with_job.job = Some(job("a", "b", "120 items"));

    let (state, _) = update(state, Msg::RefetchIntervalElapsed);
    let state = loaded(state, key("a", 0, 25), with_job);
    let progress = state.view().table.unwrap().job.expect("job progress");
    assert_eq!(progress.label, "Exporting 120 items");

    let (state, _) = update(state, Msg::RefetchIntervalElapsed);
    let state = loaded(state, key("a", 0, 25), page("a", 0..25, 25));
    let view = state.view();
    assert!(view.table.unwrap().job.is_none());
    assert!(view
        .notifications
        .iter()
        .any(|n| n.text == COPY_JOB_FINISHED && n.level == NotificationLevel::Success));
}

#[test]
fn importing_side_shows_importing_label() {
    init_logging();
    let state = with_first_page(25);
    let (state, _) = update(state, Msg::CollectionClicked("b".to_string()));
    let mut with_job = page("b", 0..5, 5);
    with_job.job = Some(job("a", "b", "3 items"));
    let state = loaded(state, key("b", 0, 25), with_job);

    assert_eq!(
        state.view().table.unwrap().job.unwrap().label,
        "Importing 3 items"
    );
}

#[test]
fn ticks_expire_notifications() {
    init_logging();
    let state = with_first_page(25);
    let (mut state, _) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("a", 0, 25),
            result: Err("offline".to_string()),
        },
    );
    assert_eq!(state.view().notifications.len(), 1);
    assert!(state.consume_dirty());

    for _ in 0..jam_core::NOTIFICATION_TTL_TICKS {
        state = update(state, Msg::Tick).0;
    }
    assert!(state.view().notifications.is_empty());
    assert!(state.consume_dirty());
}
