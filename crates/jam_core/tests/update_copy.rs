use jam_core::{
    update, AppState, CollectionPage, CollectionSummary, CompanyRow, CopyRequest, Effect, Msg,
    NotificationLevel, PageKey, COPY_STARTED, TARGET_REQUIRED,
};

fn init_logging() {
    jam_logging::initialize_for_tests();
}

fn key(collection: &str) -> PageKey {
    PageKey {
        collection_id: collection.to_string(),
        offset: 0,
        limit: 25,
    }
}

fn companies(ids: &[i64]) -> Vec<CompanyRow> {
    ids.iter()
        .map(|id| CompanyRow {
            id: *id,
            name: format!("c{id}"),
            liked: false,
        })
        .collect()
}

/// Collections `src`, `T`, `other`; `src` selected with companies 5, 7, 9, 12.
fn ready() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, _) = update(
        state,
        Msg::CollectionsLoaded(Ok(["src", "T", "other"]
            .iter()
            .map(|id| CollectionSummary {
                id: id.to_string(),
                name: format!("{id} list"),
            })
            .collect())),
    );
    let (state, _) = update(
        state,
        Msg::CollectionPageLoaded {
            key: key("src"),
            result: Ok(CollectionPage {
                id: "src".to_string(),
                name: "src list".to_string(),
                companies: companies(&[5, 7, 9, 12]),
                total: 4,
                job: None,
            }),
        },
    );
    state
}

fn open_dialog(state: AppState) -> AppState {
    let (state, _) = update(state, Msg::ActionsMenuToggled);
    update(state, Msg::CopyActionClicked).0
}

fn select_rows(mut state: AppState, rows: &[isize]) -> AppState {
    let mut position = 0isize;
    for row in rows {
        state = update(state, Msg::RowCursorMoved(row - position)).0;
        position = *row;
        state = update(state, Msg::RowToggled).0;
    }
    state
}

#[test]
fn copy_selected_sends_exact_payload() {
    init_logging();
    let state = select_rows(ready(), &[1, 3]);
    let state = open_dialog(state);
    let dialog = state.view().dialog.expect("dialog open");
    assert_eq!(dialog.title, "Copy Selected Companies");

    // First option is "T".
    let (state, _) = update(state, Msg::DialogTargetMoved(1));
    let (state, effects) = update(state, Msg::CopySubmitted);

    assert_eq!(
        effects,
        vec![Effect::CopyCompanies(CopyRequest {
            source_collection_id: "src".to_string(),
            target_collection_id: "T".to_string(),
            selected_company_ids: vec!["7".to_string(), "12".to_string()],
        })]
    );
    assert!(state.view().dialog.unwrap().pending);
}

#[test]
fn copy_list_sends_empty_selection() {
    init_logging();
    let state = open_dialog(ready());
    let view = state.view();
    assert_eq!(view.dialog.as_ref().unwrap().title, "Copy List");

    let (state, _) = update(state, Msg::DialogTargetMoved(-1));
    let (_state, effects) = update(state, Msg::CopySubmitted);

    assert_eq!(
        effects,
        vec![Effect::CopyCompanies(CopyRequest {
            source_collection_id: "src".to_string(),
            target_collection_id: "other".to_string(),
            selected_company_ids: Vec::new(),
        })]
    );
}

#[test]
fn menu_label_reflects_selection() {
    init_logging();
    let (state, _) = update(ready(), Msg::ActionsMenuToggled);
    assert_eq!(state.view().menu.unwrap().items, vec!["Copy List"]);

    let (state, _) = update(state, Msg::ActionsMenuToggled);
    let state = select_rows(state, &[0]);
    let (state, _) = update(state, Msg::ActionsMenuToggled);
    assert_eq!(state.view().menu.unwrap().items, vec!["Copy Selected"]);
}

#[test]
fn targets_exclude_the_source() {
    init_logging();
    let state = open_dialog(ready());
    let ids: Vec<_> = state
        .view()
        .dialog
        .unwrap()
        .options
        .into_iter()
        .map(|option| option.id)
        .collect();

    assert_eq!(ids, vec!["T".to_string(), "other".to_string()]);
}

#[test]
fn submit_without_target_keeps_dialog_open() {
    init_logging();
    let state = open_dialog(ready());
    let (state, effects) = update(state, Msg::CopySubmitted);

    assert!(effects.is_empty());
    let dialog = state.view().dialog.expect("still open");
    assert_eq!(dialog.error.as_deref(), Some(TARGET_REQUIRED));
    assert!(!dialog.pending);
}

#[test]
fn success_closes_dialog_notifies_and_refetches() {
    init_logging();
    let state = open_dialog(ready());
    let (state, _) = update(state, Msg::DialogTargetMoved(1));
    let (state, _) = update(state, Msg::CopySubmitted);
    let (state, effects) = update(state, Msg::CopyFinished(Ok(())));
    let view = state.view();

    assert!(view.dialog.is_none());
    assert!(view.menu.is_none());
    assert_eq!(effects, vec![Effect::FetchCollectionPage(key("src"))]);
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].text, COPY_STARTED);
    assert_eq!(view.notifications[0].level, NotificationLevel::Success);
}

#[test]
fn failure_keeps_dialog_open_for_retry() {
    init_logging();
    let state = open_dialog(ready());
    let (state, _) = update(state, Msg::DialogTargetMoved(1));
    let (state, _) = update(state, Msg::CopySubmitted);
    let (state, effects) = update(
        state,
        Msg::CopyFinished(Err(
            "Collection has an active job, please wait for it to finish.".to_string(),
        )),
    );
    assert!(effects.is_empty());

    let view = state.view();
    let dialog = view.dialog.expect("dialog stays open");
    assert!(!dialog.pending);
    assert!(dialog.options[0].chosen);
    assert_eq!(view.notifications[0].level, NotificationLevel::Error);

    let (_state, effects) = update(state, Msg::CopySubmitted);
    assert_eq!(effects.len(), 1);
}

#[test]
fn pending_dialog_cannot_be_cancelled() {
    init_logging();
    let state = open_dialog(ready());
    let (state, _) = update(state, Msg::DialogTargetMoved(1));
    let (state, _) = update(state, Msg::CopySubmitted);
    let (state, _) = update(state, Msg::DialogCancelled);
    assert!(state.view().dialog.is_some());
}

#[test]
fn cancel_discards_the_choice() {
    init_logging();
    let state = open_dialog(ready());
    let (state, _) = update(state, Msg::DialogTargetMoved(1));
    let (state, _) = update(state, Msg::DialogCancelled);
    assert!(state.view().dialog.is_none());

    let state = open_dialog(state);
    assert!(state
        .view()
        .dialog
        .unwrap()
        .options
        .iter()
        .all(|option| !option.chosen));
}

#[test]
fn copy_action_requires_open_menu() {
    init_logging();
    let (state, _) = update(ready(), Msg::CopyActionClicked);
    assert!(state.view().dialog.is_none());
}
