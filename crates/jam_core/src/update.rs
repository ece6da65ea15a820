use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            state.begin_collections_load();
            let mut effects = vec![Effect::FetchCollections];
            effects.extend(state.request_current_page());
            effects
        }
        Msg::Tick => {
            state.advance_tick();
            Vec::new()
        }
        Msg::RefetchIntervalElapsed => state.request_current_page().into_iter().collect(),
        Msg::RefreshCollectionsRequested => {
            state.begin_collections_load();
            vec![Effect::FetchCollections]
        }
        Msg::CollectionsLoaded(Ok(list)) => match state.set_collections(list) {
            Some(first) => state.select_collection(first),
            None => Vec::new(),
        },
        Msg::CollectionsLoaded(Err(message)) => {
            state.collections_failed(message);
            Vec::new()
        }
        Msg::CollectionPageLoaded { key, result } => {
            state.apply_page(key, result).into_iter().collect()
        }
        Msg::CopyFinished(result) => state.finish_copy(result).into_iter().collect(),
        Msg::FocusToggled => {
            state.toggle_focus();
            Vec::new()
        }
        Msg::ListCursorMoved(delta) => {
            state.move_list_cursor(delta);
            Vec::new()
        }
        Msg::ListCursorActivated => match state.collection_at_cursor() {
            Some(id) => state.select_collection(id),
            None => Vec::new(),
        },
        Msg::CollectionClicked(id) => state.select_collection(id),
        Msg::RowCursorMoved(delta) => {
            let rows = visible_rows(&state);
            state.table_mut().move_cursor(delta, rows);
            state.mark_dirty();
            Vec::new()
        }
        Msg::RowToggled => {
            let row = state.current_page().and_then(|page| {
                page.companies
                    .get(state.table().cursor)
                    .map(|company| company.id)
            });
            if let Some(id) = row {
                state.table_mut().selection.toggle(id);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PageSelectionToggled => {
            let ids: Vec<_> = state
                .current_page()
                .map(|page| page.companies.iter().map(|company| company.id).collect())
                .unwrap_or_default();
            if !ids.is_empty() {
                state.table_mut().selection.toggle_all(&ids);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NextPageRequested => {
            if state.selected().is_some() && state.table_mut().next_page() {
                state.mark_dirty();
                state.request_current_page().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PrevPageRequested => {
            if state.selected().is_some() && state.table_mut().prev_page() {
                state.mark_dirty();
                state.request_current_page().into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::PageSizeCycled => {
            if state.selected().is_none() {
                return (state, Vec::new());
            }
            state.table_mut().cycle_page_size();
            state.mark_dirty();
            state.request_current_page().into_iter().collect()
        }
        Msg::SelectionReset => {
            if state.is_dirty() {
                state.table_mut().selection.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ActionsMenuToggled => {
            state.toggle_menu();
            Vec::new()
        }
        Msg::CopyActionClicked => {
            if state.menu_open() {
                state.open_copy_dialog();
            }
            Vec::new()
        }
        Msg::DialogTargetMoved(delta) => {
            if let Some(dialog) = state.dialog_mut() {
                dialog.move_target(delta);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CopySubmitted => {
            let request = state.dialog_mut().and_then(|dialog| dialog.submit());
            if state.dialog().is_some() {
                state.mark_dirty();
            }
            request.map(Effect::CopyCompanies).into_iter().collect()
        }
        Msg::DialogCancelled => {
            state.close_copy_dialog();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn visible_rows(state: &AppState) -> usize {
    state
        .current_page()
        .map(|page| page.companies.len())
        .unwrap_or(0)
}
