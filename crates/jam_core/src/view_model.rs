use crate::job::{job_progress, JobProgressView};
use crate::notify::NotificationLevel;
use crate::state::{CollectionsState, Focus};
use crate::{AppState, CollectionId, CompanyId};

/// Placeholder rows shown while the collection list loads.
pub const SKELETON_ROWS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub location: String,
    pub focus: Focus,
    pub collections: CollectionListView,
    pub table: Option<TableView>,
    pub menu: Option<ActionsMenuView>,
    pub dialog: Option<CopyDialogView>,
    pub notifications: Vec<NotificationView>,
    pub ticks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionListView {
    Loading { placeholders: usize },
    Failed(String),
    Empty,
    Items(Vec<CollectionItemView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionItemView {
    pub id: CollectionId,
    pub name: String,
    pub selected: bool,
    pub cursor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub collection_id: CollectionId,
    pub collection_name: Option<String>,
    pub rows: Vec<RowView>,
    pub loading: bool,
    pub row_count: u64,
    pub offset: u64,
    pub page_size: u64,
    pub page_index: u64,
    pub page_count: u64,
    pub selected_count: usize,
    pub job: Option<JobProgressView>,
    pub show_reset: bool,
    pub copy_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: CompanyId,
    pub name: String,
    pub liked: bool,
    pub checked: bool,
    pub cursor: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionsMenuView {
    pub items: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyDialogView {
    pub title: &'static str,
    pub prompt: &'static str,
    pub options: Vec<TargetOptionView>,
    pub error: Option<String>,
    pub pending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOptionView {
    pub id: CollectionId,
    pub label: String,
    pub chosen: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: u64,
    pub level: NotificationLevel,
    pub text: String,
}

pub fn copy_label(partial: bool) -> &'static str {
    if partial {
        "Copy Selected"
    } else {
        "Copy List"
    }
}

fn dialog_title(partial: bool) -> &'static str {
    if partial {
        "Copy Selected Companies"
    } else {
        "Copy List"
    }
}

pub(crate) fn build(state: &AppState) -> AppViewModel {
    let partial = state.is_dirty();
    AppViewModel {
        location: state.location().to_string(),
        focus: state.focus(),
        collections: collection_list(state),
        table: table_view(state),
        menu: state.menu_open().then(|| ActionsMenuView {
            items: vec![copy_label(partial)],
        }),
        dialog: state.dialog().map(|dialog| CopyDialogView {
            title: dialog_title(dialog.is_partial()),
            prompt: "Choose a target collection to copy the companies to.",
            options: dialog
                .options()
                .iter()
                .enumerate()
                .map(|(index, option)| TargetOptionView {
                    id: option.id.clone(),
                    label: option.label.clone(),
                    chosen: dialog.target_index() == Some(index),
                })
                .collect(),
            error: dialog.error().map(ToOwned::to_owned),
            pending: dialog.is_pending(),
        }),
        notifications: state
            .notifications()
            .iter()
            .map(|notification| NotificationView {
                id: notification.id,
                level: notification.level,
                text: notification.text.clone(),
            })
            .collect(),
        ticks: state.ticks(),
    }
}

fn collection_list(state: &AppState) -> CollectionListView {
    match state.collections_state() {
        CollectionsState::NotRequested | CollectionsState::Loading => {
            CollectionListView::Loading {
                placeholders: SKELETON_ROWS,
            }
        }
        CollectionsState::Failed(message) => CollectionListView::Failed(message.clone()),
        CollectionsState::Loaded(list) if list.is_empty() => CollectionListView::Empty,
        CollectionsState::Loaded(list) => CollectionListView::Items(
            list.iter()
                .enumerate()
                .map(|(index, collection)| CollectionItemView {
                    id: collection.id.clone(),
                    name: collection.name.clone(),
                    selected: state.selected() == Some(&collection.id),
                    cursor: index == state.list_cursor(),
                })
                .collect(),
        ),
    }
}

fn table_view(state: &AppState) -> Option<TableView> {
    let collection_id = state.selected()?.clone();
    let table = state.table();
    let page = state.current_page();
    let rows: Vec<RowView> = page
        .map(|page| {
            page.companies
                .iter()
                .enumerate()
                .map(|(index, company)| RowView {
                    id: company.id,
                    name: company.name.clone(),
                    liked: company.liked,
                    checked: table.selection.contains(company.id),
                    cursor: index == table.cursor,
                })
                .collect()
        })
        .unwrap_or_default();
    let collection_name = page.map(|page| page.name.clone()).or_else(|| {
        state
            .collections()
            .iter()
            .find(|collection| collection.id == collection_id)
            .map(|collection| collection.name.clone())
    });

    Some(TableView {
        collection_name,
        rows,
        loading: page.is_none(),
        row_count: table.row_count(),
        offset: table.offset,
        page_size: table.page_size,
        page_index: table.page_index(),
        page_count: table.page_count(),
        selected_count: table.selection.len(),
        job: job_progress(state.active_job(), &collection_id),
        show_reset: table.is_dirty(),
        copy_label: copy_label(table.is_dirty()),
        collection_id,
    })
}
