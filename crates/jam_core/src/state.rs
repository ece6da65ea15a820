use crate::notify::{NotificationLevel, Notifications};
use crate::view_model::{self, AppViewModel};
use crate::{
    CollectionId, CollectionPage, CollectionSummary, CopyDialog, Effect, Job, PageCache, PageKey,
    TableState, ViewLocation,
};

pub const COPY_STARTED: &str = "Companies started copying";
pub const COPY_JOB_FINISHED: &str = "Copy job finished";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Collections,
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionsState {
    #[default]
    NotRequested,
    Loading,
    Loaded(Vec<CollectionSummary>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    location: ViewLocation,
    collections: CollectionsState,
    selected: Option<CollectionId>,
    list_cursor: usize,
    focus: Focus,
    table: TableState,
    cache: PageCache,
    last_job: Option<Job>,
    menu_open: bool,
    dialog: Option<CopyDialog>,
    notifications: Notifications,
    ticks: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State restored from a shareable location; a `collection` parameter
    /// preselects that collection and suppresses auto-selection.
    pub fn with_location(location: ViewLocation) -> Self {
        let selected = location.collection().map(ToOwned::to_owned);
        Self {
            location,
            selected,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self)
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn location(&self) -> &ViewLocation {
        &self.location
    }

    pub fn selected(&self) -> Option<&CollectionId> {
        self.selected.as_ref()
    }

    pub fn collections_state(&self) -> &CollectionsState {
        &self.collections
    }

    pub fn collections(&self) -> &[CollectionSummary] {
        match &self.collections {
            CollectionsState::Loaded(list) => list,
            _ => &[],
        }
    }

    pub fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn dialog(&self) -> Option<&CopyDialog> {
        self.dialog.as_ref()
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    /// Job reported by the latest response for the selected collection.
    pub fn active_job(&self) -> Option<&Job> {
        self.last_job.as_ref()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn current_key(&self) -> Option<PageKey> {
        self.selected.as_ref().map(|id| self.table.key(id))
    }

    /// Data for the current key. `None` while a new key is loading.
    pub fn current_page(&self) -> Option<&CollectionPage> {
        let key = self.current_key()?;
        self.cache.get(&key)
    }

    pub fn is_dirty(&self) -> bool {
        self.table.is_dirty()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn table_mut(&mut self) -> &mut TableState {
        &mut self.table
    }

    pub(crate) fn dialog_mut(&mut self) -> Option<&mut CopyDialog> {
        self.dialog.as_mut()
    }

    pub(crate) fn notify(&mut self, level: NotificationLevel, text: impl Into<String>) {
        self.notifications.push(level, text);
        self.dirty = true;
    }

    pub(crate) fn advance_tick(&mut self) {
        self.ticks += 1;
        if self.notifications.tick() {
            self.dirty = true;
        }
        let animating = self.selected.is_some()
            && (self.last_job.is_some() || self.current_page().is_none());
        if animating || self.dialog.as_ref().is_some_and(CopyDialog::is_pending) {
            self.dirty = true;
        }
    }

    pub(crate) fn begin_collections_load(&mut self) {
        if !matches!(self.collections, CollectionsState::Loaded(_)) {
            self.collections = CollectionsState::Loading;
        }
        self.dirty = true;
    }

    /// Stores the list. Returns the id to auto-select when nothing is selected.
    pub(crate) fn set_collections(&mut self, list: Vec<CollectionSummary>) -> Option<CollectionId> {
        let first = list.first().map(|collection| collection.id.clone());
        if let Some(index) = self
            .selected
            .as_ref()
            .and_then(|id| list.iter().position(|collection| &collection.id == id))
        {
            self.list_cursor = index;
        } else {
            self.list_cursor = self.list_cursor.min(list.len().saturating_sub(1));
        }
        self.collections = CollectionsState::Loaded(list);
        self.dirty = true;
        if self.selected.is_none() {
            first
        } else {
            None
        }
    }

    pub(crate) fn collections_failed(&mut self, message: String) {
        if !matches!(self.collections, CollectionsState::Loaded(_)) {
            self.collections = CollectionsState::Failed(message.clone());
        }
        self.notify(NotificationLevel::Error, message);
    }

    pub(crate) fn move_list_cursor(&mut self, delta: isize) {
        let len = self.collections().len();
        if len == 0 {
            return;
        }
        self.list_cursor = self.list_cursor.saturating_add_signed(delta).min(len - 1);
        self.dirty = true;
    }

    pub(crate) fn collection_at_cursor(&self) -> Option<CollectionId> {
        self.collections()
            .get(self.list_cursor)
            .map(|collection| collection.id.clone())
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Collections if self.selected.is_some() => Focus::Table,
            Focus::Collections => Focus::Collections,
            Focus::Table => Focus::Collections,
        };
        self.dirty = true;
    }

    /// Switches the selected collection. Table state is reset before the
    /// fetch for the new collection is issued.
    pub(crate) fn select_collection(&mut self, id: CollectionId) -> Vec<Effect> {
        if self.selected.as_ref() == Some(&id) {
            return Vec::new();
        }
        self.table.reset_for_collection();
        self.last_job = None;
        self.menu_open = false;
        self.dialog = None;
        if let Some(index) = self
            .collections()
            .iter()
            .position(|collection| collection.id == id)
        {
            self.list_cursor = index;
        }
        self.location.set_collection(Some(&id));
        self.selected = Some(id);
        self.dirty = true;

        let mut effects = vec![Effect::LocationChanged(self.location.to_string())];
        effects.extend(self.request_current_page());
        effects
    }

    /// Issues a fetch for the current key unless one is already in flight.
    pub(crate) fn request_current_page(&mut self) -> Option<Effect> {
        let mut key = self.current_key()?;
        if let Some(total) = self.cache.get(&key).map(|page| page.total) {
            if self.table.observe_total(total) {
                key = self.current_key()?;
            }
        }
        self.begin_fetch(key)
    }

    fn begin_fetch(&mut self, key: PageKey) -> Option<Effect> {
        if self.cache.begin(&key) {
            Some(Effect::FetchCollectionPage(key))
        } else {
            None
        }
    }

    /// Stores a page response. Returns a refetch when the reported total
    /// moved the current offset.
    pub(crate) fn apply_page(
        &mut self,
        key: PageKey,
        result: Result<CollectionPage, String>,
    ) -> Option<Effect> {
        let is_current = self.current_key().as_ref() == Some(&key);
        match result {
            Ok(page) => {
                let total = page.total;
                let rows = page.companies.len();
                let job = page.job.clone();
                self.cache.complete(&key, page);
                if !is_current {
                    return None;
                }
                let moved = self.table.observe_total(total);
                self.table.move_cursor(0, rows);
                let finished = self.last_job.is_some() && job.is_none();
                self.last_job = job;
                if finished {
                    self.notifications
                        .push(NotificationLevel::Success, COPY_JOB_FINISHED);
                }
                self.dirty = true;
                if moved {
                    let key = self.current_key()?;
                    self.begin_fetch(key)
                } else {
                    None
                }
            }
            Err(message) => {
                self.cache.fail(&key);
                if is_current {
                    self.notify(NotificationLevel::Error, message);
                }
                None
            }
        }
    }

    pub(crate) fn toggle_menu(&mut self) {
        if self.selected.is_none() || self.dialog.is_some() {
            return;
        }
        self.menu_open = !self.menu_open;
        self.dirty = true;
    }

    pub(crate) fn open_copy_dialog(&mut self) {
        let Some(source) = self.selected.as_ref() else {
            return;
        };
        let dialog = CopyDialog::open(
            source,
            self.table.selection.ids(),
            self.collections(),
        );
        self.dialog = Some(dialog);
        self.dirty = true;
    }

    pub(crate) fn close_copy_dialog(&mut self) -> bool {
        if self.dialog.as_ref().is_some_and(CopyDialog::is_pending) {
            return false;
        }
        self.dialog = None;
        self.menu_open = false;
        self.dirty = true;
        true
    }

    pub(crate) fn finish_copy(&mut self, result: Result<(), String>) -> Option<Effect> {
        match result {
            Ok(()) => {
                self.dialog = None;
                self.menu_open = false;
                self.notify(NotificationLevel::Success, COPY_STARTED);
                self.request_current_page()
            }
            Err(message) => {
                if let Some(dialog) = self.dialog.as_mut() {
                    dialog.fail();
                }
                self.notify(NotificationLevel::Error, message);
                None
            }
        }
    }
}
