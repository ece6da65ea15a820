use crate::{CollectionId, CompanyId, PageKey};

pub const PAGE_SIZE_OPTIONS: [u64; 3] = [25, 50, 100];
pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// Checked company ids, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSelection {
    ids: Vec<CompanyId>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: CompanyId) -> bool {
        self.ids.contains(&id)
    }

    pub fn toggle(&mut self, id: CompanyId) {
        if let Some(index) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
    }

    /// Selects every id on the page, or unselects them all if the page is
    /// already fully selected. Ids outside `page` are never touched.
    pub fn toggle_all(&mut self, page: &[CompanyId]) {
        if page.is_empty() {
            return;
        }
        if page.iter().all(|id| self.contains(*id)) {
            self.ids.retain(|id| !page.contains(id));
        } else {
            for id in page {
                if !self.contains(*id) {
                    self.ids.push(*id);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[CompanyId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Transient grid state, meaningful only for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub offset: u64,
    pub page_size: u64,
    pub selection: RowSelection,
    pub cursor: usize,
    row_count: u64,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: DEFAULT_PAGE_SIZE,
            selection: RowSelection::new(),
            cursor: 0,
            row_count: 0,
        }
    }
}

impl TableState {
    /// Resets paging and selection for a newly selected collection.
    /// The page size is a user preference and survives the reset.
    pub fn reset_for_collection(&mut self) {
        self.offset = 0;
        self.cursor = 0;
        self.selection.clear();
    }

    pub fn key(&self, collection_id: &CollectionId) -> PageKey {
        PageKey {
            collection_id: collection_id.clone(),
            offset: self.offset,
            limit: self.page_size,
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Last total reported for the current collection. Only replaced by a
    /// fresh total, so reloads never flash an empty grid.
    pub fn row_count(&self) -> u64 {
        self.row_count
    }

    /// Stores a fresh total and pulls the offset back onto the last page when
    /// it lies past the end. Returns whether the offset moved.
    pub(crate) fn observe_total(&mut self, total: u64) -> bool {
        self.row_count = total;
        let size = self.page_size.max(1);
        let last = total.saturating_sub(1) / size * size;
        if self.offset <= last {
            return false;
        }
        self.offset = last;
        self.cursor = 0;
        true
    }

    pub fn page_index(&self) -> u64 {
        self.offset / self.page_size.max(1)
    }

    pub fn page_count(&self) -> u64 {
        let size = self.page_size.max(1);
        self.row_count.div_ceil(size).max(1)
    }

    /// Moves to the next page if the known row count has one. Returns whether
    /// the offset changed.
    pub fn next_page(&mut self) -> bool {
        let next = self.offset + self.page_size;
        if next >= self.row_count {
            return false;
        }
        self.offset = next;
        self.cursor = 0;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.page_size);
        self.cursor = 0;
        true
    }

    /// Switches to the next page size option, keeping the first visible row on
    /// the new page.
    pub fn cycle_page_size(&mut self) {
        let position = PAGE_SIZE_OPTIONS
            .iter()
            .position(|size| *size == self.page_size)
            .unwrap_or(0);
        let next = PAGE_SIZE_OPTIONS[(position + 1) % PAGE_SIZE_OPTIONS.len()];
        self.set_page_size(next);
    }

    pub fn set_page_size(&mut self, page_size: u64) {
        let page_size = page_size.max(1);
        self.offset = (self.offset / page_size) * page_size;
        self.page_size = page_size;
        self.cursor = 0;
    }

    pub fn move_cursor(&mut self, delta: isize, rows: usize) {
        if rows == 0 {
            self.cursor = 0;
            return;
        }
        let last = rows - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }
}
