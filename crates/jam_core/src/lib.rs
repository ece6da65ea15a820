//! Jam core: pure state machine and view-model helpers.
mod cache;
mod copy;
mod effect;
mod job;
mod location;
mod msg;
mod notify;
mod state;
mod table;
mod types;
mod update;
mod view_model;

pub use cache::{PageCache, PageKey, CACHE_CAPACITY};
pub use copy::{CopyDialog, CopyRequest, CopyValidationError, TargetOption, TARGET_REQUIRED};
pub use effect::Effect;
pub use job::{job_progress, JobDirection, JobProgressView};
pub use location::{ViewLocation, COLLECTION_PARAM, DEFAULT_LOCATION};
pub use msg::Msg;
pub use notify::{Notification, NotificationLevel, Notifications, NOTIFICATION_TTL_TICKS};
pub use state::{AppState, CollectionsState, Focus, COPY_JOB_FINISHED, COPY_STARTED};
pub use table::{RowSelection, TableState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use types::{CollectionId, CollectionPage, CollectionSummary, CompanyId, CompanyRow, Job};
pub use update::update;
pub use view_model::{
    copy_label, ActionsMenuView, AppViewModel, CollectionItemView, CollectionListView,
    CopyDialogView, NotificationView, RowView, TableView, TargetOptionView, SKELETON_ROWS,
};
