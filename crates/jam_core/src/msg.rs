use crate::{CollectionId, CollectionPage, CollectionSummary, PageKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The app is wired up; load initial data.
    Started,
    /// UI tick: ages notifications and advances progress spinners.
    Tick,
    /// The table's refetch interval elapsed.
    RefetchIntervalElapsed,
    /// User asked to reload the collection list.
    RefreshCollectionsRequested,
    /// Engine finished loading collection metadata.
    CollectionsLoaded(Result<Vec<CollectionSummary>, String>),
    /// Engine finished loading one page of a collection.
    CollectionPageLoaded {
        key: PageKey,
        result: Result<CollectionPage, String>,
    },
    /// Engine finished a copy request.
    CopyFinished(Result<(), String>),
    /// Switch keyboard focus between the list and the table.
    FocusToggled,
    /// Move the collection list cursor.
    ListCursorMoved(isize),
    /// Select the collection under the list cursor.
    ListCursorActivated,
    /// Select a collection directly.
    CollectionClicked(CollectionId),
    /// Move the table row cursor.
    RowCursorMoved(isize),
    /// Check or uncheck the row under the cursor.
    RowToggled,
    /// Check or uncheck every row on the visible page.
    PageSelectionToggled,
    NextPageRequested,
    PrevPageRequested,
    PageSizeCycled,
    /// Clear the row selection.
    SelectionReset,
    /// Open or close the actions menu.
    ActionsMenuToggled,
    /// The copy entry of the actions menu was chosen.
    CopyActionClicked,
    /// Move the chosen copy target.
    DialogTargetMoved(isize),
    /// Submit the copy form.
    CopySubmitted,
    /// Close the copy form without submitting.
    DialogCancelled,
    /// Fallback for unmapped input.
    NoOp,
}
