//! Maps terminal key presses to core messages.
//!
//! The copy dialog captures all input while open, then the actions menu,
//! then the focused pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use jam_core::{AppViewModel, Focus, Msg};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Dispatch(Msg),
    Ignore,
}

impl From<Msg> for KeyAction {
    fn from(msg: Msg) -> Self {
        KeyAction::Dispatch(msg)
    }
}

pub fn map_key(key: KeyEvent, view: &AppViewModel) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Quit;
    }
    if view.dialog.is_some() {
        return dialog_key(key.code);
    }
    if view.menu.is_some() {
        return menu_key(key.code);
    }

    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Tab | KeyCode::BackTab => Msg::FocusToggled.into(),
        KeyCode::Char('R') => Msg::RefreshCollectionsRequested.into(),
        KeyCode::Char('m') if view.table.is_some() => Msg::ActionsMenuToggled.into(),
        code => match view.focus {
            Focus::Collections => list_key(code),
            Focus::Table => table_key(code),
        },
    }
}

fn dialog_key(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Msg::DialogTargetMoved(-1).into(),
        KeyCode::Down | KeyCode::Char('j') => Msg::DialogTargetMoved(1).into(),
        KeyCode::Enter => Msg::CopySubmitted.into(),
        KeyCode::Esc => Msg::DialogCancelled.into(),
        _ => KeyAction::Ignore,
    }
}

fn menu_key(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Enter => Msg::CopyActionClicked.into(),
        KeyCode::Esc | KeyCode::Char('m') => Msg::ActionsMenuToggled.into(),
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::Ignore,
    }
}

fn list_key(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Msg::ListCursorMoved(-1).into(),
        KeyCode::Down | KeyCode::Char('j') => Msg::ListCursorMoved(1).into(),
        KeyCode::Enter => Msg::ListCursorActivated.into(),
        _ => KeyAction::Ignore,
    }
}

fn table_key(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Msg::RowCursorMoved(-1).into(),
        KeyCode::Down | KeyCode::Char('j') => Msg::RowCursorMoved(1).into(),
        KeyCode::Char(' ') => Msg::RowToggled.into(),
        KeyCode::Char('a') => Msg::PageSelectionToggled.into(),
        KeyCode::Left | KeyCode::Char('h') => Msg::PrevPageRequested.into(),
        KeyCode::Right | KeyCode::Char('l') => Msg::NextPageRequested.into(),
        KeyCode::Char('s') => Msg::PageSizeCycled.into(),
        KeyCode::Char('r') => Msg::SelectionReset.into(),
        KeyCode::Esc => Msg::FocusToggled.into(),
        _ => KeyAction::Ignore,
    }
}
