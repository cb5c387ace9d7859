use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    JumpToTop,
    JumpToBottom,
    NextPhoto,
    PrevPhoto,
    OpenDetail,
    OpenInBrowser,
    Delete,
    Reshuffle,
    ExitMode,
    Confirm,
    Cancel,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App) -> Action {
    match app.mode {
        Mode::DeleteConfirm => handle_confirm_mode(key),
        Mode::PhotoDetail => handle_detail_mode(key),
        Mode::Gallery => handle_gallery_mode(key),
    }
}

fn handle_gallery_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollDown,
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollUp,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::Home, KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::End, KeyModifiers::NONE) => Action::JumpToBottom,

        // Photo selection
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextPhoto,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::PrevPhoto,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextPhoto,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevPhoto,

        // Actions
        (KeyCode::Enter, KeyModifiers::NONE) => Action::OpenDetail,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::Delete,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reshuffle,

        _ => Action::None,
    }
}

fn handle_detail_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::ExitMode,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::ExitMode,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextPhoto,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::PrevPhoto,
        (KeyCode::Tab, KeyModifiers::NONE) => Action::NextPhoto,
        (KeyCode::BackTab, KeyModifiers::SHIFT) => Action::PrevPhoto,
        (KeyCode::Char('o'), KeyModifiers::NONE) => Action::OpenInBrowser,
        (KeyCode::Char('d'), KeyModifiers::NONE) => Action::Delete,
        _ => Action::None,
    }
}

fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use fotoscatter_core::AppConfig;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn gallery_keys() {
        let app = App::new(Arc::new(AppConfig::default()), Theme::default());
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), &app), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::ScrollDown);
        assert_eq!(handle_key_event(key(KeyCode::Enter), &app), Action::OpenDetail);
        assert_eq!(handle_key_event(key(KeyCode::Char('r')), &app), Action::Reshuffle);
    }

    #[test]
    fn confirm_mode_only_accepts_yes_no() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.mode = crate::app::Mode::DeleteConfirm;
        assert_eq!(handle_key_event(key(KeyCode::Char('y')), &app), Action::Confirm);
        assert_eq!(handle_key_event(key(KeyCode::Char('n')), &app), Action::Cancel);
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), &app), Action::None);
    }
}
