//! Keyboard input handling for the dashboard.
//!
//! # Keybindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `q` | Quit |
//! | Ctrl+C | Quit |
//!
//! Every other key is ignored; the dashboard is a pure display surface.

use super::app::DashboardApp;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Event was handled, continue running.
    Handled,
    /// Event was not handled (ignored key).
    NotHandled,
    /// User requested quit.
    Quit,
}

/// Handle a crossterm event.
pub fn handle_event(app: &mut DashboardApp, event: Event) -> InputResult {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => InputResult::Handled, // Redrawn on the next tick
        _ => InputResult::NotHandled,
    }
}

fn handle_key(app: &mut DashboardApp, key: KeyEvent) -> InputResult {
    let is_quit = matches!(key.code, KeyCode::Char('q'))
        || (matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL));

    if is_quit {
        app.quit();
        InputResult::Quit
    } else {
        InputResult::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_channel_with_capacity;
    use crate::stats::ThreatStats;
    use crossterm::event::{KeyEventKind, KeyEventState};
    use tokio::sync::watch;

    fn make_app() -> DashboardApp {
        let (_bus, stream) = event_channel_with_capacity(8);
        let (_tx, stats_rx) = watch::channel(ThreatStats::default());
        DashboardApp::new("lo", true, stream, stats_rx)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        })
    }

    #[test]
    fn test_q_quits() {
        let mut app = make_app();
        let result = handle_event(&mut app, key(KeyCode::Char('q'), KeyModifiers::empty()));
        assert_eq!(result, InputResult::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = make_app();
        let result = handle_event(&mut app, key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(result, InputResult::Quit);
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut app = make_app();
        for code in [KeyCode::Char('x'), KeyCode::Enter, KeyCode::Esc, KeyCode::Tab] {
            let result = handle_event(&mut app, key(code, KeyModifiers::empty()));
            assert_eq!(result, InputResult::NotHandled);
        }
        assert!(!app.should_quit());
    }

    #[test]
    fn test_resize_is_handled() {
        let mut app = make_app();
        let result = handle_event(&mut app, Event::Resize(80, 24));
        assert_eq!(result, InputResult::Handled);
    }
}
