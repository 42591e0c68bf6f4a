use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::ui::common::tab_at_column;

/// File written by the `e` key.
pub const EXPORT_FILE: &str = "vitalwatch_export.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // Emergency overlay: jump to the directory or dismiss
    if app.show_care_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => app.close_overlay(),
            KeyCode::Enter | KeyCode::Char('c') => app.enter_care_view(),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char(c @ '1'..='7') => {
            if let Some(view) = c.to_digit(10).and_then(|n| View::from_number(n as usize)) {
                app.set_view(view);
            }
        }

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Refresh now
        KeyCode::Char('r') => app.refresh_now(),

        // Chart timeframe
        KeyCode::Char('t') => app.cycle_timeframe(),

        // Emergency care prompt
        KeyCode::Char('!') => app.open_care_overlay(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Search the doctor directory
        KeyCode::Char('/') => {
            if app.current_view != View::Care {
                app.set_view(View::Care);
            }
            app.start_filter();
        }

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Tab bar sits right under the header
            if clicked_row == 1 {
                if let Some(view) = tab_at_column(mouse.column) {
                    app.set_view(view);
                }
                return;
            }

            // Click a row in the list views (after the table border and header)
            if clicked_row > content_start_row + 1 {
                let item_row = (clicked_row - content_start_row - 2) as usize;
                let count = match app.current_view {
                    View::Insights => app.insights().len(),
                    View::Care => app.filtered_doctors().len(),
                    _ => 0,
                };
                if item_row < count {
                    app.selected_index = item_row;
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::clock::FixedClock;
    use crate::config::Settings;
    use crate::data::Timeframe;
    use crate::source::{LocalFeed, LocalSource};

    fn app() -> App {
        let clock = Arc::new(FixedClock::at(16, 45).unwrap());
        let source = LocalSource::from_feed(LocalFeed::seeded(clock.clone(), 24, 8));
        let mut app = App::new(
            Box::new(source),
            LocalFeed::seeded(clock, 24, 9),
            &Settings::default(),
        );
        assert!(app.reload_data());
        app.close_overlay();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_number_keys_switch_views() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_view, View::Oxygen);
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.current_view, View::Care);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_view, View::Overview);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_view, View::Care);
    }

    #[test]
    fn test_search_typing() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.current_view, View::Care);
        assert!(app.filter_active);

        // 'q' is text while searching, not quit
        for c in "emergency q".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(app.running);
        assert_eq!(app.filter_text, "emergency q");

        press(&mut app, KeyCode::Enter);
        assert!(!app.filter_active);
        press(&mut app, KeyCode::Char('c'));
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_ctrl_c_clears_search() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('x'));
        handle_key_event(
            &mut app,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
        assert!(app.filter_text.is_empty());
        assert!(!app.filter_active);
    }

    #[test]
    fn test_overlays() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);

        press(&mut app, KeyCode::Char('!'));
        assert!(app.show_care_overlay);
        press(&mut app, KeyCode::Enter);
        assert!(!app.show_care_overlay);
        assert_eq!(app.current_view, View::Care);
    }

    #[test]
    fn test_timeframe_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.timeframe, Timeframe::Weekly);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn test_refresh_key_polls_source() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.history.len(), 2);
    }

    #[test]
    fn test_tab_click() {
        let mut app = app();
        let click = |column| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click(14), 2);
        assert_eq!(app.current_view, View::Heart);
        handle_mouse_event(&mut app, click(1), 2);
        assert_eq!(app.current_view, View::Overview);
    }
}
