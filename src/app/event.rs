// Keyboard event handling
//
// This module contains the keyboard event handler that processes
// user input and updates the application state accordingly.

use super::AppState;
use crossterm::event::KeyCode;

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q`, `Q`, `Esc` - Quit the application
/// - `s`, `S` - Start the radar
/// - `x`, `X` - Stop the radar
/// - `Space` - Toggle start/stop
/// - `Up` / `Down` - Select endpoint
/// - `+`, `=` - Faster frame rate
/// - `-`, `_` - Slower frame rate
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            app.running = false;
            false
        }
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.start_radar();
            true
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.stop_radar();
            true
        }
        KeyCode::Char(' ') => {
            app.toggle_radar();
            true
        }
        KeyCode::Up => {
            app.select_previous_endpoint();
            true
        }
        KeyCode::Down => {
            app.select_next_endpoint();
            true
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.increase_frame_rate();
            true
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            app.decrease_frame_rate();
            true
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Settings;

    fn app() -> AppState {
        AppState::new(Settings {
            seed: Some(3),
            ..Settings::default()
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();

        assert!(app.running);
        let result = handle_key_event(&mut app, KeyCode::Char('q'));
        assert!(!result);
        assert!(!app.running);

        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Char('Q'));
        assert!(!result);
        assert!(!app.running);

        app.running = true;
        let result = handle_key_event(&mut app, KeyCode::Esc);
        assert!(!result);
        assert!(!app.running);
    }

    #[test]
    fn test_start_stop_keys() {
        let mut app = app();
        assert!(!app.radar.is_running());

        handle_key_event(&mut app, KeyCode::Char('s'));
        assert!(app.radar.is_running());
        handle_key_event(&mut app, KeyCode::Char('S'));
        assert!(app.radar.is_running());

        handle_key_event(&mut app, KeyCode::Char('x'));
        assert!(!app.radar.is_running());
        handle_key_event(&mut app, KeyCode::Char('X'));
        assert!(!app.radar.is_running());

        handle_key_event(&mut app, KeyCode::Char(' '));
        assert!(app.radar.is_running());
        handle_key_event(&mut app, KeyCode::Char(' '));
        assert!(!app.radar.is_running());
    }

    #[test]
    fn test_selection_keys() {
        let mut app = app();
        handle_key_event(&mut app, KeyCode::Down);
        handle_key_event(&mut app, KeyCode::Down);
        assert_eq!(app.selected_endpoint, 2);
        handle_key_event(&mut app, KeyCode::Up);
        assert_eq!(app.selected_endpoint, 1);
    }

    #[test]
    fn test_frame_rate_controls() {
        let mut app = app();
        let initial = app.refresh_config.frame_ms;

        handle_key_event(&mut app, KeyCode::Char('-'));
        assert!(app.refresh_config.frame_ms > initial);

        handle_key_event(&mut app, KeyCode::Char('+'));
        assert_eq!(app.refresh_config.frame_ms, initial);
    }

    #[test]
    fn test_unbound_key_keeps_running() {
        let mut app = app();
        assert!(handle_key_event(&mut app, KeyCode::Char('z')));
        assert!(app.running);
    }
}
