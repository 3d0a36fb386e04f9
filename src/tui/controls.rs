//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to a form action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Up | KeyCode::Char('k') => app.prev_panel(),
        KeyCode::Down | KeyCode::Char('j') => app.next_panel(),
        KeyCode::Right | KeyCode::Char('+' | '=') => app.adjust_count(1),
        KeyCode::Left | KeyCode::Char('-') => app.adjust_count(-1),
        KeyCode::PageUp => app.adjust_count(5),
        KeyCode::PageDown => app.adjust_count(-5),
        KeyCode::Char('f') => app.toggle_financials(),
        KeyCode::Char('w') => app.next_weather(),
        KeyCode::Char('1') => app.switch_preset("salma"),
        KeyCode::Char('2') => app.switch_preset("classic"),
        KeyCode::Char('3') => app.switch_preset("residential"),
        KeyCode::Char('4') => app.switch_preset("projet"),
        _ => {}
    }
}
