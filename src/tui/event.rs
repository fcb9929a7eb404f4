use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Core actions
    Quit,
    ForceQuit,
    Back,
    Forward,
    ToggleTheme,
    ToggleLang,
    ToggleMenu,

    // Navigation list
    NavNext,
    NavPrev,
    Follow,
    /// Digit shortcut, zero-based.
    Jump(usize),
    MouseClick(u16, u16),

    // Content region
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollTop,
    FocusNext,
    FocusPrev,
    Activate,

    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    match event::read() {
        Ok(event) => map_event(event),
        Err(e) => {
            log::warn!("Failed to read terminal event: {}", e);
            None
        }
    }
}

fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::ALT, KeyCode::Left) => Some(TuiEvent::Back),
                (KeyModifiers::ALT, KeyCode::Right) => Some(TuiEvent::Forward),
                (_, KeyCode::Char('q')) | (_, KeyCode::Esc) => Some(TuiEvent::Quit),
                (_, KeyCode::Char('b')) | (_, KeyCode::Backspace) => Some(TuiEvent::Back),
                (_, KeyCode::Char('f')) => Some(TuiEvent::Forward),
                (_, KeyCode::Char('t')) => Some(TuiEvent::ToggleTheme),
                (_, KeyCode::Char('l')) => Some(TuiEvent::ToggleLang),
                (_, KeyCode::Char('m')) => Some(TuiEvent::ToggleMenu),
                (_, KeyCode::Char(c @ '1'..='9')) => Some(TuiEvent::Jump(c as usize - '1' as usize)),
                (_, KeyCode::Tab) => Some(TuiEvent::NavNext),
                (_, KeyCode::BackTab) => Some(TuiEvent::NavPrev),
                (_, KeyCode::Enter) => Some(TuiEvent::Follow),
                (_, KeyCode::Char(']')) => Some(TuiEvent::FocusNext),
                (_, KeyCode::Char('[')) => Some(TuiEvent::FocusPrev),
                (_, KeyCode::Char(' ')) => Some(TuiEvent::Activate),
                (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::ScrollUp),
                (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::ScrollDown),
                (_, KeyCode::PageUp) => Some(TuiEvent::ScrollPageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::ScrollPageDown),
                (_, KeyCode::Home) => Some(TuiEvent::ScrollTop),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn digits_jump_to_pages() {
        assert_eq!(
            map_event(key(KeyCode::Char('1'), KeyModifiers::NONE)),
            Some(TuiEvent::Jump(0))
        );
        assert_eq!(
            map_event(key(KeyCode::Char('8'), KeyModifiers::NONE)),
            Some(TuiEvent::Jump(7))
        );
    }

    #[test]
    fn ctrl_c_force_quits_and_alt_arrows_walk_history() {
        assert_eq!(
            map_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(TuiEvent::ForceQuit)
        );
        assert_eq!(
            map_event(key(KeyCode::Left, KeyModifiers::ALT)),
            Some(TuiEvent::Back)
        );
        assert_eq!(
            map_event(key(KeyCode::Right, KeyModifiers::ALT)),
            Some(TuiEvent::Forward)
        );
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(release), None);
    }
}
