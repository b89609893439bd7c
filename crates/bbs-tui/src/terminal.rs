//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard and mouse events and ratatui for rendering.

use std::{
    io::{self, Stdout, stdout},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;

use crate::{App, AppEvent, Driver, KeyInput, ui};

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The terminal event stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Owns raw mode and the alternate screen for its lifetime. Mouse capture is
/// switched on only while the app asks for any-input capture.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    frame: Duration,
    mouse_captured: bool,
    restored: bool,
}

impl TerminalDriver {
    /// Take over the terminal. Animations tick every `frame`.
    pub fn new(frame: Duration) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(Hide)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, frame, mouse_captured: false, restored: false })
    }

    /// Convert a crossterm key press to `KeyInput`.
    fn convert_key(key: KeyEvent) -> KeyInput {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyInput::Interrupt;
        }
        match key.code {
            KeyCode::Char(c) => KeyInput::Char(c),
            KeyCode::Enter => KeyInput::Enter,
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Tab => KeyInput::Tab,
            KeyCode::Esc => KeyInput::Esc,
            KeyCode::Up => KeyInput::Up,
            KeyCode::Down => KeyInput::Down,
            KeyCode::PageUp => KeyInput::PageUp,
            KeyCode::PageDown => KeyInput::PageDown,
            KeyCode::Home => KeyInput::Home,
            KeyCode::End => KeyInput::End,
            _ => KeyInput::Other,
        }
    }

    /// Convert a crossterm event. `None` for events the app does not see.
    fn convert_event(event: Event) -> Option<AppEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                Some(AppEvent::Key(Self::convert_key(key)))
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                Some(AppEvent::Click)
            },
            Event::Resize(cols, rows) => Some(AppEvent::Resize(cols, rows)),
            _ => None,
        }
    }

    fn restore(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if self.mouse_captured {
            let _ = stdout().execute(DisableMouseCapture);
        }
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
        let _ = stdout().execute(Show);
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => Ok(Self::convert_event(event)),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    None => Err(TerminalError::InputClosed),
                }
            }

            // Frame timeout
            () = tokio::time::sleep(self.frame) => Ok(None),
        }
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        let now = Instant::now();
        self.terminal.draw(|frame| {
            ui::render(frame, app, now);
        })?;
        Ok(())
    }

    fn set_any_input_capture(&mut self, enabled: bool) -> Result<(), Self::Error> {
        if enabled == self.mouse_captured {
            return Ok(());
        }
        if enabled {
            stdout().execute(EnableMouseCapture)?;
        } else {
            stdout().execute(DisableMouseCapture)?;
        }
        self.mouse_captured = enabled;
        tracing::debug!(enabled, "any-input capture changed");
        Ok(())
    }

    fn stop(&mut self) {
        self.restore();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};

    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn ctrl_c_interrupts() {
        let event = TerminalDriver::convert_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(event, Some(AppEvent::Key(KeyInput::Interrupt)));

        let plain = TerminalDriver::convert_event(press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(plain, Some(AppEvent::Key(KeyInput::Char('c'))));
    }

    #[test]
    fn unmapped_keys_still_count_as_input() {
        let event = TerminalDriver::convert_event(press(KeyCode::F(5), KeyModifiers::NONE));
        assert_eq!(event, Some(AppEvent::Key(KeyInput::Other)));
    }

    #[test]
    fn key_release_is_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(TerminalDriver::convert_event(release), None);
    }

    #[test]
    fn mouse_down_is_a_click() {
        let mouse = |kind| {
            Event::Mouse(MouseEvent { kind, column: 3, row: 4, modifiers: KeyModifiers::NONE })
        };

        assert_eq!(
            TerminalDriver::convert_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(AppEvent::Click)
        );
        assert_eq!(TerminalDriver::convert_event(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn resize_passes_through() {
        assert_eq!(
            TerminalDriver::convert_event(Event::Resize(120, 40)),
            Some(AppEvent::Resize(120, 40))
        );
    }
}
