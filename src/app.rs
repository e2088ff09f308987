//! Program-level state and the pure transition from one action to the next
//! state. Terminal I/O lives elsewhere; everything here runs headless.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use ratatui::layout::Rect;

use crate::clock::{Clock, SystemClock};
use crate::session::TypingSession;

/// The sentence every session asks for
pub const TARGET_SENTENCE: &str = "He liked to play with words.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Reset,
    Quit,
    Resize { width: u16, height: u16 },
}

impl Action {
    /// Translate a terminal key press. Releases, repeats and keys with no
    /// meaning here yield `None`.
    pub fn from_key(key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Char('r') if ctrl => Some(Action::Reset),
            KeyCode::Char('q') if !ctrl && !alt => Some(Action::Quit),
            KeyCode::Char(c) if !ctrl && !alt => Some(Action::Type(c)),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct App<C: Clock = SystemClock> {
    pub session: TypingSession<C>,
    pub width: u16,
    pub height: u16,
}

#[derive(Debug)]
pub enum Transition<C: Clock = SystemClock> {
    Continue(App<C>),
    Quit,
}

impl<C: Clock + Clone> App<C> {
    pub fn new(session: TypingSession<C>, width: u16, height: u16) -> Self {
        Self {
            session,
            width,
            height,
        }
    }

    /// Area to draw into: the last reported terminal size, clipped to `frame`
    pub fn viewport(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x,
            frame.y,
            self.width.min(frame.width),
            self.height.min(frame.height),
        )
    }
}

/// Apply one action to the app, producing the next state.
pub fn update<C: Clock + Clone>(mut app: App<C>, action: Action) -> Transition<C> {
    match action {
        Action::Quit => {
            info!("quit requested");
            return Transition::Quit;
        }
        Action::Reset => {
            app.session = app.session.reset();
        }
        Action::Resize { width, height } => {
            debug!("resize to {}x{}", width, height);
            app.width = width;
            app.height = height;
        }
        Action::Type(c) => app.session.handle_character(c),
    }
    Transition::Continue(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::session::{SessionConfig, Status};
    use assert_matches::assert_matches;
    use crossterm::event::KeyEventState;

    fn app(target: &str) -> App<ManualClock> {
        let session =
            TypingSession::with_clock(target, SessionConfig::default(), ManualClock::default());
        App::new(session, 80, 24)
    }

    fn step(app: App<ManualClock>, action: Action) -> App<ManualClock> {
        match update(app, action) {
            Transition::Continue(next) => next,
            Transition::Quit => panic!("unexpected quit"),
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_mapping_quit() {
        assert_eq!(
            Action::from_key(press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Action::Quit)
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_key_mapping_reset() {
        assert_eq!(
            Action::from_key(press(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Action::Reset)
        );
    }

    #[test]
    fn test_key_mapping_characters() {
        assert_eq!(
            Action::from_key(press(KeyCode::Char('r'), KeyModifiers::NONE)),
            Some(Action::Type('r'))
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Char('H'), KeyModifiers::SHIFT)),
            Some(Action::Type('H'))
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Char(' '), KeyModifiers::NONE)),
            Some(Action::Type(' '))
        );
    }

    #[test]
    fn test_key_mapping_ignored() {
        assert_eq!(
            Action::from_key(press(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(
            Action::from_key(press(KeyCode::Backspace, KeyModifiers::NONE)),
            None
        );
        assert_eq!(Action::from_key(press(KeyCode::Left, KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(Action::from_key(release), None);
    }

    #[test]
    fn test_target_sentence_has_no_quit_key() {
        assert!(!TARGET_SENTENCE.contains('q'));
    }

    #[test]
    fn test_type_feeds_session() {
        let app = step(app("ab"), Action::Type('a'));
        assert_eq!(app.session.cursor(), 1);

        let app = step(app, Action::Type('z'));
        assert!(app.session.mistake_active());
        assert_eq!(app.session.error_count(), 1);
    }

    #[test]
    fn test_quit_in_progress() {
        let app = step(app("ab"), Action::Type('a'));
        assert_matches!(update(app, Action::Quit), Transition::Quit);
    }

    #[test]
    fn test_quit_when_finished() {
        let app = step(app("a"), Action::Type('a'));
        assert_eq!(app.session.status(), Status::Finished);
        assert_matches!(update(app, Action::Quit), Transition::Quit);
    }

    #[test]
    fn test_reset_keeps_viewport() {
        let app = step(app("ab"), Action::Resize { width: 120, height: 40 });
        let app = step(app, Action::Type('a'));
        let app = step(app, Action::Type('x'));

        let app = step(app, Action::Reset);

        assert_eq!(app.session.cursor(), 0);
        assert_eq!(app.session.error_count(), 0);
        assert!(!app.session.mistake_active());
        assert!(!app.session.has_started());
        assert_eq!(app.session.target_text(), "ab");
        assert_eq!((app.width, app.height), (120, 40));
    }

    #[test]
    fn test_reset_from_finished() {
        let app = step(app("a"), Action::Type('a'));
        let app = step(app, Action::Reset);
        assert_eq!(app.session.status(), Status::InProgress);
    }

    #[test]
    fn test_resize_leaves_session_alone() {
        let app = step(app("ab"), Action::Type('a'));
        let started = app.session.started_at();

        let app = step(app, Action::Resize { width: 10, height: 5 });

        assert_eq!((app.width, app.height), (10, 5));
        assert_eq!(app.session.cursor(), 1);
        assert_eq!(app.session.started_at(), started);
    }

    #[test]
    fn test_viewport_follows_resize() {
        let frame = Rect::new(0, 0, 100, 40);
        let app = step(app("ab"), Action::Resize { width: 60, height: 20 });

        assert_eq!(app.viewport(frame), Rect::new(0, 0, 60, 20));
    }

    #[test]
    fn test_viewport_clipped_to_frame() {
        let app = step(app("ab"), Action::Resize { width: 200, height: 10 });

        assert_eq!(app.viewport(Rect::new(2, 1, 80, 24)), Rect::new(2, 1, 80, 10));
    }
}
