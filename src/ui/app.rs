use crate::game::{Event as GameEvent, GameSession, Step};
use crate::persist::GameStore;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::io;

use super::snapshot::Snapshot;

pub struct App {
    session: GameSession,
    store: Option<GameStore>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    /// `store` is where the final game is saved; `None` disables saving.
    pub fn new(session: GameSession, store: Option<GameStore>) -> Self {
        App {
            session,
            store,
            should_quit: false,
            message: None,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(Into::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        let Some(event) = key_to_event(key) else {
            return;
        };
        // Clear message on any mapped key press
        self.message = None;

        match self.session.handle_event(event) {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => self.should_quit = true,
            Ok(Step::Completed) => self.finish_game(),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    fn finish_game(&mut self) {
        let Some(store) = &self.store else {
            self.message = Some("Game over! Press q to quit.".to_string());
            return;
        };
        self.message = Some(match store.save(&self.session) {
            Ok(path) => format!("Game over! Saved to {}", path.display()),
            Err(err) => {
                tracing::error!(%err, "failed to save game");
                format!("Game over! Could not save: {err}")
            }
        });
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let snapshot = Snapshot::from_session(&self.session);
        super::scoreboard_view::render(frame, &snapshot, &self.message);
    }
}

/// Map a key press to a session event.
fn key_to_event(key: KeyEvent) -> Option<GameEvent> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameEvent::Quit)
        }
        KeyCode::Char('q') | KeyCode::Esc => Some(GameEvent::Quit),
        KeyCode::Up => Some(GameEvent::MoveFocusUp),
        KeyCode::Down => Some(GameEvent::MoveFocusDown),
        KeyCode::Char(d) if d.is_ascii_digit() => Some(GameEvent::EnterDigit(d)),
        KeyCode::Backspace => Some(GameEvent::DeleteDigit),
        KeyCode::Enter => Some(GameEvent::SubmitScore),
        KeyCode::Char('n') => Some(GameEvent::AdvanceRound),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PersistenceConfig;
    use crate::game::{GamePhase, WinRule, DEFAULT_MAX_DIGITS};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app(store: Option<GameStore>) -> App {
        App::new(
            GameSession::new(&["alice", "bob"], WinRule::Zero, DEFAULT_MAX_DIGITS),
            store,
        )
    }

    #[test]
    fn test_key_mapping() {
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(key_to_event(key(KeyCode::Up)), Some(GameEvent::MoveFocusUp));
        assert_eq!(key_to_event(key(KeyCode::Down)), Some(GameEvent::MoveFocusDown));
        assert_eq!(key_to_event(key(KeyCode::Char('7'))), Some(GameEvent::EnterDigit('7')));
        assert_eq!(key_to_event(key(KeyCode::Enter)), Some(GameEvent::SubmitScore));
        assert_eq!(key_to_event(key(KeyCode::Char('n'))), Some(GameEvent::AdvanceRound));
        assert_eq!(key_to_event(key(KeyCode::Char('q'))), Some(GameEvent::Quit));
        assert_eq!(
            key_to_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameEvent::Quit)
        );
        assert_eq!(key_to_event(key(KeyCode::Char('x'))), None);
        assert_eq!(key_to_event(key(KeyCode::Left)), None);
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut app = app(None);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.session().players()[1].total(), 12);
        assert!(app.message.is_none());
    }

    #[test]
    fn test_invalid_submit_shows_message() {
        let mut app = app(None);
        press(&mut app, KeyCode::Enter);
        assert!(app.message.as_deref().unwrap().contains("invalid score"));

        press(&mut app, KeyCode::Char('3'));
        assert!(app.message.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = app(None);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_finishing_saves_game() {
        let dir = tempfile::tempdir().unwrap();
        let store = GameStore::new(&PersistenceConfig {
            save_dir: dir.path().to_path_buf(),
            ..PersistenceConfig::default()
        });
        let mut app = app(Some(store));
        for _ in 0..13 {
            press(&mut app, KeyCode::Char('n'));
        }

        assert_eq!(app.session().phase(), GamePhase::Complete);
        assert!(!app.should_quit);
        assert!(app.message.as_deref().unwrap().starts_with("Game over! Saved to"));

        let saved = GameStore::new(&PersistenceConfig {
            save_dir: dir.path().to_path_buf(),
            ..PersistenceConfig::default()
        })
        .list()
        .unwrap();
        assert_eq!(saved.len(), 1);

        // further advances do not save again
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("games");
        std::fs::write(&blocker, "").unwrap();
        let store = GameStore::new(&PersistenceConfig {
            save_dir: blocker,
            ..PersistenceConfig::default()
        });
        let mut app = app(Some(store));
        for _ in 0..13 {
            press(&mut app, KeyCode::Char('n'));
        }

        assert_eq!(app.session().phase(), GamePhase::Complete);
        assert!(app.message.as_deref().unwrap().contains("Could not save"));
        assert!(!app.should_quit);
    }
}
