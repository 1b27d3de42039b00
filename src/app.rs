use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::corpus::loader::Corpus;
use crate::keyboard::keymap::{KeyAction, Keymap};
use crate::session::drill::{DrillSession, Outcome};
use crate::session::sampler::WordPool;
use crate::store::json_store::JsonStore;
use crate::store::schema::PersistedData;
use crate::ui::theme::Theme;

pub struct App {
    pub session: DrillSession<SmallRng>,
    pub keymap: Keymap,
    pub theme: Theme,
    pub persisted: PersistedData,
    pub toggle_hint_key: String,
    pub quit_key: String,
    pub should_quit: bool,
}

impl App {
    /// Load every collaborator feed and seed the session for a `width`
    /// column terminal. Fails before any terminal state is touched.
    pub fn new(config: &Config, width: usize) -> Result<Self> {
        let store = JsonStore::with_base_dir(config.data_dir.clone())?;
        store
            .ensure_initialized()
            .with_context(|| format!("initializing {}", store.base_dir().display()))?;
        let persisted = store.load_all();
        debug!(
            state_words = persisted.state.len(),
            history_words = persisted.history.len(),
            "store loaded"
        );

        let corpus = Corpus::load(&config.words_path, &config.strokes_path)?;
        let pool = WordPool::new(corpus.top(config.pool_size).to_vec())?;
        info!(
            pool = pool.len(),
            skipped = corpus.missing().len(),
            width,
            "drilling"
        );

        let theme = Theme::load(&config.theme).unwrap_or_default();
        let session = DrillSession::new(
            pool,
            width,
            config.show_stroke_hint,
            SmallRng::from_entropy(),
        );
        Ok(Self::with_session(session, config, theme, persisted))
    }

    pub fn with_session(
        session: DrillSession<SmallRng>,
        config: &Config,
        theme: Theme,
        persisted: PersistedData,
    ) -> Self {
        Self {
            session,
            keymap: config.keymap(),
            theme,
            persisted,
            toggle_hint_key: config.toggle_hint_key.clone(),
            quit_key: config.quit_key.clone(),
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) {
        let Some(action) = self.keymap.resolve(key) else {
            return;
        };
        if self.session.apply(action) == Outcome::Quit {
            info!(
                completed = self.session.completed_lines(),
                "quit requested"
            );
            self.should_quit = true;
        } else if action == KeyAction::ToggleStrokeHint {
            debug!(visible = self.session.show_stroke_hint(), "stroke hint toggled");
        }
    }

    pub fn resize(&mut self, width: u16) {
        if self.session.width() != width as usize {
            debug!(width, "terminal resized");
            self.session.set_width(width as usize);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::WordRecord;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fs;
    use tempfile::TempDir;

    fn test_app(width: usize) -> App {
        let pool = WordPool::new(vec![
            WordRecord::new("cat", "KAT", 1),
            WordRecord::new("dog", "TKOG", 2),
        ])
        .unwrap();
        let session = DrillSession::new(pool, width, true, SmallRng::seed_from_u64(42));
        App::with_session(
            session,
            &Config::default(),
            Theme::default(),
            PersistedData::default(),
        )
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_typing_the_line_advances() {
        let mut app = test_app(7);
        let target = app.session.target();
        for ch in target.chars() {
            app.handle_key(&key(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        assert_eq!(app.session.completed_lines(), 1);
        assert!(app.session.input().is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = test_app(20);
        app.handle_key(&key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_s_toggles_hint() {
        let mut app = test_app(20);
        app.handle_key(&key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert!(!app.session.show_stroke_hint());
        assert!(app.session.input().is_empty());
    }

    #[test]
    fn test_resize_changes_sampling_width() {
        let mut app = test_app(20);
        app.resize(7);
        assert_eq!(app.session.width(), 7);
        app.session.advance();
        assert!(app.session.lookahead().width() <= 7);
    }

    #[test]
    fn test_shrinking_terminal_keeps_lines_visible() {
        let mut app = test_app(40);
        assert!(app.session.active().width() > 10);
        app.resize(10);
        assert!(app.session.active().width() <= 10);
        assert!(app.session.lookahead().width() <= 10);
        assert!(!app.session.active().is_empty());
    }

    #[test]
    fn test_new_reports_small_pool() {
        let dir = TempDir::new().unwrap();
        let words = dir.path().join("words.txt");
        let strokes = dir.path().join("strokes.txt");
        fs::write(&words, "10 the\n9 of\n").unwrap();
        fs::write(&strokes, "the: -T\n").unwrap();

        let config = Config {
            words_path: words,
            strokes_path: strokes,
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let err = App::new(&config, 80).err().unwrap();
        assert!(err.to_string().contains("at least 2"));
        // The store is initialized even when the corpus is unusable.
        assert!(dir.path().join("data").join("state.json").exists());
    }

    #[test]
    fn test_new_seeds_session_from_files() {
        let dir = TempDir::new().unwrap();
        let words = dir.path().join("words.txt");
        let strokes = dir.path().join("strokes.txt");
        fs::write(&words, "10 the\n9 of\n8 and\n7 zyzzyva\n").unwrap();
        fs::write(&strokes, "the: -T\nof: -F\nand: SKP (4)\n").unwrap();

        let config = Config {
            words_path: words,
            strokes_path: strokes,
            data_dir: dir.path().join("data"),
            ..Config::default()
        };
        let app = App::new(&config, 40).unwrap();
        assert!(!app.session.active().is_empty());
        assert!(app.session.active().width() <= 40);
        assert!(app.persisted.state.is_empty());
    }
}
