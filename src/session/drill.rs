use rand::Rng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::corpus::{WordLine, WordRecord};
use crate::keyboard::keymap::KeyAction;
use crate::session::input::{self, CharStatus, InputBuffer};
use crate::session::queue::SessionQueue;
use crate::session::sampler::WordPool;

/// What a keystroke did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Advanced,
    Quit,
}

/// All mutable drill state: the line queue, the typed input and the hint flag.
pub struct DrillSession<R: Rng = SmallRng> {
    pool: WordPool,
    queue: SessionQueue,
    input: InputBuffer,
    show_stroke_hint: bool,
    width: usize,
    completed_lines: usize,
    rng: R,
}

impl<R: Rng> DrillSession<R> {
    pub fn new(pool: WordPool, width: usize, show_stroke_hint: bool, mut rng: R) -> Self {
        let queue = SessionQueue::seed(&pool, width, &mut rng);
        debug!(
            active = %queue.active().text(),
            lookahead = %queue.lookahead().text(),
            width,
            "session seeded"
        );
        Self {
            pool,
            queue,
            input: InputBuffer::new(),
            show_stroke_hint,
            width,
            completed_lines: 0,
            rng,
        }
    }

    pub fn apply(&mut self, action: KeyAction) -> Outcome {
        match action {
            KeyAction::Quit => return Outcome::Quit,
            KeyAction::Char(ch) => input::process_char(&mut self.input, ch),
            KeyAction::Backspace => input::process_backspace(&mut self.input),
            KeyAction::ToggleStrokeHint => self.toggle_stroke_hint(),
        }

        if input::is_complete(&self.input, &self.queue.active().text()) {
            self.advance();
            Outcome::Advanced
        } else {
            Outcome::Continue
        }
    }

    pub fn advance(&mut self) -> &WordLine {
        self.completed_lines += 1;
        self.input.clear();
        self.queue.advance(&self.pool, self.width, &mut self.rng);
        debug!(
            completed = self.completed_lines,
            active = %self.queue.active().text(),
            "line completed"
        );
        self.queue.active()
    }

    pub fn toggle_stroke_hint(&mut self) {
        self.show_stroke_hint = !self.show_stroke_hint;
    }

    /// New width applies to lines sampled from now on. Queued lines that no
    /// longer fit are replaced and the input is cleared.
    pub fn set_width(&mut self, width: usize) {
        self.width = width;
        if !self.queue.fits(width) {
            self.queue.reseed(&self.pool, width, &mut self.rng);
            self.input.clear();
            debug!(
                width,
                active = %self.queue.active().text(),
                "lines resampled for narrower terminal"
            );
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn active(&self) -> &WordLine {
        self.queue.active()
    }

    pub fn lookahead(&self) -> &WordLine {
        self.queue.lookahead()
    }

    pub fn queue(&self) -> &SessionQueue {
        &self.queue
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn show_stroke_hint(&self) -> bool {
        self.show_stroke_hint
    }

    pub fn completed_lines(&self) -> usize {
        self.completed_lines
    }

    pub fn target(&self) -> String {
        self.queue.active().text()
    }

    pub fn statuses(&self) -> Vec<CharStatus> {
        input::classify(&self.target(), &self.input)
    }

    /// The word the learner is writing right now.
    pub fn current_word(&self) -> Option<&WordRecord> {
        self.queue.active().word_at(self.input.len())
    }

    /// Chord for the current word, if the hint is visible.
    pub fn stroke_hint(&self) -> Option<&str> {
        if !self.show_stroke_hint {
            return None;
        }
        self.current_word().map(|r| r.canonical_stroke.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn pool() -> WordPool {
        WordPool::new(vec![
            WordRecord::new("cat", "KAT", 1),
            WordRecord::new("dog", "TKOG", 2),
        ])
        .unwrap()
    }

    fn session(width: usize) -> DrillSession<SmallRng> {
        DrillSession::new(pool(), width, true, SmallRng::seed_from_u64(42))
    }

    fn type_str(session: &mut DrillSession<SmallRng>, text: &str) -> Vec<Outcome> {
        text.chars()
            .map(|ch| session.apply(KeyAction::Char(ch)))
            .collect()
    }

    #[test]
    fn test_exact_line_advances() {
        // Width 7 fits exactly "cat dog" or "dog cat".
        let mut session = session(7);
        let target = session.target();
        assert_eq!(target.len(), 7);
        let lookahead = session.lookahead().clone();

        let outcomes = type_str(&mut session, &target);
        assert_eq!(outcomes.last(), Some(&Outcome::Advanced));
        assert!(outcomes[..6].iter().all(|o| *o == Outcome::Continue));
        assert_eq!(session.active(), &lookahead);
        assert!(session.input().is_empty());
        assert_eq!(session.completed_lines(), 1);
    }

    #[test]
    fn test_partial_line_does_not_advance() {
        let mut session = session(7);
        let target = session.target();
        let outcomes = type_str(&mut session, &target[..6]);
        assert!(outcomes.iter().all(|o| *o == Outcome::Continue));
        assert_eq!(session.completed_lines(), 0);
        assert_eq!(session.input().as_str(), &target[..6]);
    }

    #[test]
    fn test_toggle_twice_restores_flag() {
        let mut session = session(20);
        let before = session.show_stroke_hint();
        session.apply(KeyAction::ToggleStrokeHint);
        assert_ne!(session.show_stroke_hint(), before);
        assert!(session.stroke_hint().is_none());
        session.apply(KeyAction::ToggleStrokeHint);
        assert_eq!(session.show_stroke_hint(), before);
    }

    #[test]
    fn test_toggle_leaves_input_alone() {
        let mut session = session(20);
        session.apply(KeyAction::Char('c'));
        session.apply(KeyAction::ToggleStrokeHint);
        assert_eq!(session.input().as_str(), "c");
    }

    #[test]
    fn test_hint_flag_survives_advance() {
        let mut session = session(7);
        session.apply(KeyAction::ToggleStrokeHint);
        let target = session.target();
        type_str(&mut session, &target);
        assert_eq!(session.completed_lines(), 1);
        assert!(!session.show_stroke_hint());
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut session = session(20);
        for _ in 0..3 {
            assert_eq!(session.apply(KeyAction::Backspace), Outcome::Continue);
        }
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_stroke_hint_follows_current_word() {
        let mut session = session(7);
        let first = session.active().words()[0].clone();
        let second = session.active().words()[1].clone();
        assert_eq!(session.stroke_hint(), Some(first.canonical_stroke.as_str()));
        type_str(&mut session, &format!("{} ", first.word));
        assert_eq!(session.stroke_hint(), Some(second.canonical_stroke.as_str()));
    }

    #[test]
    fn test_growing_width_keeps_lines_and_input() {
        let mut session = session(7);
        let active = session.active().clone();
        session.apply(KeyAction::Char('c'));
        session.set_width(40);
        assert_eq!(session.active(), &active);
        assert_eq!(session.input().as_str(), "c");
    }

    #[test]
    fn test_shrinking_width_resamples_and_clears_input() {
        let mut session = session(40);
        session.apply(KeyAction::Char('c'));
        session.set_width(10);
        assert!(session.active().width() <= 10);
        assert!(session.lookahead().width() <= 10);
        assert!(session.input().is_empty());
    }

    #[test]
    fn test_quit_is_reported() {
        let mut session = session(20);
        assert_eq!(session.apply(KeyAction::Quit), Outcome::Quit);
    }

    #[test]
    fn test_statuses_track_input() {
        let mut session = session(7);
        let target = session.target();
        let wrong = if target.starts_with('c') { 'd' } else { 'c' };
        session.apply(KeyAction::Char(wrong));
        let statuses = session.statuses();
        assert_eq!(statuses.len(), 7);
        assert_eq!(statuses[0], CharStatus::Mismatched(wrong));
        assert!(statuses[1..].iter().all(|s| *s == CharStatus::Pending));
    }
}
