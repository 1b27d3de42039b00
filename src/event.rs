use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyEvent};
use tracing::warn;

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Reads terminal events on a dedicated thread. The session loop blocks in
/// `next` and owns all drill state.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            loop {
                let forwarded = match event::read() {
                    Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)),
                    Ok(Event::Resize(w, h)) => tx.send(AppEvent::Resize(w, h)),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        warn!(%err, "terminal event read failed");
                        return;
                    }
                };
                if forwarded.is_err() {
                    return;
                }
            }
        });

        Self { rx }
    }

    /// Blocks until the next event. `None` once the reader has stopped.
    pub fn next(&self) -> Option<AppEvent> {
        self.rx.recv().ok()
    }
}
