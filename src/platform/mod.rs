//! Platform abstraction layer
//!
//! Handles the parts a host application supplies:
//! - Screen identifiers and navigation
//! - Wall-clock time for the quiz

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::quiz::{QuizEvent, QuizSession};

/// A session shared between the clock thread and input handlers
pub type SharedSession<R = Pcg32> = Arc<Mutex<QuizSession<R>>>;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Home,
    Theory,
    Calculator,
    Engineering,
    Business,
    Data,
    Game,
    Leaderboard,
    About,
}

impl View {
    pub const ALL: [View; 9] = [
        View::Home,
        View::Theory,
        View::Calculator,
        View::Engineering,
        View::Business,
        View::Data,
        View::Game,
        View::Leaderboard,
        View::About,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Theory => "theory",
            View::Calculator => "calculator",
            View::Engineering => "engineering",
            View::Business => "business",
            View::Data => "data",
            View::Game => "game",
            View::Leaderboard => "leaderboard",
            View::About => "about",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        View::ALL.into_iter().find(|v| v.as_str() == s)
    }
}

/// Navigation collaborator
pub trait Navigator {
    fn navigate(&mut self, target: View);
}

/// Tracks the active screen and tears the quiz down when it is left
pub struct Shell<R = Pcg32> {
    current: View,
    quiz: SharedSession<R>,
}

impl<R: Rng> Shell<R> {
    pub fn new(quiz: SharedSession<R>) -> Self {
        Self {
            current: View::default(),
            quiz,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn quiz(&self) -> &SharedSession<R> {
        &self.quiz
    }
}

impl<R: Rng> Navigator for Shell<R> {
    fn navigate(&mut self, target: View) {
        if self.current == View::Game && target != View::Game {
            match self.quiz.lock() {
                Ok(mut session) => session.abandon(),
                Err(_) => log::error!("quiz session lock poisoned; cannot abandon"),
            }
        }
        log::debug!("navigate {} -> {}", self.current.as_str(), target.as_str());
        self.current = target;
    }
}

/// Drives `advance` from the wall clock on a background thread
pub struct Clock {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Clock {
    /// Advance `session` every `resolution`, passing non-empty event batches
    /// to `on_events`
    pub fn spawn<R, F>(session: SharedSession<R>, resolution: Duration, mut on_events: F) -> Self
    where
        R: Rng + Send + 'static,
        F: FnMut(Vec<QuizEvent>) + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            let mut last = Instant::now();
            while !stop_flag.load(Ordering::Acquire) {
                thread::sleep(resolution);
                let now = Instant::now();
                let dt = now - last;
                last = now;

                let events = match session.lock() {
                    Ok(mut s) => s.advance(dt),
                    Err(_) => {
                        log::error!("quiz session lock poisoned; clock stopping");
                        break;
                    }
                };
                if !events.is_empty() {
                    on_events(events);
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    /// Stop the clock and wait for its thread
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("clock thread panicked");
            }
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.shutdown();
    }
}
