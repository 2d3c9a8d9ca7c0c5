//! Progression engine
//!
//! Single source of truth for where the player is in the challenge
//! sequence. Position lives in `[0, challenge_count]`; reaching
//! `challenge_count` is victory. Correct answers advance one step, wrong
//! answers retreat one step (never below the start). Every attempt is
//! recorded and every mutation is persisted fire-and-forget: a failed
//! write logs a warning and gameplay continues in memory.

use serde::{Deserialize, Serialize};

use crate::config::{Challenge, GameConfig};
use crate::persistence::{ProgressStore, SavedProgress};

/// One answered (or attempted) challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub challenge_index: usize,
    pub selected_word: String,
    pub was_correct: bool,
    /// Unix milliseconds
    pub timestamp: f64,
}

/// Result of a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub new_position: usize,
    /// Child-facing feedback line
    pub message: &'static str,
}

/// Derived view over attempts and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub total_attempts: usize,
    pub correct_attempts: usize,
    pub wrong_attempts: usize,
    /// Percentage of attempts that were correct, 0.0 when none
    pub accuracy: f32,
    /// Percentage of the path covered
    pub progress: f32,
}

/// An active game session: config, position, attempt log, storage.
///
/// Owns its `ProgressStore` exclusively; nothing else writes progress.
pub struct GameSession {
    config: GameConfig,
    game_id: String,
    position: usize,
    attempts: Vec<AttemptRecord>,
    store: Box<dyn ProgressStore>,
    answer_listeners: Vec<Box<dyn FnMut(&AnswerOutcome)>>,
    restart_listeners: Vec<Box<dyn FnMut()>>,
}

impl GameSession {
    /// Start a fresh session. The config must already be validated
    /// (`GameConfig::from_json` does both).
    pub fn new(config: GameConfig, store: Box<dyn ProgressStore>) -> Self {
        let game_id = config.storage_key();
        Self {
            config,
            game_id,
            position: 0,
            attempts: Vec::new(),
            store,
            answer_listeners: Vec::new(),
            restart_listeners: Vec::new(),
        }
    }

    /// Register a listener notified after every recorded answer. This is
    /// the seam the rendering layer hangs on; the engine never talks to
    /// the DOM directly.
    pub fn on_answer(&mut self, listener: impl FnMut(&AnswerOutcome) + 'static) {
        self.answer_listeners.push(Box::new(listener));
    }

    /// Register a listener notified when the game restarts via `reset`.
    pub fn on_restart(&mut self, listener: impl FnMut() + 'static) {
        self.restart_listeners.push(Box::new(listener));
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn attempts(&self) -> &[AttemptRecord] {
        &self.attempts
    }

    pub fn challenge_count(&self) -> usize {
        self.config.challenges.len()
    }

    /// The challenge at the current position, or `None` once past the end.
    pub fn current_challenge(&self) -> Option<&Challenge> {
        self.config.challenges.get(self.position)
    }

    /// All challenges answered?
    pub fn is_victory(&self) -> bool {
        self.position >= self.challenge_count()
    }

    /// Submit the index of the chosen pair (0 or 1) for the current
    /// challenge. Out-of-range choices and post-victory submissions leave
    /// the position unchanged and record nothing.
    pub fn submit_answer(&mut self, choice_index: usize) -> AnswerOutcome {
        let Some(challenge) = self.current_challenge() else {
            return AnswerOutcome {
                correct: false,
                new_position: self.position,
                message: "No challenge to answer",
            };
        };
        let Some(selected) = challenge.pairs.get(choice_index) else {
            log::warn!("submit_answer: choice index {choice_index} out of range");
            return AnswerOutcome {
                correct: false,
                new_position: self.position,
                message: "Invalid choice",
            };
        };

        let correct = selected.sound == challenge.correct_sound;
        let record = AttemptRecord {
            challenge_index: self.position,
            selected_word: selected.word.clone(),
            was_correct: correct,
            timestamp: crate::now_ms(),
        };
        self.attempts.push(record);

        self.position = if correct {
            (self.position + 1).min(self.challenge_count())
        } else {
            self.position.saturating_sub(1)
        };

        self.persist();

        let outcome = AnswerOutcome {
            correct,
            new_position: self.position,
            message: if correct { "Great job!" } else { "Try again!" },
        };
        for listener in &mut self.answer_listeners {
            listener(&outcome);
        }
        outcome
    }

    /// Back to the start: position 0, empty attempt log, state persisted.
    pub fn reset(&mut self) {
        self.position = 0;
        self.attempts.clear();
        self.persist();
        for listener in &mut self.restart_listeners {
            listener();
        }
    }

    /// Restore a previously saved session, if one exists for this game.
    /// Returns whether anything was restored.
    pub fn load_persisted(&mut self) -> bool {
        match self.store.load(&self.game_id) {
            Ok(Some(saved)) => {
                if saved.game_id != self.game_id {
                    log::warn!(
                        "Ignoring saved progress for {:?} under key {:?}",
                        saved.game_id,
                        self.game_id
                    );
                    return false;
                }
                // Clamp in case the config shrank since the save was written.
                self.position = saved.position.min(self.challenge_count());
                self.attempts = saved.attempts;
                log::info!(
                    "Restored progress: position {} of {}",
                    self.position,
                    self.challenge_count()
                );
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Failed to load progress: {e}");
                false
            }
        }
    }

    /// Erase any saved state for this game and reset in-memory state.
    pub fn clear_persisted(&mut self) {
        if let Err(e) = self.store.clear(&self.game_id) {
            log::warn!("Failed to clear progress: {e}");
        }
        self.position = 0;
        self.attempts.clear();
    }

    /// Attempt/accuracy/progress summary.
    pub fn stats(&self) -> Stats {
        let total_attempts = self.attempts.len();
        let correct_attempts = self.attempts.iter().filter(|a| a.was_correct).count();
        let wrong_attempts = total_attempts - correct_attempts;
        let accuracy = if total_attempts > 0 {
            correct_attempts as f32 / total_attempts as f32 * 100.0
        } else {
            0.0
        };
        let progress = self.position as f32 / self.challenge_count() as f32 * 100.0;

        Stats {
            total_attempts,
            correct_attempts,
            wrong_attempts,
            accuracy,
            progress,
        }
    }

    fn persist(&mut self) {
        let progress = SavedProgress {
            game_id: self.game_id.clone(),
            position: self.position,
            attempts: self.attempts.clone(),
            timestamp: crate::now_ms(),
        };
        if let Err(e) = self.store.save(&self.game_id, &progress) {
            log::warn!("Failed to save progress: {e}");
        }
    }
}
