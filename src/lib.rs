//! Sound Trail - a minimal-pair listening game
//!
//! A child is shown two words, picks the one containing the target speech
//! sound, and a character walks a checkpoint path toward the finish flag.
//! Correct answers advance, wrong answers retreat.
//!
//! Core modules:
//! - `config`: Game description (challenges, word pairs, map styling)
//! - `engine`: Progression state machine (position, attempts, stats)
//! - `path`: Checkpoint coordinates and smooth curve fitting
//! - `anim`: Marker movement, celebration and feedback animations
//! - `persistence`: Save/load progress (LocalStorage on web)
//! - `assets`: Image extension fallback resolution
//! - `shuffle`: Seedable answer-order shuffle

pub mod anim;
pub mod assets;
pub mod config;
pub mod engine;
pub mod path;
pub mod persistence;
pub mod shuffle;

pub use config::{Challenge, ConfigError, GameConfig, PathStyle};
pub use engine::{AnswerOutcome, GameSession, Stats};
pub use persistence::{MemoryStore, ProgressStore};

/// Game tuning constants
pub mod consts {
    /// Map dimensions for the SVG viewBox (logical pixels)
    pub const MAP_WIDTH: f32 = 1000.0;
    pub const MAP_HEIGHT: f32 = 400.0;
    /// Edge padding around the path
    pub const MAP_PADDING: f32 = 80.0;

    /// Rendered size of the character marker
    pub const MARKER_SIZE: f32 = 60.0;

    /// One checkpoint-to-checkpoint walk
    pub const MOVE_DURATION_MS: f32 = 800.0;
    /// Forward hop / backward shake pulse
    pub const FEEDBACK_DURATION_MS: f32 = 400.0;
    /// Victory celebration
    pub const CELEBRATION_DURATION_MS: f32 = 2000.0;
    pub const CELEBRATION_BOUNCES: u32 = 3;
    /// Vertical bounce amplitude (pixels) during celebration
    pub const CELEBRATION_BOUNCE_HEIGHT: f32 = 20.0;
    /// Peak sway rotation (degrees) during celebration
    pub const CELEBRATION_ROTATION_DEG: f32 = 10.0;
    /// Peak pulse scale during celebration
    pub const CELEBRATION_PULSE_SCALE: f32 = 1.15;

    /// Control-point scale for the cubic curve through checkpoints
    pub const CURVE_TENSION: f32 = 0.3;
}

/// One-time logging and panic hook setup for the browser build.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Current wall-clock time in Unix milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current wall-clock time in Unix milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
