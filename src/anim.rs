//! Marker animation driver
//!
//! Moves the character marker between checkpoints with an ease-in-out
//! interpolation, plays the victory celebration, and fires short feedback
//! pulses for forward/backward movement. The driver is frame-driven and
//! headless: callers feed it elapsed milliseconds and read back a position
//! and transform; rendering is someone else's job.
//!
//! Character states: `Idle -> Walking -> Idle` on every move,
//! `Idle -> Celebrating -> Idle` on victory. Movement commands arriving
//! mid-walk are queued so two animations never overlap.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::{
    CELEBRATION_BOUNCES, CELEBRATION_BOUNCE_HEIGHT, CELEBRATION_DURATION_MS,
    CELEBRATION_PULSE_SCALE, CELEBRATION_ROTATION_DEG, FEEDBACK_DURATION_MS, MOVE_DURATION_MS,
};

/// Quadratic ease-in-out over normalized time.
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// What the character sprite is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerState {
    #[default]
    Idle,
    Walking,
    Celebrating,
}

impl MarkerState {
    /// Sprite name for this state (`idle.png` etc. in the asset pack).
    pub fn sprite_name(&self) -> &'static str {
        match self {
            MarkerState::Idle => "idle",
            MarkerState::Walking => "walking",
            MarkerState::Celebrating => "celebrating",
        }
    }
}

/// Brief non-blocking pulse layered on top of whatever the marker is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Small hop after a correct answer
    Forward,
    /// Side-to-side shake after a wrong answer
    Backward,
}

#[derive(Debug, Clone, Copy)]
struct FeedbackPulse {
    kind: FeedbackKind,
    elapsed_ms: f32,
}

impl FeedbackPulse {
    fn offset(&self) -> Vec2 {
        let progress = (self.elapsed_ms / FEEDBACK_DURATION_MS).clamp(0.0, 1.0);
        match self.kind {
            FeedbackKind::Forward => {
                // One hop up and back down
                Vec2::new(0.0, -(progress * std::f32::consts::PI).sin() * 12.0)
            }
            FeedbackKind::Backward => {
                // Two quick shakes, settling back to center
                let decay = 1.0 - progress;
                Vec2::new((progress * std::f32::consts::TAU * 2.0).sin() * 8.0 * decay, 0.0)
            }
        }
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= FEEDBACK_DURATION_MS
    }
}

/// One in-flight checkpoint-to-checkpoint walk.
#[derive(Debug, Clone, Copy)]
struct MoveAnimation {
    start: Vec2,
    target: Vec2,
    duration_ms: f32,
    elapsed_ms: f32,
}

impl MoveAnimation {
    fn position(&self) -> Vec2 {
        let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.start + (self.target - self.start) * ease_in_out_quad(t)
    }

    fn finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

#[derive(Debug, Clone, Copy)]
struct Celebration {
    elapsed_ms: f32,
}

/// Composited render transform for the marker sprite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerTransform {
    /// Offset from the marker's path position (pixels)
    pub translate: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
}

impl Default for MarkerTransform {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

/// Frame-driven animation driver for the character marker.
#[derive(Debug, Default)]
pub struct MarkerDriver {
    checkpoints: Vec<Vec2>,
    position: Vec2,
    state: MarkerState,
    active: Option<MoveAnimation>,
    /// Pending checkpoint indices; moves run one at a time
    queue: VecDeque<usize>,
    celebration: Option<Celebration>,
    feedback: Option<FeedbackPulse>,
}

impl MarkerDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the driver to a checkpoint list and snap the marker to
    /// `start_index`. Replaces any in-flight animation.
    pub fn bind_checkpoints(&mut self, checkpoints: Vec<Vec2>, start_index: usize) {
        self.position = checkpoints
            .get(start_index)
            .copied()
            .or_else(|| checkpoints.first().copied())
            .unwrap_or(Vec2::ZERO);
        self.checkpoints = checkpoints;
        self.state = MarkerState::Idle;
        self.active = None;
        self.queue.clear();
        self.celebration = None;
        self.feedback = None;
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    /// Current marker position along the path (feedback offsets excluded).
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some() || !self.queue.is_empty() || self.celebration.is_some()
    }

    /// Walk to the checkpoint at `index`. Queued behind any in-flight
    /// move; invalid targets and an unbound driver are warned no-ops.
    pub fn move_to(&mut self, index: usize) {
        if self.checkpoints.is_empty() {
            log::warn!("move_to: no checkpoints bound");
            return;
        }
        if index >= self.checkpoints.len() {
            log::warn!(
                "move_to: target {index} out of range (have {} checkpoints)",
                self.checkpoints.len()
            );
            return;
        }

        if self.active.is_some() || self.celebration.is_some() {
            self.queue.push_back(index);
            return;
        }
        self.start_move(index);
    }

    fn start_move(&mut self, index: usize) {
        self.state = MarkerState::Walking;
        self.active = Some(MoveAnimation {
            start: self.position,
            target: self.checkpoints[index],
            duration_ms: MOVE_DURATION_MS,
            elapsed_ms: 0.0,
        });
    }

    /// Play the victory celebration. Only valid from `Idle`.
    pub fn celebrate(&mut self) {
        if self.checkpoints.is_empty() {
            log::warn!("celebrate: no checkpoints bound");
            return;
        }
        if self.state != MarkerState::Idle {
            log::warn!("celebrate: marker busy ({:?})", self.state);
            return;
        }
        self.state = MarkerState::Celebrating;
        self.celebration = Some(Celebration { elapsed_ms: 0.0 });
    }

    /// Fire a feedback pulse. Never touches the movement state machine.
    pub fn pulse(&mut self, kind: FeedbackKind) {
        self.feedback = Some(FeedbackPulse {
            kind,
            elapsed_ms: 0.0,
        });
    }

    /// Advance all running animations by `dt_ms` milliseconds.
    pub fn advance(&mut self, dt_ms: f32) {
        if let Some(pulse) = &mut self.feedback {
            pulse.elapsed_ms += dt_ms;
            if pulse.finished() {
                self.feedback = None;
            }
        }

        if let Some(celebration) = &mut self.celebration {
            celebration.elapsed_ms += dt_ms;
            if celebration.elapsed_ms >= CELEBRATION_DURATION_MS {
                self.celebration = None;
                self.state = MarkerState::Idle;
                self.start_queued();
            }
        }

        if let Some(anim) = &mut self.active {
            anim.elapsed_ms += dt_ms;
            if anim.finished() {
                self.position = anim.target;
                self.active = None;
                self.state = MarkerState::Idle;
                self.start_queued();
            } else {
                self.position = anim.position();
            }
        }
    }

    fn start_queued(&mut self) {
        if let Some(next) = self.queue.pop_front() {
            self.start_move(next);
        }
    }

    /// Render transform for this frame: celebration bounce/sway/pulse
    /// composited with any feedback offset.
    pub fn transform(&self) -> MarkerTransform {
        let mut transform = MarkerTransform::default();

        if let Some(celebration) = &self.celebration {
            let progress = (celebration.elapsed_ms / CELEBRATION_DURATION_MS).clamp(0.0, 1.0);
            let beat = progress * CELEBRATION_BOUNCES as f32 * std::f32::consts::PI;
            transform.translate.y = -beat.sin().abs() * CELEBRATION_BOUNCE_HEIGHT;
            transform.rotation_deg = (beat * 2.0).sin() * CELEBRATION_ROTATION_DEG;
            transform.scale = 1.0 + (CELEBRATION_PULSE_SCALE - 1.0) * beat.sin().abs();
        }

        if let Some(pulse) = &self.feedback {
            transform.translate += pulse.offset();
        }

        transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathStyle;
    use crate::path::generate_checkpoints;

    fn driver() -> MarkerDriver {
        let checkpoints = generate_checkpoints(PathStyle::Straight, 4, 1000.0, 400.0, 80.0);
        let mut driver = MarkerDriver::new();
        driver.bind_checkpoints(checkpoints, 0);
        driver
    }

    #[test]
    fn test_ease_in_out_quad_curve() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert!((ease_in_out_quad(0.25) - 0.125).abs() < 1e-6);
        assert!((ease_in_out_quad(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out_quad(0.75) - 0.875).abs() < 1e-6);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        // Clamped outside [0, 1]
        assert_eq!(ease_in_out_quad(-1.0), 0.0);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }

    #[test]
    fn test_ease_is_symmetric() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let sum = ease_in_out_quad(t) + ease_in_out_quad(1.0 - t);
            assert!((sum - 1.0).abs() < 1e-5, "t={t}");
        }
    }

    #[test]
    fn test_walk_reaches_target_and_returns_to_idle() {
        let mut d = driver();
        d.move_to(1);
        assert_eq!(d.state(), MarkerState::Walking);

        // Halfway: ease(0.5) = 0.5, so midway between x=80 and x=310
        d.advance(MOVE_DURATION_MS / 2.0);
        assert!((d.position().x - 195.0).abs() < 0.01);

        d.advance(MOVE_DURATION_MS / 2.0);
        assert_eq!(d.state(), MarkerState::Idle);
        assert!((d.position().x - 310.0).abs() < 0.001);
        assert!(!d.is_animating());
    }

    #[test]
    fn test_moves_are_serialized_not_overlapped() {
        let mut d = driver();
        d.move_to(1);
        d.move_to(2);
        assert_eq!(d.state(), MarkerState::Walking);

        // First move finishes at checkpoint 1, second starts immediately
        d.advance(MOVE_DURATION_MS);
        assert_eq!(d.state(), MarkerState::Walking);
        assert!((d.position().x - 310.0).abs() < 0.001);

        d.advance(MOVE_DURATION_MS);
        assert_eq!(d.state(), MarkerState::Idle);
        assert!((d.position().x - 540.0).abs() < 0.001);
    }

    #[test]
    fn test_invalid_target_is_a_no_op() {
        let mut d = driver();
        d.move_to(99);
        assert_eq!(d.state(), MarkerState::Idle);
        assert!(!d.is_animating());
    }

    #[test]
    fn test_unbound_driver_ignores_commands() {
        let mut d = MarkerDriver::new();
        d.move_to(0);
        d.celebrate();
        assert_eq!(d.state(), MarkerState::Idle);
        assert!(!d.is_animating());
    }

    #[test]
    fn test_celebration_runs_and_settles() {
        let mut d = driver();
        d.celebrate();
        assert_eq!(d.state(), MarkerState::Celebrating);

        d.advance(CELEBRATION_DURATION_MS / 4.0);
        let mid = d.transform();
        assert!(mid.translate.y < 0.0);
        assert!(mid.scale > 1.0);

        d.advance(CELEBRATION_DURATION_MS);
        assert_eq!(d.state(), MarkerState::Idle);
        assert_eq!(d.transform(), MarkerTransform::default());
    }

    #[test]
    fn test_celebrate_rejected_while_walking() {
        let mut d = driver();
        d.move_to(1);
        d.celebrate();
        assert_eq!(d.state(), MarkerState::Walking);
    }

    #[test]
    fn test_feedback_pulse_does_not_touch_state() {
        let mut d = driver();
        d.pulse(FeedbackKind::Forward);
        assert_eq!(d.state(), MarkerState::Idle);
        d.advance(FEEDBACK_DURATION_MS / 2.0);
        // Hop peaks mid-pulse
        assert!(d.transform().translate.y < 0.0);

        d.advance(FEEDBACK_DURATION_MS);
        assert_eq!(d.transform(), MarkerTransform::default());
        assert_eq!(d.state(), MarkerState::Idle);
    }

    #[test]
    fn test_feedback_during_walk_is_additive() {
        let mut d = driver();
        d.move_to(1);
        d.pulse(FeedbackKind::Backward);
        d.advance(100.0);
        assert_eq!(d.state(), MarkerState::Walking);
        // Walk keeps progressing while the pulse plays
        assert!(d.position().x > 80.0);
    }

    #[test]
    fn test_sprite_names() {
        assert_eq!(MarkerState::Idle.sprite_name(), "idle");
        assert_eq!(MarkerState::Walking.sprite_name(), "walking");
        assert_eq!(MarkerState::Celebrating.sprite_name(), "celebrating");
    }
}
