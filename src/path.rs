//! Checkpoint path generation and curve fitting
//!
//! Pure coordinate math: a path style plus a step count maps to
//! `steps + 1` checkpoints (start and finish included), and a smooth
//! cubic curve is fitted through them for the SVG trail. Everything here
//! is a deterministic function of its inputs - the "mountainous" style
//! looks random but is a fixed two-frequency wave over the index, so
//! checkpoint coordinates are reproducible across renders.

use glam::Vec2;

use crate::config::PathStyle;
use crate::consts::CURVE_TENSION;

/// Checkpoint coordinates for each position `0..=steps`.
///
/// X is evenly spaced from `padding` across the map; y depends on the
/// style. Zero steps degenerates to a single start point.
pub fn generate_checkpoints(
    style: PathStyle,
    steps: usize,
    width: f32,
    height: f32,
    padding: f32,
) -> Vec<Vec2> {
    if steps == 0 {
        return vec![Vec2::new(padding, height * 0.5)];
    }

    let path_height = height - 2.0 * padding;
    let step_x = (width - padding) / steps as f32;

    (0..=steps)
        .map(|i| {
            let x = padding + i as f32 * step_x;
            let y = match style {
                PathStyle::Straight => height * 0.5,
                PathStyle::Winding => {
                    let frequency = std::f32::consts::TAU / steps as f32;
                    height * 0.5 + (i as f32 * frequency * 1.5).sin() * (path_height * 0.3)
                }
                PathStyle::Zigzag => {
                    if i % 2 == 0 {
                        padding + path_height * 0.3
                    } else {
                        padding + path_height * 0.7
                    }
                }
                PathStyle::Mountainous => {
                    let variation = path_height * 0.35;
                    height * 0.5
                        + (i as f32 * 0.7).sin() * variation
                        + (i as f32 * 1.3).cos() * (variation * 0.5)
                }
                PathStyle::Ascending => {
                    let progress = i as f32 / steps as f32;
                    padding + path_height - progress * path_height * 0.8
                }
            };
            Vec2::new(x, y)
        })
        .collect()
}

/// One cubic Bezier piece of the fitted trail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegment {
    pub from: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

impl CurveSegment {
    /// Evaluate the cubic at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        self.from * (u * u * u)
            + self.ctrl1 * (3.0 * u * u * t)
            + self.ctrl2 * (3.0 * u * t * t)
            + self.to * (t * t * t)
    }
}

/// Tangent vector at each checkpoint: endpoints point along their sole
/// neighbor, interior points take half the delta of their two neighbors.
pub fn checkpoint_tangents(checkpoints: &[Vec2]) -> Vec<Vec2> {
    match checkpoints.len() {
        0 => Vec::new(),
        1 => vec![Vec2::ZERO],
        n => (0..n)
            .map(|i| {
                if i == 0 {
                    checkpoints[1] - checkpoints[0]
                } else if i == n - 1 {
                    checkpoints[n - 1] - checkpoints[n - 2]
                } else {
                    (checkpoints[i + 1] - checkpoints[i - 1]) * 0.5
                }
            })
            .collect(),
    }
}

/// Fit cubic segments through consecutive checkpoints using the tangent
/// vectors scaled by a fixed tension. Fewer than two checkpoints yields
/// no segments; exactly two yields one degenerate (straight) segment.
pub fn fit_curve(checkpoints: &[Vec2]) -> Vec<CurveSegment> {
    if checkpoints.len() < 2 {
        return Vec::new();
    }

    let tangents = checkpoint_tangents(checkpoints);
    checkpoints
        .windows(2)
        .enumerate()
        .map(|(i, pair)| CurveSegment {
            from: pair[0],
            ctrl1: pair[0] + tangents[i] * CURVE_TENSION,
            ctrl2: pair[1] - tangents[i + 1] * CURVE_TENSION,
            to: pair[1],
        })
        .collect()
}

/// SVG path `d` attribute for the trail through the checkpoints.
///
/// Degenerate cases: no checkpoints produce an empty string, one
/// produces a bare move, two produce a straight line.
pub fn svg_path_d(checkpoints: &[Vec2]) -> String {
    match checkpoints.len() {
        0 => String::new(),
        1 => format!("M {},{}", checkpoints[0].x, checkpoints[0].y),
        2 => format!(
            "M {},{} L {},{}",
            checkpoints[0].x, checkpoints[0].y, checkpoints[1].x, checkpoints[1].y
        ),
        _ => {
            let mut d = format!("M {},{}", checkpoints[0].x, checkpoints[0].y);
            for seg in fit_curve(checkpoints) {
                d.push_str(&format!(
                    " C {},{} {},{} {},{}",
                    seg.ctrl1.x, seg.ctrl1.y, seg.ctrl2.x, seg.ctrl2.y, seg.to.x, seg.to.y
                ));
            }
            d
        }
    }
}
