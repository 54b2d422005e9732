//! Aim assist. Given the cue ball and an aim direction, find what the cue
//! ball would hit first along a straight line, purely geometrically, and the
//! directions both balls leave in. Used for visuals and a pre-shot legality
//! hint; the physics engine never consults it.
//!
//! Ghost ball: the position the cue ball's centre occupies at the instant of
//! contact. With `e` the perpendicular distance from the target centre to the
//! aim line, `t` the projection of the target centre on it and `R` the sum of
//! radii, contact happens at distance `t - sqrt(R^2 - e^2)`.
//!
//! ```text
//!            target
//!              O
//!             /|
//!          R / | e
//!           /  |
//!   cue ---G---+------> aim
//!          |<->|
//!     sqrt(R^2 - e^2)
//! ```

use crate::components::ball::ObjectInfo;
use crate::core::scene::{BallId, Scene};
use crate::core::table::Table;
use crate::core::vector::{perp, try_normalize, Vector2D, EPSILON};
use crate::systems::rules::GameRules;

/// What the aim line reaches first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictedHit {
    /// A cushion, inset by the cue ball radius.
    Wall,
    /// An object ball.
    Ball(ObjectInfo),
    /// Nothing within the maximum ray length.
    Nothing,
}

/// Result of one prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub origin: Vector2D,
    pub direction: Vector2D,
    /// Distance travelled to the contact point, capped at the ray length.
    pub distance: f64,
    /// Cue ball centre at contact (the ghost ball for a ball hit).
    pub contact_point: Vector2D,
    pub hit: PredictedHit,
    /// Direction the struck ball leaves in (ball hits only).
    pub target_direction: Option<Vector2D>,
    /// Direction the cue ball leaves in. Zero on a full-ball hit.
    pub cue_direction: Option<Vector2D>,
    /// Whether the struck ball is a legal first hit (8-ball only).
    pub legal: Option<bool>,
}

impl Prediction {
    pub fn target(&self) -> Option<ObjectInfo> {
        match self.hit {
            PredictedHit::Ball(info) => Some(info),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShotPredictor {
    max_ray_length: f64,
}

impl ShotPredictor {
    pub fn new(max_ray_length: f64) -> Self {
        Self { max_ray_length }
    }

    pub fn max_ray_length(&self) -> f64 {
        self.max_ray_length
    }

    /// Cast the aim ray from the cue ball `cue`.
    /// Returns `None` for a degenerate direction or a cue ball off the table.
    pub fn predict(
        &self,
        scene: &Scene,
        table: &Table,
        cue: BallId,
        direction: Vector2D,
    ) -> Option<Prediction> {
        let dir = try_normalize(direction)?;
        let cue_ball = scene.get(cue).filter(|b| b.active)?;
        let origin = cue_ball.position;
        let radius = cue_ball.radius;

        // Walls: only the inset plane the ray moves toward on each axis.
        // A ball resting on that plane hits it at distance zero.
        let mut best = f64::INFINITY;
        let mut wall_axis = None;
        let axes = [
            (origin.x, dir.x, radius, table.width() - radius, 0),
            (origin.y, dir.y, radius, table.height() - radius, 1),
        ];
        for (start, d, low, high, axis) in axes {
            let plane = if d > 0.0 {
                high
            } else if d < 0.0 {
                low
            } else {
                continue;
            };
            let dist = ((plane - start) / d).max(0.0);
            if dist.is_finite() && dist < best {
                best = dist;
                wall_axis = Some(axis);
            }
        }

        // Balls: ghost-ball contact distance
        let mut target = None;
        for (id, ball) in scene.active() {
            if id == cue {
                continue;
            }
            let Some(info) = ball.object_info(id) else {
                continue;
            };
            let to_ball = ball.position - origin;
            let t = to_ball.dot(dir);
            if t < 0.0 {
                continue;
            }
            let reach = radius + ball.radius;
            let perp_sq = (to_ball.length_squared() - t * t).max(0.0);
            if perp_sq >= reach * reach {
                continue;
            }
            let dist = (t - (reach * reach - perp_sq).sqrt()).max(0.0);
            if dist < best {
                best = dist;
                target = Some((info, ball.position));
            }
        }

        if best > self.max_ray_length {
            return Some(Prediction {
                origin,
                direction: dir,
                distance: self.max_ray_length,
                contact_point: origin + dir * self.max_ray_length,
                hit: PredictedHit::Nothing,
                target_direction: None,
                cue_direction: None,
                legal: None,
            });
        }

        let contact_point = origin + dir * best;
        let prediction = match target {
            Some((info, center)) => {
                let (target_direction, cue_direction) =
                    split_directions(contact_point, center, dir);
                Prediction {
                    origin,
                    direction: dir,
                    distance: best,
                    contact_point,
                    hit: PredictedHit::Ball(info),
                    target_direction,
                    cue_direction,
                    legal: None,
                }
            }
            None => {
                let reflected = match wall_axis {
                    Some(0) => Vector2D::new(-dir.x, dir.y),
                    _ => Vector2D::new(dir.x, -dir.y),
                };
                Prediction {
                    origin,
                    direction: dir,
                    distance: best,
                    contact_point,
                    hit: PredictedHit::Wall,
                    target_direction: None,
                    cue_direction: Some(reflected),
                    legal: None,
                }
            }
        };
        Some(prediction)
    }

    /// `predict`, plus the 8-ball legality overlay for the struck ball.
    pub fn predict_with_rules(
        &self,
        scene: &Scene,
        table: &Table,
        cue: BallId,
        direction: Vector2D,
        rules: &GameRules,
        remaining: &[ObjectInfo],
    ) -> Option<Prediction> {
        let mut prediction = self.predict(scene, table, cue, direction)?;
        if let PredictedHit::Ball(info) = prediction.hit {
            prediction.legal = Some(rules.is_legal_target(info.category, remaining));
        }
        Some(prediction)
    }
}

/// Equal-mass elastic split: the target leaves along the line of centres,
/// the cue ball along the tangent, on the side it was already travelling.
fn split_directions(
    ghost: Vector2D,
    target_center: Vector2D,
    incoming: Vector2D,
) -> (Option<Vector2D>, Option<Vector2D>) {
    let Some(normal) = try_normalize(target_center - ghost) else {
        return (None, None);
    };
    let mut tangent = perp(normal);
    let along = tangent.dot(incoming);
    if along.abs() <= EPSILON {
        return (Some(normal), Some(Vector2D::ZERO));
    }
    if along < 0.0 {
        tangent = -tangent;
    }
    (Some(normal), Some(tangent))
}
