use serde::{Deserialize, Serialize};

use crate::core::scene::BallId;
use crate::core::vector::Vector2D;

/// Mass shared by every ball on the table.
pub const BALL_MASS: f64 = 1.0;

/// Object-ball group a player is restricted to once the table is assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Solid,
    Stripe,
    EightBall,
}

impl Category {
    /// Category of a numbered ball: 1-7 solid, 8 the eight ball, 9-15 striped.
    /// Returns `None` outside 1..=15.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Category::Solid),
            8 => Some(Category::EightBall),
            9..=15 => Some(Category::Stripe),
            _ => None,
        }
    }

    /// The other player group. The eight ball has no opposite.
    pub fn opposite(self) -> Option<Self> {
        match self {
            Category::Solid => Some(Category::Stripe),
            Category::Stripe => Some(Category::Solid),
            Category::EightBall => None,
        }
    }
}

/// Cue-ball specific state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CueState {
    /// Set when the cue ball was pocketed and is waiting to be put back.
    pub pending_respawn: bool,
}

/// Object-ball specific state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectState {
    /// Ball number, 1..=15.
    pub number: u8,
    pub category: Category,
    /// Render hint only: draw without the numbered texture.
    pub plain: bool,
}

/// What kind of ball this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallKind {
    Cue(CueState),
    Object(ObjectState),
}

/// Copyable summary of an object ball, used in turn reports and rule inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectInfo {
    pub id: BallId,
    pub number: u8,
    pub category: Category,
}

/// A ball on the table. Physical state is shared; the variant lives in `kind`.
#[derive(Debug, Clone)]
pub struct Ball {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub mass: f64,
    /// Inactive balls are skipped by collision and pocket checks.
    pub active: bool,
    pub kind: BallKind,
}

impl Ball {
    /// Create the cue ball at `position`.
    pub fn cue(position: Vector2D, radius: f64) -> Self {
        Self {
            position,
            velocity: Vector2D::ZERO,
            radius,
            mass: BALL_MASS,
            active: true,
            kind: BallKind::Cue(CueState::default()),
        }
    }

    /// Create numbered object ball `number` at `position`.
    /// Returns `None` if `number` is not in 1..=15.
    pub fn object(number: u8, position: Vector2D, radius: f64) -> Option<Self> {
        let category = Category::from_number(number)?;
        Some(Self {
            position,
            velocity: Vector2D::ZERO,
            radius,
            mass: BALL_MASS,
            active: true,
            kind: BallKind::Object(ObjectState {
                number,
                category,
                plain: false,
            }),
        })
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, velocity: Vector2D) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_plain_texture(mut self, plain: bool) -> Self {
        if let BallKind::Object(state) = &mut self.kind {
            state.plain = plain;
        }
        self
    }

    // -- Queries --

    pub fn is_cue(&self) -> bool {
        matches!(self.kind, BallKind::Cue(_))
    }

    /// Ball number; the cue ball is 0.
    pub fn number(&self) -> u8 {
        match self.kind {
            BallKind::Cue(_) => 0,
            BallKind::Object(state) => state.number,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self.kind {
            BallKind::Cue(_) => None,
            BallKind::Object(state) => Some(state.category),
        }
    }

    /// Summary for reports. `None` for the cue ball.
    pub fn object_info(&self, id: BallId) -> Option<ObjectInfo> {
        match self.kind {
            BallKind::Cue(_) => None,
            BallKind::Object(state) => Some(ObjectInfo {
                id,
                number: state.number,
                category: state.category,
            }),
        }
    }

    pub fn pending_respawn(&self) -> bool {
        matches!(self.kind, BallKind::Cue(CueState { pending_respawn: true }))
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn momentum(&self) -> Vector2D {
        self.velocity * self.mass
    }

    // -- Mutation --

    /// Strike the ball. The impulse is applied as an instantaneous velocity.
    pub fn hit(&mut self, force: Vector2D) {
        if force.is_finite() {
            self.velocity = force;
        }
    }

    /// Take the ball off the table. The cue ball is flagged for respawn.
    pub fn capture(&mut self) {
        self.active = false;
        self.velocity = Vector2D::ZERO;
        if let BallKind::Cue(state) = &mut self.kind {
            state.pending_respawn = true;
        }
    }

    /// Put the ball back on the table at rest.
    pub fn restore(&mut self, position: Vector2D) {
        self.position = position;
        self.velocity = Vector2D::ZERO;
        self.active = true;
        if let BallKind::Cue(state) = &mut self.kind {
            state.pending_respawn = false;
        }
    }

    /// Whether this ball's disk overlaps a disk of `radius` at `position`.
    pub fn overlaps(&self, position: Vector2D, radius: f64) -> bool {
        self.position.distance(position) < self.radius + radius
    }
}
