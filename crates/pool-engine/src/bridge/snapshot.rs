use bytemuck::{Pod, Zeroable};

use crate::components::ball::{Ball, Category};
use crate::core::scene::Scene;

/// Per-ball render data for an external renderer.
/// Wire format: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BallInstance {
    /// X position in table space.
    pub x: f32,
    /// Y position in table space.
    pub y: f32,
    pub radius: f32,
    /// Ball number, 0 for the cue ball.
    pub number: f32,
    /// See `category_code`.
    pub category: f32,
    /// 1.0 on the table, 0.0 pocketed.
    pub active: f32,
    pub vx: f32,
    pub vy: f32,
}

/// Category codes written into `BallInstance::category`.
pub const CATEGORY_CUE: f32 = 0.0;
pub const CATEGORY_SOLID: f32 = 1.0;
pub const CATEGORY_STRIPE: f32 = 2.0;
pub const CATEGORY_EIGHT: f32 = 3.0;

fn category_code(category: Option<Category>) -> f32 {
    match category {
        None => CATEGORY_CUE,
        Some(Category::Solid) => CATEGORY_SOLID,
        Some(Category::Stripe) => CATEGORY_STRIPE,
        Some(Category::EightBall) => CATEGORY_EIGHT,
    }
}

impl BallInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_ball(ball: &Ball) -> Self {
        Self {
            x: ball.position.x as f32,
            y: ball.position.y as f32,
            radius: ball.radius as f32,
            number: ball.number() as f32,
            category: category_code(ball.category()),
            active: if ball.active { 1.0 } else { 0.0 },
            vx: ball.velocity.x as f32,
            vy: ball.velocity.y as f32,
        }
    }
}

/// Snapshot of every ball, in arena order (the cue ball first).
/// Pocketed balls are kept with `active = 0.0` so slot `i` is always ball id `i`.
#[derive(Debug, Clone, Default)]
pub struct BallSnapshot {
    pub instances: Vec<BallInstance>,
}

impl BallSnapshot {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(16),
        }
    }

    pub fn capture(scene: &Scene) -> Self {
        let mut snapshot = Self::new();
        snapshot.refill(scene);
        snapshot
    }

    /// Overwrite the snapshot with the scene's current state, reusing the buffer.
    pub fn refill(&mut self, scene: &Scene) {
        self.instances.clear();
        self.instances
            .extend(scene.as_slice().iter().map(BallInstance::from_ball));
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Flat float view, `len() * BallInstance::FLOATS` long.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}
