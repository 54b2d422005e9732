use crate::components::ball::Ball;

/// Handle to a ball: its index in the scene arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BallId(pub usize);

/// Ball storage using a flat Vec indexed by `BallId`.
/// Balls are never removed, only deactivated, so handles stay valid.
#[derive(Debug, Clone)]
pub struct Scene {
    balls: Vec<Ball>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            balls: Vec::with_capacity(16),
        }
    }

    /// Create a scene with a specific ball capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            balls: Vec::with_capacity(capacity),
        }
    }

    /// Add a ball to the scene and return its handle.
    pub fn spawn(&mut self, ball: Ball) -> BallId {
        self.balls.push(ball);
        BallId(self.balls.len() - 1)
    }

    /// Get a reference to a ball by handle.
    pub fn get(&self, id: BallId) -> Option<&Ball> {
        self.balls.get(id.0)
    }

    /// Get a mutable reference to a ball by handle.
    pub fn get_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.get_mut(id.0)
    }

    /// Borrow two distinct balls mutably at once.
    /// Returns `None` if `a == b` or either handle is out of range.
    pub fn pair_mut(&mut self, a: BallId, b: BallId) -> Option<(&mut Ball, &mut Ball)> {
        if a == b || a.0 >= self.balls.len() || b.0 >= self.balls.len() {
            return None;
        }
        if a.0 < b.0 {
            let (left, right) = self.balls.split_at_mut(b.0);
            Some((&mut left[a.0], &mut right[0]))
        } else {
            let (left, right) = self.balls.split_at_mut(a.0);
            Some((&mut right[0], &mut left[b.0]))
        }
    }

    /// Iterate over all balls with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (BallId, &Ball)> {
        self.balls.iter().enumerate().map(|(i, b)| (BallId(i), b))
    }

    /// Iterate over all balls mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ball> {
        self.balls.iter_mut()
    }

    /// Iterate over balls still on the table.
    pub fn active(&self) -> impl Iterator<Item = (BallId, &Ball)> {
        self.iter().filter(|(_, b)| b.active)
    }

    /// Handle of the cue ball, if the scene has one.
    pub fn cue_id(&self) -> Option<BallId> {
        self.iter().find(|(_, b)| b.is_cue()).map(|(id, _)| id)
    }

    /// Handle of the object ball with the given number.
    pub fn find_by_number(&self, number: u8) -> Option<BallId> {
        self.iter()
            .find(|(_, b)| !b.is_cue() && b.number() == number)
            .map(|(id, _)| id)
    }

    /// Balls as a slice, in handle order.
    pub fn as_slice(&self) -> &[Ball] {
        &self.balls
    }

    /// Number of balls in the scene (active or not).
    pub fn len(&self) -> usize {
        self.balls.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
