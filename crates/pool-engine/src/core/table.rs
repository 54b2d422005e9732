//! Static table geometry: the playing field and its six pockets.
//!
//! Each pocket has two disks. The wider entrance disk sits on the mouth of
//! the pocket; while a ball's centre is inside it the rail it is cut into
//! stops bouncing the ball, so the ball can roll over the mouth. The narrower
//! target disk sits just outside the rail and decides actual capture.
//!
//! ```text
//!   (0,0) +-----------------( )-----------------+ (w,0)
//!         |                                     |
//!         |                                     |
//!   (0,h) +-----------------( )-----------------+ (w,h)
//! ```

use crate::api::config::TableConfig;
use crate::core::vector::Vector2D;

/// Corner or side (middle) pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PocketKind {
    Corner,
    Side,
}

impl PocketKind {
    /// Whether this pocket's mouth opens the left/right rails.
    pub fn opens_x(self) -> bool {
        matches!(self, PocketKind::Corner)
    }

    /// Whether this pocket's mouth opens the top/bottom rails.
    pub fn opens_y(self) -> bool {
        true
    }
}

/// A pocket with its entrance (mouth) and target (capture) disks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pocket {
    pub kind: PocketKind,
    pub entrance_center: Vector2D,
    pub entrance_radius: f64,
    pub target_center: Vector2D,
    pub target_radius: f64,
}

impl Pocket {
    /// Whether `position` lies strictly inside the entrance disk.
    pub fn in_entrance(&self, position: Vector2D) -> bool {
        position.distance(self.entrance_center) < self.entrance_radius
    }

    /// Whether `position` lies inside the target disk scaled by `tolerance`.
    pub fn captures(&self, position: Vector2D, tolerance: f64) -> bool {
        position.distance(self.target_center) < self.target_radius * tolerance
    }
}

/// The playing field `[0, width] x [0, height]` and its pockets.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    width: f64,
    height: f64,
    ball_radius: f64,
    pocket_tolerance: f64,
    pockets: [Pocket; 6],
}

impl Table {
    pub fn new(config: &TableConfig) -> Self {
        let w = config.width;
        let h = config.height;
        let corner = |cx: f64, cy: f64, sx: f64, sy: f64| Pocket {
            kind: PocketKind::Corner,
            entrance_center: Vector2D::new(cx, cy),
            entrance_radius: config.corner_entrance_radius,
            target_center: Vector2D::new(
                cx + sx * config.corner_target_offset,
                cy + sy * config.corner_target_offset,
            ),
            target_radius: config.corner_target_radius,
        };
        let side = |cy: f64, sy: f64| Pocket {
            kind: PocketKind::Side,
            entrance_center: Vector2D::new(w / 2.0, cy),
            entrance_radius: config.side_entrance_radius,
            target_center: Vector2D::new(w / 2.0, cy + sy * config.side_target_offset),
            target_radius: config.side_target_radius,
        };

        Self {
            width: w,
            height: h,
            ball_radius: config.ball_radius,
            pocket_tolerance: config.pocket_tolerance,
            pockets: [
                // Corner pockets, target pushed diagonally outward
                corner(0.0, 0.0, -1.0, -1.0),
                corner(w, 0.0, 1.0, -1.0),
                corner(0.0, h, -1.0, 1.0),
                corner(w, h, 1.0, 1.0),
                // Side pockets, middle of the top and bottom rails
                side(0.0, -1.0),
                side(h, 1.0),
            ],
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn ball_radius(&self) -> f64 {
        self.ball_radius
    }

    pub fn pockets(&self) -> &[Pocket; 6] {
        &self.pockets
    }

    pub fn center(&self) -> Vector2D {
        Vector2D::new(self.width / 2.0, self.height / 2.0)
    }

    /// Where the cue ball starts and respawns (centre of the head string).
    pub fn head_spot(&self) -> Vector2D {
        Vector2D::new(self.width * 0.25, self.height / 2.0)
    }

    /// Apex of the rack.
    pub fn foot_spot(&self) -> Vector2D {
        Vector2D::new(self.width * 0.7, self.height / 2.0)
    }

    /// The pocket whose entrance disk contains `position`, if any.
    pub fn entrance_at(&self, position: Vector2D) -> Option<&Pocket> {
        self.pockets.iter().find(|p| p.in_entrance(position))
    }

    /// Index of the pocket whose target disk captures `position`, if any.
    pub fn capturing_pocket(&self, position: Vector2D) -> Option<usize> {
        self.pockets
            .iter()
            .position(|p| p.captures(position, self.pocket_tolerance))
    }

    /// Whether a disk of `radius` at `position` lies fully inside the field.
    pub fn contains(&self, position: Vector2D, radius: f64) -> bool {
        position.x >= radius
            && position.x <= self.width - radius
            && position.y >= radius
            && position.y <= self.height - radius
    }
}
