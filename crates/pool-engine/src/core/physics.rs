//! Ball simulation: integration under felt friction, pocket capture,
//! ball-ball impacts and cushion bounces, plus the per-shot turn report the
//! rule engine consumes.
//!
//! Every sub-step runs, in order:
//!   1. integrate   position += v * dt, v *= friction^(dt * 60), snap slow balls to rest
//!   2. pockets     capture against each pocket's target disk
//!   3. ball-ball   positional correction + restitution impulse, first-contact tracking
//!   4. cushions    clamp and reflect, suppressed on the axes a pocket mouth opens
//!
//! Cushions run last so that, at every step boundary, each active ball is
//! inside the field unless its centre sits in a pocket entrance.

use crate::api::config::PhysicsConfig;
use crate::components::ball::{Ball, ObjectInfo};
use crate::core::scene::{BallId, Scene};
use crate::core::table::Table;
use crate::core::vector::Vector2D;
use crate::error::PlacementError;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Something that happened during a step, for sound/score collaborators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsEvent {
    /// An object ball dropped. `pocket` is `None` for debug pockets.
    BallPocketed { ball: ObjectInfo, pocket: Option<usize> },
    /// The cue ball dropped.
    CueBallPocketed { pocket: Option<usize> },
    /// Two balls struck each other with the given closing speed.
    BallContact { a: BallId, b: BallId, speed: f64 },
    /// A ball bounced off a cushion with the given normal speed.
    CushionHit { ball: BallId, speed: f64 },
}

/// Outcome of one shot, accumulated while balls roll.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnReport {
    /// Object balls in capture order. Never holds the same ball twice.
    pub pocketed: Vec<ObjectInfo>,
    pub cue_ball_pocketed: bool,
    /// First object ball the cue ball touched this shot.
    pub first_hit: Option<ObjectInfo>,
}

impl TurnReport {
    /// Record a captured object ball. Returns `false` if it was already recorded.
    pub fn record_pocket(&mut self, ball: ObjectInfo) -> bool {
        if self.pocketed.iter().any(|b| b.id == ball.id) {
            return false;
        }
        self.pocketed.push(ball);
        true
    }

    /// Record the first cue-ball contact. Later contacts are ignored.
    pub fn record_first_hit(&mut self, ball: ObjectInfo) -> bool {
        if self.first_hit.is_some() {
            return false;
        }
        self.first_hit = Some(ball);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.pocketed.is_empty() && !self.cue_ball_pocketed && self.first_hit.is_none()
    }
}

/// Proof that every active ball was at rest when it was issued.
/// Only `PhysicsEngine::settled` can create one.
#[derive(Debug)]
pub struct Settled {
    _private: (),
}

// ---------------------------------------------------------------------------
// PhysicsEngine
// ---------------------------------------------------------------------------

/// Owns the balls and advances them through time.
pub struct PhysicsEngine {
    config: PhysicsConfig,
    table: Table,
    scene: Scene,
    report: TurnReport,
    events: Vec<PhysicsEvent>,
    /// Cue ball is in hand: it takes no part in the simulation.
    cue_held: bool,
}

impl PhysicsEngine {
    /// Create an engine with an empty table.
    pub fn new(table: Table, config: PhysicsConfig) -> Self {
        Self {
            config,
            table,
            scene: Scene::with_capacity(16),
            report: TurnReport::default(),
            events: Vec::new(),
            cue_held: false,
        }
    }

    /// Add a ball to the table.
    pub fn spawn(&mut self, ball: Ball) -> BallId {
        self.scene.spawn(ball)
    }

    // -- Accessors --

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.scene.get(id)
    }

    /// Mutable access for the input collaborator (e.g. `Ball::hit`).
    pub fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.scene.get_mut(id)
    }

    pub fn cue_ball_id(&self) -> Option<BallId> {
        self.scene.cue_id()
    }

    /// Object balls still on the table.
    pub fn remaining_object_balls(&self) -> Vec<ObjectInfo> {
        self.scene
            .active()
            .filter_map(|(id, b)| b.object_info(id))
            .collect()
    }

    pub fn is_cue_ball_held(&self) -> bool {
        self.cue_held
    }

    /// Suspend (or resume) simulation of the cue ball while it is in hand.
    pub fn set_cue_ball_held(&mut self, held: bool) {
        self.cue_held = held;
    }

    // -- Turn report --

    /// Copy of the object balls captured since the last reset.
    pub fn pocketed_balls(&self) -> Vec<ObjectInfo> {
        self.report.pocketed.clone()
    }

    pub fn is_cue_ball_pocketed(&self) -> bool {
        self.report.cue_ball_pocketed
    }

    pub fn first_hit_ball(&self) -> Option<ObjectInfo> {
        self.report.first_hit
    }

    pub fn turn_report(&self) -> &TurnReport {
        &self.report
    }

    /// Clear the report. Safe to call any number of times.
    pub fn reset_turn_report(&mut self) {
        self.report = TurnReport::default();
    }

    /// Hand out the finished shot's report and reset it in one move.
    pub fn take_turn_report(&mut self, _settled: Settled) -> TurnReport {
        std::mem::take(&mut self.report)
    }

    /// Record `id` as pocketed without simulating it. Used by debug table
    /// clearing and tests. Returns `false` if the ball is already off the
    /// table, whether this shot or an earlier one.
    pub fn force_pocket_ball(&mut self, id: BallId) -> bool {
        let Some(ball) = self.scene.get_mut(id).filter(|b| b.active) else {
            return false;
        };
        let info = ball.object_info(id);
        ball.capture();

        match info {
            Some(info) => {
                let recorded = self.report.record_pocket(info);
                if recorded {
                    log::info!("Ball {} force-pocketed", info.number);
                    self.events.push(PhysicsEvent::BallPocketed { ball: info, pocket: None });
                }
                recorded
            }
            None => {
                let recorded = !self.report.cue_ball_pocketed;
                if recorded {
                    self.report.cue_ball_pocketed = true;
                    self.events.push(PhysicsEvent::CueBallPocketed { pocket: None });
                }
                recorded
            }
        }
    }

    /// Take the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PhysicsEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Rest detection --

    /// Whether every simulated ball has come to rest.
    pub fn all_stopped(&self) -> bool {
        let stop = self.config.stop_speed;
        self.scene
            .active()
            .filter(|(_, b)| !(self.cue_held && b.is_cue()))
            .all(|(_, b)| b.velocity == Vector2D::ZERO || b.speed() < stop)
    }

    /// A `Settled` token if all balls are at rest.
    pub fn settled(&self) -> Option<Settled> {
        self.all_stopped().then_some(Settled { _private: () })
    }

    // -- Table management --

    /// Put the pocketed cue ball back at `position`, or the nearest free
    /// spot to it. Returns the position used, or `None` if the cue ball
    /// is not waiting to respawn.
    pub fn respawn_cue_ball(&mut self, position: Vector2D) -> Option<Vector2D> {
        let id = self.scene.cue_id()?;
        if self.scene.get(id)?.active {
            return None;
        }
        let spot = self.free_spot_near(position, id);
        self.scene.get_mut(id)?.restore(spot);
        log::info!("Cue ball respawned at ({:.1}, {:.1})", spot.x, spot.y);
        Some(spot)
    }

    /// Whether the cue ball could be placed at `position`: inside the field
    /// and not overlapping any other active ball.
    pub fn can_place_cue_ball(&self, position: Vector2D) -> Result<(), PlacementError> {
        let radius = self.table.ball_radius();
        if !position.is_finite() || !self.table.contains(position, radius) {
            return Err(PlacementError::OutOfBounds);
        }
        match self
            .scene
            .active()
            .find(|(_, b)| !b.is_cue() && b.overlaps(position, radius))
        {
            Some((_, b)) => Err(PlacementError::Overlaps { number: b.number() }),
            None => Ok(()),
        }
    }

    /// Move the cue ball to `position` at rest, without validation.
    pub fn place_cue_ball(&mut self, position: Vector2D) -> bool {
        let Some(id) = self.scene.cue_id() else {
            return false;
        };
        match self.scene.get_mut(id) {
            Some(cue) => {
                cue.restore(position);
                true
            }
            None => false,
        }
    }

    /// Put every numbered ball in `layout` back on the table at rest,
    /// spawning any that do not exist yet.
    pub fn rerack(&mut self, layout: &[(u8, Vector2D)]) {
        let radius = self.table.ball_radius();
        for &(number, position) in layout {
            match self.scene.find_by_number(number) {
                Some(id) => {
                    if let Some(ball) = self.scene.get_mut(id) {
                        ball.restore(position);
                    }
                }
                None => {
                    if let Some(ball) = Ball::object(number, position, radius) {
                        self.scene.spawn(ball);
                    }
                }
            }
        }
        log::info!("Racked {} balls", layout.len());
    }

    /// First spot from `preferred` outward along the long axis that fits
    /// the ball `skip` without overlapping another active ball.
    fn free_spot_near(&self, preferred: Vector2D, skip: BallId) -> Vector2D {
        let radius = self.table.ball_radius();
        let step = radius * 2.1;
        let fits = |p: Vector2D| {
            self.table.contains(p, radius)
                && !self
                    .scene
                    .active()
                    .any(|(id, b)| id != skip && b.overlaps(p, radius))
        };
        if fits(preferred) {
            return preferred;
        }
        let max_steps = (self.table.width() / step) as usize + 1;
        for k in 1..=max_steps {
            for dir in [-1.0, 1.0] {
                let candidate = preferred + Vector2D::new(dir * step * k as f64, 0.0);
                if fits(candidate) {
                    return candidate;
                }
            }
        }
        preferred
    }

    // -- Simulation --

    /// Advance the simulation by `dt` seconds in `substeps` equal steps.
    pub fn update(&mut self, dt: f64) {
        if !(dt > 0.0) || !dt.is_finite() {
            return;
        }
        let substeps = self.config.substeps.max(1);
        let sub_dt = dt / substeps as f64;
        for _ in 0..substeps {
            self.step(sub_dt);
        }
    }

    /// One sub-step of the simulation.
    pub fn step(&mut self, dt: f64) {
        self.integrate(dt);
        self.capture_pocketed();
        self.resolve_ball_collisions();
        self.resolve_cushions();
    }

    fn simulated(&self, ball: &Ball) -> bool {
        ball.active && !(self.cue_held && ball.is_cue())
    }

    fn integrate(&mut self, dt: f64) {
        let decay = self.config.friction.powf(dt * 60.0);
        let stop = self.config.stop_speed;
        let held = self.cue_held;
        for ball in self.scene.iter_mut() {
            if !ball.active || (held && ball.is_cue()) {
                continue;
            }
            ball.position += ball.velocity * dt;
            ball.velocity *= decay;
            if ball.speed() < stop {
                ball.velocity = Vector2D::ZERO;
            }
        }
    }

    fn capture_pocketed(&mut self) {
        for i in 0..self.scene.len() {
            let id = BallId(i);
            let Some(ball) = self.scene.get(id) else {
                continue;
            };
            if !self.simulated(ball) {
                continue;
            }
            let Some(pocket) = self.table.capturing_pocket(ball.position) else {
                continue;
            };
            let info = ball.object_info(id);
            if let Some(ball) = self.scene.get_mut(id) {
                ball.capture();
            }

            match info {
                Some(info) => {
                    if self.report.record_pocket(info) {
                        log::info!("Ball {} pocketed into pocket {}", info.number, pocket);
                        self.events.push(PhysicsEvent::BallPocketed {
                            ball: info,
                            pocket: Some(pocket),
                        });
                    }
                }
                None => {
                    log::info!("Cue ball pocketed into pocket {}", pocket);
                    self.report.cue_ball_pocketed = true;
                    self.events.push(PhysicsEvent::CueBallPocketed { pocket: Some(pocket) });
                }
            }
        }
    }

    fn resolve_ball_collisions(&mut self) {
        let restitution = self.config.ball_restitution;
        let held = self.cue_held;
        let count = self.scene.len();

        for i in 0..count {
            for j in (i + 1)..count {
                let (a_id, b_id) = (BallId(i), BallId(j));
                let Some((a, b)) = self.scene.pair_mut(a_id, b_id) else {
                    continue;
                };
                if !a.active || !b.active {
                    continue;
                }
                if held && (a.is_cue() || b.is_cue()) {
                    continue;
                }

                let delta = b.position - a.position;
                let dist = delta.length();
                let min_dist = a.radius + b.radius;
                if dist >= min_dist || dist <= 0.0 {
                    continue;
                }

                // Separate balls
                let normal = delta / dist;
                let overlap = min_dist - dist;
                let separation = normal * (overlap * 0.5);
                a.position -= separation;
                b.position += separation;

                // Exchange velocity along collision normal
                let v_along_normal = (b.velocity - a.velocity).dot(normal);
                let mut closing_speed = None;
                if v_along_normal < 0.0 {
                    let j = -(1.0 + restitution) * v_along_normal / (1.0 / a.mass + 1.0 / b.mass);
                    a.velocity -= normal * (j / a.mass);
                    b.velocity += normal * (j / b.mass);
                    closing_speed = Some(-v_along_normal);
                }

                let first_contact = match (a.is_cue(), b.is_cue()) {
                    (true, false) => b.object_info(b_id),
                    (false, true) => a.object_info(a_id),
                    _ => None,
                };

                if let Some(info) = first_contact {
                    if self.report.record_first_hit(info) {
                        log::debug!("First contact: ball {}", info.number);
                    }
                }
                if let Some(speed) = closing_speed {
                    self.events.push(PhysicsEvent::BallContact { a: a_id, b: b_id, speed });
                }
            }
        }
    }

    fn resolve_cushions(&mut self) {
        let restitution = self.config.wall_restitution;
        let width = self.table.width();
        let height = self.table.height();

        for i in 0..self.scene.len() {
            let id = BallId(i);
            let Some(ball) = self.scene.get(id) else {
                continue;
            };
            if !self.simulated(ball) {
                continue;
            }
            let (open_x, open_y) = self
                .table
                .entrance_at(ball.position)
                .map(|p| (p.kind.opens_x(), p.kind.opens_y()))
                .unwrap_or((false, false));

            let Some(ball) = self.scene.get_mut(id) else {
                continue;
            };
            let r = ball.radius;
            let mut impact: f64 = 0.0;

            if !open_x {
                if ball.position.x < r {
                    ball.position.x = r;
                    impact = impact.max(-ball.velocity.x);
                    ball.velocity.x = ball.velocity.x.abs() * restitution;
                } else if ball.position.x > width - r {
                    ball.position.x = width - r;
                    impact = impact.max(ball.velocity.x);
                    ball.velocity.x = -ball.velocity.x.abs() * restitution;
                }
            }
            if !open_y {
                if ball.position.y < r {
                    ball.position.y = r;
                    impact = impact.max(-ball.velocity.y);
                    ball.velocity.y = ball.velocity.y.abs() * restitution;
                } else if ball.position.y > height - r {
                    ball.position.y = height - r;
                    impact = impact.max(ball.velocity.y);
                    ball.velocity.y = -ball.velocity.y.abs() * restitution;
                }
            }

            if impact > 0.0 {
                self.events.push(PhysicsEvent::CushionHit { ball: id, speed: impact });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TableConfig;
    use crate::components::ball::Category;

    const DT: f64 = 1.0 / 60.0;

    fn engine() -> PhysicsEngine {
        PhysicsEngine::new(Table::new(&TableConfig::default()), PhysicsConfig::default())
    }

    fn total_momentum(engine: &PhysicsEngine) -> Vector2D {
        engine
            .scene()
            .active()
            .map(|(_, b)| b.momentum())
            .fold(Vector2D::ZERO, |acc, m| acc + m)
    }

    #[test]
    fn friction_slows_ball_monotonically_until_rest() {
        let mut e = engine();
        let id = e.spawn(
            Ball::cue(Vector2D::new(400.0, 200.0), 10.0)
                .with_velocity(Vector2D::new(30.0, 0.0)),
        );

        let mut prev = e.ball(id).unwrap().speed();
        let mut frames = 0;
        while prev > 0.0 {
            e.update(DT);
            let speed = e.ball(id).unwrap().speed();
            assert!(speed < prev, "speed went from {} to {}", prev, speed);
            prev = speed;
            frames += 1;
            assert!(frames < 10_000, "ball never stopped");
        }
        assert_eq!(e.ball(id).unwrap().velocity, Vector2D::ZERO);
        assert!(e.all_stopped());
    }

    #[test]
    fn friction_is_frame_rate_independent() {
        let mut coarse = engine();
        let mut fine = engine();
        let v = Vector2D::new(100.0, 0.0);
        let a = coarse.spawn(Ball::cue(Vector2D::new(200.0, 200.0), 10.0).with_velocity(v));
        let b = fine.spawn(Ball::cue(Vector2D::new(200.0, 200.0), 10.0).with_velocity(v));

        coarse.update(1.0 / 30.0);
        fine.update(1.0 / 60.0);
        fine.update(1.0 / 60.0);

        let va = coarse.ball(a).unwrap().speed();
        let vb = fine.ball(b).unwrap().speed();
        assert!((va - vb).abs() < 1e-9, "{} vs {}", va, vb);
    }

    #[test]
    fn cushion_reflects_with_restitution() {
        let mut e = engine();
        let id = e.spawn(
            Ball::cue(Vector2D::new(200.0, 12.0), 10.0)
                .with_velocity(Vector2D::new(0.0, -600.0)),
        );
        for _ in 0..10 {
            e.update(DT);
        }
        let ball = e.ball(id).unwrap();
        assert!(ball.velocity.y > 0.0, "ball should bounce off the top rail");
        assert!(ball.velocity.y < 600.0 * 0.9);
        assert!(ball.position.y >= 10.0);
    }

    #[test]
    fn balls_stay_inside_the_field() {
        let mut e = engine();
        let velocities = [
            Vector2D::new(900.0, 310.0),
            Vector2D::new(-700.0, 530.0),
            Vector2D::new(120.0, -880.0),
            Vector2D::new(-450.0, -460.0),
        ];
        for (i, v) in velocities.iter().enumerate() {
            let pos = Vector2D::new(150.0 + 150.0 * i as f64, 180.0 + 10.0 * i as f64);
            e.spawn(Ball::object(i as u8 + 1, pos, 10.0).unwrap().with_velocity(*v));
        }

        for _ in 0..600 {
            e.update(DT);
            for (_, ball) in e.scene().active() {
                if e.table().entrance_at(ball.position).is_some() {
                    continue;
                }
                let r = ball.radius;
                let p = ball.position;
                assert!(p.x >= r && p.x <= e.table().width() - r, "x escaped: {:?}", p);
                assert!(p.y >= r && p.y <= e.table().height() - r, "y escaped: {:?}", p);
            }
        }
    }

    #[test]
    fn head_on_collision_transfers_momentum() {
        let mut e = engine();
        let cue = e.spawn(
            Ball::cue(Vector2D::new(300.0, 200.0), 10.0)
                .with_velocity(Vector2D::new(500.0, 0.0)),
        );
        let target = e.spawn(Ball::object(3, Vector2D::new(321.0, 200.0), 10.0).unwrap());

        e.step(DT / 4.0);

        let c = e.ball(cue).unwrap();
        let t = e.ball(target).unwrap();
        assert!(t.velocity.x > c.velocity.x);
        assert!(t.velocity.x > 0.0);
        assert_eq!(e.first_hit_ball().map(|b| b.number), Some(3));
    }

    #[test]
    fn collision_never_increases_momentum() {
        let mut e = engine();
        e.spawn(
            Ball::cue(Vector2D::new(300.0, 200.0), 10.0)
                .with_velocity(Vector2D::new(420.0, 35.0)),
        );
        e.spawn(
            Ball::object(5, Vector2D::new(318.0, 206.0), 10.0)
                .unwrap()
                .with_velocity(Vector2D::new(-60.0, 10.0)),
        );

        let before = total_momentum(&e).length();
        e.resolve_ball_collisions();
        let after = total_momentum(&e).length();
        assert!(after <= before + 1e-9, "momentum grew: {} -> {}", before, after);
    }

    #[test]
    fn coincident_centres_do_not_produce_nan() {
        let mut e = engine();
        let a = e.spawn(Ball::cue(Vector2D::new(300.0, 200.0), 10.0));
        let b = e.spawn(Ball::object(1, Vector2D::new(300.0, 200.0), 10.0).unwrap());
        e.update(DT);
        assert!(e.ball(a).unwrap().position.is_finite());
        assert!(e.ball(b).unwrap().velocity.is_finite());
    }

    #[test]
    fn ball_rolling_into_side_pocket_is_captured_once() {
        let mut e = engine();
        let id = e.spawn(
            Ball::object(11, Vector2D::new(400.0, 60.0), 10.0)
                .unwrap()
                .with_velocity(Vector2D::new(0.0, -500.0)),
        );

        for _ in 0..120 {
            e.update(DT);
        }

        let ball = e.ball(id).unwrap();
        assert!(!ball.active);
        let pocketed = e.pocketed_balls();
        assert_eq!(pocketed.len(), 1);
        assert_eq!(pocketed[0].number, 11);
        assert_eq!(pocketed[0].category, Category::Stripe);

        // More updates never reactivate or re-append
        for _ in 0..60 {
            e.update(DT);
        }
        assert!(!e.ball(id).unwrap().active);
        assert_eq!(e.pocketed_balls().len(), 1);
    }

    #[test]
    fn ball_rolling_along_the_rail_passes_the_side_pocket() {
        let mut e = engine();
        let id = e.spawn(
            Ball::object(2, Vector2D::new(300.0, 10.0), 10.0)
                .unwrap()
                .with_velocity(Vector2D::new(200.0, 0.0)),
        );
        for _ in 0..60 {
            e.update(DT);
        }
        let ball = e.ball(id).unwrap();
        assert!(ball.active);
        assert!(ball.position.x > 400.0);
    }

    #[test]
    fn cue_ball_in_corner_sets_respawn() {
        let mut e = engine();
        let id = e.spawn(
            Ball::cue(Vector2D::new(60.0, 60.0), 10.0)
                .with_velocity(Vector2D::new(-400.0, -400.0)),
        );
        for _ in 0..60 {
            e.update(DT);
        }
        let cue = e.ball(id).unwrap();
        assert!(!cue.active);
        assert!(cue.pending_respawn());
        assert!(e.is_cue_ball_pocketed());
        assert!(e.pocketed_balls().is_empty());

        let events = e.drain_events();
        assert!(events
            .iter()
            .any(|ev| matches!(ev, PhysicsEvent::CueBallPocketed { pocket: Some(0) })));
    }

    #[test]
    fn first_hit_is_never_overwritten() {
        let mut e = engine();
        e.spawn(
            Ball::cue(Vector2D::new(300.0, 200.0), 10.0)
                .with_velocity(Vector2D::new(600.0, 0.0)),
        );
        e.spawn(Ball::object(9, Vector2D::new(340.0, 200.0), 10.0).unwrap());
        e.spawn(Ball::object(4, Vector2D::new(380.0, 200.0), 10.0).unwrap());

        for _ in 0..60 {
            e.update(DT);
        }
        assert_eq!(e.first_hit_ball().map(|b| b.number), Some(9));
    }

    #[test]
    fn force_pocket_is_idempotent() {
        let mut e = engine();
        let id = e.spawn(Ball::object(6, Vector2D::new(300.0, 200.0), 10.0).unwrap());
        assert!(e.force_pocket_ball(id));
        assert!(!e.force_pocket_ball(id));
        assert_eq!(e.pocketed_balls().len(), 1);
        assert!(!e.ball(id).unwrap().active);
    }

    #[test]
    fn force_pocket_after_report_reset_records_nothing() {
        let mut e = engine();
        let id = e.spawn(Ball::object(3, Vector2D::new(300.0, 200.0), 10.0).unwrap());
        assert!(e.force_pocket_ball(id));
        e.drain_events();
        e.reset_turn_report();

        assert!(!e.force_pocket_ball(id));
        assert!(e.pocketed_balls().is_empty());
        assert!(e.turn_report().is_empty());
        assert!(e.drain_events().is_empty());
    }

    #[test]
    fn take_turn_report_resets() {
        let mut e = engine();
        e.spawn(Ball::cue(Vector2D::new(100.0, 100.0), 10.0));
        let id = e.spawn(Ball::object(1, Vector2D::new(300.0, 200.0), 10.0).unwrap());
        e.force_pocket_ball(id);

        let token = e.settled().unwrap();
        let report = e.take_turn_report(token);
        assert_eq!(report.pocketed.len(), 1);
        assert!(e.turn_report().is_empty());

        e.reset_turn_report();
        e.reset_turn_report();
        assert!(e.turn_report().is_empty());
    }

    #[test]
    fn settled_is_withheld_while_rolling() {
        let mut e = engine();
        e.spawn(
            Ball::cue(Vector2D::new(100.0, 100.0), 10.0)
                .with_velocity(Vector2D::new(50.0, 0.0)),
        );
        assert!(e.settled().is_none());
    }

    #[test]
    fn held_cue_ball_is_frozen() {
        let mut e = engine();
        let cue = e.spawn(
            Ball::cue(Vector2D::new(300.0, 200.0), 10.0)
                .with_velocity(Vector2D::new(100.0, 0.0)),
        );
        e.set_cue_ball_held(true);
        e.update(DT);
        assert_eq!(e.ball(cue).unwrap().position, Vector2D::new(300.0, 200.0));
        assert!(e.all_stopped());
    }

    #[test]
    fn respawn_avoids_occupied_spot() {
        let mut e = engine();
        let cue = e.spawn(Ball::cue(Vector2D::new(100.0, 100.0), 10.0));
        e.spawn(Ball::object(1, Vector2D::new(200.0, 200.0), 10.0).unwrap());
        e.ball_mut(cue).unwrap().capture();

        let spot = e.respawn_cue_ball(Vector2D::new(200.0, 200.0)).unwrap();
        assert_ne!(spot, Vector2D::new(200.0, 200.0));
        assert!(e.can_place_cue_ball(spot).is_ok());
        assert!(e.ball(cue).unwrap().active);
        assert!(e.respawn_cue_ball(Vector2D::new(300.0, 200.0)).is_none());
    }

    #[test]
    fn placement_check_reports_blocking_ball() {
        let mut e = engine();
        e.spawn(Ball::cue(Vector2D::new(100.0, 100.0), 10.0));
        e.spawn(Ball::object(7, Vector2D::new(200.0, 200.0), 10.0).unwrap());
        assert_eq!(
            e.can_place_cue_ball(Vector2D::new(205.0, 200.0)),
            Err(PlacementError::Overlaps { number: 7 })
        );
        assert_eq!(
            e.can_place_cue_ball(Vector2D::new(5.0, 200.0)),
            Err(PlacementError::OutOfBounds)
        );
        assert_eq!(e.can_place_cue_ball(Vector2D::new(400.0, 300.0)), Ok(()));
    }

    #[test]
    fn rerack_restores_pocketed_balls() {
        let mut e = engine();
        let id = e.spawn(Ball::object(1, Vector2D::new(300.0, 200.0), 10.0).unwrap());
        e.force_pocket_ball(id);
        e.rerack(&[(1, Vector2D::new(500.0, 200.0)), (2, Vector2D::new(520.0, 190.0))]);
        assert!(e.ball(id).unwrap().active);
        assert_eq!(e.ball(id).unwrap().position, Vector2D::new(500.0, 200.0));
        assert_eq!(e.remaining_object_balls().len(), 2);
    }
}
