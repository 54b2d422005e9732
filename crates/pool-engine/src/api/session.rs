use crate::api::config::GameConfig;
use crate::api::types::{GameMode, Phase, SessionEvent};
use crate::components::ball::Ball;
use crate::components::rack::{shuffled_rack, standard_rack};
use crate::core::physics::{PhysicsEngine, Settled};
use crate::core::table::Table;
use crate::core::time::FixedTimestep;
use crate::core::vector::{try_normalize, Vector2D};
use crate::error::{ConfigError, PlacementError, ShotError};
use crate::systems::arcade::ArcadeRules;
use crate::systems::predictor::{Prediction, ShotPredictor};
use crate::systems::rng::Rng;
use crate::systems::rules::GameRules;

#[cfg(feature = "bridge")]
use crate::bridge::snapshot::BallSnapshot;

/// One game at the table: physics, rules and the shot cycle that ties them.
///
/// A shot goes aim → `shoot` → `update` every frame until the balls settle →
/// the turn report is drained and judged exactly once → next shot. Ball in
/// hand is resolved through `place_cue_ball` before the next `shoot`.
pub struct Session {
    config: GameConfig,
    mode: GameMode,
    engine: PhysicsEngine,
    rules: GameRules,
    arcade: ArcadeRules,
    predictor: ShotPredictor,
    timestep: FixedTimestep,
    rng: Rng,
    phase: Phase,
    shots_taken: u32,
}

impl Session {
    pub fn new(config: GameConfig, mode: GameMode) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Rng::new(config.seed);
        let engine = Self::build_table(&config, mode, &mut rng);
        log::info!("New {:?} session", mode);
        Ok(Self {
            mode,
            rules: GameRules::new(),
            arcade: ArcadeRules::new(config.arcade.clone()),
            predictor: ShotPredictor::new(config.max_ray_length),
            timestep: FixedTimestep::new(config.fixed_dt),
            engine,
            rng,
            phase: Phase::Aiming,
            shots_taken: 0,
            config,
        })
    }

    fn build_table(config: &GameConfig, mode: GameMode, rng: &mut Rng) -> PhysicsEngine {
        let table = Table::new(&config.table);
        let radius = table.ball_radius();
        let head = table.head_spot();
        let foot = table.foot_spot();
        let mut engine = PhysicsEngine::new(table, config.physics.clone());
        engine.spawn(Ball::cue(head, radius));
        let layout = match mode {
            GameMode::EightBall => standard_rack(foot, radius),
            GameMode::Arcade => shuffled_rack(foot, radius, rng),
        };
        engine.rerack(&layout);
        engine
    }

    /// Start over with the same configuration and mode.
    pub fn reset(&mut self) {
        self.rng = Rng::new(self.config.seed);
        self.engine = Self::build_table(&self.config, self.mode, &mut self.rng);
        self.rules.reset_game();
        self.arcade.reset();
        self.timestep.reset();
        self.phase = Phase::Aiming;
        self.shots_taken = 0;
        log::info!("Session reset");
    }

    // -- Accessors --

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn arcade(&self) -> &ArcadeRules {
        &self.arcade
    }

    pub fn shots_taken(&self) -> u32 {
        self.shots_taken
    }

    /// Render interpolation factor between physics ticks.
    pub fn alpha(&self) -> f64 {
        self.timestep.alpha()
    }

    pub fn status_message(&self) -> String {
        match self.mode {
            GameMode::EightBall => self.rules.status_message().to_string(),
            GameMode::Arcade if self.arcade.is_game_over() => {
                format!("Time up! Final score {}", self.arcade.score())
            }
            GameMode::Arcade => format!(
                "Score {}  Time {:.0}",
                self.arcade.score(),
                self.arcade.time_left()
            ),
        }
    }

    fn is_game_over(&self) -> bool {
        match self.mode {
            GameMode::EightBall => self.rules.is_game_over(),
            GameMode::Arcade => self.arcade.is_game_over(),
        }
    }

    // -- Shot cycle --

    /// Strike the cue ball along `direction` at `power` units per second,
    /// clamped to the configured maximum shot speed.
    pub fn shoot(&mut self, direction: Vector2D, power: f64) -> Result<(), ShotError> {
        if self.is_game_over() {
            return Err(ShotError::GameOver);
        }
        if self.phase != Phase::Aiming {
            return Err(ShotError::NotAiming);
        }
        let direction = try_normalize(direction).ok_or(ShotError::InvalidDirection)?;
        if !power.is_finite() || power <= 0.0 {
            return Err(ShotError::InvalidPower);
        }
        let speed = power.min(self.config.max_shot_speed);

        let cue = self
            .engine
            .cue_ball_id()
            .and_then(|id| self.engine.ball_mut(id))
            .filter(|b| b.active)
            .ok_or(ShotError::NotAiming)?;
        cue.hit(direction * speed);

        self.shots_taken += 1;
        self.phase = Phase::Rolling;
        log::debug!("Shot {} at speed {:.1}", self.shots_taken, speed);
        Ok(())
    }

    /// Advance by one frame of `frame_dt` seconds. Physics runs in fixed
    /// ticks; a shot whose balls have all stopped is judged here, once.
    pub fn update(&mut self, frame_dt: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let steps = self.timestep.accumulate(frame_dt);
        let dt = self.timestep.dt();

        for _ in 0..steps {
            self.engine.update(dt);
            for event in self.engine.drain_events() {
                if self.mode == GameMode::Arcade {
                    self.arcade.on_event(&event);
                }
                events.push(SessionEvent::Physics(event));
            }
            if self.mode == GameMode::Arcade && self.arcade.tick(dt) {
                events.push(SessionEvent::TimeUp {
                    score: self.arcade.score(),
                });
                self.phase = Phase::GameOver;
            }
        }

        // Debug pockets between frames
        for event in self.engine.drain_events() {
            if self.mode == GameMode::Arcade {
                self.arcade.on_event(&event);
            }
            events.push(SessionEvent::Physics(event));
        }

        match self.phase {
            Phase::Rolling => {
                if let Some(settled) = self.engine.settled() {
                    self.finish_shot(settled, &mut events);
                }
            }
            Phase::Aiming if self.mode == GameMode::Arcade => {
                if self.engine.settled().is_some() {
                    self.check_arcade_rack(&mut events);
                }
            }
            _ => {}
        }
        events
    }

    fn finish_shot(&mut self, settled: Settled, events: &mut Vec<SessionEvent>) {
        let report = self.engine.take_turn_report(settled);
        log::debug!("Shot {} settled", self.shots_taken);

        match self.mode {
            GameMode::EightBall => {
                let remaining = self.engine.remaining_object_balls();
                let verdict = self.rules.process_report(&report, &remaining);
                events.push(SessionEvent::ShotJudged(verdict));

                if self.rules.is_game_over() {
                    self.phase = Phase::GameOver;
                    return;
                }
                if report.cue_ball_pocketed {
                    self.respawn_cue_ball(events);
                }
                if self.rules.is_ball_in_hand() {
                    self.engine.set_cue_ball_held(true);
                    self.phase = Phase::BallInHand;
                } else {
                    self.phase = Phase::Aiming;
                }
            }
            GameMode::Arcade => {
                if self.arcade.take_cue_respawn() || report.cue_ball_pocketed {
                    self.respawn_cue_ball(events);
                }
                if self.arcade.is_game_over() {
                    self.phase = Phase::GameOver;
                    return;
                }
                self.phase = Phase::Aiming;
                self.check_arcade_rack(events);
            }
        }
    }

    fn respawn_cue_ball(&mut self, events: &mut Vec<SessionEvent>) {
        let head = self.engine.table().head_spot();
        if let Some(position) = self.engine.respawn_cue_ball(head) {
            events.push(SessionEvent::CueBallRespawned(position));
        }
    }

    fn check_arcade_rack(&mut self, events: &mut Vec<SessionEvent>) {
        let remaining = self.engine.remaining_object_balls();
        if !self.arcade.check_rack(&remaining) {
            return;
        }
        let table = self.engine.table();
        let layout = shuffled_rack(table.foot_spot(), table.ball_radius(), &mut self.rng);
        let head = table.head_spot();
        self.engine.rerack(&layout);
        self.engine.reset_turn_report();
        self.engine.drain_events();

        // A cue ball resting where the rack now stands goes back to the head spot
        let cue_position = self
            .engine
            .cue_ball_id()
            .and_then(|id| self.engine.ball(id))
            .filter(|b| b.active)
            .map(|b| b.position);
        match cue_position {
            Some(position) if self.engine.can_place_cue_ball(position).is_err() => {
                self.engine.place_cue_ball(head);
            }
            None => self.respawn_cue_ball(events),
            _ => {}
        }

        events.push(SessionEvent::Reracked {
            racks_cleared: self.arcade.racks_cleared(),
        });
    }

    // -- Ball in hand --

    /// Place the cue ball while it is in hand. The spot must be inside the
    /// field and clear of every other ball.
    pub fn place_cue_ball(&mut self, position: Vector2D) -> Result<(), PlacementError> {
        if self.phase != Phase::BallInHand {
            return Err(PlacementError::NotInHand);
        }
        self.engine.can_place_cue_ball(position).map_err(|err| {
            log::warn!("Cue ball placement refused: {}", err);
            err
        })?;
        self.engine.place_cue_ball(position);
        self.engine.set_cue_ball_held(false);
        self.rules.clear_ball_in_hand();
        self.phase = Phase::Aiming;
        log::info!("Cue ball placed at ({:.1}, {:.1})", position.x, position.y);
        Ok(())
    }

    // -- Aim assist and debugging --

    /// Predicted first contact along `direction`. In 8-ball the prediction
    /// carries whether the struck ball is a legal first hit.
    pub fn predict(&self, direction: Vector2D) -> Option<Prediction> {
        let cue = self.engine.cue_ball_id()?;
        let scene = self.engine.scene();
        let table = self.engine.table();
        match self.mode {
            GameMode::EightBall => {
                let remaining = self.engine.remaining_object_balls();
                self.predictor
                    .predict_with_rules(scene, table, cue, direction, &self.rules, &remaining)
            }
            GameMode::Arcade => self.predictor.predict(scene, table, cue, direction),
        }
    }

    /// Pocket object ball `number` without simulating it. It counts toward
    /// the current (or next) shot. Returns `false` if there is no such ball
    /// on the table.
    pub fn debug_pocket(&mut self, number: u8) -> bool {
        if number == 0 {
            return false;
        }
        let Some(id) = self.engine.scene().find_by_number(number) else {
            return false;
        };
        if !self.engine.ball(id).is_some_and(|b| b.active) {
            return false;
        }
        self.engine.force_pocket_ball(id)
    }

    #[cfg(feature = "bridge")]
    pub fn snapshot(&self) -> BallSnapshot {
        BallSnapshot::capture(self.engine.scene())
    }
}
