//! Arcade scoring: a reward layer over the physics events, no turns and no
//! fouls. Pocketing buys points and time, scratching costs points, clearing
//! the table pays a rack bonus and asks for a fresh rack.

use crate::api::config::ArcadeConfig;
use crate::components::ball::ObjectInfo;
use crate::core::physics::PhysicsEvent;

#[derive(Debug, Clone)]
pub struct ArcadeRules {
    config: ArcadeConfig,
    score: u32,
    time_left: f64,
    racks_cleared: u32,
    cue_respawn_pending: bool,
}

impl ArcadeRules {
    pub fn new(config: ArcadeConfig) -> Self {
        let time_left = config.start_time;
        Self {
            config,
            score: 0,
            time_left,
            racks_cleared: 0,
            cue_respawn_pending: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.config.clone());
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    pub fn racks_cleared(&self) -> u32 {
        self.racks_cleared
    }

    pub fn is_game_over(&self) -> bool {
        self.time_left <= 0.0
    }

    /// Apply the reward for one physics event.
    pub fn on_event(&mut self, event: &PhysicsEvent) {
        if self.is_game_over() {
            return;
        }
        match event {
            PhysicsEvent::BallPocketed { ball, .. } => {
                self.score += self.config.ball_bonus;
                self.time_left += self.config.time_bonus;
                log::debug!("Arcade: ball {} +{}", ball.number, self.config.ball_bonus);
            }
            PhysicsEvent::CueBallPocketed { .. } => {
                self.score = self.score.saturating_sub(self.config.cue_penalty);
                self.cue_respawn_pending = true;
                log::debug!("Arcade: scratch -{}", self.config.cue_penalty);
            }
            PhysicsEvent::BallContact { .. } | PhysicsEvent::CushionHit { .. } => {}
        }
    }

    /// Count down the clock. Returns `true` on the tick the time runs out.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.time_left = (self.time_left - dt).max(0.0);
        if self.is_game_over() {
            log::info!("Arcade time up, final score {}", self.score);
            return true;
        }
        false
    }

    /// Once the table is empty, pay the rack bonus. Returns `true` when a
    /// fresh rack should be set up.
    pub fn check_rack(&mut self, remaining: &[ObjectInfo]) -> bool {
        if !remaining.is_empty() || self.is_game_over() {
            return false;
        }
        self.score += self.config.rack_bonus;
        self.racks_cleared += 1;
        log::info!("Arcade rack {} cleared, score {}", self.racks_cleared, self.score);
        true
    }

    /// Take the pending cue-ball respawn request, if any.
    pub fn take_cue_respawn(&mut self) -> bool {
        std::mem::take(&mut self.cue_respawn_pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ball::Category;
    use crate::core::scene::BallId;

    fn pocketed(number: u8) -> PhysicsEvent {
        PhysicsEvent::BallPocketed {
            ball: ObjectInfo {
                id: BallId(number as usize),
                number,
                category: Category::from_number(number).unwrap(),
            },
            pocket: Some(0),
        }
    }

    #[test]
    fn pocketing_adds_score_and_time() {
        let mut arcade = ArcadeRules::new(ArcadeConfig::default());
        arcade.on_event(&pocketed(4));
        arcade.on_event(&pocketed(12));
        assert_eq!(arcade.score(), 200);
        assert_eq!(arcade.time_left(), 130.0);
    }

    #[test]
    fn scratch_costs_points_and_requests_respawn() {
        let mut arcade = ArcadeRules::new(ArcadeConfig::default());
        arcade.on_event(&pocketed(1));
        arcade.on_event(&PhysicsEvent::CueBallPocketed { pocket: Some(2) });
        assert_eq!(arcade.score(), 50);
        assert!(arcade.take_cue_respawn());
        assert!(!arcade.take_cue_respawn());
    }

    #[test]
    fn score_never_goes_negative() {
        let mut arcade = ArcadeRules::new(ArcadeConfig::default());
        arcade.on_event(&PhysicsEvent::CueBallPocketed { pocket: None });
        assert_eq!(arcade.score(), 0);
    }

    #[test]
    fn empty_table_pays_rack_bonus() {
        let mut arcade = ArcadeRules::new(ArcadeConfig::default());
        assert!(arcade.check_rack(&[]));
        assert_eq!(arcade.score(), 1000);
        assert_eq!(arcade.racks_cleared(), 1);

        let left = [ObjectInfo { id: BallId(1), number: 1, category: Category::Solid }];
        assert!(!arcade.check_rack(&left));
    }

    #[test]
    fn clock_runs_out_once() {
        let mut arcade = ArcadeRules::new(ArcadeConfig {
            start_time: 1.0,
            ..ArcadeConfig::default()
        });
        assert!(!arcade.tick(0.5));
        assert!(arcade.tick(0.6));
        assert!(arcade.is_game_over());
        assert!(!arcade.tick(0.1));
        assert_eq!(arcade.time_left(), 0.0);

        arcade.on_event(&pocketed(3));
        assert_eq!(arcade.score(), 0);
    }
}
