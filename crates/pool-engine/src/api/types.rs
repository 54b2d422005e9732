use std::fmt;

use serde::{Deserialize, Serialize};

use crate::components::ball::Category;
use crate::core::physics::PhysicsEvent;
use crate::core::vector::Vector2D;

/// One of the two players at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Player {
    #[default]
    Player1,
    Player2,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Player1 => write!(f, "Player 1"),
            Player::Player2 => write!(f, "Player 2"),
        }
    }
}

/// Category assignment. `Open` until the first legal object ball drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TableState {
    #[default]
    Open,
    /// Player 1 shoots solids, player 2 stripes.
    P1Solid,
    /// Player 1 shoots stripes, player 2 solids.
    P1Stripes,
}

impl TableState {
    /// Assignment that gives `player` the `category` group.
    /// The eight ball assigns nothing.
    pub fn assigning(player: Player, category: Category) -> Option<Self> {
        let p1_category = match player {
            Player::Player1 => category,
            Player::Player2 => category.opposite()?,
        };
        match p1_category {
            Category::Solid => Some(TableState::P1Solid),
            Category::Stripe => Some(TableState::P1Stripes),
            Category::EightBall => None,
        }
    }

    /// The group `player` must shoot, or `None` while the table is open.
    pub fn category_of(self, player: Player) -> Option<Category> {
        let p1 = match self {
            TableState::Open => return None,
            TableState::P1Solid => Category::Solid,
            TableState::P1Stripes => Category::Stripe,
        };
        match player {
            Player::Player1 => Some(p1),
            Player::Player2 => p1.opposite(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Ongoing,
    P1Wins,
    P2Wins,
}

impl GameStatus {
    pub fn won_by(player: Player) -> Self {
        match player {
            Player::Player1 => GameStatus::P1Wins,
            Player::Player2 => GameStatus::P2Wins,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::Ongoing => None,
            GameStatus::P1Wins => Some(Player::Player1),
            GameStatus::P2Wins => Some(Player::Player2),
        }
    }
}

/// Foul committed on a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Foul {
    /// Cue ball pocketed.
    Scratch,
    /// Cue ball struck nothing.
    NoContact,
    /// First ball struck was not a legal target.
    WrongBallFirst,
}

/// How the game was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Eight ball pocketed legally after clearing the group.
    CleanWin,
    /// Eight ball and cue ball pocketed on the same shot.
    ScratchOnEight,
    /// Eight ball pocketed before the group was cleared.
    EarlyEight,
    /// Eight ball pocketed on a shot whose first hit was illegal.
    IllegalEight,
}

/// Ruling on one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Shooter keeps the table. `assigned` is set when this shot closed the open table.
    Continue { assigned: Option<TableState> },
    /// Clean shot, but the turn passes.
    SwitchTurn,
    /// Foul: turn passes and the opponent gets ball in hand.
    Foul(Foul),
    GameOver { winner: Player, reason: GameOverReason },
}

/// Which rule set a session plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    EightBall,
    /// Single player, timed, no fouls.
    Arcade,
}

/// Where a session is in the shot cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for a shot.
    Aiming,
    /// A shot is in progress.
    Rolling,
    /// Waiting for the cue ball to be placed.
    BallInHand,
    GameOver,
}

/// Emitted by `Session::update` for the embedding game (sound, UI, scoring).
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Physics(PhysicsEvent),
    /// The shot settled and was judged (8-ball only).
    ShotJudged(Verdict),
    /// The pocketed cue ball is back on the table.
    CueBallRespawned(Vector2D),
    /// Arcade: the table was cleared and racked again.
    Reracked { racks_cleared: u32 },
    /// Arcade: the clock ran out.
    TimeUp { score: u32 },
}
