pub mod api;
pub mod core;
pub mod components;
pub mod systems;
#[cfg(feature = "bridge")]
pub mod bridge;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::{ArcadeConfig, GameConfig, PhysicsConfig, TableConfig};
pub use api::session::Session;
pub use api::types::{
    Foul, GameMode, GameOverReason, GameStatus, Phase, Player, SessionEvent, TableState, Verdict,
};
pub use components::ball::{Ball, BallKind, Category, CueState, ObjectInfo, ObjectState};
pub use components::rack::{shuffled_rack, standard_rack};
pub use crate::core::physics::{PhysicsEngine, PhysicsEvent, Settled, TurnReport};
pub use crate::core::scene::{BallId, Scene};
pub use crate::core::table::{Pocket, PocketKind, Table};
pub use crate::core::time::FixedTimestep;
pub use crate::core::vector::Vector2D;
pub use error::{ConfigError, PlacementError, ShotError};
pub use systems::arcade::ArcadeRules;
pub use systems::predictor::{PredictedHit, Prediction, ShotPredictor};
pub use systems::rules::GameRules;

#[cfg(feature = "bridge")]
pub use bridge::snapshot::{BallInstance, BallSnapshot};
