use std::fmt;

/// Why a shot could not be taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotError {
    /// Balls are still rolling or the cue ball is in hand.
    NotAiming,
    GameOver,
    /// Aim direction is zero-length or not finite.
    InvalidDirection,
    /// Power is zero, negative or not finite.
    InvalidPower,
}

impl fmt::Display for ShotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAiming => write!(f, "cannot shoot: table is not ready for a shot"),
            Self::GameOver => write!(f, "cannot shoot: game is over"),
            Self::InvalidDirection => write!(f, "cannot shoot: aim direction is degenerate"),
            Self::InvalidPower => write!(f, "cannot shoot: shot power must be positive"),
        }
    }
}

impl std::error::Error for ShotError {}

/// Why a ball-in-hand placement was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The cue ball is not in hand.
    NotInHand,
    /// The cue ball would not fit inside the playing field there.
    OutOfBounds,
    /// The cue ball would overlap an active ball.
    Overlaps { number: u8 },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInHand => write!(f, "cue ball is not in hand"),
            Self::OutOfBounds => write!(f, "cue ball placement is outside the playing field"),
            Self::Overlaps { number } => {
                write!(f, "cue ball placement overlaps ball {number}")
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Configuration could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "config parse error: {err}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
