//! First-hit validity, shared by the rule engine and the shot predictor's
//! legality overlay so the two always agree.

use crate::api::types::{Player, TableState};
use crate::components::ball::{Category, ObjectInfo};

/// Whether `player` has no ball of their group left among `remaining`.
/// Nobody has cleared anything while the table is open.
pub fn has_cleared(table_state: TableState, player: Player, remaining: &[ObjectInfo]) -> bool {
    match table_state.category_of(player) {
        Some(own) => !remaining.iter().any(|b| b.category == own),
        None => false,
    }
}

/// Whether striking a ball of `struck` first is legal for `player`.
///
/// - open table: anything but the eight ball
/// - assigned table: only the player's own group
/// - the eight ball: only once the player's group is cleared
pub fn is_legal_first_hit(
    table_state: TableState,
    player: Player,
    struck: Category,
    cleared: bool,
) -> bool {
    if struck == Category::EightBall {
        return cleared;
    }
    match table_state.category_of(player) {
        Some(own) => struck == own,
        None => true,
    }
}
