//! 8-ball turn state machine. Consumes one shot's turn report plus the balls
//! still on the table and decides fouls, turn passing, group assignment and
//! the end of the game. Holds no physics; call it once per settled shot.

use crate::api::types::{Foul, GameOverReason, GameStatus, Player, TableState, Verdict};
use crate::components::ball::{Category, ObjectInfo};
use crate::core::physics::TurnReport;
use crate::systems::legality::{has_cleared, is_legal_first_hit};

/// Turn, group and win/loss state for a game of 8-ball.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    current_turn: Player,
    table_state: TableState,
    game_status: GameStatus,
    game_over_reason: Option<GameOverReason>,
    ball_in_hand: bool,
    clean_win: bool,
    status_message: String,
}

impl GameRules {
    pub fn new() -> Self {
        Self {
            current_turn: Player::Player1,
            table_state: TableState::Open,
            game_status: GameStatus::Ongoing,
            game_over_reason: None,
            ball_in_hand: false,
            clean_win: false,
            status_message: String::from("Player 1 to break"),
        }
    }

    /// Start a fresh game: Player 1 to shoot on an open table.
    pub fn reset_game(&mut self) {
        *self = Self::new();
        log::info!("8-ball game reset");
    }

    // -- Accessors --

    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn table_state(&self) -> TableState {
        self.table_state
    }

    pub fn game_status(&self) -> GameStatus {
        self.game_status
    }

    pub fn is_ball_in_hand(&self) -> bool {
        self.ball_in_hand
    }

    pub fn is_clean_win(&self) -> bool {
        self.clean_win
    }

    pub fn is_game_over(&self) -> bool {
        self.game_status != GameStatus::Ongoing
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Group `player` must shoot, `None` while the table is open.
    pub fn category_of(&self, player: Player) -> Option<Category> {
        self.table_state.category_of(player)
    }

    /// Whether `player` has no ball of their group left on the table.
    pub fn has_cleared(&self, player: Player, remaining: &[ObjectInfo]) -> bool {
        has_cleared(self.table_state, player, remaining)
    }

    /// Whether the shooter may strike a ball of `category` first.
    pub fn is_legal_target(&self, category: Category, remaining: &[ObjectInfo]) -> bool {
        let cleared = self.has_cleared(self.current_turn, remaining);
        is_legal_first_hit(self.table_state, self.current_turn, category, cleared)
    }

    /// End manual cue-ball placement.
    pub fn clear_ball_in_hand(&mut self) {
        self.ball_in_hand = false;
    }

    // -- Turn processing --

    /// Judge a drained turn report.
    pub fn process_report(&mut self, report: &TurnReport, remaining: &[ObjectInfo]) -> Verdict {
        self.process_turn(
            &report.pocketed,
            report.cue_ball_pocketed,
            remaining,
            report.first_hit,
        )
    }

    /// Judge one shot and update turn, group and game state.
    ///
    /// `pocketed` is in capture order; `remaining` is every object ball still
    /// on the table after the shot; `first_hit` is the first object ball the
    /// cue ball touched.
    pub fn process_turn(
        &mut self,
        pocketed: &[ObjectInfo],
        cue_ball_pocketed: bool,
        remaining: &[ObjectInfo],
        first_hit: Option<ObjectInfo>,
    ) -> Verdict {
        if let (Some(winner), Some(reason)) = (self.game_status.winner(), self.game_over_reason) {
            log::warn!("Shot judged after the game ended; ignoring");
            return Verdict::GameOver { winner, reason };
        }

        let shooter = self.current_turn;
        let cleared = self.has_cleared(shooter, remaining);
        let legal_first_hit = first_hit
            .map(|b| is_legal_first_hit(self.table_state, shooter, b.category, cleared))
            .unwrap_or(false);

        // 1. The eight ball decides the game one way or the other
        if pocketed.iter().any(|b| b.category == Category::EightBall) {
            let verdict = if cue_ball_pocketed {
                self.end_game(
                    shooter.opponent(),
                    GameOverReason::ScratchOnEight,
                    format!("{shooter} scratched on the 8-ball. {} wins!", shooter.opponent()),
                )
            } else if !cleared {
                self.end_game(
                    shooter.opponent(),
                    GameOverReason::EarlyEight,
                    format!(
                        "{shooter} pocketed the 8-ball too early. {} wins!",
                        shooter.opponent()
                    ),
                )
            } else if !legal_first_hit {
                self.end_game(
                    shooter.opponent(),
                    GameOverReason::IllegalEight,
                    format!(
                        "{shooter} fouled while pocketing the 8-ball. {} wins!",
                        shooter.opponent()
                    ),
                )
            } else {
                self.end_game(
                    shooter,
                    GameOverReason::CleanWin,
                    format!("{shooter} pocketed the 8-ball. {shooter} wins!"),
                )
            };
            return verdict;
        }

        // 2. Scratch
        if cue_ball_pocketed {
            return self.foul(Foul::Scratch, format!("Scratch by {shooter}!"));
        }

        // 3. Cue ball hit nothing
        let Some(first) = first_hit else {
            return self.foul(Foul::NoContact, format!("Foul: {shooter} hit no ball!"));
        };

        // 4. Wrong ball first
        if !legal_first_hit {
            return self.foul(
                Foul::WrongBallFirst,
                format!("Foul: {shooter} hit ball {} first!", first.number),
            );
        }

        // 5. Legal shot
        let Some(first_pocketed) = pocketed.first() else {
            self.switch_turn();
            self.status_message = format!("No ball pocketed. {} to shoot.", self.current_turn);
            return Verdict::SwitchTurn;
        };

        if self.table_state == TableState::Open {
            let assigned = TableState::assigning(shooter, first_pocketed.category);
            if let Some(state) = assigned {
                self.table_state = state;
                let group = match first_pocketed.category {
                    Category::Solid => "solids",
                    _ => "stripes",
                };
                self.status_message = format!("{shooter} takes {group}. Shoot again.");
                log::info!("Table assigned: {:?}", state);
            }
            return Verdict::Continue { assigned };
        }

        let own = self.table_state.category_of(shooter);
        if pocketed.iter().any(|b| Some(b.category) == own) {
            self.status_message = format!("{shooter} continues.");
            Verdict::Continue { assigned: None }
        } else {
            self.switch_turn();
            self.status_message = format!("No own ball pocketed. {} to shoot.", self.current_turn);
            Verdict::SwitchTurn
        }
    }

    fn switch_turn(&mut self) {
        self.current_turn = self.current_turn.opponent();
    }

    fn foul(&mut self, foul: Foul, message: String) -> Verdict {
        self.switch_turn();
        self.ball_in_hand = true;
        self.status_message = format!("{message} {} has ball in hand.", self.current_turn);
        log::info!("{}", self.status_message);
        Verdict::Foul(foul)
    }

    fn end_game(&mut self, winner: Player, reason: GameOverReason, message: String) -> Verdict {
        self.game_status = GameStatus::won_by(winner);
        self.game_over_reason = Some(reason);
        self.clean_win = reason == GameOverReason::CleanWin;
        self.status_message = message;
        log::info!("{}", self.status_message);
        Verdict::GameOver { winner, reason }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scene::BallId;

    fn ball(number: u8) -> ObjectInfo {
        ObjectInfo {
            id: BallId(number as usize),
            number,
            category: Category::from_number(number).unwrap(),
        }
    }

    fn balls(numbers: &[u8]) -> Vec<ObjectInfo> {
        numbers.iter().map(|&n| ball(n)).collect()
    }

    fn assigned(state: TableState, turn: Player) -> GameRules {
        let mut rules = GameRules::new();
        rules.table_state = state;
        rules.current_turn = turn;
        rules
    }

    #[test]
    fn clean_win() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        let remaining = balls(&[9, 10, 11]);
        let verdict = rules.process_turn(&balls(&[8]), false, &remaining, Some(ball(8)));

        assert_eq!(
            verdict,
            Verdict::GameOver { winner: Player::Player1, reason: GameOverReason::CleanWin }
        );
        assert_eq!(rules.game_status(), GameStatus::P1Wins);
        assert!(rules.is_clean_win());
        assert!(rules.is_game_over());
    }

    #[test]
    fn early_eight_loses() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        let remaining = balls(&[3, 9, 10]);
        rules.process_turn(&balls(&[8]), false, &remaining, Some(ball(3)));

        assert_eq!(rules.game_status(), GameStatus::P2Wins);
        assert!(!rules.is_clean_win());
    }

    #[test]
    fn scratch_on_eight_loses() {
        let mut rules = assigned(TableState::P1Stripes, Player::Player2);
        let verdict = rules.process_turn(&balls(&[8]), true, &balls(&[9]), Some(ball(8)));
        assert_eq!(
            verdict,
            Verdict::GameOver { winner: Player::Player1, reason: GameOverReason::ScratchOnEight }
        );
        assert!(!rules.is_clean_win());
    }

    #[test]
    fn eight_after_illegal_first_hit_loses() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        let remaining = balls(&[12]);
        let verdict = rules.process_turn(&balls(&[8]), false, &remaining, Some(ball(12)));
        assert_eq!(
            verdict,
            Verdict::GameOver { winner: Player::Player2, reason: GameOverReason::IllegalEight }
        );
    }

    #[test]
    fn eight_on_open_table_loses() {
        let mut rules = GameRules::new();
        rules.process_turn(&balls(&[8]), false, &balls(&[1, 9]), Some(ball(1)));
        assert_eq!(rules.game_status(), GameStatus::P2Wins);
    }

    #[test]
    fn scratch_gives_ball_in_hand() {
        let mut rules = GameRules::new();
        let verdict = rules.process_turn(&[], true, &balls(&[1, 2, 9]), Some(ball(1)));

        assert_eq!(verdict, Verdict::Foul(Foul::Scratch));
        assert_eq!(rules.current_turn(), Player::Player2);
        assert!(rules.is_ball_in_hand());
        assert_eq!(rules.game_status(), GameStatus::Ongoing);
    }

    #[test]
    fn no_contact_is_a_foul() {
        let mut rules = GameRules::new();
        let verdict = rules.process_turn(&[], false, &balls(&[1, 9]), None);
        assert_eq!(verdict, Verdict::Foul(Foul::NoContact));
        assert!(rules.is_ball_in_hand());
    }

    #[test]
    fn wrong_group_first_is_a_foul() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        let verdict = rules.process_turn(&balls(&[2]), false, &balls(&[1, 9]), Some(ball(9)));
        assert_eq!(verdict, Verdict::Foul(Foul::WrongBallFirst));
        assert_eq!(rules.current_turn(), Player::Player2);
    }

    #[test]
    fn eight_first_on_open_table_is_a_foul() {
        let mut rules = GameRules::new();
        let verdict = rules.process_turn(&balls(&[3]), false, &balls(&[1, 8]), Some(ball(8)));
        assert_eq!(verdict, Verdict::Foul(Foul::WrongBallFirst));
        assert_eq!(rules.table_state(), TableState::Open);
    }

    #[test]
    fn open_table_assignment_keeps_turn() {
        let mut rules = GameRules::new();
        let verdict = rules.process_turn(&balls(&[3]), false, &balls(&[1, 8, 9]), Some(ball(3)));

        assert_eq!(verdict, Verdict::Continue { assigned: Some(TableState::P1Solid) });
        assert_eq!(rules.table_state(), TableState::P1Solid);
        assert_eq!(rules.current_turn(), Player::Player1);
    }

    #[test]
    fn assignment_uses_first_pocketed_ball() {
        let mut rules = assigned(TableState::Open, Player::Player2);
        rules.process_turn(&balls(&[11, 2]), false, &balls(&[1, 8]), Some(ball(2)));
        // Player 2 gets stripes, so player 1 has solids
        assert_eq!(rules.table_state(), TableState::P1Solid);
        assert_eq!(rules.category_of(Player::Player2), Some(Category::Stripe));
    }

    #[test]
    fn assignment_happens_once() {
        let mut rules = GameRules::new();
        rules.process_turn(&balls(&[3]), false, &balls(&[1, 8, 9]), Some(ball(3)));
        rules.process_turn(&balls(&[1]), false, &balls(&[8, 9]), Some(ball(1)));
        rules.process_turn(&[], false, &balls(&[8, 9]), Some(ball(8)));
        assert_eq!(rules.table_state(), TableState::P1Solid);
    }

    #[test]
    fn nothing_pocketed_switches_turn() {
        let mut rules = GameRules::new();
        let verdict = rules.process_turn(&[], false, &balls(&[1, 9]), Some(ball(1)));
        assert_eq!(verdict, Verdict::SwitchTurn);
        assert_eq!(rules.current_turn(), Player::Player2);
        assert!(!rules.is_ball_in_hand());
    }

    #[test]
    fn only_opponent_balls_pocketed_switches_turn() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        let verdict = rules.process_turn(&balls(&[10]), false, &balls(&[1, 8, 9]), Some(ball(1)));
        assert_eq!(verdict, Verdict::SwitchTurn);
        assert_eq!(rules.current_turn(), Player::Player2);
    }

    #[test]
    fn mixed_pocket_with_own_ball_continues() {
        let mut rules = assigned(TableState::P1Stripes, Player::Player1);
        let verdict =
            rules.process_turn(&balls(&[2, 13]), false, &balls(&[1, 8, 9]), Some(ball(9)));
        assert_eq!(verdict, Verdict::Continue { assigned: None });
        assert_eq!(rules.current_turn(), Player::Player1);
    }

    #[test]
    fn ball_in_hand_cleared_only_explicitly() {
        let mut rules = GameRules::new();
        rules.process_turn(&[], true, &balls(&[1]), None);
        assert!(rules.is_ball_in_hand());
        rules.process_turn(&[], false, &balls(&[1]), Some(ball(1)));
        assert!(rules.is_ball_in_hand());
        rules.clear_ball_in_hand();
        assert!(!rules.is_ball_in_hand());
    }

    #[test]
    fn same_inputs_same_outcome() {
        let inputs: [(&[u8], bool, &[u8], Option<u8>); 4] = [
            (&[], true, &[1, 9], Some(1)),
            (&[4], false, &[1, 8, 9], Some(4)),
            (&[], false, &[1, 8, 9], None),
            (&[8], false, &[1, 9], Some(8)),
        ];
        for (pocketed, scratch, remaining, first) in inputs {
            let mut a = assigned(TableState::P1Solid, Player::Player2);
            let mut b = a.clone();
            let va = a.process_turn(&balls(pocketed), scratch, &balls(remaining), first.map(ball));
            let vb = b.process_turn(&balls(pocketed), scratch, &balls(remaining), first.map(ball));
            assert_eq!(va, vb);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn judging_after_game_over_changes_nothing() {
        let mut rules = assigned(TableState::P1Solid, Player::Player1);
        rules.process_turn(&balls(&[8]), false, &balls(&[9]), Some(ball(8)));
        let before = rules.clone();
        let verdict = rules.process_turn(&[], true, &balls(&[9]), None);
        assert_eq!(
            verdict,
            Verdict::GameOver { winner: Player::Player1, reason: GameOverReason::CleanWin }
        );
        assert_eq!(rules, before);
    }

    #[test]
    fn process_report_matches_process_turn() {
        let report = TurnReport {
            pocketed: balls(&[5]),
            cue_ball_pocketed: false,
            first_hit: Some(ball(5)),
        };
        let mut rules = GameRules::new();
        let verdict = rules.process_report(&report, &balls(&[1, 8, 9]));
        assert_eq!(verdict, Verdict::Continue { assigned: Some(TableState::P1Solid) });
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut rules = assigned(TableState::P1Stripes, Player::Player2);
        rules.process_turn(&[], true, &balls(&[1]), None);
        rules.reset_game();
        assert_eq!(rules, GameRules::new());
    }
}
