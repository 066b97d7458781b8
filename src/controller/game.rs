//! The game controller: the only place player state changes.

use std::sync::{Arc, RwLockReadGuard};

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::board::{read_board, write_board, GameBoard, SharedBoard};
use crate::core::{Direction, Player, PlayerId, Position};
use crate::error::EngineError;
use crate::moves::{MoveResult, Valid};
use crate::rules::{BoardView, MoveResolver};

use super::state::GameState;

/// Applies move outcomes to player states.
///
/// Owns the resolver and one `GameState` per player. All states point at the
/// same shared board. Mutation requires `&mut self`; wrap the controller in a
/// [`Session`](super::Session) to share it between threads.
#[derive(Debug)]
pub struct GameController<R: MoveResolver> {
    resolver: R,
    board: SharedBoard,
    /// Registration order.
    states: Vec<GameState>,
    index: FxHashMap<PlayerId, usize>,
}

impl<R: MoveResolver> GameController<R> {
    /// Create a controller over one or more player states.
    ///
    /// Fails if `states` is empty, names a player twice, or the states do
    /// not share one board instance.
    pub fn new(resolver: R, states: Vec<GameState>) -> Result<Self, EngineError> {
        let board = states
            .first()
            .map(|s| Arc::clone(s.board()))
            .ok_or(EngineError::NoGameStates)?;

        let mut index = FxHashMap::default();
        for (i, state) in states.iter().enumerate() {
            if !Arc::ptr_eq(state.board(), &board) {
                return Err(EngineError::BoardMismatch);
            }
            if index.insert(state.player_id(), i).is_some() {
                return Err(EngineError::DuplicatePlayer(state.player_id()));
            }
        }

        debug!(players = states.len(), "Created game controller");
        Ok(Self {
            resolver,
            board,
            states,
            index,
        })
    }

    // === Moves ===

    /// Process a move of `player` in `direction`.
    ///
    /// Returns `Ok(None)` when the resolver has nothing to do; no state is
    /// touched in that case. A `Dead` that uses up the last life comes back
    /// as `KickedOut`.
    pub fn process_move(
        &mut self,
        direction: Direction,
        player: PlayerId,
    ) -> Result<Option<MoveResult>, EngineError> {
        let idx = self.state_index(player)?;

        let resolved = {
            let mut board = write_board(&self.board);
            self.resolver.resolve(&mut board, direction, player)
        };
        let Some(resolved) = resolved else {
            debug!(%player, %direction, "Move not applicable");
            return Ok(None);
        };

        let state = &mut self.states[idx];
        let result = match resolved {
            MoveResult::Invalid { orig_position } => MoveResult::Invalid { orig_position },
            MoveResult::Valid(Valid::Alive(record)) => {
                state.increment_num_moves();
                state.increase_num_lives(record.num_extra_lives());
                state.increase_num_got_gems(record.num_gems());
                state.move_stack_mut().push_alive(record.clone());
                MoveResult::alive(record)
            }
            MoveResult::Valid(Valid::Dead { orig_position }) => {
                state.increment_num_moves();
                state.increment_num_deaths();
                if state.decrement_num_lives() == Some(0) {
                    let mut board = write_board(&self.board);
                    self.resolver.kick_out(&mut board, player);
                    info!(%player, deaths = state.num_deaths(), "Player kicked out");
                    MoveResult::kicked_out(orig_position)
                } else {
                    MoveResult::dead(orig_position)
                }
            }
            MoveResult::Valid(Valid::KickedOut { orig_position }) => {
                warn!(%player, "Resolver reported a kick-out; ignoring bookkeeping");
                MoveResult::kicked_out(orig_position)
            }
        };

        debug!(
            %player,
            %direction,
            outcome = result.label(),
            moves = self.states[idx].num_moves(),
            lives = ?self.states[idx].num_lives(),
            "Processed move"
        );
        Ok(Some(result))
    }

    /// Process a move in a single-player session.
    pub fn process_move_single(
        &mut self,
        direction: Direction,
    ) -> Result<Option<MoveResult>, EngineError> {
        let player = self.game_state()?.player_id();
        self.process_move(direction, player)
    }

    /// Undo the most recent alive move. Single-player sessions only.
    ///
    /// Returns `Ok(false)` without consulting the resolver when there is
    /// nothing to undo or the player has been kicked out.
    pub fn process_undo(&mut self) -> Result<bool, EngineError> {
        let idx = self.single_index()?;
        let state = &mut self.states[idx];

        if state.has_lost() {
            debug!(player = %state.player_id(), "Kicked out; undo refused");
            return Ok(false);
        }
        let Some(record) = state.move_stack_mut().pop() else {
            debug!("Nothing to undo");
            return Ok(false);
        };

        state.revoke_num_lives(record.num_extra_lives());
        state.decrease_num_got_gems(record.num_gems());

        let mut board = write_board(&self.board);
        self.resolver.undo(&mut board, &record);

        debug!(
            player = %state.player_id(),
            from = %record.new_position,
            to = %record.orig_position,
            undos = state.num_undos(),
            "Undid move"
        );
        Ok(true)
    }

    // === Queries ===

    /// Winners of the game, or `None` while gems remain on the board.
    ///
    /// Once the board is cleared: no surviving player means no winner, a
    /// single survivor wins regardless of score, and several survivors are
    /// ranked by score with ties sharing the win.
    #[must_use]
    pub fn winners(&self) -> Option<Vec<PlayerId>> {
        if read_board(&self.board).num_gems_left() > 0 {
            return None;
        }

        let alive: Vec<&GameState> = self.states.iter().filter(|s| !s.has_lost()).collect();
        let winners = match alive.as_slice() {
            [] => Vec::new(),
            [only] => vec![only.player_id()],
            _ => {
                let best = alive.iter().map(|s| s.score()).max().unwrap_or(i64::MIN);
                alive
                    .iter()
                    .filter(|s| s.score() == best)
                    .map(|s| s.player_id())
                    .collect()
            }
        };

        info!(?winners, "Game over");
        Some(winners)
    }

    /// The only game state of a single-player session.
    pub fn game_state(&self) -> Result<&GameState, EngineError> {
        let idx = self.single_index()?;
        Ok(&self.states[idx])
    }

    /// The game state of `player`.
    pub fn game_state_of(&self, player: PlayerId) -> Result<&GameState, EngineError> {
        let idx = self.state_index(player)?;
        Ok(&self.states[idx])
    }

    /// All game states, in registration order.
    #[must_use]
    pub fn game_states(&self) -> &[GameState] {
        &self.states
    }

    /// The board shared by every game state.
    #[must_use]
    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    /// All players, in registration order.
    #[must_use]
    pub fn players(&self) -> Vec<Player> {
        self.states.iter().map(GameState::player).collect()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// A read-only view for trial moves.
    ///
    /// Holds the board's read lock for its lifetime, so a whole robot
    /// decision sees one consistent board.
    #[must_use]
    pub fn view(&self) -> ControllerView<'_, R> {
        ControllerView {
            board: read_board(&self.board),
            resolver: &self.resolver,
        }
    }

    fn state_index(&self, player: PlayerId) -> Result<usize, EngineError> {
        self.index
            .get(&player)
            .copied()
            .ok_or(EngineError::UnknownPlayer(player))
    }

    fn single_index(&self) -> Result<usize, EngineError> {
        match self.states.len() {
            1 => Ok(0),
            player_count => Err(EngineError::NotSinglePlayer { player_count }),
        }
    }
}

/// Board snapshot plus resolver, used by robots to look ahead.
pub struct ControllerView<'a, R: MoveResolver> {
    board: RwLockReadGuard<'a, GameBoard>,
    resolver: &'a R,
}

impl<R: MoveResolver> ControllerView<'_, R> {
    #[must_use]
    pub fn board(&self) -> &GameBoard {
        &self.board
    }
}

impl<R: MoveResolver> BoardView for ControllerView<'_, R> {
    fn player_position(&self, player: PlayerId) -> Option<Position> {
        self.board.player_position(player)
    }

    fn trial(&self, position: Position, direction: Direction, player: PlayerId) -> MoveResult {
        self.resolver.trial(&self.board, position, direction, player)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::board::share;
    use crate::controller::state::Lives;
    use crate::core::EntityKind;
    use crate::moves::AliveMove;

    /// Replays queued outcomes and records collaborator calls.
    #[derive(Debug, Default)]
    struct ScriptedResolver {
        outcomes: VecDeque<Option<MoveResult>>,
        undone: Vec<AliveMove>,
        kicked: Vec<PlayerId>,
    }

    impl ScriptedResolver {
        fn with(outcomes: impl IntoIterator<Item = Option<MoveResult>>) -> Self {
            Self {
                outcomes: outcomes.into_iter().collect(),
                ..Self::default()
            }
        }
    }

    impl MoveResolver for ScriptedResolver {
        fn resolve(&mut self, _: &mut GameBoard, _: Direction, _: PlayerId) -> Option<MoveResult> {
            self.outcomes.pop_front().flatten()
        }

        fn trial(&self, _: &GameBoard, position: Position, _: Direction, _: PlayerId) -> MoveResult {
            MoveResult::invalid(position)
        }

        fn undo(&mut self, _: &mut GameBoard, record: &AliveMove) {
            self.undone.push(record.clone());
        }

        fn kick_out(&mut self, board: &mut GameBoard, player: PlayerId) {
            if let Some(entity) = board.player_entity(player) {
                board.remove_entity(entity);
            }
            self.kicked.push(player);
        }
    }

    fn p(row: u32, col: u32) -> Position {
        Position::new(row, col)
    }

    /// Board with `gems` gems and one piece per player id.
    fn states(player_ids: &[u32], gems: u32, lives: Lives) -> Vec<GameState> {
        let mut board = GameBoard::new(4, 4);
        for col in 0..gems {
            board.spawn(EntityKind::Gem, p(3, col));
        }
        let players: Vec<_> = player_ids
            .iter()
            .enumerate()
            .map(|(i, &id)| board.spawn_player(PlayerId::new(id), p(0, i as u32)))
            .collect();
        let shared = share(board);
        players
            .into_iter()
            .map(|player| GameState::new(player, Arc::clone(&shared), lives))
            .collect()
    }

    fn single(outcomes: Vec<Option<MoveResult>>, lives: Lives) -> GameController<ScriptedResolver> {
        GameController::new(ScriptedResolver::with(outcomes), states(&[0], 1, lives)).unwrap()
    }

    fn alive_with(gems: usize, extra_lives: usize) -> MoveResult {
        MoveResult::alive(
            AliveMove::new(p(0, 0), p(0, 1))
                .with_gems((0..gems as u32).map(|c| p(3, c)))
                .with_extra_lives((0..extra_lives as u32).map(|c| p(2, c))),
        )
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_new_requires_states() {
        let result = GameController::new(ScriptedResolver::default(), Vec::new());
        assert_eq!(result.unwrap_err(), EngineError::NoGameStates);
    }

    #[test]
    fn test_new_rejects_duplicate_players() {
        let mut board = GameBoard::new(2, 2);
        let player = board.spawn_player(PlayerId::new(3), p(0, 0));
        let shared = share(board);
        let twice = vec![
            GameState::with_unlimited_lives(player, Arc::clone(&shared)),
            GameState::with_unlimited_lives(player, shared),
        ];

        let result = GameController::new(ScriptedResolver::default(), twice);
        assert_eq!(result.unwrap_err(), EngineError::DuplicatePlayer(PlayerId::new(3)));
    }

    #[test]
    fn test_new_rejects_separate_boards() {
        let mut all = states(&[0], 0, Lives::Unlimited);
        all.extend(states(&[1], 0, Lives::Unlimited));

        let result = GameController::new(ScriptedResolver::default(), all);
        assert_eq!(result.unwrap_err(), EngineError::BoardMismatch);
    }

    // =========================================================================
    // Moves
    // =========================================================================

    #[test]
    fn test_unknown_player() {
        let mut controller = single(vec![], Lives::Unlimited);
        assert_eq!(
            controller.process_move(Direction::Up, PlayerId::new(9)),
            Err(EngineError::UnknownPlayer(PlayerId::new(9)))
        );
    }

    #[test]
    fn test_noop_leaves_state_untouched() {
        let mut controller = single(vec![None], Lives::Limited(2));

        assert_eq!(controller.process_move_single(Direction::Up), Ok(None));

        let state = controller.game_state().unwrap();
        assert_eq!(state.num_moves(), 0);
        assert_eq!(state.num_lives(), Some(2));
    }

    #[test]
    fn test_invalid_passes_through() {
        let mut controller = single(vec![Some(MoveResult::invalid(p(0, 0)))], Lives::Limited(2));

        let result = controller.process_move_single(Direction::Left).unwrap();

        assert_eq!(result, Some(MoveResult::invalid(p(0, 0))));
        let state = controller.game_state().unwrap();
        assert_eq!(state.num_moves(), 0);
        assert!(state.move_stack().is_empty());
    }

    #[test]
    fn test_alive_updates_counters_and_history() {
        let mut controller = single(vec![Some(alive_with(2, 1))], Lives::Limited(1));

        let result = controller.process_move_single(Direction::Right).unwrap();

        assert_eq!(result, Some(alive_with(2, 1)));
        let state = controller.game_state().unwrap();
        assert_eq!(state.num_moves(), 1);
        assert_eq!(state.num_got_gems(), 2);
        assert_eq!(state.num_lives(), Some(2));
        assert_eq!(state.move_stack().len(), 1);
    }

    #[test]
    fn test_dead_costs_exactly_one_life() {
        let mut controller = single(vec![Some(MoveResult::dead(p(0, 0)))], Lives::Limited(3));

        let result = controller.process_move_single(Direction::Down).unwrap();

        assert_eq!(result, Some(MoveResult::dead(p(0, 0))));
        let state = controller.game_state().unwrap();
        assert_eq!(state.num_moves(), 1);
        assert_eq!(state.num_deaths(), 1);
        assert_eq!(state.num_lives(), Some(2));
        assert!(state.move_stack().is_empty());
        assert!(controller.resolver().kicked.is_empty());
    }

    #[test]
    fn test_last_death_becomes_kick_out() {
        let mut controller = single(vec![Some(MoveResult::dead(p(1, 2)))], Lives::Limited(1));

        let result = controller.process_move_single(Direction::Down).unwrap();

        assert_eq!(result, Some(MoveResult::kicked_out(p(1, 2))));
        assert_eq!(controller.resolver().kicked, vec![PlayerId::new(0)]);
        let state = controller.game_state().unwrap();
        assert_eq!(state.num_lives(), Some(0));
        assert!(state.has_lost());
        assert_eq!(read_board(controller.board()).player_position(PlayerId::new(0)), None);
    }

    #[test]
    fn test_unlimited_lives_never_kicked_out() {
        let outcomes = (0..5).map(|_| Some(MoveResult::dead(p(0, 0)))).collect();
        let mut controller = single(outcomes, Lives::Unlimited);

        for _ in 0..5 {
            let result = controller.process_move_single(Direction::Up).unwrap();
            assert_eq!(result, Some(MoveResult::dead(p(0, 0))));
        }
        assert_eq!(controller.game_state().unwrap().num_deaths(), 5);
        assert!(controller.resolver().kicked.is_empty());
    }

    #[test]
    fn test_single_player_helpers_reject_multiplayer() {
        let mut controller =
            GameController::new(ScriptedResolver::default(), states(&[0, 1], 1, Lives::Unlimited)).unwrap();

        assert_eq!(
            controller.process_move_single(Direction::Up),
            Err(EngineError::NotSinglePlayer { player_count: 2 })
        );
        assert_eq!(
            controller.process_undo(),
            Err(EngineError::NotSinglePlayer { player_count: 2 })
        );
        assert!(controller.game_state().is_err());
        assert!(controller.game_state_of(PlayerId::new(1)).is_ok());
    }

    // =========================================================================
    // Undo
    // =========================================================================

    #[test]
    fn test_undo_empty_history_skips_resolver() {
        let mut controller = single(vec![], Lives::Limited(1));

        assert_eq!(controller.process_undo(), Ok(false));
        assert!(controller.resolver().undone.is_empty());
        assert_eq!(controller.game_state().unwrap().num_undos(), 0);
    }

    #[test]
    fn test_undo_reverses_extra_lives() {
        let mut controller = single(vec![Some(alive_with(1, 2))], Lives::Limited(1));
        controller.process_move_single(Direction::Right).unwrap();
        assert_eq!(controller.game_state().unwrap().num_lives(), Some(3));

        assert_eq!(controller.process_undo(), Ok(true));

        let state = controller.game_state().unwrap();
        assert_eq!(state.num_lives(), Some(1));
        assert_eq!(state.num_got_gems(), 0);
        assert_eq!(state.num_undos(), 1);
        assert!(state.move_stack().is_empty());
        assert_eq!(controller.resolver().undone.len(), 1);
    }

    #[test]
    fn test_undo_after_death_keeps_player_in_game() {
        let outcomes = vec![Some(alive_with(0, 1)), Some(MoveResult::dead(p(0, 1)))];
        let mut controller = single(outcomes, Lives::Limited(1));
        controller.process_move_single(Direction::Right).unwrap();
        controller.process_move_single(Direction::Down).unwrap();
        assert_eq!(controller.game_state().unwrap().num_lives(), Some(1));

        controller.process_undo().unwrap();

        assert_eq!(controller.game_state().unwrap().num_lives(), Some(1));
    }

    #[test]
    fn test_kicked_out_player_cannot_undo() {
        let outcomes = vec![Some(alive_with(1, 0)), Some(MoveResult::dead(p(0, 1)))];
        let mut controller = single(outcomes, Lives::Limited(1));
        controller.process_move_single(Direction::Right).unwrap();
        controller.process_move_single(Direction::Down).unwrap();

        assert_eq!(controller.process_undo(), Ok(false));

        let state = controller.game_state().unwrap();
        assert!(state.has_lost());
        assert_eq!(state.move_stack().len(), 1);
        assert_eq!(state.num_got_gems(), 1);
        assert!(controller.resolver().undone.is_empty());
    }

    // =========================================================================
    // Winners
    // =========================================================================

    fn finished(player_ids: &[u32], lives: Lives) -> GameController<ScriptedResolver> {
        GameController::new(ScriptedResolver::default(), states(player_ids, 0, lives)).unwrap()
    }

    fn set_score(controller: &mut GameController<ScriptedResolver>, player: u32, score: u32) {
        let idx = controller.state_index(PlayerId::new(player)).unwrap();
        let state = &mut controller.states[idx];
        state.increase_num_got_gems(1);
        for _ in 0..(10 - score) {
            state.increment_num_moves();
        }
    }

    fn kick(controller: &mut GameController<ScriptedResolver>, player: u32) {
        let idx = controller.state_index(PlayerId::new(player)).unwrap();
        while controller.states[idx].decrement_num_lives() != Some(0) {}
    }

    #[test]
    fn test_winners_none_while_gems_left() {
        let controller =
            GameController::new(ScriptedResolver::default(), states(&[0, 1], 2, Lives::Limited(1))).unwrap();
        assert_eq!(controller.winners(), None);
    }

    #[test]
    fn test_winners_empty_when_everyone_lost() {
        let mut controller = finished(&[0, 1], Lives::Limited(1));
        kick(&mut controller, 0);
        kick(&mut controller, 1);

        assert_eq!(controller.winners(), Some(vec![]));
    }

    #[test]
    fn test_sole_survivor_wins_regardless_of_score() {
        let mut controller = finished(&[0, 1], Lives::Limited(1));
        set_score(&mut controller, 1, 9);
        kick(&mut controller, 1);

        assert_eq!(controller.winners(), Some(vec![PlayerId::new(0)]));
    }

    #[test]
    fn test_tied_scores_share_the_win() {
        let mut controller = finished(&[0, 1], Lives::Unlimited);
        set_score(&mut controller, 0, 5);
        set_score(&mut controller, 1, 5);

        assert_eq!(controller.winners(), Some(vec![PlayerId::new(0), PlayerId::new(1)]));
    }

    #[test]
    fn test_highest_score_wins() {
        let mut controller = finished(&[0, 1], Lives::Unlimited);
        set_score(&mut controller, 0, 5);
        set_score(&mut controller, 1, 7);

        assert_eq!(controller.winners(), Some(vec![PlayerId::new(1)]));
    }

    #[test]
    fn test_single_player_winner() {
        let controller = finished(&[4], Lives::Limited(2));
        assert_eq!(controller.winners(), Some(vec![PlayerId::new(4)]));
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[test]
    fn test_players_in_registration_order() {
        let controller = finished(&[5, 2, 8], Lives::Unlimited);

        let ids: Vec<_> = controller.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlayerId::new(5), PlayerId::new(2), PlayerId::new(8)]);
        assert_eq!(controller.player_count(), 3);
        assert!(controller
            .game_states()
            .iter()
            .all(|s| Arc::ptr_eq(s.board(), controller.board())));
    }

    #[test]
    fn test_view_reports_positions() {
        let controller = finished(&[0, 1], Lives::Unlimited);
        let view = controller.view();

        assert_eq!(view.player_position(PlayerId::new(1)), Some(p(0, 1)));
        assert_eq!(view.trial(p(0, 1), Direction::Up, PlayerId::new(1)), MoveResult::invalid(p(0, 1)));
    }
}
