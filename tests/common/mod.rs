//! Shared fixtures for integration tests.
//!
//! `StepResolver` is a minimal board geometry: a piece moves exactly one
//! cell per move. Walls, the board edge and other players block; a mine
//! kills; gems and extra lives are picked up by stepping onto them.

#![allow(dead_code)]

use std::sync::Arc;

use inertia_rules::board::{share, GameBoard, SharedBoard};
use inertia_rules::core::{Direction, EntityId, EntityKind, PlayerId, Position};
use inertia_rules::moves::{AliveMove, MoveResult};
use inertia_rules::rules::MoveResolver;
use inertia_rules::{CellKind, GameController, GameState, Lives, Session};
use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
pub struct StepResolver {
    /// Entities picked up at each position, most recent last.
    picked_up: FxHashMap<Position, Vec<EntityId>>,
}

impl StepResolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn outcome(board: &GameBoard, from: Position, direction: Direction, player: PlayerId) -> MoveResult {
        let Some(to) = board.offset(from, direction) else {
            return MoveResult::invalid(from);
        };
        if board.cell_at(to).is_some_and(|c| c.kind() == CellKind::Wall) {
            return MoveResult::invalid(from);
        }

        let record = AliveMove::new(from, to);
        let own_piece = board.player_entity(player);
        match board.entity_at(to) {
            None => MoveResult::alive(record),
            Some((id, EntityKind::Player)) if Some(id) == own_piece => MoveResult::alive(record),
            Some((_, EntityKind::Player)) => MoveResult::invalid(from),
            Some((_, EntityKind::Mine)) => MoveResult::dead(from),
            Some((_, EntityKind::Gem)) => MoveResult::alive(record.with_gems([to])),
            Some((_, EntityKind::ExtraLife)) => MoveResult::alive(record.with_extra_lives([to])),
        }
    }
}

impl MoveResolver for StepResolver {
    fn resolve(
        &mut self,
        board: &mut GameBoard,
        direction: Direction,
        player: PlayerId,
    ) -> Option<MoveResult> {
        let from = board.player_position(player)?;
        let piece = board.player_entity(player)?;

        let result = Self::outcome(board, from, direction, player);
        if let Some(record) = result.as_alive() {
            if let Some(evicted) = board.move_entity(piece, record.new_position) {
                self.picked_up
                    .entry(record.new_position)
                    .or_default()
                    .push(evicted);
            }
        }
        Some(result)
    }

    fn trial(
        &self,
        board: &GameBoard,
        position: Position,
        direction: Direction,
        player: PlayerId,
    ) -> MoveResult {
        Self::outcome(board, position, direction, player)
    }

    fn undo(&mut self, board: &mut GameBoard, record: &AliveMove) {
        let Some(piece) = board.entity_at(record.new_position).map(|(id, _)| id) else {
            return;
        };
        board.move_entity(piece, record.orig_position);

        let restored = record
            .collected_gems
            .iter()
            .chain(record.collected_extra_lives.iter());
        for &position in restored {
            if let Some(entity) = self.picked_up.get_mut(&position).and_then(Vec::pop) {
                board.move_entity(entity, position);
            }
        }
    }

    fn kick_out(&mut self, board: &mut GameBoard, player: PlayerId) {
        if let Some(piece) = board.player_entity(player) {
            board.remove_entity(piece);
        }
    }
}

/// Parse a board from rows of characters.
///
/// `.` ice, `#` wall, `s` stop, `g` gem, `m` mine, `+` extra life,
/// `0`-`9` the piece of that player. Returns the shared board and the
/// players in the order their digits appear.
pub fn parse_board(rows: &[&str]) -> (SharedBoard, Vec<inertia_rules::Player>) {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.len()) as u32;
    let mut board = GameBoard::new(height, width);
    let mut players = Vec::new();

    for (r, line) in rows.iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            let at = Position::new(r as u32, c as u32);
            match ch {
                '.' => {}
                '#' => board.set_kind(at, CellKind::Wall),
                's' => board.set_kind(at, CellKind::Stop),
                'g' => {
                    board.spawn(EntityKind::Gem, at);
                }
                'm' => {
                    board.spawn(EntityKind::Mine, at);
                }
                '+' => {
                    board.spawn(EntityKind::ExtraLife, at);
                }
                d if d.is_ascii_digit() => {
                    let id = PlayerId::new(d.to_digit(10).unwrap_or(0));
                    players.push(board.spawn_player(id, at));
                }
                other => panic!("Unknown board character {:?}", other),
            }
        }
    }

    (share(board), players)
}

/// A controller over a parsed board, every player starting with `lives`.
pub fn controller(rows: &[&str], lives: Lives) -> GameController<StepResolver> {
    let (board, players) = parse_board(rows);
    let states = players
        .into_iter()
        .map(|p| GameState::new(p, Arc::clone(&board), lives))
        .collect();
    GameController::new(StepResolver::new(), states).unwrap()
}

pub fn session(rows: &[&str], lives: Lives) -> Session<StepResolver> {
    Session::new(controller(rows, lives))
}
