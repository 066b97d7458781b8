//! Board arena: cells, entities and the ownership links between them.
//!
//! Cells and entities live in two indexed vectors. An entity points at the
//! cell holding it (`Entity::owner`) and the cell records its occupant; both
//! sides are updated together by [`GameBoard::move_entity`] and
//! [`GameBoard::remove_entity`], so no owning reference cycle ever exists.
//!
//! Only the move resolver mutates a board. The controller reaches it through
//! [`SharedBoard`], the single instance every player's state points at.
//!
//! ```
//! use inertia_rules::board::{CellKind, GameBoard};
//! use inertia_rules::core::{EntityKind, PlayerId, Position};
//!
//! let mut board = GameBoard::new(3, 3);
//! board.set_kind(Position::new(0, 0), CellKind::Wall);
//! let player = board.spawn_player(PlayerId::new(0), Position::new(1, 1));
//! board.spawn(EntityKind::Gem, Position::new(2, 2));
//!
//! assert_eq!(board.num_gems_left(), 1);
//! assert_eq!(board.player_position(PlayerId::new(0)), Some(Position::new(1, 1)));
//!
//! board.move_entity(player.entity, Position::new(1, 2));
//! assert!(board.cell_at(Position::new(1, 1)).unwrap().is_empty());
//! ```

mod cell;

pub use cell::{Cell, CellKind};

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{CellId, Direction, Entity, EntityId, EntityKind, Player, PlayerId, Position};

/// The board instance shared by every player state of a session.
pub type SharedBoard = Arc<RwLock<GameBoard>>;

/// Wrap a board for sharing across game states.
#[must_use]
pub fn share(board: GameBoard) -> SharedBoard {
    Arc::new(RwLock::new(board))
}

/// Read-lock a shared board, recovering from poisoning.
pub fn read_board(board: &SharedBoard) -> RwLockReadGuard<'_, GameBoard> {
    board.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write-lock a shared board, recovering from poisoning.
pub fn write_board(board: &SharedBoard) -> RwLockWriteGuard<'_, GameBoard> {
    board.write().unwrap_or_else(PoisonError::into_inner)
}

/// Rectangular grid of cells plus the entities standing on them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameBoard {
    rows: u32,
    cols: u32,
    /// Row-major: cell (r, c) is at `r * cols + c`.
    cells: Vec<Cell>,
    entities: Vec<Entity>,
    players: FxHashMap<PlayerId, EntityId>,
}

impl GameBoard {
    /// Create a board of ice cells with no entities.
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        assert!(rows > 0 && cols > 0, "Board must have at least one cell");

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::new(Position::new(row, col), CellKind::Ice)))
            .collect();

        Self {
            rows,
            cols,
            cells,
            entities: Vec::new(),
            players: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    #[must_use]
    pub fn is_in_bounds(&self, position: Position) -> bool {
        position.row < self.rows && position.col < self.cols
    }

    /// The neighbouring position in `direction`, if it is on the board.
    #[must_use]
    pub fn offset(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .offset_by(direction.offset())
            .filter(|p| self.is_in_bounds(*p))
    }

    /// Arena id of the cell at `position`.
    #[must_use]
    pub fn cell_id(&self, position: Position) -> Option<CellId> {
        self.is_in_bounds(position)
            .then(|| CellId(position.row * self.cols + position.col))
    }

    #[must_use]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    #[must_use]
    pub fn cell_at(&self, position: Position) -> Option<&Cell> {
        self.cell_id(position).map(|id| self.cell(id))
    }

    /// Iterate over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Change a cell's terrain.
    ///
    /// Panics if the position is off the board, or if it would turn an
    /// occupied cell into a wall.
    pub fn set_kind(&mut self, position: Position, kind: CellKind) {
        let id = self.expect_cell(position);
        let cell = &mut self.cells[id.index()];
        if !kind.holds_entities() && cell.occupant.is_some() {
            panic!("Cannot turn occupied cell {} into a wall", position);
        }
        cell.set_kind(kind);
    }

    #[must_use]
    pub fn entity(&self, id: EntityId) -> &Entity {
        &self.entities[id.index()]
    }

    /// Iterate over (EntityId, &Entity) pairs, including collected entities.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .map(|(i, e)| (EntityId(i as u32), e))
    }

    /// Position of the cell owning `entity`, or `None` if it is off the board.
    #[must_use]
    pub fn entity_position(&self, entity: EntityId) -> Option<Position> {
        self.entity(entity)
            .owner()
            .map(|cell| self.cell(cell).position())
    }

    /// Create an entity and place it at `position`.
    pub fn spawn(&mut self, kind: EntityKind, position: Position) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(Entity::new(kind));
        self.move_entity(id, position);
        id
    }

    /// Create the piece for `player` at `position`.
    ///
    /// Panics if the player already has a piece on this board.
    pub fn spawn_player(&mut self, player: PlayerId, position: Position) -> Player {
        if self.players.contains_key(&player) {
            panic!("{} already has a piece on the board", player);
        }
        let entity = self.spawn(EntityKind::Player, position);
        self.players.insert(player, entity);
        Player::new(player, entity)
    }

    /// The entity representing `player`, if registered.
    #[must_use]
    pub fn player_entity(&self, player: PlayerId) -> Option<EntityId> {
        self.players.get(&player).copied()
    }

    /// Current position of `player`'s piece; `None` once kicked out.
    #[must_use]
    pub fn player_position(&self, player: PlayerId) -> Option<Position> {
        self.player_entity(player)
            .and_then(|entity| self.entity_position(entity))
    }

    /// Move `entity` onto the cell at `position`.
    ///
    /// Updates both ownership sides: the vacated cell is cleared, the target
    /// cell records the entity. Anything already on the target cell is taken
    /// off the board and returned.
    ///
    /// Panics if the target is off the board or a wall.
    pub fn move_entity(&mut self, entity: EntityId, position: Position) -> Option<EntityId> {
        let target = self.expect_cell(position);
        if !self.cells[target.index()].kind().holds_entities() {
            panic!("Cannot place {} on wall {}", entity, position);
        }

        let evicted = self.cells[target.index()].occupant.filter(|&e| e != entity);
        if let Some(evicted) = evicted {
            self.entities[evicted.index()].set_owner(None);
        }

        let previous = self.entities[entity.index()].set_owner(Some(target));
        if let Some(previous) = previous.filter(|&cell| cell != target) {
            self.cells[previous.index()].occupant = None;
        }
        self.cells[target.index()].occupant = Some(entity);

        evicted
    }

    /// Take `entity` off the board, returning the cell it was on.
    pub fn remove_entity(&mut self, entity: EntityId) -> Option<CellId> {
        let previous = self.entities[entity.index()].set_owner(None)?;
        self.cells[previous.index()].occupant = None;
        Some(previous)
    }

    /// The entity of `kind` resting at `position`, if any.
    #[must_use]
    pub fn entity_at(&self, position: Position) -> Option<(EntityId, EntityKind)> {
        let occupant = self.cell_at(position)?.occupant()?;
        Some((occupant, self.entity(occupant).kind()))
    }

    /// Number of gems still on the board.
    #[must_use]
    pub fn num_gems_left(&self) -> usize {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Gem && e.owner().is_some())
            .count()
    }

    /// Positions of the gems still on the board, in row-major order.
    #[must_use]
    pub fn gem_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|c| {
                c.occupant()
                    .is_some_and(|e| self.entity(e).kind() == EntityKind::Gem)
            })
            .map(Cell::position)
            .collect()
    }

    fn expect_cell(&self, position: Position) -> CellId {
        match self.cell_id(position) {
            Some(id) => id,
            None => panic!("Position {} is outside the {}x{} board", position, self.rows, self.cols),
        }
    }
}
