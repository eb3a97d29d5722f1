//! Core types and game logic for Reversi (Othello), human against machine.
//!
//! A [`GameState`] is an immutable snapshot of the board. Every move yields a
//! fresh state and leaves its predecessor untouched, so callers are free to
//! keep earlier snapshots around (for undo) or share them between threads.
//!
//! Rows and columns are 1-indexed throughout the public API.

use std::fmt;

use smallvec::SmallVec;
use tracing::trace;

/// Side length of the board. The evaluator's weight table is only defined
/// for this size.
pub const SIZE: usize = 8;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GameError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfRange { row: usize, col: usize },

    #[error("not your turn: the {expected} is to move")]
    InvalidTurn { expected: Player },

    #[error("the game is already over")]
    GameOver,

    #[error("the game is not over yet")]
    GameNotOver,

    #[error("level must be a positive search depth, got {0}")]
    InvalidLevel(i64),

    #[error("illegal move at ({row}, {col})")]
    IllegalMove { row: usize, col: usize },

    #[error("invalid board text: {reason}")]
    InvalidBoardText { reason: String },
}

impl GameError {
    /// Illegal moves are an expected outcome of user input, unlike the other
    /// variants which signal a broken caller contract.
    pub fn is_illegal_move(&self) -> bool {
        matches!(self, GameError::IllegalMove { .. })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Player {
    Human,
    Machine,
}

impl Player {
    /// Get the other player
    pub fn inverse(&self) -> Player {
        match self {
            Player::Human => Player::Machine,
            Player::Machine => Player::Human,
        }
    }

    /// Marker used in the canonical board text
    pub fn symbol(&self) -> char {
        match self {
            Player::Human => 'X',
            Player::Machine => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Option<Player>> {
        match symbol {
            '.' => Some(None),
            'X' => Some(Some(Player::Human)),
            'O' => Some(Some(Player::Machine)),
            _ => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => f.write_str("human"),
            Player::Machine => f.write_str("machine"),
        }
    }
}

/// The eight compass steps used to scan lines from a cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Step as `(column delta, row delta)`. Rows grow southwards.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// The neighbouring cell in this direction, or `None` when it falls off
    /// the board.
    pub fn step(self, row: usize, col: usize) -> Option<(usize, usize)> {
        let (dc, dr) = self.delta();
        let r = row as isize + dr;
        let c = col as isize + dc;
        let bounds = 1..=SIZE as isize;
        if bounds.contains(&r) && bounds.contains(&c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }
}

/// Search depth used for machine moves.
///
/// Always positive. Carried explicitly by whoever asks for a machine move
/// instead of living in shared global state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Level(usize);

impl Level {
    pub const DEFAULT: Level = Level(3);

    pub fn new(level: i64) -> Result<Self> {
        if level <= 0 {
            return Err(GameError::InvalidLevel(level));
        }
        usize::try_from(level)
            .map(Level)
            .map_err(|_| GameError::InvalidLevel(level))
    }

    pub fn depth(&self) -> usize {
        self.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::DEFAULT
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Grid = [[Option<Player>; SIZE]; SIZE];

/// Directions along which a move captures; at most eight.
type Captures = SmallVec<[Direction; 8]>;

/// Immutable snapshot of a game.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct GameState {
    cells: Grid,
    first_player: Player,
    next_player: Player,
    human_tiles: u8,
    machine_tiles: u8,
    game_over: bool,
}

/// Start a game with the fixed four-stone opening for `first_player`.
pub fn new_game(first_player: Player) -> GameState {
    GameState::new(first_player)
}

impl GameState {
    /// Create a new game with the standard diagonal opening.
    /// The opener owns the two centre cells on the anti-diagonal:
    /// - (4,4) and (5,5) belong to the other player
    /// - (4,5) and (5,4) belong to `first_player`
    pub fn new(first_player: Player) -> Self {
        let mut cells = [[None; SIZE]; SIZE];
        let median = SIZE / 2 - 1;

        cells[median][median] = Some(first_player.inverse());
        cells[median + 1][median] = Some(first_player);
        cells[median][median + 1] = Some(first_player);
        cells[median + 1][median + 1] = Some(first_player.inverse());

        GameState {
            cells,
            first_player,
            next_player: first_player,
            human_tiles: 2,
            machine_tiles: 2,
            game_over: false,
        }
    }

    /// Parse the canonical text rendering (see [`fmt::Display`]) into a state.
    ///
    /// Tile counts are recomputed from the grid, which must hold at least one
    /// stone. If `next_player` has no legal
    /// move the turn is resolved exactly as after a move: it passes to the
    /// other player, or the game is over when neither can move.
    pub fn from_text(text: &str, first_player: Player, next_player: Player) -> Result<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != SIZE {
            return Err(GameError::InvalidBoardText {
                reason: format!("expected {} rows, got {}", SIZE, rows.len()),
            });
        }

        let mut cells = [[None; SIZE]; SIZE];
        for (r, line) in rows.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != SIZE {
                return Err(GameError::InvalidBoardText {
                    reason: format!("row {} has {} cells, expected {}", r + 1, tokens.len(), SIZE),
                });
            }
            for (c, token) in tokens.iter().enumerate() {
                let mut chars = token.chars();
                let slot = match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Player::from_symbol(symbol),
                    _ => None,
                };
                cells[r][c] = slot.ok_or_else(|| GameError::InvalidBoardText {
                    reason: format!("unexpected cell '{}' at ({}, {})", token, r + 1, c + 1),
                })?;
            }
        }

        let mut state = GameState {
            cells,
            first_player,
            next_player,
            human_tiles: 0,
            machine_tiles: 0,
            game_over: false,
        };
        state.update_tile_counts();
        if state.occupied_count() == 0 {
            return Err(GameError::InvalidBoardText {
                reason: "board holds no stones".to_string(),
            });
        }
        state.resolve_turn(next_player);
        Ok(state)
    }

    /// The player who opened this game
    pub fn first_player(&self) -> Player {
        self.first_player
    }

    /// The player entitled to move. Meaningless once the game is over.
    pub fn next_player(&self) -> Player {
        self.next_player
    }

    /// True iff neither player has a legal move left
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Contents of a cell, `None` when empty
    pub fn slot(&self, row: usize, col: usize) -> Result<Option<Player>> {
        check_range(row, col)?;
        Ok(self.cell(row, col))
    }

    pub fn tile_count(&self, player: Player) -> usize {
        match player {
            Player::Human => self.human_tiles as usize,
            Player::Machine => self.machine_tiles as usize,
        }
    }

    pub fn number_of_human_tiles(&self) -> usize {
        self.tile_count(Player::Human)
    }

    pub fn number_of_machine_tiles(&self) -> usize {
        self.tile_count(Player::Machine)
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.number_of_human_tiles() + self.number_of_machine_tiles()
    }

    /// Winner of a finished game; `Ok(None)` is a tie.
    pub fn winner(&self) -> Result<Option<Player>> {
        if !self.game_over {
            return Err(GameError::GameNotOver);
        }

        let (human, machine) = (self.number_of_human_tiles(), self.number_of_machine_tiles());
        Ok(if human > machine {
            Some(Player::Human)
        } else if machine > human {
            Some(Player::Machine)
        } else {
            None
        })
    }

    /// Whether `player` could legally place a stone at (row, col).
    /// Out-of-range positions are simply not legal.
    pub fn is_legal_move(&self, row: usize, col: usize, player: Player) -> bool {
        check_range(row, col).is_ok() && !self.capturing_directions(row, col, player).is_empty()
    }

    /// Count the cells where `player` could move on this grid
    pub fn number_of_legal_moves(&self, player: Player) -> usize {
        self.positions()
            .filter(|&(row, col)| !self.capturing_directions(row, col, player).is_empty())
            .count()
    }

    /// Legal target cells for `player` in row-major order
    pub fn legal_moves(&self, player: Player) -> Vec<(usize, usize)> {
        self.positions()
            .filter(|&(row, col)| !self.capturing_directions(row, col, player).is_empty())
            .collect()
    }

    /// Play a human move at (row, col).
    ///
    /// Fails with [`GameError::InvalidTurn`] when the machine is to move and
    /// with [`GameError::IllegalMove`] when the cell is occupied or captures
    /// nothing. `self` is never modified.
    pub fn apply_move(&self, row: usize, col: usize) -> Result<GameState> {
        check_range(row, col)?;
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.next_player != Player::Human {
            return Err(GameError::InvalidTurn {
                expected: self.next_player,
            });
        }
        self.move_for_next_player(row, col)
    }

    /// Play a move at (row, col) for whichever player is entitled to move,
    /// forced passes included. Used by the search to expand nodes.
    pub fn move_for_next_player(&self, row: usize, col: usize) -> Result<GameState> {
        check_range(row, col)?;
        if self.game_over {
            return Err(GameError::GameOver);
        }

        let directions = self.capturing_directions(row, col, self.next_player);
        if directions.is_empty() {
            return Err(GameError::IllegalMove { row, col });
        }
        Ok(self.execute_move(row, col, &directions))
    }

    /// True when `mover` just moved and the opponent had to pass.
    pub fn is_forced_pass(&self, mover: Player) -> bool {
        !self.game_over && self.next_player == mover
    }

    /// Empty cells among the up to eight neighbours of (row, col)
    pub fn empty_neighbours(&self, row: usize, col: usize) -> usize {
        Direction::ALL
            .iter()
            .filter_map(|direction| direction.step(row, col))
            .filter(|&(r, c)| self.cell(r, c).is_none())
            .count()
    }

    /// Every occupied cell as `(row, col, owner)` in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Player)> + '_ {
        self.positions()
            .filter_map(move |(row, col)| self.cell(row, col).map(|player| (row, col, player)))
    }

    /// Get board as flat array [0=empty, 1=human, 2=machine]
    /// Array is indexed as: index = (row - 1) * 8 + (col - 1)
    pub fn get_state(&self) -> [u8; SIZE * SIZE] {
        let mut state = [0u8; SIZE * SIZE];

        for (index, (row, col)) in self.positions().enumerate() {
            state[index] = match self.cell(row, col) {
                None => 0,
                Some(Player::Human) => 1,
                Some(Player::Machine) => 2,
            };
        }

        state
    }

    fn cell(&self, row: usize, col: usize) -> Option<Player> {
        self.cells[row - 1][col - 1]
    }

    fn positions(&self) -> impl Iterator<Item = (usize, usize)> {
        (1..=SIZE).flat_map(|row| (1..=SIZE).map(move |col| (row, col)))
    }

    /// Directions from an empty (row, col) in which `player` encloses at least
    /// one opponent stone with one of its own, still on the board.
    fn capturing_directions(&self, row: usize, col: usize, player: Player) -> Captures {
        let mut captures = Captures::new();
        if self.cell(row, col).is_some() {
            return captures;
        }

        for direction in Direction::ALL {
            let mut enclosed = 0;
            let mut pos = direction.step(row, col);

            while let Some((r, c)) = pos {
                match self.cell(r, c) {
                    Some(owner) if owner == player => {
                        if enclosed > 0 {
                            captures.push(direction);
                        }
                        break;
                    }
                    Some(_) => {
                        enclosed += 1;
                        pos = direction.step(r, c);
                    }
                    None => break,
                }
            }
        }

        captures
    }

    /// Copy the state, place the stone, flip every capturing line and
    /// resolve whose turn comes next.
    fn execute_move(&self, row: usize, col: usize, directions: &[Direction]) -> GameState {
        debug_assert!(!directions.is_empty());

        let mover = self.next_player;
        let mut next = self.clone();
        next.cells[row - 1][col - 1] = Some(mover);

        let mut flipped = 0u8;
        for &direction in directions {
            let mut pos = direction.step(row, col);
            while let Some((r, c)) = pos {
                if next.cell(r, c) != Some(mover.inverse()) {
                    break;
                }
                next.cells[r - 1][c - 1] = Some(mover);
                flipped += 1;
                pos = direction.step(r, c);
            }
        }

        match mover {
            Player::Human => {
                next.human_tiles += flipped + 1;
                next.machine_tiles -= flipped;
            }
            Player::Machine => {
                next.machine_tiles += flipped + 1;
                next.human_tiles -= flipped;
            }
        }

        next.resolve_turn(mover.inverse());
        next
    }

    /// Hand the turn to `candidate` unless it cannot move. In that case the
    /// turn goes back to the other player, or the game ends if neither can
    /// move. Always recomputed from the current grid.
    fn resolve_turn(&mut self, candidate: Player) {
        self.next_player = candidate;
        if self.number_of_legal_moves(candidate) > 0 {
            return;
        }

        if self.number_of_legal_moves(candidate.inverse()) == 0 {
            trace!(human = self.human_tiles, machine = self.machine_tiles, "game over");
            self.game_over = true;
        } else {
            trace!(skipped = %candidate, "forced pass");
            self.next_player = candidate.inverse();
        }
    }

    fn update_tile_counts(&mut self) {
        let mut human = 0;
        let mut machine = 0;

        for row in self.cells.iter() {
            for cell in row.iter() {
                match cell {
                    Some(Player::Human) => human += 1,
                    Some(Player::Machine) => machine += 1,
                    None => {}
                }
            }
        }

        self.human_tiles = human;
        self.machine_tiles = machine;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::Human)
    }
}

/// Canonical rendering: one character per cell, `.` for empty, `X` for the
/// human and `O` for the machine, columns separated by a space.
impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    f.write_str(" ")?;
                }
                let symbol = cell.map_or('.', |player| player.symbol());
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}

fn check_range(row: usize, col: usize) -> Result<()> {
    let bounds = 1..=SIZE;
    if bounds.contains(&row) && bounds.contains(&col) {
        Ok(())
    } else {
        Err(GameError::OutOfRange { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASS_POSITION: &str = "
        X O . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        . . . . . . . .
        X O . . . . . .";

    #[test]
    fn test_new_game_initial_setup() {
        let state = new_game(Player::Human);

        assert_eq!(state.slot(4, 4), Ok(Some(Player::Machine)));
        assert_eq!(state.slot(4, 5), Ok(Some(Player::Human)));
        assert_eq!(state.slot(5, 4), Ok(Some(Player::Human)));
        assert_eq!(state.slot(5, 5), Ok(Some(Player::Machine)));

        // Everything else is empty
        assert_eq!(state.occupied().count(), 4);

        assert_eq!(state.number_of_human_tiles(), 2);
        assert_eq!(state.number_of_machine_tiles(), 2);
        assert_eq!(state.next_player(), Player::Human);
        assert_eq!(state.first_player(), Player::Human);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_new_game_machine_opens() {
        let state = new_game(Player::Machine);

        assert_eq!(state.slot(4, 5), Ok(Some(Player::Machine)));
        assert_eq!(state.slot(5, 4), Ok(Some(Player::Machine)));
        assert_eq!(state.slot(4, 4), Ok(Some(Player::Human)));
        assert_eq!(state.next_player(), Player::Machine);
    }

    #[test]
    fn test_player_inverse() {
        assert_eq!(Player::Human.inverse(), Player::Machine);
        assert_eq!(Player::Machine.inverse(), Player::Human);
    }

    #[test]
    fn test_direction_step_stays_on_board() {
        assert_eq!(Direction::South.step(3, 4), Some((4, 4)));
        assert_eq!(Direction::NorthWest.step(2, 2), Some((1, 1)));
        assert_eq!(Direction::North.step(1, 5), None);
        assert_eq!(Direction::East.step(4, 8), None);
        assert_eq!(Direction::SouthWest.step(8, 1), None);
    }

    #[test]
    fn test_legal_moves_initial_board() {
        let state = new_game(Player::Human);

        assert_eq!(state.legal_moves(Player::Human), vec![(3, 4), (4, 3), (5, 6), (6, 5)]);
        assert_eq!(state.number_of_legal_moves(Player::Machine), 4);

        // Occupied and isolated cells
        assert!(!state.is_legal_move(4, 4, Player::Human));
        assert!(!state.is_legal_move(1, 1, Player::Human));
        assert!(!state.is_legal_move(9, 1, Player::Human));
    }

    #[test]
    fn test_apply_move_captures_south() {
        let state = new_game(Player::Human);
        let next = state.apply_move(3, 4).unwrap();

        assert_eq!(next.slot(3, 4), Ok(Some(Player::Human)));
        assert_eq!(next.slot(4, 4), Ok(Some(Player::Human)));
        assert_eq!(next.number_of_human_tiles(), 4);
        assert_eq!(next.number_of_machine_tiles(), 1);
        assert_eq!(next.next_player(), Player::Machine);
    }

    #[test]
    fn test_apply_move_occupied_is_illegal() {
        let state = new_game(Player::Human);
        let err = state.apply_move(4, 4).unwrap_err();

        assert_eq!(err, GameError::IllegalMove { row: 4, col: 4 });
        assert!(err.is_illegal_move());
    }

    #[test]
    fn test_apply_move_without_capture_is_illegal() {
        let state = new_game(Player::Human);
        assert_eq!(state.apply_move(1, 1), Err(GameError::IllegalMove { row: 1, col: 1 }));
        assert_eq!(state, new_game(Player::Human));
    }

    #[test]
    fn test_apply_move_out_of_range() {
        let state = new_game(Player::Human);

        assert_eq!(state.apply_move(9, 1), Err(GameError::OutOfRange { row: 9, col: 1 }));
        assert_eq!(state.apply_move(0, 3), Err(GameError::OutOfRange { row: 0, col: 3 }));
        assert_eq!(state.slot(1, 9), Err(GameError::OutOfRange { row: 1, col: 9 }));
    }

    #[test]
    fn test_apply_move_on_machine_turn() {
        let state = new_game(Player::Machine);
        let err = state.apply_move(3, 4).unwrap_err();

        assert_eq!(err, GameError::InvalidTurn { expected: Player::Machine });
        assert!(!err.is_illegal_move());
    }

    #[test]
    fn test_move_for_next_player_acts_for_machine() {
        let state = new_game(Player::Machine);
        let next = state.move_for_next_player(3, 4).unwrap();

        assert_eq!(next.number_of_machine_tiles(), 4);
        assert_eq!(next.number_of_human_tiles(), 1);
        assert_eq!(next.next_player(), Player::Human);
    }

    #[test]
    fn test_apply_move_flips_several_lines() {
        let state = GameState::from_text(
            "
            . . . . . . . .
            . X . X . X . .
            . . O O O . . .
            . X O . O X . .
            . . O O O . . .
            . X . X . X . .
            . . . . . . . .
            . . . . . . . .",
            Player::Human,
            Player::Human,
        )
        .unwrap();

        let next = state.apply_move(4, 4).unwrap();

        // All eight neighbours were enclosed
        assert_eq!(next.number_of_machine_tiles(), 0);
        assert_eq!(next.number_of_human_tiles(), 17);
        assert!(next.is_game_over());
    }

    #[test]
    fn test_forced_pass_returns_turn_to_mover() {
        let state = GameState::from_text(PASS_POSITION, Player::Human, Player::Human).unwrap();
        let next = state.apply_move(1, 3).unwrap();

        assert_eq!(next.number_of_legal_moves(Player::Machine), 0);
        assert_eq!(next.number_of_legal_moves(Player::Human), 1);
        assert_eq!(next.next_player(), Player::Human);
        assert!(next.is_forced_pass(Player::Human));
        assert!(!next.is_game_over());
    }

    #[test]
    fn test_game_over_when_nobody_can_move() {
        let state = GameState::from_text(PASS_POSITION, Player::Human, Player::Human).unwrap();
        let end = state.apply_move(1, 3).unwrap().apply_move(8, 3).unwrap();

        assert!(end.is_game_over());
        assert_eq!(end.number_of_machine_tiles(), 0);
        assert_eq!(end.winner(), Ok(Some(Player::Human)));
        assert_eq!(end.apply_move(2, 2), Err(GameError::GameOver));
    }

    #[test]
    fn test_winner_tie() {
        let text = (0..SIZE)
            .map(|r| if r < SIZE / 2 { "X X X X X X X X" } else { "O O O O O O O O" })
            .collect::<Vec<_>>()
            .join("\n");
        let state = GameState::from_text(&text, Player::Human, Player::Human).unwrap();

        assert!(state.is_game_over());
        assert_eq!(state.number_of_human_tiles(), 32);
        assert_eq!(state.number_of_machine_tiles(), 32);
        assert_eq!(state.winner(), Ok(None));
    }

    #[test]
    fn test_winner_game_not_over() {
        let state = new_game(Player::Human);
        assert_eq!(state.winner(), Err(GameError::GameNotOver));
    }

    #[test]
    fn test_from_text_resolves_pass() {
        let state = GameState::from_text(PASS_POSITION, Player::Human, Player::Machine).unwrap();
        assert_eq!(state.next_player(), Player::Human);
        assert!(!state.is_game_over());
    }

    #[test]
    fn test_from_text_rejects_garbage() {
        assert!(matches!(
            GameState::from_text(". . .", Player::Human, Player::Human),
            Err(GameError::InvalidBoardText { .. })
        ));

        let bad_cell = new_game(Player::Human).to_string().replacen('.', "Z", 1);
        assert!(matches!(
            GameState::from_text(&bad_cell, Player::Human, Player::Human),
            Err(GameError::InvalidBoardText { .. })
        ));

        let empty = vec![". . . . . . . ."; SIZE].join("\n");
        assert_eq!(
            GameState::from_text(&empty, Player::Human, Player::Human),
            Err(GameError::InvalidBoardText {
                reason: "board holds no stones".to_string()
            })
        );
    }

    #[test]
    fn test_display_roundtrips_through_from_text() {
        let state = new_game(Player::Human).apply_move(3, 4).unwrap();
        let text = state.to_string();

        assert_eq!(text.lines().count(), SIZE);
        assert_eq!(text.lines().nth(2), Some(". . . X . . . ."));
        assert_eq!(text.lines().nth(4), Some(". . . X O . . ."));

        let parsed = GameState::from_text(&text, Player::Human, Player::Machine).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_empty_neighbours() {
        let state = new_game(Player::Human);

        assert_eq!(state.empty_neighbours(4, 4), 5);
        assert_eq!(state.empty_neighbours(1, 1), 3);
        assert_eq!(state.empty_neighbours(3, 3), 7);
    }

    #[test]
    fn test_get_state() {
        let state = new_game(Player::Human);
        let flat = state.get_state();

        assert_eq!(flat[3 * 8 + 3], 2);
        assert_eq!(flat[3 * 8 + 4], 1);
        assert_eq!(flat[4 * 8 + 3], 1);
        assert_eq!(flat[4 * 8 + 4], 2);
        assert_eq!(flat.iter().filter(|&&v| v == 0).count(), 60);
    }

    #[test]
    fn test_level_validation() {
        assert_eq!(Level::new(0), Err(GameError::InvalidLevel(0)));
        assert_eq!(Level::new(-2), Err(GameError::InvalidLevel(-2)));
        assert_eq!(Level::new(5).map(|level| level.depth()), Ok(5));
        assert_eq!(Level::default().depth(), 3);
    }
}
