//! Exhaustive Game-Tree Search
//!
//! Builds every reachable state up to a fixed depth and backs scores up with
//! an additive minimax rule:
//! - A node's value for the assessed player is its own static score plus the
//!   best child value when the assessed player moves at that node, or the
//!   worst child value when the opponent moves.
//! - Every ancestor's static score therefore contributes to the final value,
//!   not only the leaves'.
//! - No pruning. Children are generated in row-major order and ties keep the
//!   earliest child, so the search is fully deterministic.
//!
//! Forced passes need no special handling: a child is produced for whichever
//! player is entitled to move in its parent, and that may be the same player
//! twice in a row.

use reversi::{GameState, Player, SIZE};
use tracing::debug;

use crate::score::score;

/// A node owning one state and one child per legal move in it.
#[derive(Debug, Clone)]
pub struct SearchTree {
    root: GameState,
    children: Vec<SearchTree>,
}

impl SearchTree {
    /// Build the tree below `root`, `depth` plies deep.
    ///
    /// # Panics
    /// If `root` is terminal or `depth` is zero. Callers must check
    /// [`GameState::is_game_over`] before asking for a machine move.
    pub fn new(root: GameState, depth: usize) -> Self {
        assert!(!root.is_game_over(), "cannot search a finished game");
        assert!(depth > 0, "search depth must be positive");

        let tree = Self::build(root, depth);
        debug!(depth, nodes = tree.node_count(), "search tree built");
        tree
    }

    fn build(root: GameState, depth: usize) -> Self {
        let mut children = Vec::new();

        if depth > 0 && !root.is_game_over() {
            for row in 1..=SIZE {
                for col in 1..=SIZE {
                    if let Ok(child) = root.move_for_next_player(row, col) {
                        children.push(Self::build(child, depth - 1));
                    }
                }
            }
        }

        SearchTree { root, children }
    }

    pub fn root(&self) -> &GameState {
        &self.root
    }

    pub fn children(&self) -> &[SearchTree] {
        &self.children
    }

    /// Total number of nodes, root included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SearchTree::node_count).sum::<usize>()
    }

    /// Additive minimax value of this node for `player`.
    pub fn score(&self, player: Player) -> f64 {
        let own = score(&self.root, player);
        if self.children.is_empty() {
            return own;
        }

        let child_scores = self.children.iter().map(|child| child.score(player));
        let backed_up = if self.root.next_player() == player {
            child_scores.fold(f64::NEG_INFINITY, f64::max)
        } else {
            child_scores.fold(f64::INFINITY, f64::min)
        };

        own + backed_up
    }

    /// The child state with the highest value for the player to move at the
    /// root. The first child in row-major order wins ties.
    ///
    /// # Panics
    /// If the root has no children, which only happens for a terminal root.
    pub fn calculate_best_move(&self) -> GameState {
        let (best, best_score) = self.best_child();
        debug!(score = best_score, "best move selected");
        best.root.clone()
    }

    fn best_child(&self) -> (&SearchTree, f64) {
        assert!(
            !self.children.is_empty(),
            "no move to choose from: the root has no children"
        );

        let player = self.root.next_player();
        let mut best = &self.children[0];
        let mut best_score = best.score(player);

        for child in &self.children[1..] {
            let child_score = child.score(player);
            if child_score > best_score {
                best = child;
                best_score = child_score;
            }
        }

        (best, best_score)
    }
}
