/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A move-legality and board-mutation core for chess.
//!
//! The crate validates a requested move or capture against the moving
//! piece's movement shape (pawn, knight, or rook), then applies it while
//! keeping square occupancy and piece positions mutually consistent.
//! Turn order, check detection, and notation are left to the caller.
//!
//! # Example
//! ```
//! use newt::{Board, Color, PieceKind};
//!
//! let mut board = Board::new();
//! let pawn = board.add_piece(Color::White, PieceKind::Pawn);
//! board.place(pawn, board.get('e', 2))?;
//!
//! board.move_piece(pawn, board.get('e', 4).unwrap())?;
//! assert!(board.piece(pawn).has_moved());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Board state: square occupancy, the piece registry, and the four state mutators.
mod board;

/// Recoverable failures reported by board operations.
mod errors;

/// Piece colors, kinds, and per-piece state.
mod piece;

/// Per-kind move and capture legality predicates.
mod rules;

/// The 8x8 grid: files, ranks, squares, and square colors.
mod square;

pub use board::*;
pub use errors::*;
pub use piece::*;
pub use square::*;
