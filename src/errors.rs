/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

use crate::Square;

/// Reasons a [`Board::place`](crate::Board::place) call can fail.
///
/// Placement failures are always recoverable; the board is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The target lookup missed the board entirely.
    #[error("the target is not a square on the board")]
    NoSuchSquare,

    /// The target square already holds a piece.
    #[error("there is already a piece on {0}")]
    Occupied(Square),
}

/// Reasons a move, capture, or removal can fail.
///
/// Every variant is recoverable and its message names the rule that was
/// violated; a failed operation leaves the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The acting piece has no current position.
    #[error("that piece is not on the board")]
    OffBoard,

    /// A plain move may not end on an occupied square, friend or foe.
    #[error("the target square {0} is not empty")]
    TargetOccupied(Square),

    /// A capture needs a victim on the target square.
    #[error("there is no piece to capture on {0}")]
    NothingToCapture(Square),

    /// A capture may not take a piece of the capturer's own color.
    #[error("a piece cannot capture a piece of its own color")]
    FriendlyCapture,

    /// Moves must end somewhere other than where they started.
    #[error("a moving piece must end on a different square")]
    SameSquare,

    #[error("a knight must move two squares straight and one square perpendicular")]
    KnightShape,

    #[error("a rook must move entirely vertically or entirely horizontally")]
    RookShape,

    /// A sliding piece ran into an occupied square along its path.
    #[error("the path is blocked by a piece on {0}")]
    PathBlocked(Square),

    #[error("a pawn may only move two squares on its first move")]
    PawnDoubleStep,

    #[error("a pawn may not change file except when capturing")]
    PawnFileChange,

    #[error("a pawn may never move more than two squares at a time")]
    PawnTooFar,

    #[error("a pawn may not move backward")]
    PawnBackward,

    #[error("a pawn may not jump over another piece")]
    PawnJump,

    #[error("a pawn may only capture diagonally")]
    PawnCapturesDiagonally,

    #[error("a pawn must capture one square diagonally ahead")]
    PawnCaptureShape,
}
