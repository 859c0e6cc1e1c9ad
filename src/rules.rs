/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Board, Color, MoveError, Piece, PieceKind, Square};

/// Validates the shape of a plain move for the given piece, consulting
/// the board for path obstructions where the kind requires it.
///
/// Occupancy of the target square is not checked here; that belongs to
/// the relocation itself.
pub(crate) fn legal_move(
    board: &Board,
    piece: &Piece,
    from: Square,
    to: Square,
) -> Result<(), MoveError> {
    match piece.kind() {
        PieceKind::Pawn => pawn_move(board, piece, from, to),
        PieceKind::Knight => knight_shape(from, to),
        PieceKind::Rook => rook_line(board, from, to),
    }
}

/// Validates the shape of a capture for the given piece.
///
/// Knights and rooks capture exactly the way they move; pawns capture one
/// square diagonally ahead. Presence and color of the victim are not
/// checked here; that belongs to the seizure itself.
pub(crate) fn legal_capture(
    board: &Board,
    piece: &Piece,
    from: Square,
    to: Square,
) -> Result<(), MoveError> {
    match piece.kind() {
        PieceKind::Pawn => pawn_capture_shape(piece.color(), from, to),
        PieceKind::Knight => knight_shape(from, to),
        PieceKind::Rook => rook_line(board, from, to),
    }
}

/// Rank distance from `from` to `to`, positive toward rank 8.
#[inline(always)]
fn rank_delta(from: Square, to: Square) -> i8 {
    to.rank().inner() as i8 - from.rank().inner() as i8
}

/// Two squares straight and one square perpendicular, in any direction.
/// The knight jumps, so intermediate squares are never consulted.
fn knight_shape(from: Square, to: Square) -> Result<(), MoveError> {
    let files = from.distance_files(to);
    let ranks = from.distance_ranks(to);

    if (files == 1 && ranks == 2) || (files == 2 && ranks == 1) {
        Ok(())
    } else {
        Err(MoveError::KnightShape)
    }
}

/// A straight line along one file or one rank, with every square strictly
/// between origin and target unoccupied.
///
/// The target itself is excluded from the walk: for a move its occupancy
/// is rejected by the relocation, and for a capture it holds the victim.
fn rook_line(board: &Board, from: Square, to: Square) -> Result<(), MoveError> {
    if from == to {
        return Err(MoveError::SameSquare);
    }
    if from.file() != to.file() && from.rank() != to.rank() {
        return Err(MoveError::RookShape);
    }

    // One of the deltas is zero, so signum yields a unit step toward the target.
    let step_file = (to.file().inner() as i8 - from.file().inner() as i8).signum();
    let step_rank = (to.rank().inner() as i8 - from.rank().inner() as i8).signum();

    let mut square = from;
    while let Some(next) = square.offset(step_file, step_rank) {
        if next == to {
            break;
        }
        if board.piece_at(next).is_some() {
            return Err(MoveError::PathBlocked(next));
        }
        square = next;
    }

    Ok(())
}

/// The pawn's ordered decision chain for a plain move.
///
/// Multiplying the rank delta by the color's direction makes "ahead"
/// positive for either color. The single-step case performs no occupancy
/// probe of its own: there is nothing to jump over in one step, so the
/// relocation's check on the target is sufficient.
fn pawn_move(board: &Board, piece: &Piece, from: Square, to: Square) -> Result<(), MoveError> {
    let color = piece.color();

    if from.file() != to.file() {
        return Err(MoveError::PawnFileChange);
    }

    match rank_delta(from, to) * color.negation_multiplier() {
        2 if !piece.has_moved() => {
            // The square two ahead is the target itself
            if board.piece_at(to).is_some() {
                return Err(MoveError::PawnCapturesDiagonally);
            }
            if let Some(ahead) = from.forward_by(color, 1) {
                if board.piece_at(ahead).is_some() {
                    return Err(MoveError::PawnJump);
                }
            }
            Ok(())
        }
        2 => Err(MoveError::PawnDoubleStep),
        1 => Ok(()),
        0 => Err(MoveError::SameSquare),
        advance if advance > 2 => Err(MoveError::PawnTooFar),
        _ => Err(MoveError::PawnBackward),
    }
}

/// Exactly one square diagonally ahead, direction fixed by color.
fn pawn_capture_shape(color: Color, from: Square, to: Square) -> Result<(), MoveError> {
    let advance = rank_delta(from, to) * color.negation_multiplier();

    if advance == 1 && from.distance_files(to) == 1 {
        Ok(())
    } else {
        Err(MoveError::PawnCaptureShape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(color: Color, kind: PieceKind, square: Square) -> (Board, crate::PieceId) {
        let mut board = Board::new();
        let id = board.add_piece(color, kind);
        board.place(id, square).unwrap();
        (board, id)
    }

    #[test]
    fn test_knight_targets_from_b1() {
        let (board, knight) = board_with(Color::White, PieceKind::Knight, Square::B1);

        let legal: Vec<_> = Square::iter()
            .filter(|&to| legal_move(&board, board.piece(knight), Square::B1, to).is_ok())
            .collect();
        assert_eq!(legal, vec![Square::D2, Square::A3, Square::C3]);
    }

    #[test]
    fn test_rook_walk_excludes_the_target() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::White, PieceKind::Rook);
        let victim = board.add_piece(Color::Black, PieceKind::Pawn);
        board.place(rook, Square::A1).unwrap();
        board.place(victim, Square::A8).unwrap();

        // The occupied target is not an obstruction; it is the capture victim
        assert!(legal_move(&board, board.piece(rook), Square::A1, Square::A8).is_ok());
        assert!(legal_capture(&board, board.piece(rook), Square::A1, Square::A8).is_ok());
    }

    #[test]
    fn test_rook_walk_reports_the_first_blocker() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::White, PieceKind::Rook);
        let near = board.add_piece(Color::White, PieceKind::Pawn);
        let far = board.add_piece(Color::Black, PieceKind::Pawn);
        board.place(rook, Square::A1).unwrap();
        board.place(near, Square::C1).unwrap();
        board.place(far, Square::F1).unwrap();

        assert_eq!(
            legal_move(&board, board.piece(rook), Square::A1, Square::H1),
            Err(MoveError::PathBlocked(Square::C1))
        );
    }

    #[test]
    fn test_pawn_precedence_prefers_the_file_rule() {
        let (board, pawn) = board_with(Color::White, PieceKind::Pawn, Square::E2);

        // A sideways-and-far target is a file-change error, not a distance error
        assert_eq!(
            legal_move(&board, board.piece(pawn), Square::E2, Square::A6),
            Err(MoveError::PawnFileChange)
        );
        assert_eq!(
            legal_move(&board, board.piece(pawn), Square::E2, Square::E6),
            Err(MoveError::PawnTooFar)
        );
        assert_eq!(
            legal_move(&board, board.piece(pawn), Square::E2, Square::E2),
            Err(MoveError::SameSquare)
        );
        assert_eq!(
            legal_move(&board, board.piece(pawn), Square::E2, Square::E1),
            Err(MoveError::PawnBackward)
        );
    }

    #[test]
    fn test_pawn_capture_shape_is_direction_relative() {
        let (board, white) = board_with(Color::White, PieceKind::Pawn, Square::E4);
        assert!(legal_capture(&board, board.piece(white), Square::E4, Square::D5).is_ok());
        assert!(legal_capture(&board, board.piece(white), Square::E4, Square::F5).is_ok());
        assert_eq!(
            legal_capture(&board, board.piece(white), Square::E4, Square::D3),
            Err(MoveError::PawnCaptureShape)
        );
        assert_eq!(
            legal_capture(&board, board.piece(white), Square::E4, Square::E5),
            Err(MoveError::PawnCaptureShape)
        );

        let (board, black) = board_with(Color::Black, PieceKind::Pawn, Square::E5);
        assert!(legal_capture(&board, board.piece(black), Square::E5, Square::D4).is_ok());
        assert_eq!(
            legal_capture(&board, board.piece(black), Square::E5, Square::D6),
            Err(MoveError::PawnCaptureShape)
        );
    }
}
