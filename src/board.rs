/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use log::trace;

use crate::{
    rules, Color, File, MoveError, Piece, PieceId, PieceKind, PlacementError, Rank, Square,
};

/// An `8x8` chess board holding the pieces in play.
///
/// The board stores square occupancy in a 64-slot mailbox indexed by
/// [`Square`] and owns every [`Piece`] it has issued a [`PieceId`] for,
/// on-board or off. All four state mutators ([`Board::place`],
/// [`Board::move_piece`], [`Board::capture`], [`Board::remove`]) keep the
/// mailbox and piece positions mutually consistent, and a failed call
/// leaves the board exactly as it was.
///
/// # Example
/// ```
/// # use newt::{Board, Color, PieceKind, Square};
/// let mut board = Board::new();
/// let knight = board.add_piece(Color::White, PieceKind::Knight);
/// board.place(knight, Square::B1)?;
///
/// board.move_piece(knight, Square::C3)?;
/// assert_eq!(board.piece(knight).position(), Some(Square::C3));
/// assert_eq!(board.piece_at(Square::B1), None);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    /// Which piece, if any, occupies each square.
    mailbox: [Option<PieceId>; Square::COUNT],

    /// Every piece this board has issued a handle for, indexed by [`PieceId`].
    pieces: Vec<Piece>,
}

impl Board {
    /// Creates a new [`Board`] with all 64 squares empty and no pieces registered.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            mailbox: [None; Square::COUNT],
            pieces: Vec::new(),
        }
    }

    /// Looks up the [`Square`] with the given file letter and 1-based rank number.
    ///
    /// Returns [`None`] if the coordinates fall outside the board; the
    /// result can be handed straight to [`Board::place`].
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Square};
    /// let board = Board::new();
    /// assert_eq!(board.get('e', 4), Some(Square::E4));
    /// assert_eq!(board.get('i', 4), None);
    /// assert_eq!(board.get('a', 0), None);
    /// assert_eq!(board.get('a', 9), None);
    /// ```
    #[inline(always)]
    pub fn get(&self, file: char, rank: u8) -> Option<Square> {
        let file = File::from_char(file).ok()?;
        let rank = rank.checked_sub(1).and_then(|r| Rank::new(r).ok())?;
        Some(Square::new(file, rank))
    }

    /// Registers a new, off-board piece and returns its handle.
    ///
    /// The piece starts with no position and `has_moved == false`; use
    /// [`Board::place`] to put it on a square.
    #[inline(always)]
    pub fn add_piece(&mut self, color: Color, kind: PieceKind) -> PieceId {
        let id = PieceId(self.pieces.len() as u32);
        self.pieces.push(Piece::new(color, kind));
        id
    }

    /// Fetches the [`Piece`] behind a handle.
    ///
    /// # Panics
    /// If `id` was issued by a different board.
    #[inline(always)]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Which piece, if any, occupies the given [`Square`].
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<PieceId> {
        self.mailbox[square]
    }

    /// Returns an iterator over every on-board piece and the square it occupies.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color, PieceKind, Square};
    /// let mut board = Board::new();
    /// let rook = board.add_piece(Color::White, PieceKind::Rook);
    /// board.place(rook, Square::A1)?;
    ///
    /// assert_eq!(board.pieces().collect::<Vec<_>>(), vec![(Square::A1, rook)]);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[inline(always)]
    pub fn pieces(&self) -> impl Iterator<Item = (Square, PieceId)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|id| (square, id)))
    }

    /// Places a piece onto an empty square, without movement-rule checks.
    ///
    /// Placement is setup, not gameplay: it does not set the piece's
    /// `has_moved` flag, and it relocates a piece that is already on the
    /// board, clearing its old square. The target may be given as a bare
    /// [`Square`] or as the `Option` returned by [`Board::get`]; a missed
    /// lookup fails with [`PlacementError::NoSuchSquare`].
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color, PieceKind, PlacementError, Square};
    /// let mut board = Board::new();
    /// let pawn = board.add_piece(Color::White, PieceKind::Pawn);
    /// board.place(pawn, board.get('e', 2))?;
    /// assert!(!board.piece(pawn).has_moved());
    ///
    /// assert_eq!(
    ///     board.place(pawn, board.get('z', 9)),
    ///     Err(PlacementError::NoSuchSquare),
    /// );
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn place(
        &mut self,
        id: PieceId,
        target: impl Into<Option<Square>>,
    ) -> Result<(), PlacementError> {
        let Some(target) = target.into() else {
            return Err(PlacementError::NoSuchSquare);
        };

        if self.piece_at(target).is_some() {
            return Err(PlacementError::Occupied(target));
        }

        if let Some(previous) = self.pieces[id.index()].position {
            self.mailbox[previous] = None;
        }
        self.mailbox[target] = Some(id);
        self.pieces[id.index()].position = Some(target);

        trace!("placed {} on {target}", self.piece(id).name());
        Ok(())
    }

    /// Moves a piece to an empty square, validating its movement shape first.
    ///
    /// The shape rules of the piece's kind are checked before anything
    /// else (including path obstruction for the rook and the pawn's
    /// first-move special cases); only then is the relocation applied. A
    /// plain move never captures: any occupant of the target, friend or
    /// foe, fails the move with [`MoveError::TargetOccupied`]. On success
    /// the piece's `has_moved` flag is set.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color, MoveError, PieceKind, Square};
    /// let mut board = Board::new();
    /// let rook = board.add_piece(Color::White, PieceKind::Rook);
    /// board.place(rook, Square::A1)?;
    ///
    /// board.move_piece(rook, Square::A8)?;
    /// assert_eq!(board.move_piece(rook, Square::B1), Err(MoveError::RookShape));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn move_piece(&mut self, id: PieceId, target: Square) -> Result<(), MoveError> {
        let piece = self.piece(id);
        let from = piece.position().ok_or(MoveError::OffBoard)?;
        rules::legal_move(self, piece, from, target)?;
        self.relocate(id, from, target)
    }

    /// Captures the piece on `target`, validating the capturer's movement shape first.
    ///
    /// The victim must exist and belong to the opponent; it is detached
    /// from the board (its position cleared) and the capturer takes its
    /// square. On success the capturer's `has_moved` flag is set.
    ///
    /// # Example
    /// ```
    /// # use newt::{Board, Color, PieceKind, Square};
    /// let mut board = Board::new();
    /// let knight = board.add_piece(Color::White, PieceKind::Knight);
    /// let pawn = board.add_piece(Color::Black, PieceKind::Pawn);
    /// board.place(knight, Square::B1)?;
    /// board.place(pawn, Square::C3)?;
    ///
    /// board.capture(knight, Square::C3)?;
    /// assert_eq!(board.piece(pawn).position(), None);
    /// assert_eq!(board.piece_at(Square::C3), Some(knight));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn capture(&mut self, id: PieceId, target: Square) -> Result<(), MoveError> {
        let piece = self.piece(id);
        let from = piece.position().ok_or(MoveError::OffBoard)?;
        rules::legal_capture(self, piece, from, target)?;
        self.seize(id, from, target)
    }

    /// Takes a piece off the board.
    ///
    /// Its square is cleared and its position becomes `None`; the handle
    /// stays valid and the piece can be placed again later.
    pub fn remove(&mut self, id: PieceId) -> Result<(), MoveError> {
        let from = self.pieces[id.index()].position.ok_or(MoveError::OffBoard)?;

        self.mailbox[from] = None;
        self.pieces[id.index()].position = None;

        trace!("removed {} from {from}", self.piece(id).name());
        Ok(())
    }

    /// Relocation shared by every kind's move: occupancy checks only, no shape rules.
    fn relocate(&mut self, id: PieceId, from: Square, target: Square) -> Result<(), MoveError> {
        if self.piece_at(target).is_some() {
            return Err(MoveError::TargetOccupied(target));
        }

        self.mailbox[from] = None;
        self.mailbox[target] = Some(id);
        let piece = &mut self.pieces[id.index()];
        piece.position = Some(target);
        piece.has_moved = true;

        trace!("{} moved {from} -> {target}", self.piece(id).name());
        Ok(())
    }

    /// Seizure shared by every kind's capture: victim checks only, no shape rules.
    fn seize(&mut self, id: PieceId, from: Square, target: Square) -> Result<(), MoveError> {
        let victim = self
            .piece_at(target)
            .ok_or(MoveError::NothingToCapture(target))?;
        if self.pieces[victim.index()].color() == self.pieces[id.index()].color() {
            return Err(MoveError::FriendlyCapture);
        }

        self.pieces[victim.index()].position = None;
        self.mailbox[from] = None;
        self.mailbox[target] = Some(id);
        let piece = &mut self.pieces[id.index()];
        piece.position = Some(target);
        piece.has_moved = true;

        trace!(
            "{} captured {} on {target}",
            self.piece(id).name(),
            self.piece(victim).name()
        );
        Ok(())
    }
}

impl Default for Board {
    /// Same as [`Board::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the board as an `8x8` diagram, rank 8 at the top, with
    /// UCI piece characters and `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}|")?;
            for file in File::iter() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(id) => write!(f, " {}", self.piece(id))?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f)?;
        }
        writeln!(f, " +----------------")?;
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every occupied mailbox slot points at a piece whose position points
    /// straight back, and every on-board piece is seated where it thinks
    /// it is.
    fn assert_consistent(board: &Board) {
        for square in Square::iter() {
            if let Some(id) = board.piece_at(square) {
                assert_eq!(board.piece(id).position(), Some(square));
            }
        }
        for (i, piece) in board.pieces.iter().enumerate() {
            if let Some(square) = piece.position() {
                assert_eq!(board.piece_at(square), Some(PieceId(i as u32)));
            }
        }
    }

    #[test]
    fn test_get_covers_the_board() {
        let board = Board::new();
        for file in 'a'..='h' {
            for rank in 1..=8 {
                let square = board.get(file, rank).unwrap();
                assert_eq!(square.name(), format!("{file}{rank}"));
                assert_eq!(board.piece_at(square), None);
            }
        }
    }

    #[test]
    fn test_place_rejects_occupied_and_missing_squares() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::White, PieceKind::Rook);
        let pawn = board.add_piece(Color::White, PieceKind::Pawn);

        board.place(rook, Square::A1).unwrap();
        assert_eq!(
            board.place(pawn, Square::A1),
            Err(PlacementError::Occupied(Square::A1))
        );
        assert_eq!(
            board.place(pawn, board.get('j', 1)),
            Err(PlacementError::NoSuchSquare)
        );
        assert_eq!(board.piece(pawn).position(), None);
        assert_consistent(&board);
    }

    #[test]
    fn test_place_relocates_without_setting_has_moved() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::White, PieceKind::Rook);

        board.place(rook, Square::A1).unwrap();
        board.place(rook, Square::D4).unwrap();

        assert_eq!(board.piece_at(Square::A1), None);
        assert_eq!(board.piece_at(Square::D4), Some(rook));
        assert!(!board.piece(rook).has_moved());
        assert_consistent(&board);
    }

    #[test]
    fn test_remove_detaches_the_piece() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::Black, PieceKind::Rook);
        board.place(rook, Square::H8).unwrap();

        board.remove(rook).unwrap();
        assert_eq!(board.piece_at(Square::H8), None);
        assert_eq!(board.piece(rook).position(), None);

        // A second removal has nothing to detach
        assert_eq!(board.remove(rook), Err(MoveError::OffBoard));
        assert_consistent(&board);
    }

    #[test]
    fn test_moves_require_a_position() {
        let mut board = Board::new();
        let knight = board.add_piece(Color::White, PieceKind::Knight);

        assert_eq!(
            board.move_piece(knight, Square::C3),
            Err(MoveError::OffBoard)
        );
        assert_eq!(board.capture(knight, Square::C3), Err(MoveError::OffBoard));
    }

    #[test]
    fn test_failed_operations_leave_no_trace() {
        let mut board = Board::new();
        let rook = board.add_piece(Color::White, PieceKind::Rook);
        let blocker = board.add_piece(Color::Black, PieceKind::Pawn);
        board.place(rook, Square::A1).unwrap();
        board.place(blocker, Square::A4).unwrap();

        let before = board.clone();
        assert!(board.move_piece(rook, Square::A8).is_err());
        assert!(board.move_piece(rook, Square::B2).is_err());
        assert!(board.capture(rook, Square::A8).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_display_diagram() {
        let mut board = Board::new();
        let knight = board.add_piece(Color::White, PieceKind::Knight);
        let pawn = board.add_piece(Color::Black, PieceKind::Pawn);
        board.place(knight, Square::B1).unwrap();
        board.place(pawn, Square::E7).unwrap();

        let diagram = board.to_string();
        assert!(diagram.contains("7| . . . . p . . ."));
        assert!(diagram.contains("1| . N . . . . . ."));
        assert!(diagram.ends_with("   a b c d e f g h"));
    }
}
