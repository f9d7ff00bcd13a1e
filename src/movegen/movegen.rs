use crate::bitboard::{BitBoard, EMPTY};
use crate::board::Board;
use crate::chess_move::ChessMove;
use crate::movegen::piece_type::*;
use crate::side::Side;
use crate::square::{Square, NUM_SQUARES};
use arrayvec::ArrayVec;
use std::iter::ExactSizeIterator;

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SquareAndBitBoard {
    square: Square,
    bitboard: BitBoard,
}

impl SquareAndBitBoard {
    pub fn new(sq: Square, bb: BitBoard) -> SquareAndBitBoard {
        SquareAndBitBoard {
            square: sq,
            bitboard: bb,
        }
    }
}

/// One entry per piece that can move; there is never more than one piece per square.
pub type MoveList = ArrayVec<SquareAndBitBoard, NUM_SQUARES>;

/// An incremental move generator for one side.
///
/// Every move it yields has already passed the king-safety check, so any of them can be handed
/// to `Board::move_to`. A client that wants a random legal move can collect the iterator and
/// pick one.
///
/// ```
/// use redblue_chess::{Board, MoveGen, Side};
///
/// let board = Board::default();
/// let mut movegen = MoveGen::new_legal(&board, Side::Blue);
///
/// // 16 pawn moves and 4 knight moves
/// assert_eq!(movegen.len(), 20);
///
/// // iterate only moves that land on red pieces
/// movegen.set_iterator_mask(board.occupied_by(Side::Red));
/// assert_eq!(movegen.count(), 0);
/// ```
pub struct MoveGen {
    moves: MoveList,
    iterator_mask: BitBoard,
    index: usize,
}

impl MoveGen {
    fn enumerate_moves(board: &Board, side: Side) -> MoveList {
        let mut movelist = MoveList::new();

        PawnType::legals(&mut movelist, board, side);
        KnightType::legals(&mut movelist, board, side);
        BishopType::legals(&mut movelist, board, side);
        RookType::legals(&mut movelist, board, side);
        QueenType::legals(&mut movelist, board, side);
        KingType::legals(&mut movelist, board, side);

        movelist
    }

    /// Create a new `MoveGen` structure, only generating legal moves for `side`.
    pub fn new_legal(board: &Board, side: Side) -> MoveGen {
        MoveGen {
            moves: MoveGen::enumerate_moves(board, side),
            iterator_mask: !EMPTY,
            index: 0,
        }
    }

    /// Does `side` have any legal move at all?
    pub fn has_legal_move(board: &Board, side: Side) -> bool {
        board
            .pieces_of(side)
            .any(|piece| !piece.legal_destinations(board).is_empty())
    }

    /// Never, ever, iterate any moves that land on the following squares
    pub fn remove_mask(&mut self, mask: BitBoard) {
        for x in 0..self.moves.len() {
            self.moves[x].bitboard &= !mask;
        }
        // an emptied entry would end iteration early
        self.moves.retain(|m| m.bitboard != EMPTY);
        self.set_iterator_mask(self.iterator_mask);
    }

    /// For now, only iterate moves that land on the following squares.
    /// Once iteration is completed, you can pass in a mask of `!EMPTY`
    /// to get the remaining moves, or another mask.
    pub fn set_iterator_mask(&mut self, mask: BitBoard) {
        self.iterator_mask = mask;
        self.index = 0;

        // the iterator relies on the used entries sitting at the front of the list,
        // so partition the list around the new mask
        let mut i = 0;
        while i < self.moves.len() && self.moves[i].bitboard & self.iterator_mask != EMPTY {
            i += 1;
        }

        for j in (i + 1)..self.moves.len() {
            if self.moves[j].bitboard & self.iterator_mask != EMPTY {
                self.moves.swap(i, j);
                i += 1;
            }
        }
    }
}

impl ExactSizeIterator for MoveGen {
    /// Give the exact length of this iterator
    fn len(&self) -> usize {
        let mut result = 0;
        for i in self.index..self.moves.len() {
            let remaining = self.moves[i].bitboard & self.iterator_mask;
            if remaining == EMPTY {
                break;
            }
            result += remaining.count() as usize;
        }
        result
    }
}

impl Iterator for MoveGen {
    type Item = ChessMove;

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    /// Find the next chess move.
    fn next(&mut self) -> Option<ChessMove> {
        if self.index >= self.moves.len() {
            return None;
        }
        let mask = self.iterator_mask;
        let moves = &mut self.moves[self.index];
        let dest = (moves.bitboard & mask).first()?;

        moves.bitboard.remove(dest);
        let source = moves.square;
        if moves.bitboard & mask == EMPTY {
            self.index += 1;
        }
        Some(ChessMove::new(source, dest))
    }
}

#[cfg(test)]
use crate::board_builder::BoardBuilder;
#[cfg(test)]
use crate::piece::PieceKind;
#[cfg(test)]
use std::collections::HashSet;
#[cfg(test)]
use std::convert::TryInto;

#[test]
fn test_starting_position_moves() {
    let board = Board::default();
    for side in crate::side::ALL_SIDES.iter() {
        let moves: Vec<ChessMove> = MoveGen::new_legal(&board, *side).collect();
        assert_eq!(moves.len(), 20);
    }
}

#[test]
fn test_pinned_piece_cannot_leave_the_line() {
    // blue bishop on e2 shields the e1 king from the red rook on e8
    let board: Board = BoardBuilder::new()
        .piece(Square::E1, PieceKind::King, Side::Blue)
        .piece(Square::E2, PieceKind::Bishop, Side::Blue)
        .piece(Square::E8, PieceKind::Rook, Side::Red)
        .piece(Square::A8, PieceKind::King, Side::Red)
        .try_into()
        .unwrap();

    let moves: Vec<ChessMove> = MoveGen::new_legal(&board, Side::Blue).collect();
    assert!(moves.iter().all(|m| m.get_source() != Square::E2));
}

#[test]
fn test_king_cannot_step_into_check() {
    let board: Board = BoardBuilder::new()
        .piece(Square::E1, PieceKind::King, Side::Blue)
        .piece(Square::D8, PieceKind::Rook, Side::Red)
        .piece(Square::H8, PieceKind::King, Side::Red)
        .try_into()
        .unwrap();

    let king_dests: HashSet<Square> = MoveGen::new_legal(&board, Side::Blue)
        .filter(|m| m.get_source() == Square::E1)
        .map(|m| m.get_dest())
        .collect();

    assert_eq!(
        king_dests,
        [Square::E2, Square::F1, Square::F2].into_iter().collect()
    );
}

#[test]
fn test_only_check_evasions_in_check() {
    // red rook checks along the first row; the king is boxed in by its own pawns,
    // so the only answers are knight blocks on b1 and d1
    let board: Board = BoardBuilder::new()
        .piece(Square::E1, PieceKind::King, Side::Blue)
        .piece(Square::D2, PieceKind::Pawn, Side::Blue)
        .piece(Square::E2, PieceKind::Pawn, Side::Blue)
        .piece(Square::F2, PieceKind::Pawn, Side::Blue)
        .piece(Square::C3, PieceKind::Knight, Side::Blue)
        .piece(Square::A1, PieceKind::Rook, Side::Red)
        .piece(Square::H8, PieceKind::King, Side::Red)
        .try_into()
        .unwrap();

    let moves: HashSet<ChessMove> = MoveGen::new_legal(&board, Side::Blue).collect();
    assert_eq!(
        moves,
        [
            ChessMove::new(Square::C3, Square::B1),
            ChessMove::new(Square::C3, Square::D1),
        ]
        .into_iter()
        .collect()
    );
    assert!(MoveGen::has_legal_move(&board, Side::Blue));
}

#[test]
fn test_masked_move_gen() {
    let board: Board = BoardBuilder::new()
        .piece(Square::E1, PieceKind::King, Side::Blue)
        .piece(Square::D4, PieceKind::Knight, Side::Blue)
        .piece(Square::C6, PieceKind::Pawn, Side::Red)
        .piece(Square::F5, PieceKind::Bishop, Side::Red)
        .piece(Square::H8, PieceKind::King, Side::Red)
        .try_into()
        .unwrap();

    let mut movegen = MoveGen::new_legal(&board, Side::Blue);
    let total = movegen.len();
    movegen.set_iterator_mask(board.occupied_by(Side::Red));

    let captures: HashSet<ChessMove> = (&mut movegen).collect();
    assert_eq!(
        captures,
        [
            ChessMove::new(Square::D4, Square::C6),
            ChessMove::new(Square::D4, Square::F5),
        ]
        .into_iter()
        .collect()
    );

    movegen.set_iterator_mask(!EMPTY);
    assert_eq!(movegen.len() + captures.len(), total);
}

#[test]
fn test_removed_squares_are_never_generated() {
    let board = Board::default();
    let mut movegen = MoveGen::new_legal(&board, Side::Blue);
    let mut fourth_row = EMPTY;
    for sq in crate::square::ALL_SQUARES.iter().filter(|sq| sq.row() == 4) {
        fourth_row.insert(*sq);
    }

    movegen.remove_mask(fourth_row);
    assert_eq!(movegen.len(), 12);
    assert!(movegen.all(|m| m.get_dest().row() != 4));
}
