use crate::board::{Board, Move};
use crate::error::{Error, IllegalReason};
use crate::piece::{Piece, PieceKind};
use crate::safety::{is_in_check, is_square_attacked};
use crate::square::Square;
use std::fmt;
use thiserror::Error;

/// Which way the king goes. `Left` is toward the a-file for both sides.
#[derive(Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Debug, Hash)]
pub enum CastleDirection {
    Left,
    Right,
}

/// Both directions, left first.
pub const ALL_CASTLE_DIRECTIONS: [CastleDirection; 2] =
    [CastleDirection::Left, CastleDirection::Right];

impl CastleDirection {
    /// Column delta of one step this way.
    #[inline]
    pub fn step(&self) -> i8 {
        match *self {
            CastleDirection::Left => -1,
            CastleDirection::Right => 1,
        }
    }

    /// How many columns from the king's start square to this side's rook.
    #[inline]
    pub fn rook_distance(&self) -> i8 {
        match *self {
            CastleDirection::Left => 4,
            CastleDirection::Right => 3,
        }
    }
}

impl fmt::Display for CastleDirection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CastleDirection::Left => write!(f, "left"),
            CastleDirection::Right => write!(f, "right"),
        }
    }
}

/// The first castling rule a position breaks.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum CastleBlock {
    #[error("this side has already castled")]
    AlreadyCastled,

    #[error("only an unmoved king can castle")]
    KingMoved,

    #[error("there is no unmoved rook of the same side in the corner")]
    RookUnavailable,

    #[error("the king is in check")]
    InCheck,

    #[error("a piece stands between the king and the rook")]
    PathBlocked,

    #[error("the king would pass through an attacked square")]
    PathAttacked,

    #[error("the king would end in check")]
    EndsInCheck,
}

/// Where the king and rook go when a castle is allowed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CastlePlan {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Check every castling rule in turn, cheapest first, and say which one fails.
///
/// The rook is the one 3 columns to the right of the king or 4 columns to the left. The king
/// moves two squares toward it and the rook lands on the square the king crossed.
pub fn check_castle(
    board: &Board,
    king: &Piece,
    direction: CastleDirection,
) -> Result<CastlePlan, CastleBlock> {
    let side = king.side;
    let step = direction.step();

    if board.has_castled(side) {
        return Err(CastleBlock::AlreadyCastled);
    }
    if king.kind != PieceKind::King || king.moved {
        return Err(CastleBlock::KingMoved);
    }

    let rook_from = king
        .square
        .offset(step * direction.rook_distance(), 0)
        .ok_or(CastleBlock::RookUnavailable)?;
    match board.piece_at(rook_from) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.side == side && !rook.moved => {}
        _ => return Err(CastleBlock::RookUnavailable),
    }

    if is_in_check(board, king) {
        return Err(CastleBlock::InCheck);
    }

    let between = (1..direction.rook_distance()).filter_map(|n| king.square.offset(step * n, 0));
    for sq in between {
        if board.piece_at(sq).is_some() {
            return Err(CastleBlock::PathBlocked);
        }
    }

    // the rook lies 3 or 4 columns out, so both of these exist
    let passing = king
        .square
        .offset(step, 0)
        .ok_or(CastleBlock::RookUnavailable)?;
    let king_to = king
        .square
        .offset(2 * step, 0)
        .ok_or(CastleBlock::RookUnavailable)?;
    if [passing, king_to]
        .iter()
        .any(|sq| is_square_attacked(board, *sq, !side))
    {
        return Err(CastleBlock::PathAttacked);
    }

    let plan = CastlePlan {
        king_from: king.square,
        king_to,
        rook_from,
        rook_to: passing,
    };

    let mut scratch = *board;
    relocate(&mut scratch, &plan);
    if is_square_attacked(&scratch, king_to, !side) {
        return Err(CastleBlock::EndsInCheck);
    }

    Ok(plan)
}

/// Can `king` castle toward `direction` right now?
///
/// ```
/// use redblue_chess::{can_castle, Board, CastleDirection, Side, Square};
///
/// let mut board = Board::default();
/// let king = board.king(Side::Blue).unwrap();
/// assert!(!can_castle(&board, &king, CastleDirection::Right));
///
/// board.clear(Square::F1);
/// board.clear(Square::G1);
/// assert!(can_castle(&board, &king, CastleDirection::Right));
/// ```
pub fn can_castle(board: &Board, king: &Piece, direction: CastleDirection) -> bool {
    check_castle(board, king, direction).is_ok()
}

/// Castle `king` toward `direction`.
///
/// On success the king and rook are moved and marked, and the side can never castle again.
/// On failure the board is unchanged and the error names the broken rule.
pub fn castle(board: &mut Board, king: &Piece, direction: CastleDirection) -> Result<Move, Error> {
    if board.piece_at(king.square) != Some(*king) {
        return Err(Error::NoPieceAtSquare {
            square: king.square,
        });
    }

    let plan = check_castle(board, king, direction).map_err(|block| Error::IllegalMove {
        from: king.square,
        to: king
            .square
            .offset(2 * direction.step(), 0)
            .unwrap_or(king.square),
        reason: IllegalReason::Castling(block),
    })?;

    relocate(board, &plan);
    board.set_en_passant(None);
    board.set_castled(king.side, true);

    Ok(Move {
        piece: Piece {
            square: plan.king_to,
            moved: true,
            ..*king
        },
        from: plan.king_from,
        to: plan.king_to,
        captured: None,
        promotion: None,
        rook: Some((plan.rook_from, plan.rook_to)),
    })
}

/// Move king and rook per `plan` and mark both moved. No checks.
fn relocate(board: &mut Board, plan: &CastlePlan) {
    let king = board.clear(plan.king_from);
    let rook = board.clear(plan.rook_from);
    if let Some(king) = king {
        board.place(plan.king_to, Piece { moved: true, ..king });
    }
    if let Some(rook) = rook {
        board.place(plan.rook_to, Piece { moved: true, ..rook });
    }
}
