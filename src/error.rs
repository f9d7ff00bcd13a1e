use crate::castling::CastleBlock;
use crate::piece::PieceKind;
use crate::square::Square;
use thiserror::Error;

/// Sometimes, bad stuff happens.
///
/// Every variant is recoverable: a failed operation never leaves the board partially updated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A square token or coordinate fell outside a-h / 1-8
    #[error("{token:?} is not on the board (files a-h, ranks 1-8)")]
    OutOfRange { token: String },

    /// The engine refused to make a move
    #[error("illegal move {from} to {to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalReason,
    },

    /// An operation needed a piece on a square that is empty
    #[error("there is no piece on {square}")]
    NoPieceAtSquare { square: Square },

    /// A position string or builder did not describe a usable position
    #[error("invalid position {position:?}: {reason}")]
    InvalidPosition { position: String, reason: String },
}

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("the destination is not reachable by this piece")]
    NotADestination,

    #[error("the move would leave the king in check")]
    LeavesKingInCheck,

    #[error("a pawn cannot promote to a {0}")]
    BadPromotion(PieceKind),

    #[error("{0}")]
    Castling(CastleBlock),
}

impl Error {
    pub(crate) fn out_of_range(token: impl ToString) -> Error {
        Error::OutOfRange {
            token: token.to_string(),
        }
    }

    pub(crate) fn invalid_position(position: impl ToString, reason: impl ToString) -> Error {
        Error::InvalidPosition {
            position: position.to_string(),
            reason: reason.to_string(),
        }
    }
}
