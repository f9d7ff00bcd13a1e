//! # Red/Blue Chess Rules Library
//! The rules of two-sided chess: where each piece may go, when a king is in check or mated,
//! and when a king may castle.
//!
//! Blue sets up on rows 1 and 2 and moves up the board; Red sets up on rows 7 and 8 and moves
//! down it. Differences from tournament chess that callers should know about:
//! - There is no side to move. Any piece may be asked for its moves at any time.
//! - Each side may castle once per game, tracked by a flag rather than castle rights.
//! - No draw rules beyond stalemate (no repetition, no fifty-move rule).
//!
//! ## Example
//!
//! ```
//! use redblue_chess::{Board, BoardStatus, MoveGen, Side, Square};
//!
//! let mut board = Board::default();
//! // Starting position has 20 moves for either side
//! assert_eq!(MoveGen::new_legal(&board, Side::Blue).len(), 20);
//!
//! board.move_to(Square::F2, Square::F3).unwrap();
//! board.move_to(Square::E7, Square::E5).unwrap();
//! board.move_to(Square::G2, Square::G4).unwrap();
//! board.move_to(Square::D8, Square::H4).unwrap();
//! assert_eq!(board.status(Side::Blue), BoardStatus::Checkmate);
//! ```
//!

mod board;
pub use crate::board::*;

mod bitboard;
pub use crate::bitboard::{BitBoard, EMPTY};

mod board_builder;
pub use crate::board_builder::{BoardBuilder, STARTING_POSITION};

mod castling;
pub use crate::castling::*;

mod chess_move;
pub use crate::chess_move::*;

mod coord;
pub use crate::coord::*;

mod error;
pub use crate::error::{Error, IllegalReason};

mod movegen;
pub use crate::movegen::MoveGen;

mod piece;
pub use crate::piece::*;

mod safety;
pub use crate::safety::*;

mod side;
pub use crate::side::*;

mod square;
pub use crate::square::*;
