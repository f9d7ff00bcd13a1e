use redblue_chess::{
    can_castle, is_checkmate, BitBoard, Board, BoardBuilder, BoardStatus, CastleDirection, Error,
    MoveGen, Piece, PieceKind, Side, Square, ALL_SIDES, ALL_SQUARES,
};
use std::collections::HashSet;
use std::convert::TryInto;

fn squares(bb: BitBoard) -> HashSet<Square> {
    bb.collect()
}

fn parse_all(tokens: &[&str]) -> HashSet<Square> {
    tokens.iter().map(|t| t.parse().unwrap()).collect()
}

fn assert_one_piece_per_square(board: &Board) {
    let mut seen = HashSet::new();
    for sq in ALL_SQUARES.iter() {
        if let Some(piece) = board.piece_at(*sq) {
            assert_eq!(piece.square, *sq);
            assert!(seen.insert(piece.square));
        }
    }
    assert_eq!(seen.len(), board.pieces().count());
}

fn lone(square: Square, kind: PieceKind) -> Board {
    BoardBuilder::new()
        .piece(square, kind, Side::Blue)
        .try_into()
        .unwrap()
}

#[test]
fn rook_rays_on_an_empty_board() {
    let board = lone(Square::D4, PieceKind::Rook);
    let dests = board.legal_destinations(Square::D4).unwrap();

    assert_eq!(dests.count(), 14);
    assert!(squares(dests)
        .iter()
        .all(|sq| sq.column() == 4 || sq.row() == 4));
}

#[test]
fn friendly_blocker_stops_the_ray() {
    let mut board = lone(Square::D4, PieceKind::Rook);
    board.place(Square::D6, Piece::new(PieceKind::Pawn, Side::Blue, Square::D6));
    assert_one_piece_per_square(&board);

    let dests = squares(board.legal_destinations(Square::D4).unwrap());
    assert_eq!(
        dests,
        parse_all(&["d5", "d3", "d2", "d1", "a4", "b4", "c4", "e4", "f4", "g4", "h4"])
    );
}

#[test]
fn opposing_blocker_can_be_captured() {
    let mut board = lone(Square::D4, PieceKind::Rook);
    board.place(Square::D6, Piece::new(PieceKind::Pawn, Side::Red, Square::D6));

    let dests = squares(board.legal_destinations(Square::D4).unwrap());
    assert!(dests.contains(&Square::D6));
    assert!(!dests.contains(&Square::D7));
    assert!(!dests.contains(&Square::D8));
    assert_eq!(dests.len(), 12);
}

#[test]
fn knight_from_the_centre() {
    let board = lone(Square::D4, PieceKind::Knight);
    assert_eq!(
        squares(board.legal_destinations(Square::D4).unwrap()),
        parse_all(&["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"])
    );
}

#[test]
fn fresh_king_is_boxed_in() {
    let board = Board::default();
    for side in ALL_SIDES.iter() {
        let king = board.king(*side).unwrap();
        assert!(king.legal_destinations(&board).is_empty());
    }
}

#[test]
fn clearing_in_front_of_the_king_opens_it_up() {
    let fronts = [
        (Side::Blue, ["d2", "e2", "f2"]),
        (Side::Red, ["d7", "e7", "f7"]),
    ];
    for (side, front) in fronts.iter() {
        let mut board = Board::default();
        for sq in parse_all(front) {
            board.clear(sq);
        }
        assert_one_piece_per_square(&board);

        let king = board.king(*side).unwrap();
        assert_eq!(squares(king.legal_destinations(&board)), parse_all(front));
    }
}

#[test]
fn opened_king_avoids_attacked_squares() {
    // with both d-pawns gone the red queen covers d2
    let mut board = Board::default();
    for sq in [Square::D2, Square::E2, Square::F2, Square::D7] {
        board.clear(sq);
    }

    let king = board.king(Side::Blue).unwrap();
    assert_eq!(
        squares(king.legal_destinations(&board)),
        parse_all(&["e2", "f2"])
    );
}

#[test]
fn castling_lifecycle() {
    let mut board = Board::default();
    for side in ALL_SIDES.iter() {
        let king = board.king(*side).unwrap();
        assert!(!can_castle(&board, &king, CastleDirection::Left));
        assert!(!can_castle(&board, &king, CastleDirection::Right));
    }

    for sq in [Square::B8, Square::C8, Square::D8, Square::F8, Square::G8] {
        board.clear(sq);
    }
    let king = board.king(Side::Red).unwrap();
    assert!(can_castle(&board, &king, CastleDirection::Left));
    assert!(can_castle(&board, &king, CastleDirection::Right));

    board.castle(Side::Red, CastleDirection::Left).unwrap();
    assert_one_piece_per_square(&board);
    assert_eq!(board.piece_at(Square::C8).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(board.piece_at(Square::D8).map(|p| p.kind), Some(PieceKind::Rook));

    // walk the king and rook back by hand and reset their moved flags
    board.clear(Square::C8);
    board.clear(Square::D8);
    board.place(Square::E8, Piece::new(PieceKind::King, Side::Red, Square::E8));
    board.place(Square::A8, Piece::new(PieceKind::Rook, Side::Red, Square::A8));

    let king = board.king(Side::Red).unwrap();
    assert!(!can_castle(&board, &king, CastleDirection::Left));
    assert!(!can_castle(&board, &king, CastleDirection::Right));
    assert!(board.castle(Side::Red, CastleDirection::Right).is_err());
}

#[test]
fn back_rank_mate() {
    let mut board: Board = "R3k3/3ppp2/8/8/8/8/8/7K - -".parse().unwrap();
    let king = board.king(Side::Red).unwrap();

    assert!(is_checkmate(&board, &king));
    assert_eq!(board.status(Side::Red), BoardStatus::Checkmate);
    assert!(board.checkmated(Side::Red));

    board.clear(Square::A8);
    assert!(!is_checkmate(&board, &king));
    assert_eq!(board.status(Side::Red), BoardStatus::Ongoing);
}

#[test]
fn legal_destinations_is_repeatable() {
    let mut board = Board::default();
    board.move_to(Square::E2, Square::E4).unwrap();
    board.move_to(Square::D7, Square::D5).unwrap();

    for piece in board.pieces() {
        let first = piece.legal_destinations(&board);
        let second = piece.legal_destinations(&board);
        assert_eq!(first, second);
    }
}

#[test]
fn occupancy_holds_through_a_game() {
    let mut board = Board::default();
    let moves = [
        (Square::E2, Square::E4),
        (Square::D7, Square::D5),
        (Square::E4, Square::D5),
        (Square::D8, Square::D5),
        (Square::B1, Square::C3),
        (Square::D5, Square::A5),
        (Square::G1, Square::F3),
        (Square::C8, Square::G4),
        (Square::F1, Square::E2),
        (Square::B8, Square::C6),
    ];
    for (from, to) in moves.iter() {
        board.move_to(*from, *to).unwrap();
        assert_one_piece_per_square(&board);
    }

    board.castle(Side::Blue, CastleDirection::Right).unwrap();
    assert_one_piece_per_square(&board);
    board.castle(Side::Red, CastleDirection::Left).unwrap();
    assert_one_piece_per_square(&board);

    assert_eq!(board.pieces_of(Side::Blue).count(), 15);
    assert_eq!(board.pieces_of(Side::Red).count(), 15);
}

#[test]
fn every_generated_move_is_accepted() {
    let board: Board = "r3k2r/ppp2ppp/2n5/3pp3/1b1PP1q1/2N2N2/PPP2PPP/R1BQK2R - -"
        .parse()
        .unwrap();

    for side in ALL_SIDES.iter() {
        for m in MoveGen::new_legal(&board, *side) {
            let mut scratch = board;
            scratch
                .move_to(m.get_source(), m.get_dest())
                .unwrap_or_else(|e| panic!("{} rejected: {}", m, e));
            assert!(!scratch.in_check(*side));
        }
    }
}

#[test]
fn errors_report_the_square() {
    let mut board = Board::default();
    assert_eq!(
        board.legal_destinations(Square::E4),
        Err(Error::NoPieceAtSquare { square: Square::E4 })
    );
    assert!(matches!(
        "e9".parse::<Square>(),
        Err(Error::OutOfRange { .. })
    ));
    assert!(board.move_to(Square::E5, Square::E6).is_err());
}
