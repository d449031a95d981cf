use std::fmt;

use chess::{BoardBuilder, Color, File, MoveGen, Piece, Rank, Square as ChessSquare};
use log::debug;

use crate::board::{Figure, PieceKind, SideColor};
use crate::coords::Square;
use crate::reconcile::BoardModel;

const PAWN_VALUE: i32 = 1;
const KNIGHT_VALUE: i32 = 3;
const BISHOP_VALUE: i32 = 3;
const ROOK_VALUE: i32 = 5;
const QUEEN_VALUE: i32 = 9;
const KING_VALUE: i32 = 0; // King's value isn't used in material counting

/// One scored candidate move. A query result: only valid against the board
/// model snapshot it was computed from.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredMove {
    pub figure: Figure,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Figure>,
    pub cost: i32,
}

// Rendered in the page's square numbering, e.g. "Queen(2, 3) -> (3, 4) == 1"
// or "Queen(2, 3) -> Pawn(3, 4) == 1" when capturing.
impl fmt::Display for ScoredMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} -> ", self.figure.kind, self.from.to_page())?;
        if let Some(captured) = &self.captured {
            write!(f, "{}", captured.kind)?;
        }
        write!(f, "{} == {}", self.to.to_page(), self.cost)
    }
}

/// The move-scoring capability. Given a reconciled board model and a side,
/// produces every available move with its desirability. Implementations are
/// opaque to the rest of the crate; tests use stubs with fixed lists.
pub trait MoveOracle {
    fn scored_moves(&self, model: &BoardModel, color: SideColor) -> Vec<ScoredMove>;
}

/// Oracle backed by the `chess` crate for legality, scoring each move by the
/// material value of whatever it captures. Positions the backend cannot
/// express (unrecognized figures, missing kings) produce an empty move list
/// rather than an error.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialOracle;

impl MoveOracle for MaterialOracle {
    fn scored_moves(&self, model: &BoardModel, color: SideColor) -> Vec<ScoredMove> {
        let mut builder = BoardBuilder::new();
        for (sq, figure) in model.board.figures() {
            match kind_to_piece(figure.kind) {
                Some(piece) => {
                    builder.piece(to_chess_square(sq), piece, to_chess_color(figure.color));
                }
                None => debug!("skipping unrecognized figure at {:?}", sq),
            }
        }
        builder.side_to_move(to_chess_color(color));

        let position = match chess::Board::try_from(&builder) {
            Ok(position) => position,
            Err(err) => {
                debug!("position not expressible by the move backend: {}", err);
                return Vec::new();
            }
        };

        let mut moves = Vec::new();
        for mv in MoveGen::new_legal(&position) {
            // Promotions show up once per target piece; keep the queen line
            // and drop the echoes.
            if matches!(mv.get_promotion(), Some(p) if p != Piece::Queen) {
                continue;
            }
            let from = from_chess_square(mv.get_source());
            let to = from_chess_square(mv.get_dest());
            let figure = match model.board.figure_at(from) {
                Some(figure) => *figure,
                None => continue,
            };
            let captured = model.board.figure_at(to).copied();
            let cost = captured.map_or(0, |f| piece_value(f.kind));
            moves.push(ScoredMove {
                figure,
                from,
                to,
                captured,
                cost,
            });
        }
        moves
    }
}

fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
        PieceKind::Generic => 0,
    }
}

fn kind_to_piece(kind: PieceKind) -> Option<Piece> {
    match kind {
        PieceKind::Pawn => Some(Piece::Pawn),
        PieceKind::Rook => Some(Piece::Rook),
        PieceKind::Knight => Some(Piece::Knight),
        PieceKind::Bishop => Some(Piece::Bishop),
        PieceKind::Queen => Some(Piece::Queen),
        PieceKind::King => Some(Piece::King),
        PieceKind::Generic => None,
    }
}

fn to_chess_color(color: SideColor) -> Color {
    match color {
        SideColor::Light => Color::White,
        SideColor::Dark => Color::Black,
    }
}

// Model row 0 is the top of the board, rank 8.
fn to_chess_square(sq: Square) -> ChessSquare {
    ChessSquare::make_square(
        Rank::from_index(7 - sq.row as usize),
        File::from_index(sq.col as usize),
    )
}

fn from_chess_square(sq: ChessSquare) -> Square {
    Square::new(7 - sq.get_rank().to_index() as u8, sq.get_file().to_index() as u8)
}
