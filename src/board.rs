use std::fmt;

use crate::coords::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SideColor {
    Light,
    Dark,
}

impl SideColor {
    /// The conventional chess name for the color, used in reports.
    pub fn label(self) -> &'static str {
        match self {
            SideColor::Light => "White",
            SideColor::Dark => "Black",
        }
    }

    /// The single-letter code the page uses in element class names.
    pub fn letter(self) -> char {
        match self {
            SideColor::Light => 'w',
            SideColor::Dark => 'b',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
    /// An element that matched the piece grammar with a letter we do not
    /// recognize. Kept on the board so counts stay honest, skipped by the
    /// scoring backend.
    Generic,
}

impl PieceKind {
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'p' => PieceKind::Pawn,
            'r' => PieceKind::Rook,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => PieceKind::Generic,
        }
    }

    /// The single-letter code the page uses in element class names.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Generic => '?',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Generic => "Figure",
        };
        write!(f, "{}", name)
    }
}

/// One reconciled piece. Owned exclusively by the grid cell it occupies;
/// moving a figure transfers it, never aliases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Figure {
    pub color: SideColor,
    pub kind: PieceKind,
    /// Whether a pawn is still eligible for its double-step first move.
    /// Cannot be scraped; inferred from rank after reconciliation.
    pub first_move: bool,
}

impl Figure {
    pub fn new(color: SideColor, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            first_move: false,
        }
    }
}

/// The reconciled 8x8 grid. Rebuilt from scratch on every scrape cycle.
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: [[Option<Figure>; 8]; 8],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figure_at(&self, sq: Square) -> Option<&Figure> {
        self.cells[sq.row as usize][sq.col as usize].as_ref()
    }

    /// Places a figure, returning whatever previously occupied the square.
    pub fn place(&mut self, sq: Square, figure: Figure) -> Option<Figure> {
        self.cells[sq.row as usize][sq.col as usize].replace(figure)
    }

    pub fn take(&mut self, sq: Square) -> Option<Figure> {
        self.cells[sq.row as usize][sq.col as usize].take()
    }

    pub fn count(&self) -> usize {
        self.figures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// All occupants with their squares, row-major from the top.
    pub fn figures(&self) -> impl Iterator<Item = (Square, &Figure)> {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.as_ref()
                    .map(|figure| (Square::new(row as u8, col as u8), figure))
            })
        })
    }

    /// The occupants belonging to one side. Always a subset of `figures()`.
    pub fn figures_of(&self, color: SideColor) -> impl Iterator<Item = (Square, &Figure)> {
        self.figures().filter(move |(_, f)| f.color == color)
    }

    /// Applies `f` to every occupant in place.
    pub fn for_each_mut<F: FnMut(Square, &mut Figure)>(&mut self, mut f: F) {
        for row in 0..8u8 {
            for col in 0..8u8 {
                if let Some(figure) = self.cells[row as usize][col as usize].as_mut() {
                    f(Square::new(row, col), figure);
                }
            }
        }
    }
}
