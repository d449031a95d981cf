use std::fmt;

/// A square in model space: row 0 is the top of the board as stored,
/// column 0 is the leftmost file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

/// A square in the page's own numbering: columns and rows both count from 1,
/// row 1 being the rank closest to the bottom edge of the screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PageSquare {
    pub column: u8,
    pub row: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Converts a model square into the page's numbering.
    pub fn to_page(self) -> PageSquare {
        PageSquare {
            column: self.col + 1,
            row: 8 - self.row,
        }
    }
}

impl PageSquare {
    pub fn new(column: u8, row: u8) -> Self {
        Self { column, row }
    }

    /// Converts a page square back into model space.
    pub fn to_model(self) -> Square {
        Square {
            row: 8 - self.row,
            col: self.column - 1,
        }
    }
}

// Rendered the way the page numbers its squares, e.g. "(2, 3)".
impl fmt::Display for PageSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}
