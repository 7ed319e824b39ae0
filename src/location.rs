use std::num::NonZero;

use ndarray::{Array2, Ix};

type Coord = usize;
/// A board dimension; boards are never empty.
pub type Dimension = NonZero<Coord>;

/// The 1-based number printed on a cell. Cell `1` is the start of the race and `rows * columns` is the finish.
pub type CellNumber = usize;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on the board matrix. The top left corner is `Location(0, 0)` and holds the first cell of the highest-numbered row.
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// `(row, column)`, the order [`ndarray`] indexes in.
    pub fn as_index(&self) -> (Coord, Coord) {
        (self.1, self.0)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1, value.0)
    }
}

/// Two-way mapping between cell numbers and matrix positions for a board of `rows * columns` cells.
///
/// Numbers ascend left to right within every row (no boustrophedon reversal).
/// Rows are stacked bottom-up, so the last matrix row holds cells `1..=columns` and matrix row 0 holds the highest numbers.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct GridIndexer {
    rows: Dimension,
    columns: Dimension,
}

impl GridIndexer {
    /// Construct an indexer for a board with the given dimensions.
    pub fn new(rows: Dimension, columns: Dimension) -> Self {
        Self { rows, columns }
    }

    /// Number of matrix rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows.get()
    }

    /// Number of matrix columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.columns.get()
    }

    /// The highest cell number, i.e. the finish cell.
    #[inline]
    pub fn last_cell(&self) -> CellNumber {
        self.rows() * self.columns()
    }

    /// Whether `number` names a cell on this board.
    #[inline]
    pub fn contains(&self, number: CellNumber) -> bool {
        (1..=self.last_cell()).contains(&number)
    }

    /// Where cell `number` sits in the matrix, or [`None`] if there is no such cell.
    pub fn locate(&self, number: CellNumber) -> Option<Location> {
        if !self.contains(number) {
            return None;
        }

        let offset = number - 1;
        // row counted from the bottom of the board
        let rank = offset / self.columns();
        Some(Location(offset % self.columns(), self.rows() - 1 - rank))
    }

    /// The cell number at `location`, or [`None`] if `location` is outside the matrix.
    pub fn number_at(&self, location: Location) -> Option<CellNumber> {
        let (row, column) = location.as_index();
        if row >= self.rows() || column >= self.columns() {
            return None;
        }

        Some((self.rows() - 1 - row) * self.columns() + column + 1)
    }

    /// Shorthand for [`Self::locate`] returning `(row, column)`.
    pub fn cell_to_row_col(&self, number: CellNumber) -> Option<(usize, usize)> {
        self.locate(number).map(|location| location.as_index())
    }

    /// Shorthand for [`Self::number_at`] taking `(row, column)`.
    pub fn row_col_to_cell(&self, row: usize, column: usize) -> Option<CellNumber> {
        self.number_at(Location::from((row, column)))
    }

    /// The full matrix of cell numbers in board orientation.
    pub fn matrix(&self) -> Array2<CellNumber> {
        Array2::from_shape_fn((self.rows(), self.columns()), |(row, column)| {
            (self.rows() - 1 - row) * self.columns() + column + 1
        })
    }
}
