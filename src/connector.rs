use strum::{Display, VariantArray};

use crate::error::PlacementRejection;
use crate::location::CellNumber;

/// The two directions a connector can carry a piece.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Display, VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum ConnectorKind {
    /// Carries a piece from a lower-numbered cell to a higher-numbered one.
    Climb,
    /// Carries a piece from a higher-numbered cell to a lower-numbered one.
    Slide,
}

impl ConnectorKind {
    /// Order two cells as `(start, end)` for this kind.
    pub fn orient(self, a: CellNumber, b: CellNumber) -> (CellNumber, CellNumber) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        match self {
            Self::Climb => (low, high),
            Self::Slide => (high, low),
        }
    }

    /// Whether travelling `start -> end` goes the way this kind travels.
    pub fn admits(self, start: CellNumber, end: CellNumber) -> bool {
        match self {
            Self::Climb => end > start,
            Self::Slide => end < start,
        }
    }

    pub(crate) fn marker(self) -> char {
        match self {
            Self::Climb => '^',
            Self::Slide => 'v',
        }
    }
}

/// A shortcut between two cells. Landing on `start` carries a piece to `end`.
///
/// Connectors are immutable once made; a placed connector is shared by its two endpoint cells and the board's connector list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Connector {
    pub(crate) start: CellNumber,
    pub(crate) end: CellNumber,
    pub(crate) kind: ConnectorKind,
}

impl Connector {
    /// A connector with the endpoints exactly as given. Nothing is checked until it is placed.
    pub fn new(kind: ConnectorKind, start: CellNumber, end: CellNumber) -> Self {
        Self { start, end, kind }
    }

    /// A connector between two cells, in whichever order `kind` requires.
    pub fn between(kind: ConnectorKind, a: CellNumber, b: CellNumber) -> Self {
        let (start, end) = kind.orient(a, b);
        Self::new(kind, start, end)
    }

    /// Shorthand for a [`Climb`](ConnectorKind::Climb) from `start` to `end`.
    pub fn climb(start: CellNumber, end: CellNumber) -> Self {
        Self::new(ConnectorKind::Climb, start, end)
    }

    /// Shorthand for a [`Slide`](ConnectorKind::Slide) from `start` to `end`.
    pub fn slide(start: CellNumber, end: CellNumber) -> Self {
        Self::new(ConnectorKind::Slide, start, end)
    }

    /// The cell a piece must land on to use this connector.
    #[inline]
    pub fn start(&self) -> CellNumber {
        self.start
    }

    /// The cell a piece is carried to.
    #[inline]
    pub fn end(&self) -> CellNumber {
        self.end
    }

    /// Which way this connector travels.
    #[inline]
    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    /// Both endpoints, start first.
    pub fn endpoints(&self) -> [CellNumber; 2] {
        [self.start, self.end]
    }

    /// Check the shape of this connector on its own, ignoring any board.
    pub fn validate(&self) -> Result<(), PlacementRejection> {
        if self.start == self.end {
            return Err(PlacementRejection::Degenerate { cell: self.start });
        }

        if !self.kind.admits(self.start, self.end) {
            return Err(PlacementRejection::WrongDirection {
                kind: self.kind,
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }
}
