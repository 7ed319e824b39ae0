use rand::Rng;

use crate::board::Board;
use crate::connector::ConnectorKind;
use crate::graph::DIE_FACES;
use crate::location::CellNumber;

/// A uniformly random move size in `1..=DIE_FACES`.
pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=DIE_FACES)
}

/// Where a piece comes to rest after one move.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Landing {
    /// The cell the piece ends on.
    pub cell: CellNumber,
    /// The connector taken on the way, if the move ended on the start of one.
    pub traversed: Option<ConnectorKind>,
}

impl Board {
    /// Move a piece `step` cells forward from `from` the way a turn plays out.
    ///
    /// A move past the finish stops on the finish. Ending on the start of a connector carries the piece to its end;
    /// ending on a connector's end does nothing.
    pub fn resolve_move(&self, from: CellNumber, step: u8) -> Landing {
        let cell = (from + step as usize).min(self.last_cell());

        match self.cell(cell).filter(|landed| landed.is_mouth()).and_then(|landed| landed.contents()) {
            Some(connector) => Landing { cell: connector.end, traversed: Some(connector.kind) },
            None => Landing { cell, traversed: None },
        }
    }
}
