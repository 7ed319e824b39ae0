//! Hand-laid boards, built one connector at a time.

use std::num::NonZero;
use std::rc::Rc;

use crate::board::Board;
use crate::connector::{Connector, ConnectorKind};
use crate::error::PlacementRejection;
use crate::location::{CellNumber, Dimension};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A connector could not be placed; see the wrapped [`PlacementRejection`].
    Rejected {
        /// The connector as requested.
        connector: Connector,
        /// Why it was turned away.
        reason: PlacementRejection,
    },
}

/// A builder for boards with a fixed, hand-chosen set of connectors.
///
/// Unlike generation, which drops connectors that do not fit, a builder records every failed placement and refuses to [`build`](Self::build).
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
#[derive(Clone)]
pub struct BoardBuilder {
    board: Board,
    // placement order, for pop_connector
    placed: Vec<Rc<Connector>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(10).unwrap(), NonZero::new(10).unwrap()))
    }
}

impl BoardBuilder {
    /// Construct a new [`Self`] with the specified dimensions, specified in `(rows, columns)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            board: Board::new(dims.0, dims.1),
            placed: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    /// Add a connector of `kind` between `cells`. The order in which the cells are given does not matter.
    ///
    /// May cause the builder to enter an invalid state if the connector cannot be placed.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add(&mut self, kind: ConnectorKind, cells: (CellNumber, CellNumber)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        let connector = Connector::between(kind, cells.0, cells.1);
        match self.board.place(connector) {
            Ok(placed) => self.placed.push(placed),
            Err(reason) => self.invalid_reasons.push(BuilderInvalidReason::Rejected { connector, reason }),
        }

        self
    }

    /// Shorthand for [`Self::add`] with [`ConnectorKind::Climb`].
    pub fn add_climb(&mut self, cells: (CellNumber, CellNumber)) -> &mut Self {
        self.add(ConnectorKind::Climb, cells)
    }

    /// Shorthand for [`Self::add`] with [`ConnectorKind::Slide`].
    pub fn add_slide(&mut self, cells: (CellNumber, CellNumber)) -> &mut Self {
        self.add(ConnectorKind::Slide, cells)
    }

    /// Remove the most recently added connector.
    ///
    /// If the builder is in an invalid state or no connectors are present, this function does nothing.
    pub fn pop_connector(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if let Some(last) = self.placed.pop() {
            self.board.remove(&last);
        }

        self
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`] with its graph already built.
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut board = self.board.clone();
        board.build_graph();
        Ok(board)
    }
}
