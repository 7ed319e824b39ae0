use std::rc::Rc;

use crate::connector::Connector;
use crate::location::CellNumber;

/// One square of the race track.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub(crate) number: CellNumber,
    // shared with the other endpoint and the board's connector list
    pub(crate) contents: Option<Rc<Connector>>,
}

impl Cell {
    pub(crate) fn empty(number: CellNumber) -> Self {
        Self { number, contents: None }
    }

    /// This cell's number.
    #[inline]
    pub fn number(&self) -> CellNumber {
        self.number
    }

    /// The connector with an endpoint on this cell, if any.
    #[inline]
    pub fn contents(&self) -> Option<&Rc<Connector>> {
        self.contents.as_ref()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    /// Whether a piece landing here is carried elsewhere straight away.
    pub fn is_mouth(&self) -> bool {
        self.contents.as_ref().is_some_and(|connector| connector.start == self.number)
    }
}
