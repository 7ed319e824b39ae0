use std::ops::RangeInclusive;
use std::rc::Rc;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::config::{GeneratorConfig, PlacementPolicy};
use crate::connector::{Connector, ConnectorKind};
use crate::location::CellNumber;
use crate::placement::{corners, reserve_footprints};

/// Connectors accepted by one [`generate`] call, split by kind.
#[derive(Clone, Debug, Default)]
pub struct Connectors {
    /// Accepted climbs, in placement order.
    pub climbs: Vec<Rc<Connector>>,
    /// Accepted slides, in placement order.
    pub slides: Vec<Rc<Connector>>,
}

impl Connectors {
    /// Total number of accepted connectors.
    pub fn len(&self) -> usize {
        self.climbs.len() + self.slides.len()
    }

    /// Whether nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Populate `board` with connectors: one pass of slides, then one pass of climbs.
///
/// Existing connectors are kept and block new endpoints. Rejected candidates are dropped without retrying,
/// so the number placed varies from board to board.
#[instrument(skip_all, fields(policy = ?config.policy, rows = board.rows(), columns = board.columns()))]
pub fn generate<R: Rng + ?Sized>(board: &mut Board, config: &GeneratorConfig, rng: &mut R) -> Connectors {
    let mut placed = Connectors::default();

    for kind in [ConnectorKind::Slide, ConnectorKind::Climb] {
        let accepted = match config.policy {
            PlacementPolicy::Footprint => footprint_pass(board, kind, config, rng),
            PlacementPolicy::RetryUntilPlaced => {
                let attempts = config.connectors_per_kind.unwrap_or(board.rows() / 2 + 1);
                retry_pass(board, kind, attempts, rng)
            }
        };

        info!(%kind, count = accepted.len(), "connectors accepted");
        match kind {
            ConnectorKind::Climb => placed.climbs = accepted,
            ConnectorKind::Slide => placed.slides = accepted,
        }
    }

    placed
}

fn assign(board: &mut Board, connector: Connector) -> Option<Rc<Connector>> {
    match board.place(connector) {
        Ok(placed) => Some(placed),
        Err(reason) => {
            debug!(%reason, start = connector.start, end = connector.end, "connector dropped");
            None
        }
    }
}

fn footprint_pass<R: Rng + ?Sized>(board: &mut Board, kind: ConnectorKind, config: &GeneratorConfig, rng: &mut R) -> Vec<Rc<Connector>> {
    let footprints = reserve_footprints(board.indexer(), config, rng);

    let mut accepted = Vec::with_capacity(footprints.len());
    for footprint in &footprints {
        let Some((lower, upper)) = corners(footprint, rng) else {
            continue;
        };
        if let Some(placed) = assign(board, Connector::between(kind, lower, upper)) {
            accepted.push(placed);
        }
    }

    accepted
}

// where each kind may start and, given a start, end; cell 1 is never used
fn start_range(kind: ConnectorKind, last: CellNumber) -> RangeInclusive<CellNumber> {
    match kind {
        ConnectorKind::Climb => 2..=last.saturating_sub(1),
        ConnectorKind::Slide => 3..=last,
    }
}

fn end_range(kind: ConnectorKind, start: CellNumber, last: CellNumber) -> RangeInclusive<CellNumber> {
    match kind {
        ConnectorKind::Climb => start + 1..=last,
        ConnectorKind::Slide => 2..=start - 1,
    }
}

fn retry_pass<R: Rng + ?Sized>(board: &mut Board, kind: ConnectorKind, attempts: usize, rng: &mut R) -> Vec<Rc<Connector>> {
    let starts = start_range(kind, board.last_cell());
    if starts.is_empty() {
        return Vec::new();
    }

    let mut accepted = Vec::new();
    for _ in 0..attempts {
        let start = rng.random_range(starts.clone());
        if board.connector_at(start).is_some() {
            debug!(start, "start already taken");
            continue;
        }

        let ends = end_range(kind, start, board.last_cell());
        if ends.clone().all(|end| board.connector_at(end).is_some()) {
            debug!(start, "no free end");
            continue;
        }

        // terminates: at least one free end exists
        let end = loop {
            let end = rng.random_range(ends.clone());
            if board.connector_at(end).is_none() {
                break end;
            }
        };

        if let Some(placed) = assign(board, Connector::new(kind, start, end)) {
            accepted.push(placed);
        }
    }

    accepted
}
