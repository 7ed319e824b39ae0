use std::fmt::{Display, Formatter};
use std::rc::Rc;

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::cell::Cell;
use crate::config::GeneratorConfig;
use crate::connector::{Connector, ConnectorKind};
use crate::error::{PathError, PlacementRejection};
use crate::generator;
use crate::graph::BoardGraph;
use crate::location::{CellNumber, Dimension, GridIndexer};

/// A race board of `rows * columns` numbered cells and the connectors placed on it.
///
/// The board also keeps the [`BoardGraph`] derived from its connectors and the last distance computed over it.
/// Both are discarded whenever a connector is placed or removed, so a stale graph can never be queried.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) indexer: GridIndexer,
    // cell n lives at index n - 1
    pub(crate) cells: Vec<Cell>,
    pub(crate) climbs: Vec<Rc<Connector>>,
    pub(crate) slides: Vec<Rc<Connector>>,
    pub(crate) graph: Option<BoardGraph>,
    pub(crate) shortest_distance: Option<usize>,
}

impl Board {
    /// A board with every cell empty.
    pub fn new(rows: Dimension, columns: Dimension) -> Self {
        let indexer = GridIndexer::new(rows, columns);
        Self {
            cells: (1..=indexer.last_cell()).map(Cell::empty).collect_vec(),
            indexer,
            climbs: Vec::new(),
            slides: Vec::new(),
            graph: None,
            shortest_distance: None,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.indexer.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn columns(&self) -> usize {
        self.indexer.columns()
    }

    /// The finish cell.
    #[inline]
    pub fn last_cell(&self) -> CellNumber {
        self.indexer.last_cell()
    }

    /// The number/position mapping for this board.
    #[inline]
    pub fn indexer(&self) -> &GridIndexer {
        &self.indexer
    }

    /// Cell `number`, or [`None`] if it is not on the board.
    pub fn cell(&self, number: CellNumber) -> Option<&Cell> {
        number.checked_sub(1).and_then(|index| self.cells.get(index))
    }

    /// Every cell, in ascending order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The connector with an endpoint on cell `number`, if any.
    pub fn connector_at(&self, number: CellNumber) -> Option<&Rc<Connector>> {
        self.cell(number).and_then(Cell::contents)
    }

    /// Placed climbs, in placement order.
    pub fn climbs(&self) -> &[Rc<Connector>] {
        &self.climbs
    }

    /// Placed slides, in placement order.
    pub fn slides(&self) -> &[Rc<Connector>] {
        &self.slides
    }

    /// All placed connectors, slides first.
    pub fn connectors(&self) -> impl Iterator<Item = &Rc<Connector>> {
        self.slides.iter().chain(self.climbs.iter())
    }

    /// The graph built by the last call to [`Self::build_graph`], unless connectors changed since.
    pub fn graph(&self) -> Option<&BoardGraph> {
        self.graph.as_ref()
    }

    /// The result of the last [`Self::calculate_shortest_path`] call.
    ///
    /// `None` both before any query and when the last query found no path.
    pub fn shortest_distance(&self) -> Option<usize> {
        self.shortest_distance
    }

    fn list_for(&mut self, kind: ConnectorKind) -> &mut Vec<Rc<Connector>> {
        match kind {
            ConnectorKind::Climb => &mut self.climbs,
            ConnectorKind::Slide => &mut self.slides,
        }
    }

    fn invalidate(&mut self) {
        self.graph = None;
        self.shortest_distance = None;
    }

    /// Try to put `connector` on the board.
    ///
    /// On success both endpoint cells hold the returned connector and it is appended to the list for its kind.
    /// Nothing changes on failure.
    pub fn place(&mut self, connector: Connector) -> Result<Rc<Connector>, PlacementRejection> {
        connector.validate()?;

        for cell in connector.endpoints() {
            match self.cell(cell) {
                None => return Err(PlacementRejection::OutOfBounds { cell, last: self.last_cell() }),
                Some(existing) if !existing.is_empty() => return Err(PlacementRejection::Occupied { cell }),
                Some(_) => {}
            }
        }

        let shared = Rc::new(connector);
        for cell in connector.endpoints() {
            self.cells[cell - 1].contents = Some(Rc::clone(&shared));
        }
        self.list_for(connector.kind).push(Rc::clone(&shared));
        self.invalidate();

        Ok(shared)
    }

    /// Take `connector` off the board, freeing both endpoints. Returns whether it was present.
    pub fn remove(&mut self, connector: &Rc<Connector>) -> bool {
        let list = self.list_for(connector.kind);
        let Some(position) = list.iter().position(|placed| Rc::ptr_eq(placed, connector)) else {
            return false;
        };
        list.remove(position);

        for cell in connector.endpoints() {
            self.cells[cell - 1].contents = None;
        }
        self.invalidate();

        true
    }

    /// Drop every connector, the graph and the last distance.
    pub fn reset(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.contents = None;
        }
        self.climbs.clear();
        self.slides.clear();
        self.invalidate();
    }

    /// Rebuild the move graph from the current connectors and keep it on the board.
    pub fn build_graph(&mut self) -> &BoardGraph {
        let graph = BoardGraph::build(self);
        self.graph.insert(graph)
    }

    /// Fewest moves from `start` to `goal` over the graph from [`Self::build_graph`].
    ///
    /// Fails with [`PathError::GraphNotBuilt`] if there is no current graph.
    /// `Ok(None)` means the goal cannot be reached.
    pub fn calculate_shortest_path(&mut self, start: CellNumber, goal: CellNumber) -> Result<Option<usize>, PathError> {
        let graph = self.graph.as_ref().ok_or(PathError::GraphNotBuilt)?;
        let distance = graph.shortest_path(start, goal)?;
        self.shortest_distance = distance;
        Ok(distance)
    }

    /// Full reset-time pipeline: clear the board, generate connectors, build the graph and measure the race from the first to the last cell.
    #[instrument(skip_all, fields(rows = self.rows(), columns = self.columns()))]
    pub fn furnish<R: Rng + ?Sized>(&mut self, config: &GeneratorConfig, rng: &mut R) -> Result<Option<usize>, PathError> {
        self.reset();
        let placed = generator::generate(self, config, rng);
        debug!(climbs = placed.climbs.len(), slides = placed.slides.len(), "connectors placed");

        self.build_graph();
        let distance = self.calculate_shortest_path(1, self.last_cell())?;
        match distance {
            Some(moves) => info!(moves, "shortest race computed"),
            None => info!("finish unreachable"),
        }

        Ok(distance)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let width = self.last_cell().to_string().len();
        let matrix = self.indexer.matrix();

        for row in matrix.rows() {
            let line = row.iter()
                .map(|number| {
                    let marker = match self.connector_at(*number) {
                        Some(connector) if connector.start == *number => connector.kind.marker(),
                        Some(_) => '*',
                        None => ' ',
                    };
                    format!("{:>width$}{}", number, marker)
                })
                .join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}
