use std::collections::{BTreeMap, VecDeque};

use itertools::Itertools;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{EdgeRef, VisitMap, Visitable};
use tracing::{debug, instrument};

use crate::board::Board;
use crate::connector::ConnectorKind;
use crate::error::PathError;
use crate::location::CellNumber;

/// Largest single move; moves range over `1..=DIE_FACES` cells.
pub const DIE_FACES: u8 = 6;

/// How an edge of the [`BoardGraph`] is taken.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Move {
    /// Advance this many cells, then follow any connector on the landing cell to its end.
    Roll(u8),
    /// The forced continuation from the mouth of a climb.
    Climb,
}

/// Every move available from every cell, with connector traversal folded in.
///
/// Node `n - 1` is cell `n`. Parallel edges are kept: two roll sizes that end up on the same cell are two edges.
#[derive(Clone, Debug)]
pub struct BoardGraph {
    graph: DiGraph<CellNumber, Move>,
}

impl BoardGraph {
    /// Derive the graph from the connectors currently on `board`.
    ///
    /// A cell that is the start of a climb has exactly one outgoing edge, to the climb's end.
    /// Every other cell (slide endpoints and climb ends included) gets one edge per roll that does not overshoot the finish;
    /// a roll landing on any connector endpoint is redirected to that connector's end.
    #[instrument(skip_all, fields(cells = board.last_cell()))]
    pub fn build(board: &Board) -> Self {
        let last = board.last_cell();
        let mut graph = DiGraph::with_capacity(last, last * DIE_FACES as usize);
        let nodes = (1..=last).map(|number| graph.add_node(number)).collect_vec();

        for from in 1..=last {
            let source = nodes[from - 1];

            match board.connector_at(from) {
                Some(connector) if connector.kind == ConnectorKind::Climb && connector.start == from => {
                    graph.add_edge(source, nodes[connector.end - 1], Move::Climb);
                }
                _ => {
                    for roll in 1..=DIE_FACES {
                        let target = from + roll as usize;
                        if target > last {
                            break;
                        }

                        let destination = board.connector_at(target).map_or(target, |connector| connector.end);
                        graph.add_edge(source, nodes[destination - 1], Move::Roll(roll));
                    }
                }
            }
        }

        debug!(edges = graph.edge_count(), "board graph built");
        Self { graph }
    }

    /// Number of cells, i.e. the finish cell.
    pub fn last_cell(&self) -> CellNumber {
        self.graph.node_count()
    }

    fn index_of(&self, cell: CellNumber) -> Result<NodeIndex, PathError> {
        if cell == 0 || cell > self.last_cell() {
            return Err(PathError::UnknownCell { cell, last: self.last_cell() });
        }

        Ok(NodeIndex::new(cell - 1))
    }

    /// Cells reachable from `cell` in one move, ordered by roll size, duplicates included.
    pub fn moves_from(&self, cell: CellNumber) -> Result<Vec<CellNumber>, PathError> {
        let source = self.index_of(cell)?;

        Ok(self.graph.edges(source)
            .map(|edge| (*edge.weight(), self.graph[edge.target()]))
            .sorted_by_key(|(step, _)| *step)
            .map(|(_, destination)| destination)
            .collect_vec())
    }

    /// The whole graph as `cell -> moves_from(cell)`.
    pub fn adjacency(&self) -> BTreeMap<CellNumber, Vec<CellNumber>> {
        (1..=self.last_cell())
            .map(|cell| (cell, self.moves_from(cell).unwrap_or_default()))
            .collect()
    }

    /// Fewest moves from `start` to `goal`, by breadth-first search with every edge weighing one move.
    ///
    /// Returns `Ok(None)` when the search runs out of cells without reaching `goal`.
    pub fn shortest_path(&self, start: CellNumber, goal: CellNumber) -> Result<Option<usize>, PathError> {
        let origin = self.index_of(start)?;
        let target = self.index_of(goal)?;

        let mut discovered = self.graph.visit_map();
        discovered.visit(origin);
        let mut frontier = VecDeque::from([(origin, 0usize)]);

        while let Some((node, distance)) = frontier.pop_front() {
            if node == target {
                debug!(start, goal, distance, "path found");
                return Ok(Some(distance));
            }

            for next in self.graph.neighbors(node) {
                // parallel edges hit an already discovered node and are skipped
                if discovered.visit(next) {
                    frontier.push_back((next, distance + 1));
                }
            }
        }

        debug!(start, goal, "no path");
        Ok(None)
    }
}

/// Free-function form of [`BoardGraph::build`].
pub fn build_graph(board: &Board) -> BoardGraph {
    BoardGraph::build(board)
}

/// Free-function form of [`BoardGraph::shortest_path`].
pub fn shortest_path(graph: &BoardGraph, start: CellNumber, goal: CellNumber) -> Result<Option<usize>, PathError> {
    graph.shortest_path(start, goal)
}
