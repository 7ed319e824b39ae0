#![warn(missing_docs)]

//! # `ladderboard`
//!
//! Procedural furnishing and analysis of climb-and-slide race boards: a numbered grid where every move advances a piece one to six cells,
//! climbs carry it up the board and slides carry it back down.
//!
//! Begin with a [`Board`], either empty from [`Board::new`] or laid out by hand with a [`BoardBuilder`](builder::BoardBuilder).
//! [`Board::furnish`] is the whole reset-time pipeline: it generates connectors, builds the [`BoardGraph`] and measures the fewest moves from the first cell to the last.
//! The steps are also available on their own as [`generate`], [`build_graph`] and [`shortest_path`].
//!
//! # Internals
//! Cells are numbered from 1 in the bottom-left corner, left to right in every row, rows stacked upward; see [`GridIndexer`].
//!
//! Under the default [`PlacementPolicy::Footprint`], connectors are derived from disjoint rectangles reserved on the numbered matrix:
//! 1. Every footprint size in the configured ranges is shuffled and tried once, at a single random anchor, until the next size would overrun the coverage budget.
//! 2. Each accepted rectangle yields one diagonal pair of corners, which becomes a climb or a slide.
//! 3. A pair that touches an occupied cell is dropped, never retried.
//!
//! The resulting board is expressed as a directed graph G with one vertex per cell.
//! The start of a climb has a single edge to the climb's end; every other cell has one edge per move size that stays on the board,
//! redirected to the end of whatever connector sits on the landing cell.
//! Breadth-first search over G gives the fewest moves between two cells.

pub use board::Board;
pub use builder::BoardBuilder;
pub use cell::Cell;
pub use config::{GeneratorConfig, PlacementPolicy, SizeRange};
pub use connector::{Connector, ConnectorKind};
pub use error::{ConfigError, PathError, PlacementRejection};
pub use generator::{generate, Connectors};
pub use graph::{build_graph, shortest_path, BoardGraph, Move, DIE_FACES};
pub use location::{CellNumber, Dimension, GridIndexer, Location};
pub use placement::Footprint;
pub use rules::{roll, Landing};

pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod config;
pub(crate) mod connector;
pub(crate) mod error;
pub(crate) mod generator;
pub(crate) mod graph;
pub(crate) mod location;
pub mod placement;
pub mod builder;
pub(crate) mod rules;
