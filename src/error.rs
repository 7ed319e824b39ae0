use std::path::PathBuf;

use crate::connector::ConnectorKind;
use crate::location::CellNumber;

/// Reasons [`Board::place`](crate::Board::place) may turn a connector away.
///
/// Generation treats every one of these as an expected outcome and moves on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, thiserror::Error)]
pub enum PlacementRejection {
    /// Start and end are the same cell.
    #[error("connector starts and ends on cell {cell}")]
    Degenerate {
        /// The shared endpoint.
        cell: CellNumber,
    },
    /// The endpoints are ordered against the connector's kind, e.g. a climb that descends.
    #[error("{kind} from {start} to {end} runs the wrong way")]
    WrongDirection {
        /// Kind of the rejected connector.
        kind: ConnectorKind,
        /// Requested start.
        start: CellNumber,
        /// Requested end.
        end: CellNumber,
    },
    /// An endpoint is not on the board.
    #[error("cell {cell} is outside 1..={last}")]
    OutOfBounds {
        /// The offending endpoint.
        cell: CellNumber,
        /// The finish cell of the board.
        last: CellNumber,
    },
    /// An endpoint already belongs to another connector.
    #[error("cell {cell} already holds a connector")]
    Occupied {
        /// The occupied endpoint.
        cell: CellNumber,
    },
}

/// Failures of a shortest-path query.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The board graph was never built, or was discarded because connectors changed since.
    #[error("board graph not built; build it before asking for distances")]
    GraphNotBuilt,
    /// The start or goal cell does not exist.
    #[error("cell {cell} is outside 1..={last}")]
    UnknownCell {
        /// The requested cell.
        cell: CellNumber,
        /// The finish cell of the board.
        last: CellNumber,
    },
}

/// Errors that can occur when loading generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`GeneratorConfig`](crate::GeneratorConfig).
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The values parsed but are out of range.
    #[error("config validation error: {0}")]
    Validation(String),
}
