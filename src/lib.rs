//! # hexboard
//!
//! Hexagonal board model for a turn-based strategy game: a cube-coordinate
//! grid of cells with neighbour, range, and path queries, plus a follower
//! that walks a board piece along a found path one tick at a time.
//!
//! The grid knows nothing about what a cell or a piece looks like in the
//! game. Cells are created and destroyed through a [`CellHost`], and pieces
//! only show up as the occupancy flag on each [`Cell`].

pub mod cell;
pub mod follow;
pub mod grid;
pub mod path;
pub mod snapshot;

pub use cell::{Cell, CellHandle, CellHost};
pub use follow::{FollowEvent, FollowStatus, MovementHost, PathFollower};
pub use grid::HexGrid;
pub use path::{Path, PathFindResult, PathFindStatus};
pub use snapshot::{GridReplica, GridSnapshot};

pub use hexcube::{Convert, Hex, Layout};
