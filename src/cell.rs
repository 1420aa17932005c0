use glam::Vec3;
use hexcube::Hex;
use serde::{Deserialize, Serialize};

/// Opaque reference to whatever represents a cell outside the grid (a tile
/// actor, a sprite, an index into someone else's table).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CellHandle(pub u32);

/// One position on the board.
///
/// Owned by the [`HexGrid`](crate::HexGrid); everything else refers to a cell
/// by its `hex`. The two flags are written by the piece placement layer and
/// only read by the grid's queries.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Cell {
    pub hex: Hex,
    /// World-space centre
    pub position: Vec3,
    pub handle: CellHandle,
    /// A piece stands here
    pub occupied: bool,
    /// Keeps its coordinate slot but is excluded from placement and traversal
    pub null: bool,
}

impl Cell {
    pub fn new(hex: Hex, position: Vec3, handle: CellHandle) -> Self {
        Self { hex, position, handle, occupied: false, null: false }
    }

    /// Can a path pass through this cell
    pub fn is_traversable(&self) -> bool {
        !self.occupied && !self.null
    }
}

/// Creates and destroys the external representation of cells as the grid
/// grows and shrinks.
///
/// Any `FnMut(Hex, i32, i32) -> Option<CellHandle>` closure is a host whose
/// cells need no cleanup.
pub trait CellHost {
    /// Called once per newly needed coordinate with its (row, column) in the
    /// rectangular layout. `None` leaves the slot without a cell.
    fn spawn(&mut self, hex: Hex, row: i32, column: i32) -> Option<CellHandle>;

    /// Called once per cell removed from the grid.
    fn despawn(&mut self, _cell: &Cell) {}
}

impl<F> CellHost for F
where F: FnMut(Hex, i32, i32) -> Option<CellHandle> {
    fn spawn(&mut self, hex: Hex, row: i32, column: i32) -> Option<CellHandle> {
        self(hex, row, column)
    }
}
