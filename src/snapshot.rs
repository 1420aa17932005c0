//! # Board Replication
//!
//! Only the authoritative side of a match mutates its [`HexGrid`]. Everyone
//! else receives a [`GridSnapshot`] (over the wire as bincode) and rebuilds a
//! [`GridReplica`], which exposes the grid's read-only queries and nothing
//! that mutates it.

use std::ops::Deref;

use bincode::{
    config,
    error::{DecodeError, EncodeError},
};
use hexcube::{Hex, Layout};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{cell::Cell, grid::HexGrid};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct GridSnapshot {
    pub layout: Layout,
    pub rows: i32,
    pub columns: i32,
    pub generated: bool,
    /// Every coordinate slot in coordinate order, `None` where the slot has no cell
    pub slots: Vec<(Hex, Option<Cell>)>,
}

impl GridSnapshot {
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        bincode::serde::encode_to_vec(self, config::legacy())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let (snapshot, _) = bincode::serde::decode_from_slice(bytes, config::legacy())?;
        Ok(snapshot)
    }
}

impl HexGrid {
    pub fn snapshot(&self) -> GridSnapshot {
        let (rows, columns) = self.dimensions();
        GridSnapshot {
            layout: *self.layout(),
            rows,
            columns,
            generated: self.is_generated(),
            slots: self.hexes().map(|&hex| (hex, self.lookup(hex).copied())).collect(),
        }
    }
}

/// Read-only copy of an authoritative grid
#[derive(Clone, Debug, Default)]
pub struct GridReplica(HexGrid);

impl From<GridSnapshot> for GridReplica {
    fn from(snapshot: GridSnapshot) -> Self {
        let mut grid = HexGrid::new(snapshot.layout);
        for (hex, cell) in snapshot.slots {
            if !hex.is_valid() {
                warn!("dropping snapshot slot {hex}: not a cube coordinate");
                continue;
            }
            if cell.is_some_and(|cell| cell.hex != hex) {
                warn!("dropping snapshot cell filed under {hex}: belongs elsewhere");
                grid.insert_slot(hex, None);
                continue;
            }
            grid.insert_slot(hex, cell);
        }
        grid.set_state(snapshot.rows, snapshot.columns, snapshot.generated);
        GridReplica(grid)
    }
}

impl Deref for GridReplica {
    type Target = HexGrid;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
