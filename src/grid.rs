//! # HexGrid: Board Cell Storage
//!
//! Owns every [`Cell`] of the board, keyed by cube coordinate. The board is
//! laid out as a staggered rectangle of `rows` × `columns` cells (see
//! [`Hex::from_offset`]), created through a [`CellHost`].
//!
//! Resizing is incremental: `generate` on an existing grid first removes the
//! cells beyond the new bounds, then only asks the host for coordinates that
//! are still missing. Cells that survive a resize keep their handle and flags.
//!
//! Mutation (`generate`, `clear`, `remove_beyond`, occupancy setters) belongs
//! to the authoritative side of a match. Read-only contexts work from a
//! [`GridReplica`](crate::GridReplica).
//!
//! Queries on a grid that was never generated return empty results. The
//! generated flag, not an error, is what tells "no grid" from "empty grid".

mod pathfind;
mod range;

use std::collections::{BTreeSet, HashMap};

use glam::Vec3;
use hexcube::{Convert, Hex, Layout};
use log::{debug, warn};
use tinyvec::ArrayVec;

use crate::cell::{Cell, CellHost};

#[derive(Clone, Debug, Default)]
pub struct HexGrid {
    layout: Layout,
    rows: i32,
    columns: i32,
    generated: bool,
    tree: BTreeSet<Hex>,
    // None: the host declined to create a cell, the slot is still taken
    hash: HashMap<Hex, Option<Cell>>,
}

impl HexGrid {
    pub fn new(layout: Layout) -> Self {
        Self { layout, ..Default::default() }
    }

    pub fn layout(&self) -> &Layout { &self.layout }

    /// (rows, columns)
    pub fn dimensions(&self) -> (i32, i32) { (self.rows, self.columns) }

    pub fn is_generated(&self) -> bool { self.generated }

    /// Number of coordinate slots, including those without a cell
    pub fn len(&self) -> usize { self.hash.len() }

    pub fn is_empty(&self) -> bool { self.hash.is_empty() }

    /// Is the coordinate part of the board
    pub fn contains(&self, hex: Hex) -> bool {
        self.generated && self.hash.contains_key(&hex)
    }

    /// Fill the board up to `rows` × `columns`.
    ///
    /// With `clear_first` every existing cell is destroyed beforehand;
    /// otherwise only cells beyond the new bounds are, and existing cells
    /// inside the bounds are left untouched.
    pub fn generate<H>(&mut self, rows: i32, columns: i32, host: &mut H, clear_first: bool)
    where H: CellHost + ?Sized {
        if clear_first {
            self.clear(host);
        } else {
            self.remove_beyond(rows, columns, host);
        }

        let mut created = 0;
        for column in 0..columns {
            for row in 0..rows {
                let hex = Hex::from_offset(row, column);
                if self.hash.contains_key(&hex) { continue }

                let cell = host.spawn(hex, row, column)
                    .map(|handle| Cell::new(hex, self.layout.convert(hex), handle));
                if cell.is_none() {
                    warn!("cell host returned no cell for {hex} at row {row}, column {column}");
                }
                self.insert_slot(hex, cell);
                created += 1;
            }
        }

        self.rows = rows.max(0);
        self.columns = columns.max(0);
        self.generated = true;
        debug!("generated {}x{} grid: {created} new slots, {} total", self.rows, self.columns, self.len());
    }

    /// Destroy every cell and forget the board. Does nothing if the grid was
    /// never generated.
    pub fn clear<H>(&mut self, host: &mut H)
    where H: CellHost + ?Sized {
        if !self.generated { return }

        for hex in &self.tree {
            if let Some(Some(cell)) = self.hash.get(hex) { host.despawn(cell); }
        }
        debug!("cleared {}x{} grid: {} slots", self.rows, self.columns, self.len());

        self.tree.clear();
        self.hash = HashMap::new();
        self.rows = 0;
        self.columns = 0;
        self.generated = false;
    }

    /// Destroy the cells whose (row, column) falls outside `rows` × `columns`.
    ///
    /// A bound below 1 empties the whole grid.
    pub fn remove_beyond<H>(&mut self, rows: i32, columns: i32, host: &mut H)
    where H: CellHost + ?Sized {
        if !self.generated { return }
        if rows < 1 || columns < 1 {
            self.clear(host);
            return;
        }

        let max_rows = rows.max(self.rows);
        let max_columns = columns.max(self.columns);

        let mut removed = 0;
        for column in 0..max_columns {
            for row in 0..max_rows {
                if row < rows && column < columns { continue }

                let hex = Hex::from_offset(row, column);
                let Some(slot) = self.remove_slot(hex) else { continue };
                if let Some(cell) = slot { host.despawn(&cell); }
                removed += 1;
            }
        }
        if removed > 0 { self.hash.shrink_to_fit(); }

        self.rows = rows.min(self.rows);
        self.columns = columns.min(self.columns);
        debug!("removed {removed} slots beyond {rows}x{columns}");
    }

    pub fn lookup(&self, hex: Hex) -> Option<&Cell> {
        if !self.generated { return None }
        self.hash.get(&hex)?.as_ref()
    }

    pub fn cell_mut(&mut self, hex: Hex) -> Option<&mut Cell> {
        if !self.generated { return None }
        self.hash.get_mut(&hex)?.as_mut()
    }

    /// Cell under a world position, Z ignored
    pub fn cell_at(&self, position: Vec3) -> Option<&Cell> {
        self.lookup(self.layout.convert(position))
    }

    /// Every cell in coordinate order. Slots without a cell are skipped.
    pub fn cells(&self) -> Vec<&Cell> {
        if !self.generated { return Vec::new() }
        self.tree.iter().filter_map(|hex| self.hash.get(hex)?.as_ref()).collect()
    }

    /// Every coordinate slot in coordinate order
    pub fn hexes(&self) -> impl Iterator<Item = &Hex> + '_ {
        self.tree.iter()
    }

    /// Neighbouring slots of `hex` in direction table order, or `None` if
    /// `hex` is not on the board.
    pub fn neighbors(&self, hex: Hex) -> Option<ArrayVec<[Hex; 6]>> {
        if !self.contains(hex) { return None }
        Some(hex.neighbors().into_iter().filter(|it| self.hash.contains_key(it)).collect())
    }

    /// Mark or unmark a piece standing on the cell. False if there is no cell.
    pub fn set_occupied(&mut self, hex: Hex, occupied: bool) -> bool {
        let Some(cell) = self.cell_mut(hex) else { return false };
        cell.occupied = occupied;
        true
    }

    /// Mark or unmark the cell as no-go. False if there is no cell.
    pub fn set_null(&mut self, hex: Hex, null: bool) -> bool {
        let Some(cell) = self.cell_mut(hex) else { return false };
        cell.null = null;
        true
    }

    pub(crate) fn insert_slot(&mut self, hex: Hex, cell: Option<Cell>) {
        self.tree.insert(hex);
        self.hash.insert(hex, cell);
    }

    fn remove_slot(&mut self, hex: Hex) -> Option<Option<Cell>> {
        self.tree.remove(&hex);
        self.hash.remove(&hex)
    }

    pub(crate) fn set_state(&mut self, rows: i32, columns: i32, generated: bool) {
        self.rows = rows;
        self.columns = columns;
        self.generated = generated;
    }

    /// Has a cell that paths may pass through
    fn is_traversable(&self, hex: Hex) -> bool {
        self.lookup(hex).is_some_and(Cell::is_traversable)
    }
}
