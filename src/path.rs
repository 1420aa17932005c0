use std::ops::Index;

use derive_more::Display;
use glam::Vec3;
use hexcube::Hex;
use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Ordered cells from a start to a goal, both ends included.
///
/// Cells are copied out of the grid when the path is found, so a path stays
/// valid to read after the grid changes; whether its cells still exist is for
/// the reader to check.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// An empty path is the invalid path
    pub fn is_valid(&self) -> bool { !self.cells.is_empty() }

    /// Hop count: cells minus one
    pub fn length(&self) -> usize { self.cells.len().saturating_sub(1) }

    pub fn num_cells(&self) -> usize { self.cells.len() }

    pub fn cells(&self) -> &[Cell] { &self.cells }

    pub fn get(&self, index: usize) -> Option<&Cell> { self.cells.get(index) }

    pub fn first(&self) -> Option<&Cell> { self.cells.first() }

    pub fn last(&self) -> Option<&Cell> { self.cells.last() }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> { self.cells.iter() }

    pub fn hexes(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.iter().map(|cell| cell.hex)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.cells.iter().map(|cell| cell.position)
    }

    /// Consecutive (from, to) world positions, for drawing the path as lines
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.cells.windows(2).map(|pair| (pair[0].position, pair[1].position))
    }
}

impl Index<usize> for Path {
    type Output = Cell;
    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// Outcome of a path request
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum PathFindStatus {
    #[display("success")]
    Success,
    #[display("already at goal")]
    AlreadyAtGoal,
    /// Goal unreachable, path leads to the closest reachable cell
    #[display("partial")]
    Partial,
    #[display("no route")]
    Failure,
    /// Start or goal not usable on this board
    #[display("invalid targets")]
    InvalidTargets,
    #[display("invalid distance")]
    InvalidDistance,
    #[display("no grid generated")]
    NoGridGenerated,
}

impl PathFindStatus {
    /// Does the result carry a path to follow
    pub fn has_path(&self) -> bool {
        matches!(self, Self::Success | Self::AlreadyAtGoal | Self::Partial)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathFindResult {
    pub status: PathFindStatus,
    /// Empty unless `status.has_path()`
    pub path: Path,
}

impl PathFindResult {
    pub fn new(status: PathFindStatus, path: Path) -> Self {
        Self { status, path }
    }

    /// Result with no path
    pub fn fail(status: PathFindStatus) -> Self {
        Self { status, path: Path::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellHandle;

    fn cell(x: i32, y: i32) -> Cell {
        let hex = Hex::new(x, y);
        Cell::new(hex, Vec3::new(x as f32, y as f32, 0.), CellHandle(0))
    }

    #[test]
    fn test_empty_path_is_invalid() {
        let path = Path::default();
        assert!(!path.is_valid());
        assert_eq!(path.length(), 0);
        assert_eq!(path.segments().count(), 0);
    }

    #[test]
    fn test_length_is_hop_count() {
        let path = Path::new(vec![cell(0, 0), cell(1, 0), cell(2, 0)]);
        assert!(path.is_valid());
        assert_eq!(path.length(), 2);
        assert_eq!(path.num_cells(), 3);
        assert_eq!(path[1].hex, Hex::new(1, 0));
        assert_eq!(path.last().map(|it| it.hex), Some(Hex::new(2, 0)));
    }

    #[test]
    fn test_segments_join_consecutive_cells() {
        let path = Path::new(vec![cell(0, 0), cell(1, 0), cell(1, 1)]);
        let segments: Vec<(Vec3, Vec3)> = path.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].1, segments[1].0);
    }

    #[test]
    fn test_status_display_and_has_path() {
        assert_eq!(PathFindStatus::NoGridGenerated.to_string(), "no grid generated");
        assert!(PathFindStatus::Partial.has_path());
        assert!(!PathFindStatus::Failure.has_path());
        assert!(!PathFindResult::fail(PathFindStatus::InvalidTargets).path.is_valid());
    }
}
