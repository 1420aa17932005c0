//! Range queries are geometric: a cell `n` steps away is in range even when
//! every route to it is blocked by pieces.

use hexcube::Hex;

use super::HexGrid;
use crate::cell::Cell;

impl HexGrid {
    /// Cells within `distance` steps of `origin`, nearest first.
    ///
    /// With `ignore_occupied`, cells holding a piece are left out, the origin
    /// included. `None` when nothing is found.
    pub fn cells_within_range(&self, origin: Hex, distance: i32, ignore_occupied: bool) -> Option<Vec<&Cell>> {
        let cells: Vec<&Cell> = self.disk(origin, distance)
            .filter(|cell| !(ignore_occupied && cell.occupied))
            .collect();
        (!cells.is_empty()).then_some(cells)
    }

    /// Occupied cells within `distance` steps of `origin`, nearest first.
    ///
    /// `None` when nothing is found.
    pub fn occupied_cells_within_range(
        &self,
        origin: Hex,
        distance: i32,
        ignore_null_cells: bool,
        ignore_origin: bool,
    ) -> Option<Vec<&Cell>> {
        let cells: Vec<&Cell> = self.disk(origin, distance)
            .filter(|cell| cell.occupied)
            .filter(|cell| !(ignore_null_cells && cell.null))
            .filter(|cell| !(ignore_origin && cell.hex == origin))
            .collect();
        (!cells.is_empty()).then_some(cells)
    }

    /// Cells within `distance` of `origin`, nearest first, equally near ones
    /// in coordinate order
    fn disk(&self, origin: Hex, distance: i32) -> impl Iterator<Item = &Cell> + '_ {
        if !self.generated || distance < 0 { return Vec::new().into_iter() }

        let radius = distance as u64;
        let area = radius.saturating_mul(radius + 1).saturating_mul(3).saturating_add(1);
        // walk the geometric disk only when it is smaller than the board and
        // centred on it, otherwise scan the board
        let mut hexes: Vec<Hex> = if self.contains(origin) && area <= self.len() as u64 {
            origin.disk(distance).into_iter().filter(|hex| self.hash.contains_key(hex)).collect()
        } else {
            self.tree.iter().copied().filter(|hex| origin.distance(hex) <= distance).collect()
        };
        hexes.sort_by_key(|hex| (origin.distance(hex), *hex));

        hexes.into_iter().filter_map(|hex| self.lookup(hex)).collect::<Vec<_>>().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::testing::*;

    fn hexes(cells: Option<Vec<&Cell>>) -> Vec<Hex> {
        cells.unwrap_or_default().into_iter().map(|cell| cell.hex).collect()
    }

    #[test]
    fn test_range_one_on_interior_is_seven() {
        let grid = open_grid(5, 5);
        let origin = Hex::from_offset(2, 2);

        let found = hexes(grid.cells_within_range(origin, 1, false));
        assert_eq!(found.len(), 7);
        assert_eq!(found[0], origin);
        for neighbor in origin.neighbors() {
            assert!(found.contains(&neighbor), "missing neighbor {neighbor}");
        }
    }

    #[test]
    fn test_range_zero_is_origin() {
        let grid = open_grid(3, 3);
        let origin = Hex::from_offset(1, 1);
        assert_eq!(hexes(grid.cells_within_range(origin, 0, false)), vec![origin]);
    }

    #[test]
    fn test_range_clipped_by_board_edge() {
        let grid = open_grid(5, 5);
        let corner = Hex::from_offset(0, 0);
        let found = hexes(grid.cells_within_range(corner, 2, false));
        assert!(!found.is_empty() && found.len() < 19);
        assert!(found.iter().all(|hex| hex.distance(&corner) <= 2));
    }

    #[test]
    fn test_range_is_not_walled_off_by_pieces() {
        let mut grid = open_grid(7, 7);
        let origin = Hex::from_offset(3, 3);
        for neighbor in origin.neighbors() { grid.set_occupied(neighbor, true); }

        let found = hexes(grid.cells_within_range(origin, 2, true));
        assert_eq!(found.len(), 1 + 12, "origin plus the full second ring");
        assert!(origin.ring(2).iter().all(|hex| found.contains(hex)));
        assert!(origin.neighbors().iter().all(|hex| !found.contains(hex)));
    }

    #[test]
    fn test_range_ignore_occupied_excludes_origin() {
        let mut grid = open_grid(3, 3);
        let origin = Hex::from_offset(1, 1);
        grid.set_occupied(origin, true);

        assert_eq!(hexes(grid.cells_within_range(origin, 0, false)), vec![origin]);
        assert!(grid.cells_within_range(origin, 0, true).is_none());
    }

    #[test]
    fn test_range_negative_or_ungenerated_finds_nothing() {
        let grid = open_grid(3, 3);
        assert!(grid.cells_within_range(Hex::ORIGIN, -1, false).is_none());
        assert!(HexGrid::default().cells_within_range(Hex::ORIGIN, 3, false).is_none());
    }

    #[test]
    fn test_occupied_range_filters() {
        let mut grid = open_grid(7, 7);
        let origin = Hex::from_offset(3, 3);
        let near = origin.neighbor(0);
        let null = origin.neighbor(2) + Hex::direction(2);
        let far = origin + Hex::direction(3) * 3;
        for hex in [origin, near, null, far] { grid.set_occupied(hex, true); }
        grid.set_null(null, true);

        let all = hexes(grid.occupied_cells_within_range(origin, 2, false, false));
        assert_eq!(all, vec![origin, near, null]);

        let no_null = hexes(grid.occupied_cells_within_range(origin, 2, true, false));
        assert_eq!(no_null, vec![origin, near]);

        let no_origin = hexes(grid.occupied_cells_within_range(origin, 2, true, true));
        assert_eq!(no_origin, vec![near]);

        let wide = hexes(grid.occupied_cells_within_range(origin, 3, false, true));
        assert!(wide.contains(&far));
    }

    #[test]
    fn test_range_beyond_the_board_is_the_whole_board() {
        let grid = open_grid(5, 5);
        let origin = Hex::from_offset(2, 2);

        let found = hexes(grid.cells_within_range(origin, i32::MAX, false));
        assert_eq!(found.len(), 25);
        assert_eq!(found[0], origin);
        let distances: Vec<i32> = found.iter().map(|hex| hex.distance(&origin)).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]), "not nearest first: {distances:?}");

        let occupied = hexes(grid.occupied_cells_within_range(origin, i32::MAX, false, false));
        assert!(occupied.is_empty());
    }

    #[test]
    fn test_range_scan_matches_disk_walk() {
        let mut grid = open_grid(9, 9);
        let origin = Hex::from_offset(4, 4);
        grid.set_occupied(origin.neighbor(1), true);
        // radius 2 walks the disk, radius 5 is wider than the board and scans it
        let near = hexes(grid.cells_within_range(origin, 2, true));
        let wide = hexes(grid.cells_within_range(origin, 5, true));
        assert_eq!(&wide[..near.len()], &near[..]);
        assert!(wide[near.len()..].iter().all(|hex| hex.distance(&origin) > 2));
    }

    #[test]
    fn test_range_around_an_off_board_origin() {
        let grid = open_grid(3, 3);
        let origin = Hex::from_offset(1, 4);
        let found = hexes(grid.cells_within_range(origin, 2, false));
        assert!(!found.is_empty());
        assert!(found.iter().all(|hex| grid.contains(*hex) && hex.distance(&origin) <= 2));
        assert!(grid.cells_within_range(Hex::new(i32::MAX, 0), 3, false).is_none());
    }

    #[test]
    fn test_occupied_range_empty_board() {
        let grid = open_grid(4, 4);
        assert!(grid.occupied_cells_within_range(Hex::from_offset(1, 1), 3, false, false).is_none());
    }
}
