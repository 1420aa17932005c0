//! A* over the board.
//!
//! Every step costs 1 and the heuristic is hex distance, which never
//! overestimates even on a board with holes. Cells holding a piece or marked
//! null are walls, except that the start can always be left and the goal can
//! always be entered. Neighbours are expanded in direction table order, so
//! equal-cost routes are always resolved the same way.

use std::collections::HashMap;

use hexcube::Hex;
use log::debug;
use pathfinding::prelude::{astar, dijkstra_reach};
use tinyvec::ArrayVec;

use super::HexGrid;
use crate::{
    cell::Cell,
    path::{Path, PathFindResult, PathFindStatus},
};

impl HexGrid {
    /// Shortest route from `start` to `goal` of at most `max_distance` steps.
    ///
    /// With `allow_partial`, an unreachable (or off-board) goal yields the
    /// route to the reachable cell closest to it instead of a failure.
    pub fn find_path(&self, start: Hex, goal: Hex, allow_partial: bool, max_distance: i32) -> PathFindResult {
        let result = self.search(start, goal, allow_partial, max_distance);
        if result.status != PathFindStatus::Success {
            debug!("path {start} -> {goal} (max {max_distance}, partial {allow_partial}): {}", result.status);
        }
        result
    }

    /// [`HexGrid::find_path`] between two cells held by the caller
    pub fn find_path_between(
        &self,
        start: Option<&Cell>,
        goal: Option<&Cell>,
        allow_partial: bool,
        max_distance: i32,
    ) -> PathFindResult {
        let (Some(start), Some(goal)) = (start, goal) else {
            return PathFindResult::fail(PathFindStatus::InvalidTargets);
        };
        self.find_path(start.hex, goal.hex, allow_partial, max_distance)
    }

    fn search(&self, start: Hex, goal: Hex, allow_partial: bool, max_distance: i32) -> PathFindResult {
        use PathFindStatus::*;

        if !self.generated { return PathFindResult::fail(NoGridGenerated) }
        if !self.contains(start) || (!allow_partial && !self.contains(goal)) {
            return PathFindResult::fail(InvalidTargets);
        }
        if max_distance <= 0 { return PathFindResult::fail(InvalidDistance) }

        // a slot the host left empty can be neither left nor entered
        let Some(&start_cell) = self.lookup(start) else { return PathFindResult::fail(InvalidTargets) };
        let goal_cell = self.lookup(goal);
        if goal_cell.is_none() && !allow_partial { return PathFindResult::fail(InvalidTargets) }

        if start == goal { return PathFindResult::new(AlreadyAtGoal, Path::new(vec![start_cell])) }

        let successors = |hex: &Hex| self.successors(*hex, start, goal, max_distance);

        if goal_cell.is_some() {
            let found = astar(&start, successors, |hex| hex.distance(&goal), |hex| *hex == goal);
            if let Some((hexes, cost)) = found {
                if cost <= max_distance { return PathFindResult::new(Success, self.path_of(&hexes)) }
            }
        }

        if !allow_partial { return PathFindResult::fail(Failure) }
        PathFindResult::new(Partial, self.path_of(&self.closest_route(start, goal, max_distance)))
    }

    /// Route to the cell nearest `goal` among those reachable within
    /// `max_distance` steps, preferring fewer steps on ties.
    fn closest_route(&self, start: Hex, goal: Hex, max_distance: i32) -> Vec<Hex> {
        let reachable = dijkstra_reach(&start, |hex: &Hex| self.successors(*hex, start, goal, max_distance))
            .take_while(|item| item.total_cost <= max_distance);

        let mut parents: HashMap<Hex, Hex> = HashMap::new();
        let mut best = (start.distance(&goal), start);
        for item in reachable {
            if let Some(parent) = item.parent { parents.insert(item.node, parent); }
            // reached in cost order, so the first of equally close cells is the cheapest
            let closeness = item.node.distance(&goal);
            if closeness < best.0 { best = (closeness, item.node); }
        }

        let mut route = vec![best.1];
        let mut current = best.1;
        while let Some(&parent) = parents.get(&current) {
            route.push(parent);
            current = parent;
        }
        route.reverse();
        route
    }

    fn successors(&self, hex: Hex, start: Hex, goal: Hex, max_distance: i32) -> ArrayVec<[(Hex, i32); 6]> {
        self.neighbors(hex).unwrap_or_default().into_iter()
            // nothing farther than this can be on a short enough route
            .filter(|next| start.distance(next) <= max_distance)
            .filter(|&next| (next == goal && self.lookup(next).is_some()) || self.is_traversable(next))
            .map(|next| (next, 1))
            .collect()
    }

    fn path_of(&self, hexes: &[Hex]) -> Path {
        Path::new(hexes.iter().filter_map(|hex| self.lookup(*hex).copied()).collect())
    }
}
