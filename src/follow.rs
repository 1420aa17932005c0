//! # Path Following
//!
//! Walks a board piece along a [`Path`] one simulation tick at a time. The
//! follower does not move anything itself: every tick it reads the agent's
//! location from a [`MovementHost`] and asks it for either a move input
//! (acceleration-based hosts) or a velocity (direct hosts). Which one is up
//! to the host.
//!
//! ```text
//!        follow(path)          segment reached, not last
//! Idle ───────────────▶ Moving ◀────────────────────────┐
//!                         │ └──────────────────────────┘
//!                         ├── last cell reached ──────▶ Completed
//!                         └── next cell destroyed ────▶ Aborted
//! ```
//!
//! `reset` returns to Idle from anywhere, and `follow` starts over from any
//! state.

use glam::Vec3;
use log::debug;

use crate::{cell::Cell, grid::HexGrid, path::Path};

// ===== Tuning =====

/// Planar distance to a cell's centre at which it counts as reached
pub const ARRIVAL_EPSILON: f32 = 1.0;

/// Distance before the final cell at which acceleration-based movement
/// starts slowing down, unless the host says otherwise
pub const DEFAULT_BRAKING_DISTANCE: f32 = 100.0;

/// Floor for the deceleration input scale, so the agent never stalls short
/// of the last cell
pub const MIN_DECELERATION_SPEED: f32 = 0.1;

/// The movement system that actually moves the agent
pub trait MovementHost {
    fn feet_location(&self) -> Vec3;

    /// Move by input direction (true) or by direct velocity (false)
    fn use_acceleration(&self) -> bool;

    fn braking_distance(&self) -> f32 { DEFAULT_BRAKING_DISTANCE }

    /// Input toward the current target, scaled below 1 when braking
    fn request_path_move(&mut self, input: Vec3);

    /// Velocity that covers the remaining displacement in one tick.
    /// `not_following_last_segment` lets the host smooth into the next segment.
    fn request_direct_move(&mut self, velocity: Vec3, not_following_last_segment: bool);
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FollowStatus {
    #[default]
    Idle,
    Moving,
    Completed,
    Aborted,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FollowEvent {
    /// A cell was reached; `cell` is the next target
    SegmentCompleted { cell: Cell },
    /// Following is over; `cell` is the last cell reached
    PathFinished { cell: Cell, aborted: bool },
}

#[derive(Clone, Debug, Default)]
pub struct PathFollower {
    status: FollowStatus,
    path: Path,
    index: usize,
    // (braking distance, first segment to decelerate on)
    deceleration: Option<(f32, usize)>,
    move_input: Vec3,
    segment_direction: Vec3,
    decelerating: bool,
}

impl PathFollower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FollowStatus { self.status }

    pub fn path(&self) -> &Path { &self.path }

    /// Index into the path of the cell currently moved toward
    pub fn current_index(&self) -> usize { self.index }

    pub fn current_target(&self) -> Option<&Cell> {
        match self.status {
            FollowStatus::Moving => self.path.get(self.index),
            _ => None,
        }
    }

    /// Last input or velocity handed to the host
    pub fn move_input(&self) -> Vec3 { self.move_input }

    /// Direction of the segment being followed, zero before the first cell is reached
    pub fn segment_direction(&self) -> Vec3 { self.segment_direction }

    pub fn is_decelerating(&self) -> bool { self.decelerating }

    /// Start following `path` from its first cell. An invalid path is
    /// rejected and leaves the follower as it was.
    pub fn follow(&mut self, path: Path) -> bool {
        if !path.is_valid() { return false }

        self.reset();
        self.path = path;
        self.status = FollowStatus::Moving;
        true
    }

    /// Drop the path and go back to Idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// One simulation tick: check whether the current cell was reached, then
    /// steer the host toward whatever the target is now.
    pub fn advance<H>(&mut self, host: &mut H, grid: &HexGrid, delta_time: f32) -> Option<FollowEvent>
    where H: MovementHost + ?Sized {
        if self.status != FollowStatus::Moving { return None }

        let event = self.update_segment(host.feet_location(), grid);
        if self.status == FollowStatus::Moving {
            self.follow_segment(host, delta_time);
        }
        event
    }

    fn update_segment(&mut self, location: Vec3, grid: &HexGrid) -> Option<FollowEvent> {
        let current = *self.path.get(self.index)?;
        if planar(current.position - location).length_squared() >= ARRIVAL_EPSILON * ARRIVAL_EPSILON {
            return None;
        }

        if self.index + 1 == self.path.num_cells() {
            return Some(self.finish(current, false));
        }

        self.index += 1;
        let next = self.path[self.index];
        if !is_live(grid, &next) {
            return Some(self.finish(current, true));
        }

        self.segment_direction = (next.position - current.position).normalize_or_zero();
        Some(FollowEvent::SegmentCompleted { cell: next })
    }

    fn follow_segment<H>(&mut self, host: &mut H, delta_time: f32)
    where H: MovementHost + ?Sized {
        let location = host.feet_location();
        let target = self.path[self.index].position;
        self.decelerating = false;

        if host.use_acceleration() {
            let mut input = planar(target - location).normalize_or_zero();

            let braking = host.braking_distance();
            if braking > 0. && self.segment_start() >= self.deceleration_segment(braking) {
                let end = self.path.last().map_or(target, |cell| cell.position);
                let to_end = planar(end - location).length();
                if to_end < braking {
                    self.decelerating = true;
                    input *= (to_end / braking).clamp(MIN_DECELERATION_SPEED, 1.);
                }
            }

            self.move_input = input;
            host.request_path_move(input);
        } else {
            let velocity = if delta_time > 0. { planar(target - location) / delta_time } else { Vec3::ZERO };
            let last_segment_start = self.path.num_cells().saturating_sub(2);

            self.move_input = velocity;
            host.request_direct_move(velocity, self.segment_start() < last_segment_start);
        }
    }

    /// Index of the cell the current segment starts from
    fn segment_start(&self) -> usize {
        self.index.saturating_sub(1)
    }

    /// Segment on which braking may begin: the last one whose start is more
    /// than `braking` away from the end of the path, measured along it.
    /// Cached until the braking distance changes.
    fn deceleration_segment(&mut self, braking: f32) -> usize {
        if let Some((cached, segment)) = self.deceleration {
            if cached == braking { return segment }
        }

        let cells = self.path.cells();
        let mut remaining = 0.;
        let mut segment = 0;
        for start in (0..cells.len().saturating_sub(1)).rev() {
            remaining += planar(cells[start + 1].position - cells[start].position).length();
            if remaining > braking {
                segment = start;
                break;
            }
        }

        self.deceleration = Some((braking, segment));
        segment
    }

    fn finish(&mut self, cell: Cell, aborted: bool) -> FollowEvent {
        debug!("path finished at {} ({})", cell.hex, if aborted { "aborted" } else { "completed" });
        self.reset();
        self.status = if aborted { FollowStatus::Aborted } else { FollowStatus::Completed };
        FollowEvent::PathFinished { cell, aborted }
    }
}

// the board is flat, height differences between agent and cells are ignored
fn planar(v: Vec3) -> Vec3 {
    v.with_z(0.)
}

fn is_live(grid: &HexGrid, cell: &Cell) -> bool {
    grid.lookup(cell.hex).is_some_and(|live| live.handle == cell.handle)
}
