//! board: generate a board, find a path across it, and walk a piece along it.
//!
//! Usage:
//!   RUST_LOG=debug cargo run --bin board -- --rows 8 --columns 8 --goal 7,7 --block 3,3 --block 3,4

use std::str::FromStr;

use clap::Parser;
use glam::{Vec2, Vec3};
use log::{info, warn};

use hexboard::{
    CellHandle, FollowEvent, Hex, HexGrid, Layout, MovementHost, PathFollower,
};

const TICK: f32 = 1. / 60.;
const MAX_TICKS: usize = 100_000;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = 8)]
    rows: i32,
    #[arg(long, default_value_t = 8)]
    columns: i32,
    /// Distance between neighbouring cell centres is √3 × size
    #[arg(long, value_name = "UNITS", default_value_t = 10.)]
    size: f32,
    #[arg(long, value_name = "ROW,COLUMN", default_value = "0,0")]
    start: Offset,
    #[arg(long, value_name = "ROW,COLUMN", default_value = "7,7")]
    goal: Offset,
    /// Longest route to consider, in steps
    #[arg(long, value_name = "STEPS", default_value_t = 32)]
    max_distance: i32,
    /// Settle for the closest reachable cell when the goal can't be reached
    #[arg(long)]
    allow_partial: bool,
    /// Cell to put a piece on; repeat for more
    #[arg(long = "block", value_name = "ROW,COLUMN")]
    blocks: Vec<Offset>,
    /// Move the piece by velocity instead of by input
    #[arg(long)]
    direct: bool,
    /// Units per second when moving by input; above 120 the piece overshoots cells
    #[arg(long, value_name = "UNITS", default_value_t = 60.)]
    speed: f32,
}

/// Staggered (row, column) position on the board
#[derive(Clone, Copy, Debug)]
struct Offset {
    row: i32,
    column: i32,
}

impl Offset {
    fn hex(self) -> Hex {
        Hex::from_offset(self.row, self.column)
    }
}

impl FromStr for Offset {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (row, column) = value.split_once(',').ok_or_else(|| "expected ROW,COLUMN".to_string())?;
        let row = row.trim().parse().map_err(|error| format!("invalid row: {error}"))?;
        let column = column.trim().parse().map_err(|error| format!("invalid column: {error}"))?;
        Ok(Self { row, column })
    }
}

/// Piece that integrates whatever the follower asks for once per tick
struct Piece {
    position: Vec3,
    velocity: Vec3,
    speed: f32,
    acceleration: bool,
}

impl Piece {
    fn tick(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
        self.velocity = Vec3::ZERO;
    }
}

impl MovementHost for Piece {
    fn feet_location(&self) -> Vec3 { self.position }

    fn use_acceleration(&self) -> bool { self.acceleration }

    fn request_path_move(&mut self, input: Vec3) {
        self.velocity = input * self.speed;
    }

    fn request_direct_move(&mut self, velocity: Vec3, _not_following_last_segment: bool) {
        self.velocity = velocity;
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut grid = HexGrid::new(Layout::new(Vec3::ZERO, Vec2::splat(args.size)));
    let mut next = 0;
    let mut spawn = |_: Hex, _: i32, _: i32| {
        next += 1;
        Some(CellHandle(next))
    };
    grid.generate(args.rows, args.columns, &mut spawn, true);
    info!("generated {} cells on a {}x{} board", grid.len(), args.rows, args.columns);

    for block in &args.blocks {
        if !grid.set_occupied(block.hex(), true) {
            warn!("can't block {},{}: no cell there", block.row, block.column);
        }
    }

    let (start, goal) = (args.start.hex(), args.goal.hex());
    let result = grid.find_path(start, goal, args.allow_partial, args.max_distance);
    if !result.status.has_path() {
        warn!("no path from {start} to {goal}: {}", result.status);
        return;
    }
    info!("{} path from {start} to {goal}, {} hops", result.status, result.path.length());
    for (from, to) in result.path.segments() {
        info!("  {from} -> {to}");
    }

    let Some(first) = result.path.first() else { return };
    let mut piece = Piece {
        position: first.position,
        velocity: Vec3::ZERO,
        speed: args.speed,
        acceleration: !args.direct,
    };
    let mut follower = PathFollower::new();
    follower.follow(result.path);

    for tick in 0..MAX_TICKS {
        match follower.advance(&mut piece, &grid, TICK) {
            Some(FollowEvent::SegmentCompleted { cell }) => {
                info!("tick {tick}: heading for {} at {}", cell.hex, cell.position);
            }
            Some(FollowEvent::PathFinished { cell, aborted }) => {
                let outcome = if aborted { "aborted" } else { "arrived" };
                info!("tick {tick}: {outcome} at {} ({})", cell.hex, piece.position);
                return;
            }
            None => {}
        }
        piece.tick(TICK);
    }
    warn!("piece still moving after {MAX_TICKS} ticks, at {}", piece.position);
}
