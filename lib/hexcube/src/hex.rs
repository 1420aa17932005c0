use std::ops::{Mul, Neg};

use derive_more::{Add, Display, Sub};
use serde::{Deserialize, Serialize};

// stepping through the table in order walks once around a hex
pub const DIRECTIONS: [Hex; 6] = [
    Hex { x: 1, y: -1, z: 0 },
    Hex { x: 1, y: 0, z: -1 },
    Hex { x: 0, y: 1, z: -1 },
    Hex { x: -1, y: 1, z: 0 },
    Hex { x: -1, y: 0, z: 1 },
    Hex { x: 0, y: -1, z: 1 },
];

/// A cell on a hexagonal grid in cube coordinates.
///
/// Valid coordinates satisfy `x + y + z == 0`. The derived ordering is only
/// used to give iteration a stable order and carries no spatial meaning.
#[derive(
    Add, Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd,
    Serialize, Sub,
)]
#[display("({x}, {y}, {z})")]
pub struct Hex {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Hex {
    pub const ORIGIN: Hex = Hex { x: 0, y: 0, z: 0 };

    /// Build a coordinate from two axes, deriving the third
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// Raw index mapping: `(row, column, -row-column)`
    pub fn from_indices(row: i32, column: i32) -> Self {
        Self::new(row, column)
    }

    /// Coordinate for a cell of the staggered rectangular layout, where every
    /// second column shifts the row index back by one.
    pub fn from_offset(row: i32, column: i32) -> Self {
        Self::from_indices(row - column.div_euclid(2), column)
    }

    /// Inverse of [`Hex::from_offset`], as `(row, column)`.
    pub fn to_offset(&self) -> (i32, i32) {
        (self.x + self.y.div_euclid(2), self.y)
    }

    pub fn is_valid(&self) -> bool {
        self.x + self.y + self.z == 0
    }

    /// Steps from the origin
    pub fn length(&self) -> i32 {
        self.distance(&Hex::ORIGIN)
    }

    /// Minimum number of single steps between two cells, saturating at
    /// `i32::MAX` for coordinates at opposite ends of the `i32` range
    pub fn distance(&self, other: &Hex) -> i32 {
        let dx = (self.x as i64 - other.x as i64).abs();
        let dy = (self.y as i64 - other.y as i64).abs();
        let dz = (self.z as i64 - other.z as i64).abs();
        ((dx + dy + dz) / 2).min(i32::MAX as i64) as i32
    }

    pub fn direction(index: usize) -> Hex {
        DIRECTIONS[index % 6]
    }

    pub fn neighbor(&self, index: usize) -> Hex {
        *self + Hex::direction(index)
    }

    pub fn neighbors(&self) -> [Hex; 6] {
        DIRECTIONS.map(|dir| *self + dir)
    }

    pub fn is_neighbor(&self, other: &Hex) -> bool {
        self.distance(other) == 1
    }

    /// Cells exactly `radius` steps away, walking around from the corner in
    /// direction 4. Radius 0 is the cell itself.
    pub fn ring(&self, radius: i32) -> Vec<Hex> {
        if radius < 0 { return Vec::new() }
        if radius == 0 { return vec![*self] }

        let mut ring = Vec::with_capacity(6 * radius as usize);
        let mut hex = *self + Hex::direction(4) * radius;
        for dir in 0..6 {
            for _ in 0..radius {
                ring.push(hex);
                hex = hex.neighbor(dir);
            }
        }
        ring
    }

    /// Cells within `radius` steps, nearest rings first.
    pub fn disk(&self, radius: i32) -> Vec<Hex> {
        (0..=radius).flat_map(|r| self.ring(r)).collect()
    }
}

impl Mul<i32> for Hex {
    type Output = Hex;
    fn mul(self, rhs: i32) -> Self::Output {
        Hex { x: self.x * rhs, y: self.y * rhs, z: self.z * rhs }
    }
}

impl Neg for Hex {
    type Output = Hex;
    fn neg(self) -> Self::Output {
        Hex { x: -self.x, y: -self.y, z: -self.z }
    }
}

/// Fractional cube coordinate, produced on the way from world space to a `Hex`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FracHex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FracHex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: -x - y }
    }

    pub fn round(&self) -> Hex {
        round(self.x, self.y, self.z)
    }
}

impl From<Hex> for FracHex {
    fn from(hex: Hex) -> Self {
        Self { x: hex.x as f64, y: hex.y as f64, z: hex.z as f64 }
    }
}

/// Cube rounding: the component that moved the most while rounding is rebuilt
/// from the other two so the result stays on the `x + y + z == 0` plane.
pub fn round(x0: f64, y0: f64, z0: f64) -> Hex {
    let mut x = x0.round();
    let mut y = y0.round();
    let mut z = z0.round();

    let x_diff = (x - x0).abs();
    let y_diff = (y - y0).abs();
    let z_diff = (z - z0).abs();

    if x_diff > y_diff && x_diff > z_diff {
        x = -y - z;
    } else if y_diff > z_diff {
        y = -x - z;
    } else {
        z = -x - y;
    }

    Hex { x: x as i32, y: y as i32, z: z as i32 }
}
