//! # Layout: Hex ↔ World Space Conversion
//!
//! A `Layout` places a hex grid on the world XY plane. Hexagons are
//! "pointy-top": `x` runs along world X, `y` runs diagonally down-right, and
//! the world Z of every cell is the layout origin's Z.
//!
//! ## Example
//!
//! ```rust
//! use hexcube::{Convert, Hex, Layout};
//! use glam::{Vec2, Vec3};
//!
//! let layout = Layout::new(Vec3::new(100., 50., 10.), Vec2::splat(32.));
//! let hex = Hex::new(3, -1);
//!
//! let world: Vec3 = layout.convert(hex);
//! assert_eq!(world.z, 10.);
//!
//! let back: Hex = layout.convert(world);
//! assert_eq!(hex, back);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::hex::{FracHex, Hex};

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Affine transformation matrix for pointy-top hex orientation
/// Format: (forward matrix, inverse matrix) for Hex ↔ Vec3 conversions
const ORIENTATION: ([f64; 4], [f64; 4]) = (
    [SQRT_3, SQRT_3 / 2., 0., 3. / 2.],
    [SQRT_3 / 3., -1. / 3., 0., 2. / 3.],
);

/// Trait for bidirectional coordinate conversion
pub trait Convert<T, U> {
    /// Convert from type T to type U
    fn convert(&self, it: T) -> U;
}

/// Placement of a hex grid in world space
///
/// - `origin`: world position of `Hex::ORIGIN`; its Z is shared by every cell
/// - `size`: per-axis hexagon size in world units
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Layout {
    pub origin: Vec3,
    pub size: Vec2,
}

impl Default for Layout {
    fn default() -> Self {
        Self { origin: Vec3::ZERO, size: Vec2::ONE }
    }
}

impl Layout {
    pub fn new(origin: Vec3, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// World position in unrounded hex space; Z is ignored
    pub fn fractional(&self, position: Vec3) -> FracHex {
        let px = (position.x - self.origin.x) as f64 / self.size.x as f64;
        let py = (position.y - self.origin.y) as f64 / self.size.y as f64;
        FracHex::new(
            ORIENTATION.1[0] * px + ORIENTATION.1[1] * py,
            ORIENTATION.1[2] * px + ORIENTATION.1[3] * py,
        )
    }
}

impl Convert<Vec3, Hex> for Layout {
    fn convert(&self, position: Vec3) -> Hex {
        self.fractional(position).round()
    }
}

impl Convert<Hex, Vec3> for Layout {
    fn convert(&self, hex: Hex) -> Vec3 {
        let x = (ORIENTATION.0[0] * hex.x as f64 + ORIENTATION.0[1] * hex.y as f64) * self.size.x as f64;
        let y = (ORIENTATION.0[2] * hex.x as f64 + ORIENTATION.0[3] * hex.y as f64) * self.size.y as f64;
        Vec3 {
            x: self.origin.x + x as f32,
            y: self.origin.y + y as f32,
            z: self.origin.z,
        }
    }
}

pub fn to_world(hex: Hex, origin: Vec3, size: Vec2) -> Vec3 {
    Layout::new(origin, size).convert(hex)
}

pub fn from_world(position: Vec3, origin: Vec3, size: Vec2) -> Hex {
    Layout::new(origin, size).convert(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // ===== CONVERSION TESTS =====

    #[test]
    fn test_origin_converts_to_layout_origin() {
        let layout = Layout::new(Vec3::new(5., -3., 2.), Vec2::splat(10.));
        let world: Vec3 = layout.convert(Hex::ORIGIN);
        assert!((world - layout.origin).length() < 0.001, "origin hex should sit on layout origin, got {world}");
    }

    #[test]
    fn test_z_passes_through() {
        let layout = Layout::new(Vec3::new(0., 0., 42.), Vec2::splat(1.));
        for hex in Hex::ORIGIN.disk(2) {
            let world: Vec3 = layout.convert(hex);
            assert_eq!(world.z, 42.);
        }
    }

    #[test]
    fn test_z_ignored_on_the_way_back() {
        let layout = Layout::default();
        let hex = Hex::new(2, 1);
        let world: Vec3 = layout.convert(hex);
        let back: Hex = layout.convert(world + Vec3::Z * 1000.);
        assert_eq!(back, hex);
    }

    #[test]
    fn test_size_scales_each_axis() {
        let small = Layout::new(Vec3::ZERO, Vec2::new(1., 1.));
        let wide = Layout::new(Vec3::ZERO, Vec2::new(2., 1.));
        let hex = Hex::new(1, 1);

        let a: Vec3 = small.convert(hex);
        let b: Vec3 = wide.convert(hex);
        assert!((b.x - 2. * a.x).abs() < 0.001);
        assert!((b.y - a.y).abs() < 0.001);
    }

    #[test]
    fn test_neighbors_equidistant() {
        let layout = Layout::new(Vec3::ZERO, Vec2::splat(1.));
        let center: Vec3 = layout.convert(Hex::ORIGIN);
        for neighbor in Hex::ORIGIN.neighbors() {
            let world: Vec3 = layout.convert(neighbor);
            assert!(((world - center).length() - SQRT_3 as f32).abs() < 0.001, "neighbor {neighbor} at {world}");
        }
    }

    #[test]
    fn test_roundtrip_sampled() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let hex = Hex::new(rng.random_range(-60..=60), rng.random_range(-60..=60));
            let origin = Vec3::new(
                rng.random_range(-500.0..500.0),
                rng.random_range(-500.0..500.0),
                rng.random_range(-50.0..50.0),
            );
            let size = Vec2::new(rng.random_range(1.0..80.0), rng.random_range(1.0..80.0));

            let back = from_world(to_world(hex, origin, size), origin, size);
            assert_eq!(back, hex, "roundtrip failed for {hex} origin {origin} size {size}");
        }
    }

    #[test]
    fn test_off_center_points_round_to_nearest() {
        let layout = Layout::new(Vec3::ZERO, Vec2::splat(10.));
        let hex = Hex::new(-2, 3);
        let center: Vec3 = layout.convert(hex);
        for nudge in [Vec3::X, Vec3::Y, -Vec3::X, -Vec3::Y] {
            let back: Hex = layout.convert(center + nudge * 3.);
            assert_eq!(back, hex, "nudge {nudge} left the cell");
        }
    }
}
