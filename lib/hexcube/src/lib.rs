mod hex;
mod layout;

pub use hex::{round, FracHex, Hex, DIRECTIONS};
pub use layout::{from_world, to_world, Convert, Layout};
